//! JSON key conversion between the app-facing camelCase record shape and
//! the backend's snake_case row shape.
//!
//! The conversion crosses the wire boundary exactly once, inside the
//! gateway client; nothing above the adapter ever sees snake_case keys.

use serde_json::{Map, Value};

pub fn camel_to_snake(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn snake_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Rename the top-level keys of a JSON object to snake_case. Rows are flat,
/// so nested values pass through untouched. Non-objects pass through whole.
pub fn keys_to_snake(value: Value) -> Value {
    map_keys(value, camel_to_snake)
}

/// Rename the top-level keys of a JSON object to camelCase.
pub fn keys_to_camel(value: Value) -> Value {
    map_keys(value, snake_to_camel)
}

fn map_keys(value: Value, f: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(f(&k), v);
            }
            Value::Object(out)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("imageUrl"), "image_url");
        assert_eq!(camel_to_snake("createdAt"), "created_at");
        assert_eq!(camel_to_snake("id"), "id");
    }

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("image_url"), "imageUrl");
        assert_eq!(snake_to_camel("created_at"), "createdAt");
        assert_eq!(snake_to_camel("title"), "title");
    }

    #[test]
    fn test_round_trip() {
        for key in ["imageUrl", "previousSchool", "mapsUrl", "id"] {
            assert_eq!(snake_to_camel(&camel_to_snake(key)), key);
        }
    }

    #[test]
    fn test_keys_to_snake_object() {
        let row = keys_to_snake(json!({"imageUrl": "u", "title": "t"}));
        assert_eq!(row, json!({"image_url": "u", "title": "t"}));
    }

    #[test]
    fn test_keys_to_camel_object() {
        let record = keys_to_camel(json!({"image_url": "u", "created_at": "2024-01-01"}));
        assert_eq!(record, json!({"imageUrl": "u", "createdAt": "2024-01-01"}));
    }

    #[test]
    fn test_non_object_passes_through() {
        assert_eq!(keys_to_snake(json!("plain")), json!("plain"));
    }
}
