use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Record, RecordKind};

/// News article shown on the public site and managed from the back office.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Post {
    const KIND: RecordKind = RecordKind::Post;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let post = Post {
            id: "p1".into(),
            title: "Open house".into(),
            content: "Doors open at nine.".into(),
            excerpt: None,
            image_url: Some("https://cdn.example/p1.webp".into()),
            created_at: None,
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["imageUrl"], json!("https://cdn.example/p1.webp"));
        assert!(value.get("image_url").is_none());
    }
}
