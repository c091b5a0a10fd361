//! Gateway traits the services layer depends on, plus the in-memory file
//! representation that flows from upload forms through the image pipeline
//! into storage.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{error::GatewayError, models::RecordKind};

/// Record CRUD surface of the backend service.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    async fn list(&self, kind: RecordKind) -> Result<Vec<Value>, GatewayError>;

    async fn get(&self, kind: RecordKind, id: &str) -> Result<Option<Value>, GatewayError>;

    async fn create(&self, kind: RecordKind, fields: Value) -> Result<Value, GatewayError>;

    async fn update(&self, kind: RecordKind, id: &str, fields: Value)
    -> Result<Value, GatewayError>;

    async fn delete(&self, kind: RecordKind, id: &str) -> Result<(), GatewayError>;

    /// Check-then-insert-or-update for the well-known-id kinds; the row may
    /// not exist yet.
    async fn upsert_singleton(&self, kind: RecordKind, fields: Value)
    -> Result<Value, GatewayError>;
}

/// File storage surface of the backend service.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Upload a file and return its public URL.
    async fn upload_file(&self, file: &StoredFile) -> Result<String, GatewayError>;
}

/// A file held in memory on its way to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub last_modified: DateTime<Utc>,
}

impl StoredFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
            last_modified: Utc::now(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Locally renderable stand-in for the eventual hosted URL.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.bytes)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image() {
        assert!(StoredFile::new("a.png", "image/png", vec![]).is_image());
        assert!(!StoredFile::new("a.pdf", "application/pdf", vec![]).is_image());
    }

    #[test]
    fn test_data_url() {
        let file = StoredFile::new("a.png", "image/png", vec![1, 2, 3]);
        assert_eq!(file.data_url(), "data:image/png;base64,AQID");
    }
}
