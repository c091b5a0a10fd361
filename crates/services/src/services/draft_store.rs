//! Durable mirror of the admin editing session.
//!
//! The store holds at most one persisted session, keyed by the admin screen
//! path it was saved under. It is a derived mirror, never authoritative:
//! write failures are logged and swallowed, and anything malformed loads as
//! "no session".

use std::{
    fs, io,
    path::PathBuf,
    sync::Mutex,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::editing_session::FormKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    /// Admin screen path the session belongs to, e.g. `/admin/posts`.
    pub path: String,
    pub form_type: FormKind,
    pub item: Option<Value>,
}

pub trait DraftStore: Send + Sync {
    fn load(&self) -> Option<PersistedSession>;
    fn save(&self, session: &PersistedSession);
    fn clear(&self);
}

/// File-backed store; survives a full process restart.
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Option<PersistedSession> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::debug!(error = %e, "discarding malformed persisted session");
                None
            }
        }
    }

    fn save(&self, session: &PersistedSession) {
        let raw = match serde_json::to_string(session) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize editing session");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(e) = fs::write(&self.path, raw) {
            tracing::warn!(error = %e, path = %self.path.display(), "failed to persist editing session");
        }
    }

    fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(error = %e, "failed to clear persisted editing session");
            }
        }
    }
}

/// In-memory store for tests; the slot keeps raw JSON so corruption can be
/// injected.
#[derive(Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inject_raw(&self, raw: impl Into<String>) {
        *self.slot.lock().unwrap() = Some(raw.into());
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Option<PersistedSession> {
        let slot = self.slot.lock().unwrap();
        let raw = slot.as_ref()?;
        serde_json::from_str(raw).ok()
    }

    fn save(&self, session: &PersistedSession) {
        if let Ok(raw) = serde_json::to_string(session) {
            *self.slot.lock().unwrap() = Some(raw);
        }
    }

    fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn session() -> PersistedSession {
        PersistedSession {
            path: "/admin/posts".into(),
            form_type: FormKind::Post,
            item: Some(json!({"title": "Draf berita"})),
        }
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDraftStore::new(dir.path().join("editing-session.json"));

        assert!(store.load().is_none());
        store.save(&session());
        assert_eq!(store.load(), Some(session()));
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_malformed_contents_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editing-session.json");
        fs::write(&path, "{not json").unwrap();
        assert!(FileDraftStore::new(path).load().is_none());
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDraftStore::new(dir.path().join("missing.json"));
        store.clear();
        store.clear();
    }

    #[test]
    fn test_memory_store_corruption_loads_as_none() {
        let store = MemoryDraftStore::new();
        store.inject_raw("%%%");
        assert!(store.load().is_none());
    }
}
