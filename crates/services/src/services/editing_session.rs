//! Admin editing-session manager.
//!
//! Single source of truth for "is an edit/create form open, for which
//! content kind, and with what starting data". The active session is
//! mirrored into navigable query parameters and a path-keyed persistent
//! store so a reload or back-navigation resumes an in-progress edit instead
//! of discarding it. The manager performs no network I/O; its only failure
//! mode is malformed mirrored state, which reads as "no session".

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumString};
use tokio::sync::{RwLock, watch};
use ts_rs::TS;

use gateway::models::RecordKind;

use super::draft_store::{DraftStore, PersistedSession};

pub const FORM_TYPE_PARAM: &str = "formType";
pub const ITEM_ID_PARAM: &str = "itemId";
pub const DRAFT_PARAM: &str = "draft";
/// `itemId` value marking a draft that has never been saved.
pub const NEW_ITEM_SENTINEL: &str = "new";

/// Content kinds that have an admin edit/create form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FormKind {
    Post,
    Gallery,
    Staff,
    Extracurricular,
    Hero,
    Facility,
    Faq,
    Achievement,
}

impl FormKind {
    pub fn record_kind(self) -> RecordKind {
        match self {
            Self::Post => RecordKind::Post,
            Self::Gallery => RecordKind::Gallery,
            Self::Staff => RecordKind::Staff,
            Self::Extracurricular => RecordKind::Extracurricular,
            Self::Hero => RecordKind::Hero,
            Self::Facility => RecordKind::Facility,
            Self::Faq => RecordKind::Faq,
            Self::Achievement => RecordKind::Achievement,
        }
    }

    /// FAQ entries are the only managed kind without an image.
    pub fn supports_image(self) -> bool {
        !matches!(self, Self::Faq)
    }
}

/// At most one of these is open per admin surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct EditingSession {
    pub form_type: FormKind,
    /// Snapshot of the record being edited. `None` for a brand-new draft;
    /// may also be a populated object with an empty id for an unsaved draft
    /// started elsewhere.
    pub item: Option<Value>,
}

impl EditingSession {
    /// Identifier of the record under edit, when it represents one that is
    /// actually stored. Empty ids count as absent.
    pub fn item_id(&self) -> Option<&str> {
        self.item
            .as_ref()?
            .get("id")?
            .as_str()
            .filter(|id| !id.is_empty())
    }

    /// Mirror of this session as address query parameters.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![(FORM_TYPE_PARAM.to_string(), self.form_type.to_string())];
        match self.item_id() {
            Some(id) => params.push((ITEM_ID_PARAM.to_string(), id.to_string())),
            None => {
                params.push((ITEM_ID_PARAM.to_string(), NEW_ITEM_SENTINEL.to_string()));
                if let Some(item) = &self.item {
                    params.push((DRAFT_PARAM.to_string(), encode_draft(item)));
                }
            }
        }
        params
    }

    /// Parse mirrored query parameters back into a session. Malformed state
    /// (unknown kind, corrupted draft) yields `None`, never an error.
    pub fn from_query_params(pairs: &[(String, String)]) -> Option<Self> {
        let get = |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };

        let form_type: FormKind = get(FORM_TYPE_PARAM)?.parse().ok()?;
        match get(ITEM_ID_PARAM) {
            Some(NEW_ITEM_SENTINEL) | None => {
                let item = match get(DRAFT_PARAM) {
                    Some(encoded) => Some(decode_draft(encoded)?),
                    None => None,
                };
                Some(Self { form_type, item })
            }
            Some(id) => Some(Self {
                form_type,
                item: Some(serde_json::json!({ "id": id })),
            }),
        }
    }
}

fn encode_draft(item: &Value) -> String {
    BASE64.encode(item.to_string())
}

fn decode_draft(encoded: &str) -> Option<Value> {
    let bytes = BASE64.decode(encoded).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Published on every open/close transition; list screens re-fetch when the
/// phase goes back to `Closed` (a save may have just completed).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Closed,
    Open(FormKind),
}

struct ManagerState {
    active: Option<EditingSession>,
    path: Option<String>,
}

pub struct EditingSessionManager {
    store: Box<dyn DraftStore>,
    state: RwLock<ManagerState>,
    phase: watch::Sender<SessionPhase>,
}

impl EditingSessionManager {
    pub fn new(store: Box<dyn DraftStore>) -> Self {
        let (phase, _) = watch::channel(SessionPhase::Closed);
        Self {
            store,
            state: RwLock::new(ManagerState {
                active: None,
                path: None,
            }),
            phase,
        }
    }

    /// Start an editing session at `path`, silently replacing any session
    /// already open. `item = None` is a create flow with empty defaults;
    /// otherwise an edit flow seeded from the given record.
    pub async fn open_form(
        &self,
        path: &str,
        form_type: FormKind,
        item: Option<Value>,
    ) -> EditingSession {
        let session = EditingSession { form_type, item };
        {
            let mut state = self.state.write().await;
            state.active = Some(session.clone());
            state.path = Some(path.to_string());
        }
        self.store.save(&PersistedSession {
            path: path.to_string(),
            form_type,
            item: session.item.clone(),
        });
        self.phase.send_replace(SessionPhase::Open(form_type));
        tracing::debug!(form_type = %form_type, path, "editing session opened");
        session
    }

    /// Clear the active session, on explicit cancel or after a completed
    /// save. Removes both mirrors.
    pub async fn close_form(&self) {
        {
            let mut state = self.state.write().await;
            state.active = None;
            state.path = None;
        }
        self.store.clear();
        self.phase.send_replace(SessionPhase::Closed);
        tracing::debug!("editing session closed");
    }

    pub async fn current(&self) -> Option<EditingSession> {
        self.state.read().await.active.clone()
    }

    /// Restoration protocol, run on mount/path change: adopt the persisted
    /// session only when it was stored for `path`. A session persisted for a
    /// different screen is discarded rather than leaked into this one.
    pub async fn restore(&self, path: &str) -> Option<EditingSession> {
        let mut state = self.state.write().await;

        // In-memory state is authoritative over the mirrors.
        if state.path.as_deref() == Some(path) {
            if let Some(active) = &state.active {
                return Some(active.clone());
            }
        } else if state.active.take().is_some() {
            state.path = None;
            self.phase.send_replace(SessionPhase::Closed);
        }

        let persisted = self.store.load()?;
        if persisted.path != path {
            self.store.clear();
            return None;
        }

        let session = EditingSession {
            form_type: persisted.form_type,
            item: persisted.item,
        };
        state.active = Some(session.clone());
        state.path = Some(path.to_string());
        self.phase.send_replace(SessionPhase::Open(session.form_type));
        tracing::debug!(form_type = %session.form_type, path, "editing session restored");
        Some(session)
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.phase.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::services::draft_store::{FileDraftStore, MemoryDraftStore};

    fn manager() -> EditingSessionManager {
        EditingSessionManager::new(Box::new(MemoryDraftStore::new()))
    }

    #[tokio::test]
    async fn test_open_replaces_prior_session_wholesale() {
        let mgr = manager();
        mgr.open_form("/admin/posts", FormKind::Post, Some(json!({"id": "p1"})))
            .await;
        mgr.open_form("/admin/posts", FormKind::Gallery, Some(json!({"id": "g2"})))
            .await;

        let active = mgr.current().await.unwrap();
        assert_eq!(active.form_type, FormKind::Gallery);
        assert_eq!(active.item_id(), Some("g2"));
    }

    #[tokio::test]
    async fn test_close_clears_session_and_mirror() {
        let store = MemoryDraftStore::new();
        let mgr = EditingSessionManager::new(Box::new(store));
        mgr.open_form("/admin/staff", FormKind::Staff, None).await;
        mgr.close_form().await;

        assert!(mgr.current().await.is_none());
        assert!(mgr.restore("/admin/staff").await.is_none());
        assert_eq!(*mgr.subscribe().borrow(), SessionPhase::Closed);
    }

    #[tokio::test]
    async fn test_restore_is_path_scoped() {
        let dir = tempfile::tempdir().unwrap();
        let slot = dir.path().join("session.json");

        let mgr = EditingSessionManager::new(Box::new(FileDraftStore::new(&slot)));
        mgr.open_form("/admin/posts", FormKind::Post, Some(json!({"title": "Draf"})))
            .await;

        // Fresh manager, as after a reload.
        let reloaded = EditingSessionManager::new(Box::new(FileDraftStore::new(&slot)));
        assert!(reloaded.restore("/admin/staff").await.is_none());

        // The mismatching restore discarded the stale slot.
        let reloaded = EditingSessionManager::new(Box::new(FileDraftStore::new(&slot)));
        assert!(reloaded.restore("/admin/posts").await.is_none());
    }

    #[tokio::test]
    async fn test_restore_same_path_resumes_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let slot = dir.path().join("session.json");

        let mgr = EditingSessionManager::new(Box::new(FileDraftStore::new(&slot)));
        let opened = mgr
            .open_form(
                "/admin/posts",
                FormKind::Post,
                Some(json!({"id": "", "title": "Pengumuman baru"})),
            )
            .await;

        let reloaded = EditingSessionManager::new(Box::new(FileDraftStore::new(&slot)));
        let restored = reloaded.restore("/admin/posts").await.unwrap();
        assert_eq!(restored, opened);
        assert_eq!(
            *reloaded.subscribe().borrow(),
            SessionPhase::Open(FormKind::Post)
        );
    }

    #[tokio::test]
    async fn test_corrupted_persisted_state_reads_as_no_session() {
        let store = MemoryDraftStore::new();
        store.inject_raw("{\"path\": 42}");
        let mgr = EditingSessionManager::new(Box::new(store));
        assert!(mgr.restore("/admin/posts").await.is_none());
    }

    #[tokio::test]
    async fn test_phase_transitions_notify_subscribers() {
        let mgr = manager();
        let mut rx = mgr.subscribe();

        mgr.open_form("/admin/faqs", FormKind::Faq, None).await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SessionPhase::Open(FormKind::Faq));

        mgr.close_form().await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SessionPhase::Closed);
    }

    #[test]
    fn test_query_params_for_existing_record() {
        let session = EditingSession {
            form_type: FormKind::Gallery,
            item: Some(json!({"id": "g1", "title": "Studi tur"})),
        };
        assert_eq!(
            session.query_params(),
            vec![
                ("formType".to_string(), "gallery".to_string()),
                ("itemId".to_string(), "g1".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_params_round_trip_for_seeded_draft() {
        let session = EditingSession {
            form_type: FormKind::Achievement,
            item: Some(json!({"id": "", "title": "Juara 1"})),
        };
        let params = session.query_params();
        assert!(params.contains(&("itemId".to_string(), "new".to_string())));

        let parsed = EditingSession::from_query_params(&params).unwrap();
        assert_eq!(parsed.form_type, FormKind::Achievement);
        assert_eq!(parsed.item.unwrap()["title"], "Juara 1");
    }

    #[test]
    fn test_plain_create_has_no_draft_param() {
        let session = EditingSession {
            form_type: FormKind::Post,
            item: None,
        };
        let params = session.query_params();
        assert_eq!(params.len(), 2);
        let parsed = EditingSession::from_query_params(&params).unwrap();
        assert!(parsed.item.is_none());
    }

    #[test]
    fn test_malformed_query_params_read_as_no_session() {
        let corrupt_draft = vec![
            ("formType".to_string(), "post".to_string()),
            ("itemId".to_string(), "new".to_string()),
            ("draft".to_string(), "!!not-base64!!".to_string()),
        ];
        assert!(EditingSession::from_query_params(&corrupt_draft).is_none());

        let unknown_kind = vec![("formType".to_string(), "banner".to_string())];
        assert!(EditingSession::from_query_params(&unknown_kind).is_none());

        assert!(EditingSession::from_query_params(&[]).is_none());
    }
}
