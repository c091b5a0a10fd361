//! Routes over the editing-session manager: open, inspect/restore, close.

use axum::{
    Router,
    extract::{Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use services::services::editing_session::{EditingSession, FormKind};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

/// Session together with its address-bar mirror, so the admin surface can
/// keep its URL in sync.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session: EditingSession,
    pub query_params: Vec<(String, String)>,
}

impl From<EditingSession> for SessionView {
    fn from(session: EditingSession) -> Self {
        let query_params = session.query_params();
        Self {
            session,
            query_params,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenForm {
    pub path: String,
    pub form_type: FormKind,
    pub item: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RestoreQuery {
    pub path: String,
}

pub async fn open(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<OpenForm>,
) -> Result<ResponseJson<ApiResponse<SessionView>>, ApiError> {
    let session = state
        .editing
        .open_form(&req.path, req.form_type, req.item)
        .await;
    Ok(ResponseJson(ApiResponse::success(session.into())))
}

/// Runs the restoration protocol for the given path; the response is the
/// resumed session, or nothing when no session belongs to that path.
pub async fn current(
    State(state): State<AppState>,
    Query(query): Query<RestoreQuery>,
) -> Result<ResponseJson<ApiResponse<Option<SessionView>>>, ApiError> {
    let session = state.editing.restore(&query.path).await;
    Ok(ResponseJson(ApiResponse::success(
        session.map(SessionView::from),
    )))
}

pub async fn close(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.editing.close_form().await;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/editing-session", get(current).post(open).delete(close))
}
