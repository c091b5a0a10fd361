//! Generic admin CRUD over the managed content kinds, plus the two
//! singleton upserts. All routes here sit behind the auth middleware.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use gateway::{
    RecordGateway,
    models::{
        RecordKind,
        about::{AboutPageContent, UpdateAboutPageContent},
        contact::{ContactInfo, UpdateContactInfo},
        upsert_singleton_record,
    },
};
use serde::Deserialize;
use serde_json::Value;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// Singletons are managed through their dedicated upsert routes, never the
/// generic id-addressed ones.
fn parse_kind(raw: &str) -> Result<RecordKind, ApiError> {
    let kind: RecordKind = raw
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("unknown record kind: {raw}")))?;
    if kind.is_singleton() {
        return Err(ApiError::BadRequest(format!(
            "kind {kind} is a singleton; use its dedicated route"
        )));
    }
    Ok(kind)
}

/// The delete action is destructive; the gateway call is never issued until
/// the caller has explicitly confirmed.
fn ensure_confirmed(confirm: bool) -> Result<(), ApiError> {
    if confirm {
        Ok(())
    } else {
        Err(ApiError::ConfirmationRequired)
    }
}

pub async fn list_records(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<ResponseJson<ApiResponse<Vec<Value>>>, ApiError> {
    let kind = parse_kind(&kind)?;
    let records = state.gateway.list(kind).await?;
    Ok(ResponseJson(ApiResponse::success(records)))
}

pub async fn create_record(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    axum::Json(fields): axum::Json<Value>,
) -> Result<ResponseJson<ApiResponse<Value>>, ApiError> {
    let kind = parse_kind(&kind)?;
    let saved = state.gateway.create(kind, fields).await?;
    Ok(ResponseJson(ApiResponse::success(saved)))
}

pub async fn update_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    axum::Json(fields): axum::Json<Value>,
) -> Result<ResponseJson<ApiResponse<Value>>, ApiError> {
    let kind = parse_kind(&kind)?;
    let saved = state.gateway.update(kind, &id, fields).await?;
    Ok(ResponseJson(ApiResponse::success(saved)))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Query(query): Query<DeleteQuery>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let kind = parse_kind(&kind)?;
    ensure_confirmed(query.confirm)?;
    state.gateway.delete(kind, &id).await?;
    tracing::info!(kind = %kind, id = %id, "record deleted");
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn upsert_contact_info(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<UpdateContactInfo>,
) -> Result<ResponseJson<ApiResponse<ContactInfo>>, ApiError> {
    let saved =
        upsert_singleton_record::<ContactInfo>(state.gateway.as_ref(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(saved)))
}

pub async fn upsert_about(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<UpdateAboutPageContent>,
) -> Result<ResponseJson<ApiResponse<AboutPageContent>>, ApiError> {
    let saved =
        upsert_singleton_record::<AboutPageContent>(state.gateway.as_ref(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(saved)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/records/{kind}", get(list_records).post(create_record))
        .route(
            "/records/{kind}/{id}",
            put(update_record).delete(delete_record),
        )
        .route("/contact-info", put(upsert_contact_info))
        .route("/about", put(upsert_about))
}
