//! Admin form submission. One request carries the whole draft (fields plus
//! an optional replacement image) and runs the convert → upload → persist
//! pipeline; a successful save also closes the editing session so list
//! screens re-fetch.

use axum::{
    Router,
    extract::{Multipart, Path, State},
    response::Json as ResponseJson,
    routing::post,
};
use gateway::StoredFile;
use serde::Deserialize;
use serde_json::{Map, Value};
use services::services::{editing_session::FormKind, record_form::RecordForm};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPayload {
    /// Record being edited; absent or empty-id means create.
    pub item: Option<Value>,
    #[serde(default)]
    pub fields: Map<String, Value>,
    pub quality: Option<f32>,
}

pub async fn submit_form(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> Result<ResponseJson<ApiResponse<Value>>, ApiError> {
    let form_type: FormKind = kind
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("unknown form kind: {kind}")))?;

    let mut payload = FormPayload::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("payload") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                payload = serde_json::from_str(&text)
                    .map_err(|e| ApiError::BadRequest(format!("invalid payload: {e}")))?;
            }
            Some("image") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                image = Some(StoredFile::new(name, content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let mut form = RecordForm::new(form_type, payload.item);
    if let Some(quality) = payload.quality {
        form = form.with_quality(quality);
    }
    for (field, value) in payload.fields {
        form.set_field(&field, value);
    }
    if let Some(file) = image {
        form.select_image(file);
    }

    let saved = form
        .submit(state.gateway.as_ref(), |pct| {
            tracing::debug!(pct, "form submit progress");
        })
        .await?;

    state.editing.close_form().await;
    Ok(ResponseJson(ApiResponse::success(saved)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/forms/{kind}", post(submit_form))
}
