//! Admin sign-in/sign-out plus the middleware guarding the admin routes.

use axum::{
    Router,
    extract::{Request, State},
    middleware::Next,
    response::{Json as ResponseJson, Response},
    routing::{get, post},
};
use gateway::Session;
use serde::Deserialize;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<LoginRequest>,
) -> Result<ResponseJson<ApiResponse<Session>>, ApiError> {
    let session = state.gateway.sign_in(&req.email, &req.password).await?;
    Ok(ResponseJson(ApiResponse::success(session)))
}

pub async fn logout(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.gateway.sign_out().await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn session(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Option<Session>>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(
        state.gateway.current_session(),
    )))
}

/// Rejects requests unless a session is active and the request carries its
/// bearer token.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = state
        .gateway
        .current_session()
        .ok_or(ApiError::Unauthorized)?;

    let authorized = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| token == session.access_token);
    if !authorized {
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
}
