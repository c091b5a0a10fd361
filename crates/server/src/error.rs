use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gateway::GatewayError;
use services::services::record_form::FormError;
use thiserror::Error;
use utils::response::ApiResponse;

/// Route-level error. Every failure reaching a handler becomes a visible,
/// structured message; nothing crashes the admin surface and nothing is
/// retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("confirmation required")]
    ConfirmationRequired,
    #[error("not authenticated")]
    Unauthorized,
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Gateway(e) => gateway_status(e),
            Self::Form(FormError::Upload(e) | FormError::Save(e)) => gateway_status(e),
            Self::ConfirmationRequired | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

fn gateway_status(e: &GatewayError) -> StatusCode {
    match e {
        GatewayError::NotFound => StatusCode::NOT_FOUND,
        GatewayError::InvalidCredentials | GatewayError::NotAuthenticated => {
            StatusCode::UNAUTHORIZED
        }
        GatewayError::Transport(_) | GatewayError::Timeout | GatewayError::Http { .. } => {
            StatusCode::BAD_GATEWAY
        }
        GatewayError::Serde(_) | GatewayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}
