pub mod admin;
pub mod auth;
pub mod editing;
pub mod forms;
pub mod public;

use axum::{Router, middleware};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .merge(admin::router())
        .merge(forms::router())
        .merge(editing::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    Router::new()
        .nest(
            "/api",
            public::router().merge(auth::router()).nest("/admin", admin),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
