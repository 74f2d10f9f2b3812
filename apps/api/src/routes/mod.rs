pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::assessment::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/assessments",
            post(handlers::handle_assess_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/assessments/text",
            post(handlers::handle_assess_text),
        )
        .route("/api/v1/features", post(handlers::handle_extract_features))
        .with_state(state)
}
