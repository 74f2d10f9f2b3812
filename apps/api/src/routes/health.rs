use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::inference::artifacts::ARTIFACT_SCHEMA_VERSION;
use crate::state::AppState;

/// GET /health
/// Returns service version and whether the placement model is loaded.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "placement-api",
        "model_loaded": state.model.is_some(),
        "model_backend": state.model.as_ref().map(|m| m.classifier().backend()),
        "schema_version": ARTIFACT_SCHEMA_VERSION
    }))
}
