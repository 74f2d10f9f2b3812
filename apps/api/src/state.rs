use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;
use crate::inference::artifacts::PreprocessingArtifacts;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Fitted artifacts, read-only after startup. `None` when no artifact
    /// path was configured; assessment endpoints then answer 503.
    pub model: Option<Arc<PreprocessingArtifacts>>,
}

impl AppState {
    pub fn require_model(&self) -> Result<Arc<PreprocessingArtifacts>, AppError> {
        self.model.clone().ok_or(AppError::ModelUnavailable)
    }
}
