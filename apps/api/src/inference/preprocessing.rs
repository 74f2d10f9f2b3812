//! Preprocessing Pipeline — replays the training-time transforms on one row.
//!
//! Order matters and mirrors training:
//! 1. align to the artifact column list, imputing absent cells
//! 2. label-encode string cells (unknown categories → `UNKNOWN_CATEGORY`)
//! 3. emit values in artifact column order
//! 4. standard-scale

use serde::{Deserialize, Serialize};

use crate::inference::artifacts::{PreprocessingArtifacts, SchemaError};
use crate::models::features::{Cell, FeatureRow};

/// Code assigned to a category never seen while fitting the encoder.
pub const UNKNOWN_CATEGORY: f64 = -1.0;

/// Most-frequent value per column, in artifact column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    pub statistics: Vec<Cell>,
}

/// Bijection between known category strings and their index in `classes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn encode(&self, category: &str) -> f64 {
        self.classes
            .iter()
            .position(|c| c == category)
            .map(|i| i as f64)
            .unwrap_or(UNKNOWN_CATEGORY)
    }
}

/// Per-column `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn transform(&self, values: &mut [f64]) {
        for ((value, mean), scale) in values.iter_mut().zip(&self.mean).zip(&self.scale) {
            // Zero-variance columns were fit with unit scale.
            let scale = if *scale == 0.0 { 1.0 } else { *scale };
            *value = (*value - mean) / scale;
        }
    }
}

/// Runs the full pipeline and returns the classifier input vector.
pub fn preprocess(
    row: &FeatureRow,
    artifacts: &PreprocessingArtifacts,
) -> Result<Vec<f64>, SchemaError> {
    let mut values = encode_row(row, artifacts)?;
    artifacts.scaler.transform(&mut values);
    Ok(values)
}

/// Steps 1–3: imputed, label-encoded values in artifact column order, unscaled.
pub fn encode_row(
    row: &FeatureRow,
    artifacts: &PreprocessingArtifacts,
) -> Result<Vec<f64>, SchemaError> {
    if let Some(unexpected) = row
        .columns()
        .find(|c| !artifacts.columns.iter().any(|known| known == c))
    {
        return Err(SchemaError::UnexpectedColumn(unexpected.to_string()));
    }

    artifacts
        .columns
        .iter()
        .zip(&artifacts.imputer.statistics)
        .map(|(column, fallback)| {
            let cell = row.get(column).unwrap_or(fallback);
            encode_cell(column, cell, artifacts)
        })
        .collect()
}

fn encode_cell(
    column: &str,
    cell: &Cell,
    artifacts: &PreprocessingArtifacts,
) -> Result<f64, SchemaError> {
    match cell {
        // Only string-typed cells were label-encoded at training time.
        Cell::Number(value) => Ok(*value),
        Cell::Text(category) => match artifacts.encoders.get(column) {
            Some(encoder) => Ok(encoder.encode(category)),
            None => Err(SchemaError::NonNumericValue {
                column: column.to_string(),
                value: category.clone(),
            }),
        },
    }
}
