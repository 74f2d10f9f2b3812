//! Fitted preprocessing + model artifacts, produced once by offline training.
//!
//! Loaded at startup, validated against `FeatureRecord::COLUMNS`, then shared
//! read-only behind an `Arc` for the life of the process.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::inference::classifier::{Classifier, ClassifierModel};
use crate::inference::preprocessing::{Imputer, LabelEncoder, StandardScaler};
use crate::models::features::{Cell, FeatureRecord};

/// Bump whenever the artifact layout or the feature schema changes.
pub const ARTIFACT_SCHEMA_VERSION: u32 = 1;

/// The record schema and the artifacts disagree. Always a configuration
/// defect, never recovered from.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("artifact columns {found:?} do not match feature schema {expected:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("{component} has {found} entries, expected {expected}")]
    LengthMismatch {
        component: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("encoder defined for unknown column '{0}'")]
    UnknownEncoderColumn(String),

    #[error("row contains column '{0}' not present in the artifact schema")]
    UnexpectedColumn(String),

    #[error("column '{column}' has non-numeric value '{value}' and no encoder")]
    NonNumericValue { column: String, value: String },

    #[error("classifier expects {expected} features, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("invalid classifier: {0}")]
    InvalidModel(String),
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifacts: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse artifacts: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("artifact schema version {found} is not supported (expected {expected})")]
    UnsupportedVersion { expected: u32, found: u32 },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessingArtifacts {
    pub schema_version: u32,
    /// Training-time column order (`X_columns`).
    pub columns: Vec<String>,
    pub imputer: Imputer,
    /// Keyed by column; only columns that were string-typed at training time.
    #[serde(default)]
    pub encoders: BTreeMap<String, LabelEncoder>,
    pub scaler: StandardScaler,
    pub classifier: ClassifierModel,
}

impl PreprocessingArtifacts {
    /// Reads and validates an artifact file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let artifacts = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            columns = artifacts.columns.len(),
            backend = artifacts.classifier().backend(),
            "Loaded placement model artifacts"
        );
        Ok(artifacts)
    }

    pub fn from_json(raw: &str) -> Result<Self, ArtifactError> {
        let artifacts: Self = serde_json::from_str(raw)?;
        artifacts.validate()?;
        Ok(artifacts)
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_classifier()
    }

    /// Checks the artifacts against the compiled feature schema and for
    /// internal consistency.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.schema_version != ARTIFACT_SCHEMA_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                expected: ARTIFACT_SCHEMA_VERSION,
                found: self.schema_version,
            });
        }

        if self.columns.iter().map(String::as_str).ne(FeatureRecord::COLUMNS) {
            return Err(SchemaError::ColumnMismatch {
                expected: FeatureRecord::COLUMNS.iter().map(|c| c.to_string()).collect(),
                found: self.columns.clone(),
            }
            .into());
        }

        let n_columns = self.columns.len();
        for (component, found) in [
            ("imputer.statistics", self.imputer.statistics.len()),
            ("scaler.mean", self.scaler.mean.len()),
            ("scaler.scale", self.scaler.scale.len()),
        ] {
            if found != n_columns {
                return Err(SchemaError::LengthMismatch {
                    component,
                    expected: n_columns,
                    found,
                }
                .into());
            }
        }

        if let Some(column) = self.encoders.keys().find(|k| !self.columns.contains(*k)) {
            return Err(SchemaError::UnknownEncoderColumn(column.clone()).into());
        }

        // A text fill value is only usable where an encoder can turn it into a number.
        for (column, statistic) in self.columns.iter().zip(&self.imputer.statistics) {
            if let Cell::Text(value) = statistic {
                if !self.encoders.contains_key(column) {
                    return Err(SchemaError::NonNumericValue {
                        column: column.clone(),
                        value: value.clone(),
                    }
                    .into());
                }
            }
        }

        self.classifier.validate()?;
        let n_features = self.classifier().n_features();
        if n_features != n_columns {
            return Err(SchemaError::DimensionMismatch {
                expected: n_columns,
                found: n_features,
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::inference::fixtures::{sample_artifacts, SAMPLE_ARTIFACTS_JSON};

    fn sample_json() -> serde_json::Value {
        serde_json::from_str(SAMPLE_ARTIFACTS_JSON).unwrap()
    }

    #[test]
    fn test_shipped_artifacts_are_valid() {
        let artifacts = sample_artifacts();
        assert_eq!(artifacts.schema_version, ARTIFACT_SCHEMA_VERSION);
        assert_eq!(artifacts.columns, FeatureRecord::COLUMNS.to_vec());
        assert_eq!(artifacts.classifier().backend(), "random_forest");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_ARTIFACTS_JSON.as_bytes()).unwrap();
        let artifacts = PreprocessingArtifacts::load(file.path()).unwrap();
        assert_eq!(artifacts.encoders.len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PreprocessingArtifacts::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ArtifactError::Io(_))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = PreprocessingArtifacts::from_json("{ not json");
        assert!(matches!(result, Err(ArtifactError::Parse(_))));
    }

    #[test]
    fn test_rejects_other_schema_version() {
        let mut json = sample_json();
        json["schema_version"] = 2.into();
        let result = PreprocessingArtifacts::from_json(&json.to_string());
        assert!(matches!(
            result,
            Err(ArtifactError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_reordered_columns() {
        let mut json = sample_json();
        let columns = json["columns"].as_array_mut().unwrap();
        columns.swap(8, 9);
        let result = PreprocessingArtifacts::from_json(&json.to_string());
        assert!(matches!(
            result,
            Err(ArtifactError::Schema(SchemaError::ColumnMismatch { .. }))
        ));
    }

    #[test]
    fn test_rejects_short_scaler() {
        let mut json = sample_json();
        json["scaler"]["mean"].as_array_mut().unwrap().pop();
        let result = PreprocessingArtifacts::from_json(&json.to_string());
        assert!(matches!(
            result,
            Err(ArtifactError::Schema(SchemaError::LengthMismatch {
                component: "scaler.mean",
                ..
            }))
        ));
    }

    #[test]
    fn test_rejects_encoder_for_unknown_column() {
        let mut json = sample_json();
        json["encoders"]["Gender"] = serde_json::json!({ "classes": ["F", "M"] });
        let result = PreprocessingArtifacts::from_json(&json.to_string());
        assert!(matches!(
            result,
            Err(ArtifactError::Schema(SchemaError::UnknownEncoderColumn(_)))
        ));
    }

    #[test]
    fn test_rejects_classifier_dimension_mismatch() {
        let mut json = sample_json();
        json["classifier"] = serde_json::json!({
            "type": "logistic_regression",
            "coef": [0.1, 0.2, 0.3],
            "intercept": 0.0
        });
        let result = PreprocessingArtifacts::from_json(&json.to_string());
        assert!(matches!(
            result,
            Err(ArtifactError::Schema(SchemaError::DimensionMismatch {
                expected: 10,
                found: 3
            }))
        ));
    }

    #[test]
    fn test_rejects_text_fill_value_without_encoder() {
        let mut json = sample_json();
        json["imputer"]["statistics"][0] = "high".into();
        let result = PreprocessingArtifacts::from_json(&json.to_string());
        assert!(matches!(
            result,
            Err(ArtifactError::Schema(SchemaError::NonNumericValue { ref column, .. }))
                if column == "CGPA"
        ));
    }
}
