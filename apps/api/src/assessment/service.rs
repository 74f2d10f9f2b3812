//! Assessment pipeline: text → features → preprocessing → classifier → tips.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::assessment::recommendations::generate_recommendations;
use crate::errors::AppError;
use crate::extraction::document::{extract_text, ExtractionError, UploadedDocument};
use crate::extraction::features::parse_resume;
use crate::inference::artifacts::{PreprocessingArtifacts, SchemaError};
use crate::inference::classifier::predict;
use crate::inference::preprocessing::preprocess;
use crate::models::features::FeatureRecord;
use crate::models::prediction::Prediction;

#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub assessment_id: Uuid,
    pub prediction: Prediction,
    /// Model probability of the `Placed` class.
    pub placement_probability: f64,
    pub features: FeatureRecord,
    pub recommendations: Vec<String>,
    pub assessed_at: DateTime<Utc>,
}

/// Runs the full pipeline on already-extracted resume text.
pub fn assess_text(
    text: &str,
    artifacts: &PreprocessingArtifacts,
) -> Result<Assessment, SchemaError> {
    let features = parse_resume(text);
    debug!(?features, "Extracted resume features");
    assess_features(features, artifacts)
}

/// Preprocesses and classifies an extracted record, then builds its tips.
pub fn assess_features(
    features: FeatureRecord,
    artifacts: &PreprocessingArtifacts,
) -> Result<Assessment, SchemaError> {
    let vector = preprocess(&features.to_row(), artifacts)?;
    let (prediction, placement_probability) = predict(artifacts.classifier(), &vector)?;
    let recommendations = generate_recommendations(&features, prediction);

    let assessment = Assessment {
        assessment_id: Uuid::new_v4(),
        prediction,
        placement_probability,
        features,
        recommendations,
        assessed_at: Utc::now(),
    };
    info!(
        assessment_id = %assessment.assessment_id,
        prediction = %assessment.prediction,
        probability = assessment.placement_probability,
        tips = assessment.recommendations.len(),
        "Resume assessed"
    );
    Ok(assessment)
}

/// Extracts text from an uploaded document on the blocking pool, then assesses it.
pub async fn assess_document(
    document: UploadedDocument,
    artifacts: Arc<PreprocessingArtifacts>,
) -> Result<Assessment, AppError> {
    let file_name = document.file_name.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(&document))
        .await
        // The PDF parser can panic on malformed input; treat that like any
        // other unreadable document.
        .map_err(|e| ExtractionError::Pdf(format!("parser aborted: {e}")))??;

    debug!(file_name = %file_name, chars = text.len(), "Extracted document text");
    Ok(assess_text(&text, &artifacts)?)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::inference::fixtures::sample_artifacts;

    const STRONG_RESUME: &str = r#"
        CGPA: 9.1
        HSC 86%  SSC 90%
        Internship at Initech. Internship at Globex.
        Project: search engine. Project: chess bot. Project: CI pipeline.
        Cloud certificate. Security certificate. Hackathon winner.
        Captain, university football club.
    "#;

    #[test]
    fn test_strong_resume_is_placed() {
        let assessment = assess_text(STRONG_RESUME, &sample_artifacts()).unwrap();
        assert_eq!(assessment.prediction, Prediction::Placed);
        assert!(assessment.placement_probability > 0.5);
        assert_eq!(assessment.features.cgpa, 9.1);
        assert_eq!(
            assessment.recommendations.last().unwrap(),
            "Great work! Keep building your portfolio with internships or research."
        );
    }

    #[test]
    fn test_empty_resume_is_not_placed_with_default_features() {
        let assessment = assess_text("", &sample_artifacts()).unwrap();
        assert_eq!(assessment.prediction, Prediction::NotPlaced);
        assert_eq!(assessment.features, FeatureRecord::default());
        assert!(assessment.recommendations.len() > 1);
    }

    #[test]
    fn test_end_to_end_sample_sentence() {
        let text = "CGPA: 6.5. Completed 2 internships. No placement training. SSC 55% HSC 58%";
        let assessment = assess_text(text, &sample_artifacts()).unwrap();
        assert_eq!(assessment.features.cgpa, 6.5);
        assert!(!assessment.features.placement_training);
        assert_eq!(assessment.features.hsc_marks, 55);
        assert_eq!(assessment.features.ssc_marks, 58);
        assert_eq!(assessment.prediction, Prediction::NotPlaced);
        assert!(assessment
            .recommendations
            .iter()
            .any(|t| t.contains("placement training")));
    }

    #[test]
    fn test_identical_text_gives_identical_outcome() {
        let artifacts = sample_artifacts();
        let a = assess_text(STRONG_RESUME, &artifacts).unwrap();
        let b = assess_text(STRONG_RESUME, &artifacts).unwrap();
        assert_eq!(a.features, b.features);
        assert_eq!(a.prediction, b.prediction);
        assert_eq!(a.recommendations, b.recommendations);
        assert_ne!(a.assessment_id, b.assessment_id);
    }

    #[tokio::test]
    async fn test_assess_plain_text_document() {
        let document = UploadedDocument::new(
            "resume.txt",
            Bytes::from_static(STRONG_RESUME.as_bytes()),
        )
        .unwrap();
        let assessment = assess_document(document, Arc::new(sample_artifacts()))
            .await
            .unwrap();
        assert_eq!(assessment.prediction, Prediction::Placed);
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_extraction_error() {
        let document =
            UploadedDocument::new("resume.pdf", Bytes::from_static(b"%PDF-garbage")).unwrap();
        let result = assess_document(document, Arc::new(sample_artifacts())).await;
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }
}
