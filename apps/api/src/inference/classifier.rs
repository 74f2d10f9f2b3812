//! Classifier — read-only application of a previously fit binary model.
//!
//! Any model trained on the same column schema can sit behind the
//! `Classifier` trait. Artifacts currently carry one of:
//! - `RandomForest`: sklearn-style tree arrays, probabilities averaged over trees
//! - `LogisticRegression`: linear decision function through a sigmoid

use serde::{Deserialize, Serialize};

use crate::inference::artifacts::SchemaError;
use crate::models::prediction::Prediction;

/// Marks a leaf in the `left` / `right` child arrays.
const LEAF: i64 = -1;

pub trait Classifier: Send + Sync {
    /// Input dimensionality the model was fit on.
    fn n_features(&self) -> usize;

    /// Probability of class index 1. `features` has length `n_features()`.
    fn predict_proba(&self, features: &[f64]) -> f64;

    /// Short backend label, surfaced in logs and health output.
    fn backend(&self) -> &'static str;
}

/// Applies `classifier` to a scaled feature vector.
///
/// Class 1 is chosen only when its probability is strictly greater than
/// class 0's; ties go to class 0.
pub fn predict(
    classifier: &dyn Classifier,
    features: &[f64],
) -> Result<(Prediction, f64), SchemaError> {
    if features.len() != classifier.n_features() {
        return Err(SchemaError::DimensionMismatch {
            expected: classifier.n_features(),
            found: features.len(),
        });
    }
    let probability = classifier.predict_proba(features);
    let class_index = usize::from(probability > 0.5);
    Ok((Prediction::from_class_index(class_index), probability))
}

// ────────────────────────────────────────────────────────────────────────────
// Serialized model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierModel {
    RandomForest(RandomForest),
    LogisticRegression(LogisticRegression),
}

impl ClassifierModel {
    pub fn as_classifier(&self) -> &dyn Classifier {
        match self {
            ClassifierModel::RandomForest(forest) => forest as &dyn Classifier,
            ClassifierModel::LogisticRegression(model) => model,
        }
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        match self {
            ClassifierModel::RandomForest(forest) => forest.validate(),
            ClassifierModel::LogisticRegression(model) => model.validate(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Random forest
// ────────────────────────────────────────────────────────────────────────────

/// One fitted decision tree in parallel-array form. Node 0 is the root; a
/// node is a leaf when `left[node] == -1`. Samples go left when
/// `x[feature] <= threshold`. `value` holds per-class training counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub left: Vec<i64>,
    pub right: Vec<i64>,
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    fn leaf_for(&self, features: &[f64]) -> usize {
        let mut node = 0usize;
        while self.left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if features[feature] <= self.threshold[node] {
                self.left[node] as usize
            } else {
                self.right[node] as usize
            };
        }
        node
    }

    fn predict_proba(&self, features: &[f64]) -> f64 {
        let [not_placed, placed] = self.value[self.leaf_for(features)];
        placed / (not_placed + placed)
    }

    fn validate(&self, index: usize, n_features: usize) -> Result<(), SchemaError> {
        let invalid = |reason: String| SchemaError::InvalidModel(format!("tree {index}: {reason}"));

        let n_nodes = self.left.len();
        if n_nodes == 0 {
            return Err(invalid("has no nodes".to_string()));
        }
        if [
            self.feature.len(),
            self.threshold.len(),
            self.right.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n_nodes)
        {
            return Err(invalid("node arrays differ in length".to_string()));
        }

        for node in 0..n_nodes {
            if self.left[node] == LEAF {
                let [a, b] = self.value[node];
                if a < 0.0 || b < 0.0 || a + b <= 0.0 {
                    return Err(invalid(format!("leaf {node} has no class weight")));
                }
                continue;
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(invalid(format!(
                    "node {node} splits on feature {feature} outside 0..{n_features}"
                )));
            }
            // Children always follow their parent, which also rules out cycles.
            for child in [self.left[node], self.right[node]] {
                if child <= node as i64 || child as usize >= n_nodes {
                    return Err(invalid(format!("node {node} has bad child {child}")));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    fn validate(&self) -> Result<(), SchemaError> {
        if self.trees.is_empty() {
            return Err(SchemaError::InvalidModel("forest has no trees".to_string()));
        }
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.validate(i, self.n_features))
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict_proba(features)).sum();
        total / self.trees.len() as f64
    }

    fn backend(&self) -> &'static str {
        "random_forest"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Logistic regression
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    fn validate(&self) -> Result<(), SchemaError> {
        if self.coef.is_empty() {
            return Err(SchemaError::InvalidModel(
                "logistic regression has no coefficients".to_string(),
            ));
        }
        Ok(())
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict_proba(&self, features: &[f64]) -> f64 {
        let z: f64 = self.intercept
            + self
                .coef
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        1.0 / (1.0 + (-z).exp())
    }

    fn backend(&self) -> &'static str {
        "logistic_regression"
    }
}
