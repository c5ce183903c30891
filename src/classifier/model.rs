use ndarray::Array1;
use serde::Deserialize;

use super::error::ClassifierError;
use crate::artifacts::ARTIFACT_SCHEMA_VERSION;

/// Maps feature vectors to category labels and probability distributions.
///
/// The analyser uses exactly two operations on the loaded classifier
/// artifact: `predict` for the label and `predict_proba` for the
/// distribution the confidence score is read from. Labels are echoed to
/// callers verbatim; the label space is fixed when the artifact is created.
pub trait ProbabilisticModel: Send + Sync {
    /// Predicts one category label per feature vector.
    fn predict(&self, features: &[Array1<f32>]) -> Result<Vec<String>, ClassifierError>;

    /// Returns one probability distribution over the label space per
    /// feature vector. Each distribution sums to 1 and its entries lie in
    /// [0, 1], ordered like `classes()`.
    fn predict_proba(&self, features: &[Array1<f32>]) -> Result<Vec<Array1<f32>>, ClassifierError>;

    /// The labels this model can predict, in distribution order.
    fn classes(&self) -> &[String];

    /// Feature-vector width this model was fitted for.
    fn n_features(&self) -> usize;
}

/// A fitted linear classifier, deserialized from an artifact produced by an
/// external training process.
///
/// Each class carries a weight row and an intercept; `predict` is the
/// argmax over the per-class linear scores and `predict_proba` is the
/// softmax over the same scores.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    schema_version: u32,
    classes: Vec<String>,
    weights: Vec<Vec<f32>>,
    intercepts: Vec<f32>,
}

impl LinearClassifier {
    /// Creates a classifier from already-fitted state.
    ///
    /// # Errors
    /// - `ModelError` if the class list is empty, the weight matrix is not
    ///   `n_classes x n_features`, or the intercepts length disagrees with
    ///   the class count
    pub fn new(
        classes: Vec<String>,
        weights: Vec<Vec<f32>>,
        intercepts: Vec<f32>,
    ) -> Result<Self, ClassifierError> {
        let classifier = Self {
            schema_version: ARTIFACT_SCHEMA_VERSION,
            classes,
            weights,
            intercepts,
        };
        classifier.validate()?;
        Ok(classifier)
    }

    /// Checks the internal consistency of a deserialized classifier.
    ///
    /// Called by the artifact loader right after deserialization; shape
    /// violations are treated as a corrupt artifact at startup.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.schema_version != ARTIFACT_SCHEMA_VERSION {
            return Err(ClassifierError::ModelError(format!(
                "Unsupported schema version {} (expected {})",
                self.schema_version, ARTIFACT_SCHEMA_VERSION
            )));
        }
        if self.classes.is_empty() {
            return Err(ClassifierError::ModelError(
                "Classifier has an empty label space".to_string(),
            ));
        }
        if self.weights.len() != self.classes.len() {
            return Err(ClassifierError::ModelError(format!(
                "Classifier has {} classes but {} weight rows",
                self.classes.len(),
                self.weights.len()
            )));
        }
        if self.intercepts.len() != self.classes.len() {
            return Err(ClassifierError::ModelError(format!(
                "Classifier has {} classes but {} intercepts",
                self.classes.len(),
                self.intercepts.len()
            )));
        }
        let n_features = self.weights[0].len();
        if self.weights.iter().any(|row| row.len() != n_features) {
            return Err(ClassifierError::ModelError(
                "Classifier weight rows have inconsistent lengths".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-class linear scores for one feature vector.
    fn decision_scores(&self, features: &Array1<f32>) -> Result<Vec<f32>, ClassifierError> {
        if features.len() != self.n_features() {
            return Err(ClassifierError::PredictionError(format!(
                "Feature vector has {} entries but the classifier expects {}",
                features.len(),
                self.n_features()
            )));
        }
        Ok(self
            .weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, &intercept)| {
                row.iter()
                    .zip(features.iter())
                    .map(|(&w, &x)| w * x)
                    .sum::<f32>()
                    + intercept
            })
            .collect())
    }
}

impl ProbabilisticModel for LinearClassifier {
    fn predict(&self, features: &[Array1<f32>]) -> Result<Vec<String>, ClassifierError> {
        features
            .iter()
            .map(|vector| {
                let scores = self.decision_scores(vector)?;
                let best = scores
                    .iter()
                    .enumerate()
                    .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                    .map(|(index, _)| index)
                    .ok_or_else(|| {
                        ClassifierError::PredictionError("No decision scores produced".to_string())
                    })?;
                Ok(self.classes[best].clone())
            })
            .collect()
    }

    fn predict_proba(&self, features: &[Array1<f32>]) -> Result<Vec<Array1<f32>>, ClassifierError> {
        features
            .iter()
            .map(|vector| {
                let scores = self.decision_scores(vector)?;
                Ok(softmax(&scores))
            })
            .collect()
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.weights.first().map_or(0, |row| row.len())
    }
}

/// Numerically stable softmax: shifts by the maximum score before
/// exponentiating.
fn softmax(scores: &[f32]) -> Array1<f32> {
    let max_score = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|&s| (s - max_score).exp()).collect();
    let total: f32 = exps.iter().sum();
    Array1::from_iter(exps.into_iter().map(|e| e / total))
}
