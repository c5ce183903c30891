use std::sync::Arc;

use log::debug;

use super::error::ClassifierError;
use super::model::ProbabilisticModel;
use super::vectorizer::Vectorize;
use super::AnalyserInfo;

/// The outcome of analysing one complaint: the predicted category and the
/// maximum of the classifier's probability distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Category label, echoed verbatim from the classifier's label space
    pub category: String,
    /// Confidence score in [0, 1]
    pub confidence: f32,
}

/// Runs complaint text through the loaded vectorizer and classifier
/// artifacts.
///
/// Both artifacts are immutable after load and shared read-only across
/// every call, so the analyser is freely shareable:
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::sync::Arc;
/// use complaint_analyser::{Analyser, ArtifactStore};
///
/// let store = ArtifactStore::new_default();
/// let analyser = Analyser::new(
///     Arc::new(store.load_vectorizer()?),
///     Arc::new(store.load_classifier()?),
/// )?;
///
/// let prediction = analyser.analyse("the billing charge was wrong")?;
/// println!("{}", prediction.category);
/// # Ok(())
/// # }
/// ```
pub struct Analyser {
    vectorizer: Arc<dyn Vectorize>,
    model: Arc<dyn ProbabilisticModel>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Analyser>();
    }
};

impl Analyser {
    /// Pairs a loaded vectorizer with a loaded classifier.
    ///
    /// # Errors
    /// - `ValidationError` if the vectorizer's output width disagrees with
    ///   the feature width the classifier was fitted for
    pub fn new(
        vectorizer: Arc<dyn Vectorize>,
        model: Arc<dyn ProbabilisticModel>,
    ) -> Result<Self, ClassifierError> {
        if vectorizer.n_features() != model.n_features() {
            return Err(ClassifierError::ValidationError(format!(
                "Vectorizer produces {} features but the classifier expects {}",
                vectorizer.n_features(),
                model.n_features()
            )));
        }
        Ok(Self { vectorizer, model })
    }

    /// Returns information about the loaded artifacts
    pub fn info(&self) -> AnalyserInfo {
        AnalyserInfo {
            num_classes: self.model.classes().len(),
            class_labels: self.model.classes().to_vec(),
            vocabulary_size: self.vectorizer.n_features(),
        }
    }

    /// Classifies a single complaint and returns the predicted category
    /// with a confidence score.
    ///
    /// The input is wrapped as a one-element document sequence (the
    /// transform contract takes a sequence), the first predicted label is
    /// taken, and the confidence is the maximum of the first probability
    /// distribution.
    ///
    /// # Errors
    /// - `ValidationError` if the input is empty or whitespace-only
    /// - Any error from the underlying transform/predict calls, propagated
    ///   unchanged (no retry, no recovery)
    pub fn analyse(&self, text: &str) -> Result<Prediction, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::ValidationError(
                "Input text cannot be empty".to_string(),
            ));
        }

        let documents = [text.to_string()];
        let features = self.vectorizer.transform(&documents)?;
        debug!("Transformed complaint into {} feature vector(s)", features.len());

        let labels = self.model.predict(&features)?;
        let category = labels.into_iter().next().ok_or_else(|| {
            ClassifierError::PredictionError("Model returned no label".to_string())
        })?;

        let distributions = self.model.predict_proba(&features)?;
        let distribution = distributions.first().ok_or_else(|| {
            ClassifierError::PredictionError(
                "Model returned no probability distribution".to_string(),
            )
        })?;
        let confidence = distribution.iter().copied().fold(0.0_f32, f32::max);

        Ok(Prediction { category, confidence })
    }
}

/// Formats a confidence score in [0, 1] as a percentage with two decimal
/// places, e.g. 0.8734 becomes `87.34%`.
pub fn format_confidence(confidence: f32) -> String {
    format!("{:.2}%", confidence * 100.0)
}
