mod analyser;
mod error;
mod model;
mod utils;
mod vectorizer;

pub use analyser::{format_confidence, Analyser, Prediction};
pub use error::ClassifierError;
pub use model::{LinearClassifier, ProbabilisticModel};
pub use vectorizer::{TfidfVectorizer, Vectorize};

/// Information about the artifacts an analyser was loaded with
#[derive(Debug, Clone)]
pub struct AnalyserInfo {
    /// Number of categories the classifier was trained on
    pub num_classes: usize,
    /// Labels of the categories
    pub class_labels: Vec<String>,
    /// Number of terms in the vectorizer's fitted vocabulary
    pub vocabulary_size: usize,
}
