//! An interactive front-end for a pre-trained customer-complaint
//! classification model.
//!
//! Two artifacts produced by an external training process — a fitted
//! TF-IDF vectorizer and a fitted linear classifier — are deserialized
//! once at startup and treated as opaque, read-only collaborators for the
//! rest of the process. Each submitted complaint is transformed, run
//! through the classifier, and reported as a category label plus a
//! confidence score (the maximum of the probability distribution).
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use complaint_analyser::{format_confidence, Analyser, ArtifactStore};
//!
//! let store = ArtifactStore::new_default();
//! let analyser = Analyser::new(
//!     Arc::new(store.load_vectorizer()?),
//!     Arc::new(store.load_classifier()?),
//! )?;
//!
//! let prediction = analyser.analyse("the billing charge was wrong")?;
//! println!("Predicted Category: {}", prediction.category);
//! println!("Confidence Score: {}", format_confidence(prediction.confidence));
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The loaded artifacts are immutable, so an `Analyser` is `Send + Sync`
//! and can be shared across threads behind an `Arc`; every call is an
//! independent, stateless request against the same read-only state.

pub mod artifacts;
pub mod classifier;

pub use artifacts::{ArtifactError, ArtifactStore, ARTIFACTS_ENV_VAR, ARTIFACT_SCHEMA_VERSION};
pub use classifier::{
    format_confidence, Analyser, AnalyserInfo, ClassifierError, LinearClassifier, Prediction,
    ProbabilisticModel, TfidfVectorizer, Vectorize,
};

pub fn init_logger() {
    env_logger::init();
}
