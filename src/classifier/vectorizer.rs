use std::collections::HashMap;

use ndarray::Array1;
use serde::Deserialize;

use super::error::ClassifierError;
use super::utils::normalize_vector;
use crate::artifacts::ARTIFACT_SCHEMA_VERSION;

/// Turns raw text into fixed-length numeric feature vectors.
///
/// This is the capability contract the analyser relies on: a sequence of
/// documents in, one feature vector per document out. The concrete artifact
/// behind it is opaque to callers; any type producing vectors of a fixed
/// width (`n_features`) is substitutable.
pub trait Vectorize: Send + Sync {
    /// Transforms a sequence of documents into one feature vector each.
    ///
    /// The output vectors all have length `n_features()`, in the same
    /// order as the input documents.
    fn transform(&self, documents: &[String]) -> Result<Vec<Array1<f32>>, ClassifierError>;

    /// Width of the feature vectors this vectorizer produces.
    fn n_features(&self) -> usize;
}

/// A fitted TF-IDF vectorizer, deserialized from an artifact produced by an
/// external training process.
///
/// Transformation mirrors what the vectorizer was fitted with:
/// 1. Lowercase the document and split on non-alphanumeric characters
/// 2. Drop tokens shorter than two characters
/// 3. Count term occurrences per vocabulary column
/// 4. Scale counts by the per-column inverse document frequency
/// 5. L2-normalize the result
///
/// Tokens outside the fitted vocabulary are ignored; a document made up
/// entirely of unknown tokens transforms to the zero vector.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    schema_version: u32,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Creates a vectorizer from already-fitted state.
    ///
    /// # Errors
    /// - `VectorizerError` if the idf length disagrees with the vocabulary
    ///   size or a vocabulary column index is out of range
    pub fn new(
        vocabulary: HashMap<String, usize>,
        idf: Vec<f32>,
    ) -> Result<Self, ClassifierError> {
        let vectorizer = Self {
            schema_version: ARTIFACT_SCHEMA_VERSION,
            vocabulary,
            idf,
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Checks the internal consistency of a deserialized vectorizer.
    ///
    /// Called by the artifact loader right after deserialization, so a
    /// shape violation surfaces as a corrupt-artifact error at startup
    /// rather than as a panic at inference time.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.schema_version != ARTIFACT_SCHEMA_VERSION {
            return Err(ClassifierError::VectorizerError(format!(
                "Unsupported schema version {} (expected {})",
                self.schema_version, ARTIFACT_SCHEMA_VERSION
            )));
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(ClassifierError::VectorizerError(format!(
                "Vocabulary has {} terms but idf has {} entries",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        for (term, &column) in &self.vocabulary {
            if column >= self.idf.len() {
                return Err(ClassifierError::VectorizerError(format!(
                    "Vocabulary term '{}' maps to column {} (vocabulary size is {})",
                    term,
                    column,
                    self.idf.len()
                )));
            }
        }
        Ok(())
    }

    fn transform_one(&self, document: &str) -> Array1<f32> {
        let mut vector = Array1::<f32>::zeros(self.idf.len());
        for token in tokenize(document) {
            if let Some(&column) = self.vocabulary.get(token.as_str()) {
                vector[column] += 1.0;
            }
        }
        for (column, weight) in vector.iter_mut().enumerate() {
            *weight *= self.idf[column];
        }
        normalize_vector(&vector)
    }
}

impl Vectorize for TfidfVectorizer {
    fn transform(&self, documents: &[String]) -> Result<Vec<Array1<f32>>, ClassifierError> {
        Ok(documents.iter().map(|doc| self.transform_one(doc)).collect())
    }

    fn n_features(&self) -> usize {
        self.idf.len()
    }
}

/// Lowercases and splits on non-alphanumeric characters, keeping tokens of
/// at least two characters (the token pattern the artifacts were fitted
/// with).
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .map(|token| token.to_lowercase())
}
