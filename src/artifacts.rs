use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::classifier::{LinearClassifier, ProbabilisticModel, TfidfVectorizer, Vectorize};

/// Schema version both artifact files must carry.
pub const ARTIFACT_SCHEMA_VERSION: u32 = 1;

/// Environment variable selecting the artifacts directory.
pub const ARTIFACTS_ENV_VAR: &str = "COMPLAINT_ANALYSER_ARTIFACTS";

const VECTORIZER_FILE: &str = "vectorizer.json";
const CLASSIFIER_FILE: &str = "classifier.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("{kind} artifact not found at {}", .path.display())]
    NotFound { kind: &'static str, path: PathBuf },
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("{kind} artifact at {} is corrupt: {reason}", .path.display())]
    Deserialization {
        kind: &'static str,
        path: PathBuf,
        reason: String,
    },
}

/// Locates and deserializes the two artifacts produced by the external
/// training process.
///
/// Both artifacts are read exactly once, at startup. Either failure kind
/// (resource not found, or the resource exists but does not deserialize
/// into a consistent object) is fatal: callers surface the error and do
/// not proceed to accept input.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a store over the default artifacts directory
    pub fn new_default() -> Self {
        Self::new(Self::default_artifacts_dir())
    }

    /// Returns the default artifacts directory path
    pub fn default_artifacts_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var(ARTIFACTS_ENV_VAR) {
            return PathBuf::from(path);
        }

        // 2. Fall back to the working directory, next to the process
        PathBuf::from(".")
    }

    pub fn new<P: AsRef<Path>>(artifacts_dir: P) -> Self {
        Self {
            artifacts_dir: artifacts_dir.as_ref().to_path_buf(),
        }
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.artifacts_dir.join(VECTORIZER_FILE)
    }

    pub fn classifier_path(&self) -> PathBuf {
        self.artifacts_dir.join(CLASSIFIER_FILE)
    }

    pub fn artifacts_present(&self) -> bool {
        let vectorizer_path = self.vectorizer_path();
        let classifier_path = self.classifier_path();
        log::info!("Checking for artifacts:");
        log::info!(
            "  Vectorizer path: {:?} (exists: {})",
            vectorizer_path,
            vectorizer_path.exists()
        );
        log::info!(
            "  Classifier path: {:?} (exists: {})",
            classifier_path,
            classifier_path.exists()
        );
        vectorizer_path.exists() && classifier_path.exists()
    }

    /// Deserializes the fitted vectorizer artifact.
    pub fn load_vectorizer(&self) -> Result<TfidfVectorizer, ArtifactError> {
        let path = self.vectorizer_path();
        let raw = Self::read_artifact("vectorizer", &path)?;
        let vectorizer: TfidfVectorizer =
            serde_json::from_slice(&raw).map_err(|e| ArtifactError::Deserialization {
                kind: "vectorizer",
                path: path.clone(),
                reason: e.to_string(),
            })?;
        vectorizer
            .validate()
            .map_err(|e| ArtifactError::Deserialization {
                kind: "vectorizer",
                path,
                reason: e.to_string(),
            })?;
        log::info!(
            "Loaded vectorizer artifact ({} vocabulary terms)",
            vectorizer.n_features()
        );
        Ok(vectorizer)
    }

    /// Deserializes the fitted classifier artifact.
    pub fn load_classifier(&self) -> Result<LinearClassifier, ArtifactError> {
        let path = self.classifier_path();
        let raw = Self::read_artifact("classifier", &path)?;
        let classifier: LinearClassifier =
            serde_json::from_slice(&raw).map_err(|e| ArtifactError::Deserialization {
                kind: "classifier",
                path: path.clone(),
                reason: e.to_string(),
            })?;
        classifier
            .validate()
            .map_err(|e| ArtifactError::Deserialization {
                kind: "classifier",
                path,
                reason: e.to_string(),
            })?;
        log::info!(
            "Loaded classifier artifact ({} classes)",
            classifier.classes().len()
        );
        Ok(classifier)
    }

    fn read_artifact(kind: &'static str, path: &Path) -> Result<Vec<u8>, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::NotFound {
                kind,
                path: path.to_path_buf(),
            });
        }
        Ok(fs::read(path)?)
    }
}
