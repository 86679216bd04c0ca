//! Artifact port: loading and applying previously fitted models.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::{FeatureVector, PredictionResult};

/// Errors raised while loading a persisted artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found at {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Incompatible artifact format in {path:?}: {reason}")]
    Format { path: PathBuf, reason: String },
}

impl ArtifactError {
    pub(crate) fn format(path: &Path, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// A fitted standardization transform.
pub trait FeatureScaler: Send + Sync {
    /// Apply the stored per-feature centering and scaling.
    fn transform(&self, features: &FeatureVector) -> FeatureVector;
}

/// A fitted binary classifier.
///
/// Implementations must be deterministic: the same standardized vector always
/// yields the same label.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> PredictionResult;
}

/// Loads artifacts from persisted storage.
///
/// Artifacts are validated when loaded, so applying them cannot fail.
pub trait ArtifactStore: Send + Sync {
    type Scaler: FeatureScaler;
    type Model: Classifier;

    /// Load the scaler stored at `path`.
    ///
    /// # Errors
    /// Returns `ArtifactError` if the file is missing, unreadable, or not a
    /// scaler for this feature layout.
    fn load_scaler(&self, path: &Path) -> Result<Self::Scaler, ArtifactError>;

    /// Load the classifier stored at `path`.
    ///
    /// # Errors
    /// Returns `ArtifactError` under the same conditions as `load_scaler`.
    fn load_model(&self, path: &Path) -> Result<Self::Model, ArtifactError>;
}

impl<T: FeatureScaler + ?Sized> FeatureScaler for Arc<T> {
    fn transform(&self, features: &FeatureVector) -> FeatureVector {
        (**self).transform(features)
    }
}

impl<T: Classifier + ?Sized> Classifier for Arc<T> {
    fn predict(&self, features: &FeatureVector) -> PredictionResult {
        (**self).predict(features)
    }
}
