//! Assessment service: Runs one form submission through the model.
//!
//! The pipeline is:
//! - Encode the patient input into the fixed feature order
//! - Load and apply the fitted scaler
//! - Load and apply the classifier
//!
//! Validation happens before any artifact is touched, so an incomplete form
//! never costs a file read.

use std::path::PathBuf;

use crate::domain::{Assessment, FeatureEncoder, PatientInput, FEATURE_COUNT};
use crate::ports::{ArtifactStore, Classifier, FeatureScaler};
use crate::DiascanError;

/// Service producing a risk assessment for a patient.
pub struct AssessmentService<S: ArtifactStore> {
    store: S,
    model_path: PathBuf,
    scaler_path: PathBuf,
}

impl<S: ArtifactStore> AssessmentService<S> {
    /// Create a new assessment service reading artifacts from the given paths.
    pub fn new(store: S, model_path: impl Into<PathBuf>, scaler_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            model_path: model_path.into(),
            scaler_path: scaler_path.into(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Assess a single submission.
    ///
    /// # Errors
    /// Returns `DiascanError::Validation` if the input is incomplete or out of
    /// range, and `DiascanError::Artifact` if either artifact cannot be loaded.
    /// Nothing is retried.
    pub fn assess(&self, input: &PatientInput) -> Result<Assessment, DiascanError> {
        let encoded = FeatureEncoder::encode(input)?;
        tracing::debug!("Encoded {} features", FEATURE_COUNT);

        let scaler = self.store.load_scaler(&self.scaler_path)?;
        let standardized = scaler.transform(&encoded);

        let model = self.store.load_model(&self.model_path)?;
        let result = model.predict(&standardized);

        tracing::info!("Assessment complete: label={}", result.class());
        Ok(Assessment::new(result))
    }
}
