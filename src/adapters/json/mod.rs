//! JSON artifact adapter: Implementation of `ArtifactStore`.
//!
//! The offline training pipeline exports the fitted StandardScaler and the
//! classifier as two JSON documents. Both are checked against the
//! eight-feature layout while they are deserialized; nothing is kept between
//! calls.

mod model;
mod scaler;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::ports::{ArtifactError, ArtifactStore};

pub use model::{LinearModel, ModelArtifact, Tree, TreeEnsemble, TreeNode};
pub use scaler::StandardScalerArtifact;

/// Reads scaler and model artifacts from JSON files.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonArtifactStore;

impl JsonArtifactStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactStore for JsonArtifactStore {
    type Scaler = StandardScalerArtifact;
    type Model = ModelArtifact;

    fn load_scaler(&self, path: &Path) -> Result<StandardScalerArtifact, ArtifactError> {
        let scaler: StandardScalerArtifact = read_json(path)?;
        tracing::debug!("Loaded scaler artifact from {:?}", path);
        Ok(scaler)
    }

    fn load_model(&self, path: &Path) -> Result<ModelArtifact, ArtifactError> {
        let model: ModelArtifact = read_json(path)?;
        tracing::debug!("Loaded {} model artifact from {:?}", model.kind(), path);
        Ok(model)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ArtifactError::NotFound(path.to_path_buf()),
        _ => ArtifactError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    serde_json::from_str(&content).map_err(|e| ArtifactError::format(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeatureVector, PredictionResult};
    use crate::ports::{Classifier, FeatureScaler};
    use tempfile::tempdir;

    const SCALER_JSON: &str = r#"{
        "mean": [0.4, 41.8, 0.07, 0.04, 2.1, 27.3, 5.5, 138.0],
        "scale": [0.49, 22.5, 0.26, 0.19, 1.9, 6.6, 1.07, 40.7]
    }"#;

    const LINEAR_JSON: &str = r#"{
        "kind": "linear",
        "coefficients": [0.1, 1.0, 0.3, 0.2, 0.05, 0.6, 2.4, 1.3],
        "intercept": -4.5
    }"#;

    #[test]
    fn test_load_scaler_and_model() {
        let temp = tempdir().expect("tempdir");
        let scaler_path = temp.path().join("scaler.json");
        let model_path = temp.path().join("model.json");
        std::fs::write(&scaler_path, SCALER_JSON).expect("write scaler");
        std::fs::write(&model_path, LINEAR_JSON).expect("write model");

        let store = JsonArtifactStore::new();
        let scaler = store.load_scaler(&scaler_path).expect("Should load scaler");
        let model = store.load_model(&model_path).expect("Should load model");

        // Mean patient standardizes to zero and falls below the intercept.
        let mean = FeatureVector::new([0.4, 41.8, 0.07, 0.04, 2.1, 27.3, 5.5, 138.0]);
        let standardized = scaler.transform(&mean);
        assert!(standardized.as_slice().iter().all(|v| v.abs() < 1e-9));
        assert_eq!(model.predict(&standardized), PredictionResult::LowerRisk);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp = tempdir().expect("tempdir");
        let err = JsonArtifactStore::new()
            .load_scaler(&temp.path().join("absent.json"))
            .expect_err("Should fail");
        assert!(matches!(err, ArtifactError::NotFound(_)));
    }

    #[test]
    fn test_garbage_is_format_error() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("model.json");
        std::fs::write(&path, b"\x80\x03cxgboost.sklearn").expect("write");
        let err = JsonArtifactStore::new()
            .load_model(&path)
            .expect_err("Should fail");
        // Pickled bytes are not UTF-8, which surfaces as an I/O error.
        assert!(matches!(
            err,
            ArtifactError::Io { .. } | ArtifactError::Format { .. }
        ));

        std::fs::write(&path, "{\"kind\": \"svm\"}").expect("write");
        let err = JsonArtifactStore::new()
            .load_model(&path)
            .expect_err("Should fail");
        assert!(matches!(err, ArtifactError::Format { .. }));
    }

    #[test]
    fn test_wrong_feature_count_rejected() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("scaler.json");
        std::fs::write(&path, r#"{"mean": [0.0, 1.0], "scale": [1.0, 1.0]}"#).expect("write");
        let err = JsonArtifactStore::new()
            .load_scaler(&path)
            .expect_err("Should fail");
        assert!(err.to_string().contains("expected 8"));
    }
}
