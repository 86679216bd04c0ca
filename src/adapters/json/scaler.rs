//! Exported StandardScaler parameters.

use serde::Deserialize;

use crate::domain::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::ports::FeatureScaler;

/// Per-feature mean and scale fitted during training.
///
/// Mirrors scikit-learn's `StandardScaler` attributes (`mean_`, `scale_`,
/// `feature_names_in_`). Only obtainable through validation, so `transform`
/// always sees one finite mean and scale per feature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ScalerRecord")]
pub struct StandardScalerArtifact {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

/// On-disk layout, before validation.
#[derive(Deserialize)]
struct ScalerRecord {
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScalerArtifact {
    /// Build from fitted parameters.
    ///
    /// # Errors
    /// Returns the reason if any value is not finite.
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Result<Self, String> {
        if mean.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err("scaler contains non-finite values".to_string());
        }
        Ok(Self { mean, scale })
    }
}

impl TryFrom<ScalerRecord> for StandardScalerArtifact {
    type Error = String;

    fn try_from(record: ScalerRecord) -> Result<Self, Self::Error> {
        let (means, scales) = (record.mean.len(), record.scale.len());
        let counts = || {
            format!("scaler has {means} means and {scales} scales, expected {FEATURE_COUNT}")
        };
        let mean = <[f64; FEATURE_COUNT]>::try_from(record.mean).map_err(|_| counts())?;
        let scale = <[f64; FEATURE_COUNT]>::try_from(record.scale).map_err(|_| counts())?;

        if let Some(names) = &record.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
                return Err(format!(
                    "scaler feature names {names:?} do not match {FEATURE_NAMES:?}"
                ));
            }
        }
        Self::new(mean, scale)
    }
}

impl FeatureScaler for StandardScalerArtifact {
    fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, slot) in out.iter_mut().enumerate() {
            // A constant column is stored with scale 0; scikit-learn divides by 1.
            let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            *slot = (features[i] - self.mean[i]) / scale;
        }
        FeatureVector::new(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler(mean: [f64; 8], scale: [f64; 8]) -> StandardScalerArtifact {
        StandardScalerArtifact::new(mean, scale).expect("Should build scaler")
    }

    #[test]
    fn test_standardizes_each_feature() {
        let s = scaler(
            [0.0, 40.0, 0.0, 0.0, 1.0, 25.0, 5.0, 100.0],
            [1.0, 20.0, 1.0, 1.0, 2.0, 5.0, 1.0, 50.0],
        );
        let x = FeatureVector::new([1.0, 45.0, 1.0, 0.0, 2.0, 28.5, 6.8, 150.0]);
        let z = s.transform(&x);
        let expected = [1.0, 0.25, 1.0, 0.0, 0.5, 0.7, 1.8, 1.0];
        for (got, want) in z.as_slice().iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_zero_scale_treated_as_one() {
        let s = scaler(
            [0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0],
        );
        let z = s.transform(&FeatureVector::new([0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0]));
        assert_eq!(z[3], 2.0);
    }

    #[test]
    fn test_feature_names_must_match_order() {
        let (zeros, ones) = ([0.0_f64; 8], [1.0_f64; 8]);
        let names: Vec<String> = FEATURE_NAMES.iter().map(|n| n.to_string()).collect();
        let mut swapped = names.clone();
        swapped.swap(5, 6);

        let json = serde_json::json!({
            "feature_names": names,
            "mean": zeros,
            "scale": ones,
        });
        assert!(serde_json::from_value::<StandardScalerArtifact>(json).is_ok());

        let json = serde_json::json!({
            "feature_names": swapped,
            "mean": zeros,
            "scale": ones,
        });
        assert!(serde_json::from_value::<StandardScalerArtifact>(json).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut scale = [1.0; 8];
        scale[2] = f64::INFINITY;
        assert!(StandardScalerArtifact::new([0.0; 8], scale).is_err());
    }

    #[test]
    fn test_short_scaler_fails_to_deserialize() {
        let json = r#"{"mean": [0.0], "scale": [1.0]}"#;
        let err = serde_json::from_str::<StandardScalerArtifact>(json).expect_err("Should reject");
        assert!(err.to_string().contains("expected 8"), "{err}");
    }
}
