//! Prediction result types.
//!
//! The classifier emits a bare class label; everything shown to the user is
//! derived from it.

use serde::{Deserialize, Serialize};

/// Binary output of the diabetes classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionResult {
    /// Class 0
    LowerRisk,
    /// Class 1
    HigherRisk,
}

impl PredictionResult {
    /// Label used when the positive-class probability is known.
    #[must_use]
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            Self::HigherRisk
        } else {
            Self::LowerRisk
        }
    }

    /// Raw class label.
    #[must_use]
    pub fn class(&self) -> u8 {
        match self {
            Self::LowerRisk => 0,
            Self::HigherRisk => 1,
        }
    }

    #[must_use]
    pub fn is_higher_risk(&self) -> bool {
        matches!(self, Self::HigherRisk)
    }
}

impl std::fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LowerRisk => write!(f, "LOWER RISK"),
            Self::HigherRisk => write!(f, "HIGHER RISK"),
        }
    }
}

/// A prediction together with when it was made. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub result: PredictionResult,
    pub assessed_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    #[must_use]
    pub fn new(result: PredictionResult) -> Self {
        Self {
            result,
            assessed_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_labels() {
        assert_eq!(PredictionResult::LowerRisk.class(), 0);
        assert_eq!(PredictionResult::HigherRisk.class(), 1);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(
            PredictionResult::from_probability(0.5, 0.5),
            PredictionResult::HigherRisk
        );
        assert_eq!(
            PredictionResult::from_probability(0.49, 0.5),
            PredictionResult::LowerRisk
        );
    }

    #[test]
    fn test_assessment_keeps_result() {
        let assessment = Assessment::new(PredictionResult::HigherRisk);
        assert!(assessment.result.is_higher_risk());
        assert!(assessment.assessed_at <= chrono::Utc::now());
    }
}
