//! Exported classifier parameters.
//!
//! Two export formats are understood:
//! - `linear`: logistic regression weights
//! - `tree_ensemble`: a gradient-boosted forest in the XGBoost layout
//!   (binary:logistic objective, margins summed then squashed)

use serde::Deserialize;

use crate::domain::{FeatureVector, PredictionResult, FEATURE_COUNT};
use crate::ports::Classifier;

fn default_threshold() -> f64 {
    0.5
}

fn default_base_score() -> f64 {
    0.5
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn check_threshold(threshold: f64) -> Result<(), String> {
    if threshold > 0.0 && threshold < 1.0 {
        Ok(())
    } else {
        Err(format!("threshold {threshold} outside (0, 1)"))
    }
}

/// A fitted classifier as exported by the training pipeline.
///
/// Every variant is validated while it is built or deserialized, so
/// prediction never fails.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::TreeEnsemble(_) => "tree_ensemble",
        }
    }

    /// Probability of the positive (higher risk) class.
    #[must_use]
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        match self {
            Self::Linear(m) => m.probability(features),
            Self::TreeEnsemble(m) => m.probability(features),
        }
    }

    fn threshold(&self) -> f64 {
        match self {
            Self::Linear(m) => m.threshold,
            Self::TreeEnsemble(m) => m.threshold,
        }
    }
}

impl Classifier for ModelArtifact {
    fn predict(&self, features: &FeatureVector) -> PredictionResult {
        PredictionResult::from_probability(self.probability(features), self.threshold())
    }
}

/// Logistic regression over the standardized features.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "LinearRecord")]
pub struct LinearModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    threshold: f64,
}

#[derive(Deserialize)]
struct LinearRecord {
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

impl LinearModel {
    /// # Errors
    /// Returns the reason if a weight is not finite or the threshold is not
    /// a probability strictly between 0 and 1.
    pub fn new(
        coefficients: [f64; FEATURE_COUNT],
        intercept: f64,
        threshold: f64,
    ) -> Result<Self, String> {
        check_threshold(threshold)?;
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err("model contains non-finite weights".to_string());
        }
        Ok(Self {
            coefficients,
            intercept,
            threshold,
        })
    }

    fn probability(&self, features: &FeatureVector) -> f64 {
        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.as_slice())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        sigmoid(z)
    }
}

impl TryFrom<LinearRecord> for LinearModel {
    type Error = String;

    fn try_from(record: LinearRecord) -> Result<Self, Self::Error> {
        let count = record.coefficients.len();
        let coefficients = <[f64; FEATURE_COUNT]>::try_from(record.coefficients)
            .map_err(|_| format!("model has {count} coefficients, expected {FEATURE_COUNT}"))?;
        Self::new(coefficients, record.intercept, record.threshold)
    }
}

/// Gradient-boosted decision trees.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "EnsembleRecord")]
pub struct TreeEnsemble {
    /// Initial prediction in probability space.
    base_score: f64,
    trees: Vec<Tree>,
    threshold: f64,
}

#[derive(Deserialize)]
struct EnsembleRecord {
    #[serde(default = "default_base_score")]
    base_score: f64,
    trees: Vec<TreeRecord>,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

/// A single validated tree.
#[derive(Debug, Clone)]
pub struct Tree {
    /// Flat node array; index 0 is the root.
    nodes: Vec<TreeNode>,
}

#[derive(Deserialize)]
struct TreeRecord {
    nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        /// Branch taken when the feature value is missing (NaN).
        #[serde(default)]
        default_left: bool,
    },
    Leaf {
        leaf: f64,
    },
}

impl TreeEnsemble {
    /// # Errors
    /// Returns the reason if the ensemble is empty or `base_score` or
    /// `threshold` is not strictly between 0 and 1.
    pub fn new(base_score: f64, trees: Vec<Tree>, threshold: f64) -> Result<Self, String> {
        check_threshold(threshold)?;
        if !(base_score > 0.0 && base_score < 1.0) {
            return Err(format!("base_score {base_score} outside (0, 1)"));
        }
        if trees.is_empty() {
            return Err("tree ensemble has no trees".to_string());
        }
        Ok(Self {
            base_score,
            trees,
            threshold,
        })
    }

    fn probability(&self, features: &FeatureVector) -> f64 {
        let base_margin = (self.base_score / (1.0 - self.base_score)).ln();
        let margin = base_margin
            + self
                .trees
                .iter()
                .map(|t| t.leaf_value(features))
                .sum::<f64>();
        sigmoid(margin)
    }
}

impl TryFrom<EnsembleRecord> for TreeEnsemble {
    type Error = String;

    fn try_from(record: EnsembleRecord) -> Result<Self, Self::Error> {
        let trees = record
            .trees
            .into_iter()
            .enumerate()
            .map(|(t, tree)| Tree::new(tree.nodes).map_err(|reason| format!("tree {t}: {reason}")))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(record.base_score, trees, record.threshold)
    }
}

impl Tree {
    /// Children must point forward in the array, which rules out cycles and
    /// guarantees `leaf_value` terminates.
    ///
    /// # Errors
    /// Returns the reason for the first malformed node.
    pub fn new(nodes: Vec<TreeNode>) -> Result<Self, String> {
        if nodes.is_empty() {
            return Err("empty tree".to_string());
        }
        for (i, node) in nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { leaf } => {
                    if !leaf.is_finite() {
                        return Err(format!("node {i} has a non-finite leaf"));
                    }
                }
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(format!("node {i} splits on unknown feature {feature}"));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {i} has a NaN threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= nodes.len() {
                            return Err(format!("node {i} has invalid child {child}"));
                        }
                    }
                }
            }
        }
        Ok(Self { nodes })
    }

    /// Walk from the root to a leaf. XGBoost sends `x < threshold` left.
    fn leaf_value(&self, features: &FeatureVector) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { leaf } => return *leaf,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let x = features[*feature];
                    idx = if x.is_nan() {
                        if *default_left {
                            *left
                        } else {
                            *right
                        }
                    } else if x < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(feature: usize, left: usize, right: usize) -> TreeNode {
        TreeNode::Split {
            feature,
            threshold: 0.5,
            left,
            right,
            default_left: true,
        }
    }

    /// One stump on HbA1c (feature 6) at 0.5 standard deviations.
    fn stump() -> Tree {
        Tree::new(vec![
            split(6, 1, 2),
            TreeNode::Leaf { leaf: -1.5 },
            TreeNode::Leaf { leaf: 2.0 },
        ])
        .expect("Should build stump")
    }

    fn ensemble(trees: Vec<Tree>) -> ModelArtifact {
        ModelArtifact::TreeEnsemble(TreeEnsemble::new(0.5, trees, 0.5).expect("Should build"))
    }

    fn with_hba1c(value: f64) -> FeatureVector {
        FeatureVector::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, value, 0.0])
    }

    #[test]
    fn test_split_uses_strict_less_than() {
        let model = ensemble(vec![stump()]);
        assert_eq!(model.predict(&with_hba1c(0.49)), PredictionResult::LowerRisk);
        assert_eq!(model.predict(&with_hba1c(0.5)), PredictionResult::HigherRisk);
    }

    #[test]
    fn test_missing_value_follows_default_branch() {
        let model = ensemble(vec![stump()]);
        assert_eq!(model.predict(&with_hba1c(f64::NAN)), PredictionResult::LowerRisk);
    }

    #[test]
    fn test_margins_are_summed() {
        let model = ensemble(vec![stump(), stump()]);
        // base margin 0 + 2.0 + 2.0
        let p = model.probability(&with_hba1c(1.0));
        assert!((p - sigmoid(4.0)).abs() < 1e-12);
    }

    #[test]
    fn test_parses_xgboost_style_json() {
        let json = r#"{
            "kind": "tree_ensemble",
            "base_score": 0.5,
            "trees": [{"nodes": [
                {"feature": 7, "threshold": 1.2, "left": 1, "right": 2},
                {"leaf": -0.8},
                {"leaf": 1.1}
            ]}]
        }"#;
        let model: ModelArtifact = serde_json::from_str(json).expect("Should parse");
        assert_eq!(model.kind(), "tree_ensemble");
        let high = FeatureVector::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]);
        assert_eq!(model.predict(&high), PredictionResult::HigherRisk);
    }

    #[test]
    fn test_backward_child_rejected() {
        let nodes = vec![
            split(6, 0, 2),
            TreeNode::Leaf { leaf: 0.0 },
            TreeNode::Leaf { leaf: 1.0 },
        ];
        assert!(Tree::new(nodes).is_err());
    }

    #[test]
    fn test_unknown_feature_rejected() {
        let nodes = vec![
            split(8, 1, 2),
            TreeNode::Leaf { leaf: 0.0 },
            TreeNode::Leaf { leaf: 1.0 },
        ];
        assert!(Tree::new(nodes).is_err());
    }

    #[test]
    fn test_empty_ensemble_rejected() {
        assert!(TreeEnsemble::new(0.5, Vec::new(), 0.5).is_err());
    }

    #[test]
    fn test_malformed_artifacts_fail_to_deserialize() {
        let unknown_feature = r#"{
            "kind": "tree_ensemble",
            "trees": [{"nodes": [
                {"feature": 9, "threshold": 0.0, "left": 1, "right": 2},
                {"leaf": 0.0},
                {"leaf": 1.0}
            ]}]
        }"#;
        let err =
            serde_json::from_str::<ModelArtifact>(unknown_feature).expect_err("Should reject");
        assert!(err.to_string().contains("unknown feature 9"), "{err}");

        let short_linear = r#"{"kind": "linear", "coefficients": [1.0], "intercept": 0.0}"#;
        let err = serde_json::from_str::<ModelArtifact>(short_linear).expect_err("Should reject");
        assert!(err.to_string().contains("expected 8"), "{err}");

        let bad_threshold = r#"{
            "kind": "linear",
            "coefficients": [0, 0, 0, 0, 0, 0, 0, 0],
            "intercept": 0.0,
            "threshold": 1.5
        }"#;
        assert!(serde_json::from_str::<ModelArtifact>(bad_threshold).is_err());
    }

    #[test]
    fn test_linear_model() {
        let model = ModelArtifact::Linear(
            LinearModel::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0], -1.0, 0.5)
                .expect("Should build"),
        );
        assert_eq!(model.predict(&with_hba1c(0.2)), PredictionResult::LowerRisk);
        assert_eq!(model.predict(&with_hba1c(0.4)), PredictionResult::HigherRisk);
    }

    #[test]
    fn test_linear_non_finite_weight_rejected() {
        let mut weights = [1.0; 8];
        weights[3] = f64::NAN;
        assert!(LinearModel::new(weights, 0.0, 0.5).is_err());
    }
}
