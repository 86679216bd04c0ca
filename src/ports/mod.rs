//! Ports layer: Trait definitions for external collaborators.
//!
//! The fitted scaler and classifier are produced offline and only ever reach
//! this crate as opaque artifacts, so the application depends on these traits
//! rather than on any concrete file format.

mod artifact;

pub use artifact::{ArtifactError, ArtifactStore, Classifier, FeatureScaler};
