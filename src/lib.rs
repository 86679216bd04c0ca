//! # diaScan
//!
//! Diabetes risk assessment and health education in the terminal.
//!
//! A form collects patient attributes, which are encoded into the feature
//! layout of an offline-trained classifier, standardized with the fitted
//! scaler and classified. The binary label selects one of two guidance texts.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (patient input, feature vector, results, content)
//! - `ports`: Trait definitions for artifact loading and application
//! - `adapters`: Concrete implementations (JSON artifacts, cache, log redaction)
//! - `application`: Assessment pipeline and page navigation
//! - `config`: Startup configuration
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, PatientInput, PredictionResult};

/// Result type for diaScan operations
pub type Result<T> = std::result::Result<T, DiascanError>;

/// Main error type for diaScan
#[derive(Debug, thiserror::Error)]
pub enum DiascanError {
    #[error("{0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Model artifact error: {0}")]
    Artifact(#[from] ports::ArtifactError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
