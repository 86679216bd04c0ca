//! Adapters layer: Concrete implementations of ports.
//!
//! - `json`: artifact files exported by the training pipeline
//! - `cache`: read-through cache over any artifact store
//! - `sanitize`: clinical value redaction for logs

pub mod cache;
pub mod json;
pub mod sanitize;

pub use cache::CachingArtifactStore;
pub use json::JsonArtifactStore;
