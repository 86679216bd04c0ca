//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod assessment;
mod navigation;

pub use assessment::AssessmentService;
pub use navigation::{transition, MenuItem, NavAction, Page};
