//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides:
//! - Home page with the "Predict Now" entry point
//! - Risk assessment form and result guidance
//! - Educational material and statistics charts

mod app;
mod styles;
mod ui;

pub use app::{App, Focus};
pub use styles::Theme;
pub use ui::predict::{FormField, PredictFormState, PredictionOutcome};
