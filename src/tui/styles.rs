//! Color palette and styles.
//!
//! Blues for navigation and charts, with a red/green pair reserved for the
//! two risk outcomes.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::PredictionResult;

/// diaScan color palette.
pub struct Theme;

impl Theme {
    // === Primary Colors ===

    /// Menu and button blue
    pub const PRIMARY: Color = Color::Rgb(77, 166, 255); // #4DA6FF

    /// Pale blue for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(204, 231, 247); // #CCE7F7

    /// Chart blue
    pub const CHART: Color = Color::Rgb(31, 119, 180); // #1F77B4

    /// Baby blue for secondary chart series
    pub const CHART_LIGHT: Color = Color::Rgb(137, 207, 240); // #89CFF0

    // === Outcome Colors ===

    pub const HIGHER_RISK: Color = Color::Rgb(198, 40, 40); // #C62828

    pub const LOWER_RISK: Color = Color::Rgb(46, 125, 50); // #2E7D32

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC

    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8

    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Style for errors and the higher risk outcome
    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::HIGHER_RISK)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::LOWER_RISK)
    }

    /// Style for the selected menu entry or button
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn chart() -> Style {
        Style::default().fg(Self::CHART)
    }

    #[must_use]
    pub fn chart_alt() -> Style {
        Style::default().fg(Self::CHART_LIGHT)
    }

    /// Accent for a prediction outcome.
    #[must_use]
    pub fn outcome(result: PredictionResult) -> Style {
        if result.is_higher_risk() {
            Self::danger()
        } else {
            Self::success()
        }
    }
}

/// ASCII banner shown on the home page
pub const LOGO: &str = r#"
     _ _       ____
  __| (_) __ _/ ___|  ___ __ _ _ __
 / _` | |/ _` \___ \ / __/ _` | '_ \
| (_| | | (_| |___) | (_| (_| | | | |
 \__,_|_|\__,_|____/ \___\__,_|_| |_|
"#;
