//! Page navigation.
//!
//! The session owns a [`Page`] value and replaces it with the result of
//! [`transition`] on every navigation request.

use serde::{Deserialize, Serialize};

/// Top-level screens of the application.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Home,
    Predict,
    Educate,
}

impl Page {
    /// Whether the side menu is shown on this page.
    #[must_use]
    pub fn has_menu(&self) -> bool {
        !matches!(self, Self::Home)
    }
}

/// A navigation request from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// "Predict Now" on the home page
    RequestPrediction,
    SelectEducation,
    SelectPrediction,
    RequestHome,
}

/// Entries of the side menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Predict,
    Educate,
    Home,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Predict, MenuItem::Educate, MenuItem::Home];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Predict => "Predict Diabetes Risk",
            Self::Educate => "Educational Support",
            Self::Home => "Back to Home",
        }
    }

    #[must_use]
    pub fn action(&self) -> NavAction {
        match self {
            Self::Predict => NavAction::SelectPrediction,
            Self::Educate => NavAction::SelectEducation,
            Self::Home => NavAction::RequestHome,
        }
    }

    /// Menu entry that leads to `page`.
    #[must_use]
    pub fn for_page(page: Page) -> Self {
        match page {
            Page::Home => Self::Home,
            Page::Predict => Self::Predict,
            Page::Educate => Self::Educate,
        }
    }
}

/// Next page for `action` taken on `page`.
///
/// Pairs without a defined transition leave the page unchanged.
#[must_use]
pub fn transition(page: Page, action: NavAction) -> Page {
    match (page, action) {
        (Page::Home, NavAction::RequestPrediction) => Page::Predict,
        (Page::Predict, NavAction::SelectEducation) => Page::Educate,
        (Page::Educate, NavAction::SelectPrediction) => Page::Predict,
        (Page::Predict | Page::Educate, NavAction::RequestHome) => Page::Home,
        (current, _) => current,
    }
}
