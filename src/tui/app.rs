//! Main TUI application.
//!
//! Handles:
//! - Page navigation through the pure `transition` function
//! - Input event handling
//! - Running assessments on form submission

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::application::{transition, AssessmentService, MenuItem, NavAction, Page};
use crate::ports::ArtifactStore;
use crate::DiascanError;

use super::ui::{
    educate::{render_educate, EducateState},
    home::render_home,
    predict::{render_predict, PredictFormState, PredictionOutcome},
    render_disclaimer, render_menu,
};

/// Lines moved by PageUp/PageDown.
const PAGE_STEP: u16 = 10;

/// Which pane receives key presses on pages with a side menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Menu,
    Content,
}

/// Main application state
pub struct App<S: ArtifactStore> {
    /// Current page, replaced on every navigation
    page: Page,

    focus: Focus,

    /// Highlighted side menu entry
    menu_selected: MenuItem,

    should_quit: bool,

    assessment_service: AssessmentService<S>,

    predict_state: PredictFormState,

    /// Result block under the form
    outcome: PredictionOutcome,

    educate_state: EducateState,
}

impl<S: ArtifactStore> App<S> {
    /// Create the application around an assessment service (Composition Root
    /// lives in `main.rs`).
    pub fn new(assessment_service: AssessmentService<S>) -> Self {
        Self {
            page: Page::default(),
            focus: Focus::Content,
            menu_selected: MenuItem::Predict,
            should_quit: false,
            assessment_service,
            predict_state: PredictFormState::default(),
            outcome: PredictionOutcome::Idle,
            educate_state: EducateState::default(),
        }
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub fn outcome(&self) -> &PredictionOutcome {
        &self.outcome
    }

    #[must_use]
    pub fn form(&self) -> &PredictFormState {
        &self.predict_state
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        let mut content_area = chunks[0];
        if self.page.has_menu() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(26), Constraint::Min(0)])
                .split(chunks[0]);
            render_menu(f, columns[0], self.menu_selected, self.focus == Focus::Menu);
            content_area = columns[1];
        }

        let content_focused = self.focus == Focus::Content;
        match self.page {
            Page::Home => render_home(f, content_area),
            Page::Predict => render_predict(
                f,
                content_area,
                &self.predict_state,
                &self.outcome,
                content_focused,
            ),
            Page::Educate => {
                render_educate(f, content_area, &self.educate_state, content_focused)
            }
        }

        render_disclaimer(f, chunks[1]);
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        match (self.page, self.focus) {
            (Page::Home, _) => self.handle_home_key(key),
            (_, Focus::Menu) => self.handle_menu_key(key),
            (Page::Predict, Focus::Content) => self.handle_predict_key(key),
            (Page::Educate, Focus::Content) => self.handle_educate_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => {
                self.navigate(NavAction::RequestPrediction);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) {
        let len = MenuItem::ALL.len();
        let idx = MenuItem::ALL
            .iter()
            .position(|m| *m == self.menu_selected)
            .unwrap_or(0);
        match key {
            KeyCode::Up => self.menu_selected = MenuItem::ALL[(idx + len - 1) % len],
            KeyCode::Down => self.menu_selected = MenuItem::ALL[(idx + 1) % len],
            KeyCode::Enter => self.navigate(self.menu_selected.action()),
            KeyCode::Esc | KeyCode::Tab | KeyCode::Right => {
                self.menu_selected = MenuItem::for_page(self.page);
                self.focus = Focus::Content;
            }
            _ => {}
        }
    }

    fn handle_predict_key(&mut self, key: KeyCode) {
        let form = &mut self.predict_state;
        match key {
            KeyCode::Esc => self.focus = Focus::Menu,
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::Left => form.cycle_choice(false),
            KeyCode::Right | KeyCode::Char(' ') => form.cycle_choice(true),
            KeyCode::Char('s') | KeyCode::Char('S') => form.load_sample_data(),
            KeyCode::Char(c) => form.input_char(c),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.clear_field(),
            KeyCode::PageDown => form.result_scroll = form.result_scroll.saturating_add(PAGE_STEP),
            KeyCode::PageUp => form.result_scroll = form.result_scroll.saturating_sub(PAGE_STEP),
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    fn handle_educate_key(&mut self, key: KeyCode) {
        let state = &mut self.educate_state;
        match key {
            KeyCode::Esc => self.focus = Focus::Menu,
            KeyCode::Up | KeyCode::Char('k') => state.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => state.scroll_down(1),
            KeyCode::PageUp => state.scroll_up(PAGE_STEP),
            KeyCode::PageDown => state.scroll_down(PAGE_STEP),
            KeyCode::Home => state.scroll = 0,
            _ => {}
        }
    }

    fn navigate(&mut self, action: NavAction) {
        let next = transition(self.page, action);
        self.focus = Focus::Content;
        if next == self.page {
            return;
        }

        if self.page == Page::Predict {
            // Leaving the form: wipe what was typed and the last result.
            self.predict_state.clear_sensitive();
            self.outcome = PredictionOutcome::Idle;
        }
        if next == Page::Educate {
            self.educate_state = EducateState::default();
        }

        tracing::debug!("Navigated from {:?} to {:?}", self.page, next);
        self.page = next;
        self.menu_selected = MenuItem::for_page(next);
    }

    fn submit(&mut self) {
        let input = match self.predict_state.to_patient_input() {
            Ok(input) => input,
            Err(e) => {
                self.predict_state.error_message = Some(e.to_string());
                self.outcome = PredictionOutcome::Idle;
                return;
            }
        };

        match self.assessment_service.assess(&input) {
            Ok(assessment) => {
                self.predict_state.error_message = None;
                self.predict_state.result_scroll = 0;
                self.outcome = PredictionOutcome::Complete { assessment };
            }
            Err(DiascanError::Validation(e)) => {
                tracing::debug!("Form submission rejected");
                self.predict_state.error_message = Some(e.to_string());
                self.outcome = PredictionOutcome::Idle;
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                self.predict_state.error_message = None;
                self.outcome = PredictionOutcome::Failed {
                    message: e.to_string(),
                };
            }
        }
    }
}
