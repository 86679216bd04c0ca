//! Risk assessment form and result block.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{
    present, Assessment, Gender, LineKind, PatientInput, SmokingHistory, ValidationError,
};
use crate::tui::styles::Theme;

/// Longest text accepted in a numeric field.
const MAX_INPUT_LEN: usize = 8;

/// Form fields in display order (left column first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Gender,
    Age,
    Hypertension,
    HeartDisease,
    SmokingHistory,
    Bmi,
    Hba1c,
    BloodGlucose,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Gender,
        FormField::Age,
        FormField::Hypertension,
        FormField::HeartDisease,
        FormField::SmokingHistory,
        FormField::Bmi,
        FormField::Hba1c,
        FormField::BloodGlucose,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gender => "Gender",
            Self::Age => "Age",
            Self::Hypertension => "Do you have hypertension?",
            Self::HeartDisease => "Do you have heart disease?",
            Self::SmokingHistory => "Smoking History",
            Self::Bmi => "Body Mass Index (BMI)",
            Self::Hba1c => "HbA1c Level (%)",
            Self::BloodGlucose => "Blood Glucose Level (mg/dL)",
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            Self::Gender => "Select gender",
            Self::SmokingHistory => "Select smoking history",
            Self::Age => "years (0-200)",
            Self::Bmi => "0.0-100.0",
            Self::Hba1c => "0.0-20.0",
            Self::BloodGlucose => "0-1000",
            Self::Hypertension | Self::HeartDisease => "",
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Self::Age | Self::Bmi | Self::Hba1c | Self::BloodGlucose)
    }

    /// Whole-number fields (the age and glucose widgets step by 1).
    fn is_integer(&self) -> bool {
        matches!(self, Self::Age | Self::BloodGlucose)
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// Outcome of the last submission.
#[derive(Debug, Clone, Default)]
pub enum PredictionOutcome {
    #[default]
    Idle,
    Complete {
        assessment: Assessment,
    },
    /// An artifact could not be loaded or applied.
    Failed {
        message: String,
    },
}

/// Form state for the predict page.
#[derive(Debug, Default)]
pub struct PredictFormState {
    pub gender: Option<Gender>,
    pub age: String,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub smoking_history: Option<SmokingHistory>,
    pub bmi: String,
    pub hba1c: String,
    pub blood_glucose: String,
    selected: usize,
    pub error_message: Option<String>,
    pub result_scroll: u16,
}

fn cycle<T: Copy + PartialEq>(choices: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let len = choices.len();
    let next = match current.and_then(|c| choices.iter().position(|x| *x == c)) {
        None if forward => 0,
        None => len - 1,
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
    };
    choices.get(next).copied()
}

fn parse_measure(field: FormField, text: &str) -> Result<f64, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        // An untouched number widget reads as zero.
        return Ok(0.0);
    }
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::InvalidNumber(field.label()))
}

fn parse_whole(field: FormField, text: &str) -> Result<u32, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<u32>()
        .map_err(|_| ValidationError::InvalidNumber(field.label()))
}

impl PredictFormState {
    #[must_use]
    pub fn selected_field(&self) -> FormField {
        FormField::ALL[self.selected]
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % FormField::ALL.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = FormField::ALL.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Step a select or radio field through its choices.
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.selected_field() {
            FormField::Gender => {
                self.gender = cycle(&Gender::FORM_CHOICES, self.gender, forward);
            }
            FormField::SmokingHistory => {
                self.smoking_history =
                    cycle(&SmokingHistory::FORM_CHOICES, self.smoking_history, forward);
            }
            FormField::Hypertension => self.hypertension = !self.hypertension,
            FormField::HeartDisease => self.heart_disease = !self.heart_disease,
            _ => return,
        }
        self.error_message = None;
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Age => Some(&mut self.age),
            FormField::Bmi => Some(&mut self.bmi),
            FormField::Hba1c => Some(&mut self.hba1c),
            FormField::BloodGlucose => Some(&mut self.blood_glucose),
            _ => None,
        }
    }

    /// Add a character to the current numeric field
    pub fn input_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.') {
            return;
        }
        let field = self.selected_field();
        if c == '.' && field.is_integer() {
            return;
        }
        if let Some(text) = self.text_mut(field) {
            if text.len() < MAX_INPUT_LEN {
                text.push(c);
            }
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        let field = self.selected_field();
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        let field = self.selected_field();
        if let Some(text) = self.text_mut(field) {
            text.zeroize();
        }
    }

    /// Wipe every entered value.
    ///
    /// Called when the user leaves the predict page so patient values do not
    /// linger in UI state.
    pub fn clear_sensitive(&mut self) {
        self.age.zeroize();
        self.bmi.zeroize();
        self.hba1c.zeroize();
        self.blood_glucose.zeroize();
        self.gender = None;
        self.smoking_history = None;
        self.hypertension = false;
        self.heart_disease = false;
        self.error_message = None;
        self.selected = 0;
        self.result_scroll = 0;
    }

    /// Build the submission from the current field values.
    ///
    /// Only parsing happens here; completeness and ranges are checked by the
    /// encoder.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidNumber` for text that is not a number.
    pub fn to_patient_input(&self) -> Result<PatientInput, ValidationError> {
        Ok(PatientInput {
            gender: self.gender,
            age: f64::from(parse_whole(FormField::Age, &self.age)?),
            hypertension: self.hypertension,
            heart_disease: self.heart_disease,
            smoking_history: self.smoking_history,
            bmi: parse_measure(FormField::Bmi, &self.bmi)?,
            hba1c: parse_measure(FormField::Hba1c, &self.hba1c)?,
            blood_glucose: parse_whole(FormField::BloodGlucose, &self.blood_glucose)?,
        })
    }

    /// Load sample data for a quick demonstration
    pub fn load_sample_data(&mut self) {
        self.gender = Some(Gender::Male);
        self.age = "45".to_string();
        self.hypertension = true;
        self.heart_disease = false;
        self.smoking_history = Some(SmokingHistory::Current);
        self.bmi = "28.5".to_string();
        self.hba1c = "6.8".to_string();
        self.blood_glucose = "150".to_string();
        self.error_message = None;
    }

    fn display_value(&self, field: FormField) -> Option<String> {
        let yes_no = |on: bool| if on { "( ) No  (•) Yes" } else { "(•) No  ( ) Yes" };
        match field {
            FormField::Gender => self.gender.map(|g| format!("◂ {} ▸", g.label())),
            FormField::SmokingHistory => self
                .smoking_history
                .map(|s| format!("◂ {} ▸", s.label())),
            FormField::Hypertension => Some(yes_no(self.hypertension).to_string()),
            FormField::HeartDisease => Some(yes_no(self.heart_disease).to_string()),
            FormField::Age => Some(self.age.clone()).filter(|s| !s.is_empty()),
            FormField::Bmi => Some(self.bmi.clone()).filter(|s| !s.is_empty()),
            FormField::Hba1c => Some(self.hba1c.clone()).filter(|s| !s.is_empty()),
            FormField::BloodGlucose => Some(self.blood_glucose.clone()).filter(|s| !s.is_empty()),
        }
    }
}

/// Render the predict page
pub fn render_predict(
    f: &mut Frame,
    area: Rect,
    state: &PredictFormState,
    outcome: &PredictionOutcome,
    focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(14), // Form
            Constraint::Length(3),  // Footer/error
            Constraint::Min(0),     // Result
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state, focused);
    render_form_footer(f, chunks[2], state);

    match outcome {
        PredictionOutcome::Idle => {}
        PredictionOutcome::Complete { assessment } => {
            render_result(f, chunks[3], assessment, state.result_scroll)
        }
        PredictionOutcome::Failed { message } => render_failure(f, chunks[3], message),
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Predict Diabetes Risk", Theme::title()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PredictFormState, focused: bool) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let (left, right) = FormField::ALL.split_at(4);
    render_field_column(f, columns[0], left, state, focused);
    render_field_column(f, columns[1], right, state, focused);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    state: &PredictFormState,
    focused: bool,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = focused && field.index() == state.selected;
        let (border_style, title_style) = if is_selected {
            (Theme::border_focused(), Theme::focused())
        } else {
            (Theme::border(), Theme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label()), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value = match state.display_value(*field) {
            Some(v) => Span::styled(v, Theme::text()),
            None => Span::styled(field.hint(), Theme::text_muted()),
        };

        let cursor = if is_selected && field.is_numeric() {
            Span::styled("▌", Theme::cursor())
        } else {
            Span::raw("")
        };

        let content = Paragraph::new(Line::from(vec![Span::raw(" "), value, cursor])).block(block);
        f.render_widget(content, chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PredictFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.clone(), Theme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Navigate ", Theme::key_desc()),
            Span::styled("[←→] ", Theme::key_hint()),
            Span::styled("Choose ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Get Prediction ", Theme::key_desc()),
            Span::styled("[S] ", Theme::key_hint()),
            Span::styled("Sample Data ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Menu", Theme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}

/// Guidance block for a completed assessment.
pub fn result_lines(assessment: &Assessment) -> Vec<Line<'static>> {
    let template = present(assessment.result);
    let accent = Theme::outcome(assessment.result);

    let mut lines = Vec::new();
    for line in template.to_lines() {
        let style = match line.kind {
            LineKind::Heading => Theme::title().patch(accent),
            LineKind::Disclaimer => Theme::danger(),
            LineKind::Summary | LineKind::Item => Theme::text(),
            LineKind::Section => Theme::subtitle(),
            LineKind::Step => Theme::title(),
        };
        if matches!(line.kind, LineKind::Summary | LineKind::Section) {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(line.text, style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Assessed at {}",
            assessment.assessed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        Theme::text_muted(),
    )));
    lines
}

fn render_result(f: &mut Frame, area: Rect, assessment: &Assessment, scroll: u16) {
    let accent = Theme::outcome(assessment.result);
    let content = Paragraph::new(result_lines(assessment))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", assessment.result), accent))
                .borders(Borders::ALL)
                .border_style(accent),
        );

    f.render_widget(content, area);
}

fn render_failure(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Prediction Failed", Theme::danger())),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Theme::text())),
        Line::from(""),
        Line::from(Span::styled(
            "Check the configured model and scaler artifacts, then submit again.",
            Theme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::danger()),
    );

    f.render_widget(content, area);
}
