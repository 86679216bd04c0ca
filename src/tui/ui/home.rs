//! Landing page with the single "Predict Now" action.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::styles::{Theme, LOGO};

pub fn render_home(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(7), // Logo
            Constraint::Length(3), // Tagline
            Constraint::Length(3), // Button
            Constraint::Min(0),
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let logo = Paragraph::new(LOGO.trim_matches('\n'))
        .style(Theme::subtitle())
        .alignment(Alignment::Center);
    f.render_widget(logo, chunks[1]);

    let tagline = Paragraph::new(vec![
        Line::from(Span::styled(
            "Diabetes risk assessment and health education",
            Theme::text(),
        )),
        Line::from(Span::styled(
            "Know your risk. Learn the signs. Act early.",
            Theme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(tagline, chunks[2]);

    let button_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(17),
            Constraint::Min(0),
        ])
        .split(chunks[3])[1];
    let button = Paragraph::new(Span::styled(" Predict Now ", Theme::selected()))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border_focused()),
        );
    f.render_widget(button, button_area);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[Enter] ", Theme::key_hint()),
        Span::styled("Predict Now ", Theme::key_desc()),
        Span::styled("[Q] ", Theme::key_hint()),
        Span::styled("Quit", Theme::key_desc()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );
    f.render_widget(footer, chunks[5]);
}
