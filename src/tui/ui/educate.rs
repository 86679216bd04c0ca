//! Educational support page: reading material plus the Malaysian dashboard.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::education::{self, malaysia, Share, GLOBAL_HEADLINES};
use crate::tui::styles::Theme;

/// Scroll position of the reading pane.
#[derive(Debug, Default)]
pub struct EducateState {
    pub scroll: u16,
}

impl EducateState {
    pub fn scroll_up(&mut self, by: u16) {
        self.scroll = self.scroll.saturating_sub(by);
    }

    pub fn scroll_down(&mut self, by: u16) {
        let max = u16::try_from(content_lines().len()).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(by).min(max.saturating_sub(1));
    }
}

/// The reading material as styled lines.
pub fn content_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for section in education::sections() {
        lines.push(Line::from(Span::styled(section.title, Theme::subtitle())));
        for paragraph in section.paragraphs {
            lines.push(Line::from(Span::styled(*paragraph, Theme::text())));
        }
        for bullet in section.bullets {
            lines.push(Line::from(Span::styled(
                format!(" • {}", bullet.text),
                Theme::text(),
            )));
            for child in bullet.children {
                lines.push(Line::from(Span::styled(
                    format!("     ◦ {child}"),
                    Theme::text_secondary(),
                )));
            }
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("At a Glance", Theme::subtitle())));
    for stat in &GLOBAL_HEADLINES {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:>7}  ", stat.figure), Theme::title().patch(Theme::chart())),
            Span::styled(stat.caption, Theme::text()),
        ]));
    }
    lines
}

/// Render the educational support page
pub fn render_educate(f: &mut Frame, area: Rect, state: &EducateState, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Header
            Constraint::Percentage(50), // Reading pane
            Constraint::Min(12),        // Dashboard
            Constraint::Length(2),      // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_reading_pane(f, chunks[1], state, focused);
    render_dashboard(f, chunks[2]);
    render_footer(f, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Educational Support", Theme::title()),
        Span::styled(" │ Understanding Diabetes", Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_reading_pane(f: &mut Frame, area: Rect, state: &EducateState, focused: bool) {
    let border = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let content = Paragraph::new(content_lines())
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0))
        .block(Block::default().borders(Borders::ALL).border_style(border));

    f.render_widget(content, area);
}

fn render_dashboard(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", malaysia::TITLE), Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
        ])
        .split(inner);

    render_totals_and_types(f, columns[0]);
    render_share_chart(f, columns[1], " Gender ", &malaysia::GENDER);
    render_share_chart(f, columns[2], " Ethnicity ", &malaysia::ETHNICITY);
}

fn render_totals_and_types(f: &mut Frame, area: Rect) {
    let constraints: Vec<Constraint> = std::iter::once(Constraint::Length(3))
        .chain(malaysia::DIABETES_TYPES.iter().map(|_| Constraint::Length(3)))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let total = Paragraph::new(Line::from(vec![
        Span::styled("Total Patients: ", Theme::text_secondary()),
        Span::styled(
            education::group_thousands(malaysia::TOTAL_PATIENTS),
            Theme::title(),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );
    f.render_widget(total, rows[0]);

    for (i, share) in malaysia::DIABETES_TYPES.iter().enumerate() {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(Span::styled(format!(" {} ", share.label), Theme::text_secondary()))
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .gauge_style(Theme::chart())
            .ratio((share.percent / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.2}%", share.percent));
        f.render_widget(gauge, rows[i + 1]);
    }
}

/// Bar heights in hundredths of a percent so two decimals survive.
fn bars(shares: &[Share]) -> Vec<Bar<'static>> {
    shares
        .iter()
        .enumerate()
        .map(|(i, share)| {
            let style = if i % 2 == 0 {
                Theme::chart()
            } else {
                Theme::chart_alt()
            };
            Bar::default()
                .value((share.percent * 100.0).round() as u64)
                .text_value(format!("{:.2}%", share.percent))
                .label(Line::from(share.label))
                .style(style)
        })
        .collect()
}

fn render_share_chart(f: &mut Frame, area: Rect, title: &'static str, shares: &[Share]) {
    let bars = bars(shares);
    let width = area.width.saturating_sub(2) / u16::try_from(shares.len().max(1)).unwrap_or(1);
    let chart = BarChart::default()
        .block(
            Block::default()
                .title(Span::styled(title, Theme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(width.saturating_sub(1).max(1))
        .bar_gap(1)
        .max(10_000)
        .value_style(Theme::title())
        .label_style(Theme::text_secondary());

    f.render_widget(chart, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[↑↓] ", Theme::key_hint()),
        Span::styled("Scroll ", Theme::key_desc()),
        Span::styled("[PgUp/PgDn] ", Theme::key_hint()),
        Span::styled("Page ", Theme::key_desc()),
        Span::styled("[Esc] ", Theme::key_hint()),
        Span::styled("Menu", Theme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Vec<String> {
        content_lines().iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_sections_in_reading_order() {
        let text = plain();
        let pos = |title: &str| {
            text.iter()
                .position(|l| l == title)
                .unwrap_or_else(|| panic!("missing {title}"))
        };
        assert!(pos("What is Diabetes?") < pos("Type 1 Diabetes"));
        assert!(pos("Type 1 Diabetes") < pos("Type 2 Diabetes"));
        assert!(pos("Type 2 Diabetes") < pos("Global Diabetes Statistics"));
    }

    #[test]
    fn test_nested_bullets_are_indented() {
        let text = plain();
        assert!(text.iter().any(|l| l == "     ◦ Cannot be prevented."));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = EducateState::default();
        state.scroll_up(3);
        assert_eq!(state.scroll, 0);

        state.scroll_down(u16::MAX);
        let last = u16::try_from(content_lines().len() - 1).expect("fits");
        assert_eq!(state.scroll, last);
    }

    #[test]
    fn test_one_bar_per_share() {
        assert_eq!(bars(&malaysia::ETHNICITY).len(), 4);
        assert_eq!(bars(&malaysia::GENDER).len(), 2);
    }
}
