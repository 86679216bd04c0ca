//! UI module: View components for the TUI.

pub mod educate;
pub mod home;
pub mod predict;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::application::MenuItem;
use crate::tui::styles::Theme;

/// Side menu shown on the predict and educate pages.
pub fn render_menu(f: &mut Frame, area: Rect, selected: MenuItem, focused: bool) {
    let items: Vec<ListItem> = MenuItem::ALL
        .iter()
        .map(|item| {
            let style = if *item == selected {
                if focused {
                    Theme::selected()
                } else {
                    Theme::focused()
                }
            } else {
                Theme::text_secondary()
            };
            ListItem::new(Line::from(Span::styled(format!(" {} ", item.label()), style)))
        })
        .collect();

    let border = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let menu = List::new(items).block(
        Block::default()
            .title(Span::styled(" diaScan ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(border),
    );

    f.render_widget(menu, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: diaScan estimates diabetes risk for education only and does not replace a diagnosis by a healthcare professional.",
        Theme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
