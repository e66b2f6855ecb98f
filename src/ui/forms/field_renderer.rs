//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a single-line field (borders included)
pub const FIELD_HEIGHT: u16 = 3;
/// Rows taken by a multiline field (borders included)
pub const MULTILINE_FIELD_HEIGHT: u16 = 6;

/// Draw one labelled input box
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = Span::styled(if is_active { "▌" } else { "" }, Style::default().fg(Color::Cyan));

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        // keep the cursor at the end of the text, scrolled into view
        let overflow = lines.len().saturating_sub(usize::from(area.height.saturating_sub(2)));
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
        Paragraph::new(lines).scroll((overflow as u16, 0))
    } else {
        Paragraph::new(Line::from(vec![Span::styled(display_value, style), cursor]))
    };

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}
