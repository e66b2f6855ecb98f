//! Document preview drawn as a sheet of paper

use crate::app::App;
use crate::document::{self, Block as DocBlock, Rgb, StructuredDocument, StyleName, TextStyle};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

/// Widest the paper gets, in columns
const PAPER_WIDTH: u16 = 80;

fn paper_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::White)
}

/// Area of the paper inside the preview frame
pub fn paper_area(content: Rect) -> Rect {
    let inner = Rect {
        x: content.x + 1,
        y: content.y + 1,
        width: content.width.saturating_sub(2),
        height: content.height.saturating_sub(2),
    };
    let width = inner.width.min(PAPER_WIDTH);
    Rect {
        x: inner.x + (inner.width - width) / 2,
        width,
        ..inner
    }
}

/// Draw the assembled document
pub fn draw_preview(frame: &mut Frame, area: Rect, app: &App) {
    let title = if app.state.wizard.is_finalized() {
        format!(" Preview: {} ", app.state.generation.label())
    } else {
        " Preview (draft) ".to_string()
    };
    let frame_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(frame_block, area);

    let paper = paper_area(area);
    let text_width = paper.width.saturating_sub(2);
    let lines = match &app.state.document {
        Some(doc) => document_lines(doc, text_width),
        None => vec![Line::from("Nothing generated yet")],
    };

    let paragraph = Paragraph::new(lines)
        .style(paper_style())
        .wrap(Wrap { trim: false })
        .scroll((app.state.preview_scroll, 0))
        .block(
            Block::default()
                .padding(Padding::horizontal(1))
                .style(paper_style()),
        );
    frame.render_widget(Clear, paper);
    frame.render_widget(paragraph, paper);
}

fn color(rgb: Rgb) -> Color {
    match rgb {
        Rgb::BLACK => Color::Black,
        Rgb(r, g, b) => Color::Rgb(r, g, b),
    }
}

fn span_style(style: &TextStyle) -> Style {
    let mut span = paper_style().fg(color(style.color));
    if style.bold {
        span = span.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        span = span.add_modifier(Modifier::ITALIC);
    }
    span
}

fn alignment(value: document::Alignment) -> Alignment {
    match value {
        document::Alignment::Left => Alignment::Left,
        document::Alignment::Center => Alignment::Center,
        document::Alignment::Right => Alignment::Right,
    }
}

/// Terminal lines for a document laid out `width` columns wide
pub fn document_lines(doc: &StructuredDocument, width: u16) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for block in &doc.blocks {
        match block {
            DocBlock::Text(run) => {
                let style = doc.resolve(run);
                if run.style == Some(StyleName::SectionHeader) && !lines.is_empty() {
                    lines.push(Line::default());
                }
                let mut text_style = span_style(&style);
                if run.link.is_some() {
                    text_style = text_style.add_modifier(Modifier::UNDERLINED);
                }
                for text in run.text.split('\n') {
                    lines.push(
                        Line::from(Span::styled(text.to_string(), text_style))
                            .alignment(alignment(style.alignment)),
                    );
                }
            }
            DocBlock::Columns { left, right } => {
                let used = left.text.chars().count() + right.text.chars().count();
                let gap = usize::from(width).saturating_sub(used).max(1);
                lines.push(Line::from(vec![
                    Span::styled(left.text.clone(), span_style(&doc.resolve(left))),
                    Span::styled(" ".repeat(gap), paper_style()),
                    Span::styled(right.text.clone(), span_style(&doc.resolve(right))),
                ]));
            }
            DocBlock::Table(table) => {
                let first_width = table
                    .header
                    .iter()
                    .chain(&table.rows)
                    .filter_map(|row| row.first())
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0);
                for row in table.header.iter().chain(&table.rows) {
                    let mut spans = Vec::new();
                    for (i, cell) in row.iter().enumerate() {
                        if i == 0 {
                            spans.push(Span::styled(
                                format!("{cell:<first_width$}  "),
                                paper_style().add_modifier(Modifier::BOLD),
                            ));
                        } else {
                            spans.push(Span::styled(cell.clone(), paper_style()));
                        }
                    }
                    lines.push(Line::from(spans));
                }
            }
        }
    }

    lines
}
