//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::{
    ADD_ENTRY_SHORTCUT, GENERATE_SHORTCUT, NEXT_SHORTCUT, PREV_SHORTCUT, REMOVE_ENTRY_SHORTCUT,
    REVIEW_SHORTCUT,
};
use crate::state::{GenerationStatus, View, Wizard};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Step progress
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the step progress header
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Resume Wizard ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let header = Paragraph::new(Line::from(progress_spans(&app.state.wizard))).block(block);
    frame.render_widget(header, area);
}

/// One span per step; the current step is highlighted, finished ones are green
fn progress_spans(wizard: &Wizard) -> Vec<Span<'static>> {
    let current = wizard.current();
    let finalized = wizard.is_finalized();
    let mut spans = Vec::new();

    for (index, step) in wizard.table().steps().iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        let style = if finalized || index < current {
            Style::default().fg(Color::Green)
        } else if index == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", index + 1, step.title), style));
    }
    spans
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Generation status
    let marker = match &app.state.generation {
        GenerationStatus::Idle => Span::styled(" ○ ", Style::default().fg(Color::Gray)),
        GenerationStatus::Pending => Span::styled(" ◐ ", Style::default().fg(Color::Yellow)),
        GenerationStatus::Ready(_) => Span::styled(" ● ", Style::default().fg(Color::Green)),
        GenerationStatus::Failed(_) => Span::styled(" ● ", Style::default().fg(Color::Red)),
    };
    spans.push(marker);

    // View-specific hints
    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(status) = &app.state.status {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{} {}", status.at.format("%H:%M:%S"), status.text),
            Style::default().fg(Color::White),
        ));
    }

    // Quit hint on the right (double Ctrl+C to quit)
    let quit_hint = " ^C^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_width = quit_hint.len() as u16;
    let quit_area = Rect {
        x: area.right().saturating_sub(quit_width),
        y: area.y,
        width: quit_width.min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Preview if app.state.wizard.is_finalized() => {
            "j/k:scroll  r:retry  Esc:back  q:quit".to_string()
        }
        View::Preview => "j/k:scroll  g:generate  Esc:edit  q:quit".to_string(),
        View::Wizard if app.state.wizard.is_finalized() => {
            "v:preview  r:retry  q:quit".to_string()
        }
        View::Wizard if app.state.wizard.is_last_step() => format!(
            "Tab:next field  {PREV_SHORTCUT}:back  {REVIEW_SHORTCUT}:review  \
             {GENERATE_SHORTCUT}:generate"
        ),
        View::Wizard => format!(
            "Tab:next field  {PREV_SHORTCUT}:back  {NEXT_SHORTCUT}:next  \
             {ADD_ENTRY_SHORTCUT}:add  {REMOVE_ENTRY_SHORTCUT}:remove  {REVIEW_SHORTCUT}:review"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldId;
    use pretty_assertions::assert_eq;

    fn labels(spans: &[Span]) -> Vec<String> {
        spans
            .iter()
            .map(|span| span.content.trim().to_string())
            .filter(|text| text != "›")
            .collect()
    }

    #[test]
    fn test_layout_reserves_header_and_status_rows() {
        let (header, content, status) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(header, Rect::new(0, 0, 80, 3));
        assert_eq!(content, Rect::new(0, 3, 80, 20));
        assert_eq!(status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_progress_lists_every_step() {
        let wizard = Wizard::default();
        let spans = progress_spans(&wizard);
        let titles = labels(&spans);
        assert_eq!(titles.len(), wizard.step_count());
        assert!(titles[0].starts_with("1 "));
    }

    #[test]
    fn test_progress_highlights_current_and_completed() {
        let mut wizard = Wizard::default();
        wizard.set_field(FieldId::Name, "Ada").unwrap();
        wizard.set_field(FieldId::Email, "ada@example.com").unwrap();
        wizard.set_field(FieldId::Phone, "555").unwrap();
        wizard.next().unwrap();

        let steps: Vec<Span> = progress_spans(&wizard)
            .into_iter()
            .filter(|span| span.content.trim() != "›")
            .collect();
        assert_eq!(steps[0].style.fg, Some(Color::Green));
        assert_eq!(steps[1].style.bg, Some(Color::Cyan));
        assert_eq!(steps[2].style.fg, Some(Color::Gray));
    }
}
