//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod preview;

use crate::app::App;
use crate::state::View;
use ratatui::{layout::Rect, Frame};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (header_area, content_area, status_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area, app);

    match app.state.current_view {
        View::Wizard => forms::draw_step_form(frame, content_area, app),
        View::Preview => preview::draw_preview(frame, content_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog is modal and drawn last
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message, app.state.error_count());
    }
}

/// Screen region holding the rendered document while the preview is shown
pub fn preview_area(area: Rect) -> Rect {
    let (_, content_area, _) = layout::create_layout(area);
    preview::paper_area(content_area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::config::WizardConfig;
    use crate::render::PdfRenderer;
    use crate::state::FieldId;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn app() -> App {
        App::new(WizardConfig::default(), Arc::new(PdfRenderer::default()))
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_preview_area_sits_inside_content() {
        let area = Rect::new(0, 0, 120, 40);
        assert_eq!(preview_area(area), Rect::new(20, 4, 80, 34));
    }

    #[test]
    fn test_wizard_view_draws_current_step() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = app();
        app.state.wizard.set_field(FieldId::Name, "Ada").unwrap();

        terminal.draw(|frame| draw(frame, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Step 1/5: Personal Info"));
        assert!(text.contains("Full Name *"));
        assert!(text.contains("Ada"));
        assert!(text.contains("^C^C:quit"));
    }

    #[test]
    fn test_error_dialog_drawn_over_content() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = app();
        app.push_error("disk full");

        terminal.draw(|frame| draw(frame, &app)).unwrap();
        assert!(screen_text(&terminal).contains("disk full"));
    }

    #[test]
    fn test_preview_without_document_shows_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = app();
        app.state.current_view = View::Preview;

        terminal.draw(|frame| draw(frame, &app)).unwrap();
        assert!(screen_text(&terminal).contains("Nothing generated yet"));
    }

    #[test]
    fn test_review_draws_draft_preview() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = app();
        app.state.wizard.set_field(FieldId::Name, "Ada Lovelace").unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL))
            .unwrap();

        terminal.draw(|frame| draw(frame, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Preview (draft)"));
        assert!(text.contains("Ada Lovelace"));
        assert!(text.contains("g:generate"));
    }
}
