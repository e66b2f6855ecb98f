//! Screen buffer holding the preview region of the last drawn frame

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use std::collections::HashMap;

/// One captured terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedCell {
    pub symbol: char,
    pub fg: Color,
    pub bg: Color,
}

/// Copy of the preview cells, refreshed after every draw
#[derive(Debug, Default)]
pub struct ScreenBuffer {
    /// Map of (col, row) relative to the captured area -> cell
    cells: HashMap<(u16, u16), CapturedCell>,
    pub width: u16,
    pub height: u16,
    captured: bool,
}

impl ScreenBuffer {
    /// Forget the previous capture; called when the preview is not on screen
    pub fn clear(&mut self) {
        self.cells.clear();
        self.width = 0;
        self.height = 0;
        self.captured = false;
    }

    /// Copy `area` out of a rendered frame buffer
    pub fn capture(&mut self, buffer: &Buffer, area: Rect) {
        let area = area.intersection(buffer.area);
        self.cells.clear();
        self.width = area.width;
        self.height = area.height;

        for row in 0..area.height {
            for col in 0..area.width {
                let Some(cell) = buffer.cell((area.x + col, area.y + row)) else {
                    continue;
                };
                let symbol = cell.symbol().chars().next().unwrap_or(' ');
                self.cells.insert(
                    (col, row),
                    CapturedCell {
                        symbol,
                        fg: cell.fg,
                        bg: cell.bg,
                    },
                );
            }
        }
        self.captured = !area.is_empty();
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&CapturedCell> {
        self.cells.get(&(col, row))
    }

    /// Captured text, one line per row with trailing blanks trimmed
    #[cfg(test)]
    pub fn text(&self) -> String {
        (0..self.height)
            .map(|row| {
                let line: String = (0..self.width)
                    .map(|col| self.get(col, row).map_or(' ', |cell| cell.symbol))
                    .collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::style::Style;

    fn frame() -> Buffer {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 10, 4));
        buffer.set_string(2, 1, "Ada", Style::default().fg(Color::Black).bg(Color::White));
        buffer.set_string(2, 2, "MIT", Style::default());
        buffer
    }

    #[test]
    fn test_default_is_not_captured() {
        let screen = ScreenBuffer::default();
        assert!(!screen.is_captured());
        assert_eq!(screen.text(), "");
    }

    #[test]
    fn test_capture_region() {
        let mut screen = ScreenBuffer::default();
        screen.capture(&frame(), Rect::new(2, 1, 4, 2));

        assert!(screen.is_captured());
        assert_eq!((screen.width, screen.height), (4, 2));
        assert_eq!(screen.text(), "Ada\nMIT");

        let cell = screen.get(0, 0).unwrap();
        assert_eq!(cell.symbol, 'A');
        assert_eq!(cell.fg, Color::Black);
        assert_eq!(cell.bg, Color::White);
    }

    #[test]
    fn test_capture_clamps_to_frame() {
        let mut screen = ScreenBuffer::default();
        screen.capture(&frame(), Rect::new(8, 2, 10, 10));
        assert_eq!((screen.width, screen.height), (2, 2));
    }

    #[test]
    fn test_clear_drops_capture() {
        let mut screen = ScreenBuffer::default();
        screen.capture(&frame(), Rect::new(0, 0, 10, 4));
        screen.clear();
        assert!(!screen.is_captured());
        assert!(screen.get(0, 0).is_none());
    }

    #[test]
    fn test_empty_area_is_not_captured() {
        let mut screen = ScreenBuffer::default();
        screen.capture(&frame(), Rect::new(0, 0, 0, 0));
        assert!(!screen.is_captured());
    }
}
