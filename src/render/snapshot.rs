//! Rasterize the captured preview into a pixel snapshot

use super::traits::{RenderError, Snapshot};
use crate::state::ScreenBuffer;
use image::{Rgb, RgbImage};
use ratatui::style::Color;
use rusttype::{point, Font, Scale};

/// Monospace face the preview cells are drawn with
const FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");

/// Pixels per terminal cell
const CELL_WIDTH: u32 = 8;
const CELL_HEIGHT: u32 = 16;

/// Glyph height in pixels; one advance of the face fits a cell
const FONT_SCALE: f32 = 13.0;

const PAPER: [u8; 3] = [255, 255, 255];
const INK: [u8; 3] = [0, 0, 0];

/// Map a terminal colour onto paper. `Reset` falls back to `default`.
fn rgb(color: Color, default: [u8; 3]) -> [u8; 3] {
    match color {
        Color::Reset => default,
        Color::Black => [0, 0, 0],
        Color::Red => [170, 0, 0],
        Color::Green => [0, 170, 0],
        Color::Yellow => [170, 85, 0],
        Color::Blue => [0, 0, 170],
        Color::Magenta => [170, 0, 170],
        Color::Cyan => [0, 170, 170],
        Color::Gray => [170, 170, 170],
        Color::DarkGray => [85, 85, 85],
        Color::LightRed => [255, 85, 85],
        Color::LightGreen => [85, 255, 85],
        Color::LightYellow => [255, 255, 85],
        Color::LightBlue => [85, 85, 255],
        Color::LightMagenta => [255, 85, 255],
        Color::LightCyan => [85, 255, 255],
        Color::White => [255, 255, 255],
        Color::Rgb(r, g, b) => [r, g, b],
        Color::Indexed(i) => [i, i, i],
    }
}

fn blend(fg: [u8; 3], bg: Rgb<u8>, coverage: f32) -> Rgb<u8> {
    Rgb(std::array::from_fn(|i| {
        (f32::from(fg[i]) * coverage + f32::from(bg[i]) * (1.0 - coverage)).round() as u8
    }))
}

/// Turn the captured preview into an image, one `CELL_WIDTH` x `CELL_HEIGHT`
/// block per cell.
///
/// Backgrounds are filled first, then every glyph is rasterized on top and
/// blended by coverage, so glyph overhang is not erased by a neighbour.
pub fn capture_snapshot(screen: &ScreenBuffer) -> Result<Snapshot, RenderError> {
    if !screen.is_captured() {
        return Err(RenderError::CaptureUnavailable(
            "preview has not been drawn".to_string(),
        ));
    }
    let font = Font::try_from_bytes(FONT_BYTES).ok_or(RenderError::Font)?;
    let scale = Scale::uniform(FONT_SCALE);
    let ascent = font.v_metrics(scale).ascent.ceil();

    let width = u32::from(screen.width) * CELL_WIDTH;
    let height = u32::from(screen.height) * CELL_HEIGHT;
    if width == 0 || height == 0 {
        return Err(RenderError::EmptySnapshot);
    }
    let mut image = RgbImage::from_pixel(width, height, Rgb(PAPER));

    for row in 0..screen.height {
        for col in 0..screen.width {
            let Some(cell) = screen.get(col, row) else {
                continue;
            };
            let bg = Rgb(rgb(cell.bg, PAPER));
            let origin_x = u32::from(col) * CELL_WIDTH;
            let origin_y = u32::from(row) * CELL_HEIGHT;
            for dy in 0..CELL_HEIGHT {
                for dx in 0..CELL_WIDTH {
                    image.put_pixel(origin_x + dx, origin_y + dy, bg);
                }
            }
        }
    }

    for row in 0..screen.height {
        for col in 0..screen.width {
            let Some(cell) = screen.get(col, row) else {
                continue;
            };
            if cell.symbol.is_whitespace() {
                continue;
            }
            let fg = rgb(cell.fg, INK);
            let origin = point(
                (u32::from(col) * CELL_WIDTH) as f32,
                (u32::from(row) * CELL_HEIGHT) as f32 + ascent,
            );
            let glyph = font.glyph(cell.symbol).scaled(scale).positioned(origin);
            let Some(bounds) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|x, y, coverage| {
                let px = bounds.min.x + x as i32;
                let py = bounds.min.y + y as i32;
                if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                let under = *image.get_pixel(px, py);
                image.put_pixel(px, py, blend(fg, under, coverage));
            });
        }
    }

    Ok(Snapshot::new(image))
}
