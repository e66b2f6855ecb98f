//! Renderer-agnostic structured document description

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named styles; every styled run refers to one of these
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleName {
    Name,
    Subtitle,
    Contact,
    SectionHeader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Margins in points: left, top, right, bottom
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// RGB colour with components in 0..=255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Parse `#rrggbb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Declarative text style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub alignment: Alignment,
    pub margin: Margins,
    pub color: Rgb,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            bold: false,
            italic: false,
            alignment: Alignment::Left,
            margin: Margins::default(),
            color: Rgb::BLACK,
        }
    }
}

/// A run of text, optionally styled and optionally a hyperlink
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    pub text: String,
    pub style: Option<StyleName>,
    pub bold: bool,
    pub italic: bool,
    pub alignment: Option<Alignment>,
    pub margin: Option<Margins>,
    pub link: Option<String>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn styled(text: impl Into<String>, style: StyleName) -> Self {
        Self {
            style: Some(style),
            ..Self::new(text)
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn margin(mut self, margin: Margins) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

/// Block node of the document
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text(TextRun),
    Columns { left: TextRun, right: TextRun },
    Table(Table),
}

impl Block {
    /// All text carried by the block, in reading order
    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        match self {
            Block::Text(run) => run.text.clone(),
            Block::Columns { left, right } => format!("{} {}", left.text, right.text),
            Block::Table(table) => table
                .header
                .iter()
                .chain(table.rows.iter())
                .map(|row| row.join(" "))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in points
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

/// Immutable, rendering-ready document tree
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredDocument {
    pub title: String,
    pub page_size: PageSize,
    pub page_margins: Margins,
    pub styles: BTreeMap<StyleName, TextStyle>,
    pub blocks: Vec<Block>,
}

impl StructuredDocument {
    /// Resolve the effective style of a run: base style, then run overrides
    pub fn resolve(&self, run: &TextRun) -> TextStyle {
        let mut style = run
            .style
            .and_then(|name| self.styles.get(&name).copied())
            .unwrap_or_default();
        style.bold |= run.bold;
        style.italic |= run.italic;
        if let Some(alignment) = run.alignment {
            style.alignment = alignment;
        }
        if let Some(margin) = run.margin {
            style.margin = margin;
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_hex("#007acc"), Some(Rgb(0, 0x7a, 0xcc)));
        assert_eq!(Rgb::from_hex("007acc"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_resolve_applies_run_overrides() {
        let mut styles = BTreeMap::new();
        styles.insert(
            StyleName::Contact,
            TextStyle {
                font_size: 10.0,
                alignment: Alignment::Center,
                ..Default::default()
            },
        );
        let doc = StructuredDocument {
            title: String::new(),
            page_size: PageSize::A4,
            page_margins: Margins::default(),
            styles,
            blocks: vec![],
        };
        let run = TextRun::styled("x", StyleName::Contact)
            .bold()
            .align(Alignment::Right);
        let style = doc.resolve(&run);
        assert!(style.bold);
        assert_eq!(style.alignment, Alignment::Right);
        assert_eq!(style.font_size, 10.0);
    }

    #[test]
    fn test_plain_text_of_columns() {
        let block = Block::Columns {
            left: TextRun::new("MIT"),
            right: TextRun::new("CGPA: 9.0"),
        };
        assert_eq!(block.plain_text(), "MIT CGPA: 9.0");
    }
}
