//! PDF rendering with lopdf
//!
//! Documents are flowed top to bottom using the builtin Helvetica family,
//! breaking onto a new page whenever the next line would cross the bottom
//! margin. Snapshots are embedded as one RGB image scaled to fit the page.

use super::traits::{Artifact, RenderAdapter, RenderError, RenderInput, Snapshot};
use crate::document::{
    Alignment, Block, Margins, PageSize, Rgb, StructuredDocument, Table, TextRun, TextStyle,
};
use async_trait::async_trait;
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::iter;
use tracing::{debug, info};

const LINE_HEIGHT: f32 = 1.25;
const COLUMN_GAP: f32 = 12.0;
const TABLE_FONT_SIZE: f32 = 10.0;
const TABLE_CELL_PADDING: f32 = 4.0;
const SNAPSHOT_MARGIN: f32 = 36.0;
const PRODUCER: &str = concat!("resume-wizard ", env!("CARGO_PKG_VERSION"));

/// Renders structured documents and snapshots to PDF bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer {
    snapshot_page: PageSize,
}

impl PdfRenderer {
    /// Page size used for snapshot input; documents carry their own
    pub fn with_snapshot_page(snapshot_page: PageSize) -> Self {
        Self { snapshot_page }
    }
}

#[async_trait]
impl RenderAdapter for PdfRenderer {
    async fn render(&self, input: RenderInput) -> Result<Artifact, RenderError> {
        let page_size = self.snapshot_page;
        let kind = input.kind();
        debug!(kind, "Rendering PDF");

        let artifact = tokio::task::spawn_blocking(move || match input {
            RenderInput::Document(document) => render_document(&document),
            RenderInput::Snapshot(snapshot) => render_snapshot(&snapshot, page_size),
        })
        .await
        .map_err(|e| RenderError::Task(e.to_string()))??;

        info!(
            kind,
            pages = artifact.page_count,
            bytes = artifact.bytes.len(),
            "PDF rendered"
        );
        Ok(artifact)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl Font {
    const ALL: [Font; 4] = [Font::Regular, Font::Bold, Font::Italic, Font::BoldItalic];

    fn of(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Font::Regular,
            (true, false) => Font::Bold,
            (false, true) => Font::Italic,
            (true, true) => Font::BoldItalic,
        }
    }

    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Italic => "F3",
            Font::BoldItalic => "F4",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Italic => "Helvetica-Oblique",
            Font::BoldItalic => "Helvetica-BoldOblique",
        }
    }
}

/// Approximate Helvetica advance width in thousandths of an em
fn glyph_width(c: char, bold: bool) -> f32 {
    let width = match c {
        'i' | 'j' | 'l' | '\'' | '|' => 222.0,
        '.' | ',' | ':' | ';' | '!' | ' ' | 'I' | '/' => 278.0,
        'f' | 't' | '(' | ')' | '[' | ']' | '-' | 'r' => 333.0,
        'm' | 'M' => 833.0,
        'w' | 'W' | '@' | '%' => 889.0,
        'A'..='Z' => 667.0,
        _ => 556.0,
    };
    if bold {
        width * 1.05
    } else {
        width
    }
}

fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    text.chars().map(|c| glyph_width(c, bold)).sum::<f32>() * size / 1000.0
}

/// Greedy word wrap. Explicit newlines are kept and words wider than a
/// line are broken between characters.
fn wrap(text: &str, max_width: f32, size: f32, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if text_width(&candidate, size, bold) <= max_width {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            for c in word.chars() {
                line.push(c);
                if line.chars().count() > 1 && text_width(&line, size, bold) > max_width {
                    line.pop();
                    lines.push(std::mem::replace(&mut line, c.to_string()));
                }
            }
        }
        lines.push(line);
    }
    lines
}

/// Encode text for the builtin fonts; unmappable characters become '?'
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\t' => b' ',
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

fn pdf_string(text: &str) -> Object {
    Object::String(win_ansi(text), StringFormat::Literal)
}

fn channel(value: u8) -> Object {
    (f32::from(value) / 255.0).into()
}

#[derive(Debug, Clone)]
struct Link {
    rect: [f32; 4],
    url: String,
}

impl Link {
    fn annotation(&self) -> Dictionary {
        let rect: Vec<Object> = self.rect.iter().map(|v| (*v).into()).collect();
        let border: Vec<Object> = vec![Object::Integer(0); 3];
        dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => rect,
            "Border" => border,
            "A" => dictionary! {
                "S" => "URI",
                "URI" => Object::string_literal(self.url.as_str()),
            },
        }
    }
}

#[derive(Debug, Default)]
struct Page {
    operations: Vec<Operation>,
    links: Vec<Link>,
}

/// Top-to-bottom flow layout; `cursor` is the y of the next line's top
struct Layout<'a> {
    document: &'a StructuredDocument,
    width: f32,
    height: f32,
    margins: Margins,
    cursor: f32,
    current: Page,
    pages: Vec<Page>,
}

impl<'a> Layout<'a> {
    fn new(document: &'a StructuredDocument) -> Self {
        let (width, height) = document.page_size.dimensions();
        let margins = document.page_margins;
        Self {
            document,
            width,
            height,
            margins,
            cursor: height - margins.top,
            current: Page::default(),
            pages: Vec::new(),
        }
    }

    fn top(&self) -> f32 {
        self.height - self.margins.top
    }

    fn left(&self) -> f32 {
        self.margins.left
    }

    fn right(&self) -> f32 {
        self.width - self.margins.right
    }

    fn content_width(&self) -> f32 {
        self.right() - self.left()
    }

    /// Start a new page unless `height` still fits; a fresh page always
    /// accepts content so oversized items cannot loop
    fn reserve(&mut self, height: f32) {
        if self.cursor - height < self.margins.bottom && self.cursor < self.top() {
            self.pages.push(std::mem::take(&mut self.current));
            self.cursor = self.top();
        }
    }

    fn gap(&mut self, amount: f32) {
        self.cursor -= amount;
    }

    fn finish(mut self) -> Vec<Page> {
        self.pages.push(self.current);
        self.pages
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let font = Font::of(style.bold, style.italic);
        let Rgb(r, g, b) = style.color;
        self.current.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("rg", vec![channel(r), channel(g), channel(b)]),
            Operation::new("Tf", vec![font.resource().into(), style.font_size.into()]),
            Operation::new("Td", vec![x.into(), baseline.into()]),
            Operation::new("Tj", vec![pdf_string(text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Text(run) => self.text_run(run),
            Block::Columns { left, right } => self.columns(left, right),
            Block::Table(table) => self.table(table),
        }
    }

    fn text_run(&mut self, run: &TextRun) {
        let style = self.document.resolve(run);
        let left = self.left() + style.margin.left;
        let width = (self.content_width() - style.margin.left - style.margin.right)
            .max(style.font_size);
        let line_height = style.font_size * LINE_HEIGHT;

        self.gap(style.margin.top);
        for line in wrap(&run.text, width, style.font_size, style.bold) {
            self.reserve(line_height);
            let line_width = text_width(&line, style.font_size, style.bold);
            let x = match style.alignment {
                Alignment::Left => left,
                Alignment::Center => left + (width - line_width) / 2.0,
                Alignment::Right => left + width - line_width,
            }
            .max(left);
            let baseline = self.cursor - style.font_size;
            self.draw_text(&line, x, baseline, &style);
            if let Some(url) = run.link.as_ref().filter(|_| !line.is_empty()) {
                self.current.links.push(Link {
                    rect: [x, baseline - 2.0, x + line_width, baseline + style.font_size],
                    url: url.clone(),
                });
            }
            self.cursor -= line_height;
        }
        self.gap(style.margin.bottom);
    }

    fn columns(&mut self, left: &TextRun, right: &TextRun) {
        let left_style = self.document.resolve(left);
        let right_style = self.document.resolve(right);
        let size = left_style.font_size.max(right_style.font_size);
        let line_height = size * LINE_HEIGHT;
        let right_width = text_width(&right.text, right_style.font_size, right_style.bold);
        let available =
            (self.content_width() - right_width - COLUMN_GAP).max(self.content_width() / 2.0);

        self.gap(left_style.margin.top.max(right_style.margin.top));
        let lines = wrap(&left.text, available, left_style.font_size, left_style.bold);
        for (i, line) in lines.iter().enumerate() {
            self.reserve(line_height);
            let baseline = self.cursor - size;
            self.draw_text(line, self.left(), baseline, &left_style);
            if i == 0 {
                let x = self.right() - right_width;
                self.draw_text(&right.text, x, baseline, &right_style);
            }
            self.cursor -= line_height;
        }
        self.gap(left_style.margin.bottom.max(right_style.margin.bottom));
    }

    fn table(&mut self, table: &Table) {
        let columns = table
            .header
            .iter()
            .chain(table.rows.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        if columns == 0 {
            return;
        }

        // first column takes a third, the rest share what is left
        let width = self.content_width();
        let widths: Vec<f32> = if columns == 1 {
            vec![width]
        } else {
            let first = width / 3.0;
            let rest = (width - first) / (columns - 1) as f32;
            iter::once(first)
                .chain(iter::repeat(rest).take(columns - 1))
                .collect()
        };

        self.gap(TABLE_CELL_PADDING);
        if let Some(header) = &table.header {
            self.table_row(header, &widths, true);
        }
        for row in &table.rows {
            self.table_row(row, &widths, false);
        }
        self.gap(TABLE_CELL_PADDING);
    }

    fn table_row(&mut self, cells: &[String], widths: &[f32], header: bool) {
        let line_height = TABLE_FONT_SIZE * LINE_HEIGHT;
        let wrapped: Vec<(Vec<String>, TextStyle)> = cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                let style = TextStyle {
                    font_size: TABLE_FONT_SIZE,
                    bold: header || i == 0,
                    ..Default::default()
                };
                let lines = wrap(
                    cell,
                    width - 2.0 * TABLE_CELL_PADDING,
                    style.font_size,
                    style.bold,
                );
                (lines, style)
            })
            .collect();
        let row_lines = wrapped.iter().map(|(lines, _)| lines.len()).max().unwrap_or(1);
        let row_height = row_lines as f32 * line_height;

        self.reserve(row_height);
        let mut x = self.left();
        for ((lines, style), width) in wrapped.iter().zip(widths) {
            for (n, line) in lines.iter().enumerate() {
                let baseline = self.cursor - TABLE_FONT_SIZE - n as f32 * line_height;
                self.draw_text(line, x + TABLE_CELL_PADDING, baseline, style);
            }
            x += width;
        }
        self.cursor -= row_height;
    }
}

/// Lay out and serialize a structured document
pub fn render_document(document: &StructuredDocument) -> Result<Artifact, RenderError> {
    let mut layout = Layout::new(document);
    for block in &document.blocks {
        layout.block(block);
    }
    let pages = layout.finish();

    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page.operations,
        };
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));
        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if !page.links.is_empty() {
            let annots: Vec<Object> = page
                .links
                .iter()
                .map(|link| pdf.add_object(link.annotation()).into())
                .collect();
            page_dict.set("Annots", annots);
        }
        kids.push(pdf.add_object(page_dict).into());
    }

    write_pdf(
        pdf,
        pages_id,
        kids,
        Some(resources_id),
        document.page_size,
        &document.title,
    )
}

/// Embed a snapshot as a single image page, scaled to fit inside a margin
pub fn render_snapshot(snapshot: &Snapshot, page_size: PageSize) -> Result<Artifact, RenderError> {
    if snapshot.width() == 0 || snapshot.height() == 0 {
        return Err(RenderError::EmptySnapshot);
    }

    let (page_width, page_height) = page_size.dimensions();
    let image_width = snapshot.width() as f32;
    let image_height = snapshot.height() as f32;
    let scale = ((page_width - 2.0 * SNAPSHOT_MARGIN) / image_width)
        .min((page_height - 2.0 * SNAPSHOT_MARGIN) / image_height);
    let draw_width = image_width * scale;
    let draw_height = image_height * scale;
    let x = (page_width - draw_width) / 2.0;
    let y = page_height - SNAPSHOT_MARGIN - draw_height;

    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let image_id = pdf.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(snapshot.width()),
            "Height" => i64::from(snapshot.height()),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
        },
        snapshot.image.as_raw().clone(),
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    draw_width.into(),
                    Object::Integer(0),
                    Object::Integer(0),
                    draw_height.into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec!["Im1".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = pdf.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im1" => image_id },
        },
    });

    write_pdf(pdf, pages_id, vec![page_id.into()], None, page_size, "Resume")
}

fn write_pdf(
    mut pdf: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    resources_id: Option<ObjectId>,
    page_size: PageSize,
    title: &str,
) -> Result<Artifact, RenderError> {
    let page_count = kids.len();
    let (width, height) = page_size.dimensions();
    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        width.into(),
        height.into(),
    ];

    let mut pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count as i64,
        "MediaBox" => media_box,
    };
    if let Some(resources_id) = resources_id {
        pages.set("Resources", resources_id);
    }
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = pdf.add_object(dictionary! {
        "Title" => pdf_string(title),
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(
            Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()
        ),
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);
    pdf.compress();

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)?;
    Ok(Artifact { bytes, page_count })
}
