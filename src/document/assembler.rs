//! Builds a structured document from a finalized record

use super::model::{
    Alignment, Block, Margins, PageSize, Rgb, StructuredDocument, StyleName, Table, TextRun,
    TextStyle,
};
use crate::state::{is_blank, EntryField, FieldId, FormRecord, GroupId, GroupSpec, StepTable};
use std::collections::BTreeMap;

/// Fields rendered in the personal/contact block instead of as sections
const HEADER_FIELDS: &[FieldId] = &[
    FieldId::Name,
    FieldId::Headline,
    FieldId::Email,
    FieldId::Phone,
    FieldId::Linkedin,
];

/// Groups rendered in the personal/contact block instead of as sections
const HEADER_GROUPS: &[GroupId] = &[GroupId::SocialLinks];

const PAGE_MARGINS: Margins = Margins::new(30.0, 20.0, 30.0, 20.0);
const BODY_MARGIN: Margins = Margins::new(0.0, 2.0, 0.0, 5.0);
const SECTION_HEADER_COLOR: &str = "#007acc";
/// Subtitle used when the headline is left blank
const DEFAULT_HEADLINE: &str = "Entry-Level Software Developer";

/// Fixed style taxonomy
pub fn default_styles() -> BTreeMap<StyleName, TextStyle> {
    let mut styles = BTreeMap::new();
    styles.insert(
        StyleName::Name,
        TextStyle {
            font_size: 18.0,
            bold: true,
            alignment: Alignment::Center,
            margin: Margins::new(0.0, 0.0, 0.0, 5.0),
            ..Default::default()
        },
    );
    styles.insert(
        StyleName::Subtitle,
        TextStyle {
            font_size: 12.0,
            italic: true,
            alignment: Alignment::Center,
            margin: Margins::new(0.0, 0.0, 0.0, 10.0),
            ..Default::default()
        },
    );
    styles.insert(
        StyleName::Contact,
        TextStyle {
            font_size: 10.0,
            alignment: Alignment::Center,
            margin: Margins::new(0.0, 0.0, 0.0, 15.0),
            ..Default::default()
        },
    );
    styles.insert(
        StyleName::SectionHeader,
        TextStyle {
            font_size: 12.0,
            bold: true,
            margin: Margins::new(0.0, 10.0, 0.0, 5.0),
            color: Rgb::from_hex(SECTION_HEADER_COLOR).unwrap_or(Rgb::BLACK),
            ..Default::default()
        },
    );
    styles
}

/// Assembles documents in the order declared by a step table
#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler {
    table: StepTable,
    page_size: PageSize,
}

impl Assembler {
    pub fn new(table: StepTable) -> Self {
        Self {
            table,
            page_size: PageSize::A4,
        }
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Best-effort render of whatever the record holds; never fails
    pub fn assemble(&self, record: &FormRecord) -> StructuredDocument {
        let mut blocks = Vec::new();

        personal_block(record, &mut blocks);
        social_block(record, &mut blocks);

        for step in self.table.steps() {
            for spec in step
                .fields
                .iter()
                .filter(|spec| !HEADER_FIELDS.contains(&spec.id))
            {
                let value = record.field(spec.id);
                if is_blank(value) {
                    continue;
                }
                blocks.push(section_header(spec.label));
                blocks.push(body_block(spec.id, value));
            }
            if let Some(group) = step
                .group
                .as_ref()
                .filter(|group| !HEADER_GROUPS.contains(&group.id))
            {
                group_section(record, group, &mut blocks);
            }
        }

        let name = record.field(FieldId::Name).trim();
        let title = if name.is_empty() {
            "Resume".to_string()
        } else {
            format!("{name} - Resume")
        };

        tracing::debug!("Assembled document with {} blocks", blocks.len());

        StructuredDocument {
            title,
            page_size: self.page_size,
            page_margins: PAGE_MARGINS,
            styles: default_styles(),
            blocks,
        }
    }
}

/// Assemble with the default résumé step table
pub fn assemble(record: &FormRecord) -> StructuredDocument {
    Assembler::default().assemble(record)
}

fn section_header(label: &str) -> Block {
    Block::Text(TextRun::styled(label, StyleName::SectionHeader))
}

/// Skills written as `Category: items` lines become a two-column table
fn body_block(id: FieldId, value: &str) -> Block {
    if id == FieldId::Skills {
        let rows: Option<Vec<Vec<String>>> = value
            .lines()
            .filter(|line| !is_blank(line))
            .map(|line| {
                let (category, items) = line.split_once(':')?;
                Some(vec![category.trim().to_string(), items.trim().to_string()])
            })
            .collect();
        if let Some(rows) = rows.filter(|rows| !rows.is_empty()) {
            return Block::Table(Table { header: None, rows });
        }
    }
    Block::Text(TextRun::new(value.trim()).margin(BODY_MARGIN))
}

fn personal_block(record: &FormRecord, blocks: &mut Vec<Block>) {
    let name = record.field(FieldId::Name).trim();
    if !name.is_empty() {
        blocks.push(Block::Text(TextRun::styled(name, StyleName::Name)));
    }

    let headline = match record.field(FieldId::Headline).trim() {
        "" if name.is_empty() => None,
        "" => Some(DEFAULT_HEADLINE),
        headline => Some(headline),
    };
    if let Some(headline) = headline {
        blocks.push(Block::Text(TextRun::styled(headline, StyleName::Subtitle)));
    }

    let contact: Vec<&str> = [FieldId::Email, FieldId::Phone, FieldId::Linkedin]
        .into_iter()
        .map(|id| record.field(id).trim())
        .filter(|value| !value.is_empty())
        .collect();
    if !contact.is_empty() {
        blocks.push(Block::Text(TextRun::styled(
            contact.join(" | "),
            StyleName::Contact,
        )));
    }
}

/// One linked run per complete social link; incomplete links are dropped
fn social_block(record: &FormRecord, blocks: &mut Vec<Block>) {
    for entry in record.group(GroupId::SocialLinks).entries() {
        let label = entry.get(EntryField::Label).trim();
        let url = entry.get(EntryField::Url).trim();
        if label.is_empty() || url.is_empty() {
            continue;
        }
        blocks.push(Block::Text(
            TextRun::styled(format!("{label}: {url}"), StyleName::Contact).link(url),
        ));
    }
}

fn group_section(record: &FormRecord, group: &GroupSpec, blocks: &mut Vec<Block>) {
    let mut body = Vec::new();
    for entry in record.group(group.id).entries() {
        match group.id {
            GroupId::Education => {
                let college = entry.get(EntryField::College).trim();
                if college.is_empty() {
                    continue;
                }
                let cgpa = entry.get(EntryField::Cgpa).trim();
                let right = if cgpa.is_empty() {
                    String::new()
                } else {
                    format!("CGPA: {cgpa}")
                };
                body.push(Block::Columns {
                    left: TextRun::new(college).bold(),
                    right: TextRun::new(right).align(Alignment::Right),
                });
                let duration = entry.get(EntryField::Duration).trim();
                if !duration.is_empty() {
                    body.push(Block::Text(TextRun::new(duration).italic().margin(BODY_MARGIN)));
                }
            }
            GroupId::SocialLinks => {
                let label = entry.get(EntryField::Label).trim();
                let url = entry.get(EntryField::Url).trim();
                if label.is_empty() || url.is_empty() {
                    continue;
                }
                body.push(Block::Text(TextRun::new(format!("{label}: {url}")).link(url)));
            }
        }
    }

    if !body.is_empty() {
        blocks.push(section_header(group.label));
        blocks.extend(body);
    }
}
