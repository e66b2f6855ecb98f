//! Typed field identifiers and field descriptors

use std::fmt;

/// Scalar fields of the résumé record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Name,
    Headline,
    Email,
    Phone,
    Linkedin,
    Skills,
    Projects,
    Experience,
    Achievements,
    Leadership,
}

impl FieldId {
    /// Stable string key for this field
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Headline => "headline",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Linkedin => "linkedin",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Experience => "experience",
            Self::Achievements => "achievements",
            Self::Leadership => "leadership",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Repeatable groups of the résumé record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupId {
    SocialLinks,
    Education,
}

impl GroupId {
    pub const ALL: [GroupId; 2] = [GroupId::SocialLinks, GroupId::Education];

    /// Fixed shape of an entry in this group
    pub fn shape(self) -> &'static [EntryField] {
        match self {
            Self::SocialLinks => &[EntryField::Label, EntryField::Url],
            Self::Education => &[EntryField::College, EntryField::Cgpa, EntryField::Duration],
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::SocialLinks => "social_links",
            Self::Education => "education",
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fields inside a repeatable group entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryField {
    Label,
    Url,
    College,
    Cgpa,
    Duration,
}

impl EntryField {
    pub fn key(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Url => "url",
            Self::College => "college",
            Self::Cgpa => "cgpa",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Kind of input control, restricts which characters are accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Multiline,
    Email,
    Phone,
    Url,
    Numeric,
}

impl InputKind {
    /// Whether a typed character is accepted by this control
    pub fn accepts(self, c: char) -> bool {
        match self {
            Self::Text | Self::Multiline => !c.is_control() || (c == '\n' && self.is_multiline()),
            Self::Email | Self::Url => !c.is_whitespace() && !c.is_control(),
            Self::Phone => c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'),
            Self::Numeric => c.is_ascii_digit() || c == '.',
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, Self::Multiline)
    }
}

/// Describes a scalar field on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(id: FieldId, label: &'static str, kind: InputKind) -> Self {
        Self {
            id,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(id: FieldId, label: &'static str, kind: InputKind) -> Self {
        Self {
            id,
            label,
            kind,
            required: false,
        }
    }
}

/// Describes one field of a repeatable group entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFieldSpec {
    pub field: EntryField,
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
}

/// Describes a repeatable group rendered on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpec {
    pub id: GroupId,
    pub label: &'static str,
    pub fields: &'static [EntryFieldSpec],
}

impl GroupSpec {
    pub fn field(&self, field: EntryField) -> Option<&EntryFieldSpec> {
        self.fields.iter().find(|spec| spec.field == field)
    }
}
