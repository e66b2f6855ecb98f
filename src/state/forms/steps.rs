//! Static step definitions for the résumé wizard

use super::field::{EntryField, EntryFieldSpec, FieldId, FieldSpec, GroupId, GroupSpec, InputKind};
use super::record::{is_blank, FormRecord};
use crate::error::WizardError;

/// One wizard step: fixed fields plus an optional repeatable group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDef {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
    pub group: Option<GroupSpec>,
}

/// A single editable input on a step, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRef {
    Field(FieldId),
    Entry {
        group: GroupId,
        index: usize,
        field: EntryField,
    },
}

const PERSONAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(FieldId::Name, "Full Name", InputKind::Text),
    FieldSpec::optional(FieldId::Headline, "Headline", InputKind::Text),
    FieldSpec::required(FieldId::Email, "Email", InputKind::Email),
    FieldSpec::required(FieldId::Phone, "Phone", InputKind::Phone),
];

const LINK_FIELDS: &[FieldSpec] = &[FieldSpec::required(
    FieldId::Linkedin,
    "LinkedIn Profile",
    InputKind::Url,
)];

const SOCIAL_LINK_FIELDS: &[EntryFieldSpec] = &[
    EntryFieldSpec {
        field: EntryField::Label,
        label: "Label",
        kind: InputKind::Text,
        required: false,
    },
    EntryFieldSpec {
        field: EntryField::Url,
        label: "URL",
        kind: InputKind::Url,
        required: false,
    },
];

const EDUCATION_FIELDS: &[EntryFieldSpec] = &[
    EntryFieldSpec {
        field: EntryField::College,
        label: "College",
        kind: InputKind::Text,
        required: true,
    },
    EntryFieldSpec {
        field: EntryField::Cgpa,
        label: "CGPA",
        kind: InputKind::Numeric,
        required: true,
    },
    EntryFieldSpec {
        field: EntryField::Duration,
        label: "Duration",
        kind: InputKind::Text,
        required: true,
    },
];

const SKILL_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(FieldId::Skills, "Technical Skills", InputKind::Multiline),
    FieldSpec::required(FieldId::Projects, "Projects", InputKind::Multiline),
];

const EXPERIENCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(FieldId::Experience, "Experience", InputKind::Multiline),
    FieldSpec::required(FieldId::Achievements, "Achievements", InputKind::Multiline),
    FieldSpec::required(
        FieldId::Leadership,
        "Leadership & Activities",
        InputKind::Multiline,
    ),
];

const RESUME_STEPS: &[StepDef] = &[
    StepDef {
        title: "Personal Info",
        fields: PERSONAL_FIELDS,
        group: None,
    },
    StepDef {
        title: "Links",
        fields: LINK_FIELDS,
        group: Some(GroupSpec {
            id: GroupId::SocialLinks,
            label: "Social Links",
            fields: SOCIAL_LINK_FIELDS,
        }),
    },
    StepDef {
        title: "Education",
        fields: &[],
        group: Some(GroupSpec {
            id: GroupId::Education,
            label: "Education",
            fields: EDUCATION_FIELDS,
        }),
    },
    StepDef {
        title: "Skills & Projects",
        fields: SKILL_FIELDS,
        group: None,
    },
    StepDef {
        title: "Experience",
        fields: EXPERIENCE_FIELDS,
        group: None,
    },
];

/// Ordered, immutable table of wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTable {
    steps: &'static [StepDef],
}

impl Default for StepTable {
    fn default() -> Self {
        Self::resume()
    }
}

impl StepTable {
    /// The five-step résumé wizard
    pub const fn resume() -> Self {
        Self {
            steps: RESUME_STEPS,
        }
    }

    #[cfg(test)]
    pub const fn from_steps(steps: &'static [StepDef]) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &'static [StepDef] {
        self.steps
    }

    pub fn step(&self, index: usize) -> Result<&'static StepDef, WizardError> {
        self.steps
            .get(index)
            .ok_or(WizardError::StepIndexOutOfRange {
                index,
                count: self.steps.len(),
            })
    }

    pub fn fields_for(&self, index: usize) -> Result<&'static [FieldSpec], WizardError> {
        Ok(self.step(index)?.fields)
    }

    pub fn group_for(&self, index: usize) -> Result<Option<&'static GroupSpec>, WizardError> {
        Ok(self.step(index)?.group.as_ref())
    }

    /// Look up the descriptor of a scalar field anywhere in the table
    pub fn field_spec(&self, id: FieldId) -> Option<&'static FieldSpec> {
        self.steps
            .iter()
            .flat_map(|step| step.fields.iter())
            .find(|spec| spec.id == id)
    }

    /// Look up the descriptor of a group anywhere in the table
    pub fn group_spec(&self, id: GroupId) -> Option<&'static GroupSpec> {
        self.steps
            .iter()
            .filter_map(|step| step.group.as_ref())
            .find(|spec| spec.id == id)
    }

    /// Labels of every unmet requirement on a step
    pub fn missing_fields(
        &self,
        index: usize,
        record: &FormRecord,
    ) -> Result<Vec<String>, WizardError> {
        let mut missing: Vec<String> = self
            .fields_for(index)?
            .iter()
            .filter(|spec| spec.required && is_blank(record.field(spec.id)))
            .map(|spec| spec.label.to_string())
            .collect();

        if let Some(group) = self.group_for(index)? {
            let entries = record.group(group.id).entries();
            for (i, entry) in entries.iter().enumerate() {
                for spec in group.fields.iter().filter(|spec| spec.required) {
                    if is_blank(entry.get(spec.field)) {
                        missing.push(format!("{} #{} {}", group.label, i + 1, spec.label));
                    }
                }
            }
        }

        Ok(missing)
    }

    pub fn is_step_complete(&self, index: usize, record: &FormRecord) -> Result<bool, WizardError> {
        Ok(self.missing_fields(index, record)?.is_empty())
    }

    /// Every editable input on a step, in display order
    pub fn inputs_for(
        &self,
        index: usize,
        record: &FormRecord,
    ) -> Result<Vec<InputRef>, WizardError> {
        let mut inputs: Vec<InputRef> = self
            .fields_for(index)?
            .iter()
            .map(|spec| InputRef::Field(spec.id))
            .collect();
        if let Some(group) = self.group_for(index)? {
            for entry_index in 0..record.group(group.id).len() {
                inputs.extend(group.fields.iter().map(|spec| InputRef::Entry {
                    group: group.id,
                    index: entry_index,
                    field: spec.field,
                }));
            }
        }
        Ok(inputs)
    }

    /// Input kind of an input reference
    pub fn input_kind(&self, input: InputRef) -> InputKind {
        match input {
            InputRef::Field(id) => self.field_spec(id).map(|s| s.kind).unwrap_or_default(),
            InputRef::Entry { group, field, .. } => self
                .group_spec(group)
                .and_then(|g| g.field(field))
                .map(|s| s.kind)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn personal_record() -> FormRecord {
        let mut record = FormRecord::new();
        record.set_field(FieldId::Name, "Ada Lovelace");
        record.set_field(FieldId::Email, "ada@example.com");
        record.set_field(FieldId::Phone, "+44 20 7946 0000");
        record
    }

    mod lookup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_resume_table_has_five_steps() {
            let table = StepTable::resume();
            assert_eq!(table.len(), 5);
            let titles: Vec<_> = table.steps().iter().map(|s| s.title).collect();
            assert_eq!(
                titles,
                vec![
                    "Personal Info",
                    "Links",
                    "Education",
                    "Skills & Projects",
                    "Experience"
                ]
            );
        }

        #[test]
        fn test_fields_for_returns_ordered_descriptors() {
            let table = StepTable::resume();
            let ids: Vec<_> = table.fields_for(0).unwrap().iter().map(|f| f.id).collect();
            assert_eq!(
                ids,
                vec![FieldId::Name, FieldId::Headline, FieldId::Email, FieldId::Phone]
            );
        }

        #[test]
        fn test_fields_for_out_of_range() {
            let table = StepTable::resume();
            assert_eq!(
                table.fields_for(5).unwrap_err(),
                WizardError::StepIndexOutOfRange { index: 5, count: 5 }
            );
        }

        #[test]
        fn test_group_for() {
            let table = StepTable::resume();
            assert!(table.group_for(0).unwrap().is_none());
            assert_eq!(table.group_for(2).unwrap().unwrap().id, GroupId::Education);
            assert!(table.group_for(9).is_err());
        }

        #[test]
        fn test_input_kind_lookup() {
            let table = StepTable::resume();
            assert_eq!(table.input_kind(InputRef::Field(FieldId::Skills)), InputKind::Multiline);
            assert_eq!(
                table.input_kind(InputRef::Entry {
                    group: GroupId::Education,
                    index: 0,
                    field: EntryField::Cgpa
                }),
                InputKind::Numeric
            );
        }
    }

    mod completeness {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_personal_step_is_incomplete() {
            let table = StepTable::resume();
            let record = FormRecord::new();
            assert!(!table.is_step_complete(0, &record).unwrap());
            assert_eq!(
                table.missing_fields(0, &record).unwrap(),
                vec!["Full Name", "Email", "Phone"]
            );
        }

        #[test]
        fn test_optional_fields_not_required() {
            let table = StepTable::resume();
            let record = personal_record();
            assert!(table.is_step_complete(0, &record).unwrap());
        }

        #[test]
        fn test_whitespace_does_not_satisfy_requirement() {
            let table = StepTable::resume();
            let mut record = personal_record();
            record.set_field(FieldId::Name, "   ");
            assert_eq!(table.missing_fields(0, &record).unwrap(), vec!["Full Name"]);
        }

        #[test]
        fn test_links_step_requires_linkedin_only() {
            let table = StepTable::resume();
            let mut record = FormRecord::new();
            assert_eq!(table.missing_fields(1, &record).unwrap(), vec!["LinkedIn Profile"]);

            // social link entries stay optional
            record.set_field(FieldId::Linkedin, "linkedin.com/in/ada");
            assert!(table.is_step_complete(1, &record).unwrap());
        }

        #[test]
        fn test_experience_step_sections_required() {
            let table = StepTable::resume();
            let mut record = FormRecord::new();
            assert_eq!(
                table.missing_fields(4, &record).unwrap(),
                vec!["Experience", "Achievements", "Leadership & Activities"]
            );

            record.set_field(FieldId::Experience, "Intern at Babbage & Co");
            record.set_field(FieldId::Achievements, "First published algorithm");
            assert_eq!(
                table.missing_fields(4, &record).unwrap(),
                vec!["Leadership & Activities"]
            );
        }

        #[test]
        fn test_every_education_entry_checked() {
            let table = StepTable::resume();
            let mut record = FormRecord::new();
            for (field, value) in [
                (EntryField::College, "A"),
                (EntryField::Cgpa, "8.0"),
                (EntryField::Duration, "2019-2023"),
            ] {
                record.set_group_field(GroupId::Education, 0, field, value).unwrap();
            }
            assert!(table.is_step_complete(2, &record).unwrap());

            record.add_group_entry(GroupId::Education);
            record
                .set_group_field(GroupId::Education, 1, EntryField::College, "B")
                .unwrap();
            assert_eq!(
                table.missing_fields(2, &record).unwrap(),
                vec!["Education #2 CGPA", "Education #2 Duration"]
            );
        }

        #[test]
        fn test_is_step_complete_out_of_range() {
            let table = StepTable::resume();
            assert!(table.is_step_complete(7, &FormRecord::new()).is_err());
        }
    }

    mod inputs {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_inputs_expand_group_entries() {
            let table = StepTable::resume();
            let mut record = FormRecord::new();
            record.add_group_entry(GroupId::SocialLinks);
            let inputs = table.inputs_for(1, &record).unwrap();
            assert_eq!(inputs.len(), 1 + 2 * 2);
            assert_eq!(inputs[0], InputRef::Field(FieldId::Linkedin));
            assert_eq!(
                inputs[4],
                InputRef::Entry {
                    group: GroupId::SocialLinks,
                    index: 1,
                    field: EntryField::Url
                }
            );
        }
    }
}
