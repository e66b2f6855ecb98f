//! The form record: scalar fields plus repeatable groups

use super::field::{EntryField, FieldId, GroupId};
use crate::error::WizardError;
use std::collections::BTreeMap;

/// One entry of a repeatable group, shaped by its group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    group: GroupId,
    values: BTreeMap<EntryField, String>,
}

impl GroupEntry {
    /// Blank template for a group
    pub fn blank(group: GroupId) -> Self {
        Self {
            group,
            values: group
                .shape()
                .iter()
                .map(|field| (*field, String::new()))
                .collect(),
        }
    }

    /// Value of a field, empty string for fields outside the shape
    pub fn get(&self, field: EntryField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    fn value_mut(&mut self, field: EntryField) -> Result<&mut String, WizardError> {
        let group = self.group;
        self.values
            .get_mut(&field)
            .ok_or_else(|| WizardError::UnknownField(format!("{group}.{field}")))
    }

    /// True if every field in the shape is blank
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|v| is_blank(v))
    }
}

/// User-extensible list of entries; never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatableGroup {
    id: GroupId,
    entries: Vec<GroupEntry>,
}

impl RepeatableGroup {
    pub fn new(id: GroupId) -> Self {
        Self {
            id,
            entries: vec![GroupEntry::blank(id)],
        }
    }

    pub fn entries(&self) -> &[GroupEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut GroupEntry, WizardError> {
        let len = self.entries.len();
        let group = self.id;
        self.entries
            .get_mut(index)
            .ok_or(WizardError::IndexOutOfRange { group, index, len })
    }
}

/// Collected wizard values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    scalars: BTreeMap<FieldId, String>,
    groups: BTreeMap<GroupId, RepeatableGroup>,
}

impl Default for FormRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl FormRecord {
    /// Empty record; every group starts with one blank entry
    pub fn new() -> Self {
        Self {
            scalars: BTreeMap::new(),
            groups: GroupId::ALL
                .into_iter()
                .map(|id| (id, RepeatableGroup::new(id)))
                .collect(),
        }
    }

    /// Scalar value, empty string if never set
    pub fn field(&self, id: FieldId) -> &str {
        self.scalars.get(&id).map(String::as_str).unwrap_or("")
    }

    pub fn set_field(&mut self, id: FieldId, value: impl Into<String>) {
        self.scalars.insert(id, value.into());
    }

    pub fn group(&self, id: GroupId) -> &RepeatableGroup {
        // Every group is inserted by `new` and never removed
        &self.groups[&id]
    }

    fn group_mut(&mut self, id: GroupId) -> &mut RepeatableGroup {
        self.groups.entry(id).or_insert_with(|| RepeatableGroup::new(id))
    }

    pub fn set_group_field(
        &mut self,
        group: GroupId,
        index: usize,
        field: EntryField,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        let slot = self.group_mut(group).entry_mut(index)?.value_mut(field)?;
        *slot = value.into();
        Ok(())
    }

    /// Append a blank entry and return its index
    pub fn add_group_entry(&mut self, group: GroupId) -> usize {
        let entries = &mut self.group_mut(group).entries;
        entries.push(GroupEntry::blank(group));
        tracing::debug!("Added {group} entry, now {}", entries.len());
        entries.len() - 1
    }

    /// Remove an entry; the last remaining entry can never be removed
    pub fn remove_group_entry(
        &mut self,
        group: GroupId,
        index: usize,
    ) -> Result<GroupEntry, WizardError> {
        let entries = &mut self.group_mut(group).entries;
        let len = entries.len();
        if index >= len {
            return Err(WizardError::IndexOutOfRange { group, index, len });
        }
        if len == 1 {
            return Err(WizardError::InvariantViolation(format!(
                "{group} must keep at least one entry"
            )));
        }
        tracing::debug!("Removed {group} entry {index}");
        Ok(entries.remove(index))
    }

    /// Owned copy of the record for the assembler
    pub fn snapshot(&self) -> FormRecord {
        self.clone()
    }

    /// Append a character to a scalar field
    pub fn push_char(&mut self, id: FieldId, c: char) {
        self.scalars.entry(id).or_default().push(c);
    }

    /// Remove the last character of a scalar field
    pub fn pop_char(&mut self, id: FieldId) {
        if let Some(value) = self.scalars.get_mut(&id) {
            value.pop();
        }
    }

    pub fn push_entry_char(
        &mut self,
        group: GroupId,
        index: usize,
        field: EntryField,
        c: char,
    ) -> Result<(), WizardError> {
        self.group_mut(group)
            .entry_mut(index)?
            .value_mut(field)?
            .push(c);
        Ok(())
    }

    pub fn pop_entry_char(
        &mut self,
        group: GroupId,
        index: usize,
        field: EntryField,
    ) -> Result<(), WizardError> {
        self.group_mut(group).entry_mut(index)?.value_mut(field)?.pop();
        Ok(())
    }
}

/// Read-only record produced by the final "Generate" action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedRecord(FormRecord);

impl FinalizedRecord {
    pub(crate) fn new(record: FormRecord) -> Self {
        Self(record)
    }
}

impl std::ops::Deref for FinalizedRecord {
    type Target = FormRecord;

    fn deref(&self) -> &FormRecord {
        &self.0
    }
}

/// Whitespace-only values count as empty
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod scalar_fields {
        use super::*;
        use crate::state::StepTable;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_record_is_empty() {
            let record = FormRecord::new();
            for step in StepTable::resume().steps() {
                for spec in step.fields {
                    assert_eq!(record.field(spec.id), "");
                }
            }
        }

        #[test]
        fn test_set_field_stores_value() {
            let mut record = FormRecord::new();
            record.set_field(FieldId::Name, "Ada Lovelace");
            assert_eq!(record.field(FieldId::Name), "Ada Lovelace");
        }

        #[test]
        fn test_push_and_pop_char() {
            let mut record = FormRecord::new();
            record.push_char(FieldId::Phone, '5');
            record.push_char(FieldId::Phone, '5');
            record.pop_char(FieldId::Phone);
            assert_eq!(record.field(FieldId::Phone), "5");
        }

        #[test]
        fn test_pop_char_on_empty_field() {
            let mut record = FormRecord::new();
            record.pop_char(FieldId::Phone);
            assert_eq!(record.field(FieldId::Phone), "");
        }
    }

    mod groups {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_groups_start_with_one_blank_entry() {
            let record = FormRecord::new();
            for id in GroupId::ALL {
                assert_eq!(record.group(id).len(), 1);
                assert!(record.group(id).entries()[0].is_blank());
            }
        }

        #[test]
        fn test_set_group_field() {
            let mut record = FormRecord::new();
            record
                .set_group_field(GroupId::Education, 0, EntryField::College, "MIT")
                .unwrap();
            assert_eq!(
                record.group(GroupId::Education).entries()[0].get(EntryField::College),
                "MIT"
            );
        }

        #[test]
        fn test_set_group_field_out_of_range() {
            let mut record = FormRecord::new();
            let err = record
                .set_group_field(GroupId::Education, 3, EntryField::College, "MIT")
                .unwrap_err();
            assert_eq!(
                err,
                WizardError::IndexOutOfRange {
                    group: GroupId::Education,
                    index: 3,
                    len: 1
                }
            );
        }

        #[test]
        fn test_set_group_field_outside_shape() {
            let mut record = FormRecord::new();
            let err = record
                .set_group_field(GroupId::SocialLinks, 0, EntryField::Cgpa, "9.0")
                .unwrap_err();
            assert!(matches!(err, WizardError::UnknownField(_)));
        }

        #[test]
        fn test_add_appends_blank_entry_last() {
            let mut record = FormRecord::new();
            record
                .set_group_field(GroupId::SocialLinks, 0, EntryField::Label, "GitHub")
                .unwrap();
            let index = record.add_group_entry(GroupId::SocialLinks);
            assert_eq!(index, 1);
            let entries = record.group(GroupId::SocialLinks).entries();
            assert_eq!(entries[0].get(EntryField::Label), "GitHub");
            assert!(entries[1].is_blank());
        }

        #[test]
        fn test_remove_last_remaining_entry_rejected() {
            let mut record = FormRecord::new();
            let err = record.remove_group_entry(GroupId::Education, 0).unwrap_err();
            assert!(matches!(err, WizardError::InvariantViolation(_)));
            assert_eq!(record.group(GroupId::Education).len(), 1);
        }

        #[test]
        fn test_remove_out_of_range_rejected() {
            let mut record = FormRecord::new();
            record.add_group_entry(GroupId::Education);
            let err = record.remove_group_entry(GroupId::Education, 5).unwrap_err();
            assert!(matches!(err, WizardError::IndexOutOfRange { .. }));
            assert_eq!(record.group(GroupId::Education).len(), 2);
        }

        #[test]
        fn test_add_then_remove_restores_group() {
            let mut record = FormRecord::new();
            record
                .set_group_field(GroupId::Education, 0, EntryField::College, "A")
                .unwrap();
            let second = record.add_group_entry(GroupId::Education);
            record
                .set_group_field(GroupId::Education, second, EntryField::College, "B")
                .unwrap();
            let before = record.group(GroupId::Education).clone();

            let added = record.add_group_entry(GroupId::Education);
            record.remove_group_entry(GroupId::Education, added).unwrap();

            assert_eq!(record.group(GroupId::Education), &before);
        }

        #[test]
        fn test_remove_middle_keeps_order() {
            let mut record = FormRecord::new();
            for (i, college) in ["A", "B", "C"].iter().enumerate() {
                if i > 0 {
                    record.add_group_entry(GroupId::Education);
                }
                record
                    .set_group_field(GroupId::Education, i, EntryField::College, *college)
                    .unwrap();
            }
            record.remove_group_entry(GroupId::Education, 1).unwrap();
            let colleges: Vec<_> = record
                .group(GroupId::Education)
                .entries()
                .iter()
                .map(|e| e.get(EntryField::College))
                .collect();
            assert_eq!(colleges, vec!["A", "C"]);
        }

        #[test]
        fn test_entry_char_editing() {
            let mut record = FormRecord::new();
            record
                .push_entry_char(GroupId::Education, 0, EntryField::Cgpa, '9')
                .unwrap();
            record
                .push_entry_char(GroupId::Education, 0, EntryField::Cgpa, '.')
                .unwrap();
            record
                .pop_entry_char(GroupId::Education, 0, EntryField::Cgpa)
                .unwrap();
            assert_eq!(
                record.group(GroupId::Education).entries()[0].get(EntryField::Cgpa),
                "9"
            );
        }
    }

    mod snapshot {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_snapshot_does_not_alias() {
            let mut record = FormRecord::new();
            record.set_field(FieldId::Name, "Ada");
            let snapshot = record.snapshot();

            record.set_field(FieldId::Name, "Grace");
            record.add_group_entry(GroupId::SocialLinks);

            assert_eq!(snapshot.field(FieldId::Name), "Ada");
            assert_eq!(snapshot.group(GroupId::SocialLinks).len(), 1);
        }
    }

    #[test]
    fn test_is_blank_trims_whitespace() {
        assert!(is_blank("   "));
        assert!(is_blank(""));
        assert!(!is_blank(" x "));
    }
}
