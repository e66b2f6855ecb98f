//! Application state definitions

use super::forms::{FinalizedRecord, GroupId, InputRef, Wizard};
use crate::document::StructuredDocument;
use crate::error::WizardError;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::path::PathBuf;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Step-by-step data entry
    #[default]
    Wizard,
    /// Read-only preview of the assembled document
    Preview,
}

/// Progress of the background PDF generation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Pending,
    Ready(PathBuf),
    Failed(String),
}

impl GenerationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn label(&self) -> String {
        match self {
            Self::Idle => "Not generated".to_string(),
            Self::Pending => "Generating PDF...".to_string(),
            Self::Ready(path) => format!("Saved {}", path.display()),
            Self::Failed(message) => format!("Failed: {message}"),
        }
    }
}

/// Status-bar message with the time it was set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub at: DateTime<Local>,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub wizard: Wizard,

    // Form state
    pub active_form_field: usize,

    // Feedback
    pub status: Option<StatusMessage>,
    errors: VecDeque<String>,

    // Generation
    pub generation: GenerationStatus,
    pub finalized: Option<FinalizedRecord>,
    pub document: Option<StructuredDocument>,
    pub preview_scroll: u16,
}

impl AppState {
    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            at: Local::now(),
        });
    }

    /// Inputs of the current step, in focus order
    pub fn current_inputs(&self) -> Vec<InputRef> {
        self.wizard
            .table()
            .inputs_for(self.wizard.current(), self.wizard.record())
            .unwrap_or_default()
    }

    pub fn active_input(&self) -> Option<InputRef> {
        self.current_inputs().get(self.active_form_field).copied()
    }

    /// Move to next form field
    pub fn next_form_field(&mut self) {
        let count = self.form_field_count();
        if count > 0 {
            self.active_form_field = (self.active_form_field + 1) % count;
        }
    }

    /// Move to previous form field
    pub fn prev_form_field(&mut self) {
        let count = self.form_field_count();
        if count == 0 {
            return;
        }
        if self.active_form_field == 0 {
            self.active_form_field = count - 1;
        } else {
            self.active_form_field -= 1;
        }
    }

    pub fn form_field_count(&self) -> usize {
        self.current_inputs().len()
    }

    /// Keep the focus inside the current step after its inputs change
    pub fn clamp_form_field(&mut self) {
        let count = self.form_field_count();
        if self.active_form_field >= count {
            self.active_form_field = count.saturating_sub(1);
        }
    }

    /// Focus the first input of a group entry
    pub fn focus_entry(&mut self, group: GroupId, index: usize) {
        if let Some(position) = self.current_inputs().iter().position(|input| {
            matches!(
                input,
                InputRef::Entry { group: g, index: i, .. } if *g == group && *i == index
            )
        }) {
            self.active_form_field = position;
        }
    }

    /// Group entry the user is working on: the focused one, or the last
    /// entry of the step's group when focus is on a plain field
    pub fn target_entry(&self) -> Option<(GroupId, usize)> {
        if let Some(InputRef::Entry { group, index, .. }) = self.active_input() {
            return Some((group, index));
        }
        let group = self
            .wizard
            .table()
            .group_for(self.wizard.current())
            .ok()
            .flatten()?;
        let len = self.wizard.record().group(group.id).len();
        Some((group.id, len.saturating_sub(1)))
    }

    /// Handle character input; characters the input kind rejects are dropped
    pub fn form_input_char(&mut self, c: char, shift: bool) -> Result<(), WizardError> {
        let ch = if shift { c.to_ascii_uppercase() } else { c };
        let Some(input) = self.active_input() else {
            return Ok(());
        };
        if !self.wizard.table().input_kind(input).accepts(ch) {
            return Ok(());
        }
        let record = self.wizard.record_mut()?;
        match input {
            InputRef::Field(id) => record.push_char(id, ch),
            InputRef::Entry {
                group,
                index,
                field,
            } => record.push_entry_char(group, index, field, ch)?,
        }
        Ok(())
    }

    /// Enter adds a newline in multiline inputs only
    pub fn form_newline(&mut self) -> Result<(), WizardError> {
        let Some(InputRef::Field(id)) = self.active_input() else {
            return Ok(());
        };
        if self.wizard.table().input_kind(InputRef::Field(id)).is_multiline() {
            self.wizard.record_mut()?.push_char(id, '\n');
        }
        Ok(())
    }

    /// Handle backspace in form
    pub fn form_backspace(&mut self) -> Result<(), WizardError> {
        let Some(input) = self.active_input() else {
            return Ok(());
        };
        let record = self.wizard.record_mut()?;
        match input {
            InputRef::Field(id) => record.pop_char(id),
            InputRef::Entry {
                group,
                index,
                field,
            } => record.pop_entry_char(group, index, field)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntryField, FieldId};

    fn type_str(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.form_input_char(c, false).unwrap();
        }
    }

    fn on_education() -> AppState {
        let mut state = AppState::default();
        state.wizard.set_field(FieldId::Name, "Ada").unwrap();
        state.wizard.set_field(FieldId::Email, "ada@example.com").unwrap();
        state.wizard.set_field(FieldId::Phone, "555").unwrap();
        state.wizard.set_field(FieldId::Linkedin, "linkedin.com/in/ada").unwrap();
        assert!(state.wizard.next().unwrap().moved());
        assert!(state.wizard.next().unwrap().moved());
        state
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_error_queue_is_fifo() {
            let mut state = AppState::default();
            assert!(!state.has_errors());

            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));

            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_dismiss_on_empty_queue_is_noop() {
            let mut state = AppState::default();
            state.dismiss_error();
            assert!(state.current_error().is_none());
        }
    }

    mod form_fields {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_tab_cycles_through_step_inputs() {
            let mut state = AppState::default();
            assert_eq!(state.form_field_count(), 4);
            assert_eq!(state.active_input(), Some(InputRef::Field(FieldId::Name)));

            for _ in 0..4 {
                state.next_form_field();
            }
            assert_eq!(state.active_form_field, 0);

            state.prev_form_field();
            assert_eq!(state.active_input(), Some(InputRef::Field(FieldId::Phone)));
        }

        #[test]
        fn test_typing_goes_to_active_field() {
            let mut state = AppState::default();
            type_str(&mut state, "Ada");
            state.form_backspace().unwrap();
            assert_eq!(state.wizard.record().field(FieldId::Name), "Ad");
        }

        #[test]
        fn test_shift_uppercases() {
            let mut state = AppState::default();
            state.form_input_char('a', true).unwrap();
            assert_eq!(state.wizard.record().field(FieldId::Name), "A");
        }

        #[test]
        fn test_input_kind_filters_characters() {
            let mut state = AppState::default();
            // Name, Headline, Email, Phone
            state.active_form_field = 3;
            type_str(&mut state, "+1 (555) x-123");
            assert_eq!(state.wizard.record().field(FieldId::Phone), "+1 (555) -123");
        }

        #[test]
        fn test_newline_only_in_multiline_inputs() {
            let mut state = AppState::default();
            state.form_newline().unwrap();
            assert_eq!(state.wizard.record().field(FieldId::Name), "");
        }

        #[test]
        fn test_entry_input_editing() {
            let mut state = on_education();

            // Education step: College, CGPA, Duration of entry 0
            assert_eq!(state.form_field_count(), 3);
            type_str(&mut state, "MIT");
            state.next_form_field();
            type_str(&mut state, "9.a1");

            let entry = &state.wizard.record().group(GroupId::Education).entries()[0];
            assert_eq!(entry.get(EntryField::College), "MIT");
            assert_eq!(entry.get(EntryField::Cgpa), "9.1");
        }

        #[test]
        fn test_clamp_after_inputs_shrink() {
            let mut state = AppState::default();
            state.active_form_field = 10;
            state.clamp_form_field();
            assert_eq!(state.active_form_field, 3);
        }
    }

    mod entries {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_target_entry_follows_focus() {
            let mut state = on_education();
            state.wizard.add_group_entry(GroupId::Education).unwrap();
            state.focus_entry(GroupId::Education, 1);
            assert_eq!(state.active_form_field, 3);
            assert_eq!(state.target_entry(), Some((GroupId::Education, 1)));
        }

        #[test]
        fn test_target_entry_none_without_group() {
            let state = AppState::default();
            assert_eq!(state.target_entry(), None);
        }
    }

    mod generation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_status_labels() {
            assert_eq!(GenerationStatus::Idle.label(), "Not generated");
            assert!(GenerationStatus::Pending.is_pending());
            assert_eq!(
                GenerationStatus::Ready(PathBuf::from("/tmp/resume.pdf")).label(),
                "Saved /tmp/resume.pdf"
            );
            assert_eq!(
                GenerationStatus::Failed("disk full".to_string()).label(),
                "Failed: disk full"
            );
        }
    }
}
