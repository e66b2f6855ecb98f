//! Wizard navigation state machine
//!
//! The wizard owns the record and the current step. Forward moves are gated
//! on the current step being complete; backward moves never validate.
//! `generate` is the terminal action: it finalizes the record, after which
//! every mutation and navigation is rejected.

use super::field::{EntryField, FieldId, GroupId};
use super::record::{FinalizedRecord, FormRecord, GroupEntry};
use super::steps::StepTable;
use crate::error::WizardError;

/// Editing phase of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Editing,
    Finalized,
}

/// Outcome of a `next` or `prev` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    /// The current step has unmet requirements; the wizard stays put
    Blocked { missing: Vec<String> },
    /// Already at the first or last step
    AtBoundary,
}

#[cfg(test)]
impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Wizard {
    table: StepTable,
    current: usize,
    record: FormRecord,
    phase: Phase,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(StepTable::resume())
    }
}

impl Wizard {
    pub fn new(table: StepTable) -> Self {
        Self {
            table,
            current: 0,
            record: FormRecord::new(),
            phase: Phase::Editing,
        }
    }

    pub fn table(&self) -> &StepTable {
        &self.table
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.table.len()
    }

    pub fn last_step(&self) -> usize {
        self.table.len().saturating_sub(1)
    }

    pub fn is_last_step(&self) -> bool {
        self.current == self.last_step()
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn is_finalized(&self) -> bool {
        self.phase == Phase::Finalized
    }

    fn ensure_editing(&self) -> Result<(), WizardError> {
        if self.is_finalized() {
            Err(WizardError::Finalized)
        } else {
            Ok(())
        }
    }

    pub fn next(&mut self) -> Result<Transition, WizardError> {
        self.ensure_editing()?;
        if self.is_last_step() {
            return Ok(Transition::AtBoundary);
        }
        if !self.table.is_step_complete(self.current, &self.record)? {
            let missing = self.table.missing_fields(self.current, &self.record)?;
            tracing::debug!("Step {} blocked, missing: {:?}", self.current, missing);
            return Ok(Transition::Blocked { missing });
        }
        let from = self.current;
        self.current += 1;
        tracing::info!("Wizard advanced from step {from} to {}", self.current);
        Ok(Transition::Moved {
            from,
            to: self.current,
        })
    }

    pub fn prev(&mut self) -> Result<Transition, WizardError> {
        self.ensure_editing()?;
        if self.current == 0 {
            return Ok(Transition::AtBoundary);
        }
        let from = self.current;
        self.current -= 1;
        tracing::info!("Wizard went back from step {from} to {}", self.current);
        Ok(Transition::Moved {
            from,
            to: self.current,
        })
    }

    /// Finalize the record; only valid on a complete last step
    pub fn generate(&mut self) -> Result<FinalizedRecord, WizardError> {
        self.ensure_editing()?;
        if !self.is_last_step() {
            return Err(WizardError::NotOnFinalStep {
                current: self.current,
                last: self.last_step(),
            });
        }
        if !self.table.is_step_complete(self.current, &self.record)? {
            return Err(WizardError::IncompleteStep {
                step: self.current,
                missing: self.table.missing_fields(self.current, &self.record)?,
            });
        }
        self.phase = Phase::Finalized;
        tracing::info!("Record finalized");
        Ok(FinalizedRecord::new(self.record.snapshot()))
    }

    pub fn set_field(&mut self, id: FieldId, value: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_editing()?;
        self.record.set_field(id, value);
        Ok(())
    }

    pub fn set_group_field(
        &mut self,
        group: GroupId,
        index: usize,
        field: EntryField,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.ensure_editing()?;
        self.record.set_group_field(group, index, field, value)
    }

    pub fn add_group_entry(&mut self, group: GroupId) -> Result<usize, WizardError> {
        self.ensure_editing()?;
        Ok(self.record.add_group_entry(group))
    }

    pub fn remove_group_entry(
        &mut self,
        group: GroupId,
        index: usize,
    ) -> Result<GroupEntry, WizardError> {
        self.ensure_editing()?;
        self.record.remove_group_entry(group, index)
    }

    /// Mutable record access for character-level editing
    pub fn record_mut(&mut self) -> Result<&mut FormRecord, WizardError> {
        self.ensure_editing()?;
        Ok(&mut self.record)
    }
}
