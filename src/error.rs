//! Error types for the wizard core

use crate::state::GroupId;
use thiserror::Error;

/// Errors raised by the form record, step table and wizard navigation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("step {index} is out of range (wizard has {count} steps)")]
    StepIndexOutOfRange { index: usize, count: usize },

    #[error("{group} entry {index} is out of range (group has {len} entries)")]
    IndexOutOfRange {
        group: GroupId,
        index: usize,
        len: usize,
    },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("step {step} is incomplete, missing: {}", missing.join(", "))]
    IncompleteStep { step: usize, missing: Vec<String> },

    #[error("generate is only available on the last step (on step {current} of {last})")]
    NotOnFinalStep { current: usize, last: usize },

    #[error("the record is finalized and can no longer be edited")]
    Finalized,

    #[error("unknown field: {0}")]
    UnknownField(String),
}
