//! Form domain layer
//!
//! Typed field identifiers, the form record with its repeatable groups,
//! the static step table and the wizard navigation state machine.

mod field;
mod record;
mod steps;
mod wizard;

pub use field::{EntryField, FieldId, GroupId, GroupSpec};
pub use record::{is_blank, FinalizedRecord, FormRecord};
pub use steps::{InputRef, StepTable};
pub use wizard::{Transition, Wizard};
