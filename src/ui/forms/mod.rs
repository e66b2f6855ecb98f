//! Form rendering module
//!
//! - `field_renderer`: input box rendering
//! - `step_form`: the current wizard step with its action buttons

mod field_renderer;
mod step_form;

pub use step_form::draw_step_form;
