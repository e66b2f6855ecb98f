//! Render adapter: turns a structured document or a preview snapshot into a
//! PDF artifact and writes it to disk

mod download;
mod pdf;
mod snapshot;
mod traits;

pub use download::{save_artifact, DEFAULT_FILE_NAME};
pub use pdf::PdfRenderer;
pub use snapshot::capture_snapshot;
#[cfg(test)]
pub use traits::MockRenderAdapter;
pub use traits::{Artifact, RenderAdapter, RenderError, RenderInput};
