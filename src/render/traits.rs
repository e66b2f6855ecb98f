//! Render adapter boundary

use crate::document::StructuredDocument;
use async_trait::async_trait;
use image::RgbImage;
use thiserror::Error;

/// Errors from snapshot capture, PDF generation or writing the artifact
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("capture target unavailable: {0}")]
    CaptureUnavailable(String),

    #[error("snapshot is empty")]
    EmptySnapshot,

    #[error("snapshot font could not be loaded")]
    Font,

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render task failed: {0}")]
    Task(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(e: lopdf::Error) -> Self {
        RenderError::Pdf(e.to_string())
    }
}

/// Rasterized image of a display region
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub image: RgbImage,
}

impl Snapshot {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// What the adapter is asked to render
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInput {
    Document(StructuredDocument),
    Snapshot(Snapshot),
}

impl RenderInput {
    pub fn kind(&self) -> &'static str {
        match self {
            RenderInput::Document(_) => "document",
            RenderInput::Snapshot(_) => "snapshot",
        }
    }
}

/// Binary artifact ready to be offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Trait for render adapters, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RenderAdapter: Send + Sync {
    /// Turn a structured document or snapshot into a binary artifact
    async fn render(&self, input: RenderInput) -> Result<Artifact, RenderError>;
}
