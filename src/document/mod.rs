//! Structured document model and the assembler that builds it

mod assembler;
mod model;

pub use assembler::{assemble, default_styles, Assembler};
pub use model::{
    Alignment, Block, Margins, PageSize, Rgb, StructuredDocument, StyleName, Table, TextRun,
    TextStyle,
};
