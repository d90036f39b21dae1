// file: src/extractor/mod.rs
// description: PDF extraction module exports
// reference: internal module structure

pub mod abstract_text;
pub mod metadata;
pub mod pdf;

pub use abstract_text::extract_abstract;
pub use metadata::{PdfMetadata, UNKNOWN_AUTHORS, UNKNOWN_TITLE};
pub use pdf::{ExtractedPaper, PdfExtractor};
