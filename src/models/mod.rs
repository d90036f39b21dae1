// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod artifact;
pub mod paper;
pub mod search_result;

pub use artifact::{Artifact, ArtifactKind};
pub use paper::{NewPaper, Paper, UploadedPaper};
pub use search_result::SearchResult;
