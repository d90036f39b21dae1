// file: src/pipeline/mod.rs
// description: ingestion pipeline module exports
// reference: internal module structure

mod ingest;
mod progress;
mod scanner;

pub use ingest::IngestPipeline;
pub use progress::{IngestOutcome, PipelineStats, ProgressTracker};
pub use scanner::{PdfScanner, ScannedFile};
