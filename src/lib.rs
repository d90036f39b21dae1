// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod analyzer;
pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod storage;
pub mod utils;

pub use analyzer::{AnalysisOutcome, Analyzer, CompletionService, LLM_NOT_CONFIGURED};
pub use api::{ApiError, AppState};
pub use config::{Config, DatabaseConfig, IngestConfig, LlmConfig, ServerConfig};
pub use database::{PaperStore, SchemaManager};
pub use error::{PaperError, Result};
pub use exporter::{ExportManifest, ExportedPaper, JsonExporter};
pub use extractor::{ExtractedPaper, PdfExtractor, UNKNOWN_AUTHORS, UNKNOWN_TITLE};
pub use models::{Artifact, ArtifactKind, NewPaper, Paper, SearchResult, UploadedPaper};
pub use pipeline::{IngestOutcome, IngestPipeline, PdfScanner, PipelineStats, ProgressTracker};
pub use storage::UploadStore;
pub use utils::{HealthReport, HealthStatus, OperationTimer, Validator};
