// file: src/exporter/mod.rs
// description: export module exports

pub mod json;

pub use json::{ExportManifest, ExportedPaper, JsonExporter};
