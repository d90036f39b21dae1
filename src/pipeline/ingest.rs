// file: src/pipeline/ingest.rs
// description: validate, extract, save and persist one uploaded paper
// reference: upload handling flow shared by the http api and the cli

use crate::database::PaperStore;
use crate::error::{PaperError, Result};
use crate::extractor::PdfExtractor;
use crate::models::{NewPaper, Paper};
use crate::storage::UploadStore;
use crate::utils::{OperationTimer, Validator};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

const SLOW_EXTRACTION: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct IngestPipeline {
    store: PaperStore,
    uploads: UploadStore,
    extractor: PdfExtractor,
}

impl IngestPipeline {
    pub fn new(store: PaperStore, uploads: UploadStore) -> Self {
        Self {
            store,
            uploads,
            extractor: PdfExtractor::new(),
        }
    }

    pub fn store(&self) -> &PaperStore {
        &self.store
    }

    /// Ingests one upload. Validation and extraction run before anything is
    /// written, so rejected input leaves neither a file nor a row behind.
    pub async fn ingest(&self, original_filename: &str, bytes: Vec<u8>) -> Result<Paper> {
        Validator::validate_pdf_filename(original_filename)?;
        Validator::validate_content_not_empty(&bytes)?;

        let timer = OperationTimer::new(&format!("extract {}", original_filename));
        let extractor = self.extractor;
        let (extracted, bytes) = tokio::task::spawn_blocking(move || {
            let extracted = extractor.extract(&bytes);
            (extracted, bytes)
        })
        .await
        .map_err(|e| PaperError::Pdf(format!("PDF parser aborted: {}", e)))?;
        timer.warn_if_slow(SLOW_EXTRACTION, "PDF extraction");
        let extracted = extracted?;
        timer.finish();

        let stored_path = self.uploads.save(original_filename, &bytes).await?;

        let new_paper = NewPaper::new(
            extracted.title,
            extracted.authors,
            extracted.abstract_text,
            extracted.full_text,
            original_filename.to_string(),
            stored_path.display().to_string(),
            extracted.page_count,
        );

        match self.store.insert_paper(&new_paper).await {
            Ok(paper) => {
                info!(
                    "Ingested paper {} '{}' from {}",
                    paper.id, paper.title, paper.filename
                );
                Ok(paper)
            }
            Err(e) => {
                warn!("Failed to store {}: {}", original_filename, e);
                self.uploads.discard(&stored_path).await;
                Err(e)
            }
        }
    }

    /// Ingests a PDF from the local filesystem under its own file name.
    pub async fn ingest_file(&self, path: &Path) -> Result<Paper> {
        Validator::validate_file_path(path)?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| PaperError::FileOperation {
                path: path.to_path_buf(),
                source,
            })?;

        self.ingest(&filename, bytes).await
    }
}
