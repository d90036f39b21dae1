// file: src/storage/uploads.rs
// description: writes uploaded PDFs under unique sanitized names
// reference: https://docs.rs/tokio/latest/tokio/fs

use crate::error::{PaperError, Result};
use crate::utils::Validator;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Name a saved upload gets: a fresh UUID followed by the sanitized original name.
    pub fn unique_name(original_filename: &str) -> String {
        format!(
            "{}_{}",
            Uuid::new_v4(),
            Validator::sanitize_filename(original_filename)
        )
    }

    /// Saves `bytes` and returns the path written. Never overwrites an earlier upload.
    pub async fn save(&self, original_filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| PaperError::FileOperation {
                path: self.root.clone(),
                source,
            })?;

        let path = self.root.join(Self::unique_name(original_filename));

        fs::write(&path, bytes)
            .await
            .map_err(|source| PaperError::FileOperation {
                path: path.clone(),
                source,
            })?;

        if let Err(e) = Validator::validate_within_base_dir(&path, &self.root) {
            self.discard(&path).await;
            return Err(e);
        }

        debug!("Saved upload {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Best-effort removal of a saved upload, used when a later step fails.
    pub async fn discard(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            debug!("Could not remove upload {}: {}", path.display(), e);
        }
    }
}
