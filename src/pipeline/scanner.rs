// file: src/pipeline/scanner.rs
// description: PDF discovery for batch ingestion from a file or directory tree
// reference: https://docs.rs/walkdir

use crate::config::IngestConfig;
use crate::error::{PaperError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

const PDF_EXTENSION: &str = "pdf";

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
}

pub struct PdfScanner {
    config: IngestConfig,
}

impl PdfScanner {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// A single file is returned if it is within the size limit; a directory is
    /// walked for `*.pdf` files and oversized ones are skipped.
    pub fn scan(&self, root: &Path) -> Result<Vec<ScannedFile>> {
        let max_size = self.max_file_size();

        if root.is_file() {
            let size = root.metadata()?.len();
            if size > max_size {
                return Err(PaperError::Validation(format!(
                    "File exceeds the {} MB ingest limit: {}",
                    self.config.max_file_size_mb,
                    root.display()
                )));
            }
            return Ok(vec![ScannedFile {
                path: root.to_path_buf(),
                relative_path: root
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default(),
                size,
            }]);
        }

        if !root.is_dir() {
            return Err(PaperError::Validation(format!(
                "Path does not exist: {}",
                root.display()
            )));
        }

        info!("Scanning directory: {}", root.display());
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some(PDF_EXTENSION) {
                continue;
            }

            let Ok(metadata) = entry.metadata() else {
                continue;
            };

            let size = metadata.len();
            if size > max_size {
                debug!(
                    "Skipping large file ({} MB): {}",
                    size / 1024 / 1024,
                    path.display()
                );
                continue;
            }

            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();

            files.push(ScannedFile {
                path: path.to_path_buf(),
                relative_path,
                size,
            });
        }

        info!("Found {} PDF files", files.len());
        Ok(files)
    }

    fn max_file_size(&self) -> u64 {
        (self.config.max_file_size_mb * 1024 * 1024) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config() -> IngestConfig {
        IngestConfig {
            parallel_workers: 1,
            max_file_size_mb: 1,
        }
    }

    #[test]
    fn test_scan_directory_finds_only_pdfs() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("a.pdf"), "%PDF").unwrap();
        fs::write(temp.path().join("nested/b.pdf"), "%PDF").unwrap();
        fs::write(temp.path().join("notes.txt"), "text").unwrap();
        fs::write(temp.path().join("upper.PDF"), "%PDF").unwrap();

        let files = PdfScanner::new(config()).scan(temp.path()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();

        assert_eq!(files.len(), 2);
        assert!(names.contains(&"a.pdf"));
        assert!(names.iter().any(|n| n.ends_with("b.pdf")));
    }

    #[test]
    fn test_scan_skips_large_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("big.pdf"), vec![0u8; 2 * 1024 * 1024]).unwrap();

        let files = PdfScanner::new(config()).scan(temp.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_single_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("single.pdf");
        fs::write(&file, "%PDF").unwrap();

        let files = PdfScanner::new(config()).scan(&file).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "single.pdf");
        assert_eq!(files[0].size, 4);
    }

    #[test]
    fn test_scan_single_file_over_limit_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("big.pdf");
        fs::write(&file, vec![0u8; 2 * 1024 * 1024]).unwrap();

        let err = PdfScanner::new(config()).scan(&file).unwrap_err();
        assert!(matches!(err, PaperError::Validation(_)));
    }

    #[test]
    fn test_scan_missing_path() {
        let result = PdfScanner::new(config()).scan(Path::new("/nonexistent/papers"));
        assert!(result.is_err());
    }
}
