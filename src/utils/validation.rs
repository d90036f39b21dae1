// file: src/utils/validation.rs
// description: upload validation and filename sanitization helpers
// reference: input validation patterns

use crate::error::{PaperError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref UNSAFE_FILENAME_CHARS: Regex =
        Regex::new(r"[^A-Za-z0-9_.-]").expect("UNSAFE_FILENAME_CHARS regex is valid");
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("WHITESPACE_RUN regex is valid");
}

const PDF_EXTENSION: &str = ".pdf";

/// Fallback used when sanitizing strips a filename down to nothing.
pub const FALLBACK_FILENAME: &str = "paper.pdf";

pub struct Validator;

impl Validator {
    /// Accepts only names ending in `.pdf`; the check is case-sensitive.
    pub fn validate_pdf_filename(filename: &str) -> Result<()> {
        if filename.is_empty() {
            return Err(PaperError::Validation("No selected file".to_string()));
        }

        if !filename.ends_with(PDF_EXTENSION) {
            return Err(PaperError::Validation("Invalid file type".to_string()));
        }

        Ok(())
    }

    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            PaperError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(PaperError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_content_not_empty(content: &[u8]) -> Result<()> {
        if content.is_empty() {
            return Err(PaperError::Validation("Uploaded file is empty".to_string()));
        }
        Ok(())
    }

    /// Reduces a client-supplied filename to a safe ASCII basename.
    ///
    /// Path separators become spaces, whitespace runs become underscores,
    /// anything outside `[A-Za-z0-9_.-]` is dropped and leading/trailing dots
    /// and underscores are stripped.
    pub fn sanitize_filename(filename: &str) -> String {
        let separated = filename.replace(['/', '\\'], " ");
        let joined = WHITESPACE_RUN.replace_all(separated.trim(), "_");
        let stripped = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");
        let cleaned = stripped.trim_matches(|c| c == '.' || c == '_');

        if cleaned.is_empty() {
            FALLBACK_FILENAME.to_string()
        } else {
            cleaned.to_string()
        }
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let truncated: String = text.chars().take(max_chars).collect();
            format!("{}...", truncated)
        }
    }

    pub fn validate_within_base_dir(path: &Path, base_dir: &Path) -> Result<()> {
        let canonical_path = fs::canonicalize(path).map_err(|e| {
            PaperError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        let canonical_base = fs::canonicalize(base_dir).map_err(|e| {
            PaperError::Validation(format!(
                "Cannot canonicalize base dir {}: {}",
                base_dir.display(),
                e
            ))
        })?;

        if !canonical_path.starts_with(&canonical_base) {
            return Err(PaperError::Validation(format!(
                "Path traversal detected ({} outside {})",
                canonical_path.display(),
                canonical_base.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_pdf_filename() {
        assert!(Validator::validate_pdf_filename("paper.pdf").is_ok());
        assert!(Validator::validate_pdf_filename("paper.txt").is_err());
        assert!(Validator::validate_pdf_filename("paper.PDF").is_err());
        assert!(Validator::validate_pdf_filename("pdf").is_err());

        let err = Validator::validate_pdf_filename("").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: No selected file");
    }

    #[test]
    fn test_validate_file_path() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("test.pdf");
        fs::write(&file_path, "test").unwrap();

        assert!(Validator::validate_file_path(&file_path).is_ok());
        assert!(Validator::validate_file_path(temp.path()).is_err());
        assert!(Validator::validate_file_path(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_validate_content_not_empty() {
        assert!(Validator::validate_content_not_empty(b"%PDF").is_ok());
        assert!(Validator::validate_content_not_empty(b"").is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(Validator::sanitize_filename("My Paper.pdf"), "My_Paper.pdf");
        assert_eq!(
            Validator::sanitize_filename("../../etc/passwd.pdf"),
            "etc_passwd.pdf"
        );
        assert_eq!(
            Validator::sanitize_filename("C:\\docs\\report v2.pdf"),
            "C_docs_report_v2.pdf"
        );
        assert_eq!(Validator::sanitize_filename("résumé.pdf"), "rsum.pdf");
        assert_eq!(Validator::sanitize_filename("..."), FALLBACK_FILENAME);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
        assert_eq!(Validator::truncate_text("ñandú ñandú", 5), "ñandú...");
    }

    #[test]
    fn test_validate_within_base_dir() {
        let base = TempDir::new().unwrap();
        let file_path = base.path().join("nested/file.pdf");
        std::fs::create_dir_all(file_path.parent().unwrap()).unwrap();
        std::fs::write(&file_path, "%PDF").unwrap();

        assert!(Validator::validate_within_base_dir(&file_path, base.path()).is_ok());

        let outside = TempDir::new().unwrap();
        let outside_file = outside.path().join("test.pdf");
        std::fs::write(&outside_file, "%PDF").unwrap();

        assert!(Validator::validate_within_base_dir(&outside_file, base.path()).is_err());
    }
}
