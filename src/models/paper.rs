// file: src/models/paper.rs
// description: stored paper record and the insert payload produced by extraction
// reference: internal data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A paper as persisted in the `papers` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: i64,
    pub title: String,
    pub authors: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub content: String,
    pub filename: String,
    pub stored_path: String,
    pub content_hash: String,
    pub page_count: u32,
    pub created_at: String,
}

/// Everything needed to insert a paper; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPaper {
    pub title: String,
    pub authors: String,
    pub abstract_text: String,
    pub content: String,
    pub filename: String,
    pub stored_path: String,
    pub content_hash: String,
    pub page_count: u32,
}

impl NewPaper {
    pub fn new(
        title: String,
        authors: String,
        abstract_text: String,
        content: String,
        filename: String,
        stored_path: String,
        page_count: u32,
    ) -> Self {
        let content_hash = Self::compute_hash(&content);

        Self {
            title,
            authors,
            abstract_text,
            content,
            filename,
            stored_path,
            content_hash,
            page_count,
        }
    }

    fn compute_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Response body for a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedPaper {
    pub paper_id: i64,
    pub title: String,
    pub authors: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub filename: String,
}

impl From<&Paper> for UploadedPaper {
    fn from(paper: &Paper) -> Self {
        Self {
            paper_id: paper.id,
            title: paper.title.clone(),
            authors: paper.authors.clone(),
            abstract_text: paper.abstract_text.clone(),
            filename: paper.filename.clone(),
        }
    }
}
