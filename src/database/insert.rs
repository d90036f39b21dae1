// file: src/database/insert.rs
// description: append-only inserts for papers, summaries and gap reports
// reference: https://docs.rs/rusqlite

use crate::database::client::PaperStore;
use crate::error::Result;
use crate::models::{Artifact, ArtifactKind, NewPaper, Paper};
use chrono::Utc;
use rusqlite::params;
use tracing::debug;

impl PaperStore {
    /// Inserts a paper and returns it with its assigned id.
    pub async fn insert_paper(&self, paper: &NewPaper) -> Result<Paper> {
        let created_at = Utc::now().to_rfc3339();

        let conn = self.connection().await;
        conn.execute(
            "INSERT INTO papers (title, authors, abstract, content, filename, stored_path, content_hash, page_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                paper.title,
                paper.authors,
                paper.abstract_text,
                paper.content,
                paper.filename,
                paper.stored_path,
                paper.content_hash,
                paper.page_count,
                created_at,
            ],
        )?;
        let id = conn.last_insert_rowid();

        debug!("Inserted paper {} ({})", id, paper.filename);

        Ok(Paper {
            id,
            title: paper.title.clone(),
            authors: paper.authors.clone(),
            abstract_text: paper.abstract_text.clone(),
            content: paper.content.clone(),
            filename: paper.filename.clone(),
            stored_path: paper.stored_path.clone(),
            content_hash: paper.content_hash.clone(),
            page_count: paper.page_count,
            created_at,
        })
    }

    /// Appends a summary or gap report for `paper_id`.
    pub async fn insert_artifact(
        &self,
        paper_id: i64,
        kind: ArtifactKind,
        text: &str,
    ) -> Result<Artifact> {
        let created_at = Utc::now().to_rfc3339();
        let sql = format!(
            "INSERT INTO {} (paper_id, {}, created_at) VALUES (?1, ?2, ?3)",
            kind.table(),
            kind.column()
        );

        let conn = self.connection().await;
        conn.execute(&sql, params![paper_id, text, created_at])?;
        let id = conn.last_insert_rowid();

        debug!("Inserted {} {} for paper {}", kind, id, paper_id);

        Ok(Artifact {
            id,
            paper_id,
            kind,
            text: text.to_string(),
            created_at,
        })
    }
}
