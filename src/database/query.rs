// file: src/database/query.rs
// description: paper lookups, keyword search and artifact listing
// reference: https://docs.rs/rusqlite

use crate::database::client::PaperStore;
use crate::error::{PAPER_NOT_FOUND, PaperError, Result};
use crate::models::{Artifact, ArtifactKind, Paper, SearchResult};
use rusqlite::{OptionalExtension, Row, params};
use tracing::{debug, info};

const PAPER_COLUMNS: &str =
    "id, title, authors, abstract, content, filename, stored_path, content_hash, page_count, created_at";

impl PaperStore {
    pub async fn get_paper(&self, paper_id: i64) -> Result<Option<Paper>> {
        let conn = self.connection().await;
        let sql = format!("SELECT {} FROM papers WHERE id = ?1", PAPER_COLUMNS);

        let paper = conn
            .query_row(&sql, params![paper_id], row_to_paper)
            .optional()?;

        Ok(paper)
    }

    /// Full text of a paper, without loading the rest of the row.
    pub async fn get_content(&self, paper_id: i64) -> Result<Option<String>> {
        let conn = self.connection().await;

        let content = conn
            .query_row(
                "SELECT content FROM papers WHERE id = ?1",
                params![paper_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(content)
    }

    /// Like [`get_content`](Self::get_content), but an unknown id is a `NotFound` error.
    pub async fn require_content(&self, paper_id: i64) -> Result<String> {
        self.get_content(paper_id)
            .await?
            .ok_or_else(|| PaperError::NotFound(PAPER_NOT_FOUND.to_string()))
    }

    pub async fn list_papers(&self) -> Result<Vec<Paper>> {
        let conn = self.connection().await;
        let sql = format!("SELECT {} FROM papers ORDER BY id", PAPER_COLUMNS);

        let mut stmt = conn.prepare(&sql)?;
        let papers = stmt
            .query_map([], row_to_paper)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(papers)
    }

    /// Case-insensitive substring search over title, authors, abstract and full text.
    ///
    /// An empty keyword matches nothing. Matching runs in Rust so that
    /// non-ASCII text folds case the same way the keyword does.
    pub async fn search(&self, keyword: &str, limit: Option<usize>) -> Result<Vec<SearchResult>> {
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        let needle = keyword.to_lowercase();
        let conn = self.connection().await;

        let mut stmt =
            conn.prepare("SELECT id, title, authors, abstract, content FROM papers ORDER BY id")?;
        let mut rows = stmt.query([])?;

        let mut results = Vec::new();
        while let Some(row) = rows.next()? {
            let title: String = row.get(1)?;
            let authors: String = row.get(2)?;
            let abstract_text: String = row.get(3)?;
            let content: String = row.get(4)?;

            let matched = [&title, &authors, &abstract_text, &content]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));

            if !matched {
                continue;
            }

            results.push(SearchResult {
                paper_id: row.get(0)?,
                title,
                authors,
                abstract_text,
            });

            if limit.is_some_and(|limit| results.len() >= limit) {
                break;
            }
        }

        info!("Keyword search '{}' returned {} results", keyword, results.len());
        Ok(results)
    }

    pub async fn list_artifacts(&self, paper_id: i64, kind: ArtifactKind) -> Result<Vec<Artifact>> {
        let conn = self.connection().await;
        let sql = format!(
            "SELECT id, paper_id, {}, created_at FROM {} WHERE paper_id = ?1 ORDER BY id",
            kind.column(),
            kind.table()
        );

        let mut stmt = conn.prepare(&sql)?;
        let artifacts = stmt
            .query_map(params![paper_id], |row| {
                Ok(Artifact {
                    id: row.get(0)?,
                    paper_id: row.get(1)?,
                    kind,
                    text: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(
            "Loaded {} {} rows for paper {}",
            artifacts.len(),
            kind,
            paper_id
        );
        Ok(artifacts)
    }
}

fn row_to_paper(row: &Row) -> rusqlite::Result<Paper> {
    Ok(Paper {
        id: row.get(0)?,
        title: row.get(1)?,
        authors: row.get(2)?,
        abstract_text: row.get(3)?,
        content: row.get(4)?,
        filename: row.get(5)?,
        stored_path: row.get(6)?,
        content_hash: row.get(7)?,
        page_count: row.get(8)?,
        created_at: row.get(9)?,
    })
}
