// file: src/exporter/json.rs
// description: json export of stored papers with their summaries and gap reports

use crate::database::PaperStore;
use crate::error::{PaperError, Result};
use crate::models::{Artifact, ArtifactKind, Paper};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportedPaper {
    #[serde(flatten)]
    pub paper: Paper,
    pub summaries: Vec<Artifact>,
    pub gaps: Vec<Artifact>,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_papers: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Writes one `paper_<id>.json` per stored paper plus `manifest.json`.
    pub async fn export_all(&self, store: &PaperStore, pretty: bool) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let papers = store.list_papers().await?;
        let mut files = Vec::with_capacity(papers.len());

        for paper in papers {
            files.push(self.write_paper(store, paper, pretty).await?);
        }

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            total_papers: files.len(),
            files,
        };
        self.write_json("manifest.json", &manifest, pretty)?;

        info!("Export complete: {} papers exported", manifest.total_papers);
        Ok(manifest)
    }

    pub async fn export_single(
        &self,
        store: &PaperStore,
        paper_id: i64,
        pretty: bool,
    ) -> Result<String> {
        info!("Exporting paper {}", paper_id);

        let paper = store
            .get_paper(paper_id)
            .await?
            .ok_or_else(|| PaperError::NotFound(format!("Paper {} not found", paper_id)))?;

        self.write_paper(store, paper, pretty).await
    }

    async fn write_paper(&self, store: &PaperStore, paper: Paper, pretty: bool) -> Result<String> {
        let summaries = store.list_artifacts(paper.id, ArtifactKind::Summary).await?;
        let gaps = store.list_artifacts(paper.id, ArtifactKind::GapReport).await?;

        let file_name = format!("paper_{}.json", paper.id);
        let exported = ExportedPaper {
            paper,
            summaries,
            gaps,
        };
        self.write_json(&file_name, &exported, pretty)?;

        Ok(file_name)
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T, pretty: bool) -> Result<()> {
        let contents = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        let path = self.output_dir.join(file_name);
        fs::write(&path, contents).map_err(|source| PaperError::FileOperation { path, source })
    }
}
