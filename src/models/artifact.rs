// file: src/models/artifact.rs
// description: generated text artifacts (summaries, gap reports) attached to a paper
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which append-only table an artifact lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Summary,
    GapReport,
}

impl ArtifactKind {
    pub fn table(&self) -> &'static str {
        match self {
            ArtifactKind::Summary => "summaries",
            ArtifactKind::GapReport => "gaps",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            ArtifactKind::Summary => "summary",
            ArtifactKind::GapReport => "gaps",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Summary => write!(f, "summary"),
            ArtifactKind::GapReport => write!(f, "gap report"),
        }
    }
}

/// A summary or gap report row. Papers do not track these; the link is `paper_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: i64,
    pub paper_id: i64,
    pub kind: ArtifactKind,
    pub text: String,
    pub created_at: String,
}
