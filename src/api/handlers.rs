// file: src/api/handlers.rs
// description: request handlers for upload, analysis and keyword search
// reference: https://docs.rs/axum

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::models::{ArtifactKind, SearchResult, UploadedPaper};
use crate::utils::HealthReport;
use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const LIVENESS_MESSAGE: &str = "Paper summarize service is running!";

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GapsResponse {
    pub gaps: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keyword: Option<String>,
}

pub async fn home() -> &'static str {
    LIVENESS_MESSAGE
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport::collect(&state.store, &state.analyzer).await)
}

/// `POST /upload` with a multipart `file` part.
pub async fn upload_paper(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<UploadedPaper> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Rejected upload body: {}", e);
        ApiError::bad_request("No file part")
    })?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // A part without a filename parameter is a plain form value, not a file.
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
        upload = Some((filename, bytes));
        break;
    }

    let Some((filename, bytes)) = upload else {
        return Err(ApiError::bad_request("No file part"));
    };

    info!("Received upload {} ({} bytes)", filename, bytes.len());
    let paper = state.pipeline.ingest(&filename, bytes.to_vec()).await?;

    Ok(Json(UploadedPaper::from(&paper)))
}

/// `GET /summarize/{paper_id}`
pub async fn summarize_paper(
    State(state): State<AppState>,
    Path(paper_id): Path<String>,
) -> ApiResult<SummaryResponse> {
    let summary = analyze(&state, &paper_id, ArtifactKind::Summary).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// `GET /gap_analysis/{paper_id}`
pub async fn gap_analysis(
    State(state): State<AppState>,
    Path(paper_id): Path<String>,
) -> ApiResult<GapsResponse> {
    let gaps = analyze(&state, &paper_id, ArtifactKind::GapReport).await?;
    Ok(Json(GapsResponse { gaps }))
}

/// `GET /search?keyword=...`
pub async fn search_papers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<SearchResult>> {
    let keyword = params.keyword.unwrap_or_default();
    let results = state.store.search(&keyword, None).await?;
    Ok(Json(results))
}

/// Runs one analysis for a stored paper and appends the flattened result.
/// Ids that are not integers are treated like unknown ids.
async fn analyze(state: &AppState, raw_id: &str, kind: ArtifactKind) -> Result<String, ApiError> {
    let paper_id: i64 = raw_id.parse().map_err(|_| ApiError::paper_not_found())?;

    let content = state.store.require_content(paper_id).await?;

    let outcome = match kind {
        ArtifactKind::Summary => state.analyzer.summarize(&content).await,
        ArtifactKind::GapReport => state.analyzer.analyze_gaps(&content).await,
    };
    debug!("{} for paper {} completed: {}", kind, paper_id, outcome.is_completed());

    let text = outcome.into_text();
    state.store.insert_artifact(paper_id, kind, &text).await?;

    Ok(text)
}
