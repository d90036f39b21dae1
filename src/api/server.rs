// file: src/api/server.rs
// description: axum router assembly and http server lifecycle
// reference: https://docs.rs/axum

use crate::analyzer::Analyzer;
use crate::api::handlers;
use crate::database::PaperStore;
use crate::error::Result;
use crate::pipeline::IngestPipeline;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared handles for every request. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: PaperStore,
    pub analyzer: Analyzer,
    pub pipeline: IngestPipeline,
}

impl AppState {
    pub fn new(pipeline: IngestPipeline, analyzer: Analyzer) -> Self {
        Self {
            store: pipeline.store().clone(),
            analyzer,
            pipeline,
        }
    }
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/upload", post(handlers::upload_paper))
        .route("/summarize/:paper_id", get(handlers::summarize_paper))
        .route("/gap_analysis/:paper_id", get(handlers::gap_analysis))
        .route("/search", get(handlers::search_papers))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `app` on `address` until Ctrl-C.
pub async fn serve(address: &str, app: Router) -> Result<()> {
    let listener = TcpListener::bind(address).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
