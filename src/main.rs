// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use futures::stream::{self, StreamExt};
use paper_summarize::utils::logging::{format_error, format_info, format_success, format_warning};
use paper_summarize::{
    AnalysisOutcome, Analyzer, AppState, Config, HealthReport, HealthStatus, IngestPipeline,
    JsonExporter, PaperStore, PdfScanner, ProgressTracker, SchemaManager, UploadStore, api,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "paper_summarize")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Research paper intake, keyword search and LLM analysis", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ingest a PDF file or every PDF below a directory
    Ingest {
        path: PathBuf,

        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,
    },

    /// Search stored papers by keyword
    Search {
        keyword: String,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Summarize a stored paper
    Summarize { paper_id: i64 },

    /// Run a research gap analysis on a stored paper
    Gaps { paper_id: i64 },

    Verify {
        #[arg(long)]
        create_schema: bool,
    },

    Stats,

    Reset {
        #[arg(long)]
        confirm: bool,
    },

    Export {
        #[arg(short, long, default_value = "./exports")]
        output: PathBuf,

        #[arg(short, long)]
        pretty: bool,

        #[arg(long)]
        paper_id: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    paper_summarize::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Paper Summarize");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Serve { host, port } => {
            cmd_serve(config, host, port).await?;
        }
        Commands::Ingest { path, limit } => {
            cmd_ingest(&config, &path, limit, cli.color).await?;
        }
        Commands::Search { keyword, limit } => {
            cmd_search(&config, &keyword, limit).await?;
        }
        Commands::Summarize { paper_id } => {
            cmd_analyze(&config, paper_id, AnalysisKind::Summary).await?;
        }
        Commands::Gaps { paper_id } => {
            cmd_analyze(&config, paper_id, AnalysisKind::Gaps).await?;
        }
        Commands::Verify { create_schema } => {
            cmd_verify(&config, create_schema).await?;
        }
        Commands::Stats => {
            cmd_stats(&config).await?;
        }
        Commands::Reset { confirm } => {
            cmd_reset(&config, confirm).await?;
        }
        Commands::Export {
            output,
            pretty,
            paper_id,
        } => {
            cmd_export(&config, output, pretty, paper_id).await?;
        }
    }

    Ok(())
}

/// Opens the database and creates any missing tables.
async fn open_store(config: &Config) -> Result<PaperStore> {
    let store = PaperStore::open(&config.database).context("Failed to open database")?;

    if !store.ping().await? {
        error!("Cannot connect to SQLite");
        return Err(anyhow::anyhow!("Database connection failed"));
    }

    let schema_manager = SchemaManager::new(&store);
    if !schema_manager.verify_schema().await? {
        warn!("Database schema incomplete, initializing");
        schema_manager
            .initialize()
            .await
            .context("Failed to initialize schema")?;
    }

    Ok(store)
}

async fn cmd_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        if port == 0 {
            anyhow::bail!("port must be greater than 0");
        }
        config.server.port = port;
    }

    let store = open_store(&config).await?;
    let pipeline = IngestPipeline::new(store, UploadStore::new(&config.server.upload_dir));
    let analyzer = Analyzer::new(&config.llm);

    if !analyzer.is_configured() {
        println!(
            "{}",
            format_warning("No API key configured; summaries and gap analyses will return a notice")
        );
    }

    let app = api::router(
        AppState::new(pipeline, analyzer),
        config.server.max_upload_bytes(),
    );

    api::serve(&config.server.bind_address(), app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

async fn cmd_ingest(config: &Config, path: &Path, limit: Option<usize>, color: bool) -> Result<()> {
    info!("Starting ingestion from {}", path.display());
    let start_time = Instant::now();

    let store = open_store(config).await?;
    let pipeline = Arc::new(IngestPipeline::new(
        store,
        UploadStore::new(&config.server.upload_dir),
    ));

    let scanner = PdfScanner::new(config.ingest.clone());
    let files = scanner.scan(path).context("Failed to scan for PDFs")?;

    let files = if let Some(limit) = limit {
        files.into_iter().take(limit).collect()
    } else {
        files
    };

    info!("Found {} files to process", files.len());

    let tracker = Arc::new(ProgressTracker::with_color(files.len(), color));
    let parallel_workers = config.ingest.parallel_workers.max(1);

    stream::iter(files.into_iter().map(|file| {
        let pipeline = Arc::clone(&pipeline);
        let tracker = Arc::clone(&tracker);

        async move {
            tracker.start(&file);
            let result = pipeline.ingest_file(&file.path).await;
            tracker.record(&file, &result);
        }
    }))
    .buffer_unordered(parallel_workers)
    .collect::<Vec<_>>()
    .await;

    tracker.finish();
    let stats = tracker.stats();

    info!(
        "Ingestion complete in {:.2}s ({:.2} papers/s)",
        start_time.elapsed().as_secs_f64(),
        stats.papers_per_second()
    );
    println!("{}", format_info(&stats.summary_line()));

    Ok(())
}

async fn cmd_search(config: &Config, keyword: &str, limit: Option<usize>) -> Result<()> {
    info!("Searching for: {}", keyword);

    let store = open_store(config).await?;
    let results = store
        .search(keyword, limit)
        .await
        .context("Keyword search failed")?;

    if results.is_empty() {
        println!("\nNo papers found for keyword: \"{}\"\n", keyword);
        return Ok(());
    }

    println!("\nSearch Results for: \"{}\"\n", keyword);
    println!("Found {} result(s)\n", results.len());
    println!("{}", "=".repeat(80));

    for result in &results {
        println!("\n{}", result.format_summary(300));
    }

    println!("{}", "=".repeat(80));
    Ok(())
}

#[derive(Clone, Copy)]
enum AnalysisKind {
    Summary,
    Gaps,
}

async fn cmd_analyze(config: &Config, paper_id: i64, kind: AnalysisKind) -> Result<()> {
    let store = open_store(config).await?;

    let content = store
        .require_content(paper_id)
        .await
        .with_context(|| format!("Cannot analyze paper {}", paper_id))?;

    let analyzer = Analyzer::new(&config.llm);
    let (outcome, artifact_kind) = match kind {
        AnalysisKind::Summary => (
            analyzer.summarize(&content).await,
            paper_summarize::ArtifactKind::Summary,
        ),
        AnalysisKind::Gaps => (
            analyzer.analyze_gaps(&content).await,
            paper_summarize::ArtifactKind::GapReport,
        ),
    };

    match &outcome {
        AnalysisOutcome::Completed(_) => {}
        AnalysisOutcome::Unconfigured => {
            println!("{}", format_warning("Completion service not configured"));
        }
        AnalysisOutcome::Failed(message) => {
            println!("{}", format_error(message));
        }
    }

    let text = outcome.into_text();
    let artifact = store
        .insert_artifact(paper_id, artifact_kind, &text)
        .await
        .context("Failed to store analysis")?;

    println!("\n{}\n", text);
    println!(
        "{}",
        format_success(&format!("Stored {} {}", artifact_kind, artifact.id))
    );

    Ok(())
}

async fn cmd_verify(config: &Config, create_schema: bool) -> Result<()> {
    info!("Verifying database schema");

    let store = PaperStore::open(&config.database).context("Failed to open database")?;

    if !store.ping().await? {
        error!("Cannot connect to SQLite");
        return Err(anyhow::anyhow!("Database connection failed"));
    }

    info!("Database connection successful");

    let schema_manager = SchemaManager::new(&store);

    if schema_manager.verify_schema().await? {
        info!("Schema verification passed - all tables exist");
    } else {
        warn!("Schema verification failed - some tables are missing");

        if create_schema {
            info!("Creating schema");
            schema_manager
                .initialize()
                .await
                .context("Failed to create schema")?;
            info!("Schema created successfully");
        } else {
            info!("Use --create-schema to create missing tables");
        }
    }

    let report = HealthReport::collect(&store, &Analyzer::new(&config.llm)).await;
    println!("\n{}", report.format());
    if report.overall_status == HealthStatus::Unhealthy {
        println!("{}", format_error("Service is not ready"));
    }

    Ok(())
}

async fn cmd_stats(config: &Config) -> Result<()> {
    info!("Gathering statistics");

    let store = open_store(config).await?;

    for table in paper_summarize::database::schema::TABLES {
        let count = store.count_rows(table).await?;
        println!("{}", format_info(&format!("{}: {}", table, count)));
    }

    Ok(())
}

async fn cmd_reset(config: &Config, confirm: bool) -> Result<()> {
    if !confirm {
        error!("This will delete all data. Use --confirm to proceed");
        return Ok(());
    }

    warn!("Resetting database - all data will be lost");

    let store = PaperStore::open(&config.database).context("Failed to open database")?;

    let schema_manager = SchemaManager::new(&store);
    schema_manager
        .drop_all_tables()
        .await
        .context("Failed to drop tables")?;

    info!("All tables dropped");

    schema_manager
        .initialize()
        .await
        .context("Failed to recreate schema")?;

    info!("Schema recreated - database reset complete");

    Ok(())
}

async fn cmd_export(
    config: &Config,
    output: PathBuf,
    pretty: bool,
    paper_id: Option<i64>,
) -> Result<()> {
    info!("Initializing JSON export");

    let store = open_store(config).await?;
    let exporter = JsonExporter::new(output)?;

    if let Some(paper_id) = paper_id {
        let file = exporter.export_single(&store, paper_id, pretty).await?;
        println!("{}", format_success(&format!("Exported {}", file)));
    } else {
        let manifest = exporter.export_all(&store, pretty).await?;
        println!(
            "{}",
            format_success(&format!(
                "Export complete: {} files generated",
                manifest.files.len()
            ))
        );
    }

    Ok(())
}
