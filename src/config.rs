// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PaperError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when `llm.api_key` is not set.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    pub parallel_workers: usize,
    pub max_file_size_mb: usize,
}

impl ServerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LlmConfig {
    /// The configured key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            max_tokens: 500,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = Self::with_defaults(config::Config::builder())
            .map_err(|e| PaperError::Config(e.to_string()))?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(
                config::File::from(Path::new("config/default.toml")).required(false),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PAPER_SUMMARIZE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PaperError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| PaperError::Config(e.to_string()))?;

        if !config.llm.is_configured() {
            config.llm.api_key = std::env::var(OPENAI_API_KEY_ENV).ok();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                upload_dir: PathBuf::from("uploads"),
                max_upload_mb: 50,
            },
            database: DatabaseConfig {
                path: PathBuf::from("papers.db"),
            },
            llm: LlmConfig::default(),
            ingest: IngestConfig {
                parallel_workers: 4,
                max_file_size_mb: 50,
            },
        }
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> std::result::Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        let defaults = Self::default_config();

        builder
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default(
                "server.upload_dir",
                defaults.server.upload_dir.to_string_lossy().to_string(),
            )?
            .set_default("server.max_upload_mb", defaults.server.max_upload_mb as i64)?
            .set_default(
                "database.path",
                defaults.database.path.to_string_lossy().to_string(),
            )?
            .set_default("llm.base_url", defaults.llm.base_url)?
            .set_default("llm.model", defaults.llm.model)?
            .set_default("llm.max_tokens", i64::from(defaults.llm.max_tokens))?
            .set_default(
                "ingest.parallel_workers",
                defaults.ingest.parallel_workers as i64,
            )?
            .set_default(
                "ingest.max_file_size_mb",
                defaults.ingest.max_file_size_mb as i64,
            )
    }

    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(PaperError::Config("port must be greater than 0".to_string()));
        }

        if self.server.max_upload_mb == 0 {
            return Err(PaperError::Config(
                "max_upload_mb must be greater than 0".to_string(),
            ));
        }

        if self.ingest.parallel_workers == 0 {
            return Err(PaperError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(PaperError::Config(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
