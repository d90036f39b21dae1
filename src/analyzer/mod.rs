// file: src/analyzer/mod.rs
// description: summary and gap analysis over paper text via a completion service
// reference: internal module structure

pub mod client;
pub mod prompts;

pub use client::{CompletionService, OpenAiCompletionClient};

use crate::config::LlmConfig;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Returned in place of an analysis when no completion service is configured.
pub const LLM_NOT_CONFIGURED: &str = "LLM service not configured.";

/// Result of one analysis request. Every variant flattens to display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Completed(String),
    Unconfigured,
    Failed(String),
}

impl AnalysisOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, AnalysisOutcome::Completed(_))
    }

    pub fn into_text(self) -> String {
        match self {
            AnalysisOutcome::Completed(text) => text,
            AnalysisOutcome::Unconfigured => LLM_NOT_CONFIGURED.to_string(),
            AnalysisOutcome::Failed(message) => format!("An error occurred: {}", message),
        }
    }
}

impl fmt::Display for AnalysisOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisOutcome::Completed(text) => write!(f, "{}", text),
            AnalysisOutcome::Unconfigured => write!(f, "{}", LLM_NOT_CONFIGURED),
            AnalysisOutcome::Failed(message) => write!(f, "An error occurred: {}", message),
        }
    }
}

#[derive(Clone)]
pub struct Analyzer {
    service: Option<Arc<dyn CompletionService>>,
    max_tokens: u32,
}

impl Analyzer {
    pub fn new(config: &LlmConfig) -> Self {
        let service = OpenAiCompletionClient::from_config(config)
            .map(|client| Arc::new(client) as Arc<dyn CompletionService>);

        if service.is_some() {
            info!("Analyzer initialized with model {}", config.model);
        } else {
            warn!("Analyzer initialized without API key - analysis requests will be skipped");
        }

        Self {
            service,
            max_tokens: config.max_tokens,
        }
    }

    pub fn with_service(service: Arc<dyn CompletionService>, max_tokens: u32) -> Self {
        Self {
            service: Some(service),
            max_tokens,
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            service: None,
            max_tokens: LlmConfig::default().max_tokens,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_some()
    }

    pub async fn summarize(&self, text: &str) -> AnalysisOutcome {
        self.run(prompts::summary_prompt(text)).await
    }

    pub async fn analyze_gaps(&self, text: &str) -> AnalysisOutcome {
        self.run(prompts::gap_analysis_prompt(text)).await
    }

    async fn run(&self, prompt: String) -> AnalysisOutcome {
        let Some(service) = &self.service else {
            return AnalysisOutcome::Unconfigured;
        };

        match service.complete(&prompt, self.max_tokens).await {
            Ok(text) => AnalysisOutcome::Completed(text),
            Err(e) => {
                warn!("Completion request failed: {}", e);
                AnalysisOutcome::Failed(e.to_string())
            }
        }
    }
}
