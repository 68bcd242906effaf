//! Environment-derived application configuration
//!
//! External service credentials and output locations. Analyzer settings
//! are optional: when absent, scrape runs simply skip classification
//! instead of failing.

use crate::infrastructure::analyzer_client::AnalyzerConfig;
use std::env;
use std::path::PathBuf;

const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_BACKUP_DIR: &str = "output/backups";

/// Application configuration assembled from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub backup_dir: PathBuf,
    /// Figma personal access token (`FIGMA_ACCESS_TOKEN`).
    pub figma_token: Option<String>,
    /// Classifier settings; `None` when the endpoint or key is not set.
    pub analyzer: Option<AnalyzerConfig>,
}

impl AppConfig {
    /// Read configuration from environment variables.
    pub fn from_env() -> Self {
        let output_dir = env::var("COPYLENS_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let backup_dir = env::var("COPYLENS_BACKUP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_BACKUP_DIR));

        Self {
            output_dir,
            backup_dir,
            figma_token: non_empty_var("FIGMA_ACCESS_TOKEN"),
            analyzer: Self::analyzer_from_env(),
        }
    }

    fn analyzer_from_env() -> Option<AnalyzerConfig> {
        let endpoint = non_empty_var("AZURE_OPENAI_ENDPOINT")?;
        let api_key = non_empty_var("AZURE_OPENAI_API_KEY")?;
        let deployment = non_empty_var("AZURE_OPENAI_DEPLOYMENT")?;

        let mut config = AnalyzerConfig::new(endpoint, api_key, deployment);
        if let Some(api_version) = non_empty_var("AZURE_OPENAI_API_VERSION") {
            config.api_version = api_version;
        }
        config.system_prompt = non_empty_var("AI_SYSTEM_PROMPT");
        Some(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
