//! Figma REST API client
//!
//! Thin fetch collaborator: retrieves a design file as a typed node tree.
//! Any HTTP or decoding failure surfaces as a fatal error to the caller.

use crate::infrastructure::parsing::FigmaNode;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

const FIGMA_TOKEN_HEADER: &str = "X-Figma-Token";

/// Figma client configuration.
#[derive(Debug, Clone)]
pub struct FigmaClientConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for FigmaClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.figma.com/v1".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// A fetched Figma file: document name plus its node tree.
#[derive(Debug, Clone, Deserialize)]
pub struct FigmaFile {
    pub name: String,
    #[serde(rename = "lastModified", default)]
    pub last_modified: Option<String>,
    pub document: FigmaNode,
}

/// HTTP client for the Figma files endpoint.
pub struct FigmaClient {
    client: reqwest::Client,
    config: FigmaClientConfig,
}

impl FigmaClient {
    /// Create a client authenticating with a personal access token.
    pub fn new(access_token: &str) -> Result<Self> {
        Self::with_config(access_token, FigmaClientConfig::default())
    }

    pub fn with_config(access_token: &str, config: FigmaClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            FIGMA_TOKEN_HEADER,
            HeaderValue::from_str(access_token).context("Invalid Figma access token")?,
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .context("Failed to create Figma HTTP client")?;

        Ok(Self { client, config })
    }

    /// Fetch a design document by file key.
    pub async fn fetch_document(&self, file_key: &str) -> Result<FigmaFile> {
        let url = format!("{}/files/{}", self.config.base_url, file_key);
        info!("Fetching Figma file: {}", file_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch Figma file: {file_key}"))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Figma API request failed with status {} for file {}",
                response.status(),
                file_key
            );
        }

        let file: FigmaFile = response
            .json()
            .await
            .with_context(|| format!("Failed to decode Figma file response: {file_key}"))?;

        info!("Fetched Figma document \"{}\"", file.name);
        Ok(file)
    }
}
