//! External content classifier client
//!
//! Opaque collaborator that categorizes one content item at a time through
//! an Azure OpenAI-style chat-completions deployment. Failures are caught
//! per item: the item proceeds unanalyzed and the batch continues. Calls
//! are sequential with a rate limiter as a courtesy to the service.

use crate::domain::content::{ContentAnalysis, ContentItem};
use anyhow::{Context, Result};
use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::{info, warn};

/// Analyzer endpoint configuration, usually read from the environment.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    pub system_prompt: Option<String>,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
}

impl AnalyzerConfig {
    pub fn new(endpoint: String, api_key: String, deployment: String) -> Self {
        Self {
            endpoint,
            api_key,
            deployment,
            api_version: "2024-02-15-preview".to_string(),
            system_prompt: None,
            timeout_seconds: 60,
            max_requests_per_second: 10,
        }
    }
}

/// Client for the external classifier.
pub struct AnalyzerClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: AnalyzerConfig,
}

impl AnalyzerClient {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create analyzer HTTP client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second)
                .context("Analyzer rate limit must be greater than 0")?,
        );

        Ok(Self {
            client,
            rate_limiter: RateLimiter::direct(quota),
            config,
        })
    }

    /// Classify one item. Returns `None` on any failure; never retried
    /// automatically within a run.
    pub async fn classify(&self, item: &ContentItem) -> Option<ContentAnalysis> {
        self.rate_limiter.until_ready().await;

        match self.request_analysis(item).await {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!("Classifier failed for item {}: {:#}", item.id, e);
                None
            }
        }
    }

    /// Classify a batch sequentially, attaching results where available.
    /// Per-item failures leave `analysis` absent and never abort the batch.
    pub async fn classify_batch(&self, items: Vec<ContentItem>) -> Vec<ContentItem> {
        let total = items.len();
        let mut analyzed = Vec::with_capacity(total);

        for (index, item) in items.into_iter().enumerate() {
            if index % 10 == 0 {
                info!("Analyzing content: {}/{}", index, total);
            }

            let analysis = self.classify(&item).await;
            analyzed.push(match analysis {
                Some(analysis) => item.with_analysis(analysis),
                None => item,
            });
        }

        analyzed
    }

    async fn request_analysis(&self, item: &ContentItem) -> Result<ContentAnalysis> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment,
            self.config.api_version
        );

        let prompt = build_prompt(item);
        let mut messages = Vec::new();
        if let Some(system_prompt) = &self.config.system_prompt {
            messages.push(json!({"role": "system", "content": system_prompt}));
        }
        messages.push(json!({"role": "user", "content": prompt}));

        let body = json!({
            "messages": messages,
            "temperature": 0.3,
            "max_tokens": 500,
        });

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .context("Classifier request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Classifier returned status {}", response.status());
        }

        let payload: Value = response
            .json()
            .await
            .context("Failed to decode classifier response")?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .context("Classifier response missing message content")?;

        parse_analysis(content)
    }
}

fn build_prompt(item: &ContentItem) -> String {
    format!(
        "Analyze this UI content item and categorize it:\n\n\
         Tag: {}\n\
         Location: {}\n\
         Content: {}\n\n\
         Categorize as one of: button, heading, body-text, tooltip, empty-state, \
         error-message, label, placeholder, navigation, or other.\n\
         Also identify: tone (formal/casual/friendly/mixed), purpose, and any UX patterns.\n\n\
         Respond in JSON format:\n\
         {{\"category\": \"...\", \"tone\": \"...\", \"purpose\": \"...\", \"patterns\": [\"...\"]}}",
        item.tag, item.identity, item.original_text
    )
}

/// Parse the model's JSON reply, tolerating markdown code fences.
fn parse_analysis(content: &str) -> Result<ContentAnalysis> {
    let cleaned = content.replace("```json", "").replace("```", "");
    serde_json::from_str(cleaned.trim()).context("Classifier reply was not valid analysis JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_reply_parses_plain_json() {
        let analysis = parse_analysis(
            r#"{"category": "button", "tone": "formal", "purpose": "submit", "patterns": []}"#,
        )
        .unwrap();
        assert_eq!(analysis.category, "button");
        assert_eq!(analysis.tone, "formal");
    }

    #[test]
    fn analysis_reply_tolerates_markdown_fences() {
        let reply = "```json\n{\"category\": \"heading\", \"tone\": \"casual\"}\n```";
        let analysis = parse_analysis(reply).unwrap();
        assert_eq!(analysis.category, "heading");
        assert!(analysis.purpose.is_empty());
    }

    #[test]
    fn malformed_reply_is_an_error() {
        assert!(parse_analysis("not json at all").is_err());
    }
}
