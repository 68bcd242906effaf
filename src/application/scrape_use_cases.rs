//! Scrape-and-review workflows
//!
//! Orchestrates extraction, optional classification, issue detection, and
//! the export artifacts (editable CSV plus severity-colored JSON report)
//! for both HTML sources and Figma documents.

use crate::domain::content::ScrapeResult;
use crate::domain::services::IssueDetector;
use crate::infrastructure::analyzer_client::AnalyzerClient;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::correction_store::CorrectionStore;
use crate::infrastructure::figma_client::FigmaClient;
use crate::infrastructure::parsing::{ExtractionError, FigmaContentExtractor, HtmlContentExtractor};
use crate::infrastructure::report_writer::{Report, ReportWriter};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Artifacts produced by one scrape run.
#[derive(Debug)]
pub struct ScrapeSummary {
    pub source_name: String,
    pub total_items: usize,
    pub items_with_issues: usize,
    pub csv_path: PathBuf,
    pub report_path: PathBuf,
}

/// Use cases for the extraction half of the round trip.
pub struct ScrapeUseCases {
    extractor: HtmlContentExtractor,
    detector: IssueDetector,
    store: CorrectionStore,
    report_writer: ReportWriter,
    analyzer: Option<AnalyzerClient>,
    figma_token: Option<String>,
}

impl ScrapeUseCases {
    /// Build the workflow from application configuration. When `analyze`
    /// is requested without analyzer settings, classification is skipped
    /// with a warning rather than failing the run.
    pub fn new(config: &AppConfig, analyze: bool) -> Result<Self> {
        let analyzer = if analyze {
            match &config.analyzer {
                Some(analyzer_config) => Some(AnalyzerClient::new(analyzer_config.clone())?),
                None => {
                    warn!("Analyzer not configured; continuing without classification");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            extractor: HtmlContentExtractor::new()?,
            detector: IssueDetector::new()?,
            store: CorrectionStore::new(config.output_dir.clone()),
            report_writer: ReportWriter::new(config.output_dir.clone()),
            analyzer,
            figma_token: config.figma_token.clone(),
        })
    }

    /// Scrape an HTML file or a directory of HTML files.
    pub async fn scrape_html(&self, path: &Path) -> Result<ScrapeSummary> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|_| ExtractionError::source_not_found(path.display()))?;

        let result = if metadata.is_dir() {
            self.extractor.extract_directory(path).await?
        } else {
            self.extractor.extract_file(path).await?
        };

        self.review_and_export(result).await
    }

    /// Fetch and scrape a Figma document by file key.
    pub async fn scrape_figma(&self, file_key: &str) -> Result<ScrapeSummary> {
        let token = self
            .figma_token
            .as_deref()
            .context("FIGMA_ACCESS_TOKEN is not set")?;

        let client = FigmaClient::new(token)?;
        let file = client.fetch_document(file_key).await?;
        let result = FigmaContentExtractor::new().extract(&file.name, &file.document);

        self.review_and_export(result).await
    }

    /// Shared tail of every scrape: classify (when enabled), detect
    /// issues, and write the CSV and JSON artifacts.
    async fn review_and_export(&self, result: ScrapeResult) -> Result<ScrapeSummary> {
        let ScrapeResult {
            source_name,
            items,
            stats,
        } = result;
        info!("Scraped \"{}\": {} content items", source_name, items.len());

        let items = match &self.analyzer {
            Some(analyzer) => analyzer.classify_batch(items).await,
            None => items,
        };

        let reviewed = self.detector.review(&items);
        let csv_path = self.store.write_export(&reviewed, &source_name).await?;

        let report = Report::build(&source_name, &reviewed, stats);
        let report_path = self.report_writer.write_json(&report).await?;
        ReportWriter::log_summary(&report);

        Ok(ScrapeSummary {
            source_name,
            total_items: report.metadata.total_items,
            items_with_issues: report.metadata.items_with_issues,
            csv_path,
            report_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::AppConfig;

    fn config(dir: &Path) -> AppConfig {
        AppConfig {
            output_dir: dir.join("output"),
            backup_dir: dir.join("output/backups"),
            figma_token: None,
            analyzer: None,
        }
    }

    #[tokio::test]
    async fn missing_scrape_path_is_a_source_not_found_error() {
        let dir = tempfile::tempdir().unwrap();
        let use_cases = ScrapeUseCases::new(&config(dir.path()), false).unwrap();

        let err = use_cases
            .scrape_html(&dir.path().join("absent.html"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ExtractionError>(),
            Some(ExtractionError::SourceNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn figma_scrape_without_token_fails_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let use_cases = ScrapeUseCases::new(&config(dir.path()), false).unwrap();

        let err = use_cases.scrape_figma("abc123").await.unwrap_err();
        assert!(err.to_string().contains("FIGMA_ACCESS_TOKEN"));
    }
}
