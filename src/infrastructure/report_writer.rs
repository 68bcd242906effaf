//! Severity-colored review report
//!
//! The report data model is the contract: two views (issues-only sorted by
//! severity, full content in extraction order) with a fixed severity-to-
//! color mapping. JSON encoding is the thin adapter on top.

use crate::domain::content::ScrapeStats;
use crate::domain::issue::Severity;
use crate::domain::services::ReviewedItem;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Row highlight colors, one per severity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    Red,
    Yellow,
    Blue,
    Orange,
}

impl SeverityColor {
    /// Fixed mapping: Critical=red, High=yellow, Medium=blue, Low=orange.
    /// Issue-free rows get no highlight.
    pub fn for_severity(severity: Severity) -> Option<Self> {
        match severity {
            Severity::Critical => Some(Self::Red),
            Severity::High => Some(Self::Yellow),
            Severity::Medium => Some(Self::Blue),
            Severity::Low => Some(Self::Orange),
            Severity::None => None,
        }
    }
}

/// One rendered report row.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub id: String,
    pub identity: String,
    pub tag: String,
    pub text: String,
    pub category: String,
    pub tone: String,
    pub issues: Vec<String>,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<SeverityColor>,
}

impl ReportRow {
    fn from_reviewed(entry: &ReviewedItem) -> Self {
        let (category, tone) = entry
            .item
            .analysis
            .as_ref()
            .map(|analysis| (analysis.category.clone(), analysis.tone.clone()))
            .unwrap_or_default();

        Self {
            id: entry.item.id.clone(),
            identity: entry.item.identity.clone(),
            tag: entry.item.tag.clone(),
            text: entry.item.original_text.clone(),
            category,
            tone,
            issues: entry.issues.iter().map(|i| i.message.clone()).collect(),
            severity: entry.severity,
            color: SeverityColor::for_severity(entry.severity),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub source_name: String,
    pub generated_at: DateTime<Utc>,
    pub total_items: usize,
    pub items_with_issues: usize,
}

/// Full review report for one scrape run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub stats: ScrapeStats,
    /// Rows with at least one issue, worst severity first.
    pub issues: Vec<ReportRow>,
    /// Every row, extraction order.
    pub full: Vec<ReportRow>,
}

impl Report {
    pub fn build(source_name: &str, reviewed: &[ReviewedItem], stats: ScrapeStats) -> Self {
        let full: Vec<ReportRow> = reviewed.iter().map(ReportRow::from_reviewed).collect();

        let mut issues: Vec<ReportRow> = reviewed
            .iter()
            .filter(|entry| entry.has_issues())
            .map(ReportRow::from_reviewed)
            .collect();
        // stable sort keeps extraction order within a severity class
        issues.sort_by_key(|row| row.severity);

        Self {
            metadata: ReportMetadata {
                source_name: source_name.to_string(),
                generated_at: Utc::now(),
                total_items: full.len(),
                items_with_issues: issues.len(),
            },
            stats,
            issues,
            full,
        }
    }
}

/// JSON adapter for review reports.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write the report as pretty-printed JSON under the output directory.
    pub async fn write_json(&self, report: &Report) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| {
                format!("Failed to create output directory: {}", self.output_dir.display())
            })?;

        let timestamp = report.metadata.generated_at.format("%Y-%m-%dT%H-%M-%S");
        let path = self.output_dir.join(format!(
            "{}_{timestamp}_report.json",
            report.metadata.source_name
        ));

        let body =
            serde_json::to_vec_pretty(report).context("Failed to serialize review report")?;
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("Failed to write report: {}", path.display()))?;

        info!("Full report saved to: {}", path.display());
        Ok(path)
    }

    /// Log a human-readable run summary.
    pub fn log_summary(report: &Report) {
        info!("Content summary for {}", report.metadata.source_name);
        info!(
            "  total items: {}, with issues: {}",
            report.metadata.total_items, report.metadata.items_with_issues
        );

        let mut tags: Vec<_> = report.stats.by_tag.iter().collect();
        tags.sort();
        for (tag, count) in tags {
            info!("  {}: {}", tag, count);
        }
        if !report.stats.duplicates.is_empty() {
            info!("  duplicate strings: {}", report.stats.duplicates.len());
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
