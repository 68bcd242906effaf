//! Correction application workflow
//!
//! Reads an edited correction CSV, runs the validation gate, and replays
//! the corrections into the source HTML with backup-first ordering.

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::correction_store::CorrectionStore;
use crate::infrastructure::document_patcher::{ApplyStats, DocumentPatcher, PatchOutcome};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Use cases for the write-back half of the round trip.
pub struct CorrectionUseCases {
    store: CorrectionStore,
    patcher: DocumentPatcher,
}

impl CorrectionUseCases {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            store: CorrectionStore::new(config.output_dir.clone()),
            patcher: DocumentPatcher::new(config.backup_dir.clone())
                .context("Failed to create document patcher")?,
        })
    }

    /// Import corrections from `csv_path` and apply them to `html_path`.
    ///
    /// An empty correction set is a successful no-op. A failed validation
    /// is an error carrying the itemized violations; the document is never
    /// touched in that case.
    pub async fn apply_corrections(&self, csv_path: &Path, html_path: &Path) -> Result<ApplyStats> {
        let corrections = self.store.read_corrections(csv_path).await?;

        if corrections.is_empty() {
            warn!("No corrections found in CSV; add text to the \"Corrected Content\" column");
            return Ok(ApplyStats::default());
        }

        match self.patcher.apply_to_file(html_path, &corrections).await? {
            PatchOutcome::Applied(stats) => {
                info!(
                    "Results: applied {}, skipped {}, total {}",
                    stats.applied, stats.skipped, stats.total
                );
                Ok(stats)
            }
            PatchOutcome::Rejected(report) => {
                anyhow::bail!(
                    "Validation failed with {} issue(s):\n{}",
                    report.violations.len(),
                    report.violations.join("\n")
                );
            }
        }
    }
}
