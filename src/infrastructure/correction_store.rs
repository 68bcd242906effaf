//! CSV round-trip store for the correction cycle
//!
//! Exports reviewed content to a spreadsheet-editable CSV with a blank
//! `Corrected Content` column, and parses the edited file back into
//! `Correction` records. A row opts into correction solely by carrying a
//! non-blank replacement; everything else is silently inert.

use crate::domain::content::Correction;
use crate::domain::services::ReviewedItem;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed export column contract. Editors fill `Corrected Content` and must
/// not rename it; it is the sole write-back channel to the patcher.
pub const CSV_HEADERS: [&str; 8] = [
    "ID",
    "Selector",
    "Tag",
    "Original Content",
    "Corrected Content",
    "Category",
    "Tone",
    "Issues",
];

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Selector")]
    selector: String,
    #[serde(rename = "Tag")]
    tag: String,
    #[serde(rename = "Original Content")]
    original_content: String,
    #[serde(rename = "Corrected Content", default)]
    corrected_content: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Tone", default)]
    tone: String,
    #[serde(rename = "Issues", default)]
    issues: String,
}

/// CSV export/import for the correction round trip.
pub struct CorrectionStore {
    output_dir: PathBuf,
}

impl CorrectionStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write an export row per reviewed item to `writer`. The header row is
    /// always present, even for an empty scrape.
    pub fn export<W: io::Write>(&self, writer: W, reviewed: &[ReviewedItem]) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer
            .write_record(CSV_HEADERS)
            .context("Failed to write CSV header")?;

        for entry in reviewed {
            let (category, tone) = entry
                .item
                .analysis
                .as_ref()
                .map(|analysis| (analysis.category.clone(), analysis.tone.clone()))
                .unwrap_or_default();

            csv_writer
                .serialize(CsvRow {
                    id: entry.item.id.clone(),
                    selector: entry.item.identity.clone(),
                    tag: entry.item.tag.clone(),
                    original_content: entry.item.original_text.clone(),
                    // left blank for manual editing
                    corrected_content: String::new(),
                    category,
                    tone,
                    issues: entry.issues_summary(),
                })
                .context("Failed to write CSV row")?;
        }

        csv_writer.flush().context("Failed to flush CSV output")?;
        Ok(())
    }

    /// Export to a timestamped file under the output directory.
    pub async fn write_export(
        &self,
        reviewed: &[ReviewedItem],
        source_name: &str,
    ) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| {
                format!("Failed to create output directory: {}", self.output_dir.display())
            })?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S");
        let path = self
            .output_dir
            .join(format!("{source_name}_{timestamp}_content.csv"));

        let mut buffer = Vec::new();
        self.export(&mut buffer, reviewed)?;
        tokio::fs::write(&path, buffer)
            .await
            .with_context(|| format!("Failed to write CSV export: {}", path.display()))?;

        info!("CSV saved to: {}", path.display());
        Ok(path)
    }

    /// Parse an edited export. Rows with a blank or whitespace-only
    /// replacement are excluded (not an error): re-importing an unedited
    /// export yields zero corrections.
    pub fn import<R: io::Read>(&self, reader: R) -> Result<Vec<Correction>> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut corrections = Vec::new();

        for row in csv_reader.deserialize() {
            let row: CsvRow = row.context("Failed to parse CSV row")?;
            if row.corrected_content.trim().is_empty() {
                continue;
            }
            corrections.push(Correction {
                id: row.id,
                identity: row.selector,
                tag: row.tag,
                original_text: row.original_content,
                corrected_text: row.corrected_content,
            });
        }

        Ok(corrections)
    }

    /// Read corrections from an edited CSV file.
    pub async fn read_corrections(&self, path: &Path) -> Result<Vec<Correction>> {
        info!("Reading corrections from: {}", path.display());

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read corrections file: {}", path.display()))?;
        let corrections = self.import(bytes.as_slice())?;

        info!("Found {} corrections", corrections.len());
        Ok(corrections)
    }
}
