//! Correction application with backup and validation safeguards
//!
//! Per invocation the patcher moves through
//! `Start -> Backed-Up -> Validated -> Applied | Rejected`. The backup is
//! written before anything else; validation is a hard gate (no partial
//! apply); individual selector misses are counted and logged, never fatal.
//! The document is mutated in memory and written out once after the whole
//! batch.

use crate::domain::content::Correction;
use crate::domain::services::DetectionRules;
use anyhow::{Context, Result};
use chrono::Utc;
use ego_tree::NodeId;
use regex::Regex;
use scraper::node::Node;
use scraper::{Html, Selector};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of one validation pass over a correction batch.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub violations: Vec<String>,
}

/// Counters for one apply pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyStats {
    pub applied: usize,
    pub skipped: usize,
    pub total: usize,
}

/// Terminal states of a file patch run.
#[derive(Debug)]
pub enum PatchOutcome {
    Applied(ApplyStats),
    Rejected(ValidationReport),
}

/// Applies editor corrections back into HTML documents.
pub struct DocumentPatcher {
    backup_dir: PathBuf,
    lorem_markers: Vec<String>,
    honorific_re: Regex,
}

impl DocumentPatcher {
    /// Create a patcher with the default banned-pattern rules.
    pub fn new(backup_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_rules(backup_dir, &DetectionRules::default())
    }

    /// Create a patcher whose validation bans come from custom rules.
    pub fn with_rules(backup_dir: impl Into<PathBuf>, rules: &DetectionRules) -> Result<Self> {
        let honorific_re = Regex::new(&format!(r"\b({})\.", rules.honorifics.join("|")))
            .context("Failed to compile honorific pattern")?;

        Ok(Self {
            backup_dir: backup_dir.into(),
            lorem_markers: rules.lorem_markers.clone(),
            honorific_re,
        })
    }

    /// Pre-apply gate: every correction must carry its identity and
    /// original text, and the replacement must not reintroduce a banned
    /// pattern. Any violation rejects the whole batch.
    pub fn validate(&self, corrections: &[Correction]) -> ValidationReport {
        let mut violations = Vec::new();

        for (index, correction) in corrections.iter().enumerate() {
            let row = index + 1;

            if correction.identity.trim().is_empty() {
                violations.push(format!("Row {row}: missing selector"));
            }
            if correction.original_text.trim().is_empty() {
                violations.push(format!("Row {row}: missing original content"));
            }

            let replacement = correction.corrected_text.trim();
            if replacement.is_empty() {
                continue;
            }

            let lowered = replacement.to_lowercase();
            if self
                .lorem_markers
                .iter()
                .any(|marker| lowered.contains(marker))
            {
                violations.push(format!("Row {row}: replacement still contains placeholder text"));
            }
            if self.honorific_re.is_match(replacement) {
                violations.push(format!(
                    "Row {row}: replacement contains honorific ({replacement})"
                ));
            }
        }

        ValidationReport {
            passed: violations.is_empty(),
            violations,
        }
    }

    /// Copy the untouched source to a timestamped path under the backup
    /// directory. Backups are append-only; a failure here aborts the run
    /// before any mutation.
    pub async fn create_backup(&self, document_path: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.backup_dir)
            .await
            .with_context(|| {
                format!("Failed to create backup directory: {}", self.backup_dir.display())
            })?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S");
        let file_name = document_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let backup_path = self.backup_dir.join(format!("{timestamp}_{file_name}"));

        tokio::fs::copy(document_path, &backup_path)
            .await
            .with_context(|| {
                format!("Failed to back up {} to {}", document_path.display(), backup_path.display())
            })?;

        info!("Backup created: {}", backup_path.display());
        Ok(backup_path)
    }

    /// Apply a validated batch to an in-memory document.
    ///
    /// Per correction: re-resolve the identity against the current tree; a
    /// miss or a replacement equal to the current text counts as skipped
    /// and the batch continues. Elements with a placeholder attribute get
    /// the attribute rewritten; otherwise the element's text nodes are.
    pub fn apply(&self, document: &mut Html, corrections: &[Correction]) -> ApplyStats {
        let mut stats = ApplyStats {
            total: corrections.len(),
            ..ApplyStats::default()
        };

        for correction in corrections {
            let replacement = correction.corrected_text.trim();
            if replacement.is_empty() {
                stats.skipped += 1;
                continue;
            }

            let selector = match Selector::parse(&correction.identity) {
                Ok(selector) => selector,
                Err(e) => {
                    warn!("Invalid selector '{}': {}", correction.identity, e);
                    stats.skipped += 1;
                    continue;
                }
            };

            // Collect node ids first so the immutable borrow ends before
            // the tree is mutated.
            let target = {
                let Some(element) = document.select(&selector).next() else {
                    warn!("Selector not found: {}", correction.identity);
                    stats.skipped += 1;
                    continue;
                };

                let has_placeholder = element.value().attr("placeholder").is_some();
                let current_text = if has_placeholder {
                    element.value().attr("placeholder").unwrap_or("").to_string()
                } else {
                    element.text().collect::<String>()
                };
                let text_ids: Vec<_> = element
                    .descendants()
                    .filter(|node| node.value().is_text())
                    .map(|node| node.id())
                    .collect();

                (element.id(), has_placeholder, current_text, text_ids)
            };
            let (element_id, has_placeholder, current_text, text_ids) = target;

            if current_text.trim() == replacement {
                stats.skipped += 1;
                continue;
            }

            let mutated = if has_placeholder {
                Self::set_placeholder(document, element_id, replacement)
            } else {
                Self::set_text(document, &text_ids, replacement)
            };

            if mutated {
                info!(
                    "Updated: \"{}\" -> \"{}\"",
                    current_text.trim(),
                    replacement
                );
                stats.applied += 1;
            } else {
                warn!("Nothing to rewrite for selector: {}", correction.identity);
                stats.skipped += 1;
            }
        }

        stats
    }

    fn set_placeholder(document: &mut Html, element_id: NodeId, replacement: &str) -> bool {
        let Some(mut node) = document.tree.get_mut(element_id) else {
            return false;
        };
        if let Node::Element(element) = node.value() {
            for (name, value) in element.attrs.iter_mut() {
                if &*name.local == "placeholder" {
                    *value = replacement.into();
                    return true;
                }
            }
        }
        false
    }

    /// Write the replacement into the first text node and blank any
    /// remaining text descendants, mirroring a full text replacement.
    fn set_text(document: &mut Html, text_ids: &[NodeId], replacement: &str) -> bool {
        let mut first = true;
        for &id in text_ids {
            if let Some(mut node) = document.tree.get_mut(id) {
                if let Node::Text(text) = node.value() {
                    text.text = if first { replacement.into() } else { "".into() };
                    first = false;
                }
            }
        }
        !first
    }

    /// Run the full patch cycle against a file on disk.
    ///
    /// Backup and read/write failures are fatal and happen before any
    /// persisted mutation; a rejected validation leaves the file untouched.
    /// The patched document is written exactly once, after the whole batch.
    pub async fn apply_to_file(
        &self,
        html_path: &Path,
        corrections: &[Correction],
    ) -> Result<PatchOutcome> {
        info!("Applying corrections to: {}", html_path.display());

        self.create_backup(html_path).await?;

        let validation = self.validate(corrections);
        if !validation.passed {
            for violation in &validation.violations {
                warn!("Validation: {}", violation);
            }
            return Ok(PatchOutcome::Rejected(validation));
        }

        let html_source = tokio::fs::read_to_string(html_path)
            .await
            .with_context(|| format!("Failed to read HTML file: {}", html_path.display()))?;

        // parse + mutate synchronously so the document never crosses an await
        let (stats, output) = {
            let mut document = Html::parse_document(&html_source);
            let stats = self.apply(&mut document, corrections);
            (stats, document.html())
        };

        tokio::fs::write(html_path, output)
            .await
            .with_context(|| format!("Failed to write patched HTML: {}", html_path.display()))?;

        info!(
            "Applied {} corrections, skipped {}",
            stats.applied, stats.skipped
        );
        Ok(PatchOutcome::Applied(stats))
    }
}
