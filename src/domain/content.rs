//! Core content entities for the extraction and correction round trip
//!
//! A `ContentItem` is one extracted text-bearing unit together with the
//! identity needed to re-find its node in the same document later.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One extracted text-bearing unit.
///
/// Created once per extraction pass and immutable afterwards, except for
/// `analysis` which is attached post-hoc by the external classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique within a scrape run: `{source_name}_{counter}`.
    pub id: String,

    /// Locator sufficient to re-find the originating node in the same
    /// document instance: a CSS selector path for HTML, a native node id
    /// for Figma documents.
    pub identity: String,

    /// Element name (`button`, `h1`, ...) or Figma node kind (`TEXT`).
    pub tag: String,

    /// Extracted text, trimmed. Never empty: whitespace-only nodes are
    /// filtered out during extraction.
    pub original_text: String,

    /// Auxiliary metadata. Informational only, never used for re-location.
    #[serde(default)]
    pub attributes: ContentAttributes,

    /// Ancestor path for human context (Figma frame names, joined by " > ").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Classifier output. `None` means "not yet analyzed", a valid state
    /// every consumer must accept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ContentAnalysis>,
}

impl ContentItem {
    /// Attach classifier output. Only mutation a `ContentItem` ever sees.
    pub fn with_analysis(mut self, analysis: ContentAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }
}

/// Auxiliary element metadata captured at extraction time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentAttributes {
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub role: String,
}

/// Output of the external classifier for one item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub category: String,
    pub tone: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
}

/// An editor-supplied replacement for one `ContentItem`, read back from the
/// corrected CSV. Actionable only when `corrected_text` is non-blank and
/// differs from the text currently in the document; otherwise inert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correction {
    pub id: String,
    /// The identity the item carried at export time.
    pub identity: String,
    pub tag: String,
    pub original_text: String,
    pub corrected_text: String,
}

/// Aggregate statistics for one scrape run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeStats {
    pub total_items: usize,
    /// Item count per tag/node kind.
    pub by_tag: HashMap<String, usize>,
    pub unique_strings: usize,
    /// Strings that occurred more than once.
    pub duplicates: Vec<String>,
}

impl ScrapeStats {
    /// Compute stats over an extracted item list.
    pub fn from_items(items: &[ContentItem]) -> Self {
        let mut by_tag: HashMap<String, usize> = HashMap::new();
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut duplicates = Vec::new();

        for item in items {
            *by_tag.entry(item.tag.clone()).or_insert(0) += 1;
            let count = seen.entry(item.original_text.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                duplicates.push(item.original_text.clone());
            }
        }

        Self {
            total_items: items.len(),
            by_tag,
            unique_strings: seen.len(),
            duplicates,
        }
    }
}

/// Result of one extraction pass over a single source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// File name or Figma document name the items came from.
    pub source_name: String,
    pub items: Vec<ContentItem>,
    pub stats: ScrapeStats,
}

impl ScrapeResult {
    pub fn new(source_name: impl Into<String>, items: Vec<ContentItem>) -> Self {
        let stats = ScrapeStats::from_items(&items);
        Self {
            source_name: source_name.into(),
            items,
            stats,
        }
    }
}
