//! Content extraction infrastructure
//!
//! Trait-based extraction over tree-structured documents: parsed HTML and
//! fetched Figma node trees both flatten into the shared `ContentItem`
//! model, with identities suitable for the correction round trip.

pub mod config;
pub mod content_extractor;
pub mod error;
pub mod figma_extractor;
pub mod selector_generator;

// Re-export public types
pub use config::ExtractionConfig;
pub use content_extractor::HtmlContentExtractor;
pub use error::{ExtractionError, ExtractionResult};
pub use figma_extractor::{FigmaContentExtractor, FigmaNode};
pub use selector_generator::SelectorGenerator;

use crate::domain::content::ContentItem;

/// Extraction seam shared by the document kinds we know how to walk.
pub trait ContentExtractor {
    type Source;

    /// Flatten a document into extraction-ordered content items.
    fn extract_items(&self, source: &Self::Source, source_name: &str) -> Vec<ContentItem>;
}

impl ContentExtractor for HtmlContentExtractor {
    type Source = scraper::Html;

    fn extract_items(&self, source: &Self::Source, source_name: &str) -> Vec<ContentItem> {
        self.extract(source, source_name)
    }
}

impl ContentExtractor for FigmaContentExtractor {
    type Source = FigmaNode;

    fn extract_items(&self, source: &Self::Source, source_name: &str) -> Vec<ContentItem> {
        self.extract(source_name, source).items
    }
}
