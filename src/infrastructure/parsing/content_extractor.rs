//! HTML content extraction
//!
//! Walks a parsed HTML document with the configured text-bearing selector
//! list and emits a flat list of `ContentItem`s, each carrying a structural
//! locator for the correction round trip. Pure read of the input document:
//! extracting twice from an unmodified document yields identical sequences.

use super::config::ExtractionConfig;
use super::error::{ExtractionError, ExtractionResult};
use super::selector_generator::SelectorGenerator;
use crate::domain::content::{ContentAttributes, ContentItem, ScrapeResult};
use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use tracing::{debug, info, warn};

/// Extractor for static HTML files.
pub struct HtmlContentExtractor {
    /// Compiled selectors paired with their source strings; the string is
    /// kept for the placeholder-attribute decision and for diagnostics.
    selectors: Vec<(String, Selector)>,
    generator: SelectorGenerator,
}

impl HtmlContentExtractor {
    /// Create an extractor with the default text-bearing selector list.
    pub fn new() -> ExtractionResult<Self> {
        Self::with_config(&ExtractionConfig::default())
    }

    /// Create an extractor with a custom selector configuration.
    pub fn with_config(config: &ExtractionConfig) -> ExtractionResult<Self> {
        let selectors = Self::compile_selectors(&config.text_selectors)?;
        Ok(Self {
            selectors,
            generator: SelectorGenerator::new(
                config.selector_root_tag.clone(),
                config.selector_max_depth,
            ),
        })
    }

    /// Compile selector strings, skipping invalid entries with a warning.
    /// Fails only when nothing compiles.
    fn compile_selectors(selector_strings: &[String]) -> ExtractionResult<Vec<(String, Selector)>> {
        let mut selectors = Vec::new();
        let mut errors = Vec::new();

        for selector_str in selector_strings {
            match Selector::parse(selector_str) {
                Ok(selector) => selectors.push((selector_str.clone(), selector)),
                Err(e) => {
                    warn!("Failed to compile selector '{}': {}", selector_str, e);
                    errors.push(format!("'{selector_str}': {e}"));
                }
            }
        }

        if selectors.is_empty() {
            return Err(ExtractionError::NoValidSelectors { errors });
        }

        Ok(selectors)
    }

    /// Extract all text-bearing items from a parsed document.
    ///
    /// Ids are `{source_name}_{counter}` with the counter scoped to this
    /// call, so they are collision-free within a run but not stable across
    /// runs.
    pub fn extract(&self, html: &Html, source_name: &str) -> Vec<ContentItem> {
        let mut items = Vec::new();

        for (selector_str, selector) in &self.selectors {
            let from_placeholder = ExtractionConfig::uses_placeholder(selector_str);

            for element in html.select(selector) {
                let text = if from_placeholder {
                    element.value().attr("placeholder").unwrap_or("").trim().to_string()
                } else {
                    element.text().collect::<String>().trim().to_string()
                };

                if text.is_empty() {
                    continue;
                }

                items.push(ContentItem {
                    id: format!("{source_name}_{}", items.len()),
                    identity: self.generator.generate(element),
                    tag: element.value().name().to_string(),
                    original_text: text,
                    attributes: Self::capture_attributes(element),
                    path: None,
                    analysis: None,
                });
            }
        }

        debug!("Extracted {} text items from {}", items.len(), source_name);
        items
    }

    fn capture_attributes(element: ElementRef<'_>) -> ContentAttributes {
        let attr = |name: &str| element.value().attr(name).unwrap_or("").to_string();
        ContentAttributes {
            class: attr("class"),
            id: attr("id"),
            role: attr("role"),
        }
    }

    /// Scrape a single HTML file.
    pub async fn extract_file(&self, path: &Path) -> Result<ScrapeResult> {
        info!("Scraping HTML file: {}", path.display());

        let html_source = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read HTML file: {}", path.display()))?;
        let source_name = file_stem(path);

        let items = {
            let document = Html::parse_document(&html_source);
            self.extract(&document, &source_name)
        };

        info!("Found {} text elements in {}", items.len(), source_name);
        Ok(ScrapeResult::new(source_name, items))
    }

    /// Scrape every `*.html` file in a directory (sorted by file name, so
    /// repeated runs produce the same item order).
    pub async fn extract_directory(&self, dir: &Path) -> Result<ScrapeResult> {
        info!("Scraping directory: {}", dir.display());

        let mut entries = tokio::fs::read_dir(dir)
            .await
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        let mut html_files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .context("Failed to enumerate directory entry")?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "html") {
                html_files.push(path);
            }
        }
        html_files.sort();

        if html_files.is_empty() {
            return Err(ExtractionError::EmptyDirectory {
                path: dir.display().to_string(),
            }
            .into());
        }

        let mut all_items = Vec::new();
        for file in &html_files {
            let result = self.extract_file(file).await?;
            all_items.extend(result.items);
        }

        let dir_name = file_stem(dir);
        Ok(ScrapeResult::new(dir_name, all_items))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
