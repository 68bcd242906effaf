//! Extraction configuration
//!
//! Centralized configuration for the text-bearing selector list and
//! selector-path synthesis. Kept as plain data so rule sets are swappable
//! and testable in isolation.

use serde::{Deserialize, Serialize};

/// Configuration for HTML content extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Ordered list of CSS selectors considered text-bearing. Selectors
    /// containing `[placeholder]` read the placeholder attribute instead
    /// of inner text.
    pub text_selectors: Vec<String>,

    /// Tag at which selector-path synthesis stops ascending.
    pub selector_root_tag: String,

    /// Maximum number of ancestor levels captured in a selector path.
    pub selector_max_depth: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            text_selectors: vec![
                "h1".to_string(),
                "h2".to_string(),
                "h3".to_string(),
                "h4".to_string(),
                "h5".to_string(),
                "h6".to_string(),
                "p".to_string(),
                "span".to_string(),
                "button".to_string(),
                "a".to_string(),
                "label".to_string(),
                "input[placeholder]".to_string(),
                "textarea[placeholder]".to_string(),
                "li".to_string(),
                "td".to_string(),
                "th".to_string(),
                "div[role=\"button\"]".to_string(),
            ],
            selector_root_tag: "body".to_string(),
            selector_max_depth: 4,
        }
    }
}

impl ExtractionConfig {
    /// Whether a selector from the text-bearing list reads the placeholder
    /// attribute rather than inner text.
    pub fn uses_placeholder(selector: &str) -> bool {
        selector.contains("[placeholder]")
    }
}
