//! Error types for content extraction
//!
//! Detailed error types for HTML and design-document extraction, with
//! context-aware reporting in the style of the rest of the infrastructure.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ExtractionError {
    #[error("No valid selectors compiled. Errors: {}", .errors.join(", "))]
    NoValidSelectors { errors: Vec<String> },

    #[error("Source not found: {path}")]
    SourceNotFound { path: String },

    #[error("No HTML files found in directory: {path}")]
    EmptyDirectory { path: String },
}

impl ExtractionError {
    /// Create a source-not-found error from a path.
    pub fn source_not_found(path: impl ToString) -> Self {
        Self::SourceNotFound {
            path: path.to_string(),
        }
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;
