//! Domain layer: content entities, issue model, and detection services

pub mod content;
pub mod issue;
pub mod services;

// Re-export commonly used types
pub use content::{
    ContentAnalysis, ContentAttributes, ContentItem, Correction, ScrapeResult, ScrapeStats,
};
pub use issue::{Issue, IssueKind, Severity};
pub use services::{DetectionRules, IssueDetector, ReviewedItem};
