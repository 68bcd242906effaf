//! Infrastructure layer: parsing, external clients, storage adapters
//!
//! HTML and Figma extraction, the classifier client, the CSV correction
//! store, report rendering, document patching, logging, and environment
//! configuration.

pub mod analyzer_client;
pub mod config;
pub mod correction_store;
pub mod document_patcher;
pub mod figma_client;
pub mod logging;
pub mod parsing;
pub mod report_writer;

// Re-export commonly used items
pub use analyzer_client::{AnalyzerClient, AnalyzerConfig};
pub use config::AppConfig;
pub use correction_store::{CorrectionStore, CSV_HEADERS};
pub use document_patcher::{ApplyStats, DocumentPatcher, PatchOutcome, ValidationReport};
pub use figma_client::{FigmaClient, FigmaFile};
pub use logging::init_logging;
pub use parsing::{
    ExtractionConfig, ExtractionError, ExtractionResult, FigmaContentExtractor,
    HtmlContentExtractor, SelectorGenerator,
};
pub use report_writer::{Report, ReportWriter, SeverityColor};
