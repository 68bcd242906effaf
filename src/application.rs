//! Application layer: scrape-and-review and correction workflows

pub mod correction_use_cases;
pub mod scrape_use_cases;

pub use correction_use_cases::CorrectionUseCases;
pub use scrape_use_cases::{ScrapeSummary, ScrapeUseCases};
