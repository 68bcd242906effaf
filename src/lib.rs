//! Copylens - UI copy extraction and review pipeline
//!
//! Extracts user-facing text from Figma documents and static HTML pages,
//! flags writing-quality issues, and supports a human-in-the-loop
//! correction cycle: export findings to CSV, let an editor fill in
//! replacements, then re-inject the corrections into the original HTML
//! with backup and validation safeguards.

pub mod application;
pub mod domain;
pub mod infrastructure;
