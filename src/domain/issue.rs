//! Issue and severity model for content review
//!
//! Issues are derived from a `ContentItem` on demand and never stored
//! independently. Severity summarizes the worst issue class present.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of detectable writing-quality problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    Honorific,
    LoremIpsum,
    PlaceholderToken,
    ExcessLength,
    InconsistentCapitalization,
    Misspelling,
    ToneInconsistency,
}

/// A detected problem on one content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Ordinal severity, totally ordered `Critical < High < Medium < Low < None`
/// so that sorting ascending puts the worst problems first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    None,
}

impl Severity {
    /// Map a set of detected issues to the single worst severity class.
    ///
    /// First-match priority over issue kinds, independent of how many issues
    /// of a kind fired. This is deliberate policy: severity reflects the
    /// worst class of problem, not a count.
    pub fn from_issues(issues: &[Issue]) -> Self {
        let has = |kind: IssueKind| issues.iter().any(|i| i.kind == kind);

        if has(IssueKind::Honorific) {
            Severity::Critical
        } else if has(IssueKind::LoremIpsum) || has(IssueKind::Misspelling) {
            Severity::High
        } else if has(IssueKind::PlaceholderToken) || has(IssueKind::ExcessLength) {
            Severity::Medium
        } else if has(IssueKind::InconsistentCapitalization)
            || has(IssueKind::ToneInconsistency)
        {
            Severity::Low
        } else {
            Severity::None
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::None => "None",
        };
        write!(f, "{label}")
    }
}
