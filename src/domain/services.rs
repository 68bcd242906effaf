//! Rule-based issue detection over extracted content
//!
//! The detector runs a fixed, ordered battery of independent checks against
//! one `ContentItem`. All firing checks are collected, never short-circuited,
//! so a single item may carry several issues.

use crate::domain::content::ContentItem;
use crate::domain::issue::{Issue, IssueKind, Severity};
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Rule tables for issue detection.
///
/// Passed in at construction so rule sets stay swappable and testable,
/// rather than living as hidden module-level constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRules {
    /// Honorific abbreviations, matched case-sensitively on the leading
    /// capital (`Mr.`, `Dr.`, ...).
    pub honorifics: Vec<String>,

    /// Substrings marking boilerplate filler text (matched lowercased).
    pub lorem_markers: Vec<String>,

    /// Whole-word placeholder tokens (matched case-insensitively).
    pub placeholder_tokens: Vec<String>,

    /// Known-misspelled literal strings (matched case-insensitively).
    pub misspellings: Vec<String>,

    /// Spelled-out number words for the mixed-enumeration heuristic.
    pub number_words: Vec<String>,

    /// Word-count limit for button copy.
    pub max_button_words: usize,
}

impl Default for DetectionRules {
    fn default() -> Self {
        Self {
            honorifics: vec![
                "Mr".to_string(),
                "Mrs".to_string(),
                "Ms".to_string(),
                "Dr".to_string(),
                "Prof".to_string(),
            ],
            lorem_markers: vec!["lorem ipsum".to_string(), "dolor sit amet".to_string()],
            placeholder_tokens: vec![
                "todo".to_string(),
                "tbd".to_string(),
                "fixme".to_string(),
                "xxx".to_string(),
            ],
            misspellings: vec![
                "seperate".to_string(),
                "recieve".to_string(),
                "occured".to_string(),
                "untill".to_string(),
                "sucessful".to_string(),
                "progrgess".to_string(),
            ],
            number_words: vec![
                "one".to_string(),
                "two".to_string(),
                "three".to_string(),
                "four".to_string(),
                "five".to_string(),
                "six".to_string(),
                "seven".to_string(),
                "eight".to_string(),
                "nine".to_string(),
                "ten".to_string(),
            ],
            max_button_words: 3,
        }
    }
}

/// Pure detector: `ContentItem -> Vec<Issue>`.
///
/// Regexes are compiled once at construction from the rule tables.
pub struct IssueDetector {
    rules: DetectionRules,
    honorific_re: Regex,
    placeholder_re: Regex,
    number_word_re: Regex,
    digit_re: Regex,
}

impl IssueDetector {
    /// Create a detector with the default rule tables.
    pub fn new() -> Result<Self> {
        Self::with_rules(DetectionRules::default())
    }

    /// Create a detector with custom rule tables.
    pub fn with_rules(rules: DetectionRules) -> Result<Self> {
        let honorific_re = Regex::new(&format!(r"\b({})\.", rules.honorifics.join("|")))
            .context("Failed to compile honorific pattern")?;
        let placeholder_re = Regex::new(&format!(
            r"(?i)\b({})\b",
            rules.placeholder_tokens.join("|")
        ))
        .context("Failed to compile placeholder pattern")?;
        let number_word_re =
            Regex::new(&format!(r"(?i)\b({})\b", rules.number_words.join("|")))
                .context("Failed to compile number-word pattern")?;
        let digit_re = Regex::new(r"\d").context("Failed to compile digit pattern")?;

        Ok(Self {
            rules,
            honorific_re,
            placeholder_re,
            number_word_re,
            digit_re,
        })
    }

    /// Run the full check battery against one item.
    pub fn detect(&self, item: &ContentItem) -> Vec<Issue> {
        let text = &item.original_text;
        let lowered = text.to_lowercase();
        let mut issues = Vec::new();

        if self.honorific_re.is_match(text) {
            issues.push(Issue::new(
                IssueKind::Honorific,
                "Contains honorific (Mr., Mrs., Dr., ...)",
            ));
        }

        if self
            .rules
            .lorem_markers
            .iter()
            .any(|marker| lowered.contains(marker))
        {
            issues.push(Issue::new(
                IssueKind::LoremIpsum,
                "Lorem ipsum placeholder text",
            ));
        }

        if self.placeholder_re.is_match(text) {
            issues.push(Issue::new(
                IssueKind::PlaceholderToken,
                "Placeholder text (TODO, TBD, ...)",
            ));
        }

        // Category-conditional: only classified button copy has a length cap.
        if let Some(analysis) = &item.analysis {
            if analysis.category == "button"
                && text.split_whitespace().count() > self.rules.max_button_words
            {
                issues.push(Issue::new(
                    IssueKind::ExcessLength,
                    format!(
                        "Button text too long (>{} words)",
                        self.rules.max_button_words
                    ),
                ));
            }
        }

        if self.has_mixed_enumeration(text) {
            issues.push(Issue::new(
                IssueKind::InconsistentCapitalization,
                "Mixed numeral and spelled-out number style",
            ));
        }

        if self
            .rules
            .misspellings
            .iter()
            .any(|word| lowered.contains(word))
        {
            issues.push(Issue::new(IssueKind::Misspelling, "Possible spelling error"));
        }

        if let Some(analysis) = &item.analysis {
            if analysis.tone == "mixed" {
                issues.push(Issue::new(IssueKind::ToneInconsistency, "Inconsistent tone"));
            }
        }

        issues
    }

    /// Heuristic proxy for mixed enumeration style ("Step 1" next to
    /// "Step Two"): an Arabic numeral and a spelled-out number word in the
    /// same string. Single-word strings are exempt.
    fn has_mixed_enumeration(&self, text: &str) -> bool {
        if text.split_whitespace().count() < 2 {
            return false;
        }
        self.digit_re.is_match(text) && self.number_word_re.is_match(text)
    }

    /// Review a whole extraction pass: detect issues and classify severity
    /// per item, preserving extraction order.
    pub fn review(&self, items: &[ContentItem]) -> Vec<ReviewedItem> {
        items
            .iter()
            .map(|item| {
                let issues = self.detect(item);
                let severity = Severity::from_issues(&issues);
                ReviewedItem {
                    item: item.clone(),
                    issues,
                    severity,
                }
            })
            .collect()
    }
}

/// One content item together with its derived review outcome.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReviewedItem {
    pub item: ContentItem,
    pub issues: Vec<Issue>,
    pub severity: Severity,
}

impl ReviewedItem {
    /// Issue messages joined for tabular display.
    pub fn issues_summary(&self) -> String {
        self.issues
            .iter()
            .map(|issue| issue.message.clone())
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{ContentAnalysis, ContentAttributes};
    use crate::domain::issue::Severity;

    fn item(text: &str) -> ContentItem {
        ContentItem {
            id: "test_0".to_string(),
            identity: "#test".to_string(),
            tag: "p".to_string(),
            original_text: text.to_string(),
            attributes: ContentAttributes::default(),
            path: None,
            analysis: None,
        }
    }

    fn analyzed(text: &str, category: &str, tone: &str) -> ContentItem {
        item(text).with_analysis(ContentAnalysis {
            category: category.to_string(),
            tone: tone.to_string(),
            purpose: String::new(),
            patterns: Vec::new(),
        })
    }

    fn detector() -> IssueDetector {
        IssueDetector::new().unwrap()
    }

    #[test]
    fn honorific_fires_and_is_critical() {
        let issues = detector().detect(&item("Dr. Smith will present"));
        assert!(issues.iter().any(|i| i.kind == IssueKind::Honorific));
        assert_eq!(Severity::from_issues(&issues), Severity::Critical);
    }

    #[test]
    fn honorific_requires_leading_capital() {
        let issues = detector().detect(&item("visit the dr. office"));
        assert!(!issues.iter().any(|i| i.kind == IssueKind::Honorific));
    }

    #[test]
    fn lorem_ipsum_fires_and_is_high() {
        let issues = detector().detect(&item("lorem ipsum dolor sit amet"));
        assert!(issues.iter().any(|i| i.kind == IssueKind::LoremIpsum));
        assert_eq!(Severity::from_issues(&issues), Severity::High);
    }

    #[test]
    fn placeholder_tokens_match_whole_words_only() {
        let issues = detector().detect(&item("TODO: write the headline"));
        assert!(issues.iter().any(|i| i.kind == IssueKind::PlaceholderToken));

        // "mastodon" must not trip the "todo" token
        let issues = detector().detect(&item("share it on mastodon"));
        assert!(!issues.iter().any(|i| i.kind == IssueKind::PlaceholderToken));
    }

    #[test]
    fn excess_length_only_fires_for_button_category() {
        let text = "Click here to submit this form now";

        let issues = detector().detect(&analyzed(text, "button", "formal"));
        assert!(issues.iter().any(|i| i.kind == IssueKind::ExcessLength));

        let issues = detector().detect(&analyzed(text, "heading", "formal"));
        assert!(!issues.iter().any(|i| i.kind == IssueKind::ExcessLength));

        // Unanalyzed items never fire the length rule.
        let issues = detector().detect(&item(text));
        assert!(!issues.iter().any(|i| i.kind == IssueKind::ExcessLength));
    }

    #[test]
    fn short_button_copy_passes() {
        let issues = detector().detect(&analyzed("Save changes", "button", "formal"));
        assert!(!issues.iter().any(|i| i.kind == IssueKind::ExcessLength));
    }

    #[test]
    fn mixed_enumeration_needs_digit_and_number_word() {
        let issues = detector().detect(&item("Step 1 of two"));
        assert!(issues
            .iter()
            .any(|i| i.kind == IssueKind::InconsistentCapitalization));

        let issues = detector().detect(&item("Step 1 of 2"));
        assert!(!issues
            .iter()
            .any(|i| i.kind == IssueKind::InconsistentCapitalization));

        // "one" inside another word does not count
        let issues = detector().detect(&item("1 component added"));
        assert!(!issues
            .iter()
            .any(|i| i.kind == IssueKind::InconsistentCapitalization));
    }

    #[test]
    fn known_misspellings_fire_case_insensitively() {
        let issues = detector().detect(&item("Please Recieve your receipt"));
        assert!(issues.iter().any(|i| i.kind == IssueKind::Misspelling));
        assert_eq!(Severity::from_issues(&issues), Severity::High);
    }

    #[test]
    fn mixed_tone_fires_only_with_analysis() {
        let issues =
            detector().detect(&analyzed("Hey there, please authenticate", "body-text", "mixed"));
        assert!(issues.iter().any(|i| i.kind == IssueKind::ToneInconsistency));

        let issues = detector().detect(&item("Hey there, please authenticate"));
        assert!(!issues.iter().any(|i| i.kind == IssueKind::ToneInconsistency));
    }

    #[test]
    fn multiple_issues_accumulate() {
        let issues = detector().detect(&item("TODO lorem ipsum untill step 1 of two"));
        let kinds: Vec<IssueKind> = issues.iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&IssueKind::LoremIpsum));
        assert!(kinds.contains(&IssueKind::PlaceholderToken));
        assert!(kinds.contains(&IssueKind::Misspelling));
        assert!(kinds.contains(&IssueKind::InconsistentCapitalization));
        // severity reflects the worst class present
        assert_eq!(Severity::from_issues(&issues), Severity::High);
    }

    #[test]
    fn clean_copy_yields_no_issues() {
        let issues = detector().detect(&item("Welcome back"));
        assert!(issues.is_empty());
        assert_eq!(Severity::from_issues(&issues), Severity::None);
    }

    #[test]
    fn reviewed_items_know_whether_they_carry_issues() {
        let reviewed = detector().review(&[item("lorem ipsum filler"), item("Welcome back")]);
        assert!(reviewed[0].has_issues());
        assert!(!reviewed[1].has_issues());
    }
}
