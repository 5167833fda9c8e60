// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report card data model.
//!
//! A [`Finding`] is one card produced by one checker. A [`Report`] bundles
//! the cards for a single page in checker registration order.

use serde::{Deserialize, Serialize};

/// Three-level outcome of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Check passed
    Good,
    /// Should be looked at
    Warn,
    /// Clear accessibility defect
    Fail,
}

impl Status {
    /// Traffic light glyph used by the human-readable renderers
    pub fn glyph(&self) -> &'static str {
        match self {
            Status::Good => "🟢",
            Status::Warn => "🟡",
            Status::Fail => "🔴",
        }
    }

    /// Map a percentage onto a status using `good_at` / `warn_at` cut-offs
    pub fn from_percent(percent: f64, good_at: f64, warn_at: f64) -> Self {
        if percent >= good_at {
            Status::Good
        } else if percent >= warn_at {
            Status::Warn
        } else {
            Status::Fail
        }
    }

    /// The more severe of two statuses
    pub fn at_least(self, other: Status) -> Status {
        self.max(other)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Good => write!(f, "GOOD"),
            Status::Warn => write!(f, "WARN"),
            Status::Fail => write!(f, "FAIL"),
        }
    }
}

/// A single report card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable short key, one per checker (e.g. "img-alt")
    pub id: String,
    /// Human title
    pub title: String,
    /// Outcome
    pub status: Status,
    /// One sentence summary
    pub summary: String,
    /// Evidence lines
    pub details: Vec<String>,
    /// Remediation hint
    pub recommendation: Option<String>,
}

impl Finding {
    /// Create a new finding with no details or recommendation
    pub fn new(id: &str, title: &str, status: Status, summary: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            status,
            summary: summary.to_string(),
            details: Vec::new(),
            recommendation: None,
        }
    }

    /// Append a detail line
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Append several detail lines
    pub fn with_details(mut self, details: impl IntoIterator<Item = String>) -> Self {
        self.details.extend(details);
        self
    }

    /// Set the recommendation
    pub fn with_recommendation(mut self, recommendation: &str) -> Self {
        self.recommendation = Some(recommendation.to_string());
        self
    }
}

/// Count of findings per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub good: usize,
    pub warn: usize,
    pub fail: usize,
}

/// Analysis result for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Page that was analyzed
    pub url: String,
    /// One card per checker, in registration order
    pub cards: Vec<Finding>,
}

impl Report {
    /// Bundle findings for a page
    pub fn new(url: &str, cards: Vec<Finding>) -> Self {
        Self {
            url: url.to_string(),
            cards,
        }
    }

    /// Recount statuses across all cards
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for card in &self.cards {
            match card.status {
                Status::Good => tally.good += 1,
                Status::Warn => tally.warn += 1,
                Status::Fail => tally.fail += 1,
            }
        }
        tally
    }

    /// Whether any card failed
    pub fn has_failures(&self) -> bool {
        self.cards.iter().any(|c| c.status == Status::Fail)
    }

    /// Look up a card by checker id
    pub fn card(&self, id: &str) -> Option<&Finding> {
        self.cards.iter().find(|c| c.id == id)
    }
}

/// Percentage of `n` over `d`, zero when `d` is zero
pub fn percent(n: usize, d: usize) -> f64 {
    if d == 0 {
        0.0
    } else {
        n as f64 * 100.0 / d as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(Status::from_percent(95.0, 95.0, 70.0), Status::Good);
        assert_eq!(Status::from_percent(94.9, 95.0, 70.0), Status::Warn);
        assert_eq!(Status::from_percent(70.0, 95.0, 70.0), Status::Warn);
        assert_eq!(Status::from_percent(69.9, 95.0, 70.0), Status::Fail);
    }

    #[test]
    fn test_at_least_only_escalates() {
        assert_eq!(Status::Good.at_least(Status::Warn), Status::Warn);
        assert_eq!(Status::Fail.at_least(Status::Warn), Status::Fail);
        assert_eq!(Status::Warn.at_least(Status::Good), Status::Warn);
    }

    #[test]
    fn test_tally() {
        let report = Report::new(
            "https://example.com",
            vec![
                Finding::new("a", "A", Status::Good, "ok"),
                Finding::new("b", "B", Status::Warn, "hmm"),
                Finding::new("c", "C", Status::Good, "ok"),
                Finding::new("d", "D", Status::Fail, "bad"),
            ],
        );
        assert_eq!(report.tally(), Tally { good: 2, warn: 1, fail: 1 });
        assert!(report.has_failures());
        assert_eq!(report.card("b").map(|c| c.status), Some(Status::Warn));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Warn).unwrap(), "\"warn\"");
        let parsed: Status = serde_json::from_str("\"fail\"").unwrap();
        assert_eq!(parsed, Status::Fail);
    }

    #[test]
    fn test_percent_zero_denominator() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(9, 10), 90.0);
    }
}
