// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility checkers and the runner that executes them.
//!
//! Each checker is a pure function of the parsed document and the source URL
//! and produces exactly one card. The runner executes them in registration
//! order and isolates failures so one broken checker cannot sink the report.

pub mod alt_text;
pub mod forms;
pub mod headings;
pub mod language;
pub mod links;
pub mod title;
pub mod viewport;

use crate::document::Document;
use crate::finding::{Finding, Status};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Trait implemented by all checkers
pub trait Checker: Send + Sync {
    /// Stable short key used as the card id
    fn id(&self) -> &'static str;

    /// Human-readable name of this checker
    fn name(&self) -> &'static str;

    /// Inspect the document and produce one card
    fn check(&self, document: &Document, source_url: &str) -> anyhow::Result<Finding>;
}

/// Ordered set of checkers
pub struct CheckRunner {
    checkers: Vec<Box<dyn Checker>>,
}

impl Default for CheckRunner {
    fn default() -> Self {
        Self::standard()
    }
}

impl CheckRunner {
    /// Runner with no checkers registered
    pub fn empty() -> Self {
        Self { checkers: Vec::new() }
    }

    /// The built-in battery, in report order
    pub fn standard() -> Self {
        Self::empty()
            .with_checker(Box::new(title::TitleChecker))
            .with_checker(Box::new(language::LanguageChecker))
            .with_checker(Box::new(alt_text::AltTextChecker))
            .with_checker(Box::new(links::LinkTextChecker))
            .with_checker(Box::new(headings::HeadingsChecker))
            .with_checker(Box::new(forms::FormLabelChecker))
            .with_checker(Box::new(viewport::ViewportChecker))
    }

    /// Register a checker after the existing ones
    pub fn with_checker(mut self, checker: Box<dyn Checker>) -> Self {
        self.checkers.push(checker);
        self
    }

    /// Ids of registered checkers, in order
    pub fn ids(&self) -> Vec<&'static str> {
        self.checkers.iter().map(|c| c.id()).collect()
    }

    /// Run every checker against the document, one card each
    pub fn run(&self, document: &Document, source_url: &str) -> Vec<Finding> {
        self.checkers
            .iter()
            .map(|checker| run_isolated(checker.as_ref(), document, source_url))
            .collect()
    }
}

/// Run one checker, turning errors and panics into a `warn` card
fn run_isolated(checker: &dyn Checker, document: &Document, source_url: &str) -> Finding {
    debug!("Running checker: {}", checker.id());

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| checker.check(document, source_url)));

    let reason = match outcome {
        Ok(Ok(finding)) => {
            debug!("{} -> {}", checker.id(), finding.status);
            return finding;
        }
        Ok(Err(e)) => format!("{:#}", e),
        Err(payload) => panic_message(payload.as_ref()),
    };

    warn!("Checker {} failed: {}", checker.id(), reason);
    checker_failure(checker, &reason)
}

/// Synthetic card standing in for a checker that could not finish
fn checker_failure(checker: &dyn Checker, reason: &str) -> Finding {
    Finding::new(
        checker.id(),
        &format!("{} (error)", checker.name()),
        Status::Warn,
        "Checker failed to run.",
    )
    .with_detail(reason)
    .with_recommendation("Try again or simplify the page.")
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {}", s)
    } else {
        "panic: <non-string payload>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ErrChecker;

    impl Checker for ErrChecker {
        fn id(&self) -> &'static str {
            "always-err"
        }

        fn name(&self) -> &'static str {
            "Always errors"
        }

        fn check(&self, _document: &Document, _source_url: &str) -> anyhow::Result<Finding> {
            anyhow::bail!("selector engine exploded")
        }
    }

    struct BadSelectorChecker;

    impl Checker for BadSelectorChecker {
        fn id(&self) -> &'static str {
            "bad-selector"
        }

        fn name(&self) -> &'static str {
            "Bad selector"
        }

        fn check(&self, document: &Document, _source_url: &str) -> anyhow::Result<Finding> {
            let hits = document.select("img[=alt]")?;
            Ok(Finding::new(self.id(), "Unreachable", Status::Good, &hits.len().to_string()))
        }
    }

    struct PanicChecker;

    impl Checker for PanicChecker {
        fn id(&self) -> &'static str {
            "always-panic"
        }

        fn name(&self) -> &'static str {
            "Always panics"
        }

        fn check(&self, _document: &Document, _source_url: &str) -> anyhow::Result<Finding> {
            panic!("index out of range")
        }
    }

    #[test]
    fn test_standard_order() {
        assert_eq!(
            CheckRunner::standard().ids(),
            vec!["title", "lang", "img-alt", "link-text", "headings", "form-labels", "viewport"]
        );
    }

    #[test]
    fn test_one_card_per_checker() {
        let doc = Document::parse("");
        let cards = CheckRunner::standard().run(&doc, "https://example.com");
        let ids: Vec<_> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, CheckRunner::standard().ids());
    }

    #[test]
    fn test_error_becomes_warn_card() {
        let doc = Document::parse("<title>x</title>");
        let runner = CheckRunner::empty()
            .with_checker(Box::new(ErrChecker))
            .with_checker(Box::new(title::TitleChecker));
        let cards = runner.run(&doc, "https://example.com");

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, "always-err");
        assert_eq!(cards[0].status, Status::Warn);
        assert_eq!(cards[0].title, "Always errors (error)");
        assert_eq!(cards[0].summary, "Checker failed to run.");
        assert!(cards[0].details[0].contains("selector engine exploded"));
        assert!(cards[0].recommendation.is_some());
        assert_eq!(cards[1].id, "title");
        assert_eq!(cards[1].status, Status::Good);
    }

    #[test]
    fn test_panic_becomes_warn_card() {
        let doc = Document::parse("");
        let runner = CheckRunner::standard().with_checker(Box::new(PanicChecker));
        let cards = runner.run(&doc, "https://example.com");

        assert_eq!(cards.len(), 8);
        let last = cards.last().unwrap();
        assert_eq!(last.id, "always-panic");
        assert_eq!(last.status, Status::Warn);
        assert!(last.details[0].contains("index out of range"));
    }

    #[test]
    fn test_selector_error_becomes_warn_card() {
        let doc = Document::parse("<img alt=\"x\">");
        let cards = CheckRunner::empty()
            .with_checker(Box::new(BadSelectorChecker))
            .run(&doc, "https://example.com");

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "bad-selector");
        assert_eq!(cards[0].status, Status::Warn);
        assert!(cards[0].details[0].contains("Invalid selector `img[=alt]`"));
    }
}
