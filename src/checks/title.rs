// SPDX-License-Identifier: PMPL-1.0-or-later
//! Page title checker - WCAG 2.4.2 Page Titled
//!
//! The first `<title>` must have non-empty text.

use crate::checks::Checker;
use crate::document::Document;
use crate::finding::{Finding, Status};

/// Longest title shown in the card
const MAX_TITLE_CHARS: usize = 80;

/// Checks for a non-empty `<title>`
pub struct TitleChecker;

impl Checker for TitleChecker {
    fn id(&self) -> &'static str {
        "title"
    }

    fn name(&self) -> &'static str {
        "Page title"
    }

    fn check(&self, document: &Document, _source_url: &str) -> anyhow::Result<Finding> {
        let title = document
            .find_first("title")?
            .map(|t| t.text(false).trim().to_string())
            .unwrap_or_default();

        if title.is_empty() {
            return Ok(Finding::new(
                self.id(),
                "Missing <title>",
                Status::Fail,
                "No <title> element found.",
            )
            .with_recommendation("Add a clear, concise <title> describing the page."));
        }

        let shown: String = title.chars().take(MAX_TITLE_CHARS).collect();
        Ok(Finding::new(
            self.id(),
            "Page has a descriptive <title>",
            Status::Good,
            "The page has a title element.",
        )
        .with_detail(format!("Title: “{}”", shown)))
    }
}
