// SPDX-License-Identifier: PMPL-1.0-or-later
//! Mobile viewport checker - WCAG 1.4.10 Reflow

use crate::checks::Checker;
use crate::document::Document;
use crate::finding::{Finding, Status};

/// Checks for `<meta name="viewport">`
pub struct ViewportChecker;

impl Checker for ViewportChecker {
    fn id(&self) -> &'static str {
        "viewport"
    }

    fn name(&self) -> &'static str {
        "Mobile viewport"
    }

    fn check(&self, document: &Document, _source_url: &str) -> anyhow::Result<Finding> {
        match document.find_first_with_attr("meta", "name", "viewport")? {
            Some(meta) => Ok(Finding::new(
                self.id(),
                "Mobile viewport set",
                Status::Good,
                "Meta viewport present.",
            )
            .with_detail(meta.outer_html())),
            None => Ok(Finding::new(
                self.id(),
                "Missing mobile viewport",
                Status::Warn,
                "No meta viewport tag found.",
            )
            .with_recommendation(
                "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"> for better mobile access.",
            )),
        }
    }
}
