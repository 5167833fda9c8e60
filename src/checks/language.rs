// SPDX-License-Identifier: PMPL-1.0-or-later
//! Language checker - WCAG 3.1.1 Language of Page
//!
//! A missing `lang` on `<html>` is reported as a warning, not a failure.

use crate::checks::Checker;
use crate::document::Document;
use crate::finding::{Finding, Status};

/// Checks for `html[lang]`
pub struct LanguageChecker;

impl Checker for LanguageChecker {
    fn id(&self) -> &'static str {
        "lang"
    }

    fn name(&self) -> &'static str {
        "Document language"
    }

    fn check(&self, document: &Document, _source_url: &str) -> anyhow::Result<Finding> {
        match document.root().attr("lang").value() {
            Some(lang) => Ok(Finding::new(
                self.id(),
                "Document language is declared",
                Status::Good,
                &format!("html[lang='{}'] is set.", lang),
            )),
            None => Ok(Finding::new(
                self.id(),
                "Missing document language",
                Status::Warn,
                "html[lang] is not set.",
            )
            .with_recommendation(
                "Add a language code to <html lang=\"en\"> (or appropriate).",
            )),
        }
    }
}
