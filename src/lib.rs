// SPDX-License-Identifier: PMPL-1.0-or-later
//! AccessCheck - heuristic web page accessibility analyzer
//!
//! Runs a fixed battery of checks over a parsed page and produces one
//! pass/warn/fail card per check, with evidence and a remediation hint.
//! The checks are approximations, not a WCAG conformance audit.
//!
//! ## Checks
//!
//! - **Title**: the page has a non-empty `<title>`
//! - **Language**: `<html lang>` is declared
//! - **Image alt**: share of `<img>` with non-empty alt text
//! - **Link text**: share of links with meaningful text
//! - **Headings**: heading order and a single h1
//! - **Form labels**: share of controls with an accessible label
//! - **Viewport**: a responsive `<meta name="viewport">`
//!
//! ## Pipeline
//!
//! markup -> (optional line annotation) -> [`document::Document`] ->
//! [`checks::CheckRunner`] -> [`finding::Report`] -> [`report`] renderers

pub mod checks;
pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod finding;
pub mod lines;
pub mod report;

pub use checks::{CheckRunner, Checker};
pub use config::AnalysisOptions;
pub use document::Document;
pub use error::{AccessCheckError, Result};
pub use finding::{Finding, Report, Status, Tally};
pub use report::{render_json, render_markdown, render_text, OutputFormat};

/// Analyze already-fetched markup with the standard checks
pub fn analyze(source_url: &str, markup: &str) -> Report {
    analyze_with(source_url, markup, &AnalysisOptions::default())
}

/// Analyze with explicit options
pub fn analyze_with(source_url: &str, markup: &str, options: &AnalysisOptions) -> Report {
    analyze_with_runner(source_url, markup, options, &CheckRunner::standard())
}

/// Analyze with a caller-supplied set of checkers
pub fn analyze_with_runner(
    source_url: &str,
    markup: &str,
    options: &AnalysisOptions,
    runner: &CheckRunner,
) -> Report {
    let document = if options.track_lines {
        Document::parse_with_lines(markup)
    } else {
        Document::parse(markup)
    };

    let cards = runner.run(&document, source_url);
    tracing::debug!("Analysis of {} produced {} cards", source_url, cards.len());
    Report::new(source_url, cards)
}
