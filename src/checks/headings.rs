// SPDX-License-Identifier: PMPL-1.0-or-later
//! Heading structure checker - WCAG 1.3.1 Info and Relationships
//!
//! Headings are walked in document order. Going down more than one level at a
//! time (h1 -> h3) is a jump. Zero or several `h1` elements are flagged too.
//! This check tops out at `warn`.

use crate::checks::Checker;
use crate::document::Document;
use crate::error::Result;
use crate::finding::{Finding, Status};
use crate::lines::{hint_suffix, LineHint};

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
const MAX_HEADING_CHARS: usize = 80;
const PREVIEW_COUNT: usize = 3;

/// A heading in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub line: Option<LineHint>,
}

/// Checks heading order and the presence of a single h1
pub struct HeadingsChecker;

impl Checker for HeadingsChecker {
    fn id(&self) -> &'static str {
        "headings"
    }

    fn name(&self) -> &'static str {
        "Heading structure"
    }

    fn check(&self, document: &Document, _source_url: &str) -> anyhow::Result<Finding> {
        let headings = collect_headings(document)?;

        if headings.is_empty() {
            return Ok(Finding::new(
                self.id(),
                "Heading structure",
                Status::Warn,
                "No headings (h1–h6) found.",
            )
            .with_detail("No headings found.")
            .with_recommendation("Use headings to structure content; start with a single h1."));
        }

        let jumps = level_jumps(&headings);
        let mut warnings = jumps.clone();
        let mut status = if jumps.is_empty() {
            Status::Good
        } else {
            Status::Warn
        };

        let h1_count = headings.iter().filter(|h| h.level == 1).count();
        if h1_count != 1 {
            status = status.at_least(Status::Warn);
        }
        match h1_count {
            0 => warnings.push("No h1 present.".to_string()),
            1 => {}
            n => {
                let locations: String = headings
                    .iter()
                    .filter(|h| h.level == 1)
                    .filter_map(|h| h.line)
                    .map(|l| l.to_string())
                    .collect();
                warnings.push(format!(
                    "{} h1 headings found; usually only one is recommended.{}",
                    n, locations
                ));
            }
        }

        let mut details = vec![format!(
            "{} headings found. First {}:",
            headings.len(),
            PREVIEW_COUNT.min(headings.len())
        )];
        details.extend(
            headings
                .iter()
                .take(PREVIEW_COUNT)
                .map(|h| format!("h{}: “{}”", h.level, h.text)),
        );
        details.extend(warnings);

        let mut card = Finding::new(
            self.id(),
            "Heading structure",
            status,
            "Checked heading order and presence of h1.",
        )
        .with_details(details);

        if !jumps.is_empty() {
            card = card.with_recommendation(
                "Avoid skipping levels (e.g., h1 → h3). Nest sections in order.",
            );
        } else if h1_count != 1 {
            card = card.with_recommendation("Use exactly one h1 for the main page heading.");
        }

        Ok(card)
    }
}

/// All h1-h6 elements in document order
pub fn collect_headings(document: &Document) -> Result<Vec<Heading>> {
    let headings = document
        .find_all(HEADING_TAGS)?
        .iter()
        .filter_map(|node| {
            let level = node.tag_name().strip_prefix('h')?.parse::<u8>().ok()?;
            Some(Heading {
                level,
                text: node.text(true).chars().take(MAX_HEADING_CHARS).collect(),
                line: node.line_hint(),
            })
        })
        .collect();
    Ok(headings)
}

/// One message per downward jump of more than one level
pub fn level_jumps(headings: &[Heading]) -> Vec<String> {
    headings
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[1].level > pair[0].level + 1)
        .map(|(i, pair)| {
            format!(
                "Heading jump at position {}: h{} -> h{}{}",
                i + 2,
                pair[0].level,
                pair[1].level,
                hint_suffix(pair[1].line)
            )
        })
        .collect()
}
