// SPDX-License-Identifier: PMPL-1.0-or-later
//! Link text checker - WCAG 2.4.4 Link Purpose (In Context)
//!
//! Link text should make sense out of context. Empty text, very short text and
//! generic phrases like "click here" are counted as not meaningful.

use crate::checks::Checker;
use crate::document::{Document, Node};
use crate::finding::{percent, Finding, Status};
use crate::lines::hint_suffix;

/// Generic phrases that say nothing about the link target
const GENERIC_LINK_TEXT: &[&str] = &[
    "click here",
    "here",
    "more",
    "link",
    "learn more",
    "read more",
];

/// Links inspected per page
pub const MAX_LINKS_SCANNED: usize = 500;
/// Percentage of meaningful links needed for `good`
pub const GOOD_PERCENT: f64 = 90.0;
/// Percentage of meaningful links needed for `warn`
pub const WARN_PERCENT: f64 = 70.0;
/// Minimum characters for link text to count
const MIN_TEXT_CHARS: usize = 3;
const MAX_EXAMPLES: usize = 5;
const MAX_HREF_CHARS: usize = 50;

/// Checks `<a>` text for clarity
pub struct LinkTextChecker;

impl Checker for LinkTextChecker {
    fn id(&self) -> &'static str {
        "link-text"
    }

    fn name(&self) -> &'static str {
        "Link text"
    }

    fn check(&self, document: &Document, _source_url: &str) -> anyhow::Result<Finding> {
        let links = document.find_all(&["a"])?;
        let total = links.len();

        if total == 0 {
            return Ok(Finding::new(
                self.id(),
                "Links have meaningful text",
                Status::Warn,
                "No links found.",
            ));
        }

        let scanned = &links[..total.min(MAX_LINKS_SCANNED)];
        let mut meaningful = 0;
        let mut poor_examples = Vec::new();

        for link in scanned {
            let text = link.text(true);
            if is_meaningful_text(&text) {
                meaningful += 1;
            } else if poor_examples.len() < MAX_EXAMPLES {
                poor_examples.push(example_label(link, &text));
            }
        }

        let pct = percent(meaningful, total);
        let status = Status::from_percent(pct, GOOD_PERCENT, WARN_PERCENT);

        let mut card = Finding::new(
            self.id(),
            "Links have meaningful text",
            status,
            "Checked link text for clarity.",
        )
        .with_detail(format!("Links total: {}", total));

        if scanned.len() < total {
            card = card.with_detail(format!("Scanned first {} links", scanned.len()));
        }
        card = card.with_detail(format!("Meaningful text: {} ({:.0}%)", meaningful, pct));

        if !poor_examples.is_empty() {
            card = card.with_detail(format!(
                "Examples needing improvement: {}",
                poor_examples.join(", ")
            ));
        }

        if status != Status::Good {
            card = card.with_recommendation(
                "Use descriptive link text that makes sense out of context (avoid “click here” or bare URLs).",
            );
        }

        Ok(card)
    }
}

/// Whether collapsed link text describes its target
pub fn is_meaningful_text(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() || normalized.chars().count() < MIN_TEXT_CHARS {
        return false;
    }
    !GENERIC_LINK_TEXT.contains(&normalized.as_str())
}

/// Quoted sample for an offending link, falling back to its href
fn example_label(link: &Node<'_>, text: &str) -> String {
    let sample = if !text.is_empty() {
        text.to_string()
    } else {
        match link.attr("href").value() {
            Some(href) if href.chars().count() > MAX_HREF_CHARS => {
                let cut: String = href.chars().take(MAX_HREF_CHARS).collect();
                format!("{}…", cut)
            }
            Some(href) => href.to_string(),
            None => "no href".to_string(),
        }
    };
    format!("“{}”{}", sample, hint_suffix(link.line_hint()))
}
