// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text checker - WCAG 1.1.1 Non-text Content (Level A)
//!
//! Every `<img>` falls into one of three buckets:
//! - non-empty `alt` (informative image with a description)
//! - empty `alt=""` (valid for decorative images, but not counted as described)
//! - no `alt` attribute at all
//!
//! The share of described images decides the status.

use crate::checks::Checker;
use crate::document::{Attr, Document};
use crate::finding::{percent, Finding, Status};
use crate::lines::hint_suffix;

/// Percentage of described images needed for `good`
pub const GOOD_PERCENT: f64 = 95.0;
/// Percentage of described images needed for `warn`
pub const WARN_PERCENT: f64 = 70.0;
/// Images without alt listed as evidence
const MAX_EXAMPLES: usize = 10;

/// Checks `<img>` alt attributes
pub struct AltTextChecker;

impl Checker for AltTextChecker {
    fn id(&self) -> &'static str {
        "img-alt"
    }

    fn name(&self) -> &'static str {
        "Image alt text"
    }

    fn check(&self, document: &Document, _source_url: &str) -> anyhow::Result<Finding> {
        let images = document.find_all(&["img"])?;
        let total = images.len();

        if total == 0 {
            return Ok(Finding::new(
                self.id(),
                "Images have alt text",
                Status::Good,
                "No images found.",
            ));
        }

        let mut described = 0;
        let mut empty = 0;
        let mut missing = Vec::new();

        for img in &images {
            match img.attr("alt") {
                Attr::Value(_) => described += 1,
                Attr::Empty => empty += 1,
                Attr::Absent => missing.push(*img),
            }
        }

        let pct = percent(described, total);
        let status = Status::from_percent(pct, GOOD_PERCENT, WARN_PERCENT);

        let mut details = vec![
            format!("Images total: {}", total),
            format!("With non-empty alt: {} ({:.0}%)", described, pct),
            format!("With empty alt: {} ({:.0}%)", empty, percent(empty, total)),
            format!(
                "Missing alt: {} ({:.0}%)",
                missing.len(),
                percent(missing.len(), total)
            ),
        ];
        details.extend(missing.iter().take(MAX_EXAMPLES).map(|img| {
            let src = img.attr("src").value().unwrap_or("no src");
            format!("Image without alt: {}{}", src, hint_suffix(img.line_hint()))
        }));

        let mut card = Finding::new(
            self.id(),
            "Images have alt text",
            status,
            "Checked for non-empty alt attributes on <img>.",
        )
        .with_details(details);

        if status != Status::Good {
            card = card.with_recommendation(
                "Ensure informative images have meaningful alt; decorative images may use empty alt (alt=\"\").",
            );
        }

        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(described: usize, empty: usize, missing: usize) -> String {
        let mut html = String::from("<html><body>");
        for i in 0..described {
            html.push_str(&format!("<img src=\"d{i}.png\" alt=\"Chart {i}\">"));
        }
        for i in 0..empty {
            html.push_str(&format!("<img src=\"e{i}.png\" alt=\"\">"));
        }
        for i in 0..missing {
            html.push_str(&format!("<img src=\"m{i}.png\">"));
        }
        html.push_str("</body></html>");
        html
    }

    fn run(html: &str) -> Finding {
        AltTextChecker
            .check(&Document::parse(html), "https://example.com")
            .unwrap()
    }

    #[test]
    fn test_no_images_is_good() {
        let card = run("<html><body><p>text</p></body></html>");
        assert_eq!(card.status, Status::Good);
        assert_eq!(card.summary, "No images found.");
    }

    #[test]
    fn test_all_described_is_good() {
        let card = run(&page(10, 0, 0));
        assert_eq!(card.status, Status::Good);
        assert!(card.recommendation.is_none());
    }

    #[test]
    fn test_ninety_percent_is_warn() {
        let card = run(&page(9, 0, 1));
        assert_eq!(card.status, Status::Warn);
        assert!(card.details.contains(&"With non-empty alt: 9 (90%)".to_string()));
        assert!(card.details.contains(&"Missing alt: 1 (10%)".to_string()));
        assert!(card.details.contains(&"Image without alt: m0.png".to_string()));
        assert!(card.recommendation.is_some());
    }

    #[test]
    fn test_sixty_percent_is_fail() {
        let card = run(&page(6, 2, 2));
        assert_eq!(card.status, Status::Fail);
        assert!(card.details.contains(&"With empty alt: 2 (20%)".to_string()));
    }

    #[test]
    fn test_boundaries() {
        // 19/20 = 95%
        assert_eq!(run(&page(19, 1, 0)).status, Status::Good);
        // 7/10 = 70%
        assert_eq!(run(&page(7, 0, 3)).status, Status::Warn);
        // 69/100
        assert_eq!(run(&page(69, 0, 31)).status, Status::Fail);
    }

    #[test]
    fn test_empty_alt_not_counted_as_described() {
        let card = run(&page(0, 3, 0));
        assert_eq!(card.status, Status::Fail);
        assert!(card.details.contains(&"Missing alt: 0 (0%)".to_string()));
    }

    #[test]
    fn test_examples_bounded() {
        let card = run(&page(0, 0, 25));
        let examples = card
            .details
            .iter()
            .filter(|d| d.starts_with("Image without alt:"))
            .count();
        assert_eq!(examples, 10);
    }
}
