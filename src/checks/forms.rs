// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form label checker - WCAG 3.3.2 Labels or Instructions (Level A)
//!
//! A control counts as labeled when any of these holds:
//! - non-empty `aria-label`
//! - an `aria-labelledby` attribute
//! - an `id` referenced by some `<label for>`
//! - a wrapping `<label>` ancestor
//!
//! Hidden inputs are left out of the totals.

use crate::checks::Checker;
use crate::document::{Document, Node};
use crate::finding::{percent, Finding, Status};
use crate::lines::hint_suffix;
use std::collections::HashSet;

const CONTROL_TAGS: &[&str] = &["input", "select", "textarea"];
/// Percentage of labeled controls needed for `good`
pub const GOOD_PERCENT: f64 = 95.0;
/// Percentage of labeled controls needed for `warn`
pub const WARN_PERCENT: f64 = 70.0;
const MAX_UNLABELED_LISTED: usize = 10;

/// Checks form controls for accessible labels
pub struct FormLabelChecker;

impl Checker for FormLabelChecker {
    fn id(&self) -> &'static str {
        "form-labels"
    }

    fn name(&self) -> &'static str {
        "Form labels"
    }

    fn check(&self, document: &Document, _source_url: &str) -> anyhow::Result<Finding> {
        let controls: Vec<Node<'_>> = document
            .find_all(CONTROL_TAGS)?
            .into_iter()
            .filter(|c| !is_hidden_input(c))
            .collect();

        if controls.is_empty() {
            return Ok(Finding::new(
                self.id(),
                "Form controls have labels",
                Status::Warn,
                "No form controls found.",
            ));
        }

        let label_targets: HashSet<&str> = document
            .find_all(&["label"])?
            .iter()
            .filter_map(|l| l.attr("for").value())
            .collect();

        let unlabeled: Vec<&Node<'_>> = controls
            .iter()
            .filter(|c| !is_labeled(c, &label_targets))
            .collect();
        let labeled = controls.len() - unlabeled.len();

        let pct = percent(labeled, controls.len());
        let status = Status::from_percent(pct, GOOD_PERCENT, WARN_PERCENT);

        let mut details = vec![
            format!("Form controls: {}", controls.len()),
            format!("Labeled: {} ({:.0}%)", labeled, pct),
        ];
        details.extend(unlabeled.iter().take(MAX_UNLABELED_LISTED).map(|c| {
            format!(
                "Unlabeled control: {}{}",
                control_identifier(c),
                hint_suffix(c.line_hint())
            )
        }));

        let mut card = Finding::new(
            self.id(),
            "Form controls have labels",
            status,
            "Checked whether inputs/selects/textareas have labels.",
        )
        .with_details(details);

        if status != Status::Good {
            card = card.with_recommendation(
                "Associate each control with a <label for=\"id\"> or wrap the input in a <label>.",
            );
        }

        Ok(card)
    }
}

fn is_hidden_input(node: &Node<'_>) -> bool {
    node.tag_name() == "input"
        && node
            .attr("type")
            .value()
            .map(|t| t.eq_ignore_ascii_case("hidden"))
            .unwrap_or(false)
}

/// Whether a control has an accessible name by one of the accepted routes
pub fn is_labeled(control: &Node<'_>, label_targets: &HashSet<&str>) -> bool {
    if control.attr("aria-label").value().is_some() {
        return true;
    }
    if control.attr("aria-labelledby").is_present() {
        return true;
    }
    if let Some(id) = control.attr("id").value() {
        if label_targets.contains(id) {
            return true;
        }
    }
    control.has_ancestor("label")
}

/// Name, else id, else a placeholder
fn control_identifier<'a>(control: &Node<'a>) -> &'a str {
    control
        .attr("name")
        .value()
        .or_else(|| control.attr("id").value())
        .unwrap_or("unnamed field")
}
