// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report rendering and persistence.
//!
//! Supports multiple output formats:
//! - JSON: every card field verbatim, for programmatic consumption
//! - Markdown: headed report with one section per card
//! - Text: console cards with traffic light glyphs
//!
//! Renderers are pure functions of a [`Report`].

use crate::error::Result;
use crate::finding::{Finding, Report};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

const REPORT_HEADING: &str = "AccessCheck – Accessibility Analyzer";
const RULE_WIDTH: usize = 72;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured JSON
    Json,
    /// Markdown document
    Markdown,
    /// Human-readable console text
    Text,
}

impl OutputFormat {
    /// File extension used when saving
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render a report in the given format
pub fn render(report: &Report, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Markdown => render_markdown(report),
        OutputFormat::Text => render_text(report),
    }
}

/// Pretty-printed JSON: `{ "url", "cards": [...] }`
pub fn render_json(report: &Report) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize report: {}\"}}", e)
    })
}

/// Markdown report with a summary header and one section per card
pub fn render_markdown(report: &Report) -> String {
    let tally = report.tally();
    let mut lines = vec![
        format!("# {}", REPORT_HEADING),
        format!("**URL:** {}", report.url),
        format!(
            "**Summary:** 🟢 {}  🟡 {}  🔴 {}",
            tally.good, tally.warn, tally.fail
        ),
        String::new(),
        "---".to_string(),
        String::new(),
    ];

    for card in &report.cards {
        lines.push(card_markdown(card));
        lines.push(String::new());
    }

    lines.join("\n")
}

fn card_markdown(card: &Finding) -> String {
    let mut md = vec![
        format!("### {} {}", card.status.glyph(), card.title),
        format!("**Status:** {}", card.status),
        format!("**Summary:** {}", card.summary),
    ];
    if !card.details.is_empty() {
        md.push("**Details:**".to_string());
        md.extend(card.details.iter().map(|d| format!("- {}", d)));
    }
    if let Some(ref rec) = card.recommendation {
        md.push(format!("**Recommendation:** {}", rec));
    }
    md.join("\n")
}

/// Console cards
pub fn render_text(report: &Report) -> String {
    let tally = report.tally();
    let rule = "=".repeat(RULE_WIDTH);
    let mut output = String::new();

    output.push_str(&rule);
    output.push('\n');
    output.push_str(&format!("AccessCheck results for {}\n", report.url));
    output.push_str(&format!(
        "Summary: 🟢 {}  🟡 {}  🔴 {}\n",
        tally.good, tally.warn, tally.fail
    ));
    output.push_str(&rule);
    output.push_str("\n\n");

    for card in &report.cards {
        output.push_str(&format!(
            "{} {}  [{}]\n",
            card.status.glyph(),
            card.title,
            card.status
        ));
        output.push_str(&format!("  {}\n", card.summary));
        for detail in &card.details {
            output.push_str(&format!("  - {}\n", detail));
        }
        if let Some(ref rec) = card.recommendation {
            output.push_str(&format!("  Recommendation: {}\n", rec));
        }
        output.push('\n');
    }

    output
}

/// Write `report.<ext>` for each format into `dir`, creating it if needed
pub fn save_report(report: &Report, dir: &Path, formats: &[OutputFormat]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = dir.join(format!("report.{}", format.extension()));
        std::fs::write(&path, render(report, *format))?;
        info!("Saved {} report -> {}", format, path.display());
        written.push(path);
    }

    Ok(written)
}
