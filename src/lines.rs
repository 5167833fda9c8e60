// SPDX-License-Identifier: PMPL-1.0-or-later
//! Source line locator.
//!
//! An optional pass over raw markup, run before parsing, that stamps each
//! opening tag with the line it started on. The parser keeps the stamp as an
//! ordinary attribute, so checkers that want locations read it back through
//! [`crate::document::Node::line_hint`] and the rest ignore it.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Attribute used to carry the source line
pub const LINE_ATTR: &str = "data-accesscheck-line";

/// Elements whose contents are raw text, not markup
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "title", "textarea"];

/// Opening tag on a single line. Quoted attribute values may contain `>`.
static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([A-Za-z][A-Za-z0-9-]*)((?:[^>"']|"[^"]*"|'[^']*')*?)(\s*/?)>"#)
        .expect("valid open tag regex")
});

/// A stamp as written by [`annotate_lines`], leading space included
static LINE_STAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"\s{}="\d+""#, regex::escape(LINE_ATTR)))
        .expect("valid line stamp regex")
});

/// Where a node came from in the source markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineHint {
    /// The element itself was annotated
    Exact(usize),
    /// Taken from the closest annotated ancestor
    Near(usize),
}

impl std::fmt::Display for LineHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineHint::Exact(line) => write!(f, " (line {})", line),
            LineHint::Near(line) => write!(f, " (near line {})", line),
        }
    }
}

/// Render an optional hint, empty when absent
pub fn hint_suffix(hint: Option<LineHint>) -> String {
    hint.map(|h| h.to_string()).unwrap_or_default()
}

/// Stamp every single-line opening tag with its 1-based line number.
///
/// Closing tags, doctypes and tags that already carry the attribute are left
/// as they are. Tags spanning several lines are skipped, and nothing inside
/// comments or the raw text of `script`, `style`, `title` and `textarea` is
/// touched.
pub fn annotate_lines(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + markup.len() / 4);
    // Lowercase terminator being scanned for while inside raw text or a comment
    let mut skip_until: Option<String> = None;

    for (idx, line) in markup.split('\n').enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let lower = line.to_ascii_lowercase();
        let line_no = idx + 1;
        let mut pos = 0;

        while pos < line.len() {
            if let Some(end) = skip_until.as_deref() {
                match lower[pos..].find(end) {
                    Some(offset) => {
                        let stop = pos + offset + end.len();
                        out.push_str(&line[pos..stop]);
                        pos = stop;
                        skip_until = None;
                    }
                    None => {
                        out.push_str(&line[pos..]);
                        pos = line.len();
                    }
                }
                continue;
            }

            let comment = lower[pos..].find("<!--").map(|offset| pos + offset);
            let tag = OPEN_TAG.captures_at(line, pos);
            let tag_span = tag
                .as_ref()
                .and_then(|caps| caps.get(0))
                .map(|m| (m.start(), m.end()));

            match (comment, tag_span) {
                (Some(start), span) if span.map_or(true, |(tag_start, _)| start < tag_start) => {
                    let stop = start + "<!--".len();
                    out.push_str(&line[pos..stop]);
                    pos = stop;
                    skip_until = Some("-->".to_string());
                }
                (_, Some((start, end))) => {
                    out.push_str(&line[pos..start]);
                    if let Some(caps) = tag {
                        out.push_str(&stamp(&caps, line_no));
                        let name = caps[1].to_ascii_lowercase();
                        if RAW_TEXT_TAGS.contains(&name.as_str()) && !caps[3].contains('/') {
                            skip_until = Some(format!("</{}", name));
                        }
                    }
                    pos = end;
                }
                _ => {
                    out.push_str(&line[pos..]);
                    pos = line.len();
                }
            }
        }
    }

    out
}

fn stamp(caps: &Captures<'_>, line_no: usize) -> String {
    let attrs = &caps[2];
    if attrs.to_ascii_lowercase().contains(LINE_ATTR) {
        return caps[0].to_string();
    }
    format!(
        "<{}{} {}=\"{}\"{}>",
        &caps[1], attrs, LINE_ATTR, line_no, &caps[3]
    )
}

/// Remove locator stamps from serialized markup
pub fn strip_line_attrs(html: &str) -> String {
    LINE_STAMP.replace_all(html, "").into_owned()
}
