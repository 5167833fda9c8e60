// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document model adapter over `scraper`.
//!
//! Parsing is lenient: html5ever repairs whatever it is given, so every input
//! yields a tree (possibly just an empty `<html>` shell). Checkers only see
//! the query primitives below and never mutate the tree.

use crate::error::{AccessCheckError, Result};
use crate::lines::{self, LineHint, LINE_ATTR};
use scraper::{ElementRef, Html, Selector};

/// Upper bound on ancestor walks
pub const MAX_ANCESTOR_DEPTH: usize = 512;

/// Three-way attribute lookup result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr<'a> {
    /// Attribute not present on the element
    Absent,
    /// Present but empty or whitespace only
    Empty,
    /// Present with content (trimmed)
    Value(&'a str),
}

impl<'a> Attr<'a> {
    /// Whether the attribute exists at all
    pub fn is_present(&self) -> bool {
        !matches!(self, Attr::Absent)
    }

    /// Trimmed non-empty value, if any
    pub fn value(&self) -> Option<&'a str> {
        match *self {
            Attr::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Parsed, immutable page
pub struct Document {
    html: Html,
    track_lines: bool,
}

impl Document {
    /// Parse raw markup into a document
    pub fn parse(markup: &str) -> Self {
        Self::build(markup, false)
    }

    /// Stamp source lines onto the markup, then parse it.
    ///
    /// Only documents built here report [`Node::line_hint`].
    pub fn parse_with_lines(markup: &str) -> Self {
        Self::build(&lines::annotate_lines(markup), true)
    }

    fn build(markup: &str, track_lines: bool) -> Self {
        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            tracing::debug!("Parser repaired {} markup error(s)", html.errors.len());
        }
        Self { html, track_lines }
    }

    fn node<'a>(&self, element: ElementRef<'a>) -> Node<'a> {
        Node {
            element,
            track_lines: self.track_lines,
        }
    }

    /// The document's `<html>` element
    pub fn root(&self) -> Node<'_> {
        self.node(self.html.root_element())
    }

    /// All elements matching a CSS selector, in document order
    pub fn select(&self, selectors: &str) -> Result<Vec<Node<'_>>> {
        let selector = parse_selector(selectors)?;
        Ok(self
            .html
            .select(&selector)
            .map(|element| self.node(element))
            .collect())
    }

    /// All elements whose tag is one of `tags`, in document order
    pub fn find_all(&self, tags: &[&str]) -> Result<Vec<Node<'_>>> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }
        self.select(&tags.join(", "))
    }

    /// First element with the given tag
    pub fn find_first(&self, tag: &str) -> Result<Option<Node<'_>>> {
        let selector = parse_selector(tag)?;
        Ok(self.html.select(&selector).next().map(|e| self.node(e)))
    }

    /// First element with the given tag whose `attr` equals `value`,
    /// ASCII case-insensitively
    pub fn find_first_with_attr(&self, tag: &str, attr: &str, value: &str) -> Result<Option<Node<'_>>> {
        let css = format!("{}[{}=\"{}\" i]", tag, attr, escape_css_string(value));
        let selector = parse_selector(&css)?;
        Ok(self.html.select(&selector).next().map(|e| self.node(e)))
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| AccessCheckError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

fn escape_css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Element handle borrowed from a [`Document`]
#[derive(Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
    track_lines: bool,
}

impl<'a> Node<'a> {
    /// Lowercase tag name
    pub fn tag_name(&self) -> &'a str {
        self.element.value().name()
    }

    /// Raw attribute value, untrimmed
    pub fn attr_raw(&self, name: &str) -> Option<&'a str> {
        let name = name.to_ascii_lowercase();
        self.element.value().attr(&name)
    }

    /// Attribute lookup distinguishing absent, empty and non-empty
    pub fn attr(&self, name: &str) -> Attr<'a> {
        match self.attr_raw(name) {
            None => Attr::Absent,
            Some(v) if v.trim().is_empty() => Attr::Empty,
            Some(v) => Attr::Value(v.trim()),
        }
    }

    /// Text content of the element and its descendants.
    ///
    /// With `collapse`, text fragments are joined and every whitespace run
    /// becomes a single space, trimmed at both ends.
    pub fn text(&self, collapse: bool) -> String {
        if collapse {
            let joined = self.element.text().collect::<Vec<_>>().join(" ");
            joined.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            self.element.text().collect()
        }
    }

    /// Ancestor elements, nearest first, bounded by [`MAX_ANCESTOR_DEPTH`]
    pub fn ancestors(&self) -> impl Iterator<Item = Node<'a>> {
        let track_lines = self.track_lines;
        self.element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .take(MAX_ANCESTOR_DEPTH)
            .map(move |element| Node {
                element,
                track_lines,
            })
    }

    /// Whether some ancestor has the given tag
    pub fn has_ancestor(&self, tag: &str) -> bool {
        self.ancestors()
            .any(|a| a.tag_name().eq_ignore_ascii_case(tag))
    }

    /// Source line recorded by the line locator, if the document tracks lines
    pub fn source_line(&self) -> Option<usize> {
        if !self.track_lines {
            return None;
        }
        self.attr_raw(LINE_ATTR)
            .and_then(|v| v.trim().parse().ok())
    }

    /// Own source line, else the nearest annotated ancestor's
    pub fn line_hint(&self) -> Option<LineHint> {
        if let Some(line) = self.source_line() {
            return Some(LineHint::Exact(line));
        }
        self.ancestors()
            .find_map(|a| a.source_line())
            .map(LineHint::Near)
    }

    /// Serialized outer HTML, without line locator stamps
    pub fn outer_html(&self) -> String {
        let html = self.element.html();
        if self.track_lines {
            lines::strip_line_attrs(&html)
        } else {
            html
        }
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.tag_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_three_states() {
        let doc = Document::parse(
            r#"<html><body><img src="a.png"><img alt=""><img alt="  "><img alt=" Logo "></body></html>"#,
        );
        let imgs = doc.find_all(&["img"]).unwrap();
        assert_eq!(imgs.len(), 4);
        assert_eq!(imgs[0].attr("alt"), Attr::Absent);
        assert_eq!(imgs[1].attr("alt"), Attr::Empty);
        assert_eq!(imgs[2].attr("alt"), Attr::Empty);
        assert_eq!(imgs[3].attr("alt"), Attr::Value("Logo"));
        assert!(imgs[1].attr("alt").is_present());
    }

    #[test]
    fn test_find_all_document_order() {
        let doc = Document::parse("<h2>b</h2><h1>a</h1><h3>c</h3>");
        let tags: Vec<_> = doc
            .find_all(&["h1", "h2", "h3"])
            .unwrap()
            .iter()
            .map(|n| n.tag_name())
            .collect();
        assert_eq!(tags, vec!["h2", "h1", "h3"]);
    }

    #[test]
    fn test_find_all_no_tags() {
        let doc = Document::parse("<p>x</p>");
        assert!(doc.find_all(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_text_collapse() {
        let doc = Document::parse("<a href='#'>  Read\n   the <b>annual</b>   report </a>");
        let link = doc.find_first("a").unwrap().expect("link");
        assert_eq!(link.text(true), "Read the annual report");
        assert!(link.text(false).contains('\n'));
    }

    #[test]
    fn test_find_first_with_attr_case_insensitive() {
        let doc = Document::parse(
            r#"<html><head><meta name="Viewport" content="width=device-width"></head></html>"#,
        );
        assert!(doc.find_first_with_attr("meta", "name", "viewport").unwrap().is_some());
        assert!(doc.find_first_with_attr("meta", "name", "description").unwrap().is_none());
    }

    #[test]
    fn test_find_first_with_attr_quotes_value() {
        let doc = Document::parse(r#"<p title='say "hi"'>x</p>"#);
        assert!(doc.find_first_with_attr("p", "title", r#"say "hi""#).unwrap().is_some());
    }

    #[test]
    fn test_invalid_selector_is_error() {
        let doc = Document::parse("<p>x</p>");
        let err = doc.select("p[=x]").unwrap_err();
        assert!(matches!(err, AccessCheckError::Selector { .. }));
        assert!(err.to_string().contains("p[=x]"));
    }

    #[test]
    fn test_ancestor_walk() {
        let doc = Document::parse("<label>Name <span><input name='n'></span></label>");
        let input = doc.find_first("input").unwrap().expect("input");
        assert!(input.has_ancestor("label"));
        assert!(input.has_ancestor("span"));
        assert!(!input.has_ancestor("form"));
    }

    #[test]
    fn test_malformed_markup_still_parses() {
        let doc = Document::parse("<html><body><p>unclosed <img src=x.png <div>");
        assert_eq!(doc.root().tag_name(), "html");
        assert!(doc.find_first("body").unwrap().is_some());
    }

    #[test]
    fn test_empty_markup_yields_tree() {
        let doc = Document::parse("");
        assert_eq!(doc.root().tag_name(), "html");
        assert!(doc.find_all(&["img"]).unwrap().is_empty());
    }

    #[test]
    fn test_line_hint() {
        let doc = Document::parse_with_lines("<div>\n<span>x</span></div>\n<p>y\n</p>");
        let span = doc.find_first("span").unwrap().expect("span");
        assert_eq!(span.line_hint(), Some(LineHint::Exact(2)));
        let p = doc.find_first("p").unwrap().expect("p");
        assert_eq!(p.line_hint(), Some(LineHint::Exact(3)));
    }

    #[test]
    fn test_near_line_from_ancestor() {
        let doc = Document::parse_with_lines("<div>\n<span\nclass=\"x\">x</span></div>");
        let span = doc.find_first("span").unwrap().expect("span");
        assert_eq!(span.line_hint(), Some(LineHint::Near(1)));
    }

    #[test]
    fn test_author_line_attribute_ignored_without_tracking() {
        let markup = format!(r#"<input name="q" {}="99">"#, LINE_ATTR);
        let doc = Document::parse(&markup);
        let input = doc.find_first("input").unwrap().expect("input");
        assert_eq!(input.line_hint(), None);
    }

    #[test]
    fn test_outer_html_omits_line_stamp() {
        let doc = Document::parse_with_lines("<head>\n<meta name=\"viewport\" content=\"width=device-width\">\n</head>");
        let meta = doc.find_first("meta").unwrap().expect("meta");
        assert_eq!(meta.source_line(), Some(2));
        assert_eq!(
            meta.outer_html(),
            r#"<meta name="viewport" content="width=device-width">"#
        );
    }

    #[test]
    fn test_outer_html_keeps_source_attribute_order() {
        let doc = Document::parse(r#"<meta name="viewport" content="width=device-width" id="vp" data-a="1" data-b="2" data-c="3">"#);
        let meta = doc.find_first("meta").unwrap().expect("meta");
        assert_eq!(
            meta.outer_html(),
            r#"<meta name="viewport" content="width=device-width" id="vp" data-a="1" data-b="2" data-c="3">"#
        );
    }
}
