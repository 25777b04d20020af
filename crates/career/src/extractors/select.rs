// ABOUTME: Selection-scoped selector helpers used by every extractor.
// ABOUTME: Resolves SelectorSpec values to text or attributes within a subtree.

//! Selector-based lookups inside a document subtree.
//!
//! All helpers work on a [`Selection`] so the same code serves the whole
//! document, a platform view, or a single stat row.
//!
//! - Text lookups collapse whitespace runs and trim.
//! - Attribute lookups trim the value.
//! - Empty results count as misses.
//! - A selector that fails to compile matches nothing.

use dom_query::{Document, Selection};

use crate::extractors::compiled::get_or_compile;
use crate::extractors::profile::SelectorSpec;

/// Collapses runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Wraps the document root so it can be searched like any other subtree.
pub fn document_root(doc: &Document) -> Selection<'_> {
    Selection::from(doc.root())
}

/// Returns every element under `root` matching `css`, in document order.
pub fn select_all<'a>(root: &Selection<'a>, css: &str) -> Vec<Selection<'a>> {
    let Some(matcher) = get_or_compile(css) else {
        return Vec::new();
    };
    root.select_matcher(&matcher)
        .nodes()
        .iter()
        .cloned()
        .map(Selection::from)
        .collect()
}

/// Returns the first element under `root` matching `css`.
pub fn select_first<'a>(root: &Selection<'a>, css: &str) -> Option<Selection<'a>> {
    let matcher = get_or_compile(css)?;
    root.select_matcher(&matcher)
        .nodes()
        .first()
        .cloned()
        .map(Selection::from)
}

/// Whitespace-normalized text of an element; `None` when empty.
pub fn element_text(el: &Selection) -> Option<String> {
    let text = normalize_whitespace(&el.text());
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Trimmed attribute value of an element; `None` when missing or empty.
pub fn element_attr(el: &Selection, attr: &str) -> Option<String> {
    let value = el.attr(attr)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Text of the first element under `root` matching `css`.
pub fn first_text(root: &Selection, css: &str) -> Option<String> {
    select_first(root, css).and_then(|el| element_text(&el))
}

/// Resolves a selector spec against `root`: text for `Css`, attribute for `CssAttr`.
pub fn extract_spec(root: &Selection, spec: &SelectorSpec) -> Option<String> {
    match spec {
        SelectorSpec::Css(css) => first_text(root, css),
        SelectorSpec::CssAttr(parts) => match parts.as_slice() {
            [css, attr, ..] => select_first(root, css).and_then(|el| element_attr(&el, attr)),
            [css] => first_text(root, css),
            [] => None,
        },
    }
}
