// ABOUTME: Builds id -> label maps from dropdown options and reads opaque ids off elements.
// ABOUTME: The site's category and hero ids are a runtime vocabulary rebuilt for every document.

use std::collections::HashMap;

use dom_query::Selection;

use crate::extractors::profile::{IdSource, OptionMapSelectors};
use crate::extractors::select::{element_attr, element_text, select_all};

/// Maps each option's value to its label. Options missing either are skipped.
pub fn option_map(root: &Selection, selectors: &OptionMapSelectors) -> HashMap<String, String> {
    select_all(root, &selectors.options)
        .iter()
        .filter_map(|option| {
            let value = element_attr(option, &selectors.value_attr)?;
            let label = element_text(option)?;
            Some((value, label))
        })
        .collect()
}

/// Reads an element's opaque id as described by `source`.
pub fn element_id(el: &Selection, source: &IdSource) -> Option<String> {
    let value = element_attr(el, &source.attr)?;
    if source.prefix.is_empty() {
        return Some(value);
    }
    value
        .split_whitespace()
        .find_map(|token| token.strip_prefix(source.prefix.as_str()))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
