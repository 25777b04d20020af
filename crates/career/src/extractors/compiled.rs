// ABOUTME: Pre-compiled CSS selector cache shared by all extractors.
// ABOUTME: Selector profiles are data, so invalid selectors compile to None instead of panicking.

//! Selector caching.
//!
//! Selector profiles are loaded at runtime, so compilation must be fallible
//! and cheap to repeat. Every selector string is compiled once and the result,
//! valid or not, is cached for the life of the process. Only profile
//! selectors go through here; nothing read from a document is ever compiled.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use dom_query::Matcher;
use once_cell::sync::Lazy;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Matcher>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` for a selector that does not parse.
pub fn get_or_compile(css: &str) -> Option<Matcher> {
    {
        let cache = SELECTOR_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Matcher::new(css).ok();
    let mut cache = SELECTOR_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    cache
        .entry(css.to_string())
        .or_insert_with(|| compiled)
        .clone()
}

/// Compiles a batch of selectors up front.
///
/// Returns the selectors that failed to compile so a freshly loaded profile
/// can be rejected or reported before it is used.
pub fn precompile_selectors<I, S>(selectors: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    selectors
        .into_iter()
        .filter(|css| get_or_compile(css.as_ref()).is_none())
        .map(|css| css.as_ref().to_string())
        .collect()
}

#[cfg(test)]
pub(crate) fn is_cached(css: &str) -> bool {
    SELECTOR_CACHE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(css)
}
