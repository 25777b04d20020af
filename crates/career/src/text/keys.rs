// ABOUTME: Converts display labels into identifier-safe camelCase keys.
// ABOUTME: Strips pluralization templates, diacritics and punctuation before camel-casing.

//! Key normalization.
//!
//! Every stat key and hero key in the output is derived from display text by
//! [`normalize_key`]. The transform is deterministic and a fixed point:
//! feeding a key back in returns it unchanged.
//!
//! Steps:
//! 1. A `{count, plural, one {..} other {..}}` template collapses to its
//!    `other` branch.
//! 2. Known punctuation and diacritics are replaced (`-` `.` `:` become
//!    spaces, apostrophes vanish, `ú` -> `u`, `ö` -> `o`).
//! 3. Any remaining non-alphanumeric character separates words.
//! 4. Words are lowercased, title-cased and joined; the first character is
//!    lowercased.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLURAL_TEMPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{count, plural, one \{.+\} other \{(.+)\}\}").unwrap());

const REPLACE_FROM: &[&str] = &["-", ".", ":", "'", "\u{2019}", "ú", "ö"];
const REPLACE_TO: &[&str] = &[" ", " ", " ", "", "", "u", "o"];

static LABEL_REPLACER: Lazy<AhoCorasick> = Lazy::new(|| AhoCorasick::new(REPLACE_FROM).unwrap());

/// Returns true when `s` already has the shape of a normalized key.
fn is_normalized(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphanumeric() && !first.is_uppercase() => {
            chars.all(char::is_alphanumeric) && !LABEL_REPLACER.is_match(s)
        }
        _ => false,
    }
}

/// Collapses a localization plural template to its "other" form.
fn strip_plural_template(label: &str) -> String {
    if !label.contains("} other {") {
        return label.to_string();
    }
    PLURAL_TEMPLATE
        .replace_all(label, |caps: &Captures| caps[1].to_string())
        .into_owned()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalizes a display label into a camelCase identifier.
///
/// Empty or whitespace-only input yields an empty string. Input already
/// shaped like a key is returned unchanged, so keys are a fixed point.
///
/// ```
/// use ovrstat_career::text::normalize_key;
///
/// assert_eq!(normalize_key("Damage - Done"), "damageDone");
/// assert_eq!(normalize_key("Soldier: 76"), "soldier76");
/// assert_eq!(normalize_key("{count, plural, one {Kill} other {Kills}}"), "kills");
/// assert_eq!(normalize_key("killsPerLife"), "killsPerLife");
/// ```
pub fn normalize_key(label: &str) -> String {
    let label = label.trim();
    if is_normalized(label) {
        return label.to_string();
    }

    let label = strip_plural_template(label);
    let label = LABEL_REPLACER.replace_all(&label, REPLACE_TO);
    let lowered = label.to_lowercase();

    let joined: String = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(title_case)
        .collect();

    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
