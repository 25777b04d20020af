// ABOUTME: Coerces display strings into the narrowest of integer, float or text.
// ABOUTME: Also strips thousands separators and percent signs from rendered numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stat value as rendered by the site, coerced to its narrowest shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl StatValue {
    /// Returns the integer payload, if this value is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StatValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a float for both numeric shapes.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Int(v) => Some(*v as f64),
            StatValue::Float(v) => Some(*v),
            StatValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StatValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{}", v),
            StatValue::Float(v) => write!(f, "{}", v),
            StatValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Removes thousands separators, surrounding whitespace and a trailing `%`.
pub fn clean_display_value(raw: &str) -> String {
    let without_commas = raw.replace(',', "");
    let trimmed = without_commas.trim();
    trimmed
        .strip_suffix('%')
        .map(str::trim_end)
        .unwrap_or(trimmed)
        .to_string()
}

/// Coerces a cleaned display string.
///
/// Tries an integer, then a finite float, and otherwise keeps the text
/// verbatim. A signed digit run that does not fit in an `i64` stays text.
/// Never fails.
pub fn coerce_value(value: &str) -> StatValue {
    if let Ok(i) = value.parse::<i64>() {
        return StatValue::Int(i);
    }
    if is_digit_run(value) {
        return StatValue::Text(value.to_string());
    }
    match value.parse::<f64>() {
        Ok(f) if f.is_finite() => StatValue::Float(f),
        _ => StatValue::Text(value.to_string()),
    }
}

fn is_digit_run(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
