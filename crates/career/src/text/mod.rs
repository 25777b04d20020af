// ABOUTME: Pure text helpers shared by every extractor.
// ABOUTME: Label-to-key normalization and display-string value coercion.

pub mod keys;
pub mod values;

pub use keys::normalize_key;
pub use values::{clean_display_value, coerce_value, StatValue};
