// ABOUTME: Loads selector profiles from the embedded JSON asset or caller-supplied JSON.
// ABOUTME: Provides load_builtin_profile() for the current markup generation.

//! Selector profile loader.

use crate::extractors::compiled::precompile_selectors;
use crate::extractors::profile::SelectorProfile;

/// Embedded profile for the current profile page markup.
const BUILTIN_PROFILE_JSON: &str = include_str!("../../data/selectors/ow2.json");

/// Loads the builtin selector profile and warms the selector cache.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed.
pub fn load_builtin_profile() -> SelectorProfile {
    parse_profile(BUILTIN_PROFILE_JSON).expect("failed to parse builtin selector profile")
}

/// Parses a selector profile from JSON.
///
/// Selectors that do not compile are logged; they match nothing at
/// extraction time.
pub fn parse_profile(json: &str) -> Result<SelectorProfile, serde_json::Error> {
    let profile: SelectorProfile = serde_json::from_str(json)?;
    let invalid = precompile_selectors(profile.selectors());
    if !invalid.is_empty() {
        tracing::warn!(
            version = %profile.version,
            ?invalid,
            "selector profile contains selectors that do not compile"
        );
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profile_loads() {
        let profile = load_builtin_profile();
        assert_eq!(profile.version, "ow2-2023");
        assert_eq!(profile.platforms.view_class("mouseKeyboard"), "mouseKeyboard-view");
    }

    #[test]
    fn builtin_selectors_all_compile() {
        let profile = load_builtin_profile();
        let invalid = precompile_selectors(profile.selectors());
        assert!(invalid.is_empty(), "invalid selectors: {:?}", invalid);
    }

    #[test]
    fn builtin_has_no_renames() {
        let profile = load_builtin_profile();
        assert!(profile.career.key_renames.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_profile("{ \"version\": 1 }").is_err());
        assert!(parse_profile("not json").is_err());
    }
}
