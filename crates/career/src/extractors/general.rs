// ABOUTME: General info extractor: identity, endorsement and per-role ratings.
// ABOUTME: Reads the masthead for identity and the platform view for competitive ranks.

//! General info extraction.
//!
//! Every field here is an optional decoration: a missing element leaves the
//! field at its zero value and never fails the pipeline.

use dom_query::Selection;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::extractors::platform::PlatformView;
use crate::extractors::profile::SelectorProfile;
use crate::extractors::select::{extract_spec, select_all};
use crate::models::Rating;

/// `/<level>-<slug>.svg`
static ENDORSEMENT_ICON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(\d+)-([a-z0-9]+)\.svg").unwrap());
/// `<group>Tier-<tier>-<slug>.<ext>`
static RANK_ICON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zA-Z0-9]+)Tier-(\d)-([a-z\d]+)\.(svg|png)").unwrap());

/// Identity and rank fields read from the masthead and the platform view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneralInfo {
    pub name: String,
    pub icon: String,
    pub endorsement: i64,
    pub endorsement_icon: String,
    pub ratings: Vec<Rating>,
}

/// Recovers the real icon reference from a `/svg?path=<ref>` indirection.
///
/// Any other reference is returned unchanged.
pub fn decode_icon_ref(icon: &str) -> String {
    if !icon.starts_with("/svg") {
        return icon.to_string();
    }
    let Some((_, query)) = icon.split_once('?') else {
        return icon.to_string();
    };
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == "path" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .unwrap_or_else(|| icon.to_string())
}

/// Parses the endorsement level out of its icon reference.
pub fn endorsement_level(icon: &str) -> i64 {
    ENDORSEMENT_ICON
        .captures(icon)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Role name from a role icon: the basename up to its first `-`.
pub fn role_from_icon(icon: &str) -> String {
    let path = icon.split(['?', '#']).next().unwrap_or(icon);
    let base = path.rsplit('/').next().unwrap_or(path);
    base.split('-').next().unwrap_or(base).to_string()
}

/// Builds a rating from its two icon references.
pub fn parse_rating(role_icon: &str, rank_icon: &str) -> Rating {
    let (group, tier) = RANK_ICON
        .captures(rank_icon)
        .map(|caps| (caps[1].to_string(), caps[2].parse::<i64>().unwrap_or(0)))
        .unwrap_or_default();

    Rating {
        group,
        tier,
        role: role_from_icon(role_icon),
        role_icon: role_icon.to_string(),
        rank_icon: rank_icon.to_string(),
    }
}

/// Extracts identity from `masthead` and ratings from the platform `view`.
pub fn extract_general_info(
    masthead: &Selection,
    view: &PlatformView,
    profile: &SelectorProfile,
) -> GeneralInfo {
    let identity = &profile.identity;

    let name = extract_spec(masthead, &identity.name).unwrap_or_default();
    let icon = extract_spec(masthead, &identity.portrait).unwrap_or_default();
    let endorsement_icon = extract_spec(masthead, &identity.endorsement_icon)
        .map(|raw| decode_icon_ref(&raw))
        .unwrap_or_default();
    let endorsement = endorsement_level(&endorsement_icon);

    let ratings: Vec<Rating> = select_all(&view.root, &profile.ratings.wrapper)
        .iter()
        .map(|wrapper| {
            let role_icon = extract_spec(wrapper, &profile.ratings.role_icon)
                .map(|raw| decode_icon_ref(&raw))
                .unwrap_or_default();
            let rank_icon = extract_spec(wrapper, &profile.ratings.rank_icon)
                .map(|raw| decode_icon_ref(&raw))
                .unwrap_or_default();
            parse_rating(&role_icon, &rank_icon)
        })
        .collect();

    debug!(
        platform = %view.id,
        endorsement,
        ratings = ratings.len(),
        "extracted general info"
    );

    GeneralInfo {
        name,
        icon,
        endorsement,
        endorsement_icon,
        ratings,
    }
}
