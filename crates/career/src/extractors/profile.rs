// ABOUTME: Selector profile data model: where each field lives in one markup generation.
// ABOUTME: Profiles are plain serde data so a new site revision ships as JSON, not code.

//! Selector profiles.
//!
//! A [`SelectorProfile`] describes one generation of the profile page markup.
//! Extractors never hard-code a selector; they read it from the profile
//! passed in. Supporting a rewritten page means supplying a new profile.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How to select a value from the DOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectorSpec {
    /// Text of the first match, e.g. `".Profile-player--name"`.
    Css(String),
    /// Attribute of the first match, e.g. `["img.portrait", "src"]`.
    CssAttr(Vec<String>),
}

impl Default for SelectorSpec {
    fn default() -> Self {
        SelectorSpec::Css(String::new())
    }
}

impl SelectorSpec {
    /// The CSS part of the spec.
    pub fn css(&self) -> &str {
        match self {
            SelectorSpec::Css(css) => css,
            SelectorSpec::CssAttr(parts) => parts.first().map(String::as_str).unwrap_or(""),
        }
    }
}

/// Heading text the site renders instead of a profile for unknown players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NotFoundMarker {
    pub selector: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IdentitySelectors {
    pub name: SelectorSpec,
    pub portrait: SelectorSpec,
    pub endorsement_icon: SelectorSpec,
}

/// Platform filter tabs and the view each one controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlatformSelectors {
    /// Selects every filter tab.
    pub filters: String,
    /// Attribute holding the tab's internal id.
    pub id_attr: String,
    /// Suffix trimmed from the attribute to get the platform id.
    #[serde(default)]
    pub id_suffix: String,
    /// Selects every platform view.
    pub views: String,
    /// Class token marking a view as the platform's; `{id}` is replaced by the platform id.
    pub view_class: String,
}

impl PlatformSelectors {
    pub fn view_class(&self, id: &str) -> String {
        self.view_class.replace("{id}", id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RatingSelectors {
    /// One element per role, searched inside the platform view.
    pub wrapper: String,
    pub role_icon: SelectorSpec,
    pub rank_icon: SelectorSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ModeSelectors {
    pub quick_play: String,
    pub competitive: String,
    /// Document-level attribute carrying the competitive season number.
    #[serde(default)]
    pub competitive_season: Option<SelectorSpec>,
}

/// A dropdown whose options map opaque ids to display labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OptionMapSelectors {
    pub options: String,
    pub value_attr: String,
}

/// Where an element keeps its opaque id: a whole attribute, or the class
/// token starting with `prefix` when one is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IdSource {
    pub attr: String,
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TopHeroSelectors {
    pub categories: OptionMapSelectors,
    pub group: String,
    pub group_id: IdSource,
    pub entry: String,
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CareerSelectors {
    pub heroes: OptionMapSelectors,
    pub container: String,
    pub container_id: IdSource,
    pub category: String,
    pub category_title: String,
    pub row: String,
    pub row_name: String,
    pub row_value: String,
    /// Renames applied to normalized stat keys.
    #[serde(default)]
    pub key_renames: HashMap<String, String>,
}

/// A complete, versioned description of one markup generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelectorProfile {
    pub version: String,
    pub not_found: NotFoundMarker,
    pub masthead: String,
    pub identity: IdentitySelectors,
    pub platforms: PlatformSelectors,
    pub ratings: RatingSelectors,
    pub modes: ModeSelectors,
    pub top_heroes: TopHeroSelectors,
    pub career: CareerSelectors,
}

impl SelectorProfile {
    /// Every CSS selector in the profile.
    pub fn selectors(&self) -> Vec<&str> {
        let mut out = vec![
            self.not_found.selector.as_str(),
            self.masthead.as_str(),
            self.identity.name.css(),
            self.identity.portrait.css(),
            self.identity.endorsement_icon.css(),
            self.platforms.filters.as_str(),
            self.platforms.views.as_str(),
            self.ratings.wrapper.as_str(),
            self.ratings.role_icon.css(),
            self.ratings.rank_icon.css(),
            self.modes.quick_play.as_str(),
            self.modes.competitive.as_str(),
            self.top_heroes.categories.options.as_str(),
            self.top_heroes.group.as_str(),
            self.top_heroes.entry.as_str(),
            self.top_heroes.title.as_str(),
            self.top_heroes.value.as_str(),
            self.career.heroes.options.as_str(),
            self.career.container.as_str(),
            self.career.category.as_str(),
            self.career.category_title.as_str(),
            self.career.row.as_str(),
            self.career.row_name.as_str(),
            self.career.row_value.as_str(),
        ];
        if let Some(season) = &self.modes.competitive_season {
            out.push(season.css());
        }
        out
    }
}
