// ABOUTME: Output data model: PlayerProfile, Rating, StatsCollection and the per-hero stat records.
// ABOUTME: Includes the get-or-create accumulator used while walking career stat tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::text::StatValue;

/// Stat key -> coerced value.
pub type StatMap = BTreeMap<String, StatValue>;

/// The full statistics record for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub icon: String,
    pub name: String,
    pub endorsement: i64,
    pub endorsement_icon: String,
    pub ratings: Vec<Rating>,
    pub games_played: i64,
    pub games_won: i64,
    pub games_lost: i64,
    pub private: bool,
    pub quick_play_stats: StatsCollection,
    pub competitive_stats: CompetitiveStats,
}

/// One competitive rank, per role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub group: String,
    pub tier: i64,
    pub role: String,
    pub role_icon: String,
    pub rank_icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatsCollection {
    pub top_heroes: BTreeMap<String, TopHeroStats>,
    pub career_stats: BTreeMap<String, CareerStats>,
}

/// Competitive stats additionally carry the season they were recorded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveStats {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub season: Option<i64>,
    #[serde(flatten)]
    pub stats: StatsCollection,
}

/// Summary figures shown in the "top heroes" widgets.
///
/// `time_played` stays a display string; the site renders it in more than
/// one format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TopHeroStats {
    pub time_played: String,
    pub games_won: i64,
    pub win_percentage: i64,
    pub weapon_accuracy: i64,
    pub critical_hit_accuracy: i64,
    pub eliminations_per_life: f64,
    pub multikill_best: i64,
    pub objective_kills: f64,
}

/// The fixed set of career stat categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CareerCategory {
    Assists,
    Average,
    Best,
    Combat,
    Deaths,
    Game,
    HeroSpecific,
    MatchAwards,
    Miscellaneous,
}

impl CareerCategory {
    pub const ALL: [CareerCategory; 9] = [
        CareerCategory::Assists,
        CareerCategory::Average,
        CareerCategory::Best,
        CareerCategory::Combat,
        CareerCategory::Deaths,
        CareerCategory::Game,
        CareerCategory::HeroSpecific,
        CareerCategory::MatchAwards,
        CareerCategory::Miscellaneous,
    ];

    /// Maps a normalized category header to a category.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// The normalized key, as it appears in serialized output.
    pub fn key(self) -> &'static str {
        match self {
            CareerCategory::Assists => "assists",
            CareerCategory::Average => "average",
            CareerCategory::Best => "best",
            CareerCategory::Combat => "combat",
            CareerCategory::Deaths => "deaths",
            CareerCategory::Game => "game",
            CareerCategory::HeroSpecific => "heroSpecific",
            CareerCategory::MatchAwards => "matchAwards",
            CareerCategory::Miscellaneous => "miscellaneous",
        }
    }
}

/// Detailed stats for one hero, grouped by category.
///
/// A category the document did not contain stays `None` and is omitted when
/// serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CareerStats {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub assists: Option<StatMap>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub average: Option<StatMap>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub best: Option<StatMap>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub combat: Option<StatMap>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub deaths: Option<StatMap>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub game: Option<StatMap>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hero_specific: Option<StatMap>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub match_awards: Option<StatMap>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub miscellaneous: Option<StatMap>,
}

impl CareerStats {
    fn slot(&mut self, category: CareerCategory) -> &mut Option<StatMap> {
        match category {
            CareerCategory::Assists => &mut self.assists,
            CareerCategory::Average => &mut self.average,
            CareerCategory::Best => &mut self.best,
            CareerCategory::Combat => &mut self.combat,
            CareerCategory::Deaths => &mut self.deaths,
            CareerCategory::Game => &mut self.game,
            CareerCategory::HeroSpecific => &mut self.hero_specific,
            CareerCategory::MatchAwards => &mut self.match_awards,
            CareerCategory::Miscellaneous => &mut self.miscellaneous,
        }
    }

    /// Returns the bucket for `category`, creating it on first write.
    pub fn bucket_mut(&mut self, category: CareerCategory) -> &mut StatMap {
        self.slot(category).get_or_insert_with(StatMap::new)
    }

    /// Returns the bucket for `category` if the document contained it.
    pub fn bucket(&self, category: CareerCategory) -> Option<&StatMap> {
        match category {
            CareerCategory::Assists => self.assists.as_ref(),
            CareerCategory::Average => self.average.as_ref(),
            CareerCategory::Best => self.best.as_ref(),
            CareerCategory::Combat => self.combat.as_ref(),
            CareerCategory::Deaths => self.deaths.as_ref(),
            CareerCategory::Game => self.game.as_ref(),
            CareerCategory::HeroSpecific => self.hero_specific.as_ref(),
            CareerCategory::MatchAwards => self.match_awards.as_ref(),
            CareerCategory::Miscellaneous => self.miscellaneous.as_ref(),
        }
    }
}

/// Accumulates `career[hero][category][stat]` writes, creating every level lazily.
#[derive(Debug, Default)]
pub struct CareerStatsAccumulator {
    heroes: BTreeMap<String, CareerStats>,
}

impl CareerStatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the category bucket for `hero`, creating the hero and bucket if needed.
    pub fn bucket(&mut self, hero: &str, category: CareerCategory) -> &mut StatMap {
        self.heroes
            .entry(hero.to_string())
            .or_default()
            .bucket_mut(category)
    }

    pub fn insert(&mut self, hero: &str, category: CareerCategory, key: String, value: StatValue) {
        self.bucket(hero, category).insert(key, value);
    }

    pub fn into_inner(self) -> BTreeMap<String, CareerStats> {
        self.heroes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keys_round_trip() {
        for category in CareerCategory::ALL {
            assert_eq!(CareerCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(CareerCategory::from_key("unknownThing"), None);
    }

    #[test]
    fn accumulator_creates_levels_lazily() {
        let mut acc = CareerStatsAccumulator::new();
        acc.insert("ana", CareerCategory::Combat, "eliminations".into(), StatValue::Int(3));
        acc.insert("ana", CareerCategory::Combat, "deaths".into(), StatValue::Int(1));

        let heroes = acc.into_inner();
        let ana = &heroes["ana"];
        assert_eq!(ana.combat.as_ref().map(|m| m.len()), Some(2));
        assert!(ana.deaths.is_none());
        assert!(ana.game.is_none());
    }

    #[test]
    fn absent_categories_are_not_serialized() {
        let mut stats = CareerStats::default();
        stats
            .bucket_mut(CareerCategory::Game)
            .insert("gamesPlayed".into(), StatValue::Int(4));

        let json = serde_json::to_value(&stats).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(json["game"]["gamesPlayed"], 4);
        assert!(obj.get("deaths").is_none());
    }

    #[test]
    fn season_is_omitted_when_absent() {
        let json = serde_json::to_value(CompetitiveStats::default()).unwrap();
        assert!(json.get("season").is_none());
        assert!(json.get("topHeroes").is_some());
        assert!(json.get("careerStats").is_some());

        let with_season = CompetitiveStats {
            season: Some(9),
            ..Default::default()
        };
        let json = serde_json::to_value(with_season).unwrap();
        assert_eq!(json["season"], 9);
    }

    #[test]
    fn profile_serializes_camel_case() {
        let json = serde_json::to_value(PlayerProfile::default()).unwrap();
        for key in [
            "icon",
            "name",
            "endorsement",
            "endorsementIcon",
            "ratings",
            "gamesPlayed",
            "gamesWon",
            "gamesLost",
            "private",
            "quickPlayStats",
            "competitiveStats",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }
}
