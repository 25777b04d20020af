// ABOUTME: Derives profile-level game totals from the "all heroes" career bucket.
// ABOUTME: Sums quick play and competitive; missing or non-integer values count as zero.

use crate::models::{CareerCategory, PlayerProfile, StatsCollection};

const ALL_HEROES: &str = "allHeroes";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameTotals {
    pub played: i64,
    pub won: i64,
    pub lost: i64,
}

impl GameTotals {
    /// Reads the totals reported by a single collection.
    pub fn from_collection(stats: &StatsCollection) -> Self {
        let Some(game) = stats
            .career_stats
            .get(ALL_HEROES)
            .and_then(|hero| hero.bucket(CareerCategory::Game))
        else {
            return Self::default();
        };
        let int = |key: &str| game.get(key).and_then(|v| v.as_i64()).unwrap_or(0);
        Self {
            played: int("gamesPlayed"),
            won: int("gamesWon"),
            lost: int("gamesLost"),
        }
    }

    /// Sums two totals, saturating at `i64::MAX`.
    pub fn add(self, other: Self) -> Self {
        Self {
            played: self.played.saturating_add(other.played),
            won: self.won.saturating_add(other.won),
            lost: self.lost.saturating_add(other.lost),
        }
    }
}

/// Writes the summed totals of both play modes into the profile.
pub fn aggregate(profile: &mut PlayerProfile) -> GameTotals {
    let totals = GameTotals::from_collection(&profile.quick_play_stats)
        .add(GameTotals::from_collection(&profile.competitive_stats.stats));
    profile.games_played = totals.played;
    profile.games_won = totals.won;
    profile.games_lost = totals.lost;
    totals
}
