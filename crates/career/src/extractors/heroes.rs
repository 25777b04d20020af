// ABOUTME: Top hero summary extractor: reads the progress-bar widgets per category.
// ABOUTME: Category ids resolve to labels through the dropdown; unknown categories are ignored.

use std::collections::BTreeMap;

use dom_query::Selection;
use tracing::debug;

use crate::extractors::dropdown::{element_id, option_map};
use crate::extractors::profile::TopHeroSelectors;
use crate::extractors::select::{first_text, select_all};
use crate::models::TopHeroStats;
use crate::text::{clean_display_value, normalize_key};

/// The fixed fields of a top hero record, keyed by normalized category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopHeroField {
    TimePlayed,
    GamesWon,
    WinPercentage,
    WeaponAccuracy,
    CriticalHitAccuracy,
    EliminationsPerLife,
    MultikillBest,
    ObjectiveKills,
}

impl TopHeroField {
    /// Maps a category label to a field. Labels are compared after normalization.
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize_key(label).as_str() {
            "timePlayed" => Some(Self::TimePlayed),
            "gamesWon" => Some(Self::GamesWon),
            "winPercentage" => Some(Self::WinPercentage),
            "weaponAccuracy" => Some(Self::WeaponAccuracy),
            "criticalHitAccuracy" => Some(Self::CriticalHitAccuracy),
            "eliminationsPerLife" => Some(Self::EliminationsPerLife),
            "multikillBest" | "bestMultikill" => Some(Self::MultikillBest),
            "objectiveKills" => Some(Self::ObjectiveKills),
            _ => None,
        }
    }

    /// Writes a display value into the matching field.
    ///
    /// Values that do not parse leave the field untouched.
    pub fn assign(self, stats: &mut TopHeroStats, raw: &str) {
        let value = clean_display_value(raw);
        match self {
            Self::TimePlayed => stats.time_played = raw.trim().to_string(),
            Self::GamesWon => set_int(&mut stats.games_won, &value),
            Self::WinPercentage => set_int(&mut stats.win_percentage, &value),
            Self::WeaponAccuracy => set_int(&mut stats.weapon_accuracy, &value),
            Self::CriticalHitAccuracy => set_int(&mut stats.critical_hit_accuracy, &value),
            Self::EliminationsPerLife => set_float(&mut stats.eliminations_per_life, &value),
            Self::MultikillBest => set_int(&mut stats.multikill_best, &value),
            Self::ObjectiveKills => set_float(&mut stats.objective_kills, &value),
        }
    }
}

fn set_int(slot: &mut i64, value: &str) {
    if let Ok(v) = value.parse() {
        *slot = v;
    }
}

fn set_float(slot: &mut f64, value: &str) {
    if let Ok(v) = value.parse::<f64>() {
        if v.is_finite() {
            *slot = v;
        }
    }
}

/// Extracts the top hero records from one play-mode subtree.
pub fn extract_top_heroes(
    mode: &Selection,
    selectors: &TopHeroSelectors,
) -> BTreeMap<String, TopHeroStats> {
    let categories = option_map(mode, &selectors.categories);
    let mut heroes: BTreeMap<String, TopHeroStats> = BTreeMap::new();

    for group in select_all(mode, &selectors.group) {
        let field = element_id(&group, &selectors.group_id)
            .and_then(|id| categories.get(&id))
            .and_then(|label| TopHeroField::from_label(label));
        let Some(field) = field else {
            continue;
        };

        for entry in select_all(&group, &selectors.entry) {
            let hero = normalize_key(&first_text(&entry, &selectors.title).unwrap_or_default());
            if hero.is_empty() {
                continue;
            }
            let value = first_text(&entry, &selectors.value).unwrap_or_default();
            field.assign(heroes.entry(hero).or_default(), &value);
        }
    }

    debug!(heroes = heroes.len(), "extracted top heroes");
    heroes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::loader::load_builtin_profile;
    use crate::extractors::select::document_root;
    use dom_query::Document;
    use pretty_assertions::assert_eq;

    fn bar(hero: &str, value: &str) -> String {
        format!(
            r#"<div class="Profile-progressBar">
                 <div class="Profile-progressBar-title">{}</div>
                 <div class="Profile-progressBar-description">{}</div>
               </div>"#,
            hero, value
        )
    }

    fn mode_html(groups: &[(&str, &[(&str, &str)])]) -> String {
        let mut html = String::from(
            r#"<div class="quickPlay-view">
               <select data-dropdown-id="hero-dropdown">
                 <option value="0x0860000000000021">Time Played</option>
                 <option value="0x0860000000000039">Games Won</option>
                 <option value="0x08600000000003D1">Win Percentage</option>
                 <option value="0x086000000000002F">Weapon Accuracy</option>
                 <option value="0x08600000000003E2">Critical Hit Accuracy</option>
                 <option value="0x08600000000003D2">Eliminations per Life</option>
                 <option value="0x0860000000000346">Multikill - Best</option>
                 <option value="0x086000000000031C">Objective Kills</option>
                 <option value="0x0860000000000999">Shiny New Category</option>
               </select>"#,
        );
        for (id, entries) in groups {
            html.push_str(&format!(
                r#"<div class="Profile-progressBars" data-category-id="{}">"#,
                id
            ));
            for (hero, value) in entries.iter() {
                html.push_str(&bar(hero, value));
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
        html
    }

    fn extract(html: &str) -> BTreeMap<String, TopHeroStats> {
        let doc = Document::from(html);
        let root = document_root(&doc);
        extract_top_heroes(&root, &load_builtin_profile().top_heroes)
    }

    #[test]
    fn games_won_round_trip() {
        let html = mode_html(&[("0x0860000000000039", &[("Tracer", "42")])]);
        let heroes = extract(&html);
        assert_eq!(heroes["tracer"].games_won, 42);
    }

    #[test]
    fn fills_every_known_field() {
        let html = mode_html(&[
            ("0x0860000000000021", &[("Soldier: 76", "12:34:56")]),
            ("0x0860000000000039", &[("Soldier: 76", "1,204")]),
            ("0x08600000000003D1", &[("Soldier: 76", "51%")]),
            ("0x086000000000002F", &[("Soldier: 76", "38%")]),
            ("0x08600000000003E2", &[("Soldier: 76", "7%")]),
            ("0x08600000000003D2", &[("Soldier: 76", "2.57")]),
            ("0x0860000000000346", &[("Soldier: 76", "5")]),
            ("0x086000000000031C", &[("Soldier: 76", "1.5")]),
        ]);
        let heroes = extract(&html);
        assert_eq!(
            heroes["soldier76"],
            TopHeroStats {
                time_played: "12:34:56".into(),
                games_won: 1204,
                win_percentage: 51,
                weapon_accuracy: 38,
                critical_hit_accuracy: 7,
                eliminations_per_life: 2.57,
                multikill_best: 5,
                objective_kills: 1.5,
            }
        );
    }

    #[test]
    fn unknown_categories_are_ignored() {
        let html = mode_html(&[
            ("0x0860000000000999", &[("Ana", "77")]),
            ("0xDEADBEEF", &[("Ana", "88")]),
            ("0x0860000000000039", &[("Mercy", "3")]),
        ]);
        let heroes = extract(&html);
        assert_eq!(heroes.len(), 1);
        assert!(heroes.get("ana").is_none());
        assert_eq!(heroes["mercy"].games_won, 3);
    }

    #[test]
    fn missing_fields_stay_zero() {
        let html = mode_html(&[("0x0860000000000039", &[("Reinhardt", "not a number")])]);
        let heroes = extract(&html);
        assert_eq!(heroes["reinhardt"], TopHeroStats::default());
    }

    #[test]
    fn entries_without_title_are_skipped() {
        let html = mode_html(&[("0x0860000000000039", &[("", "9"), ("D.Va", "4")])]);
        let heroes = extract(&html);
        assert_eq!(heroes.len(), 1);
        assert_eq!(heroes["dVa"].games_won, 4);
    }

    #[test]
    fn field_labels_match_after_normalization() {
        assert_eq!(TopHeroField::from_label("Games Won"), Some(TopHeroField::GamesWon));
        assert_eq!(TopHeroField::from_label("games won"), Some(TopHeroField::GamesWon));
        assert_eq!(
            TopHeroField::from_label("Multikill - Best"),
            Some(TopHeroField::MultikillBest)
        );
        assert_eq!(TopHeroField::from_label("Damage Done"), None);
    }
}
