// ABOUTME: Career stats extractor: per-hero containers, category blocks and stat rows.
// ABOUTME: Writes career[hero][category][stat] through the accumulator; unknown categories are dropped.

use std::collections::{BTreeMap, HashMap};

use dom_query::Selection;
use tracing::{debug, warn};

use crate::extractors::dropdown::{element_id, option_map};
use crate::extractors::profile::CareerSelectors;
use crate::extractors::select::{first_text, select_all};
use crate::models::{CareerCategory, CareerStats, CareerStatsAccumulator};
use crate::text::{clean_display_value, coerce_value, normalize_key};

/// Applies the profile's rename table to a normalized stat key.
pub fn transform_key(key: String, renames: &HashMap<String, String>) -> String {
    match renames.get(&key) {
        Some(renamed) => renamed.clone(),
        None => key,
    }
}

/// Extracts the per-hero career stats from one play-mode subtree.
pub fn extract_career_stats(
    mode: &Selection,
    selectors: &CareerSelectors,
) -> BTreeMap<String, CareerStats> {
    let heroes = option_map(mode, &selectors.heroes);
    let mut acc = CareerStatsAccumulator::new();

    for container in select_all(mode, &selectors.container) {
        let Some(hero) = element_id(&container, &selectors.container_id)
            .and_then(|id| heroes.get(&id))
            .map(|label| normalize_key(label))
            .filter(|key| !key.is_empty())
        else {
            warn!("skipping career container with unresolved hero id");
            continue;
        };

        for block in select_all(&container, &selectors.category) {
            let title = first_text(&block, &selectors.category_title).unwrap_or_default();
            let Some(category) = CareerCategory::from_key(&normalize_key(&title)) else {
                continue;
            };

            for row in select_all(&block, &selectors.row) {
                let name = normalize_key(&first_text(&row, &selectors.row_name).unwrap_or_default());
                if name.is_empty() {
                    continue;
                }
                let raw = first_text(&row, &selectors.row_value).unwrap_or_default();
                let key = transform_key(name, &selectors.key_renames);
                acc.insert(&hero, category, key, coerce_value(&clean_display_value(&raw)));
            }
        }
    }

    let career = acc.into_inner();
    debug!(heroes = career.len(), "extracted career stats");
    career
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::loader::load_builtin_profile;
    use crate::extractors::select::document_root;
    use crate::text::StatValue;
    use dom_query::Document;
    use pretty_assertions::assert_eq;

    fn category(title: &str, rows: &[(&str, &str)]) -> String {
        let mut html = format!(
            r#"<div class="category"><div class="content"><div class="header"><p>{}</p></div>"#,
            title
        );
        for (name, value) in rows {
            html.push_str(&format!(
                r#"<div class="stat-item"><p class="name">{}</p><p class="value">{}</p></div>"#,
                name, value
            ));
        }
        html.push_str("</div></div>");
        html
    }

    fn mode_html(containers: &[(&str, Vec<String>)]) -> String {
        let mut html = String::from(
            r#"<div class="quickPlay-view">
               <select data-dropdown-id="stats-hero-select">
                 <option value="0">All Heroes</option>
                 <option value="2">Tracer</option>
                 <option value="40">Lúcio</option>
               </select>"#,
        );
        for (id, blocks) in containers {
            html.push_str(&format!(r#"<span class="stats-container option-{}">"#, id));
            for block in blocks {
                html.push_str(block);
            }
            html.push_str("</span>");
        }
        html.push_str("</div>");
        html
    }

    fn extract_with(html: &str, selectors: &CareerSelectors) -> BTreeMap<String, CareerStats> {
        let doc = Document::from(html);
        let root = document_root(&doc);
        extract_career_stats(&root, selectors)
    }

    fn extract(html: &str) -> BTreeMap<String, CareerStats> {
        extract_with(html, &load_builtin_profile().career)
    }

    #[test]
    fn coerces_and_nests_values() {
        let html = mode_html(&[(
            "0",
            vec![
                category(
                    "Game",
                    &[("Games Played", "1,234"), ("Win Percentage", "87%"), ("Time Played", "12:03:44")],
                ),
                category("Average", &[("Eliminations - Avg per 10 Min", "17.42")]),
            ],
        )]);
        let career = extract(&html);
        let all = &career["allHeroes"];
        let game = all.bucket(CareerCategory::Game).unwrap();
        assert_eq!(game["gamesPlayed"], StatValue::Int(1234));
        assert_eq!(game["winPercentage"], StatValue::Int(87));
        assert_eq!(game["timePlayed"], StatValue::Text("12:03:44".into()));
        let avg = all.bucket(CareerCategory::Average).unwrap();
        assert_eq!(avg["eliminationsAvgPer10Min"], StatValue::Float(17.42));
    }

    #[test]
    fn missing_deaths_category_is_absent() {
        let html = mode_html(&[
            ("0", vec![category("Combat", &[("Eliminations", "10")])]),
            ("2", vec![category("Best", &[("Eliminations - Most in Game", "33")])]),
        ]);
        let career = extract(&html);
        for stats in career.values() {
            assert!(stats.deaths.is_none());
        }
        let json = serde_json::to_value(&career).unwrap();
        assert!(json["allHeroes"].get("deaths").is_none());
        assert!(json["tracer"].get("deaths").is_none());
    }

    #[test]
    fn deaths_kept_when_present() {
        let html = mode_html(&[("0", vec![category("Deaths", &[("Deaths", "4")])])]);
        let career = extract(&html);
        let deaths = career["allHeroes"].bucket(CareerCategory::Deaths).unwrap();
        assert_eq!(deaths["deaths"], StatValue::Int(4));
    }

    #[test]
    fn unresolved_containers_are_skipped() {
        let html = mode_html(&[
            ("", vec![category("Game", &[("Games Played", "1")])]),
            ("9999", vec![category("Game", &[("Games Played", "2")])]),
            ("40", vec![category("Hero Specific", &[("Sound Barriers Provided", "12")])]),
        ]);
        let career = extract(&html);
        assert_eq!(career.keys().collect::<Vec<_>>(), vec!["lucio"]);
        let specific = career["lucio"].bucket(CareerCategory::HeroSpecific).unwrap();
        assert_eq!(specific["soundBarriersProvided"], StatValue::Int(12));
    }

    #[test]
    fn unknown_categories_are_dropped() {
        let html = mode_html(&[(
            "2",
            vec![
                category("Brand New Category", &[("Something", "1")]),
                category("Match Awards", &[("Cards", "3")]),
            ],
        )]);
        let career = extract(&html);
        let tracer = &career["tracer"];
        assert!(tracer.bucket(CareerCategory::MatchAwards).is_some());
        let json = serde_json::to_value(tracer).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[test]
    fn rename_table_applies_to_keys() {
        let mut selectors = load_builtin_profile().career;
        selectors
            .key_renames
            .insert("eliminationsMostInGame".into(), "eliminationsMostInLife".into());
        let html = mode_html(&[("0", vec![category("Best", &[("Eliminations - Most in Game", "33")])])]);
        let career = extract_with(&html, &selectors);
        let best = career["allHeroes"].bucket(CareerCategory::Best).unwrap();
        assert_eq!(best.get("eliminationsMostInGame"), None);
        assert_eq!(best["eliminationsMostInLife"], StatValue::Int(33));
    }

    #[test]
    fn transform_key_is_identity_without_renames() {
        assert_eq!(transform_key("deaths".into(), &HashMap::new()), "deaths");
    }
}
