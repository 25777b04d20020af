// ABOUTME: Runs every document-level extraction step for one fetched profile page.
// ABOUTME: Classifies structural failures (not found, missing masthead, unknown platform) as StatsError.

use anyhow::anyhow;
use dom_query::{Document, Selection};
use tracing::debug;

use crate::aggregate::aggregate;
use crate::error::StatsError;
use crate::extractors::career::extract_career_stats;
use crate::extractors::general::extract_general_info;
use crate::extractors::heroes::extract_top_heroes;
use crate::extractors::platform::PlatformIndex;
use crate::extractors::profile::SelectorProfile;
use crate::extractors::select::{document_root, element_text, extract_spec, select_all, select_first};
use crate::models::{CompetitiveStats, PlayerProfile, StatsCollection};

const OP: &str = "ExtractProfile";

/// What the caller already knows about the player before the document is read.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRequest<'a> {
    pub tag: &'a str,
    pub platform: &'a str,
    /// Used when the masthead carries no name.
    pub fallback_name: &'a str,
}

/// True when the document is the site's "page not found" answer.
pub fn is_not_found_page(root: &Selection, profile: &SelectorProfile) -> bool {
    select_all(root, &profile.not_found.selector)
        .iter()
        .filter_map(element_text)
        .any(|text| text == profile.not_found.text)
}

/// Reads the competitive season number; absent or non-numeric yields `None`.
pub fn competitive_season(root: &Selection, profile: &SelectorProfile) -> Option<i64> {
    let spec = profile.modes.competitive_season.as_ref()?;
    extract_spec(root, spec)?.trim().parse().ok()
}

/// Top heroes and career stats for one play mode. A missing mode subtree is empty.
pub fn extract_mode(view: &Selection, css: &str, profile: &SelectorProfile) -> StatsCollection {
    let Some(mode) = select_first(view, css) else {
        debug!(mode = css, "play mode not rendered");
        return StatsCollection::default();
    };
    StatsCollection {
        top_heroes: extract_top_heroes(&mode, &profile.top_heroes),
        career_stats: extract_career_stats(&mode, &profile.career),
    }
}

/// Extracts a public profile from `html`.
///
/// The locate step runs before any stats walking, so an unsupported platform
/// returns without touching the play-mode subtrees.
pub fn extract_profile(
    html: &str,
    request: DocumentRequest<'_>,
    profile: &SelectorProfile,
) -> Result<PlayerProfile, StatsError> {
    let tag = request.tag;
    let doc = Document::from(html);
    let root = document_root(&doc);

    if is_not_found_page(&root, profile) {
        return Err(StatsError::player_not_found(
            tag,
            OP,
            Some(anyhow!("document reports page not found")),
        ));
    }

    let masthead = select_first(&root, &profile.masthead).ok_or_else(|| {
        StatsError::malformed_document(tag, OP, Some(anyhow!("missing profile masthead")))
    })?;

    let platforms = PlatformIndex::build(&root, &profile.platforms);
    if platforms.is_empty() {
        return Err(StatsError::malformed_document(
            tag,
            OP,
            Some(anyhow!("no platform views in document")),
        ));
    }
    debug!(platforms = ?platforms.platform_ids(), "located platform views");

    let view = platforms.locate(request.platform).ok_or_else(|| {
        StatsError::invalid_platform(
            tag,
            "LocatePlatform",
            Some(anyhow!(
                "platform {:?} not available (found {:?})",
                request.platform,
                platforms.platform_ids()
            )),
        )
    })?;

    let general = extract_general_info(&masthead, view, profile);
    let name = if general.name.is_empty() {
        request.fallback_name.to_string()
    } else {
        general.name
    };

    let mut player = PlayerProfile {
        icon: general.icon,
        name,
        endorsement: general.endorsement,
        endorsement_icon: general.endorsement_icon,
        ratings: general.ratings,
        private: false,
        quick_play_stats: extract_mode(&view.root, &profile.modes.quick_play, profile),
        competitive_stats: CompetitiveStats {
            season: competitive_season(&root, profile),
            stats: extract_mode(&view.root, &profile.modes.competitive, profile),
        },
        ..Default::default()
    };

    let totals = aggregate(&mut player);
    debug!(
        played = totals.played,
        won = totals.won,
        lost = totals.lost,
        "aggregated game totals"
    );
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::extractors::loader::load_builtin_profile;
    use crate::text::StatValue;
    use pretty_assertions::assert_eq;

    const PROFILE_HTML: &str = r#"
        <html><body>
          <div data-latestherostatrankseasonow2="9"></div>
          <blz-section class="Profile-masthead">
            <img class="Profile-player--portrait" src="https://cdn.example/portrait.png">
            <h1 class="Profile-player--name">Someone</h1>
            <img class="Profile-playerSummary--endorsement" src="https://cdn.example/endorsement/3-8b9f0f.svg">
            <div class="Profile-player--filters">
              <div class="Profile-player--filter" id="mouseKeyboard-filter">PC</div>
            </div>
          </blz-section>
          <div class="Profile-view mouseKeyboard-view">
            <div class="Profile-playerSummary--rankWrapper">
              <div class="Profile-playerSummary--roleWrapper">
                <div class="Profile-playerSummary--role"><img src="https://cdn.example/role/tank-abc.svg"></div>
                <img class="Profile-playerSummary--rank" src="https://cdn.example/rank/GoldTier-3-def.png">
              </div>
            </div>
            <blz-section class="stats quickPlay-view">
              <select data-dropdown-id="hero-dropdown">
                <option value="0x0860000000000039">Games Won</option>
              </select>
              <div class="Profile-progressBars" data-category-id="0x0860000000000039">
                <div class="Profile-progressBar">
                  <div class="Profile-progressBar-title">Tracer</div>
                  <div class="Profile-progressBar-description">42</div>
                </div>
              </div>
              <select data-dropdown-id="stats-hero-select">
                <option value="0">All Heroes</option>
              </select>
              <span class="stats-container option-0">
                <div class="category"><div class="content">
                  <div class="header"><p>Game</p></div>
                  <div class="stat-item"><p class="name">Games Played</p><p class="value">10</p></div>
                  <div class="stat-item"><p class="name">Games Won</p><p class="value">6</p></div>
                  <div class="stat-item"><p class="name">Games Lost</p><p class="value">4</p></div>
                </div></div>
              </span>
            </blz-section>
          </div>
        </body></html>
    "#;

    fn request<'a>(platform: &'a str) -> DocumentRequest<'a> {
        DocumentRequest {
            tag: "Someone#1234",
            platform,
            fallback_name: "Fallback",
        }
    }

    #[test]
    fn extracts_public_profile() {
        let profile = load_builtin_profile();
        let player = extract_profile(PROFILE_HTML, request("pc"), &profile).unwrap();
        assert_eq!(player.name, "Someone");
        assert_eq!(player.icon, "https://cdn.example/portrait.png");
        assert_eq!(player.endorsement, 3);
        assert_eq!(player.ratings.len(), 1);
        assert_eq!(player.ratings[0].role, "tank");
        assert_eq!(player.ratings[0].tier, 3);
        assert!(!player.private);
        assert_eq!(player.quick_play_stats.top_heroes["tracer"].games_won, 42);
        let game = player.quick_play_stats.career_stats["allHeroes"]
            .game
            .as_ref()
            .unwrap();
        assert_eq!(game["gamesPlayed"], StatValue::Int(10));
        assert_eq!(player.competitive_stats.season, Some(9));
        assert!(player.competitive_stats.stats.top_heroes.is_empty());
        assert_eq!(
            (player.games_played, player.games_won, player.games_lost),
            (10, 6, 4)
        );
    }

    #[test]
    fn unsupported_platform_is_invalid_platform() {
        let profile = load_builtin_profile();
        let err = extract_profile(PROFILE_HTML, request("console"), &profile).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPlatform);
        let err = extract_profile(PROFILE_HTML, request("amiga"), &profile).unwrap_err();
        assert!(err.is_invalid_platform());
    }

    #[test]
    fn not_found_page_is_player_not_found() {
        let html = r#"<html><body><h2 slot="heading">Page Not Found</h2></body></html>"#;
        let err = extract_profile(html, request("pc"), &load_builtin_profile()).unwrap_err();
        assert!(err.is_player_not_found());
    }

    #[test]
    fn missing_masthead_is_malformed() {
        let html = "<html><body><p>maintenance</p></body></html>";
        let err = extract_profile(html, request("pc"), &load_builtin_profile()).unwrap_err();
        assert!(err.is_malformed_document());
    }

    #[test]
    fn missing_platform_views_is_malformed() {
        let html = r#"<html><body><blz-section class="Profile-masthead"></blz-section></body></html>"#;
        let err = extract_profile(html, request("pc"), &load_builtin_profile()).unwrap_err();
        assert!(err.is_malformed_document());
    }

    #[test]
    fn name_falls_back_to_search_display_name() {
        let html = PROFILE_HTML.replace(
            r#"<h1 class="Profile-player--name">Someone</h1>"#,
            "",
        );
        let player = extract_profile(&html, request("pc"), &load_builtin_profile()).unwrap();
        assert_eq!(player.name, "Fallback");
    }

    #[test]
    fn non_numeric_season_is_absent() {
        let html = PROFILE_HTML.replace(r#"="9""#, r#"="soon""#);
        let player = extract_profile(&html, request("pc"), &load_builtin_profile()).unwrap();
        assert_eq!(player.competitive_stats.season, None);
        let json = serde_json::to_value(&player).unwrap();
        assert!(json["competitiveStats"].get("season").is_none());
    }
}
