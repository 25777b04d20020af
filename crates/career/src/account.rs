// ABOUTME: Account resolution: maps a player tag to existence and visibility via the search endpoint.
// ABOUTME: Defines AccountCandidate (the search payload) and the Resolution handed to the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StatsError;
use crate::resource::Upstream;

/// One entry of the account search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountCandidate {
    pub battle_tag: String,
    pub frame: String,
    pub is_public: bool,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub last_updated: Option<DateTime<Utc>>,
    pub namecard: String,
    pub portrait: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    NotFound,
    Private,
    Public,
}

/// Outcome of resolving a tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub status: AccountStatus,
    pub display_name: String,
    pub canonical_tag: String,
    pub candidate: Option<AccountCandidate>,
}

/// Display name of a battle tag: everything before the discriminator.
pub fn display_name(tag: &str) -> &str {
    tag.split('#').next().unwrap_or(tag)
}

/// Classifies a search result set. Only the first candidate is considered.
pub fn classify(tag: &str, candidates: Vec<AccountCandidate>) -> Resolution {
    let Some(first) = candidates.into_iter().next() else {
        return Resolution {
            status: AccountStatus::NotFound,
            display_name: display_name(tag).to_string(),
            canonical_tag: tag.to_string(),
            candidate: None,
        };
    };

    let canonical_tag = if first.battle_tag.is_empty() {
        tag.to_string()
    } else {
        first.battle_tag.clone()
    };
    let status = if first.is_public {
        AccountStatus::Public
    } else {
        AccountStatus::Private
    };

    Resolution {
        status,
        display_name: display_name(&canonical_tag).to_string(),
        canonical_tag,
        candidate: Some(first),
    }
}

/// Looks `tag` up through the search collaborator.
///
/// No retries; any transport or decode failure is `UpstreamUnavailable`.
pub async fn resolve<U: Upstream>(upstream: &U, tag: &str) -> Result<Resolution, StatsError> {
    let candidates = upstream
        .search_accounts(tag)
        .await
        .map_err(|e| StatsError::upstream_unavailable(tag, "ResolveAccount", Some(e)))?;

    debug!(tag, candidates = candidates.len(), "account search returned");
    Ok(classify(tag, candidates))
}
