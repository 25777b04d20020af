// ABOUTME: The stats Client: resolves the account, fetches the profile document and extracts it.
// ABOUTME: Provides async stats() over an Upstream and stats_from_html() for saved documents.

use anyhow::anyhow;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::account::{display_name, resolve, AccountStatus, Resolution};
use crate::error::StatsError;
use crate::extractors::document::{extract_profile, DocumentRequest};
use crate::extractors::loader::load_builtin_profile;
use crate::extractors::profile::SelectorProfile;
use crate::models::PlayerProfile;
use crate::options::{ClientBuilder, Options};
use crate::resource::{HttpUpstream, Upstream};

/// Builds the profile page URL: `<base>/<Name-1234>/`.
pub fn profile_url(base: &Url, tag: &str) -> anyhow::Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("profile base URL cannot be a base: {}", base))?
        .pop_if_empty()
        .push(&tag.replace('#', "-"))
        .push("");
    Ok(url)
}

/// The degraded result for a private account: identity and visibility only.
pub fn private_profile(resolution: &Resolution) -> PlayerProfile {
    PlayerProfile {
        name: resolution.display_name.clone(),
        icon: resolution
            .candidate
            .as_ref()
            .map(|c| c.portrait.clone())
            .unwrap_or_default(),
        private: true,
        ..Default::default()
    }
}

/// Player stats client.
///
/// Holds no per-player state; one client serves any number of concurrent
/// lookups.
pub struct Client<U = HttpUpstream> {
    opts: Options,
    upstream: U,
    selectors: SelectorProfile,
}

impl Client<HttpUpstream> {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client backed by HTTP with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });
        let upstream = HttpUpstream::new(
            http_client,
            opts.search_url.clone(),
            opts.headers.clone(),
        );
        Self::with_upstream(opts, upstream)
    }
}

impl<U: Upstream> Client<U> {
    /// Create a Client over any upstream implementation.
    pub fn with_upstream(opts: Options, upstream: U) -> Self {
        let selectors = opts.selectors.clone().unwrap_or_else(load_builtin_profile);
        Self {
            opts,
            upstream,
            selectors,
        }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn selectors(&self) -> &SelectorProfile {
        &self.selectors
    }

    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Profile page URL for `tag` under the configured base.
    pub fn profile_url(&self, tag: &str) -> Result<Url, StatsError> {
        profile_url(&self.opts.base_url, tag)
            .map_err(|e| StatsError::upstream_unavailable(tag, "FetchDocument", Some(e)))
    }

    /// Looks up `tag` and extracts its stats for `platform`.
    ///
    /// Private accounts succeed with `private = true`; their document is never
    /// fetched.
    #[instrument(skip(self))]
    pub async fn stats(&self, platform: &str, tag: &str) -> Result<PlayerProfile, StatsError> {
        let resolution = resolve(&self.upstream, tag).await.inspect_err(|e| {
            warn!(error = %e, "account search failed");
        })?;

        match resolution.status {
            AccountStatus::NotFound => {
                return Err(StatsError::player_not_found(
                    tag,
                    "ResolveAccount",
                    Some(anyhow!("account search returned no candidates")),
                ));
            }
            AccountStatus::Private => {
                debug!("profile is private");
                return Ok(private_profile(&resolution));
            }
            AccountStatus::Public => {}
        }

        let url = self.profile_url(&resolution.canonical_tag)?;
        let html = self
            .upstream
            .fetch_document(url.as_str())
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "profile fetch failed");
                StatsError::upstream_unavailable(tag, "FetchDocument", Some(e))
            })?;

        extract_profile(
            &html,
            DocumentRequest {
                tag,
                platform,
                fallback_name: &resolution.display_name,
            },
            &self.selectors,
        )
    }

    /// Extracts stats from an already fetched profile document.
    ///
    /// The account search is skipped and the profile is treated as public.
    #[instrument(skip(self, html), fields(bytes = html.len()))]
    pub fn stats_from_html(
        &self,
        html: &str,
        platform: &str,
        tag: &str,
    ) -> Result<PlayerProfile, StatsError> {
        extract_profile(
            html,
            DocumentRequest {
                tag,
                platform,
                fallback_name: display_name(tag),
            },
            &self.selectors,
        )
    }
}
