// ABOUTME: Configuration options for the stats client: timeouts, endpoints, headers, selector profile.
// ABOUTME: ClientBuilder provides a fluent API for constructing Client instances with custom settings.

use std::collections::HashMap;
use std::time::Duration;

use url::Url;

use crate::client::Client;
use crate::extractors::profile::SelectorProfile;

pub const DEFAULT_BASE_URL: &str = "https://overwatch.blizzard.com/en-us/career";
pub const DEFAULT_SEARCH_URL: &str = "https://overwatch.blizzard.com/en-us/search/account-by-name/";
pub const DEFAULT_USER_AGENT: &str = concat!("ovrstat/", env!("CARGO_PKG_VERSION"));

/// Configuration options for the stats client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    /// Profile pages live at `<base_url>/<Name-1234>/`.
    pub base_url: Url,
    /// The tag is appended as one path segment.
    pub search_url: Url,
    pub http_client: Option<reqwest::Client>,
    pub headers: HashMap<String, String>,
    pub selectors: Option<SelectorProfile>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            search_url: Url::parse(DEFAULT_SEARCH_URL).expect("default search URL is valid"),
            http_client: None,
            headers: HashMap::new(),
            selectors: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Set the profile page base URL.
    pub fn base_url(mut self, url: Url) -> Self {
        self.opts.base_url = url;
        self
    }

    /// Set the account search endpoint.
    pub fn search_url(mut self, url: Url) -> Self {
        self.opts.search_url = url;
        self
    }

    /// Use a custom HTTP client. Timeout and user agent are then the caller's concern.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Replace the builtin selector profile.
    pub fn selectors(mut self, profile: SelectorProfile) -> Self {
        self.opts.selectors = Some(profile);
        self
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
