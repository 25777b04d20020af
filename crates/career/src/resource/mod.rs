// ABOUTME: Upstream collaborator seam and its reqwest-backed implementation.
// ABOUTME: Fetches profile documents and account search results with size limits and charset decoding.

use std::collections::HashMap;
use std::future::Future;

use anyhow::{anyhow, bail, Context};
use bytes::Bytes;
use tracing::debug;
use url::Url;

use crate::account::AccountCandidate;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// The two network capabilities the pipeline consumes.
///
/// Implementations own transport concerns: timeouts, TLS, connection reuse.
/// The pipeline classifies every error returned here as upstream
/// unavailability and never retries.
pub trait Upstream: Send + Sync {
    /// Fetches a profile document and returns its decoded text.
    fn fetch_document(&self, url: &str) -> impl Future<Output = anyhow::Result<String>> + Send;

    /// Searches accounts by tag.
    fn search_accounts(
        &self,
        tag: &str,
    ) -> impl Future<Output = anyhow::Result<Vec<AccountCandidate>>> + Send;
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body, using the charset from the content-type header when present.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Decode body bytes using the content-type charset, falling back to detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract the charset value from a Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    lower.split(';').find_map(|part| {
        part.trim()
            .strip_prefix("charset=")
            .map(|charset| charset.trim_matches('"').trim_matches('\'').to_string())
    })
}

/// Issue a GET and return the body, rejecting non-200 and oversized responses.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    headers: &HashMap<String, String>,
) -> anyhow::Result<FetchResult> {
    let mut request = client.get(url);
    for (key, value) in headers {
        request = request.header(key, value);
    }

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            anyhow!("request timed out: {}", e)
        } else {
            anyhow!("request failed: {}", e)
        }
    })?;

    if let Some(len) = response.content_length() {
        if len as usize > MAX_CONTENT_LENGTH {
            bail!("content too large: {} bytes", len);
        }
    }

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response
        .bytes()
        .await
        .map_err(|e| anyhow!("failed to read body: {}", e))?;

    if body.len() > MAX_CONTENT_LENGTH {
        bail!("content too large: {} bytes", body.len());
    }
    if status != 200 {
        bail!("HTTP status {}", status);
    }

    debug!(url, status, bytes = body.len(), "fetched");
    Ok(FetchResult {
        status,
        content_type,
        body,
    })
}

/// Builds the search URL by appending `tag` as one percent-encoded path segment.
pub fn search_url(base: &Url, tag: &str) -> anyhow::Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("search URL cannot be a base: {}", base))?
        .pop_if_empty()
        .push(tag);
    Ok(url)
}

/// `Upstream` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    search_base: Url,
    headers: HashMap<String, String>,
}

impl HttpUpstream {
    pub fn new(client: reqwest::Client, search_base: Url, headers: HashMap<String, String>) -> Self {
        Self {
            client,
            search_base,
            headers,
        }
    }
}

impl Upstream for HttpUpstream {
    async fn fetch_document(&self, url: &str) -> anyhow::Result<String> {
        let result = fetch(&self.client, url, &self.headers).await?;
        Ok(result.text())
    }

    async fn search_accounts(&self, tag: &str) -> anyhow::Result<Vec<AccountCandidate>> {
        let url = search_url(&self.search_base, tag)?;
        let result = fetch(&self.client, url.as_str(), &self.headers).await?;
        serde_json::from_slice(&result.body).context("failed to decode account search response")
    }
}
