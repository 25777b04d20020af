// ABOUTME: Error types for the stats pipeline including the ErrorCode enum and StatsError struct.
// ABOUTME: Callers match on the code; lower-level failures only travel as the source.

use std::fmt;

/// Error codes classifying every way the pipeline can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    PlayerNotFound,
    InvalidPlatform,
    UpstreamUnavailable,
    MalformedDocument,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::PlayerNotFound => "player not found",
            ErrorCode::InvalidPlatform => "invalid platform",
            ErrorCode::UpstreamUnavailable => "upstream unavailable",
            ErrorCode::MalformedDocument => "malformed document",
        };
        write!(f, "{}", s)
    }
}

/// The error returned by every pipeline entry point.
#[derive(Debug, thiserror::Error)]
pub struct StatsError {
    pub code: ErrorCode,
    pub tag: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ovrstat: {} {}: {}", self.op, self.tag, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl StatsError {
    fn new(
        code: ErrorCode,
        tag: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            tag: tag.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a PlayerNotFound error.
    pub fn player_not_found(
        tag: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::PlayerNotFound, tag, op, source)
    }

    /// Create an InvalidPlatform error.
    pub fn invalid_platform(
        tag: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::InvalidPlatform, tag, op, source)
    }

    /// Create an UpstreamUnavailable error.
    pub fn upstream_unavailable(
        tag: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::UpstreamUnavailable, tag, op, source)
    }

    /// Create a MalformedDocument error.
    pub fn malformed_document(
        tag: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::MalformedDocument, tag, op, source)
    }

    pub fn is_player_not_found(&self) -> bool {
        self.code == ErrorCode::PlayerNotFound
    }

    pub fn is_invalid_platform(&self) -> bool {
        self.code == ErrorCode::InvalidPlatform
    }

    pub fn is_upstream_unavailable(&self) -> bool {
        self.code == ErrorCode::UpstreamUnavailable
    }

    pub fn is_malformed_document(&self) -> bool {
        self.code == ErrorCode::MalformedDocument
    }
}
