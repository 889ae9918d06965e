use thiserror::Error;

/// Top-level error type for the `f5ops-api` crate.
///
/// Only failures that prevent a response from being read live here.
/// A device answering with a non-200 status is not an error at this
/// layer -- it becomes an [`Outcome`](crate::Outcome) with a failure
/// classification.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, TLS handshake, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The device host does not survive URL parsing unchanged (it carries
    /// a port, path, userinfo, query, or fragment of its own).
    #[error("Invalid device host: {0:?}")]
    InvalidHost(String),

    /// A resource path the URL parser would rewrite before sending.
    #[error("Path would be rewritten by URL parsing: {0:?}")]
    InvalidPath(String),

    /// TLS configuration error (unreadable or invalid CA certificate).
    #[error("TLS error: {0}")]
    Tls(String),
}

impl Error {
    /// Returns `true` if the request never reached the device.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if the configured request timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}
