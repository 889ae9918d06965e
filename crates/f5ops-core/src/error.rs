// ── Core error types ──
//
// Failures that end an invocation without a device response. A device
// answering 401 or 500 is NOT an error here -- it is an `Outcome`.
// The `From<f5ops_api::Error>` impl folds transport-layer errors into
// these variants.

use serde_json::{Value, json};
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: &'static str },

    #[error("Invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Task parameters must be a JSON object, got {found}")]
    InvalidParameters { found: String },

    #[error("Cannot encode request body: {message}")]
    Encode { message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to device at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Transport error: {message}")]
    Transport { url: String, message: String },

    #[error("TLS error: {message}")]
    Tls { message: String },

    #[error("Invalid device URL: {message}")]
    InvalidUrl { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Stable slug identifying the failure class in the task error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingParameter { .. }
            | Self::InvalidParameter { .. }
            | Self::InvalidParameters { .. }
            | Self::Encode { .. } => "f5ops/input-validation",
            Self::ConnectionFailed { .. } | Self::Timeout { .. } | Self::Transport { .. } => {
                "f5ops/transport"
            }
            Self::Tls { .. } => "f5ops/tls",
            Self::InvalidUrl { .. } => "f5ops/invalid-url",
            Self::Config { .. } => "f5ops/config",
        }
    }

    /// Returns `true` for failures detected before any network activity.
    pub fn is_input_error(&self) -> bool {
        self.kind() == "f5ops/input-validation"
    }

    /// Structured details for the task error envelope.
    pub fn details(&self) -> Value {
        match self {
            Self::MissingParameter { name } => json!({ "parameter": name }),
            Self::InvalidParameter { name, reason } => {
                json!({ "parameter": name, "reason": reason })
            }
            Self::ConnectionFailed { url, .. }
            | Self::Timeout { url }
            | Self::Transport { url, .. } => json!({ "url": url }),
            _ => json!({}),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<f5ops_api::Error> for CoreError {
    fn from(err: f5ops_api::Error) -> Self {
        match err {
            f5ops_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    CoreError::Timeout { url }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Transport {
                        url,
                        message: e.to_string(),
                    }
                }
            }
            f5ops_api::Error::InvalidUrl(e) => CoreError::InvalidUrl {
                message: e.to_string(),
            },
            f5ops_api::Error::InvalidHost(host) => CoreError::InvalidParameter {
                name: "device_name",
                reason: format!("{host:?} is not a bare host name or address"),
            },
            f5ops_api::Error::InvalidPath(path) => CoreError::InvalidUrl {
                message: format!("path {path:?} would not be sent verbatim"),
            },
            f5ops_api::Error::Tls(message) => CoreError::Tls { message },
        }
    }
}
