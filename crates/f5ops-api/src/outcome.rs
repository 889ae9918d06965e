// Response classification
//
// Every action ends in exactly one `Outcome`. The device answers 401 with an
// HTML error page, which is swapped for a fixed JSON document so callers can
// always parse what we print.

use bytes::Bytes;
use reqwest::StatusCode;

/// Body printed in place of the device's HTML 401 page.
pub const AUTH_REQUIRED_BODY: &str = r#"{"code":401,"message":"Authentication required"}"#;

/// How an HTTP result is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    AuthRequired,
    OtherFailure,
}

impl Classification {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Status and body exactly as read off the wire.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// The classified, render-ready result of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: u16,
    pub body: Bytes,
    pub classification: Classification,
}

impl Outcome {
    /// Classify a status/body pair.
    ///
    /// - 401: [`Classification::AuthRequired`], body replaced by [`AUTH_REQUIRED_BODY`]
    /// - 200: [`Classification::Success`], body untouched
    /// - anything else: [`Classification::OtherFailure`], body untouched
    pub fn classify(status: StatusCode, body: Bytes) -> Self {
        let (classification, body) = match status {
            StatusCode::UNAUTHORIZED => (
                Classification::AuthRequired,
                Bytes::from_static(AUTH_REQUIRED_BODY.as_bytes()),
            ),
            StatusCode::OK => (Classification::Success, body),
            _ => (Classification::OtherFailure, body),
        };
        Self {
            status: status.as_u16(),
            body,
            classification,
        }
    }
}

impl From<RawResponse> for Outcome {
    fn from(raw: RawResponse) -> Self {
        Self::classify(raw.status, raw.body)
    }
}
