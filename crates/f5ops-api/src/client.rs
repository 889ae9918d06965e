// iControl REST HTTP client
//
// Wraps `reqwest::Client` with basic auth, base-URL joining, and the
// one-request-per-invocation contract. Callers hand in a resource path
// (see `f5ops_core::path`) and an optional JSON body; they get back the
// raw status and body, which `Outcome` classifies.

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use secrecy::ExposeSecret;
use tracing::{debug, trace};
use url::Url;

use crate::auth::{ConnectionTarget, Credentials};
use crate::error::Error;
use crate::outcome::RawResponse;
use crate::transport::TransportConfig;

/// Raw HTTP client for a BIG-IP management interface.
///
/// Holds no session state: every [`execute`](Self::execute) call sends
/// the basic-auth header afresh and nothing is pooled between calls.
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl DeviceClient {
    /// Create a client aimed at `target`, building the HTTP client from
    /// `transport` (TLS policy, timeout).
    pub fn new(
        target: &ConnectionTarget,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = target.base_url()?;
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL for an API path such as `/mgmt/tm/ltm/node/node1`.
    ///
    /// The path is appended verbatim. If URL parsing would encode, split,
    /// or resolve any part of it, the call fails with
    /// [`Error::InvalidPath`] instead of sending a different path.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{base}{path}"))?;

        let expected = format!("{}{path}", self.base_url.path().trim_end_matches('/'));
        if url.path() != expected || url.query().is_some() || url.fragment().is_some() {
            return Err(Error::InvalidPath(path.to_owned()));
        }
        Ok(url)
    }

    /// Send one request and read the whole response.
    ///
    /// A present `body` is sent as `application/json`. Non-2xx statuses
    /// are returned as data, not errors; only failures that prevent a
    /// response from being read end up in `Err`.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<RawResponse, Error> {
        let url = self.url(path)?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url).basic_auth(
            &self.credentials.user,
            Some(self.credentials.password.expose_secret()),
        );
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let resp = builder.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(Error::Transport)?;
        trace!(status = status.as_u16(), bytes = body.len(), "response read");

        Ok(RawResponse { status, body })
    }
}
