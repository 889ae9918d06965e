use std::net::{Ipv4Addr, Ipv6Addr};

use secrecy::SecretString;
use url::{Host, Url};

use crate::error::Error;

/// Default management port on a BIG-IP.
pub const DEFAULT_PORT: u16 = 443;

/// Credentials used when the caller supplies none.
pub const DEFAULT_USER: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin";

/// Where the management API lives.
///
/// Immutable for the life of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub host: String,
    pub port: u16,
    /// `https` unless a lab setup fronts the device with plain HTTP.
    pub scheme: String,
}

impl ConnectionTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            scheme: "https".into(),
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Root URL of the device, e.g. `https://f5.example.com:8443/`.
    ///
    /// `host` must be a bare name or address; IPv6 literals may be given
    /// with or without brackets. Anything that parses into a different
    /// host, or leaves userinfo, a path, a query, or a fragment behind, is
    /// rejected with [`Error::InvalidHost`].
    pub fn base_url(&self) -> Result<Url, Error> {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        let url = Url::parse(&format!("{}://{host}:{}", self.scheme, self.port))
            .map_err(|_| Error::InvalidHost(self.host.clone()))?;

        let bare = url.username().is_empty()
            && url.password().is_none()
            && url.path() == "/"
            && url.query().is_none()
            && url.fragment().is_none();
        if bare && host_matches(&url, &host) {
            Ok(url)
        } else {
            Err(Error::InvalidHost(self.host.clone()))
        }
    }
}

fn host_matches(url: &Url, given: &str) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case(given),
        Some(Host::Ipv4(addr)) => given.parse::<Ipv4Addr>().is_ok_and(|g| g == addr),
        Some(Host::Ipv6(addr)) => given
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<Ipv6Addr>()
            .is_ok_and(|g| g == addr),
        None => false,
    }
}

/// HTTP Basic credentials for the management API.
///
/// The password is a [`SecretString`] so it never shows up in `Debug`
/// output or log lines.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_USER, DEFAULT_PASSWORD)
    }
}
