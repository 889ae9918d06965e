// ── Runtime connection configuration ──
//
// These types describe *how* to reach a device: TLS policy, timeout, and
// scheme. They never touch disk -- the CLI builds a `ClientConfig` from
// its config file and flags and hands it in. Per-invocation data (host,
// port, credentials) comes from task parameters instead.

use std::time::Duration;

use f5ops_api::{TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification. Default, since BIG-IP management interfaces
    /// usually present a self-signed certificate.
    #[default]
    DangerAcceptInvalid,
}

/// Connection tuning shared by every action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub tls: TlsVerification,
    /// Overall request deadline. `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// URL scheme for the management interface.
    pub scheme: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tls: TlsVerification::default(),
            timeout: None,
            scheme: "https".into(),
        }
    }
}

impl ClientConfig {
    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
