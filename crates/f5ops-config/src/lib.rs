//! Shared configuration: TOML file + `F5OPS_*` environment, resolved into
//! `f5ops_core::ClientConfig`.
//!
//! Per-invocation values (device, credentials, identifiers) are task
//! parameters and never live here. This file only tunes how the one
//! request goes out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use f5ops_core::{ClientConfig, TlsVerification};

/// Environment variable prefix for config overrides.
pub const ENV_PREFIX: &str = "F5OPS_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ── TOML config struct ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Verify the device certificate against the system store.
    #[serde(default)]
    pub verify_tls: bool,

    /// Verify against this CA instead (implies verification).
    pub ca_cert: Option<PathBuf>,

    /// Request timeout. Unset means no deadline.
    pub timeout_secs: Option<u64>,

    /// `https`, or `http` for a device behind a plain-HTTP proxy.
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verify_tls: false,
            ca_cert: None,
            timeout_secs: None,
            scheme: default_scheme(),
        }
    }
}

fn default_scheme() -> String {
    "https".into()
}

impl Config {
    /// Translate into the runtime config the dispatcher consumes.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let scheme = self.scheme.to_ascii_lowercase();
        if scheme != "https" && scheme != "http" {
            return Err(ConfigError::Invalid {
                field: "scheme",
                reason: format!("expected 'https' or 'http', got '{}'", self.scheme),
            });
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                field: "timeout_secs",
                reason: "must be at least 1 second; leave unset for no timeout".into(),
            });
        }

        let tls = if let Some(ref ca) = self.ca_cert {
            TlsVerification::CustomCa(ca.clone())
        } else if self.verify_tls {
            TlsVerification::SystemDefaults
        } else {
            TlsVerification::DangerAcceptInvalid
        };

        Ok(ClientConfig {
            tls,
            timeout: self.timeout_secs.map(Duration::from_secs),
            scheme,
        })
    }

    /// Render as TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "f5ops", "f5ops").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("f5ops");
    p
}

// ── Config loading ───────────────────────────────────────────────────

/// Defaults, then the TOML file at `path` (if present), then `F5OPS_*`.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
}

/// Load config from `path`. A missing file is fine; a malformed one is not.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(figment(path).extract()?)
}

/// Load config from the default location.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}
