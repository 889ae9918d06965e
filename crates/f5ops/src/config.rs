//! CLI configuration — thin wrapper around `f5ops_config`.
//!
//! Adds the `GlobalOpts` flag overrides (--config, --verify-tls,
//! --ca-cert, --timeout) on top of file + environment.

use std::path::PathBuf;

use f5ops_config::{Config, load_config_from};
use f5ops_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file in effect: `--config` / `F5OPS_CONFIG`, else the default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(f5ops_config::config_path)
}

/// Load file + environment, then apply flag overrides.
pub fn effective_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut config = load_config_from(&config_path(global))?;

    if global.verify_tls {
        config.verify_tls = true;
    }
    if let Some(ref ca) = global.ca_cert {
        config.ca_cert = Some(ca.clone());
    }
    if let Some(timeout) = global.timeout {
        config.timeout_secs = Some(timeout);
    }

    Ok(config)
}

/// The runtime client config for action commands.
pub fn client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    Ok(effective_config(global)?.client_config()?)
}
