//! CLI error types with miette diagnostics.
//!
//! These cover failures outside an action (configuration, stdin). Action
//! failures are rendered as JSON on stdout by `f5ops_core::render`.

use miette::Diagnostic;
use thiserror::Error;

use f5ops_config::ConfigError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = f5ops_core::EXIT_SUCCESS;
    pub const FAILURE: i32 = f5ops_core::EXIT_FAILURE;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────

    #[error("Invalid configuration")]
    #[diagnostic(
        code(f5ops::config),
        help(
            "Check the file printed by: f5ops config path\n\
             and any F5OPS_* environment variables."
        )
    )]
    Config(#[from] ConfigError),

    // ── IO ───────────────────────────────────────────────────────────

    #[error("IO error")]
    #[diagnostic(code(f5ops::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Io(_) => exit_code::FAILURE,
        }
    }
}
