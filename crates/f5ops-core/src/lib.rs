//! Action layer between `f5ops-api` and the `f5ops` CLI.
//!
//! - **[`Params`]** — the raw key→value task parameters, with typed,
//!   defaulting accessors.
//! - **[`Action`]** — a resolved descriptor: connection target,
//!   credentials, and an [`Operation`] that yields its HTTP method,
//!   resource path ([`path`]), and request body ([`requests`]).
//! - **[`map_state`]** — operator lifecycle states onto the device's
//!   session/state pair.
//! - **[`dispatch`]** — sends one request per action, classifies the
//!   response, and [`render`]s the printable result with its exit status.

pub mod action;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod params;
pub mod path;
pub mod requests;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::{Action, ActionKind, Operation, default_ucs_file_name};
pub use config::{ClientConfig, TlsVerification};
pub use dispatch::{EXIT_FAILURE, EXIT_SUCCESS, Rendered, execute, render, run};
pub use error::CoreError;
pub use params::Params;
pub use state::{LifecycleState, SessionState, map_state};

pub use f5ops_api::{AUTH_REQUIRED_BODY, Classification, Outcome};
