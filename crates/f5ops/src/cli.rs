//! Clap derive structures for the `f5ops` CLI.
//!
//! Every action subcommand folds its flags into the same parameter map a
//! task runner would send on stdin, so both entry points share one
//! resolver.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use f5ops_core::params::keys;
use f5ops_core::{ActionKind, Params};
use strum::IntoEnumIterator;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// f5ops -- operational actions for F5 BIG-IP over iControl REST
#[derive(Debug, Parser)]
#[command(
    name = "f5ops",
    version,
    about = "Run operational actions against F5 BIG-IP devices",
    long_about = "Sync configuration, manage UCS archives, change node and pool-member\n\
        state, and rotate user password hashes through the iControl REST API.\n\n\
        Each invocation sends exactly one request and prints one JSON document.\n\
        Exit status is 0 when the device answers 200, 1 otherwise.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, env = "F5OPS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verify the device TLS certificate against the system store
    #[arg(long, global = true)]
    pub verify_tls: bool,

    /// Verify the device TLS certificate against this CA (PEM)
    #[arg(long, global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run an action with JSON parameters read from stdin
    Task(TaskArgs),

    /// Sync the device configuration to a device group
    #[command(alias = "sync")]
    ConfigSync(ConfigSyncArgs),

    /// Set a node to enabled, disabled, or offline
    #[command(alias = "node")]
    NodeState(NodeStateArgs),

    /// Set a pool member to enabled, disabled, or offline
    #[command(alias = "member")]
    MemberState(MemberStateArgs),

    /// Replace a user's stored password hash
    SetPassword(SetPasswordArgs),

    /// Save a UCS configuration archive on the device
    UcsSave(UcsSaveArgs),

    /// Delete a UCS configuration archive from the device
    UcsDelete(UcsDeleteArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Task ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TaskArgs {
    /// Action to run
    #[arg(value_parser = parse_action_kind)]
    pub action: ActionKind,

    /// Parameters as a JSON object (read from stdin when omitted)
    #[arg(long)]
    pub params: Option<String>,
}

fn parse_action_kind(raw: &str) -> Result<ActionKind, String> {
    raw.parse().map_err(|_| {
        let valid: Vec<String> = ActionKind::iter().map(|k| k.to_string()).collect();
        format!("unknown action '{raw}' (expected one of: {})", valid.join(", "))
    })
}

// ── Shared device arguments ──────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DeviceArgs {
    /// Resolvable name or address of the BIG-IP
    #[arg(long, short = 'd', env = "F5_DEVICE")]
    pub device_name: String,

    /// Management API port [default: 443]
    #[arg(long)]
    pub device_port: Option<u16>,

    /// API username [default: admin]
    #[arg(long, env = "F5_API_USER")]
    pub api_user: Option<String>,

    /// API password [default: admin]
    #[arg(long, env = "F5_API_PASSWORD", hide_env_values = true)]
    pub api_password: Option<String>,
}

impl DeviceArgs {
    fn params(&self) -> Params {
        Params::new()
            .with(keys::DEVICE_NAME, Some(self.device_name.as_str()))
            .with(keys::DEVICE_PORT, self.device_port)
            .with(keys::API_USER, self.api_user.as_deref())
            .with(keys::API_PASSWORD, self.api_password.as_deref())
    }
}

// ── Action arguments ─────────────────────────────────────────────────

/// Conversion of a subcommand's flags into task parameters.
pub trait ActionArgs {
    const KIND: ActionKind;

    fn to_params(&self) -> Params;
}

#[derive(Debug, Args)]
pub struct ConfigSyncArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Device group to sync to [default: device_trust_group]
    #[arg(long)]
    pub device_group: Option<String>,
}

impl ActionArgs for ConfigSyncArgs {
    const KIND: ActionKind = ActionKind::ConfigSync;

    fn to_params(&self) -> Params {
        self.device
            .params()
            .with(keys::DEVICE_GROUP, self.device_group.as_deref())
    }
}

#[derive(Debug, Args)]
pub struct NodeStateArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Node to modify
    #[arg(long, short = 'n')]
    pub node_name: String,

    /// Target state: enabled, disabled, or offline
    #[arg(long, short = 's')]
    pub state: String,
}

impl ActionArgs for NodeStateArgs {
    const KIND: ActionKind = ActionKind::SetNodeState;

    fn to_params(&self) -> Params {
        self.device
            .params()
            .with(keys::NODE_NAME, Some(self.node_name.as_str()))
            .with(keys::NODE_STATE, Some(self.state.as_str()))
    }
}

#[derive(Debug, Args)]
pub struct MemberStateArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Pool containing the member
    #[arg(long)]
    pub pool_name: String,

    /// Member name, usually `<address>:<port>`
    #[arg(long, short = 'm')]
    pub member_name: String,

    /// Partition of the member [default: Common]
    #[arg(long)]
    pub partition_name: Option<String>,

    /// Target state: enabled, disabled, or offline
    #[arg(long, short = 's')]
    pub state: String,
}

impl ActionArgs for MemberStateArgs {
    const KIND: ActionKind = ActionKind::SetPoolMemberState;

    fn to_params(&self) -> Params {
        self.device
            .params()
            .with(keys::POOL_NAME, Some(self.pool_name.as_str()))
            .with(keys::MEMBER_NAME, Some(self.member_name.as_str()))
            .with(keys::PARTITION_NAME, self.partition_name.as_deref())
            .with(keys::MEMBER_STATE, Some(self.state.as_str()))
    }
}

#[derive(Debug, Args)]
pub struct SetPasswordArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// User whose password hash is replaced
    #[arg(long, short = 'u')]
    pub target_user: String,

    /// New password hash, in the device's crypt format
    #[arg(long, env = "F5_TARGET_PASSWORD_HASH", hide_env_values = true)]
    pub target_password_hash: String,
}

impl ActionArgs for SetPasswordArgs {
    const KIND: ActionKind = ActionKind::SetPassword;

    fn to_params(&self) -> Params {
        self.device
            .params()
            .with(keys::TARGET_USER, Some(self.target_user.as_str()))
            .with(
                keys::TARGET_PASSWORD_HASH,
                Some(self.target_password_hash.as_str()),
            )
    }
}

#[derive(Debug, Args)]
pub struct UcsSaveArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Full archive path on the device [default: /var/local/ucs/backup-<YYYYMMDD>.ucs]
    #[arg(long, short = 'f')]
    pub file_path: Option<String>,
}

impl ActionArgs for UcsSaveArgs {
    const KIND: ActionKind = ActionKind::UcsSave;

    fn to_params(&self) -> Params {
        self.device
            .params()
            .with(keys::FILE_PATH, self.file_path.as_deref())
    }
}

#[derive(Debug, Args)]
pub struct UcsDeleteArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Archive file name in /var/local/ucs [default: backup-<YYYYMMDD>.ucs]
    #[arg(long, short = 'f')]
    pub file_name: Option<String>,
}

impl ActionArgs for UcsDeleteArgs {
    const KIND: ActionKind = ActionKind::UcsDelete;

    fn to_params(&self) -> Params {
        self.device
            .params()
            .with(keys::FILE_NAME, self.file_name.as_deref())
    }
}

// ── Config & completions ─────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
