//! Action descriptors.
//!
//! Every supported operation resolves from raw [`Params`] into an
//! [`Action`]: where to connect, as whom, and an [`Operation`] that knows
//! its HTTP method, resource path, and request body. The dispatcher
//! treats all six the same way.

use bytes::Bytes;
use chrono::{Local, NaiveDate};
use f5ops_api::{
    ConnectionTarget, Credentials, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_USER, Method,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use crate::error::CoreError;
use crate::params::{Params, keys};
use crate::path;
use crate::requests::{PasswordHashRequest, RunCommandRequest, UcsCommandRequest};
use crate::state::{SessionState, map_state};

pub const DEFAULT_DEVICE_GROUP: &str = "device_trust_group";
pub const DEFAULT_PARTITION: &str = "Common";
pub const UCS_DIRECTORY: &str = "/var/local/ucs";

/// The six supported operations, named as their packaged tasks are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    ConfigSync,
    UcsSave,
    UcsDelete,
    SetNodeState,
    SetPoolMemberState,
    SetPassword,
}

/// A fully resolved operation with its resource identifiers.
#[derive(Debug, Clone)]
pub enum Operation {
    ConfigSync {
        device_group: String,
    },
    UcsSave {
        file_path: String,
    },
    UcsDelete {
        file_name: String,
    },
    NodeState {
        node_name: String,
        state: SessionState,
    },
    PoolMemberState {
        pool_name: String,
        partition_name: String,
        member_name: String,
        state: SessionState,
    },
    SetPassword {
        target_user: String,
        password_hash: SecretString,
    },
}

/// One invocation's worth of work: target, credentials, operation.
#[derive(Debug, Clone)]
pub struct Action {
    pub target: ConnectionTarget,
    pub credentials: Credentials,
    pub operation: Operation,
}

/// Default UCS archive name for `date`: `backup-YYYYMMDD.ucs`.
pub fn default_ucs_file_name(date: NaiveDate) -> String {
    format!("backup-{}.ucs", date.format("%Y%m%d"))
}

impl Action {
    /// Resolve raw parameters against the local calendar date.
    pub fn resolve_now(kind: ActionKind, params: &Params) -> Result<Self, CoreError> {
        Self::resolve(kind, params, Local::now().date_naive())
    }

    /// Validate and default `params` into an action.
    ///
    /// `today` only feeds the default UCS archive name.
    pub fn resolve(kind: ActionKind, params: &Params, today: NaiveDate) -> Result<Self, CoreError> {
        let target = ConnectionTarget::new(
            params.required(keys::DEVICE_NAME)?,
            params.port(keys::DEVICE_PORT, DEFAULT_PORT)?,
        );
        target.base_url()?;
        let credentials = Credentials::new(
            params.or_default(keys::API_USER, DEFAULT_USER),
            params.or_default(keys::API_PASSWORD, DEFAULT_PASSWORD),
        );

        let operation = match kind {
            ActionKind::ConfigSync => Operation::ConfigSync {
                device_group: params.identifier_or(keys::DEVICE_GROUP, DEFAULT_DEVICE_GROUP)?,
            },
            ActionKind::UcsSave => {
                let default = format!("{UCS_DIRECTORY}/{}", default_ucs_file_name(today));
                Operation::UcsSave {
                    file_path: params.identifier_or(keys::FILE_PATH, &default)?,
                }
            }
            ActionKind::UcsDelete => Operation::UcsDelete {
                file_name: params.segment_or(keys::FILE_NAME, &default_ucs_file_name(today))?,
            },
            ActionKind::SetNodeState => Operation::NodeState {
                node_name: params.segment(keys::NODE_NAME)?,
                state: map_state(params.get(keys::NODE_STATE).as_deref()),
            },
            ActionKind::SetPoolMemberState => Operation::PoolMemberState {
                pool_name: params.segment(keys::POOL_NAME)?,
                partition_name: params.segment_or(keys::PARTITION_NAME, DEFAULT_PARTITION)?,
                member_name: params.segment(keys::MEMBER_NAME)?,
                state: map_state(params.get(keys::MEMBER_STATE).as_deref()),
            },
            ActionKind::SetPassword => Operation::SetPassword {
                target_user: params.segment(keys::TARGET_USER)?,
                password_hash: SecretString::from(params.required(keys::TARGET_PASSWORD_HASH)?),
            },
        };

        Ok(Self {
            target,
            credentials,
            operation,
        })
    }

    pub fn kind(&self) -> ActionKind {
        self.operation.kind()
    }
}

impl Operation {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::ConfigSync { .. } => ActionKind::ConfigSync,
            Self::UcsSave { .. } => ActionKind::UcsSave,
            Self::UcsDelete { .. } => ActionKind::UcsDelete,
            Self::NodeState { .. } => ActionKind::SetNodeState,
            Self::PoolMemberState { .. } => ActionKind::SetPoolMemberState,
            Self::SetPassword { .. } => ActionKind::SetPassword,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::ConfigSync { .. } | Self::UcsSave { .. } => Method::POST,
            Self::NodeState { .. } | Self::PoolMemberState { .. } | Self::SetPassword { .. } => {
                Method::PUT
            }
            Self::UcsDelete { .. } => Method::DELETE,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::ConfigSync { .. } => path::CONFIG_SYNC.to_owned(),
            Self::UcsSave { .. } => path::UCS.to_owned(),
            Self::UcsDelete { file_name } => path::ucs_archive(file_name),
            Self::NodeState { node_name, .. } => path::node(node_name),
            Self::PoolMemberState {
                pool_name,
                partition_name,
                member_name,
                ..
            } => path::pool_member(pool_name, partition_name, member_name),
            Self::SetPassword { target_user, .. } => path::auth_user(target_user),
        }
    }

    /// Compact JSON request body, or `None` for body-less requests.
    pub fn body(&self) -> Result<Option<Bytes>, CoreError> {
        let body = match self {
            Self::ConfigSync { device_group } => {
                to_body(&RunCommandRequest::config_sync(device_group))?
            }
            Self::UcsSave { file_path } => to_body(&UcsCommandRequest::save(file_path))?,
            Self::UcsDelete { .. } => return Ok(None),
            Self::NodeState { state, .. } | Self::PoolMemberState { state, .. } => {
                to_body(state)?
            }
            Self::SetPassword { password_hash, .. } => to_body(&PasswordHashRequest {
                encrypted_password: password_hash.expose_secret(),
            })?,
        };
        Ok(Some(body))
    }
}

fn to_body<T: Serialize + ?Sized>(value: &T) -> Result<Bytes, CoreError> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|e| CoreError::Encode {
            message: e.to_string(),
        })
}
