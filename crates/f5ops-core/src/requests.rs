// ── Typed request bodies ──
//
// One struct per body shape. Field order here is the field order on the
// wire.

use serde::Serialize;

use crate::state::SessionState;

/// `tmsh`-style command run against `/mgmt/tm/cm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCommandRequest {
    pub command: &'static str,
    pub util_cmd_args: String,
}

impl RunCommandRequest {
    pub fn config_sync(device_group: &str) -> Self {
        Self {
            command: "run",
            util_cmd_args: format!("config-sync to-group {device_group}"),
        }
    }
}

/// UCS archive command posted to `/mgmt/tm/sys/ucs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UcsCommandRequest {
    pub command: &'static str,
    pub name: String,
}

impl UcsCommandRequest {
    pub fn save(file_path: &str) -> Self {
        Self {
            command: "save",
            name: file_path.to_owned(),
        }
    }
}

/// Node or pool-member availability update.
pub type MemberStateRequest = SessionState;

/// Replace a user's stored password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordHashRequest<'a> {
    pub encrypted_password: &'a str,
}
