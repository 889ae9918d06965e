// ── Lifecycle state mapping ──
//
// BIG-IP models node and pool-member availability on two axes: whether
// new sessions are accepted (`session`) and the administrative up/down
// (`state`). Operators think in three states; this module translates.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};
use tracing::warn;

/// Operator-facing availability of a node or pool member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LifecycleState {
    /// Accepting new connections.
    Enabled,
    /// Finishing existing connections, refusing new ones.
    Disabled,
    /// Forced down: no traffic at all.
    Offline,
}

/// The (session, state) pair sent in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub session: &'static str,
    pub state: &'static str,
}

impl SessionState {
    /// Sent when the requested state is not recognized.
    pub const UNSET: Self = Self {
        session: "",
        state: "",
    };
}

impl LifecycleState {
    pub fn session_state(self) -> SessionState {
        match self {
            Self::Enabled => SessionState {
                session: "user-enabled",
                state: "user-up",
            },
            Self::Disabled => SessionState {
                session: "user-disabled",
                state: "user-up",
            },
            Self::Offline => SessionState {
                session: "user-disabled",
                state: "user-down",
            },
        }
    }
}

/// Map a raw state parameter onto the device's pair.
///
/// Only the exact strings `enabled`, `disabled`, and `offline` are
/// recognized. Anything else, including an absent value, yields
/// [`SessionState::UNSET`] and the request still goes out with empty
/// fields.
pub fn map_state(raw: Option<&str>) -> SessionState {
    let Some(raw) = raw else {
        warn!("no lifecycle state given, sending empty session/state");
        return SessionState::UNSET;
    };
    if let Ok(state) = raw.parse::<LifecycleState>() {
        state.session_state()
    } else {
        warn!(state = raw, "unrecognized lifecycle state, sending empty session/state");
        SessionState::UNSET
    }
}
