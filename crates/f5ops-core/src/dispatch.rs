// ── Action dispatch and rendering ──
//
// resolve → request → classify → render. Exactly one request goes out per
// call; the HTTP client is built here and dropped on every exit path.

use bytes::Bytes;
use f5ops_api::{DeviceClient, Outcome};
use serde_json::json;
use tracing::{debug, info};

use crate::action::{Action, ActionKind};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::params::Params;

/// Process exit status for a successful action.
pub const EXIT_SUCCESS: i32 = 0;
/// Process exit status for every failure class.
pub const EXIT_FAILURE: i32 = 1;

/// Send `action` to its device and classify the response.
///
/// Transport failures come back as `Err`; any HTTP response, whatever its
/// status, comes back as an [`Outcome`].
pub async fn execute(action: &Action, config: &ClientConfig) -> Result<Outcome, CoreError> {
    let target = action.target.clone().with_scheme(config.scheme.as_str());
    let client = DeviceClient::new(&target, action.credentials.clone(), &config.transport())?;

    let operation = &action.operation;
    info!(
        action = %action.kind(),
        host = %target.host,
        port = target.port,
        "dispatching action"
    );

    let raw = client
        .execute(operation.method(), &operation.path(), operation.body()?)
        .await?;
    let outcome = Outcome::from(raw);
    debug!(
        status = outcome.status,
        classification = ?outcome.classification,
        "device responded"
    );
    Ok(outcome)
}

/// Resolve `params` for `kind` against today's date and execute it.
pub async fn run(
    kind: ActionKind,
    params: &Params,
    config: &ClientConfig,
) -> Result<Outcome, CoreError> {
    let action = Action::resolve_now(kind, params)?;
    execute(&action, config).await
}

/// What goes to stdout, and the process exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub body: Bytes,
    pub exit_code: i32,
}

/// Render the single result of an invocation.
///
/// Device responses print their (classified) body. Failures without a
/// device response print a task error envelope:
/// `{"_error":{"kind":..,"msg":..,"details":{..}}}`.
pub fn render(result: &Result<Outcome, CoreError>) -> Rendered {
    match result {
        Ok(outcome) => Rendered {
            body: outcome.body.clone(),
            exit_code: if outcome.classification.is_success() {
                EXIT_SUCCESS
            } else {
                EXIT_FAILURE
            },
        },
        Err(err) => {
            let envelope = json!({
                "_error": {
                    "kind": err.kind(),
                    "msg": err.to_string(),
                    "details": err.details(),
                }
            });
            Rendered {
                body: Bytes::from(envelope.to_string()),
                exit_code: EXIT_FAILURE,
            }
        }
    }
}
