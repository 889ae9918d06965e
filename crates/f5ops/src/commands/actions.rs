//! Action command handlers.
//!
//! Flag-driven subcommands and `task` both end here: parameters in, one
//! device request, the rendered body on stdout, and its exit status.
//! Every failure on this path, configuration included, is rendered as a
//! JSON document on stdout.

use std::io::Read;

use f5ops_core::{ActionKind, CoreError, Outcome, Params, render};
use tracing::debug;

use crate::cli::{ActionArgs, GlobalOpts, TaskArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Run a flag-driven action subcommand.
pub async fn handle<A: ActionArgs>(args: &A, global: &GlobalOpts) -> Result<i32, CliError> {
    run_and_print(A::KIND, Ok(args.to_params()), global).await
}

/// Run `task <action>` with parameters from `--params` or stdin.
pub async fn handle_task(args: TaskArgs, global: &GlobalOpts) -> Result<i32, CliError> {
    let params = match args.params {
        Some(json) => Params::from_json(&json),
        None => read_params(std::io::stdin().lock()),
    };
    run_and_print(args.action, params, global).await
}

/// Read a parameter document as raw bytes; unreadable or non-UTF-8 input
/// is a parameter error like any other malformed input.
fn read_params(mut input: impl Read) -> Result<Params, CoreError> {
    let mut buf = Vec::new();
    input
        .read_to_end(&mut buf)
        .map_err(|e| CoreError::InvalidParameters {
            found: format!("unreadable input ({e})"),
        })?;
    let text = String::from_utf8(buf).map_err(|e| CoreError::InvalidParameters {
        found: format!("input that is not UTF-8 ({e})"),
    })?;
    Params::from_json(&text)
}

async fn run_and_print(
    kind: ActionKind,
    params: Result<Params, CoreError>,
    global: &GlobalOpts,
) -> Result<i32, CliError> {
    let result: Result<Outcome, CoreError> = match (config::client_config(global), params) {
        (Err(CliError::Config(err)), _) => Err(CoreError::Config {
            message: err.to_string(),
        }),
        (Err(other), _) => return Err(other),
        (Ok(_), Err(err)) => Err(err),
        (Ok(client_config), Ok(params)) => {
            debug!(action = %kind, config = ?client_config, "running action");
            f5ops_core::run(kind, &params, &client_config).await
        }
    };
    if let Err(ref err) = result {
        debug!(error = %err, kind = err.kind(), "action failed without a device response");
    }

    let rendered = render(&result);
    output::print_body(&rendered.body)?;
    Ok(rendered.exit_code)
}
