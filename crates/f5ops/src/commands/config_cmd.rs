//! Config command handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::{CliError, exit_code};
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<i32, CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::effective_config(global)?;
            output::print_output(&cfg.to_toml()?);
        }
        ConfigCommand::Path => {
            output::print_output(&config::config_path(global).display().to_string());
        }
    }
    Ok(exit_code::SUCCESS)
}
