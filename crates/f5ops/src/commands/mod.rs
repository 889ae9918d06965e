pub mod actions;
pub mod config_cmd;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::{CliError, exit_code};

/// Dispatch a parsed command, returning the process exit status.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<i32, CliError> {
    match cmd {
        Command::Task(args) => actions::handle_task(args, global).await,
        Command::ConfigSync(args) => actions::handle(&args, global).await,
        Command::NodeState(args) => actions::handle(&args, global).await,
        Command::MemberState(args) => actions::handle(&args, global).await,
        Command::SetPassword(args) => actions::handle(&args, global).await,
        Command::UcsSave(args) => actions::handle(&args, global).await,
        Command::UcsDelete(args) => actions::handle(&args, global).await,
        Command::Config(args) => config_cmd::handle(&args, global),
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "f5ops", &mut std::io::stdout());
            Ok(exit_code::SUCCESS)
        }
    }
}
