use pidtree_lib::Settings;

use crate::cli::SubCommand;
use crate::internal_prelude::*;

mod completions;
mod find;

pub use completions::completions;
pub use find::find;

/// Execute a single subcommand.
pub async fn handle_command(settings: &Settings, subcommand: SubCommand) -> Result<()> {
    match subcommand {
        SubCommand::Find {
            pid,
            json,
            traversal,
        } => find(settings, pid, json, traversal.map(Into::into)).await,
        SubCommand::Completions {
            shell,
            output_directory,
        } => completions(shell, output_directory.as_deref()),
    }
}
