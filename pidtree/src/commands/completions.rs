use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, generate_to, Shell};

use crate::cli::CliArguments;
use crate::internal_prelude::*;

/// Write the completion script for `shell` into `output_directory`, or print it to stdout.
pub fn completions(shell: Shell, output_directory: Option<&Path>) -> Result<()> {
    let mut command = CliArguments::command();
    let bin_name = command.get_name().to_owned();

    match output_directory {
        Some(directory) => {
            let path = generate_to(shell, &mut command, bin_name, directory)
                .wrap_err(format!("Failed to write {shell} completions to {directory:?}"))?;
            info!("Wrote {shell} completions to {path:?}");
        }
        None => generate(shell, &mut command, bin_name, &mut std::io::stdout()),
    }

    Ok(())
}
