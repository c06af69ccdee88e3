use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};
use pidtree::cli::{CliArguments, SubCommand};
use pidtree::commands::{completions, handle_command};
use pidtree_lib::Settings;

/// Parse the cli, set up logging and run the requested subcommand.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let opt = CliArguments::parse();

    pidtree::tracing::install_tracing(opt.verbose)?;
    color_eyre::install()?;

    // Completions don't depend on the configuration, so a broken config doesn't block them.
    if let SubCommand::Completions {
        shell,
        output_directory,
    } = &opt.cmd
    {
        return completions(*shell, output_directory.as_deref());
    }

    // Running without any configuration file is perfectly fine.
    let (settings, _config_found) =
        Settings::read(&opt.config).wrap_err("Failed to read configuration.")?;

    handle_command(&settings, opt.cmd).await
}
