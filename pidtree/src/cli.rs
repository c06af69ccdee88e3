use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use clap_complete::Shell;
use pidtree_lib::Traversal;

#[derive(Parser, Debug, Clone)]
pub enum SubCommand {
    /// List all descendants of a process.
    ///
    /// The process table is read once and walked starting at the given pid.
    /// A pid without any descendants, or one that doesn't exist, results in an empty list.
    Find {
        /// The pid whose descendants should be listed.
        pid: u32,

        /// Print the descendants as a JSON array instead of a table.
        #[arg(short, long)]
        json: bool,

        /// How the process listing is walked.
        ///
        /// `single-pass` relies on parents being listed before their children.
        /// `fixed-point` finds all descendants regardless of the listing order.
        /// Defaults to the configured value, which defaults to `single-pass`.
        #[arg(short, long, value_enum)]
        traversal: Option<TraversalArg>,
    },

    /// Generates shell completion files.
    /// This can be ignored during normal operations.
    Completions {
        /// The target shell.
        #[arg(value_enum)]
        shell: Shell,
        /// The output directory to which the file should be written.
        /// The script is printed to stdout, if omitted.
        #[arg(value_hint = ValueHint::DirPath)]
        output_directory: Option<PathBuf>,
    },
}

/// Clap counterpart of [Traversal].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalArg {
    SinglePass,
    FixedPoint,
}

impl From<TraversalArg> for Traversal {
    fn from(traversal: TraversalArg) -> Self {
        match traversal {
            TraversalArg::SinglePass => Traversal::SinglePass,
            TraversalArg::FixedPoint => Traversal::FixedPoint,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pidtree", about = "List all descendants of a process", author, version)]
pub struct CliArguments {
    /// Verbose mode (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// If provided, pidtree only uses this config file.
    /// This path can also be set via the "PIDTREE_CONFIG_PATH" environment variable.
    /// The commandline option overwrites the environment variable!
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: SubCommand,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        CliArguments::command().debug_assert();
    }

    #[test]
    fn parse_find() {
        let arguments = CliArguments::try_parse_from([
            "pidtree",
            "-vv",
            "find",
            "1234",
            "--json",
            "--traversal",
            "fixed-point",
        ])
        .unwrap();

        assert_eq!(arguments.verbose, 2);
        match arguments.cmd {
            SubCommand::Find {
                pid,
                json,
                traversal,
            } => {
                assert_eq!(pid, 1234);
                assert!(json);
                assert_eq!(traversal, Some(TraversalArg::FixedPoint));
            }
            other => panic!("Expected find subcommand, got {other:?}"),
        }
    }

    #[test]
    fn parse_completions() {
        let arguments =
            CliArguments::try_parse_from(["pidtree", "completions", "powershell"]).unwrap();

        match arguments.cmd {
            SubCommand::Completions {
                shell,
                output_directory,
            } => {
                assert_eq!(shell, Shell::PowerShell);
                assert_eq!(output_directory, None);
            }
            other => panic!("Expected completions subcommand, got {other:?}"),
        }
    }

    #[test]
    fn reject_negative_pid() {
        assert!(CliArguments::try_parse_from(["pidtree", "find", "-1"]).is_err());
    }
}
