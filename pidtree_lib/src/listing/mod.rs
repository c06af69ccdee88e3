//! Listing the process table is platform specific code.
//!
//! The submodules of this module contain the listing command for each supported platform.
//! Depending on the target, the respective platform is loaded into this scope.
use std::io::{BufRead, BufReader, Lines, Read};
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::thread::JoinHandle;

use crate::error::{Error, Result};
use crate::internal_prelude::*;
pub use crate::parser::ListingFormat;
#[cfg(feature = "settings")]
use crate::settings::Settings;

// Platform specific listing commands
#[cfg_attr(unix, path = "unix.rs")]
#[cfg_attr(windows, path = "windows.rs")]
mod platform;
pub use self::platform::*;

/// A fully resolved command that prints a snapshot of the process table.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ListingCommand {
    pub program: String,
    pub args: Vec<String>,
    pub format: ListingFormat,
}

impl Default for ListingCommand {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl ListingCommand {
    /// The listing command of the platform we're compiled for.
    pub fn platform_default() -> Self {
        let mut command = default_listing_command();
        let program = command.remove(0);

        ListingCommand {
            program,
            args: command,
            format: DEFAULT_LISTING_FORMAT,
        }
    }

    /// Build a command from an argv style vector.
    /// Returns `None` if the vector is empty.
    pub fn from_argv(argv: &[String], format: ListingFormat) -> Option<Self> {
        let (program, args) = argv.split_first()?;

        Some(ListingCommand {
            program: program.clone(),
            args: args.to_vec(),
            format,
        })
    }

    /// Use the listing command from the configuration, if there's one.
    #[cfg(feature = "settings")]
    pub fn from_settings(settings: &Settings) -> Self {
        let default = Self::platform_default();
        let format = settings.listing.format.unwrap_or(default.format);

        let Some(argv) = &settings.listing.command else {
            return ListingCommand { format, ..default };
        };

        match Self::from_argv(argv, format) {
            Some(command) => command,
            None => {
                warn!("Configured listing command is empty. Falling back to the default.");
                ListingCommand { format, ..default }
            }
        }
    }

    /// Human readable representation, used for logging and error messages.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    fn std_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        command
    }

    /// Start the listing command.
    /// The returned [ListingOutput] yields the command's stdout line by line.
    pub fn spawn(&self) -> Result<ListingOutput> {
        debug!(command = %self.display(), "Spawning process listing");
        let mut child = self
            .std_command()
            .spawn()
            .map_err(|err| Error::ListingSpawn(self.display(), err))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| missing_pipe(self, "stdout"))?;
        // Stderr is drained on its own thread, a full stderr pipe would block stdout forever.
        let stderr = child.stderr.take().map(collect_stderr);

        Ok(ListingOutput {
            command: self.display(),
            child,
            lines: BufReader::new(stdout).lines(),
            stderr,
            finished: false,
        })
    }

    /// Async variant of [ListingCommand::spawn].
    #[cfg(feature = "async")]
    pub fn spawn_async(&self) -> Result<AsyncListingOutput> {
        use tokio::io::AsyncBufReadExt;

        debug!(command = %self.display(), "Spawning process listing");
        let mut child = tokio::process::Command::from(self.std_command())
            .spawn()
            .map_err(|err| Error::ListingSpawn(self.display(), err))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| missing_pipe(self, "stdout"))?;
        let stderr = child.stderr.take().map(collect_stderr_async);

        Ok(AsyncListingOutput {
            command: self.display(),
            child,
            lines: tokio::io::BufReader::new(stdout).lines(),
            stderr,
            finished: false,
        })
    }
}

fn missing_pipe(command: &ListingCommand, pipe: &str) -> Error {
    Error::ListingSpawn(
        command.display(),
        std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            format!("{pipe} of the listing command isn't captured"),
        ),
    )
}

fn collect_stderr(mut pipe: ChildStderr) -> JoinHandle<std::io::Result<String>> {
    std::thread::spawn(move || {
        let mut stderr = String::new();
        pipe.read_to_string(&mut stderr)?;
        Ok(stderr)
    })
}

#[cfg(feature = "async")]
fn collect_stderr_async(
    mut pipe: tokio::process::ChildStderr,
) -> tokio::task::JoinHandle<std::io::Result<String>> {
    use tokio::io::AsyncReadExt;

    tokio::spawn(async move {
        let mut stderr = String::new();
        pipe.read_to_string(&mut stderr).await?;
        Ok(stderr)
    })
}

/// The output of a running listing command.
///
/// Once stdout is exhausted, the child is reaped. If it didn't exit successfully, a final
/// [Error::ListingFailed] is yielded. The iterator ends after the first error.
pub struct ListingOutput {
    command: String,
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    stderr: Option<JoinHandle<std::io::Result<String>>>,
    finished: bool,
}

impl ListingOutput {
    fn finish(&mut self) -> Result<()> {
        let status = self.child.wait()?;

        let stderr = match self.stderr.take().map(JoinHandle::join) {
            Some(Ok(Ok(stderr))) => stderr,
            Some(Ok(Err(err))) => {
                warn!("Failed to read stderr of listing command: {err}");
                String::new()
            }
            Some(Err(_)) => {
                warn!("Stderr reader of listing command panicked");
                String::new()
            }
            None => String::new(),
        };

        if !status.success() {
            return Err(Error::ListingFailed(
                self.command.clone(),
                status,
                stderr.trim().to_owned(),
            ));
        }

        Ok(())
    }
}

impl Iterator for ListingOutput {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.lines.next() {
            Some(Ok(line)) => Some(Ok(line)),
            Some(Err(err)) => {
                self.finished = true;
                // Don't leave a zombie behind, the output is useless at this point anyway.
                if let Err(kill_err) = self.child.kill() {
                    warn!("Failed to kill listing command {}: {kill_err}", self.command);
                }
                if let Err(wait_err) = self.child.wait() {
                    warn!("Failed to reap listing command {}: {wait_err}", self.command);
                }
                Some(Err(Error::ListingIo(err)))
            }
            None => {
                self.finished = true;
                self.finish().err().map(Err)
            }
        }
    }
}

/// The output of a listing command spawned on the tokio runtime.
#[cfg(feature = "async")]
pub struct AsyncListingOutput {
    command: String,
    child: tokio::process::Child,
    lines: tokio::io::Lines<tokio::io::BufReader<tokio::process::ChildStdout>>,
    stderr: Option<tokio::task::JoinHandle<std::io::Result<String>>>,
    finished: bool,
}

#[cfg(feature = "async")]
impl AsyncListingOutput {
    /// Get the next line of output.
    /// Behaves like [ListingOutput]'s iterator: `Ok(None)` signals the end of the listing.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        if self.finished {
            return Ok(None);
        }

        match self.lines.next_line().await {
            Ok(Some(line)) => Ok(Some(line)),
            Ok(None) => {
                self.finished = true;
                self.finish().await?;
                Ok(None)
            }
            Err(err) => {
                self.finished = true;
                // `kill` also reaps the child.
                if let Err(kill_err) = self.child.kill().await {
                    warn!("Failed to kill listing command {}: {kill_err}", self.command);
                }
                Err(Error::ListingIo(err))
            }
        }
    }

    async fn finish(&mut self) -> Result<()> {
        let status = self.child.wait().await?;

        let stderr = match self.stderr.take() {
            Some(reader) => match reader.await {
                Ok(Ok(stderr)) => stderr,
                Ok(Err(err)) => {
                    warn!("Failed to read stderr of listing command: {err}");
                    String::new()
                }
                Err(err) => {
                    warn!("Stderr reader of listing command failed: {err}");
                    String::new()
                }
            },
            None => String::new(),
        };

        if !status.success() {
            return Err(Error::ListingFailed(
                self.command.clone(),
                status,
                stderr.trim().to_owned(),
            ));
        }

        Ok(())
    }
}
