//! Pidtree-lib errors.
use std::path::PathBuf;
use std::process::ExitStatus;

/// Convenience alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A handler based query was started without a completion handler.
    /// This is the only error that's reported before any work is done.
    #[error("No completion handler was supplied. Pass a handler to receive the query result.")]
    MissingHandler,

    #[error("Invalid pid {0:?}. Expected a non-negative decimal number.")]
    InvalidPid(String),

    /// The process listing command couldn't be started at all.
    #[error("Failed to start process listing command `{0}`:\n{1}")]
    ListingSpawn(String, std::io::Error),

    /// The process listing command ran, but didn't exit successfully.
    #[error("Process listing command `{0}` exited with {1}:\n{2}")]
    ListingFailed(String, ExitStatus, String),

    /// Reading the output of the process listing command failed.
    #[error("Failed to read output of process listing command:\n{0}")]
    ListingIo(#[from] std::io::Error),

    #[error("Error while reading configuration:\n{0}")]
    ConfigDeserialization(String),

    #[error("I/O error at path {0:?} while {1}:\n{2}")]
    IoPathError(PathBuf, &'static str, std::io::Error),
}

/// Lets infallible pid conversions go through the same path as fallible ones.
impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}
