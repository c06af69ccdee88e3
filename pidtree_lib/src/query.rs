//! The entry points for looking up the descendants of a process.
//!
//! Every query takes exactly one snapshot of the process table by spawning the listing
//! command, parses it and walks the resulting rows.
//! Either the full list of descendants or a single error is returned, never partial results.
use std::thread::JoinHandle;

use crate::error::{Error, Result};
use crate::internal_prelude::*;
use crate::listing::ListingCommand;
#[cfg(feature = "async")]
use crate::parser::LineParser;
use crate::parser::Rows;
use crate::process::{Pid, ProcessRow};
#[cfg(feature = "settings")]
use crate::settings::Settings;
use crate::tree::{descendants, Traversal};

/// Everything that influences how a query is executed.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct QueryOptions {
    pub command: ListingCommand,
    pub traversal: Traversal,
}

impl QueryOptions {
    #[cfg(feature = "settings")]
    pub fn from_settings(settings: &Settings) -> Self {
        QueryOptions {
            command: ListingCommand::from_settings(settings),
            traversal: settings.listing.traversal,
        }
    }
}

/// Find all descendants of `pid`, blocking until the listing command finished.
///
/// `pid` may be anything that converts into a [Pid], e.g. `100`, `100u32` or `"100"`.
/// An invalid pid fails with [Error::InvalidPid] before the listing command is started.
pub fn find_descendants(
    pid: impl TryInto<Pid, Error = impl Into<Error>>,
    options: &QueryOptions,
) -> Result<Vec<ProcessRow>> {
    let root = pid.try_into().map_err(Into::into)?;
    debug!(%root, traversal = %options.traversal, "Looking up descendants");

    let output = options.command.spawn()?;
    let rows = Rows::new(output, options.command.format).collect::<Result<Vec<_>>>()?;
    debug!("Parsed {} rows from the process listing", rows.len());

    Ok(descendants(&rows, &root, options.traversal))
}

/// Async variant of [find_descendants].
///
/// Lines are parsed while the listing command is still running.
/// The descendants are computed once the listing is complete.
#[cfg(feature = "async")]
pub async fn find_descendants_async(
    pid: impl TryInto<Pid, Error = impl Into<Error>>,
    options: &QueryOptions,
) -> Result<Vec<ProcessRow>> {
    let root = pid.try_into().map_err(Into::into)?;
    debug!(%root, traversal = %options.traversal, "Looking up descendants");

    let mut output = options.command.spawn_async()?;
    let mut parser = LineParser::new(options.command.format);
    let mut rows = Vec::new();
    while let Some(line) = output.next_line().await? {
        if let Some(row) = parser.push_line(&line) {
            rows.push(row);
        }
    }
    debug!("Parsed {} rows from the process listing", rows.len());

    Ok(descendants(&rows, &root, options.traversal))
}

/// Find all descendants of `pid` on a background thread and hand the result to `handler`.
///
/// The handler is called exactly once, with either the descendants or the error that
/// occurred while listing processes.
/// If no handler is given, [Error::MissingHandler] is returned and nothing is spawned.
/// An invalid pid is reported the same way, as [Error::InvalidPid].
///
/// The returned [JoinHandle] can be used to wait for the handler to finish.
pub fn find_descendants_with<F>(
    pid: impl TryInto<Pid, Error = impl Into<Error>>,
    options: &QueryOptions,
    handler: Option<F>,
) -> Result<JoinHandle<()>>
where
    F: FnOnce(Result<Vec<ProcessRow>>) + Send + 'static,
{
    let Some(handler) = handler else {
        return Err(Error::MissingHandler);
    };

    let root: Pid = pid.try_into().map_err(Into::into)?;
    let options = options.clone();
    let handle = std::thread::spawn(move || {
        let result = find_descendants(root, &options);
        if let Err(err) = &result {
            debug!("Descendant query failed: {err}");
        }
        handler(result);
    });

    Ok(handle)
}
