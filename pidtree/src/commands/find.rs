use pidtree_lib::{find_descendants_async, QueryOptions, Settings, Traversal};

use crate::internal_prelude::*;
use crate::output::render;

/// Look up all descendants of `pid` and print them to stdout.
///
/// `traversal` overrides the configured traversal.
pub async fn find(
    settings: &Settings,
    pid: u32,
    json: bool,
    traversal: Option<Traversal>,
) -> Result<()> {
    let mut options = QueryOptions::from_settings(settings);
    if let Some(traversal) = traversal {
        options.traversal = traversal;
    }
    info!(
        command = %options.command.display(),
        traversal = %options.traversal,
        "Listing descendants of {pid}"
    );

    let rows = find_descendants_async(pid, &options)
        .await
        .wrap_err(format!("Failed to find descendants of process {pid}"))?;

    let output = render(&rows, json)?;
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
