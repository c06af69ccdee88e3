//! Rendering of query results for the terminal.
use comfy_table::presets::UTF8_HORIZONTAL_ONLY;
use comfy_table::{Cell, ContentArrangement, Row, Table};
use pidtree_lib::ProcessRow;

use crate::internal_prelude::*;

/// Build a table with one line per process.
/// Columns are in the same order `ps` prints them.
pub fn build_table(rows: &[ProcessRow]) -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .load_preset(UTF8_HORIZONTAL_ONLY)
        .set_header(vec!["PPID", "PID", "STAT", "COMMAND"]);

    for row in rows {
        table.add_row(Row::from(vec![
            Cell::new(&row.ppid),
            Cell::new(&row.pid),
            Cell::new(&row.stat),
            Cell::new(&row.command),
        ]));
    }

    table
}

/// Render the rows in the requested format.
///
/// An empty result renders to an empty string in table mode and to `[]` as JSON.
pub fn render(rows: &[ProcessRow], json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(rows).wrap_err("Failed to serialize descendants");
    }

    if rows.is_empty() {
        return Ok(String::new());
    }

    Ok(build_table(rows).to_string())
}
