//! Reconstruction of the descendants of a process from a flat listing.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::internal_prelude::*;
use crate::process::{Pid, ProcessRow};

/// How the rows of a listing are walked to find descendants.
#[derive(
    PartialEq, Eq, Clone, Copy, Debug, Default, Display, EnumString, Deserialize, Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Traversal {
    /// Walk the listing exactly once, in the order the OS reported it.
    ///
    /// A process is only recognized as a descendant, if its parent has been recognized
    /// earlier in the listing. Children that are listed before their parent are missed.
    /// Standard listings order parents first, so this is usually complete.
    #[default]
    SinglePass,
    /// Keep walking the listing until no new descendants are found.
    /// Finds all descendants, regardless of the listing order.
    FixedPoint,
}

/// Compute all rows that descend from the process `root`.
///
/// The root's own row is never part of the result, unless the listing claims it's its own
/// child. Rows are returned in listing order. An unknown root simply results in an empty list.
pub fn descendants(rows: &[ProcessRow], root: &Pid, traversal: Traversal) -> Vec<ProcessRow> {
    let mut known: HashSet<&str> = HashSet::new();
    known.insert(root.as_str());

    let result = match traversal {
        Traversal::SinglePass => single_pass(rows, &mut known),
        Traversal::FixedPoint => fixed_point(rows, &mut known),
    };

    debug!(
        root = %root,
        %traversal,
        rows = rows.len(),
        descendants = result.len(),
        "Computed descendants"
    );

    result
}

fn single_pass<'a>(rows: &'a [ProcessRow], known: &mut HashSet<&'a str>) -> Vec<ProcessRow> {
    let mut result = Vec::new();
    for row in rows {
        if known.contains(row.ppid.as_str()) {
            known.insert(row.pid.as_str());
            result.push(row.clone());
        }
    }

    result
}

fn fixed_point<'a>(rows: &'a [ProcessRow], known: &mut HashSet<&'a str>) -> Vec<ProcessRow> {
    let mut included = vec![false; rows.len()];

    loop {
        let mut changed = false;
        for (index, row) in rows.iter().enumerate() {
            if included[index] || !known.contains(row.ppid.as_str()) {
                continue;
            }
            known.insert(row.pid.as_str());
            included[index] = true;
            changed = true;
        }

        if !changed {
            break;
        }
    }

    rows.iter()
        .zip(included)
        .filter_map(|(row, included)| included.then(|| row.clone()))
        .collect()
}
