//! Parsing of raw process listings into [ProcessRow]s.
//!
//! Listings consist of a header line, followed by one line per process.
//! The header determines which column ends up in which field of a [ProcessRow].
//! Lines that cannot be mapped onto the header are dropped without raising an error, as
//! listings regularly contain banners or annotations we don't care about.
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Result;
use crate::internal_prelude::*;
use crate::process::ProcessRow;

/// The textual format of a process listing.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Display, EnumString, Deserialize, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ListingFormat {
    /// Whitespace separated columns, as printed by `ps`.
    Table,
    /// Comma separated values with double-quoted fields, as printed by `ConvertTo-Csv`.
    Csv,
}

/// A canonical column of a process listing.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Column {
    Command,
    Ppid,
    Pid,
    Stat,
    /// Any column we don't know about. It's kept, so positions of later columns stay intact.
    Other(String),
}

impl Column {
    /// Map a platform specific column name onto its canonical column.
    pub fn from_name(name: &str) -> Self {
        match name {
            "COMMAND" | "COMM" | "Name" => Column::Command,
            "PPID" | "ParentProcessId" => Column::Ppid,
            "PID" | "ProcessId" => Column::Pid,
            "STAT" | "Status" => Column::Stat,
            other => Column::Other(other.to_owned()),
        }
    }

    /// The canonical name of this column.
    pub fn name(&self) -> &str {
        match self {
            Column::Command => "COMMAND",
            Column::Ppid => "PPID",
            Column::Pid => "PID",
            Column::Stat => "STAT",
            Column::Other(name) => name,
        }
    }
}

/// The normalized header of a listing, in the order the columns appear.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct HeaderSet(pub Vec<Column>);

impl HeaderSet {
    pub fn parse(line: &str, format: ListingFormat) -> Self {
        let names: Vec<String> = match format {
            ListingFormat::Table => line.split_whitespace().map(str::to_owned).collect(),
            ListingFormat::Csv => split_csv(line),
        };

        HeaderSet(names.iter().map(|name| Column::from_name(name)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical names of all columns.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(Column::name).collect()
    }

    /// Zip the given columns positionally with this header.
    /// Fields without a matching value stay empty.
    pub fn build_row(&self, columns: Vec<String>) -> ProcessRow {
        let mut row = ProcessRow::default();
        for (column, value) in self.0.iter().zip(columns) {
            match column {
                Column::Command => row.command = value,
                Column::Ppid => row.ppid = value,
                Column::Pid => row.pid = value,
                Column::Stat => row.stat = value,
                Column::Other(_) => (),
            }
        }

        row
    }
}

/// Split a single CSV line into its fields.
///
/// A double quote toggles whether we're inside a quoted field, commas only separate fields
/// outside of quotes. Quotes themselves are removed. Escaped quotes aren't supported.
pub fn split_csv(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for character in line.chars() {
        match character {
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(character),
        }
    }
    fields.push(current);

    fields
}

fn whitespace_regex() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("Whitespace regex is valid"))
}

/// Split a data line of a `ps` style table into the columns of `header`.
///
/// All but the last column are separated by whitespace. The last column takes the rest of
/// the line, since commands may contain whitespace themselves.
/// Returns `None` if the line has too few columns or its PPID or PID isn't a number.
pub fn split_table_row(line: &str, header: &HeaderSet) -> Option<Vec<String>> {
    if header.is_empty() {
        return None;
    }

    let columns: Vec<String> = whitespace_regex()
        .splitn(line.trim(), header.len())
        .map(str::to_owned)
        .collect();
    if columns.len() < header.len() {
        return None;
    }

    let numeric_ids = header
        .0
        .iter()
        .zip(&columns)
        .filter(|(column, _)| matches!(column, Column::Ppid | Column::Pid))
        .all(|(_, value)| !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit()));

    numeric_ids.then_some(columns)
}

/// Separator lines only consist of dashes and whitespace, e.g. `---- --- -------`.
fn is_separator(line: &str) -> bool {
    line.contains("--") && line.chars().all(|c| c == '-' || c.is_whitespace())
}

/// Push based parser for a single listing.
///
/// The first meaningful line is interpreted as the header, every following line is mapped
/// against it. A parser must not be reused for a second listing.
#[derive(Debug)]
pub struct LineParser {
    format: ListingFormat,
    header: Option<HeaderSet>,
}

impl LineParser {
    pub fn new(format: ListingFormat) -> Self {
        LineParser {
            format,
            header: None,
        }
    }

    pub fn header(&self) -> Option<&HeaderSet> {
        self.header.as_ref()
    }

    /// Feed the next raw line into the parser.
    /// Returns a row, if the line was a valid process entry.
    pub fn push_line(&mut self, line: &str) -> Option<ProcessRow> {
        let line = line.trim();
        if line.is_empty() || is_separator(line) {
            return None;
        }

        let Some(header) = &self.header else {
            let header = HeaderSet::parse(line, self.format);
            debug!(columns = ?header.names(), "Parsed listing header");
            self.header = Some(header);
            return None;
        };

        let columns = match self.format {
            ListingFormat::Table => match split_table_row(line, header) {
                Some(columns) => columns,
                None => {
                    trace!("Skipping malformed listing line: {line}");
                    return None;
                }
            },
            ListingFormat::Csv => split_csv(line),
        };

        if columns.len() < header.len() {
            trace!("Skipping listing line with too few columns: {line}");
            return None;
        }

        Some(header.build_row(columns))
    }
}

/// Lazily turns a stream of raw lines into [ProcessRow]s.
///
/// Errors of the underlying stream are passed through untouched.
pub struct Rows<I> {
    lines: I,
    parser: LineParser,
}

impl<I> Rows<I>
where
    I: Iterator<Item = Result<String>>,
{
    pub fn new(lines: I, format: ListingFormat) -> Self {
        Rows {
            lines,
            parser: LineParser::new(format),
        }
    }
}

impl<I> Iterator for Rows<I>
where
    I: Iterator<Item = Result<String>>,
{
    type Item = Result<ProcessRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.next()? {
                Err(err) => return Some(Err(err)),
                Ok(line) => {
                    if let Some(row) = self.parser.push_line(&line) {
                        return Some(Ok(row));
                    }
                }
            }
        }
    }
}

/// Parse a complete listing that's already in memory.
pub fn parse_listing(output: &str, format: ListingFormat) -> Vec<ProcessRow> {
    let mut parser = LineParser::new(format);
    output
        .lines()
        .filter_map(|line| parser.push_line(line))
        .collect()
}
