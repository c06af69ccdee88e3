use crate::parser::ListingFormat;

/// `ps` prints a whitespace separated table with a header line.
pub const DEFAULT_LISTING_FORMAT: ListingFormat = ListingFormat::Table;

/// List all processes with the columns `PPID PID STAT COMMAND`.
///
/// The column order matters, as the command name may contain whitespace and has to be the
/// last column.
pub fn default_listing_command() -> Vec<String> {
    vec![
        "ps".into(),
        "-A".into(),
        "-o".into(),
        "ppid,pid,stat,comm".into(),
    ]
}
