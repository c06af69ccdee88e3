use crate::parser::ListingFormat;

/// `ConvertTo-Csv` quotes every field and prints a header row.
pub const DEFAULT_LISTING_FORMAT: ListingFormat = ListingFormat::Csv;

/// Query all processes via CIM and print them as CSV.
///
/// The output encoding is set to UTF8 first, so process names aren't mangled by the
/// console's code page.
pub fn default_listing_command() -> Vec<String> {
    vec![
        "powershell".into(),
        "-NoProfile".into(),
        "-NonInteractive".into(),
        "-Command".into(),
        "[Console]::OutputEncoding = [Text.UTF8Encoding]::UTF8; \
         Get-CimInstance -ClassName Win32_Process \
         | Select-Object ParentProcessId,ProcessId,Status,Name \
         | ConvertTo-Csv -NoTypeInformation"
            .into(),
    ]
}
