//! CSV export of the entry list.
//!
//! The document is meant to be opened in a spreadsheet, so it carries a
//! byte-order mark and every data field is quoted.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Entry;

/// Column order of the export.
pub const CSV_HEADER: [&str; 10] = [
    "time",
    "name",
    "side",
    "attendance",
    "count",
    "meal pref",
    "meat count",
    "veg count",
    "phone",
    "notes",
];

/// Byte-order mark prepended so spreadsheets detect UTF-8.
pub const BOM: &str = "\u{FEFF}";

/// Replacement for commas inside text fields.
const FULL_WIDTH_COMMA: &str = "\u{FF0C}";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    Empty,
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders the header plus one line per entry, without the BOM.
pub fn to_csv(entries: &[Entry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for entry in entries {
        let row = [
            entry.created_at_local(),
            entry.name.clone(),
            entry.side.to_string(),
            entry.attending.to_string(),
            entry.total.to_string(),
            entry.meal_pref.to_string(),
            entry.meat_count.to_string(),
            entry.veg_count.to_string(),
            entry.phone.clone(),
            entry.notes.clone(),
        ];
        let fields: Vec<String> = row.iter().map(|value| quote(value)).collect();
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

/// The full export document: BOM followed by [`to_csv`].
pub fn csv_document(entries: &[Entry]) -> String {
    format!("{}{}", BOM, to_csv(entries))
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("wedding-rsvp_{}.csv", date.format("%Y-%m-%d"))
}

/// Writes the export to `path`. An empty list is refused.
pub fn write_csv(path: &Path, entries: &[Entry]) -> Result<(), ExportError> {
    if entries.is_empty() {
        return Err(ExportError::Empty);
    }

    std::fs::write(path, csv_document(entries)).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn quote(value: &str) -> String {
    let flat = value
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
        .replace(',', FULL_WIDTH_COMMA)
        .replace('"', "\"\"");
    format!("\"{}\"", flat)
}
