//! Tabular decoding
//!
//! The first record is the header. Data records may be shorter than the header
//! (missing trailing cells) but never longer. Blank lines are skipped and
//! quoted fields may span lines. Header cells are kept verbatim: duplicates
//! are not renamed and blank cells stay empty strings.

use csvmeta_common::{IngestError, Result, TableSummary};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

fn decode_error(err: csv::Error) -> IngestError {
    IngestError::Decode(err.to_string())
}

/// Count rows and collect column names from delimited text.
pub fn summarize_reader<R: Read>(reader: R) -> Result<TableSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.byte_headers().map_err(decode_error)?.clone();
    if headers.is_empty() {
        return Err(IngestError::Decode(
            "no columns to parse from file".to_string(),
        ));
    }

    let column_names = headers
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let name = std::str::from_utf8(raw).map_err(|e| {
                IngestError::Decode(format!("header of column {} is not UTF-8: {}", idx + 1, e))
            })?;
            let name = if idx == 0 {
                name.trim_start_matches(UTF8_BOM)
            } else {
                name
            };
            Ok(name.to_string())
        })
        .collect::<Result<Vec<_>>>()?;

    let mut row_count = 0u64;
    let mut record = csv::ByteRecord::new();
    while csv_reader
        .read_byte_record(&mut record)
        .map_err(decode_error)?
    {
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(IngestError::Decode(format!(
                "expected {} fields in line {}, saw {}",
                headers.len(),
                line,
                record.len()
            )));
        }
        row_count += 1;
    }

    Ok(TableSummary {
        column_names,
        row_count,
    })
}

pub fn summarize_path(path: &Path) -> Result<TableSummary> {
    let file = File::open(path)?;
    summarize_reader(file)
}
