use crate::domain::model::{RawRecord, REQUIRED_COLUMNS};
use crate::utils::error::{RelayError, Result};
use std::collections::HashMap;

/// Parses raw CSV text into ordered records keyed by header name.
///
/// Splitting is on literal commas only; quoted fields and escaped commas are
/// not supported. This matches the upload contract, which rejects such files
/// rather than guessing at their structure.
///
/// The first non-blank line is the header. Header validation is all-or-nothing:
/// if any required column is missing the whole upload fails, naming every
/// missing column, and no rows are produced.
pub fn parse(raw: &str) -> Result<Vec<RawRecord>> {
    // Tolerate CR, LF, and CRLF line endings; blank lines carry no data.
    let mut lines = raw
        .split(['\r', '\n'])
        .filter(|line| !line.trim().is_empty());

    let header: Vec<&str> = match lines.next() {
        Some(line) => line.split(',').map(str::trim).collect(),
        None => {
            return Err(RelayError::MissingColumns {
                columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            })
        }
    };

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !header.contains(required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RelayError::MissingColumns { columns: missing });
    }

    let records = lines
        .map(|row| {
            let values: Vec<&str> = row.split(',').map(str::trim).collect();
            // Short rows are padded with empty fields; cells beyond the header
            // length are ignored.
            let fields: HashMap<String, String> = header
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    (
                        column.to_string(),
                        values.get(i).copied().unwrap_or("").to_string(),
                    )
                })
                .collect();
            RawRecord::new(fields)
        })
        .collect();

    Ok(records)
}
