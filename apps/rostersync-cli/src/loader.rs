//! Roster CSV loading.
//!
//! Extracts raw import rows from a header-based CSV export. Rows without
//! a login are reported and skipped here, before the engine runs; the
//! batch-level fixups and duplicate-login rejection happen in
//! [`rostersync_core::ImportBatch::from_rows`].

use std::collections::HashMap;
use std::path::Path;

use rostersync_core::{ImportBatch, RawImportRow};

use crate::error::{CliError, CliResult};

/// UTF-8 BOM bytes.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Recognized column headers (after trimming and lowercasing).
const LOGIN_COLUMN: &str = "login";
const KNOWN_COLUMNS: [&str; 7] = [
    LOGIN_COLUMN,
    "first_name",
    "last_name",
    "email",
    "phone",
    "mobile",
    "groups",
];

/// A skipped row and why it was skipped.
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based line number (header = 1, first data row = 2).
    pub line_number: usize,
    pub message: String,
}

/// Result of parsing a roster file: usable raw rows plus per-row errors.
#[derive(Debug)]
pub struct RosterCsv {
    pub rows: Vec<RawImportRow>,
    pub errors: Vec<RowError>,
    /// Total data rows in the file (excluding header).
    pub total_rows: usize,
}

/// Strip UTF-8 BOM from the beginning of data if present.
fn strip_utf8_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(UTF8_BOM) {
        &data[UTF8_BOM.len()..]
    } else {
        data
    }
}

/// Parse a roster CSV from raw bytes.
///
/// The header row is mandatory and must contain a `login` column; the
/// remaining recognized columns are optional and unrecognized columns
/// are ignored. Per-row problems do not fail the parse.
pub fn parse_roster(data: &[u8]) -> CliResult<RosterCsv> {
    let data = strip_utf8_bom(data);

    if data.is_empty() {
        return Err(CliError::Validation("Roster file is empty".to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: HashMap<String, usize> = reader
        .headers()
        .map_err(|e| CliError::Validation(format!("Failed to read CSV headers: {e}")))?
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| {
            let name = name.trim().to_lowercase();
            KNOWN_COLUMNS.contains(&name.as_str()).then_some((name, idx))
        })
        .collect();

    if !headers.contains_key(LOGIN_COLUMN) {
        return Err(CliError::Validation(
            "Roster file has no 'login' column".to_string(),
        ));
    }

    let mut rows = Vec::new();
    let mut errors = Vec::new();
    let mut total_rows = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let line_number = idx + 2; // header = 1, first data row = 2
        total_rows += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                errors.push(RowError {
                    line_number,
                    message: format!("Failed to parse CSV row: {e}"),
                });
                continue;
            }
        };

        let field = |name: &str| -> String {
            headers
                .get(name)
                .and_then(|&idx| record.get(idx))
                .unwrap_or("")
                .to_string()
        };

        let login = field(LOGIN_COLUMN);
        if login.trim().is_empty() {
            errors.push(RowError {
                line_number,
                message: "Row has no login, skipped".to_string(),
            });
            continue;
        }

        rows.push(RawImportRow {
            line: line_number,
            login,
            first_name: field("first_name"),
            last_name: field("last_name"),
            email_address: field("email"),
            telephone_number: field("phone"),
            mobile_telephone_number: field("mobile"),
            groups: field("groups"),
        });
    }

    if total_rows == 0 {
        return Err(CliError::Validation(
            "Roster file contains no data rows".to_string(),
        ));
    }
    if rows.is_empty() {
        return Err(CliError::Validation(
            "Roster file contains no usable rows".to_string(),
        ));
    }

    Ok(RosterCsv {
        rows,
        errors,
        total_rows,
    })
}

/// Load a roster file and assemble the validated import batch.
///
/// Returns the batch together with the per-row errors for reporting.
pub fn load_roster(path: &Path, separator: char) -> CliResult<(ImportBatch, Vec<RowError>)> {
    let data = std::fs::read(path)
        .map_err(|e| CliError::Io(format!("Failed to read {}: {e}", path.display())))?;

    let parsed = parse_roster(&data)?;
    tracing::debug!(
        path = %path.display(),
        rows = parsed.rows.len(),
        skipped = parsed.errors.len(),
        "Roster file parsed"
    );

    let batch = ImportBatch::from_rows(parsed.rows, separator)?;
    Ok((batch, parsed.errors))
}
