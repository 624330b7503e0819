//! CSV file parsing for observation tables.
//!
//! The loader expects a header line naming the columns, followed by one
//! comma-separated row per observation. Column types are inferred: a column
//! where every non-empty cell parses as a number becomes numeric, anything
//! else stays text. Empty cells become missing values (NaN for numeric
//! columns, an empty string for text columns) and are rejected later by
//! validation.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{DataError, Frame};

/// Load an observation table from a CSV file.
///
/// # Example file content
/// ```csv
/// group,clicks
/// A,2
/// B,5
/// A,3
/// ```
///
/// # Errors
///
/// Returns [`DataError`] if the file cannot be read, a row has the wrong
/// number of fields, or the file has no data rows.
pub fn load_csv(path: &Path) -> Result<Frame, DataError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut header: Vec<String> = Vec::new();
    let mut cells: Vec<Vec<String>> = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim_end_matches(['\r', '\n']);

        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<String> = line.split(',').map(|f| f.trim().to_string()).collect();

        if header.is_empty() {
            header = fields;
            cells = vec![Vec::new(); header.len()];
            continue;
        }

        if fields.len() != header.len() {
            return Err(DataError::Parse {
                line: line_num + 1,
                message: format!(
                    "expected {} fields, got {}",
                    header.len(),
                    fields.len()
                ),
            });
        }

        for (column, field) in cells.iter_mut().zip(fields) {
            column.push(field);
        }
    }

    if header.is_empty() || cells.first().map_or(true, |c| c.is_empty()) {
        return Err(DataError::NoRows);
    }

    let mut frame = Frame::new();
    for (name, column) in header.iter().zip(cells) {
        if is_numeric(&column) {
            let values = column
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        f64::NAN
                    } else {
                        // is_numeric already proved every non-empty cell parses
                        cell.parse().unwrap_or(f64::NAN)
                    }
                })
                .collect();
            frame.push_numbers(name, values)?;
        } else {
            frame.push_text(name, column)?;
        }
    }

    tracing::debug!(
        rows = frame.len(),
        columns = frame.column_names().len(),
        "loaded CSV"
    );

    Ok(frame)
}

fn is_numeric(column: &[String]) -> bool {
    let mut any_value = false;
    for cell in column {
        if cell.is_empty() {
            continue;
        }
        if cell.parse::<f64>().is_err() {
            return false;
        }
        any_value = true;
    }
    any_value
}
