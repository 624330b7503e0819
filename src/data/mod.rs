//! Tabular input for A/B test analysis.
//!
//! The analysis core consumes a [`Frame`]: a small column-oriented table
//! with named text and numeric columns. Frames can be built
//! programmatically or loaded from CSV files collected elsewhere
//! (experiment platforms, warehouse exports, spreadsheets).
//!
//! # Example
//!
//! ```
//! use verdict::data::Frame;
//!
//! let mut frame = Frame::new();
//! frame.push_text("group", vec!["A".into(), "A".into(), "B".into()]).unwrap();
//! frame.push_numbers("clicks", vec![2.0, 3.0, 5.0]).unwrap();
//! assert_eq!(frame.len(), 3);
//! ```

mod csv;
pub mod synth;

pub use csv::load_csv;

use std::collections::BTreeMap;
use std::fmt;

/// Errors that can occur while loading or assembling tabular data.
#[derive(Debug)]
pub enum DataError {
    /// IO error reading a file.
    Io(std::io::Error),

    /// CSV parse error at a specific line.
    Parse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Description of the parse error.
        message: String,
    },

    /// The file contained a header but no data rows.
    NoRows,

    /// A column being added does not match the frame's row count.
    LengthMismatch {
        /// Name of the offending column.
        column: String,
        /// Row count already established by the frame.
        expected: usize,
        /// Length of the column being added.
        got: usize,
    },

    /// A column with this name already exists in the frame.
    DuplicateColumn {
        /// The duplicated name.
        column: String,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::Parse { line, message } => {
                write!(f, "parse error at line {line}: {message}")
            }
            Self::NoRows => write!(f, "file contains a header but no data rows"),
            Self::LengthMismatch {
                column,
                expected,
                got,
            } => write!(
                f,
                "column '{column}' has {got} values but the frame has {expected} rows"
            ),
            Self::DuplicateColumn { column } => {
                write!(f, "column '{column}' already exists")
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// A single named column of a [`Frame`].
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// String-valued column (group labels, identifiers).
    Text(Vec<String>),
    /// Numeric column. Missing values are represented as NaN.
    Number(Vec<f64>),
}

impl Column {
    /// Number of values in the column.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(values) => values.len(),
            Self::Number(values) => values.len(),
        }
    }

    /// Whether the column has no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A minimal column-oriented table.
///
/// Column order is preserved; columns are addressed by name. All columns
/// share one row count, enforced when columns are added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<(String, Column)>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |(_, col)| col.len())
    }

    /// Whether the frame has no rows (or no columns at all).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of all columns, in insertion order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Add a text column.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::LengthMismatch`] if the values do not match the
    /// frame's row count, or [`DataError::DuplicateColumn`] if the name is
    /// already taken.
    pub fn push_text(&mut self, name: &str, values: Vec<String>) -> Result<(), DataError> {
        self.push_column(name, Column::Text(values))
    }

    /// Add a numeric column.
    ///
    /// # Errors
    ///
    /// Same error conditions as [`Frame::push_text`].
    pub fn push_numbers(&mut self, name: &str, values: Vec<f64>) -> Result<(), DataError> {
        self.push_column(name, Column::Number(values))
    }

    fn push_column(&mut self, name: &str, column: Column) -> Result<(), DataError> {
        if self.column(name).is_some() {
            return Err(DataError::DuplicateColumn {
                column: name.to_string(),
            });
        }
        if !self.columns.is_empty() && column.len() != self.len() {
            return Err(DataError::LengthMismatch {
                column: name.to_string(),
                expected: self.len(),
                got: column.len(),
            });
        }
        self.columns.push((name.to_string(), column));
        Ok(())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(col_name, _)| col_name == name)
            .map(|(_, col)| col)
    }

    /// Numeric values of a column, if it is numeric.
    pub fn numbers(&self, name: &str) -> Option<&[f64]> {
        match self.column(name)? {
            Column::Number(values) => Some(values),
            Column::Text(_) => None,
        }
    }

    /// Values of a column rendered as labels.
    ///
    /// Text columns are returned as-is; numeric columns are formatted
    /// (integers without a decimal point), so numeric group identifiers
    /// work as group labels.
    pub fn labels(&self, name: &str) -> Option<Vec<String>> {
        match self.column(name)? {
            Column::Text(values) => Some(values.clone()),
            Column::Number(values) => Some(
                values
                    .iter()
                    .map(|v| {
                        if v.fract() == 0.0 && v.is_finite() {
                            format!("{}", *v as i64)
                        } else {
                            format!("{v}")
                        }
                    })
                    .collect(),
            ),
        }
    }

    /// Split a numeric metric column by group label, sorted by label.
    ///
    /// The lexicographic order of the returned map defines the canonical
    /// group ordering used for pairing and difference signs downstream.
    /// Returns `None` if either column is missing or the metric column is
    /// not numeric.
    pub fn grouped_numbers(
        &self,
        group_col: &str,
        metric_col: &str,
    ) -> Option<BTreeMap<String, Vec<f64>>> {
        let groups = self.labels(group_col)?;
        let values = self.numbers(metric_col)?;
        let mut out: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for (group, value) in groups.iter().zip(values) {
            out.entry(group.clone()).or_default().push(*value);
        }
        Some(out)
    }

    /// Distinct group labels of a column, sorted.
    pub fn distinct_labels(&self, name: &str) -> Option<Vec<String>> {
        let mut labels = self.labels(name)?;
        labels.sort();
        labels.dedup();
        Some(labels)
    }
}
