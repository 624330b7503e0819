//! Error types for A/B test analysis.

use std::fmt;

use crate::types::{DataType, Dependency, GroupCountClass, Statistic};

/// Errors that can occur during an analysis run.
///
/// The analysis is a deterministic pure computation: every error is either a
/// configuration problem, an input problem, or an internal invariant
/// violation. Nothing here is transient, so nothing is ever retried and a
/// failure aborts the whole run before any partial result is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The routing table has no entry for the requested parameter tuple.
    ///
    /// Routing lookup is an exact four-key match with no partial matching
    /// and no defaults, so a missing entry always means the shipped (or
    /// injected) configuration does not support this combination.
    ConfigurationMissing {
        /// Requested data type.
        data_type: DataType,
        /// Group-count class derived from the input ("2" or "multiple").
        group_count: GroupCountClass,
        /// Requested statistic.
        statistic: Statistic,
        /// Requested dependency structure.
        dependency: Dependency,
    },

    /// The routing asset itself could not be parsed.
    InvalidRouting {
        /// Description of the schema violation.
        message: String,
    },

    /// Input table or parameters failed a pre-flight check.
    Validation(ValidationError),

    /// An internal join failed: a pairwise result references a group or a
    /// difference estimate that does not exist.
    ///
    /// This indicates a core invariant violation and should never occur for
    /// input that passed validation; it is surfaced loudly instead of being
    /// silently defaulted.
    DataIntegrity {
        /// Description of the missing record.
        message: String,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationMissing {
                data_type,
                group_count,
                statistic,
                dependency,
            } => write!(
                f,
                "no routing entry for data_type={data_type}, groups={group_count}, \
                 statistic={statistic}, dependency={dependency}"
            ),
            Self::InvalidRouting { message } => {
                write!(f, "routing configuration is invalid: {message}")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::DataIntegrity { message } => {
                write!(f, "internal data integrity violation: {message}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for AnalysisError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// A pre-flight input check failed.
///
/// Every variant names the offending column or value so the caller can fix
/// the input without digging through the table themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The input table has no rows.
    EmptyTable,

    /// A required column is missing from the table.
    MissingColumn {
        /// The column that was requested.
        column: String,
        /// The columns the table actually has.
        available: Vec<String>,
    },

    /// The metric column is not numeric.
    NotNumeric {
        /// Name of the offending column.
        column: String,
    },

    /// A column contains missing values.
    MissingValues {
        /// Name of the offending column.
        column: String,
    },

    /// Fewer than two distinct groups were found.
    TooFewGroups {
        /// Number of distinct groups in the table.
        found: usize,
    },

    /// More than ten distinct groups were found.
    TooManyGroups {
        /// Number of distinct groups in the table.
        found: usize,
    },

    /// A group has no observations.
    EmptyGroup {
        /// Label of the empty group.
        group: String,
    },

    /// The significance level is outside the open interval (0, 1).
    SignificanceOutOfRange {
        /// The rejected value.
        value: f64,
    },

    /// Aggregated binary input requires an aggregation config naming the
    /// trials and successes columns, and none was supplied.
    MissingAggregationConfig,

    /// Aggregated trial/success counts violate their constraints.
    InvalidAggregate {
        /// Group label of the offending row.
        group: String,
        /// Trials recorded for the row.
        trials: f64,
        /// Successes recorded for the row.
        successes: f64,
        /// Which constraint was violated.
        reason: AggregateViolation,
    },

    /// Binary observations must be exactly 0 or 1.
    NotBinary {
        /// Name of the offending column.
        column: String,
        /// First non-binary value encountered.
        value: f64,
    },
}

/// The specific constraint an aggregated row violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateViolation {
    /// Trials or successes was negative.
    Negative,
    /// Successes exceeded trials.
    SuccessesExceedTrials,
    /// Trials was zero.
    ZeroTrials,
    /// Trials or successes was not a whole number.
    NotInteger,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTable => write!(f, "input table is empty - nothing to analyze"),
            Self::MissingColumn { column, available } => write!(
                f,
                "column '{column}' not found; available columns: {available:?}"
            ),
            Self::NotNumeric { column } => {
                write!(f, "column '{column}' must contain numeric data")
            }
            Self::MissingValues { column } => {
                write!(f, "column '{column}' contains missing values")
            }
            Self::TooFewGroups { found } => write!(
                f,
                "not enough groups to compare: found {found}, need at least 2"
            ),
            Self::TooManyGroups { found } => {
                write!(f, "too many groups: found {found}, maximum is 10")
            }
            Self::EmptyGroup { group } => write!(
                f,
                "group '{group}' has no observations; every group needs at least one"
            ),
            Self::SignificanceOutOfRange { value } => write!(
                f,
                "significance level must be strictly between 0 and 1, got {value}"
            ),
            Self::MissingAggregationConfig => write!(
                f,
                "aggregated binary input requires an aggregation config with \
                 trials and successes column names"
            ),
            Self::InvalidAggregate {
                group,
                trials,
                successes,
                reason,
            } => {
                let detail = match reason {
                    AggregateViolation::Negative => "counts cannot be negative",
                    AggregateViolation::SuccessesExceedTrials => {
                        "successes cannot exceed trials"
                    }
                    AggregateViolation::ZeroTrials => "trials cannot be zero",
                    AggregateViolation::NotInteger => "counts must be whole numbers",
                };
                write!(
                    f,
                    "invalid aggregate for group '{group}' \
                     (trials={trials}, successes={successes}): {detail}"
                )
            }
            Self::NotBinary { column, value } => write!(
                f,
                "column '{column}' must contain only 0/1 values, found {value}"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
