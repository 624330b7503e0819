//! Data shape transforms.
//!
//! Aggregated binary input arrives as one row per group with trial and
//! success counts. Expanding it into one 0/1 observation per trial lets the
//! same pairwise machinery (tests, intervals, orchestration) run unchanged
//! on every data type.

use crate::config::Aggregation;
use crate::data::Frame;
use crate::error::{AggregateViolation, ValidationError};

/// Name of the metric column in an expanded frame.
pub const BINARY_OUTCOME_COL: &str = "binary_outcome";

/// Expand aggregated trial/success counts into individual 0/1 observations.
///
/// For each input row the output receives exactly `successes` rows with
/// outcome 1 followed by `trials - successes` rows with outcome 0, all
/// under the row's group label. The expanded row count per group therefore
/// equals its `trials` value and the outcome sum equals its `successes`.
///
/// # Errors
///
/// Counts are validated upstream, but the transform defensively rejects
/// negative, non-integer or inconsistent counts with
/// [`ValidationError::InvalidAggregate`] rather than producing a
/// nonsensical table.
pub fn expand_aggregated(
    frame: &Frame,
    group_col: &str,
    config: &Aggregation,
) -> Result<Frame, ValidationError> {
    let groups = frame
        .labels(group_col)
        .ok_or_else(|| ValidationError::MissingColumn {
            column: group_col.to_string(),
            available: frame.column_names(),
        })?;
    let trials = frame
        .numbers(&config.trials_col)
        .ok_or_else(|| ValidationError::MissingColumn {
            column: config.trials_col.clone(),
            available: frame.column_names(),
        })?;
    let successes = frame
        .numbers(&config.successes_col)
        .ok_or_else(|| ValidationError::MissingColumn {
            column: config.successes_col.clone(),
            available: frame.column_names(),
        })?;

    let mut out_groups = Vec::new();
    let mut out_values = Vec::new();

    for ((group, &t), &s) in groups.iter().zip(trials).zip(successes) {
        check_aggregate(group, t, s)?;
        let trials = t as u64;
        let successes = s as u64;
        for _ in 0..successes {
            out_groups.push(group.clone());
            out_values.push(1.0);
        }
        for _ in 0..(trials - successes) {
            out_groups.push(group.clone());
            out_values.push(0.0);
        }
    }

    tracing::debug!(
        input_rows = frame.len(),
        expanded_rows = out_groups.len(),
        "expanded aggregated binary data"
    );

    let mut expanded = Frame::new();
    // freshly built frame with two equal-length columns, push cannot fail
    let _ = expanded.push_text(group_col, out_groups);
    let _ = expanded.push_numbers(BINARY_OUTCOME_COL, out_values);
    Ok(expanded)
}

pub(crate) fn check_aggregate(group: &str, trials: f64, successes: f64) -> Result<(), ValidationError> {
    let violation = if trials < 0.0 || successes < 0.0 {
        Some(AggregateViolation::Negative)
    } else if trials.fract() != 0.0 || successes.fract() != 0.0 || !trials.is_finite() {
        Some(AggregateViolation::NotInteger)
    } else if trials == 0.0 {
        Some(AggregateViolation::ZeroTrials)
    } else if successes > trials {
        Some(AggregateViolation::SuccessesExceedTrials)
    } else {
        None
    };

    match violation {
        Some(reason) => Err(ValidationError::InvalidAggregate {
            group: group.to_string(),
            trials,
            successes,
            reason,
        }),
        None => Ok(()),
    }
}
