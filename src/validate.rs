//! Pre-flight input validation.
//!
//! Every check the analysis core relies on runs here, before any statistic
//! is computed: table shape, column presence and types, group cardinality,
//! parameter sanity and aggregate-count constraints. A failure aborts the
//! whole run; the core afterwards assumes a validated table.

use crate::config::AnalysisRequest;
use crate::data::{Column, Frame};
use crate::error::{AnalysisError, ValidationError};
use crate::routing::RoutingTable;
use crate::transform::check_aggregate;
use crate::types::{DataType, GroupCountClass};

/// Validate a frame and request against the routing table.
///
/// Checks run in order: non-empty table; required columns; metric column
/// type and missing values; group column missing values; group count in
/// [2, 10]; routing entry exists for the parameter combination;
/// significance level in (0, 1); no empty groups; aggregation config
/// present when the routed entry requires it; aggregate counts valid; and
/// strict 0/1 values for binary observations.
///
/// # Errors
///
/// The first failed check is returned, as a [`ValidationError`] wrapped in
/// [`AnalysisError::Validation`] (or [`AnalysisError::ConfigurationMissing`]
/// for an unroutable parameter combination).
pub fn validate_inputs(
    frame: &Frame,
    request: &AnalysisRequest,
    routing: &RoutingTable,
) -> Result<(), AnalysisError> {
    if frame.is_empty() {
        return Err(ValidationError::EmptyTable.into());
    }

    require_column(frame, &request.group_col)?;
    require_column(frame, &request.metric_col)?;
    if let Some(aggregation) = &request.aggregation {
        require_column(frame, &aggregation.trials_col)?;
        require_column(frame, &aggregation.successes_col)?;
    }

    // Metric type checks apply to per-observation input; aggregated input
    // validates its count columns further down instead.
    if request.data_type != DataType::BinaryAgg {
        let values = frame.numbers(&request.metric_col).ok_or_else(|| {
            ValidationError::NotNumeric {
                column: request.metric_col.clone(),
            }
        })?;
        if values.iter().any(|v| v.is_nan()) {
            return Err(ValidationError::MissingValues {
                column: request.metric_col.clone(),
            }
            .into());
        }
    }

    let labels = frame
        .labels(&request.group_col)
        .unwrap_or_default();
    if labels.iter().any(|label| label.is_empty() || label.as_str() == "NaN") {
        return Err(ValidationError::MissingValues {
            column: request.group_col.clone(),
        }
        .into());
    }

    let distinct = frame
        .distinct_labels(&request.group_col)
        .unwrap_or_default();
    if distinct.len() < 2 {
        return Err(ValidationError::TooFewGroups {
            found: distinct.len(),
        }
        .into());
    }
    if distinct.len() > 10 {
        return Err(ValidationError::TooManyGroups {
            found: distinct.len(),
        }
        .into());
    }

    let descriptor = routing.resolve(
        request.data_type,
        GroupCountClass::from_count(distinct.len()),
        request.statistic,
        request.dependency,
    )?;

    if request.significance_level <= 0.0 || request.significance_level >= 1.0 {
        return Err(ValidationError::SignificanceOutOfRange {
            value: request.significance_level,
        }
        .into());
    }

    for group in &distinct {
        let observations = labels.iter().filter(|label| *label == group).count();
        if observations == 0 {
            return Err(ValidationError::EmptyGroup {
                group: group.clone(),
            }
            .into());
        }
    }

    if descriptor.custom_config_required && request.aggregation.is_none() {
        return Err(ValidationError::MissingAggregationConfig.into());
    }

    match request.data_type {
        DataType::BinaryAgg => {
            // columns proven present above; aggregation proven present by
            // the custom-config check
            if let Some(aggregation) = &request.aggregation {
                let trials = frame.numbers(&aggregation.trials_col).ok_or_else(|| {
                    ValidationError::NotNumeric {
                        column: aggregation.trials_col.clone(),
                    }
                })?;
                let successes = frame.numbers(&aggregation.successes_col).ok_or_else(|| {
                    ValidationError::NotNumeric {
                        column: aggregation.successes_col.clone(),
                    }
                })?;
                for ((group, &t), &s) in labels.iter().zip(trials).zip(successes) {
                    check_aggregate(group, t, s)?;
                }
            }
        }
        DataType::Binary => {
            let values = frame.numbers(&request.metric_col).unwrap_or_default();
            if let Some(bad) = values.iter().find(|v| **v != 0.0 && **v != 1.0) {
                return Err(ValidationError::NotBinary {
                    column: request.metric_col.clone(),
                    value: *bad,
                }
                .into());
            }
        }
        DataType::Continuous | DataType::Discrete => {}
    }

    Ok(())
}

fn require_column(frame: &Frame, name: &str) -> Result<(), ValidationError> {
    match frame.column(name) {
        Some(Column::Text(_)) | Some(Column::Number(_)) => Ok(()),
        None => Err(ValidationError::MissingColumn {
            column: name.to_string(),
            available: frame.column_names(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Aggregation;
    use crate::data::synth;
    use crate::types::{Dependency, Statistic};

    fn discrete_request() -> AnalysisRequest {
        AnalysisRequest::new(DataType::Discrete, "group", "clicks")
    }

    fn routing() -> &'static RoutingTable {
        RoutingTable::embedded()
    }

    #[test]
    fn accepts_valid_discrete_frame() {
        let frame = synth::discrete_two_groups(50);
        validate_inputs(&frame, &discrete_request(), routing()).unwrap();
    }

    #[test]
    fn rejects_empty_frame() {
        let err = validate_inputs(&Frame::new(), &discrete_request(), routing()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::EmptyTable)
        ));
    }

    #[test]
    fn rejects_missing_metric_column() {
        let frame = synth::discrete_two_groups(10);
        let request = AnalysisRequest::new(DataType::Discrete, "group", "launches");
        let err = validate_inputs(&frame, &request, routing()).unwrap_err();
        match err {
            AnalysisError::Validation(ValidationError::MissingColumn { column, available }) => {
                assert_eq!(column, "launches");
                assert_eq!(available, vec!["group".to_string(), "clicks".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_text_metric_column() {
        let mut frame = Frame::new();
        frame
            .push_text("group", vec!["A".into(), "B".into()])
            .unwrap();
        frame
            .push_text("clicks", vec!["x".into(), "y".into()])
            .unwrap();
        let err = validate_inputs(&frame, &discrete_request(), routing()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::NotNumeric { .. })
        ));
    }

    #[test]
    fn rejects_missing_metric_values() {
        let mut frame = Frame::new();
        frame
            .push_text("group", vec!["A".into(), "B".into()])
            .unwrap();
        frame.push_numbers("clicks", vec![1.0, f64::NAN]).unwrap();
        let err = validate_inputs(&frame, &discrete_request(), routing()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::MissingValues { .. })
        ));
    }

    #[test]
    fn rejects_single_group() {
        let mut frame = Frame::new();
        frame
            .push_text("group", vec!["A".into(), "A".into()])
            .unwrap();
        frame.push_numbers("clicks", vec![1.0, 2.0]).unwrap();
        let err = validate_inputs(&frame, &discrete_request(), routing()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::TooFewGroups { found: 1 })
        ));
    }

    #[test]
    fn rejects_more_than_ten_groups() {
        let mut frame = Frame::new();
        let groups: Vec<String> = (0..11).map(|i| format!("G{i:02}")).collect();
        frame.push_text("group", groups).unwrap();
        frame.push_numbers("clicks", vec![1.0; 11]).unwrap();
        let err = validate_inputs(&frame, &discrete_request(), routing()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::TooManyGroups { found: 11 })
        ));
    }

    #[test]
    fn rejects_out_of_range_significance() {
        let frame = synth::discrete_two_groups(10);
        for level in [0.0, 1.0, -0.5, 2.0] {
            let mut request = discrete_request();
            request.significance_level = level;
            let err = validate_inputs(&frame, &request, routing()).unwrap_err();
            assert!(matches!(
                err,
                AnalysisError::Validation(ValidationError::SignificanceOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn unroutable_combination_is_configuration_missing() {
        let frame = synth::discrete_two_groups(10);
        let request = discrete_request().dependency(Dependency::Dependent);
        let err = validate_inputs(&frame, &request, routing()).unwrap_err();
        assert!(matches!(err, AnalysisError::ConfigurationMissing { .. }));
    }

    #[test]
    fn binary_agg_without_aggregation_config_is_rejected() {
        let frame = synth::binary_agg_two_groups();
        let request = AnalysisRequest::new(DataType::BinaryAgg, "group", "conversions");
        let err = validate_inputs(&frame, &request, routing()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::MissingAggregationConfig)
        ));
    }

    #[test]
    fn binary_agg_with_config_passes() {
        let frame = synth::binary_agg_two_groups();
        let request = AnalysisRequest::new(DataType::BinaryAgg, "group", "conversions")
            .aggregation(Aggregation::new("users", "conversions"));
        validate_inputs(&frame, &request, routing()).unwrap();
    }

    #[test]
    fn binary_agg_rejects_invalid_counts() {
        let mut frame = Frame::new();
        frame
            .push_text("group", vec!["A".into(), "B".into()])
            .unwrap();
        frame.push_numbers("users", vec![100.0, 100.0]).unwrap();
        frame
            .push_numbers("conversions", vec![20.0, 120.0])
            .unwrap();
        let request = AnalysisRequest::new(DataType::BinaryAgg, "group", "conversions")
            .aggregation(Aggregation::new("users", "conversions"));
        let err = validate_inputs(&frame, &request, routing()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::InvalidAggregate { .. })
        ));
    }

    #[test]
    fn binary_rejects_non_binary_values() {
        let mut frame = Frame::new();
        frame
            .push_text("group", vec!["A".into(), "B".into()])
            .unwrap();
        frame.push_numbers("converted", vec![0.0, 2.0]).unwrap();
        let request = AnalysisRequest::new(DataType::Binary, "group", "converted");
        let err = validate_inputs(&frame, &request, routing()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::NotBinary { value, .. }) if value == 2.0
        ));
    }

    #[test]
    fn mean_statistic_on_binary_data_is_unroutable() {
        let frame = synth::binary_agg_two_groups();
        let request = AnalysisRequest::new(DataType::BinaryAgg, "group", "conversions")
            .statistic(Statistic::Mean)
            .aggregation(Aggregation::new("users", "conversions"));
        let err = validate_inputs(&frame, &request, routing()).unwrap_err();
        assert!(matches!(err, AnalysisError::ConfigurationMissing { .. }));
    }
}
