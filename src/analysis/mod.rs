//! The analysis pipeline: routing, orchestration and result assembly.
//!
//! [`Analyzer`] is the single entry point. One call to
//! [`Analyzer::analyze`] drives the full pipeline:
//!
//! 1. Validate the table and parameters (pre-flight, aborts on failure)
//! 2. Resolve the test descriptor from the routing table
//! 3. Expand aggregated binary input into individual observations
//! 4. Compute per-group statistics with confidence intervals
//! 5. Compute per-pair signed differences with confidence intervals
//! 6. Run the omnibus test (three or more groups)
//! 7. Run all pairwise tests and apply the correction
//! 8. Reconcile everything into the ranked comprehensive table

mod comprehensive;
mod pairwise;

pub use pairwise::run_pairwise;

use std::collections::BTreeMap;

use crate::config::AnalysisRequest;
use crate::data::Frame;
use crate::error::AnalysisError;
use crate::result::{Analysis, DifferenceEstimate, GroupStatistic, TestOutcome};
use crate::routing::{RoutingTable, TestDescriptor};
use crate::statistics::{
    anova_test, chi2_test, difference_interval, statistic_interval, welch_ttest,
};
use crate::transform::{expand_aggregated, BINARY_OUTCOME_COL};
use crate::types::{DataType, GroupCountClass, TestKind};
use crate::validate::validate_inputs;

/// A/B test analyzer holding the routing configuration.
///
/// The routing table is loaded once (embedded asset) or injected, and is
/// immutable afterwards; one analyzer can serve any number of analysis
/// runs, including from multiple threads.
///
/// # Example
///
/// ```
/// use verdict::{Analyzer, AnalysisRequest, DataType, data::synth};
///
/// let frame = synth::discrete_two_groups(500);
/// let request = AnalysisRequest::new(DataType::Discrete, "group", "clicks");
/// let analysis = Analyzer::new().analyze(&frame, &request).unwrap();
/// assert_eq!(analysis.pairwise.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    routing: RoutingTable,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create an analyzer with the embedded routing table.
    pub fn new() -> Self {
        Self {
            routing: RoutingTable::embedded().clone(),
        }
    }

    /// Create an analyzer with an injected routing table.
    pub fn with_routing(routing: RoutingTable) -> Self {
        Self { routing }
    }

    /// Run one analysis.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Validation`] when the input fails a
    /// pre-flight check, [`AnalysisError::ConfigurationMissing`] when the
    /// parameter combination has no routing entry, and
    /// [`AnalysisError::DataIntegrity`] if an internal join breaks (which
    /// indicates a bug, not bad input).
    pub fn analyze(
        &self,
        frame: &Frame,
        request: &AnalysisRequest,
    ) -> Result<Analysis, AnalysisError> {
        validate_inputs(frame, request, &self.routing)?;

        let groups = frame
            .distinct_labels(&request.group_col)
            .unwrap_or_default();
        let descriptor = self
            .routing
            .resolve(
                request.data_type,
                GroupCountClass::from_count(groups.len()),
                request.statistic,
                request.dependency,
            )?
            .clone();

        tracing::info!(
            data_type = %request.data_type,
            groups = groups.len(),
            pairwise = %descriptor.pairwise_test,
            "routed analysis"
        );

        // Aggregated input is expanded so the same pairwise machinery
        // applies; the aggregate counts are kept for the group records.
        let expanded;
        let (working, metric_col) = match (&request.data_type, &request.aggregation) {
            (DataType::BinaryAgg, Some(aggregation)) => {
                expanded = expand_aggregated(frame, &request.group_col, aggregation)?;
                (&expanded, BINARY_OUTCOME_COL)
            }
            _ => (frame, request.metric_col.as_str()),
        };

        let grouped = working
            .grouped_numbers(&request.group_col, metric_col)
            .ok_or_else(|| AnalysisError::DataIntegrity {
                message: format!("metric column '{metric_col}' vanished after validation"),
            })?;

        let group_stats = self.group_statistics(frame, request, &grouped, &descriptor)?;
        let differences = self.difference_estimates(request, &grouped, &descriptor)?;

        let omnibus = match (descriptor.omnibus_test, groups.len()) {
            (Some(test), k) if k >= 3 => {
                Some(run_omnibus(test, &grouped, request.significance_level))
            }
            _ => None,
        };

        let pairwise = run_pairwise(
            &grouped,
            descriptor.pairwise_test,
            descriptor.correction,
            request.significance_level,
        );

        let comprehensive = comprehensive::build(&group_stats, &differences, &pairwise)?;

        Ok(Analysis {
            data_type: request.data_type,
            statistic: request.statistic,
            dependency: request.dependency,
            significance_level: request.significance_level,
            confidence_level: request.confidence_level,
            groups,
            descriptor,
            group_stats,
            omnibus,
            pairwise,
            differences,
            comprehensive,
        })
    }

    fn group_statistics(
        &self,
        original: &Frame,
        request: &AnalysisRequest,
        grouped: &BTreeMap<String, Vec<f64>>,
        descriptor: &TestDescriptor,
    ) -> Result<Vec<GroupStatistic>, AnalysisError> {
        let aggregates = aggregate_counts(original, request);

        grouped
            .iter()
            .map(|(group, values)| {
                let ci = statistic_interval(
                    descriptor.ci_method.statistic_value,
                    values,
                    request.significance_level,
                    &descriptor.ci_params.statistic_value,
                )?;
                let (trials, successes) = aggregates
                    .as_ref()
                    .and_then(|counts| counts.get(group).copied())
                    .map_or((None, None), |(t, s)| (Some(t), Some(s)));
                Ok(GroupStatistic {
                    group: group.clone(),
                    count: values.len(),
                    point_estimate: crate::statistics::mean(values),
                    ci,
                    trials,
                    successes,
                })
            })
            .collect()
    }

    fn difference_estimates(
        &self,
        request: &AnalysisRequest,
        grouped: &BTreeMap<String, Vec<f64>>,
        descriptor: &TestDescriptor,
    ) -> Result<Vec<DifferenceEstimate>, AnalysisError> {
        let labels: Vec<&String> = grouped.keys().collect();
        let mut estimates = Vec::with_capacity(labels.len() * (labels.len() - 1) / 2);

        for i in 0..labels.len() {
            for j in (i + 1)..labels.len() {
                let a = &grouped[labels[i]];
                let b = &grouped[labels[j]];
                let ci = difference_interval(
                    descriptor.ci_method.difference,
                    a,
                    b,
                    request.significance_level,
                    &descriptor.ci_params.difference,
                )?;
                estimates.push(DifferenceEstimate {
                    group1: labels[i].clone(),
                    group2: labels[j].clone(),
                    difference: crate::statistics::mean(b) - crate::statistics::mean(a),
                    ci,
                });
            }
        }

        Ok(estimates)
    }
}

/// Per-group (trials, successes) sums for aggregated binary input.
fn aggregate_counts(
    frame: &Frame,
    request: &AnalysisRequest,
) -> Option<BTreeMap<String, (u64, u64)>> {
    if request.data_type != DataType::BinaryAgg {
        return None;
    }
    let aggregation = request.aggregation.as_ref()?;
    let groups = frame.labels(&request.group_col)?;
    let trials = frame.numbers(&aggregation.trials_col)?;
    let successes = frame.numbers(&aggregation.successes_col)?;

    let mut counts: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for ((group, &t), &s) in groups.iter().zip(trials).zip(successes) {
        let entry = counts.entry(group.clone()).or_insert((0, 0));
        entry.0 += t as u64;
        entry.1 += s as u64;
    }
    Some(counts)
}

/// Run the routed omnibus test across all groups.
///
/// The omnibus answers "is there any difference at all" and is reported
/// alongside the pairwise results; it never suppresses them.
fn run_omnibus(
    test: TestKind,
    grouped: &BTreeMap<String, Vec<f64>>,
    significance_level: f64,
) -> TestOutcome {
    let samples: Vec<&[f64]> = grouped.values().map(Vec::as_slice).collect();
    let outcome = match test {
        TestKind::AnovaTest => anova_test(&samples, significance_level),
        TestKind::Chi2Test => chi2_test(&samples, significance_level),
        // never routed as an omnibus, but the dispatch stays total
        TestKind::WelchTTest => welch_ttest(samples[0], samples[1], significance_level),
    };
    tracing::debug!(test = %test, pvalue = outcome.pvalue, "omnibus test");
    outcome
}

/// Usage documentation for a data type, from the embedded examples asset.
pub fn usage(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Continuous => include_str!("../../assets/usage/continuous.md"),
        DataType::Discrete => include_str!("../../assets/usage/discrete.md"),
        DataType::Binary => include_str!("../../assets/usage/binary.md"),
        DataType::BinaryAgg => include_str!("../../assets/usage/binary_agg.md"),
    }
}
