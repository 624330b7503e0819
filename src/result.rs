//! Result types for A/B test analysis.
//!
//! The analysis core returns plain structured data; report and chart
//! collaborators consume these types without any coupling to a rendering
//! technology. Everything is serde-serializable so results can be exported
//! as JSON verbatim.

use serde::{Deserialize, Serialize};

use crate::routing::TestDescriptor;
use crate::types::{DataType, Dependency, Statistic, TestKind};

/// Round a value to 4 decimal digits for reporting.
///
/// Internal computation keeps full precision; only values that end up in
/// report-facing records are rounded.
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

// ============================================================================
// Confidence intervals
// ============================================================================

/// A two-sided confidence interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Create an interval, swapping the bounds if needed so lower <= upper.
    pub fn new(lower: f64, upper: f64) -> Self {
        if lower <= upper {
            Self { lower, upper }
        } else {
            Self {
                lower: upper,
                upper: lower,
            }
        }
    }

    /// A zero-width interval at a point estimate.
    ///
    /// Used as the degenerate policy for single-observation and
    /// zero-variance samples, where a spread estimate does not exist.
    pub fn degenerate(at: f64) -> Self {
        Self { lower: at, upper: at }
    }

    /// The interval for the negated quantity: both bounds negated and
    /// re-sorted so lower <= upper.
    pub fn mirrored(self) -> Self {
        Self::new(-self.upper, -self.lower)
    }

    /// Absolute values of both bounds, re-sorted ascending.
    ///
    /// This is the legacy display transform for absolute differences. It is
    /// not a rigorous confidence interval for |difference| - when the
    /// signed interval straddles zero the result can be anti-conservative -
    /// but it is preserved as-is for compatibility with historical reports.
    pub fn abs_sorted(self) -> Self {
        Self::new(self.lower.abs(), self.upper.abs())
    }

    /// Both bounds rounded to 4 decimal digits.
    pub fn rounded(self) -> Self {
        Self {
            lower: round4(self.lower),
            upper: round4(self.upper),
        }
    }
}

// ============================================================================
// Per-group and per-pair records
// ============================================================================

/// Summary of one group: sample size, point estimate and its interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStatistic {
    /// Group label.
    pub group: String,
    /// Number of observations in the group.
    pub count: usize,
    /// Point estimate of the statistic under comparison.
    pub point_estimate: f64,
    /// Confidence interval for the point estimate.
    pub ci: ConfidenceInterval,
    /// Trial count, for aggregated binary input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trials: Option<u64>,
    /// Success count, for aggregated binary input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successes: Option<u64>,
}

/// Significance result for one unordered group pair.
///
/// A run over k groups produces exactly k(k-1)/2 of these, one per pair in
/// sorted label order with `group1 < group2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseResult {
    /// First group of the pair (smaller label).
    pub group1: String,
    /// Second group of the pair (larger label).
    pub group2: String,
    /// Test statistic.
    pub statistic: f64,
    /// Raw p-value.
    pub pvalue: f64,
    /// Corrected p-value, when a correction method applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_pvalue: Option<f64>,
    /// Whether the difference is significant at the requested level,
    /// judged on the corrected p-value when present.
    pub significant: bool,
}

/// Signed difference estimate for one unordered group pair.
///
/// Sign convention: `difference = estimate(group2) - estimate(group1)` with
/// `group1 < group2` in sort order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceEstimate {
    /// First group of the pair (smaller label).
    pub group1: String,
    /// Second group of the pair (larger label).
    pub group2: String,
    /// Signed difference of point estimates.
    pub difference: f64,
    /// Confidence interval for the signed difference.
    pub ci: ConfidenceInterval,
}

/// Uniform result shape for a single hypothesis test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Which test produced this outcome.
    pub test: TestKind,
    /// Test statistic (t, F or chi-square).
    pub statistic: f64,
    /// Two-tailed p-value.
    pub pvalue: f64,
    /// Whether the p-value is below the significance level.
    pub significant: bool,
}

// ============================================================================
// Comprehensive rows - the final reconciled table
// ============================================================================

/// One fully reconciled comparison: both groups' statistics, the absolute
/// difference with its display interval, and the significance verdict.
///
/// Values in this record are rounded to 4 decimal digits; it is the
/// report-facing snapshot, not an input for further computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveRow {
    /// First group of the pair (smaller label).
    pub group1: String,
    /// Sample size of group1.
    pub group1_count: usize,
    /// Point estimate of group1, rounded.
    pub group1_statistic: f64,
    /// Confidence interval of group1's estimate, rounded.
    pub group1_ci: ConfidenceInterval,
    /// Second group of the pair (larger label).
    pub group2: String,
    /// Sample size of group2.
    pub group2_count: usize,
    /// Point estimate of group2, rounded.
    pub group2_statistic: f64,
    /// Confidence interval of group2's estimate, rounded.
    pub group2_ci: ConfidenceInterval,
    /// Absolute difference of the point estimates, rounded.
    pub abs_difference: f64,
    /// Display interval for the absolute difference (legacy transform,
    /// see [`ConfidenceInterval::abs_sorted`]).
    pub abs_difference_ci: ConfidenceInterval,
    /// Textual comparison direction, `"{winner}>{loser}"`.
    pub comparison_result: String,
    /// Raw p-value of the pairwise test.
    pub pvalue: f64,
    /// Corrected p-value, when a correction method applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_pvalue: Option<f64>,
    /// Whether the pair differs significantly.
    pub significant: bool,
}

// ============================================================================
// Analysis - the full result bundle
// ============================================================================

/// Complete structured output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Data type the analysis ran under.
    pub data_type: DataType,
    /// Statistic under comparison.
    pub statistic: Statistic,
    /// Dependency structure of the samples.
    pub dependency: Dependency,
    /// Significance level used for every decision.
    pub significance_level: f64,
    /// Confidence level used for every interval.
    pub confidence_level: f64,
    /// Sorted group labels.
    pub groups: Vec<String>,
    /// The routed procedure bundle.
    pub descriptor: TestDescriptor,
    /// Per-group statistics, in sorted label order.
    pub group_stats: Vec<GroupStatistic>,
    /// Omnibus test outcome, for three or more groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omnibus: Option<TestOutcome>,
    /// Per-pair significance results.
    pub pairwise: Vec<PairwiseResult>,
    /// Per-pair signed difference estimates.
    pub differences: Vec<DifferenceEstimate>,
    /// The reconciled, ranked comparison table.
    pub comprehensive: Vec<ComprehensiveRow>,
}

impl Analysis {
    /// The group with the highest point estimate.
    pub fn best_group(&self) -> Option<&GroupStatistic> {
        self.group_stats
            .iter()
            .max_by(|a, b| a.point_estimate.total_cmp(&b.point_estimate))
    }

    /// Whether any pairwise comparison is significant.
    pub fn any_significant(&self) -> bool {
        self.pairwise.iter().any(|p| p.significant)
    }
}
