//! Statistical methods for A/B test analysis.
//!
//! This module provides the statistical infrastructure the analysis
//! pipeline orchestrates:
//! - Confidence interval estimators for group statistics and between-group
//!   differences (t, Welch, Wilson, Newcombe-Wilson)
//! - Hypothesis tests with a uniform result shape (Welch t-test, one-way
//!   ANOVA, chi-square independence)
//! - Multiple-comparison correction (Bonferroni)
//!
//! Distribution CDFs and quantiles come from `statrs`; nothing here
//! implements its own probability distributions.

mod confint;
mod correction;
mod hypothesis;

pub use confint::{
    difference_interval, newcombe_wilson_ci, statistic_interval, t_ci, welch_ci, wilson_ci,
};
pub use correction::{apply_correction, bonferroni};
pub use hypothesis::{anova_test, chi2_test, welch_ttest};

/// Arithmetic mean. Returns 0.0 for an empty slice; validation rejects
/// empty groups before any statistic is computed.
pub(crate) fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Unbiased sample variance (n - 1 denominator). Returns 0.0 when fewer
/// than two observations exist.
pub(crate) fn sample_variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (n - 1) as f64
}
