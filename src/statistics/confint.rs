//! Confidence interval estimators.
//!
//! Two families: single-sample intervals for a group's statistic value
//! (`t_ci`, `wilson_ci`) and two-sample intervals for a between-group
//! difference (`welch_ci`, `newcombe_wilson_ci`). The difference methods
//! are oriented as `estimate(b) - estimate(a)` so their sign agrees with
//! the pairwise difference convention used everywhere else.
//!
//! Degenerate inputs (a single observation, or zero variance) produce a
//! zero-width interval at the point estimate rather than an error or NaN;
//! the spread of such a sample is simply unknowable from the data.

use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::error::AnalysisError;
use crate::result::ConfidenceInterval;
use crate::routing::CiParams;
use crate::types::CiKind;

use super::{mean, sample_variance};

/// Effective alpha for an interval: `1 - confidence_level` when the params
/// carry an explicit override, the significance level otherwise.
fn effective_alpha(significance_level: f64, params: &CiParams) -> f64 {
    match params.confidence_level {
        Some(confidence) => 1.0 - confidence,
        None => significance_level,
    }
}

/// Two-sided quantile of Student's t for the given tail mass.
///
/// Returns `None` when the distribution cannot be constructed (df <= 0),
/// which callers translate into the degenerate-interval policy.
fn t_quantile(df: f64, alpha: f64) -> Option<f64> {
    if df <= 0.0 {
        return None;
    }
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some(dist.inverse_cdf(1.0 - alpha / 2.0))
}

/// Two-sided standard normal quantile.
fn z_quantile(alpha: f64) -> f64 {
    // standard normal construction cannot fail
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.inverse_cdf(1.0 - alpha / 2.0)
}

/// t-distribution confidence interval for a single mean.
///
/// Margin is `t(df, alpha) * s / sqrt(n)` with `df = n - 1`. Confidence
/// level is `1 - significance_level` unless overridden in `params`.
pub fn t_ci(data: &[f64], significance_level: f64, params: &CiParams) -> ConfidenceInterval {
    let alpha = effective_alpha(significance_level, params);
    let n = data.len();
    let m = mean(data);
    let variance = sample_variance(data);
    if n < 2 || variance == 0.0 {
        return ConfidenceInterval::degenerate(m);
    }
    match t_quantile((n - 1) as f64, alpha) {
        Some(t) => {
            let margin = t * (variance / n as f64).sqrt();
            ConfidenceInterval::new(m - margin, m + margin)
        }
        None => ConfidenceInterval::degenerate(m),
    }
}

/// Welch confidence interval for `mean(b) - mean(a)` under unequal
/// variances, using the Welch-Satterthwaite effective degrees of freedom.
pub fn welch_ci(
    a: &[f64],
    b: &[f64],
    significance_level: f64,
    params: &CiParams,
) -> ConfidenceInterval {
    let alpha = effective_alpha(significance_level, params);
    let diff = mean(b) - mean(a);
    let (na, nb) = (a.len(), b.len());
    if na < 2 || nb < 2 {
        return ConfidenceInterval::degenerate(diff);
    }

    let sa = sample_variance(a) / na as f64;
    let sb = sample_variance(b) / nb as f64;
    let se = (sa + sb).sqrt();
    if se == 0.0 {
        return ConfidenceInterval::degenerate(diff);
    }

    let df = (sa + sb) * (sa + sb)
        / (sa * sa / (na as f64 - 1.0) + sb * sb / (nb as f64 - 1.0));
    match t_quantile(df, alpha) {
        Some(t) => ConfidenceInterval::new(diff - t * se, diff + t * se),
        None => ConfidenceInterval::degenerate(diff),
    }
}

/// Wilson score interval for a single proportion, without continuity
/// correction. Expects 0/1 observations.
pub fn wilson_ci(data: &[f64], significance_level: f64, params: &CiParams) -> ConfidenceInterval {
    let alpha = effective_alpha(significance_level, params);
    let n = data.len() as f64;
    let p = mean(data);
    if data.is_empty() {
        return ConfidenceInterval::degenerate(p);
    }

    let z = z_quantile(alpha);
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let margin = (z / denom) * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt();
    ConfidenceInterval::new(center - margin, center + margin)
}

/// Newcombe interval for a difference of two independent proportions,
/// `p(b) - p(a)`, combining the groups' individual Wilson intervals.
pub fn newcombe_wilson_ci(
    a: &[f64],
    b: &[f64],
    significance_level: f64,
    params: &CiParams,
) -> ConfidenceInterval {
    let pa = mean(a);
    let pb = mean(b);
    let diff = pb - pa;
    if a.is_empty() || b.is_empty() {
        return ConfidenceInterval::degenerate(diff);
    }

    let wa = wilson_ci(a, significance_level, params);
    let wb = wilson_ci(b, significance_level, params);

    let lower = diff - ((pb - wb.lower).powi(2) + (wa.upper - pa).powi(2)).sqrt();
    let upper = diff + ((wb.upper - pb).powi(2) + (pa - wa.lower).powi(2)).sqrt();
    ConfidenceInterval::new(lower, upper)
}

/// Dispatch a single-sample interval method.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidRouting`] if the routed method is a
/// difference method; the shipped asset never pairs them that way, so this
/// only fires for malformed injected tables.
pub fn statistic_interval(
    method: CiKind,
    data: &[f64],
    significance_level: f64,
    params: &CiParams,
) -> Result<ConfidenceInterval, AnalysisError> {
    match method {
        CiKind::TCi => Ok(t_ci(data, significance_level, params)),
        CiKind::WilsonCi => Ok(wilson_ci(data, significance_level, params)),
        CiKind::WelchCi | CiKind::NewcombeWilsonCi => Err(AnalysisError::InvalidRouting {
            message: format!("{method} is a difference method, not a single-sample method"),
        }),
    }
}

/// Dispatch a difference interval method for `estimate(b) - estimate(a)`.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidRouting`] if the routed method is a
/// single-sample method.
pub fn difference_interval(
    method: CiKind,
    a: &[f64],
    b: &[f64],
    significance_level: f64,
    params: &CiParams,
) -> Result<ConfidenceInterval, AnalysisError> {
    match method {
        CiKind::WelchCi => Ok(welch_ci(a, b, significance_level, params)),
        CiKind::NewcombeWilsonCi => Ok(newcombe_wilson_ci(a, b, significance_level, params)),
        CiKind::TCi | CiKind::WilsonCi => Err(AnalysisError::InvalidRouting {
            message: format!("{method} is a single-sample method, not a difference method"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: CiParams = CiParams {
        confidence_level: None,
    };

    #[test]
    fn t_ci_contains_mean_and_is_symmetric() {
        let data = [4.8, 5.1, 4.9, 5.3, 5.0, 4.7, 5.2, 5.1];
        let ci = t_ci(&data, 0.05, &P);
        let m = mean(&data);
        assert!(ci.lower < m && m < ci.upper);
        assert!(((m - ci.lower) - (ci.upper - m)).abs() < 1e-12);
    }

    #[test]
    fn t_ci_widens_with_confidence() {
        let data = [4.8, 5.1, 4.9, 5.3, 5.0, 4.7, 5.2, 5.1];
        let narrow = t_ci(&data, 0.05, &P);
        let wide = t_ci(&data, 0.01, &P);
        assert!(wide.upper - wide.lower > narrow.upper - narrow.lower);
    }

    #[test]
    fn t_ci_explicit_confidence_override() {
        let data = [4.8, 5.1, 4.9, 5.3, 5.0, 4.7, 5.2, 5.1];
        let overridden = t_ci(
            &data,
            0.01,
            &CiParams {
                confidence_level: Some(0.95),
            },
        );
        let direct = t_ci(&data, 0.05, &P);
        assert!((overridden.lower - direct.lower).abs() < 1e-12);
        assert!((overridden.upper - direct.upper).abs() < 1e-12);
    }

    #[test]
    fn zero_variance_collapses_to_point() {
        let ci = t_ci(&[3.0, 3.0, 3.0, 3.0], 0.05, &P);
        assert_eq!(ci, ConfidenceInterval::degenerate(3.0));

        let single = t_ci(&[7.5], 0.05, &P);
        assert_eq!(single, ConfidenceInterval::degenerate(7.5));
    }

    #[test]
    fn welch_ci_orientation_matches_difference() {
        let a = [1.0, 1.2, 0.9, 1.1, 1.0, 0.8];
        let b = [2.0, 2.3, 1.9, 2.1, 2.2, 1.8];
        let ci = welch_ci(&a, &b, 0.05, &P);
        let diff = mean(&b) - mean(&a);
        // interval centered on mean(b) - mean(a), which is positive here
        assert!(ci.lower > 0.0);
        assert!(ci.lower < diff && diff < ci.upper);
    }

    #[test]
    fn welch_ci_degenerate_when_both_constant() {
        let ci = welch_ci(&[2.0, 2.0], &[5.0, 5.0], 0.05, &P);
        assert_eq!(ci, ConfidenceInterval::degenerate(3.0));
    }

    #[test]
    fn wilson_ci_stays_in_unit_interval() {
        // extreme proportions must not leave [0, 1]
        let zeros = vec![0.0; 20];
        let ones = vec![1.0; 20];
        for data in [&zeros, &ones] {
            let ci = wilson_ci(data, 0.01, &P);
            assert!(ci.lower >= 0.0 && ci.upper <= 1.0);
            assert!(ci.upper > ci.lower);
        }
    }

    #[test]
    fn wilson_ci_known_value() {
        // 120 successes of 1200: Wilson 99% interval around 0.10
        let mut data = vec![1.0; 120];
        data.extend(vec![0.0; 1080]);
        let ci = wilson_ci(&data, 0.01, &P);
        assert!(ci.lower > 0.078 && ci.lower < 0.082);
        assert!(ci.upper > 0.121 && ci.upper < 0.125);
    }

    #[test]
    fn newcombe_interval_brackets_difference() {
        let mut a = vec![1.0; 120];
        a.extend(vec![0.0; 1080]);
        let mut b = vec![1.0; 143];
        b.extend(vec![0.0; 957]);
        let ci = newcombe_wilson_ci(&a, &b, 0.01, &P);
        let diff = mean(&b) - mean(&a);
        assert!(ci.lower < diff && diff < ci.upper);
        assert!(ci.lower > -1.0 && ci.upper < 1.0);
    }

    #[test]
    fn dispatch_rejects_mismatched_arity() {
        let err = statistic_interval(CiKind::WelchCi, &[1.0, 2.0], 0.05, &P).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRouting { .. }));
        let err =
            difference_interval(CiKind::TCi, &[1.0, 2.0], &[3.0, 4.0], 0.05, &P).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRouting { .. }));
    }
}
