//! Hypothesis tests with a uniform result shape.
//!
//! Every test returns a [`TestOutcome`] carrying the statistic, the
//! two-tailed p-value and the significance decision at the requested level.
//! Pairwise tests compare exactly two samples; `anova_test` and
//! `chi2_test` double as omnibus tests across all groups.
//!
//! Zero-variance guard: when the standard error vanishes, equal point
//! estimates give statistic 0 / p = 1 and unequal estimates give p = 0;
//! the data then admits exactly one conclusion and the distributions are
//! undefined.

use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, StudentsT};

use crate::result::TestOutcome;
use crate::types::TestKind;

use super::{mean, sample_variance};

/// Welch's two-sample t-test with unequal variances.
///
/// The statistic is oriented as `(mean(b) - mean(a)) / se` so its sign
/// agrees with the pairwise difference convention.
pub fn welch_ttest(a: &[f64], b: &[f64], significance_level: f64) -> TestOutcome {
    let (na, nb) = (a.len() as f64, b.len() as f64);
    let diff = mean(b) - mean(a);
    let sa = sample_variance(a) / na;
    let sb = sample_variance(b) / nb;
    let se = (sa + sb).sqrt();

    if se == 0.0 || na < 2.0 || nb < 2.0 {
        return degenerate_outcome(TestKind::WelchTTest, diff, significance_level);
    }

    let t = diff / se;
    let df = (sa + sb) * (sa + sb) / (sa * sa / (na - 1.0) + sb * sb / (nb - 1.0));
    let pvalue = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        Err(_) => 1.0,
    };

    TestOutcome {
        test: TestKind::WelchTTest,
        statistic: t,
        pvalue,
        significant: pvalue < significance_level,
    }
}

/// One-way ANOVA across three or more groups.
///
/// Used only as an omnibus pre-test; it answers "is there any difference"
/// and never gates the pairwise comparisons.
pub fn anova_test(groups: &[&[f64]], significance_level: f64) -> TestOutcome {
    let k = groups.len() as f64;
    let n_total: usize = groups.iter().map(|g| g.len()).sum();
    let n = n_total as f64;

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n;

    let ss_between: f64 = groups
        .iter()
        .map(|g| {
            let m = mean(g);
            g.len() as f64 * (m - grand_mean) * (m - grand_mean)
        })
        .sum();
    let ss_within: f64 = groups
        .iter()
        .map(|g| {
            let m = mean(g);
            g.iter().map(|x| (x - m) * (x - m)).sum::<f64>()
        })
        .sum();

    let df_between = k - 1.0;
    let df_within = n - k;

    if df_within <= 0.0 || ss_within == 0.0 {
        return degenerate_outcome(TestKind::AnovaTest, ss_between, significance_level);
    }

    let f = (ss_between / df_between) / (ss_within / df_within);
    let pvalue = match FisherSnedecor::new(df_between, df_within) {
        Ok(dist) => 1.0 - dist.cdf(f),
        Err(_) => 1.0,
    };

    TestOutcome {
        test: TestKind::AnovaTest,
        statistic: f,
        pvalue,
        significant: pvalue < significance_level,
    }
}

/// Chi-square test of independence on a groups x {failure, success} table.
///
/// Each sample must contain 0/1 observations; the contingency table is
/// rebuilt by collapsing them back into counts. Degrees of freedom are
/// `k - 1` for `k` groups. When one outcome column is empty (all failures
/// or all successes) no association is detectable and the outcome is
/// statistic 0 / p = 1.
pub fn chi2_test(groups: &[&[f64]], significance_level: f64) -> TestOutcome {
    let k = groups.len();
    let counts: Vec<(f64, f64)> = groups
        .iter()
        .map(|g| {
            let successes: f64 = g.iter().sum();
            (g.len() as f64 - successes, successes)
        })
        .collect();

    let total: f64 = counts.iter().map(|(f, s)| f + s).sum();
    let col_failure: f64 = counts.iter().map(|(f, _)| f).sum();
    let col_success: f64 = counts.iter().map(|(_, s)| s).sum();

    if total == 0.0 || col_failure == 0.0 || col_success == 0.0 {
        return degenerate_outcome(TestKind::Chi2Test, 0.0, significance_level);
    }

    let mut statistic = 0.0;
    for (failures, successes) in &counts {
        let row_total = failures + successes;
        let expected_failure = row_total * col_failure / total;
        let expected_success = row_total * col_success / total;
        if expected_failure > 0.0 {
            statistic += (failures - expected_failure).powi(2) / expected_failure;
        }
        if expected_success > 0.0 {
            statistic += (successes - expected_success).powi(2) / expected_success;
        }
    }

    let df = (k - 1) as f64;
    let pvalue = match ChiSquared::new(df) {
        Ok(dist) => 1.0 - dist.cdf(statistic),
        Err(_) => 1.0,
    };

    TestOutcome {
        test: TestKind::Chi2Test,
        statistic,
        pvalue,
        significant: pvalue < significance_level,
    }
}

/// Outcome for samples whose standard error vanished: equal estimates are
/// a certain non-difference, unequal ones a certain difference.
fn degenerate_outcome(test: TestKind, signed_evidence: f64, significance_level: f64) -> TestOutcome {
    if signed_evidence == 0.0 {
        TestOutcome {
            test,
            statistic: 0.0,
            pvalue: 1.0,
            significant: false,
        }
    } else {
        TestOutcome {
            test,
            statistic: if signed_evidence > 0.0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            },
            pvalue: 0.0,
            significant: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welch_detects_clear_shift() {
        let a: Vec<f64> = (0..50).map(|i| 10.0 + (i % 5) as f64 * 0.1).collect();
        let b: Vec<f64> = (0..50).map(|i| 12.0 + (i % 5) as f64 * 0.1).collect();
        let outcome = welch_ttest(&a, &b, 0.01);
        assert!(outcome.significant);
        assert!(outcome.statistic > 0.0);
        assert!(outcome.pvalue < 1e-6);
    }

    #[test]
    fn welch_accepts_identical_distributions() {
        let a = [5.0, 5.2, 4.8, 5.1, 4.9, 5.0, 5.3, 4.7];
        let b = [5.1, 4.9, 5.0, 5.2, 4.8, 5.1, 4.9, 5.0];
        let outcome = welch_ttest(&a, &b, 0.05);
        assert!(!outcome.significant);
        assert!(outcome.pvalue > 0.1);
    }

    #[test]
    fn welch_statistic_sign_follows_direction() {
        let low = [1.0, 1.1, 0.9, 1.0, 1.2];
        let high = [2.0, 2.1, 1.9, 2.0, 2.2];
        assert!(welch_ttest(&low, &high, 0.05).statistic > 0.0);
        assert!(welch_ttest(&high, &low, 0.05).statistic < 0.0);
    }

    #[test]
    fn welch_zero_variance_equal_means() {
        let outcome = welch_ttest(&[2.0, 2.0, 2.0], &[2.0, 2.0, 2.0], 0.05);
        assert_eq!(outcome.statistic, 0.0);
        assert_eq!(outcome.pvalue, 1.0);
        assert!(!outcome.significant);
    }

    #[test]
    fn anova_flags_outlier_group() {
        let base: Vec<f64> = (0..40).map(|i| 2.0 + (i % 7) as f64 * 0.05).collect();
        let outlier: Vec<f64> = (0..40).map(|i| 3.5 + (i % 7) as f64 * 0.05).collect();
        let groups: Vec<&[f64]> = vec![&base, &base, &base, &outlier];
        let outcome = anova_test(&groups, 0.01);
        assert_eq!(outcome.test, TestKind::AnovaTest);
        assert!(outcome.significant);
    }

    #[test]
    fn anova_accepts_identical_groups() {
        let a = [2.0, 2.1, 1.9, 2.05, 1.95, 2.0];
        let b = [2.05, 1.95, 2.0, 2.1, 1.9, 2.0];
        let c = [1.9, 2.1, 2.0, 2.0, 2.05, 1.95];
        let groups: Vec<&[f64]> = vec![&a, &b, &c];
        let outcome = anova_test(&groups, 0.05);
        assert!(!outcome.significant);
    }

    #[test]
    fn chi2_known_conversion_scenario() {
        // A: 120/1200 (10.0%), B: 143/1100 (13.0%) - chi2 ~ 5.1, p ~ 0.024
        let mut a = vec![1.0; 120];
        a.extend(vec![0.0; 1080]);
        let mut b = vec![1.0; 143];
        b.extend(vec![0.0; 957]);
        let outcome = chi2_test(&[&a, &b], 0.05);
        assert!(outcome.significant);
        assert!(outcome.statistic > 4.9 && outcome.statistic < 5.3);
        assert!(outcome.pvalue > 0.02 && outcome.pvalue < 0.03);
    }

    #[test]
    fn chi2_no_association_when_rates_match() {
        let mut a = vec![1.0; 100];
        a.extend(vec![0.0; 900]);
        let mut b = vec![1.0; 100];
        b.extend(vec![0.0; 900]);
        let outcome = chi2_test(&[&a, &b], 0.05);
        assert!(!outcome.significant);
        assert!(outcome.statistic < 1e-9);
    }

    #[test]
    fn chi2_empty_outcome_column_is_not_significant() {
        let a = vec![0.0; 50];
        let b = vec![0.0; 60];
        let outcome = chi2_test(&[&a, &b], 0.05);
        assert_eq!(outcome.pvalue, 1.0);
        assert!(!outcome.significant);
    }
}
