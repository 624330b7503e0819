//! Pairwise test orchestration.
//!
//! Drives every unordered group pair through the routed pairwise test,
//! then applies the routed correction to the complete p-value vector. Pair
//! enumeration walks the sorted group labels in (i, j > i) order; that
//! sort defines the canonical `group1 < group2` relation used for
//! difference signs and table joins everywhere else.

use std::collections::BTreeMap;

use crate::result::PairwiseResult;
use crate::statistics::{anova_test, apply_correction, chi2_test, welch_ttest};
use crate::types::{CorrectionKind, TestKind};

/// Run the routed pairwise test over all group pairs.
///
/// Returns exactly `k(k-1)/2` results for `k` groups. The correction, when
/// present, is applied after all pairs are computed so it sees the full
/// comparison count; the significance flag then uses the corrected
/// p-value, otherwise the raw one.
pub fn run_pairwise(
    grouped: &BTreeMap<String, Vec<f64>>,
    test: TestKind,
    correction: Option<CorrectionKind>,
    significance_level: f64,
) -> Vec<PairwiseResult> {
    let labels: Vec<&String> = grouped.keys().collect();
    let k = labels.len();

    let mut results = Vec::with_capacity(k * (k - 1) / 2);
    for i in 0..k {
        for j in (i + 1)..k {
            let a = &grouped[labels[i]];
            let b = &grouped[labels[j]];
            let outcome = match test {
                TestKind::WelchTTest => welch_ttest(a, b, significance_level),
                TestKind::Chi2Test => chi2_test(&[a, b], significance_level),
                TestKind::AnovaTest => anova_test(&[a, b], significance_level),
            };
            results.push(PairwiseResult {
                group1: labels[i].clone(),
                group2: labels[j].clone(),
                statistic: outcome.statistic,
                pvalue: outcome.pvalue,
                corrected_pvalue: None,
                significant: outcome.significant,
            });
        }
    }

    if let Some(method) = correction {
        let pvalues: Vec<f64> = results.iter().map(|r| r.pvalue).collect();
        let corrected = apply_correction(method, &pvalues, k);
        for (result, corrected_pvalue) in results.iter_mut().zip(corrected) {
            result.corrected_pvalue = Some(corrected_pvalue);
            result.significant = corrected_pvalue < significance_level;
        }
    }

    tracing::debug!(
        pairs = results.len(),
        corrected = correction.is_some(),
        "pairwise comparisons computed"
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped(specs: &[(&str, &[f64])]) -> BTreeMap<String, Vec<f64>> {
        specs
            .iter()
            .map(|(label, values)| (label.to_string(), values.to_vec()))
            .collect()
    }

    #[test]
    fn two_groups_yield_one_pair() {
        let data = grouped(&[
            ("B", &[5.0, 5.1, 4.9, 5.2, 4.8]),
            ("A", &[1.0, 1.1, 0.9, 1.2, 0.8]),
        ]);
        let results = run_pairwise(&data, TestKind::WelchTTest, None, 0.05);
        assert_eq!(results.len(), 1);
        // canonical order: group1 is the smaller label regardless of insertion
        assert_eq!(results[0].group1, "A");
        assert_eq!(results[0].group2, "B");
        assert!(results[0].corrected_pvalue.is_none());
    }

    #[test]
    fn five_groups_yield_ten_pairs_in_order() {
        let values: &[f64] = &[1.0, 1.1, 0.9, 1.05, 0.95];
        let data = grouped(&[
            ("A", values),
            ("B", values),
            ("C", values),
            ("D", values),
            ("E", values),
        ]);
        let results = run_pairwise(&data, TestKind::WelchTTest, None, 0.05);
        assert_eq!(results.len(), 10);
        assert_eq!(results[0].group1, "A");
        assert_eq!(results[0].group2, "B");
        assert_eq!(results[9].group1, "D");
        assert_eq!(results[9].group2, "E");
        for result in &results {
            assert!(result.group1 < result.group2);
        }
    }

    #[test]
    fn correction_fills_corrected_pvalues() {
        let low: &[f64] = &[1.0, 1.1, 0.9, 1.05, 0.95, 1.0];
        let high: &[f64] = &[9.0, 9.1, 8.9, 9.05, 8.95, 9.0];
        let data = grouped(&[("A", low), ("B", low), ("C", high)]);
        let results = run_pairwise(
            &data,
            TestKind::WelchTTest,
            Some(CorrectionKind::Bonferroni),
            0.01,
        );
        assert_eq!(results.len(), 3);
        for result in &results {
            let corrected = result.corrected_pvalue.unwrap();
            assert!(corrected >= result.pvalue);
            assert_eq!(result.significant, corrected < 0.01);
        }
        // A vs B identical, both vs C clearly different
        assert!(!results[0].significant);
        assert!(results[1].significant);
        assert!(results[2].significant);
    }
}
