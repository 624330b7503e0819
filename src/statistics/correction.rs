//! Multiple-comparison correction.
//!
//! Running C(k, 2) pairwise tests together inflates the family-wise false
//! positive rate; corrected p-values compensate for the number of
//! comparisons actually performed. The correction always sees the complete
//! p-value vector, never an incremental prefix.

use crate::types::CorrectionKind;

/// Bonferroni correction.
///
/// Each p-value is multiplied by the number of unordered pairs,
/// `n_groups * (n_groups - 1) / 2`, and capped at 1.0. Order and length of
/// the input are preserved.
pub fn bonferroni(pvalues: &[f64], n_groups: usize) -> Vec<f64> {
    let n_comparisons = (n_groups * (n_groups - 1) / 2) as f64;
    pvalues
        .iter()
        .map(|p| (p * n_comparisons).min(1.0))
        .collect()
}

/// Apply the routed correction method to a p-value vector.
pub fn apply_correction(method: CorrectionKind, pvalues: &[f64], n_groups: usize) -> Vec<f64> {
    match method {
        CorrectionKind::Bonferroni => bonferroni(pvalues, n_groups),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_pair_count_and_caps() {
        // 4 groups -> 6 comparisons
        let corrected = bonferroni(&[0.01, 0.2, 0.004], 4);
        assert_eq!(corrected, vec![0.06, 1.0, 0.024]);
    }

    #[test]
    fn two_groups_single_comparison_is_identity() {
        let corrected = bonferroni(&[0.03], 2);
        assert_eq!(corrected, vec![0.03]);
    }

    #[test]
    fn corrected_never_below_raw() {
        let raw = [0.001, 0.049, 0.5, 0.99];
        let corrected = bonferroni(&raw, 5);
        for (r, c) in raw.iter().zip(&corrected) {
            assert!(c >= r);
            assert!(*c <= 1.0);
        }
    }

    #[test]
    fn preserves_order_and_length() {
        let raw = [0.5, 0.1, 0.9];
        let corrected = apply_correction(CorrectionKind::Bonferroni, &raw, 3);
        assert_eq!(corrected.len(), raw.len());
        assert!(corrected[1] < corrected[0] && corrected[0] < corrected[2]);
    }
}
