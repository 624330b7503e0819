//! Comprehensive result assembly.
//!
//! The final reconciliation step: join per-group statistics, per-pair
//! difference estimates and per-pair significance into one ranked table.
//! The joins are exact; a pairwise row referencing a group or a pair with
//! no matching record is an internal invariant violation and fails the
//! run, never a silent default.

use crate::error::AnalysisError;
use crate::result::{
    round4, ComprehensiveRow, DifferenceEstimate, GroupStatistic, PairwiseResult,
};

/// Build the ranked comprehensive table from the three partial results.
///
/// Rows are ordered by: significant first, then descending group1
/// statistic, then ascending absolute difference - surfacing the most
/// significant, highest-performing comparisons at the top.
///
/// # Errors
///
/// Returns [`AnalysisError::DataIntegrity`] if a pairwise row references a
/// group without statistics or a pair without a difference estimate.
pub fn build(
    group_stats: &[GroupStatistic],
    differences: &[DifferenceEstimate],
    pairwise: &[PairwiseResult],
) -> Result<Vec<ComprehensiveRow>, AnalysisError> {
    let mut rows = Vec::with_capacity(pairwise.len());

    for pair in pairwise {
        let group1 = find_group(group_stats, &pair.group1)?;
        let group2 = find_group(group_stats, &pair.group2)?;
        let (difference, diff_ci) = find_difference(differences, &pair.group1, &pair.group2)?;

        // winner by point estimate; an exact tie goes to group2
        let comparison_result = if group1.point_estimate > group2.point_estimate {
            format!("{}>{}", pair.group1, pair.group2)
        } else {
            format!("{}>{}", pair.group2, pair.group1)
        };

        rows.push(ComprehensiveRow {
            group1: pair.group1.clone(),
            group1_count: group1.count,
            group1_statistic: round4(group1.point_estimate),
            group1_ci: group1.ci.rounded(),
            group2: pair.group2.clone(),
            group2_count: group2.count,
            group2_statistic: round4(group2.point_estimate),
            group2_ci: group2.ci.rounded(),
            abs_difference: round4(difference.abs()),
            abs_difference_ci: diff_ci.abs_sorted().rounded(),
            comparison_result,
            pvalue: pair.pvalue,
            corrected_pvalue: pair.corrected_pvalue,
            significant: pair.significant,
        });
    }

    rows.sort_by(|a, b| {
        b.significant
            .cmp(&a.significant)
            .then(b.group1_statistic.total_cmp(&a.group1_statistic))
            .then(a.abs_difference.total_cmp(&b.abs_difference))
    });

    Ok(rows)
}

fn find_group<'a>(
    group_stats: &'a [GroupStatistic],
    label: &str,
) -> Result<&'a GroupStatistic, AnalysisError> {
    group_stats
        .iter()
        .find(|stat| stat.group == label)
        .ok_or_else(|| AnalysisError::DataIntegrity {
            message: format!("pairwise result references group '{label}' with no statistics"),
        })
}

/// Locate the difference for a pair, trying the reversed key as well.
///
/// A difference stored under `(group2, group1)` is normalized by negating
/// the value and mirroring the interval bounds.
fn find_difference(
    differences: &[DifferenceEstimate],
    group1: &str,
    group2: &str,
) -> Result<(f64, crate::result::ConfidenceInterval), AnalysisError> {
    if let Some(found) = differences
        .iter()
        .find(|d| d.group1 == group1 && d.group2 == group2)
    {
        return Ok((found.difference, found.ci));
    }
    if let Some(found) = differences
        .iter()
        .find(|d| d.group1 == group2 && d.group2 == group1)
    {
        return Ok((-found.difference, found.ci.mirrored()));
    }
    Err(AnalysisError::DataIntegrity {
        message: format!("no difference estimate for pair ('{group1}', '{group2}')"),
    })
}
