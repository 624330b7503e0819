//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::result::{Analysis, ConfidenceInterval};

/// Format an analysis for human-readable terminal output.
///
/// # Example output
///
/// ```text
/// ┌─ A/B Test Analysis ────────────────────────────────────
/// │ Data type: discrete    Statistic: mean
/// │ Groups: 2    Significance level: 1.0%
/// │
/// │ Group           n        mean  CI 99%
/// │ A           10,000    2.0012  [1.9648, 2.0376]
/// │ B           10,000    2.1034  [2.0672, 2.1396]
/// │
/// │ Comparisons:
/// │   B>A  Δ = 0.1022  CI [0.0513, 0.1531]  p = 0.0001  ✓ significant
/// └────────────────────────────────────────────────────────
/// ```
pub fn format_analysis(analysis: &Analysis) -> String {
    let sep = "\u{2500}".repeat(56);
    let mut out = String::new();

    out.push_str(&format!("\u{250C}\u{2500} A/B Test Analysis {sep}\n"));
    out.push_str(&format!(
        "\u{2502} Data type: {}    Statistic: {}\n",
        analysis.data_type, analysis.statistic
    ));
    out.push_str(&format!(
        "\u{2502} Groups: {}    Significance level: {}%\n",
        analysis.groups.len(),
        analysis.significance_level * 100.0
    ));
    out.push_str("\u{2502}\n");

    // Group table
    let ci_label = format!("CI {}%", (analysis.confidence_level * 100.0).round());
    out.push_str(&format!(
        "\u{2502} {:<10} {:>8}  {:>8}  {}\n",
        "Group", "n", analysis.statistic.to_string(), ci_label
    ));
    for stat in &analysis.group_stats {
        out.push_str(&format!(
            "\u{2502} {:<10} {:>8}  {:>8.4}  {}\n",
            stat.group,
            format_count(stat.count),
            stat.point_estimate,
            format_ci(stat.ci),
        ));
    }
    out.push_str("\u{2502}\n");

    // Omnibus line
    if let Some(omnibus) = &analysis.omnibus {
        let verdict = if omnibus.significant {
            "significant".green().bold().to_string()
        } else {
            "not significant".red().to_string()
        };
        out.push_str(&format!(
            "\u{2502} Omnibus: {}  statistic = {:.4}  p = {:.4}  ({verdict})\n",
            omnibus.test, omnibus.statistic, omnibus.pvalue
        ));
        out.push_str("\u{2502}\n");
    }

    // Pairwise comparisons, in comprehensive (ranked) order
    out.push_str("\u{2502} Comparisons:\n");
    for row in &analysis.comprehensive {
        let verdict = if row.significant {
            format!("{} significant", "\u{2713}".green())
        } else {
            format!("{} not significant", "\u{2717}".red())
        };
        let pvalue = row.corrected_pvalue.unwrap_or(row.pvalue);
        out.push_str(&format!(
            "\u{2502}   {}  \u{0394} = {:.4}  CI {}  p = {:.4}  {verdict}\n",
            row.comparison_result.bold(),
            row.abs_difference,
            format_ci(row.abs_difference_ci),
            pvalue,
        ));
    }

    out.push_str(&format!("\u{2514}{sep}{}\n", "\u{2500}".repeat(20)));
    out
}

/// Format a confidence interval as `[lower, upper]` with 4 decimals.
fn format_ci(ci: ConfidenceInterval) -> String {
    format!("[{:.4}, {:.4}]", ci.lower, ci.upper)
}

/// Format a sample size with thousands separators.
fn format_count(count: usize) -> String {
    let digits: Vec<char> = count.to_string().chars().rev().collect();
    let mut out = String::new();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::config::{Aggregation, AnalysisRequest};
    use crate::data::synth;
    use crate::types::DataType;

    #[test]
    fn format_count_inserts_separators() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1200), "1,200");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn report_mentions_groups_and_winner() {
        let frame = synth::binary_agg_two_groups();
        let request = AnalysisRequest::new(DataType::BinaryAgg, "group", "conversions")
            .aggregation(Aggregation::new("users", "conversions"));
        let analysis = Analyzer::new().analyze(&frame, &request).unwrap();

        let report = format_analysis(&analysis);
        assert!(report.contains("A/B Test Analysis"));
        assert!(report.contains("1,200"));
        assert!(report.contains("B>A"));
    }

    #[test]
    fn omnibus_line_present_for_multiple_groups() {
        let frame = synth::discrete_multiple_groups(200);
        let request = AnalysisRequest::new(DataType::Discrete, "group", "clicks");
        let analysis = Analyzer::new().analyze(&frame, &request).unwrap();

        let report = format_analysis(&analysis);
        assert!(report.contains("Omnibus: one-way ANOVA"));
    }
}
