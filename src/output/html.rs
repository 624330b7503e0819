//! Self-contained HTML report generation.
//!
//! Produces a single HTML fragment with embedded CSS, suitable for pasting
//! into a wiki page or an email. Two-group analyses get a compact summary;
//! multi-group analyses additionally get the full pairwise table.

use crate::result::{Analysis, ConfidenceInterval, GroupStatistic};

const REPORT_CSS: &str = r#"
<style>
    .ab-report {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto,
            Oxygen, Ubuntu, "Fira Sans", "Droid Sans", "Helvetica Neue",
            sans-serif;
        max-width: 700px;
        margin: 0;
        padding: 0;
        background-color: #fff;
        color: #172b4d;
    }
    .ab-report h3 {
        font-size: 20px;
        font-weight: 500;
        margin: 0 0 16px 0;
        color: #172b4d;
    }
    .ab-report h4 {
        font-size: 16px;
        font-weight: 500;
        margin: 16px 0 8px 0;
        color: #42526e;
    }
    .ab-report table {
        border-collapse: collapse;
        width: 100%;
        margin: 8px 0 16px 0;
        font-size: 14px;
    }
    .ab-report th {
        background-color: #f4f5f7;
        border: 1px solid #dfe1e6;
        padding: 8px 12px;
        text-align: left;
        font-weight: 600;
        color: #172b4d;
    }
    .ab-report td {
        border: 1px solid #dfe1e6;
        padding: 8px 12px;
        background-color: #fff;
    }
    .ab-report .number { text-align: right; }
    .ab-report .center { text-align: center; }
    .ab-report p { margin: 4px 0; font-size: 14px; line-height: 1.4; }
    .ab-report .group-name { font-weight: 600; }
    .ab-report .significant-yes { color: #00875a; font-weight: 600; }
    .ab-report .significant-no { color: #de350b; font-weight: 600; }
</style>
"#;

/// Render an analysis as a self-contained HTML report.
///
/// Routes to the two-group or multi-group layout based on the analysis.
pub fn render_html(analysis: &Analysis) -> String {
    if analysis.groups.len() == 2 {
        render_two_group(analysis)
    } else {
        render_multigroup(analysis)
    }
}

fn render_two_group(analysis: &Analysis) -> String {
    let mut html = String::from(REPORT_CSS);
    html.push_str("<div class=\"ab-report\">\n");
    html.push_str("<h3>A/B test (2 groups)</h3>\n");
    html.push_str(&group_table(analysis));

    html.push_str("<h4>Test results</h4>\n");
    html.push_str(&format!(
        "<p><strong>Statistic under test:</strong> {}</p>\n",
        analysis.statistic
    ));
    if let Some(best) = analysis.best_group() {
        html.push_str(&format!(
            "<p><strong>Best group:</strong> {} ({})</p>\n",
            best.group,
            format_number(best.point_estimate)
        ));
    }
    if let Some(comparison) = analysis.comprehensive.first() {
        let verdict = if comparison.significant { "Yes" } else { "No" };
        html.push_str(&format!(
            "<p><strong>Difference significant:</strong> {verdict}</p>\n"
        ));
        html.push_str(&format!(
            "<p><strong>Effect size:</strong> {}</p>\n",
            format_number(comparison.abs_difference)
        ));
        html.push_str(&format!(
            "<p><strong>Effect confidence interval:</strong> {}</p>\n",
            format_ci(comparison.abs_difference_ci)
        ));
    }

    html.push_str("</div>\n");
    html
}

fn render_multigroup(analysis: &Analysis) -> String {
    let mut html = String::from(REPORT_CSS);
    html.push_str("<div class=\"ab-report\">\n");
    html.push_str("<h3>A/B test (multiple groups)</h3>\n");
    html.push_str(&group_table(analysis));

    html.push_str("<h4>Test results</h4>\n");
    html.push_str(&format!(
        "<p><strong>Statistic under test:</strong> {}</p>\n",
        analysis.statistic
    ));
    if let Some(best) = analysis.best_group() {
        html.push_str(&format!(
            "<p><strong>Best group:</strong> {} ({})</p>\n",
            best.group,
            format_number(best.point_estimate)
        ));
    }
    if let Some(omnibus) = &analysis.omnibus {
        let verdict = if omnibus.significant { "Yes" } else { "No" };
        html.push_str(&format!(
            "<p><strong>Overall differences significant:</strong> {verdict}</p>\n"
        ));
    }

    html.push_str("<h4>Pairwise comparisons</h4>\n<table>\n<tr>\n");
    html.push_str("<th>Comparison</th>\n");
    html.push_str(&format!(
        "<th class=\"number\">{} (left group)</th>\n",
        analysis.statistic
    ));
    html.push_str(&format!(
        "<th class=\"number\">{} (right group)</th>\n",
        analysis.statistic
    ));
    html.push_str("<th class=\"center\">Significant</th>\n");
    html.push_str("<th class=\"number\">Effect size</th>\n");
    html.push_str("<th class=\"center\">Effect confidence interval</th>\n</tr>\n");

    for row in &analysis.comprehensive {
        let (class, verdict) = if row.significant {
            ("significant-yes", "Yes")
        } else {
            ("significant-no", "No")
        };
        // present the winner's statistic on the left, matching the
        // comparison label direction
        let (left, right) = if row.group1_statistic > row.group2_statistic {
            (row.group1_statistic, row.group2_statistic)
        } else {
            (row.group2_statistic, row.group1_statistic)
        };
        html.push_str(&format!(
            "<tr>\n<td class=\"group-name\">{}</td>\n\
             <td class=\"number\">{}</td>\n<td class=\"number\">{}</td>\n\
             <td class=\"center {class}\">{verdict}</td>\n\
             <td class=\"number\">{}</td>\n<td class=\"center\">{}</td>\n</tr>\n",
            row.comparison_result,
            format_number(left),
            format_number(right),
            format_number(row.abs_difference),
            format_ci(row.abs_difference_ci),
        ));
    }

    html.push_str("</table>\n</div>\n");
    html
}

/// Group statistics table, sorted by descending point estimate.
fn group_table(analysis: &Analysis) -> String {
    let mut sorted: Vec<&GroupStatistic> = analysis.group_stats.iter().collect();
    sorted.sort_by(|a, b| b.point_estimate.total_cmp(&a.point_estimate));

    let ci_label = format!("CI {}%", (analysis.confidence_level * 100.0).round());
    let mut html = String::from("<h4>Test groups</h4>\n<table>\n<tr>\n");
    html.push_str("<th>Group</th>\n<th class=\"number\">Sample size</th>\n");
    html.push_str(&format!(
        "<th class=\"center\">{} ({ci_label})</th>\n",
        analysis.statistic
    ));
    html.push_str(&format!(
        "<th class=\"number\">{}</th>\n</tr>\n",
        analysis.statistic
    ));

    for stat in sorted {
        html.push_str(&format!(
            "<tr>\n<td class=\"group-name\">{}</td>\n\
             <td class=\"number\">{}</td>\n<td class=\"center\">{}</td>\n\
             <td class=\"number\">{}</td>\n</tr>\n",
            stat.group,
            format_count(stat.count),
            format_ci(stat.ci),
            format_number(stat.point_estimate),
        ));
    }

    html.push_str("</table>\n");
    html
}

fn format_number(value: f64) -> String {
    format!("{value:.4}")
}

fn format_ci(ci: ConfidenceInterval) -> String {
    format!("[{:.4}, {:.4}]", ci.lower, ci.upper)
}

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
    fn two_group_report_shows_effect() {
        let frame = synth::binary_agg_two_groups();
        let request = AnalysisRequest::new(DataType::BinaryAgg, "group", "conversions")
            .significance_level(0.05)
            .aggregation(Aggregation::new("users", "conversions"));
        let analysis = Analyzer::new().analyze(&frame, &request).unwrap();

        let html = render_html(&analysis);
        assert!(html.contains("A/B test (2 groups)"));
        assert!(html.contains("Best group:</strong> B"));
        assert!(html.contains("Difference significant:</strong> Yes"));
        assert!(html.contains("1,200"));
    }

    #[test]
    fn multigroup_report_has_pairwise_table() {
        let frame = synth::discrete_multiple_groups(200);
        let request = AnalysisRequest::new(DataType::Discrete, "group", "clicks");
        let analysis = Analyzer::new().analyze(&frame, &request).unwrap();

        let html = render_html(&analysis);
        assert!(html.contains("A/B test (multiple groups)"));
        assert!(html.contains("Pairwise comparisons"));
        assert!(html.contains("Overall differences significant"));
        // one row per pair: C(5, 2) = 10 data rows plus headers
        assert_eq!(html.matches("significant-").count() - 2, 10);
    }
}
