//! CSV loading through to a full analysis.

use std::io::Write;

use verdict::data::load_csv;
use verdict::{Aggregation, Analyzer, AnalysisRequest, DataType};

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn discrete_csv_analyzes_end_to_end() {
    let mut content = String::from("group,clicks\n");
    for i in 0..40 {
        content.push_str(&format!("A,{}\n", i % 4));
        content.push_str(&format!("B,{}\n", i % 4 + 2));
    }
    let file = write_temp(&content);

    let frame = load_csv(file.path()).unwrap();
    let request = AnalysisRequest::new(DataType::Discrete, "group", "clicks");
    let analysis = Analyzer::new().analyze(&frame, &request).unwrap();

    assert_eq!(analysis.groups, ["A", "B"]);
    assert_eq!(analysis.pairwise.len(), 1);
    // a two-unit shift on forty observations per group is unmissable
    assert!(analysis.pairwise[0].significant);
    assert_eq!(analysis.comprehensive[0].comparison_result, "B>A");
}

#[test]
fn aggregated_csv_analyzes_end_to_end() {
    let file = write_temp("group,users,conversions\nA,1200,120\nB,1100,143\n");

    let frame = load_csv(file.path()).unwrap();
    let request = AnalysisRequest::new(DataType::BinaryAgg, "group", "conversions")
        .significance_level(0.05)
        .aggregation(Aggregation::new("users", "conversions"));
    let analysis = Analyzer::new().analyze(&frame, &request).unwrap();

    assert_eq!(analysis.comprehensive[0].comparison_result, "B>A");
    assert!(analysis.comprehensive[0].significant);
}

#[test]
fn numeric_group_labels_work() {
    let mut content = String::from("variant,value\n");
    for i in 0..30 {
        content.push_str(&format!("1,{}.0\n", i % 5));
        content.push_str(&format!("2,{}.5\n", i % 5 + 3));
    }
    let file = write_temp(&content);

    let frame = load_csv(file.path()).unwrap();
    let request = AnalysisRequest::new(DataType::Continuous, "variant", "value");
    let analysis = Analyzer::new().analyze(&frame, &request).unwrap();

    assert_eq!(analysis.groups, ["1", "2"]);
    assert_eq!(analysis.comprehensive[0].comparison_result, "2>1");
}
