//! JSON serialization for analysis results.

use crate::result::Analysis;

/// Serialize an analysis to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// `Analysis`).
pub fn to_json(analysis: &Analysis) -> Result<String, serde_json::Error> {
    serde_json::to_string(analysis)
}

/// Serialize an analysis to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// `Analysis`).
pub fn to_json_pretty(analysis: &Analysis) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::config::AnalysisRequest;
    use crate::data::synth;
    use crate::types::DataType;

    #[test]
    fn analysis_serializes_and_round_trips() {
        let frame = synth::discrete_two_groups(100);
        let request = AnalysisRequest::new(DataType::Discrete, "group", "clicks");
        let analysis = Analyzer::new().analyze(&frame, &request).unwrap();

        let json = to_json(&analysis).unwrap();
        assert!(json.contains("\"pairwise\""));

        let parsed: Analysis = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, analysis);
    }

    #[test]
    fn pretty_output_is_indented() {
        let frame = synth::discrete_two_groups(100);
        let request = AnalysisRequest::new(DataType::Discrete, "group", "clicks");
        let analysis = Analyzer::new().analyze(&frame, &request).unwrap();
        let pretty = to_json_pretty(&analysis).unwrap();
        assert!(pretty.contains("\n  "));
    }
}
