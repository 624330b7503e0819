//! Analysis request parameters.

use serde::{Deserialize, Serialize};

use crate::types::{DataType, Dependency, Statistic};

/// Column names for aggregated binary input.
///
/// Aggregated binary tables carry one row per group with trial and success
/// counts instead of one row per observation; this config names those two
/// columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    /// Column holding the number of trials per group (e.g. "users").
    pub trials_col: String,
    /// Column holding the number of successes per group (e.g. "conversions").
    pub successes_col: String,
}

impl Aggregation {
    /// Create an aggregation config from the two column names.
    pub fn new(trials_col: impl Into<String>, successes_col: impl Into<String>) -> Self {
        Self {
            trials_col: trials_col.into(),
            successes_col: successes_col.into(),
        }
    }
}

/// Parameters for one analysis run.
///
/// # Example
///
/// ```
/// use verdict::{AnalysisRequest, DataType};
///
/// let request = AnalysisRequest::new(DataType::Discrete, "group", "clicks")
///     .significance_level(0.05);
/// assert_eq!(request.confidence_level, 0.95);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Semantic type of the metric column.
    pub data_type: DataType,

    /// Column holding the group labels.
    pub group_col: String,

    /// Column holding the metric values.
    pub metric_col: String,

    /// The per-group statistic under comparison.
    ///
    /// Defaults to [`Statistic::Proportion`] for binary data types and
    /// [`Statistic::Mean`] otherwise.
    pub statistic: Statistic,

    /// Whether the samples are independent across groups. Default:
    /// independent.
    pub dependency: Dependency,

    /// Significance level for every test decision. Must lie strictly
    /// between 0 and 1. Default: 0.01.
    pub significance_level: f64,

    /// Confidence level for every interval. Default: 0.99, and the
    /// [`significance_level`](Self::significance_level) setter keeps it at
    /// `1 - significance_level`; set it explicitly afterwards to decouple
    /// the two.
    pub confidence_level: f64,

    /// Aggregation config, required for [`DataType::BinaryAgg`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
}

impl AnalysisRequest {
    /// Create a request with default parameters.
    pub fn new(
        data_type: DataType,
        group_col: impl Into<String>,
        metric_col: impl Into<String>,
    ) -> Self {
        let statistic = match data_type {
            DataType::Binary | DataType::BinaryAgg => Statistic::Proportion,
            DataType::Continuous | DataType::Discrete => Statistic::Mean,
        };
        Self {
            data_type,
            group_col: group_col.into(),
            metric_col: metric_col.into(),
            statistic,
            dependency: Dependency::Independent,
            significance_level: 0.01,
            confidence_level: 0.99,
            aggregation: None,
        }
    }

    /// Set the statistic under comparison.
    pub fn statistic(mut self, statistic: Statistic) -> Self {
        self.statistic = statistic;
        self
    }

    /// Set the dependency structure.
    pub fn dependency(mut self, dependency: Dependency) -> Self {
        self.dependency = dependency;
        self
    }

    /// Set the significance level and align the confidence level to its
    /// complement.
    pub fn significance_level(mut self, level: f64) -> Self {
        self.significance_level = level;
        self.confidence_level = 1.0 - level;
        self
    }

    /// Set the confidence level independently of the significance level.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Set the aggregation config for aggregated binary input.
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_defaults_to_proportion() {
        let request = AnalysisRequest::new(DataType::BinaryAgg, "group", "conversions");
        assert_eq!(request.statistic, Statistic::Proportion);
        assert_eq!(request.significance_level, 0.01);
        assert_eq!(request.confidence_level, 0.99);
    }

    #[test]
    fn significance_setter_aligns_confidence() {
        let request =
            AnalysisRequest::new(DataType::Continuous, "group", "value").significance_level(0.05);
        assert_eq!(request.confidence_level, 0.95);
    }

    #[test]
    fn confidence_can_be_decoupled() {
        let request = AnalysisRequest::new(DataType::Continuous, "group", "value")
            .significance_level(0.05)
            .confidence_level(0.9);
        assert_eq!(request.significance_level, 0.05);
        assert_eq!(request.confidence_level, 0.9);
    }
}
