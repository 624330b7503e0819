//! Declarative routing from analysis parameters to statistical procedures.
//!
//! The routing table maps `(data_type, group_count_class, statistic,
//! dependency)` to a [`TestDescriptor`] naming the pairwise test, the
//! optional omnibus test, the correction method and the confidence-interval
//! methods to use. The table ships as an embedded JSON asset and is parsed
//! once per process; the parsed table is immutable and freely shareable
//! across threads.
//!
//! Lookup is an exact four-key match. There are no partial matches and no
//! fallback entries: a combination absent from the table is a configuration
//! error, not a data error.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::{
    ChartHint, CiKind, CorrectionKind, DataType, Dependency, GroupCountClass, Statistic, TestKind,
};

/// The routing asset compiled into the library.
const METHODS_ROUTE_JSON: &str = include_str!("../assets/methods_route.json");

/// Confidence-interval method selection for one descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiSelection {
    /// Interval method for a single group's statistic value.
    pub statistic_value: CiKind,
    /// Interval method for a between-group difference.
    pub difference: CiKind,
}

/// Extra parameters for one confidence-interval method.
///
/// The confidence level defaults to `1 - significance_level`; an entry here
/// overrides it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CiParams {
    /// Explicit confidence level override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<f64>,
}

/// Per-method parameter blocks for one descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CiParamsPair {
    /// Parameters for the statistic-value interval method.
    #[serde(default)]
    pub statistic_value: CiParams,
    /// Parameters for the difference interval method.
    #[serde(default)]
    pub difference: CiParams,
}

/// The statistical procedure bundle resolved for one analysis run.
///
/// Constructed by table lookup, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDescriptor {
    /// Omnibus test run once across all groups, if any.
    pub omnibus_test: Option<TestKind>,
    /// Pairwise test run for every unordered group pair.
    #[serde(rename = "test_name")]
    pub pairwise_test: TestKind,
    /// Multiple-comparison correction, if any.
    #[serde(rename = "multiple_comparison_correction")]
    pub correction: Option<CorrectionKind>,
    /// Confidence-interval methods.
    #[serde(rename = "confint_method")]
    pub ci_method: CiSelection,
    /// Parameters for the confidence-interval methods.
    #[serde(rename = "confint_params", default)]
    pub ci_params: CiParamsPair,
    /// Chart family hint for the report layer.
    #[serde(rename = "visualization_function")]
    pub visualization: ChartHint,
    /// Whether this entry requires extra caller-supplied configuration
    /// (aggregated binary input needs the trials/successes column names).
    #[serde(default)]
    pub custom_config_required: bool,
}

type Routes =
    HashMap<DataType, HashMap<GroupCountClass, HashMap<Statistic, HashMap<Dependency, TestDescriptor>>>>;

/// Immutable mapping from analysis parameters to test descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingTable {
    routes: Routes,
}

impl RoutingTable {
    /// Parse a routing table from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidRouting`] if the document does not
    /// match the routing schema.
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(json).map_err(|err| AnalysisError::InvalidRouting {
            message: err.to_string(),
        })
    }

    /// The routing table compiled into the library.
    ///
    /// Parsed once per process and cached; the embedded asset is validated
    /// by the test suite, so a parse failure here is a packaging defect.
    pub fn embedded() -> &'static Self {
        static TABLE: OnceLock<RoutingTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            RoutingTable::from_json(METHODS_ROUTE_JSON)
                .expect("embedded methods_route.json matches the routing schema")
        })
    }

    /// Resolve the descriptor for one analysis run.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ConfigurationMissing`] when the exact
    /// four-key combination has no entry.
    pub fn resolve(
        &self,
        data_type: DataType,
        group_count: GroupCountClass,
        statistic: Statistic,
        dependency: Dependency,
    ) -> Result<&TestDescriptor, AnalysisError> {
        self.routes
            .get(&data_type)
            .and_then(|by_count| by_count.get(&group_count))
            .and_then(|by_stat| by_stat.get(&statistic))
            .and_then(|by_dep| by_dep.get(&dependency))
            .ok_or(AnalysisError::ConfigurationMissing {
                data_type,
                group_count,
                statistic,
                dependency,
            })
    }
}
