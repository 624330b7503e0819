//! # verdict
//!
//! A/B test analysis: routed statistical tests, confidence intervals and
//! pairwise comparison reports.
//!
//! Given a table of observations labeled by group, this crate selects an
//! appropriate statistical procedure from a declarative routing table,
//! computes per-group statistics and all pairwise comparisons, applies
//! multiple-comparison correction and reconciles everything into one
//! ranked result table:
//! - Per-group point estimates with confidence intervals
//! - Omnibus significance across all groups (three or more)
//! - Pairwise significance with Bonferroni-corrected p-values
//! - Signed and absolute difference estimates with intervals
//!
//! ## Quick Start
//!
//! ```
//! use verdict::{Analyzer, AnalysisRequest, Aggregation, DataType, output};
//!
//! // Aggregated conversion data: one row per group
//! let frame = verdict::data::synth::binary_agg_two_groups();
//!
//! let request = AnalysisRequest::new(DataType::BinaryAgg, "group", "conversions")
//!     .aggregation(Aggregation::new("users", "conversions"));
//!
//! let analysis = Analyzer::new().analyze(&frame, &request).unwrap();
//!
//! assert_eq!(analysis.comprehensive[0].comparison_result, "B>A");
//! println!("{}", output::format_analysis(&analysis));
//! ```
//!
//! ## Data types
//!
//! Four input shapes are supported, selected via [`DataType`]:
//! `continuous` and `discrete` observations are compared through group
//! means (Welch's t-test, ANOVA omnibus); `binary` observations and
//! `binary_agg` trial/success counts are compared through proportions
//! (chi-square, Wilson and Newcombe-Wilson intervals). See
//! [`analysis::usage`] for per-type documentation with example tables.
//!
//! The routing table shipping with the crate covers independent samples;
//! an unsupported parameter combination fails fast with
//! [`AnalysisError::ConfigurationMissing`] before any statistic is
//! computed.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod result;
mod routing;
mod transform;
mod types;
mod validate;

// Functional modules
pub mod analysis;
pub mod data;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use analysis::{usage, Analyzer};
pub use config::{Aggregation, AnalysisRequest};
pub use data::{Column, DataError, Frame};
pub use error::{AggregateViolation, AnalysisError, ValidationError};
pub use result::{
    Analysis, ComprehensiveRow, ConfidenceInterval, DifferenceEstimate, GroupStatistic,
    PairwiseResult, TestOutcome,
};
pub use routing::{CiParams, CiParamsPair, CiSelection, RoutingTable, TestDescriptor};
pub use transform::expand_aggregated;
pub use types::{
    ChartHint, CiKind, CorrectionKind, DataType, Dependency, GroupCountClass, Statistic, TestKind,
};
pub use validate::validate_inputs;
