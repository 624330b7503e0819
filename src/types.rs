//! Core vocabulary types shared across the analysis pipeline.
//!
//! The routing asset selects procedures by name; those names deserialize
//! into the closed enums below, so every method reference is resolved at
//! compile time instead of through runtime name lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type of the metric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Real-valued measurements (revenue, session length).
    Continuous,
    /// Integer counts per observation (clicks, page views).
    Discrete,
    /// One 0/1 outcome per observation.
    Binary,
    /// Per-group trial/success counts instead of individual observations.
    BinaryAgg,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continuous => write!(f, "continuous"),
            Self::Discrete => write!(f, "discrete"),
            Self::Binary => write!(f, "binary"),
            Self::BinaryAgg => write!(f, "binary_agg"),
        }
    }
}

/// Group-count class used as a routing key.
///
/// The routing table distinguishes exactly two regimes: a two-group
/// comparison and a multi-group comparison (three or more, up to ten).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupCountClass {
    /// Exactly two groups.
    #[serde(rename = "2")]
    Two,
    /// Three or more groups.
    #[serde(rename = "multiple")]
    Multiple,
}

impl GroupCountClass {
    /// Classify a concrete group count.
    pub fn from_count(count: usize) -> Self {
        if count == 2 {
            Self::Two
        } else {
            Self::Multiple
        }
    }
}

impl fmt::Display for GroupCountClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Two => write!(f, "2"),
            Self::Multiple => write!(f, "multiple"),
        }
    }
}

/// The per-group summary statistic under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    /// Arithmetic mean of the metric.
    Mean,
    /// Share of successes among 0/1 outcomes.
    Proportion,
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => write!(f, "mean"),
            Self::Proportion => write!(f, "proportion"),
        }
    }
}

/// Whether the compared samples are independent or paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dependency {
    /// Observations in different groups are unrelated.
    Independent,
    /// Observations are paired or matched across groups.
    Dependent,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Independent => write!(f, "independent"),
            Self::Dependent => write!(f, "dependent"),
        }
    }
}

/// Hypothesis test selected by the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestKind {
    /// Two-sample t-test with unequal variances.
    #[serde(rename = "welch_ttest")]
    WelchTTest,
    /// One-way analysis of variance across three or more groups.
    #[serde(rename = "anova_test")]
    AnovaTest,
    /// Chi-square test of independence on a groups x outcome table.
    #[serde(rename = "chi2_test")]
    Chi2Test,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WelchTTest => write!(f, "Welch's t-test"),
            Self::AnovaTest => write!(f, "one-way ANOVA"),
            Self::Chi2Test => write!(f, "chi-square test"),
        }
    }
}

/// Confidence-interval method selected by the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CiKind {
    /// t-distribution interval for a single mean.
    #[serde(rename = "t_ci")]
    TCi,
    /// Welch interval for a difference of means.
    #[serde(rename = "welch_ci")]
    WelchCi,
    /// Wilson score interval for a single proportion.
    #[serde(rename = "wilson_ci")]
    WilsonCi,
    /// Newcombe interval for a difference of proportions.
    #[serde(rename = "newcombe_wilson_ci")]
    NewcombeWilsonCi,
}

impl fmt::Display for CiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TCi => write!(f, "t interval"),
            Self::WelchCi => write!(f, "Welch interval"),
            Self::WilsonCi => write!(f, "Wilson score interval"),
            Self::NewcombeWilsonCi => write!(f, "Newcombe-Wilson interval"),
        }
    }
}

/// Multiple-comparison correction selected by the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrectionKind {
    /// Bonferroni: multiply each p-value by the number of comparisons.
    #[serde(rename = "bonferroni_correction")]
    Bonferroni,
}

impl fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bonferroni => write!(f, "Bonferroni"),
        }
    }
}

/// Chart family the report layer should use for this analysis.
///
/// The core never draws anything; this is a hint handed to external
/// visualization collaborators alongside the structured results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartHint {
    /// Overlaid histograms plus box plots per group.
    #[serde(rename = "plot_distributions")]
    Distributions,
    /// Point estimates with confidence-interval whiskers per group.
    #[serde(rename = "plot_confidence_intervals")]
    ConfidenceIntervals,
}
