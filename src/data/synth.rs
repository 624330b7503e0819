//! Synthetic demo datasets with known statistical properties.
//!
//! These generators produce the example tables used in documentation and
//! integration tests: conversion funnels with a known lift and click-count
//! experiments with a known outlier group. All generators are
//! deterministically seeded so tests and docs are reproducible.

use rand::SeedableRng;
use rand_distr::{Distribution, Poisson};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::Frame;

const SEED: u64 = 42;

/// Two-group aggregated conversion data.
///
/// Group A converts 120 of 1200 users (10.0%), group B converts 143 of
/// 1100 (13.0%): a visible lift that clears the 5% significance level but
/// not the strict 1% default.
pub fn binary_agg_two_groups() -> Frame {
    let mut frame = Frame::new();
    // push_* cannot fail on a freshly built, length-consistent frame
    let _ = frame.push_text("group", vec!["A".into(), "B".into()]);
    let _ = frame.push_numbers("users", vec![1200.0, 1100.0]);
    let _ = frame.push_numbers("conversions", vec![120.0, 143.0]);
    frame
}

/// Four-group aggregated conversion data with one clearly better variant.
pub fn binary_agg_multiple_groups() -> Frame {
    let mut frame = Frame::new();
    let _ = frame.push_text(
        "group",
        vec!["A".into(), "B".into(), "C".into(), "D".into()],
    );
    let _ = frame.push_numbers("users", vec![1500.0, 1450.0, 1520.0, 1480.0]);
    let _ = frame.push_numbers("conversions", vec![150.0, 152.0, 149.0, 205.0]);
    frame
}

/// Two groups of Poisson click counts with a small lift in group B.
///
/// Group A draws from Poisson(2.0), group B from Poisson(2.2), `n` samples
/// per group.
pub fn discrete_two_groups(n: usize) -> Frame {
    poisson_groups(&[("A", 2.0), ("B", 2.2)], n)
}

/// Five groups of Poisson click counts with one outlier group.
///
/// Groups A, B, C and E draw from Poisson(2.0); group D draws from
/// Poisson(2.6) and should dominate every pairwise comparison it appears
/// in.
pub fn discrete_multiple_groups(n: usize) -> Frame {
    poisson_groups(
        &[("A", 2.0), ("B", 2.0), ("C", 2.0), ("D", 2.6), ("E", 2.0)],
        n,
    )
}

fn poisson_groups(specs: &[(&str, f64)], n: usize) -> Frame {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(SEED);
    let mut groups = Vec::with_capacity(specs.len() * n);
    let mut clicks = Vec::with_capacity(specs.len() * n);

    for (label, lambda) in specs {
        // lambda is a positive compile-time constant, construction cannot fail
        let poisson = Poisson::new(*lambda).unwrap();
        for _ in 0..n {
            groups.push((*label).to_string());
            clicks.push(poisson.sample(&mut rng));
        }
    }

    let mut frame = Frame::new();
    let _ = frame.push_text("group", groups);
    let _ = frame.push_numbers("clicks", clicks);
    frame
}
