//! Benchmark and validation harness.
//!
//! This module provides:
//! - **Reference oracles**: pluggable implementations the kernel is checked against
//! - **Stopwatch**: wall-clock timing around blocks of kernel calls
//! - **Error reports**: per-node differences against an expected divergence
//! - **Benchmark runner**: warm-up, timed iterations and a combined validation report

mod benchmark;
mod comparison;
mod oracle;
mod stopwatch;

pub use benchmark::{
    BenchmarkConfig, HarnessError, Timing, ValidationReport, compare_against_reference,
    time_iterations,
};
pub use comparison::ErrorReport;
pub use oracle::{DirectOracle, FnOracle, GoldenOracle, ReferenceOracle};
pub use stopwatch::Stopwatch;

/// Published divergence for the 4x4 reference element input.
pub const PUBLISHED_DIVERGENCE_NP4: [[f64; 4]; 4] = [
    [
        0.14383368343270220,
        0.16634973900122296,
        0.21556384471655873,
        0.29459485031864308,
    ],
    [
        0.10495094678642192,
        0.10563956451788356,
        0.13337591314546268,
        0.18918612996975015,
    ],
    [
        0.10396974364110805,
        0.10785355163561680,
        0.13773336288220531,
        0.19410009772740583,
    ],
    [
        0.14264597462181144,
        0.17154723246534875,
        0.22337488503182140,
        0.30152141985185271,
    ],
];
