//! # spectral-div
//!
//! Discrete spherical divergence on a quadrilateral spectral element, as used by
//! spectral-element atmosphere dynamical cores.
//!
//! This crate provides:
//! - Node-sampled fields and element metric terms (`element`)
//! - The GLL differentiation matrix and the `divergence_sphere` kernel (`operators`)
//! - Positional text input for kernel data (`io`)
//! - A harness that times the kernel against a pluggable reference oracle
//!   and reports per-node errors (`harness`)
//!
//! Grid size is the const generic `NP` (nodes per element edge); the working
//! real type is any `num_traits::Float`.
//!
//! ```
//! use spectral_div::{DerivativeOperator, DivergenceOperator, ElementMetrics, VectorField};
//!
//! let op = DivergenceOperator::<f64, 4>::new(DerivativeOperator::gauss_lobatto());
//! let elem = ElementMetrics::identity();
//! let v = VectorField::zeros();
//! let div = op.compute(&v, &elem);
//! assert_eq!(div.max_abs(), 0.0);
//! ```

pub mod element;
pub mod harness;
pub mod io;
pub mod operators;

pub use element::{ElementMetrics, MetricError, RECIPROCAL_TOLERANCE, ScalarField, VectorField};
pub use harness::{
    BenchmarkConfig, DirectOracle, ErrorReport, FnOracle, GoldenOracle, HarnessError,
    PUBLISHED_DIVERGENCE_NP4, ReferenceOracle, Stopwatch, Timing, ValidationReport,
    compare_against_reference, time_iterations,
};
pub use io::{
    InputError, KernelInput, parse_kernel_input, read_kernel_input, read_kernel_input_file,
};
pub use operators::{
    DerivativeOperator, DivergenceOperator, OperatorError, RREARTH, divergence_sphere,
    gauss_lobatto_nodes, gll_differentiation_matrix,
};
