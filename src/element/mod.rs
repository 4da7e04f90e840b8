//! Per-element data consumed by the divergence kernel.
//!
//! This module provides:
//! - Node-sampled fields on an `NP x NP` element (`VectorField`, `ScalarField`)
//! - Metric terms of the element mapping (`ElementMetrics`)
//!
//! All grids are fixed-size nested arrays indexed `[row][col]`, so every field
//! is one contiguous row-major block and the kernel never allocates.

mod fields;
mod metrics;

pub use fields::{ScalarField, VectorField};
pub use metrics::{ElementMetrics, InverseJacobian, MetricError, RECIPROCAL_TOLERANCE};

/// Number of vector components carried at each node.
pub const DIM: usize = 2;
