//! Metric terms of the mapping from the reference square onto the sphere.
//!
//! At every node the element carries:
//! - `metdet`: determinant of the covariant metric tensor
//! - `rmetdet`: its reciprocal, supplied alongside or derived as `1 / metdet`
//! - `dinv`: the 2x2 inverse Jacobian, mapping covariant to contravariant components
//!
//! The kernel trusts these values. The checks here are for callers that want to
//! reject malformed input before it turns into NaN or Inf downstream.

use num_traits::Float;
use thiserror::Error;

use super::{DIM, ScalarField};

/// Default tolerance for `|metdet * rmetdet - 1|`.
pub const RECIPROCAL_TOLERANCE: f64 = 1e-9;

/// Error type for metric validation.
#[derive(Debug, Error, PartialEq)]
pub enum MetricError {
    /// `metdet * rmetdet` is not within tolerance of one
    #[error("metdet * rmetdet = {product} at node ({row}, {col}), expected 1")]
    ReciprocalMismatch { row: usize, col: usize, product: f64 },

    /// Zero or non-finite metric determinant
    #[error("singular metric determinant {value} at node ({row}, {col})")]
    SingularDeterminant { row: usize, col: usize, value: f64 },
}

/// Inverse Jacobian at every node, indexed `[row][col][c][k]`.
pub type InverseJacobian<T, const NP: usize> = [[[[T; DIM]; DIM]; NP]; NP];

/// Metric data for a single spectral element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementMetrics<T, const NP: usize> {
    /// Metric determinant at each node
    pub metdet: ScalarField<T, NP>,

    /// Inverse Jacobian at each node
    pub dinv: InverseJacobian<T, NP>,

    /// Reciprocal of the metric determinant at each node
    pub rmetdet: ScalarField<T, NP>,
}

impl<T: Float, const NP: usize> ElementMetrics<T, NP> {
    /// Metrics with both determinant grids supplied.
    pub fn new(
        metdet: ScalarField<T, NP>,
        dinv: InverseJacobian<T, NP>,
        rmetdet: ScalarField<T, NP>,
    ) -> Self {
        Self {
            metdet,
            dinv,
            rmetdet,
        }
    }

    /// Metrics with `rmetdet` computed as `1 / metdet` node by node.
    pub fn with_derived_rmetdet(metdet: ScalarField<T, NP>, dinv: InverseJacobian<T, NP>) -> Self {
        let rmetdet = ScalarField::from_fn(|row, col| T::one() / metdet.get(row, col));
        Self {
            metdet,
            dinv,
            rmetdet,
        }
    }

    /// Unit determinant and identity inverse Jacobian everywhere.
    ///
    /// With these metrics the kernel reduces to the plain reference-element
    /// divergence scaled by `rrearth`.
    pub fn identity() -> Self {
        let one = T::one();
        let zero = T::zero();
        Self {
            metdet: ScalarField::constant(one),
            dinv: [[[[one, zero], [zero, one]]; NP]; NP],
            rmetdet: ScalarField::constant(one),
        }
    }

    /// Inverse Jacobian at a node.
    #[inline]
    pub fn dinv_at(&self, row: usize, col: usize) -> [[T; DIM]; DIM] {
        self.dinv[row][col]
    }

    /// Verify `|metdet * rmetdet - 1| <= tolerance` at every node.
    ///
    /// Reports the first failing node in row-major order.
    pub fn check_reciprocal(&self, tolerance: T) -> Result<(), MetricError> {
        for (row, col, metdet) in self.metdet.iter() {
            let product = metdet * self.rmetdet.get(row, col);
            // Written so that a NaN product fails the check.
            if !((product - T::one()).abs() <= tolerance) {
                return Err(MetricError::ReciprocalMismatch {
                    row,
                    col,
                    product: product.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        Ok(())
    }

    /// Reject zero or non-finite metric determinants.
    pub fn check_nonsingular(&self) -> Result<(), MetricError> {
        for (row, col, metdet) in self.metdet.iter() {
            if metdet == T::zero() || !metdet.is_finite() {
                return Err(MetricError::SingularDeterminant {
                    row,
                    col,
                    value: metdet.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        Ok(())
    }
}
