//! Spectral differentiation matrix `Dvv`.
//!
//! `Dvv` maps nodal values on the 1D GLL node set to derivative values:
//! (du/dx)_l = Σ_i Dvv[l,i] * u_i
//!
//! It depends only on the polynomial order, so one operator is shared by every
//! element of that order.

use faer::Mat;
use num_traits::Float;
use thiserror::Error;

use super::gll::{gauss_lobatto_nodes, legendre_and_derivative};

/// Error type for building a derivative operator from a dense matrix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OperatorError {
    /// Matrix is not `np x np`
    #[error("expected a {expected}x{expected} differentiation matrix, got {rows}x{cols}")]
    ShapeMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },
}

/// Compute the GLL differentiation matrix for polynomial order `order`.
///
/// Uses the closed form for Lagrange interpolants on GLL nodes:
/// - D[i,j] = P_N(x_i) / (P_N(x_j) (x_i - x_j)) for i != j
/// - D[0,0] = -N(N+1)/4, D[N,N] = N(N+1)/4, all other diagonal entries 0
pub fn gll_differentiation_matrix(order: usize) -> Mat<f64> {
    let n = order + 1;
    let mut d = Mat::zeros(n, n);
    if order == 0 {
        return d;
    }

    let nodes = gauss_lobatto_nodes(order);
    let p: Vec<f64> = nodes
        .iter()
        .map(|&x| legendre_and_derivative(order, x).0)
        .collect();

    for i in 0..n {
        for j in 0..n {
            if i != j {
                d[(i, j)] = p[i] / (p[j] * (nodes[i] - nodes[j]));
            }
        }
    }

    let corner = (order * (order + 1)) as f64 / 4.0;
    d[(0, 0)] = -corner;
    d[(order, order)] = corner;

    d
}

/// The 1D differentiation matrix for elements with `NP` nodes per edge.
///
/// Stored as `dvv[row][col]`, contiguous and row-major.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivativeOperator<T, const NP: usize> {
    dvv: [[T; NP]; NP],
}

impl<T: Float, const NP: usize> DerivativeOperator<T, NP> {
    /// Wrap a given matrix.
    pub fn new(dvv: [[T; NP]; NP]) -> Self {
        Self { dvv }
    }

    /// Exact GLL differentiation matrix of order `NP - 1`.
    pub fn gauss_lobatto() -> Self {
        let d = gll_differentiation_matrix(NP.saturating_sub(1));
        Self {
            dvv: std::array::from_fn(|i| {
                std::array::from_fn(|j| num_traits::cast(d[(i, j)]).unwrap_or_else(T::nan))
            }),
        }
    }

    /// Convert from a dense `faer` matrix.
    pub fn from_mat(mat: &Mat<f64>) -> Result<Self, OperatorError> {
        if mat.nrows() != NP || mat.ncols() != NP {
            return Err(OperatorError::ShapeMismatch {
                expected: NP,
                rows: mat.nrows(),
                cols: mat.ncols(),
            });
        }
        Ok(Self {
            dvv: std::array::from_fn(|i| {
                std::array::from_fn(|j| num_traits::cast(mat[(i, j)]).unwrap_or_else(T::nan))
            }),
        })
    }

    /// Copy into a dense `faer` matrix.
    pub fn to_mat(&self) -> Mat<f64> {
        Mat::from_fn(NP, NP, |i, j| self.dvv[i][j].to_f64().unwrap_or(f64::NAN))
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.dvv[row][col]
    }

    #[inline]
    pub fn as_array(&self) -> &[[T; NP]; NP] {
        &self.dvv
    }
}
