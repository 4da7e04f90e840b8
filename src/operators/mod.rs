//! Element operators: GLL differentiation and the spherical divergence kernel.

mod differentiation;
mod divergence;
mod gll;

pub use differentiation::{DerivativeOperator, OperatorError, gll_differentiation_matrix};
pub use divergence::{DivergenceOperator, RREARTH, divergence_sphere};
pub use gll::{gauss_lobatto_nodes, legendre_and_derivative};
