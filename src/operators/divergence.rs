//! Spherical divergence on a single spectral element.
//!
//! Given a vector field sampled at the `NP x NP` nodes, the element metrics and
//! the shared differentiation matrix, the divergence is evaluated in three passes:
//!
//! 1. Contravariant flux: gv = metdet * Dinv * v at every node
//! 2. Reference derivatives: d(gv_0)/dx along each row, d(gv_1)/dy along each column
//! 3. Sum, then scale by rmetdet * rrearth
//!
//! Summations run left to right from zero so results match a reference
//! implementation bit-for-bit.

use num_traits::Float;

use super::DerivativeOperator;
use crate::element::{DIM, ElementMetrics, ScalarField, VectorField};

/// Inverse Earth radius in model length units.
pub const RREARTH: f64 = 1.5683814303638645e-7;

/// Compute the spherical divergence of `v` into `div`.
///
/// `div` is fully overwritten. Inputs are read-only, scratch storage lives on
/// the stack, and there are no error conditions: a zero `metdet` or NaN input
/// propagates to NaN/Inf in the output.
pub fn divergence_sphere<T: Float, const NP: usize>(
    v: &VectorField<T, NP>,
    deriv: &DerivativeOperator<T, NP>,
    elem: &ElementMetrics<T, NP>,
    rrearth: T,
    div: &mut ScalarField<T, NP>,
) {
    let v = v.as_array();
    let dvv = deriv.as_array();
    let metdet = elem.metdet.as_array();
    let rmetdet = elem.rmetdet.as_array();

    // Convert to contravariant form and multiply by g
    let mut gv = [[[T::zero(); DIM]; NP]; NP];
    for i in 0..NP {
        for j in 0..NP {
            let dinv = &elem.dinv[i][j];
            for c in 0..DIM {
                gv[i][j][c] = metdet[i][j] * (dinv[c][0] * v[i][j][0] + dinv[c][1] * v[i][j][1]);
            }
        }
    }

    // d/dx is written straight into div; d/dy goes to vvtemp transposed so both
    // terms line up as [row][col] for the final pass.
    let out = div.as_array_mut();
    let mut vvtemp = [[T::zero(); NP]; NP];
    for l in 0..NP {
        for j in 0..NP {
            let mut dudx = T::zero();
            let mut dvdy = T::zero();
            for i in 0..NP {
                dudx = dudx + dvv[l][i] * gv[j][i][0];
                dvdy = dvdy + dvv[l][i] * gv[i][j][1];
            }
            out[j][l] = dudx;
            vvtemp[l][j] = dvdy;
        }
    }

    for i in 0..NP {
        for j in 0..NP {
            out[i][j] = (out[i][j] + vvtemp[i][j]) * (rmetdet[i][j] * rrearth);
        }
    }
}

/// Divergence operator for elements of a fixed order.
///
/// Bundles the shared differentiation matrix with the sphere scale factor.
#[derive(Clone, Copy, Debug)]
pub struct DivergenceOperator<T, const NP: usize> {
    /// Differentiation matrix shared by every element of this order
    pub deriv: DerivativeOperator<T, NP>,

    /// Inverse sphere radius
    pub rrearth: T,
}

impl<T: Float, const NP: usize> DivergenceOperator<T, NP> {
    /// Operator on the Earth-radius sphere.
    pub fn new(deriv: DerivativeOperator<T, NP>) -> Self {
        Self {
            deriv,
            rrearth: num_traits::cast(RREARTH).unwrap_or_else(T::nan),
        }
    }

    /// Override the inverse sphere radius.
    pub fn with_rrearth(mut self, rrearth: T) -> Self {
        self.rrearth = rrearth;
        self
    }

    /// Compute into an existing output field.
    #[inline]
    pub fn apply(&self, v: &VectorField<T, NP>, elem: &ElementMetrics<T, NP>, div: &mut ScalarField<T, NP>) {
        divergence_sphere(v, &self.deriv, elem, self.rrearth, div);
    }

    /// Compute into a fresh output field.
    pub fn compute(&self, v: &VectorField<T, NP>, elem: &ElementMetrics<T, NP>) -> ScalarField<T, NP> {
        let mut div = ScalarField::zeros();
        self.apply(v, elem, &mut div);
        div
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_node_element() {
        // NP = 1: both derivatives collapse to Dvv[0][0] times the flux component
        let deriv = DerivativeOperator::new([[0.5]]);
        let elem = ElementMetrics::new(
            ScalarField::constant(2.0),
            [[[[1.0, 0.0], [0.0, 3.0]]]],
            ScalarField::constant(0.25),
        );
        let v = VectorField::from_array([[[4.0, 1.0]]]);

        let mut div = ScalarField::zeros();
        divergence_sphere(&v, &deriv, &elem, 1.0, &mut div);

        // gv = 2 * (4, 3) = (8, 6); dudx = 0.5 * 8, dvdy = 0.5 * 6
        assert_eq!(div.get(0, 0), (4.0 + 3.0) * 0.25);
    }

    #[test]
    fn test_two_node_hand_computed() {
        // Dvv for N = 1 on [-1, 1]
        let deriv = DerivativeOperator::new([[-0.5, 0.5], [-0.5, 0.5]]);
        let elem = ElementMetrics::<f64, 2>::identity();
        // u = col, v = 2 * row
        let v = VectorField::from_fn(|row, col| [col as f64, 2.0 * row as f64]);

        let mut div = ScalarField::zeros();
        divergence_sphere(&v, &deriv, &elem, 1.0, &mut div);

        // du/dcol = 0.5, dv/drow = 1.0
        for (row, col, d) in div.iter() {
            assert_eq!(d, 1.5, "node ({}, {})", row, col);
        }
    }

    #[test]
    fn test_output_fully_overwritten() {
        let op = DivergenceOperator::<f64, 4>::new(DerivativeOperator::gauss_lobatto());
        let elem = ElementMetrics::identity();
        let v = VectorField::zeros();

        let mut div = ScalarField::constant(42.0);
        op.apply(&v, &elem, &mut div);
        assert_eq!(div, ScalarField::zeros());
    }

    #[test]
    fn test_rrearth_override() {
        let deriv = DerivativeOperator::new([[-0.5, 0.5], [-0.5, 0.5]]);
        let v = VectorField::from_fn(|_, col| [col as f64, 0.0]);
        let elem = ElementMetrics::identity();

        let earth = DivergenceOperator::new(deriv).compute(&v, &elem);
        let unit = DivergenceOperator::new(deriv).with_rrearth(1.0).compute(&v, &elem);

        assert_eq!(unit.get(0, 0), 0.5);
        assert_eq!(earth.get(0, 0), 0.5 * RREARTH);
    }
}
