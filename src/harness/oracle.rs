//! Reference oracles for cross-validating the divergence kernel.
//!
//! An oracle takes the same inputs as `divergence_sphere` and fills the same
//! output shape. Any closure with that signature can act as one, which is how
//! a binding to a separately compiled reference or a golden table plugs in.

use num_traits::Float;

use crate::element::{ElementMetrics, ScalarField, VectorField};
use crate::operators::{DerivativeOperator, RREARTH};

/// An implementation the kernel is validated against.
pub trait ReferenceOracle<T, const NP: usize> {
    /// Label used in reports.
    fn name(&self) -> &str;

    /// Compute the divergence of `v` into `div`.
    fn divergence(
        &self,
        v: &VectorField<T, NP>,
        deriv: &DerivativeOperator<T, NP>,
        elem: &ElementMetrics<T, NP>,
        div: &mut ScalarField<T, NP>,
    );
}

/// Adapts a closure into an oracle.
pub struct FnOracle<F> {
    name: String,
    f: F,
}

impl<F> FnOracle<F> {
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<T, const NP: usize, F> ReferenceOracle<T, NP> for FnOracle<F>
where
    F: Fn(&VectorField<T, NP>, &DerivativeOperator<T, NP>, &ElementMetrics<T, NP>, &mut ScalarField<T, NP>),
{
    fn name(&self) -> &str {
        &self.name
    }

    fn divergence(
        &self,
        v: &VectorField<T, NP>,
        deriv: &DerivativeOperator<T, NP>,
        elem: &ElementMetrics<T, NP>,
        div: &mut ScalarField<T, NP>,
    ) {
        (self.f)(v, deriv, elem, div)
    }
}

/// Node-by-node evaluation of the divergence formula.
///
/// Each output node is computed on its own, recomputing the contravariant flux
/// as needed and without the transposed scratch buffer. The summation order is
/// the same as the kernel's, so on well-formed input the two agree exactly.
#[derive(Clone, Copy, Debug)]
pub struct DirectOracle<T> {
    rrearth: T,
}

impl<T: Float> DirectOracle<T> {
    pub fn new() -> Self {
        Self {
            rrearth: num_traits::cast(RREARTH).unwrap_or_else(T::nan),
        }
    }

    pub fn with_rrearth(rrearth: T) -> Self {
        Self { rrearth }
    }
}

impl<T: Float> Default for DirectOracle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float, const NP: usize> ReferenceOracle<T, NP> for DirectOracle<T> {
    fn name(&self) -> &str {
        "direct"
    }

    fn divergence(
        &self,
        v: &VectorField<T, NP>,
        deriv: &DerivativeOperator<T, NP>,
        elem: &ElementMetrics<T, NP>,
        div: &mut ScalarField<T, NP>,
    ) {
        let flux = |row: usize, col: usize, c: usize| {
            let [u, w] = v.get(row, col);
            let dinv = elem.dinv_at(row, col);
            elem.metdet.get(row, col) * (dinv[c][0] * u + dinv[c][1] * w)
        };

        for row in 0..NP {
            for col in 0..NP {
                let mut dudx = T::zero();
                let mut dvdy = T::zero();
                for i in 0..NP {
                    dudx = dudx + deriv.get(col, i) * flux(row, i, 0);
                    dvdy = dvdy + deriv.get(row, i) * flux(i, col, 1);
                }
                let scale = elem.rmetdet.get(row, col) * self.rrearth;
                div.set(row, col, (dudx + dvdy) * scale);
            }
        }
    }
}

/// Returns a fixed divergence regardless of input.
#[derive(Clone, Copy, Debug)]
pub struct GoldenOracle<T, const NP: usize> {
    div: ScalarField<T, NP>,
}

impl<T: Float, const NP: usize> GoldenOracle<T, NP> {
    pub fn new(div: ScalarField<T, NP>) -> Self {
        Self { div }
    }
}

impl<T: Float, const NP: usize> ReferenceOracle<T, NP> for GoldenOracle<T, NP> {
    fn name(&self) -> &str {
        "golden"
    }

    fn divergence(
        &self,
        _v: &VectorField<T, NP>,
        _deriv: &DerivativeOperator<T, NP>,
        _elem: &ElementMetrics<T, NP>,
        div: &mut ScalarField<T, NP>,
    ) {
        *div = self.div;
    }
}
