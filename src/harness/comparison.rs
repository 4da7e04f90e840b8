//! Per-node error metrics between a computed and an expected divergence.

use std::fmt;

use num_traits::Float;

use crate::element::ScalarField;

/// Node-wise `computed - expected` errors with summary statistics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorReport<T, const NP: usize> {
    errors: ScalarField<T, NP>,
}

impl<T: Float, const NP: usize> ErrorReport<T, NP> {
    /// Compare a computed divergence against the expected one.
    pub fn compute(computed: &ScalarField<T, NP>, expected: &ScalarField<T, NP>) -> Self {
        Self {
            errors: ScalarField::from_fn(|row, col| computed.get(row, col) - expected.get(row, col)),
        }
    }

    /// Signed error at every node.
    pub fn errors(&self) -> &ScalarField<T, NP> {
        &self.errors
    }

    /// Signed error at one node.
    pub fn error_at(&self, row: usize, col: usize) -> T {
        self.errors.get(row, col)
    }

    /// max |computed - expected| (NaN if any node is NaN).
    pub fn max_abs_error(&self) -> T {
        self.errors.max_abs()
    }

    /// sqrt(mean((computed - expected)²))
    pub fn rms_error(&self) -> T {
        if NP == 0 {
            return T::zero();
        }
        let sum = self.errors.iter().fold(T::zero(), |acc, (_, _, e)| acc + e * e);
        let count = num_traits::cast::<usize, T>(NP * NP).unwrap_or_else(T::nan);
        (sum / count).sqrt()
    }

    /// Node with the largest absolute error, first in row-major order on ties.
    pub fn location_of_max(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize, T)> = None;
        for (row, col, e) in self.errors.iter() {
            let e = e.abs();
            match best {
                Some((_, _, b)) if !(e > b) => {}
                _ => best = Some((row, col, e)),
            }
        }
        best.map(|(row, col, _)| (row, col))
    }

    /// Whether every node is within `tolerance` (NaN never is).
    pub fn within(&self, tolerance: T) -> bool {
        self.errors.iter().all(|(_, _, e)| e.abs() <= tolerance)
    }
}

impl<T: Float + fmt::LowerExp, const NP: usize> fmt::Display for ErrorReport<T, NP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..NP {
            for col in 0..NP {
                if col > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:+.3e}", self.errors.get(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
