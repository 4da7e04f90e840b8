//! Scalar and vector fields sampled at the nodes of one spectral element.

use num_traits::Float;

use super::DIM;

/// A 2-component vector at every node of an `NP x NP` element.
///
/// Indexed `[row][col][component]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VectorField<T, const NP: usize> {
    data: [[[T; DIM]; NP]; NP],
}

impl<T: Float, const NP: usize> VectorField<T, NP> {
    /// Field with every component set to zero.
    pub fn zeros() -> Self {
        Self {
            data: [[[T::zero(); DIM]; NP]; NP],
        }
    }

    /// Build a field by evaluating `f(row, col)` at every node.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> [T; DIM],
    {
        Self {
            data: std::array::from_fn(|row| std::array::from_fn(|col| f(row, col))),
        }
    }

    /// Wrap an existing nested array.
    pub fn from_array(data: [[[T; DIM]; NP]; NP]) -> Self {
        Self { data }
    }

    /// Vector at a node.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> [T; DIM] {
        self.data[row][col]
    }

    /// Set one component at a node.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, component: usize, value: T) {
        self.data[row][col][component] = value;
    }

    /// Multiply every component by `k`.
    pub fn scale(&self, k: T) -> Self {
        Self::from_fn(|row, col| {
            let [u, v] = self.data[row][col];
            [u * k, v * k]
        })
    }

    /// Borrow the underlying array.
    #[inline]
    pub fn as_array(&self) -> &[[[T; DIM]; NP]; NP] {
        &self.data
    }
}

impl<T: Float, const NP: usize> Default for VectorField<T, NP> {
    fn default() -> Self {
        Self::zeros()
    }
}

/// A scalar at every node of an `NP x NP` element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalarField<T, const NP: usize> {
    data: [[T; NP]; NP],
}

impl<T: Float, const NP: usize> ScalarField<T, NP> {
    /// Field of zeros.
    pub fn zeros() -> Self {
        Self {
            data: [[T::zero(); NP]; NP],
        }
    }

    /// Field with every node set to `value`.
    pub fn constant(value: T) -> Self {
        Self {
            data: [[value; NP]; NP],
        }
    }

    /// Build a field by evaluating `f(row, col)` at every node.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self {
            data: std::array::from_fn(|row| std::array::from_fn(|col| f(row, col))),
        }
    }

    /// Wrap an existing nested array.
    pub fn from_array(data: [[T; NP]; NP]) -> Self {
        Self { data }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row][col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row][col] = value;
    }

    /// Iterate over `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .flat_map(|(row, r)| r.iter().enumerate().map(move |(col, &v)| (row, col, v)))
    }

    /// Largest absolute value over all nodes (NaN if any node is NaN).
    pub fn max_abs(&self) -> T {
        self.iter().fold(T::zero(), |acc, (_, _, v)| {
            if v.is_nan() || acc.is_nan() {
                T::nan()
            } else {
                acc.max(v.abs())
            }
        })
    }

    #[inline]
    pub fn as_array(&self) -> &[[T; NP]; NP] {
        &self.data
    }

    #[inline]
    pub(crate) fn as_array_mut(&mut self) -> &mut [[T; NP]; NP] {
        &mut self.data
    }
}

impl<T: Float, const NP: usize> Default for ScalarField<T, NP> {
    fn default() -> Self {
        Self::zeros()
    }
}
