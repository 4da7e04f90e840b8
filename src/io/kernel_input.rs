//! Positional reader for divergence kernel inputs.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use num_traits::Float;
use thiserror::Error;

use crate::element::{DIM, ElementMetrics, ScalarField, VectorField};
use crate::operators::DerivativeOperator;

/// Error type for kernel input parsing.
#[derive(Debug, Error)]
pub enum InputError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A token that is not a number
    #[error("cannot parse value {position} ({token:?}) as a number")]
    Parse { position: usize, token: String },

    /// Input ended inside a section
    #[error("input ended in {section}: expected {expected} values, found {found}")]
    UnexpectedEof {
        section: &'static str,
        expected: usize,
        found: usize,
    },

    /// Values after a complete expected divergence grid
    #[error("unexpected data after the expected divergence grid at value {position}")]
    TrailingData { position: usize },
}

/// Everything one kernel invocation reads, plus the optional expected output.
#[derive(Clone, Debug)]
pub struct KernelInput<T, const NP: usize> {
    /// Vector field at the element nodes
    pub velocity: VectorField<T, NP>,
    /// Element metric terms
    pub metrics: ElementMetrics<T, NP>,
    /// Shared differentiation matrix
    pub derivative: DerivativeOperator<T, NP>,
    /// Expected divergence (validation inputs only)
    pub expected: Option<ScalarField<T, NP>>,
}

/// Whitespace tokenizer that tracks the 1-based position of each value.
struct ValueReader<'a> {
    tokens: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> ValueReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace(),
            position: 0,
        }
    }

    fn is_exhausted(&self) -> bool {
        self.tokens.clone().next().is_none()
    }

    fn section<T: FromStr>(&mut self, section: &'static str, expected: usize) -> Result<Vec<T>, InputError> {
        let mut values = Vec::with_capacity(expected);
        for found in 0..expected {
            let token = self.tokens.next().ok_or(InputError::UnexpectedEof {
                section,
                expected,
                found,
            })?;
            self.position += 1;
            let value = token.parse().map_err(|_| InputError::Parse {
                position: self.position,
                token: token.to_string(),
            })?;
            values.push(value);
        }
        Ok(values)
    }
}

/// Parse a kernel input from text.
pub fn parse_kernel_input<T, const NP: usize>(text: &str) -> Result<KernelInput<T, NP>, InputError>
where
    T: Float + FromStr,
{
    let n2 = NP * NP;
    let mut reader = ValueReader::new(text);

    let raw = reader.section::<T>("velocity", DIM * n2)?;
    let mut velocity = VectorField::zeros();
    let mut it = raw.into_iter();
    for c in 0..DIM {
        for j in 0..NP {
            for (k, value) in (0..NP).zip(&mut it) {
                velocity.set(k, j, c, value);
            }
        }
    }

    let raw = reader.section::<T>("metdet", n2)?;
    let metdet = ScalarField::from_fn(|i, j| raw[i * NP + j]);

    let raw = reader.section::<T>("rmetdet", n2)?;
    let rmetdet = ScalarField::from_fn(|row, col| raw[col * NP + row]);

    let raw = reader.section::<T>("Dinv", DIM * DIM * n2)?;
    let mut dinv = ElementMetrics::<T, NP>::identity().dinv;
    let mut it = raw.into_iter();
    for a in 0..DIM {
        for b in 0..DIM {
            for k in 0..NP {
                for (l, value) in (0..NP).zip(&mut it) {
                    dinv[l][k][a][b] = value;
                }
            }
        }
    }

    let raw = reader.section::<T>("Dvv", n2)?;
    let derivative = DerivativeOperator::new(std::array::from_fn(|row| {
        std::array::from_fn(|col| raw[col * NP + row])
    }));

    let expected = if reader.is_exhausted() {
        None
    } else {
        let raw = reader.section::<T>("expected divergence", n2)?;
        if !reader.is_exhausted() {
            return Err(InputError::TrailingData {
                position: reader.position + 1,
            });
        }
        Some(ScalarField::from_fn(|i, j| raw[i * NP + j]))
    };

    Ok(KernelInput {
        velocity,
        metrics: ElementMetrics::new(metdet, dinv, rmetdet),
        derivative,
        expected,
    })
}

/// Read a kernel input from any reader (e.g. standard input).
pub fn read_kernel_input<T, const NP: usize, R: Read>(mut reader: R) -> Result<KernelInput<T, NP>, InputError>
where
    T: Float + FromStr,
{
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_kernel_input(&text)
}

/// Read a kernel input from a file.
pub fn read_kernel_input_file<T, const NP: usize>(path: &Path) -> Result<KernelInput<T, NP>, InputError>
where
    T: Float + FromStr,
{
    let file = File::open(path)?;
    read_kernel_input(BufReader::new(file))
}
