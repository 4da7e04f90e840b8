//! Reading kernel input from text.
//!
//! # File Format
//!
//! Whitespace-separated decimal values in a fixed positional order. Layout
//! and line breaks carry no meaning. For an element with `NP` nodes per edge:
//!
//! | Section   | Count         | Order (outer to inner)      | Stored as              |
//! |-----------|---------------|-----------------------------|------------------------|
//! | velocity  | 2·NP²         | c, j, k                     | `v[k][j][c]`           |
//! | metdet    | NP²           | i, j                        | `metdet[i][j]`         |
//! | rmetdet   | NP²           | i, j                        | `rmetdet[j][i]`        |
//! | Dinv      | 4·NP²         | a, b, k, l                  | `Dinv[l][k][a][b]`     |
//! | Dvv       | NP²           | i, j                        | `Dvv[j][i]`            |
//! | expected  | NP² (optional)| i, j                        | `expected[i][j]`       |
//!
//! The expected divergence grid is present only in validation inputs. Input
//! that ends right after `Dvv` has no expected grid; input that ends partway
//! through it is an error.

mod kernel_input;

pub use kernel_input::{
    InputError, KernelInput, parse_kernel_input, read_kernel_input, read_kernel_input_file,
};
