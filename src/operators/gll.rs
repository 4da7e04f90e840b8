//! Gauss-Lobatto-Legendre nodes.
//!
//! The N+1 GLL nodes are the roots of (1-x²)P'_N(x), endpoints included.
//! Spectral elements place their degrees of freedom here, and the
//! differentiation matrix `Dvv` is built on the same set.

use std::f64::consts::PI;

/// Evaluate P_n(x) and P'_n(x) with the three-term recurrence.
///
/// (n+1) P_{n+1}(x) = (2n+1) x P_n(x) - n P_{n-1}(x)
pub fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    match n {
        0 => return (1.0, 0.0),
        1 => return (x, 1.0),
        _ => {}
    }

    let mut p_prev = 1.0;
    let mut p = x;
    for k in 1..n {
        let p_next = ((2 * k + 1) as f64 * x * p - k as f64 * p_prev) / (k + 1) as f64;
        p_prev = p;
        p = p_next;
    }

    // P'_n is singular in the closed form at x = ±1; use the endpoint values.
    let nn = (n * (n + 1)) as f64 / 2.0;
    let dp = if (x - 1.0).abs() < 1e-14 {
        nn
    } else if (x + 1.0).abs() < 1e-14 {
        if n % 2 == 0 { -nn } else { nn }
    } else {
        n as f64 * (x * p - p_prev) / (x * x - 1.0)
    };

    (p, dp)
}

/// Gauss-Lobatto-Legendre nodes for polynomial order `order`, ascending in [-1, 1].
///
/// Interior nodes come from Newton iteration on (1-x²)P'_N started at the
/// Chebyshev-Lobatto points. Since d/dx[(1-x²)P'_N] = -N(N+1)P_N, the update is
/// x += (1-x²)P'_N / (N(N+1)P_N).
pub fn gauss_lobatto_nodes(order: usize) -> Vec<f64> {
    let n = order;
    if n == 0 {
        return vec![0.0];
    }

    let mut nodes: Vec<f64> = (0..=n).map(|j| -(PI * j as f64 / n as f64).cos()).collect();
    nodes[0] = -1.0;
    nodes[n] = 1.0;

    let nn1 = (n * (n + 1)) as f64;
    for x in nodes.iter_mut().take(n).skip(1) {
        for _ in 0..100 {
            let (p, dp) = legendre_and_derivative(n, *x);
            let update = (1.0 - *x * *x) * dp / (nn1 * p);
            *x += update;
            if update.abs() < 1e-15 {
                break;
            }
        }
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legendre_known_values() {
        // P_2(x) = (3x² - 1)/2, P_3(x) = (5x³ - 3x)/2
        for &x in &[-0.7, -0.2, 0.0, 0.4, 0.9] {
            let (p2, dp2) = legendre_and_derivative(2, x);
            assert!((p2 - (3.0 * x * x - 1.0) / 2.0).abs() < 1e-14);
            assert!((dp2 - 3.0 * x).abs() < 1e-13);

            let (p3, dp3) = legendre_and_derivative(3, x);
            assert!((p3 - (5.0 * x * x * x - 3.0 * x) / 2.0).abs() < 1e-14);
            assert!((dp3 - (15.0 * x * x - 3.0) / 2.0).abs() < 1e-13);
        }
    }

    #[test]
    fn test_legendre_derivative_endpoints() {
        for n in 1..=6 {
            let (_, right) = legendre_and_derivative(n, 1.0);
            let (_, left) = legendre_and_derivative(n, -1.0);
            let expected = (n * (n + 1)) as f64 / 2.0;
            assert!((right - expected).abs() < 1e-12);
            let sign = if n % 2 == 0 { -1.0 } else { 1.0 };
            assert!((left - sign * expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_nodes_order_three() {
        // Closed form for N = 3: ±1, ±1/√5
        let nodes = gauss_lobatto_nodes(3);
        let inner = 1.0 / 5.0_f64.sqrt();
        let expected = [-1.0, -inner, inner, 1.0];
        for (i, (&x, &e)) in nodes.iter().zip(expected.iter()).enumerate() {
            assert!((x - e).abs() < 1e-14, "node {}: {} vs {}", i, x, e);
        }
    }

    #[test]
    fn test_nodes_sorted_and_symmetric() {
        for order in 1..=8 {
            let nodes = gauss_lobatto_nodes(order);
            assert_eq!(nodes.len(), order + 1);
            for w in nodes.windows(2) {
                assert!(w[0] < w[1], "nodes must be strictly increasing");
            }
            for i in 0..nodes.len() / 2 {
                assert!((nodes[i] + nodes[order - i]).abs() < 1e-14);
            }
        }
    }
}
