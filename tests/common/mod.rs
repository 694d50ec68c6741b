//! Gauss-Lobatto-Legendre quadrature for the integration tests.

#![allow(dead_code)]

use orthotree::legendre;

/// Classical P_N(x) and P'_N(x).
fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    let p = legendre(n, &x, "classical").unwrap();
    if n == 0 {
        return (p, 0.0);
    }
    let p_prev = legendre(n - 1, &x, "classical").unwrap();
    let nf = n as f64;
    let dp = if (x.abs() - 1.0).abs() < 1e-14 {
        // P'_N(±1) = (±1)^(N-1) N(N+1)/2
        let sign = if x > 0.0 || n % 2 == 1 { 1.0 } else { -1.0 };
        sign * nf * (nf + 1.0) / 2.0
    } else {
        nf * (x * p - p_prev) / (x * x - 1.0)
    };
    (p, dp)
}

/// GLL nodes on [-1, 1]: the endpoints and the roots of P'_N.
pub fn gauss_lobatto_nodes(order: usize) -> Vec<f64> {
    if order == 0 {
        return vec![0.0];
    }
    if order == 1 {
        return vec![-1.0, 1.0];
    }

    let n = order;
    let mut nodes = vec![0.0; n + 1];
    nodes[0] = -1.0;
    nodes[n] = 1.0;

    // Chebyshev-Gauss-Lobatto initial guess, refined by Newton on
    // (1 - x^2) P'_N(x), whose derivative is -N(N+1) P_N(x).
    for (j, node) in nodes.iter_mut().enumerate().take(n).skip(1) {
        let mut x = -(std::f64::consts::PI * j as f64 / n as f64).cos();
        for _ in 0..100 {
            let (p, dp) = legendre_and_derivative(n, x);
            let f = (1.0 - x * x) * dp;
            let df = -(n as f64) * (n as f64 + 1.0) * p;
            let dx = f / df;
            x -= dx;
            if dx.abs() < 1e-15 {
                break;
            }
        }
        *node = x;
    }
    nodes
}

/// GLL weights w_j = 2 / (N(N+1) P_N(x_j)^2).
pub fn gauss_lobatto_weights(order: usize, nodes: &[f64]) -> Vec<f64> {
    if order == 0 {
        return vec![2.0];
    }
    let nf = order as f64;
    nodes
        .iter()
        .map(|&x| {
            let (p, _) = legendre_and_derivative(order, x);
            2.0 / (nf * (nf + 1.0) * p * p)
        })
        .collect()
}

/// Tensor grid of a 1D rule in `dim` dimensions.
///
/// Returns one coordinate vector per axis and the product weights; point s
/// enumerates the grid with the last axis fastest.
pub fn tensor_rule(nodes: &[f64], weights: &[f64], dim: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    let m = nodes.len();
    let total = m.pow(dim as u32);
    let mut coords = vec![Vec::with_capacity(total); dim];
    let mut tensor_weights = Vec::with_capacity(total);

    for s in 0..total {
        let mut rest = s;
        let mut w = 1.0;
        for axis in (0..dim).rev() {
            let i = rest % m;
            rest /= m;
            coords[axis].push(nodes[i]);
            w *= weights[i];
        }
        tensor_weights.push(w);
    }
    (coords, tensor_weights)
}
