//! Vandermonde matrix of a tensor-product basis on the n-cube.
//!
//! The Vandermonde matrix V collects a floating-point tree into dense form:
//! - V[s, j] = φ_j(x_s) where φ_j is the j-th basis function in tree order
//!   (level by level, simplex order within a level) and x_s the s-th point
//! - values = V * expansion_coeffs
//!
//! For the normalized Legendre basis and a quadrature rule (x_s, w_s) that
//! is exact to twice the maximum degree, V^T diag(w) V is the identity.

use faer::linalg::matmul::matmul;
use faer::{Accum, Mat, Par};

use crate::combinatorics::multi_indices;
use crate::cube::Tree;
use crate::error::{OrthoError, Result};

/// Dense basis matrix of a tree, one row per point.
#[derive(Clone, Debug)]
pub struct CubeVandermonde {
    /// V[s, j] = φ_j(x_s)
    /// Shape: (n_points, n_modes)
    pub v: Mat<f64>,

    /// Multi-index of each column
    pub modes: Vec<Vec<usize>>,

    /// Highest total degree
    pub max_degree: usize,
}

impl CubeVandermonde {
    /// Flatten the tree: batch elements become rows, basis functions columns.
    pub fn new(tree: &Tree<f64>) -> Self {
        let n_points = tree.levels()[0].batch_len();
        let n_modes = tree.total_len();

        let mut v = Mat::zeros(n_points, n_modes);
        let mut modes = Vec::with_capacity(n_modes);

        let mut column = 0;
        for level in tree.levels() {
            for (values, alpha) in level
                .entries()
                .zip(multi_indices(level.dim(), level.degree()))
            {
                for (s, &value) in values.iter().enumerate() {
                    v[(s, column)] = value;
                }
                modes.push(alpha);
                column += 1;
            }
        }

        Self {
            v,
            modes,
            max_degree: tree.max_degree(),
        }
    }

    pub fn n_points(&self) -> usize {
        self.v.nrows()
    }

    pub fn n_modes(&self) -> usize {
        self.v.ncols()
    }

    /// Column of the basis function with multi-index `alpha`.
    pub fn column_of(&self, alpha: &[usize]) -> Option<usize> {
        self.modes.iter().position(|mode| mode.as_slice() == alpha)
    }

    /// Weighted Gram matrix V^T diag(w) V.
    pub fn gram(&self, weights: &[f64]) -> Result<Mat<f64>> {
        self.check_rows(weights.len(), "weights")?;

        let weighted = Mat::from_fn(self.n_points(), self.n_modes(), |s, j| {
            weights[s] * self.v[(s, j)]
        });
        let mut gram = Mat::zeros(self.n_modes(), self.n_modes());
        matmul(
            gram.as_mut(),
            Accum::Replace,
            self.v.transpose(),
            weighted.as_ref(),
            1.0,
            Par::Seq,
        );
        Ok(gram)
    }

    /// Evaluate `sum_j coeffs[j] φ_j` at every point.
    pub fn evaluate_expansion(&self, coeffs: &[f64]) -> Result<Vec<f64>> {
        if coeffs.len() != self.n_modes() {
            return Err(OrthoError::shape_mismatch(
                format!("{} coefficients", self.n_modes()),
                format!("{} coefficients", coeffs.len()),
            ));
        }

        let c = Mat::from_fn(self.n_modes(), 1, |j, _| coeffs[j]);
        let mut out = Mat::zeros(self.n_points(), 1);
        matmul(
            out.as_mut(),
            Accum::Replace,
            self.v.as_ref(),
            c.as_ref(),
            1.0,
            Par::Seq,
        );
        Ok((0..self.n_points()).map(|s| out[(s, 0)]).collect())
    }

    fn check_rows(&self, len: usize, what: &str) -> Result<()> {
        if len != self.n_points() {
            return Err(OrthoError::shape_mismatch(
                format!("{} {}", self.n_points(), what),
                format!("{} {}", len, what),
            ));
        }
        Ok(())
    }
}
