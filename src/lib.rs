//! # orthotree
//!
//! Orthogonal polynomials evaluated through three-term recurrences.
//!
//! This crate provides:
//! - Recurrence coefficients for Legendre, Jacobi, Chebyshev, Hermite and
//!   Laguerre polynomials in monic, normal and classical standardization
//! - Univariate evaluation at floating-point or exact points
//! - Tensor-product bases on the n-cube, evaluated level by level for all
//!   total degrees up to a maximum in a single pass
//! - Exact arithmetic over quadratic surds, so normalized bases can be
//!   evaluated without rounding
//! - Dense Vandermonde matrices of evaluated bases
//!
//! ```
//! use orthotree::{EvaluationPoints, PointArray, tree};
//!
//! let points = EvaluationPoints::new(vec![
//!     PointArray::from_vec(vec![0.5, -0.25]),
//!     PointArray::from_vec(vec![0.5, 0.75]),
//! ])
//! .unwrap();
//! let levels = tree(&points, 2).unwrap();
//! assert_eq!(levels.levels()[2].len(), 3);
//! ```

pub mod basis;
pub mod combinatorics;
pub mod cube;
pub mod error;
pub mod recurrence;
pub mod scalar;
pub mod univariate;

pub use basis::CubeVandermonde;
pub use combinatorics::{binomial, multi_indices, simplex_size};
#[cfg(feature = "parallel")]
pub use cube::{tree_batches_parallel, tree_parallel};
pub use cube::{
    EvaluationPoints, Level, PointArray, Tree, TreeOptions, checked_degree, tree, tree_with,
    tree_with_options,
};
pub use error::{OrthoError, Result};
pub use recurrence::{
    CoefficientGenerator, CoefficientTriple, Family, Recurrence, RecurrenceFamily,
    Standardization, legendre_coefficient_generator,
};
pub use scalar::{Scalar, Surd};
pub use univariate::{
    chebyshev1, chebyshev2, evaluate, evaluate_all, hermite, jacobi, laguerre, legendre,
};
