//! Tensor-product orthogonal polynomials on the n-cube.
//!
//! This module provides:
//! - Evaluation points as `dim` coordinate arrays over a common batch shape
//! - The level-by-level tree evaluator and its options
//! - Rayon-parallel variants (feature `parallel`)

mod level;
#[cfg(feature = "parallel")]
mod parallel;
mod points;
mod tree;

pub use level::{Level, Tree};
#[cfg(feature = "parallel")]
pub use parallel::{tree_batches_parallel, tree_parallel};
pub use points::{EvaluationPoints, PointArray};
pub use tree::{TreeOptions, checked_degree, tree, tree_with, tree_with_options};
