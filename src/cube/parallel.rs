//! Rayon-parallel tree evaluation.
//!
//! Given levels L and L-1, the per-axis blocks of level L+1 only read shared
//! data and write disjoint ranges of the new buffer, so they are filled
//! concurrently. Independent point batches are evaluated concurrently too.

use rayon::prelude::*;

use super::level::{Level, Tree};
use super::points::EvaluationPoints;
use super::tree::{
    AxisFactors, build, empty_level, fill_axis_block, fill_last_axis, split_blocks, tree_with,
};
use crate::error::Result;
use crate::recurrence::{CoefficientTriple, RecurrenceFamily};
use crate::scalar::Scalar;

/// Parallel version of [`super::tree_with`]: the axis blocks of every degree
/// step are filled concurrently.
pub fn tree_parallel<T: Scalar, R: RecurrenceFamily<T>>(
    points: &EvaluationPoints<T>,
    max_degree: usize,
    family: &R,
) -> Result<Tree<T>> {
    build(points, max_degree, family, next_level_parallel)
}

/// Evaluate independent batches concurrently, one tree per batch.
pub fn tree_batches_parallel<T: Scalar, R: RecurrenceFamily<T> + Sync>(
    batches: &[EvaluationPoints<T>],
    max_degree: usize,
    family: &R,
) -> Result<Vec<Tree<T>>> {
    batches
        .par_iter()
        .map(|points| tree_with(points, max_degree, family))
        .collect()
}

fn next_level_parallel<T: Scalar>(
    points: &EvaluationPoints<T>,
    current: &Level<T>,
    previous: Option<&Level<T>>,
    triples: &[CoefficientTriple<T>],
    factors: &AxisFactors<T>,
) -> Level<T> {
    let dim = points.dim();
    let degree = current.degree();
    let (n_entries, mut data) = empty_level(points, degree + 1);

    let (blocks, last) = split_blocks(&mut data, dim, degree, points.batch_len());
    fill_last_axis(
        last,
        factors.get(dim - 1, degree),
        current,
        previous,
        &triples[degree].c,
    );
    blocks.into_par_iter().for_each(|(axis, block)| {
        fill_axis_block(block, axis, current, previous, triples, factors);
    });

    Level::from_parts(
        degree + 1,
        dim,
        n_entries,
        points.batch_shape().to_vec(),
        data,
    )
}
