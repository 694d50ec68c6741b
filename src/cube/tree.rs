//! Recursive evaluation of the tensor-product basis on the n-cube.
//!
//! Level L holds every product `p_{alpha_0}(x_0) ... p_{alpha_{dim-1}}(x_{dim-1})`
//! with `|alpha| = L`, ordered like a discrete (dim-1)-simplex:
//!
//! ```text
//! L = 1:  (1,0,0)
//!         (0,1,0) (0,0,1)
//!
//! L = 2:  (2,0,0)
//!         (1,1,0) (1,0,1)
//!         (0,2,0) (0,1,1) (0,0,2)
//! ```
//!
//! Level L+1 is assembled from levels L and L-1 only:
//! - the whole of level L, with the recurrence applied along axis 0,
//! - the tail of level L with `alpha_0 = 0`, recurred along axis 1,
//! - and so on, down to the single last entry recurred along the last axis.
//!
//! Within the block of axis i the tail is split by `alpha_i = L - k`; each
//! sub-block has `C(k + dim - i - 2, dim - i - 2)` entries and uses the
//! coefficients of degree `L - k`.

use log::{debug, trace};

use super::level::{Level, Tree};
use super::points::EvaluationPoints;
use crate::combinatorics::{binomial, simplex_size};
use crate::error::{OrthoError, Result};
use crate::recurrence::{CoefficientTriple, Family, Recurrence, RecurrenceFamily, Standardization};
use crate::scalar::Scalar;

/// Options for [`tree_with_options`].
#[derive(Clone, Debug, PartialEq)]
pub struct TreeOptions {
    /// Highest total degree to evaluate.
    pub max_degree: usize,
    /// Univariate family used along every axis.
    pub family: Family,
    /// Scaling of the univariate family.
    pub standardization: Standardization,
}

impl TreeOptions {
    /// Normalized Legendre up to `max_degree`.
    pub fn new(max_degree: usize) -> Self {
        Self {
            max_degree,
            family: Family::Legendre,
            standardization: Standardization::Normal,
        }
    }

    /// Use a different family.
    pub fn with_family(mut self, family: Family) -> Self {
        self.family = family;
        self
    }

    /// Use a different standardization.
    pub fn with_standardization(mut self, standardization: Standardization) -> Self {
        self.standardization = standardization;
        self
    }
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Convert a signed degree, rejecting negatives with `InvalidDegree`.
pub fn checked_degree(n: i64) -> Result<usize> {
    usize::try_from(n).map_err(|_| OrthoError::InvalidDegree(n))
}

/// Evaluate normalized Legendre products of every total degree `0..=max_degree`.
///
/// The scalar type of `points` selects floating-point (`f64`) or exact
/// ([`crate::Surd`]) arithmetic.
pub fn tree<T: Scalar>(points: &EvaluationPoints<T>, max_degree: usize) -> Result<Tree<T>> {
    let family = Recurrence::<T>::legendre(Standardization::Normal)?;
    tree_with(points, max_degree, &family)
}

/// Evaluate the tree for the family and standardization in `options`.
pub fn tree_with_options<T: Scalar>(
    points: &EvaluationPoints<T>,
    options: &TreeOptions,
) -> Result<Tree<T>> {
    let family = Recurrence::<T>::new(options.family.clone(), options.standardization)?;
    tree_with(points, options.max_degree, &family)
}

/// Evaluate the tree for any recurrence family.
pub fn tree_with<T: Scalar, R: RecurrenceFamily<T>>(
    points: &EvaluationPoints<T>,
    max_degree: usize,
    family: &R,
) -> Result<Tree<T>> {
    build(points, max_degree, family, next_level)
}

type StepFn<T> = fn(
    &EvaluationPoints<T>,
    &Level<T>,
    Option<&Level<T>>,
    &[CoefficientTriple<T>],
    &AxisFactors<T>,
) -> Level<T>;

/// `a_j x_i - b_j` over the batch for every axis i and degree j below the
/// maximum. Each is used by every later level, so they are formed once.
pub(super) struct AxisFactors<T> {
    n_degrees: usize,
    batch_len: usize,
    data: Vec<T>,
}

impl<T: Scalar> AxisFactors<T> {
    fn new(points: &EvaluationPoints<T>, triples: &[CoefficientTriple<T>]) -> Self {
        let batch_len = points.batch_len();
        let mut data = Vec::with_capacity(points.dim() * triples.len() * batch_len);
        for axis in 0..points.dim() {
            for t in triples {
                data.extend(
                    points
                        .coord(axis)
                        .iter()
                        .map(|x| t.a.clone() * x.clone() - t.b.clone()),
                );
            }
        }
        Self {
            n_degrees: triples.len(),
            batch_len,
            data,
        }
    }

    #[inline]
    pub(super) fn get(&self, axis: usize, degree: usize) -> &[T] {
        let start = (axis * self.n_degrees + degree) * self.batch_len;
        &self.data[start..start + self.batch_len]
    }
}

pub(super) fn build<T: Scalar, R: RecurrenceFamily<T>>(
    points: &EvaluationPoints<T>,
    max_degree: usize,
    family: &R,
    step: StepFn<T>,
) -> Result<Tree<T>> {
    let dim = points.dim();
    check_sizes(dim, max_degree, points.batch_len())?;
    debug!(
        "evaluating cube tree: dim = {}, max degree = {}, batch = {:?}",
        dim,
        max_degree,
        points.batch_shape()
    );

    // Coefficients for degrees 0..max_degree, fetched once.
    let triples = family.triples(max_degree);
    let factors = AxisFactors::new(points, &triples);

    let mut levels = Vec::with_capacity(max_degree + 1);
    levels.push(base_level(points, family.p0()));

    for degree in 0..max_degree {
        let level = {
            let current = &levels[degree];
            let previous = degree.checked_sub(1).map(|d| &levels[d]);
            step(points, current, previous, &triples, &factors)
        };
        trace!("level {} has {} entries", level.degree(), level.len());
        levels.push(level);
    }

    Ok(Tree::new(levels))
}

// Level sizes grow with the degree, so checking the last one covers all.
fn check_sizes(dim: usize, max_degree: usize, batch_len: usize) -> Result<()> {
    let overflow = OrthoError::DegreeOverflow {
        dim,
        degree: max_degree,
    };
    let entries = simplex_size(dim, max_degree).ok_or_else(|| overflow.clone())?;
    // block lengths go through i64 binomials
    i64::try_from(max_degree + dim).map_err(|_| overflow.clone())?;
    entries.checked_mul(batch_len).ok_or_else(|| overflow.clone())?;
    dim.checked_mul(max_degree)
        .and_then(|n| n.checked_mul(batch_len))
        .ok_or(overflow)?;
    Ok(())
}

fn base_level<T: Scalar>(points: &EvaluationPoints<T>, p0: T) -> Level<T> {
    let value = p0.powu(points.dim());
    let data = vec![value; points.batch_len()];
    Level::from_parts(0, points.dim(), 1, points.batch_shape().to_vec(), data)
}

/// Entries written by the block of `axis` when stepping from `degree`.
#[inline]
pub(super) fn axis_block_len(dim: usize, degree: usize, axis: usize) -> usize {
    let d = (dim - axis) as i64;
    binomial(degree as i64 + d - 1, d - 1) as usize
}

/// Allocate level `current.degree() + 1` and split it into the per-axis
/// blocks (axis, buffer) plus the one-entry buffer of the last axis.
pub(super) fn split_blocks<'a, T>(
    data: &'a mut [T],
    dim: usize,
    degree: usize,
    batch_len: usize,
) -> (Vec<(usize, &'a mut [T])>, &'a mut [T]) {
    let mut blocks = Vec::with_capacity(dim.saturating_sub(1));
    let mut rest = data;
    for axis in 0..dim - 1 {
        let len = axis_block_len(dim, degree, axis) * batch_len;
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(len);
        blocks.push((axis, head));
        rest = tail;
    }
    (blocks, rest)
}

pub(super) fn empty_level<T: Scalar>(points: &EvaluationPoints<T>, degree: usize) -> (usize, Vec<T>) {
    let n_entries = binomial((degree + points.dim() - 1) as i64, points.dim() as i64 - 1) as usize;
    (n_entries, vec![T::zero(); n_entries * points.batch_len()])
}

fn next_level<T: Scalar>(
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
    for (axis, block) in blocks {
        fill_axis_block(block, axis, current, previous, triples, factors);
    }
    fill_last_axis(
        last,
        factors.get(dim - 1, degree),
        current,
        previous,
        &triples[degree].c,
    );

    Level::from_parts(
        degree + 1,
        dim,
        n_entries,
        points.batch_shape().to_vec(),
        data,
    )
}

/// Write the block of `axis` for level `current.degree() + 1`.
///
/// Reads the last `m1 = C(L + d - 1, d - 1)` entries of level L and, for
/// sub-blocks with `L - k > 0`, the last `m2 = C(L + d - 2, d - 1)` entries of
/// level L-1 (d = dim - axis). The sub-block sizes `m` partially sum to
/// `C(k + d - 1, d - 1)`, so every read at `L - k > 0` stays within `m2`.
pub(super) fn fill_axis_block<T: Scalar>(
    out: &mut [T],
    axis: usize,
    current: &Level<T>,
    previous: Option<&Level<T>>,
    triples: &[CoefficientTriple<T>],
    factors: &AxisFactors<T>,
) {
    let degree = current.degree();
    let batch = current.batch_len();
    let d = (current.dim() - axis) as i64;
    let l = degree as i64;

    let m1 = binomial(l + d - 1, d - 1) as usize;
    let tail = current.len() - m1;

    let mut r = 0;
    for k in 0..=degree {
        let m = binomial(k as i64 + d - 2, d - 2) as usize;
        let c = &triples[degree - k].c;
        let linear = factors.get(axis, degree - k);

        // Only dereferenced when L - k > 0, hence L > 0 and level L-1 exists.
        let lower = previous.filter(|_| degree > k).map(|older| {
            let m2 = binomial(l + d - 2, d - 1) as usize;
            debug_assert!(r + m <= m2, "lower read past level {}", degree - 1);
            (older, older.len() - m2)
        });

        for j in 0..m {
            let src = current.entry(tail + r + j);
            let dst = &mut out[(r + j) * batch..(r + j + 1) * batch];
            let older = lower.map(|(older, tail2)| older.entry(tail2 + r + j));
            recur(dst, src, linear, older, c);
        }
        r += m;
    }
    debug_assert_eq!(r, m1);
}

/// Write the single entry `(0, ..., 0, L + 1)`.
pub(super) fn fill_last_axis<T: Scalar>(
    out: &mut [T],
    linear: &[T],
    current: &Level<T>,
    previous: Option<&Level<T>>,
    c: &T,
) {
    let src = current.entry(current.len() - 1);
    let older = previous.map(|older| older.entry(older.len() - 1));
    recur(out, src, linear, older, c);
}

#[inline]
fn recur<T: Scalar>(dst: &mut [T], src: &[T], factors: &[T], older: Option<&[T]>, c: &T) {
    for (s, slot) in dst.iter_mut().enumerate() {
        let mut value = src[s].clone() * factors[s].clone();
        if let Some(older) = older {
            value = value - c.clone() * older[s].clone();
        }
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::PointArray;
    use crate::scalar::Surd;
    use crate::univariate::evaluate;
    use approx::assert_relative_eq;

    fn points_2d(x: Vec<f64>, y: Vec<f64>) -> EvaluationPoints<f64> {
        EvaluationPoints::new(vec![PointArray::from_vec(x), PointArray::from_vec(y)]).unwrap()
    }

    #[test]
    fn test_level_counts() {
        for dim in 1..=5 {
            let coords = (0..dim)
                .map(|i| PointArray::from_vec(vec![0.1 * i as f64, -0.3]))
                .collect();
            let points = EvaluationPoints::new(coords).unwrap();
            let t = tree(&points, 5).unwrap();
            assert_eq!(t.levels().len(), 6);
            for (degree, level) in t.levels().iter().enumerate() {
                let expected = binomial((degree + dim - 1) as i64, dim as i64 - 1) as usize;
                assert_eq!(level.len(), expected, "dim {} degree {}", dim, degree);
                assert_eq!(level.degree(), degree);
                assert_eq!(level.as_slice().len(), expected * 2);
            }
        }
    }

    #[test]
    fn test_level_zero_is_p0_to_the_dim() {
        for dim in 1..=4 {
            let coords = (0..dim).map(|_| PointArray::from_vec(vec![0.9, -0.2, 0.0])).collect();
            let points = EvaluationPoints::new(coords).unwrap();
            let t = tree(&points, 0).unwrap();
            assert_eq!(t.levels().len(), 1);
            let expected = 0.5f64.sqrt().powi(dim as i32);
            for &value in t.levels()[0].entry(0) {
                assert_relative_eq!(value, expected, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_dim2_degree2_by_hand() {
        let (x, y) = (0.5, 0.5);
        let points = points_2d(vec![x], vec![y]);
        let t = tree(&points, 2).unwrap();

        let p0 = 0.5f64.sqrt();
        let a0 = 3f64.sqrt();
        let a1 = 15f64.sqrt() / 2.0;
        let c1 = 5f64.sqrt() / 2.0;

        assert_relative_eq!(t.levels()[0].entry(0)[0], p0 * p0, epsilon = 1e-14);

        let l1 = &t.levels()[1];
        assert_eq!(l1.len(), 2);
        assert_relative_eq!(l1.entry(0)[0], p0 * p0 * a0 * x, epsilon = 1e-14);
        assert_relative_eq!(l1.entry(1)[0], p0 * p0 * a0 * y, epsilon = 1e-14);

        let l2 = &t.levels()[2];
        assert_eq!(l2.len(), 3);
        let p1x = a0 * x * p0;
        let p1y = a0 * y * p0;
        let p2x = a1 * x * p1x - c1 * p0;
        let p2y = a1 * y * p1y - c1 * p0;
        assert_relative_eq!(l2.entry(0)[0], p2x * p0, epsilon = 1e-14);
        assert_relative_eq!(l2.entry(1)[0], p1x * p1y, epsilon = 1e-14);
        assert_relative_eq!(l2.entry(2)[0], p0 * p2y, epsilon = 1e-14);
    }

    #[test]
    fn test_entries_are_tensor_products() {
        let family = Recurrence::<f64>::legendre(Standardization::Normal).unwrap();
        let xs = [vec![0.3, -0.7, 0.95], vec![-0.1, 0.4, 0.0], vec![0.8, -0.8, 0.25]];
        let points = EvaluationPoints::new(
            xs.iter().map(|x| PointArray::from_vec(x.clone())).collect(),
        )
        .unwrap();
        let t = tree(&points, 4).unwrap();

        for level in t.levels() {
            for (e, alpha) in level.multi_indices().iter().enumerate() {
                for s in 0..3 {
                    let expected: f64 = alpha
                        .iter()
                        .enumerate()
                        .map(|(i, &k)| evaluate(&xs[i][s], k, &family))
                        .product();
                    assert_relative_eq!(level.entry(e)[s], expected, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_prefix_stability() {
        let points = points_2d(vec![0.2, -0.6], vec![0.9, 0.1]);
        let short = tree(&points, 3).unwrap();
        let long = tree(&points, 4).unwrap();
        assert_eq!(short.levels(), &long.levels()[..4]);
    }

    #[test]
    fn test_dim1_is_univariate_recurrence() {
        let family = Recurrence::<f64>::new(Family::Chebyshev1, Standardization::Classical).unwrap();
        let x = vec![0.1, 0.5, -0.75];
        let points = EvaluationPoints::new(vec![PointArray::from_vec(x.clone())]).unwrap();
        let t = tree_with(&points, 6, &family).unwrap();
        for (degree, level) in t.levels().iter().enumerate() {
            assert_eq!(level.len(), 1);
            for (s, &xs) in x.iter().enumerate() {
                assert_eq!(level.entry(0)[s], evaluate(&xs, degree, &family));
            }
        }
    }

    #[test]
    fn test_exact_tree_matches_float() {
        let exact = EvaluationPoints::new(vec![
            PointArray::scalar(Surd::ratio(1, 3)),
            PointArray::scalar(Surd::ratio(-1, 2)),
            PointArray::scalar(Surd::ratio(3, 4)),
        ])
        .unwrap();
        let float = EvaluationPoints::new(vec![
            PointArray::scalar(1.0 / 3.0),
            PointArray::scalar(-0.5),
            PointArray::scalar(0.75),
        ])
        .unwrap();

        let te = tree(&exact, 4).unwrap();
        let tf = tree(&float, 4).unwrap();
        assert_eq!(te.levels()[0].entry(0)[0], Surd::sqrt_ratio(1, 2).powu(3));
        for (le, lf) in te.levels().iter().zip(tf.levels()) {
            for (ve, vf) in le.as_slice().iter().zip(lf.as_slice()) {
                assert_relative_eq!(ve.to_f64(), *vf, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_batch_shapes_propagate() {
        let grid = |v: f64| PointArray::new(vec![2, 3], vec![v; 6]).unwrap();
        let points = EvaluationPoints::new(vec![grid(0.1), grid(0.2)]).unwrap();
        let t = tree(&points, 2).unwrap();
        assert_eq!(t.batch_shape(), &[2, 3]);
        assert_eq!(t.levels()[2].entry(1).len(), 6);

        let scalar = EvaluationPoints::new(vec![PointArray::scalar(0.1)]).unwrap();
        let t = tree(&scalar, 3).unwrap();
        assert!(t.batch_shape().is_empty());
        assert_eq!(t.levels()[3].entry(0).len(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let empty = || PointArray::new(vec![0, 4], Vec::<f64>::new()).unwrap();
        let points = EvaluationPoints::new(vec![empty(), empty(), empty()]).unwrap();
        let t = tree(&points, 3).unwrap();
        assert_eq!(t.levels().len(), 4);
        assert_eq!(t.levels()[3].len(), 10);
        assert!(t.levels()[3].as_slice().is_empty());
        assert!(t.levels()[3].entry(9).is_empty());
    }

    #[test]
    fn test_lower_level_reads_in_bounds() {
        // Every (dim, L, axis, k) combination that touches level L-1.
        for dim in 1..=6usize {
            for degree in 1..=7usize {
                let previous_len = binomial((degree - 1 + dim - 1) as i64, dim as i64 - 1);
                for axis in 0..dim.saturating_sub(1) {
                    let d = (dim - axis) as i64;
                    let l = degree as i64;
                    let m2 = binomial(l + d - 2, d - 1);
                    assert!(m2 <= previous_len);
                    let mut r = 0;
                    for k in 0..degree {
                        let m = binomial(k as i64 + d - 2, d - 2);
                        assert!(r + m <= m2, "dim {} L {} axis {} k {}", dim, degree, axis, k);
                        r += m;
                    }
                    assert_eq!(r, m2);
                }
            }
        }
    }

    #[test]
    fn test_get_by_multi_index() {
        let points = points_2d(vec![0.3], vec![-0.4]);
        let t = tree(&points, 3).unwrap();
        assert_eq!(t.get(&[1, 2]), Some(t.levels()[3].entry(1)));
        assert_eq!(t.get(&[0, 0]), Some(t.levels()[0].entry(0)));
        assert_eq!(t.get(&[2, 2]), None);
        assert_eq!(t.get(&[1]), None);
        // total degree overflows usize
        assert_eq!(t.get(&[usize::MAX, 1]), None);
        assert_eq!(t.get(&[usize::MAX, 0]), None);
        assert_eq!(t.total_len(), 10);
    }

    #[test]
    fn test_options_and_degree_checks() {
        let points = points_2d(vec![0.3], vec![-0.4]);
        let options = TreeOptions::new(3)
            .with_family(Family::Hermite)
            .with_standardization(Standardization::Classical);
        let t = tree_with_options(&points, &options).unwrap();
        // H_2(0.3) H_1(-0.4)
        let expected = (4.0 * 0.09 - 2.0) * (2.0 * -0.4);
        assert_relative_eq!(t.get(&[2, 1]).unwrap()[0], expected, epsilon = 1e-14);

        assert_eq!(checked_degree(4), Ok(4));
        assert_eq!(checked_degree(-1), Err(OrthoError::InvalidDegree(-1)));
        assert_eq!(TreeOptions::default().max_degree, 0);
    }

    #[test]
    fn test_axis_factors_layout() {
        let points = points_2d(vec![0.3, -0.5, 0.8], vec![0.1, 0.9, -0.2]);
        let family = Recurrence::<f64>::new(Family::Laguerre, Standardization::Monic).unwrap();
        let triples = family.triples(4);
        let factors = AxisFactors::new(&points, &triples);

        for axis in 0..2 {
            for (j, t) in triples.iter().enumerate() {
                let linear = factors.get(axis, j);
                assert_eq!(linear.len(), 3);
                for (s, x) in points.coord(axis).iter().enumerate() {
                    assert_eq!(linear[s], t.a * x - t.b);
                }
            }
        }
    }

    #[test]
    fn test_shifted_family_matches_univariate() {
        // Laguerre has b_L != 0, so every block reads its own factor row
        let points = points_2d(vec![0.4, 1.7], vec![2.5, 0.2]);
        let family = Recurrence::<f64>::new(Family::Laguerre, Standardization::Classical).unwrap();
        let t = tree_with(&points, 5, &family).unwrap();
        for level in t.levels() {
            for (alpha, values) in level.multi_indices().iter().zip(level.entries()) {
                for s in 0..2 {
                    let expected = evaluate(&points.coord(0)[s], alpha[0], &family)
                        * evaluate(&points.coord(1)[s], alpha[1], &family);
                    assert_relative_eq!(values[s], expected, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_degree_overflow_is_rejected() {
        let coords = (0..40).map(|_| PointArray::scalar(0.0)).collect();
        let points = EvaluationPoints::new(coords).unwrap();
        let err = tree(&points, 1_000).unwrap_err();
        assert!(matches!(err, OrthoError::DegreeOverflow { dim: 40, .. }));
    }

    #[test]
    fn test_exact_options_with_inexact_base_fail() {
        let points = EvaluationPoints::new(vec![PointArray::scalar(Surd::ratio(1, 2))]).unwrap();
        let options = TreeOptions::new(2).with_family(Family::Chebyshev2);
        assert!(matches!(
            tree_with_options(&points, &options),
            Err(OrthoError::InexactConstant { .. })
        ));
    }
}
