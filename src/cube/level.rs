//! Storage for evaluated tree levels.

use crate::combinatorics::{multi_index_position, multi_indices};

/// All basis values of one total degree.
///
/// Entry `e` (in simplex order, see [`crate::combinatorics`]) holds the
/// values over the whole batch in `data[e * batch_len..(e + 1) * batch_len]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Level<T> {
    degree: usize,
    dim: usize,
    n_entries: usize,
    batch_shape: Vec<usize>,
    batch_len: usize,
    data: Vec<T>,
}

impl<T> Level<T> {
    pub(crate) fn from_parts(
        degree: usize,
        dim: usize,
        n_entries: usize,
        batch_shape: Vec<usize>,
        data: Vec<T>,
    ) -> Self {
        let batch_len = batch_shape.iter().product();
        debug_assert_eq!(data.len(), n_entries * batch_len);
        Self {
            degree,
            dim,
            n_entries,
            batch_shape,
            batch_len,
            data,
        }
    }

    /// Total polynomial degree of every entry.
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of entries, `C(degree + dim - 1, dim - 1)`.
    pub fn len(&self) -> usize {
        self.n_entries
    }

    /// Always false; every level holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.n_entries == 0
    }

    pub fn batch_shape(&self) -> &[usize] {
        &self.batch_shape
    }

    pub fn batch_len(&self) -> usize {
        self.batch_len
    }

    /// Values of entry `e` over the batch.
    #[inline]
    pub fn entry(&self, e: usize) -> &[T] {
        &self.data[e * self.batch_len..(e + 1) * self.batch_len]
    }

    /// Entries in order.
    pub fn entries(&self) -> impl Iterator<Item = &[T]> {
        (0..self.n_entries).map(move |e| self.entry(e))
    }

    /// Multi-index of every entry, in entry order.
    pub fn multi_indices(&self) -> Vec<Vec<usize>> {
        multi_indices(self.dim, self.degree)
    }

    /// Flat entry-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

/// Levels 0 through `max_degree` of a tensor-product basis evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree<T> {
    levels: Vec<Level<T>>,
}

impl<T> Tree<T> {
    pub(crate) fn new(levels: Vec<Level<T>>) -> Self {
        debug_assert!(!levels.is_empty());
        Self { levels }
    }

    /// Highest degree evaluated.
    pub fn max_degree(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn dim(&self) -> usize {
        self.levels[0].dim()
    }

    pub fn batch_shape(&self) -> &[usize] {
        self.levels[0].batch_shape()
    }

    pub fn levels(&self) -> &[Level<T>] {
        &self.levels
    }

    pub fn level(&self, degree: usize) -> Option<&Level<T>> {
        self.levels.get(degree)
    }

    pub fn into_levels(self) -> Vec<Level<T>> {
        self.levels
    }

    /// Total number of basis functions over all levels.
    pub fn total_len(&self) -> usize {
        self.levels.iter().map(Level::len).sum()
    }

    /// Values of the basis function with multi-index `alpha`.
    ///
    /// `None` if `alpha` has the wrong length or exceeds the maximum degree.
    pub fn get(&self, alpha: &[usize]) -> Option<&[T]> {
        if alpha.len() != self.dim() {
            return None;
        }
        let degree = alpha
            .iter()
            .try_fold(0usize, |total, &a| total.checked_add(a))?;
        let level = self.level(degree)?;
        Some(level.entry(multi_index_position(alpha)))
    }
}
