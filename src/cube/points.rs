//! Evaluation sites: `dim` coordinate arrays over a shared batch shape.

use crate::error::{OrthoError, Result};

/// Row-major n-dimensional array of coordinates.
///
/// An empty shape is a scalar. Any axis may have length zero, in which case
/// the array holds no values.
#[derive(Clone, Debug, PartialEq)]
pub struct PointArray<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T> PointArray<T> {
    /// Create from a shape and row-major data.
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self> {
        let Some(expected) = shape.iter().try_fold(1usize, |acc, &n| acc.checked_mul(n)) else {
            return Err(OrthoError::shape_mismatch(
                format!("{} values", data.len()),
                format!("shape {:?} with more elements than fit in usize", shape),
            ));
        };
        if expected != data.len() {
            return Err(OrthoError::shape_mismatch(
                format!("{} values for shape {:?}", expected, shape),
                format!("{} values", data.len()),
            ));
        }
        Ok(Self { shape, data })
    }

    /// Zero-dimensional array holding one value.
    pub fn scalar(value: T) -> Self {
        Self {
            shape: Vec::new(),
            data: vec![value],
        }
    }

    /// One-dimensional array.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Coordinates of a batch of points in `dim` dimensions.
///
/// Coordinate `i` of batch element `s` is `coord(i)[s]`.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationPoints<T> {
    batch_shape: Vec<usize>,
    coords: Vec<Vec<T>>,
}

impl<T> EvaluationPoints<T> {
    /// Combine one array per coordinate axis.
    ///
    /// Fails with `EmptyPoints` for zero arrays and `ShapeMismatch` if the
    /// arrays disagree on shape.
    pub fn new(arrays: Vec<PointArray<T>>) -> Result<Self> {
        let Some(first) = arrays.first() else {
            return Err(OrthoError::EmptyPoints);
        };
        let batch_shape = first.shape.clone();

        for (axis, array) in arrays.iter().enumerate().skip(1) {
            if array.shape != batch_shape {
                return Err(OrthoError::shape_mismatch(
                    format!("{:?}", batch_shape),
                    format!("{:?} for coordinate {}", array.shape, axis),
                ));
            }
        }

        let coords = arrays.into_iter().map(|array| array.data).collect();
        Ok(Self {
            batch_shape,
            coords,
        })
    }

    /// Build from a list of points, each given as its `dim` coordinates.
    ///
    /// The batch shape is `[points.len()]`.
    pub fn from_points(points: Vec<Vec<T>>) -> Result<Self> {
        let Some(dim) = points.first().map(Vec::len) else {
            return Err(OrthoError::EmptyPoints);
        };
        if dim == 0 {
            return Err(OrthoError::EmptyPoints);
        }

        let n_points = points.len();
        let mut coords: Vec<Vec<T>> = (0..dim).map(|_| Vec::with_capacity(n_points)).collect();
        for (index, point) in points.into_iter().enumerate() {
            if point.len() != dim {
                return Err(OrthoError::shape_mismatch(
                    format!("{} coordinates", dim),
                    format!("{} coordinates for point {}", point.len(), index),
                ));
            }
            for (axis, value) in point.into_iter().enumerate() {
                coords[axis].push(value);
            }
        }

        Ok(Self {
            batch_shape: vec![n_points],
            coords,
        })
    }

    /// Number of coordinate axes.
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// Shape shared by all coordinate arrays.
    pub fn batch_shape(&self) -> &[usize] {
        &self.batch_shape
    }

    /// Number of points in the batch.
    pub fn batch_len(&self) -> usize {
        // every axis holds exactly one value per point
        self.coords[0].len()
    }

    /// Values of coordinate `axis` over the batch.
    pub fn coord(&self, axis: usize) -> &[T] {
        &self.coords[axis]
    }
}
