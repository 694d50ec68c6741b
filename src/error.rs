//! Error types for recurrence construction and tree evaluation.

use thiserror::Error;

/// Errors raised by coefficient generators and evaluators.
///
/// Every variant describes a caller-side contract violation and is detected
/// before any evaluation work starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrthoError {
    /// Coordinate arrays (or an array and its data) disagree on shape.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// No coordinate arrays were given.
    #[error("Evaluation points need at least one coordinate array")]
    EmptyPoints,

    /// Negative maximum degree.
    #[error("Invalid degree {0}: must be non-negative")]
    InvalidDegree(i64),

    /// The requested degree produces levels too large to index.
    #[error("Degree {degree} in dimension {dim} overflows the level size")]
    DegreeOverflow { dim: usize, degree: usize },

    /// Standardization string not recognized, or not available for the family.
    #[error("Unsupported standardization '{standardization}' for {family}")]
    UnsupportedStandardization {
        family: String,
        standardization: String,
    },

    /// No recurrence is defined for the requested family.
    #[error("Unsupported polynomial family '{0}'")]
    UnsupportedFamily(String),

    /// Family parameter outside its admissible range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The base value involves pi and cannot be represented exactly.
    #[error("Base value of normalized {family} is not algebraic; use floating point")]
    InexactConstant { family: String },
}

impl OrthoError {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an unsupported standardization error.
    pub fn unsupported_standardization(
        family: impl Into<String>,
        standardization: impl Into<String>,
    ) -> Self {
        Self::UnsupportedStandardization {
            family: family.into(),
            standardization: standardization.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OrthoError>;
