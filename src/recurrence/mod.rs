//! Three-term recurrence coefficients.
//!
//! Every classical family satisfies
//!
//! p_{L+1}(x) = (a_L x - b_L) p_L(x) - c_L p_{L-1}(x),  p_0(x) = p0
//!
//! with family- and standardization-specific `(a_L, b_L, c_L)`. Families are
//! pluggable through [`RecurrenceFamily`]; [`Recurrence`] implements it for
//! the classical table and [`CoefficientGenerator`] walks any implementation
//! degree by degree.

mod family;
mod tables;

pub use family::{Family, Standardization};
pub use tables::Recurrence;

use crate::error::Result;
use crate::scalar::Scalar;

/// Coefficients of one recurrence step, from degree L (and L - 1) to L + 1.
///
/// `c` is unused at degree 0 and stored as zero.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientTriple<T> {
    pub a: T,
    pub b: T,
    pub c: T,
}

impl<T> CoefficientTriple<T> {
    /// Create a triple.
    pub fn new(a: T, b: T, c: T) -> Self {
        Self { a, b, c }
    }
}

/// Capability of a polynomial family: base value plus per-degree coefficients.
pub trait RecurrenceFamily<T: Scalar> {
    /// Constant value of the degree-0 polynomial.
    fn p0(&self) -> T;

    /// Recurrence coefficients for the step from `degree` to `degree + 1`.
    fn coefficients(&self, degree: usize) -> CoefficientTriple<T>;

    /// Coefficients for degrees `0..n`.
    fn triples(&self, n: usize) -> Vec<CoefficientTriple<T>> {
        (0..n).map(|degree| self.coefficients(degree)).collect()
    }
}

impl<T: Scalar, R: RecurrenceFamily<T> + ?Sized> RecurrenceFamily<T> for &R {
    fn p0(&self) -> T {
        (**self).p0()
    }

    fn coefficients(&self, degree: usize) -> CoefficientTriple<T> {
        (**self).coefficients(degree)
    }
}

/// Cursor over the coefficient sequence of one family.
///
/// Yields the triple for degree 0, 1, 2, ... and never ends. It cannot be
/// rewound; build a new generator to start again from degree 0.
#[derive(Clone, Debug)]
pub struct CoefficientGenerator<T, R> {
    family: R,
    p0: T,
    degree: usize,
}

impl<T: Scalar, R: RecurrenceFamily<T>> CoefficientGenerator<T, R> {
    /// Start a generator at degree 0.
    pub fn new(family: R) -> Self {
        let p0 = family.p0();
        Self {
            family,
            p0,
            degree: 0,
        }
    }

    /// Constant value of the degree-0 polynomial.
    pub fn p0(&self) -> &T {
        &self.p0
    }

    /// Degree whose triple the next call to `next` returns.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The underlying family.
    pub fn family(&self) -> &R {
        &self.family
    }
}

impl<T: Scalar, R: RecurrenceFamily<T>> Iterator for CoefficientGenerator<T, R> {
    type Item = CoefficientTriple<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let triple = self.family.coefficients(self.degree);
        self.degree += 1;
        Some(triple)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Coefficient generator for Legendre polynomials.
///
/// The scalar type picks the arithmetic: `f64` or exact [`crate::Surd`].
pub fn legendre_coefficient_generator<T: Scalar>(
    standardization: &str,
) -> Result<CoefficientGenerator<T, Recurrence<T>>> {
    let standardization = standardization.parse()?;
    Ok(CoefficientGenerator::new(Recurrence::new(
        Family::Legendre,
        standardization,
    )?))
}
