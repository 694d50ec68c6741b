//! Arithmetic capability shared by floating-point and exact evaluation.
//!
//! Recurrence coefficients are built from integer ratios and square roots of
//! integer ratios. The [`Scalar`] trait exposes exactly those constructors so
//! that one coefficient table serves both `f64` and the exact [`Surd`] type:
//! choosing the scalar type chooses the arithmetic mode.

mod surd;

pub use surd::Surd;

use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};
use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// Number type the recurrences and evaluators work over.
pub trait Scalar:
    Clone
    + Debug
    + PartialEq
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
{
    /// `num / den`. `den` must be non-zero.
    fn from_ratio(num: i64, den: u64) -> Self;

    /// Convert an exact rational.
    fn from_rational(value: &BigRational) -> Self;

    /// `sqrt(num / den)`. `den` must be non-zero.
    fn sqrt_ratio(num: u64, den: u64) -> Self;

    /// Square root of a non-negative rational of any size.
    fn sqrt_rational(value: &BigRational) -> Self;

    /// Represent a transcendental constant, if the arithmetic allows it.
    ///
    /// Floating point always succeeds; exact types return `None`.
    fn from_transcendental(value: f64) -> Option<Self>;

    /// Nearest double, for diagnostics and cross-checks.
    fn as_f64(&self) -> f64;

    /// Integer power by repeated squaring.
    fn powu(&self, exp: usize) -> Self {
        num_traits::pow(self.clone(), exp)
    }
}

impl Scalar for f64 {
    #[inline]
    fn from_ratio(num: i64, den: u64) -> Self {
        num as f64 / den as f64
    }

    fn from_rational(value: &BigRational) -> Self {
        value.to_f64().unwrap_or(f64::NAN)
    }

    #[inline]
    fn sqrt_ratio(num: u64, den: u64) -> Self {
        (num as f64 / den as f64).sqrt()
    }

    fn sqrt_rational(value: &BigRational) -> Self {
        Self::from_rational(value).sqrt()
    }

    #[inline]
    fn from_transcendental(value: f64) -> Option<Self> {
        Some(value)
    }

    #[inline]
    fn as_f64(&self) -> f64 {
        *self
    }

    #[inline]
    fn powu(&self, exp: usize) -> Self {
        self.powi(exp as i32)
    }
}

impl Scalar for Surd {
    fn from_ratio(num: i64, den: u64) -> Self {
        Surd::ratio(num, den)
    }

    fn from_rational(value: &BigRational) -> Self {
        Surd::from(value.clone())
    }

    fn sqrt_ratio(num: u64, den: u64) -> Self {
        Surd::sqrt_ratio(num, den)
    }

    /// # Panics
    /// Panics if `value` is negative.
    fn sqrt_rational(value: &BigRational) -> Self {
        match Surd::sqrt(value) {
            Some(root) => root,
            None => panic!("square root of negative rational {}", value),
        }
    }

    fn from_transcendental(_value: f64) -> Option<Self> {
        None
    }

    fn as_f64(&self) -> f64 {
        self.to_f64()
    }
}
