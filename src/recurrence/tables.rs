//! Closed-form recurrence coefficients of the classical families.
//!
//! Legendre (`normal`) for example:
//!
//! p0 = 1/sqrt(2)
//! a_L = sqrt((2L+1)(2L+3)) / (L+1)
//! b_L = 0
//! c_L = L/(L+1) sqrt((2L+3)/(2L-1))
//!
//! Jacobi coefficients are rational in (alpha, beta) and are evaluated in
//! exact rationals before conversion, so the degenerate first steps
//! (alpha + beta = 0 or -1) are handled by their cancelled forms.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::f64::consts::PI;

use super::{CoefficientTriple, Family, RecurrenceFamily, Standardization};
use crate::error::{OrthoError, Result};
use crate::scalar::Scalar;

/// A validated (family, standardization) pair with its base value.
#[derive(Clone, Debug, PartialEq)]
pub struct Recurrence<T> {
    family: Family,
    standardization: Standardization,
    p0: T,
}

impl<T: Scalar> Recurrence<T> {
    /// Validate the combination and compute the base value.
    ///
    /// Fails with `UnsupportedStandardization` for normalized Jacobi, and
    /// with `InexactConstant` when the normalized base value involves pi but
    /// `T` is exact.
    pub fn new(family: Family, standardization: Standardization) -> Result<Self> {
        family.validate()?;
        let p0 = base_value::<T>(&family, standardization)?;
        Ok(Self {
            family,
            standardization,
            p0,
        })
    }

    /// Parse both names; Jacobi is not reachable this way.
    pub fn from_names(family: &str, standardization: &str) -> Result<Self> {
        Self::new(family.parse()?, standardization.parse()?)
    }

    /// Legendre with the given standardization.
    pub fn legendre(standardization: Standardization) -> Result<Self> {
        Self::new(Family::Legendre, standardization)
    }

    pub fn family(&self) -> &Family {
        &self.family
    }

    pub fn standardization(&self) -> Standardization {
        self.standardization
    }
}

impl<T: Scalar> RecurrenceFamily<T> for Recurrence<T> {
    fn p0(&self) -> T {
        self.p0.clone()
    }

    fn coefficients(&self, degree: usize) -> CoefficientTriple<T> {
        match &self.family {
            Family::Legendre => legendre(self.standardization, degree),
            Family::Jacobi { alpha, beta } => {
                let (a, b, c) = match self.standardization {
                    Standardization::Monic => jacobi_monic(alpha, beta, degree),
                    _ => jacobi_classical(alpha, beta, degree),
                };
                CoefficientTriple::new(
                    T::from_rational(&a),
                    T::from_rational(&b),
                    T::from_rational(&c),
                )
            }
            Family::Chebyshev1 => chebyshev1(self.standardization, degree),
            Family::Chebyshev2 => chebyshev2(self.standardization, degree),
            Family::Hermite => hermite(self.standardization, degree),
            Family::Laguerre => laguerre(self.standardization, degree),
        }
    }
}

fn base_value<T: Scalar>(family: &Family, standardization: Standardization) -> Result<T> {
    if standardization != Standardization::Normal {
        return Ok(T::one());
    }
    let transcendental = |value: f64| {
        T::from_transcendental(value).ok_or_else(|| OrthoError::InexactConstant {
            family: family.name().to_string(),
        })
    };
    match family {
        Family::Legendre => Ok(T::sqrt_ratio(1, 2)),
        Family::Jacobi { .. } => Err(OrthoError::unsupported_standardization(
            family.name(),
            standardization.name(),
        )),
        // weight integrals pi, pi/2 and sqrt(pi)
        Family::Chebyshev1 => transcendental(1.0 / PI.sqrt()),
        Family::Chebyshev2 => transcendental((2.0 / PI).sqrt()),
        Family::Hermite => transcendental(PI.powf(-0.25)),
        Family::Laguerre => Ok(T::one()),
    }
}

fn triple<T: Scalar>(a: T, b: T, c: T) -> CoefficientTriple<T> {
    CoefficientTriple::new(a, b, c)
}

// Degree-dependent terms are formed in BigRational so no degree overflows;
// square roots are taken of the linear factors separately to keep the
// exact radicands small.
fn big(value: usize) -> BigRational {
    BigRational::from_integer(BigInt::from(value))
}

fn exact<T: Scalar>(value: BigRational) -> T {
    T::from_rational(&value)
}

fn root<T: Scalar>(value: BigRational) -> T {
    T::sqrt_rational(&value)
}

fn legendre<T: Scalar>(standardization: Standardization, degree: usize) -> CoefficientTriple<T> {
    let l = big(degree);
    let one = BigRational::one();
    let two = big(2);
    match standardization {
        Standardization::Monic => {
            let c = if degree == 0 {
                T::zero()
            } else {
                // L^2 / ((2L - 1)(2L + 1))
                exact(&l * &l / ((&two * &l - &one) * (&two * &l + &one)))
            };
            triple(T::one(), T::zero(), c)
        }
        Standardization::Classical => triple(
            exact((&two * &l + &one) / (&l + &one)),
            T::zero(),
            exact(&l / (&l + &one)),
        ),
        Standardization::Normal => {
            let a = root::<T>(&two * &l + &one)
                * root(&two * &l + big(3))
                * exact(one.clone() / (&l + &one));
            let c = if degree == 0 {
                T::zero()
            } else {
                exact::<T>(&l / (&l + &one)) * root((&two * &l + big(3)) / (&two * &l - &one))
            };
            triple(a, T::zero(), c)
        }
    }
}

fn chebyshev1<T: Scalar>(standardization: Standardization, degree: usize) -> CoefficientTriple<T> {
    match (standardization, degree) {
        (Standardization::Monic, 0) => triple(T::one(), T::zero(), T::zero()),
        (Standardization::Monic, 1) => triple(T::one(), T::zero(), T::from_ratio(1, 2)),
        (Standardization::Monic, _) => triple(T::one(), T::zero(), T::from_ratio(1, 4)),
        (Standardization::Classical, 0) => triple(T::one(), T::zero(), T::zero()),
        (Standardization::Classical, _) => triple(T::from_ratio(2, 1), T::zero(), T::one()),
        (Standardization::Normal, 0) => triple(T::sqrt_ratio(2, 1), T::zero(), T::zero()),
        (Standardization::Normal, 1) => {
            triple(T::from_ratio(2, 1), T::zero(), T::sqrt_ratio(2, 1))
        }
        (Standardization::Normal, _) => triple(T::from_ratio(2, 1), T::zero(), T::one()),
    }
}

fn chebyshev2<T: Scalar>(standardization: Standardization, degree: usize) -> CoefficientTriple<T> {
    let c = |value: T| if degree == 0 { T::zero() } else { value };
    match standardization {
        Standardization::Monic => triple(T::one(), T::zero(), c(T::from_ratio(1, 4))),
        Standardization::Classical | Standardization::Normal => {
            triple(T::from_ratio(2, 1), T::zero(), c(T::one()))
        }
    }
}

fn hermite<T: Scalar>(standardization: Standardization, degree: usize) -> CoefficientTriple<T> {
    let l = big(degree);
    let two = big(2);
    match standardization {
        Standardization::Monic => triple(T::one(), T::zero(), exact(&l / &two)),
        Standardization::Classical => triple(T::from_ratio(2, 1), T::zero(), exact(&two * &l)),
        Standardization::Normal => {
            let next = &l + BigRational::one();
            triple(root(&two / &next), T::zero(), root(&l / &next))
        }
    }
}

fn laguerre<T: Scalar>(standardization: Standardization, degree: usize) -> CoefficientTriple<T> {
    let l = big(degree);
    let one = BigRational::one();
    let odd = big(2) * &l + &one;
    match standardization {
        Standardization::Monic => triple(T::one(), exact(odd), exact(&l * &l)),
        // L_n(0) = 1 already has unit norm under exp(-x)
        Standardization::Classical | Standardization::Normal => {
            let next = &l + &one;
            triple(
                exact(-one / &next),
                exact(-odd / &next),
                exact(&l / &next),
            )
        }
    }
}

fn jacobi_monic(
    alpha: &BigRational,
    beta: &BigRational,
    degree: usize,
) -> (BigRational, BigRational, BigRational) {
    let one = BigRational::one();
    let two = big(2);
    let four = big(4);
    let lq = big(degree);
    let s = alpha + beta;

    let b = if degree == 0 {
        (beta - alpha) / (&s + &two)
    } else {
        let n = &two * &lq + &s;
        (beta * beta - alpha * alpha) / (&n * (&n + &two))
    };

    let c = match degree {
        0 => BigRational::zero(),
        // (1 + alpha + beta) cancels
        1 => {
            let n = &two + &s;
            &four * (&one + alpha) * (&one + beta) / (&n * &n * (&n + &one))
        }
        _ => {
            let n = &two * &lq + &s;
            &four * &lq * (&lq + alpha) * (&lq + beta) * (&lq + &s)
                / (&n * &n * (&n + &one) * (&n - &one))
        }
    };

    (one, b, c)
}

fn jacobi_classical(
    alpha: &BigRational,
    beta: &BigRational,
    degree: usize,
) -> (BigRational, BigRational, BigRational) {
    let one = BigRational::one();
    let two = big(2);
    let lq = big(degree);
    let s = alpha + beta;

    if degree == 0 {
        // P_1 = ((alpha + beta + 2) x + (alpha - beta)) / 2
        return ((&s + &two) / &two, (beta - alpha) / &two, BigRational::zero());
    }

    let n = &two * &lq + &s;
    let lp1 = &lq + &one;
    let ls1 = &lq + &s + &one;
    let a = (&n + &one) * (&n + &two) / (&two * &lp1 * &ls1);
    let b = (&n + &one) * (beta * beta - alpha * alpha) / (&two * &lp1 * &ls1 * &n);
    let c = (&lq + alpha) * (&lq + beta) * (&n + &two) / (&lp1 * &ls1 * &n);
    (a, b, c)
}
