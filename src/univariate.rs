//! Univariate orthogonal polynomial evaluation.
//!
//! All families are evaluated through their three-term recurrence:
//! p_0(x) = p0, p_{k+1}(x) = (a_k x - b_k) p_k(x) - c_k p_{k-1}(x).
//! The convenience functions take the standardization by name, e.g.
//! `legendre(3, &0.5, "classical")` is P_3(0.5).

use num_rational::BigRational;

use crate::error::Result;
use crate::recurrence::{Family, Recurrence, RecurrenceFamily};
use crate::scalar::Scalar;

/// Evaluate p_0(x), ..., p_n(x).
pub fn evaluate_all<T: Scalar, R: RecurrenceFamily<T>>(x: &T, n: usize, family: &R) -> Vec<T> {
    let mut out = Vec::with_capacity(n + 1);
    out.push(family.p0());

    let mut prev = T::zero();
    for k in 0..n {
        let t = family.coefficients(k);
        let current = out[k].clone();
        let mut next = (t.a * x.clone() - t.b) * current.clone();
        if k > 0 {
            next = next - t.c * prev;
        }
        prev = current;
        out.push(next);
    }
    out
}

/// Evaluate p_k(x).
pub fn evaluate<T: Scalar, R: RecurrenceFamily<T>>(x: &T, k: usize, family: &R) -> T {
    let mut p_prev = T::zero();
    let mut p_curr = family.p0();
    for l in 0..k {
        let t = family.coefficients(l);
        let mut p_next = (t.a * x.clone() - t.b) * p_curr.clone();
        if l > 0 {
            p_next = p_next - t.c * p_prev;
        }
        p_prev = p_curr;
        p_curr = p_next;
    }
    p_curr
}

fn named<T: Scalar>(family: Family, k: usize, x: &T, standardization: &str) -> Result<T> {
    let recurrence = Recurrence::<T>::new(family, standardization.parse()?)?;
    Ok(evaluate(x, k, &recurrence))
}

/// Legendre polynomial of degree `k`.
pub fn legendre<T: Scalar>(k: usize, x: &T, standardization: &str) -> Result<T> {
    named(Family::Legendre, k, x, standardization)
}

/// Jacobi polynomial P^{(alpha, beta)}_k; `standardization` is `monic` or `classical`.
pub fn jacobi<T: Scalar>(
    k: usize,
    alpha: BigRational,
    beta: BigRational,
    x: &T,
    standardization: &str,
) -> Result<T> {
    named(Family::jacobi(alpha, beta)?, k, x, standardization)
}

/// Chebyshev polynomial of the first kind.
pub fn chebyshev1<T: Scalar>(k: usize, x: &T, standardization: &str) -> Result<T> {
    named(Family::Chebyshev1, k, x, standardization)
}

/// Chebyshev polynomial of the second kind.
pub fn chebyshev2<T: Scalar>(k: usize, x: &T, standardization: &str) -> Result<T> {
    named(Family::Chebyshev2, k, x, standardization)
}

/// Hermite polynomial (weight exp(-x^2)).
pub fn hermite<T: Scalar>(k: usize, x: &T, standardization: &str) -> Result<T> {
    named(Family::Hermite, k, x, standardization)
}

/// Laguerre polynomial (weight exp(-x)).
pub fn laguerre<T: Scalar>(k: usize, x: &T, standardization: &str) -> Result<T> {
    named(Family::Laguerre, k, x, standardization)
}
