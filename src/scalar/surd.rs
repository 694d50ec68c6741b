//! Exact quadratic surds.
//!
//! A [`Surd`] is a finite sum `q_1 sqrt(m_1) + q_2 sqrt(m_2) + ...` with
//! rational `q_i` and distinct square-free positive integers `m_i`. The set
//! is closed under addition, subtraction and multiplication because for
//! square-free `m`, `n` with `g = gcd(m, n)`:
//!
//! sqrt(m) sqrt(n) = g sqrt((m / g) (n / g))
//!
//! and `(m / g) (n / g)` is again square-free. Normalized orthogonal
//! polynomials at rational points take values in this set, which is what
//! makes exact evaluation of the normalized recurrences possible.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Exact algebraic number `sum q_i sqrt(m_i)`.
///
/// Terms are keyed by square-free radicand and never hold a zero
/// coefficient, so structural equality is numeric equality.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Surd {
    terms: BTreeMap<BigUint, BigRational>,
}

impl Surd {
    /// The rational `num / den`.
    ///
    /// # Panics
    /// Panics if `den` is zero.
    pub fn ratio(num: i64, den: u64) -> Self {
        Self::from(BigRational::new(BigInt::from(num), BigInt::from(den)))
    }

    /// Exact square root of a non-negative rational, `None` if negative.
    pub fn sqrt(value: &BigRational) -> Option<Self> {
        if value.is_negative() {
            return None;
        }
        let numer = value.numer().magnitude().clone();
        let denom = value.denom().magnitude().clone();
        Some(Self::sqrt_parts(numer, denom))
    }

    /// Exact `sqrt(num / den)`.
    ///
    /// # Panics
    /// Panics if `den` is zero.
    pub fn sqrt_ratio(num: u64, den: u64) -> Self {
        assert!(den != 0, "sqrt_ratio with zero denominator");
        Self::sqrt_parts(BigUint::from(num), BigUint::from(den))
    }

    // sqrt(p / q) = s_p sqrt(f_p) / (s_q sqrt(f_q)) = s_p sqrt(f_p f_q) / (s_q f_q)
    fn sqrt_parts(numer: BigUint, denom: BigUint) -> Self {
        if numer.is_zero() {
            return Self::zero();
        }
        let (s_p, f_p) = split_square(numer);
        let (s_q, f_q) = split_square(denom);
        let scale = BigRational::new(
            BigInt::from(s_p),
            BigInt::from(s_q) * BigInt::from(f_q.clone()),
        );
        Self::radical(f_p, scale) * Self::radical(f_q, BigRational::one())
    }

    // `coeff * sqrt(radicand)` with a radicand already square-free.
    fn radical(radicand: BigUint, coeff: BigRational) -> Self {
        let mut terms = BTreeMap::new();
        if !coeff.is_zero() {
            terms.insert(radicand, coeff);
        }
        Self { terms }
    }

    /// Iterate over `(radicand, coefficient)` pairs in increasing radicand order.
    pub fn terms(&self) -> impl Iterator<Item = (&BigUint, &BigRational)> {
        self.terms.iter()
    }

    /// The value as a rational, if it has no irrational part.
    pub fn to_rational(&self) -> Option<BigRational> {
        match self.terms.len() {
            0 => Some(BigRational::zero()),
            1 => self.terms.get(&BigUint::one()).cloned(),
            _ => None,
        }
    }

    /// Whether the value is rational.
    pub fn is_rational(&self) -> bool {
        self.to_rational().is_some()
    }

    /// Nearest double (each term rounded independently).
    pub fn to_f64(&self) -> f64 {
        self.terms
            .iter()
            .map(|(m, q)| {
                let coeff = q.to_f64().unwrap_or(f64::NAN);
                let root = m.to_f64().map(f64::sqrt).unwrap_or(f64::NAN);
                coeff * root
            })
            .sum()
    }

    fn accumulate(&mut self, radicand: BigUint, coeff: BigRational) {
        if coeff.is_zero() {
            return;
        }
        match self.terms.entry(radicand) {
            Entry::Occupied(mut existing) => {
                *existing.get_mut() += coeff;
                if existing.get().is_zero() {
                    existing.remove();
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(coeff);
            }
        }
    }
}

/// Split `n > 0` into `(s, f)` with `n = s^2 f` and `f` square-free.
fn split_square(mut n: BigUint) -> (BigUint, BigUint) {
    let mut square = BigUint::one();
    let mut free = BigUint::one();
    let mut d = BigUint::from(2u32);
    while &d * &d <= n {
        let mut count = 0u32;
        while (&n % &d).is_zero() {
            n /= &d;
            count += 1;
        }
        if count >= 2 {
            square *= d.pow(count / 2);
        }
        if count % 2 == 1 {
            free *= &d;
        }
        d += 1u32;
    }
    free *= n;
    (square, free)
}

impl From<BigRational> for Surd {
    fn from(value: BigRational) -> Self {
        Self::radical(BigUint::one(), value)
    }
}

impl From<BigInt> for Surd {
    fn from(value: BigInt) -> Self {
        Self::from(BigRational::from_integer(value))
    }
}

impl From<i64> for Surd {
    fn from(value: i64) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl Zero for Surd {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl One for Surd {
    fn one() -> Self {
        Self::from(BigRational::one())
    }
}

impl Add for Surd {
    type Output = Surd;

    fn add(mut self, rhs: Surd) -> Surd {
        for (m, q) in rhs.terms {
            self.accumulate(m, q);
        }
        self
    }
}

impl Sub for Surd {
    type Output = Surd;

    fn sub(self, rhs: Surd) -> Surd {
        self + (-rhs)
    }
}

impl Neg for Surd {
    type Output = Surd;

    fn neg(mut self) -> Surd {
        for q in self.terms.values_mut() {
            *q = -q.clone();
        }
        self
    }
}

impl Mul for Surd {
    type Output = Surd;

    fn mul(self, rhs: Surd) -> Surd {
        &self * &rhs
    }
}

impl<'a, 'b> Mul<&'b Surd> for &'a Surd {
    type Output = Surd;

    fn mul(self, rhs: &'b Surd) -> Surd {
        let mut out = Surd::zero();
        for (m, p) in &self.terms {
            for (n, q) in &rhs.terms {
                let g = m.gcd(n);
                let radicand = (m / &g) * (n / &g);
                let coeff = p * q * BigRational::from_integer(BigInt::from(g));
                out.accumulate(radicand, coeff);
            }
        }
        out
    }
}

impl fmt::Display for Surd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (m, q)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            if m.is_one() {
                write!(f, "{}", q)?;
            } else if q.is_one() {
                write!(f, "sqrt({})", m)?;
            } else {
                write!(f, "{}*sqrt({})", q, m)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rational(num: i64, den: i64) -> BigRational {
        BigRational::new(BigInt::from(num), BigInt::from(den))
    }

    #[test]
    fn test_split_square() {
        let cases = [(1u32, 1u32, 1u32), (12, 2, 3), (72, 6, 2), (49, 7, 1), (30, 1, 30)];
        for (n, s, f) in cases {
            let (square, free) = split_square(BigUint::from(n));
            assert_eq!(square, BigUint::from(s), "square part of {}", n);
            assert_eq!(free, BigUint::from(f), "free part of {}", n);
        }
    }

    #[test]
    fn test_sqrt_of_perfect_squares_is_rational() {
        assert_eq!(Surd::sqrt_ratio(9, 4), Surd::ratio(3, 2));
        assert_eq!(Surd::sqrt_ratio(0, 5), Surd::zero());
        assert!(Surd::sqrt_ratio(25, 1).is_rational());
        assert!(!Surd::sqrt_ratio(2, 1).is_rational());
    }

    #[test]
    fn test_sqrt_rational_canonical_form() {
        // sqrt(1/2) = (1/2) sqrt(2)
        let s = Surd::sqrt_ratio(1, 2);
        let terms: Vec<_> = s.terms().collect();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].0, &BigUint::from(2u32));
        assert_eq!(terms[0].1, &rational(1, 2));

        // sqrt(8/3) = (2/3) sqrt(6)
        let s = Surd::sqrt(&rational(8, 3)).unwrap();
        assert_eq!(s, Surd::radical(BigUint::from(6u32), rational(2, 3)));

        assert_eq!(Surd::sqrt(&rational(-1, 2)), None);
    }

    #[test]
    fn test_products_of_roots() {
        // sqrt(6) * sqrt(10) = 2 sqrt(15)
        let a = Surd::sqrt_ratio(6, 1);
        let b = Surd::sqrt_ratio(10, 1);
        assert_eq!(a * b, Surd::radical(BigUint::from(15u32), rational(2, 1)));

        // sqrt(3) * sqrt(3) = 3
        let r3 = Surd::sqrt_ratio(3, 1);
        assert_eq!(&r3 * &r3, Surd::from(3));
    }

    #[test]
    fn test_addition_cancels() {
        let r2 = Surd::sqrt_ratio(2, 1);
        let sum = r2.clone() + Surd::from(1) - r2;
        assert_eq!(sum, Surd::one());
        assert!((Surd::from(4) - Surd::from(4)).is_zero());
    }

    #[test]
    fn test_mixed_expression_matches_f64() {
        // (1 + sqrt(2)) (3 - sqrt(6)) / 2
        let x = (Surd::one() + Surd::sqrt_ratio(2, 1))
            * (Surd::from(3) - Surd::sqrt_ratio(6, 1))
            * Surd::ratio(1, 2);
        let expected = (1.0 + 2f64.sqrt()) * (3.0 - 6f64.sqrt()) / 2.0;
        assert!((x.to_f64() - expected).abs() < 1e-14);
        assert_eq!(x.terms().count(), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(Surd::zero().to_string(), "0");
        assert_eq!(Surd::ratio(-3, 4).to_string(), "-3/4");
        assert_eq!(Surd::sqrt_ratio(15, 1).to_string(), "sqrt(15)");
        assert_eq!(
            (Surd::one() + Surd::sqrt_ratio(5, 4)).to_string(),
            "1 + 1/2*sqrt(5)"
        );
    }
}
