//! Polynomial family and standardization identifiers.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use crate::error::{OrthoError, Result};

/// Scale convention of a polynomial sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Standardization {
    /// Unit leading coefficient.
    Monic,
    /// Unit norm under the family's weight.
    Normal,
    /// The textbook scaling: P_n(1) = 1 for Legendre and Jacobi, T_n and U_n
    /// for Chebyshev, physicists' H_n, and L_n(0) = 1 for Laguerre.
    Classical,
}

impl Standardization {
    /// Name accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Standardization::Monic => "monic",
            Standardization::Normal => "normal",
            Standardization::Classical => "classical",
        }
    }
}

impl FromStr for Standardization {
    type Err = OrthoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monic" => Ok(Standardization::Monic),
            "normal" => Ok(Standardization::Normal),
            "classical" | "p(1)=1" | "physicist" => Ok(Standardization::Classical),
            _ => Err(OrthoError::unsupported_standardization("any family", s)),
        }
    }
}

impl fmt::Display for Standardization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classical orthogonal polynomial family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Family {
    /// Weight 1 on [-1, 1].
    Legendre,
    /// Weight (1 - x)^alpha (1 + x)^beta on [-1, 1], alpha, beta > -1.
    Jacobi { alpha: BigRational, beta: BigRational },
    /// Chebyshev polynomials of the first kind, weight 1 / sqrt(1 - x^2).
    Chebyshev1,
    /// Chebyshev polynomials of the second kind, weight sqrt(1 - x^2).
    Chebyshev2,
    /// Weight exp(-x^2) on the real line.
    Hermite,
    /// Weight exp(-x) on [0, inf).
    Laguerre,
}

impl Family {
    /// Jacobi family with validated parameters.
    pub fn jacobi(alpha: BigRational, beta: BigRational) -> Result<Self> {
        let family = Family::Jacobi { alpha, beta };
        family.validate()?;
        Ok(family)
    }

    /// Jacobi family from integer ratios `alpha = a.0 / a.1`, `beta = b.0 / b.1`.
    ///
    /// # Panics
    /// Panics if a denominator is zero.
    pub fn jacobi_ratio(alpha: (i64, i64), beta: (i64, i64)) -> Result<Self> {
        Self::jacobi(
            BigRational::new(BigInt::from(alpha.0), BigInt::from(alpha.1)),
            BigRational::new(BigInt::from(beta.0), BigInt::from(beta.1)),
        )
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Family::Legendre => "legendre",
            Family::Jacobi { .. } => "jacobi",
            Family::Chebyshev1 => "chebyshev1",
            Family::Chebyshev2 => "chebyshev2",
            Family::Hermite => "hermite",
            Family::Laguerre => "laguerre",
        }
    }

    /// Check family parameters.
    pub fn validate(&self) -> Result<()> {
        if let Family::Jacobi { alpha, beta } = self {
            let bound = -BigRational::one();
            if *alpha <= bound || *beta <= bound {
                return Err(OrthoError::InvalidParameter(format!(
                    "Jacobi parameters must exceed -1, got alpha = {}, beta = {}",
                    alpha, beta
                )));
            }
        }
        Ok(())
    }
}

impl FromStr for Family {
    type Err = OrthoError;

    /// Parse a parameterless family name. Jacobi needs [`Family::jacobi`].
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legendre" => Ok(Family::Legendre),
            "chebyshev1" | "chebyshev-t" => Ok(Family::Chebyshev1),
            "chebyshev2" | "chebyshev-u" => Ok(Family::Chebyshev2),
            "hermite" => Ok(Family::Hermite),
            "laguerre" => Ok(Family::Laguerre),
            "jacobi" => Err(OrthoError::UnsupportedFamily(
                "jacobi (needs alpha and beta)".to_string(),
            )),
            _ => Err(OrthoError::UnsupportedFamily(s.to_string())),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Jacobi { alpha, beta } => write!(f, "jacobi({}, {})", alpha, beta),
            other => f.write_str(other.name()),
        }
    }
}
