//! Dense basis representations.
//!
//! This module provides the Vandermonde matrix of a floating-point cube tree.

mod vandermonde;

pub use vandermonde::CubeVandermonde;
