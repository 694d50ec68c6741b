//! Binomial coefficients and the simplex ordering of tensor-product modes.
//!
//! The degree-L modes of the `dim`-variate tensor basis are the weak
//! compositions of L into `dim` parts. There are `C(L + dim - 1, dim - 1)` of
//! them and the tree evaluator lays them out in descending lexicographic
//! order, e.g. for dim = 3, L = 2:
//!
//! ```text
//! (2,0,0)
//! (1,1,0) (1,0,1)
//! (0,2,0) (0,1,1) (0,0,2)
//! ```

/// Exact binomial coefficient `C(n, k)`, `None` if it overflows `u64`.
///
/// Returns `Some(0)` when `k < 0` or `k > n`.
pub fn checked_binomial(n: i64, k: i64) -> Option<u64> {
    if k < 0 || k > n {
        return Some(0);
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;

    // C(n, i + 1) = C(n, i) (n - i) / (i + 1), exact at every step and
    // non-decreasing while i < n / 2.
    let mut value: u128 = 1;
    for i in 0..k {
        value = value * (n - i) / (i + 1);
        if value > u64::MAX as u128 {
            return None;
        }
    }
    Some(value as u64)
}

/// Exact binomial coefficient `C(n, k)`; zero when `k < 0` or `k > n`.
///
/// # Panics
/// Panics if the result does not fit in a `u64`.
pub fn binomial(n: i64, k: i64) -> u64 {
    match checked_binomial(n, k) {
        Some(value) => value,
        None => panic!("C({}, {}) overflows u64", n, k),
    }
}

/// Number of weak compositions of `degree` into `dim` parts,
/// `C(degree + dim - 1, dim - 1)`, or `None` on overflow.
pub fn simplex_size(dim: usize, degree: usize) -> Option<usize> {
    if dim == 0 {
        return Some(usize::from(degree == 0));
    }
    let n = i64::try_from(degree.checked_add(dim - 1)?).ok()?;
    let k = i64::try_from(dim - 1).ok()?;
    usize::try_from(checked_binomial(n, k)?).ok()
}

/// All weak compositions of `degree` into `dim` parts, in tree order.
pub fn multi_indices(dim: usize, degree: usize) -> Vec<Vec<usize>> {
    if dim == 0 {
        return if degree == 0 { vec![Vec::new()] } else { Vec::new() };
    }
    if dim == 1 {
        return vec![vec![degree]];
    }

    let mut out = Vec::new();
    for first in (0..=degree).rev() {
        for rest in multi_indices(dim - 1, degree - first) {
            let mut alpha = Vec::with_capacity(dim);
            alpha.push(first);
            alpha.extend(rest);
            out.push(alpha);
        }
    }
    out
}

/// Position of `alpha` within its level, i.e. the inverse of [`multi_indices`].
///
/// Entries preceding `alpha` are those whose first differing component is
/// larger; counting them per component is a hockey-stick sum.
pub fn multi_index_position(alpha: &[usize]) -> usize {
    let dim = alpha.len() as i64;
    let mut remaining: usize = alpha.iter().sum();
    let mut position = 0;
    for (j, &a) in alpha.iter().enumerate().take(alpha.len().saturating_sub(1)) {
        let j = j as i64;
        let slack = (remaining - a) as i64;
        position += binomial(slack + dim - j - 2, dim - j - 1) as usize;
        remaining -= a;
    }
    position
}
