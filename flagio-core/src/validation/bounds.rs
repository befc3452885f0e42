//! Index and parameter bounds for flag graphs
//!
//! Pure checks on vertex indices, matrix shapes and homology parameters.

use crate::{FlagError, Result};

/// Validate that a vertex index lies in `[0, vertices)`
pub fn validate_vertex_index(
    index: usize,
    vertices: usize,
    line: Option<usize>,
) -> Result<()> {
    if index >= vertices {
        return Err(FlagError::DimensionMismatch {
            found: index,
            bound: vertices,
            line,
        });
    }
    Ok(())
}

/// Validate that a flat buffer holds exactly `nrows * ncols` cells
pub fn validate_shape(nrows: usize, ncols: usize, len: usize) -> Result<()> {
    let expected = nrows
        .checked_mul(ncols)
        .ok_or(FlagError::DimensionMismatch {
            found: len,
            bound: usize::MAX,
            line: None,
        })?;

    if expected != len {
        return Err(FlagError::DimensionMismatch {
            found: len,
            bound: expected,
            line: None,
        });
    }
    Ok(())
}

/// Validate a `[min, max)` homology dimension window
///
/// An unbounded window (`max == None`) is always valid.
pub fn validate_dimension_window(min: usize, max: Option<usize>) -> Result<()> {
    if let Some(max) = max {
        if max < min {
            return Err(FlagError::DimensionMismatch {
                found: min,
                bound: max,
                line: None,
            });
        }
    }
    Ok(())
}

/// Trial division primality test, enough for `u16` moduli
pub const fn is_prime(n: u16) -> bool {
    if n < 2 {
        return false;
    }
    let n = n as u32;
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Validate that homology coefficients come from a prime field
pub fn validate_coefficient(modulus: u16) -> Result<()> {
    if !is_prime(modulus) {
        return Err(FlagError::InvalidCoefficient(modulus));
    }
    Ok(())
}
