//! Parsing utilities for flag file tokens
//!
//! This module provides pure parsing functions for the numeric tokens of a
//! `.flag` file with no I/O dependencies.

use alloc::string::String;

use crate::{FlagElement, FlagError, Result};

/// Parse a vertex index token
///
/// Plain integers are accepted, and so are integral floats such as
/// `2.000000000000000000e+00` which older writers produce.
pub fn parse_index(token: &str, line: usize) -> Result<usize> {
    if let Ok(index) = token.parse::<usize>() {
        return Ok(index);
    }

    match token.parse::<f64>() {
        Ok(value) if value >= 0.0 && value.fract() == 0.0 && value <= usize::MAX as f64 => {
            Ok(value as usize)
        }
        _ => Err(FlagError::Parse {
            line,
            token: String::from(token),
            expected: "vertex index",
        }),
    }
}

/// Parse a weight token into the matrix element type
///
/// A missing token is reported with an empty `token` field.
pub fn parse_weight<T: FlagElement>(
    token: Option<&str>,
    line: usize,
    expected: &'static str,
) -> Result<T> {
    let token = token.ok_or(FlagError::Parse {
        line,
        token: String::new(),
        expected,
    })?;

    T::parse_token(token).ok_or_else(|| FlagError::Parse {
        line,
        token: String::from(token),
        expected,
    })
}
