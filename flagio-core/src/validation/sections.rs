//! Section header checks for flag files

use crate::format::constants::HEADER_PREFIX;
use crate::{FlagError, Result};

/// Check that `line` is the section header `expected`
///
/// `line` is `None` when the input ended early. Tokens are compared, so
/// surrounding and repeated whitespace is ignored.
pub fn expect_header(line: Option<&str>, line_no: usize, expected: &'static str) -> Result<()> {
    match line {
        Some(text) if text.split_whitespace().eq(expected.split_whitespace()) => Ok(()),
        _ => Err(FlagError::MalformedHeader {
            line: line_no,
            expected,
        }),
    }
}

/// Whether a line looks like any `dim <k>` section header
pub fn is_section_header(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(prefix), Some(k), None) => {
            prefix == HEADER_PREFIX && !k.is_empty() && k.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}
