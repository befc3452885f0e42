//! Number formatting for weight tokens

use alloc::string::String;
use core::fmt::Write;

use super::constants::{EXPONENT_DIGITS, FLOAT_PRECISION};

/// Append `value` in C `%.18e` style, e.g. `1.500000000000000000e-01`
///
/// Non-finite values are written as `nan`, `inf` and `-inf`.
pub fn write_scientific(value: f64, out: &mut String) {
    if value.is_nan() {
        out.push_str("nan");
        return;
    }
    if value.is_infinite() {
        out.push_str(if value > 0.0 { "inf" } else { "-inf" });
        return;
    }

    let start = out.len();
    // Writing into a String cannot fail
    let _ = write!(out, "{:.*e}", FLOAT_PRECISION, value);

    // Rust renders the exponent as `e-1`; rewrite it as `e-01`
    let Some(e_pos) = out[start..].find('e').map(|p| start + p) else {
        return;
    };
    let exponent = &out[e_pos + 1..];
    let (negative, digits) = match exponent.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, exponent),
    };
    let padding = EXPONENT_DIGITS.saturating_sub(digits.len());
    let mut rewritten = String::with_capacity(2 + padding + digits.len());
    rewritten.push(if negative { '-' } else { '+' });
    for _ in 0..padding {
        rewritten.push('0');
    }
    rewritten.push_str(digits);
    out.truncate(e_pos + 1);
    out.push_str(&rewritten);
}
