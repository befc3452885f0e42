//! Matrix element type constraints for flag matrices
//!
//! This module defines the trait that constrains what types can be stored
//! in a flag matrix, and how each of them reads and writes weight tokens.

use alloc::string::String;
use core::fmt::Write;

use crate::format::{write_scientific, GraphWeightKind, NumericType};

/// Trait for types that can be stored as flag matrix elements
///
/// `bool` describes unweighted graphs; the numeric types describe weighted
/// ones. `Default` is the implicit zero of sparse layouts.
pub trait FlagElement:
    Copy + PartialEq + Default + core::fmt::Debug + Send + Sync + 'static
{
    /// Whether a matrix of this element type is weighted, and how
    fn kind() -> GraphWeightKind;

    /// Convert from f64, saturating like an `as` cast
    fn from_f64(value: f64) -> Self;

    /// Convert to f64, the value type handed to the homology engine
    fn to_f64(self) -> f64;

    /// Whether the value marks a present cell (nonzero or `true`)
    fn is_present(self) -> bool {
        self != Self::default()
    }

    /// Whether the value is a usable weight; only floats can fail this
    fn is_finite(self) -> bool {
        true
    }

    /// Parse a vertex or edge weight token
    fn parse_token(token: &str) -> Option<Self>;

    /// Append the token written to `.flag` files for this value
    fn write_token(self, out: &mut String);
}

impl FlagElement for bool {
    fn kind() -> GraphWeightKind {
        GraphWeightKind::Unweighted
    }

    fn from_f64(value: f64) -> Self {
        value != 0.0
    }

    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }

    fn parse_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("true") {
            return Some(true);
        }
        if token.eq_ignore_ascii_case("false") {
            return Some(false);
        }
        token.parse::<f64>().ok().map(|v| v != 0.0)
    }

    fn write_token(self, out: &mut String) {
        write_scientific(self.to_f64(), out);
    }
}

impl FlagElement for f32 {
    fn kind() -> GraphWeightKind {
        GraphWeightKind::Weighted(NumericType::F32)
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }

    fn parse_token(token: &str) -> Option<Self> {
        token.parse::<f32>().ok()
    }

    fn write_token(self, out: &mut String) {
        write_scientific(self as f64, out);
    }
}

impl FlagElement for f64 {
    fn kind() -> GraphWeightKind {
        GraphWeightKind::Weighted(NumericType::F64)
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    fn parse_token(token: &str) -> Option<Self> {
        token.parse::<f64>().ok()
    }

    fn write_token(self, out: &mut String) {
        write_scientific(self, out);
    }
}

// Integer tokens are read exactly when possible, otherwise through f64 so
// that files written with float formatting still load. The f64 must be
// integral and in range.
macro_rules! impl_integer_element {
    ($($ty:ty => $numeric:ident),* $(,)?) => {
        $(
            impl FlagElement for $ty {
                fn kind() -> GraphWeightKind {
                    GraphWeightKind::Weighted(NumericType::$numeric)
                }

                fn from_f64(value: f64) -> Self {
                    value as $ty
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn parse_token(token: &str) -> Option<Self> {
                    token.parse::<$ty>().ok().or_else(|| {
                        let v = token.parse::<f64>().ok()?;
                        // MAX + 1.0 is the exact exclusive bound for every width
                        let in_range = v >= <$ty>::MIN as f64 && v < <$ty>::MAX as f64 + 1.0;
                        (in_range && (v as $ty) as f64 == v).then_some(v as $ty)
                    })
                }

                fn write_token(self, out: &mut String) {
                    let _ = write!(out, "{self}");
                }
            }
        )*
    };
}

impl_integer_element!(
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn token<T: FlagElement>(value: T) -> String {
        let mut out = String::new();
        value.write_token(&mut out);
        out
    }

    #[test]
    fn test_kinds() {
        assert_eq!(bool::kind(), GraphWeightKind::Unweighted);
        assert_eq!(f64::kind(), GraphWeightKind::Weighted(NumericType::F64));
        assert_eq!(u32::kind(), GraphWeightKind::Weighted(NumericType::U32));
    }

    #[test]
    fn test_bool_tokens() {
        assert_eq!(bool::parse_token("1"), Some(true));
        assert_eq!(bool::parse_token("0.000e+00"), Some(false));
        assert_eq!(bool::parse_token("True"), Some(true));
        assert_eq!(bool::parse_token("yes"), None);
        assert_eq!(token(true), "1.000000000000000000e+00");
    }

    #[test]
    fn test_integer_tokens() {
        assert_eq!(i64::parse_token("9007199254740993"), Some(9007199254740993));
        assert_eq!(i32::parse_token("2.000000000000000000e+00"), Some(2));
        assert_eq!(u32::parse_token("nan"), None);
        assert_eq!(u64::parse_token("x"), None);
        assert_eq!(i32::parse_token("1.5"), None);
        assert_eq!(u32::parse_token("-3"), None);
        assert_eq!(u32::parse_token("-3.0e+00"), None);
        assert_eq!(i32::parse_token("1e20"), None);
        assert_eq!(i32::parse_token("-2.147483648e+09"), Some(i32::MIN));
        assert_eq!(i32::parse_token("2.147483648e+09"), None);
        assert_eq!(u64::parse_token("1.8446744073709552e19"), None);
        assert_eq!(i64::parse_token("inf"), None);
        assert_eq!(token(-7i32), "-7");
    }

    #[test]
    fn test_float_presence() {
        assert!(!0.0f64.is_present());
        assert!(f64::NAN.is_present());
        assert!(!FlagElement::is_finite(f64::INFINITY));
        assert!(FlagElement::is_finite(3i32));
    }
}
