//! Filtration thresholds
//!
//! Edges heavier than the threshold have not yet appeared in the
//! filtration and are dropped from the edge list.

use crate::format::NumericType;

/// Maximum edge weight kept in a filtration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Threshold {
    Finite(f64),
    Infinite,
}

impl Threshold {
    /// Threshold from an optional user value; `+inf` maps to [`Threshold::Infinite`]
    pub fn from_max_weight(max_edge_weight: Option<f64>) -> Option<Self> {
        max_edge_weight.map(|w| {
            if w == f64::INFINITY {
                Threshold::Infinite
            } else {
                Threshold::Finite(w)
            }
        })
    }

    /// Whether `weight` is at or below the threshold
    ///
    /// NaN is never admitted.
    pub fn admits(self, weight: f64) -> bool {
        match self {
            Threshold::Finite(max) => weight <= max,
            Threshold::Infinite => !weight.is_nan(),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Threshold::Finite(max) => max,
            Threshold::Infinite => f64::INFINITY,
        }
    }
}

/// Threshold used when the caller supplies none
///
/// Integer types admit everything up to their largest value, floating point
/// types admit every finite value.
pub fn default_threshold(ty: NumericType) -> Threshold {
    match ty {
        NumericType::F32 | NumericType::F64 => Threshold::Infinite,
        NumericType::I32 => Threshold::Finite(i32::MAX as f64),
        NumericType::I64 => Threshold::Finite(i64::MAX as f64),
        NumericType::U32 => Threshold::Finite(u32::MAX as f64),
        NumericType::U64 => Threshold::Finite(u64::MAX as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(default_threshold(NumericType::F64), Threshold::Infinite);
        assert_eq!(default_threshold(NumericType::F32), Threshold::Infinite);
        assert_eq!(
            default_threshold(NumericType::I32),
            Threshold::Finite(2147483647.0)
        );
        // Every value of the type is admitted by its own default
        assert!(default_threshold(NumericType::I64).admits(i64::MAX as f64));
        assert!(default_threshold(NumericType::U64).admits(u64::MAX as f64));
    }

    #[test]
    fn test_admits() {
        let t = Threshold::Finite(0.3);
        assert!(t.admits(0.3));
        assert!(!t.admits(0.5));
        assert!(!t.admits(f64::NAN));
        assert!(Threshold::Infinite.admits(1e300));
        assert!(!Threshold::Infinite.admits(f64::NAN));
    }

    #[test]
    fn test_from_max_weight() {
        assert_eq!(Threshold::from_max_weight(None), None);
        assert_eq!(
            Threshold::from_max_weight(Some(f64::INFINITY)),
            Some(Threshold::Infinite)
        );
        assert_eq!(
            Threshold::from_max_weight(Some(0.1)),
            Some(Threshold::Finite(0.1))
        );
    }
}
