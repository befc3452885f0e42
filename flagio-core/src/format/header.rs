//! Matrix layouts and element kinds
//!
//! The flag format itself only knows vertex and edge lines. A decoded file
//! is held in one of several matrix layouts, and the element type decides
//! whether the graph is weighted.

/// Matrix storage layouts understood by the flag codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MatrixFormat {
    /// Row-major dense grid, every cell is stored
    Dense,
    /// Coordinate (COO) format - row, col, value triplets
    Coo,
    /// Compressed Sparse Row (CSR) format
    Csr,
    /// Compressed Sparse Column (CSC) format
    Csc,
    /// List of lists, one sorted `(col, value)` list per row
    Lil,
    /// Diagonal storage, one array per stored diagonal offset
    Dia,
}

impl MatrixFormat {
    /// Every layout
    pub const ALL: [MatrixFormat; 6] = [
        MatrixFormat::Dense,
        MatrixFormat::Coo,
        MatrixFormat::Csr,
        MatrixFormat::Csc,
        MatrixFormat::Lil,
        MatrixFormat::Dia,
    ];

    /// Lowercase layout name as accepted by [`MatrixFormat::from_name`]
    pub const fn name(self) -> &'static str {
        match self {
            MatrixFormat::Dense => "dense",
            MatrixFormat::Coo => "coo",
            MatrixFormat::Csr => "csr",
            MatrixFormat::Csc => "csc",
            MatrixFormat::Lil => "lil",
            MatrixFormat::Dia => "dia",
        }
    }

    /// Look a layout up by name, case-insensitively
    pub fn from_name(name: &str) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| crate::FlagError::UnsupportedBackend {
                name: alloc::string::String::from(name),
                operation: "loading",
            })
    }

    /// Whether unstored cells exist, i.e. whether the layout is sparse
    pub const fn is_sparse(self) -> bool {
        !matches!(self, MatrixFormat::Dense)
    }
}

impl core::str::FromStr for MatrixFormat {
    type Err = crate::FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl core::fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixFormat::Dense => write!(f, "DENSE"),
            MatrixFormat::Coo => write!(f, "COO"),
            MatrixFormat::Csr => write!(f, "CSR"),
            MatrixFormat::Csc => write!(f, "CSC"),
            MatrixFormat::Lil => write!(f, "LIL"),
            MatrixFormat::Dia => write!(f, "DIA"),
        }
    }
}

/// Numeric element types of weighted graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NumericType {
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
}

impl NumericType {
    /// Whether values of this type can be NaN or infinite
    pub const fn is_float(self) -> bool {
        matches!(self, NumericType::F32 | NumericType::F64)
    }
}

impl core::fmt::Display for NumericType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NumericType::F32 => write!(f, "f32"),
            NumericType::F64 => write!(f, "f64"),
            NumericType::I32 => write!(f, "i32"),
            NumericType::I64 => write!(f, "i64"),
            NumericType::U32 => write!(f, "u32"),
            NumericType::U64 => write!(f, "u64"),
        }
    }
}

/// Whether a matrix describes an unweighted or a weighted graph
///
/// Boolean matrices are unweighted: off-diagonal `true` cells are edges and
/// the diagonal carries no information. Numeric matrices are weighted: the
/// diagonal holds vertex weights and off-diagonal cells hold edge weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphWeightKind {
    Unweighted,
    Weighted(NumericType),
}

impl GraphWeightKind {
    /// Numeric type of a weighted graph
    pub const fn numeric_type(self) -> Option<NumericType> {
        match self {
            GraphWeightKind::Unweighted => None,
            GraphWeightKind::Weighted(ty) => Some(ty),
        }
    }

    pub const fn is_weighted(self) -> bool {
        matches!(self, GraphWeightKind::Weighted(_))
    }
}

impl core::fmt::Display for GraphWeightKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GraphWeightKind::Unweighted => write!(f, "bool"),
            GraphWeightKind::Weighted(ty) => write!(f, "{ty}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        for format in MatrixFormat::ALL {
            assert_eq!(MatrixFormat::from_name(format.name()), Ok(format));
        }
        assert_eq!(MatrixFormat::from_name(" CSR "), Ok(MatrixFormat::Csr));
        assert!(matches!(
            MatrixFormat::from_name("bsr"),
            Err(crate::FlagError::UnsupportedBackend { .. })
        ));
    }

    #[test]
    fn test_sparse_flags() {
        assert!(!MatrixFormat::Dense.is_sparse());
        assert!(MatrixFormat::Lil.is_sparse());
    }

    #[test]
    fn test_weight_kind() {
        assert_eq!(GraphWeightKind::Unweighted.numeric_type(), None);
        let kind = GraphWeightKind::Weighted(NumericType::F32);
        assert!(kind.is_weighted());
        assert!(kind.numeric_type().is_some_and(NumericType::is_float));
        assert!(!NumericType::U64.is_float());
    }
}
