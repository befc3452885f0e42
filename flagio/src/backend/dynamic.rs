//! Matrix whose element type is only known at runtime

use flagio_core::{FlagElement, FlagMatrix, GraphWeightKind, MatrixFormat};

use super::{Matrix, Reformat};

/// A flag matrix tagged with its element type
///
/// The normalizer matches on the tag instead of inspecting values, so
/// boolean matrices take the unweighted path and every numeric type takes
/// the weighted one.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicMatrix {
    Bool(Matrix<bool>),
    I32(Matrix<i32>),
    I64(Matrix<i64>),
    U32(Matrix<u32>),
    U64(Matrix<u64>),
    F32(Matrix<f32>),
    F64(Matrix<f64>),
}

impl DynamicMatrix {
    /// Whether the matrix is weighted, and with which numeric type
    pub fn kind(&self) -> GraphWeightKind {
        match self {
            DynamicMatrix::Bool(_) => bool::kind(),
            DynamicMatrix::I32(_) => i32::kind(),
            DynamicMatrix::I64(_) => i64::kind(),
            DynamicMatrix::U32(_) => u32::kind(),
            DynamicMatrix::U64(_) => u64::kind(),
            DynamicMatrix::F32(_) => f32::kind(),
            DynamicMatrix::F64(_) => f64::kind(),
        }
    }

    /// Get the `(rows, cols)` shape
    pub fn shape(&self) -> (usize, usize) {
        match self {
            DynamicMatrix::Bool(m) => m.shape(),
            DynamicMatrix::I32(m) => m.shape(),
            DynamicMatrix::I64(m) => m.shape(),
            DynamicMatrix::U32(m) => m.shape(),
            DynamicMatrix::U64(m) => m.shape(),
            DynamicMatrix::F32(m) => m.shape(),
            DynamicMatrix::F64(m) => m.shape(),
        }
    }

    /// Get matrix layout
    pub fn format(&self) -> MatrixFormat {
        match self {
            DynamicMatrix::Bool(m) => m.format(),
            DynamicMatrix::I32(m) => m.format(),
            DynamicMatrix::I64(m) => m.format(),
            DynamicMatrix::U32(m) => m.format(),
            DynamicMatrix::U64(m) => m.format(),
            DynamicMatrix::F32(m) => m.format(),
            DynamicMatrix::F64(m) => m.format(),
        }
    }

    /// Get the number of stored cells
    pub fn nnz(&self) -> usize {
        match self {
            DynamicMatrix::Bool(m) => m.nnz(),
            DynamicMatrix::I32(m) => m.nnz(),
            DynamicMatrix::I64(m) => m.nnz(),
            DynamicMatrix::U32(m) => m.nnz(),
            DynamicMatrix::U64(m) => m.nnz(),
            DynamicMatrix::F32(m) => m.nnz(),
            DynamicMatrix::F64(m) => m.nnz(),
        }
    }

    /// Convert to another layout, keeping the element type
    pub fn reformat(self, target: MatrixFormat) -> Self {
        match self {
            DynamicMatrix::Bool(m) => DynamicMatrix::Bool(m.reformat(target)),
            DynamicMatrix::I32(m) => DynamicMatrix::I32(m.reformat(target)),
            DynamicMatrix::I64(m) => DynamicMatrix::I64(m.reformat(target)),
            DynamicMatrix::U32(m) => DynamicMatrix::U32(m.reformat(target)),
            DynamicMatrix::U64(m) => DynamicMatrix::U64(m.reformat(target)),
            DynamicMatrix::F32(m) => DynamicMatrix::F32(m.reformat(target)),
            DynamicMatrix::F64(m) => DynamicMatrix::F64(m.reformat(target)),
        }
    }
}

macro_rules! impl_from_matrix {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Matrix<$ty>> for DynamicMatrix {
                fn from(m: Matrix<$ty>) -> Self {
                    DynamicMatrix::$variant(m)
                }
            }
        )*
    };
}

impl_from_matrix!(
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

#[cfg(test)]
mod tests {
    use flagio_core::NumericType;

    use super::*;
    use crate::backend::{CooMatrix, DenseMatrix};

    #[test]
    fn test_kind_follows_element_type() {
        let unweighted = DynamicMatrix::from(Matrix::from(DenseMatrix::<bool>::zeros(2, 2)));
        assert_eq!(unweighted.kind(), GraphWeightKind::Unweighted);

        let weighted = DynamicMatrix::from(Matrix::from(CooMatrix::<u32>::new(3, 3)));
        assert_eq!(
            weighted.kind(),
            GraphWeightKind::Weighted(NumericType::U32)
        );
        assert_eq!(weighted.shape(), (3, 3));
    }

    #[test]
    fn test_reformat_keeps_tag() {
        let coo = CooMatrix::from_triplets(2, 2, [(0, 1, 1.5f32), (1, 1, 2.0)]).unwrap();
        let m = DynamicMatrix::from(Matrix::from(coo)).reformat(MatrixFormat::Csc);
        assert!(matches!(m, DynamicMatrix::F32(_)));
        assert_eq!(m.format(), MatrixFormat::Csc);
        assert_eq!(m.nnz(), 2);
    }
}
