//! In-memory matrix layouts for flag graphs
//!
//! Every layout implements [`FlagMatrix`] so that the codec and the
//! normalizer stay layout-agnostic, and [`Reformat`] so that a matrix can be
//! converted to any other layout through a coordinate intermediate.

use flagio_core::{FlagElement, FlagMatrix, MatrixFormat, OffDiagonalEntries};

mod compressed;
mod coo;
mod dense;
mod dia;
mod dynamic;
mod lil;

pub use compressed::{CompressedAxis, CompressedMatrix};
pub use coo::CooMatrix;
pub use dense::DenseMatrix;
pub use dia::DiaMatrix;
pub use dynamic::DynamicMatrix;
pub use lil::LilMatrix;

/// Conversion between layouts
///
/// Conversions keep every stored cell, explicit zeros included, except into
/// [`MatrixFormat::Dia`] which drops zeros and into [`MatrixFormat::Dense`]
/// where unstored cells become the element's implicit zero.
pub trait Reformat: FlagMatrix + Sized {
    /// Copy of every stored cell, diagonal included
    fn to_coo(&self) -> CooMatrix<Self::Element>;

    /// Wrap this layout without conversion
    fn into_matrix(self) -> Matrix<Self::Element>;

    /// Convert to `target`; no work is done when the layout already matches
    fn reformat(self, target: MatrixFormat) -> Matrix<Self::Element> {
        if self.format() == target {
            return self.into_matrix();
        }
        Matrix::from_coo(&self.to_coo(), target)
    }
}

/// A flag matrix in any layout
#[derive(Debug, Clone, PartialEq)]
pub enum Matrix<T> {
    Dense(DenseMatrix<T>),
    Coo(CooMatrix<T>),
    Compressed(CompressedMatrix<T>),
    Lil(LilMatrix<T>),
    Dia(DiaMatrix<T>),
}

macro_rules! each_layout {
    ($matrix:expr, $m:ident => $body:expr) => {
        match $matrix {
            Matrix::Dense($m) => $body,
            Matrix::Coo($m) => $body,
            Matrix::Compressed($m) => $body,
            Matrix::Lil($m) => $body,
            Matrix::Dia($m) => $body,
        }
    };
}

impl<T: FlagElement> Matrix<T> {
    /// Build a matrix in layout `target` from coordinate data
    pub fn from_coo(coo: &CooMatrix<T>, target: MatrixFormat) -> Self {
        match target {
            MatrixFormat::Dense => {
                let (nrows, ncols) = coo.shape();
                let mut dense = DenseMatrix::zeros(nrows, ncols);
                for (row, col, value) in coo.triplets() {
                    // Coordinates come from a matrix of the same shape
                    let _ = dense.set(row, col, value);
                }
                Matrix::Dense(dense)
            }
            MatrixFormat::Coo => Matrix::Coo(coo.clone()),
            MatrixFormat::Csr => {
                Matrix::Compressed(CompressedMatrix::from_coo(coo, CompressedAxis::Row))
            }
            MatrixFormat::Csc => {
                Matrix::Compressed(CompressedMatrix::from_coo(coo, CompressedAxis::Col))
            }
            MatrixFormat::Lil => Matrix::Lil(LilMatrix::from(coo)),
            MatrixFormat::Dia => Matrix::Dia(DiaMatrix::from_coo(coo)),
        }
    }
}

impl<T: FlagElement> FlagMatrix for Matrix<T> {
    type Element = T;

    fn shape(&self) -> (usize, usize) {
        each_layout!(self, m => m.shape())
    }

    fn format(&self) -> MatrixFormat {
        each_layout!(self, m => m.format())
    }

    fn nnz(&self) -> usize {
        each_layout!(self, m => m.nnz())
    }

    fn get(&self, row: usize, col: usize) -> Option<T> {
        each_layout!(self, m => m.get(row, col))
    }

    fn diagonal(&self) -> Vec<T> {
        each_layout!(self, m => m.diagonal())
    }

    fn off_diagonal_entries(&self) -> OffDiagonalEntries<'_, T> {
        each_layout!(self, m => m.off_diagonal_entries())
    }
}

impl<T: FlagElement> Reformat for Matrix<T> {
    fn to_coo(&self) -> CooMatrix<T> {
        each_layout!(self, m => m.to_coo())
    }

    fn into_matrix(self) -> Matrix<T> {
        self
    }
}

macro_rules! impl_from_layout {
    ($($layout:ident => $variant:ident),* $(,)?) => {
        $(
            impl<T> From<$layout<T>> for Matrix<T> {
                fn from(m: $layout<T>) -> Self {
                    Matrix::$variant(m)
                }
            }
        )*
    };
}

impl_from_layout!(
    DenseMatrix => Dense,
    CooMatrix => Coo,
    CompressedMatrix => Compressed,
    LilMatrix => Lil,
    DiaMatrix => Dia,
);
