//! Core matrix abstraction traits for flag matrices
//!
//! This module defines the trait every matrix layout must satisfy so that
//! the codec and the normalizer never look at a concrete layout.

use alloc::boxed::Box;
use alloc::vec::Vec;

use super::element::FlagElement;
use crate::format::MatrixFormat;

/// Iterator over `(row, col, value)` cells with `row != col`
pub type OffDiagonalEntries<'a, T> = Box<dyn Iterator<Item = (usize, usize, T)> + 'a>;

/// Format-agnostic access to a flag matrix
///
/// The diagonal holds vertex weights and off-diagonal cells hold directed
/// edge weights. Dense layouts store every cell; sparse layouts only the
/// cells that were set, which may include explicit zeros.
pub trait FlagMatrix {
    /// The element type stored in this matrix
    type Element: FlagElement;

    /// Get matrix dimensions as (rows, cols)
    fn shape(&self) -> (usize, usize);

    /// Storage layout of this matrix
    fn format(&self) -> MatrixFormat;

    /// Number of stored cells, diagonal included
    fn nnz(&self) -> usize;

    /// Get the value stored at a position
    ///
    /// Returns `None` if the cell is not stored or out of bounds.
    fn get(&self, row: usize, col: usize) -> Option<Self::Element>;

    /// Main diagonal, `min(rows, cols)` long
    ///
    /// Unstored diagonal cells read as the element's implicit zero.
    fn diagonal(&self) -> Vec<Self::Element> {
        let (nrows, ncols) = self.shape();
        (0..nrows.min(ncols))
            .map(|i| self.get(i, i).unwrap_or_default())
            .collect()
    }

    /// Every stored cell off the main diagonal
    ///
    /// Order is layout-defined but stable for a given matrix.
    fn off_diagonal_entries(&self) -> OffDiagonalEntries<'_, Self::Element>;

    /// Whether the matrix has as many rows as columns
    fn is_square(&self) -> bool {
        let (nrows, ncols) = self.shape();
        nrows == ncols
    }
}
