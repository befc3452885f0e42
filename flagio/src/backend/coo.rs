//! Coordinate (triplet) layout

use flagio_core::{
    validate_vertex_index, FlagElement, FlagError, FlagMatrix, MatrixFormat, OffDiagonalEntries,
};
use hashbrown::HashMap;

use super::{Matrix, Reformat};

/// Coordinate matrix with at most one triplet per cell
///
/// Setting a cell twice overwrites the earlier value in place, so triplet
/// order is first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct CooMatrix<T> {
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<T>,
    positions: HashMap<(usize, usize), usize>,
}

impl<T: FlagElement> CooMatrix<T> {
    /// Empty matrix of the given shape
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self::with_capacity(nrows, ncols, 0)
    }

    pub fn with_capacity(nrows: usize, ncols: usize, capacity: usize) -> Self {
        Self {
            nrows,
            ncols,
            rows: Vec::with_capacity(capacity),
            cols: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Build from triplets; repeated cells keep the last value
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, T)>,
    ) -> Result<Self, FlagError> {
        let triplets = triplets.into_iter();
        let mut coo = Self::with_capacity(nrows, ncols, triplets.size_hint().0);
        for (row, col, value) in triplets {
            coo.push(row, col, value)?;
        }
        Ok(coo)
    }

    /// Set a cell, overwriting any stored value
    pub fn push(&mut self, row: usize, col: usize, value: T) -> Result<(), FlagError> {
        validate_vertex_index(row, self.nrows, None)?;
        validate_vertex_index(col, self.ncols, None)?;
        self.push_unchecked(row, col, value);
        Ok(())
    }

    /// `push` for coordinates already known to be in bounds
    pub(crate) fn push_unchecked(&mut self, row: usize, col: usize, value: T) {
        match self.positions.get(&(row, col)) {
            Some(&slot) => self.values[slot] = value,
            None => {
                self.positions.insert((row, col), self.values.len());
                self.rows.push(row);
                self.cols.push(col);
                self.values.push(value);
            }
        }
    }

    /// Stored cells in insertion order, diagonal included
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .map(|((&row, &col), &value)| (row, col, value))
    }

    /// Whether a cell is stored, whatever its value
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.positions.contains_key(&(row, col))
    }
}

impl<T: PartialEq> PartialEq for CooMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.nrows == other.nrows
            && self.ncols == other.ncols
            && self.rows == other.rows
            && self.cols == other.cols
            && self.values == other.values
    }
}

impl<T: FlagElement> FlagMatrix for CooMatrix<T> {
    type Element = T;

    fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn format(&self) -> MatrixFormat {
        MatrixFormat::Coo
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn get(&self, row: usize, col: usize) -> Option<T> {
        self.positions
            .get(&(row, col))
            .map(|&slot| self.values[slot])
    }

    fn off_diagonal_entries(&self) -> OffDiagonalEntries<'_, T> {
        Box::new(self.triplets().filter(|&(row, col, _)| row != col))
    }
}

impl<T: FlagElement> Reformat for CooMatrix<T> {
    fn to_coo(&self) -> CooMatrix<T> {
        self.clone()
    }

    fn into_matrix(self) -> Matrix<T> {
        Matrix::Coo(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let coo = CooMatrix::from_triplets(3, 3, [(0, 1, 0.5), (1, 2, 0.25), (0, 1, 0.75)])
            .unwrap();
        assert_eq!(coo.nnz(), 2);
        assert_eq!(coo.get(0, 1), Some(0.75));
        let triplets: Vec<_> = coo.triplets().collect();
        assert_eq!(triplets, vec![(0, 1, 0.75), (1, 2, 0.25)]);
    }

    #[test]
    fn test_explicit_zero_is_stored() {
        let mut coo = CooMatrix::new(2, 2);
        coo.push(1, 0, 0.0f64).unwrap();
        assert!(coo.contains(1, 0));
        assert!(!coo.contains(0, 1));
        assert_eq!(coo.off_diagonal_entries().collect::<Vec<_>>(), vec![(1, 0, 0.0)]);
    }

    #[test]
    fn test_diagonal_excluded_from_entries() {
        let coo = CooMatrix::from_triplets(2, 2, [(0, 0, 3), (1, 1, 4), (0, 1, 5)]).unwrap();
        assert_eq!(coo.diagonal(), vec![3, 4]);
        assert_eq!(coo.off_diagonal_entries().collect::<Vec<_>>(), vec![(0, 1, 5)]);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut coo = CooMatrix::<bool>::new(2, 2);
        assert!(matches!(
            coo.push(0, 2, true),
            Err(FlagError::DimensionMismatch { found: 2, bound: 2, .. })
        ));
    }
}
