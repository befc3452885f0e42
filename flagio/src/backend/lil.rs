//! List-of-lists layout, the codec's construction format

use flagio_core::{
    validate_vertex_index, FlagElement, FlagError, FlagMatrix, MatrixFormat, OffDiagonalEntries,
};

use super::{CooMatrix, Matrix, Reformat};

/// One sorted `(col, value)` list per row
#[derive(Debug, Clone, PartialEq)]
pub struct LilMatrix<T> {
    ncols: usize,
    rows: Vec<Vec<(usize, T)>>,
}

impl<T: FlagElement> LilMatrix<T> {
    /// Empty matrix of the given shape
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            ncols,
            rows: vec![Vec::new(); nrows],
        }
    }

    /// Set a cell, overwriting any stored value
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), FlagError> {
        validate_vertex_index(row, self.rows.len(), None)?;
        validate_vertex_index(col, self.ncols, None)?;
        let entries = &mut self.rows[row];
        match entries.binary_search_by_key(&col, |&(c, _)| c) {
            Ok(pos) => entries[pos].1 = value,
            Err(pos) => entries.insert(pos, (col, value)),
        }
        Ok(())
    }

    /// Set the main diagonal from a slice, one value per vertex
    pub fn set_diagonal(&mut self, values: &[T]) -> Result<(), FlagError> {
        for (i, &value) in values.iter().enumerate() {
            self.set(i, i, value)?;
        }
        Ok(())
    }

    /// Stored `(col, value)` pairs of one row
    pub fn row(&self, row: usize) -> &[(usize, T)] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Stored cells in row-major order, diagonal included
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, entries)| entries.iter().map(move |&(col, value)| (row, col, value)))
    }
}

impl<T: FlagElement> FlagMatrix for LilMatrix<T> {
    type Element = T;

    fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.ncols)
    }

    fn format(&self) -> MatrixFormat {
        MatrixFormat::Lil
    }

    fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    fn get(&self, row: usize, col: usize) -> Option<T> {
        let entries = self.rows.get(row)?;
        entries
            .binary_search_by_key(&col, |&(c, _)| c)
            .ok()
            .map(|pos| entries[pos].1)
    }

    fn off_diagonal_entries(&self) -> OffDiagonalEntries<'_, T> {
        Box::new(self.entries().filter(|&(row, col, _)| row != col))
    }
}

impl<T: FlagElement> Reformat for LilMatrix<T> {
    fn to_coo(&self) -> CooMatrix<T> {
        let (nrows, ncols) = self.shape();
        let mut coo = CooMatrix::with_capacity(nrows, ncols, self.nnz());
        for (row, col, value) in self.entries() {
            coo.push_unchecked(row, col, value);
        }
        coo
    }

    fn into_matrix(self) -> Matrix<T> {
        Matrix::Lil(self)
    }
}

impl<T: FlagElement> From<&CooMatrix<T>> for LilMatrix<T> {
    fn from(coo: &CooMatrix<T>) -> Self {
        let (nrows, ncols) = coo.shape();
        let mut rows: Vec<Vec<(usize, T)>> = vec![Vec::new(); nrows];
        for (row, col, value) in coo.triplets() {
            rows[row].push((col, value));
        }
        for entries in &mut rows {
            entries.sort_unstable_by_key(|&(col, _)| col);
        }
        Self { ncols, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_rows_sorted() {
        let mut lil = LilMatrix::new(2, 4);
        lil.set(0, 3, 1.5).unwrap();
        lil.set(0, 1, 2.5).unwrap();
        lil.set(0, 3, 0.5).unwrap();
        assert_eq!(lil.row(0), &[(1, 2.5), (3, 0.5)]);
        assert!(lil.row(5).is_empty());
        assert_eq!(lil.nnz(), 2);
    }

    #[test]
    fn test_set_diagonal() {
        let mut lil = LilMatrix::new(3, 3);
        lil.set_diagonal(&[0.1, 0.0, 0.3]).unwrap();
        lil.set(2, 0, 1.0).unwrap();
        assert_eq!(lil.diagonal(), vec![0.1, 0.0, 0.3]);
        assert_eq!(lil.get(1, 1), Some(0.0));
        assert_eq!(lil.off_diagonal_entries().collect::<Vec<_>>(), vec![(2, 0, 1.0)]);
    }

    #[test]
    fn test_bounds() {
        let mut lil = LilMatrix::<bool>::new(2, 2);
        assert!(lil.set(2, 0, true).is_err());
        assert!(lil.set(0, 2, true).is_err());
        assert!(lil.set_diagonal(&[true, true, true]).is_err());
    }

    #[test]
    fn test_from_coo() {
        let coo = CooMatrix::from_triplets(2, 3, [(1, 2, 7u32), (1, 0, 5), (0, 1, 6)]).unwrap();
        let lil = LilMatrix::from(&coo);
        assert_eq!(lil.row(1), &[(0, 5), (2, 7)]);
        assert_eq!(lil.shape(), (2, 3));
    }
}
