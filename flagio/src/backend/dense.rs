//! Row-major dense grid

use flagio_core::{
    validate_shape, validate_vertex_index, FlagElement, FlagError, FlagMatrix, MatrixFormat,
    OffDiagonalEntries,
};

use super::{CooMatrix, Matrix, Reformat};

/// Dense matrix; every cell is stored, zeros included
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

impl<T: FlagElement> DenseMatrix<T> {
    /// Matrix filled with the implicit zero
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            data: vec![T::default(); nrows * ncols],
        }
    }

    /// Wrap a row-major buffer of `nrows * ncols` cells
    pub fn from_shape_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self, FlagError> {
        validate_shape(nrows, ncols, data.len())?;
        Ok(Self { nrows, ncols, data })
    }

    /// Build from nested rows; all rows must have the same length
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, FlagError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(FlagError::DimensionMismatch {
                    found: row.len(),
                    bound: ncols,
                    line: None,
                });
            }
            data.extend(row);
        }
        Ok(Self { nrows, ncols, data })
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Row-major cells
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Overwrite one cell
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), FlagError> {
        validate_vertex_index(row, self.nrows, None)?;
        validate_vertex_index(col, self.ncols, None)?;
        self.data[row * self.ncols + col] = value;
        Ok(())
    }
}

impl<T: FlagElement> FlagMatrix for DenseMatrix<T> {
    type Element = T;

    fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn format(&self) -> MatrixFormat {
        MatrixFormat::Dense
    }

    fn nnz(&self) -> usize {
        self.data.len()
    }

    fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        Some(self.data[row * self.ncols + col])
    }

    fn diagonal(&self) -> Vec<T> {
        (0..self.nrows.min(self.ncols))
            .map(|i| self.data[i * self.ncols + i])
            .collect()
    }

    fn off_diagonal_entries(&self) -> OffDiagonalEntries<'_, T> {
        let ncols = self.ncols;
        Box::new(
            self.data
                .iter()
                .enumerate()
                .map(move |(k, &value)| (k / ncols, k % ncols, value))
                .filter(|&(row, col, _)| row != col),
        )
    }
}

impl<T: FlagElement> Reformat for DenseMatrix<T> {
    fn to_coo(&self) -> CooMatrix<T> {
        let mut coo = CooMatrix::with_capacity(self.nrows, self.ncols, self.data.len());
        for (k, &value) in self.data.iter().enumerate() {
            coo.push_unchecked(k / self.ncols, k % self.ncols, value);
        }
        coo
    }

    fn into_matrix(self) -> Matrix<T> {
        Matrix::Dense(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DenseMatrix<f64> {
        DenseMatrix::from_rows(vec![
            vec![0.1, 0.5, 0.0],
            vec![0.0, 0.2, 0.7],
            vec![0.0, 0.0, 0.3],
        ])
        .unwrap()
    }

    #[test]
    fn test_diagonal_and_get() {
        let m = sample();
        assert_eq!(m.diagonal(), vec![0.1, 0.2, 0.3]);
        assert_eq!(m.get(1, 2), Some(0.7));
        assert_eq!(m.get(3, 0), None);
        assert_eq!(m.nnz(), 9);
    }

    #[test]
    fn test_off_diagonal_yields_every_cell() {
        let entries: Vec<_> = sample().off_diagonal_entries().collect();
        assert_eq!(entries.len(), 6);
        assert!(entries.iter().all(|&(r, c, _)| r != c));
        assert!(entries.contains(&(1, 0, 0.0)));
    }

    #[test]
    fn test_shape_errors() {
        assert!(DenseMatrix::<i32>::from_shape_vec(2, 2, vec![1, 2, 3]).is_err());
        assert!(DenseMatrix::from_rows(vec![vec![true, false], vec![true]]).is_err());
        let mut m = DenseMatrix::<bool>::zeros(2, 3);
        assert!(m.set(1, 2, true).is_ok());
        assert!(m.set(2, 0, true).is_err());
        assert_eq!(m.get(1, 2), Some(true));
    }

    #[test]
    fn test_non_square_diagonal() {
        let m = DenseMatrix::from_shape_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert!(!m.is_square());
        assert_eq!(m.diagonal(), vec![1, 5]);
        assert_eq!(m.off_diagonal_entries().count(), 4);
    }
}
