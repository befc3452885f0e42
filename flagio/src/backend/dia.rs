//! Diagonal storage layout

use flagio_core::{FlagElement, FlagMatrix, MatrixFormat, OffDiagonalEntries};
use hashbrown::HashMap;

use super::{CooMatrix, Matrix, Reformat};

/// Matrix stored as whole diagonals
///
/// `data[k][col]` holds cell `(col - offsets[k], col)`. Slots outside the
/// matrix and slots holding the implicit zero are padding and are never
/// reported, so explicit zeros do not survive this layout.
#[derive(Debug, Clone, PartialEq)]
pub struct DiaMatrix<T> {
    nrows: usize,
    ncols: usize,
    offsets: Vec<isize>,
    data: Vec<Vec<T>>,
}

impl<T: FlagElement> DiaMatrix<T> {
    /// Pack the stored cells of a coordinate matrix by diagonal
    pub fn from_coo(coo: &CooMatrix<T>) -> Self {
        let (nrows, ncols) = coo.shape();
        let mut slots: HashMap<isize, usize> = HashMap::new();
        let mut offsets = Vec::new();
        let mut data: Vec<Vec<T>> = Vec::new();

        for (row, col, value) in coo.triplets() {
            let offset = col as isize - row as isize;
            let slot = *slots.entry(offset).or_insert_with(|| {
                offsets.push(offset);
                data.push(vec![T::default(); ncols]);
                offsets.len() - 1
            });
            data[slot][col] = value;
        }

        // Keep diagonals in ascending offset order
        let mut diagonals: Vec<(isize, Vec<T>)> = offsets.into_iter().zip(data).collect();
        diagonals.sort_unstable_by_key(|&(offset, _)| offset);
        let (offsets, data) = diagonals.into_iter().unzip();

        Self {
            nrows,
            ncols,
            offsets,
            data,
        }
    }

    /// Stored diagonal offsets, `col - row`
    pub fn offsets(&self) -> &[isize] {
        &self.offsets
    }

    fn row_of(&self, offset: isize, col: usize) -> Option<usize> {
        let row = col as isize - offset;
        (row >= 0 && (row as usize) < self.nrows).then_some(row as usize)
    }

    /// Present cells along every stored diagonal
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.offsets
            .iter()
            .zip(&self.data)
            .flat_map(move |(&offset, values)| {
                values.iter().enumerate().filter_map(move |(col, &value)| {
                    let row = self.row_of(offset, col)?;
                    value.is_present().then_some((row, col, value))
                })
            })
    }
}

impl<T: FlagElement> FlagMatrix for DiaMatrix<T> {
    type Element = T;

    fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn format(&self) -> MatrixFormat {
        MatrixFormat::Dia
    }

    fn nnz(&self) -> usize {
        self.entries().count()
    }

    fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        let offset = col as isize - row as isize;
        let slot = self.offsets.binary_search(&offset).ok()?;
        let value = self.data[slot][col];
        value.is_present().then_some(value)
    }

    fn off_diagonal_entries(&self) -> OffDiagonalEntries<'_, T> {
        Box::new(self.entries().filter(|&(row, col, _)| row != col))
    }
}

impl<T: FlagElement> Reformat for DiaMatrix<T> {
    fn to_coo(&self) -> CooMatrix<T> {
        let mut coo = CooMatrix::new(self.nrows, self.ncols);
        for (row, col, value) in self.entries() {
            coo.push_unchecked(row, col, value);
        }
        coo
    }

    fn into_matrix(self) -> Matrix<T> {
        Matrix::Dia(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packs_by_offset() {
        let coo = CooMatrix::from_triplets(
            3,
            3,
            [(0, 1, 2.0), (1, 2, 3.0), (0, 0, 1.0), (2, 0, 9.0)],
        )
        .unwrap();
        let dia = DiaMatrix::from_coo(&coo);
        assert_eq!(dia.offsets(), &[-2, 0, 1]);
        assert_eq!(dia.get(1, 2), Some(3.0));
        assert_eq!(dia.get(2, 0), Some(9.0));
        assert_eq!(dia.get(1, 0), None);
        assert_eq!(dia.diagonal(), vec![1.0, 0.0, 0.0]);

        let mut off: Vec<_> = dia.off_diagonal_entries().collect();
        off.sort_by_key(|&(r, c, _)| (r, c));
        assert_eq!(off, vec![(0, 1, 2.0), (1, 2, 3.0), (2, 0, 9.0)]);
    }

    #[test]
    fn test_explicit_zero_is_dropped() {
        let coo = CooMatrix::from_triplets(2, 2, [(0, 1, 0i64), (1, 0, 4)]).unwrap();
        let dia = DiaMatrix::from_coo(&coo);
        assert_eq!(dia.nnz(), 1);
        assert_eq!(dia.get(0, 1), None);
    }

    #[test]
    fn test_rectangular() {
        let coo = CooMatrix::from_triplets(2, 4, [(1, 3, true), (0, 0, true)]).unwrap();
        let dia = DiaMatrix::from_coo(&coo);
        assert_eq!(dia.shape(), (2, 4));
        assert_eq!(
            dia.off_diagonal_entries().collect::<Vec<_>>(),
            vec![(1, 3, true)]
        );
    }
}
