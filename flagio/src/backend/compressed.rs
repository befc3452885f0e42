//! Compressed sparse row / column layouts

use flagio_core::{FlagElement, FlagError, FlagMatrix, MatrixFormat, OffDiagonalEntries};

use super::{CooMatrix, Matrix, Reformat};

/// Which axis is compressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressedAxis {
    /// CSR: `indptr` runs over rows, `indices` hold columns
    Row,
    /// CSC: `indptr` runs over columns, `indices` hold rows
    Col,
}

/// CSR or CSC matrix with sorted minor indices
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedMatrix<T> {
    axis: CompressedAxis,
    nrows: usize,
    ncols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: FlagElement> CompressedMatrix<T> {
    /// Empty matrix of the given shape
    pub fn new(axis: CompressedAxis, nrows: usize, ncols: usize) -> Self {
        let nmajor = match axis {
            CompressedAxis::Row => nrows,
            CompressedAxis::Col => ncols,
        };
        Self {
            axis,
            nrows,
            ncols,
            indptr: vec![0; nmajor + 1],
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Validate and wrap raw compressed arrays
    ///
    /// `indptr` must have one entry per major index plus one, start at zero,
    /// never decrease and end at `indices.len()`. Minor indices must be in
    /// bounds and strictly increasing within each major slice.
    pub fn from_raw_parts(
        axis: CompressedAxis,
        nrows: usize,
        ncols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self, FlagError> {
        let (nmajor, nminor) = match axis {
            CompressedAxis::Row => (nrows, ncols),
            CompressedAxis::Col => (ncols, nrows),
        };
        let mismatch = |found, bound| FlagError::DimensionMismatch {
            found,
            bound,
            line: None,
        };

        if indptr.len() != nmajor + 1 {
            return Err(mismatch(indptr.len(), nmajor + 1));
        }
        if values.len() != indices.len() {
            return Err(mismatch(values.len(), indices.len()));
        }
        if indptr[0] != 0 || indptr[nmajor] != indices.len() {
            return Err(mismatch(indptr[nmajor], indices.len()));
        }
        if let Some(window) = indptr.windows(2).find(|w| w[1] < w[0]) {
            return Err(mismatch(window[0], window[1]));
        }
        // Monotone offsets ending at indices.len() keep every slice in range
        for window in indptr.windows(2) {
            let slice = &indices[window[0]..window[1]];
            if let Some(&bad) = slice.iter().find(|&&minor| minor >= nminor) {
                return Err(mismatch(bad, nminor));
            }
            if let Some(pair) = slice.windows(2).find(|pair| pair[1] <= pair[0]) {
                return Err(mismatch(pair[1], pair[0]));
            }
        }

        Ok(Self {
            axis,
            nrows,
            ncols,
            indptr,
            indices,
            values,
        })
    }

    /// Compress a coordinate matrix along `axis`
    pub fn from_coo(coo: &CooMatrix<T>, axis: CompressedAxis) -> Self {
        let (nrows, ncols) = coo.shape();
        let nmajor = match axis {
            CompressedAxis::Row => nrows,
            CompressedAxis::Col => ncols,
        };
        let split = |row: usize, col: usize| match axis {
            CompressedAxis::Row => (row, col),
            CompressedAxis::Col => (col, row),
        };

        // Counting sort on the major index
        let mut indptr = vec![0usize; nmajor + 1];
        for (row, col, _) in coo.triplets() {
            indptr[split(row, col).0 + 1] += 1;
        }
        for major in 0..nmajor {
            indptr[major + 1] += indptr[major];
        }

        let nnz = coo.nnz();
        let mut next = indptr.clone();
        let mut indices = vec![0usize; nnz];
        let mut values = vec![T::default(); nnz];
        for (row, col, value) in coo.triplets() {
            let (major, minor) = split(row, col);
            let slot = next[major];
            indices[slot] = minor;
            values[slot] = value;
            next[major] += 1;
        }

        // Sort minor indices inside each major slice
        for major in 0..nmajor {
            let range = indptr[major]..indptr[major + 1];
            let mut slice: Vec<(usize, T)> = indices[range.clone()]
                .iter()
                .copied()
                .zip(values[range.clone()].iter().copied())
                .collect();
            slice.sort_unstable_by_key(|&(minor, _)| minor);
            for (offset, (minor, value)) in slice.into_iter().enumerate() {
                indices[range.start + offset] = minor;
                values[range.start + offset] = value;
            }
        }

        Self {
            axis,
            nrows,
            ncols,
            indptr,
            indices,
            values,
        }
    }

    pub fn axis(&self) -> CompressedAxis {
        self.axis
    }

    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Stored cells in major order, diagonal included
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let axis = self.axis;
        self.indptr.windows(2).enumerate().flat_map(move |(major, window)| {
            (window[0]..window[1]).map(move |k| {
                let minor = self.indices[k];
                match axis {
                    CompressedAxis::Row => (major, minor, self.values[k]),
                    CompressedAxis::Col => (minor, major, self.values[k]),
                }
            })
        })
    }
}

impl<T: FlagElement> FlagMatrix for CompressedMatrix<T> {
    type Element = T;

    fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn format(&self) -> MatrixFormat {
        match self.axis {
            CompressedAxis::Row => MatrixFormat::Csr,
            CompressedAxis::Col => MatrixFormat::Csc,
        }
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn get(&self, row: usize, col: usize) -> Option<T> {
        let (major, minor) = match self.axis {
            CompressedAxis::Row => (row, col),
            CompressedAxis::Col => (col, row),
        };
        if major + 1 >= self.indptr.len() {
            return None;
        }
        let range = self.indptr[major]..self.indptr[major + 1];
        self.indices[range.clone()]
            .binary_search(&minor)
            .ok()
            .map(|offset| self.values[range.start + offset])
    }

    fn off_diagonal_entries(&self) -> OffDiagonalEntries<'_, T> {
        Box::new(self.entries().filter(|&(row, col, _)| row != col))
    }
}

impl<T: FlagElement> Reformat for CompressedMatrix<T> {
    fn to_coo(&self) -> CooMatrix<T> {
        let mut coo = CooMatrix::with_capacity(self.nrows, self.ncols, self.nnz());
        for (row, col, value) in self.entries() {
            coo.push_unchecked(row, col, value);
        }
        coo
    }

    fn into_matrix(self) -> Matrix<T> {
        Matrix::Compressed(self)
    }
}
