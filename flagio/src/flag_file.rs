//! `.flag` file handle
//!
//! Reading decodes the whole file and converts it to the configured layout.
//! With the `mmap` feature the file is memory-mapped instead of copied into a
//! buffer; with the `async` feature matrices can be written through tokio.

use std::fs::File;
use std::path::{Path, PathBuf};

use flagio_core::{FlagElement, FlagError, FlagMatrix, MatrixFormat};

use crate::backend::{Matrix, Reformat};
use crate::codec::{decode, encode};
use crate::{Error, Result};

/// Options for reading `.flag` files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadConfig {
    /// Layout of the returned matrix
    pub format: MatrixFormat,
    /// Memory-map the file when the `mmap` feature is enabled
    pub memory_map: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            format: MatrixFormat::Csr,
            memory_map: true,
        }
    }
}

impl LoadConfig {
    pub fn with_format(mut self, format: MatrixFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_memory_map(mut self, memory_map: bool) -> Self {
        self.memory_map = memory_map;
        self
    }
}

/// File handle for `.flag` files
///
/// The handle only stores the path; every read or write opens the file and
/// closes it before returning, whatever the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagFile {
    path: PathBuf,
}

impl FlagFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the file
    pub fn read<T: FlagElement>(&self, config: &LoadConfig) -> Result<Matrix<T>> {
        let bytes = self.read_bytes(config.memory_map)?;
        let text = as_text(&bytes)?;
        let matrix = decode::<T>(text)?.reformat(config.format);
        tracing::debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            format = %config.format,
            nnz = matrix.nnz(),
            "loaded flag file"
        );
        Ok(matrix)
    }

    /// Encode and write a matrix, replacing any existing file
    pub fn write<M: FlagMatrix>(&self, matrix: &M) -> Result<()> {
        let text = encode(matrix);
        std::fs::write(&self.path, &text).map_err(|e| Error::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), bytes = text.len(), "saved flag file");
        Ok(())
    }

    /// Encode a matrix and write it through tokio
    #[cfg(feature = "async")]
    pub async fn write_async<M: FlagMatrix>(&self, matrix: &M) -> Result<()> {
        let text = encode(matrix);
        tokio::fs::write(&self.path, text.as_bytes())
            .await
            .map_err(|e| Error::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), bytes = text.len(), "saved flag file");
        Ok(())
    }

    /// Load a matrix of element type `T` from `path`
    pub fn load<T: FlagElement, P: AsRef<Path>>(path: P, config: &LoadConfig) -> Result<Matrix<T>> {
        Self::new(path).read(config)
    }

    /// Load an unweighted graph; vertex and edge presence only
    pub fn load_unweighted<P: AsRef<Path>>(path: P, config: &LoadConfig) -> Result<Matrix<bool>> {
        Self::load(path, config)
    }

    /// Load a weighted graph with `f64` weights
    pub fn load_weighted<P: AsRef<Path>>(path: P, config: &LoadConfig) -> Result<Matrix<f64>> {
        Self::load(path, config)
    }

    /// Save `matrix` to `path`
    pub fn save<M: FlagMatrix, P: AsRef<Path>>(path: P, matrix: &M) -> Result<()> {
        Self::new(path).write(matrix)
    }

    /// Save `matrix` to `path` through tokio
    #[cfg(feature = "async")]
    pub async fn save_async<M: FlagMatrix, P: AsRef<Path>>(path: P, matrix: &M) -> Result<()> {
        Self::new(path).write_async(matrix).await
    }

    fn read_bytes(&self, memory_map: bool) -> Result<FileBytes> {
        let file = File::open(&self.path).map_err(|e| Error::io(&self.path, e))?;

        #[cfg(feature = "mmap")]
        if memory_map {
            let len = file
                .metadata()
                .map_err(|e| Error::io(&self.path, e))?
                .len();
            // Zero-length mappings are rejected on some platforms
            if len == 0 {
                return Ok(FileBytes::Owned(Vec::new()));
            }
            // SAFETY: Read-only mapping, dropped before this handle returns the matrix
            let mmap = unsafe {
                memmap2::MmapOptions::new()
                    .map(&file)
                    .map_err(|e| Error::io(&self.path, e))?
            };
            return Ok(FileBytes::Mapped(mmap));
        }
        #[cfg(not(feature = "mmap"))]
        let _ = memory_map;

        use std::io::Read;
        let mut bytes = Vec::new();
        let mut file = file;
        file.read_to_end(&mut bytes)
            .map_err(|e| Error::io(&self.path, e))?;
        Ok(FileBytes::Owned(bytes))
    }
}

enum FileBytes {
    #[cfg(feature = "mmap")]
    Mapped(memmap2::Mmap),
    Owned(Vec<u8>),
}

impl std::ops::Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            #[cfg(feature = "mmap")]
            FileBytes::Mapped(mmap) => mmap,
            FileBytes::Owned(bytes) => bytes,
        }
    }
}

fn as_text(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        Error::from(FlagError::Parse {
            line,
            token: String::new(),
            expected: "UTF-8 text",
        })
    })
}

#[cfg(test)]
mod tests {
    use flagio_core::ErrorCategory;

    use super::*;
    use crate::backend::DenseMatrix;

    #[test]
    fn test_save_then_load_every_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.flag");
        let m = DenseMatrix::from_rows(vec![vec![0.5, 1.5], vec![2.5, 0.25]]).unwrap();
        FlagFile::save(&path, &m).unwrap();

        for memory_map in [true, false] {
            for format in MatrixFormat::ALL {
                let config = LoadConfig::default()
                    .with_format(format)
                    .with_memory_map(memory_map);
                let loaded = FlagFile::load_weighted(&path, &config).unwrap();
                assert_eq!(loaded.format(), format);
                assert_eq!(loaded.diagonal(), vec![0.5, 0.25]);
                assert_eq!(loaded.get(1, 0), Some(2.5));
            }
        }
    }

    #[test]
    fn test_default_layout_is_csr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.flag");
        std::fs::write(&path, "dim 0\n1 1\ndim 1\n1 0\n").unwrap();
        let m = FlagFile::load_unweighted(&path, &LoadConfig::default()).unwrap();
        assert_eq!(m.format(), MatrixFormat::Csr);
        assert_eq!(m.off_diagonal_entries().collect::<Vec<_>>(), vec![(1, 0, true)]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FlagFile::load_unweighted(dir.path().join("absent.flag"), &LoadConfig::default())
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(err.to_string().contains("absent.flag"));
    }

    #[test]
    fn test_empty_file_is_malformed() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = FlagFile::load_unweighted(file.path(), &LoadConfig::default()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MalformedHeader);
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"dim 0\n1 1\n\xff\xfe\n").unwrap();
        let err = FlagFile::load_weighted(file.path(), &LoadConfig::default()).unwrap_err();
        assert_eq!(
            err.as_flag_error(),
            Some(&FlagError::Parse {
                line: 3,
                token: String::new(),
                expected: "UTF-8 text",
            })
        );
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_save_async() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("async.flag");
        let m = DenseMatrix::from_rows(vec![vec![true, true], vec![false, true]]).unwrap();
        FlagFile::save_async(&path, &m).await.unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("dim 1\n0 1\n"));
    }
}
