//! Error type for flag file I/O and homology requests

use std::path::PathBuf;

use flagio_core::{ErrorCategory, FlagError};

/// Error reported by a homology or cell-count engine
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the `flagio` crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Format, parameter or shape error from the pure layer
    #[error(transparent)]
    Flag(#[from] FlagError),

    /// File could not be opened, mapped, read or written
    #[error("I/O failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external engine failed after the request was accepted
    #[error("homology engine failed: {0}")]
    Engine(#[source] EngineError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Flag(err) => err.category(),
            Error::Io { .. } => ErrorCategory::Io,
            Error::Engine(_) => ErrorCategory::Engine,
        }
    }

    /// The format error, if this is one
    pub fn as_flag_error(&self) -> Option<&FlagError> {
        match self {
            Error::Flag(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for `flagio` operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_keeps_path() {
        let err = Error::io(
            "graphs/missing.flag",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(err.to_string().contains("graphs/missing.flag"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_flag_error_is_transparent() {
        let inner = FlagError::InvalidCoefficient(6);
        let err = Error::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.as_flag_error(), Some(&inner));
        assert_eq!(err.category(), ErrorCategory::InvalidParameter);
    }
}
