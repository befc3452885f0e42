//! Error types for flag format operations

use alloc::string::String;

use crate::filtration::AVAILABLE_FILTRATIONS;

/// Errors that can occur while decoding, normalizing or preparing a flag graph
#[derive(Debug, Clone, PartialEq)]
pub enum FlagError {
    /// A `dim 0` / `dim 1` header line is missing or out of order
    MalformedHeader {
        /// 1-based line number
        line: usize,
        /// Header that was expected at this line
        expected: &'static str,
    },
    /// A token could not be read as the number the grammar requires
    Parse {
        /// 1-based line number
        line: usize,
        /// Offending token, empty when the token is missing
        token: String,
        /// What the token should have been
        expected: &'static str,
    },
    /// An index or a length does not agree with the vertex count
    DimensionMismatch {
        /// Index or length found
        found: usize,
        /// Exclusive bound it had to respect
        bound: usize,
        /// 1-based line number when the mismatch comes from a file
        line: Option<usize>,
    },
    /// Filtration name outside [`AVAILABLE_FILTRATIONS`]
    UnknownFiltration(String),
    /// The matrix layout cannot serve the requested operation
    UnsupportedBackend {
        /// Layout name as given by the caller
        name: String,
        /// Operation that was attempted
        operation: &'static str,
    },
    /// Homology coefficients must come from a prime field
    InvalidCoefficient(u16),
    /// An edge appears before one of its endpoints in the filtration
    EdgeFiltrationConflict {
        source: usize,
        target: usize,
        weight: f64,
        vertex_weight: f64,
    },
}

/// Broad classification of errors, stable across variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    MalformedHeader,
    Parse,
    DimensionMismatch,
    UnknownFiltration,
    UnsupportedBackend,
    InvalidParameter,
    Io,
    Engine,
}

impl FlagError {
    /// Category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            FlagError::MalformedHeader { .. } => ErrorCategory::MalformedHeader,
            FlagError::Parse { .. } => ErrorCategory::Parse,
            FlagError::DimensionMismatch { .. } => ErrorCategory::DimensionMismatch,
            FlagError::UnknownFiltration(_) => ErrorCategory::UnknownFiltration,
            FlagError::UnsupportedBackend { .. } => ErrorCategory::UnsupportedBackend,
            FlagError::InvalidCoefficient(_) | FlagError::EdgeFiltrationConflict { .. } => {
                ErrorCategory::InvalidParameter
            }
        }
    }
}

impl core::fmt::Display for FlagError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FlagError::MalformedHeader { line, expected } => {
                write!(f, "line {line}: expected header `{expected}`")
            }
            FlagError::Parse {
                line,
                token,
                expected,
            } => {
                if token.is_empty() {
                    write!(f, "line {line}: missing {expected}")
                } else {
                    write!(f, "line {line}: cannot parse `{token}` as {expected}")
                }
            }
            FlagError::DimensionMismatch { found, bound, line } => {
                if let Some(line) = line {
                    write!(f, "line {line}: ")?;
                }
                write!(f, "index or length {found} does not fit {bound} vertices")
            }
            FlagError::UnknownFiltration(name) => {
                write!(f, "filtration `{name}` not recognized, available filtrations are [")?;
                for (i, available) in AVAILABLE_FILTRATIONS.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(available)?;
                }
                f.write_str("]")
            }
            FlagError::UnsupportedBackend { name, operation } => {
                write!(f, "matrix format `{name}` does not support {operation}")
            }
            FlagError::InvalidCoefficient(p) => {
                write!(f, "coefficient {p} is not a prime")
            }
            FlagError::EdgeFiltrationConflict {
                source,
                target,
                weight,
                vertex_weight,
            } => write!(
                f,
                "edge ({source}, {target}) has filtration value {weight}, \
                 lower than its endpoint filtration value {vertex_weight}"
            ),
        }
    }
}

impl core::error::Error for FlagError {}

/// Result type for flag format operations
pub type Result<T> = core::result::Result<T, FlagError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_unknown_filtration_lists_choices() {
        let msg = FlagError::UnknownFiltration("bogus".into()).to_string();
        assert!(msg.contains("bogus"));
        for name in AVAILABLE_FILTRATIONS {
            assert!(msg.contains(name));
        }
    }

    #[test]
    fn test_categories() {
        let err = FlagError::DimensionMismatch {
            found: 4,
            bound: 3,
            line: Some(5),
        };
        assert_eq!(err.category(), ErrorCategory::DimensionMismatch);
        assert_eq!(err.to_string(), "line 5: index or length 4 does not fit 3 vertices");
        assert_eq!(
            FlagError::InvalidCoefficient(4).category(),
            ErrorCategory::InvalidParameter
        );
    }

    #[test]
    fn test_missing_token_message() {
        let err = FlagError::Parse {
            line: 4,
            token: String::new(),
            expected: "edge weight",
        };
        assert_eq!(err.to_string(), "line 4: missing edge weight");
    }
}
