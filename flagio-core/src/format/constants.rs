//! Format constants for the `.flag` text format

/// Header preceding the vertex weight line
pub const VERTEX_HEADER: &str = "dim 0";

/// Header preceding the edge lines
pub const EDGE_HEADER: &str = "dim 1";

/// Prefix shared by every section header
pub const HEADER_PREFIX: &str = "dim";

/// Significant fractional digits used when writing floating point weights
pub const FLOAT_PRECISION: usize = 18;

/// Minimum number of exponent digits in scientific notation
pub const EXPONENT_DIGITS: usize = 2;

/// Edges per chunk when formatting edge lines in parallel
pub const EDGE_CHUNK_SIZE: usize = 64 * 1024;
