//! Format definitions for the `.flag` text format
//!
//! This module contains pure definitions for the flag wire format and the
//! in-memory layouts and element kinds it maps onto. No I/O.

pub mod constants;
pub mod header;
pub mod number;

pub use header::{GraphWeightKind, MatrixFormat, NumericType};
pub use number::write_scientific;
