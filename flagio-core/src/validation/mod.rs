//! Validation utilities for flag files and matrices
//!
//! This module contains pure validation functions with no I/O dependencies:
//! token parsing, section headers and index/parameter bounds.

pub mod bounds;
pub mod parsing;
pub mod sections;

pub use bounds::{
    is_prime, validate_coefficient, validate_dimension_window, validate_shape,
    validate_vertex_index,
};
pub use parsing::{parse_index, parse_weight};
pub use sections::{expect_header, is_section_header};
