#![no_std]

//! flagio Core - `.flag` graph format definitions
//!
//! This crate provides the format constants, element types, matrix traits,
//! error taxonomy and pure validation helpers for `.flag` files. It performs
//! no I/O; concrete matrix layouts and the codec live in `flagio`.

extern crate alloc;

pub mod error;
pub mod filtration;
pub mod format;
pub mod threshold;
pub mod traits;
pub mod validation;

pub use error::*;
pub use filtration::{Filtration, AVAILABLE_FILTRATIONS};
pub use format::*;
pub use threshold::{default_threshold, Threshold};
pub use traits::*;
pub use validation::{
    expect_header, is_section_header, parse_index, parse_weight, validate_coefficient,
    validate_dimension_window, validate_shape, validate_vertex_index,
};
