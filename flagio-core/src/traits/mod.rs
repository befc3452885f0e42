//! Abstract interfaces for flag matrices
//!
//! This module defines the trait abstractions shared by every matrix layout.
//! Traits are pure interfaces - concrete layouts live in the `flagio` crate.

pub mod element;
pub mod matrix;

pub use element::FlagElement;
pub use matrix::{FlagMatrix, OffDiagonalEntries};
