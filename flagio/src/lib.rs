//! flagio - `.flag` graph files for flag complex homology
//!
//! This library reads and writes the `.flag` text format, holds graphs in
//! dense or sparse matrix layouts, and normalizes them into the vertex and
//! edge lists consumed by a persistent homology engine.
//!
//! ## Architecture
//!
//! flagio splits definitions from implementations:
//!
//! - **flagio-core**: Format constants, element and layout types, traits,
//!   errors and validation (no I/O)
//! - **flagio**: Matrix layouts, the text codec, file handling, the
//!   normalizer and the homology request adapter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flagio::{extract_weighted, ExtractOptions, FlagFile, LoadConfig, MatrixFormat};
//!
//! fn example() -> flagio::Result<()> {
//!     let config = LoadConfig::default().with_format(MatrixFormat::Coo);
//!     let matrix = FlagFile::load_weighted("graph.flag", &config)?;
//!
//!     let options = ExtractOptions::default().with_max_edge_weight(0.5);
//!     let graph = extract_weighted(&matrix, &options);
//!     println!("{} vertices, {} edges", graph.vertex_count(), graph.edges.len());
//!
//!     FlagFile::save("graph-copy.flag", &matrix)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **mmap** (default): Memory-mapped reading of `.flag` files
//! - **serde** (default): Serialize options, graphs and results
//! - **async**: Write files through tokio

// Re-export core abstractions and format definitions
pub use flagio_core::{
    // Core traits
    FlagElement, FlagMatrix, OffDiagonalEntries,
    // Format definitions
    GraphWeightKind, MatrixFormat, NumericType,
    // Filtrations
    default_threshold, Filtration, Threshold, AVAILABLE_FILTRATIONS,
    // Error handling
    ErrorCategory, FlagError,
};

// Implementation modules
pub mod backend;
pub mod codec;
pub mod error;
pub mod flag_file;
pub mod homology;
pub mod normalize;

// Public exports
pub use backend::{
    CompressedAxis, CompressedMatrix, CooMatrix, DenseMatrix, DiaMatrix, DynamicMatrix,
    LilMatrix, Matrix, Reformat,
};
pub use codec::{decode, encode};
pub use error::{EngineError, Error, Result};
pub use flag_file::{FlagFile, LoadConfig};
pub use homology::{
    build_request, count_cells_unweighted, count_cells_weighted, unpack_result, CellCountEngine,
    DimensionRecord, EngineParameters, EngineVariant, HomologyAdapter, HomologyEngine,
    HomologyOptions, HomologyResult, RawHomology, UNBOUNDED,
};
pub use normalize::{
    extract, extract_unweighted, extract_weighted, Edge, ExtractOptions, FlagGraph, UnsetPolicy,
};
