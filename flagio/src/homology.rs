//! Homology request adapter
//!
//! Flag complexes and their persistent homology are computed by an external
//! engine. This module turns a [`FlagGraph`] and [`HomologyOptions`] into the
//! engine's parameter set, picks the engine for the coefficient field, and
//! reshapes the raw output into one record per requested dimension.
//!
//! ```rust,no_run
//! use flagio::{
//!     DenseMatrix, EngineError, EngineParameters, HomologyAdapter, HomologyEngine,
//!     HomologyOptions, RawHomology,
//! };
//!
//! struct Flagser;
//!
//! impl HomologyEngine for Flagser {
//!     fn compute_homology(&self, params: &EngineParameters) -> Result<RawHomology, EngineError> {
//!         // Hand `params` to the native library here
//!         # let _ = params;
//!         Ok(RawHomology::default())
//!     }
//! }
//!
//! fn example() -> flagio::Result<()> {
//!     let adapter = HomologyAdapter::new(Flagser, Flagser);
//!     let matrix = DenseMatrix::from_rows(vec![vec![false, true], vec![false, false]])?;
//!     let result = adapter.unweighted(&matrix, &HomologyOptions::default().with_max_dimension(2))?;
//!     println!("betti numbers: {:?}", result.betti_numbers());
//!     Ok(())
//! }
//! ```

use flagio_core::{
    validate_coefficient, validate_dimension_window, validate_vertex_index, Filtration,
    FlagError, FlagMatrix,
};
use rayon::prelude::*;

use crate::error::EngineError;
use crate::normalize::{extract_unweighted, extract_weighted, ExtractOptions, FlagGraph};
use crate::{Error, Result};

/// Engine sentinel for "no upper dimension" and "no approximation"
pub const UNBOUNDED: i64 = -1;

/// Parameters of a homology computation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HomologyOptions {
    pub min_dimension: usize,
    /// Exclusive upper bound; `None` computes every dimension present
    pub max_dimension: Option<usize>,
    pub directed: bool,
    /// Prime modulus of the coefficient field
    pub coefficient: u16,
    pub filtration: Filtration,
    /// Skip cells whose reduction columns exceed this many entries
    pub approximation: Option<usize>,
}

impl Default for HomologyOptions {
    fn default() -> Self {
        Self {
            min_dimension: 0,
            max_dimension: None,
            directed: true,
            coefficient: 2,
            filtration: Filtration::Max,
            approximation: None,
        }
    }
}

impl HomologyOptions {
    pub fn with_min_dimension(mut self, min_dimension: usize) -> Self {
        self.min_dimension = min_dimension;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: usize) -> Self {
        self.max_dimension = Some(max_dimension);
        self
    }

    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn with_coefficient(mut self, coefficient: u16) -> Self {
        self.coefficient = coefficient;
        self
    }

    pub fn with_filtration(mut self, filtration: Filtration) -> Self {
        self.filtration = filtration;
        self
    }

    /// Set the filtration by name, failing on names the engine does not know
    pub fn with_filtration_name(self, name: &str) -> flagio_core::Result<Self> {
        Ok(self.with_filtration(Filtration::from_name(name)?))
    }

    pub fn with_approximation(mut self, approximation: usize) -> Self {
        self.approximation = Some(approximation);
        self
    }
}

/// Engine entry point selected by the coefficient field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineVariant {
    /// Fast path for coefficients in F2
    Mod2,
    /// General prime field
    PrimeField,
}

/// Everything the engine needs for one computation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineParameters {
    pub vertices: Vec<f64>,
    /// `(source, target, weight)`; unweighted edges carry weight `1.0`
    pub edges: Vec<(usize, usize, f64)>,
    pub min_dimension: i64,
    /// [`UNBOUNDED`] when every dimension is requested
    pub max_dimension: i64,
    pub directed: bool,
    pub coefficient: u16,
    /// [`UNBOUNDED`] for exact computation
    pub approximation: i64,
    pub filtration: Filtration,
    pub variant: EngineVariant,
}

/// Output of the engine before windowing
///
/// Per-dimension vectors start at `min_dimension` and may cover a
/// different range than the one requested.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawHomology {
    pub min_dimension: usize,
    pub betti: Vec<u64>,
    pub cell_count: Vec<u64>,
    /// Birth/death pairs per dimension
    pub persistence: Vec<Vec<(f64, f64)>>,
    pub euler_characteristic: i64,
}

impl RawHomology {
    fn end_dimension(&self) -> usize {
        let len = self
            .betti
            .len()
            .max(self.cell_count.len())
            .max(self.persistence.len());
        self.min_dimension + len
    }
}

/// Results for one homology dimension
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionRecord {
    pub dimension: usize,
    /// Birth/death pairs of the persistence diagram
    pub pairs: Vec<(f64, f64)>,
    pub cell_count: u64,
    pub betti: u64,
}

/// Windowed homology results
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HomologyResult {
    /// One record per requested dimension, in increasing order
    pub dimensions: Vec<DimensionRecord>,
    pub euler_characteristic: i64,
}

impl HomologyResult {
    pub fn betti_numbers(&self) -> Vec<u64> {
        self.dimensions.iter().map(|d| d.betti).collect()
    }

    pub fn cell_counts(&self) -> Vec<u64> {
        self.dimensions.iter().map(|d| d.cell_count).collect()
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// External persistent homology engine
pub trait HomologyEngine {
    fn compute_homology(
        &self,
        params: &EngineParameters,
    ) -> std::result::Result<RawHomology, EngineError>;
}

/// External cell counter
pub trait CellCountEngine {
    /// Number of cells per dimension of the flag complex
    fn count_cells(
        &self,
        vertices: &[f64],
        edges: &[(usize, usize, f64)],
        directed: bool,
    ) -> std::result::Result<Vec<u64>, EngineError>;
}

/// Validate options and build the engine parameters for `graph`
pub fn build_request(
    graph: &FlagGraph,
    options: &HomologyOptions,
) -> flagio_core::Result<EngineParameters> {
    validate_dimension_window(options.min_dimension, options.max_dimension)?;
    validate_coefficient(options.coefficient)?;
    let edges = engine_edges(graph)?;

    let variant = if options.coefficient == 2 {
        EngineVariant::Mod2
    } else {
        EngineVariant::PrimeField
    };

    Ok(EngineParameters {
        vertices: graph.vertices.clone(),
        edges,
        min_dimension: to_engine_int(Some(options.min_dimension)),
        max_dimension: to_engine_int(options.max_dimension),
        directed: options.directed,
        coefficient: options.coefficient,
        approximation: to_engine_int(options.approximation),
        filtration: options.filtration,
        variant,
    })
}

fn to_engine_int(value: Option<usize>) -> i64 {
    value.map_or(UNBOUNDED, |v| i64::try_from(v).unwrap_or(i64::MAX))
}

/// Edge triples for the engine
///
/// A weighted edge lighter than either endpoint contradicts the vertex
/// filtration and is rejected.
fn engine_edges(graph: &FlagGraph) -> flagio_core::Result<Vec<(usize, usize, f64)>> {
    graph
        .edges
        .iter()
        .map(|edge| {
            validate_vertex_index(edge.source, graph.vertices.len(), None)?;
            validate_vertex_index(edge.target, graph.vertices.len(), None)?;
            let Some(weight) = edge.weight else {
                return Ok((edge.source, edge.target, 1.0));
            };
            let vertex_weight = graph.vertices[edge.source].max(graph.vertices[edge.target]);
            if weight < vertex_weight {
                return Err(FlagError::EdgeFiltrationConflict {
                    source: edge.source,
                    target: edge.target,
                    weight,
                    vertex_weight,
                });
            }
            Ok((edge.source, edge.target, weight))
        })
        .collect()
}

/// Window raw engine output to `[min_dimension, max_dimension)`
///
/// Dimensions the engine did not report get empty records; dimensions
/// outside the window are dropped. Without `max_dimension` every dimension
/// from `min_dimension` up to the last reported one is kept.
pub fn unpack_result(
    raw: RawHomology,
    min_dimension: usize,
    max_dimension: Option<usize>,
) -> HomologyResult {
    let end = max_dimension.unwrap_or_else(|| raw.end_dimension());
    let dimensions = (min_dimension..end.max(min_dimension))
        .map(|dimension| match dimension.checked_sub(raw.min_dimension) {
            Some(i) => DimensionRecord {
                dimension,
                pairs: raw.persistence.get(i).cloned().unwrap_or_default(),
                cell_count: raw.cell_count.get(i).copied().unwrap_or(0),
                betti: raw.betti.get(i).copied().unwrap_or(0),
            },
            None => DimensionRecord {
                dimension,
                ..DimensionRecord::default()
            },
        })
        .collect();

    HomologyResult {
        dimensions,
        euler_characteristic: raw.euler_characteristic,
    }
}

/// Front end over a mod-2 engine and a prime-field engine
#[derive(Debug, Clone)]
pub struct HomologyAdapter<M, P> {
    mod2: M,
    prime_field: P,
}

impl<M: HomologyEngine, P: HomologyEngine> HomologyAdapter<M, P> {
    pub fn new(mod2: M, prime_field: P) -> Self {
        Self { mod2, prime_field }
    }

    /// Validate, run the engine for the coefficient field, and window the output
    pub fn compute(&self, graph: &FlagGraph, options: &HomologyOptions) -> Result<HomologyResult> {
        let params = build_request(graph, options)?;
        tracing::debug!(
            vertices = params.vertices.len(),
            edges = params.edges.len(),
            variant = ?params.variant,
            filtration = %params.filtration,
            "running homology engine"
        );

        let raw = match params.variant {
            EngineVariant::Mod2 => self.mod2.compute_homology(&params),
            EngineVariant::PrimeField => self.prime_field.compute_homology(&params),
        }
        .map_err(Error::Engine)?;

        Ok(unpack_result(raw, options.min_dimension, options.max_dimension))
    }

    /// Homology of an unweighted graph
    ///
    /// All edge filtrations agree when every cell appears at once, so the
    /// filtration is always `max`.
    pub fn unweighted<A: FlagMatrix>(
        &self,
        matrix: &A,
        options: &HomologyOptions,
    ) -> Result<HomologyResult> {
        let graph = extract_unweighted(matrix);
        let options = options.clone().with_filtration(Filtration::Max);
        self.compute(&graph, &options)
    }

    /// Persistent homology of a weighted graph
    pub fn weighted<A: FlagMatrix>(
        &self,
        matrix: &A,
        max_edge_weight: Option<f64>,
        options: &HomologyOptions,
    ) -> Result<HomologyResult> {
        let extract_options = ExtractOptions {
            max_edge_weight,
            ..ExtractOptions::default()
        };
        let graph = extract_weighted(matrix, &extract_options);
        self.compute(&graph, options)
    }
}

impl<M, P> HomologyAdapter<M, P>
where
    M: HomologyEngine + Sync,
    P: HomologyEngine + Sync,
{
    /// Run independent requests on the rayon pool; results keep request order
    pub fn run_batch(
        &self,
        requests: &[(FlagGraph, HomologyOptions)],
    ) -> Vec<Result<HomologyResult>> {
        requests
            .par_iter()
            .map(|(graph, options)| self.compute(graph, options))
            .collect()
    }
}

/// Cell counts of an unweighted graph
pub fn count_cells_unweighted<E: CellCountEngine, A: FlagMatrix>(
    engine: &E,
    matrix: &A,
    directed: bool,
) -> Result<Vec<u64>> {
    let graph = extract_unweighted(matrix);
    let edges = engine_edges(&graph)?;
    engine
        .count_cells(&graph.vertices, &edges, directed)
        .map_err(Error::Engine)
}

/// Cell counts of a weighted graph cut at `max_edge_weight`
pub fn count_cells_weighted<E: CellCountEngine, A: FlagMatrix>(
    engine: &E,
    matrix: &A,
    max_edge_weight: Option<f64>,
    directed: bool,
) -> Result<Vec<u64>> {
    let extract_options = ExtractOptions {
        max_edge_weight,
        ..ExtractOptions::default()
    };
    let graph = extract_weighted(matrix, &extract_options);
    let edges = engine_edges(&graph)?;
    engine
        .count_cells(&graph.vertices, &edges, directed)
        .map_err(Error::Engine)
}
