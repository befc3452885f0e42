//! Matrix normalization into vertex and edge lists
//!
//! The homology engine consumes one weight per vertex and a list of directed
//! edges. This module reads both out of any [`FlagMatrix`]: the diagonal
//! becomes the vertex weights, off-diagonal cells become edges, and weights
//! above the filtration threshold are dropped.

use flagio_core::{
    default_threshold, FlagElement, FlagMatrix, GraphWeightKind, NumericType, Threshold,
};
use hashbrown::HashSet;

use crate::backend::DynamicMatrix;

/// How unstored off-diagonal cells of sparse layouts are read
///
/// A sparse layout cannot tell "no edge" from "edge of weight zero" once a
/// zero is left unstored. Only the weighted policy is affected; unweighted
/// graphs treat unstored cells as absent edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnsetPolicy {
    /// An unstored cell is not an edge
    #[default]
    AbsentEdge,
    /// An unstored cell is an edge of weight zero
    ZeroWeightEdge,
}

/// Options for extracting a weighted graph
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractOptions {
    /// Edges heavier than this are dropped; `None` uses the element type's default
    pub max_edge_weight: Option<f64>,
    pub unset_policy: UnsetPolicy,
}

impl ExtractOptions {
    pub fn with_max_edge_weight(mut self, max_edge_weight: f64) -> Self {
        self.max_edge_weight = Some(max_edge_weight);
        self
    }

    pub fn with_unset_policy(mut self, unset_policy: UnsetPolicy) -> Self {
        self.unset_policy = unset_policy;
        self
    }
}

/// A directed edge; `weight` is `None` for unweighted graphs
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: Option<f64>,
}

/// Normalized graph handed to the homology engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagGraph {
    /// One weight per vertex, indexed by vertex id
    pub vertices: Vec<f64>,
    /// Edge order follows the source layout
    pub edges: Vec<Edge>,
    pub kind: GraphWeightKind,
}

impl FlagGraph {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_weighted(&self) -> bool {
        self.kind.is_weighted()
    }

    /// Edges in row-major `(source, target)` order
    pub fn sorted_edges(&self) -> Vec<Edge> {
        let mut edges = self.edges.clone();
        edges.sort_by_key(|edge| (edge.source, edge.target));
        edges
    }
}

/// Extract vertices and edges, choosing the policy from the element type
pub fn extract(matrix: &DynamicMatrix, options: &ExtractOptions) -> FlagGraph {
    match matrix {
        DynamicMatrix::Bool(m) => extract_unweighted(m),
        DynamicMatrix::I32(m) => extract_weighted(m, options),
        DynamicMatrix::I64(m) => extract_weighted(m, options),
        DynamicMatrix::U32(m) => extract_weighted(m, options),
        DynamicMatrix::U64(m) => extract_weighted(m, options),
        DynamicMatrix::F32(m) => extract_weighted(m, options),
        DynamicMatrix::F64(m) => extract_weighted(m, options),
    }
}

/// Unweighted policy
///
/// Every vertex gets weight `1.0` and the diagonal is ignored. Each present
/// off-diagonal cell becomes an edge without weight.
pub fn extract_unweighted<M: FlagMatrix>(matrix: &M) -> FlagGraph {
    let n = vertex_count(matrix);
    let edges = matrix
        .off_diagonal_entries()
        .filter(|&(_, _, value)| value.is_present())
        .map(|(source, target, _)| Edge {
            source,
            target,
            weight: None,
        })
        .collect();

    FlagGraph {
        vertices: vec![1.0; n],
        edges,
        kind: GraphWeightKind::Unweighted,
    }
}

/// Weighted policy
///
/// Vertex weights are read from the diagonal, padded with zero. Off-diagonal
/// cells become edges unless their weight is above the threshold; for
/// floating point types non-finite weights are dropped as well.
pub fn extract_weighted<M: FlagMatrix>(matrix: &M, options: &ExtractOptions) -> FlagGraph {
    let kind = M::Element::kind();
    let numeric = kind.numeric_type();
    let is_float = numeric.is_some_and(NumericType::is_float);
    let threshold = Threshold::from_max_weight(options.max_edge_weight)
        .or_else(|| numeric.map(default_threshold))
        .unwrap_or(Threshold::Infinite);

    let n = vertex_count(matrix);
    let mut vertices: Vec<f64> = matrix.diagonal().into_iter().map(FlagElement::to_f64).collect();
    vertices.resize(n, 0.0);

    let keep = |source: usize, target: usize, weight: f64, finite: bool| {
        let kept = (!is_float || finite) && threshold.admits(weight);
        if !kept {
            tracing::trace!(source, target, weight, "edge filtered out");
        }
        kept
    };

    let mut edges: Vec<Edge> = matrix
        .off_diagonal_entries()
        .filter(|&(source, target, value)| keep(source, target, value.to_f64(), value.is_finite()))
        .map(|(source, target, value)| Edge {
            source,
            target,
            weight: Some(value.to_f64()),
        })
        .collect();

    if options.unset_policy == UnsetPolicy::ZeroWeightEdge
        && matrix.format().is_sparse()
        && threshold.admits(0.0)
    {
        let stored: HashSet<(usize, usize)> = matrix
            .off_diagonal_entries()
            .map(|(source, target, _)| (source, target))
            .collect();
        let (nrows, ncols) = matrix.shape();
        for source in 0..nrows {
            for target in (0..ncols).filter(|&target| target != source) {
                if !stored.contains(&(source, target)) {
                    edges.push(Edge {
                        source,
                        target,
                        weight: Some(0.0),
                    });
                }
            }
        }
    }

    FlagGraph {
        vertices,
        edges,
        kind,
    }
}

fn vertex_count<M: FlagMatrix>(matrix: &M) -> usize {
    let (nrows, ncols) = matrix.shape();
    if nrows != ncols {
        tracing::warn!(
            rows = nrows,
            cols = ncols,
            format = %matrix.format(),
            "adjacency matrix should be square; using the larger dimension as vertex count"
        );
    }
    nrows.max(ncols)
}
