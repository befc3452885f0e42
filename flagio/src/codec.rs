//! Text codec for `.flag` files
//!
//! ```text
//! dim 0
//! <w0> <w1> ... <w(n-1)>
//! dim 1
//! <src> <dst> [<weight>]
//! ```
//!
//! Decoding builds a [`LilMatrix`], the layout with cheap random writes.
//! Encoding accepts any [`FlagMatrix`].

use std::fmt::Write;

use flagio_core::format::constants::{EDGE_CHUNK_SIZE, EDGE_HEADER, VERTEX_HEADER};
use flagio_core::{
    expect_header, is_section_header, parse_index, parse_weight, validate_vertex_index,
    FlagElement, FlagError, FlagMatrix,
};
use rayon::prelude::*;

use crate::backend::LilMatrix;
use crate::Result;

/// Parse `.flag` text into a square matrix
///
/// The diagonal holds the vertex weights. For boolean matrices only present
/// vertices are stored; edge lines set their cell to `true` and may carry
/// extra columns. Weighted edge lines have exactly three columns. Edge lines
/// with equal endpoints are ignored and a repeated edge keeps its last weight.
pub fn decode<T: FlagElement>(text: &str) -> Result<LilMatrix<T>> {
    let weighted = T::kind().is_weighted();
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line_no, first) = lines.next().map_or((1, None), |(n, l)| (n, Some(l)));
    expect_header(first, line_no, VERTEX_HEADER)?;

    // The vertex line is blank, and therefore skipped, for empty graphs
    let mut vertices: Vec<T> = Vec::new();
    let mut next = lines.next();
    if let Some((line_no, line)) = next {
        if !is_section_header(line) {
            vertices = line
                .split_whitespace()
                .map(|token| parse_weight(Some(token), line_no, "vertex weight"))
                .collect::<flagio_core::Result<_>>()?;
            next = lines.next();
        }
    }
    let line_no = next.map_or(line_no + 1, |(n, _)| n);
    expect_header(next.map(|(_, l)| l), line_no, EDGE_HEADER)?;

    let n = vertices.len();
    let mut matrix = LilMatrix::new(n, n);
    if weighted {
        matrix.set_diagonal(&vertices)?;
    } else {
        for (i, &present) in vertices.iter().enumerate() {
            if present.is_present() {
                matrix.set(i, i, present)?;
            }
        }
    }

    let mut edges = 0usize;
    for (line_no, line) in lines {
        if is_section_header(line) {
            return Err(FlagError::MalformedHeader {
                line: line_no,
                expected: "edge line",
            }
            .into());
        }

        let mut tokens = line.split_whitespace();
        let source = parse_endpoint(tokens.next(), line_no, n, "source index")?;
        let target = parse_endpoint(tokens.next(), line_no, n, "target index")?;
        let value = if weighted {
            let value = parse_weight(tokens.next(), line_no, "edge weight")?;
            if let Some(extra) = tokens.next() {
                return Err(FlagError::Parse {
                    line: line_no,
                    token: extra.into(),
                    expected: "end of edge line",
                }
                .into());
            }
            value
        } else {
            T::from_f64(1.0)
        };

        if source == target {
            tracing::trace!(line = line_no, vertex = source, "ignoring self-loop edge line");
            continue;
        }
        matrix.set(source, target, value)?;
        edges += 1;
    }

    tracing::debug!(vertices = n, edges, weighted, "decoded flag text");
    Ok(matrix)
}

fn parse_endpoint(
    token: Option<&str>,
    line: usize,
    vertices: usize,
    expected: &'static str,
) -> flagio_core::Result<usize> {
    let token = token.ok_or(FlagError::Parse {
        line,
        token: String::new(),
        expected,
    })?;
    let index = parse_index(token, line)?;
    validate_vertex_index(index, vertices, Some(line))?;
    Ok(index)
}

/// Serialize a matrix as `.flag` text
///
/// Vertex count is `max(rows, cols)`; missing diagonal cells are written as
/// the implicit zero. Boolean matrices get one two-column line per present
/// off-diagonal cell, numeric matrices one three-column line per stored
/// off-diagonal cell.
pub fn encode<M: FlagMatrix>(matrix: &M) -> String {
    let weighted = M::Element::kind().is_weighted();
    let (nrows, ncols) = matrix.shape();
    let n = nrows.max(ncols);

    let mut diagonal = matrix.diagonal();
    diagonal.resize(n, M::Element::default());

    let edges: Vec<(usize, usize, M::Element)> = matrix
        .off_diagonal_entries()
        .filter(|&(_, _, value)| weighted || value.is_present())
        .collect();

    let mut out = String::with_capacity(32 + n * 26 + edges.len() * 48);
    out.push_str(VERTEX_HEADER);
    out.push('\n');
    for (i, value) in diagonal.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        value.write_token(&mut out);
    }
    out.push('\n');
    out.push_str(EDGE_HEADER);
    out.push('\n');

    if edges.len() <= EDGE_CHUNK_SIZE {
        write_edges(&edges, weighted, &mut out);
    } else {
        let chunks: Vec<String> = edges
            .par_chunks(EDGE_CHUNK_SIZE)
            .map(|chunk| {
                let mut text = String::with_capacity(chunk.len() * 48);
                write_edges(chunk, weighted, &mut text);
                text
            })
            .collect();
        for chunk in chunks {
            out.push_str(&chunk);
        }
    }

    tracing::debug!(vertices = n, edges = edges.len(), weighted, "encoded flag text");
    out
}

fn write_edges<T: FlagElement>(edges: &[(usize, usize, T)], weighted: bool, out: &mut String) {
    for &(source, target, value) in edges {
        // Writing into a String cannot fail
        let _ = write!(out, "{source} {target}");
        if weighted {
            out.push(' ');
            value.write_token(out);
        }
        out.push('\n');
    }
}
