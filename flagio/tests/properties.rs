use flagio::{
    decode, encode, extract, extract_unweighted, extract_weighted, unpack_result, DenseMatrix,
    DynamicMatrix, ExtractOptions, FlagMatrix, MatrixFormat, RawHomology, Reformat,
};
use proptest::prelude::*;

fn dense_f64(max_n: usize) -> impl Strategy<Value = DenseMatrix<f64>> {
    (0..=max_n).prop_flat_map(|n| {
        prop::collection::vec(-1.0e6f64..1.0e6, n * n)
            .prop_map(move |data| DenseMatrix::from_shape_vec(n, n, data).unwrap())
    })
}

fn square_weights(
    sizes: std::ops::Range<usize>,
    weights: impl Strategy<Value = f64> + Clone,
) -> impl Strategy<Value = (usize, Vec<f64>)> {
    sizes.prop_flat_map(move |n| (Just(n), prop::collection::vec(weights.clone(), n * n)))
}

fn dense_bool(max_n: usize) -> impl Strategy<Value = DenseMatrix<bool>> {
    (0..=max_n).prop_flat_map(|n| {
        prop::collection::vec(any::<bool>(), n * n)
            .prop_map(move |data| DenseMatrix::from_shape_vec(n, n, data).unwrap())
    })
}

fn weight() -> impl Strategy<Value = f64> + Clone {
    prop_oneof![
        8 => -100.0f64..100.0,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

fn sparse_formats() -> [MatrixFormat; 4] {
    [
        MatrixFormat::Coo,
        MatrixFormat::Csr,
        MatrixFormat::Csc,
        MatrixFormat::Lil,
    ]
}

fn close(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= 1e-15 * a.abs().max(b.abs())
}

proptest! {
    #[test]
    fn weighted_round_trip(m in dense_f64(7)) {
        let back = decode::<f64>(&encode(&m)).unwrap();
        prop_assert_eq!(back.shape(), m.shape());
        let (n, _) = m.shape();
        for row in 0..n {
            for col in 0..n {
                let expected = m.get(row, col).unwrap();
                let actual = back.get(row, col).unwrap();
                prop_assert!(
                    close(expected, actual),
                    "({}, {}): {} != {}",
                    row,
                    col,
                    expected,
                    actual
                );
            }
        }
    }

    #[test]
    fn unweighted_round_trip(m in dense_bool(7)) {
        let back = decode::<bool>(&encode(&m)).unwrap();
        prop_assert_eq!(back.diagonal(), m.diagonal());
        let original = extract_unweighted(&m).sorted_edges();
        let decoded = extract_unweighted(&back).sorted_edges();
        prop_assert_eq!(original, decoded);
    }

    #[test]
    fn no_self_loops(m in dense_f64(6), threshold in prop::option::of(-1.0e6f64..1.0e6)) {
        let options = ExtractOptions { max_edge_weight: threshold, ..ExtractOptions::default() };
        for format in MatrixFormat::ALL {
            let graph = extract(&DynamicMatrix::from(m.clone().reformat(format)), &options);
            prop_assert!(graph.edges.iter().all(|e| e.source != e.target));
        }
    }

    #[test]
    fn threshold_masks_heavy_and_non_finite(
        (n, data) in square_weights(1..6, weight()),
        t in -100.0f64..100.0,
    ) {
        let m = DenseMatrix::from_shape_vec(n, n, data.clone()).unwrap();
        let graph = extract_weighted(&m, &ExtractOptions::default().with_max_edge_weight(t));

        for edge in &graph.edges {
            let w = edge.weight.unwrap();
            prop_assert!(w.is_finite() && w <= t);
        }
        let expected = data
            .iter()
            .enumerate()
            .filter(|&(k, &w)| k / n != k % n && w.is_finite() && w <= t)
            .count();
        prop_assert_eq!(graph.edges.len(), expected);
    }

    #[test]
    fn layouts_extract_the_same_graph(m in dense_f64(6)) {
        let options = ExtractOptions::default();
        let expected = extract_weighted(&m, &options);
        for format in sparse_formats() {
            let graph = extract(&DynamicMatrix::from(m.clone().reformat(format)), &options);
            prop_assert_eq!(&graph.vertices, &expected.vertices);
            prop_assert_eq!(graph.sorted_edges(), expected.sorted_edges());
        }
    }

    #[test]
    fn nonzero_graphs_survive_diagonal_layout(
        (n, data) in square_weights(0..6, 0.5f64..10.0),
    ) {
        let m = DenseMatrix::from_shape_vec(n, n, data).unwrap();
        let expected = extract_weighted(&m, &ExtractOptions::default());
        let dia = m.reformat(MatrixFormat::Dia);
        let graph = extract_weighted(&dia, &ExtractOptions::default());
        prop_assert_eq!(&graph.vertices, &expected.vertices);
        prop_assert_eq!(graph.sorted_edges(), expected.sorted_edges());
    }

    #[test]
    fn sparse_back_to_dense(m in dense_bool(6)) {
        for format in sparse_formats() {
            let round = m.clone().reformat(format).reformat(MatrixFormat::Dense);
            prop_assert_eq!(round.diagonal(), m.diagonal());
            prop_assert_eq!(
                extract_unweighted(&round).sorted_edges(),
                extract_unweighted(&m).sorted_edges()
            );
        }
    }

    #[test]
    fn unpack_windows_exactly(
        raw_min in 0usize..4,
        betti in prop::collection::vec(0u64..10, 0..6),
        min in 0usize..6,
        span in prop::option::of(0usize..6),
    ) {
        let raw = RawHomology {
            min_dimension: raw_min,
            cell_count: betti.iter().map(|b| b * 2).collect(),
            betti: betti.clone(),
            persistence: Vec::new(),
            euler_characteristic: 0,
        };
        let max = span.map(|s| min + s);
        let result = unpack_result(raw, min, max);

        let expected_len = match max {
            Some(max) => max - min,
            None => (raw_min + betti.len()).saturating_sub(min),
        };
        prop_assert_eq!(result.dimensions.len(), expected_len);
        for (i, record) in result.dimensions.iter().enumerate() {
            prop_assert_eq!(record.dimension, min + i);
            let expected = record
                .dimension
                .checked_sub(raw_min)
                .and_then(|k| betti.get(k).copied())
                .unwrap_or(0);
            prop_assert_eq!(record.betti, expected);
            prop_assert_eq!(record.cell_count, expected * 2);
        }
    }
}
