use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flagio::{
    decode, encode, extract_weighted, CooMatrix, ExtractOptions, MatrixFormat, Reformat,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_graph(vertices: usize, density: f64, seed: u64) -> CooMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut coo = CooMatrix::new(vertices, vertices);
    for i in 0..vertices {
        coo.push(i, i, rng.gen::<f64>()).unwrap();
    }
    for row in 0..vertices {
        for col in 0..vertices {
            if row != col && rng.gen_bool(density) {
                coo.push(row, col, rng.gen_range(1.0..2.0)).unwrap();
            }
        }
    }
    coo
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    for &(vertices, density) in &[(500usize, 0.05f64), (2_000, 0.05)] {
        let graph = random_graph(vertices, density, 42);
        let text = encode(&graph);
        let label = format!("{vertices}v");

        group.bench_with_input(BenchmarkId::new("encode", &label), &graph, |b, graph| {
            b.iter(|| black_box(encode(black_box(graph))))
        });
        group.bench_with_input(BenchmarkId::new("decode", &label), &text, |b, text| {
            b.iter(|| black_box(decode::<f64>(black_box(text)).unwrap()))
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let graph = random_graph(2_000, 0.05, 7);
    let options = ExtractOptions::default().with_max_edge_weight(1.5);

    for format in [MatrixFormat::Coo, MatrixFormat::Csr, MatrixFormat::Lil] {
        let matrix = graph.clone().reformat(format);
        group.bench_with_input(BenchmarkId::new("weighted", format), &matrix, |b, matrix| {
            b.iter(|| black_box(extract_weighted(black_box(matrix), &options)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec, bench_extract);
criterion_main!(benches);
