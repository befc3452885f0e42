//! Write a random weighted graph to a .flag file

use flagio::{CooMatrix, FlagFile};
use std::time::Instant;

fn main() -> flagio::Result<()> {
    let vertices = 5_000;
    let out_degree = 20;

    println!("Building weighted graph: {vertices} vertices, {out_degree} edges per vertex");
    let start = Instant::now();
    let graph = build_demo_graph(vertices, out_degree)?;
    println!("Built graph in {:?}", start.elapsed());

    let start = Instant::now();
    FlagFile::save("example_graph.flag", &graph)?;
    println!("Graph written in {:?}", start.elapsed());
    println!("\nRun 'cargo run --example read_flag' to read it back!");
    Ok(())
}

/// Ring-like graph with deterministic weights; vertex weights stay below edge weights
fn build_demo_graph(vertices: usize, out_degree: usize) -> flagio::Result<CooMatrix<f64>> {
    let mut coo = CooMatrix::with_capacity(vertices, vertices, vertices * (out_degree + 1));
    for v in 0..vertices {
        coo.push(v, v, (v % 7) as f64 * 0.01)?;
        for step in 1..=out_degree {
            let target = (v + step * step) % vertices;
            if target != v {
                coo.push(v, target, 0.1 + step as f64 * 0.05)?;
            }
        }
    }
    Ok(coo)
}
