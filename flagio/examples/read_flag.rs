//! Read a .flag file and normalize it at a few thresholds

use flagio::{extract_weighted, ExtractOptions, FlagFile, FlagMatrix, LoadConfig, MatrixFormat};
use std::time::Instant;

fn main() -> flagio::Result<()> {
    let filename = "example_graph.flag";

    if !std::path::Path::new(filename).exists() {
        println!("File '{filename}' not found!");
        println!("   Run 'cargo run --example write_flag' first");
        return Ok(());
    }

    for format in [MatrixFormat::Csr, MatrixFormat::Lil, MatrixFormat::Coo] {
        let start = Instant::now();
        let config = LoadConfig::default().with_format(format);
        let matrix = FlagFile::load_weighted(filename, &config)?;
        println!(
            "Loaded as {format} in {:.3}ms",
            start.elapsed().as_secs_f64() * 1000.0
        );

        let (rows, cols) = matrix.shape();
        println!("   Dimensions: {rows} x {cols}");
        println!("   Stored cells: {}", matrix.nnz());
    }

    let matrix = FlagFile::load_weighted(filename, &LoadConfig::default())?;
    println!("\nEdges kept per threshold:");
    for threshold in [0.25, 0.5, 1.0, f64::INFINITY] {
        let start = Instant::now();
        let options = ExtractOptions::default().with_max_edge_weight(threshold);
        let graph = extract_weighted(&matrix, &options);
        println!(
            "   <= {threshold}: {} edges ({:.3}ms)",
            graph.edges.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
    }
    Ok(())
}
