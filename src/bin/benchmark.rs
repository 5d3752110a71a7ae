//! Step throughput, serial vs parallel evaluation

use paced_life::{Grid, Strategy, TransitionEngine};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;

fn random_grid(size: usize) -> Grid {
    let mut rng = StdRng::seed_from_u64(size as u64);
    let mut grid = match Grid::new(size, size) {
        Ok(grid) => grid,
        Err(err) => panic!("benchmark grid {size}x{size}: {err}"),
    };
    grid.randomize(0.3, &mut rng);
    grid
}

/// Milliseconds per generation
fn benchmark(strategy: Strategy, size: usize, iterations: u32) -> f64 {
    let engine = TransitionEngine::new(strategy);
    let mut grid = random_grid(size);

    let start = Instant::now();
    for _ in 0..iterations {
        engine.step(&mut grid);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    env_logger::init();
    println!("=== Game of Life Step Benchmark ===\n");

    let sizes = [50, 100, 250, 500, 1000, 2000];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<48}", "");

    for size in sizes {
        let serial_ms = benchmark(Strategy::Serial, size, iterations);
        let parallel_ms = benchmark(Strategy::Parallel, size, iterations);
        println!(
            "{:>10} {:>12.3} {:>12.3} {:>9.1}x",
            format!("{size}x{size}"),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    let size = 2000;
    let cells = (size * size) as f64;
    let parallel_ms = benchmark(Strategy::Parallel, size, iterations);
    println!(
        "\nParallel at {size}x{size}: {:.1}M cells/sec",
        cells / (parallel_ms / 1000.0) / 1_000_000.0
    );
}
