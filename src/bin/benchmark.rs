use nalgebra::Vector2;
use std::time::Instant;
use torus_dynamics::{
    classify_slope, density_grid, generate_wrapped_line, ClassifyConfig, PenroseTiling, Slope,
};

fn main() {
    println!("# Performance Benchmark Results\n");

    benchmark_wrapped_lines();
    benchmark_classification();
    benchmark_density_grids();
    benchmark_penrose();

    println!("\nBenchmark complete.");
}

fn benchmark_wrapped_lines() {
    println!("### Wrapped Line Generation Scalability\n");
    println!("| Samples | Segments | Wraps | Time (ms) |");
    println!("|---------|----------|-------|-----------|");

    let slope = Slope::Finite((1.0 + 5.0_f64.sqrt()) / 2.0 - 1.0);
    let start = Vector2::new(0.0, 0.0);

    for &n in &[1_000usize, 10_000, 100_000, 1_000_000] {
        let t0 = Instant::now();
        let line = generate_wrapped_line(start, slope, 200.0, n).unwrap();
        let duration = t0.elapsed();

        println!(
            "| {} | {} | {} | {:.2} |",
            n,
            line.segments.len(),
            line.wrap_count,
            duration.as_secs_f64() * 1000.0
        );
    }
    println!();
}

fn benchmark_classification() {
    println!("### Slope Classification\n");

    let slopes: [(&str, f64); 5] = [
        ("1/2", 0.5),
        ("2/3", 2.0 / 3.0),
        ("sqrt(2)-1", std::f64::consts::SQRT_2 - 1.0),
        ("phi-1", (1.0 + 5.0_f64.sqrt()) / 2.0 - 1.0),
        ("pi", std::f64::consts::PI),
    ];
    let config = ClassifyConfig::default();

    for (name, value) in slopes {
        let t0 = Instant::now();
        let mut classification = None;
        for _ in 0..10_000 {
            classification = Some(classify_slope(Slope::Finite(value), &config).unwrap());
        }
        let duration = t0.elapsed();
        let c = classification.unwrap();

        println!(
            "- {}: {}/{} ({:?}), 10k runs in {:.2} ms",
            name,
            c.numerator,
            c.denominator,
            c.category,
            duration.as_secs_f64() * 1000.0
        );
    }
    println!();
}

fn benchmark_density_grids() {
    println!("### Density Grid Resolution Scaling\n");
    println!("| Grid | Cells | Occupied | Time (ms) |");
    println!("|------|-------|----------|-----------|");

    let slope = Slope::Finite(std::f64::consts::SQRT_2 - 1.0);
    let start = Vector2::new(0.0, 0.0);

    for &dim in &[25usize, 50, 100, 200] {
        let t0 = Instant::now();
        let grid = density_grid(start, slope, 1000.0, 500_000, dim).unwrap();
        let duration = t0.elapsed();

        println!(
            "| {} x {} | {} | {} | {:.2} |",
            dim,
            dim,
            dim * dim,
            grid.occupied_cells,
            duration.as_secs_f64() * 1000.0
        );
    }
    println!();
}

fn benchmark_penrose() {
    println!("### Penrose Subdivision Depth Scaling\n");
    println!("| Iterations | Triangles | Time (ms) |");
    println!("|------------|-----------|-----------|");

    let tiling = PenroseTiling::new(100.0).unwrap();

    for iterations in [2usize, 4, 6, 8, 10] {
        let t0 = Instant::now();
        let triangles = tiling.generate(iterations).unwrap();
        let duration = t0.elapsed();

        println!(
            "| {} | {} | {:.2} |",
            iterations,
            triangles.len(),
            duration.as_secs_f64() * 1000.0
        );
    }
    println!();
}
