use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::flat_torus::{wrapped_samples, Slope};

#[cfg(target_arch = "wasm32")]
fn log(s: &str) {
    web_sys::console::log_1(&s.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn log(s: &str) {
    println!("{}", s);
}

macro_rules! console_log {
    ($($t:tt)*) => {
        log(&format!($($t)*))
    }
}

/// Occupancy histogram of a wrapped geodesic over the unit square.
///
/// `values` is row-major by y: `values[iy * grid_size + ix]`, each cell
/// normalized by the maximum count. A rational slope revisits the same
/// thin closed orbit and leaves most cells empty; an irrational slope
/// eventually touches every cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityGrid {
    pub values: Vec<f64>,
    pub grid_size: usize,
    pub max_count: u32,
    pub occupied_cells: usize,
}

#[cfg(not(target_arch = "wasm32"))]
fn bin_points(points: &[Vector2<f64>], grid_size: usize) -> Vec<u32> {
    use rayon::prelude::*;

    points
        .par_chunks(16_384)
        .map(|chunk| {
            let mut counts = vec![0u32; grid_size * grid_size];
            for p in chunk {
                let ix = ((p.x * grid_size as f64) as usize).min(grid_size - 1);
                let iy = ((p.y * grid_size as f64) as usize).min(grid_size - 1);
                counts[iy * grid_size + ix] += 1;
            }
            counts
        })
        .reduce(
            || vec![0u32; grid_size * grid_size],
            |mut acc, counts| {
                for (a, c) in acc.iter_mut().zip(counts) {
                    *a += c;
                }
                acc
            },
        )
}

#[cfg(target_arch = "wasm32")]
fn bin_points(points: &[Vector2<f64>], grid_size: usize) -> Vec<u32> {
    let mut counts = vec![0u32; grid_size * grid_size];
    for p in points {
        let ix = ((p.x * grid_size as f64) as usize).min(grid_size - 1);
        let iy = ((p.y * grid_size as f64) as usize).min(grid_size - 1);
        counts[iy * grid_size + ix] += 1;
    }
    counts
}

/// Trace the geodesic and bin its wrapped samples into a
/// grid_size x grid_size occupancy histogram.
pub fn density_grid(
    start: Vector2<f64>,
    slope: Slope,
    t_max: f64,
    n_points: usize,
    grid_size: usize,
) -> Result<DensityGrid, String> {
    if grid_size < 2 {
        return Err("grid_size must be at least 2".to_string());
    }
    let points = wrapped_samples(start, slope, t_max, n_points)?;

    console_log!(
        "Binning {} wrapped samples into a {}x{} grid",
        points.len(),
        grid_size,
        grid_size
    );

    let counts = bin_points(&points, grid_size);
    let max_count = counts.iter().copied().max().unwrap_or(0);
    let occupied_cells = counts.iter().filter(|&&c| c > 0).count();
    let scale = if max_count > 0 {
        1.0 / max_count as f64
    } else {
        0.0
    };
    let values = counts.iter().map(|&c| c as f64 * scale).collect();

    Ok(DensityGrid {
        values,
        grid_size,
        max_count,
        occupied_cells,
    })
}

#[wasm_bindgen]
pub fn compute_density_grid(
    x0: f64,
    y0: f64,
    slope: f64,
    t_max: f64,
    n_points: usize,
    grid_size: usize,
) -> Result<JsValue, JsValue> {
    let slope = Slope::new(slope).map_err(|e| JsValue::from_str(&e))?;
    let grid = density_grid(Vector2::new(x0, y0), slope, t_max, n_points, grid_size)
        .map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&grid)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
