use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::quasiperiodic::golden_ratio;

/// The two Robinson triangle species of the P3 Penrose tiling. An
/// acute triangle subdivides into 2 children, an obtuse one into 3,
/// with every cut placed at a golden-ratio point of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriangleKind {
    Acute,
    Obtuse,
}

#[derive(Debug, Clone, Copy)]
pub struct RobinsonTriangle {
    pub kind: TriangleKind,
    pub a: Vector2<f64>,
    pub b: Vector2<f64>,
    pub c: Vector2<f64>,
}

/// Initial wheel of n acute triangles around the origin in alternating
/// mirror orientation, the seed from which subdivision develops the
/// tiling's five-fold symmetry. n = 10 is the standard start.
pub fn penrose_wheel(n: usize, scale: f64) -> Vec<RobinsonTriangle> {
    let two_pi = 2.0 * std::f64::consts::PI;
    (0..n)
        .map(|i| {
            let angle = two_pi * i as f64 / n as f64;
            let next = angle + two_pi / n as f64;
            let a = Vector2::new(0.0, 0.0);
            let b = Vector2::new(scale * angle.cos(), scale * angle.sin());
            let c = Vector2::new(scale * next.cos(), scale * next.sin());
            if i % 2 == 0 {
                RobinsonTriangle {
                    kind: TriangleKind::Acute,
                    a,
                    b,
                    c,
                }
            } else {
                RobinsonTriangle {
                    kind: TriangleKind::Acute,
                    a,
                    b: c,
                    c: b,
                }
            }
        })
        .collect()
}

/// One round of Robinson subdivision. Children partition their parent
/// exactly, so the covered area is invariant.
pub fn subdivide(triangles: &[RobinsonTriangle]) -> Vec<RobinsonTriangle> {
    let phi = golden_ratio();
    let mut result = Vec::with_capacity(triangles.len() * 3);

    for tri in triangles {
        let (a, b, c) = (tri.a, tri.b, tri.c);
        match tri.kind {
            TriangleKind::Acute => {
                let p = a + (b - a) / phi;
                result.push(RobinsonTriangle {
                    kind: TriangleKind::Acute,
                    a: c,
                    b: p,
                    c: b,
                });
                result.push(RobinsonTriangle {
                    kind: TriangleKind::Obtuse,
                    a: p,
                    b: c,
                    c: a,
                });
            }
            TriangleKind::Obtuse => {
                let q = b + (a - b) / phi;
                let r = b + (c - b) / phi;
                result.push(RobinsonTriangle {
                    kind: TriangleKind::Obtuse,
                    a: r,
                    b: c,
                    c: a,
                });
                result.push(RobinsonTriangle {
                    kind: TriangleKind::Obtuse,
                    a: q,
                    b: r,
                    c: b,
                });
                result.push(RobinsonTriangle {
                    kind: TriangleKind::Acute,
                    a: r,
                    b: q,
                    c: a,
                });
            }
        }
    }
    result
}

pub struct PenroseTiling {
    pub scale: f64,
}

impl PenroseTiling {
    pub fn new(scale: f64) -> Result<Self, String> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err("Scale must be a positive finite number".to_string());
        }
        Ok(Self { scale })
    }

    /// Subdivide the standard 10-triangle wheel `iterations` times.
    /// Obtuse triangles triple each round, so the count is capped.
    pub fn generate(&self, iterations: usize) -> Result<Vec<RobinsonTriangle>, String> {
        if iterations > 12 {
            return Err("iterations must be at most 12".to_string());
        }
        let mut triangles = penrose_wheel(10, self.scale);
        for _ in 0..iterations {
            triangles = subdivide(&triangles);
        }
        Ok(triangles)
    }
}

/// 1-D quasicrystal from the cut-and-project method: take the square
/// lattice, keep the points lying in a thin strip around the line of
/// the given slope, and project them onto that line. An irrational
/// slope yields a quasiperiodic point set (spacings follow a Fibonacci
/// word for the golden slope); a rational slope yields an ordinary
/// periodic one.
#[derive(Debug, Clone)]
pub struct CutAndProject {
    pub projected: Vec<f64>,
    pub lattice: Vec<Vector2<f64>>,
    pub accepted: Vec<Vector2<f64>>,
}

pub fn cut_and_project(
    slope: f64,
    n_points: usize,
    window_width: f64,
) -> Result<CutAndProject, String> {
    if !slope.is_finite() {
        return Err("Projection slope must be a finite number".to_string());
    }
    if n_points < 4 {
        return Err("n_points must be at least 4".to_string());
    }
    if !window_width.is_finite() || window_width <= 0.0 {
        return Err("Window width must be a positive finite number".to_string());
    }

    let half = (n_points as f64).sqrt() as i64;
    let theta = slope.atan();
    let proj_dir = Vector2::new(theta.cos(), theta.sin());
    let perp_dir = Vector2::new(-theta.sin(), theta.cos());

    let mut lattice = Vec::with_capacity((2 * half as usize) * (2 * half as usize));
    let mut accepted = Vec::new();
    let mut projected = Vec::new();
    for i in -half..half {
        for j in -half..half {
            let point = Vector2::new(i as f64, j as f64);
            lattice.push(point);
            if point.dot(&perp_dir).abs() < window_width {
                accepted.push(point);
                projected.push(point.dot(&proj_dir));
            }
        }
    }
    projected.sort_by(|a, b| a.partial_cmp(b).expect("projections are finite"));

    Ok(CutAndProject {
        projected,
        lattice,
        accepted,
    })
}

#[derive(Serialize, Deserialize)]
pub struct PenroseTriangleJs {
    pub kind: TriangleKind,
    pub vertices: Vec<(f64, f64)>,
}

#[wasm_bindgen]
pub fn generate_penrose_tiling(scale: f64, iterations: usize) -> Result<JsValue, JsValue> {
    let tiling = PenroseTiling::new(scale).map_err(|e| JsValue::from_str(&e))?;
    let triangles = tiling.generate(iterations).map_err(|e| JsValue::from_str(&e))?;
    let js: Vec<PenroseTriangleJs> = triangles
        .iter()
        .map(|t| PenroseTriangleJs {
            kind: t.kind,
            vertices: vec![(t.a.x, t.a.y), (t.b.x, t.b.y), (t.c.x, t.c.y)],
        })
        .collect();
    serde_wasm_bindgen::to_value(&js)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[derive(Serialize, Deserialize)]
pub struct CutAndProjectJs {
    pub projected: Vec<f64>,
    pub lattice: Vec<(f64, f64)>,
    pub accepted: Vec<(f64, f64)>,
}

#[wasm_bindgen]
pub fn compute_cut_and_project(
    slope: f64,
    n_points: usize,
    window_width: f64,
) -> Result<JsValue, JsValue> {
    let result = cut_and_project(slope, n_points, window_width).map_err(|e| JsValue::from_str(&e))?;
    let js = CutAndProjectJs {
        projected: result.projected,
        lattice: result.lattice.iter().map(|p| (p.x, p.y)).collect(),
        accepted: result.accepted.iter().map(|p| (p.x, p.y)).collect(),
    };
    serde_wasm_bindgen::to_value(&js)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
