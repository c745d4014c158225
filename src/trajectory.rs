use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Embedding of the 2-torus in R^3.
///
/// theta is the poloidal angle (around the tube), phi the toroidal
/// angle (around the hole):
///
/// x = (R + r cos(theta)) cos(phi)
/// y = (R + r cos(theta)) sin(phi)
/// z = r sin(theta)
#[derive(Debug, Clone, Copy)]
pub struct TorusGeometry {
    pub major_radius: f64,
    pub minor_radius: f64,
}

impl Default for TorusGeometry {
    fn default() -> Self {
        Self {
            major_radius: 2.0,
            minor_radius: 1.0,
        }
    }
}

/// Surface sample grid, phi-major: `points[j * n_theta + i]` is the
/// embedding of (theta_i, phi_j). Both parameter grids are inclusive
/// over [0, 2*pi], so the seam is duplicated and the rendered mesh
/// closes.
#[derive(Debug, Clone)]
pub struct SurfaceGrid {
    pub points: Vec<Vector3<f64>>,
    pub n_theta: usize,
    pub n_phi: usize,
}

impl TorusGeometry {
    pub fn new(major_radius: f64, minor_radius: f64) -> Result<Self, String> {
        if !major_radius.is_finite() || !minor_radius.is_finite() {
            return Err("Radii must be finite numbers".to_string());
        }
        if minor_radius <= 0.0 {
            return Err("Minor radius must be positive".to_string());
        }
        if major_radius <= minor_radius {
            return Err("Major radius must exceed minor radius".to_string());
        }
        Ok(Self {
            major_radius,
            minor_radius,
        })
    }

    pub fn embed(&self, theta: f64, phi: f64) -> Vector3<f64> {
        let ring = self.major_radius + self.minor_radius * theta.cos();
        Vector3::new(
            ring * phi.cos(),
            ring * phi.sin(),
            self.minor_radius * theta.sin(),
        )
    }

    /// Trajectory with winding number alpha: theta = t, phi = alpha * t.
    ///
    /// Rational alpha = p/q closes after q poloidal loops; irrational
    /// alpha winds forever and is dense on the surface.
    pub fn trajectory(
        &self,
        alpha: f64,
        t_max: f64,
        n_points: usize,
    ) -> Result<Vec<Vector3<f64>>, String> {
        if !alpha.is_finite() {
            return Err("Winding number must be a finite number".to_string());
        }
        if !t_max.is_finite() || t_max <= 0.0 {
            return Err("t_max must be a positive finite number".to_string());
        }
        if n_points < 2 {
            return Err("n_points must be at least 2".to_string());
        }

        let last = (n_points - 1) as f64;
        Ok((0..n_points)
            .map(|k| {
                let t = t_max * k as f64 / last;
                self.embed(t, alpha * t)
            })
            .collect())
    }

    pub fn surface_grid(&self, n_theta: usize, n_phi: usize) -> Result<SurfaceGrid, String> {
        if n_theta < 2 || n_phi < 2 {
            return Err("Surface grid needs at least 2 samples per direction".to_string());
        }

        let two_pi = 2.0 * std::f64::consts::PI;
        let mut points = Vec::with_capacity(n_theta * n_phi);
        for j in 0..n_phi {
            let phi = two_pi * j as f64 / (n_phi - 1) as f64;
            for i in 0..n_theta {
                let theta = two_pi * i as f64 / (n_theta - 1) as f64;
                points.push(self.embed(theta, phi));
            }
        }
        Ok(SurfaceGrid {
            points,
            n_theta,
            n_phi,
        })
    }
}

#[derive(Serialize, Deserialize)]
pub struct SurfaceGridJs {
    pub points: Vec<(f64, f64, f64)>,
    pub n_theta: usize,
    pub n_phi: usize,
}

#[wasm_bindgen]
pub fn compute_torus_trajectory(
    alpha: f64,
    t_max: f64,
    n_points: usize,
    major_radius: f64,
    minor_radius: f64,
) -> Result<JsValue, JsValue> {
    let torus = TorusGeometry::new(major_radius, minor_radius).map_err(|e| JsValue::from_str(&e))?;
    let trajectory = torus
        .trajectory(alpha, t_max, n_points)
        .map_err(|e| JsValue::from_str(&e))?;
    let tuples: Vec<(f64, f64, f64)> = trajectory.iter().map(|p| (p.x, p.y, p.z)).collect();
    serde_wasm_bindgen::to_value(&tuples)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[wasm_bindgen]
pub fn compute_torus_surface(
    n_theta: usize,
    n_phi: usize,
    major_radius: f64,
    minor_radius: f64,
) -> Result<JsValue, JsValue> {
    let torus = TorusGeometry::new(major_radius, minor_radius).map_err(|e| JsValue::from_str(&e))?;
    let grid = torus
        .surface_grid(n_theta, n_phi)
        .map_err(|e| JsValue::from_str(&e))?;
    let js = SurfaceGridJs {
        points: grid.points.iter().map(|p| (p.x, p.y, p.z)).collect(),
        n_theta: grid.n_theta,
        n_phi: grid.n_phi,
    };
    serde_wasm_bindgen::to_value(&js)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
