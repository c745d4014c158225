use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Level-set functions whose zero sets approximate the classical
/// triply periodic minimal surfaces. All four are 2*pi-periodic in
/// each coordinate, so the level set tiles space like the flat torus
/// tiles the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriplyPeriodicSurface {
    SchoenIwp,
    Gyroid,
    SchwarzP,
    SchwarzD,
}

impl TriplyPeriodicSurface {
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name {
            "schoen-iwp" => Ok(Self::SchoenIwp),
            "gyroid" => Ok(Self::Gyroid),
            "schwarz-p" => Ok(Self::SchwarzP),
            "schwarz-d" => Ok(Self::SchwarzD),
            other => Err(format!("Unknown surface type: {}", other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SchoenIwp => "schoen-iwp",
            Self::Gyroid => "gyroid",
            Self::SchwarzP => "schwarz-p",
            Self::SchwarzD => "schwarz-d",
        }
    }

    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        match self {
            Self::SchoenIwp => {
                x.cos() * y.cos() + y.cos() * z.cos() + z.cos() * x.cos()
            }
            Self::Gyroid => x.sin() * y.cos() + y.sin() * z.cos() + z.sin() * x.cos(),
            Self::SchwarzP => x.cos() + y.cos() + z.cos(),
            Self::SchwarzD => {
                x.sin() * y.sin() * z.sin()
                    + x.sin() * y.cos() * z.cos()
                    + x.cos() * y.sin() * z.cos()
                    + x.cos() * y.cos() * z.sin()
            }
        }
    }
}

/// Scalar field sampled on a uniform inclusive grid, ready for a
/// marching-cubes consumer. x-major ordering:
/// `values[(ix * resolution + iy) * resolution + iz]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeField {
    pub values: Vec<f64>,
    pub resolution: usize,
    pub min_bound: f64,
    pub max_bound: f64,
}

/// Evaluate the surface function over a resolution^3 grid spanning
/// [min_bound, max_bound] in each coordinate.
pub fn sample_volume(
    surface: TriplyPeriodicSurface,
    min_bound: f64,
    max_bound: f64,
    resolution: usize,
) -> Result<VolumeField, String> {
    if !min_bound.is_finite() || !max_bound.is_finite() || min_bound >= max_bound {
        return Err("Volume bounds must be finite and non-empty".to_string());
    }
    if resolution < 2 {
        return Err("resolution must be at least 2".to_string());
    }

    let last = (resolution - 1) as f64;
    let coord = |k: usize| min_bound + (max_bound - min_bound) * k as f64 / last;

    let mut values = Vec::with_capacity(resolution * resolution * resolution);
    for ix in 0..resolution {
        let x = coord(ix);
        for iy in 0..resolution {
            let y = coord(iy);
            for iz in 0..resolution {
                values.push(surface.evaluate(x, y, coord(iz)));
            }
        }
    }

    Ok(VolumeField {
        values,
        resolution,
        min_bound,
        max_bound,
    })
}

#[wasm_bindgen]
pub fn sample_triply_periodic(
    name: &str,
    min_bound: f64,
    max_bound: f64,
    resolution: usize,
) -> Result<JsValue, JsValue> {
    let surface = TriplyPeriodicSurface::from_name(name).map_err(|e| JsValue::from_str(&e))?;
    let field = sample_volume(surface, min_bound, max_bound, resolution)
        .map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&field)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_values_at_origin() {
        assert!((TriplyPeriodicSurface::SchwarzP.evaluate(0.0, 0.0, 0.0) - 3.0).abs() < 1e-12);
        assert!((TriplyPeriodicSurface::SchoenIwp.evaluate(0.0, 0.0, 0.0) - 3.0).abs() < 1e-12);
        assert!(TriplyPeriodicSurface::Gyroid.evaluate(0.0, 0.0, 0.0).abs() < 1e-12);
        assert!(TriplyPeriodicSurface::SchwarzD.evaluate(0.0, 0.0, 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_triple_periodicity() {
        let point = (0.7, -1.3, 2.1);
        let two_pi = 2.0 * PI;
        for surface in [
            TriplyPeriodicSurface::SchoenIwp,
            TriplyPeriodicSurface::Gyroid,
            TriplyPeriodicSurface::SchwarzP,
            TriplyPeriodicSurface::SchwarzD,
        ] {
            let base = surface.evaluate(point.0, point.1, point.2);
            let shifted = surface.evaluate(point.0 + two_pi, point.1 - two_pi, point.2 + two_pi);
            assert!(
                (base - shifted).abs() < 1e-9,
                "{} not periodic: {} vs {}",
                surface.name(),
                base,
                shifted
            );
        }
    }

    #[test]
    fn test_name_round_trip() {
        for name in ["schoen-iwp", "gyroid", "schwarz-p", "schwarz-d"] {
            let surface = TriplyPeriodicSurface::from_name(name).unwrap();
            assert_eq!(surface.name(), name);
        }
        assert!(TriplyPeriodicSurface::from_name("klein-bottle").is_err());
    }

    #[test]
    fn test_sample_volume_layout() {
        let field =
            sample_volume(TriplyPeriodicSurface::SchwarzP, -PI, PI, 11).unwrap();
        assert_eq!(field.values.len(), 11 * 11 * 11);

        // Grid midpoint is the origin.
        let mid = 5;
        let center = field.values[(mid * 11 + mid) * 11 + mid];
        assert!((center - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(sample_volume(TriplyPeriodicSurface::Gyroid, 1.0, -1.0, 10).is_err());
        assert!(sample_volume(TriplyPeriodicSurface::Gyroid, -1.0, 1.0, 1).is_err());
        assert!(sample_volume(TriplyPeriodicSurface::Gyroid, f64::NAN, 1.0, 10).is_err());
    }
}
