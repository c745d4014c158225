use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// One pass of the trajectory through the section plane, with both
/// angles reduced to [0, 2*pi).
///
/// For rational winding alpha = p/q the section shows p distinct
/// theta values; for irrational alpha the points densely fill the
/// theta circle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SectionCrossing {
    pub theta: f64,
    pub phi: f64,
}

/// Poincare section of the torus flow theta = t, phi = alpha * t at
/// the plane phi = section_angle (mod 2*pi).
///
/// The sampled scan records a crossing whenever the winding index
/// floor((phi - section_angle) / 2*pi) changes between consecutive
/// samples. Comparing the index instead of the sign of
/// (phi mod 2*pi - section_angle) keeps the count exact at the modulo
/// seam and for section_angle = 0.
pub fn poincare_section(
    alpha: f64,
    section_angle: f64,
    t_max: f64,
    n_samples: usize,
) -> Result<Vec<SectionCrossing>, String> {
    if !alpha.is_finite() {
        return Err("Winding number must be a finite number".to_string());
    }
    if !section_angle.is_finite() {
        return Err("Section angle must be a finite number".to_string());
    }
    if !t_max.is_finite() || t_max <= 0.0 {
        return Err("t_max must be a positive finite number".to_string());
    }
    if n_samples < 2 {
        return Err("n_samples must be at least 2".to_string());
    }

    let two_pi = 2.0 * std::f64::consts::PI;
    let last = (n_samples - 1) as f64;
    let winding_index = |t: f64| ((alpha * t - section_angle) / two_pi).floor();

    let mut crossings = Vec::new();
    let mut prev_t: f64 = 0.0;
    let mut prev_index = winding_index(0.0);
    for k in 1..n_samples {
        let t = t_max * k as f64 / last;
        let index = winding_index(t);
        if index != prev_index {
            crossings.push(SectionCrossing {
                theta: prev_t.rem_euclid(two_pi),
                phi: (alpha * prev_t).rem_euclid(two_pi),
            });
        }
        prev_t = t;
        prev_index = index;
    }
    Ok(crossings)
}

#[wasm_bindgen]
pub fn compute_poincare_section(
    alpha: f64,
    section_angle: f64,
    t_max: f64,
    n_samples: usize,
) -> Result<JsValue, JsValue> {
    let crossings = poincare_section(alpha, section_angle, t_max, n_samples)
        .map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&crossings)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// Count clusters of circle values at the given resolution.
    fn distinct_angles(mut values: Vec<f64>, tol: f64) -> usize {
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut clusters: Vec<f64> = Vec::new();
        for v in values {
            if clusters.last().map_or(true, |c| v - c > tol) {
                clusters.push(v);
            }
        }
        // The circle closes: a cluster hugging 2*pi merges with one at 0.
        if clusters.len() > 1 {
            let first = clusters[0];
            let last = clusters[clusters.len() - 1];
            if 2.0 * PI - last + first < tol {
                clusters.pop();
            }
        }
        clusters.len()
    }

    #[test]
    fn test_unit_winding_crossing_count() {
        // alpha = 1, section at pi: crossings at t = pi, 3*pi, ..., 19*pi.
        let crossings = poincare_section(1.0, PI, 20.0 * PI, 40_000).unwrap();
        assert_eq!(crossings.len(), 10);
        for c in &crossings {
            let d = (c.theta - PI).abs();
            assert!(d < 0.01, "crossing theta {} far from pi", c.theta);
        }
    }

    #[test]
    fn test_rational_winding_finite_section() {
        // alpha = 2/3: crossings of the phi = 0 plane at t = 3*pi*k,
        // alternating theta between 0 and pi: p = 2 distinct values.
        let crossings = poincare_section(2.0 / 3.0, 0.0, 12.5 * PI, 60_000).unwrap();
        assert_eq!(crossings.len(), 4);
        let thetas: Vec<f64> = crossings.iter().map(|c| c.theta).collect();
        assert_eq!(distinct_angles(thetas, 0.1), 2);
    }

    #[test]
    fn test_irrational_winding_spreads() {
        let phi_minus_one = (1.0 + 5.0_f64.sqrt()) / 2.0 - 1.0;
        let crossings = poincare_section(phi_minus_one, 0.0, 400.0, 200_000).unwrap();
        assert!(crossings.len() > 30, "only {} crossings", crossings.len());
        let thetas: Vec<f64> = crossings.iter().map(|c| c.theta).collect();
        assert!(
            distinct_angles(thetas, 0.1) >= 10,
            "section points did not spread around the circle"
        );
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(poincare_section(f64::NAN, 0.0, 10.0, 100).is_err());
        assert!(poincare_section(0.5, 0.0, 0.0, 100).is_err());
        assert!(poincare_section(0.5, 0.0, 10.0, 1).is_err());
        assert!(poincare_section(0.5, f64::INFINITY, 10.0, 100).is_err());
    }
}
