use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// The golden ratio (1 + sqrt(5)) / 2, the "most irrational" winding
/// number in the continued fraction sense.
pub fn golden_ratio() -> f64 {
    (1.0 + 5.0_f64.sqrt()) / 2.0
}

/// Named irrational constants used as preset slopes in the dashboard.
pub fn common_irrationals() -> Vec<(&'static str, f64)> {
    let phi = golden_ratio();
    vec![
        ("sqrt(2)", 2.0_f64.sqrt()),
        ("sqrt(3)", 3.0_f64.sqrt()),
        ("sqrt(5)", 5.0_f64.sqrt()),
        ("phi (golden ratio)", phi),
        ("pi", std::f64::consts::PI),
        ("e", std::f64::consts::E),
        ("sqrt(2)/2", 2.0_f64.sqrt() / 2.0),
        ("phi - 1", phi - 1.0),
        ("1/phi", 1.0 / phi),
    ]
}

/// f(x) = sum_i cos(2*pi * omega_i * x). Incommensurable frequencies
/// make the sum quasiperiodic: it never repeats but returns arbitrarily
/// close to every value it attains.
pub fn quasiperiodic_sum(x: f64, frequencies: &[f64]) -> f64 {
    frequencies
        .iter()
        .map(|omega| (2.0 * std::f64::consts::PI * omega * x).cos())
        .sum()
}

/// Sample the quasiperiodic sum uniformly over [x_min, x_max].
pub fn sample_quasiperiodic(
    frequencies: &[f64],
    x_min: f64,
    x_max: f64,
    n_points: usize,
) -> Result<Vec<(f64, f64)>, String> {
    if frequencies.iter().any(|f| !f.is_finite()) {
        return Err("Frequencies must be finite numbers".to_string());
    }
    if !x_min.is_finite() || !x_max.is_finite() || x_min >= x_max {
        return Err("Sampling interval must be finite and non-empty".to_string());
    }
    if n_points < 2 {
        return Err("n_points must be at least 2".to_string());
    }

    let last = (n_points - 1) as f64;
    Ok((0..n_points)
        .map(|k| {
            let x = x_min + (x_max - x_min) * k as f64 / last;
            (x, quasiperiodic_sum(x, frequencies))
        })
        .collect())
}

#[derive(Serialize, Deserialize)]
pub struct NamedConstant {
    pub name: String,
    pub value: f64,
}

#[wasm_bindgen]
pub fn list_common_irrationals() -> Result<JsValue, JsValue> {
    let constants: Vec<NamedConstant> = common_irrationals()
        .into_iter()
        .map(|(name, value)| NamedConstant {
            name: name.to_string(),
            value,
        })
        .collect();
    serde_wasm_bindgen::to_value(&constants)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[wasm_bindgen]
pub fn compute_quasiperiodic_samples(
    frequencies: Vec<f64>,
    x_min: f64,
    x_max: f64,
    n_points: usize,
) -> Result<JsValue, JsValue> {
    let samples = sample_quasiperiodic(&frequencies, x_min, x_max, n_points)
        .map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&samples)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_ratio_identity() {
        // phi^2 = phi + 1
        let phi = golden_ratio();
        assert!((phi * phi - phi - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_frequency_is_cosine() {
        let f = quasiperiodic_sum(0.25, &[1.0]);
        assert!(f.abs() < 1e-12, "cos(pi/2) should be 0, got {}", f);
        assert!((quasiperiodic_sum(0.0, &[1.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sum_bounds() {
        let freqs = [1.0, 2.0_f64.sqrt(), golden_ratio()];
        let samples = sample_quasiperiodic(&freqs, 0.0, 50.0, 10_000).unwrap();
        assert_eq!(samples.len(), 10_000);
        for (_, f) in samples {
            assert!(f.abs() <= 3.0 + 1e-12, "sum of 3 cosines exceeded 3: {}", f);
        }
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(sample_quasiperiodic(&[f64::NAN], 0.0, 1.0, 100).is_err());
        assert!(sample_quasiperiodic(&[1.0], 1.0, 0.0, 100).is_err());
        assert!(sample_quasiperiodic(&[1.0], 0.0, 1.0, 1).is_err());
    }
}
