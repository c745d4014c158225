use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::flat_torus::{slope_between, Slope};

/// Knobs for the rationality test.
///
/// The test is approximate by construction: an irrational slope lying
/// within `tolerance` of a fraction with denominator <= `max_denominator`
/// classifies as Periodic. That is the intended policy, not a defect;
/// detecting exact algebraic rationality of a float is meaningless. The
/// tolerance must sit well below the best-approximation error scale
/// 1/max_denominator^2, otherwise every badly approximable number
/// (sqrt(2)-1, the golden mean) lands inside it.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyConfig {
    pub tolerance: f64,
    pub max_denominator: i64,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_denominator: 10_000,
        }
    }
}

impl ClassifyConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err("Tolerance must be a positive finite number".to_string());
        }
        if self.max_denominator < 1 {
            return Err("Max denominator must be at least 1".to_string());
        }
        Ok(())
    }
}

/// How a geodesic with this slope behaves on the flat torus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlopeCategory {
    Periodic,
    Dense,
    Vertical,
}

/// Immutable record describing one slope. `numerator`/`denominator`
/// hold the best rational approximation within the denominator bound;
/// for the vertical case the formal fraction 1/0 is reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlopeClassification {
    pub slope: f64,
    pub is_rational: bool,
    pub numerator: i64,
    pub denominator: i64,
    pub approx: String,
    pub category: SlopeCategory,
    pub description: String,
}

/// Best rational approximation p/q to x with q <= max_denominator.
///
/// Runs the continued fraction expansion of x, keeping the last
/// convergent whose denominator stays within the bound, then compares
/// it against the largest in-bound semiconvergent; the closer of the
/// two is the true best approximation under the denominator bound.
///
/// The expansion is exact integer arithmetic on round(x * 2^62) / 2^62
/// rather than repeated float division, which loses the trailing
/// partial quotients to rounding noise for denominators near the
/// bound. Doubles at or above 2^53 are exact integers, so they
/// short-circuit to p/1.
pub fn best_rational_approximation(x: f64, max_denominator: i64) -> (i64, i64) {
    const TWO_53: f64 = 9_007_199_254_740_992.0;
    if x == 0.0 {
        return (0, 1);
    }
    if x.abs() >= TWO_53 {
        return (x as i64, 1);
    }

    const SCALE_BITS: u32 = 62;
    // Exact: scaling by a power of two only shifts the exponent.
    let mut n = (x * (1u64 << SCALE_BITS) as f64).round() as i128;
    let mut d = 1i128 << SCALE_BITS;
    let bound = max_denominator.max(1) as i128;

    let (mut p0, mut q0, mut p1, mut q1): (i128, i128, i128, i128) = (0, 1, 1, 0);
    loop {
        let a = n.div_euclid(d);
        let q2 = q0 + a * q1;
        if q2 > bound {
            break;
        }
        let p2 = p0 + a * p1;
        p0 = p1;
        q0 = q1;
        p1 = p2;
        q1 = q2;
        let r = n - a * d;
        n = d;
        d = r;
        if d == 0 {
            // Exact: x is a dyadic rational within the bound.
            return (p1 as i64, q1 as i64);
        }
    }

    // Largest semiconvergent still within the bound.
    let k = (bound - q0) / q1;
    let (sp, sq) = (p0 + k * p1, q0 + k * q1);
    // |p| <= |x|*q + 1 stays below 2^53: fractional precision and
    // magnitude trade off in doubles, so the i64 casts cannot truncate.
    let e_semi = (x - sp as f64 / sq as f64).abs();
    let e_conv = (x - p1 as f64 / q1 as f64).abs();
    if e_conv <= e_semi {
        (p1 as i64, q1 as i64)
    } else {
        (sp as i64, sq as i64)
    }
}

/// Classify a slope as Periodic (rational), Dense (irrational) or
/// Vertical, with the best rational approximation attached.
///
/// Rational p/q closes after q wraps; irrational never closes and
/// fills the square densely. The judgment is the threshold test
/// |slope - p/q| < tolerance, see `ClassifyConfig`.
pub fn classify_slope(
    slope: Slope,
    config: &ClassifyConfig,
) -> Result<SlopeClassification, String> {
    config.validate()?;

    let value = match slope {
        Slope::Vertical => {
            return Ok(SlopeClassification {
                slope: f64::INFINITY,
                is_rational: true,
                numerator: 1,
                denominator: 0,
                approx: "∞".to_string(),
                category: SlopeCategory::Vertical,
                description: "Vertical line - wraps horizontally".to_string(),
            });
        }
        Slope::Finite(v) => v,
    };
    if value.is_nan() {
        return Err("Slope must not be NaN".to_string());
    }

    let (p, q) = best_rational_approximation(value, config.max_denominator);
    let error = (value - p as f64 / q as f64).abs();

    if error < config.tolerance {
        Ok(SlopeClassification {
            slope: value,
            is_rational: true,
            numerator: p,
            denominator: q,
            approx: format!("{}/{}", p, q),
            category: SlopeCategory::Periodic,
            description: format!("Rational slope {}/{} - closes after {} wraps", p, q, q),
        })
    } else {
        Ok(SlopeClassification {
            slope: value,
            is_rational: false,
            numerator: p,
            denominator: q,
            approx: format!("≈ {}/{}", p, q),
            category: SlopeCategory::Dense,
            description: format!(
                "Irrational slope ≈ {:.6} - never closes, fills the square densely",
                value
            ),
        })
    }
}

/// Classification entry point for the dashboard. JS passes Infinity
/// for a vertical line.
#[wasm_bindgen]
pub fn classify_slope_value(slope: f64) -> Result<JsValue, JsValue> {
    let slope = Slope::new(slope).map_err(|e| JsValue::from_str(&e))?;
    let classification =
        classify_slope(slope, &ClassifyConfig::default()).map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&classification)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Slope through two clicked points, Infinity when the run is
/// effectively zero.
#[wasm_bindgen]
pub fn slope_between_points(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    slope_between(Vector2::new(x1, y1), Vector2::new(x2, y2)).value()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(v: f64) -> SlopeClassification {
        classify_slope(Slope::Finite(v), &ClassifyConfig::default()).unwrap()
    }

    #[test]
    fn test_one_half_is_periodic() {
        let c = classify(0.5);
        assert!(c.is_rational);
        assert_eq!(c.numerator, 1);
        assert_eq!(c.denominator, 2);
        assert_eq!(c.category, SlopeCategory::Periodic);
    }

    #[test]
    fn test_two_thirds_description() {
        let c = classify(2.0 / 3.0);
        assert_eq!((c.numerator, c.denominator), (2, 3));
        assert!(c.description.contains("2/3"));
        assert!(c.description.contains("3 wraps"));
    }

    #[test]
    fn test_rational_round_trip() {
        let cases: [(i64, i64); 7] = [
            (1, 2),
            (2, 3),
            (3, 7),
            (-5, 9),
            (7, 1),
            (355, 113),
            (9973, 9999),
        ];
        for (p, q) in cases {
            let c = classify(p as f64 / q as f64);
            assert!(c.is_rational, "{}/{} should be rational", p, q);
            assert_eq!(
                (c.numerator, c.denominator),
                (p, q),
                "failed to recover {}/{}",
                p,
                q
            );
        }
    }

    #[test]
    fn test_sqrt2_minus_one_is_dense() {
        let c = classify(std::f64::consts::SQRT_2 - 1.0);
        assert!(!c.is_rational);
        assert_eq!(c.category, SlopeCategory::Dense);
        assert!(c.denominator >= 1 && c.denominator <= 10_000);
        let err = (c.slope - c.numerator as f64 / c.denominator as f64).abs();
        assert!(err >= 1e-9, "best approximation unexpectedly tight: {}", err);
    }

    #[test]
    fn test_golden_mean_is_dense() {
        let phi_minus_one = (1.0 + 5.0_f64.sqrt()) / 2.0 - 1.0;
        let c = classify(phi_minus_one);
        assert!(!c.is_rational);
        assert_eq!(c.category, SlopeCategory::Dense);
    }

    #[test]
    fn test_pi_best_approximation() {
        // The best approximation under 10^4 is famously Milü, 355/113.
        let c = classify(std::f64::consts::PI);
        assert_eq!((c.numerator, c.denominator), (355, 113));
        assert!(!c.is_rational);
    }

    #[test]
    fn test_denominator_never_exceeds_bound() {
        let slopes = [
            std::f64::consts::E,
            std::f64::consts::PI / 4.0,
            3.0_f64.sqrt(),
            0.123456789,
            -2.718281828,
        ];
        for &s in &slopes {
            let c = classify(s);
            assert!(
                c.denominator >= 1 && c.denominator <= 10_000,
                "denominator {} out of bounds for slope {}",
                c.denominator,
                s
            );
        }
    }

    #[test]
    fn test_vertical_classification() {
        let c = classify_slope(Slope::Vertical, &ClassifyConfig::default()).unwrap();
        assert_eq!(c.category, SlopeCategory::Vertical);
        assert!(c.is_rational);
        assert_eq!((c.numerator, c.denominator), (1, 0));
        assert!(c.slope.is_infinite());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(Slope::new(f64::NAN).is_err());
        assert!(classify_slope(Slope::Finite(f64::NAN), &ClassifyConfig::default()).is_err());
    }

    #[test]
    fn test_near_rational_inside_tolerance() {
        // The threshold policy: within tolerance of 1/3 counts as 1/3.
        let c = classify(1.0 / 3.0 + 5e-10);
        assert!(c.is_rational);
        assert_eq!((c.numerator, c.denominator), (1, 3));
    }

    #[test]
    fn test_negative_slope() {
        let c = classify(-0.5);
        assert!(c.is_rational);
        assert_eq!((c.numerator, c.denominator), (-1, 2));
    }

    #[test]
    fn test_zero_slope() {
        let c = classify(0.0);
        assert!(c.is_rational);
        assert_eq!((c.numerator, c.denominator), (0, 1));
    }

    #[test]
    fn test_invalid_config() {
        let bad_tol = ClassifyConfig {
            tolerance: 0.0,
            max_denominator: 100,
        };
        assert!(classify_slope(Slope::Finite(0.5), &bad_tol).is_err());
        let bad_den = ClassifyConfig {
            tolerance: 1e-9,
            max_denominator: 0,
        };
        assert!(classify_slope(Slope::Finite(0.5), &bad_den).is_err());
    }
}
