use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::winding::{classify_slope, ClassifyConfig, SlopeClassification};

/// Direction of a geodesic on the flat torus.
///
/// The flat torus is the unit square [0,1) x [0,1) with opposite edges
/// identified. A geodesic is a straight line on the universal cover,
/// parametrized as (x0 + t, y0 + slope*t), or (x0, y0 + t) for the
/// vertical case. The slope decides everything:
/// rational p/q => the orbit closes after q wraps,
/// irrational => the orbit is dense in the square (Veech dichotomy).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slope {
    Finite(f64),
    Vertical,
}

impl Slope {
    /// Build a slope from a raw value. NaN has no place on the torus;
    /// infinities collapse to the vertical case.
    pub fn new(value: f64) -> Result<Slope, String> {
        if value.is_nan() {
            return Err("Slope must not be NaN".to_string());
        }
        if value.is_infinite() {
            return Ok(Slope::Vertical);
        }
        Ok(Slope::Finite(value))
    }

    /// The raw value, with the vertical case mapped to +infinity.
    pub fn value(&self) -> f64 {
        match self {
            Slope::Finite(v) => *v,
            Slope::Vertical => f64::INFINITY,
        }
    }
}

/// Rise over run between two clicked points. Runs shorter than 1e-10
/// count as vertical.
pub fn slope_between(p1: Vector2<f64>, p2: Vector2<f64>) -> Slope {
    let dx = p2.x - p1.x;
    if dx.abs() < 1e-10 {
        Slope::Vertical
    } else {
        Slope::Finite((p2.y - p1.y) / dx)
    }
}

/// Reduce a coordinate to [0, 1), the torus identification.
///
/// Written as ((v % 1) + 1) % 1 so the result is non-negative for
/// negative input and the rounding edge at -1e-17 still lands on 0.0
/// rather than 1.0.
pub fn wrap_unit(v: f64) -> f64 {
    ((v % 1.0) + 1.0) % 1.0
}

/// A maximal run of wrapped points with no edge crossing inside it.
/// Always at least 2 points; consecutive points never differ by more
/// than 0.5 on either axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub points: Vec<Vector2<f64>>,
}

/// A geodesic reduced to the unit square, split into drawable segments.
///
/// `wrap_count` is the number of edge crossings between retained
/// segments: concatenating all segment point lists and counting the
/// transitions where consecutive points jump by more than 0.5 on either
/// axis reproduces it exactly. `end_point` is the wrapped position of
/// the final raw sample, kept even when the trailing run is too short
/// to draw (a closed orbit ends exactly on its starting point).
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub segments: Vec<Segment>,
    pub wrap_count: usize,
    pub end_point: Vector2<f64>,
}

fn wrap_jump(a: &Vector2<f64>, b: &Vector2<f64>) -> bool {
    (a.x - b.x).abs() > 0.5 || (a.y - b.y).abs() > 0.5
}

/// Sample the geodesic uniformly over [0, t_max] and wrap each
/// coordinate to the unit square.
pub(crate) fn wrapped_samples(
    start: Vector2<f64>,
    slope: Slope,
    t_max: f64,
    n_samples: usize,
) -> Result<Vec<Vector2<f64>>, String> {
    if !start.x.is_finite() || !start.y.is_finite() {
        return Err("Start coordinates must be finite".to_string());
    }
    if !t_max.is_finite() || t_max <= 0.0 {
        return Err("t_max must be a positive finite number".to_string());
    }
    if n_samples < 2 {
        return Err("n_samples must be at least 2".to_string());
    }
    if let Slope::Finite(v) = slope {
        if !v.is_finite() {
            return Err("Slope must be finite or vertical".to_string());
        }
    }

    let last = (n_samples - 1) as f64;
    let points = (0..n_samples)
        .map(|k| {
            let t = t_max * k as f64 / last;
            let raw = match slope {
                Slope::Finite(v) => Vector2::new(start.x + t, start.y + v * t),
                Slope::Vertical => Vector2::new(start.x, start.y + t),
            };
            Vector2::new(wrap_unit(raw.x), wrap_unit(raw.y))
        })
        .collect();
    Ok(points)
}

/// Fold the wrapped samples into maximal runs, starting a new run at
/// every jump larger than 0.5 on either axis (the signature of a modulo
/// wrap rather than continuous motion). Runs with fewer than 2 points
/// carry no visual information and are dropped.
fn split_at_wraps(points: &[Vector2<f64>]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = vec![points[0]];

    for pair in points.windows(2) {
        if wrap_jump(&pair[0], &pair[1]) {
            if current.len() >= 2 {
                segments.push(Segment {
                    points: std::mem::take(&mut current),
                });
            } else {
                current.clear();
            }
        }
        current.push(pair[1]);
    }
    if current.len() >= 2 {
        segments.push(Segment { points: current });
    }

    segments
}

fn count_wraps(segments: &[Segment]) -> usize {
    segments
        .windows(2)
        .filter(|pair| {
            let last = pair[0].points.last().expect("segments are non-empty");
            let first = pair[1].points.first().expect("segments are non-empty");
            wrap_jump(last, first)
        })
        .count()
}

/// Trace a geodesic on the flat torus.
///
/// Samples t uniformly over [0, t_max] at `n_samples` points, wraps
/// each raw point to the unit square and splits the result at edge
/// crossings. Deterministic: identical inputs produce bit-identical
/// output.
pub fn generate_wrapped_line(
    start: Vector2<f64>,
    slope: Slope,
    t_max: f64,
    n_samples: usize,
) -> Result<WrappedLine, String> {
    let points = wrapped_samples(start, slope, t_max, n_samples)?;
    let end_point = *points.last().expect("n_samples >= 2");
    let segments = split_at_wraps(&points);
    let wrap_count = count_wraps(&segments);

    Ok(WrappedLine {
        segments,
        wrap_count,
        end_point,
    })
}

/// Geometry for one animation frame per call, with the traced range
/// growing by `wraps_per_frame` each frame. Sample counts scale with
/// the traced range so the polyline density stays roughly constant.
pub fn animate_wrapped_line(
    start: Vector2<f64>,
    slope: Slope,
    n_frames: usize,
    wraps_per_frame: f64,
) -> Result<Vec<WrappedLine>, String> {
    if n_frames == 0 {
        return Err("n_frames must be at least 1".to_string());
    }
    if !wraps_per_frame.is_finite() || wraps_per_frame <= 0.0 {
        return Err("wraps_per_frame must be a positive finite number".to_string());
    }

    let mut frames = Vec::with_capacity(n_frames);
    for frame_idx in 0..n_frames {
        let t_max = (frame_idx + 1) as f64 * wraps_per_frame;
        let n_samples = match slope {
            Slope::Vertical => ((t_max * 100.0) as usize).max(2),
            Slope::Finite(_) => (t_max * 200.0) as usize + 10,
        };
        frames.push(generate_wrapped_line(start, slope, t_max, n_samples)?);
    }
    Ok(frames)
}

#[derive(Serialize, Deserialize)]
pub struct WrappedLineJs {
    pub segments: Vec<Vec<(f64, f64)>>,
    pub wrap_count: usize,
    pub end_point: (f64, f64),
}

impl From<&WrappedLine> for WrappedLineJs {
    fn from(line: &WrappedLine) -> Self {
        WrappedLineJs {
            segments: line
                .segments
                .iter()
                .map(|seg| seg.points.iter().map(|p| (p.x, p.y)).collect())
                .collect(),
            wrap_count: line.wrap_count,
            end_point: (line.end_point.x, line.end_point.y),
        }
    }
}

/// Static (non-animated) flat torus geodesic for the dashboard.
#[wasm_bindgen]
pub fn generate_flat_torus_line(
    x0: f64,
    y0: f64,
    slope: f64,
    t_max: f64,
    n_samples: usize,
) -> Result<JsValue, JsValue> {
    let slope = Slope::new(slope).map_err(|e| JsValue::from_str(&e))?;
    let line = generate_wrapped_line(Vector2::new(x0, y0), slope, t_max, n_samples)
        .map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&WrappedLineJs::from(&line))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Animation driver for the interactive flat torus view: precomputes
/// all frames up front, then the UI steps through them on its timer.
#[wasm_bindgen]
pub struct FlatTorusExplorer {
    frames: Vec<WrappedLine>,
    classification: SlopeClassification,
    current_frame: usize,
}

#[wasm_bindgen]
impl FlatTorusExplorer {
    #[wasm_bindgen(constructor)]
    pub fn new(
        x0: f64,
        y0: f64,
        slope: f64,
        n_frames: usize,
        wraps_per_frame: f64,
    ) -> Result<FlatTorusExplorer, JsValue> {
        console_error_panic_hook::set_once();

        let slope = Slope::new(slope).map_err(|e| JsValue::from_str(&e))?;
        let frames = animate_wrapped_line(Vector2::new(x0, y0), slope, n_frames, wraps_per_frame)
            .map_err(|e| JsValue::from_str(&e))?;
        let classification =
            classify_slope(slope, &ClassifyConfig::default()).map_err(|e| JsValue::from_str(&e))?;

        Ok(Self {
            frames,
            classification,
            current_frame: 0,
        })
    }

    #[wasm_bindgen(js_name = getCurrentFrame)]
    pub fn get_current_frame(&self) -> Result<JsValue, JsValue> {
        let frame = &self.frames[self.current_frame];
        serde_wasm_bindgen::to_value(&WrappedLineJs::from(frame))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = getClassification)]
    pub fn get_classification(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.classification)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen]
    pub fn step(&mut self) -> bool {
        if self.current_frame + 1 < self.frames.len() {
            self.current_frame += 1;
            true
        } else {
            false
        }
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.current_frame = 0;
    }

    #[wasm_bindgen(js_name = getTotalFrames)]
    pub fn get_total_frames(&self) -> usize {
        self.frames.len()
    }

    #[wasm_bindgen(js_name = getCurrentFrameIndex)]
    pub fn get_current_frame_index(&self) -> usize {
        self.current_frame
    }
}
