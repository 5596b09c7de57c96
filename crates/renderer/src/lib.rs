//! Renderer-facing contract for the vital-sign traces.
//!
//! Drawing itself happens outside this workspace.  This crate maps a sample
//! window onto a pixel viewport as a polyline and packages it, together with
//! the display stats, into a [`Frame`] that an external renderer can consume
//! as one JSON line per tick.

use serde::{Deserialize, Serialize};
use vitals_config::{RenderConfig, VitalsConfig};
use vitals_core::{Result, SignalKind, VitalsError};
use vitals_waveform::SignalController;

/// Pixel rectangle a trace is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x:      f32,
    pub y:      f32,
    pub width:  f32,
    pub height: f32,
}

impl Viewport {
    pub fn from_config(cfg: &RenderConfig) -> Self {
        Self {
            x:      0.0,
            y:      0.0,
            width:  cfg.width,
            height: cfg.height,
        }
    }
}

/// Vertical mapping of sample values into a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceScale {
    /// Value drawn on the baseline.
    pub reference:      f32,
    /// Value delta that spans one amplitude band.
    pub scale:          f32,
    pub baseline_frac:  f32,
    pub amplitude_frac: f32,
}

impl TraceScale {
    /// Per-signal scale from the resolved config.
    pub fn for_signal(config: &VitalsConfig, kind: SignalKind) -> Self {
        let wave = config.waveform(kind);
        Self {
            reference:      wave.reference,
            scale:          wave.scale,
            baseline_frac:  config.render.baseline_frac,
            amplitude_frac: config.render.amplitude_frac,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Map samples (oldest first) to polyline points.
///
/// Sample `i` of `n` lands at `x = viewport.x + i * width / n` and
/// `y = baseline + (value - reference) / scale * amplitude`, where the
/// baseline and amplitude are fractions of the viewport height.
pub fn polyline<I>(samples: I, viewport: Viewport, trace: TraceScale) -> Vec<Point>
where
    I: IntoIterator<Item = f32>,
    I::IntoIter: ExactSizeIterator,
{
    let samples = samples.into_iter();
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }

    let step = viewport.width / n as f32;
    let baseline = viewport.y + viewport.height * trace.baseline_frac;
    let amplitude = viewport.height * trace.amplitude_frac;
    let scale = if trace.scale == 0.0 { 1.0 } else { trace.scale };

    samples
        .enumerate()
        .map(|(i, v)| Point {
            x: viewport.x + i as f32 * step,
            y: baseline + (v - trace.reference) / scale * amplitude,
        })
        .collect()
}

/// Everything the external renderer needs for one trace after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub signal:  SignalKind,
    pub current: Option<i32>,
    pub min:     Option<i32>,
    pub max:     Option<i32>,
    pub points:  Vec<Point>,
}

impl Frame {
    pub fn capture(controller: &SignalController, viewport: Viewport, trace: TraceScale) -> Self {
        let stats = controller.stats();
        Self {
            signal:  controller.kind(),
            current: stats.map(|s| s.current.round() as i32),
            min:     stats.map(|s| s.min.round() as i32),
            max:     stats.map(|s| s.max.round() as i32),
            points:  polyline(controller.buffer().samples(), viewport, trace),
        }
    }

    /// Serialise as a single JSON line (no trailing newline).
    pub fn to_json_line(&self) -> Result<String> {
        encode_json(self)
    }
}

fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| VitalsError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use vitals_config::WaveformConfig;

    const HR_TRACE: TraceScale = TraceScale {
        reference:      100.0,
        scale:          10.0,
        baseline_frac:  0.5,
        amplitude_frac: 0.35,
    };

    #[test]
    fn maps_index_and_value_linearly() {
        let viewport = Viewport { x: 10.0, y: 20.0, width: 300.0, height: 200.0 };
        let points = polyline(vec![100.0, 110.0, 90.0], viewport, HR_TRACE);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], Point { x: 10.0, y: 120.0 });
        assert_eq!(points[1], Point { x: 110.0, y: 190.0 });
        assert_eq!(points[2], Point { x: 210.0, y: 50.0 });
    }

    #[test]
    fn empty_window_yields_no_points() {
        let viewport = Viewport { x: 0.0, y: 0.0, width: 100.0, height: 100.0 };
        assert!(polyline(Vec::<f32>::new(), viewport, HR_TRACE).is_empty());
    }

    #[test]
    fn frame_carries_rounded_stats_and_full_window() {
        let controller = SignalController::with_rng(
            WaveformConfig::defaults(SignalKind::Capnograph),
            StdRng::seed_from_u64(3),
        )
        .unwrap();
        let config = VitalsConfig::default();
        let frame = Frame::capture(
            &controller,
            Viewport::from_config(&config.render),
            TraceScale::for_signal(&config, SignalKind::Capnograph),
        );

        assert_eq!(frame.signal, SignalKind::Capnograph);
        assert_eq!(frame.points.len(), 200);
        assert_eq!(frame.min, Some(2));
        assert_eq!(frame.max, Some(42));

        let line = frame.to_json_line().unwrap();
        assert!(line.starts_with(r#"{"signal":"capnograph","#));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn unencodable_value_is_an_encode_error() {
        // JSON object keys must be strings.
        let map = std::collections::BTreeMap::from([((1, 2), 3)]);
        match encode_json(&map) {
            Err(VitalsError::Encode(msg)) => assert!(msg.contains("key must be a string")),
            other => panic!("expected an encode error, got {other:?}"),
        }
    }
}
