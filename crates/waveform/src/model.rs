//! Synthetic waveform generators for the four vital signs.
//!
//! Deterministic shapes (respiratory, capnograph, pulse) are defined by a pure
//! `value(i)` over a periodic table of `capacity` samples.  Heart rate draws
//! an independent integer jitter around its baseline on every sample.

use crate::buffer::{ScrollBuffer, ScrollMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use tracing::warn;
use vitals_config::{PhaseDurations, WaveformConfig};
use vitals_core::{Result, SignalKind, VitalsError};

/// Capnograph phase I / trailing baseline level (mmHg).
pub const CO2_BASELINE: f32 = 2.0;
/// Capnograph phase II starts here and climbs towards [`CO2_UPSTROKE_END`].
pub const CO2_UPSTROKE_START: f32 = 5.0;
pub const CO2_UPSTROKE_END: f32 = 35.0;
/// Capnograph phase III alveolar plateau (mmHg).
pub const CO2_PLATEAU: f32 = 42.0;

/// Largest window or seed a signal may ask for.
pub const MAX_SAMPLES: usize = 4_096;

/// Pulse samples per unit of `t` in the pleth formula.
const PULSE_WIDTH: f32 = 10.0;
const PULSE_SPREAD: f32 = 6.0;

/// One signal's sample generator, configured by a [`WaveformConfig`] record.
#[derive(Debug, Clone)]
pub struct WaveformModel {
    config: WaveformConfig,
    rng:    StdRng,
    /// Next table index handed out by [`WaveformModel::next_sample`].
    cursor: usize,
}

impl WaveformModel {
    /// Build a model with an entropy-seeded random source.
    pub fn new(config: WaveformConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Build a model with an explicit random source.
    ///
    /// Fails if the periodic table would be empty.
    pub fn with_rng(config: WaveformConfig, rng: StdRng) -> Result<Self> {
        validate(&config)?;
        Ok(Self {
            config,
            rng,
            cursor: 0,
        })
    }

    pub fn kind(&self) -> SignalKind {
        self.config.kind
    }

    pub fn config(&self) -> &WaveformConfig {
        &self.config
    }

    /// Rotating for table-driven signals, FIFO for heart rate.
    pub fn scroll_mode(&self) -> ScrollMode {
        match self.config.kind {
            SignalKind::HeartRate => ScrollMode::Fifo,
            _ => ScrollMode::Rotating,
        }
    }

    /// An empty buffer sized and moded for this signal.
    pub fn empty_buffer(&self) -> ScrollBuffer {
        ScrollBuffer::new(self.scroll_mode(), self.config.capacity)
    }

    /// Table value at index `i`.  Heart rate has no table and yields its baseline.
    pub fn value(&self, i: usize) -> f32 {
        let c = &self.config;
        match c.kind {
            SignalKind::Respiratory => {
                let phase = (i % c.period) as f32 / c.period as f32;
                c.base + c.amplitude * (TAU * phase).sin()
            }
            SignalKind::Capnograph => capnograph(&c.phases, i),
            SignalKind::Pulse => {
                let t = (i % c.period) as f32 / c.period as f32;
                let x = t * PULSE_WIDTH - PULSE_WIDTH / 2.0;
                c.base + c.amplitude * (TAU * t).sin() + c.peak * (-(x * x) / PULSE_SPREAD).exp()
            }
            SignalKind::HeartRate => c.base,
        }
    }

    /// Samples used to pre-fill a buffer.
    ///
    /// Table-driven signals return `value(0..length)`; heart rate returns
    /// `length` independent draws.
    pub fn generate_seed(&mut self, length: usize) -> Vec<f32> {
        match self.scroll_mode() {
            ScrollMode::Rotating => {
                let seed: Vec<f32> = (0..length).map(|i| self.value(i)).collect();
                self.cursor = length % self.table_len();
                seed
            }
            ScrollMode::Fifo => (0..length).map(|_| self.next_sample()).collect(),
        }
    }

    /// One fresh sample.
    ///
    /// Heart rate: `base + uniform(-spread..=spread)`, no memory of the previous
    /// draw.  Table-driven signals stream their table in order, wrapping
    /// exactly at its length.
    pub fn next_sample(&mut self) -> f32 {
        match self.config.kind {
            SignalKind::HeartRate => {
                let k = self.config.spread as i32;
                self.config.base + self.rng.gen_range(-k..=k) as f32
            }
            _ => {
                let v = self.value(self.cursor);
                self.cursor = (self.cursor + 1) % self.table_len();
                v
            }
        }
    }

    /// Advance `buffer` by one tick and return its new current value.
    pub fn advance(&mut self, buffer: &mut ScrollBuffer) -> Option<f32> {
        buffer.tick(|| self.next_sample())
    }

    fn table_len(&self) -> usize {
        self.config.capacity
    }
}

/// Four-phase capnograph profile, repeating every `phases.cycle_len()` samples.
pub fn capnograph(phases: &PhaseDurations, i: usize) -> f32 {
    let mut j = i % phases.cycle_len();

    if j < phases.baseline {
        return CO2_BASELINE;
    }
    j -= phases.baseline;

    if j < phases.upstroke {
        let rise = CO2_UPSTROKE_END - CO2_UPSTROKE_START;
        return CO2_UPSTROKE_START + rise * j as f32 / phases.upstroke as f32;
    }
    j -= phases.upstroke;

    if j < phases.plateau {
        return CO2_PLATEAU;
    }
    j -= phases.plateau;

    if j < phases.downstroke {
        let fall = CO2_PLATEAU - CO2_BASELINE;
        return CO2_PLATEAU - fall * (j + 1) as f32 / phases.downstroke as f32;
    }

    CO2_BASELINE
}

fn validate(c: &WaveformConfig) -> Result<()> {
    let fail = |msg: &str| -> Result<()> {
        Err(VitalsError::Config(format!("{}: {msg}", c.kind)))
    };

    match c.kind {
        SignalKind::Respiratory | SignalKind::Pulse => {
            if c.period == 0 {
                return fail("period must be at least 1 sample");
            }
            if c.capacity % c.period != 0 {
                warn!(
                    "{}: capacity {} is not a multiple of period {}; the trace will jump at wrap-around",
                    c.kind, c.capacity, c.period
                );
            }
        }
        SignalKind::Capnograph => {
            if c.phases.cycle_len() == 0 {
                return fail("phase durations are all zero");
            }
            if c.cycles == 0 {
                return fail("cycles must be at least 1");
            }
        }
        SignalKind::HeartRate => {
            if c.spread > i32::MAX as u32 {
                return fail("spread is out of range");
            }
        }
    }

    if c.capacity == 0 {
        return fail("capacity must be at least 1 sample");
    }
    if c.capacity > MAX_SAMPLES {
        return fail(&format!("capacity {} exceeds {MAX_SAMPLES} samples", c.capacity));
    }
    if c.seed_len > MAX_SAMPLES {
        return fail(&format!("seed_len {} exceeds {MAX_SAMPLES} samples", c.seed_len));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(kind: SignalKind) -> WaveformModel {
        WaveformModel::with_rng(WaveformConfig::defaults(kind), StdRng::seed_from_u64(7)).unwrap()
    }

    fn capno(cycles: usize, baseline: usize, upstroke: usize, plateau: usize, downstroke: usize) -> WaveformModel {
        let phases = PhaseDurations { baseline, upstroke, plateau, downstroke };
        let config = WaveformConfig {
            cycles,
            phases,
            capacity: cycles * phases.cycle_len(),
            seed_len: cycles * phases.cycle_len(),
            ..WaveformConfig::defaults(SignalKind::Capnograph)
        };
        WaveformModel::with_rng(config, StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn respiratory_stays_within_amplitude() {
        let m = model(SignalKind::Respiratory);
        let c = m.config().clone();
        for i in 0..10_000 {
            let v = m.value(i);
            assert!(v >= c.base - c.amplitude && v <= c.base + c.amplitude, "value({i}) = {v}");
        }
    }

    #[test]
    fn respiratory_peaks_a_quarter_period_in() {
        let m = model(SignalKind::Respiratory);
        assert_eq!(m.value(0), 15.0);
        assert!((m.value(10) - 19.0).abs() < 1e-4);
        assert!((m.value(30) - 11.0).abs() < 1e-4);
    }

    #[test]
    fn capnograph_concrete_sequence() {
        let mut m = capno(1, 4, 6, 10, 4);
        let seed = m.generate_seed(m.config().capacity);

        let mut expected = vec![2.0; 4];
        expected.extend([5.0, 10.0, 15.0, 20.0, 25.0, 30.0]);
        expected.extend([42.0; 10]);
        expected.extend([32.0, 22.0, 12.0, 2.0]);
        expected.extend([2.0; 4]);

        assert_eq!(seed.len(), 28);
        assert_eq!(seed, expected);
    }

    #[test]
    fn capnograph_repeats_every_cycle() {
        let m = capno(3, 5, 3, 8, 2);
        let cycle = m.config().phases.cycle_len();
        assert_eq!(cycle, 5 + 3 + 8 + 2 * 2);
        for i in 0..cycle * 50 {
            assert_eq!(m.value(i), m.value(i + cycle));
        }
    }

    #[test]
    fn pulse_peaks_mid_cycle() {
        let m = model(SignalKind::Pulse);
        let period = m.config().period;
        let peak = (0..period)
            .max_by(|&a, &b| m.value(a).total_cmp(&m.value(b)))
            .unwrap();
        // The gaussian is centred at t = 0.5, pulled slightly early by the sine.
        assert!(peak > period / 4 && peak <= period / 2, "peak at {peak}");
        for i in 0..period {
            assert_eq!(m.value(i), m.value(i + period * 9));
        }
    }

    #[test]
    fn heart_rate_stays_within_spread() {
        let mut m = model(SignalKind::HeartRate);
        let base = m.config().base;
        let k = m.config().spread as f32;
        let samples: Vec<f32> = (0..10_000).map(|_| m.next_sample()).collect();

        assert!(samples.iter().all(|&v| v >= base - k && v <= base + k));
        assert!(samples.iter().all(|v| v.fract() == 0.0));
        // Both extremes are reachable.
        assert!(samples.contains(&(base - k)));
        assert!(samples.contains(&(base + k)));
    }

    #[test]
    fn streaming_matches_rotation() {
        let mut streamed = model(SignalKind::Respiratory);
        let mut rotated = model(SignalKind::Respiratory);

        let capacity = rotated.config().capacity;
        let mut buffer = rotated.empty_buffer();
        buffer.seed(rotated.generate_seed(capacity));
        let _ = streamed.generate_seed(capacity);

        for _ in 0..capacity * 3 {
            let expected = streamed.next_sample();
            assert_eq!(rotated.advance(&mut buffer), Some(expected));
        }
    }

    #[test]
    fn empty_tables_are_rejected() {
        let zero_period = WaveformConfig {
            period: 0,
            ..WaveformConfig::defaults(SignalKind::Respiratory)
        };
        assert!(matches!(WaveformModel::new(zero_period), Err(VitalsError::Config(_))));

        let no_phases = WaveformConfig {
            phases: PhaseDurations { baseline: 0, upstroke: 0, plateau: 0, downstroke: 0 },
            ..WaveformConfig::defaults(SignalKind::Capnograph)
        };
        assert!(matches!(WaveformModel::new(no_phases), Err(VitalsError::Config(_))));

        let no_capacity = WaveformConfig {
            capacity: 0,
            ..WaveformConfig::defaults(SignalKind::HeartRate)
        };
        assert!(matches!(WaveformModel::new(no_capacity), Err(VitalsError::Config(_))));
    }

    #[test]
    fn oversized_windows_are_rejected() {
        let huge_window = WaveformConfig {
            capacity: MAX_SAMPLES + 1,
            ..WaveformConfig::defaults(SignalKind::HeartRate)
        };
        assert!(matches!(WaveformModel::new(huge_window), Err(VitalsError::Config(_))));

        let huge_seed = WaveformConfig {
            seed_len: usize::MAX,
            ..WaveformConfig::defaults(SignalKind::HeartRate)
        };
        assert!(matches!(WaveformModel::new(huge_seed), Err(VitalsError::Config(_))));

        let at_limit = WaveformConfig {
            capacity: MAX_SAMPLES,
            seed_len: MAX_SAMPLES,
            ..WaveformConfig::defaults(SignalKind::HeartRate)
        };
        assert!(WaveformModel::new(at_limit).is_ok());
    }
}
