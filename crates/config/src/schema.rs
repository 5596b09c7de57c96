use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vitals_core::SignalKind;

/// Root configuration structure parsed from `vitals.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Output and logging cadence.
    pub global: GlobalConfig,
    /// Per-signal overrides; unset fields fall back to the signal's defaults.
    pub respiratory: SignalConfig,
    pub capnograph:  SignalConfig,
    pub pulse:       SignalConfig,
    pub heart_rate:  SignalConfig,
    /// Viewport and trace scaling handed to the external renderer.
    pub render: RenderConfig,
    /// Blockage alarm tones.
    pub buzzer: BuzzerConfig,
}

impl VitalsConfig {
    /// Raw override section for `kind`.
    pub fn section(&self, kind: SignalKind) -> &SignalConfig {
        match kind {
            SignalKind::Respiratory => &self.respiratory,
            SignalKind::Capnograph  => &self.capnograph,
            SignalKind::Pulse       => &self.pulse,
            SignalKind::HeartRate   => &self.heart_rate,
        }
    }

    /// Fully-resolved waveform record for `kind`.
    pub fn waveform(&self, kind: SignalKind) -> WaveformConfig {
        self.section(kind).resolve(WaveformConfig::defaults(kind))
    }

    /// Signals that should be generated, in display order.
    pub fn enabled_signals(&self) -> impl Iterator<Item = SignalKind> + '_ {
        SignalKind::ALL
            .into_iter()
            .filter(|kind| self.section(*kind).enabled.unwrap_or(true))
    }
}

/// Global settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Emit one JSON frame per tick on stdout for an external renderer.
    pub frames: bool,
    /// Seconds between panel summaries in the log (0 disables them).
    pub summary_secs: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            frames:       false,
            summary_secs: 5,
        }
    }
}

/// Per-signal overrides as written in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub enabled:     Option<bool>,
    pub base:        Option<f32>,
    pub amplitude:   Option<f32>,
    pub period:      Option<usize>,
    pub capacity:    Option<usize>,
    pub seed_len:    Option<usize>,
    pub interval_ms: Option<u64>,
    pub spread:      Option<u32>,
    pub peak:        Option<f32>,
    pub cycles:      Option<usize>,
    pub baseline:    Option<usize>,
    pub upstroke:    Option<usize>,
    pub plateau:     Option<usize>,
    pub downstroke:  Option<usize>,
    /// Value drawn at the trace's vertical centre.
    pub reference:   Option<f32>,
    /// Value span mapped onto the trace's amplitude band.
    pub scale:       Option<f32>,
}

impl SignalConfig {
    fn resolve(&self, d: WaveformConfig) -> WaveformConfig {
        let phases = PhaseDurations {
            baseline:   self.baseline.unwrap_or(d.phases.baseline),
            upstroke:   self.upstroke.unwrap_or(d.phases.upstroke),
            plateau:    self.plateau.unwrap_or(d.phases.plateau),
            downstroke: self.downstroke.unwrap_or(d.phases.downstroke),
        };
        let cycles = self.cycles.unwrap_or(d.cycles);
        let capacity = match d.kind {
            // The capnograph table is always a whole number of breaths.
            // Saturates so oversized values reach validation instead of panicking.
            SignalKind::Capnograph => cycles.saturating_mul(phases.cycle_len()),
            _ => self.capacity.unwrap_or(d.capacity),
        };
        // Rotating tables are seeded with exactly one window.
        let seed_len = match d.kind {
            SignalKind::HeartRate => self.seed_len.unwrap_or(d.seed_len),
            _ => capacity,
        };

        WaveformConfig {
            kind:        d.kind,
            base:        self.base.unwrap_or(d.base),
            amplitude:   self.amplitude.unwrap_or(d.amplitude),
            period:      self.period.unwrap_or(d.period),
            capacity,
            seed_len,
            interval_ms: self.interval_ms.unwrap_or(d.interval_ms),
            spread:      self.spread.unwrap_or(d.spread),
            peak:        self.peak.unwrap_or(d.peak),
            cycles,
            phases,
            reference:   self.reference.unwrap_or(d.reference),
            scale:       self.scale.unwrap_or(d.scale),
        }
    }
}

/// Durations, in samples, of the four capnograph phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub baseline:   usize,
    pub upstroke:   usize,
    pub plateau:    usize,
    pub downstroke: usize,
}

impl PhaseDurations {
    /// Samples per breath; the trailing baseline lasts as long as the downstroke.
    pub fn cycle_len(&self) -> usize {
        self.baseline
            .saturating_add(self.upstroke)
            .saturating_add(self.plateau)
            .saturating_add(self.downstroke.saturating_mul(2))
    }
}

/// Resolved parameters for one signal's generator and buffer.
///
/// Not every field applies to every kind: `period` drives the sine and pulse
/// tables, `spread` the heart-rate jitter, `peak` the pulse gaussian, and
/// `cycles`/`phases` the capnograph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformConfig {
    pub kind:        SignalKind,
    pub base:        f32,
    pub amplitude:   f32,
    /// Samples per cycle.
    pub period:      usize,
    /// Buffer window length.
    pub capacity:    usize,
    /// Samples generated to pre-fill the buffer.
    pub seed_len:    usize,
    pub interval_ms: u64,
    pub spread:      u32,
    pub peak:        f32,
    pub cycles:      usize,
    pub phases:      PhaseDurations,
    pub reference:   f32,
    pub scale:       f32,
}

impl WaveformConfig {
    /// Built-in parameters for each signal.
    pub fn defaults(kind: SignalKind) -> Self {
        let phases = PhaseDurations {
            baseline:   5,
            upstroke:   3,
            plateau:    8,
            downstroke: 2,
        };
        let base = Self {
            kind,
            base:        0.0,
            amplitude:   0.0,
            period:      1,
            capacity:    200,
            seed_len:    200,
            interval_ms: 100,
            spread:      0,
            peak:        0.0,
            cycles:      10,
            phases,
            reference:   0.0,
            scale:       1.0,
        };

        match kind {
            SignalKind::Respiratory => Self {
                base:        15.0,
                amplitude:   4.0,
                period:      40,
                interval_ms: 50,
                reference:   15.0,
                scale:       4.0,
                ..base
            },
            SignalKind::Capnograph => Self {
                capacity:    10 * phases.cycle_len(),
                seed_len:    10 * phases.cycle_len(),
                interval_ms: 200,
                reference:   22.0,
                scale:       20.0,
                ..base
            },
            SignalKind::Pulse => Self {
                base:        94.0,
                amplitude:   1.5,
                period:      20,
                peak:        3.0,
                interval_ms: 150,
                reference:   95.5,
                scale:       3.0,
                ..base
            },
            SignalKind::HeartRate => Self {
                base:        95.0,
                spread:      6,
                capacity:    30,
                seed_len:    60,
                interval_ms: 600,
                reference:   100.0,
                scale:       10.0,
                ..base
            },
        }
    }
}

/// Viewport handed to the renderer; shared by all four traces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width:          f32,
    pub height:         f32,
    /// Vertical position of `reference`, as a fraction of the height.
    pub baseline_frac:  f32,
    /// Pixel height of one `scale` unit, as a fraction of the height.
    pub amplitude_frac: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width:          600.0,
            height:         140.0,
            baseline_frac:  0.5,
            amplitude_frac: 0.35,
        }
    }
}

/// Where tone pulses are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuzzerBackend {
    /// Log tone changes only.
    #[default]
    Log,
    /// Drive a sysfs GPIO pin high/low.
    Gpio,
}

/// Blockage alarm settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuzzerConfig {
    pub backend:    BuzzerBackend,
    pub gpio_pin:   u32,
    /// Root of the sysfs GPIO tree.
    pub gpio_root:  PathBuf,
    pub full_hz:    u32,
    pub full_ms:    u64,
    pub partial_hz: u32,
    pub partial_ms: u64,
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self {
            backend:    BuzzerBackend::Log,
            gpio_pin:   18,
            gpio_root:  PathBuf::from("/sys/class/gpio"),
            full_hz:    2_000,
            full_ms:    1_000,
            partial_hz: 1_000,
            partial_ms: 400,
        }
    }
}
