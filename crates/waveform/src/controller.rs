use crate::buffer::ScrollBuffer;
use crate::model::WaveformModel;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::debug;
use vitals_config::WaveformConfig;
use vitals_core::{Result, SignalKind, Stats};

/// Owns one signal's model and history window.
///
/// Nothing else holds a reference to the buffer; render and display code
/// borrow it through [`SignalController::buffer`].
#[derive(Debug, Clone)]
pub struct SignalController {
    model:    WaveformModel,
    buffer:   ScrollBuffer,
    interval: Duration,
}

impl SignalController {
    /// Build and seed a controller from a resolved config record.
    pub fn new(config: WaveformConfig) -> Result<Self> {
        Self::from_model(WaveformModel::new(config)?)
    }

    /// Same as [`SignalController::new`] with a caller-supplied random source.
    pub fn with_rng(config: WaveformConfig, rng: StdRng) -> Result<Self> {
        Self::from_model(WaveformModel::with_rng(config, rng)?)
    }

    fn from_model(mut model: WaveformModel) -> Result<Self> {
        let seed_len = model.config().seed_len;
        let interval = Duration::from_millis(model.config().interval_ms.max(1));

        let mut buffer = model.empty_buffer();
        buffer.seed(model.generate_seed(seed_len));

        debug!(
            "{}: seeded {} of {} samples, ticking every {:?}",
            model.kind(),
            buffer.len(),
            buffer.capacity(),
            interval
        );

        Ok(Self {
            model,
            buffer,
            interval,
        })
    }

    pub fn kind(&self) -> SignalKind {
        self.model.kind()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn config(&self) -> &WaveformConfig {
        self.model.config()
    }

    pub fn buffer(&self) -> &ScrollBuffer {
        &self.buffer
    }

    pub fn stats(&self) -> Option<Stats> {
        self.buffer.stats()
    }

    /// Advance by exactly one sample and return the refreshed stats.
    pub fn tick(&mut self) -> Option<Stats> {
        self.model.advance(&mut self.buffer);
        self.buffer.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn controller(kind: SignalKind) -> SignalController {
        SignalController::with_rng(WaveformConfig::defaults(kind), StdRng::seed_from_u64(42))
            .unwrap()
    }

    #[test]
    fn rotating_signals_restore_after_one_window() {
        for kind in [SignalKind::Respiratory, SignalKind::Capnograph, SignalKind::Pulse] {
            let mut c = controller(kind);
            let initial = c.buffer().to_vec();
            assert_eq!(initial.len(), c.buffer().capacity());

            for _ in 0..c.buffer().capacity() {
                c.tick();
                assert_eq!(c.buffer().len(), c.buffer().capacity());
            }
            assert_eq!(c.buffer().to_vec(), initial, "{kind} drifted");
        }
    }

    #[test]
    fn rotation_has_no_drift_over_long_runs() {
        let mut c = controller(SignalKind::Pulse);
        let initial = c.buffer().to_vec();
        // Roughly six hours at the default 150 ms tick.
        for _ in 0..c.buffer().capacity() * 720 {
            c.tick();
        }
        assert_eq!(c.buffer().to_vec(), initial);
    }

    #[test]
    fn heart_rate_seed_is_truncated_to_window() {
        let mut c = controller(SignalKind::HeartRate);
        assert_eq!(c.config().seed_len, 60);
        assert_eq!(c.buffer().len(), 30);

        for _ in 0..100 {
            let stats = c.tick().unwrap();
            assert_eq!(c.buffer().len(), 30);
            assert!(stats.min <= stats.current && stats.current <= stats.max);
            assert!(stats.min >= 89.0 && stats.max <= 101.0);
        }
    }

    #[test]
    fn heart_rate_grows_from_short_seed() {
        let config = WaveformConfig {
            seed_len: 5,
            ..WaveformConfig::defaults(SignalKind::HeartRate)
        };
        let mut c = SignalController::with_rng(config, StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(c.buffer().len(), 5);

        for expected in 6..=30 {
            c.tick();
            assert_eq!(c.buffer().len(), expected);
        }
        c.tick();
        assert_eq!(c.buffer().len(), 30);
    }

    #[test]
    fn interval_comes_from_config() {
        assert_eq!(controller(SignalKind::Respiratory).interval(), Duration::from_millis(50));
        assert_eq!(controller(SignalKind::HeartRate).interval(), Duration::from_millis(600));
    }
}
