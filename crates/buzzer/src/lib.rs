//! Blockage alarm: turns `StatusChanged` events into timed tone pulses.
//!
//! Each tone schedules a single stop deadline.  A new status replaces that
//! deadline instead of adding another, so at most one stop is ever pending.
//! Time is passed in by the caller; the monitor polls [`Buzzer::pending_stop`]
//! from its own event loop.

pub mod output;

pub use output::{from_config, GpioTone, LogTone, ToneOutput};

use std::time::{Duration, Instant};
use tracing::{debug, warn};
use vitals_config::BuzzerConfig;
use vitals_core::BlockageStatus;

/// Pitch and length of one alarm pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration:     Duration,
}

#[derive(Debug)]
pub struct Buzzer<O: ToneOutput> {
    output:       O,
    full:         Tone,
    partial:      Tone,
    pending_stop: Option<Instant>,
    sounding:     bool,
}

impl<O: ToneOutput> Buzzer<O> {
    pub fn new(output: O, cfg: &BuzzerConfig) -> Self {
        Self {
            output,
            full: Tone {
                frequency_hz: cfg.full_hz,
                duration:     Duration::from_millis(cfg.full_ms),
            },
            partial: Tone {
                frequency_hz: cfg.partial_hz,
                duration:     Duration::from_millis(cfg.partial_ms),
            },
            pending_stop: None,
            sounding:     false,
        }
    }

    /// Tone played for `status`, if any.
    pub fn tone_for(&self, status: BlockageStatus) -> Option<Tone> {
        match status {
            BlockageStatus::Full    => Some(self.full),
            BlockageStatus::Partial => Some(self.partial),
            BlockageStatus::Clear   => None,
        }
    }

    /// React to a status selection made at `now`.
    pub fn on_status(&mut self, status: BlockageStatus, now: Instant) {
        match self.tone_for(status) {
            Some(tone) => {
                if let Some(prev) = self.pending_stop.take() {
                    debug!("buzzer: cancelling stop due in {:?}", prev.saturating_duration_since(now));
                }
                if let Err(e) = self.output.start(tone.frequency_hz) {
                    warn!("buzzer start failed: {e}");
                }
                self.sounding = true;
                self.pending_stop = Some(now + tone.duration);
            }
            None => self.silence(),
        }
    }

    /// Fire the pending stop if it is due.  Returns `true` if the tone stopped.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending_stop {
            Some(deadline) if deadline <= now => {
                self.pending_stop = None;
                self.stop_output();
                true
            }
            _ => false,
        }
    }

    /// Stop immediately and drop any pending stop.
    pub fn silence(&mut self) {
        self.pending_stop = None;
        if self.sounding {
            self.stop_output();
        }
    }

    /// Deadline of the single scheduled stop, if one is pending.
    pub fn pending_stop(&self) -> Option<Instant> {
        self.pending_stop
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    fn stop_output(&mut self) {
        self.sounding = false;
        if let Err(e) = self.output.stop() {
            warn!("buzzer stop failed: {e}");
        }
    }
}
