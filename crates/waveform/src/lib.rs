//! Synthetic vital-sign waveforms and the scrolling windows that hold them.

pub mod buffer;
pub mod controller;
pub mod model;

pub use buffer::{ScrollBuffer, ScrollMode};
pub use controller::SignalController;
pub use model::{WaveformModel, MAX_SAMPLES};
