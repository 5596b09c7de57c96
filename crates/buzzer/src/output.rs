use std::path::{Path, PathBuf};
use tracing::{info, warn};
use vitals_config::{BuzzerBackend, BuzzerConfig};
use vitals_core::{Result, VitalsError};

/// Something that can sound and silence a tone.
pub trait ToneOutput: std::fmt::Debug {
    fn start(&mut self, frequency_hz: u32) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

impl<T: ToneOutput + ?Sized> ToneOutput for Box<T> {
    fn start(&mut self, frequency_hz: u32) -> Result<()> {
        (**self).start(frequency_hz)
    }

    fn stop(&mut self) -> Result<()> {
        (**self).stop()
    }
}

/// Logs tone changes; used when no hardware is attached.
#[derive(Debug, Default)]
pub struct LogTone;

impl ToneOutput for LogTone {
    fn start(&mut self, frequency_hz: u32) -> Result<()> {
        info!("buzzer on ({frequency_hz} Hz)");
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        info!("buzzer off");
        Ok(())
    }
}

/// Active buzzer on a sysfs GPIO line.
///
/// The pin is driven high while a tone sounds; the buzzer sets its own pitch,
/// so the requested frequency is only logged.
#[derive(Debug)]
pub struct GpioTone {
    value: PathBuf,
}

impl GpioTone {
    /// Export `pin` under `root` if needed and configure it as an output.
    pub fn open(root: &Path, pin: u32) -> Result<Self> {
        let line = root.join(format!("gpio{pin}"));

        if !line.exists() {
            write_sysfs(&root.join("export"), &pin.to_string())?;
        }
        if !line.exists() {
            return Err(VitalsError::Buzzer(format!(
                "gpio{pin} did not appear under '{}' after export",
                root.display()
            )));
        }

        write_sysfs(&line.join("direction"), "out")?;
        let tone = Self {
            value: line.join("value"),
        };
        write_sysfs(&tone.value, "0")?;
        Ok(tone)
    }
}

impl ToneOutput for GpioTone {
    fn start(&mut self, frequency_hz: u32) -> Result<()> {
        tracing::debug!("gpio buzzer high ({frequency_hz} Hz requested)");
        write_sysfs(&self.value, "1")
    }

    fn stop(&mut self) -> Result<()> {
        write_sysfs(&self.value, "0")
    }
}

fn write_sysfs(path: &Path, value: &str) -> Result<()> {
    std::fs::write(path, value)
        .map_err(|e| VitalsError::Buzzer(format!("write '{}': {e}", path.display())))
}

/// Build the configured backend, falling back to [`LogTone`] if the GPIO
/// line cannot be opened.
pub fn from_config(cfg: &BuzzerConfig) -> Box<dyn ToneOutput + Send> {
    match cfg.backend {
        BuzzerBackend::Log => Box::new(LogTone),
        BuzzerBackend::Gpio => match GpioTone::open(&cfg.gpio_root, cfg.gpio_pin) {
            Ok(gpio) => {
                info!("Buzzer on gpio{}", cfg.gpio_pin);
                Box::new(gpio)
            }
            Err(e) => {
                warn!("GPIO buzzer unavailable ({e}); logging tones instead");
                Box::new(LogTone)
            }
        },
    }
}
