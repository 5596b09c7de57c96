pub mod schema;
pub mod watcher;

pub use schema::{
    BuzzerBackend, BuzzerConfig, GlobalConfig, PhaseDurations, RenderConfig, SignalConfig,
    VitalsConfig, WaveformConfig,
};
pub use watcher::ConfigWatcher;

use std::path::{Path, PathBuf};
use vitals_core::{Result, VitalsError};

/// Load configuration from a TOML file.  Returns `VitalsConfig::default()` if
/// the file doesn't exist so the monitor always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<VitalsConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(VitalsConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| VitalsError::Config(format!("cannot read '{}': {e}", path.display())))?;

    toml::from_str(&raw).map_err(|e| VitalsError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("vitals").join("vitals.toml")
}
