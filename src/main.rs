//! vitals: headless vital-sign waveform monitor.
//!
//! Run with:  `RUST_LOG=info vitals [path/to/vitals.toml]`
//!
//! Operator commands are read from stdin (`status full|partial|none`,
//! `toggle saline|suction`, `reload`, `quit`).  With `frames = true` in the
//! `[global]` section, one JSON frame per tick is written to stdout.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays a clean frame stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("vitals v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(vitals_config::default_path);

    vitals_monitor::run(config_path).map_err(Into::into)
}
