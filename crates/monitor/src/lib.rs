//! Headless vital-sign monitor.
//!
//! Owns the single-threaded event loop and wires together:
//! - per-signal tick timers (waveform controllers)
//! - the blockage buzzer
//! - operator commands on stdin
//! - config file watcher (live reload on change)

pub mod monitor;
pub mod scheduler;

pub use monitor::{Flow, Monitor};
pub use scheduler::Scheduler;

use std::path::PathBuf;
use std::time::{Duration, Instant};
use vitals_config::{load as load_config, ConfigWatcher};
use vitals_core::Result;

/// How long teardown waits for blocking tasks before abandoning them.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// Start the monitor on a current-thread runtime.  Returns after `quit`,
/// a shutdown request or Ctrl-C.
pub fn run(config_path: PathBuf) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(serve(config_path));

    // A pending stdin read holds a blocking-pool thread that cannot be
    // cancelled; dropping the runtime would wait on it until the next line.
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn serve(config_path: PathBuf) -> Result<()> {
    let config = load_config(&config_path)?;
    let mut monitor = Monitor::new(config, config_path.clone(), Instant::now())?;

    let commands = vitals_control::spawn_stdin_listener();
    let (_watcher, reloads) = ConfigWatcher::spawn(&config_path);

    monitor.run(commands, reloads).await
}
