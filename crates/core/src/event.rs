use crate::state::{BlockageStatus, SignalKind, Toggle};

/// All messages (events) that can flow through the monitor's event loop.
///
/// Sources:
/// - Scheduler             → `Tick`
/// - Operator commands     → `StatusChanged`, `ToggleFlipped`, `Shutdown`
/// - Config watcher task   → `ConfigReloaded`
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Advance one signal's buffer by exactly one sample.
    Tick(SignalKind),

    // ── Sidebar ───────────────────────────────────────────────────────────────
    /// Blockage status selection changed; drives the buzzer.
    StatusChanged(BlockageStatus),
    /// A sidebar switch was pressed.
    ToggleFlipped(Toggle),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live reload.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Graceful shutdown requested.
    Shutdown,
}
