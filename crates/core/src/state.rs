use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which vital sign a buffer carries.  Each kind maps to one generation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Breathing sine, replayed from a periodic table.
    Respiratory,
    /// End-tidal CO2 four-phase profile, replayed from a periodic table.
    Capnograph,
    /// SpO2 pleth: sine with a gaussian pulse peak, replayed from a periodic table.
    Pulse,
    /// Independent samples around a baseline, FIFO window.
    HeartRate,
}

impl SignalKind {
    /// Display order, top to bottom.
    pub const ALL: [SignalKind; 4] = [
        SignalKind::Respiratory,
        SignalKind::Capnograph,
        SignalKind::Pulse,
        SignalKind::HeartRate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::Respiratory => "respiratory",
            SignalKind::Capnograph  => "capnograph",
            SignalKind::Pulse       => "pulse",
            SignalKind::HeartRate   => "heart_rate",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Airway blockage status selected in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockageStatus {
    Full,
    Partial,
    #[default]
    Clear,
}

impl fmt::Display for BlockageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockageStatus::Full    => "Full blockage",
            BlockageStatus::Partial => "Partial blockage",
            BlockageStatus::Clear   => "No blockage",
        })
    }
}

/// Sidebar ON/OFF switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    Saline,
    Suction,
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Toggle::Saline  => "Saline",
            Toggle::Suction => "Suction",
        })
    }
}

/// Current / min / max over one buffer window.  `min <= current <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub current: f32,
    pub min:     f32,
    pub max:     f32,
}

/// Central application state. All panels read from this snapshot.
#[derive(Debug, Clone, Default)]
pub struct VitalsState {
    /// Latest stats per signal; absent until the signal's buffer holds a sample.
    pub readings: BTreeMap<SignalKind, Stats>,
    /// Sidebar blockage selection.
    pub status:   BlockageStatus,
    pub saline:   bool,
    pub suction:  bool,
}

impl VitalsState {
    #[must_use]
    pub fn reading(&self, kind: SignalKind) -> Option<Stats> {
        self.readings.get(&kind).copied()
    }

    pub fn record(&mut self, kind: SignalKind, stats: Option<Stats>) {
        match stats {
            Some(s) => {
                self.readings.insert(kind, s);
            }
            None => {
                self.readings.remove(&kind);
            }
        }
    }

    #[must_use]
    pub fn toggle(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Saline  => self.saline,
            Toggle::Suction => self.suction,
        }
    }

    /// Flip a switch and return its new position.
    pub fn flip(&mut self, toggle: Toggle) -> bool {
        let slot = match toggle {
            Toggle::Saline  => &mut self.saline,
            Toggle::Suction => &mut self.suction,
        };
        *slot = !*slot;
        *slot
    }
}
