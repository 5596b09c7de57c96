use crate::format::format_reading;
use vitals_core::{Panel, SignalKind, VitalsState};

/// Displays one signal's current value with its window min/max.
#[derive(Debug, Clone)]
pub struct VitalPanel {
    kind: SignalKind,
}

impl VitalPanel {
    pub fn new(kind: SignalKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            SignalKind::Respiratory => "Respiratory Rate (RR)",
            SignalKind::Capnograph  => "ETCO2",
            SignalKind::Pulse       => "SPO2",
            SignalKind::HeartRate   => "Heart rate (HR)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self.kind {
            SignalKind::Respiratory | SignalKind::HeartRate => "bpm",
            SignalKind::Capnograph => "mmHg",
            SignalKind::Pulse      => "%",
        }
    }
}

impl Panel for VitalPanel {
    fn id(&self) -> &str {
        self.kind.as_str()
    }

    fn render(&self, state: &VitalsState) -> String {
        let stats = state.reading(self.kind);
        format!(
            "{}: {} {} (min {} / max {})",
            self.label(),
            format_reading(stats.map(|s| s.current)),
            self.unit(),
            format_reading(stats.map(|s| s.min)),
            format_reading(stats.map(|s| s.max)),
        )
    }
}
