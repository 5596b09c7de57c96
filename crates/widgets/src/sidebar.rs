use crate::format::on_off;
use vitals_core::{Panel, Toggle, VitalsState};

/// Blockage status and the Saline / Suction switches.
#[derive(Debug, Default, Clone)]
pub struct SidebarPanel;

impl SidebarPanel {
    pub fn new() -> Self {
        Self
    }

    /// `"Saline: ON"` style line for one switch.
    pub fn toggle_line(state: &VitalsState, toggle: Toggle) -> String {
        format!("{toggle}: {}", on_off(state.toggle(toggle)))
    }
}

impl Panel for SidebarPanel {
    fn id(&self) -> &str {
        "sidebar"
    }

    fn render(&self, state: &VitalsState) -> String {
        format!(
            "Status: {} | {} | {}",
            state.status,
            Self::toggle_line(state, Toggle::Saline),
            Self::toggle_line(state, Toggle::Suction),
        )
    }
}
