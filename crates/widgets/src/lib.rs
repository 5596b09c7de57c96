pub mod format;
pub mod sidebar;
pub mod vital;

pub use format::{format_reading, on_off};
pub use sidebar::SidebarPanel;
pub use vital::VitalPanel;

use vitals_core::{Panel, SignalKind};

/// One panel per signal in display order, followed by the sidebar.
pub fn dashboard(signals: impl IntoIterator<Item = SignalKind>) -> Vec<Box<dyn Panel>> {
    let mut panels: Vec<Box<dyn Panel>> = signals
        .into_iter()
        .map(|kind| Box::new(VitalPanel::new(kind)) as Box<dyn Panel>)
        .collect();
    panels.push(Box::new(SidebarPanel::new()));
    panels
}
