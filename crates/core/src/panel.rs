use crate::state::VitalsState;

/// Every display panel implements this trait.
///
/// Panels are purely reactive: they receive a read-only view of `VitalsState`
/// and return the text they would display.  Pixel rendering lives outside
/// this workspace; see `vitals-renderer` for the polyline contract.
pub trait Panel: Send + Sync + std::fmt::Debug {
    /// Unique string identifier, e.g. `"heart_rate"` or `"sidebar"`.
    fn id(&self) -> &str;

    /// One-line textual rendering of the panel's display fields.
    fn render(&self, state: &VitalsState) -> String;
}
