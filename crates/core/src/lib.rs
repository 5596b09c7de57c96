pub mod error;
pub mod event;
pub mod panel;
pub mod state;

pub use error::{Result, VitalsError};
pub use event::Message;
pub use panel::Panel;
pub use state::{BlockageStatus, SignalKind, Stats, Toggle, VitalsState};
