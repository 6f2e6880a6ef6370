//! Linkdrop core: pure state machine and view-model helpers.
mod effect;
mod log_area;
mod msg;
mod source;
mod state;
mod tabs;
mod update;
mod view_model;

pub use effect::{Effect, Submission};
pub use log_area::{local_clock, Clock, LogArea, LogEntry};
pub use msg::{BackendReply, Msg};
pub use source::{Source, SourceProfile};
pub use state::{AppState, HealthStatus, DEFAULT_ORIGIN, HEALTH_PATH};
pub use tabs::{TabButton, TabGroup};
pub use update::update;
pub use view_model::{AppViewModel, PanelView, TabView};
