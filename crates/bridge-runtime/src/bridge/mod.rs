//! Meeting-event bridge and its lifecycle

mod meeting;
mod state;

pub use meeting::MeetingBridge;
pub use state::{BridgeState, PresenceBridge};
