//! Stdio protocol definitions

mod messages;

pub use messages::{ControlCommand, HostMessage};
