//! Presence polling
//!
//! Reads the remote presence on a fixed interval and disables or restores the player's
//! ability to join proximity meetings.

mod check;
mod status_poller;

pub use check::{CheckError, CheckOutcome, PresenceCheck, ProximityAction};
pub use status_poller::StatusPoller;
