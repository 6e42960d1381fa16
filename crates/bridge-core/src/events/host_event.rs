//! Host events - occurrences emitted by the virtual-world client
//!
//! Each occurrence is delivered once to every subscriber; they are not queued for late
//! subscribers.

use serde::{Deserialize, Serialize};

/// All events the bridge reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostEvent {
    /// Host finished initializing; metadata is available (fired once)
    Init,
    /// Player entered a proximity meeting
    ProximityMeetingJoined,
    /// Player left a proximity meeting
    ProximityMeetingLeft,
}

impl HostEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::ProximityMeetingJoined => "PROXIMITY_MEETING_JOINED",
            Self::ProximityMeetingLeft => "PROXIMITY_MEETING_LEFT",
        }
    }
}

impl std::fmt::Display for HostEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.event_type())
    }
}
