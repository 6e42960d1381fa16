//! Line-delimited JSON messages exchanged with the embedding client
//!
//! Every line is one JSON object tagged by `type`.

use bridge_core::HostEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages read from the host (stdin)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    /// Host finished initializing; carries the player metadata
    Init {
        #[serde(default)]
        metadata: Value,
    },
    ProximityMeetingJoined,
    ProximityMeetingLeft,
}

impl HostMessage {
    /// The event this message announces
    #[must_use]
    pub fn event(&self) -> HostEvent {
        match self {
            Self::Init { .. } => HostEvent::Init,
            Self::ProximityMeetingJoined => HostEvent::ProximityMeetingJoined,
            Self::ProximityMeetingLeft => HostEvent::ProximityMeetingLeft,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Commands written to the host (stdout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlCommand {
    DisablePlayerProximityMeeting,
    RestorePlayerProximityMeeting,
}

impl ControlCommand {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DisablePlayerProximityMeeting => write!(f, "disable_player_proximity_meeting"),
            Self::RestorePlayerProximityMeeting => write!(f, "restore_player_proximity_meeting"),
        }
    }
}
