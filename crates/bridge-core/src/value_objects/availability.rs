//! Remote presence status values.
//!
//! Both enums mirror the closed value sets of the collaboration-suite presence resource and
//! serialize with the exact PascalCase names the remote API uses.

use serde::{Deserialize, Serialize};

/// Busy/free state of the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    Available,
    AvailableIdle,
    Away,
    BeRightBack,
    Busy,
    BusyIdle,
    DoNotDisturb,
    Offline,
    PresenceUnknown,
}

impl Availability {
    /// Every availability value, in remote API order
    pub const ALL: [Self; 9] = [
        Self::Available,
        Self::AvailableIdle,
        Self::Away,
        Self::BeRightBack,
        Self::Busy,
        Self::BusyIdle,
        Self::DoNotDisturb,
        Self::Offline,
        Self::PresenceUnknown,
    ];

    /// Remote API name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::AvailableIdle => "AvailableIdle",
            Self::Away => "Away",
            Self::BeRightBack => "BeRightBack",
            Self::Busy => "Busy",
            Self::BusyIdle => "BusyIdle",
            Self::DoNotDisturb => "DoNotDisturb",
            Self::Offline => "Offline",
            Self::PresenceUnknown => "PresenceUnknown",
        }
    }

    /// Whether this value may be sent as a preferred availability.
    ///
    /// Idle variants and `PresenceUnknown` are computed by the remote service only.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        !matches!(
            self,
            Self::AvailableIdle | Self::BusyIdle | Self::PresenceUnknown
        )
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    Available,
    Away,
    BeRightBack,
    Busy,
    DoNotDisturb,
    InACall,
    InAConferenceCall,
    Inactive,
    InAMeeting,
    Offline,
    OffWork,
    OutOfOffice,
    PresenceUnknown,
    Presenting,
    UrgentInterruptionsOnly,
}

impl Activity {
    /// Every activity value, in remote API order
    pub const ALL: [Self; 15] = [
        Self::Available,
        Self::Away,
        Self::BeRightBack,
        Self::Busy,
        Self::DoNotDisturb,
        Self::InACall,
        Self::InAConferenceCall,
        Self::Inactive,
        Self::InAMeeting,
        Self::Offline,
        Self::OffWork,
        Self::OutOfOffice,
        Self::PresenceUnknown,
        Self::Presenting,
        Self::UrgentInterruptionsOnly,
    ];

    /// Remote API name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Away => "Away",
            Self::BeRightBack => "BeRightBack",
            Self::Busy => "Busy",
            Self::DoNotDisturb => "DoNotDisturb",
            Self::InACall => "InACall",
            Self::InAConferenceCall => "InAConferenceCall",
            Self::Inactive => "Inactive",
            Self::InAMeeting => "InAMeeting",
            Self::Offline => "Offline",
            Self::OffWork => "OffWork",
            Self::OutOfOffice => "OutOfOffice",
            Self::PresenceUnknown => "PresenceUnknown",
            Self::Presenting => "Presenting",
            Self::UrgentInterruptionsOnly => "UrgentInterruptionsOnly",
        }
    }

    /// Whether this value may be sent as a preferred activity
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(
            self,
            Self::Available
                | Self::Away
                | Self::BeRightBack
                | Self::Busy
                | Self::DoNotDisturb
                | Self::Offline
                | Self::PresenceUnknown
        )
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
