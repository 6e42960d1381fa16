//! Presence entities - what is read from and written to the remote presence API

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::value_objects::{Activity, Availability, ExpirationDuration};

/// Presence read from the remote service for the current user.
///
/// Transient: re-fetched on every poll. Extra fields in the response (`id`, `@odata.context`)
/// are ignored; missing or unknown status values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    pub availability: Availability,
    pub activity: Activity,
}

impl PresenceSnapshot {
    #[must_use]
    pub const fn new(availability: Availability, activity: Activity) -> Self {
        Self {
            availability,
            activity,
        }
    }

    /// Validate a raw response body
    pub fn from_value(value: &Value) -> Result<Self, DomainError> {
        Self::deserialize(value).map_err(|e| DomainError::InvalidPresence(e.to_string()))
    }
}

/// Body of a set-preferred-presence request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferredPresence {
    availability: Availability,
    activity: Activity,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration_duration: Option<ExpirationDuration>,
}

impl PreferredPresence {
    /// Create a preferred presence, rejecting values the remote service computes itself
    pub fn new(availability: Availability, activity: Activity) -> Result<Self, DomainError> {
        if !availability.is_writable() || !activity.is_writable() {
            return Err(DomainError::NotWritable {
                availability: availability.to_string(),
                activity: activity.to_string(),
            });
        }

        Ok(Self {
            availability,
            activity,
            expiration_duration: None,
        })
    }

    /// `{Busy, Busy}` with no expiration
    #[must_use]
    pub const fn busy() -> Self {
        Self {
            availability: Availability::Busy,
            activity: Activity::Busy,
            expiration_duration: None,
        }
    }

    /// `{Available, Available}` with no expiration
    #[must_use]
    pub const fn available() -> Self {
        Self {
            availability: Availability::Available,
            activity: Activity::Available,
            expiration_duration: None,
        }
    }

    /// Set an expiration after which the remote service drops this preference
    #[must_use]
    pub fn expiring_after(mut self, expiration: impl Into<ExpirationDuration>) -> Self {
        self.expiration_duration = Some(expiration.into());
        self
    }

    pub const fn availability(&self) -> Availability {
        self.availability
    }

    pub const fn activity(&self) -> Activity {
        self.activity
    }

    pub const fn expiration(&self) -> Option<ExpirationDuration> {
        self.expiration_duration
    }
}
