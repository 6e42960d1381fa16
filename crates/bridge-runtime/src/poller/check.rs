//! One presence check: read the remote status and toggle the host accordingly

use std::sync::Arc;

use bridge_core::{
    Availability, DomainError, ExpirationDuration, Host, PreferredPresence, PresenceApi,
    PresenceSnapshot,
};
use tracing::debug;

use crate::presence::write_preferred_presence;

/// What a reading means for the player's ability to join proximity meetings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityAction {
    Disable,
    Restore,
    Keep,
}

impl ProximityAction {
    #[must_use]
    pub fn for_availability(availability: Availability) -> Self {
        match availability {
            Availability::BeRightBack | Availability::Busy | Availability::DoNotDisturb => {
                Self::Disable
            }
            Availability::Available | Availability::Away | Availability::Offline => Self::Restore,
            Availability::AvailableIdle
            | Availability::BusyIdle
            | Availability::PresenceUnknown => Self::Keep,
        }
    }
}

/// Result of a completed check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Disabled,
    /// `promoted` is set when an Offline reading was successfully promoted to Available
    Restored { promoted: bool },
    Unchanged,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Failed to read presence: {0}")]
    Read(#[source] DomainError),

    #[error("{0}")]
    InvalidPresence(#[source] DomainError),
}

/// Everything a tick needs to evaluate the current presence
#[derive(Clone)]
pub struct PresenceCheck {
    host: Arc<dyn Host>,
    api: Arc<dyn PresenceApi>,
    subject: String,
    promotion: ExpirationDuration,
}

impl PresenceCheck {
    pub fn new(
        host: Arc<dyn Host>,
        api: Arc<dyn PresenceApi>,
        subject: impl Into<String>,
        promotion: impl Into<ExpirationDuration>,
    ) -> Self {
        Self {
            host,
            api,
            subject: subject.into(),
            promotion: promotion.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub async fn run(&self) -> Result<CheckOutcome, CheckError> {
        let body = self.api.get_presence().await.map_err(CheckError::Read)?;
        let snapshot = PresenceSnapshot::from_value(&body).map_err(CheckError::InvalidPresence)?;

        debug!(
            subject = %self.subject,
            availability = %snapshot.availability,
            activity = %snapshot.activity,
            "Presence read"
        );

        match ProximityAction::for_availability(snapshot.availability) {
            ProximityAction::Disable => {
                self.host.disable_player_proximity_meeting();
                Ok(CheckOutcome::Disabled)
            }
            ProximityAction::Restore => {
                self.host.restore_player_proximity_meeting();

                // Offline is promoted on every reading until the remote side reports otherwise
                let promoted = if snapshot.availability == Availability::Offline {
                    let presence = PreferredPresence::available().expiring_after(self.promotion);
                    write_preferred_presence(self.api.as_ref(), &self.subject, &presence)
                        .await
                        .is_ok()
                } else {
                    false
                };

                Ok(CheckOutcome::Restored { promoted })
            }
            ProximityAction::Keep => Ok(CheckOutcome::Unchanged),
        }
    }
}
