//! Preferred presence writes shared by the poller and the meeting bridge

use bridge_core::{PortResult, PreferredPresence, PresenceApi};
use tracing::{error, info};

/// Send a preferred presence to the remote service and log the outcome.
///
/// Failures are logged here and handed back only so callers can report what happened;
/// nothing retries them.
pub async fn write_preferred_presence(
    api: &dyn PresenceApi,
    subject: &str,
    presence: &PreferredPresence,
) -> PortResult<()> {
    match api.set_preferred_presence(subject, presence).await {
        Ok(()) => {
            info!(
                subject = %subject,
                availability = %presence.availability(),
                activity = %presence.activity(),
                expiration = ?presence.expiration().map(|e| e.to_string()),
                "Presence status set to {} - {}",
                presence.availability(),
                presence.activity()
            );
            Ok(())
        }
        Err(e) => {
            error!(
                subject = %subject,
                availability = %presence.availability(),
                activity = %presence.activity(),
                code = e.code(),
                error = %e,
                "Failed to set preferred presence"
            );
            Err(e)
        }
    }
}
