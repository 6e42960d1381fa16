//! Proximity meeting handlers

use std::sync::Arc;

use bridge_core::{IdentityClaim, PreferredPresence, PresenceApi};
use tokio::task::JoinHandle;
use tracing::info;

use crate::poller::StatusPoller;
use crate::presence::write_preferred_presence;

/// Reacts to the player joining and leaving proximity meetings.
///
/// Writes run as detached tasks; the returned handles only let callers wait for them.
pub struct MeetingBridge {
    api: Arc<dyn PresenceApi>,
    identity: IdentityClaim,
    poller: StatusPoller,
}

impl MeetingBridge {
    pub fn new(api: Arc<dyn PresenceApi>, identity: IdentityClaim, poller: StatusPoller) -> Self {
        Self {
            api,
            identity,
            poller,
        }
    }

    pub fn identity(&self) -> &IdentityClaim {
        &self.identity
    }

    pub fn poller(&self) -> &StatusPoller {
        &self.poller
    }

    /// Stop polling, then mark the player busy
    pub fn on_meeting_joined(&self) -> JoinHandle<()> {
        self.poller.stop();
        info!(subject = %self.identity.subject(), "Proximity meeting joined");
        self.spawn_write(PreferredPresence::busy())
    }

    /// Mark the player available, then resume polling
    pub fn on_meeting_left(&self) -> JoinHandle<()> {
        info!(subject = %self.identity.subject(), "Proximity meeting left");
        let write = self.spawn_write(PreferredPresence::available());
        self.poller.start();
        write
    }

    fn spawn_write(&self, presence: PreferredPresence) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let subject = self.identity.subject().to_string();

        tokio::spawn(async move {
            // Already logged by the writer
            let _ = write_preferred_presence(api.as_ref(), &subject, &presence).await;
        })
    }
}
