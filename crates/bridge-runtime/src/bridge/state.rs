//! Bridge lifecycle
//!
//! `Uninitialized` until the host reports it is ready, then either `Active` (a valid single
//! sign-on token was found) or `Inactive` for the rest of the session.

use std::sync::Arc;

use bridge_common::{decode_identity, AppResult, PresenceSettings};
use bridge_core::{Host, HostEvent, HostMetadata, PresenceApiFactory};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::meeting::MeetingBridge;
use crate::poller::{PresenceCheck, StatusPoller};

/// Observable bridge state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Uninitialized,
    Inactive,
    Active,
}

enum Phase {
    Uninitialized,
    Inactive,
    Active(Arc<MeetingBridge>),
}

impl Phase {
    fn state(&self) -> BridgeState {
        match self {
            Self::Uninitialized => BridgeState::Uninitialized,
            Self::Inactive => BridgeState::Inactive,
            Self::Active(_) => BridgeState::Active,
        }
    }
}

pub struct PresenceBridge {
    host: Arc<dyn Host>,
    factory: Arc<dyn PresenceApiFactory>,
    settings: PresenceSettings,
    phase: Mutex<Phase>,
}

impl PresenceBridge {
    pub fn new(
        host: Arc<dyn Host>,
        factory: Arc<dyn PresenceApiFactory>,
        settings: PresenceSettings,
    ) -> Self {
        Self {
            host,
            factory,
            settings,
            phase: Mutex::new(Phase::Uninitialized),
        }
    }

    pub fn state(&self) -> BridgeState {
        self.phase.lock().state()
    }

    /// The meeting bridge, once active
    pub fn meeting_bridge(&self) -> Option<Arc<MeetingBridge>> {
        match &*self.phase.lock() {
            Phase::Active(bridge) => Some(Arc::clone(bridge)),
            _ => None,
        }
    }

    /// Wire everything up from the host metadata. Only the first call has an effect.
    ///
    /// Missing or malformed metadata leaves the bridge inactive without an error. A token
    /// that cannot be decoded leaves it inactive and is returned as an error.
    pub fn initialize(&self, metadata: &Value) -> AppResult<BridgeState> {
        let mut phase = self.phase.lock();
        if !matches!(*phase, Phase::Uninitialized) {
            debug!(state = ?phase.state(), "Bridge already initialized");
            return Ok(phase.state());
        }
        *phase = Phase::Inactive;

        let metadata = match HostMetadata::from_value(metadata) {
            Ok(metadata) => metadata,
            Err(e) => {
                info!(reason = %e, "Not connected with the single sign-on, presence sync disabled");
                return Ok(BridgeState::Inactive);
            }
        };
        let Some(token) = metadata.access_token() else {
            info!("Not connected with the single sign-on, presence sync disabled");
            return Ok(BridgeState::Inactive);
        };

        let identity = decode_identity(token)?;
        let api = self.factory.connect(token)?;

        let check = PresenceCheck::new(
            Arc::clone(&self.host),
            Arc::clone(&api),
            identity.subject(),
            self.settings.promotion_expiration(),
        );
        let poller = StatusPoller::new(check, self.settings.poll_interval());
        let bridge = Arc::new(MeetingBridge::new(api, identity, poller));
        bridge.poller().start();

        info!(
            subject = %bridge.identity().subject(),
            interval_ms = self.settings.poll_interval_ms,
            "Presence bridge active"
        );

        *phase = Phase::Active(bridge);
        Ok(BridgeState::Active)
    }

    /// Route one host event. Returns the handle of the presence write it started, if any.
    pub fn handle_event(&self, event: HostEvent) -> AppResult<Option<JoinHandle<()>>> {
        match event {
            HostEvent::Init => {
                let metadata = self.host.metadata();
                self.initialize(&metadata)?;
                Ok(None)
            }
            HostEvent::ProximityMeetingJoined => {
                Ok(self.meeting_bridge().map(|bridge| bridge.on_meeting_joined()))
            }
            HostEvent::ProximityMeetingLeft => {
                Ok(self.meeting_bridge().map(|bridge| bridge.on_meeting_left()))
            }
        }
    }

    /// Drive the bridge from the host's event stream until it closes
    pub async fn run(&self, mut events: broadcast::Receiver<HostEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    debug!(%event, "Host event received");
                    if let Err(e) = self.handle_event(event) {
                        error!(
                            event = %event,
                            code = e.error_code(),
                            error = %e,
                            "Presence bridge initialization failed"
                        );
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Host events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }

        debug!("Host event stream closed");
    }

    /// Stop polling
    pub fn shutdown(&self) {
        if let Some(bridge) = self.meeting_bridge() {
            bridge.poller().stop();
        }
    }
}
