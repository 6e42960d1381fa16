//! Port traits - define the interface to the host client and the remote presence service
//!
//! The domain layer defines what it needs; adapters (stdio host, HTTP client, test fakes)
//! provide the implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::entities::PreferredPresence;
use crate::error::DomainError;
use crate::events::HostEvent;

/// Result type for port operations
pub type PortResult<T> = Result<T, DomainError>;

// ============================================================================
// Host
// ============================================================================

/// Capabilities exposed by the virtual-world client
pub trait Host: Send + Sync {
    /// Metadata handed over by the host (valid once `HostEvent::Init` fired)
    fn metadata(&self) -> Value;

    /// Subscribe to host events. Only occurrences after the call are delivered.
    fn subscribe(&self) -> broadcast::Receiver<HostEvent>;

    /// Prevent the player from joining proximity meetings (idempotent)
    fn disable_player_proximity_meeting(&self);

    /// Allow the player to join proximity meetings again (idempotent)
    fn restore_player_proximity_meeting(&self);
}

// ============================================================================
// Remote presence API
// ============================================================================

#[async_trait]
pub trait PresenceApi: Send + Sync {
    /// Read the current user's presence, returning the raw response body
    async fn get_presence(&self) -> PortResult<Value>;

    /// Set the preferred presence of the given user
    async fn set_preferred_presence(
        &self,
        subject: &str,
        presence: &PreferredPresence,
    ) -> PortResult<()>;
}

/// Builds a presence API client authenticated with the player's token
pub trait PresenceApiFactory: Send + Sync {
    fn connect(&self, access_token: &str) -> PortResult<Arc<dyn PresenceApi>>;
}
