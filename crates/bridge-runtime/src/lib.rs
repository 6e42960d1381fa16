//! # bridge-runtime
//!
//! Proximity-meeting presence bridge: the status poller, the meeting-event handlers, their
//! lifecycle, and the stdio host adapter the `presence-bridge` binary runs on.

pub mod bridge;
pub mod host;
pub mod poller;
pub mod presence;
pub mod protocol;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use std::sync::Arc;

use bridge_common::{AppConfig, AppError, AppResult};
use bridge_core::Host;
use bridge_graph::GraphClientFactory;
use tokio::io::{self, BufReader};
use tracing::{error, info};

pub use bridge::{BridgeState, MeetingBridge, PresenceBridge};
pub use host::{write_commands, StdioHost};
pub use poller::{CheckError, CheckOutcome, PresenceCheck, ProximityAction, StatusPoller};
pub use presence::write_preferred_presence;
pub use protocol::{ControlCommand, HostMessage};

/// Run the bridge on stdin/stdout until stdin closes
pub async fn run(config: AppConfig) -> AppResult<()> {
    let (host, commands) = StdioHost::new();
    let writer = tokio::spawn(write_commands(commands, io::stdout()));

    let factory = Arc::new(GraphClientFactory::new(config.graph.clone()));
    let bridge = PresenceBridge::new(host.clone(), factory, config.presence.clone());

    // Subscribe before reading so the init message cannot be missed
    let events = host.subscribe();
    let reader_host = Arc::clone(&host);
    let reader = tokio::spawn(async move {
        if let Err(e) = reader_host.read_from(BufReader::new(io::stdin())).await {
            error!(error = %e, "Failed to read host messages");
        }
    });

    bridge.run(events).await;
    bridge.shutdown();
    info!("Host input closed, shutting down");

    reader.await.map_err(AppError::internal)?;

    // The command queue closes once the last host handle is gone
    drop(bridge);
    drop(host);
    writer
        .await
        .map_err(AppError::internal)?
        .map_err(AppError::internal)?;

    Ok(())
}
