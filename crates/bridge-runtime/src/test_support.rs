//! In-memory host, presence API and factory for tests
//!
//! Used by the unit tests of this crate and, through the `test-support` feature, by the
//! integration tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bridge_core::{
    DomainError, Host, HostEvent, PortResult, PreferredPresence, PresenceApi, PresenceApiFactory,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::broadcast;

use crate::protocol::ControlCommand;

/// Presence API serving a configurable reading and recording every write
pub struct FakePresenceApi {
    presence: Mutex<Value>,
    reachable: AtomicBool,
    reject_writes: AtomicBool,
    read_delay: Mutex<Duration>,
    reads: AtomicUsize,
    write_attempts: AtomicUsize,
    writes: Mutex<Vec<(String, Value)>>,
}

impl FakePresenceApi {
    pub fn with_presence(availability: &str, activity: &str) -> Self {
        Self {
            presence: Mutex::new(presence_body(availability, activity)),
            reachable: AtomicBool::new(true),
            reject_writes: AtomicBool::new(false),
            read_delay: Mutex::new(Duration::ZERO),
            reads: AtomicUsize::new(0),
            write_attempts: AtomicUsize::new(0),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn set_presence(&self, availability: &str, activity: &str) {
        self.set_body(presence_body(availability, activity));
    }

    pub fn set_body(&self, body: Value) {
        *self.presence.lock() = body;
    }

    /// Unreachable reads fail as a transport error
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Latency of every later read
    pub fn set_read_delay(&self, delay: Duration) {
        *self.read_delay.lock() = delay;
    }

    /// Reads started so far, answered or not
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> Vec<(String, Value)> {
        self.writes.lock().clone()
    }

    pub fn written_bodies(&self) -> Vec<Value> {
        self.writes().into_iter().map(|(_, body)| body).collect()
    }
}

#[async_trait]
impl PresenceApi for FakePresenceApi {
    async fn get_presence(&self) -> PortResult<Value> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        let delay = *self.read_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if !self.reachable.load(Ordering::SeqCst) {
            return Err(DomainError::RemoteUnavailable(
                "connection refused".to_string(),
            ));
        }
        Ok(self.presence.lock().clone())
    }

    async fn set_preferred_presence(
        &self,
        subject: &str,
        presence: &PreferredPresence,
    ) -> PortResult<()> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(DomainError::RemoteRejected {
                status: 403,
                body: "Forbidden".to_string(),
            });
        }

        let body =
            serde_json::to_value(presence).map_err(|e| DomainError::RemoteParse(e.to_string()))?;
        self.writes.lock().push((subject.to_string(), body));
        Ok(())
    }
}

/// Host recording every proximity command it receives
pub struct FakeHost {
    metadata: Mutex<Value>,
    events: broadcast::Sender<HostEvent>,
    commands: Mutex<Vec<ControlCommand>>,
}

impl FakeHost {
    pub fn new(metadata: Value) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            metadata: Mutex::new(metadata),
            events,
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn emit(&self, event: HostEvent) {
        let _ = self.events.send(event);
    }

    pub fn commands(&self) -> Vec<ControlCommand> {
        self.commands.lock().clone()
    }

    pub fn count(&self, command: ControlCommand) -> usize {
        self.commands.lock().iter().filter(|c| **c == command).count()
    }

    pub fn disabled(&self) -> usize {
        self.count(ControlCommand::DisablePlayerProximityMeeting)
    }

    pub fn restored(&self) -> usize {
        self.count(ControlCommand::RestorePlayerProximityMeeting)
    }
}

impl Host for FakeHost {
    fn metadata(&self) -> Value {
        self.metadata.lock().clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.events.subscribe()
    }

    fn disable_player_proximity_meeting(&self) {
        self.commands
            .lock()
            .push(ControlCommand::DisablePlayerProximityMeeting);
    }

    fn restore_player_proximity_meeting(&self) {
        self.commands
            .lock()
            .push(ControlCommand::RestorePlayerProximityMeeting);
    }
}

/// Factory handing out one shared fake API and recording the tokens it was given
pub struct FakeFactory {
    api: Arc<FakePresenceApi>,
    tokens: Mutex<Vec<String>>,
}

impl FakeFactory {
    pub fn new(api: Arc<FakePresenceApi>) -> Self {
        Self {
            api,
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().clone()
    }
}

impl PresenceApiFactory for FakeFactory {
    fn connect(&self, access_token: &str) -> PortResult<Arc<dyn PresenceApi>> {
        self.tokens.lock().push(access_token.to_string());
        Ok(self.api.clone())
    }
}

/// Presence response body as returned by the remote service
pub fn presence_body(availability: &str, activity: &str) -> Value {
    json!({
        "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#users('me')/presence/$entity",
        "id": "fa8bf3dc-eca7-46b7-bad1-db199b62afc3",
        "availability": availability,
        "activity": activity
    })
}

/// Host metadata carrying the given access tokens
pub fn metadata_with_tokens(tokens: &[&str]) -> Value {
    let records: Vec<Value> = tokens.iter().map(|token| json!({ "token": token })).collect();
    json!({ "player": { "accessTokens": records } })
}

/// Signed token carrying the given subject
#[cfg(test)]
pub fn token_for(subject: &str) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    encode(
        &Header::default(),
        &json!({ "oid": subject, "name": "Jane Doe" }),
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}
