//! Host adapter speaking line-delimited JSON
//!
//! Host messages are read line by line and re-broadcast as `HostEvent`s; proximity
//! toggles are queued as `ControlCommand`s and written out by `write_commands`.

use std::io;
use std::sync::Arc;

use bridge_core::{Host, HostEvent};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use crate::protocol::{ControlCommand, HostMessage};

/// Host events buffered per subscriber
const EVENT_BUFFER_SIZE: usize = 32;

pub struct StdioHost {
    metadata: RwLock<Value>,
    /// Taken on end of input, which closes every subscriber's stream
    events: Mutex<Option<broadcast::Sender<HostEvent>>>,
    commands: mpsc::UnboundedSender<ControlCommand>,
}

impl StdioHost {
    /// Create the host and the receiving end of its command queue
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<ControlCommand>) {
        let (events, _) = broadcast::channel(EVENT_BUFFER_SIZE);
        let (commands, commands_rx) = mpsc::unbounded_channel();

        let host = Arc::new(Self {
            metadata: RwLock::new(Value::Null),
            events: Mutex::new(Some(events)),
            commands,
        });
        (host, commands_rx)
    }

    /// Read host messages until end of input, then close the event stream.
    pub async fn read_from<R>(&self, reader: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let result = loop {
            match lines.next_line().await {
                Ok(Some(line)) => self.handle_line(&line),
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        self.close();
        result
    }

    /// Handle one input line. Blank lines are skipped, unreadable ones logged.
    pub fn handle_line(&self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        match HostMessage::from_json(line) {
            Ok(message) => self.dispatch(message),
            Err(e) => warn!(error = %e, "Ignoring unreadable host message"),
        }
    }

    fn dispatch(&self, message: HostMessage) {
        let event = message.event();
        if let HostMessage::Init { metadata } = message {
            *self.metadata.write() = metadata;
        }

        match self.events.lock().as_ref() {
            Some(events) => {
                if events.send(event).is_err() {
                    debug!(%event, "No subscriber for host event");
                }
            }
            None => debug!(%event, "Host event after end of input"),
        }
    }

    /// Close the event stream
    pub fn close(&self) {
        if self.events.lock().take().is_some() {
            debug!("Host event stream closed");
        }
    }

    fn send_command(&self, command: ControlCommand) {
        if self.commands.send(command).is_err() {
            debug!(%command, "Command writer gone, dropping command");
        }
    }
}

impl Host for StdioHost {
    fn metadata(&self) -> Value {
        self.metadata.read().clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        if let Some(events) = self.events.lock().as_ref() {
            return events.subscribe();
        }

        // Already closed: hand out a receiver that reports closure right away
        let (events, receiver) = broadcast::channel(1);
        drop(events);
        receiver
    }

    fn disable_player_proximity_meeting(&self) {
        self.send_command(ControlCommand::DisablePlayerProximityMeeting);
    }

    fn restore_player_proximity_meeting(&self) {
        self.send_command(ControlCommand::RestorePlayerProximityMeeting);
    }
}

/// Write queued commands, one JSON object per line, until every sender is gone
pub async fn write_commands<W>(
    mut commands: mpsc::UnboundedReceiver<ControlCommand>,
    mut writer: W,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(command) = commands.recv().await {
        let mut line = command.to_json()?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}
