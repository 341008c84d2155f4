use tokio::sync::mpsc;
use tracing::info;

use super::{ActuationError, KeyEvent, KeySink, KeyState};

/// Sink that only logs the edges; used when no injection device is attached
#[derive(Debug, Default, Clone)]
pub struct TracingKeySink {
    name: String,
}

impl TracingKeySink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl KeySink for TracingKeySink {
    fn emit(&self, event: KeyEvent) -> Result<(), ActuationError> {
        let edge = match event.state {
            KeyState::Pressed => 1,
            KeyState::Released => 0,
        };
        info!(
            "[{}] KEY_POWER {} at {}",
            self.name,
            edge,
            event.timestamp.format("%H:%M:%S.%3f")
        );
        Ok(())
    }
}

/// Forwards edges over a channel to whatever owns the real input device
#[derive(Debug, Clone)]
pub struct ChannelKeySink {
    sender: mpsc::UnboundedSender<KeyEvent>,
}

impl ChannelKeySink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<KeyEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl KeySink for ChannelKeySink {
    fn emit(&self, event: KeyEvent) -> Result<(), ActuationError> {
        self.sender
            .send(event)
            .map_err(|e| ActuationError::Sink(format!("receiver dropped: {}", e)))
    }
}
