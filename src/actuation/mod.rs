//! Actuation subsystem: the single output of the recognizer
//!
//! A recognized gesture becomes one simulated power-key press/release pair.
//!
//! 1. [`gate`] - Non-blocking single-flight gate and its worker task
//! 2. [`press_cycle`] - Press, hold, release state machine run by the worker
//! 3. [`sink`] - [`KeySink`] implementations that deliver edges to the platform
//!
//! # Architecture
//!
//! ```text
//! trigger() ──try_lock──► PressJob ──mpsc──► worker ──► PressCycle ──► KeySink
//!     │                                                     │
//!     └── Busy if a cycle is in flight        guard dropped ┘ after release hold
//! ```

pub mod gate;
pub mod press_cycle;
pub mod sink;

use chrono::{DateTime, Local};

pub use gate::{ActuationGate, GateSettings};
pub use sink::{ChannelKeySink, TracingKeySink};

/// Logical state of the simulated power key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

/// One edge delivered to the input-injection mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub state: KeyState,
    pub timestamp: DateTime<Local>,
}

impl KeyEvent {
    pub fn now(state: KeyState) -> Self {
        Self {
            state,
            timestamp: Local::now(),
        }
    }
}

/// External mechanism that turns key edges into real input events
pub trait KeySink: Send + Sync {
    fn emit(&self, event: KeyEvent) -> Result<(), ActuationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ActuationError {
    /// An actuation is already in flight; the request is dropped
    #[error("Actuation already in progress")]
    Busy,

    #[error("Actuation target is not initialized")]
    ActuatorUnavailable,

    #[error("Failed to emit key event: {0}")]
    Sink(String),

    #[error("Failed to schedule actuation: {0}")]
    Queue(String),
}
