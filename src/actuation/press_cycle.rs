//! Press/release cycle with compile-time phase safety via statum
//!
//! ```text
//! Armed ──press()──► Holding ──release()──► Done
//! ```
//!
//! Each edge is followed by the same fixed hold so the platform sees a press
//! of at least `hold` and a quiet gap before the next one.

use statum::{machine, state};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::{ActuationError, KeyEvent, KeySink, KeyState};

#[state]
#[derive(Debug, Clone)]
pub enum PressPhase {
    Armed,
    Holding,
    Done,
}

#[machine]
pub struct PressCycle<S: PressPhase> {
    sink: Arc<dyn KeySink>,
    hold: Duration,
}

impl<S: PressPhase> PressCycle<S> {
    pub fn hold(&self) -> Duration {
        self.hold
    }
}

impl PressCycle<Armed> {
    pub fn create(sink: Arc<dyn KeySink>, hold: Duration) -> Self {
        Self::new(sink, hold)
    }

    pub async fn press(self) -> Result<PressCycle<Holding>, ActuationError> {
        self.sink.emit(KeyEvent::now(KeyState::Pressed))?;
        debug!("Power key down, holding {:?}", self.hold);
        tokio::time::sleep(self.hold).await;
        Ok(self.transition())
    }
}

impl PressCycle<Holding> {
    pub async fn release(self) -> Result<PressCycle<Done>, ActuationError> {
        self.sink.emit(KeyEvent::now(KeyState::Released))?;
        debug!("Power key up, settling {:?}", self.hold);
        tokio::time::sleep(self.hold).await;
        Ok(self.transition())
    }
}

/// Runs a full cycle from a fresh armed state
pub async fn run_cycle(sink: Arc<dyn KeySink>, hold: Duration) -> Result<(), ActuationError> {
    let holding = PressCycle::create(sink, hold).press().await?;
    let _done: PressCycle<Done> = holding.release().await?;
    Ok(())
}
