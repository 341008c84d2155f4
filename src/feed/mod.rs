//! Touch feed adapter
//!
//! Bridges the platform's touch event stream into the recognizer. Events come
//! in over an mpsc channel, the screen state is polled from a watch channel on
//! every sample, and recognized gestures are broadcast to observers.
//!
//! ```text
//! touch driver ─[TouchEvent]→ FeedHandle task ─[Gesture]→ observers
//!                                  ▲
//!             screen provider ─────┘ (watch, polled per sample)
//! ```

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::gesture::{Gesture, GestureRecognizer, ScreenState, TouchSample};

/// Event delivered by the touch driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    Sample(TouchSample),
    /// Finger left the panel; ends the current sweep episode
    Liftoff,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Feed task failed: {0}")]
    TaskError(String),
}

pub struct FeedHandle {
    shutdown: CancellationToken,
    task_handle: JoinHandle<GestureRecognizer>,
}

impl FeedHandle {
    /// Spawns the feed loop; the recognizer is handed back when the loop ends
    pub fn spawn(
        recognizer: GestureRecognizer,
        events: mpsc::Receiver<TouchEvent>,
        screen: watch::Receiver<ScreenState>,
        gestures: mpsc::Sender<Gesture>,
    ) -> Self {
        let shutdown = CancellationToken::new();
        let task_handle = tokio::spawn(run_feed_loop(
            recognizer,
            events,
            screen,
            gestures,
            shutdown.clone(),
        ));
        info!("Touch feed task spawned");
        Self {
            shutdown,
            task_handle,
        }
    }

    /// Stops the loop and waits for it to return the recognizer
    pub async fn shutdown(self) -> Result<GestureRecognizer, FeedError> {
        self.shutdown.cancel();
        self.join().await
    }

    /// Waits for the loop to end on its own (event channel closed)
    pub async fn join(self) -> Result<GestureRecognizer, FeedError> {
        self.task_handle
            .await
            .map_err(|e| FeedError::TaskError(e.to_string()))
    }
}

async fn run_feed_loop(
    mut recognizer: GestureRecognizer,
    mut events: mpsc::Receiver<TouchEvent>,
    screen: watch::Receiver<ScreenState>,
    gestures: mpsc::Sender<Gesture>,
    shutdown: CancellationToken,
) -> GestureRecognizer {
    let mut samples: u64 = 0;
    loop {
        let event = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Touch feed shutdown requested");
                break;
            }
            event = events.recv() => match event {
                Some(event) => event,
                None => {
                    info!("Touch event channel closed");
                    break;
                }
            },
        };

        match event {
            TouchEvent::Sample(sample) => {
                samples += 1;
                let state = *screen.borrow();
                if let Some(gesture) = recognizer.on_sample(sample, state) {
                    if let Err(e) = gestures.try_send(gesture) {
                        warn!("No observer took {:?}: {}", gesture, e);
                    }
                }
            }
            TouchEvent::Liftoff => {
                debug!("Liftoff after {} samples", samples);
                recognizer.reset_sweep();
            }
        }
    }
    info!("Touch feed processed {} samples", samples);
    recognizer
}
