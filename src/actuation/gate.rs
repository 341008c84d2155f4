//! Actuation Gate - single-flight access to the power key
//!
//! `trigger()` never blocks. It try-acquires an owned lock and hands the guard,
//! together with a press job, to a dedicated worker task. The guard is dropped
//! only after the release hold has elapsed, so a second request arriving while
//! a cycle is pending is rejected with [`ActuationError::Busy`] instead of
//! being queued.

use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex, OwnedMutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::press_cycle::run_cycle;
use super::{ActuationError, KeySink};

/// Timing of the simulated key press
#[derive(Clone, Debug)]
pub struct GateSettings {
    /// Hold after key-down and again after key-up, in milliseconds
    pub hold_ms: u64,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self { hold_ms: 100 }
    }
}

struct PressJob {
    requested_at: DateTime<Local>,
    // Released when the job is dropped at the end of the cycle
    _permit: OwnedMutexGuard<()>,
}

/// Cloneable handle to the actuation worker
#[derive(Clone, Debug)]
pub struct ActuationGate {
    lock: Arc<Mutex<()>>,
    jobs: Option<mpsc::Sender<PressJob>>,
}

impl ActuationGate {
    /// Spawns the worker task on the current tokio runtime
    pub fn spawn(
        sink: Arc<dyn KeySink>,
        settings: Option<GateSettings>,
    ) -> (Self, JoinHandle<()>) {
        let settings = settings.unwrap_or_default();
        info!("Spawning actuation worker with settings: {:?}", settings);

        // A job always carries the lock, so one slot is enough
        let (jobs, receiver) = mpsc::channel(1);
        let hold = Duration::from_millis(settings.hold_ms);
        let worker = tokio::spawn(run_worker(receiver, sink, hold));

        let gate = Self {
            lock: Arc::new(Mutex::new(())),
            jobs: Some(jobs),
        };
        (gate, worker)
    }

    /// Gate without an actuation target; every trigger reports `ActuatorUnavailable`
    pub fn detached() -> Self {
        Self {
            lock: Arc::new(Mutex::new(())),
            jobs: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.jobs.is_some()
    }

    /// True while a press/release cycle is scheduled or running
    pub fn is_busy(&self) -> bool {
        self.lock.try_lock().is_err()
    }

    pub fn trigger(&self) -> Result<(), ActuationError> {
        let jobs = self
            .jobs
            .as_ref()
            .ok_or(ActuationError::ActuatorUnavailable)?;

        let permit = self
            .lock
            .clone()
            .try_lock_owned()
            .map_err(|_| ActuationError::Busy)?;

        let job = PressJob {
            requested_at: Local::now(),
            _permit: permit,
        };
        jobs.try_send(job)
            .map_err(|e| ActuationError::Queue(e.to_string()))?;

        debug!("Power key actuation scheduled");
        Ok(())
    }
}

async fn run_worker(mut receiver: mpsc::Receiver<PressJob>, sink: Arc<dyn KeySink>, hold: Duration) {
    info!("Actuation worker started");
    while let Some(job) = receiver.recv().await {
        debug!(
            "Running press cycle requested at {}",
            job.requested_at.format("%H:%M:%S.%3f")
        );
        if let Err(e) = run_cycle(sink.clone(), hold).await {
            error!("Press cycle failed: {}", e);
        }
        drop(job);
    }
    info!("Actuation worker finished, all gate handles dropped");
}
