//! Composition root of the gesture pipeline
//!
//! Forwards every sample to both detectors and turns their results into gate
//! triggers. The detectors share no state; the only coupling is the sweep
//! reset issued when a double-tap episode runs out.

use std::sync::Arc;
use tracing::{debug, warn};

use super::{
    DoubleTapDetector, Gesture, ScreenState, SweepDetector, SweepGeometry, TapVerdict, TouchSample,
};
use crate::actuation::{ActuationError, ActuationGate};
use crate::config::ConfigStore;

pub struct GestureRecognizer {
    sweep: SweepDetector,
    doubletap: DoubleTapDetector,
    config: Arc<ConfigStore>,
    gate: ActuationGate,
}

impl GestureRecognizer {
    pub fn new(config: Arc<ConfigStore>, gate: ActuationGate) -> Self {
        Self::with_geometry(config, gate, SweepGeometry::DEFAULT)
    }

    pub fn with_geometry(
        config: Arc<ConfigStore>,
        gate: ActuationGate,
        geometry: SweepGeometry,
    ) -> Self {
        if !gate.is_attached() {
            warn!("Gesture recognizer running without an actuation target");
        }
        Self {
            sweep: SweepDetector::new(geometry),
            doubletap: DoubleTapDetector::new(),
            config,
            gate,
        }
    }

    pub fn sweep(&self) -> &SweepDetector {
        &self.sweep
    }

    pub fn doubletap(&self) -> &DoubleTapDetector {
        &self.doubletap
    }

    /// Processes one sample. Returns the gesture recognized by this call, if any,
    /// whether or not the gate accepted the actuation.
    pub fn on_sample(&mut self, sample: TouchSample, screen: ScreenState) -> Option<Gesture> {
        let sweep_mode = self.config.sweep_mode();
        let doubletap_mode = self.config.doubletap_mode();

        let swept = self
            .sweep
            .on_sample(sample.x, sample.y, screen, sweep_mode)
            .map(Gesture::Sweep);

        let verdict = self.doubletap.observe(
            sample.x,
            sample.y,
            sample.timestamp,
            doubletap_mode,
            screen,
        );
        if verdict == TapVerdict::EpisodeExpired {
            self.reset_sweep();
        }
        let tapped = (verdict == TapVerdict::Fired).then_some(Gesture::DoubleTap);

        for gesture in swept.iter().chain(tapped.iter()) {
            self.actuate(*gesture);
        }
        swept.or(tapped)
    }

    /// Clears sweep barriers and the debounce flag, e.g. on liftoff
    pub fn reset_sweep(&mut self) {
        self.sweep.reset();
    }

    fn actuate(&self, gesture: Gesture) {
        match self.gate.trigger() {
            Ok(()) => debug!("Actuation scheduled for {:?}", gesture),
            Err(ActuationError::Busy) => {
                debug!("Actuation busy, dropping {:?}", gesture)
            }
            Err(ActuationError::ActuatorUnavailable) => {
                warn!("No actuation target, {:?} not delivered", gesture)
            }
            Err(e) => warn!("Failed to actuate {:?}: {}", gesture, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{Direction, DoubleTapMode, SweepMode};

    fn recognizer(sweep: SweepMode, doubletap: DoubleTapMode) -> (GestureRecognizer, Arc<ConfigStore>) {
        let config = Arc::new(ConfigStore::default());
        config.set_sweep_mode(sweep);
        config.set_doubletap_mode(doubletap);
        (
            GestureRecognizer::new(config.clone(), ActuationGate::detached()),
            config,
        )
    }

    #[test]
    fn wake_sweep_is_reported_once() {
        let (mut rec, _) = recognizer(SweepMode::WakeOnly, DoubleTapMode::Disabled);
        let suspended = ScreenState::Suspended;

        assert_eq!(rec.on_sample(TouchSample::new(10, 5, 0), suspended), None);
        assert_eq!(rec.on_sample(TouchSample::new(100, 5, 20), suspended), None);
        assert_eq!(
            rec.on_sample(TouchSample::new(420, 5, 40), suspended),
            Some(Gesture::Sweep(Direction::Wake))
        );
        assert_eq!(rec.on_sample(TouchSample::new(440, 5, 60), suspended), None);
    }

    #[test]
    fn config_changes_apply_on_next_sample() {
        let (mut rec, config) = recognizer(SweepMode::Disabled, DoubleTapMode::Disabled);
        let suspended = ScreenState::Suspended;

        assert_eq!(rec.on_sample(TouchSample::new(200, 600, 0), suspended), None);
        config.write_doubletap_mode("1").unwrap();
        assert_eq!(
            rec.on_sample(TouchSample::new(210, 610, 50), suspended),
            Some(Gesture::DoubleTap)
        );
    }

    #[test]
    fn expired_tap_episode_resets_sweep_progress() {
        let (mut rec, _) = recognizer(SweepMode::WakeOnly, DoubleTapMode::Enabled);
        let suspended = ScreenState::Suspended;

        rec.on_sample(TouchSample::new(10, 5, 0), suspended);
        rec.on_sample(TouchSample::new(100, 5, 400), suspended);
        assert!(rec.sweep().barriers().passed_second);

        // 900 ticks after the episode opened: sweep progress is dropped
        assert_eq!(rec.on_sample(TouchSample::new(300, 5, 900), suspended), None);
        assert!(rec.sweep().barriers().is_reset());
        assert_eq!(rec.on_sample(TouchSample::new(420, 5, 920), suspended), None);
    }

    #[test]
    fn liftoff_rearms_sweep() {
        let (mut rec, _) = recognizer(SweepMode::WakeAndSleep, DoubleTapMode::Disabled);
        let awake = ScreenState::Awake;
        let path = [(300, 900), (100, 900), (20, 900)];

        let first: Vec<_> = path
            .iter()
            .enumerate()
            .filter_map(|(i, &(x, y))| rec.on_sample(TouchSample::new(x, y, i as u64 * 20), awake))
            .collect();
        assert_eq!(first, vec![Gesture::Sweep(Direction::Sleep)]);

        rec.reset_sweep();
        let second: Vec<_> = path
            .iter()
            .enumerate()
            .filter_map(|(i, &(x, y))| {
                rec.on_sample(TouchSample::new(x, y, 100 + i as u64 * 20), awake)
            })
            .collect();
        assert_eq!(second, vec![Gesture::Sweep(Direction::Sleep)]);
    }
}
