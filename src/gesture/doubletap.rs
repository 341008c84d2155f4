//! Double-tap detector
//!
//! Keeps a two-slot rolling history of tap times and tap positions plus an
//! episode timer. A pair of taps qualifies when the second one lands inside
//! `[GAP_MIN, GAP_MAX]` ticks of the episode start, close to the first one,
//! and inside the active vertical band of the panel.
//!
//! Checks run in a fixed order on every sample: episode timeout, minimum gap
//! (noise), then qualification. Rejected samples still roll the history.

use tracing::{debug, info};

use super::{DoubleTapMode, ScreenState};

pub const GAP_MIN: u64 = 12;
pub const GAP_MAX: u64 = 120;
pub const SPATIAL_DELTA: i32 = 75;
pub const EPISODE_SPAN: u64 = 800;
/// Exclusive vertical band in which taps count
pub const Y_BAND: (i32, i32) = (50, 1200);

/// Outcome of feeding one sample to the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapVerdict {
    /// Sample rolled into the history, nothing to compare against yet
    Recorded,
    /// Sample arrived closer than `GAP_MIN` to the previous one
    Noise,
    /// Episode exceeded `EPISODE_SPAN`; the sample seeds a fresh episode
    EpisodeExpired,
    /// Pair compared and did not qualify, or detection is inactive
    Rejected,
    /// Sample completes a qualifying double-tap
    Fired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TapPoint {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, Default)]
pub struct DoubleTapDetector {
    // [most recent, previous]
    times: [Option<u64>; 2],
    points: [Option<TapPoint>; 2],
    episode_start: Option<u64>,
}

impl DoubleTapDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true iff this sample completes a qualifying double-tap
    pub fn on_sample(
        &mut self,
        x: i32,
        y: i32,
        timestamp: u64,
        mode: DoubleTapMode,
        screen: ScreenState,
    ) -> bool {
        self.observe(x, y, timestamp, mode, screen) == TapVerdict::Fired
    }

    pub fn observe(
        &mut self,
        x: i32,
        y: i32,
        timestamp: u64,
        mode: DoubleTapMode,
        screen: ScreenState,
    ) -> TapVerdict {
        debug!("double-tap sample x,y({},{}) t={}", x, y, timestamp);

        self.times = [Some(timestamp), self.times[0]];
        let episode_start = *self.episode_start.get_or_insert(timestamp);

        if timestamp.saturating_sub(episode_start) > EPISODE_SPAN {
            debug!(
                "Double-tap episode expired after {} ticks",
                timestamp.saturating_sub(episode_start)
            );
            self.reset();
            self.seed(x, y, timestamp);
            return TapVerdict::EpisodeExpired;
        }

        if let [Some(current), Some(previous)] = self.times {
            if current.saturating_sub(previous) < GAP_MIN {
                debug!("Tap gap {} below minimum, ignoring", current.saturating_sub(previous));
                return TapVerdict::Noise;
            }
        }

        self.points = [Some(TapPoint { x, y }), self.points[0]];

        if screen != ScreenState::Suspended || mode != DoubleTapMode::Enabled {
            return TapVerdict::Rejected;
        }

        let (latest, earlier) = match self.points {
            [Some(latest), Some(earlier)] => (latest, earlier),
            _ => return TapVerdict::Recorded,
        };

        let delta_x = latest.x - earlier.x;
        let delta_y = latest.y - earlier.y;
        let gap = timestamp.saturating_sub(episode_start);
        debug!(
            "y = {}, timedelta = {}, deltax = {}, deltay = {}",
            y, gap, delta_x, delta_y
        );

        let in_band = y > Y_BAND.0 && y < Y_BAND.1;
        let in_window = (GAP_MIN..=GAP_MAX).contains(&gap);
        let close = delta_x.abs() < SPATIAL_DELTA && delta_y.abs() < SPATIAL_DELTA;

        if in_band && in_window && close {
            info!("Double-tap recognized after {} ticks", gap);
            self.reset();
            return TapVerdict::Fired;
        }
        TapVerdict::Rejected
    }

    /// Clears tap history and closes the episode
    pub fn reset(&mut self) {
        self.times = [None; 2];
        self.points = [None; 2];
        self.episode_start = None;
    }

    pub fn episode_open(&self) -> bool {
        self.episode_start.is_some()
    }

    fn seed(&mut self, x: i32, y: i32, timestamp: u64) {
        self.times[0] = Some(timestamp);
        self.points[0] = Some(TapPoint { x, y });
        self.episode_start = Some(timestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ON: DoubleTapMode = DoubleTapMode::Enabled;
    const OFF: ScreenState = ScreenState::Suspended;

    #[test]
    fn close_pair_inside_window_fires() {
        let mut detector = DoubleTapDetector::new();
        assert_eq!(detector.observe(200, 600, 0, ON, OFF), TapVerdict::Recorded);
        assert!(detector.on_sample(210, 610, 50, ON, OFF));
        assert!(!detector.episode_open());
    }

    #[test]
    fn pair_below_minimum_gap_is_noise() {
        let mut detector = DoubleTapDetector::new();
        assert!(!detector.on_sample(200, 600, 0, ON, OFF));
        assert_eq!(detector.observe(210, 610, 5, ON, OFF), TapVerdict::Noise);
    }

    #[test]
    fn pair_beyond_episode_span_starts_fresh_episode() {
        let mut detector = DoubleTapDetector::new();
        assert!(!detector.on_sample(200, 600, 0, ON, OFF));
        assert_eq!(
            detector.observe(210, 610, 900, ON, OFF),
            TapVerdict::EpisodeExpired
        );
        assert!(detector.episode_open());

        // The expired sample is the first tap of the new episode
        assert!(detector.on_sample(205, 605, 950, ON, OFF));
    }

    #[test]
    fn distant_taps_are_rejected() {
        let mut detector = DoubleTapDetector::new();
        detector.on_sample(100, 600, 0, ON, OFF);
        assert_eq!(detector.observe(300, 600, 50, ON, OFF), TapVerdict::Rejected);
    }

    #[test]
    fn taps_outside_vertical_band_are_rejected() {
        let mut detector = DoubleTapDetector::new();
        detector.on_sample(200, 40, 0, ON, OFF);
        assert_eq!(detector.observe(200, 45, 50, ON, OFF), TapVerdict::Rejected);

        let mut detector = DoubleTapDetector::new();
        detector.on_sample(200, 1190, 0, ON, OFF);
        assert_eq!(detector.observe(200, 1200, 50, ON, OFF), TapVerdict::Rejected);
    }

    #[test]
    fn slow_second_tap_is_rejected() {
        let mut detector = DoubleTapDetector::new();
        detector.on_sample(200, 600, 0, ON, OFF);
        assert_eq!(detector.observe(200, 600, 300, ON, OFF), TapVerdict::Rejected);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let mut detector = DoubleTapDetector::new();
        detector.on_sample(200, 600, 1_000, ON, OFF);
        assert!(detector.on_sample(200, 600, 1_000 + GAP_MAX, ON, OFF));

        let mut detector = DoubleTapDetector::new();
        detector.on_sample(200, 600, 1_000, ON, OFF);
        assert!(detector.on_sample(200, 600, 1_000 + GAP_MIN, ON, OFF));
    }

    #[test]
    fn inactive_detection_still_rolls_history() {
        let mut detector = DoubleTapDetector::new();
        detector.on_sample(200, 600, 0, ON, ScreenState::Awake);
        assert_eq!(
            detector.observe(200, 600, 50, DoubleTapMode::Disabled, OFF),
            TapVerdict::Rejected
        );
        assert!(detector.episode_open());

        // Third tap pairs with the second; gap is measured from episode start
        assert!(detector.on_sample(210, 600, 100, ON, OFF));
    }

    #[test]
    fn noise_sample_does_not_replace_spatial_history() {
        let mut detector = DoubleTapDetector::new();
        detector.on_sample(200, 600, 0, ON, OFF);
        assert_eq!(detector.observe(900, 900, 5, ON, OFF), TapVerdict::Noise);

        // Compared against the first tap, not the noisy one
        assert!(detector.on_sample(205, 600, 60, ON, OFF));
    }
}
