//! Directional sweep detector
//!
//! A sweep is a drag through an ordered sequence of x-bands. While the screen
//! is suspended a left→right sweep wakes the device; while it is awake (and the
//! sleep mode is enabled) the mirrored right→left sweep puts it to sleep.
//!
//! ```text
//!  x:  0 ─── B1 ─── B2 ──────────── X_MAX-X_FINAL ─── X_MAX
//! wake:  [stage 0][stage 1][.......... final zone ........]
//! sleep: [final ][stage 1][   stage 0   ]
//! ```
//!
//! Barriers are sticky: once crossed, later samples only need to progress
//! further. Only [`SweepDetector::reset`] clears them.

use tracing::{debug, info};

use super::{Direction, ScreenState, SweepMode};

/// Fixed panel geometry for the sweep corridors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepGeometry {
    /// Logical panel width bound
    pub x_max: i32,
    /// Minimum y for samples of the sleep corridor
    pub y_limit: i32,
    /// First intermediate x-barrier
    pub barrier_one: i32,
    /// Second intermediate x-barrier
    pub barrier_two: i32,
    /// Width of the final trigger zone at either edge
    pub x_final: i32,
}

impl SweepGeometry {
    pub const DEFAULT: Self = Self {
        x_max: 450,
        y_limit: 800,
        barrier_one: 50,
        barrier_two: 150,
        x_final: 50,
    };

    /// Left edge of the wake final zone and right edge of the sleep entry band
    fn far_edge(&self) -> i32 {
        self.x_max - self.x_final
    }
}

impl Default for SweepGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Progress through the two intermediate barriers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarrierState {
    pub passed_first: bool,
    pub passed_second: bool,
}

impl BarrierState {
    pub fn is_reset(&self) -> bool {
        !self.passed_first && !self.passed_second
    }
}

#[derive(Debug, Clone)]
pub struct SweepDetector {
    geometry: SweepGeometry,
    barriers: BarrierState,
    already_fired: bool,
}

impl Default for SweepDetector {
    fn default() -> Self {
        Self::new(SweepGeometry::DEFAULT)
    }
}

impl SweepDetector {
    pub fn new(geometry: SweepGeometry) -> Self {
        Self {
            geometry,
            barriers: BarrierState::default(),
            already_fired: false,
        }
    }

    pub fn geometry(&self) -> &SweepGeometry {
        &self.geometry
    }

    pub fn barriers(&self) -> BarrierState {
        self.barriers
    }

    pub fn has_fired(&self) -> bool {
        self.already_fired
    }

    /// Feeds one sample; returns the direction if this call fires a new trigger
    pub fn on_sample(
        &mut self,
        x: i32,
        y: i32,
        screen: ScreenState,
        mode: SweepMode,
    ) -> Option<Direction> {
        debug!("sweep sample x,y({:4},{:4}) screen={:?}", x, y, screen);

        match (screen, mode) {
            (_, SweepMode::Disabled) => None,
            (ScreenState::Suspended, _) => self.advance_wake(x, y),
            (ScreenState::Awake, SweepMode::WakeAndSleep) => self.advance_sleep(x, y),
            (ScreenState::Awake, SweepMode::WakeOnly) => None,
        }
    }

    /// Clears barriers and re-arms the debounce flag
    pub fn reset(&mut self) {
        if !self.barriers.is_reset() || self.already_fired {
            debug!(
                "Resetting sweep state (barriers={:?}, fired={})",
                self.barriers, self.already_fired
            );
        }
        self.barriers = BarrierState::default();
        self.already_fired = false;
    }

    fn advance_wake(&mut self, x: i32, y: i32) -> Option<Direction> {
        let g = self.geometry;
        if y <= 0 {
            return None;
        }

        if !(self.barriers.passed_first || (x > 0 && x < g.barrier_one)) {
            return None;
        }
        self.barriers.passed_first = true;

        if !(self.barriers.passed_second || (x > g.barrier_one && x < g.barrier_two)) {
            return None;
        }
        self.barriers.passed_second = true;

        if x > g.barrier_two && x > g.far_edge() {
            return self.fire(Direction::Wake);
        }
        None
    }

    fn advance_sleep(&mut self, x: i32, y: i32) -> Option<Direction> {
        let g = self.geometry;
        if y <= g.y_limit {
            return None;
        }

        if !(self.barriers.passed_first || (x < g.far_edge() && x > g.barrier_two)) {
            return None;
        }
        self.barriers.passed_first = true;

        if !(self.barriers.passed_second || (x < g.barrier_two && x > g.barrier_one)) {
            return None;
        }
        self.barriers.passed_second = true;

        if x < g.barrier_one && x < g.x_final {
            return self.fire(Direction::Sleep);
        }
        None
    }

    fn fire(&mut self, direction: Direction) -> Option<Direction> {
        if self.already_fired {
            debug!("Sweep {:?} already fired in this episode", direction);
            return None;
        }
        self.already_fired = true;
        info!("Sweep recognized: {:?}", direction);
        Some(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(
        detector: &mut SweepDetector,
        screen: ScreenState,
        mode: SweepMode,
        points: &[(i32, i32)],
    ) -> Vec<Option<Direction>> {
        points
            .iter()
            .map(|&(x, y)| detector.on_sample(x, y, screen, mode))
            .collect()
    }

    #[test]
    fn left_to_right_wakes_on_third_sample() {
        let mut detector = SweepDetector::default();
        let results = feed(
            &mut detector,
            ScreenState::Suspended,
            SweepMode::WakeOnly,
            &[(10, 5), (100, 5), (420, 5)],
        );
        assert_eq!(results, vec![None, None, Some(Direction::Wake)]);
        assert!(detector.has_fired());
    }

    #[test]
    fn fired_sweep_stays_quiet_until_reset() {
        let mut detector = SweepDetector::default();
        let screen = ScreenState::Suspended;
        let mode = SweepMode::WakeAndSleep;
        feed(&mut detector, screen, mode, &[(10, 5), (100, 5), (420, 5)]);

        let again = feed(&mut detector, screen, mode, &[(430, 5), (10, 5), (440, 7)]);
        assert!(again.iter().all(Option::is_none));

        detector.reset();
        assert!(detector.barriers().is_reset());
        assert!(!detector.has_fired());

        let rearmed = feed(&mut detector, screen, mode, &[(10, 5), (100, 5), (420, 5)]);
        assert_eq!(rearmed[2], Some(Direction::Wake));
    }

    #[test]
    fn reversed_order_never_triggers() {
        let mut detector = SweepDetector::default();
        let results = feed(
            &mut detector,
            ScreenState::Suspended,
            SweepMode::WakeOnly,
            &[(420, 5), (100, 5), (10, 5)],
        );
        assert!(results.iter().all(Option::is_none));
        assert!(detector.barriers().passed_first);
        assert!(!detector.barriers().passed_second);
    }

    #[test]
    fn skipping_the_middle_band_does_not_reach_final_zone() {
        let mut detector = SweepDetector::default();
        let results = feed(
            &mut detector,
            ScreenState::Suspended,
            SweepMode::WakeOnly,
            &[(10, 5), (420, 5), (430, 5)],
        );
        assert!(results.iter().all(Option::is_none));
    }

    #[test]
    fn sticky_barriers_survive_noisy_samples() {
        let mut detector = SweepDetector::default();
        let results = feed(
            &mut detector,
            ScreenState::Suspended,
            SweepMode::WakeOnly,
            &[(10, 5), (100, 5), (-20, 5), (90, 0), (300, 5), (420, 5)],
        );
        assert_eq!(results[5], Some(Direction::Wake));
    }

    #[test]
    fn disabled_mode_leaves_state_untouched() {
        let mut detector = SweepDetector::default();
        let results = feed(
            &mut detector,
            ScreenState::Suspended,
            SweepMode::Disabled,
            &[(10, 5), (100, 5), (420, 5)],
        );
        assert!(results.iter().all(Option::is_none));
        assert!(detector.barriers().is_reset());
    }

    #[test]
    fn right_to_left_sleeps_only_in_wake_and_sleep_mode() {
        let path = [(300, 900), (100, 900), (20, 900)];

        let mut wake_only = SweepDetector::default();
        let results = feed(&mut wake_only, ScreenState::Awake, SweepMode::WakeOnly, &path);
        assert!(results.iter().all(Option::is_none));

        let mut both = SweepDetector::default();
        let results = feed(&mut both, ScreenState::Awake, SweepMode::WakeAndSleep, &path);
        assert_eq!(results, vec![None, None, Some(Direction::Sleep)]);
    }

    #[test]
    fn sleep_corridor_requires_lower_panel_rows() {
        let mut detector = SweepDetector::default();
        let results = feed(
            &mut detector,
            ScreenState::Awake,
            SweepMode::WakeAndSleep,
            &[(300, 700), (100, 700), (20, 700)],
        );
        assert!(results.iter().all(Option::is_none));
        assert!(detector.barriers().is_reset());
    }

    #[test]
    fn wake_corridor_ignores_samples_without_y_activity() {
        let mut detector = SweepDetector::default();
        let results = feed(
            &mut detector,
            ScreenState::Suspended,
            SweepMode::WakeOnly,
            &[(10, 0), (100, -3), (420, 0)],
        );
        assert!(results.iter().all(Option::is_none));
        assert!(detector.barriers().is_reset());
    }
}
