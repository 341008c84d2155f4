//! Gesture recognition subsystem
//!
//! Turns a stream of raw touch samples into at most one semantic event per
//! physical gesture:
//!
//! 1. [`sweep`] - Two-barrier directional sweep (wake left→right, sleep right→left)
//! 2. [`doubletap`] - Double-tap windowing with an episode timer
//! 3. [`recognizer`] - Composition root that feeds both detectors and drives the gate
//!
//! # Architecture
//!
//! ```text
//! TouchSample ──► GestureRecognizer ──┬─► SweepDetector ─────┐
//!                                     └─► DoubleTapDetector ─┴─► ActuationGate
//! ```
//!
//! Detectors are plain owned state machines. They never block and never
//! allocate per sample, so they are safe to drive from a latency-bound
//! delivery path.

pub mod doubletap;
pub mod recognizer;
pub mod sweep;

use serde::{Deserialize, Serialize};

pub use doubletap::{DoubleTapDetector, TapVerdict};
pub use recognizer::GestureRecognizer;
pub use sweep::{BarrierState, SweepDetector, SweepGeometry};

/// Logical display state, supplied by the platform with every sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenState {
    #[default]
    Awake,
    Suspended,
}

/// Sweep gesture mode as exposed by the configuration surface (0, 1, 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    #[default]
    Disabled,
    WakeOnly,
    WakeAndSleep,
}

impl SweepMode {
    pub fn as_raw(self) -> u8 {
        match self {
            SweepMode::Disabled => 0,
            SweepMode::WakeOnly => 1,
            SweepMode::WakeAndSleep => 2,
        }
    }

    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(SweepMode::Disabled),
            1 => Some(SweepMode::WakeOnly),
            2 => Some(SweepMode::WakeAndSleep),
            _ => None,
        }
    }
}

/// Double-tap mode as exposed by the configuration surface (0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleTapMode {
    #[default]
    Disabled,
    Enabled,
}

impl DoubleTapMode {
    pub fn as_raw(self) -> u8 {
        match self {
            DoubleTapMode::Disabled => 0,
            DoubleTapMode::Enabled => 1,
        }
    }

    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(DoubleTapMode::Disabled),
            1 => Some(DoubleTapMode::Enabled),
            _ => None,
        }
    }
}

/// Direction of a completed sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right while suspended
    Wake,
    /// Right to left while awake
    Sleep,
}

/// Gesture reported by the recognizer for a single sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Sweep(Direction),
    DoubleTap,
}

/// One raw touch sample in panel coordinates and monotonic ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchSample {
    pub x: i32,
    pub y: i32,
    pub timestamp: u64,
}

impl TouchSample {
    pub fn new(x: i32, y: i32, timestamp: u64) -> Self {
        Self { x, y, timestamp }
    }
}
