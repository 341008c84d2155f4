//! Software-defined wake gestures for touch panels.
//!
//! Recognizes a directional sweep and a double-tap from raw `(x, y, t)`
//! samples, including while the display is suspended, and turns each
//! recognized gesture into a single simulated power-key press.

pub mod actuation;
pub mod config;
pub mod feed;
pub mod gesture;
pub mod persistence;
pub mod script;

pub use actuation::{ActuationError, ActuationGate, GateSettings, KeyEvent, KeySink, KeyState};
pub use config::{ConfigError, ConfigStore, GestureSettings};
pub use feed::{FeedHandle, TouchEvent};
pub use gesture::{
    Direction, DoubleTapMode, Gesture, GestureRecognizer, ScreenState, SweepMode, TouchSample,
};
