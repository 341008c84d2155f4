//! Runtime gesture settings shared between the configuration surface and the
//! sample path.
//!
//! Values live in atomics so the recognizer can read them on every sample
//! without taking a lock. Writes arrive as text from the control surface
//! (`"2\n"`), or as a boot-time override string.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::{info, warn};

use crate::gesture::{DoubleTapMode, SweepMode};

/// Persistable snapshot of both settings
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureSettings {
    #[serde(default)]
    pub sweep_mode: SweepMode,
    #[serde(default)]
    pub doubletap_mode: DoubleTapMode,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {setting}")]
    InvalidConfig { setting: &'static str, value: String },
}

#[derive(Debug, Default)]
pub struct ConfigStore {
    sweep_mode: AtomicU8,
    doubletap_mode: AtomicU8,
}

impl ConfigStore {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            sweep_mode: AtomicU8::new(settings.sweep_mode.as_raw()),
            doubletap_mode: AtomicU8::new(settings.doubletap_mode.as_raw()),
        }
    }

    pub fn sweep_mode(&self) -> SweepMode {
        SweepMode::from_raw(self.sweep_mode.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub fn doubletap_mode(&self) -> DoubleTapMode {
        DoubleTapMode::from_raw(self.doubletap_mode.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub fn set_sweep_mode(&self, mode: SweepMode) {
        self.sweep_mode.store(mode.as_raw(), Ordering::Release);
    }

    pub fn set_doubletap_mode(&self, mode: DoubleTapMode) {
        self.doubletap_mode.store(mode.as_raw(), Ordering::Release);
    }

    pub fn snapshot(&self) -> GestureSettings {
        GestureSettings {
            sweep_mode: self.sweep_mode(),
            doubletap_mode: self.doubletap_mode(),
        }
    }

    pub fn apply(&self, settings: GestureSettings) {
        self.set_sweep_mode(settings.sweep_mode);
        self.set_doubletap_mode(settings.doubletap_mode);
    }

    /// Read side of the `sweep2wake` control
    pub fn show_sweep_mode(&self) -> String {
        format!("{}\n", self.sweep_mode().as_raw())
    }

    /// Read side of the `doubletap2wake` control
    pub fn show_doubletap_mode(&self) -> String {
        format!("{}\n", self.doubletap_mode().as_raw())
    }

    /// Write side of the `sweep2wake` control; invalid input leaves the value unchanged
    pub fn write_sweep_mode(&self, input: &str) -> Result<SweepMode, ConfigError> {
        let mode = parse_raw(input)
            .and_then(SweepMode::from_raw)
            .ok_or_else(|| invalid("sweep2wake", input))?;
        self.set_sweep_mode(mode);
        info!("sweep2wake set to {:?}", mode);
        Ok(mode)
    }

    /// Write side of the `doubletap2wake` control; invalid input leaves the value unchanged
    pub fn write_doubletap_mode(&self, input: &str) -> Result<DoubleTapMode, ConfigError> {
        let mode = parse_raw(input)
            .and_then(DoubleTapMode::from_raw)
            .ok_or_else(|| invalid("doubletap2wake", input))?;
        self.set_doubletap_mode(mode);
        info!("doubletap2wake set to {:?}", mode);
        Ok(mode)
    }

    /// Applies the startup `s2w=` string. Unrecognized values disable the sweep.
    pub fn apply_boot_override(&self, value: &str) -> SweepMode {
        let mode = match value {
            "2" => SweepMode::WakeAndSleep,
            "1" => SweepMode::WakeOnly,
            "0" => SweepMode::Disabled,
            other => {
                info!(
                    "[cmdline_s2w]: No valid input found. Sweep2Wake disabled. | s2w='{}'",
                    other
                );
                SweepMode::Disabled
            }
        };
        self.set_sweep_mode(mode);
        info!("[cmdline_s2w]: sweep mode {:?} | s2w='{}'", mode, value);
        mode
    }
}

fn parse_raw(input: &str) -> Option<u8> {
    input.trim().parse::<u8>().ok()
}

fn invalid(setting: &'static str, input: &str) -> ConfigError {
    let error = ConfigError::InvalidConfig {
        setting,
        value: input.to_string(),
    };
    warn!("{}: unknown input!", error);
    error
}
