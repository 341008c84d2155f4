//! Line-oriented control script used by the `touchwake` host binary
//!
//! ```text
//! 10 5 0              touch sample: x y timestamp
//! lift                liftoff
//! screen off          screen suspended (on = awake)
//! sweep2wake 2        configuration write
//! doubletap2wake 1
//! show                print both settings
//! save                persist settings
//! ```

use crate::feed::TouchEvent;
use crate::gesture::{ScreenState, TouchSample};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Touch(TouchEvent),
    Screen(ScreenState),
    WriteSweep(String),
    WriteDoubleTap(String),
    Show,
    Save,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Unrecognized command: {0}")]
    UnknownCommand(String),

    #[error("Malformed sample: {0}")]
    MalformedSample(String),
}

/// Parses one script line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    let command = match (head, rest.as_slice()) {
        ("lift", []) => Command::Touch(TouchEvent::Liftoff),
        ("screen", ["on"]) => Command::Screen(ScreenState::Awake),
        ("screen", ["off"]) => Command::Screen(ScreenState::Suspended),
        ("sweep2wake", [value]) => Command::WriteSweep(value.to_string()),
        ("doubletap2wake", [value]) => Command::WriteDoubleTap(value.to_string()),
        ("show", []) => Command::Show,
        ("save", []) => Command::Save,
        (x, [y, t]) if looks_numeric(x) => Command::Touch(TouchEvent::Sample(parse_sample(x, y, t, line)?)),
        _ => return Err(ScriptError::UnknownCommand(line.to_string())),
    };
    Ok(Some(command))
}

fn looks_numeric(token: &str) -> bool {
    token
        .strip_prefix('-')
        .unwrap_or(token)
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}

fn parse_sample(x: &str, y: &str, t: &str, line: &str) -> Result<TouchSample, ScriptError> {
    let malformed = || ScriptError::MalformedSample(line.to_string());
    Ok(TouchSample::new(
        x.parse().map_err(|_| malformed())?,
        y.parse().map_err(|_| malformed())?,
        t.parse().map_err(|_| malformed())?,
    ))
}
