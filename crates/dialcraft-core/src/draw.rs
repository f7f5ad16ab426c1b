//! The draw-state contract between the time engine and style renderers.
//!
//! A [`DrawState`] is a pure projection of the engine (plus wall-clock
//! time in clock mode): two hand angles and a formatted label, nothing
//! else. Renderers consume it uniformly and carry no engine knowledge.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Renderer-agnostic snapshot of angles and label text for one instant.
///
/// Angles are degrees, clockwise from 12 o'clock. The minute angle lands
/// exactly on 360.0 when a pomodoro completes; renderers treat that as a
/// full sweep (visually identical to 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawState {
    pub mode: Mode,
    pub minute_angle_deg: f64,
    pub second_angle_deg: f64,
    pub label_text: String,
}

/// Zero-padded `MM:SS`. Negative input clamps to `"00:00"`; minutes grow
/// past two digits for long-running count-ups.
pub fn format_mmss(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Zero-padded 24-hour `HH:MM:SS`.
pub fn format_hms(time: NaiveTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// Angle of a second hand driven by elapsed seconds: one full sweep per
/// minute, always clockwise.
pub(crate) fn second_angle(elapsed_sec: u64) -> f64 {
    (elapsed_sec % 60) as f64 / 60.0 * 360.0
}
