//! Time engine implementation.
//!
//! The engine is a tick-driven pair of counters plus a mode selector. It
//! schedules nothing itself - the caller invokes `step()` once per
//! elapsed second and reads back a [`DrawState`] whenever it wants to
//! render.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimeEngine::new(&EngineConfig::default())?;
//! engine.set_function(Mode::Pomodoro);
//! // In a loop:
//! let done = engine.step();
//! let draw = engine.draw_state();
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::draw::{format_hms, format_mmss, second_angle, DrawState};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Countdown from the configured duration to zero.
    Pomodoro,
    /// Unbounded count-up.
    Timer,
    /// Wall-clock display; no internal counter.
    Clock,
}

impl Mode {
    /// Human-facing title, used for window/terminal headings.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Pomodoro => "Pomodoro",
            Mode::Timer => "Timer",
            Mode::Clock => "Clock",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Pomodoro => "pomodoro",
            Mode::Timer => "timer",
            Mode::Clock => "clock",
        };
        f.write_str(name)
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pomodoro" => Ok(Mode::Pomodoro),
            "timer" => Ok(Mode::Timer),
            "clock" => Ok(Mode::Clock),
            other => Err(ConfigError::InvalidValue {
                key: "mode".into(),
                message: format!("unknown mode '{other}' (expected pomodoro, timer or clock)"),
            }),
        }
    }
}

/// Core time engine.
///
/// Exactly one counter is live at a time, selected by the mode; the
/// other is frozen and survives mode switches untouched. Only an
/// explicit reset changes a frozen counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEngine {
    mode: Mode,
    /// Seconds left in the countdown, in `[0, pomodoro_duration_sec]`.
    pomodoro_remaining_sec: u64,
    /// Seconds counted up so far. Unbounded; wraps visually (never
    /// numerically) for angle purposes.
    timer_elapsed_sec: u64,
    /// Immutable after construction.
    pomodoro_duration_sec: u64,
}

impl TimeEngine {
    /// Create an engine from a validated configuration.
    ///
    /// The initial mode is the first entry of `config.functions`.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            mode: config.functions[0],
            pomodoro_remaining_sec: config.pomodoro_duration_sec,
            timer_elapsed_sec: 0,
            pomodoro_duration_sec: config.pomodoro_duration_sec,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pomodoro_remaining_sec(&self) -> u64 {
        self.pomodoro_remaining_sec
    }

    pub fn timer_elapsed_sec(&self) -> u64 {
        self.timer_elapsed_sec
    }

    pub fn pomodoro_duration_sec(&self) -> u64 {
        self.pomodoro_duration_sec
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Select which counter subsequent `step`/`draw_state` calls act on.
    /// Never resets either counter.
    pub fn set_function(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Advance the active counter by one second of elapsed time.
    ///
    /// Returns `true` exactly when the pomodoro countdown reaches zero
    /// on this call; further steps while idle at zero return `false`, so
    /// completion fires once per cycle. Timer steps always return
    /// `false`; clock steps are a no-op (guards stray scheduling).
    pub fn step(&mut self) -> bool {
        match self.mode {
            Mode::Pomodoro => {
                if self.pomodoro_remaining_sec > 0 {
                    self.pomodoro_remaining_sec -= 1;
                    self.pomodoro_remaining_sec == 0
                } else {
                    false
                }
            }
            Mode::Timer => {
                self.timer_elapsed_sec = self.timer_elapsed_sec.saturating_add(1);
                false
            }
            Mode::Clock => false,
        }
    }

    /// Reset only the active mode's counter. Clock has no resettable
    /// state.
    pub fn reset_current(&mut self) {
        match self.mode {
            Mode::Pomodoro => self.pomodoro_remaining_sec = self.pomodoro_duration_sec,
            Mode::Timer => self.timer_elapsed_sec = 0,
            Mode::Clock => {}
        }
    }

    /// Reset both counters regardless of the active mode.
    pub fn reset_all(&mut self) {
        self.pomodoro_remaining_sec = self.pomodoro_duration_sec;
        self.timer_elapsed_sec = 0;
    }

    // ── Derivation ───────────────────────────────────────────────────

    /// Derive the current draw state. Pure: calling this any number of
    /// times without an intervening `step` yields identical results for
    /// pomodoro/timer (clock follows the wall clock).
    pub fn draw_state(&self) -> DrawState {
        self.draw_state_at(Local::now().time())
    }

    /// Like [`draw_state`](Self::draw_state) with an explicit wall-clock
    /// time, so clock-mode output is deterministic under test.
    pub fn draw_state_at(&self, now: NaiveTime) -> DrawState {
        match self.mode {
            Mode::Pomodoro => {
                let duration = self.pomodoro_duration_sec;
                let remaining = self.pomodoro_remaining_sec;
                // Minute hand sweeps the whole duration once; the second
                // hand is driven by elapsed (not remaining) time so it
                // never runs backward.
                let progress = if remaining == 0 {
                    1.0
                } else {
                    1.0 - remaining as f64 / duration as f64
                };
                let elapsed = duration - remaining;
                DrawState {
                    mode: self.mode,
                    minute_angle_deg: progress * 360.0,
                    second_angle_deg: second_angle(elapsed),
                    label_text: format_mmss(remaining as i64),
                }
            }
            Mode::Timer => {
                let elapsed = self.timer_elapsed_sec;
                // The minute hand re-traverses a full circle every
                // `pomodoro_duration_sec` seconds of count-up.
                let progress =
                    (elapsed % self.pomodoro_duration_sec) as f64 / self.pomodoro_duration_sec as f64;
                DrawState {
                    mode: self.mode,
                    minute_angle_deg: progress * 360.0,
                    second_angle_deg: second_angle(elapsed),
                    label_text: format_mmss(elapsed as i64),
                }
            }
            Mode::Clock => {
                let minutes = now.minute() as f64;
                let seconds = now.second() as f64;
                DrawState {
                    mode: self.mode,
                    minute_angle_deg: (minutes + seconds / 60.0) / 60.0 * 360.0,
                    second_angle_deg: seconds / 60.0 * 360.0,
                    label_text: format_hms(now),
                }
            }
        }
    }
}
