use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::controller::RunState;
use crate::timer::{Mode, Warning};

/// Every controller transition produces an Event.
/// Hosts poll, log, or forward them; the core never acts on them itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        at: DateTime<Utc>,
    },
    TimerResumed {
        mode: Mode,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        at: DateTime<Utc>,
    },
    /// The pomodoro countdown hit zero; the loop has been stopped.
    PomodoroCompleted {
        duration_sec: u64,
        at: DateTime<Utc>,
    },
    ModeChanged {
        mode: Mode,
        at: DateTime<Utc>,
    },
    StyleChanged {
        style_id: String,
        style_label: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        run_state: RunState,
        label_text: String,
        minute_angle_deg: f64,
        second_angle_deg: f64,
        warning: Warning,
        style_id: Option<String>,
        at: DateTime<Utc>,
    },
}
