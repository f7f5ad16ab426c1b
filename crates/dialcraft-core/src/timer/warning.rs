//! Pomodoro proximity warning.
//!
//! A display-only projection of the remaining countdown: the final three
//! minutes warn, the final minute is critical, and the signal hides once
//! the countdown reaches zero. The thresholds are pinned behavioral
//! contracts, recomputed on every render.

use serde::{Deserialize, Serialize};

use super::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Warning {
    Hidden,
    /// Yellow: three minutes or less remain.
    Warn,
    /// Red: one minute or less remains.
    Critical,
}

/// Map remaining pomodoro seconds to a warning level.
///
/// Always `Hidden` outside pomodoro mode and at zero remaining.
pub fn proximity_warning(mode: Mode, remaining_sec: u64) -> Warning {
    if mode != Mode::Pomodoro || remaining_sec == 0 {
        return Warning::Hidden;
    }
    if remaining_sec <= 60 {
        Warning::Critical
    } else if remaining_sec <= 180 {
        Warning::Warn
    } else {
        Warning::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundaries() {
        assert_eq!(proximity_warning(Mode::Pomodoro, 0), Warning::Hidden);
        assert_eq!(proximity_warning(Mode::Pomodoro, 1), Warning::Critical);
        assert_eq!(proximity_warning(Mode::Pomodoro, 60), Warning::Critical);
        assert_eq!(proximity_warning(Mode::Pomodoro, 61), Warning::Warn);
        assert_eq!(proximity_warning(Mode::Pomodoro, 180), Warning::Warn);
        assert_eq!(proximity_warning(Mode::Pomodoro, 181), Warning::Hidden);
        assert_eq!(proximity_warning(Mode::Pomodoro, 200), Warning::Hidden);
    }

    #[test]
    fn hidden_outside_pomodoro() {
        assert_eq!(proximity_warning(Mode::Timer, 30), Warning::Hidden);
        assert_eq!(proximity_warning(Mode::Clock, 30), Warning::Hidden);
    }
}
