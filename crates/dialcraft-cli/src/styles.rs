//! Terminal style renderers.
//!
//! These are the presentation collaborators the core treats as opaque:
//! each mounts into a shared [`TermSurface`] and redraws one line per
//! tick. They exist so the shell exercises the real style protocol, not
//! a mock of it.

use std::io::{self, Write};

use chrono::{Local, Timelike};
use dialcraft_core::{DrawState, Mode, StyleDescriptor, StyleError, StylePlugin};

/// Shared mount point for the terminal styles.
pub struct TermSurface {
    /// Emit ANSI escape codes.
    pub color: bool,
}

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Clamp arbitrary label text to digits and colons, left-padding short
/// or malformed segments with `'0'` instead of failing.
fn pad_label(text: &str, width: usize) -> String {
    let clean: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .collect();
    if clean.len() >= width {
        clean
    } else {
        format!("{clean:0>width$}")
    }
}

fn label_width(mode: Mode) -> usize {
    match mode {
        Mode::Clock => 8,
        Mode::Pomodoro | Mode::Timer => 5,
    }
}

// ── Digital ──────────────────────────────────────────────────────────

/// Single-line digital readout with a blinking separator.
pub struct DigitalStyle {
    descriptor: StyleDescriptor,
    mounted: bool,
    active: bool,
    color: bool,
    last_line: Option<String>,
}

impl DigitalStyle {
    pub fn new() -> Self {
        Self {
            descriptor: StyleDescriptor::new("digital", "Digital").with_label_inside_dial(),
            mounted: false,
            active: false,
            color: false,
            last_line: None,
        }
    }
}

impl Default for DigitalStyle {
    fn default() -> Self {
        Self::new()
    }
}

/// Blinking is cosmetic and wall-clock driven: separators vanish on odd
/// seconds.
fn digital_line(draw: &DrawState, blink_on: bool) -> String {
    let mut label = pad_label(&draw.label_text, label_width(draw.mode));
    if blink_on {
        label = label.replace(':', " ");
    }
    format!("{:<8} {label}", draw.mode.label())
}

impl StylePlugin<TermSurface> for DigitalStyle {
    fn descriptor(&self) -> &StyleDescriptor {
        &self.descriptor
    }

    fn create(&mut self, surface: &mut TermSurface) -> Result<(), StyleError> {
        self.color = surface.color;
        self.mounted = true;
        Ok(())
    }

    fn set_active(&mut self, active: bool) -> Result<(), StyleError> {
        self.active = active;
        // The terminal scrolls, so "resume showing the last rendered
        // values" means re-printing the line drawn before deactivation.
        if active && self.mounted {
            if let Some(line) = &self.last_line {
                writeln!(io::stdout(), "{line}")
                    .map_err(|e| StyleError::renderer(&self.descriptor.id, e))?;
            }
        }
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.active = visible;
    }

    fn update(&mut self, draw: &DrawState) -> Result<(), StyleError> {
        if !self.mounted {
            return Ok(());
        }
        let blink_on = Local::now().second() % 2 == 1;
        let line = digital_line(draw, blink_on);
        let out = if self.color {
            format!("{BOLD}{line}{RESET}")
        } else {
            line
        };
        self.last_line = Some(out.clone());
        if self.active {
            writeln!(io::stdout(), "{out}")
                .map_err(|e| StyleError::renderer(&self.descriptor.id, e))?;
        }
        Ok(())
    }
}

// ── Dial ─────────────────────────────────────────────────────────────

/// One-line analog dial: twelve ring slots with `M`/`S` hand markers.
pub struct DialStyle {
    descriptor: StyleDescriptor,
    mounted: bool,
    active: bool,
    last_line: Option<String>,
}

impl DialStyle {
    pub fn new() -> Self {
        Self {
            descriptor: StyleDescriptor::new("dial", "Analog Dial"),
            mounted: false,
            active: false,
            last_line: None,
        }
    }
}

impl Default for DialStyle {
    fn default() -> Self {
        Self::new()
    }
}

/// Nearest of the twelve ring positions for a hand angle in degrees.
fn hand_slot(angle_deg: f64) -> usize {
    ((angle_deg / 30.0).round() as usize) % 12
}

/// The dial leaves the time label to the host (`show_label_inside_dial`
/// is false); it renders the ring only.
fn dial_line(draw: &DrawState) -> String {
    let mut ring = ['\u{00b7}'; 12];
    ring[hand_slot(draw.second_angle_deg)] = 'S';
    // Minute hand wins a shared slot; it is the one that carries the
    // progress information.
    ring[hand_slot(draw.minute_angle_deg)] = 'M';
    let ring: String = ring
        .iter()
        .flat_map(|c| [*c, ' '])
        .collect::<String>()
        .trim_end()
        .to_string();
    format!("({ring})")
}

impl StylePlugin<TermSurface> for DialStyle {
    fn descriptor(&self) -> &StyleDescriptor {
        &self.descriptor
    }

    fn create(&mut self, _surface: &mut TermSurface) -> Result<(), StyleError> {
        self.mounted = true;
        Ok(())
    }

    fn set_active(&mut self, active: bool) -> Result<(), StyleError> {
        self.active = active;
        if active && self.mounted {
            if let Some(line) = &self.last_line {
                writeln!(io::stdout(), "{line}")
                    .map_err(|e| StyleError::renderer(&self.descriptor.id, e))?;
            }
        }
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.active = visible;
    }

    fn update(&mut self, draw: &DrawState) -> Result<(), StyleError> {
        if !self.mounted {
            return Ok(());
        }
        let line = dial_line(draw);
        self.last_line = Some(line.clone());
        if self.active {
            writeln!(io::stdout(), "{line}")
                .map_err(|e| StyleError::renderer(&self.descriptor.id, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(mode: Mode, minute: f64, second: f64, label: &str) -> DrawState {
        DrawState {
            mode,
            minute_angle_deg: minute,
            second_angle_deg: second,
            label_text: label.into(),
        }
    }

    #[test]
    fn pad_label_fills_missing_segments_with_zeros() {
        assert_eq!(pad_label("02:05", 5), "02:05");
        assert_eq!(pad_label("2:05", 5), "02:05");
        assert_eq!(pad_label("", 5), "00000");
        assert_eq!(pad_label("ab:cd", 5), "0000:");
    }

    #[test]
    fn pad_label_keeps_overlong_timer_minutes() {
        assert_eq!(pad_label("100:00", 5), "100:00");
    }

    #[test]
    fn digital_line_blinks_separator_only() {
        let d = draw(Mode::Pomodoro, 0.0, 0.0, "25:00");
        assert_eq!(digital_line(&d, false), "Pomodoro 25:00");
        assert_eq!(digital_line(&d, true), "Pomodoro 25 00");
    }

    #[test]
    fn digital_line_uses_clock_width() {
        let d = draw(Mode::Clock, 0.0, 0.0, "09:03:07");
        assert_eq!(digital_line(&d, false), "Clock    09:03:07");
    }

    #[test]
    fn hand_slot_maps_quarters() {
        assert_eq!(hand_slot(0.0), 0);
        assert_eq!(hand_slot(90.0), 3);
        assert_eq!(hand_slot(180.0), 6);
        assert_eq!(hand_slot(270.0), 9);
        assert_eq!(hand_slot(360.0), 0);
    }

    #[test]
    fn dial_line_places_both_hands() {
        let d = draw(Mode::Timer, 30.0, 90.0, "02:05");
        let line = dial_line(&d);
        assert!(line.starts_with('(') && line.ends_with(')'));
        // No label in the ring line; the host draws the shared label.
        assert!(!line.contains("02:05"));
        let ring: Vec<char> = line.chars().filter(|c| !matches!(c, ' ' | '(')).collect();
        assert_eq!(ring[1], 'M');
        assert_eq!(ring[3], 'S');
    }

    #[test]
    fn minute_hand_wins_shared_slot() {
        let d = draw(Mode::Timer, 90.0, 90.0, "00:15");
        let line = dial_line(&d);
        assert!(line.contains('M'));
        assert!(!line.contains('S'));
    }

    #[test]
    fn update_before_create_is_a_no_op() {
        let mut style = DialStyle::new();
        style
            .update(&draw(Mode::Timer, 0.0, 0.0, "00:00"))
            .unwrap();
        assert!(style.last_line.is_none());
    }
}
