//! Render loop and mode controller.
//!
//! The controller is a state machine over `RunState` (Idle/Running/
//! Paused) crossed with the configured mode list. It owns the engine,
//! the style registry, and the single armed-loop slot; it mutates the
//! engine, renderers only ever read derived draw states.
//!
//! ## Loop arming
//!
//! At most one repeating loop exists at any time. That invariant is not
//! a convention - it is the `armed: Option<LoopKind>` field. Arming the
//! clock loop on a mode switch structurally cancels the manual loop and
//! vice versa. Hosts tick the controller only while `is_armed()`.
//!
//! ```text
//! Idle -(start)-> Running -(pause)-> Paused -(resume)-> Running
//!   ^                |
//!   +-- reset -------+-- pomodoro countdown hits zero (auto)
//! ```
//!
//! Clock mode ignores `RunState` entirely: entering it disables the
//! manual controls and arms a redraw-only loop for as long as it is the
//! active mode.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::draw::DrawState;
use crate::error::ConfigError;
use crate::events::Event;
use crate::style::StyleRegistry;
use crate::timer::{proximity_warning, Mode, TimeEngine, Warning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Paused,
}

/// Which repeating loop is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    /// Pomodoro/timer loop: each tick steps the engine, then renders.
    Manual,
    /// Clock loop: each tick renders from wall-clock time only.
    Clock,
}

pub struct Controller<S> {
    engine: TimeEngine,
    styles: StyleRegistry<S>,
    functions: Vec<Mode>,
    mode_index: usize,
    run_state: RunState,
    armed: Option<LoopKind>,
    update_interval_ms: u64,
}

impl<S> Controller<S> {
    /// Build a controller over a validated config and a populated
    /// registry. Styles are not mounted yet; call [`init`](Self::init)
    /// once with the host surface.
    pub fn new(config: &EngineConfig, styles: StyleRegistry<S>) -> Result<Self, ConfigError> {
        let engine = TimeEngine::new(config)?;
        let mut controller = Self {
            engine,
            styles,
            functions: config.functions.clone(),
            mode_index: 0,
            run_state: RunState::Idle,
            armed: None,
            update_interval_ms: config.update_interval_ms,
        };
        if controller.mode() == Mode::Clock {
            controller.armed = Some(LoopKind::Clock);
        }
        Ok(controller)
    }

    /// Mount all styles into the surface, activate the first, and draw
    /// the initial frame.
    pub fn init(&mut self, surface: &mut S) {
        self.styles.mount_all(surface);
        self.styles.activate(0);
        self.render();
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.functions[self.mode_index]
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn armed_loop(&self) -> Option<LoopKind> {
        self.armed
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn tick_period_ms(&self) -> u64 {
        self.update_interval_ms
    }

    /// Start/pause/reset apply only to the manually driven modes.
    pub fn controls_enabled(&self) -> bool {
        self.mode() != Mode::Clock
    }

    /// Label for the single start/pause toggle button.
    pub fn start_pause_label(&self) -> &'static str {
        match self.run_state {
            RunState::Running => "Pause",
            RunState::Paused => "Resume",
            RunState::Idle => "Start",
        }
    }

    pub fn warning(&self) -> Warning {
        proximity_warning(self.mode(), self.engine.pomodoro_remaining_sec())
    }

    pub fn draw_state(&self) -> DrawState {
        self.engine.draw_state()
    }

    pub fn engine(&self) -> &TimeEngine {
        &self.engine
    }

    pub fn styles(&self) -> &StyleRegistry<S> {
        &self.styles
    }

    /// Full state snapshot for hosts that poll instead of consuming
    /// transition events.
    pub fn snapshot(&self) -> Event {
        let draw = self.engine.draw_state();
        Event::StateSnapshot {
            mode: self.mode(),
            run_state: self.run_state,
            label_text: draw.label_text,
            minute_angle_deg: draw.minute_angle_deg,
            second_angle_deg: draw.second_angle_deg,
            warning: self.warning(),
            style_id: self.styles.active_descriptor().map(|d| d.id.clone()),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// The single start/pause/resume toggle. No-op in clock mode, where
    /// the manual controls are disabled.
    pub fn start_pause(&mut self) -> Option<Event> {
        if !self.controls_enabled() {
            return None;
        }
        match self.run_state {
            RunState::Running => {
                self.run_state = RunState::Paused;
                self.armed = None;
                Some(Event::TimerPaused {
                    mode: self.mode(),
                    at: Utc::now(),
                })
            }
            RunState::Idle | RunState::Paused => {
                let resumed = self.run_state == RunState::Paused;
                self.run_state = RunState::Running;
                self.engine.set_function(self.mode());
                self.armed = Some(LoopKind::Manual);
                let at = Utc::now();
                if resumed {
                    Some(Event::TimerResumed {
                        mode: self.mode(),
                        at,
                    })
                } else {
                    Some(Event::TimerStarted {
                        mode: self.mode(),
                        at,
                    })
                }
            }
        }
    }

    /// Any state -> Idle: cancel the loop, reset the active counter,
    /// redraw. No-op in clock mode.
    pub fn reset(&mut self) -> Option<Event> {
        if !self.controls_enabled() {
            return None;
        }
        self.armed = None;
        self.run_state = RunState::Idle;
        self.engine.reset_current();
        self.render();
        Some(Event::TimerReset {
            mode: self.mode(),
            at: Utc::now(),
        })
    }

    pub fn mode_up(&mut self) -> Option<Event> {
        self.change_mode(1)
    }

    pub fn mode_down(&mut self) -> Option<Event> {
        self.change_mode(-1)
    }

    fn change_mode(&mut self, delta: isize) -> Option<Event> {
        // Stop any active loop before reconfiguring the engine.
        self.armed = None;
        self.run_state = RunState::Idle;
        let len = self.functions.len() as isize;
        self.mode_index = (self.mode_index as isize + delta).rem_euclid(len) as usize;
        let mode = self.mode();
        self.engine.set_function(mode);
        if mode == Mode::Clock {
            // Clock redraws continuously without user action.
            self.armed = Some(LoopKind::Clock);
        }
        self.render();
        debug!(%mode, "mode changed");
        Some(Event::ModeChanged {
            mode,
            at: Utc::now(),
        })
    }

    pub fn style_next(&mut self) -> Option<Event> {
        self.styles.next();
        self.after_style_change()
    }

    pub fn style_prev(&mut self) -> Option<Event> {
        self.styles.prev();
        self.after_style_change()
    }

    fn after_style_change(&mut self) -> Option<Event> {
        // Immediate redraw so the new renderer shows correct state
        // without waiting for the next tick.
        self.render();
        let descriptor = self.styles.active_descriptor()?;
        Some(Event::StyleChanged {
            style_id: descriptor.id.clone(),
            style_label: descriptor.label.clone(),
            at: Utc::now(),
        })
    }

    /// Called by the host once per `tick_period_ms` while a loop is
    /// armed. Ticks arriving after cancellation are ignored.
    pub fn on_tick(&mut self) -> Option<Event> {
        match self.armed {
            None => None,
            Some(LoopKind::Clock) => {
                self.render();
                None
            }
            Some(LoopKind::Manual) => {
                let done = self.engine.step();
                self.render();
                if done && self.mode() == Mode::Pomodoro {
                    // Auto-terminate: back to Idle without user action.
                    self.armed = None;
                    self.run_state = RunState::Idle;
                    return Some(Event::PomodoroCompleted {
                        duration_sec: self.engine.pomodoro_duration_sec(),
                        at: Utc::now(),
                    });
                }
                None
            }
        }
    }

    fn render(&mut self) {
        let draw = self.engine.draw_state();
        self.styles.update_active(&draw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::NullStyle;

    fn controller(duration_sec: u64) -> (Controller<()>, Vec<crate::style::NullStyleProbe>) {
        let mut registry = StyleRegistry::new();
        let mut probes = Vec::new();
        for id in ["no1", "no2"] {
            let (style, probe) = NullStyle::with_probe(id);
            registry.register(Box::new(style)).unwrap();
            probes.push(probe);
        }
        let config = EngineConfig {
            pomodoro_duration_sec: duration_sec,
            ..Default::default()
        };
        let mut controller = Controller::new(&config, registry).unwrap();
        controller.init(&mut ());
        (controller, probes)
    }

    #[test]
    fn init_renders_initial_frame_on_first_style() {
        let (controller, probes) = controller(1500);
        assert!(probes[0].borrow().active);
        assert!(!probes[1].borrow().active);
        assert_eq!(
            probes[0].borrow().last_draw.as_ref().unwrap().label_text,
            "25:00"
        );
        assert_eq!(controller.run_state(), RunState::Idle);
        assert!(!controller.is_armed());
    }

    #[test]
    fn start_pause_resume_cycle() {
        let (mut controller, _) = controller(1500);
        assert_eq!(controller.start_pause_label(), "Start");

        assert!(matches!(
            controller.start_pause(),
            Some(Event::TimerStarted { .. })
        ));
        assert_eq!(controller.run_state(), RunState::Running);
        assert_eq!(controller.armed_loop(), Some(LoopKind::Manual));
        assert_eq!(controller.start_pause_label(), "Pause");

        assert!(matches!(
            controller.start_pause(),
            Some(Event::TimerPaused { .. })
        ));
        assert_eq!(controller.run_state(), RunState::Paused);
        assert!(!controller.is_armed());
        assert_eq!(controller.start_pause_label(), "Resume");

        assert!(matches!(
            controller.start_pause(),
            Some(Event::TimerResumed { .. })
        ));
        assert_eq!(controller.run_state(), RunState::Running);
    }

    #[test]
    fn pause_preserves_counter_resume_continues() {
        let (mut controller, _) = controller(100);
        controller.start_pause();
        for _ in 0..10 {
            controller.on_tick();
        }
        controller.start_pause(); // pause
        assert_eq!(controller.engine().pomodoro_remaining_sec(), 90);
        controller.on_tick(); // stray tick while paused: ignored
        assert_eq!(controller.engine().pomodoro_remaining_sec(), 90);
        controller.start_pause(); // resume
        controller.on_tick();
        assert_eq!(controller.engine().pomodoro_remaining_sec(), 89);
    }

    #[test]
    fn pomodoro_auto_terminates_and_fires_once() {
        let (mut controller, probes) = controller(3);
        controller.start_pause();
        assert!(controller.on_tick().is_none());
        assert!(controller.on_tick().is_none());
        let event = controller.on_tick();
        assert!(matches!(event, Some(Event::PomodoroCompleted { .. })));
        assert_eq!(controller.run_state(), RunState::Idle);
        assert!(!controller.is_armed());
        assert_eq!(
            probes[0].borrow().last_draw.as_ref().unwrap().label_text,
            "00:00"
        );
        // Further ticks are ignored entirely.
        assert!(controller.on_tick().is_none());
    }

    #[test]
    fn reset_stops_loop_and_restores_duration() {
        let (mut controller, probes) = controller(100);
        controller.start_pause();
        for _ in 0..42 {
            controller.on_tick();
        }
        assert!(matches!(controller.reset(), Some(Event::TimerReset { .. })));
        assert_eq!(controller.run_state(), RunState::Idle);
        assert!(!controller.is_armed());
        assert_eq!(controller.engine().pomodoro_remaining_sec(), 100);
        assert_eq!(
            probes[0].borrow().last_draw.as_ref().unwrap().label_text,
            "01:40"
        );
    }

    #[test]
    fn mode_switch_stops_loop_and_preserves_counters() {
        let (mut controller, _) = controller(100);
        controller.start_pause();
        for _ in 0..7 {
            controller.on_tick();
        }
        let event = controller.mode_up();
        assert!(matches!(
            event,
            Some(Event::ModeChanged {
                mode: Mode::Timer,
                ..
            })
        ));
        assert!(!controller.is_armed());
        assert_eq!(controller.run_state(), RunState::Idle);
        // Round-trip: pomodoro progress survives the detour.
        controller.mode_down();
        assert_eq!(controller.mode(), Mode::Pomodoro);
        assert_eq!(controller.engine().pomodoro_remaining_sec(), 93);
    }

    #[test]
    fn mode_navigation_wraps_both_directions() {
        let (mut controller, _) = controller(100);
        assert_eq!(controller.mode(), Mode::Pomodoro);
        controller.mode_down();
        assert_eq!(controller.mode(), Mode::Clock);
        controller.mode_up();
        assert_eq!(controller.mode(), Mode::Pomodoro);
        controller.mode_up();
        assert_eq!(controller.mode(), Mode::Timer);
    }

    #[test]
    fn clock_mode_arms_redraw_loop_and_disables_controls() {
        let (mut controller, probes) = controller(100);
        controller.mode_down(); // wrap to clock
        assert_eq!(controller.mode(), Mode::Clock);
        assert_eq!(controller.armed_loop(), Some(LoopKind::Clock));
        assert!(!controller.controls_enabled());
        assert!(controller.start_pause().is_none());
        assert!(controller.reset().is_none());
        // Ticks redraw without stepping anything.
        let before = probes[0].borrow().update_count;
        controller.on_tick();
        assert_eq!(probes[0].borrow().update_count, before + 1);
        assert_eq!(controller.engine().timer_elapsed_sec(), 0);
        // Leaving clock disarms the loop.
        controller.mode_up();
        assert_eq!(controller.mode(), Mode::Pomodoro);
        assert!(!controller.is_armed());
        assert!(controller.controls_enabled());
    }

    #[test]
    fn style_switch_rerenders_immediately_and_keeps_run_state() {
        let (mut controller, probes) = controller(100);
        controller.start_pause();
        for _ in 0..5 {
            controller.on_tick();
        }
        let event = controller.style_next();
        assert!(matches!(
            event,
            Some(Event::StyleChanged { ref style_id, .. }) if style_id == "no2"
        ));
        assert_eq!(controller.run_state(), RunState::Running);
        assert!(controller.is_armed());
        assert!(probes[1].borrow().active);
        assert!(!probes[0].borrow().active);
        // The new renderer got a frame without waiting for the tick.
        assert_eq!(
            probes[1].borrow().last_draw.as_ref().unwrap().label_text,
            "01:35"
        );
        controller.style_prev();
        assert!(probes[0].borrow().active);
    }

    #[test]
    fn warning_follows_remaining_time() {
        let (mut controller, _) = controller(200);
        assert_eq!(controller.warning(), Warning::Hidden);
        controller.start_pause();
        for _ in 0..20 {
            controller.on_tick();
        }
        assert_eq!(controller.warning(), Warning::Warn); // 180 left
        for _ in 0..120 {
            controller.on_tick();
        }
        assert_eq!(controller.warning(), Warning::Critical); // 60 left
        for _ in 0..60 {
            controller.on_tick();
        }
        assert_eq!(controller.warning(), Warning::Hidden); // done
    }

    #[test]
    fn clock_first_config_arms_loop_at_construction() {
        let config = EngineConfig {
            functions: vec![Mode::Clock, Mode::Pomodoro],
            ..Default::default()
        };
        let registry: StyleRegistry<()> = StyleRegistry::new();
        let controller = Controller::new(&config, registry).unwrap();
        assert_eq!(controller.armed_loop(), Some(LoopKind::Clock));
    }

    #[test]
    fn snapshot_reports_current_state() {
        let (controller, _) = controller(1500);
        match controller.snapshot() {
            Event::StateSnapshot {
                mode,
                run_state,
                label_text,
                warning,
                style_id,
                ..
            } => {
                assert_eq!(mode, Mode::Pomodoro);
                assert_eq!(run_state, RunState::Idle);
                assert_eq!(label_text, "25:00");
                assert_eq!(warning, Warning::Hidden);
                assert_eq!(style_id.as_deref(), Some("no1"));
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
