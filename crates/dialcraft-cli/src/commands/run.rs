//! Interactive terminal session.
//!
//! The composition root: builds the config, the style set and the
//! controller, then multiplexes a fixed-period ticker with line-based
//! stdin commands on a single-threaded runtime. The ticker only fires
//! into the controller while a loop is armed, so cancellation is
//! immediate - a cleared loop slot means no further steps.

use std::error::Error;
use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

use dialcraft_core::{Controller, Event};

use crate::styles::TermSurface;

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session(config_path))
}

async fn session(config_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let config = super::load_config(config_path)?;
    let registry = super::build_registry()?;
    let mut controller = Controller::new(&config, registry)?;
    let mut surface = TermSurface { color: true };
    controller.init(&mut surface);

    println!(
        "{}  |  s {}  r reset  m/M mode  n/p style  q quit",
        title(&controller),
        controller.start_pause_label().to_lowercase(),
    );

    let mut ticker = interval(Duration::from_millis(controller.tick_period_ms()));
    // A late tick shows as one second of display lag; it must not burst.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = ticker.tick(), if controller.is_armed() => {
                if let Some(Event::PomodoroCompleted { .. }) = controller.on_tick() {
                    println!("pomodoro complete");
                }
                // Shared label for styles that don't draw it themselves.
                let wants_shared_label = controller
                    .styles()
                    .active_descriptor()
                    .is_some_and(|d| !d.show_label_inside_dial);
                if wants_shared_label {
                    println!("  {}", controller.draw_state().label_text);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "q" => break,
                    "" => {}
                    command => {
                        if let Some(event) = dispatch(&mut controller, command) {
                            debug!(?event, "control event");
                            announce(&controller, &event);
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn dispatch(controller: &mut Controller<TermSurface>, command: &str) -> Option<Event> {
    match command {
        "s" => controller.start_pause(),
        "r" => controller.reset(),
        "m" => controller.mode_up(),
        "M" => controller.mode_down(),
        "n" => controller.style_next(),
        "p" => controller.style_prev(),
        other => {
            eprintln!("unknown command: {other}");
            None
        }
    }
}

fn title(controller: &Controller<TermSurface>) -> String {
    let style = controller
        .styles()
        .active_descriptor()
        .map(|d| d.label.as_str())
        .unwrap_or("-");
    format!("{} {}", controller.mode().label(), style)
}

fn announce(controller: &Controller<TermSurface>, event: &Event) {
    match event {
        Event::ModeChanged { .. } | Event::StyleChanged { .. } => {
            if controller.controls_enabled() {
                println!("{}  [{}]", title(controller), controller.start_pause_label());
            } else {
                println!("{}", title(controller));
            }
        }
        Event::TimerStarted { .. } | Event::TimerResumed { .. } | Event::TimerPaused { .. } => {
            println!("[{}]", controller.start_pause_label());
        }
        Event::TimerReset { .. } => println!("[reset]"),
        _ => {}
    }
}
