//! Scripted ticks without sleeping.
//!
//! Drives the controller through a start plus N ticks against the null
//! style, then prints the final state snapshot as JSON. Useful for
//! scripting and for the E2E tests.

use std::error::Error;
use std::path::Path;

use dialcraft_core::{ConfigError, Controller, Mode, NullStyle, StyleRegistry};

pub fn run(mode: Mode, ticks: u64, config_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let config = super::load_config(config_path)?;
    if !config.functions.contains(&mode) {
        return Err(ConfigError::InvalidValue {
            key: "mode".into(),
            message: format!("mode '{mode}' is not in the configured function list"),
        }
        .into());
    }

    let mut registry: StyleRegistry<()> = StyleRegistry::new();
    registry.register(Box::new(NullStyle::new("null")))?;
    let mut controller = Controller::new(&config, registry)?;
    controller.init(&mut ());

    while controller.mode() != mode {
        controller.mode_up();
    }
    controller.start_pause();
    for _ in 0..ticks {
        controller.on_tick();
    }

    println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
    Ok(())
}
