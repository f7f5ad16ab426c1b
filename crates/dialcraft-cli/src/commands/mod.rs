pub mod config;
pub mod run;
pub mod simulate;
pub mod styles;

use std::path::{Path, PathBuf};

use dialcraft_core::{EngineConfig, StyleError, StyleRegistry};

use crate::styles::{DialStyle, DigitalStyle, TermSurface};

/// Default config location: `~/.config/dialcraft/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dialcraft").join("config.toml"))
}

/// Resolve the effective configuration. An explicit `--config` path must
/// exist and parse; the default path is used only when present.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        let text = std::fs::read_to_string(path)?;
        return Ok(EngineConfig::from_toml_str(&text)?);
    }
    if let Some(path) = default_config_path() {
        if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            return Ok(EngineConfig::from_toml_str(&text)?);
        }
    }
    Ok(EngineConfig::default())
}

/// The terminal style set, in navigation order.
pub fn build_registry() -> Result<StyleRegistry<TermSurface>, StyleError> {
    let mut registry = StyleRegistry::new();
    registry.register(Box::new(DigitalStyle::new()))?;
    registry.register(Box::new(DialStyle::new()))?;
    Ok(registry)
}
