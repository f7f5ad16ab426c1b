//! Engine configuration.
//!
//! The config is supplied once at construction; the core never reads the
//! filesystem itself. Hosts that persist settings serialize this struct
//! to TOML (see `from_toml_str` / `to_toml_string`).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::timer::Mode;

/// Configuration for the time engine and controller.
///
/// Invalid values are rejected by [`EngineConfig::validate`] rather than
/// silently clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How often the active loop ticks, in milliseconds.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,
    /// Base pomodoro length in seconds.
    #[serde(default = "default_pomodoro_duration_sec")]
    pub pomodoro_duration_sec: u64,
    /// Mode navigation order. Must be non-empty with unique entries.
    #[serde(default = "default_functions")]
    pub functions: Vec<Mode>,
}

fn default_update_interval_ms() -> u64 {
    1000
}

fn default_pomodoro_duration_sec() -> u64 {
    25 * 60
}

fn default_functions() -> Vec<Mode> {
    vec![Mode::Pomodoro, Mode::Timer, Mode::Clock]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
            pomodoro_duration_sec: default_pomodoro_duration_sec(),
            functions: default_functions(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "update_interval_ms".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.pomodoro_duration_sec == 0 {
            return Err(ConfigError::InvalidValue {
                key: "pomodoro_duration_sec".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.functions.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "functions".into(),
                message: "at least one mode is required".into(),
            });
        }
        for (i, mode) in self.functions.iter().enumerate() {
            if self.functions[..i].contains(mode) {
                return Err(ConfigError::InvalidValue {
                    key: "functions".into(),
                    message: format!("mode '{mode}' listed more than once"),
                });
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing fields take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(s).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }
}
