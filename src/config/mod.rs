//! Configuration for pingdeck
//!
//! TOML-backed configuration with defaults for every field, so a partial
//! (or absent) config file always yields a usable configuration.

pub mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Probe execution settings
    pub probe: ProbeConfig,
    /// Surface settings
    pub ui: UiConfig,
}

/// Probe execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Program token placed first in every built command
    pub program: String,
    /// Grace period between the polite terminate request and the force kill
    pub cancel_grace_ms: u64,
    /// Retained output cap per session; older lines are dropped first
    pub max_log_lines: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            program: "ping".to_string(),
            cancel_grace_ms: 3000,
            max_log_lines: 10_000,
        }
    }
}

/// Surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Color theme: "dark" or "light"
    pub theme: String,
    /// Base font size in points
    pub font_size: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            font_size: 14.0,
        }
    }
}

impl Config {
    /// Validate loaded values, rejecting settings the engine cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.probe.program.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "probe.program".to_string(),
                reason: "program must not be empty".to_string(),
            });
        }
        if !(100..=60_000).contains(&self.probe.cancel_grace_ms) {
            return Err(Error::ConfigValidationFailed {
                field: "probe.cancel_grace_ms".to_string(),
                reason: "grace period must be between 100 and 60000 ms".to_string(),
            });
        }
        if self.probe.max_log_lines < 100 {
            return Err(Error::ConfigValidationFailed {
                field: "probe.max_log_lines".to_string(),
                reason: "retained log must hold at least 100 lines".to_string(),
            });
        }
        if !matches!(self.ui.theme.as_str(), "dark" | "light") {
            return Err(Error::ConfigValidationFailed {
                field: "ui.theme".to_string(),
                reason: format!("unknown theme '{}'", self.ui.theme),
            });
        }
        if !(6.0..=72.0).contains(&self.ui.font_size) {
            return Err(Error::ConfigValidationFailed {
                field: "ui.font_size".to_string(),
                reason: "font size must be between 6 and 72".to_string(),
            });
        }
        Ok(())
    }
}
