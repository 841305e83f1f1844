//! Configuration File Loading
//!
//! Finds and loads the configuration file from the usual locations,
//! falling back to built-in defaults when none exists.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::Config;
use crate::error::{Error, Result};

/// Configuration file loader
pub struct ConfigLoader {
    /// Search paths, in priority order
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader with the default search paths
    pub fn new() -> Self {
        Self {
            search_paths: Self::search_paths(),
        }
    }

    /// Load configuration from the first existing search path,
    /// or defaults when no file is found
    pub fn load() -> Result<Config> {
        let loader = Self::new();
        for path in &loader.search_paths {
            if path.is_file() {
                info!("loading configuration from {}", path.display());
                return Self::load_from_file(path);
            }
        }
        debug!("no configuration file found, using defaults");
        Ok(Config::default())
    }

    /// Load and validate configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Candidate config file locations, in priority order:
    /// `$PINGDECK_CONFIG`, the platform config dir, `~/.pingdeck/config.toml`
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(path) = env::var("PINGDECK_CONFIG") {
            paths.push(PathBuf::from(path));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("pingdeck").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".pingdeck").join("config.toml"));
        }

        paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
