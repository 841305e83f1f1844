//! pingdeck - a GUI front-end for the system `ping` command
//!
//! pingdeck lets an operator assemble a ping command from structured
//! options, preview the exact command line, run it, and watch merged
//! stdout/stderr output arrive line by line without the surface ever
//! blocking on process I/O.
//!
//! ## Module Organization
//!
//! ### Core Functionality
//!
//! - [`command`] - Command construction: option set in, argument vector out
//! - [`exec`] - Execution sessions: spawn, stream, cancel, terminal states
//! - [`models`] - Data structures (ProbeOptions, LogLine)
//! - [`config`] - Configuration loading and validation
//! - [`mod@error`] - Error types and Result alias
//!
//! ### Surface
//!
//! - [`app`] - The eframe application and its state
//! - [`ui`] - Rendering components (editor view, output view)
//!
//! ## Architecture
//!
//! The surface runs on the single egui thread. Each probe run spawns one
//! worker task on the app-owned tokio runtime; the worker owns the child
//! process and its merged output stream exclusively and reports events
//! over a channel that the surface drains once per frame. Cancellation is
//! a polite terminate escalated to a force kill after a bounded grace
//! period.

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod exec;
pub mod models;
pub mod ui;

// Re-exports for core functionality
pub use app::PingdeckApp;
pub use command::{build, CommandSpec, PLACEHOLDER_TARGET};
pub use config::{Config, ConfigLoader};
pub use error::{Error, Result};
pub use exec::{ExecutionSession, SessionState, TerminationReason};
pub use models::{LogLine, ProbeOptions};

/// The current version of pingdeck from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Load configuration from the default locations, falling back to
/// built-in defaults if loading fails.
pub fn init() -> Config {
    use tracing::{info, warn};

    match ConfigLoader::load() {
        Ok(config) => {
            info!("configuration loaded");
            config
        }
        Err(e) => {
            warn!("failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    }
}
