//! Data models for pingdeck
//!
//! Contains the core data structures: the editable probe option set
//! and the log line entity produced by a running probe session.

pub mod log_line;
pub mod options;

pub use log_line::{LineKind, LogLine};
pub use options::{FlagOption, OptionSection, ProbeOptions, ValueOption};
