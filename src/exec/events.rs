//! Session Events and Terminal States
//!
//! Everything the worker task reports back to the surface: output lines,
//! the start announcement, and the single terminal transition.

use crate::models::LogLine;

/// Lifecycle state of one execution session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Child process started, output being consumed
    Running,
    /// Process ended: normal exit (any code) or user cancellation
    Completed,
    /// Process could not be started, or its output stream failed
    Failed,
}

/// Why a session reached its terminal state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The process exited on its own
    Exited { code: Option<i32> },
    /// The user cancelled the run
    Stopped,
    /// Spawn or stream failure
    Failed { reason: String },
}

impl TerminationReason {
    /// The terminal state this reason maps to
    pub fn state(&self) -> SessionState {
        match self {
            TerminationReason::Exited { .. } | TerminationReason::Stopped => {
                SessionState::Completed
            }
            TerminationReason::Failed { .. } => SessionState::Failed,
        }
    }

    /// Human-readable description for the closing log line
    pub fn describe(&self) -> String {
        match self {
            TerminationReason::Exited { code: Some(code) } => {
                format!("exited with code {}", code)
            }
            TerminationReason::Exited { code: None } => "terminated by signal".to_string(),
            TerminationReason::Stopped => "stopped by user".to_string(),
            TerminationReason::Failed { reason } => reason.clone(),
        }
    }
}

/// Event emitted by a session worker, in child emission order
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Child process spawned; streaming begins
    Started { command: String, pid: Option<u32> },
    /// One completed output line
    Line(LogLine),
    /// Terminal transition; no further events follow
    Exited { reason: TerminationReason },
}
