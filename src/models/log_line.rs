//! Log Line Model
//!
//! Represents a single line delivered to the output view: either a line of
//! child-process output, a notice produced by the surface itself, or an
//! error report. Raw text is kept as received; the view renders the
//! sanitized form with escape and control sequences stripped.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// CSI sequences, two-byte escapes, and C0 controls other than tab.
static CONTROL_SEQUENCES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b[@-_]|[\x00-\x08\x0b-\x1f\x7f]")
        .expect("control sequence pattern")
});

/// What produced a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LineKind {
    /// A line of child-process output
    #[default]
    Output,
    /// A line produced by the surface (run announcement, termination marker)
    Notice,
    /// An error report (spawn failure, stream failure)
    Error,
}

/// A single line shown in the output view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLine {
    /// The text content as received
    pub text: String,

    /// What produced this line
    pub kind: LineKind,

    /// Position in the session output; assigned when buffered
    pub line_number: usize,

    /// When this line was received
    pub timestamp: DateTime<Utc>,
}

impl LogLine {
    pub fn new(text: String, kind: LineKind) -> Self {
        Self {
            text,
            kind,
            line_number: 0,
            timestamp: Utc::now(),
        }
    }

    /// A line of child-process output
    pub fn output(text: String) -> Self {
        Self::new(text, LineKind::Output)
    }

    /// A surface-produced notice line
    pub fn notice(text: impl Into<String>) -> Self {
        Self::new(text.into(), LineKind::Notice)
    }

    /// An error report line
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text.into(), LineKind::Error)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, LineKind::Error)
    }

    /// Text with ANSI escape sequences and control characters stripped
    pub fn sanitized(&self) -> String {
        CONTROL_SEQUENCES.replace_all(&self.text, "").into_owned()
    }
}

impl From<String> for LogLine {
    fn from(text: String) -> Self {
        Self::output(text)
    }
}

impl From<&str> for LogLine {
    fn from(text: &str) -> Self {
        Self::output(text.to_string())
    }
}
