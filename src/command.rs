//! Probe command construction
//!
//! Turns the editable option set into an argument vector and its preview
//! string. Emission order is fixed: program token, enabled boolean flags in
//! declaration order, non-empty value options in declaration order as
//! `[flag, value]` pairs, target token last. Tokens are passed to the child
//! as an argv, never joined into a shell string, so values containing
//! spaces or metacharacters stay single arguments.

use serde::{Deserialize, Serialize};

use crate::models::ProbeOptions;

/// Preview stand-in shown while no target has been entered.
/// Never accepted as an execution target.
pub const PLACEHOLDER_TARGET: &str = "[target]";

/// A built probe command: the argv handed to execution and its preview form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Ordered argument vector, program token first, target token last
    pub argv: Vec<String>,
    /// Preview form: argv joined by single spaces
    pub display: String,
}

impl CommandSpec {
    fn from_argv(argv: Vec<String>) -> Self {
        let display = argv.join(" ");
        Self { argv, display }
    }

    /// The program token
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    /// The target token (or the preview placeholder)
    pub fn target(&self) -> &str {
        self.argv.last().map(String::as_str).unwrap_or_default()
    }

    /// Whether the argv carries a real target rather than the placeholder
    pub fn has_target(&self) -> bool {
        self.argv.len() >= 2
            && !self.target().trim().is_empty()
            && self.target() != PLACEHOLDER_TARGET
    }
}

/// Build the command for the current option set
///
/// Total, deterministic, and side-effect-free. String values are trimmed
/// before the non-empty check; an all-whitespace value contributes nothing.
pub fn build(options: &ProbeOptions, program: &str) -> CommandSpec {
    let mut argv = Vec::with_capacity(2 + options.flags.len() + 2 * options.values.len());
    argv.push(program.to_string());

    for flag in &options.flags {
        if flag.enabled {
            argv.push(flag.flag.clone());
        }
    }

    for value in &options.values {
        let trimmed = value.value.trim();
        if !trimmed.is_empty() {
            argv.push(value.flag.clone());
            argv.push(trimmed.to_string());
        }
    }

    let target = options.target.trim();
    argv.push(if target.is_empty() {
        PLACEHOLDER_TARGET.to_string()
    } else {
        target.to_string()
    });

    CommandSpec::from_argv(argv)
}

/// Whether the option set carries a target usable for execution
pub fn target_ready(options: &ProbeOptions) -> bool {
    !options.target.trim().is_empty()
}
