//! Probe Option Set Model
//!
//! The editable option set the surface binds its widgets to. Declaration
//! order of the two option vectors is fixed and determines the emission
//! order of the built argument vector, independent of the order in which
//! the user edits values.

use serde::{Deserialize, Serialize};

/// Column the option is shown under in the editor view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionSection {
    /// Commonly tuned numeric options
    Basics,
    /// Rarely needed routing/priority options
    Advanced,
}

/// A boolean option contributing a single fixed token when enabled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagOption {
    /// Stable identifier, independent of display text
    pub key: String,
    /// Literal token emitted into the argument vector
    pub flag: String,
    /// Widget label
    pub label: String,
    /// One-line help shown under the widget
    pub help: String,
    /// Current state
    pub enabled: bool,
}

impl FlagOption {
    pub fn new(key: &str, flag: &str, label: &str, help: &str) -> Self {
        Self {
            key: key.to_string(),
            flag: flag.to_string(),
            label: label.to_string(),
            help: help.to_string(),
            enabled: false,
        }
    }
}

/// A string option contributing `[flag, value]` when its trimmed value is non-empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueOption {
    /// Stable identifier, independent of display text
    pub key: String,
    /// Flag token emitted before the value token
    pub flag: String,
    /// Widget label
    pub label: String,
    /// One-line help shown under the widget
    pub help: String,
    /// Hint text shown in the empty input
    pub placeholder: String,
    /// Editor column
    pub section: OptionSection,
    /// Current raw value; trimmed before use
    pub value: String,
}

impl ValueOption {
    pub fn new(
        key: &str,
        flag: &str,
        label: &str,
        placeholder: &str,
        help: &str,
        section: OptionSection,
    ) -> Self {
        Self {
            key: key.to_string(),
            flag: flag.to_string(),
            label: label.to_string(),
            help: help.to_string(),
            placeholder: placeholder.to_string(),
            section,
            value: String::new(),
        }
    }
}

/// The full editable option set plus the probe target
///
/// Vector order is declaration order: boolean flags are emitted first,
/// then value options, each group in the order declared here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOptions {
    /// Boolean flags, in emission order
    pub flags: Vec<FlagOption>,
    /// Value options, in emission order
    pub values: Vec<ValueOption>,
    /// Probe destination; no default
    pub target: String,
}

impl ProbeOptions {
    /// The standard `ping` option surface
    pub fn standard() -> Self {
        use OptionSection::{Advanced, Basics};

        Self {
            flags: vec![
                FlagOption::new("flag_t", "-t", "Infinite (-t)", "Run until stopped."),
                FlagOption::new("flag_a", "-a", "Resolve (-a)", "Show hostnames."),
                FlagOption::new("flag_f", "-f", "No Frag (-f)", "Don't split packets."),
                FlagOption::new("flag_4", "-4", "IPv4 Only (-4)", "Force IPv4."),
                FlagOption::new("flag_6", "-6", "IPv6 Only (-6)", "Force IPv6."),
                FlagOption::new("flag_p", "-p", "Hyper-V (-p)", "Test VM connection."),
            ],
            values: vec![
                ValueOption::new("val_n", "-n", "Count (-n)", "4", "Total pings.", Basics),
                ValueOption::new("val_l", "-l", "Size (-l)", "32", "Packet size.", Basics),
                ValueOption::new("val_w", "-w", "Timeout (-w)", "ms", "Max wait time.", Basics),
                ValueOption::new("val_i", "-i", "TTL (-i)", "Def", "Max hops.", Basics),
                ValueOption::new("val_S", "-S", "Source (-S)", "IP", "Local IP.", Advanced),
                ValueOption::new("val_v", "-v", "TOS (-v)", "0", "Priority.", Advanced),
                ValueOption::new("val_r", "-r", "Route (-r)", "#", "Count hops.", Advanced),
                ValueOption::new("val_c", "-c", "Comp (-c)", "ID", "Compartment ID.", Advanced),
            ],
            target: String::new(),
        }
    }

    /// Look up a flag option by key
    pub fn flag(&self, key: &str) -> Option<&FlagOption> {
        self.flags.iter().find(|f| f.key == key)
    }

    /// Look up a value option by key
    pub fn value(&self, key: &str) -> Option<&ValueOption> {
        self.values.iter().find(|v| v.key == key)
    }

    /// Set a flag option by key; returns false if the key is unknown
    pub fn set_flag(&mut self, key: &str, enabled: bool) -> bool {
        match self.flags.iter_mut().find(|f| f.key == key) {
            Some(f) => {
                f.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Set a value option by key; returns false if the key is unknown
    pub fn set_value(&mut self, key: &str, value: &str) -> bool {
        match self.values.iter_mut().find(|v| v.key == key) {
            Some(v) => {
                v.value = value.to_string();
                true
            }
            None => false,
        }
    }
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self::standard()
    }
}
