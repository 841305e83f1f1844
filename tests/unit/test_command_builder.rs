//! Unit Tests for the Command Builder Public API
//!
//! Covers emission ordering, trimming, the preview placeholder, and the
//! invariants the surface relies on when binding widgets to the option set.

use pingdeck::command::{build, target_ready, CommandSpec, PLACEHOLDER_TARGET};
use pingdeck::models::ProbeOptions;

fn options_with_target(target: &str) -> ProbeOptions {
    let mut options = ProbeOptions::standard();
    options.target = target.to_string();
    options
}

#[test]
fn test_program_first_target_last() {
    let mut options = options_with_target("host.example");
    options.set_flag("flag_4", true);
    options.set_value("val_w", "1000");

    let spec = build(&options, "ping");
    assert_eq!(spec.program(), "ping");
    assert_eq!(spec.target(), "host.example");
    assert!(spec.has_target());
}

#[test]
fn test_empty_target_yields_placeholder_preview() {
    let spec = build(&ProbeOptions::standard(), "ping");
    assert_eq!(spec.target(), PLACEHOLDER_TARGET);
    assert!(!spec.has_target());
    assert!(!target_ready(&ProbeOptions::standard()));
}

#[test]
fn test_whitespace_target_is_not_ready() {
    let options = options_with_target(" \t ");
    assert!(!target_ready(&options));
    assert_eq!(build(&options, "ping").target(), PLACEHOLDER_TARGET);
}

#[test]
fn test_edit_order_does_not_affect_emission_order() {
    // Edit in reverse declaration order...
    let mut backwards = options_with_target("host");
    backwards.set_value("val_l", "64");
    backwards.set_value("val_n", "4");
    backwards.set_flag("flag_a", true);
    backwards.set_flag("flag_t", true);

    // ...and in declaration order.
    let mut forwards = options_with_target("host");
    forwards.set_flag("flag_t", true);
    forwards.set_flag("flag_a", true);
    forwards.set_value("val_n", "4");
    forwards.set_value("val_l", "64");

    assert_eq!(build(&backwards, "ping").argv, build(&forwards, "ping").argv);
    assert_eq!(
        build(&forwards, "ping").argv,
        ["ping", "-t", "-a", "-n", "4", "-l", "64", "host"]
    );
}

#[test]
fn test_flags_precede_value_options() {
    let mut options = options_with_target("host");
    options.set_value("val_n", "2");
    options.set_flag("flag_6", true);

    let spec = build(&options, "ping");
    assert_eq!(spec.argv, ["ping", "-6", "-n", "2", "host"]);
}

#[test]
fn test_toggling_flag_off_removes_exactly_its_token() {
    let mut options = options_with_target("host");
    options.set_flag("flag_t", true);
    options.set_flag("flag_f", true);
    options.set_value("val_i", "64");
    let before = build(&options, "ping");

    options.set_flag("flag_f", false);
    let after = build(&options, "ping");

    let missing: Vec<&String> = before
        .argv
        .iter()
        .filter(|t| !after.argv.contains(t))
        .collect();
    assert_eq!(missing, [&"-f".to_string()]);
}

#[test]
fn test_display_matches_argv_tokens() {
    let mut options = options_with_target("host.example");
    options.set_flag("flag_t", true);
    options.set_value("val_n", "4");

    let spec = build(&options, "ping");
    assert_eq!(spec.argv, ["ping", "-t", "-n", "4", "host.example"]);
    assert_eq!(spec.display, "ping -t -n 4 host.example");
}

#[test]
fn test_build_is_deterministic() {
    let mut options = options_with_target("10.0.0.1");
    options.set_value("val_S", "192.168.0.10");

    let a = build(&options, "ping");
    let b = build(&options, "ping");
    assert_eq!(a, b);
}

#[test]
fn test_custom_program_token() {
    let options = options_with_target("host");
    let spec = build(&options, "ping6");
    assert_eq!(spec.argv, ["ping6", "host"]);
}

#[test]
fn test_command_spec_accessors_on_minimal_argv() {
    let spec = CommandSpec {
        argv: vec!["ping".to_string()],
        display: "ping".to_string(),
    };
    // A one-token argv has no target; execution must reject it.
    assert!(!spec.has_target());
}
