//! Property-Based Tests for the Command Builder
//!
//! The builder invariants must hold for every reachable option set, not
//! just the curated unit-test cases.

use proptest::prelude::*;

use pingdeck::command::{build, PLACEHOLDER_TARGET};
use pingdeck::models::ProbeOptions;

fn arb_options() -> impl Strategy<Value = ProbeOptions> {
    (
        proptest::collection::vec(any::<bool>(), 6),
        // No leading '-': a value that looks like a flag token would make
        // the pair-position checks ambiguous.
        proptest::collection::vec("[A-Za-z0-9 ._:]{0,12}", 8),
        "[ -~]{0,16}",
    )
        .prop_map(|(flags, values, target)| {
            let mut options = ProbeOptions::standard();
            for (flag, enabled) in options.flags.iter_mut().zip(flags) {
                flag.enabled = enabled;
            }
            for (value, text) in options.values.iter_mut().zip(values) {
                value.value = text;
            }
            options.target = target;
            options
        })
}

proptest! {
    #[test]
    fn prop_program_first_target_last(options in arb_options()) {
        let spec = build(&options, "ping");
        prop_assert_eq!(spec.argv.first().unwrap(), "ping");

        let trimmed = options.target.trim();
        let expected = if trimmed.is_empty() { PLACEHOLDER_TARGET } else { trimmed };
        prop_assert_eq!(spec.argv.last().unwrap(), expected);
    }

    #[test]
    fn prop_display_is_argv_joined(options in arb_options()) {
        let spec = build(&options, "ping");
        prop_assert_eq!(&spec.display, &spec.argv.join(" "));
    }

    #[test]
    fn prop_whitespace_value_equals_empty(options in arb_options(), index in 0usize..8) {
        let mut blank = options.clone();
        blank.values[index].value = " \t  ".to_string();

        let mut empty = options;
        empty.values[index].value = String::new();

        prop_assert_eq!(build(&blank, "ping").argv, build(&empty, "ping").argv);
    }

    #[test]
    fn prop_enabled_flags_follow_declaration_order(options in arb_options()) {
        let spec = build(&options, "ping");
        let expected: Vec<&str> = options
            .flags
            .iter()
            .filter(|f| f.enabled)
            .map(|f| f.flag.as_str())
            .collect();
        let emitted: Vec<&str> = spec.argv[1..1 + expected.len()]
            .iter()
            .map(String::as_str)
            .collect();
        prop_assert_eq!(emitted, expected);
    }

    #[test]
    fn prop_toggling_one_flag_changes_argv_by_one_token(
        options in arb_options(),
        index in 0usize..6,
    ) {
        let mut enabled = options;
        enabled.flags[index].enabled = true;
        let mut disabled = enabled.clone();
        disabled.flags[index].enabled = false;

        let spec_on = build(&enabled, "ping");
        let spec_off = build(&disabled, "ping");
        prop_assert_eq!(spec_on.argv.len(), spec_off.argv.len() + 1);
    }

    #[test]
    fn prop_value_options_emit_pairs(options in arb_options()) {
        let spec = build(&options, "ping");
        for value in &options.values {
            let trimmed = value.value.trim();
            if !trimmed.is_empty() {
                let position = spec.argv.iter().position(|t| t == &value.flag);
                prop_assert!(position.is_some());
                prop_assert_eq!(&spec.argv[position.unwrap() + 1], trimmed);
            }
        }
    }
}
