// crates/compose-guard-cli/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Exercises the translation catalog and placeholder substitution.
// Purpose: Ensure CLI user-facing strings route through stable i18n helpers.
// Dependencies: compose-guard-cli i18n module and the `t!` macro.
// ============================================================================

//! ## Overview
//! Validates the compose-guard CLI i18n catalog behavior:
//! - Message arguments capture key/value substitutions.
//! - Translation falls back to keys on misses.
//! - Every English key has a Catalan entry.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use compose_guard_cli::i18n::Locale;
use compose_guard_cli::i18n::MessageArg;
use compose_guard_cli::i18n::SUPPORTED_LOCALES;
use compose_guard_cli::i18n::template_for;
use compose_guard_cli::i18n::translate;
use compose_guard_cli::t;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms message arguments capture key/value pairs.
#[test]
fn message_arg_new_captures_key_and_value() {
    let arg = MessageArg::new("file", "docker-compose.yml");
    assert_eq!(arg.key, "file");
    assert_eq!(arg.value, "docker-compose.yml");
}

/// Confirms catalog entries resolve and replace placeholders.
#[test]
fn translate_substitutes_placeholders() {
    let args =
        vec![MessageArg::new("service", "nuclei"), MessageArg::new("file", "docker-compose.yml")];
    let result = translate("check.missing", args);
    assert_eq!(result, "Service 'nuclei' missing from docker-compose.yml");
}

/// Confirms missing keys fall back to the key string.
#[test]
fn translate_falls_back_to_key() {
    let result = translate("missing.key", Vec::new());
    assert_eq!(result, "missing.key");
}

/// Confirms the macro formats named arguments.
#[test]
fn macro_formats_named_arguments() {
    let result = t!("check.report.extra", count = 2, services = "amass, zap");
    assert_eq!(result, "Extra (2): amass, zap");
}

/// Confirms locale parsing tolerates case and region tags.
#[test]
fn locale_parse_handles_variants() {
    assert_eq!(Locale::parse("EN-us"), Some(Locale::En));
    assert_eq!(Locale::parse("ca_ES"), Some(Locale::Ca));
    assert_eq!(Locale::parse(" "), None);
    assert_eq!(Locale::parse("fr"), None);
    assert_eq!(Locale::Ca.as_str(), "ca");
}

/// Confirms every supported locale covers the English keys.
#[test]
fn catalogs_cover_english_keys() {
    let keys = [
        "main.version",
        "config.load_failed",
        "config.validate.ok",
        "check.ok",
        "check.missing",
        "check.setup_failed",
        "check.locate_failed",
        "check.report.header",
        "check.report.none",
        "i18n.lang.invalid_env",
    ];
    for locale in SUPPORTED_LOCALES {
        for key in keys {
            assert!(template_for(*locale, key).is_some(), "{} missing {key}", locale.as_str());
        }
    }
}
