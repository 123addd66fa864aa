//! Tool settings validation tests for compose-guard-core.
// crates/compose-guard-core/tests/settings_validation.rs
// =============================================================================
// Module: Settings Validation Tests
// Description: Validate compose-guard.toml parsing, limits, and sink wiring.
// Purpose: Ensure settings are strict and relative paths resolve predictably.
// =============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;

use compose_guard_core::CheckAuditEvent;
use compose_guard_core::GuardSettings;
use compose_guard_core::SettingsError;
use compose_guard_core::settings::AuditSinkKind;
use tempfile::NamedTempFile;
use tempfile::TempDir;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<GuardSettings, SettingsError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid settings".to_string()),
    }
}

#[test]
fn empty_settings_use_defaults() -> TestResult {
    let settings = GuardSettings::from_toml_str("").map_err(|err| err.to_string())?;
    if settings.compose_file().is_some() || settings.audit.sink != AuditSinkKind::None {
        return Err(format!("unexpected defaults {settings:?}"));
    }
    Ok(())
}

#[test]
fn unknown_fields_are_rejected() -> TestResult {
    assert_invalid(
        GuardSettings::from_toml_str("[compose]\nfile = \"a.yml\"\nexpected = [\"db\"]\n"),
        "settings parse error",
    )
}

#[test]
fn file_sink_requires_path() -> TestResult {
    assert_invalid(
        GuardSettings::from_toml_str("[audit]\nsink = \"file\"\n"),
        "audit.path is required for file sink",
    )
}

#[test]
fn empty_compose_file_is_rejected() -> TestResult {
    assert_invalid(
        GuardSettings::from_toml_str("[compose]\nfile = \"  \"\n"),
        "compose.file must be non-empty",
    )
}

#[test]
fn unknown_sink_is_rejected() -> TestResult {
    assert_invalid(GuardSettings::from_toml_str("[audit]\nsink = \"syslog\"\n"), "settings parse error")
}

#[test]
fn explicit_missing_path_is_an_io_error() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("compose-guard.toml");
    assert_invalid(GuardSettings::load(Some(&path)), "settings io error")
}

#[test]
fn oversized_settings_are_rejected() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&vec![b'#'; 64 * 1024 + 1]).map_err(|err| err.to_string())?;
    assert_invalid(GuardSettings::load(Some(file.path())), "settings file exceeds size limit")
}

#[test]
fn relative_paths_resolve_from_settings_directory() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("compose-guard.toml");
    fs::write(
        &path,
        "[compose]\nfile = \"deploy/docker-compose.yml\"\n\n[audit]\nsink = \"file\"\npath = \"audit.jsonl\"\n",
    )
    .map_err(|err| err.to_string())?;
    let settings = GuardSettings::load(Some(&path)).map_err(|err| err.to_string())?;
    let expected = dir.path().join("deploy/docker-compose.yml");
    if settings.compose_file().as_deref() != Some(expected.as_path()) {
        return Err(format!("unexpected compose file {:?}", settings.compose_file()));
    }
    let sink = settings.audit_sink().map_err(|err| err.to_string())?;
    sink.record(&CheckAuditEvent::fail_fast(Path::new("docker-compose.yml"), &Ok(())));
    let log = fs::read_to_string(dir.path().join("audit.jsonl")).map_err(|err| err.to_string())?;
    if !log.contains("\"compose_check\"") {
        return Err(format!("audit log missing event: {log}"));
    }
    Ok(())
}

#[test]
fn absolute_paths_are_kept() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let compose = dir.path().join("docker-compose.yml");
    let toml = format!("[compose]\nfile = {:?}\n", compose.display().to_string());
    let settings = GuardSettings::from_toml_str(&toml).map_err(|err| err.to_string())?;
    if settings.compose_file().as_deref() != Some(compose.as_path()) {
        return Err(format!("unexpected compose file {:?}", settings.compose_file()));
    }
    Ok(())
}
