// crates/compose-guard-core/tests/common/mod.rs
// =============================================================================
// Module: Compose Test Helpers
// Description: Shared fixtures for compose presence check tests.
// Purpose: Build compose documents with chosen service sets.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use compose_guard_core::EXPECTED_SERVICES;
use tempfile::TempDir;

/// Renders compose YAML with one minimal entry per service name.
pub fn compose_yaml<'a>(services: impl IntoIterator<Item = &'a str>) -> String {
    let mut yaml = String::from("services:\n");
    for name in services {
        yaml.push_str(&format!("  {name}:\n    image: example/{name}:latest\n"));
    }
    yaml
}

/// Renders compose YAML containing every expected service.
pub fn complete_compose_yaml() -> String {
    compose_yaml(EXPECTED_SERVICES.iter().copied())
}

/// Renders compose YAML containing every expected service except `skip`.
pub fn compose_yaml_without(skip: &str) -> String {
    compose_yaml(EXPECTED_SERVICES.iter().copied().filter(|name| *name != skip))
}

/// Writes `content` as `docker-compose.yml` inside a fresh temp directory.
pub fn write_compose(content: &str) -> Result<(TempDir, PathBuf), String> {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("docker-compose.yml");
    fs::write(&path, content).map_err(|err| err.to_string())?;
    Ok((dir, path))
}

/// Returns the workspace-relative anchor for this crate.
pub fn crate_dir() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}
