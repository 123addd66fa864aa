// crates/compose-guard-core/src/settings.rs
// ============================================================================
// Module: Tool Settings
// Description: Loading and validation of compose-guard.toml.
// Purpose: Configure where the compose file lives and where audit events go.
// Dependencies: serde, toml, thiserror
// ============================================================================

//! ## Overview
//! Settings only affect how the tool runs: which compose file it reads and
//! which audit sink receives events. The expected service list is fixed and
//! has no setting. Loading is strict: unknown fields, oversized files, and
//! non-UTF-8 content are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::audit::CheckAuditSink;
use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::compose::MAX_PATH_COMPONENT_LENGTH;
use crate::compose::MAX_TOTAL_PATH_LENGTH;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default settings filename when no path is specified.
pub const DEFAULT_SETTINGS_NAME: &str = "compose-guard.toml";
/// Environment variable used to override the settings path.
pub const SETTINGS_ENV_VAR: &str = "COMPOSE_GUARD_CONFIG";
/// Maximum settings file size in bytes.
pub(crate) const MAX_SETTINGS_FILE_SIZE: usize = 64 * 1024;

// ============================================================================
// SECTION: Settings Types
// ============================================================================

/// compose-guard tool settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardSettings {
    /// Compose file selection.
    #[serde(default)]
    pub compose: ComposeSettings,
    /// Audit event routing.
    #[serde(default)]
    pub audit: AuditSettings,
    /// Directory containing the settings file, used to resolve relative paths.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Compose file selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComposeSettings {
    /// Compose file path; relative paths resolve from the settings directory.
    #[serde(default)]
    pub file: Option<String>,
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Events are dropped.
    #[default]
    None,
}

/// Audit event routing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditSettings {
    /// Sink receiving check events.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path (required for the file sink).
    #[serde(default)]
    pub path: Option<String>,
}

impl GuardSettings {
    /// Loads settings using the default resolution rules.
    ///
    /// An explicit path or `COMPOSE_GUARD_CONFIG` must exist; a missing
    /// default `compose-guard.toml` yields default settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let (resolved, required) = resolve_path(path)?;
        if !required && !resolved.exists() {
            return Ok(Self::default());
        }
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved)
            .map_err(|err| SettingsError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_SETTINGS_FILE_SIZE {
            return Err(SettingsError::Invalid("settings file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| SettingsError::Invalid("settings file must be utf-8".to_string()))?;
        let mut settings = Self::from_toml_str(content)?;
        settings.base_dir = resolved.parent().map(Path::to_path_buf);
        Ok(settings)
    }

    /// Parses and validates settings held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            toml::from_str(content).map_err(|err| SettingsError::Parse(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates the settings for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when settings are invalid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(file) = &self.compose.file {
            validate_path_string("compose.file", file)?;
        }
        self.audit.validate()
    }

    /// Returns the configured compose file, resolved against the settings directory.
    #[must_use]
    pub fn compose_file(&self) -> Option<PathBuf> {
        self.compose.file.as_deref().map(|file| self.resolve(file))
    }

    /// Builds the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] when the audit log cannot be opened.
    pub fn audit_sink(&self) -> Result<Box<dyn CheckAuditSink>, SettingsError> {
        match self.audit.sink {
            AuditSinkKind::Stderr => Ok(Box::new(StderrAuditSink)),
            AuditSinkKind::None => Ok(Box::new(NoopAuditSink)),
            AuditSinkKind::File => {
                let path = self.audit.path.as_deref().map(|path| self.resolve(path)).ok_or_else(
                    || SettingsError::Invalid("audit.path is required for file sink".to_string()),
                )?;
                let sink = FileAuditSink::new(&path)
                    .map_err(|err| SettingsError::Io(format!("{}: {err}", path.display())))?;
                Ok(Box::new(sink))
            }
        }
    }

    /// Resolves a settings-relative path.
    fn resolve(&self, value: &str) -> PathBuf {
        let path = Path::new(value.trim());
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl AuditSettings {
    /// Validates audit routing.
    fn validate(&self) -> Result<(), SettingsError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        if self.sink == AuditSinkKind::File && self.path.is_none() {
            return Err(SettingsError::Invalid("audit.path is required for file sink".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Settings loading errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// I/O failure while reading settings.
    #[error("settings io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("settings parse error: {0}")]
    Parse(String),
    /// Invalid settings data.
    #[error("invalid settings: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the settings path and whether it must exist.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), SettingsError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(SETTINGS_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(SettingsError::Invalid("settings path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_SETTINGS_NAME), false))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), SettingsError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SettingsError::Invalid("settings path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SettingsError::Invalid("settings path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), SettingsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SettingsError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SettingsError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SettingsError::Invalid(format!("{field} component too long")));
        }
    }
    Ok(())
}
