// crates/compose-guard-core/src/compose.rs
// ============================================================================
// Module: Compose Document
// Description: Strict loading of docker-compose files into a YAML tree.
// Purpose: Read-only document model consumed by the service presence check.
// Dependencies: serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! A [`ComposeDocument`] is the parsed, read-only tree of a compose file.
//! Loading enforces hard limits on path length, file size, and encoding, and
//! malformed YAML is always reported as a parse error, never replaced by an
//! empty document.
//!
//! ## Invariants
//! - The document root is a mapping or null (an empty file).
//! - `services` is a mapping, null, or absent; absence and null both read as
//!   an empty mapping.
//! - Service values are opaque and never inspected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde_yaml::Mapping;
use serde_yaml::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Compose file name expected at the repository root.
pub const REPOSITORY_COMPOSE_FILE: &str = "docker-compose.yml";
/// Top-level field holding the service entries.
pub const SERVICES_FIELD: &str = "services";
/// Maximum compose file size in bytes.
pub const MAX_COMPOSE_FILE_SIZE: usize = 4 * 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Setup failures raised before any service membership is tested.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// I/O failure while locating or reading the compose file.
    #[error("compose io error: {0}")]
    Io(String),
    /// YAML syntax error.
    #[error("compose parse error: {0}")]
    Parse(String),
    /// Document violates a load limit or the expected top-level shape.
    #[error("invalid compose document: {0}")]
    Invalid(String),
}

impl ComposeError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
            Self::Invalid(_) => "invalid",
        }
    }
}

// ============================================================================
// SECTION: Document
// ============================================================================

/// Parsed compose file.
#[derive(Debug, Clone)]
pub struct ComposeDocument {
    /// Path or label the document was read from.
    source: PathBuf,
    /// Parsed YAML root.
    root: Value,
}

impl ComposeDocument {
    /// Reads and parses a compose file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError`] when the path violates limits, the file
    /// cannot be read, or the YAML is malformed.
    pub fn load(path: &Path) -> Result<Self, ComposeError> {
        validate_path(path)?;
        let bytes = fs::read(path)
            .map_err(|err| ComposeError::Io(format!("{}: {err}", path.display())))?;
        if bytes.len() > MAX_COMPOSE_FILE_SIZE {
            return Err(ComposeError::Invalid("compose file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ComposeError::Invalid("compose file must be utf-8".to_string()))?;
        Self::from_yaml_str(content, path)
    }

    /// Parses compose YAML held in memory.
    ///
    /// `source` only labels the document in messages; nothing is read from it.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Parse`] for malformed YAML and
    /// [`ComposeError::Invalid`] when the root or `services` has the wrong
    /// shape.
    pub fn from_yaml_str(content: &str, source: impl Into<PathBuf>) -> Result<Self, ComposeError> {
        let root: Value = if content.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(content).map_err(|err| ComposeError::Parse(err.to_string()))?
        };
        match &root {
            Value::Mapping(_) | Value::Null => {}
            _ => {
                return Err(ComposeError::Invalid(
                    "compose document root must be a mapping".to_string(),
                ));
            }
        }
        let document = Self {
            source: source.into(),
            root,
        };
        document.services_value()?;
        Ok(document)
    }

    /// Path or label the document was read from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// File name used in user-facing messages.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.source.file_name().map_or_else(
            || self.source.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// Returns true when `name` is a key of the `services` mapping.
    #[must_use]
    pub fn has_service(&self, name: &str) -> bool {
        self.services().is_some_and(|services| services.contains_key(name))
    }

    /// Returns the string keys of the `services` mapping in document order.
    #[must_use]
    pub fn service_names(&self) -> Vec<String> {
        self.services()
            .map(|services| {
                services.keys().filter_map(Value::as_str).map(str::to_string).collect()
            })
            .unwrap_or_default()
    }

    /// Returns the `services` mapping, or `None` when absent or null.
    fn services(&self) -> Option<&Mapping> {
        self.root.get(SERVICES_FIELD).and_then(Value::as_mapping)
    }

    /// Validates the shape of the `services` field.
    fn services_value(&self) -> Result<(), ComposeError> {
        match self.root.get(SERVICES_FIELD) {
            None | Some(Value::Null | Value::Mapping(_)) => Ok(()),
            Some(_) => Err(ComposeError::Invalid("services must be a mapping".to_string())),
        }
    }
}

// ============================================================================
// SECTION: Location
// ============================================================================

/// Finds the repository compose file starting at `anchor` and walking up.
///
/// `anchor` is a directory known to sit inside the repository (for tests,
/// the crate manifest directory), so resolution never depends on the current
/// working directory.
///
/// # Errors
///
/// Returns [`ComposeError::Io`] when no ancestor holds the compose file.
pub fn locate_compose_file(anchor: &Path) -> Result<PathBuf, ComposeError> {
    validate_path(anchor)?;
    anchor
        .ancestors()
        .map(|dir| dir.join(REPOSITORY_COMPOSE_FILE))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            ComposeError::Io(format!(
                "{REPOSITORY_COMPOSE_FILE} not found in {} or its parents",
                anchor.display()
            ))
        })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates a path against length limits.
pub(crate) fn validate_path(path: &Path) -> Result<(), ComposeError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ComposeError::Invalid("compose path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ComposeError::Invalid("compose path component too long".to_string()));
        }
    }
    Ok(())
}
