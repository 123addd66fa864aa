// crates/compose-guard-core/src/check.rs
// ============================================================================
// Module: Service Presence Check
// Description: Fail-fast membership check of expected compose services.
// Purpose: Detect drift between the compose file and the required stack.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`run_check`] loads a compose file and walks [`EXPECTED_SERVICES`] in
//! order, stopping at the first name missing from `services`. Setup failures
//! (I/O, parse, document shape) are kept apart from the missing-service
//! assertion so callers can tell a broken environment from config drift.
//!
//! [`check_report`] is the diagnostic variant: it collects every missing and
//! extra service instead of stopping early.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::compose::ComposeDocument;
use crate::compose::ComposeError;
use crate::services::EXPECTED_SERVICES;
use crate::services::is_expected_service;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure of a presence check run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The document could not be loaded or has the wrong shape.
    #[error(transparent)]
    Setup(#[from] ComposeError),
    /// An expected service is not a key of `services`.
    #[error("Service '{service}' missing from {file}")]
    MissingService {
        /// Name of the first missing service.
        service: String,
        /// File name of the checked document.
        file: String,
    },
}

impl CheckError {
    /// Returns true for setup failures (I/O, parse, shape).
    #[must_use]
    pub const fn is_setup(&self) -> bool {
        matches!(self, Self::Setup(_))
    }

    /// Returns the missing service name for assertion failures.
    #[must_use]
    pub fn missing_service(&self) -> Option<&str> {
        match self {
            Self::MissingService {
                service, ..
            } => Some(service),
            Self::Setup(_) => None,
        }
    }
}

// ============================================================================
// SECTION: Fail-Fast Check
// ============================================================================

/// Loads the compose file at `path` and checks every expected service.
///
/// # Errors
///
/// Returns [`CheckError::Setup`] when the file cannot be read or parsed and
/// [`CheckError::MissingService`] for the first expected service not found.
pub fn run_check(path: &Path) -> Result<(), CheckError> {
    let document = ComposeDocument::load(path)?;
    check_document(&document)
}

/// Checks an already parsed document against [`EXPECTED_SERVICES`].
///
/// # Errors
///
/// Returns [`CheckError::MissingService`] for the first expected service not
/// found.
pub fn check_document(document: &ComposeDocument) -> Result<(), CheckError> {
    match EXPECTED_SERVICES.iter().find(|name| !document.has_service(name)) {
        Some(name) => Err(CheckError::MissingService {
            service: (*name).to_string(),
            file: document.display_name(),
        }),
        None => Ok(()),
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Full presence breakdown of a compose document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceReport {
    /// File name of the checked document.
    pub file: String,
    /// Expected services found, in expected order.
    pub present: Vec<String>,
    /// Expected services not found, in expected order.
    pub missing: Vec<String>,
    /// Services defined in the document but not expected, sorted.
    pub extra: Vec<String>,
}

impl ServiceReport {
    /// Builds the report for a parsed document.
    #[must_use]
    pub fn from_document(document: &ComposeDocument) -> Self {
        let (present, missing): (Vec<&str>, Vec<&str>) =
            EXPECTED_SERVICES.iter().copied().partition(|name| document.has_service(name));
        let mut extra: Vec<String> = document
            .service_names()
            .into_iter()
            .filter(|name| !is_expected_service(name))
            .collect();
        extra.sort();
        Self {
            file: document.display_name(),
            present: present.into_iter().map(str::to_string).collect(),
            missing: missing.into_iter().map(str::to_string).collect(),
            extra,
        }
    }

    /// Returns true when no expected service is missing.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }

    /// Returns the first missing service in expected order.
    #[must_use]
    pub fn first_missing(&self) -> Option<&str> {
        self.missing.first().map(String::as_str)
    }
}

/// Loads the compose file at `path` and reports every missing and extra service.
///
/// # Errors
///
/// Returns [`ComposeError`] when the file cannot be read or parsed.
pub fn check_report(path: &Path) -> Result<ServiceReport, ComposeError> {
    let document = ComposeDocument::load(path)?;
    Ok(ServiceReport::from_document(&document))
}
