// crates/compose-guard-core/src/audit.rs
// ============================================================================
// Module: Check Audit Logging
// Description: Structured audit events for compose presence checks.
// Purpose: Emit JSON-line records of check runs without a logging framework.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each check run can be described by one [`CheckAuditEvent`] and handed to a
//! [`CheckAuditSink`]. Sinks are best-effort: a failed write never changes
//! the outcome of the check that produced the event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::check::CheckError;
use crate::check::ServiceReport;
use crate::compose::ComposeError;
use crate::services::EXPECTED_SERVICES;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Event identifier for check runs.
pub const CHECK_EVENT: &str = "compose_check";

/// How the check walked the expected services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// Stopped at the first missing service.
    FailFast,
    /// Collected every missing and extra service.
    Report,
}

/// Outcome classification of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Every expected service was present.
    Pass,
    /// At least one expected service was missing.
    Fail,
    /// The document could not be loaded.
    Error,
}

/// Audit record for a single check run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Compose file that was checked.
    pub compose_file: String,
    /// Check mode.
    pub mode: CheckMode,
    /// Run outcome.
    pub outcome: CheckOutcome,
    /// Number of expected services.
    pub expected_services: usize,
    /// First missing service (fail-fast runs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_service: Option<String>,
    /// All missing services (report runs).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_services: Vec<String>,
    /// Unexpected services (report runs).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_services: Vec<String>,
    /// Setup error kind label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    /// Setup error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckAuditEvent {
    /// Builds an event with only the common fields populated.
    fn base(compose_file: &Path, mode: CheckMode, outcome: CheckOutcome) -> Self {
        Self {
            event: CHECK_EVENT,
            timestamp_ms: now_ms(),
            compose_file: compose_file.display().to_string(),
            mode,
            outcome,
            expected_services: EXPECTED_SERVICES.len(),
            missing_service: None,
            missing_services: Vec::new(),
            extra_services: Vec::new(),
            error_kind: None,
            error: None,
        }
    }

    /// Describes a fail-fast run.
    #[must_use]
    pub fn fail_fast(compose_file: &Path, result: &Result<(), CheckError>) -> Self {
        match result {
            Ok(()) => Self::base(compose_file, CheckMode::FailFast, CheckOutcome::Pass),
            Err(CheckError::MissingService {
                service, ..
            }) => Self {
                missing_service: Some(service.clone()),
                ..Self::base(compose_file, CheckMode::FailFast, CheckOutcome::Fail)
            },
            Err(CheckError::Setup(error)) => {
                Self::setup_error(compose_file, CheckMode::FailFast, error)
            }
        }
    }

    /// Describes a report run.
    #[must_use]
    pub fn report(compose_file: &Path, result: &Result<ServiceReport, ComposeError>) -> Self {
        match result {
            Ok(report) => {
                let outcome = if report.passed() { CheckOutcome::Pass } else { CheckOutcome::Fail };
                Self {
                    missing_services: report.missing.clone(),
                    extra_services: report.extra.clone(),
                    ..Self::base(compose_file, CheckMode::Report, outcome)
                }
            }
            Err(error) => Self::setup_error(compose_file, CheckMode::Report, error),
        }
    }

    /// Describes a run that failed before membership was tested.
    fn setup_error(compose_file: &Path, mode: CheckMode, error: &ComposeError) -> Self {
        Self {
            error_kind: Some(error.kind()),
            error: Some(error.to_string()),
            ..Self::base(compose_file, mode, CheckOutcome::Error)
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for check events.
pub trait CheckAuditSink: Send + Sync {
    /// Record a check event.
    fn record(&self, event: &CheckAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl CheckAuditSink for StderrAuditSink {
    fn record(&self, event: &CheckAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl CheckAuditSink for FileAuditSink {
    fn record(&self, event: &CheckAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl CheckAuditSink for NoopAuditSink {
    fn record(&self, _event: &CheckAuditEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Current time in milliseconds since the Unix epoch (zero if the clock is before it).
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|elapsed| elapsed.as_millis()).unwrap_or(0)
}
