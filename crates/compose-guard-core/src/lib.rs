// crates/compose-guard-core/src/lib.rs
// ============================================================================
// Module: compose-guard Core Library
// Description: Compose document loading and service presence checks.
// Purpose: Verify the reconnaissance stack compose file defines every service.
// Dependencies: serde, serde_json, serde_yaml, thiserror, toml
// ============================================================================

//! ## Overview
//! `compose-guard-core` loads a `docker-compose.yml`, looks up its `services`
//! mapping, and checks a fixed list of expected service names against it.
//! The check is synchronous and read-only; service definitions are never
//! inspected beyond their names.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use compose_guard_core::locate_compose_file;
//! use compose_guard_core::run_check;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let compose = locate_compose_file(Path::new(env!("CARGO_MANIFEST_DIR")))?;
//! run_check(&compose)?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod check;
pub mod compose;
pub mod services;
pub mod settings;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::CheckAuditEvent;
pub use audit::CheckAuditSink;
pub use audit::CheckMode;
pub use audit::CheckOutcome;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use check::CheckError;
pub use check::ServiceReport;
pub use check::check_document;
pub use check::check_report;
pub use check::run_check;
pub use compose::ComposeDocument;
pub use compose::ComposeError;
pub use compose::REPOSITORY_COMPOSE_FILE;
pub use compose::locate_compose_file;
pub use services::EXPECTED_SERVICES;
pub use settings::GuardSettings;
pub use settings::SettingsError;
