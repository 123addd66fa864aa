// crates/compose-guard-cli/src/lib.rs
// ============================================================================
// Module: compose-guard CLI Library
// Description: Shared helpers for the compose-guard command-line interface.
// Purpose: Provide reusable components (i18n) for the CLI binary and tests.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! Houses the internationalized message catalog. The binary entry point
//! (`src/main.rs`) imports these helpers to keep user-facing output
//! consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
