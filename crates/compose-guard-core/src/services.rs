// crates/compose-guard-core/src/services.rs
// ============================================================================
// Module: Expected Services
// Description: Fixed list of services the reconnaissance stack must define.
// Purpose: Single source of truth for the presence check.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! The expected service names are hard-coded and ordered. The check walks
//! them in this order, so the first entry (`db`) is the one reported when
//! `services` is missing entirely.

// ============================================================================
// SECTION: Expected Services
// ============================================================================

/// Services required in the repository compose file, in check order.
pub const EXPECTED_SERVICES: &[&str] = &[
    "db",
    "api",
    "client",
    "ai_service",
    "subfinder",
    "assetfinder",
    "katana",
    "sublist3r",
    "cloud_enum",
    "ffuf",
    "subdomainizer",
    "cewl",
    "metabigor",
    "httpx",
    "gospider",
    "dnsx",
    "github-recon",
    "nuclei",
    "shuffledns",
];

/// Returns true when `name` is one of the expected services.
#[must_use]
pub fn is_expected_service(name: &str) -> bool {
    EXPECTED_SERVICES.contains(&name)
}
