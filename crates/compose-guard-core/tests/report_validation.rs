//! Aggregated service report tests for compose-guard-core.
// crates/compose-guard-core/tests/report_validation.rs
// =============================================================================
// Module: Service Report Tests
// Description: Validate the non-fail-fast diagnostic report.
// Purpose: Ensure every missing and extra service is surfaced in order.
// =============================================================================

mod common;

use compose_guard_core::ComposeDocument;
use compose_guard_core::EXPECTED_SERVICES;
use compose_guard_core::ServiceReport;
use compose_guard_core::check_report;

type TestResult = Result<(), String>;

#[test]
fn report_collects_every_missing_service_in_expected_order() -> TestResult {
    let names = EXPECTED_SERVICES
        .iter()
        .copied()
        .filter(|name| !matches!(*name, "nuclei" | "api" | "dnsx"));
    let (_dir, path) = common::write_compose(&common::compose_yaml(names))?;
    let report = check_report(&path).map_err(|err| err.to_string())?;
    if report.missing != ["api", "dnsx", "nuclei"] {
        return Err(format!("unexpected missing {:?}", report.missing));
    }
    if report.passed() || report.first_missing() != Some("api") {
        return Err("report should fail on api first".to_string());
    }
    if report.present.len() != EXPECTED_SERVICES.len() - 3 {
        return Err(format!("unexpected present count {}", report.present.len()));
    }
    Ok(())
}

#[test]
fn report_sorts_extra_services() -> TestResult {
    let mut yaml = common::complete_compose_yaml();
    yaml.push_str("  zap:\n    image: zaproxy/zap\n  amass:\n    image: caffix/amass\n");
    let document =
        ComposeDocument::from_yaml_str(&yaml, "docker-compose.yml").map_err(|err| err.to_string())?;
    let report = ServiceReport::from_document(&document);
    if !report.passed() {
        return Err(format!("unexpected missing {:?}", report.missing));
    }
    if report.extra != ["amass", "zap"] {
        return Err(format!("unexpected extra {:?}", report.extra));
    }
    Ok(())
}

#[test]
fn report_without_services_misses_everything() -> TestResult {
    let document = ComposeDocument::from_yaml_str("name: recon\n", "docker-compose.yml")
        .map_err(|err| err.to_string())?;
    let report = ServiceReport::from_document(&document);
    if report.missing.len() != EXPECTED_SERVICES.len() || report.first_missing() != Some("db") {
        return Err(format!("unexpected report {report:?}"));
    }
    if !report.present.is_empty() || !report.extra.is_empty() {
        return Err(format!("unexpected report {report:?}"));
    }
    Ok(())
}

#[test]
fn report_propagates_parse_errors() -> TestResult {
    let (_dir, path) = common::write_compose("services:\n  db: [unclosed\n")?;
    match check_report(&path) {
        Err(error) if error.kind() == "parse" => Ok(()),
        other => Err(format!("expected parse error, got {other:?}")),
    }
}

#[test]
fn report_serializes_to_json() -> TestResult {
    let document = ComposeDocument::from_yaml_str(&common::compose_yaml_without("cewl"), "c.yml")
        .map_err(|err| err.to_string())?;
    let value = serde_json::to_value(ServiceReport::from_document(&document))
        .map_err(|err| err.to_string())?;
    if value["missing"] != serde_json::json!(["cewl"]) || value["file"] != "c.yml" {
        return Err(format!("unexpected json {value}"));
    }
    Ok(())
}
