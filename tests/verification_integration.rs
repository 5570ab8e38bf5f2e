//! Integration tests for the verification pipeline.
//!
//! These tests drive the public API end to end:
//! - Store lookup, intake, rule evaluation, rendering
//! - Per-rule scenarios against a stored project
//! - Summary invariants and determinism
//! - Saving records and reading project history

use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

use bep_verify::{
    CheckStatus, FileReportWriter, OutputConfig, ProjectStatus, ProjectStore, ReportWriter,
    RulePolicy, VerificationOutcome, VerificationRecord, Verifier, VerifyError,
};

const CONTEXT_YAML: &str = r#"
project_name: Spital Judetean
project_code: SJ-01
has_eir: true
disciplines:
  - architecture
  - structure
uses_federated_models: true
main_exchange_format: ifc4_3
lod_scale: LOD 100-500
lod_target_pt: LOD 300
lod_target_dde: LOD 350
"#;

fn seed_project(root: &Path, code: &str, context: &str, bep: Option<&str>) {
    let dir = root.join(code);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("context.yaml"), context).unwrap();
    if let Some(bep) = bep {
        std::fs::write(dir.join("bep.md"), bep).unwrap();
    }
}

fn store_with_project() -> (TempDir, ProjectStore) {
    let tmp = TempDir::new().unwrap();
    seed_project(tmp.path(), "SJ-01", CONTEXT_YAML, Some("# BEP SJ-01\n"));
    let store = ProjectStore::new(tmp.path());
    (tmp, store)
}

fn conformant_payload() -> Value {
    json!({
        "source": "revit",
        "disciplines_present": ["architecture", "structure"],
        "categories": [
            {"name": "Walls", "element_count": 120},
            {"name": "Floors", "element_count": 14}
        ],
        "has_georeference": true,
        "coordinate_system": "Stereo 70 / EPSG:31700",
        "exchange_formats_available": ["ifc4_3", "nwd"],
        "lod_info_available": true
    })
}

fn run(store: &ProjectStore, payload: &Value) -> VerificationOutcome {
    let record = store.load("SJ-01").unwrap();
    Verifier::default()
        .verify(record.as_ref(), "SJ-01", payload)
        .unwrap()
}

fn status_of(outcome: &VerificationOutcome, id: &str) -> CheckStatus {
    outcome
        .checks
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.status)
        .unwrap_or_else(|| panic!("no check {}", id))
}

// ============================================================================
// Rule Scenarios
// ============================================================================

#[test]
fn test_matching_disciplines_pass() {
    let (_tmp, store) = store_with_project();
    let outcome = run(&store, &conformant_payload());
    assert_eq!(status_of(&outcome, "disciplines_coverage"), CheckStatus::Pass);
}

#[test]
fn test_missing_exchange_format_fails_and_names_it() {
    let (_tmp, store) = store_with_project();
    let mut payload = conformant_payload();
    payload["exchange_formats_available"] = json!(["dwg"]);

    let outcome = run(&store, &payload);
    let check = outcome
        .checks
        .iter()
        .find(|c| c.id == "exchange_format_match")
        .unwrap();
    assert_eq!(check.status, CheckStatus::Fail);
    assert!(check.details.contains("ifc4_3"));
}

#[test]
fn test_missing_exchange_format_fails_next_to_unknown_format() {
    let (_tmp, store) = store_with_project();
    let mut payload = conformant_payload();
    payload["exchange_formats_available"] = json!(["dwg", "ifc5"]);

    let outcome = run(&store, &payload);
    assert_eq!(status_of(&outcome, "exchange_format_match"), CheckStatus::Fail);
    assert_eq!(outcome.summary.overall_status, CheckStatus::Fail);
}

#[test]
fn test_federated_project_without_georeference_fails() {
    let (_tmp, store) = store_with_project();
    let mut payload = conformant_payload();
    payload["has_georeference"] = json!(false);

    let outcome = run(&store, &payload);
    assert_eq!(status_of(&outcome, "georeference_present"), CheckStatus::Fail);
    assert_eq!(outcome.summary.overall_status, CheckStatus::Fail);
}

#[test]
fn test_category_scenarios() {
    let (_tmp, store) = store_with_project();

    let mut payload = conformant_payload();
    payload["categories"] = json!([]);
    let outcome = run(&store, &payload);
    assert_eq!(status_of(&outcome, "element_categories_present"), CheckStatus::Fail);

    payload["categories"] = json!([{"name": "Walls", "element_count": 0}]);
    let outcome = run(&store, &payload);
    assert_eq!(
        status_of(&outcome, "element_categories_present"),
        CheckStatus::Warning
    );
}

#[test]
fn test_all_checks_pass() {
    let (_tmp, store) = store_with_project();
    let outcome = run(&store, &conformant_payload());

    assert!(
        outcome.checks.iter().all(|c| c.status == CheckStatus::Pass),
        "{:#?}",
        outcome.checks
    );
    assert_eq!(outcome.summary.overall_status, CheckStatus::Pass);
    assert_eq!(outcome.summary.fail_count, 0);
    assert_eq!(outcome.summary.warning_count, 0);
    assert!(outcome.report_markdown.contains("Overall status: PASS"));
}

#[test]
fn test_legacy_payload_is_accepted() {
    let (_tmp, store) = store_with_project();
    let payload = json!({
        "source": "revit",
        "disciplines_present": ["architecture", "structure"],
        "element_categories": "Walls: 120; Floors: 14",
        "has_georeferencing": true,
        "coordinate_system": "Stereo 70",
        "exchange_formats_available": ["ifc4_3"],
        "lod_info_available": true
    });

    let outcome = run(&store, &payload);
    assert_eq!(outcome.summary.overall_status, CheckStatus::Pass);
}

#[test]
fn test_huge_element_counts_do_not_overflow() {
    let (_tmp, store) = store_with_project();
    let mut payload = conformant_payload();
    payload["categories"] = json!([
        {"name": "A", "element_count": i64::MAX},
        {"name": "B", "element_count": i64::MAX},
        {"name": "C", "element_count": i64::MAX}
    ]);

    let outcome = run(&store, &payload);
    assert_eq!(
        status_of(&outcome, "element_categories_present"),
        CheckStatus::Pass
    );
    assert!(outcome.report_markdown.contains(&u64::MAX.to_string()));
}

// ============================================================================
// Summary Invariants
// ============================================================================

#[test]
fn test_counts_add_up_and_precedence_holds() {
    let (_tmp, store) = store_with_project();
    let payloads = [
        conformant_payload(),
        json!({
            "source": "archicad",
            "disciplines_present": ["architecture"],
            "categories": [{"name": "Walls", "element_count": 0}],
            "has_georeference": false,
            "exchange_formats_available": ["dwg"]
        }),
        json!({
            "disciplines_present": ["architecture", "structure", "mep"],
            "categories": [{"name": "Ducts", "element_count": 3}],
            "has_georeference": true,
            "exchange_formats_available": ["ifc2x3"]
        }),
    ];

    for payload in &payloads {
        let outcome = run(&store, payload);
        let s = &outcome.summary;
        assert_eq!(s.total_checks, outcome.checks.len());
        assert_eq!(s.pass_count + s.warning_count + s.fail_count, s.total_checks);

        let expected = if s.fail_count > 0 {
            CheckStatus::Fail
        } else if s.warning_count > 0 {
            CheckStatus::Warning
        } else {
            CheckStatus::Pass
        };
        assert_eq!(s.overall_status, expected);
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let (_tmp, store) = store_with_project();
    let mut payload = conformant_payload();
    payload["disciplines_present"] = json!(["architecture"]);
    payload["notes"] = json!("Coordination export");

    let first = run(&store, &payload);
    let second = run(&store, &payload);
    assert_eq!(first, second);
    assert_eq!(first.report_markdown, second.report_markdown);
}

#[test]
fn test_check_order_is_stable() {
    let (_tmp, store) = store_with_project();
    let outcome = run(&store, &conformant_payload());
    let ids: Vec<_> = outcome.checks.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "model_source_recognized",
            "disciplines_coverage",
            "exchange_format_match",
            "georeference_present",
            "lod_info_available",
            "element_categories_present",
        ]
    );
}

#[test]
fn test_stricter_policy_turns_warning_into_fail() {
    let (_tmp, store) = store_with_project();
    let mut payload = conformant_payload();
    payload["disciplines_present"] = json!(["architecture", "mep"]);

    let record = store.load("SJ-01").unwrap();
    let lenient = Verifier::new(RulePolicy {
        discipline_majority_threshold: 0.0,
    })
    .verify(record.as_ref(), "SJ-01", &payload)
    .unwrap();
    let default = Verifier::default()
        .verify(record.as_ref(), "SJ-01", &payload)
        .unwrap();

    // One of two declared disciplines: above 0.0, not above 0.5
    assert_eq!(status_of(&lenient, "disciplines_coverage"), CheckStatus::Warning);
    assert_eq!(status_of(&default, "disciplines_coverage"), CheckStatus::Fail);
}

// ============================================================================
// Error Paths
// ============================================================================

#[test]
fn test_unknown_project_is_not_found() {
    let (_tmp, store) = store_with_project();
    let record = store.load("XX-99").unwrap();
    assert!(record.is_none());

    let err = Verifier::default()
        .verify(record.as_ref(), "XX-99", &conformant_payload())
        .unwrap_err();
    assert!(matches!(err, VerifyError::NotFound(_)));
    assert!(err.is_client_error());
}

#[test]
fn test_project_without_bep_is_not_found() {
    let tmp = TempDir::new().unwrap();
    seed_project(tmp.path(), "SJ-02", CONTEXT_YAML, None);
    let store = ProjectStore::new(tmp.path());

    let record = store.load("SJ-02").unwrap();
    assert_eq!(record.as_ref().map(|r| r.status()), Some(ProjectStatus::ContextDefined));

    let err = Verifier::default()
        .verify(record.as_ref(), "SJ-02", &conformant_payload())
        .unwrap_err();
    assert!(matches!(err, VerifyError::NotFound(_)));
}

#[test]
fn test_invalid_payload_is_rejected() {
    let (_tmp, store) = store_with_project();
    let record = store.load("SJ-01").unwrap();

    let err = Verifier::default()
        .verify(
            record.as_ref(),
            "SJ-01",
            &json!({"disciplines_present": [], "categories": "Walls"}),
        )
        .unwrap_err();
    assert!(matches!(err, VerifyError::Validation(_)));
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_saved_records_appear_in_history() {
    let (_tmp, store) = store_with_project();
    let reports = TempDir::new().unwrap();
    let writer = FileReportWriter::new(OutputConfig {
        reports_dir: reports.path().to_path_buf(),
    });

    let record = store.load("SJ-01").unwrap().unwrap();
    let previous = record.status();
    assert_eq!(previous, ProjectStatus::BepGenerated);

    let mut failing = conformant_payload();
    failing["has_georeference"] = json!(false);
    let runs = [
        (failing, "2026-03-17T10:00:00+00:00"),
        (conformant_payload(), "2026-03-18T09:30:00+00:00"),
    ];

    for (payload, at) in &runs {
        let outcome = Verifier::default()
            .verify(Some(&record), "SJ-01", payload)
            .unwrap();
        let saved = VerificationRecord::new("SJ-01", &outcome, previous, at.to_string());
        let path = writer.write_record(&saved).await.unwrap();
        assert!(path.exists());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            outcome.report_markdown
        );
    }

    let history = writer.history("SJ-01").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].verified_at, "2026-03-18T09:30:00+00:00");
    assert_eq!(history[0].project_status, ProjectStatus::BepVerifiedOk);
    assert_eq!(history[1].project_status, ProjectStatus::BepVerifiedPartial);
    assert_eq!(history[1].summary_status, CheckStatus::Fail);
    assert_eq!(history[1].title, "BEP verification report - SJ-01");
}

#[tokio::test]
async fn test_history_is_per_project_code() {
    let (_tmp, store) = store_with_project();
    let reports = TempDir::new().unwrap();
    let writer = FileReportWriter::new(OutputConfig {
        reports_dir: reports.path().to_path_buf(),
    });

    let record = store.load("SJ-01").unwrap().unwrap();
    let outcome = Verifier::default()
        .verify(Some(&record), "SJ-01", &conformant_payload())
        .unwrap();
    let saved = VerificationRecord::new(
        "SJ.01",
        &outcome,
        ProjectStatus::BepGenerated,
        "2026-03-17T10:00:00+00:00".to_string(),
    );
    writer.write_record(&saved).await.unwrap();

    assert!(writer.history("SJ-01").await.unwrap().is_empty());
    assert!(writer.history("SJ 01").await.unwrap().is_empty());
    let own = writer.history("SJ.01").await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].project_code, "SJ.01");
}
