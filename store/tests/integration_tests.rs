use audit_report_core::{Finding, aggregate_codes, summarize_page};
use audit_report_store::{RESULTS_FILE, ReporterConfig, RunState, STATISTICS_FILE};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn record_page(state: &mut RunState, url: &str, findings: Vec<Finding>) {
    let page = summarize_page(url, findings);
    state.append_statistics(page.statistics(chrono::Utc::now()));
    state.append_history(page.results);
}

// ---------------------------------------------------------------------------
// Cross-process history
// ---------------------------------------------------------------------------

#[test]
fn test_history_reloaded_in_fresh_state_aggregates_identically() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReporterConfig::new(dir.path());

    let mut state = RunState::new();
    record_page(
        &mut state,
        "https://a.test/",
        vec![
            Finding::new("X", "error", "https://a.test/"),
            Finding::new("Y", "warning", "https://a.test/"),
        ],
    );
    record_page(&mut state, "https://b.test/", vec![Finding::new("X", "error", "")]);
    state.save(&config.output_directory).unwrap();

    let live = aggregate_codes(state.history());
    drop(state);

    let loaded = RunState::load_history(&config.output_directory).unwrap();
    let reloaded = aggregate_codes(&loaded);
    assert_eq!(live, reloaded);
    assert_eq!(reloaded[0].code, "X");
    assert_eq!(reloaded[0].urls[1].url, "https://b.test/");
}

#[test]
fn test_snapshot_files_use_camel_case_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = RunState::new();
    record_page(
        &mut state,
        "https://a.test/",
        vec![Finding::new("WCAG2AA.Principle1.Guideline1_3.1_3_1.H42", "notice", "")],
    );
    state.save(dir.path()).unwrap();

    let stats = std::fs::read_to_string(dir.path().join(STATISTICS_FILE)).unwrap();
    assert!(stats.contains("\"noticeCount\":1"));
    assert!(stats.contains("\"errorCount\":0"));

    let results = std::fs::read_to_string(dir.path().join(RESULTS_FILE)).unwrap();
    assert!(results.contains("\"noteCodes\":[\"H42\"]"));
    assert!(results.starts_with("[["));
}

#[test]
fn test_empty_history_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    RunState::new().save(dir.path()).unwrap();

    let history = RunState::load_history(dir.path()).unwrap();
    assert!(history.is_empty());
    assert!(aggregate_codes(&history).is_empty());
    assert!(RunState::load_statistics(dir.path()).unwrap().is_empty());
}
