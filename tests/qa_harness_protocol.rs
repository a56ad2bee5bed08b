use std::fs;

use xbench::{
    ConfigEntry, HarnessError, Registry, Reporter, Runner, Selector, SuiteConfig, Verdict,
    Workload, standard_registry,
};

/// Helper to load the shipped smoke configuration
fn smoke_config() -> SuiteConfig {
    SuiteConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/test.json")).unwrap()
}

/// Helper to run a selection and capture stdout
fn run_selected(config: &SuiteConfig, filter: Option<&str>) -> (xbench::RunSummary, String) {
    let registry = standard_registry().unwrap();
    let mut runner = Runner::new(&registry, config, Reporter::new(Vec::new()));
    let summary = runner.run_all(&Selector::new(filter)).unwrap();
    let out = String::from_utf8(runner.into_reporter().into_inner()).unwrap();
    (summary, out)
}

#[test]
fn qa_tc_fannkuchredux_end_to_end() {
    let (summary, out) = run_selected(&smoke_config(), Some("Fannkuchredux"));

    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.results[0].name, "CLBG::Fannkuchredux");
    assert_eq!(summary.results[0].verdict, Verdict::Ok);
    assert_eq!(summary.exit_code(), 0);

    let first = out.lines().next().unwrap();
    assert!(first.starts_with("CLBG::Fannkuchredux: OK in "), "got: {first}");
    assert!(out.lines().last().unwrap().starts_with("Summary: "));
}

#[test]
fn qa_tc_full_smoke_suite_passes() {
    let (summary, out) = run_selected(&smoke_config(), None);

    let failed: Vec<_> = summary.results.iter().filter(|r| !r.passed()).collect();
    assert!(failed.is_empty(), "mismatches: {failed:?}");
    assert_eq!(summary.ok, 17);
    assert!(summary.skipped.is_empty());
    assert_eq!(summary.exit_code(), 0);
    assert!(out.contains("Summary: "));
    assert!(out.trim_end().ends_with(", 17, 17, 0"), "got: {out}");
}

#[test]
fn qa_tc_mismatch_is_reported_and_run_continues() {
    let config = SuiteConfig::from_json_str(
        r#"{
            "CLBG::Fannkuchredux": {"checksum": 1, "n": 5, "iterations": 3},
            "Etc::Primes": {"checksum": 2592496, "limit": 340000, "prefix": 32338, "iterations": 3}
        }"#,
    )
    .unwrap();
    let (summary, out) = run_selected(&config, None);

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.ok, 1);
    assert_ne!(summary.exit_code(), 0);
    assert!(out.contains("CLBG::Fannkuchredux: ERR[actual=4428, expected=1] in "));
    assert!(out.contains("Etc::Primes: OK in "));
    // everything else is unconfigured
    assert_eq!(summary.skipped.len(), 15);
}

#[test]
fn qa_tc_config_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suite.json");
    fs::write(
        &path,
        r#"{"Hash::CRC32": {"checksum": 3031698216, "size": 1000, "iterations": 3}}"#,
    )
    .unwrap();

    let config = SuiteConfig::load(&path).unwrap();
    let (summary, _) = run_selected(&config, Some("hash"));
    assert_eq!(summary.results.len(), 1);
    assert!(summary.all_passed());
    // Hash::SHA256 matches the filter but has no entry
    assert_eq!(summary.skipped, vec!["Hash::SHA256".to_string()]);
}

#[test]
fn qa_tc_missing_config_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = SuiteConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, HarnessError::ConfigRead { .. }));
}

#[test]
fn qa_tc_missing_field_is_fatal() {
    let config = SuiteConfig::from_json_str(r#"{"Etc::Primes": {"checksum": 1, "limit": 100}}"#).unwrap();
    let registry = standard_registry().unwrap();
    let mut runner = Runner::new(&registry, &config, Reporter::new(Vec::new()));

    let err = runner.run_all(&Selector::new(Some("Primes"))).unwrap_err();
    assert!(matches!(err, HarnessError::MissingField { ref field, .. } if field == "prefix"));
}

struct Noop;

impl Workload for Noop {
    fn run(&mut self, _rng: &mut xbench::Prng, _iteration: u64) {}

    fn checksum(&self) -> u32 {
        0
    }
}

#[test]
fn qa_tc_duplicate_registration_rejected() {
    let mut registry = standard_registry().unwrap();
    let err = registry
        .register("Sort::Quick", |_: &ConfigEntry| -> xbench::Result<Box<dyn Workload>> {
            Ok(Box::new(Noop))
        })
        .unwrap_err();
    assert!(matches!(err, HarnessError::DuplicateWorkload(ref name) if name == "Sort::Quick"));

    let mut fresh = Registry::new();
    fresh
        .register("Noop", |_: &ConfigEntry| -> xbench::Result<Box<dyn Workload>> {
            Ok(Box::new(Noop))
        })
        .unwrap();
    assert_eq!(fresh.len(), 1);
}
