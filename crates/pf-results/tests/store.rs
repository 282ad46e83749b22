use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use pf_project::CaseDef;
use pf_results::{ResultsError, RunStore, build_records, compute_run_id, surface_csv};
use pf_solver::run_case;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn small_case() -> CaseDef {
    let mut case = CaseDef::default();
    case.body.panels = 32;
    case.grid.density = 9;
    case
}

#[test]
fn save_list_load_roundtrip() {
    let case_dir = unique_temp_dir("pf_results_case");
    fs::create_dir_all(&case_dir).expect("failed to create temp case dir");
    let case_path = case_dir.join("case.yaml");

    let store = RunStore::for_case(&case_path).expect("failed to create run store");

    let case = small_case();
    let result = run_case(&case.to_flow_config()).expect("solve failed");
    let records = build_records(&case, &result, "0.1.0");
    let run_id = records.manifest.run_id.clone();
    assert_eq!(run_id, compute_run_id(&case, "0.1.0"));

    store.save_run(&records).expect("failed to save run");
    assert!(store.has_run(&run_id));

    let runs = store.list_runs().expect("failed to list runs");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].run_id, run_id);
    assert_eq!(runs[0].panel_count, 32);
    assert_eq!(runs[0].grid_points, 81);

    let loaded = store.load_run(&run_id).expect("failed to load run");
    assert_eq!(loaded.surface, records.surface);
    assert_eq!(loaded.outline.x.len(), 33);
    assert_eq!(loaded.field.u.len(), 81);
    assert!(loaded.summary.max_normal_residual < 1e-6);
    assert!(loaded.summary.sigma_sum.abs() < 1e-6);

    let csv = surface_csv(&loaded.surface);
    assert_eq!(csv.lines().count(), 33);

    store.delete_run(&run_id).expect("failed to delete run");
    assert!(!store.has_run(&run_id));
}

#[test]
fn missing_run_is_reported() {
    let store = RunStore::new(unique_temp_dir("pf_results_empty")).unwrap();
    assert!(matches!(
        store.load_manifest("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));
    assert!(store.list_runs().unwrap().is_empty());
}
