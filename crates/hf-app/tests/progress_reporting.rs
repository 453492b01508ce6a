//! Integration test: driver progress events and run timing.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use hf_app::{
    DriverProgressEvent, RunOptions, RunRequest, RunResponse, ensure_run_with_progress, load_run,
};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

const KITCHEN_YAML: &str = "\
name: kitchen-constant-flow
building:
  preset: kitchen
mode:
  type: ConstantFlow
  flow_temp_c: 40.0
  dt_c: 5.0
  ambient: winter
  initial_temp_c: 14.0
convergence:
  threshold: 0.05
  max_iterations: 10
";

fn write_scenario(dir: &Path) -> PathBuf {
    let path = dir.join("kitchen.yaml");
    fs::write(&path, KITCHEN_YAML).expect("failed to write scenario file");
    path
}

fn collect_events(request: &RunRequest<'_>) -> (RunResponse, Vec<DriverProgressEvent>) {
    let mut events = Vec::new();
    let response = ensure_run_with_progress(request, Some(&mut |event| events.push(event)))
        .expect("run with progress should succeed");
    (response, events)
}

#[test]
fn progress_events_track_driver_passes() {
    let base_dir = unique_temp_dir("hf_app_progress");
    fs::create_dir_all(&base_dir).expect("failed to create temp dir");
    let scenario_path = write_scenario(&base_dir);

    let request = RunRequest {
        scenario_path: &scenario_path,
        store_dir: &base_dir,
        options: RunOptions {
            use_cache: false,
            solver_version: "0.1.0".to_string(),
        },
    };

    let (response, events) = collect_events(&request);

    assert!(!response.loaded_from_cache);
    assert!(!events.is_empty(), "expected one event per driver pass");
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event.iteration, i + 1, "passes must be numbered from 1");
        assert_eq!(event.max_iterations, 10);
        assert_eq!(event.threshold_c, 0.05);
        assert!(event.signal_c.is_finite());
    }
    assert_eq!(events.len(), response.manifest.convergence.iterations);

    // The final event carries the signal the manifest records.
    let last = events.last().expect("at least one event");
    assert_eq!(last.signal_c, response.manifest.convergence.max_temp_delta_c);
    assert!(response.manifest.convergence.converged);
    assert!(last.signal_c <= 0.05);

    assert!(response.timing.total_time_s > 0.0);
    assert!(response.timing.solve_time_s > 0.0);
    assert_eq!(response.timing.load_cache_time_s, 0.0);

    let (_manifest, records) =
        load_run(&base_dir, &response.run_id).expect("fresh run should load back");
    assert_eq!(records.len(), 144);

    let _ = fs::remove_dir_all(&base_dir);
}

#[test]
fn cache_hit_skips_the_driver() {
    let base_dir = unique_temp_dir("hf_app_progress_cache");
    fs::create_dir_all(&base_dir).expect("failed to create temp dir");
    let scenario_path = write_scenario(&base_dir);

    let request = RunRequest {
        scenario_path: &scenario_path,
        store_dir: &base_dir,
        options: RunOptions::default(),
    };

    let (first, first_events) = collect_events(&request);
    assert!(!first.loaded_from_cache);
    assert!(!first_events.is_empty());

    let (second, second_events) = collect_events(&request);
    assert!(second.loaded_from_cache);
    assert_eq!(second.run_id, first.run_id);
    assert!(
        second_events.is_empty(),
        "cache hits must not re-run the driver"
    );
    assert_eq!(second.timing.solve_time_s, 0.0);

    let _ = fs::remove_dir_all(&base_dir);
}
