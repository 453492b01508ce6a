//! Run execution and caching service.

use std::path::Path;
use std::time::Instant;

use hf_results::{RunManifest, RunMode, RunStore, TimeseriesRecord};
use tracing::{debug, info};

use crate::driver::{self, DriverProgressEvent};
use crate::error::{AppError, AppResult};
use crate::scenario::{self, ResolvedMode, ResolvedScenario, Scenario};

/// Options for executing runs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: "0.1.0".to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub scenario_path: &'a Path,
    /// Directory whose `.heatflow/runs/` tree caches results.
    pub store_dir: &'a Path,
    pub options: RunOptions,
}

/// Concise timing summary for a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub solve_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Execute or load a run and stream driver progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    progress_cb: Option<&mut dyn FnMut(DriverProgressEvent)>,
) -> AppResult<RunResponse> {
    let loaded = scenario::load_yaml(request.scenario_path)?;
    ensure_scenario_run(&loaded, request.store_dir, &request.options, progress_cb)
}

/// Execute or load a run for an already-loaded scenario.
pub fn ensure_scenario_run(
    scenario: &Scenario,
    store_dir: &Path,
    options: &RunOptions,
    progress_cb: Option<&mut dyn FnMut(DriverProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    let run_id = hf_results::compute_run_id(scenario, &options.solver_version);
    let store = RunStore::for_dir(store_dir)?;

    if options.use_cache && store.has_run(&run_id) {
        debug!("run cache hit for {}", run_id);
        let load_started = Instant::now();
        let manifest = store.load_manifest(&run_id)?;
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.total_time_s = started.elapsed().as_secs_f64();
        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            timing,
        });
    }

    let resolved = scenario.resolve()?;

    info!("executing run {} for scenario '{}'", run_id, scenario.name);
    let solve_started = Instant::now();
    let report = driver::run_scenario(&resolved, progress_cb)?;
    timing.solve_time_s = solve_started.elapsed().as_secs_f64();

    let manifest = RunManifest {
        run_id: run_id.clone(),
        scenario_name: scenario.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        mode: results_mode(&resolved),
        solver_version: options.solver_version.clone(),
        convergence: report.convergence.clone(),
        summary: report.summary.clone(),
    };

    let save_started = Instant::now();
    store.save_run(&manifest, &report.records)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        timing,
    })
}

fn results_mode(resolved: &ResolvedScenario) -> RunMode {
    match &resolved.mode {
        ResolvedMode::Daily { options, .. } => RunMode::Daily {
            steps_per_hour: options.steps_per_hour,
        },
        ResolvedMode::Cycle { options, .. } => RunMode::Cycle {
            steps_per_minute: options.steps_per_minute,
            target_lwt_c: options.target_lwt_c,
            hp_capacity_w: options.hp_capacity_w,
        },
        ResolvedMode::ConstantFlow {
            flow_temp_c,
            options,
            ..
        } => RunMode::ConstantFlow {
            steps_per_hour: options.steps_per_hour,
            flow_temp_c: *flow_temp_c,
        },
    }
}

/// List all cached runs under a store directory.
pub fn list_runs(store_dir: &Path) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_dir(store_dir)?;
    Ok(store.list_runs()?)
}

/// Load a cached run's manifest and timeseries.
pub fn load_run(store_dir: &Path, run_id: &str) -> AppResult<(RunManifest, Vec<TimeseriesRecord>)> {
    let store = RunStore::for_dir(store_dir)?;
    if !store.has_run(run_id) {
        return Err(AppError::RunNotFound(run_id.to_string()));
    }
    let manifest = store.load_manifest(run_id)?;
    let records = store.load_timeseries(run_id)?;
    Ok((manifest, records))
}
