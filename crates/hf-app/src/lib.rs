//! Shared application service layer for heatflow.
//!
//! This crate provides a unified interface for frontends, centralizing
//! scenario loading, convergence driving, result summarising, run caching
//! and parameter sweeps.

pub mod driver;
pub mod error;
pub mod report;
pub mod run_service;
pub mod scenario;
pub mod sweep;

// Re-export key types for convenience
pub use driver::{
    run_constant_flow, run_cycle, run_daily, run_scenario, ConvergencePolicy, DriverProgressEvent,
    DriverReport,
};
pub use error::{AppError, AppResult};
pub use report::{extract_series, series_names};
pub use run_service::{
    ensure_run, ensure_run_with_progress, ensure_scenario_run, list_runs, load_run, RunOptions,
    RunRequest, RunResponse, RunTimingSummary,
};
pub use scenario::{
    load_yaml, AmbientRef, BuildingRef, ConvergenceSpec, CurveRef, Mode, ResolvedMode,
    ResolvedScenario, ScheduleRef, Scenario,
};
pub use sweep::{run_sweep, CycleParameter, SweepDefinition, SweepPoint};

// The results vocabulary flows through the service layer unchanged.
pub use hf_results::{ConvergenceSummary, RunManifest, RunMode, RunSummary, TimeseriesRecord};
