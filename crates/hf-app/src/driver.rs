//! Convergence driver: the loop-until-settled policy around the solvers.
//!
//! The solvers expose single explicit transitions (`iterate`); how many times
//! to call them and when to stop is decided here. Daily and constant-flow
//! runs settle on the largest per-step room-temperature change between
//! passes; cycle runs settle on the room-temperature drift across one cycle.

use hf_catalog::{AmbientDef, BuildingParameters, PerformanceCurveDef, TargetScheduleDef};
use hf_results::{ConvergenceSummary, RunSummary, TimeseriesRecord};
use hf_sim::{
    ConstantFlowOptions, ConstantFlowPass, ConstantFlowSolver, CycleOptions, CycleOutcome,
    DailyCycleSolver, DailyOptions, DailyPass, SingleCycleSolver,
};
use tracing::{debug, info};

use crate::error::AppResult;
use crate::report;
use crate::scenario::{ConvergenceSpec, ResolvedMode, ResolvedScenario};

/// Stop policy for the iteration loop.
#[derive(Debug, Clone, Copy)]
pub struct ConvergencePolicy {
    /// Stop once the convergence signal falls to this level (°C).
    pub threshold: f64,
    /// Hard cap on solver iterations.
    pub max_iterations: usize,
}

impl From<ConvergenceSpec> for ConvergencePolicy {
    fn from(spec: ConvergenceSpec) -> Self {
        Self {
            threshold: spec.threshold,
            max_iterations: spec.max_iterations,
        }
    }
}

/// One event per driver iteration.
#[derive(Debug, Clone)]
pub struct DriverProgressEvent {
    pub iteration: usize,
    pub max_iterations: usize,
    /// Convergence signal after this iteration (°C).
    pub signal_c: f64,
    pub threshold_c: f64,
}

/// What a full driver loop produced.
#[derive(Debug, Clone)]
pub struct DriverReport {
    pub convergence: ConvergenceSummary,
    pub summary: RunSummary,
    /// Final-pass series, ready to persist.
    pub records: Vec<TimeseriesRecord>,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(DriverProgressEvent)>,
    iteration: usize,
    max_iterations: usize,
    signal_c: f64,
    threshold_c: f64,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(DriverProgressEvent {
            iteration,
            max_iterations,
            signal_c,
            threshold_c,
        });
    }
}

/// Run whatever mode the scenario binds, under its own convergence policy.
pub fn run_scenario(
    resolved: &ResolvedScenario,
    progress_cb: Option<&mut dyn FnMut(DriverProgressEvent)>,
) -> AppResult<DriverReport> {
    let policy = ConvergencePolicy::from(resolved.convergence);
    match &resolved.mode {
        ResolvedMode::Daily {
            performance,
            ambient,
            targets,
            initial_temp_c,
            options,
        } => run_daily(
            &resolved.building,
            performance,
            ambient,
            targets,
            *initial_temp_c,
            *options,
            policy,
            progress_cb,
        ),
        ResolvedMode::Cycle {
            performance,
            initial_temp_c,
            options,
        } => run_cycle(
            &resolved.building,
            performance,
            *initial_temp_c,
            *options,
            policy,
            progress_cb,
        ),
        ResolvedMode::ConstantFlow {
            flow_temp_c,
            dt_c,
            ambient,
            initial_temp_c,
            options,
        } => run_constant_flow(
            &resolved.building,
            *flow_temp_c,
            *dt_c,
            ambient,
            *initial_temp_c,
            *options,
            policy,
            progress_cb,
        ),
    }
}

/// Repeat the thermostatic day until the room-temperature passes agree.
#[allow(clippy::too_many_arguments)]
pub fn run_daily(
    building: &BuildingParameters,
    performance: &PerformanceCurveDef,
    ambient: &AmbientDef,
    targets: &TargetScheduleDef,
    initial_temp_c: f64,
    options: DailyOptions,
    policy: ConvergencePolicy,
    mut progress_cb: Option<&mut dyn FnMut(DriverProgressEvent)>,
) -> AppResult<DriverReport> {
    let mut solver = DailyCycleSolver::new(
        building,
        performance,
        ambient,
        targets,
        initial_temp_c,
        options,
    )?;

    let mut converged = false;
    let mut last = DailyPass::default();
    for iteration in 1..=policy.max_iterations {
        last = solver.iterate();
        debug!(
            "daily pass {}: max delta {:.4} C, mean delta {:.4} C",
            iteration, last.max_temp_delta_c, last.mean_temp_delta_c
        );
        emit_progress(
            &mut progress_cb,
            iteration,
            policy.max_iterations,
            last.max_temp_delta_c,
            policy.threshold,
        );
        if last.max_temp_delta_c <= policy.threshold {
            converged = true;
            break;
        }
    }
    info!(
        "daily run finished: converged={} after {} passes",
        converged,
        solver.iterations()
    );

    Ok(DriverReport {
        convergence: ConvergenceSummary {
            iterations: solver.iterations(),
            converged,
            max_temp_delta_c: last.max_temp_delta_c,
            mean_temp_delta_c: last.mean_temp_delta_c,
        },
        summary: report::daily_summary(&solver),
        records: report::daily_records(solver.series()),
    })
}

/// Repeat single cycles until the room stops drifting between them.
///
/// Incomplete cycles (step budget exhausted) are tolerated: the attempt
/// still counts, its drift still feeds the signal, and the summary reports
/// the missing durations.
pub fn run_cycle(
    building: &BuildingParameters,
    performance: &PerformanceCurveDef,
    initial_temp_c: f64,
    options: CycleOptions,
    policy: ConvergencePolicy,
    mut progress_cb: Option<&mut dyn FnMut(DriverProgressEvent)>,
) -> AppResult<DriverReport> {
    let mut solver = SingleCycleSolver::new(building, performance, initial_temp_c, options)?;

    let mut converged = false;
    let mut outcome = CycleOutcome::default();
    for iteration in 1..=policy.max_iterations {
        outcome = solver.iterate();
        let signal = outcome.room_delta_c.abs();
        debug!(
            "cycle attempt {}: room drift {:+.4} C, on={:?} min",
            iteration, outcome.room_delta_c, outcome.on_duration_min
        );
        emit_progress(
            &mut progress_cb,
            iteration,
            policy.max_iterations,
            signal,
            policy.threshold,
        );
        if signal <= policy.threshold {
            converged = true;
            break;
        }
    }
    info!(
        "cycle run finished: converged={} after {} attempts",
        converged,
        solver.iterations()
    );

    let signal = outcome.room_delta_c.abs();
    Ok(DriverReport {
        convergence: ConvergenceSummary {
            iterations: solver.iterations(),
            converged,
            max_temp_delta_c: signal,
            mean_temp_delta_c: signal,
        },
        summary: report::cycle_summary(&outcome, &options),
        records: report::cycle_records(solver.series()),
    })
}

/// Repeat the uncontrolled day until the room-temperature passes agree.
#[allow(clippy::too_many_arguments)]
pub fn run_constant_flow(
    building: &BuildingParameters,
    flow_temp_c: f64,
    dt_c: f64,
    ambient: &AmbientDef,
    initial_temp_c: f64,
    options: ConstantFlowOptions,
    policy: ConvergencePolicy,
    mut progress_cb: Option<&mut dyn FnMut(DriverProgressEvent)>,
) -> AppResult<DriverReport> {
    let mut solver = ConstantFlowSolver::new(
        building,
        flow_temp_c,
        dt_c,
        ambient,
        initial_temp_c,
        options,
    )?;

    let mut converged = false;
    let mut last = ConstantFlowPass::default();
    for iteration in 1..=policy.max_iterations {
        last = solver.iterate();
        debug!(
            "constant-flow pass {}: max delta {:.4} C, loss delta {:.4} kWh",
            iteration, last.max_temp_delta_c, last.loss_delta_kwh
        );
        emit_progress(
            &mut progress_cb,
            iteration,
            policy.max_iterations,
            last.max_temp_delta_c,
            policy.threshold,
        );
        if last.max_temp_delta_c <= policy.threshold {
            converged = true;
            break;
        }
    }
    info!(
        "constant-flow run finished: converged={} after {} passes",
        converged,
        solver.iterations()
    );

    Ok(DriverReport {
        convergence: ConvergenceSummary {
            iterations: solver.iterations(),
            converged,
            max_temp_delta_c: last.max_temp_delta_c,
            mean_temp_delta_c: last.mean_temp_delta_c,
        },
        summary: report::constant_flow_summary(&solver),
        records: report::constant_flow_records(solver.series()),
    })
}
