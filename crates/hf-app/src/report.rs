//! Result shaping: solver output to storable summaries and records, plus
//! series extraction for export.

use hf_results::{RunMode, RunSummary, TimeseriesRecord};
use hf_sim::{
    ConstantFlowSeries, ConstantFlowSolver, CycleOptions, CycleOutcome, CycleSeries,
    DailyCycleSolver, DaySeries,
};

use crate::error::{AppError, AppResult};

/// Scalar summary of a finished daily run.
pub fn daily_summary(solver: &DailyCycleSolver) -> RunSummary {
    let series = solver.series();
    let steps = series.time_hr.len();
    let dt_hr = 24.0 / steps as f64;

    let mut heating_steps = 0usize;
    let mut cop_sum = 0.0;
    let mut cop_count = 0usize;
    let mut min_room = f64::INFINITY;
    let mut max_room = f64::NEG_INFINITY;
    for i in 0..steps {
        if series.elec_wh[i] > 0.0 {
            heating_steps += 1;
        }
        if let Some(c) = series.cop[i] {
            cop_sum += c;
            cop_count += 1;
        }
        min_room = min_room.min(series.room_temp_c[i]);
        max_room = max_room.max(series.room_temp_c[i]);
    }

    RunSummary::Daily {
        elec_kwh: solver.day_energy_kwh(),
        heating_hours: heating_steps as f64 * dt_hr,
        mean_cop: if cop_count > 0 {
            Some(cop_sum / cop_count as f64)
        } else {
            None
        },
        min_room_c: min_room,
        max_room_c: max_room,
    }
}

/// Scalar summary of a finished cycle run.
///
/// An incomplete cycle (durations unset) yields `None` for every derived
/// figure; only the energy drawn and the room drift remain.
pub fn cycle_summary(outcome: &CycleOutcome, options: &CycleOptions) -> RunSummary {
    let mut duty = None;
    let mut starts_per_hour = None;
    let mut mean_input_w = None;
    let mut mean_cop = None;
    let mut thermostat_period_hr = None;

    if let (Some(on_min), Some(off_min)) = (outcome.on_duration_min, outcome.off_duration_min) {
        let cycle_min = on_min + off_min;
        let cycle_hr = cycle_min / 60.0;
        duty = Some(on_min / cycle_min);
        starts_per_hour = Some(60.0 / cycle_min);
        mean_input_w = Some(outcome.elec_wh / cycle_hr);
        let heat_wh = options.hp_capacity_w * on_min / 60.0;
        if outcome.elec_wh > 0.0 {
            mean_cop = Some(heat_wh / outcome.elec_wh);
        }
        // Hours the thermostat band buys per degree of room drift.
        if outcome.room_delta_c != 0.0 {
            thermostat_period_hr = Some(cycle_hr / outcome.room_delta_c.abs());
        }
    }

    RunSummary::Cycle {
        on_duration_min: outcome.on_duration_min,
        off_duration_min: outcome.off_duration_min,
        duty,
        starts_per_hour,
        elec_wh: outcome.elec_wh,
        mean_input_w,
        mean_cop,
        room_delta_c: outcome.room_delta_c,
        thermostat_period_hr,
    }
}

/// Scalar summary of a finished constant-flow run.
pub fn constant_flow_summary(solver: &ConstantFlowSolver) -> RunSummary {
    let series = solver.series();
    let mut min_room = f64::INFINITY;
    let mut max_room = f64::NEG_INFINITY;
    for &t in &series.room_temp_c {
        min_room = min_room.min(t);
        max_room = max_room.max(t);
    }

    RunSummary::ConstantFlow {
        loss_kwh: solver.day_loss_kwh(),
        emitted_kwh: solver.day_emitted_kwh(),
        min_room_c: min_room,
        max_room_c: max_room,
    }
}

/// Daily series to storable records, one per step.
pub fn daily_records(series: &DaySeries) -> Vec<TimeseriesRecord> {
    let mut records = Vec::with_capacity(series.time_hr.len());
    for i in 0..series.time_hr.len() {
        records.push(TimeseriesRecord::daily(
            series.time_hr[i],
            series.room_temp_c[i],
            series.ambient_c[i],
            series.target_c[i],
            series.elec_wh[i],
            series.cop[i],
        ));
    }
    records
}

/// Cycle series to storable records, one per step.
pub fn cycle_records(series: &CycleSeries) -> Vec<TimeseriesRecord> {
    let mut records = Vec::with_capacity(series.time_min.len());
    for i in 0..series.time_min.len() {
        records.push(TimeseriesRecord::cycle(
            series.time_min[i],
            series.room_temp_c[i],
            series.water_temp_c[i],
            series.mean_water_c[i],
            series.elec_wh[i],
            series.cop[i],
            series.emitter_w[i],
        ));
    }
    records
}

/// Constant-flow series to storable records, one per step.
pub fn constant_flow_records(series: &ConstantFlowSeries) -> Vec<TimeseriesRecord> {
    let mut records = Vec::with_capacity(series.time_hr.len());
    for i in 0..series.time_hr.len() {
        records.push(TimeseriesRecord::constant_flow(
            series.time_hr[i],
            series.room_temp_c[i],
            series.ambient_c[i],
            series.lost_wh[i],
            series.emitted_wh[i],
        ));
    }
    records
}

/// Exportable series names for a run mode.
pub fn series_names(mode: &RunMode) -> &'static [&'static str] {
    match mode {
        RunMode::Daily { .. } => &["room-temp", "ambient", "target", "elec", "cop"],
        RunMode::Cycle { .. } => &[
            "room-temp",
            "water-temp",
            "mean-water",
            "elec",
            "cop",
            "emitter",
        ],
        RunMode::ConstantFlow { .. } => &["room-temp", "ambient", "lost", "emitted"],
    }
}

/// Extract (time, value) pairs for a named series.
///
/// Steps where the column is absent (COP while coasting, for example) are
/// skipped.
pub fn extract_series(records: &[TimeseriesRecord], series: &str) -> AppResult<Vec<(f64, f64)>> {
    let mut points = Vec::with_capacity(records.len());
    for record in records {
        let value = match series {
            "room-temp" => Some(record.room_temp_c),
            "ambient" => record.ambient_c,
            "target" => record.target_c,
            "elec" => record.elec_wh,
            "cop" => record.cop,
            "water-temp" => record.water_temp_c,
            "mean-water" => record.mean_water_c,
            "emitter" => record.emitter_w,
            "lost" => record.lost_wh,
            "emitted" => record.emitted_wh,
            _ => {
                return Err(AppError::InvalidInput(format!(
                    "Unknown series: {}",
                    series
                )));
            }
        };
        if let Some(v) = value {
            points.push((record.time, v));
        }
    }
    Ok(points)
}
