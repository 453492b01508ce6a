//! Persisted result types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    /// RFC 3339 wall-clock time when the run finished.
    pub timestamp: String,
    pub mode: RunMode,
    pub solver_version: String,
    pub convergence: ConvergenceSummary,
    pub summary: RunSummary,
}

/// Which solver produced the run, with its resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode")]
pub enum RunMode {
    Daily {
        steps_per_hour: usize,
    },
    Cycle {
        steps_per_minute: usize,
        target_lwt_c: f64,
        hp_capacity_w: f64,
    },
    ConstantFlow {
        steps_per_hour: usize,
        flow_temp_c: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceSummary {
    pub iterations: usize,
    pub converged: bool,
    /// Largest per-step room-temperature change in the final pass (°C).
    /// Cycle runs store the cross-cycle room drift in both delta fields.
    pub max_temp_delta_c: f64,
    /// Mean per-step room-temperature change in the final pass (°C).
    pub mean_temp_delta_c: f64,
}

/// Mode-specific scalar results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RunSummary {
    Daily {
        elec_kwh: f64,
        heating_hours: f64,
        mean_cop: Option<f64>,
        min_room_c: f64,
        max_room_c: f64,
    },
    Cycle {
        on_duration_min: Option<f64>,
        off_duration_min: Option<f64>,
        duty: Option<f64>,
        starts_per_hour: Option<f64>,
        elec_wh: f64,
        mean_input_w: Option<f64>,
        mean_cop: Option<f64>,
        room_delta_c: f64,
        thermostat_period_hr: Option<f64>,
    },
    ConstantFlow {
        loss_kwh: f64,
        emitted_kwh: f64,
        min_room_c: f64,
        max_room_c: f64,
    },
}

/// One simulation step. `time` is hours from midnight for the daily modes and
/// minutes from cycle start for cycle runs; absent columns stay `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeseriesRecord {
    pub time: f64,
    pub room_temp_c: f64,
    pub ambient_c: Option<f64>,
    pub target_c: Option<f64>,
    pub elec_wh: Option<f64>,
    pub cop: Option<f64>,
    pub water_temp_c: Option<f64>,
    pub mean_water_c: Option<f64>,
    pub emitter_w: Option<f64>,
    pub lost_wh: Option<f64>,
    pub emitted_wh: Option<f64>,
}

impl TimeseriesRecord {
    pub fn daily(
        time_hr: f64,
        room_temp_c: f64,
        ambient_c: f64,
        target_c: f64,
        elec_wh: f64,
        cop: Option<f64>,
    ) -> Self {
        Self {
            time: time_hr,
            room_temp_c,
            ambient_c: Some(ambient_c),
            target_c: Some(target_c),
            elec_wh: Some(elec_wh),
            cop,
            water_temp_c: None,
            mean_water_c: None,
            emitter_w: None,
            lost_wh: None,
            emitted_wh: None,
        }
    }

    pub fn cycle(
        time_min: f64,
        room_temp_c: f64,
        water_temp_c: f64,
        mean_water_c: f64,
        elec_wh: f64,
        cop: Option<f64>,
        emitter_w: f64,
    ) -> Self {
        Self {
            time: time_min,
            room_temp_c,
            ambient_c: None,
            target_c: None,
            elec_wh: Some(elec_wh),
            cop,
            water_temp_c: Some(water_temp_c),
            mean_water_c: Some(mean_water_c),
            emitter_w: Some(emitter_w),
            lost_wh: None,
            emitted_wh: None,
        }
    }

    pub fn constant_flow(
        time_hr: f64,
        room_temp_c: f64,
        ambient_c: f64,
        lost_wh: f64,
        emitted_wh: f64,
    ) -> Self {
        Self {
            time: time_hr,
            room_temp_c,
            ambient_c: Some(ambient_c),
            target_c: None,
            elec_wh: None,
            cop: None,
            water_temp_c: None,
            mean_water_c: None,
            emitter_w: None,
            lost_wh: Some(lost_wh),
            emitted_wh: Some(emitted_wh),
        }
    }
}
