//! Constant-flow-temperature daily simulation.
//!
//! The emitter runs all day at a caller-fixed flow temperature: no thermostat,
//! no COP, no electrical tracking. Useful for sizing the steady heat balance.

use hf_catalog::{AmbientDef, BuildingParameters};
use hf_core::{ensure_finite, ensure_positive, wh_to_kwh};
use hf_models::schedule::HOURS_PER_DAY;
use hf_models::{AmbientProfile, Emitter};

use crate::error::{SimError, SimResult};

/// Options for the constant-flow solver.
#[derive(Clone, Copy, Debug)]
pub struct ConstantFlowOptions {
    /// Simulation resolution (steps per hour).
    pub steps_per_hour: usize,
}

impl Default for ConstantFlowOptions {
    fn default() -> Self {
        Self { steps_per_hour: 6 }
    }
}

/// Convergence signals from one full-day pass.
#[derive(Clone, Copy, Debug)]
pub struct ConstantFlowPass {
    /// Largest absolute per-step room-temperature change (°C).
    pub max_temp_delta_c: f64,
    /// Mean absolute per-step room-temperature change (°C).
    pub mean_temp_delta_c: f64,
    /// Absolute change in the daily loss total (kWh).
    pub loss_delta_kwh: f64,
}

impl Default for ConstantFlowPass {
    fn default() -> Self {
        Self {
            max_temp_delta_c: f64::INFINITY,
            mean_temp_delta_c: f64::INFINITY,
            loss_delta_kwh: f64::INFINITY,
        }
    }
}

/// Per-step series for one simulated day. Fully overwritten by each pass.
#[derive(Clone, Debug, Default)]
pub struct ConstantFlowSeries {
    /// Step start times (hours from midnight).
    pub time_hr: Vec<f64>,
    /// Room temperature at the end of each step (°C).
    pub room_temp_c: Vec<f64>,
    /// Outdoor temperature (°C); fixed at construction.
    pub ambient_c: Vec<f64>,
    /// Heat lost to outside during each step (Wh).
    pub lost_wh: Vec<f64>,
    /// Heat emitted into the room during each step (Wh).
    pub emitted_wh: Vec<f64>,
}

/// Simulates 24 hours with the emitter held at one flow temperature.
#[derive(Debug)]
pub struct ConstantFlowSolver {
    heat_loss_w_per_k: f64,
    heat_capacity_wh_per_k: f64,
    steps_per_hour: usize,
    emitter: Emitter,
    current_temp_c: f64,
    iterations: usize,
    day_loss_kwh: f64,
    day_emitted_kwh: f64,
    last_pass: ConstantFlowPass,
    series: ConstantFlowSeries,
}

impl ConstantFlowSolver {
    pub fn new(
        building: &BuildingParameters,
        flow_temp_c: f64,
        dt_c: f64,
        ambient: &AmbientDef,
        initial_temp_c: f64,
        options: ConstantFlowOptions,
    ) -> SimResult<Self> {
        building.validate()?;
        ambient.validate()?;
        ensure_finite(flow_temp_c, "flow temperature")?;
        ensure_positive(dt_c, "flow-return dT")?;
        ensure_finite(initial_temp_c, "initial room temperature")?;
        if options.steps_per_hour == 0 {
            return Err(SimError::InvalidArg {
                what: "steps_per_hour must be positive",
            });
        }

        let emitter = Emitter::new(building.emitter_std_power_w, flow_temp_c, dt_c)?;
        let profile = AmbientProfile::new(&ambient.samples_c)?;

        let steps = HOURS_PER_DAY * options.steps_per_hour;
        let mut time_hr = Vec::with_capacity(steps);
        let mut ambient_series = Vec::with_capacity(steps);
        for i in 0..steps {
            let t_hr = i as f64 / options.steps_per_hour as f64;
            time_hr.push(t_hr);
            ambient_series.push(profile.temp(t_hr)?);
        }

        Ok(Self {
            heat_loss_w_per_k: building.heat_loss_factor_w_per_k,
            heat_capacity_wh_per_k: building.heat_capacity_wh_per_k(),
            steps_per_hour: options.steps_per_hour,
            emitter,
            current_temp_c: initial_temp_c,
            iterations: 0,
            day_loss_kwh: 0.0,
            day_emitted_kwh: 0.0,
            last_pass: ConstantFlowPass::default(),
            series: ConstantFlowSeries {
                time_hr,
                room_temp_c: vec![initial_temp_c; steps],
                ambient_c: ambient_series,
                lost_wh: vec![0.0; steps],
                emitted_wh: vec![0.0; steps],
            },
        })
    }

    /// Advance the simulation through one whole day.
    pub fn iterate(&mut self) -> ConstantFlowPass {
        let dt_hr = 1.0 / self.steps_per_hour as f64;
        let steps = self.series.time_hr.len();
        let mut max_delta = 0.0f64;
        let mut delta_sum = 0.0;
        let mut day_loss_wh = 0.0;
        let mut day_emitted_wh = 0.0;

        for i in 0..steps {
            let ambient = self.series.ambient_c[i];
            let lost_wh = self.heat_loss_w_per_k * (self.current_temp_c - ambient) * dt_hr;
            let emitted_wh = self.emitter.output(self.current_temp_c) * dt_hr;
            self.current_temp_c += (emitted_wh - lost_wh) / self.heat_capacity_wh_per_k;

            let delta = (self.current_temp_c - self.series.room_temp_c[i]).abs();
            max_delta = max_delta.max(delta);
            delta_sum += delta;

            self.series.room_temp_c[i] = self.current_temp_c;
            self.series.lost_wh[i] = lost_wh;
            self.series.emitted_wh[i] = emitted_wh;
            day_loss_wh += lost_wh;
            day_emitted_wh += emitted_wh;
        }

        let day_loss_kwh = wh_to_kwh(day_loss_wh);
        let pass = ConstantFlowPass {
            max_temp_delta_c: max_delta,
            mean_temp_delta_c: delta_sum / steps as f64,
            loss_delta_kwh: (day_loss_kwh - self.day_loss_kwh).abs(),
        };
        self.day_loss_kwh = day_loss_kwh;
        self.day_emitted_kwh = wh_to_kwh(day_emitted_wh);
        self.last_pass = pass;
        self.iterations += 1;
        pass
    }

    /// Per-step series recorded by the most recent pass.
    pub fn series(&self) -> &ConstantFlowSeries {
        &self.series
    }

    /// Heat-loss total of the most recent pass (kWh).
    pub fn day_loss_kwh(&self) -> f64 {
        self.day_loss_kwh
    }

    /// Emission total of the most recent pass (kWh).
    pub fn day_emitted_kwh(&self) -> f64 {
        self.day_emitted_kwh
    }

    /// Number of completed passes.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Room temperature after the most recent step (°C).
    pub fn current_temp_c(&self) -> f64 {
        self.current_temp_c
    }

    /// Signals from the most recent pass, or infinite deltas before the first.
    pub fn last_pass(&self) -> ConstantFlowPass {
        self.last_pass
    }
}
