//! Full-day thermostatic simulation.

use hf_catalog::{AmbientDef, BuildingParameters, PerformanceCurveDef, TargetScheduleDef};
use hf_core::{ensure_finite, ensure_non_negative, wh_to_kwh};
use hf_models::schedule::HOURS_PER_DAY;
use hf_models::{AmbientProfile, CopCurve, Emitter, TargetSchedule};

use crate::error::{SimError, SimResult};

/// Options for the daily solver.
#[derive(Clone, Copy, Debug)]
pub struct DailyOptions {
    /// Simulation resolution (steps per hour).
    pub steps_per_hour: usize,
    /// Thermostat dead-band width (°C).
    pub hysteresis_c: f64,
    /// Constant passive heat gain applied every step (W).
    pub passive_gain_w: f64,
}

impl Default for DailyOptions {
    fn default() -> Self {
        Self {
            steps_per_hour: 6,
            hysteresis_c: 0.5,
            passive_gain_w: 0.0,
        }
    }
}

/// Convergence signals from one full-day pass.
///
/// Each pass is compared step-by-step against the room temperatures the
/// previous pass recorded at the same indices.
#[derive(Clone, Copy, Debug)]
pub struct DailyPass {
    /// Largest absolute per-step room-temperature change (°C).
    pub max_temp_delta_c: f64,
    /// Mean absolute per-step room-temperature change (°C).
    pub mean_temp_delta_c: f64,
    /// Absolute change in the daily electrical total (kWh).
    pub energy_delta_kwh: f64,
}

impl Default for DailyPass {
    fn default() -> Self {
        Self {
            max_temp_delta_c: f64::INFINITY,
            mean_temp_delta_c: f64::INFINITY,
            energy_delta_kwh: f64::INFINITY,
        }
    }
}

/// Per-step series for one simulated day. Fully overwritten by each pass.
#[derive(Clone, Debug, Default)]
pub struct DaySeries {
    /// Step start times (hours from midnight).
    pub time_hr: Vec<f64>,
    /// Room temperature at the end of each step (°C).
    pub room_temp_c: Vec<f64>,
    /// Outdoor temperature (°C); fixed at construction.
    pub ambient_c: Vec<f64>,
    /// Thermostat target (°C); fixed at construction.
    pub target_c: Vec<f64>,
    /// Electrical energy drawn during each step (Wh).
    pub elec_wh: Vec<f64>,
    /// COP while the heat pump ran, `None` for steps spent off.
    pub cop: Vec<Option<f64>>,
}

/// Simulates 24 hours of thermostatic heating at a fixed leaving-water
/// temperature, with hysteresis control.
///
/// One [`iterate`](Self::iterate) call advances the whole day once, carrying
/// the room temperature over from the previous call. Repeating the call is the
/// caller's convergence loop; the returned [`DailyPass`] is its stop signal.
#[derive(Debug)]
pub struct DailyCycleSolver {
    heat_loss_w_per_k: f64,
    heat_capacity_wh_per_k: f64,
    hysteresis_c: f64,
    passive_gain_w: f64,
    steps_per_hour: usize,
    emitter: Emitter,
    cop_curve: CopCurve,
    current_temp_c: f64,
    heating_on: bool,
    iterations: usize,
    day_energy_kwh: f64,
    last_pass: DailyPass,
    series: DaySeries,
}

impl DailyCycleSolver {
    /// Build a solver for one building/curve/profile/schedule combination.
    ///
    /// `performance` must be a curve fitted against ambient temperature; the
    /// ambient profile and target schedule are sampled once, here.
    pub fn new(
        building: &BuildingParameters,
        performance: &PerformanceCurveDef,
        ambient: &AmbientDef,
        targets: &TargetScheduleDef,
        initial_temp_c: f64,
        options: DailyOptions,
    ) -> SimResult<Self> {
        building.validate()?;
        performance.validate()?;
        ambient.validate()?;
        targets.validate()?;
        ensure_finite(initial_temp_c, "initial room temperature")?;
        ensure_non_negative(options.hysteresis_c, "hysteresis")?;
        ensure_finite(options.passive_gain_w, "passive gain")?;
        if options.steps_per_hour == 0 {
            return Err(SimError::InvalidArg {
                what: "steps_per_hour must be positive",
            });
        }

        let (flow_temp_c, emitter_dt_c, cop_curve) = match performance {
            PerformanceCurveDef::VsAmbient {
                lwt_c,
                dt_c,
                ambient_c,
                cop,
                ..
            } => (*lwt_c, *dt_c, CopCurve::new(ambient_c, cop)?),
            PerformanceCurveDef::VsFlowTemp { .. } => {
                return Err(SimError::InvalidArg {
                    what: "daily simulation needs a COP curve fitted against ambient temperature",
                });
            }
        };
        let emitter = Emitter::new(building.emitter_std_power_w, flow_temp_c, emitter_dt_c)?;

        let profile = AmbientProfile::new(&ambient.samples_c)?;
        let schedule = TargetSchedule::new(&targets.temps_c)?;
        let steps = HOURS_PER_DAY * options.steps_per_hour;
        let mut time_hr = Vec::with_capacity(steps);
        let mut ambient_series = Vec::with_capacity(steps);
        let mut target_series = Vec::with_capacity(steps);
        for i in 0..steps {
            let t_hr = i as f64 / options.steps_per_hour as f64;
            time_hr.push(t_hr);
            ambient_series.push(profile.temp(t_hr)?);
            target_series.push(schedule.temp(t_hr)?);
        }

        Ok(Self {
            heat_loss_w_per_k: building.heat_loss_factor_w_per_k,
            heat_capacity_wh_per_k: building.heat_capacity_wh_per_k(),
            hysteresis_c: options.hysteresis_c,
            passive_gain_w: options.passive_gain_w,
            steps_per_hour: options.steps_per_hour,
            emitter,
            cop_curve,
            current_temp_c: initial_temp_c,
            heating_on: false,
            iterations: 0,
            day_energy_kwh: 0.0,
            last_pass: DailyPass::default(),
            series: DaySeries {
                time_hr,
                room_temp_c: vec![initial_temp_c; steps],
                ambient_c: ambient_series,
                target_c: target_series,
                elec_wh: vec![0.0; steps],
                cop: vec![None; steps],
            },
        })
    }

    /// Advance the simulation through one whole day.
    pub fn iterate(&mut self) -> DailyPass {
        let dt_hr = 1.0 / self.steps_per_hour as f64;
        let steps = self.series.time_hr.len();
        let mut max_delta = 0.0f64;
        let mut delta_sum = 0.0;
        let mut day_energy_wh = 0.0;

        for i in 0..steps {
            let ambient = self.series.ambient_c[i];
            let target = self.series.target_c[i];

            // Asymmetric thermostat: cut out at the top of the band, re-arm
            // only once the room has fallen through the bottom.
            if self.current_temp_c >= target + self.hysteresis_c / 2.0 {
                self.heating_on = false;
            } else if !self.heating_on && target - self.current_temp_c > self.hysteresis_c / 2.0 {
                self.heating_on = true;
            }

            let lost_wh = self.heat_loss_w_per_k * (self.current_temp_c - ambient) * dt_hr;
            let (emitted_wh, elec_wh, cop) = if self.heating_on {
                let cop = self.cop_curve.cop(ambient);
                let emitted_wh = self.emitter.output(self.current_temp_c) * dt_hr;
                (emitted_wh, emitted_wh / cop, Some(cop))
            } else {
                (0.0, 0.0, None)
            };

            self.current_temp_c += (emitted_wh - lost_wh + self.passive_gain_w * dt_hr)
                / self.heat_capacity_wh_per_k;

            let delta = (self.current_temp_c - self.series.room_temp_c[i]).abs();
            max_delta = max_delta.max(delta);
            delta_sum += delta;

            self.series.room_temp_c[i] = self.current_temp_c;
            self.series.elec_wh[i] = elec_wh;
            self.series.cop[i] = cop;
            day_energy_wh += elec_wh;
        }

        let day_energy_kwh = wh_to_kwh(day_energy_wh);
        let pass = DailyPass {
            max_temp_delta_c: max_delta,
            mean_temp_delta_c: delta_sum / steps as f64,
            energy_delta_kwh: (day_energy_kwh - self.day_energy_kwh).abs(),
        };
        self.day_energy_kwh = day_energy_kwh;
        self.last_pass = pass;
        self.iterations += 1;
        pass
    }

    /// Per-step series recorded by the most recent pass.
    pub fn series(&self) -> &DaySeries {
        &self.series
    }

    /// Electrical energy total of the most recent pass (kWh).
    pub fn day_energy_kwh(&self) -> f64 {
        self.day_energy_kwh
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
    pub fn last_pass(&self) -> DailyPass {
        self.last_pass
    }
}
