//! Single compressor on/off cycle at fixed ambient temperature.

use hf_catalog::{BuildingParameters, PerformanceCurveDef};
use hf_core::{WATER_CP_J_PER_L_K, ensure_finite, ensure_non_negative, ensure_positive, j_to_wh};
use hf_models::{CopCurve, Emitter};

use crate::error::{SimError, SimResult};

/// Options for the single-cycle solver.
#[derive(Clone, Copy, Debug)]
pub struct CycleOptions {
    /// Leaving-water set point the compressor cycles around (°C).
    pub target_lwt_c: f64,
    /// Margin above the set point before the compressor stops (°C).
    pub overshoot_c: f64,
    /// Compressor heat output while running (W).
    pub hp_capacity_w: f64,
    /// Simulation resolution (steps per minute).
    pub steps_per_minute: usize,
    /// Hard budget on steps per cycle attempt.
    pub max_steps: usize,
}

impl CycleOptions {
    /// Options with the default overshoot, resolution and step budget.
    pub fn new(target_lwt_c: f64, hp_capacity_w: f64) -> Self {
        Self {
            target_lwt_c,
            overshoot_c: 5.0,
            hp_capacity_w,
            steps_per_minute: 10,
            max_steps: 1200,
        }
    }
}

/// Scalar results of one cycle attempt.
///
/// Durations stay `None` when the step budget ran out before the water
/// temperature closed the loop; that is a reportable outcome, not an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct CycleOutcome {
    /// Minutes spent heating, from start to the compressor stop.
    pub on_duration_min: Option<f64>,
    /// Minutes spent coasting back down to the cycle start temperature.
    pub off_duration_min: Option<f64>,
    /// Electrical energy drawn across the cycle (Wh).
    pub elec_wh: f64,
    /// Room-temperature change across the cycle, end minus start (°C).
    /// Its magnitude is the caller's convergence signal.
    pub room_delta_c: f64,
}

/// Per-step series for one cycle attempt. Fully overwritten by each attempt.
#[derive(Clone, Debug, Default)]
pub struct CycleSeries {
    /// Step start times (minutes from cycle start).
    pub time_min: Vec<f64>,
    /// Flow/water temperature after each step (°C).
    pub water_temp_c: Vec<f64>,
    /// Mean emitter water temperature, flow - ΔT/2 (°C).
    pub mean_water_c: Vec<f64>,
    /// Room temperature after each step (°C).
    pub room_temp_c: Vec<f64>,
    /// Electrical energy drawn during each step (Wh).
    pub elec_wh: Vec<f64>,
    /// COP at the step's water temperature while heating, `None` while coasting.
    pub cop: Vec<Option<f64>>,
    /// Emitter output during each step (W).
    pub emitter_w: Vec<f64>,
}

impl CycleSeries {
    fn clear(&mut self) {
        self.time_min.clear();
        self.water_temp_c.clear();
        self.mean_water_c.clear();
        self.room_temp_c.clear();
        self.elec_wh.clear();
        self.cop.clear();
        self.emitter_w.clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CyclePhase {
    Heating,
    Coasting,
}

/// Simulates exactly one heat-pump on/off cycle at the fixed ambient
/// temperature of its COP curve.
///
/// The water temperature starts each attempt at the lower cycle threshold
/// `target_lwt - ΔT`, heats until it exceeds `target_lwt + overshoot`, then
/// coasts back below the lower threshold. Room temperature carries over
/// between [`iterate`](Self::iterate) calls so repeated attempts settle
/// toward a steady cycle.
#[derive(Debug)]
pub struct SingleCycleSolver {
    heat_loss_w_per_k: f64,
    heat_capacity_wh_per_k: f64,
    fluid_heat_capacity_j_per_k: f64,
    ambient_c: f64,
    dt_c: f64,
    options: CycleOptions,
    emitter: Emitter,
    cop_curve: CopCurve,
    current_temp_c: f64,
    iterations: usize,
    outcome: CycleOutcome,
    series: CycleSeries,
}

impl SingleCycleSolver {
    /// Build a solver for one building/curve combination.
    ///
    /// `performance` must be a curve fitted against leaving-water temperature,
    /// and the building must carry a fluid volume.
    pub fn new(
        building: &BuildingParameters,
        performance: &PerformanceCurveDef,
        initial_temp_c: f64,
        options: CycleOptions,
    ) -> SimResult<Self> {
        building.validate()?;
        performance.validate()?;
        ensure_finite(initial_temp_c, "initial room temperature")?;
        ensure_finite(options.target_lwt_c, "target LWT")?;
        ensure_non_negative(options.overshoot_c, "overshoot")?;
        ensure_positive(options.hp_capacity_w, "hp_capacity")?;
        if options.steps_per_minute == 0 {
            return Err(SimError::InvalidArg {
                what: "steps_per_minute must be positive",
            });
        }
        if options.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }

        let fluid_volume_l = building.fluid_volume_l.ok_or(SimError::InvalidArg {
            what: "cycle simulation needs a building fluid volume",
        })?;

        let (ambient_c, dt_c, cop_curve) = match performance {
            PerformanceCurveDef::VsFlowTemp {
                ambient_c,
                dt_c,
                lwt_c,
                cop,
                ..
            } => (*ambient_c, *dt_c, CopCurve::new(lwt_c, cop)?),
            PerformanceCurveDef::VsAmbient { .. } => {
                return Err(SimError::InvalidArg {
                    what: "cycle simulation needs a COP curve fitted against leaving-water \
                           temperature",
                });
            }
        };
        let emitter = Emitter::new(building.emitter_std_power_w, options.target_lwt_c, dt_c)?;

        Ok(Self {
            heat_loss_w_per_k: building.heat_loss_factor_w_per_k,
            heat_capacity_wh_per_k: building.heat_capacity_wh_per_k(),
            fluid_heat_capacity_j_per_k: WATER_CP_J_PER_L_K * fluid_volume_l,
            ambient_c,
            dt_c,
            options,
            emitter,
            cop_curve,
            current_temp_c: initial_temp_c,
            iterations: 0,
            outcome: CycleOutcome::default(),
            series: CycleSeries::default(),
        })
    }

    /// Run one cycle attempt.
    pub fn iterate(&mut self) -> CycleOutcome {
        let dt_min = 1.0 / self.options.steps_per_minute as f64;
        let dt_s = 60.0 * dt_min;
        let dt_hr = dt_min / 60.0;
        let lower_c = self.options.target_lwt_c - self.dt_c;
        let upper_c = self.options.target_lwt_c + self.options.overshoot_c;

        let start_temp_c = self.current_temp_c;
        let mut water_c = lower_c;
        let mut phase = CyclePhase::Heating;
        let mut on_at_min = None;
        let mut durations = None;
        let mut elec_total_wh = 0.0;

        self.series.clear();

        let mut step = 0;
        while step < self.options.max_steps {
            let t_min = step as f64 * dt_min;

            let (energy_in_j, cop) = match phase {
                CyclePhase::Heating => (
                    dt_s * self.options.hp_capacity_w,
                    Some(self.cop_curve.cop(water_c)),
                ),
                CyclePhase::Coasting => (0.0, None),
            };
            let elec_wh = match cop {
                Some(cop) => j_to_wh(energy_in_j) / cop,
                None => 0.0,
            };

            let emitter_w = self.emitter.output_at_flow(self.current_temp_c, water_c);
            let energy_out_j = dt_s * emitter_w;
            water_c += (energy_in_j - energy_out_j) / self.fluid_heat_capacity_j_per_k;

            let lost_wh = self.heat_loss_w_per_k * (self.current_temp_c - self.ambient_c) * dt_hr;
            let emitted_wh = emitter_w * dt_hr;
            self.current_temp_c += (emitted_wh - lost_wh) / self.heat_capacity_wh_per_k;

            elec_total_wh += elec_wh;

            self.series.time_min.push(t_min);
            self.series.water_temp_c.push(water_c);
            self.series.mean_water_c.push(water_c - self.dt_c / 2.0);
            self.series.room_temp_c.push(self.current_temp_c);
            self.series.elec_wh.push(elec_wh);
            self.series.cop.push(cop);
            self.series.emitter_w.push(emitter_w);

            step += 1;

            match phase {
                CyclePhase::Heating if water_c > upper_c => {
                    phase = CyclePhase::Coasting;
                    on_at_min = Some(step as f64 * dt_min);
                }
                CyclePhase::Coasting if water_c < lower_c => {
                    if let Some(on_min) = on_at_min {
                        durations = Some((on_min, step as f64 * dt_min - on_min));
                    }
                    break;
                }
                _ => {}
            }
        }

        let (on_duration_min, off_duration_min) = match durations {
            Some((on, off)) => (Some(on), Some(off)),
            None => (None, None),
        };
        self.outcome = CycleOutcome {
            on_duration_min,
            off_duration_min,
            elec_wh: elec_total_wh,
            room_delta_c: self.current_temp_c - start_temp_c,
        };
        self.iterations += 1;
        self.outcome
    }

    /// Per-step series recorded by the most recent attempt.
    pub fn series(&self) -> &CycleSeries {
        &self.series
    }

    /// Scalars from the most recent attempt.
    pub fn outcome(&self) -> CycleOutcome {
        self.outcome
    }

    /// Number of completed attempts.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Room temperature after the most recent step (°C).
    pub fn current_temp_c(&self) -> f64 {
        self.current_temp_c
    }

    /// The fixed ambient temperature the cycle runs against (°C).
    pub fn ambient_c(&self) -> f64 {
        self.ambient_c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kitchen_with_loop() -> BuildingParameters {
        BuildingParameters {
            heat_loss_factor_w_per_k: 88.0,
            emitter_std_power_w: 4500.0,
            thermal_mass_kj_per_m2_k: 150.0,
            floor_area_m2: 28.0,
            fluid_volume_l: Some(57.0),
        }
    }

    fn amb7_curve() -> PerformanceCurveDef {
        PerformanceCurveDef::VsFlowTemp {
            ambient_c: 7.0,
            dt_c: 5.0,
            lwt_c: vec![25.0, 35.0, 40.0, 45.0, 50.0, 55.0],
            cop: vec![5.95, 5.20, 4.45, 3.75, 3.20, 2.65],
            capacity_w: 3100.0,
        }
    }

    #[test]
    fn missing_fluid_volume_is_rejected() {
        let building = BuildingParameters {
            fluid_volume_l: None,
            ..kitchen_with_loop()
        };
        let err = SingleCycleSolver::new(
            &building,
            &amb7_curve(),
            14.0,
            CycleOptions::new(40.0, 2400.0),
        )
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }));
    }

    #[test]
    fn ambient_curve_is_rejected() {
        let curve = PerformanceCurveDef::VsAmbient {
            lwt_c: 40.0,
            dt_c: 5.0,
            ambient_c: vec![-7.0, 2.0, 7.0],
            cop: vec![2.40, 3.15, 4.20],
            capacity_w: 8500.0,
        };
        let err = SingleCycleSolver::new(
            &kitchen_with_loop(),
            &curve,
            14.0,
            CycleOptions::new(40.0, 2400.0),
        )
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }));
    }

    #[test]
    fn water_starts_at_lower_threshold() {
        let mut s = SingleCycleSolver::new(
            &kitchen_with_loop(),
            &amb7_curve(),
            14.0,
            CycleOptions::new(40.0, 2400.0),
        )
        .unwrap();
        s.iterate();
        // First recorded sample is one step past target_lwt - dT = 35.
        let first = s.series().water_temp_c[0];
        assert!(first > 35.0 && first < 35.5, "water started at {first}");
    }

    #[test]
    fn cycle_warms_the_room() {
        let mut s = SingleCycleSolver::new(
            &kitchen_with_loop(),
            &amb7_curve(),
            14.0,
            CycleOptions::new(40.0, 2400.0),
        )
        .unwrap();
        let outcome = s.iterate();
        assert!(outcome.room_delta_c > 0.0);
        assert!(outcome.elec_wh > 0.0);
        assert_eq!(s.iterations(), 1);

        // A second attempt starts from the warmer room.
        let before = s.current_temp_c();
        s.iterate();
        assert!(s.current_temp_c() > before);
    }

    #[test]
    fn undersized_compressor_never_completes() {
        let mut s = SingleCycleSolver::new(
            &kitchen_with_loop(),
            &amb7_curve(),
            14.0,
            CycleOptions::new(40.0, 500.0),
        )
        .unwrap();
        let outcome = s.iterate();
        assert!(outcome.on_duration_min.is_none());
        assert!(outcome.off_duration_min.is_none());
        assert_eq!(s.series().time_min.len(), 1200);
    }

    #[test]
    fn series_columns_stay_aligned() {
        let mut s = SingleCycleSolver::new(
            &kitchen_with_loop(),
            &amb7_curve(),
            14.0,
            CycleOptions::new(40.0, 2400.0),
        )
        .unwrap();
        s.iterate();
        let series = s.series();
        let n = series.time_min.len();
        assert!(n > 0);
        assert_eq!(series.water_temp_c.len(), n);
        assert_eq!(series.mean_water_c.len(), n);
        assert_eq!(series.room_temp_c.len(), n);
        assert_eq!(series.elec_wh.len(), n);
        assert_eq!(series.cop.len(), n);
        assert_eq!(series.emitter_w.len(), n);
    }
}
