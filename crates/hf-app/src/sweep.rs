//! Parameter sweeps over the cycling solver.
//!
//! Each sweep point clones the scenario, applies one parameter value and runs
//! the full driver loop. Points are independent, so they run in parallel;
//! results always come back in input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::driver::{self, DriverReport};
use crate::error::{AppError, AppResult};
use crate::scenario::{BuildingRef, Mode, Scenario};

/// Which cycle input a sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleParameter {
    HpCapacityW,
    TargetLwtC,
    OvershootC,
    FluidVolumeL,
}

/// An evenly spaced sweep over one cycle parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepDefinition {
    pub parameter: CycleParameter,
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
}

impl SweepDefinition {
    /// The evenly spaced parameter values, start to end inclusive.
    pub fn values(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }
        let step = (self.end - self.start) / (self.num_points - 1) as f64;
        (0..self.num_points)
            .map(|i| self.start + step * i as f64)
            .collect()
    }
}

/// One sweep point: the applied value and the resulting report.
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub value: f64,
    pub report: DriverReport,
}

/// Run the cycle driver at every sweep value, in parallel.
///
/// The scenario must bind the Cycle mode.
pub fn run_sweep(scenario: &Scenario, sweep: &SweepDefinition) -> AppResult<Vec<SweepPoint>> {
    if !matches!(scenario.mode, Mode::Cycle { .. }) {
        return Err(AppError::InvalidInput(
            "parameter sweeps need a Cycle scenario".to_string(),
        ));
    }
    if sweep.num_points == 0 {
        return Err(AppError::InvalidInput(
            "sweep needs at least one point".to_string(),
        ));
    }

    sweep
        .values()
        .par_iter()
        .map(|&value| {
            let mut point = scenario.clone();
            apply_value(&mut point, sweep.parameter, value)?;
            let resolved = point.resolve()?;
            let report = driver::run_scenario(&resolved, None)?;
            Ok(SweepPoint { value, report })
        })
        .collect()
}

fn apply_value(point: &mut Scenario, parameter: CycleParameter, value: f64) -> AppResult<()> {
    if parameter == CycleParameter::FluidVolumeL {
        // The loop volume lives on the building, not the mode.
        let mut building = point.building.resolve()?;
        building.fluid_volume_l = Some(value);
        point.building = BuildingRef {
            preset: None,
            inline: Some(building),
            volumiser_l: None,
        };
        return Ok(());
    }
    if let Mode::Cycle {
        target_lwt_c,
        hp_capacity_w,
        overshoot_c,
        ..
    } = &mut point.mode
    {
        match parameter {
            CycleParameter::HpCapacityW => *hp_capacity_w = Some(value),
            CycleParameter::TargetLwtC => *target_lwt_c = value,
            CycleParameter::OvershootC => *overshoot_c = value,
            CycleParameter::FluidVolumeL => {}
        }
    }
    Ok(())
}
