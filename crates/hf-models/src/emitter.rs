//! Radiator/fan-coil emitter output model.

use hf_core::{ensure_finite, ensure_positive};

use crate::error::ModelResult;
use crate::spline::CurveFit;

/// Standard derating curve: emitter-to-room ΔT (°C) against fraction of rated
/// output. Ratings are quoted at ΔT = 50, where the factor is exactly 1.
const DERATING_DT_C: [f64; 11] = [
    0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0,
];
const DERATING_FRACTION: [f64; 11] = [
    0.0, 0.05, 0.123, 0.209, 0.304, 0.406, 0.515, 0.629, 0.748, 0.872, 1.0,
];

/// Heat emitter (radiator or fan coil) with output derated by the difference
/// between its mean water temperature and the room.
///
/// The derating spline is fitted once at construction, pre-scaled by the
/// rated power. Extrapolation past ΔT = 50 is deliberate and unguarded.
#[derive(Debug, Clone)]
pub struct Emitter {
    curve: CurveFit,
    flow_temp_c: f64,
    dt_c: f64,
}

impl Emitter {
    /// `rated_power_w` is the emitter's standard output at ΔT = 50;
    /// `dt_c` is the flow-minus-return temperature difference.
    pub fn new(rated_power_w: f64, flow_temp_c: f64, dt_c: f64) -> ModelResult<Self> {
        ensure_positive(rated_power_w, "emitter rated power")?;
        ensure_finite(flow_temp_c, "emitter flow temperature")?;
        ensure_finite(dt_c, "emitter flow-return dT")?;
        let ys: Vec<f64> = DERATING_FRACTION
            .iter()
            .map(|f| f * rated_power_w)
            .collect();
        let curve = CurveFit::new(DERATING_DT_C.to_vec(), ys, true)?;
        Ok(Self {
            curve,
            flow_temp_c,
            dt_c,
        })
    }

    pub fn flow_temp_c(&self) -> f64 {
        self.flow_temp_c
    }

    /// Mean water temperature for the stored flow temperature.
    pub fn mean_water_temp_c(&self) -> f64 {
        self.flow_temp_c - self.dt_c / 2.0
    }

    /// Instantaneous output (W) into a room at `room_temp_c`, using the
    /// stored flow temperature.
    pub fn output(&self, room_temp_c: f64) -> f64 {
        let delta = self.mean_water_temp_c() - room_temp_c;
        self.curve.eval(delta)
    }

    /// Output (W) at an updated flow temperature. The new flow temperature
    /// replaces the stored one for this and all future calls.
    pub fn output_at_flow(&mut self, room_temp_c: f64, flow_temp_c: f64) -> f64 {
        self.flow_temp_c = flow_temp_c;
        self.output(room_temp_c)
    }
}
