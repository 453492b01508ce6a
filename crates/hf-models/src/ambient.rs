//! Periodic daily ambient temperature profile.

use crate::error::{ModelError, ModelResult};
use crate::spline::CurveFit;

/// Number of input samples covering one day.
pub const SAMPLES_PER_DAY: usize = 8;

/// Hours between consecutive samples.
pub const SAMPLE_SPACING_HR: f64 = 3.0;

/// Outdoor temperature over one day, fitted from 8 three-hourly samples
/// (hours 0, 3, ..., 21).
///
/// The first sample is repeated at hour 24 before fitting so the profile
/// closes on itself; repeated daily passes then see a continuous curve.
/// Extrapolation is disabled: hours outside [0, 24] are a contract violation.
#[derive(Debug, Clone)]
pub struct AmbientProfile {
    curve: CurveFit,
}

impl AmbientProfile {
    pub fn new(samples_c: &[f64]) -> ModelResult<Self> {
        if samples_c.len() != SAMPLES_PER_DAY {
            return Err(ModelError::InvalidCurve {
                what: "ambient profile needs exactly 8 three-hourly samples",
            });
        }
        let mut hours: Vec<f64> = (0..SAMPLES_PER_DAY)
            .map(|i| i as f64 * SAMPLE_SPACING_HR)
            .collect();
        let mut temps = samples_c.to_vec();
        hours.push(24.0);
        temps.push(samples_c[0]);
        let curve = CurveFit::new(hours, temps, false)?;
        Ok(Self { curve })
    }

    /// Temperature at a (possibly fractional) hour of day in [0, 24].
    pub fn temp(&self, hr: f64) -> ModelResult<f64> {
        if !self.curve.in_domain(hr) {
            return Err(ModelError::OutOfRange {
                what: "profile hour",
                value: hr,
            });
        }
        Ok(self.curve.eval(hr))
    }
}
