//! Hourly target-temperature schedule.

use hf_core::ensure_finite;

use crate::error::{ModelError, ModelResult};

/// Hours in a schedule.
pub const HOURS_PER_DAY: usize = 24;

/// Thermostat set-point by hour of day: a step function, no interpolation.
/// Any fractional hour in [h, h+1) maps to the value at hour h.
#[derive(Debug, Clone)]
pub struct TargetSchedule {
    temps_c: [f64; HOURS_PER_DAY],
}

impl TargetSchedule {
    pub fn new(temps_c: &[f64]) -> ModelResult<Self> {
        if temps_c.len() != HOURS_PER_DAY {
            return Err(ModelError::InvalidCurve {
                what: "target schedule needs exactly 24 hourly values",
            });
        }
        let mut temps = [0.0; HOURS_PER_DAY];
        for (slot, v) in temps.iter_mut().zip(temps_c.iter()) {
            *slot = ensure_finite(*v, "target temperature")?;
        }
        Ok(Self { temps_c: temps })
    }

    /// Target at a (possibly fractional) hour of day in [0, 24).
    pub fn temp(&self, hr: f64) -> ModelResult<f64> {
        if !(0.0..24.0).contains(&hr) {
            return Err(ModelError::OutOfRange {
                what: "schedule hour",
                value: hr,
            });
        }
        Ok(self.temps_c[hr as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn moderate_burst() -> Vec<f64> {
        vec![
            14.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 12.0, 13.0, 15.0, 16.0, 14.0, 14.0, 14.0, 14.0,
            15.0, 15.0, 16.0, 16.0, 16.0, 17.0, 17.0, 16.0, 15.0,
        ]
    }

    #[test]
    fn integer_hours_index_directly() {
        let schedule = TargetSchedule::new(&moderate_burst()).unwrap();
        assert_eq!(schedule.temp(0.0).unwrap(), 14.0);
        assert_eq!(schedule.temp(7.0).unwrap(), 12.0);
        assert_eq!(schedule.temp(23.0).unwrap(), 15.0);
    }

    #[test]
    fn no_interpolation_across_the_hour() {
        let schedule = TargetSchedule::new(&moderate_burst()).unwrap();
        // Hour 6 is 5.0 and hour 7 jumps to 12.0; 6.999 must still read 5.0.
        assert_eq!(schedule.temp(6.999).unwrap(), 5.0);
        assert_eq!(schedule.temp(7.0).unwrap(), 12.0);
    }

    #[test]
    fn out_of_day_hours_are_rejected() {
        let schedule = TargetSchedule::new(&moderate_burst()).unwrap();
        assert!(schedule.temp(-0.5).is_err());
        assert!(schedule.temp(24.0).is_err());
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(TargetSchedule::new(&[16.0; 23]).is_err());
        assert!(TargetSchedule::new(&[16.0; 25]).is_err());
    }

    proptest! {
        #[test]
        fn step_function_law(hour in 0_usize..24, frac in 0.0_f64..0.999) {
            let schedule = TargetSchedule::new(&moderate_burst()).unwrap();
            let at_hour = schedule.temp(hour as f64).unwrap();
            let within = schedule.temp(hour as f64 + frac).unwrap();
            prop_assert_eq!(at_hour, within);
        }
    }
}
