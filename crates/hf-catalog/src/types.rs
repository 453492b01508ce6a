//! Solver input definition records.

use hf_core::{ensure_finite, ensure_non_negative, ensure_positive};
use serde::{Deserialize, Serialize};

use crate::{CatalogError, CatalogResult};

/// Thermal characteristics of a heated space and its wet heating loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildingParameters {
    /// Whole-space heat loss per kelvin of inside-outside difference.
    pub heat_loss_factor_w_per_k: f64,
    /// Installed emitter output at the standard 50K emitter-room ΔT.
    pub emitter_std_power_w: f64,
    /// Fabric heat capacity per unit floor area, kJ/(m²·K).
    pub thermal_mass_kj_per_m2_k: f64,
    pub floor_area_m2: f64,
    /// Circulating water volume (pipes plus emitters), liters. Required by
    /// the cycling solver only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluid_volume_l: Option<f64>,
}

impl BuildingParameters {
    pub fn validate(&self) -> CatalogResult<()> {
        // Zero loss is admissible (a perfectly insulated space), negative is not.
        ensure_non_negative(self.heat_loss_factor_w_per_k, "heat_loss_factor")?;
        ensure_positive(self.emitter_std_power_w, "emitter_std_power")?;
        ensure_positive(self.thermal_mass_kj_per_m2_k, "thermal_mass_parameter")?;
        ensure_positive(self.floor_area_m2, "floor_area")?;
        if let Some(v) = self.fluid_volume_l {
            ensure_positive(v, "fluid_volume")?;
        }
        Ok(())
    }

    /// Fabric heat capacity of the whole space, Wh/K.
    pub fn heat_capacity_wh_per_k(&self) -> f64 {
        hf_core::heat_capacity_wh_per_k(self.thermal_mass_kj_per_m2_k, self.floor_area_m2)
    }
}

/// A COP datasheet fitted against one temperature variable with the other
/// held fixed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode")]
pub enum PerformanceCurveDef {
    /// COP against ambient temperature at a fixed leaving-water temperature.
    /// The daily thermostatic solver wants this mode.
    VsAmbient {
        lwt_c: f64,
        dt_c: f64,
        ambient_c: Vec<f64>,
        cop: Vec<f64>,
        capacity_w: f64,
    },
    /// COP against leaving-water temperature at a fixed ambient. The cycling
    /// solver wants this mode.
    VsFlowTemp {
        ambient_c: f64,
        dt_c: f64,
        lwt_c: Vec<f64>,
        cop: Vec<f64>,
        capacity_w: f64,
    },
}

impl PerformanceCurveDef {
    /// Flow-minus-return temperature difference.
    pub fn dt_c(&self) -> f64 {
        match self {
            Self::VsAmbient { dt_c, .. } | Self::VsFlowTemp { dt_c, .. } => *dt_c,
        }
    }

    /// Rated heat output the datasheet was taken at.
    pub fn capacity_w(&self) -> f64 {
        match self {
            Self::VsAmbient { capacity_w, .. } | Self::VsFlowTemp { capacity_w, .. } => *capacity_w,
        }
    }

    /// (independent temperatures, COP values).
    pub fn points(&self) -> (&[f64], &[f64]) {
        match self {
            Self::VsAmbient { ambient_c, cop, .. } => (ambient_c, cop),
            Self::VsFlowTemp { lwt_c, cop, .. } => (lwt_c, cop),
        }
    }

    pub fn validate(&self) -> CatalogResult<()> {
        let (temps, cops) = self.points();
        if temps.len() < 2 {
            return Err(CatalogError::InvalidValue {
                field: "cop points",
                reason: "at least 2 points required",
            });
        }
        if temps.len() != cops.len() {
            return Err(CatalogError::InvalidValue {
                field: "cop points",
                reason: "temperature and COP arrays differ in length",
            });
        }
        for &t in temps {
            ensure_finite(t, "cop curve temperature")?;
        }
        for &c in cops {
            ensure_positive(c, "cop value")?;
        }
        ensure_positive(self.dt_c(), "cop curve dT")?;
        ensure_positive(self.capacity_w(), "cop curve capacity")?;
        match self {
            Self::VsAmbient { lwt_c, .. } => ensure_finite(*lwt_c, "fixed LWT")?,
            Self::VsFlowTemp { ambient_c, .. } => ensure_finite(*ambient_c, "fixed ambient")?,
        };
        Ok(())
    }
}

/// One day of outdoor temperature: eight samples, three hours apart from
/// midnight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmbientDef {
    pub samples_c: Vec<f64>,
}

impl AmbientDef {
    pub fn validate(&self) -> CatalogResult<()> {
        if self.samples_c.len() != 8 {
            return Err(CatalogError::InvalidValue {
                field: "ambient samples",
                reason: "exactly 8 three-hourly samples required",
            });
        }
        for &t in &self.samples_c {
            ensure_finite(t, "ambient sample")?;
        }
        Ok(())
    }
}

/// Thermostat set-points, one per hour of day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetScheduleDef {
    pub temps_c: Vec<f64>,
}

impl TargetScheduleDef {
    pub fn validate(&self) -> CatalogResult<()> {
        if self.temps_c.len() != 24 {
            return Err(CatalogError::InvalidValue {
                field: "target temperatures",
                reason: "exactly 24 hourly values required",
            });
        }
        for &t in &self.temps_c {
            ensure_finite(t, "target temperature")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kitchen() -> BuildingParameters {
        BuildingParameters {
            heat_loss_factor_w_per_k: 88.0,
            emitter_std_power_w: 4500.0,
            thermal_mass_kj_per_m2_k: 150.0,
            floor_area_m2: 28.0,
            fluid_volume_l: Some(22.0),
        }
    }

    #[test]
    fn building_heat_capacity() {
        // 150 kJ/m2K * 28 m2 / 3.6 = 1166.67 Wh/K
        let c = kitchen().heat_capacity_wh_per_k();
        assert!((c - 1166.666_666_666_666_6).abs() < 1e-9);
    }

    #[test]
    fn building_rejects_non_positive_fields() {
        let mut b = kitchen();
        b.heat_loss_factor_w_per_k = -10.0;
        assert!(b.validate().is_err());

        let mut b = kitchen();
        b.emitter_std_power_w = 0.0;
        assert!(b.validate().is_err());

        let mut b = kitchen();
        b.fluid_volume_l = Some(-1.0);
        assert!(b.validate().is_err());

        let mut b = kitchen();
        b.fluid_volume_l = None;
        assert!(b.validate().is_ok());
    }

    #[test]
    fn building_admits_zero_heat_loss() {
        let mut b = kitchen();
        b.heat_loss_factor_w_per_k = 0.0;
        assert!(b.validate().is_ok());
    }

    #[test]
    fn cop_def_accessors_cover_both_modes() {
        let vs_lwt = PerformanceCurveDef::VsFlowTemp {
            ambient_c: 7.0,
            dt_c: 5.0,
            lwt_c: vec![25.0, 35.0, 40.0],
            cop: vec![5.95, 5.20, 4.45],
            capacity_w: 3100.0,
        };
        assert_eq!(vs_lwt.dt_c(), 5.0);
        assert_eq!(vs_lwt.capacity_w(), 3100.0);
        assert_eq!(vs_lwt.points().0.len(), 3);
        assert!(vs_lwt.validate().is_ok());

        let vs_amb = PerformanceCurveDef::VsAmbient {
            lwt_c: 40.0,
            dt_c: 5.0,
            ambient_c: vec![-7.0, 2.0, 7.0],
            cop: vec![2.40, 3.15, 4.20],
            capacity_w: 8500.0,
        };
        assert!(vs_amb.validate().is_ok());
    }

    #[test]
    fn cop_def_rejects_short_or_ragged_points() {
        let single = PerformanceCurveDef::VsFlowTemp {
            ambient_c: 7.0,
            dt_c: 5.0,
            lwt_c: vec![40.0],
            cop: vec![4.45],
            capacity_w: 3100.0,
        };
        assert!(single.validate().is_err());

        let ragged = PerformanceCurveDef::VsAmbient {
            lwt_c: 40.0,
            dt_c: 5.0,
            ambient_c: vec![-7.0, 2.0, 7.0],
            cop: vec![2.40, 3.15],
            capacity_w: 8500.0,
        };
        assert!(ragged.validate().is_err());
    }

    #[test]
    fn cop_def_serde_is_mode_tagged() {
        let def = PerformanceCurveDef::VsFlowTemp {
            ambient_c: 7.0,
            dt_c: 5.0,
            lwt_c: vec![25.0, 35.0],
            cop: vec![5.95, 5.20],
            capacity_w: 3100.0,
        };
        let json = serde_json::to_string(&def).unwrap();
        assert!(json.contains("\"mode\":\"VsFlowTemp\""));
        let back: PerformanceCurveDef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }

    #[test]
    fn ambient_and_schedule_lengths_are_enforced() {
        assert!(
            AmbientDef {
                samples_c: vec![1.0; 8]
            }
            .validate()
            .is_ok()
        );
        assert!(
            AmbientDef {
                samples_c: vec![1.0; 7]
            }
            .validate()
            .is_err()
        );
        assert!(
            TargetScheduleDef {
                temps_c: vec![16.0; 24]
            }
            .validate()
            .is_ok()
        );
        assert!(
            TargetScheduleDef {
                temps_c: vec![16.0; 12]
            }
            .validate()
            .is_err()
        );
    }
}
