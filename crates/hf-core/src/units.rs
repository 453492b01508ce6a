// hf-core/src/units.rs
//
// Scalar unit conversions for the mixed-unit heat-balance arithmetic: building
// inputs arrive in datasheet units (W/K, kJ/m2K, liters), solver series are in
// Wh and degrees Celsius, day totals in kWh.

/// Joules per watt-hour.
pub const J_PER_WH: f64 = 3600.0;

/// Watt-hours per kilojoule (1000/3600).
pub const WH_PER_KJ: f64 = 1.0 / 3.6;

/// Volumetric heat capacity of water, J/(liter·K).
pub const WATER_CP_J_PER_L_K: f64 = 4.2 * 1000.0;

#[inline]
pub fn j_to_wh(v: f64) -> f64 {
    v / J_PER_WH
}

#[inline]
pub fn wh_to_kwh(v: f64) -> f64 {
    v / 1000.0
}

/// Building heat capacity in Wh/K from thermal mass parameter (kJ/m2·K) and
/// floor area (m2).
#[inline]
pub fn heat_capacity_wh_per_k(thermal_mass_kj_per_m2_k: f64, floor_area_m2: f64) -> f64 {
    thermal_mass_kj_per_m2_k * floor_area_m2 * WH_PER_KJ
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_smoke() {
        assert_eq!(j_to_wh(3600.0), 1.0);
        assert_eq!(wh_to_kwh(2500.0), 2.5);
        // 150 kJ/m2K over 28 m2 is the mid-medium kitchen: 4200/3.6 Wh/K
        let c = heat_capacity_wh_per_k(150.0, 28.0);
        assert!((c - 1166.666_666_666_666_6).abs() < 1e-9);
    }
}
