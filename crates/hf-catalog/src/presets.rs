//! Builtin preset library.
//!
//! Keys are kebab-case; COP curve keys carry a signed suffix for the fixed
//! ambient (`wm85-amb+7`, `edla09-amb-2`) and an unsigned one for the fixed
//! leaving-water temperature (`wm85-lwt40`). Lookups never allocate until a
//! key matches.

use crate::types::{AmbientDef, BuildingParameters, PerformanceCurveDef, TargetScheduleDef};
use crate::{CatalogError, CatalogResult};

// ---------------------------------------------------------------------------
// Thermal mass categories, kJ/(m²·K)

const THERMAL_MASS: [(&str, f64); 6] = [
    ("low", 90.0),
    ("lower-medium", 110.0),
    ("mid-medium", 150.0),
    ("upper-medium", 200.0),
    ("high", 300.0),
    ("very-high", 450.0),
];

pub fn thermal_mass_category(key: &str) -> CatalogResult<f64> {
    THERMAL_MASS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .ok_or_else(|| CatalogError::PresetNotFound {
            kind: "thermal mass",
            key: key.to_string(),
        })
}

pub fn thermal_mass_keys() -> Vec<&'static str> {
    THERMAL_MASS.iter().map(|(k, _)| *k).collect()
}

// ---------------------------------------------------------------------------
// Buildings

struct BuildingEntry {
    key: &'static str,
    heat_loss_factor_w_per_k: f64,
    emitter_std_power_w: f64,
    tmp_category: &'static str,
    floor_area_m2: f64,
    fluid_volume_l: f64,
}

// Heat loss factors come from an MCS room-by-room spreadsheet; fluid volumes
// are the circulating loop only (a volumiser is a scenario-level addition).
const BUILDINGS: [BuildingEntry; 3] = [
    BuildingEntry {
        key: "kitchen",
        heat_loss_factor_w_per_k: 88.0,
        emitter_std_power_w: 4500.0,
        tmp_category: "mid-medium",
        floor_area_m2: 28.0,
        fluid_volume_l: 22.0,
    },
    BuildingEntry {
        key: "kitchen-fan-coil",
        heat_loss_factor_w_per_k: 88.0,
        emitter_std_power_w: 5900.0,
        tmp_category: "mid-medium",
        floor_area_m2: 28.0,
        fluid_volume_l: 22.0,
    },
    BuildingEntry {
        key: "whole-house",
        heat_loss_factor_w_per_k: 215.0,
        emitter_std_power_w: 15500.0,
        tmp_category: "mid-medium",
        floor_area_m2: 80.0,
        fluid_volume_l: 45.0,
    },
];

pub fn building(key: &str) -> CatalogResult<BuildingParameters> {
    let entry = BUILDINGS
        .iter()
        .find(|e| e.key == key)
        .ok_or_else(|| CatalogError::PresetNotFound {
            kind: "building",
            key: key.to_string(),
        })?;
    Ok(BuildingParameters {
        heat_loss_factor_w_per_k: entry.heat_loss_factor_w_per_k,
        emitter_std_power_w: entry.emitter_std_power_w,
        thermal_mass_kj_per_m2_k: thermal_mass_category(entry.tmp_category)?,
        floor_area_m2: entry.floor_area_m2,
        fluid_volume_l: Some(entry.fluid_volume_l),
    })
}

pub fn building_keys() -> Vec<&'static str> {
    BUILDINGS.iter().map(|e| e.key).collect()
}

// ---------------------------------------------------------------------------
// COP performance curves

struct VsAmbientEntry {
    key: &'static str,
    lwt_c: f64,
    dt_c: f64,
    ambient_c: &'static [f64],
    cop: &'static [f64],
    capacity_w: f64,
}

struct VsFlowTempEntry {
    key: &'static str,
    ambient_c: f64,
    dt_c: f64,
    lwt_c: &'static [f64],
    cop: &'static [f64],
    capacity_w: f64,
}

const WM_AMBIENT_C: [f64; 7] = [-15.0, -10.0, -7.0, 2.0, 7.0, 12.0, 15.0];
const EDLA_AMBIENT_C: [f64; 5] = [-7.0, -2.0, 2.0, 7.0, 12.0];
const WM_LWT_C: [f64; 6] = [25.0, 35.0, 40.0, 45.0, 50.0, 55.0];
const EDLA_LWT_C: [f64; 4] = [35.0, 40.0, 45.0, 55.0];

// Nominal-frequency datasheet rows (Mitsubishi PUZ-WM85/WM112) and Daikin
// capacity-table COPs (EDLA08/09); `direct-lwt60` approximates an oil boiler
// run flat out.
const VS_AMBIENT: [VsAmbientEntry; 17] = [
    VsAmbientEntry {
        key: "wm85-lwt35",
        lwt_c: 35.0,
        dt_c: 5.0,
        ambient_c: &WM_AMBIENT_C,
        cop: &[2.15, 2.30, 2.60, 3.51, 4.80, 5.20, 5.95],
        capacity_w: 8500.0,
    },
    VsAmbientEntry {
        key: "wm85-lwt40",
        lwt_c: 40.0,
        dt_c: 5.0,
        ambient_c: &WM_AMBIENT_C,
        cop: &[1.95, 2.15, 2.40, 3.15, 4.20, 4.60, 5.20],
        capacity_w: 8500.0,
    },
    VsAmbientEntry {
        key: "wm85-lwt45",
        lwt_c: 45.0,
        dt_c: 5.0,
        ambient_c: &WM_AMBIENT_C,
        cop: &[1.80, 2.05, 2.25, 2.86, 3.70, 4.00, 4.45],
        capacity_w: 8500.0,
    },
    VsAmbientEntry {
        key: "wm85-lwt50",
        lwt_c: 50.0,
        dt_c: 5.0,
        ambient_c: &[-10.0, -7.0, 2.0, 7.0, 12.0, 15.0],
        cop: &[1.85, 2.05, 2.55, 3.25, 3.45, 3.80],
        capacity_w: 8500.0,
    },
    VsAmbientEntry {
        key: "wm112-lwt35",
        lwt_c: 35.0,
        dt_c: 5.0,
        ambient_c: &WM_AMBIENT_C,
        cop: &[2.55, 2.75, 3.00, 3.44, 4.70, 6.05, 6.85],
        capacity_w: 11200.0,
    },
    VsAmbientEntry {
        key: "wm112-lwt40",
        lwt_c: 40.0,
        dt_c: 5.0,
        ambient_c: &WM_AMBIENT_C,
        cop: &[2.30, 2.50, 2.75, 3.05, 4.20, 5.45, 6.15],
        capacity_w: 11200.0,
    },
    VsAmbientEntry {
        key: "wm112-lwt45",
        lwt_c: 45.0,
        dt_c: 5.0,
        ambient_c: &WM_AMBIENT_C,
        cop: &[2.05, 2.25, 2.50, 2.74, 3.70, 4.85, 5.50],
        capacity_w: 11200.0,
    },
    VsAmbientEntry {
        key: "wm112-lwt50",
        lwt_c: 50.0,
        dt_c: 5.0,
        ambient_c: &WM_AMBIENT_C,
        cop: &[1.75, 1.90, 2.20, 2.30, 3.35, 4.20, 4.75],
        capacity_w: 10600.0,
    },
    VsAmbientEntry {
        key: "edla09-lwt35",
        lwt_c: 35.0,
        dt_c: 5.0,
        ambient_c: &EDLA_AMBIENT_C,
        cop: &[2.48, 2.73, 3.00, 4.82, 4.26],
        capacity_w: 7200.0,
    },
    VsAmbientEntry {
        key: "edla09-lwt40",
        lwt_c: 40.0,
        dt_c: 5.0,
        ambient_c: &EDLA_AMBIENT_C,
        cop: &[2.32, 2.54, 2.71, 3.99, 3.83],
        capacity_w: 7700.0,
    },
    VsAmbientEntry {
        key: "edla09-lwt45",
        lwt_c: 45.0,
        dt_c: 5.0,
        ambient_c: &EDLA_AMBIENT_C,
        cop: &[2.21, 2.38, 2.49, 3.43, 3.44],
        capacity_w: 7900.0,
    },
    VsAmbientEntry {
        key: "edla09-lwt55",
        lwt_c: 55.0,
        dt_c: 5.0,
        ambient_c: &EDLA_AMBIENT_C,
        cop: &[1.79, 1.92, 2.09, 3.32, 2.76],
        capacity_w: 7900.0,
    },
    VsAmbientEntry {
        key: "edla08-lwt35",
        lwt_c: 35.0,
        dt_c: 5.0,
        ambient_c: &EDLA_AMBIENT_C,
        cop: &[2.70, 3.00, 3.31, 4.53, 5.38],
        capacity_w: 6300.0,
    },
    VsAmbientEntry {
        key: "edla08-lwt40",
        lwt_c: 40.0,
        dt_c: 5.0,
        ambient_c: &EDLA_AMBIENT_C,
        cop: &[2.39, 2.68, 2.97, 3.94, 4.64],
        capacity_w: 6500.0,
    },
    VsAmbientEntry {
        key: "edla08-lwt45",
        lwt_c: 45.0,
        dt_c: 5.0,
        ambient_c: &EDLA_AMBIENT_C,
        cop: &[2.17, 2.42, 2.70, 3.48, 4.02],
        capacity_w: 6000.0,
    },
    VsAmbientEntry {
        key: "edla08-lwt55",
        lwt_c: 55.0,
        dt_c: 8.0,
        ambient_c: &EDLA_AMBIENT_C,
        cop: &[1.62, 1.82, 2.05, 2.87, 3.05],
        capacity_w: 5200.0,
    },
    VsAmbientEntry {
        key: "direct-lwt60",
        lwt_c: 60.0,
        dt_c: 8.0,
        ambient_c: &[-10.0, 15.0],
        cop: &[1.0, 1.0],
        capacity_w: 10000.0,
    },
];

// Fixed-ambient rows for cycling simulation; capacities are the minimum
// (lowest-compressor-frequency) outputs near LWT 40.
const VS_FLOW_TEMP: [VsFlowTempEntry; 18] = [
    VsFlowTempEntry {
        key: "wm85-amb+12",
        ambient_c: 12.0,
        dt_c: 5.0,
        lwt_c: &WM_LWT_C,
        cop: &[6.90, 6.05, 5.20, 4.40, 3.70, 3.05],
        capacity_w: 2700.0,
    },
    VsFlowTempEntry {
        key: "wm85-amb+7",
        ambient_c: 7.0,
        dt_c: 5.0,
        lwt_c: &WM_LWT_C,
        cop: &[5.95, 5.20, 4.45, 3.75, 3.20, 2.65],
        capacity_w: 3100.0,
    },
    VsFlowTempEntry {
        key: "wm85-amb+2",
        ambient_c: 2.0,
        dt_c: 5.0,
        lwt_c: &WM_LWT_C,
        cop: &[4.65, 4.15, 3.65, 3.15, 2.75, 2.40],
        capacity_w: 3400.0,
    },
    VsFlowTempEntry {
        key: "wm85-amb-7",
        ambient_c: -7.0,
        dt_c: 5.0,
        lwt_c: &WM_LWT_C,
        cop: &[2.70, 2.50, 2.30, 2.10, 1.85, 1.65],
        capacity_w: 3200.0,
    },
    VsFlowTempEntry {
        key: "wm112-amb+12",
        ambient_c: 12.0,
        dt_c: 5.0,
        lwt_c: &WM_LWT_C,
        cop: &[6.30, 5.85, 5.40, 4.95, 4.30, 3.65],
        capacity_w: 3800.0,
    },
    VsFlowTempEntry {
        key: "wm112-amb+7",
        ambient_c: 7.0,
        dt_c: 5.0,
        lwt_c: &WM_LWT_C,
        cop: &[4.95, 4.45, 3.95, 3.50, 3.05, 2.60],
        capacity_w: 3700.0,
    },
    VsFlowTempEntry {
        key: "wm112-amb+2",
        ambient_c: 2.0,
        dt_c: 5.0,
        lwt_c: &WM_LWT_C,
        cop: &[4.25, 3.75, 3.25, 2.75, 2.40, 2.10],
        capacity_w: 4000.0,
    },
    VsFlowTempEntry {
        key: "wm112-amb-7",
        ambient_c: -7.0,
        dt_c: 5.0,
        lwt_c: &WM_LWT_C,
        cop: &[3.15, 2.85, 2.55, 2.30, 2.00, 1.70],
        capacity_w: 3700.0,
    },
    VsFlowTempEntry {
        key: "edla09-amb+10",
        ambient_c: 10.0,
        dt_c: 5.0,
        lwt_c: &EDLA_LWT_C,
        cop: &[5.32, 4.60, 4.10, 3.05],
        capacity_w: 4000.0,
    },
    VsFlowTempEntry {
        key: "edla09-amb+7",
        ambient_c: 7.0,
        dt_c: 5.0,
        lwt_c: &EDLA_LWT_C,
        cop: &[4.91, 4.40, 3.71, 2.91],
        capacity_w: 4000.0,
    },
    VsFlowTempEntry {
        key: "edla09-amb+2",
        ambient_c: 2.0,
        dt_c: 5.0,
        lwt_c: &EDLA_LWT_C,
        cop: &[3.79, 3.37, 2.90, 2.25],
        capacity_w: 4000.0,
    },
    VsFlowTempEntry {
        key: "edla09-amb-2",
        ambient_c: -2.0,
        dt_c: 5.0,
        lwt_c: &EDLA_LWT_C,
        cop: &[3.19, 2.77, 2.35, 1.92],
        capacity_w: 4000.0,
    },
    VsFlowTempEntry {
        key: "edla09-amb-7",
        ambient_c: -7.0,
        dt_c: 5.0,
        lwt_c: &EDLA_LWT_C,
        cop: &[2.81, 2.51, 2.22, 1.80],
        capacity_w: 4000.0,
    },
    VsFlowTempEntry {
        key: "edla08-amb+10",
        ambient_c: 10.0,
        dt_c: 5.0,
        lwt_c: &EDLA_LWT_C,
        cop: &[4.72, 4.45, 3.80, 2.84],
        capacity_w: 1400.0,
    },
    VsFlowTempEntry {
        key: "edla08-amb+7",
        ambient_c: 7.0,
        dt_c: 5.0,
        lwt_c: &EDLA_LWT_C,
        cop: &[4.60, 4.20, 3.50, 2.70],
        capacity_w: 1400.0,
    },
    VsFlowTempEntry {
        key: "edla08-amb+2",
        ambient_c: 2.0,
        dt_c: 5.0,
        lwt_c: &EDLA_LWT_C,
        cop: &[3.65, 3.17, 2.75, 2.10],
        capacity_w: 1400.0,
    },
    VsFlowTempEntry {
        key: "edla08-amb-2",
        ambient_c: -2.0,
        dt_c: 5.0,
        lwt_c: &EDLA_LWT_C,
        cop: &[3.07, 2.70, 2.39, 1.81],
        capacity_w: 1400.0,
    },
    VsFlowTempEntry {
        key: "edla08-amb-7",
        ambient_c: -7.0,
        dt_c: 5.0,
        lwt_c: &EDLA_LWT_C,
        cop: &[2.70, 2.40, 2.21, 1.70],
        capacity_w: 1400.0,
    },
];

pub fn performance_curve(key: &str) -> CatalogResult<PerformanceCurveDef> {
    if let Some(e) = VS_AMBIENT.iter().find(|e| e.key == key) {
        return Ok(PerformanceCurveDef::VsAmbient {
            lwt_c: e.lwt_c,
            dt_c: e.dt_c,
            ambient_c: e.ambient_c.to_vec(),
            cop: e.cop.to_vec(),
            capacity_w: e.capacity_w,
        });
    }
    if let Some(e) = VS_FLOW_TEMP.iter().find(|e| e.key == key) {
        return Ok(PerformanceCurveDef::VsFlowTemp {
            ambient_c: e.ambient_c,
            dt_c: e.dt_c,
            lwt_c: e.lwt_c.to_vec(),
            cop: e.cop.to_vec(),
            capacity_w: e.capacity_w,
        });
    }
    Err(CatalogError::PresetNotFound {
        kind: "performance curve",
        key: key.to_string(),
    })
}

pub fn performance_curve_keys() -> Vec<&'static str> {
    VS_AMBIENT
        .iter()
        .map(|e| e.key)
        .chain(VS_FLOW_TEMP.iter().map(|e| e.key))
        .collect()
}

// ---------------------------------------------------------------------------
// Ambient day profiles

struct AmbientEntry {
    key: &'static str,
    samples_c: [f64; 8],
}

// Stereotyped day shapes; samples run 00,03,...,21. The profile fitter closes
// the day by repeating the midnight sample, so 21->24 should not jump far.
const AMBIENT_PROFILES: [AmbientEntry; 12] = [
    AmbientEntry {
        key: "winter",
        samples_c: [4.2, 3.8, 3.3, 4.0, 6.5, 6.0, 5.5, 4.8],
    },
    AmbientEntry {
        key: "mild-winter",
        samples_c: [5.5, 5.0, 5.0, 7.0, 10.0, 10.0, 7.0, 6.0],
    },
    AmbientEntry {
        key: "coldish-winter",
        samples_c: [1.0, 0.0, -2.0, -1.0, 1.5, 2.5, 2.0, 1.5],
    },
    AmbientEntry {
        key: "cold-snap",
        samples_c: [-6.0, -7.0, -8.0, -7.0, -3.0, -2.0, -4.0, -5.0],
    },
    AmbientEntry {
        key: "spring",
        samples_c: [5.0, 5.0, 5.0, 8.0, 13.0, 12.0, 8.0, 6.0],
    },
    AmbientEntry {
        key: "spring-clear",
        samples_c: [5.0, 2.0, 1.0, 5.0, 13.0, 15.0, 12.0, 6.5],
    },
    AmbientEntry {
        key: "constant+10",
        samples_c: [10.0; 8],
    },
    AmbientEntry {
        key: "constant+7",
        samples_c: [7.0; 8],
    },
    AmbientEntry {
        key: "constant+4",
        samples_c: [4.0; 8],
    },
    AmbientEntry {
        key: "constant+2",
        samples_c: [2.0; 8],
    },
    AmbientEntry {
        key: "constant-2",
        samples_c: [-2.0; 8],
    },
    AmbientEntry {
        key: "constant-7",
        samples_c: [-7.0; 8],
    },
];

pub fn ambient(key: &str) -> CatalogResult<AmbientDef> {
    AMBIENT_PROFILES
        .iter()
        .find(|e| e.key == key)
        .map(|e| AmbientDef {
            samples_c: e.samples_c.to_vec(),
        })
        .ok_or_else(|| CatalogError::PresetNotFound {
            kind: "ambient profile",
            key: key.to_string(),
        })
}

pub fn ambient_keys() -> Vec<&'static str> {
    AMBIENT_PROFILES.iter().map(|e| e.key).collect()
}

// ---------------------------------------------------------------------------
// Target schedules

struct ScheduleEntry {
    key: &'static str,
    temps_c: [f64; 24],
}

const SCHEDULES: [ScheduleEntry; 6] = [
    // Conventional boiler-era profile: morning and evening bursts.
    ScheduleEntry {
        key: "moderate-burst",
        temps_c: [
            14.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 12.0, 13.0, 15.0, 16.0, 14.0, 14.0, 14.0, 14.0,
            15.0, 15.0, 16.0, 16.0, 16.0, 17.0, 17.0, 16.0, 15.0,
        ],
    },
    // A steadier profile suited to a heat pump.
    ScheduleEntry {
        key: "daytime-17",
        temps_c: [
            12.0, 12.0, 12.0, 12.0, 12.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 17.0, 17.0, 17.0,
            17.0, 17.0, 17.0, 17.0, 17.0, 17.0, 17.0, 17.0, 17.0, 17.0,
        ],
    },
    ScheduleEntry {
        key: "constant-14",
        temps_c: [14.0; 24],
    },
    ScheduleEntry {
        key: "constant-16",
        temps_c: [16.0; 24],
    },
    ScheduleEntry {
        key: "constant-18",
        temps_c: [18.0; 24],
    },
    ScheduleEntry {
        key: "constant-21",
        temps_c: [21.0; 24],
    },
];

pub fn target_schedule(key: &str) -> CatalogResult<TargetScheduleDef> {
    SCHEDULES
        .iter()
        .find(|e| e.key == key)
        .map(|e| TargetScheduleDef {
            temps_c: e.temps_c.to_vec(),
        })
        .ok_or_else(|| CatalogError::PresetNotFound {
            kind: "target schedule",
            key: key.to_string(),
        })
}

pub fn target_schedule_keys() -> Vec<&'static str> {
    SCHEDULES.iter().map(|e| e.key).collect()
}
