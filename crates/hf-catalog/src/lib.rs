//! hf-catalog: solver input definitions and the builtin preset library.
//!
//! The solvers consume four kinds of read-only input ([`BuildingParameters`],
//! [`PerformanceCurveDef`], [`AmbientDef`], [`TargetScheduleDef`]). This crate
//! defines those records with their serde schema and validation, and ships the
//! builtin presets (survey-derived buildings, manufacturer COP datasheets,
//! stereotyped day profiles, thermostat schedules) behind keyed lookups.

pub mod presets;
pub mod types;

pub use presets::{
    ambient, ambient_keys, building, building_keys, performance_curve, performance_curve_keys,
    target_schedule, target_schedule_keys, thermal_mass_category, thermal_mass_keys,
};
pub use types::{AmbientDef, BuildingParameters, PerformanceCurveDef, TargetScheduleDef};

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Unknown {kind} preset: {key}")]
    PresetNotFound { kind: &'static str, key: String },

    #[error("Invalid value: {field} ({reason})")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Core error: {0}")]
    Core(#[from] hf_core::HfError),
}
