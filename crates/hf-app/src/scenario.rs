//! Scenario files: the YAML surface of a single simulation.
//!
//! A scenario names the solver mode and binds each input either to a catalog
//! preset key or an inline definition. `load_yaml` parses and validates;
//! `Scenario::resolve` replaces every binding with its concrete definition,
//! ready for the driver.

use std::path::Path;

use hf_catalog::{AmbientDef, BuildingParameters, PerformanceCurveDef, TargetScheduleDef};
use hf_core::{ensure_finite, ensure_positive};
use hf_sim::{ConstantFlowOptions, CycleOptions, DailyOptions};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

fn default_steps_per_hour() -> usize {
    6
}

fn default_hysteresis_c() -> f64 {
    0.5
}

fn default_overshoot_c() -> f64 {
    5.0
}

fn default_steps_per_minute() -> usize {
    10
}

fn default_max_steps() -> usize {
    1200
}

fn default_threshold_c() -> f64 {
    0.05
}

fn default_max_iterations() -> usize {
    20
}

/// A complete simulation scenario as written in a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub building: BuildingRef,
    pub mode: Mode,
    #[serde(default)]
    pub convergence: ConvergenceSpec,
}

/// Building binding: a preset key or inline parameters, plus an optional
/// volumiser adding buffer volume to the loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildingRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<BuildingParameters>,
    /// Extra fluid volume added to the loop, liters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumiser_l: Option<f64>,
}

impl BuildingRef {
    /// The concrete building, with the volumiser folded into the fluid volume.
    pub fn resolve(&self) -> AppResult<BuildingParameters> {
        let mut building = match (&self.preset, &self.inline) {
            (Some(key), None) => hf_catalog::building(key)?,
            (None, Some(params)) => params.clone(),
            (Some(_), Some(_)) => {
                return Err(AppError::Validation(
                    "building binds both a preset and inline parameters".to_string(),
                ));
            }
            (None, None) => {
                return Err(AppError::Validation(
                    "building binds neither a preset nor inline parameters".to_string(),
                ));
            }
        };
        building.validate()?;
        if let Some(extra) = self.volumiser_l {
            ensure_positive(extra, "volumiser volume")?;
            building.fluid_volume_l = Some(building.fluid_volume_l.unwrap_or(0.0) + extra);
        }
        Ok(building)
    }
}

/// A performance curve binding: catalog key or inline datasheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CurveRef {
    Preset(String),
    Inline(PerformanceCurveDef),
}

impl CurveRef {
    pub fn resolve(&self) -> AppResult<PerformanceCurveDef> {
        let def = match self {
            CurveRef::Preset(key) => hf_catalog::performance_curve(key)?,
            CurveRef::Inline(def) => def.clone(),
        };
        def.validate()?;
        Ok(def)
    }
}

/// An ambient day-profile binding: catalog key or inline samples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AmbientRef {
    Preset(String),
    Inline(AmbientDef),
}

impl AmbientRef {
    pub fn resolve(&self) -> AppResult<AmbientDef> {
        let def = match self {
            AmbientRef::Preset(key) => hf_catalog::ambient(key)?,
            AmbientRef::Inline(def) => def.clone(),
        };
        def.validate()?;
        Ok(def)
    }
}

/// A target-schedule binding: catalog key or inline hourly temperatures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ScheduleRef {
    Preset(String),
    Inline(TargetScheduleDef),
}

impl ScheduleRef {
    pub fn resolve(&self) -> AppResult<TargetScheduleDef> {
        let def = match self {
            ScheduleRef::Preset(key) => hf_catalog::target_schedule(key)?,
            ScheduleRef::Inline(def) => def.clone(),
        };
        def.validate()?;
        Ok(def)
    }
}

/// Which solver to run and its inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Mode {
    /// Thermostatically controlled day, repeated to a fixed point.
    Daily {
        performance: CurveRef,
        ambient: AmbientRef,
        targets: ScheduleRef,
        initial_temp_c: f64,
        #[serde(default = "default_steps_per_hour")]
        steps_per_hour: usize,
        #[serde(default = "default_hysteresis_c")]
        hysteresis_c: f64,
        #[serde(default)]
        passive_gain_w: f64,
    },
    /// One compressor on/off cycle, repeated until the room settles.
    Cycle {
        performance: CurveRef,
        target_lwt_c: f64,
        /// Compressor heat output while running (W); defaults to the curve's
        /// rated capacity.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hp_capacity_w: Option<f64>,
        #[serde(default = "default_overshoot_c")]
        overshoot_c: f64,
        initial_temp_c: f64,
        #[serde(default = "default_steps_per_minute")]
        steps_per_minute: usize,
        #[serde(default = "default_max_steps")]
        max_steps: usize,
    },
    /// Uncontrolled always-on emitter at a fixed flow temperature.
    ConstantFlow {
        flow_temp_c: f64,
        dt_c: f64,
        ambient: AmbientRef,
        initial_temp_c: f64,
        #[serde(default = "default_steps_per_hour")]
        steps_per_hour: usize,
    },
}

/// Driver stop policy as written in the scenario.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConvergenceSpec {
    /// Stop once the convergence signal falls to this level (°C).
    #[serde(default = "default_threshold_c")]
    pub threshold: f64,
    /// Hard cap on driver iterations.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for ConvergenceSpec {
    fn default() -> Self {
        Self {
            threshold: default_threshold_c(),
            max_iterations: default_max_iterations(),
        }
    }
}

/// A scenario with every binding replaced by its concrete definition.
#[derive(Debug, Clone)]
pub struct ResolvedScenario {
    pub building: BuildingParameters,
    pub mode: ResolvedMode,
    pub convergence: ConvergenceSpec,
}

/// Mode with resolved definitions and packed solver options.
#[derive(Debug, Clone)]
pub enum ResolvedMode {
    Daily {
        performance: PerformanceCurveDef,
        ambient: AmbientDef,
        targets: TargetScheduleDef,
        initial_temp_c: f64,
        options: DailyOptions,
    },
    Cycle {
        performance: PerformanceCurveDef,
        initial_temp_c: f64,
        options: CycleOptions,
    },
    ConstantFlow {
        flow_temp_c: f64,
        dt_c: f64,
        ambient: AmbientDef,
        initial_temp_c: f64,
        options: ConstantFlowOptions,
    },
}

impl Scenario {
    /// Resolve every binding against the catalog and fold in defaults.
    ///
    /// This is also the validation path: missing presets, malformed inline
    /// definitions, curve-mode mismatches and non-positive settings all
    /// surface here, before any solver is built.
    pub fn resolve(&self) -> AppResult<ResolvedScenario> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("scenario name is empty".to_string()));
        }
        ensure_positive(self.convergence.threshold, "convergence threshold")?;
        if self.convergence.max_iterations == 0 {
            return Err(AppError::Validation(
                "convergence max_iterations must be positive".to_string(),
            ));
        }

        let building = self.building.resolve()?;

        let mode = match &self.mode {
            Mode::Daily {
                performance,
                ambient,
                targets,
                initial_temp_c,
                steps_per_hour,
                hysteresis_c,
                passive_gain_w,
            } => {
                let performance = performance.resolve()?;
                if !matches!(performance, PerformanceCurveDef::VsAmbient { .. }) {
                    return Err(AppError::Validation(
                        "daily mode needs a performance curve against ambient temperature"
                            .to_string(),
                    ));
                }
                ensure_finite(*initial_temp_c, "initial room temperature")?;
                ResolvedMode::Daily {
                    performance,
                    ambient: ambient.resolve()?,
                    targets: targets.resolve()?,
                    initial_temp_c: *initial_temp_c,
                    options: DailyOptions {
                        steps_per_hour: *steps_per_hour,
                        hysteresis_c: *hysteresis_c,
                        passive_gain_w: *passive_gain_w,
                    },
                }
            }
            Mode::Cycle {
                performance,
                target_lwt_c,
                hp_capacity_w,
                overshoot_c,
                initial_temp_c,
                steps_per_minute,
                max_steps,
            } => {
                let performance = performance.resolve()?;
                if !matches!(performance, PerformanceCurveDef::VsFlowTemp { .. }) {
                    return Err(AppError::Validation(
                        "cycle mode needs a performance curve against leaving-water temperature"
                            .to_string(),
                    ));
                }
                if building.fluid_volume_l.is_none() {
                    return Err(AppError::Validation(
                        "cycle mode needs a building fluid volume (preset, inline, or volumiser)"
                            .to_string(),
                    ));
                }
                ensure_finite(*initial_temp_c, "initial room temperature")?;
                let hp_capacity_w = hp_capacity_w.unwrap_or_else(|| performance.capacity_w());
                let mut options = CycleOptions::new(*target_lwt_c, hp_capacity_w);
                options.overshoot_c = *overshoot_c;
                options.steps_per_minute = *steps_per_minute;
                options.max_steps = *max_steps;
                ResolvedMode::Cycle {
                    performance,
                    initial_temp_c: *initial_temp_c,
                    options,
                }
            }
            Mode::ConstantFlow {
                flow_temp_c,
                dt_c,
                ambient,
                initial_temp_c,
                steps_per_hour,
            } => {
                ensure_finite(*flow_temp_c, "flow temperature")?;
                ensure_positive(*dt_c, "flow-return dT")?;
                ensure_finite(*initial_temp_c, "initial room temperature")?;
                ResolvedMode::ConstantFlow {
                    flow_temp_c: *flow_temp_c,
                    dt_c: *dt_c,
                    ambient: ambient.resolve()?,
                    initial_temp_c: *initial_temp_c,
                    options: ConstantFlowOptions {
                        steps_per_hour: *steps_per_hour,
                    },
                }
            }
        };

        Ok(ResolvedScenario {
            building,
            mode,
            convergence: self.convergence,
        })
    }
}

/// Load a scenario from a YAML file and validate it.
pub fn load_yaml(path: &Path) -> AppResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    let scenario: Scenario = serde_yaml::from_str(&content)?;
    scenario.resolve()?;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KITCHEN_DAILY: &str = "\
name: kitchen-winter
building:
  preset: kitchen
mode:
  type: Daily
  performance: wm85-lwt40
  ambient: winter
  targets: moderate-burst
  initial_temp_c: 14.0
";

    #[test]
    fn daily_scenario_parses_with_defaults() {
        let scenario: Scenario = serde_yaml::from_str(KITCHEN_DAILY).unwrap();
        assert_eq!(scenario.name, "kitchen-winter");
        match &scenario.mode {
            Mode::Daily {
                steps_per_hour,
                hysteresis_c,
                passive_gain_w,
                ..
            } => {
                assert_eq!(*steps_per_hour, 6);
                assert_eq!(*hysteresis_c, 0.5);
                assert_eq!(*passive_gain_w, 0.0);
            }
            other => panic!("expected Daily mode, got {:?}", other),
        }
        assert_eq!(scenario.convergence.threshold, 0.05);
        assert_eq!(scenario.convergence.max_iterations, 20);
        assert!(scenario.resolve().is_ok());
    }

    #[test]
    fn cycle_capacity_defaults_to_curve_capacity() {
        let yaml = "\
name: kitchen-cycle
building:
  preset: kitchen
mode:
  type: Cycle
  performance: wm85-amb+7
  target_lwt_c: 40.0
  initial_temp_c: 14.0
";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let resolved = scenario.resolve().unwrap();
        match resolved.mode {
            ResolvedMode::Cycle { options, .. } => {
                let curve = hf_catalog::performance_curve("wm85-amb+7").unwrap();
                assert_eq!(options.hp_capacity_w, curve.capacity_w());
                assert_eq!(options.overshoot_c, 5.0);
                assert_eq!(options.steps_per_minute, 10);
                assert_eq!(options.max_steps, 1200);
            }
            other => panic!("expected Cycle mode, got {:?}", other),
        }
    }

    #[test]
    fn volumiser_adds_to_preset_fluid_volume() {
        let building = BuildingRef {
            preset: Some("kitchen".to_string()),
            inline: None,
            volumiser_l: Some(35.0),
        };
        let resolved = building.resolve().unwrap();
        // kitchen carries 22 l of loop water
        assert_eq!(resolved.fluid_volume_l, Some(57.0));
    }

    #[test]
    fn building_must_bind_exactly_one_source() {
        let none = BuildingRef {
            preset: None,
            inline: None,
            volumiser_l: None,
        };
        assert!(matches!(none.resolve(), Err(AppError::Validation(_))));

        let both = BuildingRef {
            preset: Some("kitchen".to_string()),
            inline: Some(hf_catalog::building("kitchen").unwrap()),
            volumiser_l: None,
        };
        assert!(matches!(both.resolve(), Err(AppError::Validation(_))));
    }

    #[test]
    fn unknown_preset_is_a_catalog_error() {
        let yaml = "\
name: broken
building:
  preset: kitchen
mode:
  type: Daily
  performance: no-such-curve
  ambient: winter
  targets: moderate-burst
  initial_temp_c: 14.0
";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        match scenario.resolve() {
            Err(AppError::Catalog(message)) => {
                assert!(message.contains("no-such-curve"), "got: {message}")
            }
            other => panic!("expected Catalog error, got {:?}", other),
        }
    }

    #[test]
    fn daily_mode_rejects_flow_temp_curve() {
        let yaml = "\
name: mismatched
building:
  preset: kitchen
mode:
  type: Daily
  performance: wm85-amb+7
  ambient: winter
  targets: moderate-burst
  initial_temp_c: 14.0
";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(scenario.resolve(), Err(AppError::Validation(_))));
    }

    #[test]
    fn cycle_without_fluid_volume_is_rejected() {
        let yaml = "\
name: dry-loop
building:
  inline:
    heat_loss_factor_w_per_k: 88.0
    emitter_std_power_w: 4500.0
    thermal_mass_kj_per_m2_k: 150.0
    floor_area_m2: 28.0
mode:
  type: Cycle
  performance: wm85-amb+7
  target_lwt_c: 40.0
  initial_temp_c: 14.0
";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(scenario.resolve(), Err(AppError::Validation(_))));
    }

    #[test]
    fn inline_curve_round_trips_through_yaml() {
        let scenario = Scenario {
            name: "inline-curve".to_string(),
            building: BuildingRef {
                preset: Some("kitchen".to_string()),
                inline: None,
                volumiser_l: None,
            },
            mode: Mode::Daily {
                performance: CurveRef::Inline(PerformanceCurveDef::VsAmbient {
                    lwt_c: 40.0,
                    dt_c: 5.0,
                    ambient_c: vec![-7.0, 2.0, 7.0],
                    cop: vec![2.40, 3.15, 4.20],
                    capacity_w: 8500.0,
                }),
                ambient: AmbientRef::Preset("winter".to_string()),
                targets: ScheduleRef::Preset("constant-18".to_string()),
                initial_temp_c: 14.0,
                steps_per_hour: 6,
                hysteresis_c: 0.5,
                passive_gain_w: 0.0,
            },
            convergence: ConvergenceSpec::default(),
        };
        let yaml = serde_yaml::to_string(&scenario).unwrap();
        let back: Scenario = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, scenario);
        assert!(back.resolve().is_ok());
    }

    #[test]
    fn inline_ambient_samples_parse_untagged() {
        let yaml = "\
name: inline-ambient
building:
  preset: kitchen
mode:
  type: ConstantFlow
  flow_temp_c: 40.0
  dt_c: 5.0
  ambient:
    samples_c: [2.0, 1.0, 0.0, 3.0, 6.0, 7.0, 5.0, 3.0]
  initial_temp_c: 14.0
";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let resolved = scenario.resolve().unwrap();
        match resolved.mode {
            ResolvedMode::ConstantFlow { ambient, .. } => {
                assert_eq!(ambient.samples_c.len(), 8);
                assert_eq!(ambient.samples_c[5], 7.0);
            }
            other => panic!("expected ConstantFlow mode, got {:?}", other),
        }
    }
}
