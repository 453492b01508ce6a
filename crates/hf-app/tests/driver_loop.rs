//! Integration test: the convergence driver around the solvers.
//!
//! Demonstrates:
//! - the constant-flow loop stops as soon as the signal crosses the threshold
//! - the iteration cap is honored when the signal cannot get there
//! - cycle runs tolerate a loose threshold and settle immediately
//! - sweeps run a full driver loop per point and keep input order

use hf_app::{
    AmbientRef, BuildingRef, ConvergenceSpec, CurveRef, CycleParameter, Mode, RunSummary,
    Scenario, ScheduleRef, SweepDefinition, run_scenario, run_sweep,
};

fn kitchen_building() -> BuildingRef {
    BuildingRef {
        preset: Some("kitchen".to_string()),
        inline: None,
        volumiser_l: Some(35.0),
    }
}

fn cycle_scenario(threshold: f64, max_iterations: usize) -> Scenario {
    Scenario {
        name: "kitchen-cycle".to_string(),
        building: kitchen_building(),
        mode: Mode::Cycle {
            performance: CurveRef::Preset("wm85-amb+7".to_string()),
            target_lwt_c: 40.0,
            hp_capacity_w: Some(2400.0),
            overshoot_c: 5.0,
            initial_temp_c: 14.0,
            steps_per_minute: 10,
            max_steps: 1200,
        },
        convergence: ConvergenceSpec {
            threshold,
            max_iterations,
        },
    }
}

fn constant_flow_scenario(threshold: f64, max_iterations: usize) -> Scenario {
    Scenario {
        name: "kitchen-constant-flow".to_string(),
        building: kitchen_building(),
        mode: Mode::ConstantFlow {
            flow_temp_c: 40.0,
            dt_c: 5.0,
            ambient: AmbientRef::Preset("winter".to_string()),
            initial_temp_c: 14.0,
            steps_per_hour: 6,
        },
        convergence: ConvergenceSpec {
            threshold,
            max_iterations,
        },
    }
}

#[test]
fn constant_flow_driver_converges_before_cap() {
    let resolved = constant_flow_scenario(0.05, 20).resolve().expect("resolve");
    let report = run_scenario(&resolved, None).expect("driver run");

    assert!(report.convergence.converged, "should settle within 20 passes");
    assert!(
        report.convergence.iterations >= 2 && report.convergence.iterations <= 6,
        "settling takes a few passes here, got {}",
        report.convergence.iterations
    );
    assert!(report.convergence.max_temp_delta_c <= 0.05);
    assert_eq!(report.records.len(), 144);

    match report.summary {
        RunSummary::ConstantFlow {
            loss_kwh,
            emitted_kwh,
            min_room_c,
            max_room_c,
        } => {
            assert!(loss_kwh > 0.0);
            // Settled day: emission balances loss.
            let ratio = emitted_kwh / loss_kwh;
            assert!(
                ratio > 0.8 && ratio < 1.2,
                "settled emission/loss ratio should be near 1, got {ratio:.3}"
            );
            assert!(min_room_c < max_room_c);
        }
        other => panic!("expected ConstantFlow summary, got {:?}", other),
    }

    println!(
        "constant flow settled after {} passes, max delta {:.4} C",
        report.convergence.iterations, report.convergence.max_temp_delta_c
    );
}

#[test]
fn daily_driver_hits_the_cap_when_threshold_is_tight() {
    let scenario = Scenario {
        name: "kitchen-daily".to_string(),
        building: kitchen_building(),
        mode: Mode::Daily {
            performance: CurveRef::Preset("wm85-lwt40".to_string()),
            ambient: AmbientRef::Preset("winter".to_string()),
            targets: ScheduleRef::Preset("moderate-burst".to_string()),
            initial_temp_c: 14.0,
            steps_per_hour: 6,
            hysteresis_c: 0.5,
            passive_gain_w: 0.0,
        },
        // Below the thermostat's own limit-cycle jitter: unreachable.
        convergence: ConvergenceSpec {
            threshold: 0.001,
            max_iterations: 4,
        },
    };
    let resolved = scenario.resolve().expect("resolve");
    let report = run_scenario(&resolved, None).expect("driver run");

    assert!(!report.convergence.converged);
    assert_eq!(report.convergence.iterations, 4);
    assert!(report.convergence.max_temp_delta_c > 0.001);
    match report.summary {
        RunSummary::Daily { elec_kwh, .. } => assert!(elec_kwh > 0.0),
        other => panic!("expected Daily summary, got {:?}", other),
    }
}

#[test]
fn cycle_driver_settles_under_a_loose_threshold() {
    // First-attempt room drift is around 1.3 C in this scenario.
    let resolved = cycle_scenario(2.0, 10).resolve().expect("resolve");
    let report = run_scenario(&resolved, None).expect("driver run");

    assert!(report.convergence.converged);
    assert_eq!(report.convergence.iterations, 1);
    match report.summary {
        RunSummary::Cycle {
            on_duration_min,
            off_duration_min,
            duty,
            ..
        } => {
            assert!(on_duration_min.is_some());
            assert!(off_duration_min.is_some());
            let duty = duty.expect("completed cycle carries a duty figure");
            assert!(duty > 0.0 && duty < 1.0, "duty {duty:.3} out of range");
        }
        other => panic!("expected Cycle summary, got {:?}", other),
    }
}

#[test]
fn cycle_driver_stops_at_the_cap() {
    let resolved = cycle_scenario(0.01, 3).resolve().expect("resolve");
    let report = run_scenario(&resolved, None).expect("driver run");

    assert!(!report.convergence.converged);
    assert_eq!(report.convergence.iterations, 3);
    // The final attempt still completed its cycle.
    match report.summary {
        RunSummary::Cycle {
            on_duration_min, ..
        } => assert!(on_duration_min.is_some()),
        other => panic!("expected Cycle summary, got {:?}", other),
    }
}

#[test]
fn sweep_preserves_input_order_and_tracks_capacity() {
    let scenario = cycle_scenario(0.05, 3);
    let sweep = SweepDefinition {
        parameter: CycleParameter::HpCapacityW,
        start: 2400.0,
        end: 3600.0,
        num_points: 4,
    };
    let points = run_sweep(&scenario, &sweep).expect("sweep run");

    assert_eq!(points.len(), 4);
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![2400.0, 2800.0, 3200.0, 3600.0]);

    // A stronger compressor reaches the cutoff sooner.
    let mut previous_on = f64::INFINITY;
    for point in &points {
        match point.report.summary {
            RunSummary::Cycle {
                on_duration_min: Some(on),
                ..
            } => {
                assert!(
                    on < previous_on,
                    "on duration should shrink with capacity, got {on:.1} after {previous_on:.1}"
                );
                previous_on = on;
            }
            ref other => panic!("expected completed Cycle summary, got {:?}", other),
        }
    }
}

#[test]
fn sweep_rejects_non_cycle_scenarios() {
    let scenario = constant_flow_scenario(0.05, 3);
    let sweep = SweepDefinition {
        parameter: CycleParameter::TargetLwtC,
        start: 35.0,
        end: 45.0,
        num_points: 3,
    };
    assert!(run_sweep(&scenario, &sweep).is_err());
}
