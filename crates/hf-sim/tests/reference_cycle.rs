//! Integration test: compressor cycling against the mild-weather datasheet.
//!
//! Scenario: kitchen-sized room with a 57 l loop, WM85 COP curve at fixed
//! +7 °C ambient, compressor pinned to its 2400 W minimum output, cycling
//! around LWT 40 with a 5 K overshoot.
//!
//! Demonstrates:
//! - A realistic parameter set completes a cycle inside the step budget
//! - Cycling is slow (far under 20 starts per hour)
//! - Repeated attempts settle as the room warms toward balance
//! - A badly undersized compressor yields the no-cycle outcome, not an error

use hf_catalog::{BuildingParameters, performance_curve};
use hf_sim::{CycleOptions, SingleCycleSolver};

fn room_with_57l_loop() -> BuildingParameters {
    BuildingParameters {
        heat_loss_factor_w_per_k: 88.0,
        emitter_std_power_w: 4500.0,
        thermal_mass_kj_per_m2_k: 150.0,
        floor_area_m2: 28.0,
        fluid_volume_l: Some(57.0),
    }
}

#[test]
fn mild_weather_cycle_completes_slowly() {
    let curve = performance_curve("wm85-amb+7").expect("builtin curve");
    let mut solver = SingleCycleSolver::new(
        &room_with_57l_loop(),
        &curve,
        14.0,
        CycleOptions::new(40.0, 2400.0),
    )
    .expect("solver construction");

    let outcome = solver.iterate();

    let on = outcome.on_duration_min.expect("cycle should complete: on");
    let off = outcome.off_duration_min.expect("cycle should complete: off");
    assert!(on > 0.0, "on duration must be positive, got {on}");
    assert!(off > 0.0, "off duration must be positive, got {off}");

    let starts_per_hour = 60.0 / (on + off);
    assert!(
        starts_per_hour < 20.0,
        "cycling too fast: {starts_per_hour:.1} starts/hour (on={on:.1} off={off:.1})"
    );

    assert!(outcome.elec_wh > 0.0);
    // Coasting draws nothing; the electrical series must go quiet after the
    // compressor stops.
    let last = solver.series().elec_wh.len() - 1;
    assert_eq!(solver.series().elec_wh[last], 0.0);
    assert!(solver.series().cop[last].is_none());

    println!(
        "cycle: on={on:.1} min, off={off:.1} min, {starts_per_hour:.2} starts/hour, {:.0} Wh",
        outcome.elec_wh
    );
}

#[test]
fn repeated_attempts_settle() {
    let curve = performance_curve("wm85-amb+7").expect("builtin curve");
    let mut solver = SingleCycleSolver::new(
        &room_with_57l_loop(),
        &curve,
        14.0,
        CycleOptions::new(40.0, 2400.0),
    )
    .expect("solver construction");

    let first = solver.iterate();
    let mut last = first;
    for _ in 0..7 {
        last = solver.iterate();
    }

    assert_eq!(solver.iterations(), 8);
    assert!(
        last.room_delta_c.abs() < first.room_delta_c.abs(),
        "room drift should shrink: first {:.3}, last {:.3}",
        first.room_delta_c,
        last.room_delta_c
    );
    // The room only warms in this scenario.
    assert!(solver.current_temp_c() > 14.0);
}

#[test]
fn undersized_compressor_reports_no_cycle() {
    let curve = performance_curve("wm85-amb+7").expect("builtin curve");
    let options = CycleOptions::new(40.0, 400.0);
    let mut solver = SingleCycleSolver::new(&room_with_57l_loop(), &curve, 14.0, options)
        .expect("solver construction");

    let outcome = solver.iterate();
    assert!(outcome.on_duration_min.is_none());
    assert!(outcome.off_duration_min.is_none());
    assert_eq!(solver.series().time_min.len(), options.max_steps);
}
