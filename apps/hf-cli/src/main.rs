use clap::{Parser, Subcommand};
use hf_app::{
    AppError, AppResult, DriverProgressEvent, RunManifest, RunMode, RunOptions, RunRequest,
    RunSummary, RunTimingSummary, report, run_service, scenario,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hf-cli")]
#[command(about = "HeatFlow CLI - Heat pump and heated-room simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and preset references
    Validate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// List built-in presets
    Presets {
        /// Catalog section: buildings, curves, ambient, schedules, thermal-mass
        #[arg(long)]
        kind: Option<String>,
    },
    /// Run a scenario (cached runs are reused)
    Run {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        fresh: bool,
        /// Suppress per-pass progress output
        #[arg(long)]
        quiet: bool,
    },
    /// List cached runs
    Runs {
        /// Directory holding the run store
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Show details of a cached run
    Show {
        /// Run ID to display
        run_id: String,
        /// Directory holding the run store
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Export a time series from a run
    Export {
        /// Run ID
        run_id: String,
        /// Series name (see `show` for the mode's series)
        series: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Directory holding the run store
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Presets { kind } => cmd_presets(kind.as_deref()),
        Commands::Run {
            scenario_path,
            fresh,
            quiet,
        } => cmd_run(&scenario_path, !fresh, quiet),
        Commands::Runs { dir } => cmd_runs(&dir),
        Commands::Show { run_id, dir } => cmd_show(&dir, &run_id),
        Commands::Export {
            run_id,
            series,
            output,
            dir,
        } => cmd_export(&dir, &run_id, &series, output.as_deref()),
    }
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let loaded = scenario::load_yaml(scenario_path)?;
    println!("✓ Scenario '{}' is valid", loaded.name);
    Ok(())
}

fn cmd_presets(kind: Option<&str>) -> AppResult<()> {
    match kind {
        None => {
            print_preset_section("Buildings", &hf_catalog::building_keys());
            print_preset_section("Performance curves", &hf_catalog::performance_curve_keys());
            print_preset_section("Ambient profiles", &hf_catalog::ambient_keys());
            print_preset_section("Target schedules", &hf_catalog::target_schedule_keys());
            print_preset_section("Thermal mass categories", &hf_catalog::thermal_mass_keys());
        }
        Some("buildings") => print_preset_section("Buildings", &hf_catalog::building_keys()),
        Some("curves") => {
            print_preset_section("Performance curves", &hf_catalog::performance_curve_keys())
        }
        Some("ambient") => print_preset_section("Ambient profiles", &hf_catalog::ambient_keys()),
        Some("schedules") => {
            print_preset_section("Target schedules", &hf_catalog::target_schedule_keys())
        }
        Some("thermal-mass") => {
            print_preset_section("Thermal mass categories", &hf_catalog::thermal_mass_keys())
        }
        Some(other) => {
            return Err(AppError::InvalidInput(format!(
                "Unknown preset kind: {} (expected buildings, curves, ambient, schedules, or thermal-mass)",
                other
            )));
        }
    }
    Ok(())
}

fn print_preset_section(title: &str, keys: &[&str]) {
    println!("{}:", title);
    for key in keys {
        println!("  {}", key);
    }
}

fn cmd_run(scenario_path: &Path, use_cache: bool, quiet: bool) -> AppResult<()> {
    println!("Running scenario: {}", scenario_path.display());

    // The run store lives next to the scenario file.
    let store_dir = scenario_path.parent().unwrap_or(Path::new("."));
    let request = RunRequest {
        scenario_path,
        store_dir,
        options: RunOptions {
            use_cache,
            solver_version: "0.1.0".to_string(),
        },
    };

    let response = if quiet {
        run_service::ensure_run(&request)?
    } else {
        let response = run_service::ensure_run_with_progress(
            &request,
            Some(&mut |event| render_progress(&event)),
        )?;
        clear_progress_line();
        response
    };

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }

    print_timing_summary(&response.timing);
    print_run_details(&response.manifest);

    Ok(())
}

fn render_progress(event: &DriverProgressEvent) {
    print!(
        "\r  pass {}/{}  signal={:.4} C  threshold={:.4} C",
        event.iteration, event.max_iterations, event.signal_c, event.threshold_c
    );
    let _ = io::stdout().flush();
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(80));
    let _ = io::stdout().flush();
}

fn print_timing_summary(timing: &RunTimingSummary) {
    println!("\nTiming summary:");
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    }
    if timing.solve_time_s > 0.0 {
        println!("  Solve: {:.3}s", timing.solve_time_s);
    }
    if timing.save_time_s > 0.0 {
        println!("  Save:  {:.3}s", timing.save_time_s);
    }
    println!("  Total: {:.3}s", timing.total_time_s);
}

fn print_run_details(manifest: &RunManifest) {
    let convergence = &manifest.convergence;
    println!("\nConvergence:");
    println!(
        "  {} after {} passes (max delta {:.4} C, mean {:.4} C)",
        if convergence.converged {
            "settled"
        } else {
            "stopped at cap"
        },
        convergence.iterations,
        convergence.max_temp_delta_c,
        convergence.mean_temp_delta_c
    );
    print_summary(&manifest.summary);
}

fn print_summary(summary: &RunSummary) {
    println!("\nRun summary:");
    match summary {
        RunSummary::Daily {
            elec_kwh,
            heating_hours,
            mean_cop,
            min_room_c,
            max_room_c,
        } => {
            println!("  Electricity: {:.2} kWh", elec_kwh);
            println!("  Heating time: {:.1} h", heating_hours);
            if let Some(cop) = mean_cop {
                println!("  Mean COP: {:.2}", cop);
            }
            println!("  Room: {:.1} - {:.1} C", min_room_c, max_room_c);
        }
        RunSummary::Cycle {
            on_duration_min,
            off_duration_min,
            duty,
            starts_per_hour,
            elec_wh,
            mean_input_w,
            mean_cop,
            room_delta_c,
            thermostat_period_hr,
        } => {
            if let (Some(on), Some(off)) = (on_duration_min, off_duration_min) {
                println!("  On/off: {:.1} / {:.1} min", on, off);
            } else {
                println!("  Cycle incomplete within the step budget");
            }
            if let Some(duty) = duty {
                println!("  Duty: {:.1}%", duty * 100.0);
            }
            if let Some(starts) = starts_per_hour {
                println!("  Starts per hour: {:.2}", starts);
            }
            println!("  Electricity: {:.0} Wh", elec_wh);
            if let Some(input) = mean_input_w {
                println!("  Mean input: {:.0} W", input);
            }
            if let Some(cop) = mean_cop {
                println!("  Mean COP: {:.2}", cop);
            }
            println!("  Room drift per cycle: {:+.2} C", room_delta_c);
            if let Some(period) = thermostat_period_hr {
                println!("  Thermostat period: {:.1} h per C of band", period);
            }
        }
        RunSummary::ConstantFlow {
            loss_kwh,
            emitted_kwh,
            min_room_c,
            max_room_c,
        } => {
            println!("  Heat lost: {:.2} kWh", loss_kwh);
            println!("  Heat emitted: {:.2} kWh", emitted_kwh);
            println!("  Room: {:.1} - {:.1} C", min_room_c, max_room_c);
        }
    }
}

fn cmd_runs(dir: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(dir)?;

    if runs.is_empty() {
        println!("No cached runs found in {}", dir.display());
    } else {
        println!("Cached runs:");
        for manifest in runs {
            println!(
                "  {}  {}  ({})",
                manifest.run_id, manifest.scenario_name, manifest.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show(dir: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, records) = run_service::load_run(dir, run_id)?;

    println!("\nScenario: {}", manifest.scenario_name);
    println!("Mode: {}", mode_label(&manifest.mode));
    println!("Executed: {}", manifest.timestamp);
    println!("Solver version: {}", manifest.solver_version);

    print_run_details(&manifest);

    println!("\nRecords: {}", records.len());
    println!("Series:");
    for name in report::series_names(&manifest.mode) {
        println!("  {}", name);
    }

    Ok(())
}

fn mode_label(mode: &RunMode) -> String {
    match mode {
        RunMode::Daily { steps_per_hour } => {
            format!("daily thermostat ({} steps/hour)", steps_per_hour)
        }
        RunMode::Cycle {
            steps_per_minute,
            target_lwt_c,
            hp_capacity_w,
        } => format!(
            "single cycle (target LWT {:.1} C, {:.0} W, {} steps/minute)",
            target_lwt_c, hp_capacity_w, steps_per_minute
        ),
        RunMode::ConstantFlow {
            steps_per_hour,
            flow_temp_c,
        } => format!(
            "constant flow ({:.1} C flow, {} steps/hour)",
            flow_temp_c, steps_per_hour
        ),
    }
}

fn cmd_export(dir: &Path, run_id: &str, series: &str, output: Option<&Path>) -> AppResult<()> {
    let (_manifest, records) = run_service::load_run(dir, run_id)?;
    let points = report::extract_series(&records, series)?;

    let mut csv = format!("time,{}\n", series);
    for (t, value) in &points {
        csv.push_str(&format!("{},{}\n", t, value));
    }

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            points.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
