use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use bf_app::{
    AppError, AppResult, IterationPolicy, RunOptions, TickProgress, project_service, query,
    run_service,
};
use tracing::warn;

#[derive(Parser)]
#[command(name = "bf-cli")]
#[command(about = "bwrflow CLI - BWR coolant network transport", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate network file syntax and structure
    Validate {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
    },
    /// Resolve and list the flow paths of a network
    Paths {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
    },
    /// Run the transport simulation
    Run {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
        /// Number of ticks (overrides the file)
        #[arg(long)]
        ticks: Option<usize>,
        /// Tick length in seconds (overrides the file)
        #[arg(long)]
        dt: Option<f64>,
        /// Record every N-th tick (overrides the file)
        #[arg(long)]
        record_every: Option<usize>,
        /// Iterate friction factors to this relative tolerance instead of three fixed passes
        #[arg(long)]
        rel_tol: Option<f64>,
        /// Pass cap when --rel-tol is given
        #[arg(long, default_value_t = 20)]
        max_passes: usize,
        /// Pace ticks to wall-clock time
        #[arg(long)]
        realtime: bool,
        /// Node whose water level is reported
        #[arg(long, default_value = "ReactorVessel")]
        level_node: String,
        /// Write recorded node states to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { network_path } => cmd_validate(&network_path),
        Commands::Paths { network_path } => cmd_paths(&network_path),
        Commands::Run {
            network_path,
            ticks,
            dt,
            record_every,
            rel_tol,
            max_passes,
            realtime,
            level_node,
            csv,
        } => {
            let policy = match rel_tol {
                Some(rel_tol) => IterationPolicy::Tolerance {
                    rel_tol,
                    max_passes,
                },
                None => IterationPolicy::default(),
            };
            let options = RunOptions {
                dt_s: dt,
                ticks,
                record_every,
                policy,
            };
            cmd_run(&network_path, &options, realtime, &level_node, csv.as_deref())
        }
    }
}

fn cmd_validate(network_path: &Path) -> AppResult<()> {
    println!("Validating network: {}", network_path.display());
    let file = project_service::load_network(network_path)?;
    let summary = project_service::summarize(&file);
    println!("✓ Network is valid");
    println!(
        "  {} (v{}): {} nodes, {} pipes, {} node-rooted",
        summary.name,
        summary.version,
        summary.node_count,
        summary.pipe_count,
        summary.node_rooted_pipes
    );
    Ok(())
}

fn cmd_paths(network_path: &Path) -> AppResult<()> {
    let file = project_service::load_network(network_path)?;
    let model = bf_app::build_property_model(file.fluid)?;
    let topology = bf_app::compile_network(&file, model.as_ref())?;
    let listing = query::list_paths(&topology);

    if listing.paths.is_empty() {
        println!("No flow paths found in network");
    } else {
        println!("Flow paths:");
        for path in &listing.paths {
            println!(
                "  {} -> {} via {}",
                path.source,
                path.destination,
                path.pipes.join(" > ")
            );
        }
    }
    if !listing.skipped.is_empty() {
        println!("\nSkipped pipes:");
        for (pipe, error) in &listing.skipped {
            println!("  {}: {}", pipe, error);
        }
    }
    Ok(())
}

fn cmd_run(
    network_path: &Path,
    options: &RunOptions,
    realtime: bool,
    level_node: &str,
    csv: Option<&Path>,
) -> AppResult<()> {
    let file = project_service::load_network(network_path)?;
    let resolved = options.resolve(&file);
    println!("Running network: {}", file.name);
    println!("  dt = {:.3} s, ticks = {}", resolved.dt, resolved.ticks);

    let tick_len = if realtime {
        Some(run_service::tick_duration(&resolved)?)
    } else {
        None
    };
    let mut last_emit = Instant::now();
    let mut next_tick = Instant::now();
    let response = run_service::run_network_with_progress(
        &file,
        options,
        Some(&mut |progress| {
            if let Some(due) = tick_len.and_then(|len| next_tick.checked_add(len)) {
                next_tick = due;
                if let Some(wait) = due.checked_duration_since(Instant::now()) {
                    std::thread::sleep(wait);
                }
            }
            if progress.tick == progress.ticks || last_emit.elapsed().as_millis() >= 100 {
                render_cli_progress(&progress);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    let summary = &response.summary;
    println!("✓ Simulation completed");
    println!("  Ticks: {} ({:.3} s simulated)", summary.ticks, summary.sim_time_s);
    println!("  Mass moved: {:.3} kg", summary.moved_mass_kg);
    println!("  Skipped path-ticks: {}", summary.skipped_path_ticks);
    println!("  Thermal power: {:.6}", summary.final_thermal_power);
    println!("  Wall time: {:.3} s", summary.wall_time_s);

    println!("\nNodes:");
    for node in response.simulation.topology().nodes() {
        println!(
            "  {:<16} m={:.3} kg  h={:.1} J/kg  V={:.4} m³",
            node.name, node.state.mass_kg, node.state.h_j_per_kg, node.state.volume_m3
        );
    }

    match query::vessel_water_level(&response.simulation, level_node) {
        Ok(level) => println!("\nWater level ({}): {:.3} m", level_node, level),
        Err(AppError::InvalidInput(_)) => {}
        Err(e) => warn!(node = level_node, error = %e, "water level unavailable"),
    }

    if let Some(path) = csv {
        let text = query::records_to_csv(&response.records);
        std::fs::write(path, text).map_err(|source| AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        println!(
            "✓ Exported {} records to {}",
            response.records.len(),
            path.display()
        );
    }

    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(progress: &TickProgress) {
    let width = 28usize;
    let filled = ((progress.fraction_complete * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  tick={}/{}  t={:.3}s  moved={:.3}kg  skipped={}  power={:.4}",
        bar,
        progress.fraction_complete * 100.0,
        progress.tick,
        progress.ticks,
        progress.sim_time_s,
        progress.moved_mass_kg,
        progress.skipped_paths,
        progress.thermal_power
    );
    let _ = io::stdout().flush();
}
