//! Run execution service.

use std::time::{Duration, Instant};

use bf_flow::{FrictionSolver, IterationPolicy};
use bf_project::schema::{NetworkFile, SimulationDef};
use bf_sim::{SimOptions, SimRecord, Simulation, TransportIntegrator};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::progress::TickProgress;
use crate::runtime_compile::{build_property_model, build_reactor, compile_network};

/// Overrides applied on top of the file's `simulation` section.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub dt_s: Option<f64>,
    pub ticks: Option<usize>,
    pub record_every: Option<usize>,
    pub policy: IterationPolicy,
}

impl RunOptions {
    /// Effective simulation options for a file.
    pub fn resolve(&self, file: &NetworkFile) -> SimOptions {
        let base = file.simulation.clone().unwrap_or_else(SimulationDef::default);
        SimOptions {
            dt: self.dt_s.unwrap_or(base.dt_s),
            ticks: self.ticks.unwrap_or(base.ticks),
            record_every: self.record_every.unwrap_or(base.record_every),
        }
    }
}

/// Wall-clock length of one tick, for pacing a run in real time.
pub fn tick_duration(options: &SimOptions) -> AppResult<Duration> {
    options.validate()?;
    Duration::try_from_secs_f64(options.dt).map_err(|e| {
        AppError::InvalidInput(format!(
            "dt = {} s cannot be paced in real time: {}",
            options.dt, e
        ))
    })
}

/// Aggregate figures for a finished run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub ticks: usize,
    pub sim_time_s: f64,
    pub moved_mass_kg: f64,
    /// Sum over ticks of the number of skipped paths.
    pub skipped_path_ticks: usize,
    pub final_thermal_power: f64,
    pub wall_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug)]
pub struct RunResponse {
    pub records: Vec<SimRecord>,
    pub summary: RunSummary,
    pub simulation: Simulation,
}

/// Compile a file into a simulation ready to tick.
pub fn prepare(file: &NetworkFile, options: &RunOptions) -> AppResult<(Simulation, SimOptions)> {
    let model = build_property_model(file.fluid)?;
    let topology = compile_network(file, model.as_ref())?;
    let reactor = build_reactor(file)?;
    let solver = FrictionSolver::new(options.policy)?;
    let sim_options = options.resolve(file);
    sim_options.validate()?;

    let simulation = Simulation::new(topology, TransportIntegrator::new(model, solver), reactor);
    Ok((simulation, sim_options))
}

pub fn run_network(file: &NetworkFile, options: &RunOptions) -> AppResult<RunResponse> {
    run_network_with_progress(file, options, None)
}

/// Run a network to completion, reporting progress after every tick.
pub fn run_network_with_progress(
    file: &NetworkFile,
    options: &RunOptions,
    mut progress_cb: Option<&mut dyn FnMut(TickProgress)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let (mut simulation, sim_options) = prepare(file, options)?;

    let mut summary = RunSummary::default();
    let records = simulation.run_with(&sim_options, |sim, report| {
        summary.moved_mass_kg += report.moved_mass_kg();
        summary.skipped_path_ticks += report.skipped();
        if let Some(cb) = progress_cb.as_deref_mut() {
            cb(TickProgress {
                tick: sim.tick_count(),
                ticks: sim_options.ticks,
                sim_time_s: sim.time_s(),
                fraction_complete: sim.tick_count() as f64 / sim_options.ticks.max(1) as f64,
                moved_mass_kg: report.moved_mass_kg(),
                skipped_paths: report.skipped(),
                thermal_power: sim.reactor().thermal_power(),
            });
        }
    })?;

    summary.ticks = simulation.tick_count();
    summary.sim_time_s = simulation.time_s();
    summary.final_thermal_power = simulation.reactor().thermal_power();
    summary.wall_time_s = started.elapsed().as_secs_f64();
    info!(
        ticks = summary.ticks,
        moved_kg = summary.moved_mass_kg,
        skipped = summary.skipped_path_ticks,
        wall_s = summary.wall_time_s,
        "run complete"
    );

    Ok(RunResponse {
        records,
        summary,
        simulation,
    })
}
