//! Tick driver and result recording.

use bf_graph::{FlowPath, Topology, build_flow_paths};
use tracing::{debug, info};

use crate::error::{SimError, SimResult};
use crate::reactor::PointReactor;
use crate::transport::{TickReport, TransportIntegrator};

/// Options for simulation runs.
#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Number of ticks to run
    pub ticks: usize,
    /// Record every N-th tick (decimation)
    pub record_every: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 0.1,
            ticks: 100,
            record_every: 1,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        Ok(())
    }
}

/// State of one node at a recorded tick.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSnapshot {
    pub name: String,
    pub mass_kg: f64,
    pub h_j_per_kg: f64,
    pub volume_m3: f64,
}

/// Snapshot of the whole network after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct SimRecord {
    pub tick: usize,
    pub time_s: f64,
    pub nodes: Vec<NodeSnapshot>,
    pub thermal_power: f64,
}

/// A topology with its resolved paths, a transport step and a reactor, driven tick by tick.
#[derive(Debug)]
pub struct Simulation {
    topology: Topology,
    paths: Vec<FlowPath>,
    transport: TransportIntegrator,
    reactor: PointReactor,
    tick: usize,
    time_s: f64,
}

impl Simulation {
    /// Resolve flow paths once and get ready to tick.
    pub fn new(topology: Topology, transport: TransportIntegrator, reactor: PointReactor) -> Self {
        let paths = build_flow_paths(&topology);
        info!(
            nodes = topology.nodes().len(),
            pipes = topology.pipes().len(),
            paths = paths.len(),
            model = transport.model().name(),
            "simulation ready"
        );
        Self {
            topology,
            paths,
            transport,
            reactor,
            tick: 0,
            time_s: 0.0,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn paths(&self) -> &[FlowPath] {
        &self.paths
    }

    pub fn reactor(&self) -> &PointReactor {
        &self.reactor
    }

    pub fn transport(&self) -> &TransportIntegrator {
        &self.transport
    }

    /// Ticks completed so far.
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    /// Advance flow and reactor by one tick.
    pub fn step(&mut self, dt: f64) -> SimResult<TickReport> {
        let report = self.transport.step(&mut self.topology, &self.paths, dt)?;
        self.reactor.step();
        self.tick += 1;
        self.time_s += dt;
        debug!(
            tick = self.tick,
            moved_kg = report.moved_mass_kg(),
            skipped = report.skipped(),
            "tick complete"
        );
        Ok(report)
    }

    /// Current state of every node, in insertion order.
    pub fn snapshot(&self) -> SimRecord {
        SimRecord {
            tick: self.tick,
            time_s: self.time_s,
            nodes: self
                .topology
                .nodes()
                .iter()
                .map(|n| NodeSnapshot {
                    name: n.name.clone(),
                    mass_kg: n.state.mass_kg,
                    h_j_per_kg: n.state.h_j_per_kg,
                    volume_m3: n.state.volume_m3,
                })
                .collect(),
            thermal_power: self.reactor.thermal_power(),
        }
    }

    /// Run `opts.ticks` ticks, recording the start and every `record_every`-th tick.
    pub fn run(&mut self, opts: &SimOptions) -> SimResult<Vec<SimRecord>> {
        self.run_with(opts, |_, _| {})
    }

    /// Like [`Simulation::run`], calling `on_tick` after every tick.
    pub fn run_with<F>(&mut self, opts: &SimOptions, mut on_tick: F) -> SimResult<Vec<SimRecord>>
    where
        F: FnMut(&Simulation, &TickReport),
    {
        opts.validate()?;

        let mut records = vec![self.snapshot()];
        for i in 1..=opts.ticks {
            let report = self.step(opts.dt)?;
            on_tick(&*self, &report);
            if i % opts.record_every == 0 || i == opts.ticks {
                records.push(self.snapshot());
            }
        }
        Ok(records)
    }
}
