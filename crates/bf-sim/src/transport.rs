//! Transport step: pressure-driven mass and energy exchange along every flow path.

use std::sync::Arc;

use bf_core::NodeId;
use bf_core::units::pa;
use bf_flow::{FlowDirection, FrictionSolver, path_segments};
use bf_fluids::PropertyModel;
use bf_graph::{FlowPath, NodeState, Topology};
use tracing::{debug, warn};

use crate::control_volume::{Transfer, transfer};
use crate::error::{SimError, SimResult};

/// What happened on one path during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome {
    /// Mass moved (possibly zero when the donor is empty or the receiver full).
    Transferred {
        direction: FlowDirection,
        mass_kg: f64,
        energy_j: f64,
    },
    /// End pressures were equal.
    NoFlow,
    /// A property or solver failure; neither node was touched.
    Skipped { reason: String },
}

/// Per-path outcomes of one tick, in path order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub outcomes: Vec<PathOutcome>,
}

impl TickReport {
    /// Total mass moved across all paths [kg].
    pub fn moved_mass_kg(&self) -> f64 {
        self.outcomes
            .iter()
            .map(|o| match o {
                PathOutcome::Transferred { mass_kg, .. } => *mass_kg,
                _ => 0.0,
            })
            .sum()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PathOutcome::Skipped { .. }))
            .count()
    }
}

/// Advances node inventories along resolved flow paths.
///
/// Paths are processed one after another against the live topology, so a later
/// path sees what earlier paths did in the same tick.
#[derive(Clone)]
pub struct TransportIntegrator {
    model: Arc<dyn PropertyModel>,
    solver: FrictionSolver,
}

impl std::fmt::Debug for TransportIntegrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportIntegrator")
            .field("model", &self.model.name())
            .field("solver", &self.solver)
            .finish()
    }
}

impl TransportIntegrator {
    pub fn new(model: Arc<dyn PropertyModel>, solver: FrictionSolver) -> Self {
        Self { model, solver }
    }

    pub fn model(&self) -> &dyn PropertyModel {
        self.model.as_ref()
    }

    /// Advance every path by `dt_s` seconds, mutating node states in place.
    ///
    /// Per-path property or solver failures are logged and reported as
    /// [`PathOutcome::Skipped`]; only an invalid time step or a path that names
    /// nodes outside the topology fails the whole tick.
    pub fn step(
        &self,
        topology: &mut Topology,
        paths: &[FlowPath],
        dt_s: f64,
    ) -> SimResult<TickReport> {
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive and finite",
            });
        }

        let mut report = TickReport {
            outcomes: Vec::with_capacity(paths.len()),
        };

        for (index, path) in paths.iter().enumerate() {
            let source = topology.state(path.source)?;
            let destination = topology.state(path.destination)?;

            let direction =
                FlowDirection::from_pressures(source.pressure_pa, destination.pressure_pa);
            let (up_id, up, down_id, down) = match direction {
                FlowDirection::NoFlow => {
                    report.outcomes.push(PathOutcome::NoFlow);
                    continue;
                }
                FlowDirection::SourceToDestination => {
                    (path.source, source, path.destination, destination)
                }
                FlowDirection::Reversed => (path.destination, destination, path.source, source),
            };

            let outcome = match self.plan(topology, path, up, down, dt_s) {
                Ok(planned) => {
                    if planned.mass_kg > 0.0 {
                        commit(topology, up_id, down_id, &planned)?;
                    }
                    debug!(
                        path = index,
                        %direction,
                        mass_kg = planned.mass_kg,
                        "path transferred"
                    );
                    PathOutcome::Transferred {
                        direction,
                        mass_kg: planned.mass_kg,
                        energy_j: planned.energy_j,
                    }
                }
                Err(e) => {
                    warn!(path = index, error = %e, "skipping flow path for this tick");
                    PathOutcome::Skipped {
                        reason: e.to_string(),
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    /// Work out the transfer for one path without touching the topology.
    ///
    /// Remaining capacity is converted to mass with the downstream density, the same
    /// density that turns the receiver's new mass back into volume.
    fn plan(
        &self,
        topology: &Topology,
        path: &FlowPath,
        up: NodeState,
        down: NodeState,
        dt_s: f64,
    ) -> SimResult<Transfer> {
        let segments = path_segments(topology, path)?;
        let up_pack = self.model.property_pack(up.pressure(), up.temperature())?;
        let rho_down = self.model.density(down.pressure(), down.temperature())?;

        let dp = pa((up.pressure_pa - down.pressure_pa).abs());
        let solution = self.solver.solve(&segments, dp, up_pack.rho, up_pack.mu)?;

        let candidate = solution.mass_rate(up_pack.rho).value * dt_s;
        let capacity = down.free_volume_m3() * rho_down.value;
        let mass_kg = candidate.min(up.mass_kg).min(capacity).max(0.0);

        Ok(transfer(up, down, mass_kg, up_pack.rho.value, rho_down.value))
    }
}

fn commit(topology: &mut Topology, up: NodeId, down: NodeId, t: &Transfer) -> SimResult<()> {
    topology.set_state(up, t.upstream)?;
    topology.set_state(down, t.downstream)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_core::units::degc;
    use bf_fluids::LiquidWater;
    use bf_graph::{Endpoint, PipeGeometry, TopologyBuilder, build_flow_paths};

    fn integrator() -> TransportIntegrator {
        TransportIntegrator::new(Arc::new(LiquidWater::new()), FrictionSolver::default())
    }

    fn pair(p_a: f64, p_b: f64) -> (Topology, Vec<FlowPath>) {
        let mut b = TopologyBuilder::new();
        b.add_node("A", NodeState::new(35.0, p_a, 10.0, 9_940.0, 146_800.0, 100.0));
        b.add_node("B", NodeState::new(35.0, p_b, 10.0, 9_940.0, 146_800.0, 100.0));
        b.add_pipe(
            "P",
            PipeGeometry::new(100.0, 10.0, 1.0),
            Endpoint::node("A"),
            Endpoint::node("B"),
        );
        let topology = b.build().unwrap();
        let paths = build_flow_paths(&topology);
        (topology, paths)
    }

    #[test]
    fn equal_pressures_leave_state_untouched() {
        let (mut topology, paths) = pair(200_000.0, 200_000.0);
        let before: Vec<NodeState> = topology.nodes().iter().map(|n| n.state).collect();
        let report = integrator().step(&mut topology, &paths, 0.1).unwrap();
        assert_eq!(report.outcomes, vec![PathOutcome::NoFlow]);
        let after: Vec<NodeState> = topology.nodes().iter().map(|n| n.state).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn reversed_path_drains_destination() {
        let (mut topology, paths) = pair(200_000.0, 230_000.0);
        let report = integrator().step(&mut topology, &paths, 0.1).unwrap();
        match &report.outcomes[0] {
            PathOutcome::Transferred {
                direction, mass_kg, ..
            } => {
                assert_eq!(*direction, FlowDirection::Reversed);
                assert!(*mass_kg > 0.0);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        let a = topology.node_by_name("A").unwrap().state;
        let b = topology.node_by_name("B").unwrap().state;
        assert!(a.mass_kg > 9_940.0);
        assert!(b.mass_kg < 9_940.0);
    }

    #[test]
    fn out_of_envelope_node_skips_path() {
        let mut b = TopologyBuilder::new();
        b.add_node("Hot", NodeState::new(150.0, 230_000.0, 10.0, 9_000.0, 600_000.0, 100.0));
        b.add_node("Cold", NodeState::new(35.0, 200_000.0, 10.0, 9_940.0, 146_800.0, 100.0));
        b.add_pipe(
            "P",
            PipeGeometry::new(100.0, 10.0, 1.0),
            Endpoint::node("Hot"),
            Endpoint::node("Cold"),
        );
        let mut topology = b.build().unwrap();
        let paths = build_flow_paths(&topology);
        let before: Vec<NodeState> = topology.nodes().iter().map(|n| n.state).collect();

        let report = integrator().step(&mut topology, &paths, 0.1).unwrap();
        assert_eq!(report.skipped(), 1);
        let after: Vec<NodeState> = topology.nodes().iter().map(|n| n.state).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn invalid_dt_rejected() {
        let (mut topology, paths) = pair(230_000.0, 200_000.0);
        assert!(integrator().step(&mut topology, &paths, 0.0).is_err());
        assert!(integrator().step(&mut topology, &paths, f64::NAN).is_err());
    }

    #[test]
    fn full_destination_receives_nothing() {
        let mut b = TopologyBuilder::new();
        b.add_node("A", NodeState::new(35.0, 230_000.0, 10.0, 9_940.0, 146_800.0, 100.0));
        b.add_node("B", NodeState::new(35.0, 200_000.0, 10.0, 9_940.0, 146_800.0, 10.0));
        b.add_pipe(
            "P",
            PipeGeometry::new(100.0, 10.0, 1.0),
            Endpoint::node("A"),
            Endpoint::node("B"),
        );
        let mut topology = b.build().unwrap();
        let paths = build_flow_paths(&topology);
        let report = integrator().step(&mut topology, &paths, 0.1).unwrap();
        assert_eq!(report.moved_mass_kg(), 0.0);
        assert_eq!(topology.node_by_name("A").unwrap().state.mass_kg, 9_940.0);
    }

    #[test]
    fn capacity_measured_at_receiver_density() {
        let water = LiquidWater::new();
        let rho_hot = water.density(pa(200_000.0), degc(90.0)).unwrap().value;
        let mut b = TopologyBuilder::new();
        b.add_node("Cold", NodeState::new(20.0, 300_000.0, 10.0, 9_980.0, 84_000.0, 100.0));
        b.add_node("Hot", NodeState::new(90.0, 200_000.0, 0.5, 0.5 * rho_hot, 377_000.0, 1.0));
        b.add_pipe(
            "P",
            PipeGeometry::new(100.0, 10.0, 1.0),
            Endpoint::node("Cold"),
            Endpoint::node("Hot"),
        );
        let mut topology = b.build().unwrap();
        let paths = build_flow_paths(&topology);

        let report = integrator().step(&mut topology, &paths, 100.0).unwrap();
        let moved = report.moved_mass_kg();
        assert!((moved - 0.5 * rho_hot).abs() < 1e-9 * moved, "moved = {moved}");

        let hot = topology.node_by_name("Hot").unwrap().state;
        assert!((hot.volume_m3 - 1.0).abs() < 1e-12);
        assert!(hot.volume_m3 <= hot.max_volume_m3);
    }
}
