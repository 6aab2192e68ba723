//! Topology validation logic.

use std::collections::HashSet;

use bf_core::numeric::{ensure_finite, ensure_non_negative, ensure_positive};

use crate::error::{GraphError, GraphResult};
use crate::topology::{Node, Pipe};

/// Validate node names and initial states against the node invariants.
pub(crate) fn validate_nodes(nodes: &[Node]) -> GraphResult<()> {
    let mut names = HashSet::new();
    for node in nodes {
        if !names.insert(node.name.as_str()) {
            return Err(GraphError::DuplicateNode {
                name: node.name.clone(),
            });
        }

        let s = &node.state;
        let invalid = |what: &'static str| GraphError::InvalidNode {
            name: node.name.clone(),
            what,
        };

        ensure_finite(s.temperature_c, "temperature")
            .map_err(|_| invalid("temperature must be finite"))?;
        ensure_positive(s.pressure_pa, "pressure")
            .map_err(|_| invalid("pressure must be positive"))?;
        ensure_non_negative(s.mass_kg, "mass").map_err(|_| invalid("mass must be non-negative"))?;
        ensure_finite(s.h_j_per_kg, "enthalpy").map_err(|_| invalid("enthalpy must be finite"))?;
        ensure_non_negative(s.max_volume_m3, "max volume")
            .map_err(|_| invalid("max volume must be non-negative"))?;
        ensure_non_negative(s.volume_m3, "volume")
            .map_err(|_| invalid("volume must be non-negative"))?;

        if s.volume_m3 > s.max_volume_m3 {
            return Err(invalid("volume exceeds max volume"));
        }
    }
    Ok(())
}

/// Validate pipe names and geometry. Endpoint references are left to the resolver.
pub(crate) fn validate_pipes(pipes: &[Pipe]) -> GraphResult<()> {
    let mut names = HashSet::new();
    for pipe in pipes {
        if !names.insert(pipe.name.as_str()) {
            return Err(GraphError::DuplicatePipe {
                name: pipe.name.clone(),
            });
        }

        let g = &pipe.geometry;
        let invalid = |what: &'static str| GraphError::InvalidPipe {
            name: pipe.name.clone(),
            what,
        };

        ensure_positive(g.diameter_mm, "diameter")
            .map_err(|_| invalid("diameter must be positive"))?;
        ensure_positive(g.length_m, "length").map_err(|_| invalid("length must be positive"))?;
        ensure_non_negative(g.minor_k, "minor k")
            .map_err(|_| invalid("minor K must be non-negative"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Endpoint, NodeState, PipeGeometry};
    use bf_core::Id;

    fn node(name: &str, state: NodeState) -> Node {
        Node {
            id: Id::from_index(0),
            name: name.into(),
            state,
        }
    }

    fn pipe(name: &str, geometry: PipeGeometry) -> Pipe {
        Pipe {
            id: Id::from_index(0),
            name: name.into(),
            geometry,
            from: Endpoint::node("A"),
            to: Endpoint::node("B"),
        }
    }

    #[test]
    fn validate_empty() {
        assert!(validate_nodes(&[]).is_ok());
        assert!(validate_pipes(&[]).is_ok());
    }

    #[test]
    fn overfilled_node_rejected() {
        let nodes = vec![node(
            "Vessel",
            NodeState::new(35.0, 230_000.0, 930.0, 924_000.0, 146_000.0, 928.0),
        )];
        assert!(matches!(
            validate_nodes(&nodes),
            Err(GraphError::InvalidNode { what: "volume exceeds max volume", .. })
        ));
    }

    #[test]
    fn negative_mass_rejected() {
        let nodes = vec![node(
            "Vessel",
            NodeState::new(35.0, 230_000.0, 1.0, -1.0, 146_000.0, 928.0),
        )];
        assert!(validate_nodes(&nodes).is_err());
    }

    #[test]
    fn zero_pressure_rejected() {
        let nodes = vec![node("Vessel", NodeState::new(35.0, 0.0, 1.0, 1.0, 1.0, 2.0))];
        assert!(validate_nodes(&nodes).is_err());
    }

    #[test]
    fn bad_geometry_rejected() {
        assert!(validate_pipes(&[pipe("P", PipeGeometry::new(0.0, 1.0, 0.0))]).is_err());
        assert!(validate_pipes(&[pipe("P", PipeGeometry::new(10.0, -1.0, 0.0))]).is_err());
        assert!(validate_pipes(&[pipe("P", PipeGeometry::new(10.0, 1.0, f64::NAN))]).is_err());
        assert!(validate_pipes(&[pipe("P", PipeGeometry::new(10.0, 1.0, 0.0))]).is_ok());
    }

    #[test]
    fn duplicate_pipe_rejected() {
        let g = PipeGeometry::new(10.0, 1.0, 0.0);
        let result = validate_pipes(&[pipe("P", g), pipe("P", g)]);
        assert_eq!(result, Err(GraphError::DuplicatePipe { name: "P".into() }));
    }
}
