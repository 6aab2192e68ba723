//! Network file validation logic.

use crate::schema::{
    EndpointDef, InitialDef, NetworkFile, NodeDef, PipeDef, ReactorDef, SimulationDef,
};
use std::collections::HashSet;

/// Full-power neutron population; starting populations above it are rejected.
const MAX_NEUTRONS: f64 = 1e11;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Check a network file for everything that can be checked without fluid properties.
///
/// Pipe chains through junctions are not followed here; a broken or cyclic chain
/// only drops that flow path when paths are resolved.
pub fn validate_network(file: &NetworkFile) -> Result<(), ValidationError> {
    if file.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }

    let mut node_ids = HashSet::new();
    for node in &file.nodes {
        if !node_ids.insert(node.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: node.id.clone(),
                context: "nodes".to_string(),
            });
        }
        validate_node(node)?;
    }

    let mut pipe_ids = HashSet::new();
    for pipe in &file.pipes {
        if !pipe_ids.insert(pipe.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: pipe.id.clone(),
                context: "pipes".to_string(),
            });
        }
        validate_pipe(pipe, &node_ids)?;
    }

    if let Some(reactor) = &file.reactor {
        validate_reactor(reactor)?;
    }
    if let Some(sim) = &file.simulation {
        validate_simulation(sim)?;
    }

    Ok(())
}

fn invalid(field: String, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_positive(field: String, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be positive and finite"));
    }
    Ok(())
}

fn require_non_negative(field: String, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, value, "must be non-negative and finite"));
    }
    Ok(())
}

fn validate_node(node: &NodeDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("node '{}' {}", node.id, name);

    if !node.temperature_c.is_finite() {
        return Err(invalid(
            field("temperature_c"),
            node.temperature_c,
            "must be finite",
        ));
    }
    require_positive(field("pressure_pa"), node.pressure_pa)?;
    require_non_negative(field("max_volume_m3"), node.max_volume_m3)?;

    match node.initial {
        InitialDef::Volume { volume_m3 } => {
            require_non_negative(field("initial volume_m3"), volume_m3)?;
            if volume_m3 > node.max_volume_m3 {
                return Err(invalid(
                    field("initial volume_m3"),
                    volume_m3,
                    "exceeds max_volume_m3",
                ));
            }
        }
        InitialDef::Mass { mass_kg } => {
            require_non_negative(field("initial mass_kg"), mass_kg)?;
        }
    }
    Ok(())
}

fn validate_pipe(pipe: &PipeDef, node_ids: &HashSet<&str>) -> Result<(), ValidationError> {
    let field = |name: &str| format!("pipe '{}' {}", pipe.id, name);

    require_positive(field("diameter_mm"), pipe.diameter_mm)?;
    require_positive(field("length_m"), pipe.length_m)?;
    require_non_negative(field("minor_k"), pipe.minor_k)?;

    for (end, endpoint) in [("from", &pipe.from), ("to", &pipe.to)] {
        if let EndpointDef::Node { id } = endpoint {
            if !node_ids.contains(id.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: id.clone(),
                    context: field(end),
                });
            }
        }
    }
    Ok(())
}

fn validate_reactor(reactor: &ReactorDef) -> Result<(), ValidationError> {
    let n = reactor.initial_neutrons;
    if !n.is_finite() || !(1.0..=MAX_NEUTRONS).contains(&n) {
        return Err(invalid(
            "reactor initial_neutrons".to_string(),
            n,
            "must lie between 1 and 1e11",
        ));
    }
    let rod = reactor.rod_position;
    if !rod.is_finite() || !(0.0..=1.0).contains(&rod) {
        return Err(invalid(
            "reactor rod_position".to_string(),
            rod,
            "must lie in [0, 1]",
        ));
    }
    Ok(())
}

fn validate_simulation(sim: &SimulationDef) -> Result<(), ValidationError> {
    require_positive("simulation dt_s".to_string(), sim.dt_s)?;
    if sim.record_every == 0 {
        return Err(ValidationError::InvalidValue {
            field: "simulation record_every".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    Ok(())
}
