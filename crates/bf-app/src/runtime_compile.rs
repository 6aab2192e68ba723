//! Runtime compilation of a NetworkFile into a primed topology.

use std::sync::Arc;

use bf_fluids::{LiquidWater, PropertyModel};
use bf_graph::{Endpoint, PipeGeometry, Topology, TopologyBuilder};
use bf_project::schema::{EndpointDef, FluidDef, InitialDef, NetworkFile};
use bf_sim::{InitialInventory, PointReactor, prime_node};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Property backend selected by the file.
pub fn build_property_model(fluid: FluidDef) -> AppResult<Arc<dyn PropertyModel>> {
    match fluid {
        FluidDef::LiquidWater => Ok(Arc::new(LiquidWater::new())),
        #[cfg(feature = "coolprop")]
        FluidDef::CoolProp => Ok(Arc::new(bf_fluids::CoolPropWater::new())),
        #[cfg(not(feature = "coolprop"))]
        FluidDef::CoolProp => Err(AppError::Unsupported {
            message: "CoolProp backend requires the `coolprop` feature".to_string(),
        }),
    }
}

fn endpoint(def: &EndpointDef) -> Endpoint {
    match def {
        EndpointDef::Node { id } => Endpoint::node(id.as_str()),
        EndpointDef::Junction { id } => Endpoint::junction(id.as_str()),
    }
}

/// Prime every node from its inventory and build the topology store.
pub fn compile_network(file: &NetworkFile, model: &dyn PropertyModel) -> AppResult<Topology> {
    let mut builder = TopologyBuilder::new();

    for node in &file.nodes {
        let inventory = match node.initial {
            InitialDef::Volume { volume_m3 } => InitialInventory::Volume(volume_m3),
            InitialDef::Mass { mass_kg } => InitialInventory::Mass(mass_kg),
        };
        let state = prime_node(
            model,
            node.temperature_c,
            node.pressure_pa,
            node.max_volume_m3,
            inventory,
        )
        .map_err(|e| AppError::Compile(format!("Node '{}': {}", node.id, e)))?;
        builder.add_node(node.id.as_str(), state);
    }

    for pipe in &file.pipes {
        builder.add_pipe(
            pipe.id.as_str(),
            PipeGeometry::new(pipe.diameter_mm, pipe.length_m, pipe.minor_k),
            endpoint(&pipe.from),
            endpoint(&pipe.to),
        );
    }

    let topology = builder.build()?;
    info!(
        network = %file.name,
        nodes = topology.nodes().len(),
        pipes = topology.pipes().len(),
        mass_kg = topology.total_mass_kg(),
        "network compiled"
    );
    Ok(topology)
}

/// Reactor from the file, or a cold core with rods inserted.
pub fn build_reactor(file: &NetworkFile) -> AppResult<PointReactor> {
    match &file.reactor {
        Some(def) => Ok(PointReactor::new(def.initial_neutrons, def.rod_position)?),
        None => Ok(PointReactor::default()),
    }
}
