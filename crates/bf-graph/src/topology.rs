//! Topology store: control volumes and the pipes between them.

use std::collections::HashMap;

use bf_core::units::{Area, Length, Pressure, Temperature, degc, m, mm, pa};
use bf_core::{NodeId, PipeId};

use crate::error::{GraphError, GraphResult};

/// Mutable state of a control volume.
///
/// Temperature and pressure are fixed for a run; the transport step only changes
/// mass, specific enthalpy and volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeState {
    /// Temperature [°C]
    pub temperature_c: f64,
    /// Pressure [Pa]
    pub pressure_pa: f64,
    /// Liquid volume [m³]
    pub volume_m3: f64,
    /// Liquid mass [kg]
    pub mass_kg: f64,
    /// Specific enthalpy [J/kg]
    pub h_j_per_kg: f64,
    /// Capacity [m³]; nothing flows in once the node is full.
    pub max_volume_m3: f64,
}

impl NodeState {
    pub fn new(
        temperature_c: f64,
        pressure_pa: f64,
        volume_m3: f64,
        mass_kg: f64,
        h_j_per_kg: f64,
        max_volume_m3: f64,
    ) -> Self {
        Self {
            temperature_c,
            pressure_pa,
            volume_m3,
            mass_kg,
            h_j_per_kg,
            max_volume_m3,
        }
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.pressure_pa)
    }

    pub fn temperature(&self) -> Temperature {
        degc(self.temperature_c)
    }

    /// Total enthalpy carried by the node [J].
    pub fn energy_j(&self) -> f64 {
        self.mass_kg * self.h_j_per_kg
    }

    /// Volume still available before the node is full [m³], never negative.
    pub fn free_volume_m3(&self) -> f64 {
        (self.max_volume_m3 - self.volume_m3).max(0.0)
    }
}

/// A control volume in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub state: NodeState,
}

/// Which kind of object a pipe end is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    /// A control volume, referenced by node name.
    Node,
    /// Another pipe segment, referenced by pipe name.
    Junction,
}

/// One end of a pipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub kind: EndpointKind,
    pub id: String,
}

impl Endpoint {
    pub fn node(id: impl Into<String>) -> Self {
        Self {
            kind: EndpointKind::Node,
            id: id.into(),
        }
    }

    pub fn junction(id: impl Into<String>) -> Self {
        Self {
            kind: EndpointKind::Junction,
            id: id.into(),
        }
    }

    pub fn is_node(&self) -> bool {
        self.kind == EndpointKind::Node
    }
}

/// Pipe dimensions and fittings loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeGeometry {
    /// Inner diameter [mm]
    pub diameter_mm: f64,
    /// Length [m]
    pub length_m: f64,
    /// Sum of minor loss coefficients (elbows, fittings)
    pub minor_k: f64,
}

impl PipeGeometry {
    pub fn new(diameter_mm: f64, length_m: f64, minor_k: f64) -> Self {
        Self {
            diameter_mm,
            length_m,
            minor_k,
        }
    }

    pub fn diameter(&self) -> Length {
        mm(self.diameter_mm)
    }

    pub fn length(&self) -> Length {
        m(self.length_m)
    }

    /// Flow cross-section.
    pub fn area(&self) -> Area {
        let d = self.diameter();
        d * d * (std::f64::consts::PI / 4.0)
    }
}

/// A directed pipe segment. Immutable once the topology is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub id: PipeId,
    pub name: String,
    pub geometry: PipeGeometry,
    pub from: Endpoint,
    pub to: Endpoint,
}

/// The topology store: nodes and pipes in insertion order plus name lookup.
///
/// Produced by [`crate::TopologyBuilder::build`]. Pipes never change after that; node
/// states are rewritten by the transport step through [`Topology::set_state`].
#[derive(Debug, Clone)]
pub struct Topology {
    pub(crate) nodes: Vec<Node>,
    pub(crate) pipes: Vec<Pipe>,
    pub(crate) node_names: HashMap<String, NodeId>,
    pub(crate) pipe_names: HashMap<String, PipeId>,
}

impl Topology {
    /// All nodes, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All pipes, in insertion order.
    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    pub fn pipe(&self, id: PipeId) -> Option<&Pipe> {
        self.pipes.get(id.slot())
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.node_names.get(name).copied()
    }

    pub fn pipe_id(&self, name: &str) -> Option<PipeId> {
        self.pipe_names.get(name).copied()
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.node_id(name).and_then(|id| self.node(id))
    }

    pub fn pipe_by_name(&self, name: &str) -> Option<&Pipe> {
        self.pipe_id(name).and_then(|id| self.pipe(id))
    }

    /// Current state of a node.
    pub fn state(&self, id: NodeId) -> GraphResult<NodeState> {
        self.node(id)
            .map(|n| n.state)
            .ok_or_else(|| GraphError::UnknownNode { id: id.to_string() })
    }

    /// Overwrite a node's state.
    pub fn set_state(&mut self, id: NodeId, state: NodeState) -> GraphResult<()> {
        let node = self
            .nodes
            .get_mut(id.slot())
            .ok_or_else(|| GraphError::UnknownNode { id: id.to_string() })?;
        node.state = state;
        Ok(())
    }

    /// Sum of node masses [kg].
    pub fn total_mass_kg(&self) -> f64 {
        self.nodes.iter().map(|n| n.state.mass_kg).sum()
    }

    /// Sum of node enthalpies [J].
    pub fn total_energy_j(&self) -> f64 {
        self.nodes.iter().map(|n| n.state.energy_j()).sum()
    }
}
