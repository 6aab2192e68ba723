//! Incremental topology builder.

use std::collections::HashMap;

use bf_core::{NodeId, PipeId};

use crate::error::GraphResult;
use crate::topology::{Endpoint, Node, NodeState, Pipe, PipeGeometry, Topology};
use crate::validate;

/// Builder for constructing a topology incrementally.
///
/// Use `add_node` and `add_pipe` to build up the store, then call `build()` to
/// validate and freeze it. Pipe endpoints are stored by name and are only followed
/// during path resolution, so a pipe may reference something that is added later
/// (or never; that chain is then skipped when flow paths are built).
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    nodes: Vec<Node>,
    pipes: Vec<Pipe>,
    next_node_id: u32,
    next_pipe_id: u32,
}

impl TopologyBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with its initial state and return its ID.
    pub fn add_node(&mut self, name: impl Into<String>, state: NodeState) -> NodeId {
        let id = NodeId::from_index(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.push(Node {
            id,
            name: name.into(),
            state,
        });
        id
    }

    /// Add a pipe between two endpoints and return its ID.
    pub fn add_pipe(
        &mut self,
        name: impl Into<String>,
        geometry: PipeGeometry,
        from: Endpoint,
        to: Endpoint,
    ) -> PipeId {
        let id = PipeId::from_index(self.next_pipe_id);
        self.next_pipe_id += 1;
        self.pipes.push(Pipe {
            id,
            name: name.into(),
            geometry,
            from,
            to,
        });
        id
    }

    /// Number of nodes added so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of pipes added so far.
    pub fn pipe_count(&self) -> usize {
        self.pipes.len()
    }

    /// Validate and freeze into a `Topology`.
    pub fn build(self) -> GraphResult<Topology> {
        validate::validate_nodes(&self.nodes)?;
        validate::validate_pipes(&self.pipes)?;

        let node_names: HashMap<String, NodeId> =
            self.nodes.iter().map(|n| (n.name.clone(), n.id)).collect();
        let pipe_names: HashMap<String, PipeId> =
            self.pipes.iter().map(|p| (p.name.clone(), p.id)).collect();

        Ok(Topology {
            nodes: self.nodes,
            pipes: self.pipes,
            node_names,
            pipe_names,
        })
    }
}
