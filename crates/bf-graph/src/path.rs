//! Flow-path resolution: turning junction chains into Node-to-Node paths.

use std::collections::HashSet;

use bf_core::{NodeId, PipeId};
use tracing::{debug, warn};

use crate::error::{GraphError, GraphResult};
use crate::topology::{EndpointKind, Topology};

/// A resolved, ordered sequence of pipes connecting two nodes.
///
/// The first pipe starts at `source` and the last one ends at `destination`; every
/// pipe in between is linked junction-to-junction. Built once at setup and never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowPath {
    pub source: NodeId,
    pub destination: NodeId,
    pub pipes: Vec<PipeId>,
}

impl FlowPath {
    /// The reference pipe (first in the chain).
    pub fn reference_pipe(&self) -> Option<PipeId> {
        self.pipes.first().copied()
    }
}

/// Pipe names visited by [`resolve_path`] and the node the chain ends at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChain {
    pub pipes: Vec<String>,
    pub destination: String,
}

/// A start pipe whose chain could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPipe {
    pub pipe: String,
    pub error: GraphError,
}

/// Result of resolving every node-rooted pipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    pub paths: Vec<FlowPath>,
    pub skipped: Vec<SkippedPipe>,
}

/// Follow the chain starting at `start_pipe` until a pipe ends at a node.
///
/// The start pipe must be fed by a node. Junction destinations name the next pipe;
/// a node destination ends the chain. Fails with [`GraphError::BrokenChain`] when a
/// referenced pipe or node is missing and with [`GraphError::CyclicTopology`] when
/// a pipe is visited twice.
pub fn resolve_path(topology: &Topology, start_pipe: &str) -> GraphResult<ResolvedChain> {
    let first = topology
        .pipe_by_name(start_pipe)
        .ok_or_else(|| GraphError::BrokenChain {
            at: start_pipe.to_string(),
            missing: start_pipe.to_string(),
        })?;
    if !first.from.is_node() {
        return Err(GraphError::NotNodeRooted {
            pipe: start_pipe.to_string(),
        });
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut pipes = Vec::new();
    let mut current = first;

    loop {
        if !visited.insert(current.name.as_str()) {
            return Err(GraphError::CyclicTopology {
                pipe: current.name.clone(),
            });
        }
        pipes.push(current.name.clone());

        match current.to.kind {
            EndpointKind::Node => {
                if topology.node_id(&current.to.id).is_none() {
                    return Err(GraphError::BrokenChain {
                        at: current.name.clone(),
                        missing: current.to.id.clone(),
                    });
                }
                return Ok(ResolvedChain {
                    pipes,
                    destination: current.to.id.clone(),
                });
            }
            EndpointKind::Junction => {
                current = topology.pipe_by_name(&current.to.id).ok_or_else(|| {
                    GraphError::BrokenChain {
                        at: current.name.clone(),
                        missing: current.to.id.clone(),
                    }
                })?;
            }
        }
    }
}

fn resolve_flow_path(topology: &Topology, start_pipe: &str) -> GraphResult<FlowPath> {
    let chain = resolve_path(topology, start_pipe)?;

    let first = topology
        .pipe_by_name(start_pipe)
        .ok_or_else(|| GraphError::BrokenChain {
            at: start_pipe.to_string(),
            missing: start_pipe.to_string(),
        })?;
    let source = topology
        .node_id(&first.from.id)
        .ok_or_else(|| GraphError::BrokenChain {
            at: start_pipe.to_string(),
            missing: first.from.id.clone(),
        })?;
    let destination = topology
        .node_id(&chain.destination)
        .ok_or_else(|| GraphError::BrokenChain {
            at: start_pipe.to_string(),
            missing: chain.destination.clone(),
        })?;

    let pipes = chain
        .pipes
        .iter()
        .map(|name| {
            topology.pipe_id(name).ok_or_else(|| GraphError::BrokenChain {
                at: start_pipe.to_string(),
                missing: name.clone(),
            })
        })
        .collect::<GraphResult<Vec<_>>>()?;

    Ok(FlowPath {
        source,
        destination,
        pipes,
    })
}

/// Resolve every pipe fed by a node, in pipe insertion order.
///
/// Pipes whose chain fails to resolve are collected in [`PathSet::skipped`] rather
/// than aborting the whole set.
pub fn resolve_all(topology: &Topology) -> PathSet {
    let mut set = PathSet::default();
    for pipe in topology.pipes().iter().filter(|p| p.from.is_node()) {
        match resolve_flow_path(topology, &pipe.name) {
            Ok(path) => set.paths.push(path),
            Err(error) => set.skipped.push(SkippedPipe {
                pipe: pipe.name.clone(),
                error,
            }),
        }
    }
    set
}

/// Resolve all flow paths, logging and dropping the ones that fail.
pub fn build_flow_paths(topology: &Topology) -> Vec<FlowPath> {
    let set = resolve_all(topology);
    for skipped in &set.skipped {
        warn!(pipe = %skipped.pipe, error = %skipped.error, "skipping unresolvable flow path");
    }
    debug!(
        paths = set.paths.len(),
        skipped = set.skipped.len(),
        "flow paths resolved"
    );
    set.paths
}
