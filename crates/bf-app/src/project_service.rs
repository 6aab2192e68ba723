//! Network file loading and introspection.

use std::path::Path;

use bf_project::schema::{EndpointDef, NetworkFile};

use crate::error::AppResult;

/// Summary of a network for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSummary {
    pub name: String,
    pub version: u32,
    pub node_count: usize,
    pub pipe_count: usize,
    /// Pipes fed directly by a node (candidate path starts).
    pub node_rooted_pipes: usize,
    pub has_reactor: bool,
}

/// Load, migrate and validate a network file (YAML or JSON by extension).
pub fn load_network(path: &Path) -> AppResult<NetworkFile> {
    Ok(bf_project::load(path)?)
}

pub fn summarize(file: &NetworkFile) -> NetworkSummary {
    NetworkSummary {
        name: file.name.clone(),
        version: file.version,
        node_count: file.nodes.len(),
        pipe_count: file.pipes.len(),
        node_rooted_pipes: file
            .pipes
            .iter()
            .filter(|p| matches!(p.from, EndpointDef::Node { .. }))
            .count(),
        has_reactor: file.reactor.is_some(),
    }
}
