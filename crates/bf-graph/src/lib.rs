//! bf-graph: topology store and flow-path resolution for bwrflow.
//!
//! Provides:
//! - Node (control volume) and Pipe (junction segment) records
//! - Incremental topology builder with validation
//! - Path resolver turning junction chains into Node-to-Node `FlowPath`s
//!
//! # Example
//!
//! ```
//! use bf_graph::{Endpoint, NodeState, PipeGeometry, TopologyBuilder, build_flow_paths};
//!
//! let mut builder = TopologyBuilder::new();
//! builder.add_node("Feedwater", NodeState::new(20.0, 101_325.0, 10.0, 9_982.0, 83_900.0, 1e6));
//! builder.add_node("Vessel", NodeState::new(35.0, 230_000.0, 600.0, 596_500.0, 146_600.0, 928.0));
//! builder.add_pipe(
//!     "FW-1",
//!     PipeGeometry::new(450.0, 30.0, 3.5),
//!     Endpoint::node("Feedwater"),
//!     Endpoint::node("Vessel"),
//! );
//! let topology = builder.build().unwrap();
//!
//! let paths = build_flow_paths(&topology);
//! assert_eq!(paths.len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod path;
pub mod topology;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::TopologyBuilder;
pub use error::{GraphError, GraphResult};
pub use path::{
    FlowPath, PathSet, ResolvedChain, SkippedPipe, build_flow_paths, resolve_all, resolve_path,
};
pub use topology::{Endpoint, EndpointKind, Node, NodeState, Pipe, PipeGeometry, Topology};
