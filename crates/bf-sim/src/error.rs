//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while setting up or stepping the network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A property query fell outside the provider's valid region.
    #[error("Unreachable property: {message}")]
    UnreachableProperty { message: String },

    #[error("Flow solver error: {0}")]
    Flow(bf_flow::FlowError),

    #[error("Topology error: {0}")]
    Graph(bf_graph::GraphError),

    #[error("Fluid property error: {0}")]
    Fluid(bf_fluids::FluidError),
}

pub type SimResult<T> = Result<T, SimError>;

impl From<bf_fluids::FluidError> for SimError {
    fn from(e: bf_fluids::FluidError) -> Self {
        if e.is_unreachable() {
            SimError::UnreachableProperty {
                message: e.to_string(),
            }
        } else {
            SimError::Fluid(e)
        }
    }
}

impl From<bf_flow::FlowError> for SimError {
    fn from(e: bf_flow::FlowError) -> Self {
        SimError::Flow(e)
    }
}

impl From<bf_graph::GraphError> for SimError {
    fn from(e: bf_graph::GraphError) -> Self {
        SimError::Graph(e)
    }
}
