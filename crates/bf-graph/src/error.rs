//! Topology and path-resolution errors.

/// Result type for topology operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Topology construction and path-resolution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two nodes share a name.
    DuplicateNode { name: String },

    /// Two pipes share a name.
    DuplicatePipe { name: String },

    /// A node's initial state breaks a node invariant.
    InvalidNode { name: String, what: &'static str },

    /// A pipe's geometry is non-physical.
    InvalidPipe { name: String, what: &'static str },

    /// Node id not present in the store.
    UnknownNode { id: String },

    /// A chain step references a pipe or node that does not exist.
    BrokenChain { at: String, missing: String },

    /// Path resolution was asked to start from a pipe that is not fed by a node.
    NotNodeRooted { pipe: String },

    /// A junction chain revisits a pipe without reaching a node.
    CyclicTopology { pipe: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateNode { name } => write!(f, "Duplicate node name '{}'", name),
            GraphError::DuplicatePipe { name } => write!(f, "Duplicate pipe name '{}'", name),
            GraphError::InvalidNode { name, what } => {
                write!(f, "Node '{}' is invalid: {}", name, what)
            }
            GraphError::InvalidPipe { name, what } => {
                write!(f, "Pipe '{}' is invalid: {}", name, what)
            }
            GraphError::UnknownNode { id } => write!(f, "Node {} is not in the topology", id),
            GraphError::BrokenChain { at, missing } => {
                write!(f, "Broken chain at pipe '{}': '{}' does not exist", at, missing)
            }
            GraphError::NotNodeRooted { pipe } => {
                write!(f, "Pipe '{}' does not start at a node", pipe)
            }
            GraphError::CyclicTopology { pipe } => {
                write!(f, "Junction chain revisits pipe '{}' without reaching a node", pipe)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl GraphError {
    /// Errors that make the configured topology unusable as a whole.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GraphError::DuplicateNode { .. }
                | GraphError::DuplicatePipe { .. }
                | GraphError::InvalidNode { .. }
                | GraphError::InvalidPipe { .. }
        )
    }
}
