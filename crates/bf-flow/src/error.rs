//! Error types for friction and flow calculations.

use bf_core::error::CoreError;
use thiserror::Error;

/// Errors that can occur while solving a flow path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Flow path has no pipes")]
    EmptyPath,
}

pub type FlowResult<T> = Result<T, FlowError>;

impl From<FlowError> for CoreError {
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::NonPhysical { what } => CoreError::Invariant { what },
            FlowError::InvalidArg { what } => CoreError::InvalidArg { what },
            FlowError::EmptyPath => CoreError::InvalidArg {
                what: "empty flow path",
            },
        }
    }
}
