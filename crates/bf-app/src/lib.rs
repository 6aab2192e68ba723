//! Shared application service layer for bwrflow.
//!
//! Centralizes what the CLI does with a network file: loading and
//! validation, compiling it into a primed topology, running ticks and
//! querying the results.

pub mod error;
pub mod progress;
pub mod project_service;
pub mod query;
pub mod run_service;
pub mod runtime_compile;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use progress::TickProgress;
pub use project_service::{NetworkSummary, load_network, summarize};
pub use query::{PathListing, PathSummary, list_paths, records_to_csv, vessel_water_level};
pub use run_service::{
    RunOptions, RunResponse, RunSummary, prepare, run_network, run_network_with_progress,
    tick_duration,
};
pub use runtime_compile::{build_property_model, build_reactor, compile_network};

pub use bf_flow::IterationPolicy;
