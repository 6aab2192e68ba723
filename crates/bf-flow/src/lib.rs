//! bf-flow: friction-limited flow through pipe chains.
//!
//! Provides:
//! - Pipe segment hydraulics (Darcy-Weisbach losses, Swamee-Jain friction factor)
//! - The per-path friction solver with a fixed-pass or tolerance stopping policy
//! - Flow direction from end pressures
//!
//! Every function here is a pure function of geometry and fluid properties; node
//! state is owned by the transport step in `bf-sim`.
//!
//! # Example
//!
//! ```
//! use bf_core::units::{kg_per_m3, m, mm, pa, pa_s};
//! use bf_flow::{FrictionSolver, PipeSegment};
//!
//! let line = [PipeSegment::new(mm(450.0), m(30.0), 3.5)];
//! let solution = FrictionSolver::default()
//!     .solve(&line, pa(30_000.0), kg_per_m3(994.7), pa_s(7.2e-4))
//!     .unwrap();
//!
//! assert_eq!(solution.passes, 3);
//! println!("v = {:.2} m/s", solution.reference_velocity().value);
//! ```

pub mod common;
pub mod error;
pub mod friction;
pub mod pipe;

// Re-exports
pub use common::FlowDirection;
pub use error::{FlowError, FlowResult};
pub use friction::{FrictionSolution, FrictionSolver, IterationPolicy};
pub use pipe::{PipeSegment, ROUGHNESS_M, SEED_FRICTION_FACTOR, path_segments, swamee_jain};
