//! bf-core: shared foundation for the bwrflow workspace.
//!
//! Contains:
//! - units (uom SI aliases and constructors)
//! - numeric (Real, tolerances, float guards)
//! - ids (compact ids for nodes and pipes)
//! - error (shared error type)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
