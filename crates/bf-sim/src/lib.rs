//! Transient transport for bwrflow networks.
//!
//! Provides:
//! - Node priming and the donor-cell transfer update
//! - The per-tick transport step over resolved flow paths
//! - A point neutron-population reactor model
//! - A tick driver that records node snapshots

pub mod control_volume;
pub mod error;
pub mod reactor;
pub mod sim;
pub mod transport;

// Re-exports for public API
pub use control_volume::{
    InitialInventory, MIN_MIXING_MASS_KG, Transfer, VESSEL_HEIGHT_M, donor_cell_enthalpy,
    prime_node, transfer, water_level,
};
pub use error::{SimError, SimResult};
pub use reactor::PointReactor;
pub use sim::{NodeSnapshot, SimOptions, SimRecord, Simulation};
pub use transport::{PathOutcome, TickReport, TransportIntegrator};
