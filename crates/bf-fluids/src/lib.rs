//! bf-fluids: water property provider for bwrflow.
//!
//! Provides:
//! - `PropertyModel` trait: density, enthalpy, entropy and viscosity from (P, T),
//!   plus inversions from (P, h) and (P, s)
//! - `LiquidWater`: in-tree compressed-liquid correlation for the 0-100 °C envelope
//! - `CoolPropWater` (feature `coolprop`): real-fluid water via `rfluids`
//! - `units`: the only place where Pa/MPa, K/°C and J/kJ conversions happen
//!
//! # Example
//!
//! ```
//! use bf_fluids::{LiquidWater, PropertyModel};
//! use bf_core::units::{degc, pa};
//!
//! let water = LiquidWater::new();
//! let rho = water.density(pa(230_000.0), degc(35.0)).unwrap();
//! assert!(rho.value > 990.0 && rho.value < 1000.0);
//! ```

#[cfg(feature = "coolprop")]
pub mod coolprop;
pub mod error;
pub mod model;
pub mod state;
pub mod units;
pub mod water;

#[cfg(feature = "coolprop")]
pub use coolprop::CoolPropWater;
pub use error::{FluidError, FluidResult};
pub use model::{Envelope, PropertyModel, PropertyPack};
pub use state::{SpecEnthalpy, SpecEntropy, StateInput, ThermoState};
pub use water::LiquidWater;
