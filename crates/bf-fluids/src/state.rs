//! Thermodynamic state definitions.

use crate::error::{FluidError, FluidResult};
use bf_core::units::{Pressure, Temperature};

/// Specific enthalpy [J/kg].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEnthalpy = f64;

/// Specific entropy [J/(kg·K)].
pub type SpecEntropy = f64;

/// Pair of independent variables used to fix a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateInput {
    /// Pressure and temperature.
    PT { p: Pressure, t: Temperature },
    /// Pressure and specific enthalpy.
    PH { p: Pressure, h: SpecEnthalpy },
    /// Pressure and specific entropy.
    PS { p: Pressure, s: SpecEntropy },
}

/// Thermodynamic state reduced to its (P, T) pair.
///
/// Derived properties are computed on demand through `PropertyModel`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermoState {
    p: Pressure,
    t: Temperature,
}

impl ThermoState {
    /// Create a state from pressure and temperature.
    ///
    /// Validates that both are positive and finite (absolute scales).
    pub fn from_pt(p: Pressure, t: Temperature) -> FluidResult<Self> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(Self { p, t })
    }

    pub fn pressure(&self) -> Pressure {
        self.p
    }

    pub fn temperature(&self) -> Temperature {
        self.t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_core::units::{degc, k, pa};

    #[test]
    fn create_valid_state() {
        let state = ThermoState::from_pt(pa(200_000.0), degc(35.0)).unwrap();
        assert_eq!(state.pressure().value, 200_000.0);
        assert!((state.temperature().value - 308.15).abs() < 1e-9);
    }

    #[test]
    fn reject_non_physical() {
        assert!(ThermoState::from_pt(pa(-100.0), k(300.0)).is_err());
        assert!(ThermoState::from_pt(pa(101_325.0), k(0.0)).is_err());
        assert!(ThermoState::from_pt(pa(f64::NAN), k(300.0)).is_err());
    }
}
