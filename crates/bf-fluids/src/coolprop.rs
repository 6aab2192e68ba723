//! CoolProp-backed water properties (feature `coolprop`).

use crate::error::{FluidError, FluidResult};
use crate::model::{Envelope, PropertyModel, validation};
use crate::state::{SpecEnthalpy, SpecEntropy};
use crate::units::{pressure_mpa, temperature_c};
use bf_core::units::{DynVisc, Density, Pressure, Temperature, degc, kg_per_m3, mpa, pa_s};
use rfluids::prelude::*;

/// Real-fluid water through CoolProp's Helmholtz equation of state.
///
/// Restricted to the compressed-liquid region used by the loop. States at or above the
/// saturation temperature are rejected as [`FluidError::OutOfEnvelope`].
pub struct CoolPropWater {
    envelope: Envelope,
}

impl CoolPropWater {
    pub fn new() -> Self {
        Self {
            envelope: Envelope {
                p_min: mpa(0.001),
                p_max: mpa(20.0),
                t_min: degc(0.01),
                t_max: degc(300.0),
            },
        }
    }

    /// Saturation temperature [K] at pressure `p`.
    pub fn saturation_temperature(&self, p: Pressure) -> FluidResult<f64> {
        validation::validate_pressure(p)?;
        let mut fluid = Fluid::from(Pure::Water)
            .in_state(FluidInput::pressure(p.value), FluidInput::quality(0.0))
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error at saturation, P={} Pa: {}", p.value, e),
            })?;
        fluid.temperature().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting saturation temperature: {}", e),
        })
    }

    /// Create a Fluid instance at given P,T state. Only subcooled liquid is accepted.
    fn fluid_at_pt(&self, p: Pressure, t: Temperature) -> FluidResult<Fluid> {
        validation::validate_pressure(p)?;
        self.envelope.check(p, t)?;
        if t.value >= self.saturation_temperature(p)? {
            return Err(FluidError::OutOfEnvelope {
                p_mpa: pressure_mpa(p),
                t_c: temperature_c(t),
            });
        }
        Fluid::from(Pure::Water)
            .in_state(FluidInput::pressure(p.value), FluidInput::temperature(t.value))
            .map_err(|e| FluidError::Backend {
                message: format!(
                    "rfluids error at P={} Pa, T={} K: {}",
                    p.value, t.value, e
                ),
            })
    }
}

impl Default for CoolPropWater {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyModel for CoolPropWater {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn envelope(&self) -> Envelope {
        self.envelope
    }

    fn density(&self, p: Pressure, t: Temperature) -> FluidResult<Density> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        let rho = fluid.density().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting density: {}", e),
        })?;
        let rho = kg_per_m3(rho);
        validation::validate_density(rho)?;
        Ok(rho)
    }

    fn specific_enthalpy(&self, p: Pressure, t: Temperature) -> FluidResult<SpecEnthalpy> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        let h = fluid.enthalpy().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting enthalpy: {}", e),
        })?;
        validation::validate_enthalpy(h)?;
        Ok(h)
    }

    fn specific_entropy(&self, p: Pressure, t: Temperature) -> FluidResult<SpecEntropy> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        let s = fluid.entropy().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting entropy: {}", e),
        })?;
        if !s.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "entropy must be finite",
            });
        }
        Ok(s)
    }

    fn dynamic_viscosity(&self, p: Pressure, t: Temperature) -> FluidResult<DynVisc> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        let mu = fluid.dynamic_viscosity().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting viscosity: {}", e),
        })?;
        let mu = pa_s(mu);
        validation::validate_viscosity(mu)?;
        Ok(mu)
    }
}
