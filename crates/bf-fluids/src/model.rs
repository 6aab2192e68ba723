//! Property model trait and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::state::{SpecEnthalpy, SpecEntropy, StateInput, ThermoState};
use crate::units::{pressure_mpa, temperature_c};
use bf_core::units::{DynVisc, Density, Pressure, Temperature, k};

/// Rectangular (P, T) region over which a model is valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub p_min: Pressure,
    pub p_max: Pressure,
    pub t_min: Temperature,
    pub t_max: Temperature,
}

impl Envelope {
    /// Whether (p, t) lies inside the envelope (bounds inclusive).
    pub fn contains(&self, p: Pressure, t: Temperature) -> bool {
        p >= self.p_min && p <= self.p_max && t >= self.t_min && t <= self.t_max
    }

    /// Reject states outside the envelope.
    pub fn check(&self, p: Pressure, t: Temperature) -> FluidResult<()> {
        if p.value.is_finite() && t.value.is_finite() && self.contains(p, t) {
            Ok(())
        } else {
            Err(FluidError::OutOfEnvelope {
                p_mpa: pressure_mpa(p),
                t_c: temperature_c(t),
            })
        }
    }
}

/// Properties the transport step needs from the upstream node, fetched together.
#[derive(Clone, Copy, Debug)]
pub struct PropertyPack {
    pub p: Pressure,
    pub t: Temperature,
    pub rho: Density,
    /// Specific enthalpy [J/kg]
    pub h: SpecEnthalpy,
    pub mu: DynVisc,
}

impl PropertyPack {
    pub fn summary(&self) -> String {
        format!(
            "Pack(P={:.0}Pa,T={:.2}K,ρ={:.3}kg/m³,h={:.1}J/kg,μ={:.3e}Pa·s)",
            self.p.value, self.t.value, self.rho.value, self.h, self.mu.value
        )
    }
}

/// Equation-of-state provider.
///
/// Implementations are pure: the same inputs always give the same outputs. All
/// quantities cross this trait in SI units; correlations that work in table units
/// convert through [`crate::units`].
pub trait PropertyModel: Send + Sync {
    /// Model name (for logging).
    fn name(&self) -> &str;

    /// Region over which the model promises valid results.
    fn envelope(&self) -> Envelope;

    /// Density [kg/m³].
    fn density(&self, p: Pressure, t: Temperature) -> FluidResult<Density>;

    /// Specific enthalpy [J/kg].
    fn specific_enthalpy(&self, p: Pressure, t: Temperature) -> FluidResult<SpecEnthalpy>;

    /// Specific entropy [J/(kg·K)].
    fn specific_entropy(&self, p: Pressure, t: Temperature) -> FluidResult<SpecEntropy>;

    /// Dynamic viscosity [Pa·s].
    fn dynamic_viscosity(&self, p: Pressure, t: Temperature) -> FluidResult<DynVisc>;

    /// Specific volume [m³/kg].
    fn specific_volume(&self, p: Pressure, t: Temperature) -> FluidResult<f64> {
        Ok(1.0 / self.density(p, t)?.value)
    }

    /// Density, enthalpy and viscosity at one state.
    fn property_pack(&self, p: Pressure, t: Temperature) -> FluidResult<PropertyPack> {
        Ok(PropertyPack {
            p,
            t,
            rho: self.density(p, t)?,
            h: self.specific_enthalpy(p, t)?,
            mu: self.dynamic_viscosity(p, t)?,
        })
    }

    /// Temperature such that `h(p, T) = h`, searched inside the envelope.
    fn temperature_ph(&self, p: Pressure, h: SpecEnthalpy) -> FluidResult<Temperature> {
        validation::validate_enthalpy(h)?;
        let t_k = invert_monotone_in_t(self, p, h, "enthalpy", |m, p, t| {
            m.specific_enthalpy(p, t)
        })?;
        Ok(k(t_k))
    }

    /// Temperature such that `s(p, T) = s`, searched inside the envelope.
    fn temperature_ps(&self, p: Pressure, s: SpecEntropy) -> FluidResult<Temperature> {
        if !s.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "entropy must be finite",
            });
        }
        let t_k = invert_monotone_in_t(self, p, s, "entropy", |m, p, t| {
            m.specific_entropy(p, t)
        })?;
        Ok(k(t_k))
    }

    /// Density from pressure and enthalpy.
    fn density_ph(&self, p: Pressure, h: SpecEnthalpy) -> FluidResult<Density> {
        let t = self.temperature_ph(p, h)?;
        self.density(p, t)
    }

    /// Resolve any supported input pair to a (P, T) state.
    fn state(&self, input: StateInput) -> FluidResult<ThermoState> {
        match input {
            StateInput::PT { p, t } => {
                self.envelope().check(p, t)?;
                ThermoState::from_pt(p, t)
            }
            StateInput::PH { p, h } => ThermoState::from_pt(p, self.temperature_ph(p, h)?),
            StateInput::PS { p, s } => ThermoState::from_pt(p, self.temperature_ps(p, s)?),
        }
    }
}

/// Bisection on T for a property that increases monotonically with temperature.
fn invert_monotone_in_t<M, F>(
    model: &M,
    p: Pressure,
    target: f64,
    what: &'static str,
    property: F,
) -> FluidResult<f64>
where
    M: PropertyModel + ?Sized,
    F: Fn(&M, Pressure, Temperature) -> FluidResult<f64>,
{
    const MAX_ITER: usize = 100;

    validation::validate_pressure(p)?;
    let envelope = model.envelope();
    let mut t_low = envelope.t_min.value;
    let mut t_high = envelope.t_max.value;

    let y_low = property(model, p, k(t_low))?;
    let y_high = property(model, p, k(t_high))?;
    if target < y_low || target > y_high {
        return Err(FluidError::OutOfRange { what });
    }

    for _ in 0..MAX_ITER {
        let t_mid = 0.5 * (t_low + t_high);
        let y_mid = property(model, p, k(t_mid))?;

        let tol = 1e-6_f64.max(target.abs() * 1e-10);
        if (y_mid - target).abs() < tol || (t_high - t_low) < 1e-9 {
            return Ok(t_mid);
        }

        if y_mid < target {
            t_low = t_mid;
        } else {
            t_high = t_mid;
        }
    }

    Err(FluidError::ConvergenceFailed { what })
}

/// Validation helpers for fluid properties.
pub(crate) mod validation {
    use super::*;

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> FluidResult<()> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure density is positive and finite.
    pub fn validate_density(rho: Density) -> FluidResult<()> {
        if !rho.value.is_finite() || rho.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure viscosity is positive and finite.
    pub fn validate_viscosity(mu: DynVisc) -> FluidResult<()> {
        if !mu.value.is_finite() || mu.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "viscosity must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure enthalpy is finite (can be negative).
    pub fn validate_enthalpy(h: f64) -> FluidResult<()> {
        if !h.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "enthalpy must be finite",
            });
        }
        Ok(())
    }
}
