//! Compressed-liquid water correlation.
//!
//! Valid for liquid water between 0 and 100 °C and 0.001 to 10 MPa. Outside that
//! region every property returns [`FluidError::OutOfEnvelope`].
//!
//! - Density: Kell (1975) polynomial at atmospheric pressure, corrected for pressure
//!   with a constant isothermal compressibility.
//! - Enthalpy: constant `cp` above the 0 °C liquid reference, plus the `v·Δp` flow-work
//!   term relative to one atmosphere.
//! - Entropy: `cp·ln(T/T0)`.
//! - Viscosity: Vogel equation.
//!
//! Agreement with IAPWS-IF97 inside the envelope is within about 0.5 % for density and
//! enthalpy and about 2 % for viscosity, which is ample for the transport step.

use crate::error::FluidResult;
use crate::model::{Envelope, PropertyModel, validation};
use crate::state::{SpecEnthalpy, SpecEntropy};
use crate::units::{
    ATMOSPHERE_MPA, KELVIN_OFFSET, celsius_to_kelvin, kj_to_j, pressure_mpa, temperature_c,
};
use bf_core::units::{DynVisc, Density, Pressure, Temperature, degc, kg_per_m3, mpa, pa_s};

/// Isobaric specific heat [kJ/(kg·K)].
const CP_KJ: f64 = 4.184;

/// Isothermal compressibility [1/MPa].
const COMPRESSIBILITY_PER_MPA: f64 = 4.6e-4;

/// Kell density polynomial coefficients (numerator, °C powers 0..=5) and denominator term.
const KELL_NUM: [f64; 6] = [
    999.839_52,
    16.945_176,
    -7.987_040_1e-3,
    -46.170_461e-6,
    105.563_02e-9,
    -280.542_53e-12,
];
const KELL_DEN: f64 = 16.879_850e-3;

/// Vogel viscosity constants: mu = A * 10^(B / (T - C)), T in kelvin.
const VOGEL_A: f64 = 2.414e-5;
const VOGEL_B: f64 = 247.8;
const VOGEL_C: f64 = 140.0;

/// Liquid-water property correlation.
#[derive(Debug, Clone, Copy)]
pub struct LiquidWater {
    envelope: Envelope,
}

impl LiquidWater {
    pub fn new() -> Self {
        Self {
            envelope: Envelope {
                p_min: mpa(0.001),
                p_max: mpa(10.0),
                t_min: degc(0.0),
                t_max: degc(100.0),
            },
        }
    }

    /// Check the envelope and hand back (MPa, °C).
    fn table_inputs(&self, p: Pressure, t: Temperature) -> FluidResult<(f64, f64)> {
        validation::validate_pressure(p)?;
        self.envelope.check(p, t)?;
        Ok((pressure_mpa(p), temperature_c(t)))
    }

    fn density_kg_m3(p_mpa: f64, t_c: f64) -> f64 {
        let mut num = 0.0;
        let mut power = 1.0;
        for coeff in KELL_NUM {
            num += coeff * power;
            power *= t_c;
        }
        let rho_atm = num / (1.0 + KELL_DEN * t_c);
        rho_atm * (1.0 + COMPRESSIBILITY_PER_MPA * (p_mpa - ATMOSPHERE_MPA))
    }

    fn enthalpy_kj_kg(p_mpa: f64, t_c: f64) -> f64 {
        let v = 1.0 / Self::density_kg_m3(p_mpa, t_c);
        // m³/kg · MPa = MJ/kg
        CP_KJ * t_c + v * (p_mpa - ATMOSPHERE_MPA) * 1e3
    }

    fn entropy_kj_kg_k(t_c: f64) -> f64 {
        CP_KJ * (celsius_to_kelvin(t_c) / KELVIN_OFFSET).ln()
    }

    fn viscosity_pa_s(t_c: f64) -> f64 {
        VOGEL_A * 10f64.powf(VOGEL_B / (celsius_to_kelvin(t_c) - VOGEL_C))
    }
}

impl Default for LiquidWater {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyModel for LiquidWater {
    fn name(&self) -> &str {
        "LiquidWater"
    }

    fn envelope(&self) -> Envelope {
        self.envelope
    }

    fn density(&self, p: Pressure, t: Temperature) -> FluidResult<Density> {
        let (p_mpa, t_c) = self.table_inputs(p, t)?;
        let rho = kg_per_m3(Self::density_kg_m3(p_mpa, t_c));
        validation::validate_density(rho)?;
        Ok(rho)
    }

    fn specific_enthalpy(&self, p: Pressure, t: Temperature) -> FluidResult<SpecEnthalpy> {
        let (p_mpa, t_c) = self.table_inputs(p, t)?;
        let h = kj_to_j(Self::enthalpy_kj_kg(p_mpa, t_c));
        validation::validate_enthalpy(h)?;
        Ok(h)
    }

    fn specific_entropy(&self, p: Pressure, t: Temperature) -> FluidResult<SpecEntropy> {
        let (_, t_c) = self.table_inputs(p, t)?;
        Ok(kj_to_j(Self::entropy_kj_kg_k(t_c)))
    }

    fn dynamic_viscosity(&self, p: Pressure, t: Temperature) -> FluidResult<DynVisc> {
        let (_, t_c) = self.table_inputs(p, t)?;
        let mu = pa_s(Self::viscosity_pa_s(t_c));
        validation::validate_viscosity(mu)?;
        Ok(mu)
    }
}
