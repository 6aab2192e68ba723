//! Unit conversions at the property-provider boundary.
//!
//! Correlations work in MPa, °C and kJ/kg like the steam tables they come from,
//! while the rest of the workspace works in SI base units. Every conversion between
//! the two goes through this module.

use bf_core::units::{Pressure, Temperature};
use uom::si::pressure::megapascal;
use uom::si::thermodynamic_temperature::degree_celsius;

/// Offset between the Celsius and Kelvin scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Standard atmosphere [MPa].
pub const ATMOSPHERE_MPA: f64 = 0.101_325;

#[inline]
pub fn pa_to_mpa(p_pa: f64) -> f64 {
    p_pa * 1e-6
}

#[inline]
pub fn mpa_to_pa(p_mpa: f64) -> f64 {
    p_mpa * 1e6
}

#[inline]
pub fn kj_to_j(v_kj: f64) -> f64 {
    v_kj * 1e3
}

#[inline]
pub fn j_to_kj(v_j: f64) -> f64 {
    v_j * 1e-3
}

#[inline]
pub fn celsius_to_kelvin(t_c: f64) -> f64 {
    t_c + KELVIN_OFFSET
}

#[inline]
pub fn kelvin_to_celsius(t_k: f64) -> f64 {
    t_k - KELVIN_OFFSET
}

/// Pressure as MPa for table-style correlations.
#[inline]
pub fn pressure_mpa(p: Pressure) -> f64 {
    p.get::<megapascal>()
}

/// Temperature as °C for table-style correlations.
#[inline]
pub fn temperature_c(t: Temperature) -> f64 {
    t.get::<degree_celsius>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_core::units::{degc, pa};

    #[test]
    fn pressure_conversions() {
        assert!((pa_to_mpa(230_000.0) - 0.23).abs() < 1e-12);
        assert!((mpa_to_pa(0.2) - 200_000.0).abs() < 1e-9);
        assert!((pressure_mpa(pa(101_325.0)) - ATMOSPHERE_MPA).abs() < 1e-12);
    }

    #[test]
    fn energy_conversions() {
        assert!((kj_to_j(146.7) - 146_700.0).abs() < 1e-9);
        assert!((j_to_kj(1_000.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn temperature_conversions() {
        assert!((celsius_to_kelvin(35.0) - 308.15).abs() < 1e-12);
        assert!((kelvin_to_celsius(373.15) - 100.0).abs() < 1e-12);
        assert!((temperature_c(degc(20.0)) - 20.0).abs() < 1e-9);
    }
}
