//! Point neutron-population model of the reactor core.
//!
//! Runs on the same tick as the transport step but shares no state with it.

use crate::error::{SimError, SimResult};

/// Neutron population at 100 % thermal power.
pub const MAX_NEUTRONS: f64 = 1e11;

/// Population a cold core starts from.
pub const INITIAL_NEUTRONS: f64 = 1_000.0;

/// Per-tick multiplication factor with rods fully inserted.
pub const K_MIN: f64 = 0.98;

/// Per-tick multiplication factor with rods fully withdrawn.
pub const K_MAX: f64 = 1.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointReactor {
    neutrons: f64,
    /// 0 = fully inserted, 1 = fully withdrawn
    rod_position: f64,
}

impl Default for PointReactor {
    fn default() -> Self {
        Self {
            neutrons: INITIAL_NEUTRONS,
            rod_position: 0.0,
        }
    }
}

impl PointReactor {
    pub fn new(initial_neutrons: f64, rod_position: f64) -> SimResult<Self> {
        if !initial_neutrons.is_finite() || !(1.0..=MAX_NEUTRONS).contains(&initial_neutrons) {
            return Err(SimError::InvalidArg {
                what: "initial neutrons must lie between 1 and the full-power population",
            });
        }
        let mut reactor = Self {
            neutrons: initial_neutrons,
            rod_position: 0.0,
        };
        reactor.set_rod_position(rod_position)?;
        Ok(reactor)
    }

    pub fn neutrons(&self) -> f64 {
        self.neutrons
    }

    pub fn rod_position(&self) -> f64 {
        self.rod_position
    }

    pub fn set_rod_position(&mut self, rod_position: f64) -> SimResult<()> {
        if !rod_position.is_finite() || !(0.0..=1.0).contains(&rod_position) {
            return Err(SimError::InvalidArg {
                what: "rod position must lie in [0, 1]",
            });
        }
        self.rod_position = rod_position;
        Ok(())
    }

    /// Multiplication factor for the current rod position.
    pub fn multiplication(&self) -> f64 {
        K_MIN + self.rod_position * (K_MAX - K_MIN)
    }

    /// Fraction of full thermal power, in [0, 1].
    pub fn thermal_power(&self) -> f64 {
        self.neutrons / MAX_NEUTRONS
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        self.neutrons = (self.neutrons * self.multiplication()).clamp(1.0, MAX_NEUTRONS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_core_power() {
        let reactor = PointReactor::default();
        assert_eq!(reactor.neutrons(), 1_000.0);
        assert!((reactor.thermal_power() - 1e-8).abs() < 1e-20);
    }

    #[test]
    fn inserted_rods_decay_to_floor() {
        let mut reactor = PointReactor::default();
        for _ in 0..10_000 {
            reactor.step();
        }
        assert_eq!(reactor.neutrons(), 1.0);
    }

    #[test]
    fn withdrawn_rods_saturate() {
        let mut reactor = PointReactor::new(1_000.0, 1.0).unwrap();
        for _ in 0..10_000 {
            reactor.step();
        }
        assert_eq!(reactor.thermal_power(), 1.0);
    }

    #[test]
    fn midpoint_is_critical() {
        let mut reactor = PointReactor::new(5e6, 0.5).unwrap();
        reactor.step();
        assert!((reactor.neutrons() - 5e6).abs() < 1e-6);
    }

    #[test]
    fn invalid_inputs_rejected() {
        assert!(PointReactor::new(0.0, 0.5).is_err());
        assert!(PointReactor::new(1e12, 0.5).is_err());
        assert!(PointReactor::new(1e3, 1.5).is_err());
        let mut reactor = PointReactor::default();
        assert!(reactor.set_rod_position(f64::NAN).is_err());
        assert_eq!(reactor.rod_position(), 0.0);
    }
}
