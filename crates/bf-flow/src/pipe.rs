//! Pipe segment hydraulics: Darcy-Weisbach losses with the Swamee-Jain friction factor.

use crate::common::{check_finite, check_positive};
use crate::error::{FlowError, FlowResult};
use bf_core::units::{Area, Length, m};
use bf_graph::{FlowPath, PipeGeometry, Topology};

/// Absolute wall roughness of commercial steel pipe [m].
pub const ROUGHNESS_M: f64 = 4.5e-5;

/// Friction factor used before any Reynolds number is known.
pub const SEED_FRICTION_FACTOR: f64 = 0.02;

/// Geometry of one pipe in SI units, as the friction solver sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeSegment {
    pub diameter: Length,
    pub length: Length,
    /// Sum of minor loss coefficients
    pub k_minor: f64,
    pub roughness: Length,
}

impl PipeSegment {
    /// Segment with the default wall roughness.
    pub fn new(diameter: Length, length: Length, k_minor: f64) -> Self {
        Self {
            diameter,
            length,
            k_minor,
            roughness: m(ROUGHNESS_M),
        }
    }

    /// Check that the geometry is usable.
    pub fn validate(&self) -> FlowResult<()> {
        check_positive(self.diameter.value, "pipe diameter")?;
        check_positive(self.length.value, "pipe length")?;
        check_finite(self.k_minor, "minor loss coefficient")?;
        if self.k_minor < 0.0 {
            return Err(FlowError::NonPhysical {
                what: "minor loss coefficient",
            });
        }
        check_finite(self.roughness.value, "pipe roughness")?;
        Ok(())
    }

    pub fn area(&self) -> Area {
        self.diameter * self.diameter * (std::f64::consts::PI / 4.0)
    }

    /// Loss coefficient `f·L/D + K_minor` for a given friction factor.
    pub fn loss_coefficient(&self, friction_factor: f64) -> f64 {
        friction_factor * self.length.value / self.diameter.value + self.k_minor
    }

    /// Reynolds number `ρ·v·D/μ` (SI values).
    pub fn reynolds(&self, rho: f64, velocity: f64, mu: f64) -> f64 {
        rho * velocity * self.diameter.value / mu
    }

    /// Darcy friction factor at the given Reynolds number.
    pub fn friction_factor(&self, reynolds: f64) -> FlowResult<f64> {
        swamee_jain(reynolds, self.roughness.value / self.diameter.value)
    }
}

impl From<&PipeGeometry> for PipeSegment {
    fn from(g: &PipeGeometry) -> Self {
        PipeSegment::new(g.diameter(), g.length(), g.minor_k)
    }
}

/// Swamee-Jain explicit approximation of the Colebrook equation.
///
/// `f = 0.25 / [log10(ε/(3.7·D) + 5.74/Re^0.9)]²`
pub fn swamee_jain(reynolds: f64, relative_roughness: f64) -> FlowResult<f64> {
    check_positive(reynolds, "Reynolds number")?;
    let a = relative_roughness / 3.7;
    let b = 5.74 / reynolds.powf(0.9);
    let f = 0.25 / (a + b).log10().powi(2);
    check_positive(f, "friction factor")?;
    Ok(f)
}

/// Collect the segments of a flow path in chain order.
pub fn path_segments(topology: &Topology, path: &FlowPath) -> FlowResult<Vec<PipeSegment>> {
    if path.pipes.is_empty() {
        return Err(FlowError::EmptyPath);
    }
    path.pipes
        .iter()
        .map(|id| {
            topology
                .pipe(*id)
                .map(|p| PipeSegment::from(&p.geometry))
                .ok_or(FlowError::InvalidArg {
                    what: "flow path references a pipe outside the topology",
                })
        })
        .collect()
}
