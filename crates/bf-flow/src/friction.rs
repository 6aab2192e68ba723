//! Friction-limited velocity field along a flow path.
//!
//! The first pipe of a path is the reference. Each pipe's loss coefficient is
//! referred to the reference area through `(A_ref/A_i)²`, the referred
//! coefficients are summed, and the reference velocity follows from
//! `ΔP = ½·ρ·K_total·v_ref²`. Continuity then gives every other velocity. Friction
//! factors start at [`SEED_FRICTION_FACTOR`] and are refined from the Reynolds
//! number of the previous pass.

use crate::common::check_positive;
use crate::error::{FlowError, FlowResult};
use crate::pipe::{PipeSegment, SEED_FRICTION_FACTOR};
use bf_core::units::{Area, Density, DynVisc, MassRate, Pressure, Velocity, mps};
use bf_core::{Tolerances, nearly_equal};

/// When the friction iteration stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationPolicy {
    /// Run exactly this many passes. The last pass's coefficients are final.
    Fixed { passes: usize },
    /// Stop once no friction factor moves by more than `rel_tol` (relative), or
    /// after `max_passes`.
    Tolerance { rel_tol: f64, max_passes: usize },
}

impl Default for IterationPolicy {
    /// Seed pass plus two refinements.
    fn default() -> Self {
        IterationPolicy::Fixed { passes: 3 }
    }
}

impl IterationPolicy {
    fn validate(&self) -> FlowResult<()> {
        match *self {
            IterationPolicy::Fixed { passes: 0 } => Err(FlowError::InvalidArg {
                what: "fixed policy needs at least one pass",
            }),
            IterationPolicy::Tolerance {
                rel_tol,
                max_passes,
            } => {
                if max_passes == 0 {
                    return Err(FlowError::InvalidArg {
                        what: "tolerance policy needs at least one pass",
                    });
                }
                if !rel_tol.is_finite() || rel_tol <= 0.0 {
                    return Err(FlowError::InvalidArg {
                        what: "tolerance must be positive",
                    });
                }
                Ok(())
            }
            IterationPolicy::Fixed { .. } => Ok(()),
        }
    }

    fn max_passes(&self) -> usize {
        match *self {
            IterationPolicy::Fixed { passes } => passes,
            IterationPolicy::Tolerance { max_passes, .. } => max_passes,
        }
    }
}

/// Converged (or pass-limited) velocity field for one path.
#[derive(Debug, Clone, PartialEq)]
pub struct FrictionSolution {
    /// Friction factor per pipe, the ones used for `total_normalized_k`.
    pub friction_factors: Vec<f64>,
    /// Velocity per pipe.
    pub velocities: Vec<Velocity>,
    /// Sum of loss coefficients referred to the reference area.
    pub total_normalized_k: f64,
    /// Flow area of the first pipe.
    pub reference_area: Area,
    /// Passes performed.
    pub passes: usize,
}

impl FrictionSolution {
    pub fn reference_velocity(&self) -> Velocity {
        self.velocities.first().copied().unwrap_or_else(|| mps(0.0))
    }

    /// Mass flow rate through the path for the given density.
    pub fn mass_rate(&self, rho: Density) -> MassRate {
        self.reference_velocity() * self.reference_area * rho
    }
}

/// Per-path friction solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrictionSolver {
    policy: IterationPolicy,
}

impl FrictionSolver {
    pub fn new(policy: IterationPolicy) -> FlowResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> IterationPolicy {
        self.policy
    }

    /// Solve the velocity field for a path driven by `dp` (a magnitude).
    ///
    /// `rho` and `mu` are taken at the upstream node.
    pub fn solve(
        &self,
        segments: &[PipeSegment],
        dp: Pressure,
        rho: Density,
        mu: DynVisc,
    ) -> FlowResult<FrictionSolution> {
        let reference = segments.first().ok_or(FlowError::EmptyPath)?;
        for seg in segments {
            seg.validate()?;
        }
        check_positive(dp.value, "driving pressure")?;
        check_positive(rho.value, "density")?;
        check_positive(mu.value, "viscosity")?;

        let a_ref = reference.area().value;
        let area_ratios: Vec<f64> = segments.iter().map(|s| a_ref / s.area().value).collect();

        let mut factors = vec![SEED_FRICTION_FACTOR; segments.len()];
        let max_passes = self.policy.max_passes();
        let mut passes = 0;

        loop {
            passes += 1;

            let k_total: f64 = segments
                .iter()
                .zip(&factors)
                .zip(&area_ratios)
                .map(|((seg, &f), &ratio)| seg.loss_coefficient(f) * ratio * ratio)
                .sum();
            check_positive(k_total, "total loss coefficient")?;

            let v_ref = (2.0 * dp.value / (k_total * rho.value)).sqrt();
            check_positive(v_ref, "reference velocity")?;
            let velocities: Vec<f64> = area_ratios.iter().map(|ratio| v_ref * ratio).collect();

            let finished = |factors: Vec<f64>| FrictionSolution {
                friction_factors: factors,
                velocities: velocities.iter().map(|&v| mps(v)).collect(),
                total_normalized_k: k_total,
                reference_area: reference.area(),
                passes,
            };

            if passes >= max_passes {
                return Ok(finished(factors));
            }

            let refined = segments
                .iter()
                .zip(&velocities)
                .map(|(seg, &v)| seg.friction_factor(seg.reynolds(rho.value, v, mu.value)))
                .collect::<FlowResult<Vec<f64>>>()?;

            if let IterationPolicy::Tolerance { rel_tol, .. } = self.policy {
                let tol = Tolerances {
                    abs: 0.0,
                    rel: rel_tol,
                };
                let converged = refined
                    .iter()
                    .zip(&factors)
                    .all(|(&new, &old)| nearly_equal(new, old, tol));
                if converged {
                    return Ok(finished(factors));
                }
            }

            factors = refined;
        }
    }
}
