//! Common utilities for flow calculations.

use crate::error::{FlowError, FlowResult};
use bf_core::numeric::ensure_finite;

/// Direction of flow along a path for one tick.
///
/// Recomputed from the node pressures every tick; a path never remembers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowDirection {
    /// Source pressure above destination pressure.
    SourceToDestination,
    /// Pressures exactly equal.
    NoFlow,
    /// Destination pressure above source pressure; the destination donates.
    Reversed,
}

impl FlowDirection {
    /// Direction implied by the end pressures of a path [Pa].
    ///
    /// Only an exactly zero difference is treated as no flow.
    pub fn from_pressures(p_source: f64, p_destination: f64) -> Self {
        let dp = p_source - p_destination;
        if dp > 0.0 {
            FlowDirection::SourceToDestination
        } else if dp < 0.0 {
            FlowDirection::Reversed
        } else {
            FlowDirection::NoFlow
        }
    }

    /// +1 forward, -1 reversed, 0 for no flow.
    pub fn sign(self) -> f64 {
        match self {
            FlowDirection::SourceToDestination => 1.0,
            FlowDirection::NoFlow => 0.0,
            FlowDirection::Reversed => -1.0,
        }
    }

    pub fn is_flowing(self) -> bool {
        self != FlowDirection::NoFlow
    }
}

impl std::fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FlowDirection::SourceToDestination => "forward",
            FlowDirection::NoFlow => "none",
            FlowDirection::Reversed => "reversed",
        };
        f.write_str(s)
    }
}

/// Ensure a value is finite, returning FlowError if not.
pub fn check_finite(value: f64, what: &'static str) -> FlowResult<()> {
    ensure_finite(value, what).map_err(|_| FlowError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> FlowResult<()> {
    check_finite(value, what)?;
    if value <= 0.0 {
        return Err(FlowError::NonPhysical { what });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_direction() {
        assert_eq!(
            FlowDirection::from_pressures(230_000.0, 200_000.0),
            FlowDirection::SourceToDestination
        );
        assert_eq!(
            FlowDirection::from_pressures(200_000.0, 230_000.0),
            FlowDirection::Reversed
        );
        assert_eq!(
            FlowDirection::from_pressures(200_000.0, 200_000.0),
            FlowDirection::NoFlow
        );
        // No dead band: any difference flows
        assert!(FlowDirection::from_pressures(200_000.001, 200_000.0).is_flowing());
    }

    #[test]
    fn test_sign() {
        assert_eq!(FlowDirection::SourceToDestination.sign(), 1.0);
        assert_eq!(FlowDirection::Reversed.sign(), -1.0);
        assert_eq!(FlowDirection::NoFlow.sign(), 0.0);
    }

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
        assert!(check_positive(0.0, "test").is_err());
        assert!(check_positive(2.0, "test").is_ok());
    }
}
