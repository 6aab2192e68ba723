//! Fluid property errors.

use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// State outside the model's valid envelope.
    #[error("State outside property envelope: P={p_mpa} MPa, T={t_c} °C")]
    OutOfEnvelope { p_mpa: f64, t_c: f64 },

    /// Inversion target outside the range reachable within the envelope.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Backend (CoolProp) error.
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// Convergence failure (e.g., solving for T given P,h).
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },
}

impl FluidError {
    /// True when the provider was asked for a state it cannot represent.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            FluidError::OutOfEnvelope { .. } | FluidError::OutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::NonPhysical { what: "pressure" };
        assert!(err.to_string().contains("pressure"));

        let err = FluidError::OutOfEnvelope {
            p_mpa: 0.2,
            t_c: 180.0,
        };
        assert!(err.to_string().contains("180"));
    }

    #[test]
    fn unreachable_classification() {
        assert!(FluidError::OutOfEnvelope { p_mpa: 1.0, t_c: -5.0 }.is_unreachable());
        assert!(FluidError::OutOfRange { what: "enthalpy" }.is_unreachable());
        assert!(!FluidError::Backend { message: "x".into() }.is_unreachable());
    }
}
