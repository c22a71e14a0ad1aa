//! Property engine errors.

use cb_core::CbError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during property evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// A composition or refrigerant lookup named a species the table does not carry.
    #[error("Unknown species: {name}")]
    UnknownSpecies { name: String },

    /// Mole fractions do not sum to one within tolerance.
    #[error("Mole fractions sum to {sum:.4}, expected 1.0 ± {tolerance}")]
    InvalidComposition { sum: f64, tolerance: f64 },

    /// Non-physical values (negative pressure, temperature, etc.).
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// Newton iteration on the cubic ran out of steps (strict mode only).
    #[error("Compressibility root did not converge after {iterations} iterations (last Z = {last_z})")]
    NonConvergentRoot { iterations: usize, last_z: f64 },
}

impl From<FluidError> for CbError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::UnknownSpecies { .. }
            | FluidError::InvalidComposition { .. }
            | FluidError::InvalidArg { .. } => CbError::InvalidArg {
                what: err.to_string(),
            },
            FluidError::NonPhysical { .. } | FluidError::NonConvergentRoot { .. } => {
                CbError::Invariant {
                    what: err.to_string(),
                }
            }
        }
    }
}

impl From<CbError> for FluidError {
    fn from(err: CbError) -> Self {
        FluidError::InvalidArg {
            what: err.to_string(),
        }
    }
}
