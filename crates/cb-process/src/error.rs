//! Error types for process calculations.

use cb_core::error::CbError;
use cb_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur during duty and refrigerant calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    #[error("Heat duty has not been computed yet")]
    DutyNotYetComputed,

    #[error("Refrigerant {name} cannot be part of the gas stream")]
    RefrigerantInStream { name: String },

    #[error(transparent)]
    Fluid(#[from] FluidError),

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}

pub type ProcessResult<T> = Result<T, ProcessError>;

impl From<CbError> for ProcessError {
    fn from(e: CbError) -> Self {
        ProcessError::InvalidArg {
            what: e.to_string(),
        }
    }
}

impl From<ProcessError> for CbError {
    fn from(e: ProcessError) -> Self {
        match e {
            ProcessError::Fluid(inner) => inner.into(),
            ProcessError::DutyNotYetComputed
            | ProcessError::RefrigerantInStream { .. }
            | ProcessError::InvalidArg { .. } => {
                CbError::InvalidArg {
                    what: e.to_string(),
                }
            }
            ProcessError::NonPhysical { .. } => CbError::Invariant {
                what: e.to_string(),
            },
        }
    }
}
