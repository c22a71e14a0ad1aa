//! Guards for values crossing from user input into the property engine.

use crate::{CbError, CbResult};

pub fn ensure_finite(v: f64, what: &'static str) -> CbResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CbError::NonFinite { what, value: v })
    }
}

/// Like [`ensure_finite`], but also rejects zero and negative values.
pub fn ensure_positive(v: f64, what: &'static str) -> CbResult<f64> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CbError::InvalidArg {
            what: format!("{what} must be positive (got {v})"),
        })
    }
}
