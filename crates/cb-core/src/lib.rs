//! cb-core: stable foundation for coldbox.
//!
//! Contains:
//! - units (uom quantities + field-unit constructors)
//! - numeric (finite/positive guards)
//! - constants (gas constant and temperature offsets in field units)
//! - error (shared error types)

pub mod constants;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CbError, CbResult};
pub use numeric::*;
pub use units::*;
