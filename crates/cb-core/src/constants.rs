//! Physical constants in the field unit system used by the property engine.
//!
//! Temperatures are absolute Rankine, pressures psia, volumes ft³ and amounts lbmol.

/// Universal gas constant [psia·ft³/(lbmol·°R)].
pub const R_FIELD: f64 = 10.731_59;

/// Offset between the Fahrenheit and Rankine scales [°R].
pub const RANKINE_OFFSET: f64 = 459.67;

/// 0 °F expressed in Rankine; zero point of the ideal-gas enthalpy integral.
pub const IDEAL_ENTHALPY_REF_R: f64 = RANKINE_OFFSET;
