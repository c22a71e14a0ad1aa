//! cb-fluids: thermodynamic property engine for coldbox.
//!
//! Provides:
//! - Species definitions and the fixed component property table
//! - Composition handling (named mole fractions)
//! - Cubic equation-of-state root solving
//! - Mixture enthalpy via Peng-Robinson plus an ideal-gas contribution
//!
//! # Architecture
//!
//! The [`EnthalpyModel`] trait isolates callers from the equation of state.
//! [`PengRobinson`] is the only implementation; it takes its species data from an
//! injected [`PropertyTable`] and its ideal-gas part from an [`IdealEnthalpyModel`],
//! so either can be replaced without touching the root solver.
//!
//! # Example
//!
//! ```
//! use cb_fluids::{Composition, EnthalpyModel, PengRobinson};
//!
//! let model = PengRobinson::standard();
//! let comp = Composition::pure("Methane");
//!
//! // 100 °F = 559.67 °R, 800 psia
//! let state = model.mixture_enthalpy(559.67, 800.0, &comp).unwrap();
//! println!("H = {:.1} Btu/lbmol, Z = {:.4}", state.h_total, state.z);
//! ```

pub mod composition;
pub mod cubic;
pub mod error;
pub mod ideal_gas;
pub mod model;
pub mod phase;
pub mod species;
pub mod table;

// Re-exports for ergonomics
pub use composition::{Composition, SUM_TOLERANCE};
pub use cubic::{
    CubicCoefficients, CubicRoots, NewtonExit, NewtonSettings, RootSolution, RootStrategy,
    SolverSettings, solve_compressibility_factor, solve_newton,
};
pub use error::{FluidError, FluidResult};
pub use ideal_gas::{IdealEnthalpyModel, LinearCpModel};
pub use model::{EnthalpyModel, MixtureParams, MixtureState, PengRobinson, PureParams};
pub use phase::PhaseLabel;
pub use species::Species;
pub use table::{
    CustomTable, LatentHeatRef, PropertyTable, SpeciesRecord, StandardTable, StandardTableRef,
};
