//! cb-process: gas chilling calculations built on the property engine.
//!
//! Provides:
//! - Heat duty of a natural-gas stream between two temperatures at fixed pressure
//! - Refrigerant mass flow from Watson-corrected latent heat
//! - A latest-duty session for front ends that run the two steps separately
//!
//! # Example
//!
//! ```
//! use cb_fluids::{Composition, EnthalpyModel, PengRobinson};
//! use cb_process::{HeatDutyInput, heat_duty, refrigerant_flow};
//!
//! let model = PengRobinson::standard();
//! let input = HeatDutyInput {
//!     mass_flow_lb_per_hr: 1.0e6,
//!     t_in_r: 559.67,
//!     t_out_r: 419.67,
//!     p_psia: 800.0,
//!     composition: Composition::pure("Methane"),
//! };
//! let duty = heat_duty(&model, &input).unwrap();
//! let propane = refrigerant_flow(model.table(), duty.duty_btu_per_hr, 419.67).unwrap();
//! println!("{:.0} Btu/hr, {:.2} lb/hr propane", duty.duty_btu_per_hr, propane.mass_flow_lb_per_hr);
//! ```

pub mod error;
pub mod heat_duty;
pub mod refrigerant;
pub mod session;

// Re-exports
pub use error::{ProcessError, ProcessResult};
pub use heat_duty::{HeatDutyInput, HeatDutyResult, heat_duty};
pub use refrigerant::{
    RefrigerantSizing, WATSON_EXPONENT, WatsonLatentHeat, refrigerant_flow, refrigerant_flow_for,
};
pub use session::DutySession;
