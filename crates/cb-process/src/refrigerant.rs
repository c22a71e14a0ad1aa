//! Refrigerant mass flow needed to absorb a heat duty by vaporization.
//!
//! The refrigerant enters as saturated liquid and leaves as saturated vapor;
//! only its latent heat is counted. Latent heat at the inlet temperature comes
//! from the Watson correlation anchored at the species' reference point.

use crate::error::{ProcessError, ProcessResult};
use cb_fluids::{FluidError, PhaseLabel, PropertyTable, SpeciesRecord};
use tracing::debug;

/// Watson exponent.
pub const WATSON_EXPONENT: f64 = 0.38;

/// Latent heat from the Watson correlation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatsonLatentHeat {
    /// Reduced inlet temperature T/Tc
    pub tr_in: f64,
    /// Reduced reference temperature T_ref/Tc
    pub tr_ref: f64,
    /// Molar latent heat [Btu/lbmol]
    pub molar_btu_per_lbmol: f64,
    /// Mass latent heat [Btu/lb]
    pub mass_btu_per_lb: f64,
}

impl WatsonLatentHeat {
    /// `ΔHvap = ΔHvap,ref · ((1 − Tr)/(1 − Tr,ref))^0.38`
    pub fn evaluate(record: &SpeciesRecord, t_r: f64) -> ProcessResult<Self> {
        let latent = record.latent.ok_or_else(|| ProcessError::InvalidArg {
            what: format!("{} has no latent-heat reference", record.name),
        })?;
        if !t_r.is_finite() || t_r <= 0.0 {
            return Err(ProcessError::NonPhysical {
                what: "refrigerant temperature must be positive and finite",
            });
        }

        let tr_in = t_r / record.tc_r;
        let tr_ref = latent.t_ref_r / record.tc_r;
        if tr_in >= 1.0 {
            return Err(ProcessError::NonPhysical {
                what: "refrigerant inlet temperature at or above critical",
            });
        }

        let molar = latent.hvap_btu_per_lbmol * ((1.0 - tr_in) / (1.0 - tr_ref)).powf(WATSON_EXPONENT);
        Ok(Self {
            tr_in,
            tr_ref,
            molar_btu_per_lbmol: molar,
            mass_btu_per_lb: molar / record.molar_mass,
        })
    }
}

/// Required refrigerant flow and its assumed end states.
#[derive(Debug, Clone, PartialEq)]
pub struct RefrigerantSizing {
    pub refrigerant: String,
    /// Inlet temperature [°R]
    pub t_in_r: f64,
    /// Duty magnitude absorbed [Btu/hr]
    pub heat_absorbed_btu_per_hr: f64,
    pub latent_heat: WatsonLatentHeat,
    /// Required mass flow [lb/hr]
    pub mass_flow_lb_per_hr: f64,
    pub inlet_phase: PhaseLabel,
    pub outlet_phase: PhaseLabel,
}

/// Size the refrigerant against `duty_btu_per_hr` using the table's designated
/// refrigerant. Only the duty magnitude is used; its sign is not checked.
pub fn refrigerant_flow(
    table: &dyn PropertyTable,
    duty_btu_per_hr: f64,
    t_in_r: f64,
) -> ProcessResult<RefrigerantSizing> {
    let record = table.refrigerant()?;
    size_with(record, duty_btu_per_hr, t_in_r)
}

/// Same as [`refrigerant_flow`] for a named species, which must carry
/// latent-heat data.
pub fn refrigerant_flow_for(
    table: &dyn PropertyTable,
    species: &str,
    duty_btu_per_hr: f64,
    t_in_r: f64,
) -> ProcessResult<RefrigerantSizing> {
    let record = table.lookup(species)?;
    if !record.is_refrigerant_capable() {
        return Err(FluidError::InvalidArg {
            what: format!("{species} cannot be used as refrigerant"),
        }
        .into());
    }
    size_with(record, duty_btu_per_hr, t_in_r)
}

fn size_with(
    record: &SpeciesRecord,
    duty_btu_per_hr: f64,
    t_in_r: f64,
) -> ProcessResult<RefrigerantSizing> {
    if !duty_btu_per_hr.is_finite() {
        return Err(ProcessError::NonPhysical {
            what: "heat duty must be finite",
        });
    }
    let latent_heat = WatsonLatentHeat::evaluate(record, t_in_r)?;
    let heat = duty_btu_per_hr.abs();
    let mass_flow = heat / latent_heat.mass_btu_per_lb;

    debug!(
        refrigerant = record.name.as_str(),
        t_in_r,
        latent_btu_per_lb = latent_heat.mass_btu_per_lb,
        mass_flow,
        "refrigerant sizing"
    );

    Ok(RefrigerantSizing {
        refrigerant: record.name.clone(),
        t_in_r,
        heat_absorbed_btu_per_hr: heat,
        latent_heat,
        mass_flow_lb_per_hr: mass_flow,
        inlet_phase: PhaseLabel::SaturatedLiquid,
        outlet_phase: PhaseLabel::SaturatedVapor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cb_fluids::{CustomTable, StandardTableRef};

    #[test]
    fn watson_at_reference_temperature_returns_reference_heat() {
        let table = StandardTableRef;
        let propane = table.refrigerant().unwrap();
        let w = WatsonLatentHeat::evaluate(propane, 536.67).unwrap();
        assert_relative_eq!(w.molar_btu_per_lbmol, 15_060.0, max_relative = 1e-12);
        assert_relative_eq!(w.mass_btu_per_lb, 15_060.0 / 44.10, max_relative = 1e-12);
    }

    #[test]
    fn propane_at_minus_40_f() {
        let table = StandardTableRef;
        let sizing = refrigerant_flow(&table, -5_000_000.0, 419.67).unwrap();

        let tr_in: f64 = 419.67 / 665.70;
        let tr_ref: f64 = 536.67 / 665.70;
        let dh = 15_060.0 * ((1.0 - tr_in) / (1.0 - tr_ref)).powf(0.38);
        let expected = 5_000_000.0 / (dh / 44.10);

        assert_relative_eq!(sizing.latent_heat.tr_in, tr_in, max_relative = 1e-15);
        assert_relative_eq!(sizing.latent_heat.molar_btu_per_lbmol, dh, max_relative = 1e-15);
        assert_relative_eq!(sizing.mass_flow_lb_per_hr, expected, max_relative = 1e-12);
        assert_relative_eq!(sizing.mass_flow_lb_per_hr, 11_456.992_31, max_relative = 1e-8);
        assert_eq!(sizing.inlet_phase, PhaseLabel::SaturatedLiquid);
        assert_eq!(sizing.outlet_phase, PhaseLabel::SaturatedVapor);
        assert_eq!(sizing.refrigerant, "Propane");
    }

    #[test]
    fn duty_sign_is_ignored() {
        let table = StandardTableRef;
        let cooling = refrigerant_flow(&table, -1.0e6, 419.67).unwrap();
        let heating = refrigerant_flow(&table, 1.0e6, 419.67).unwrap();
        assert_eq!(cooling.mass_flow_lb_per_hr, heating.mass_flow_lb_per_hr);
    }

    #[test]
    fn supercritical_inlet_is_rejected() {
        let table = StandardTableRef;
        assert!(matches!(
            refrigerant_flow(&table, 1.0e6, 700.0),
            Err(ProcessError::NonPhysical { .. })
        ));
    }

    #[test]
    fn named_refrigerant_must_have_latent_data() {
        let table = StandardTableRef;
        assert!(refrigerant_flow_for(&table, "C3H8", 1.0e6, 419.67).is_ok());
        assert!(matches!(
            refrigerant_flow_for(&table, "Ethane", 1.0e6, 419.67),
            Err(ProcessError::Fluid(FluidError::InvalidArg { .. }))
        ));
        assert!(matches!(
            refrigerant_flow_for(&table, "R134a", 1.0e6, 419.67),
            Err(ProcessError::Fluid(FluidError::UnknownSpecies { .. }))
        ));
    }

    #[test]
    fn table_without_refrigerant_fails() {
        let table = CustomTable::default();
        assert!(matches!(
            refrigerant_flow(&table, 1.0e6, 419.67),
            Err(ProcessError::Fluid(_))
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use cb_fluids::StandardTableRef;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn flow_scales_with_duty_magnitude(
            duty in 1.0e3_f64..1.0e9,
            k in 0.1_f64..10.0,
            t_in in 400.0_f64..650.0,
        ) {
            let table = StandardTableRef;
            let base = refrigerant_flow(&table, duty, t_in).unwrap().mass_flow_lb_per_hr;
            let scaled = refrigerant_flow(&table, k * duty, t_in).unwrap().mass_flow_lb_per_hr;
            let negated = refrigerant_flow(&table, -duty, t_in).unwrap().mass_flow_lb_per_hr;

            prop_assert!(base > 0.0);
            prop_assert!((scaled - k * base).abs() <= 1e-12 * scaled);
            prop_assert_eq!(negated, base);
        }
    }
}
