//! Heat duty of a gas stream cooled (or heated) at constant pressure.

use crate::error::{ProcessError, ProcessResult};
use cb_core::numeric::ensure_positive;
use cb_fluids::{Composition, EnthalpyModel, MixtureState, PhaseLabel, PropertyTable};
use tracing::debug;

/// Gas stream conditions for a duty calculation, in field units.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatDutyInput {
    /// Mass flow [lb/hr]
    pub mass_flow_lb_per_hr: f64,
    /// Inlet temperature [°R]
    pub t_in_r: f64,
    /// Outlet temperature [°R]
    pub t_out_r: f64,
    /// Pressure, same at inlet and outlet [psia]
    pub p_psia: f64,
    pub composition: Composition,
}

/// Heat duty with the states it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatDutyResult {
    /// Duty [Btu/hr]; negative for cooling
    pub duty_btu_per_hr: f64,
    /// Outlet minus inlet molar enthalpy [Btu/lbmol]
    pub delta_h_btu_per_lbmol: f64,
    /// Molar flow on the inlet molar-mass basis [lbmol/hr]
    pub molar_flow_lbmol_per_hr: f64,
    pub inlet: MixtureState,
    pub outlet: MixtureState,
}

impl HeatDutyResult {
    pub fn inlet_phase(&self) -> PhaseLabel {
        self.inlet.phase()
    }

    pub fn outlet_phase(&self) -> PhaseLabel {
        self.outlet.phase()
    }

    pub fn is_cooling(&self) -> bool {
        self.duty_btu_per_hr < 0.0
    }
}

/// Compute the duty to take the stream from inlet to outlet temperature.
///
/// `duty = (H_out − H_in) · ṁ / MW_in`. The inlet molar mass is the flow basis.
/// The table's refrigerant may not appear in the stream.
pub fn heat_duty(model: &dyn EnthalpyModel, input: &HeatDutyInput) -> ProcessResult<HeatDutyResult> {
    let mass_flow = ensure_positive(input.mass_flow_lb_per_hr, "mass flow")?;
    reject_refrigerant(model.table(), &input.composition)?;

    let inlet = model.mixture_enthalpy(input.t_in_r, input.p_psia, &input.composition)?;
    let outlet = model.mixture_enthalpy(input.t_out_r, input.p_psia, &input.composition)?;

    if inlet.mixture_mw <= 0.0 {
        return Err(ProcessError::NonPhysical {
            what: "mixture molar mass must be positive",
        });
    }

    let delta_h = outlet.h_total - inlet.h_total;
    let molar_flow = mass_flow / inlet.mixture_mw;
    let duty = delta_h * molar_flow;

    debug!(
        model = model.name(),
        delta_h,
        molar_flow,
        duty,
        z_in = inlet.z,
        z_out = outlet.z,
        "heat duty"
    );

    Ok(HeatDutyResult {
        duty_btu_per_hr: duty,
        delta_h_btu_per_lbmol: delta_h,
        molar_flow_lbmol_per_hr: molar_flow,
        inlet,
        outlet,
    })
}

fn reject_refrigerant(table: &dyn PropertyTable, comp: &Composition) -> ProcessResult<()> {
    let Ok(refrigerant) = table.refrigerant() else {
        return Ok(());
    };
    for (name, _) in comp.iter() {
        // unknown names surface later as UnknownSpecies
        if let Ok(record) = table.lookup(name)
            && record.name == refrigerant.name
        {
            return Err(ProcessError::RefrigerantInStream {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cb_fluids::{FluidError, PengRobinson};

    fn methane_case() -> HeatDutyInput {
        HeatDutyInput {
            mass_flow_lb_per_hr: 10_000_000.0,
            t_in_r: 559.67,
            t_out_r: 419.67,
            p_psia: 800.0,
            composition: Composition::pure("Methane"),
        }
    }

    #[test]
    fn methane_cooling_duty() {
        let model = PengRobinson::standard();
        let result = heat_duty(&model, &methane_case()).unwrap();
        assert!(result.is_cooling());
        assert_relative_eq!(result.duty_btu_per_hr, -1_667_378_625.35, max_relative = 1e-6);
        assert_relative_eq!(
            result.molar_flow_lbmol_per_hr,
            10_000_000.0 / 16.04,
            max_relative = 1e-12
        );
        assert_eq!(result.inlet_phase(), PhaseLabel::Gas);
        assert_eq!(result.outlet_phase(), PhaseLabel::Gas);
    }

    #[test]
    fn heating_is_positive_and_antisymmetric() {
        let model = PengRobinson::standard();
        let cooling = heat_duty(&model, &methane_case()).unwrap();
        let mut reverse = methane_case();
        std::mem::swap(&mut reverse.t_in_r, &mut reverse.t_out_r);
        let heating = heat_duty(&model, &reverse).unwrap();
        assert!(heating.duty_btu_per_hr > 0.0);
        assert_relative_eq!(
            heating.delta_h_btu_per_lbmol,
            -cooling.delta_h_btu_per_lbmol,
            max_relative = 1e-12
        );
    }

    #[test]
    fn refrigerant_is_rejected_in_gas_stream() {
        let model = PengRobinson::standard();
        let mut input = methane_case();
        input.composition = Composition::new([("Methane", 0.9), ("C3H8", 0.1)]).unwrap();
        assert_eq!(
            heat_duty(&model, &input).unwrap_err(),
            ProcessError::RefrigerantInStream {
                name: "C3H8".to_string()
            }
        );

        input.composition = Composition::pure("Propane");
        assert!(matches!(
            heat_duty(&model, &input),
            Err(ProcessError::RefrigerantInStream { .. })
        ));
    }

    #[test]
    fn same_temperature_gives_zero_duty() {
        let model = PengRobinson::standard();
        let mut input = methane_case();
        input.t_out_r = input.t_in_r;
        let result = heat_duty(&model, &input).unwrap();
        assert_eq!(result.duty_btu_per_hr, 0.0);
    }

    #[test]
    fn rejects_non_positive_mass_flow() {
        let model = PengRobinson::standard();
        let mut input = methane_case();
        input.mass_flow_lb_per_hr = 0.0;
        assert!(matches!(
            heat_duty(&model, &input),
            Err(ProcessError::InvalidArg { .. })
        ));
    }

    #[test]
    fn unknown_species_propagates() {
        let model = PengRobinson::standard();
        let mut input = methane_case();
        input.composition = Composition::unchecked([("Methane", 0.9), ("Argon", 0.1)]).unwrap();
        let err = heat_duty(&model, &input).unwrap_err();
        assert_eq!(
            err,
            ProcessError::Fluid(FluidError::UnknownSpecies {
                name: "Argon".into()
            })
        );
    }
}
