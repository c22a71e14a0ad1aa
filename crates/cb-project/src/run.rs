//! Turn a validated case into process inputs and evaluate it.

use crate::ProjectResult;
use crate::schema::CaseDef;
use crate::validate::validate_case;
use cb_core::units::to_rankine;
use cb_fluids::{Composition, NewtonSettings, PengRobinson, PropertyTable, SolverSettings};
use cb_process::{
    HeatDutyInput, HeatDutyResult, RefrigerantSizing, heat_duty, refrigerant_flow,
    refrigerant_flow_for,
};
use std::sync::Arc;
use tracing::info;

impl CaseDef {
    fn absolute_r(&self, value: f64) -> f64 {
        to_rankine(self.temperature_unit.quantity(value))
    }

    pub fn heat_duty_input(&self) -> ProjectResult<HeatDutyInput> {
        let composition = Composition::new(
            self.stream
                .composition
                .iter()
                .map(|(name, &fraction)| (name.clone(), fraction)),
        )?;
        Ok(HeatDutyInput {
            mass_flow_lb_per_hr: self.stream.mass_flow_lb_per_hr,
            t_in_r: self.absolute_r(self.stream.inlet_temperature),
            t_out_r: self.absolute_r(self.stream.outlet_temperature),
            p_psia: self.stream.pressure_psia,
            composition,
        })
    }

    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            strategy: self.solver.root_strategy,
            newton: NewtonSettings {
                max_iterations: self.solver.max_iterations,
                step_tolerance: self.solver.step_tolerance,
                min_derivative: self.solver.min_derivative,
                ..NewtonSettings::default()
            },
            strict_convergence: self.solver.strict_convergence,
        }
    }

    /// Refrigerant inlet temperature in °R, when the case sizes a refrigerant.
    pub fn refrigerant_inlet_r(&self) -> Option<f64> {
        self.refrigerant
            .as_ref()
            .map(|r| self.absolute_r(r.inlet_temperature))
    }
}

/// Duty and optional refrigerant sizing for one case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub name: String,
    pub duty: HeatDutyResult,
    pub refrigerant: Option<RefrigerantSizing>,
}

/// Validate and evaluate `case` against `table`.
pub fn run_case(case: &CaseDef, table: Arc<dyn PropertyTable>) -> ProjectResult<CaseReport> {
    validate_case(case, table.as_ref())?;

    let model = PengRobinson::new(Arc::clone(&table)).with_solver(case.solver_settings());
    let duty = heat_duty(&model, &case.heat_duty_input()?)?;

    let refrigerant = match (&case.refrigerant, case.refrigerant_inlet_r()) {
        (Some(def), Some(t_in_r)) => Some(match &def.species {
            Some(species) => {
                refrigerant_flow_for(table.as_ref(), species, duty.duty_btu_per_hr, t_in_r)?
            }
            None => refrigerant_flow(table.as_ref(), duty.duty_btu_per_hr, t_in_r)?,
        }),
        _ => None,
    };

    info!(
        case = %case.name,
        duty = duty.duty_btu_per_hr,
        refrigerant_flow = refrigerant.as_ref().map(|r| r.mass_flow_lb_per_hr),
        "case evaluated"
    );

    Ok(CaseReport {
        name: case.name.clone(),
        duty,
        refrigerant,
    })
}
