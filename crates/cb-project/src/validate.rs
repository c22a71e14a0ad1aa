//! Case validation logic.

use crate::schema::{CaseDef, RefrigerantDef, SolverDef, StreamDef};
use cb_core::units::{TemperatureScale, to_rankine};
use cb_fluids::{PropertyTable, SUM_TOLERANCE};
use std::collections::HashMap;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown species: {name}")]
    UnknownSpecies { name: String },

    #[error("Refrigerant {name} cannot be part of the gas stream")]
    RefrigerantInStream { name: String },

    #[error("Duplicate species: '{first}' and '{second}' name the same component")]
    DuplicateSpecies { first: String, second: String },

    #[error("Mole fractions sum to {sum}, expected 1 ± {tolerance}")]
    InvalidComposition { sum: f64, tolerance: f64 },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_case(case: &CaseDef, table: &dyn PropertyTable) -> Result<(), ValidationError> {
    if case.version == 0 || case.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    validate_stream(&case.stream, case.temperature_unit, table)?;
    if let Some(refrigerant) = &case.refrigerant {
        validate_refrigerant(refrigerant, case.temperature_unit, table)?;
    }
    validate_solver(&case.solver)?;

    Ok(())
}

fn validate_stream(
    stream: &StreamDef,
    unit: TemperatureScale,
    table: &dyn PropertyTable,
) -> Result<(), ValidationError> {
    if !(stream.mass_flow_lb_per_hr.is_finite() && stream.mass_flow_lb_per_hr > 0.0) {
        return Err(invalid(
            "stream.mass_flow_lb_per_hr",
            stream.mass_flow_lb_per_hr,
            "must be positive",
        ));
    }
    if !(stream.pressure_psia.is_finite() && stream.pressure_psia > 0.0) {
        return Err(invalid(
            "stream.pressure_psia",
            stream.pressure_psia,
            "must be positive",
        ));
    }
    check_temperature("stream.inlet_temperature", stream.inlet_temperature, unit)?;
    check_temperature("stream.outlet_temperature", stream.outlet_temperature, unit)?;

    if stream.composition.is_empty() {
        return Err(invalid("stream.composition", "{}", "at least one species required"));
    }

    let allowed = table.composition_species();
    // Aliases ("C1", "Methane") resolve to the same record.
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (name, &fraction) in &stream.composition {
        if !(fraction.is_finite() && (0.0..=1.0).contains(&fraction)) {
            return Err(invalid(
                &format!("stream.composition.{name}"),
                fraction,
                "mole fraction must lie in [0, 1]",
            ));
        }
        let record = table
            .lookup(name)
            .map_err(|_| ValidationError::UnknownSpecies { name: name.clone() })?;
        if !allowed.iter().any(|r| r.name == record.name) {
            return Err(ValidationError::RefrigerantInStream { name: name.clone() });
        }
        if let Some(first) = seen.insert(record.name.as_str(), name.as_str()) {
            return Err(ValidationError::DuplicateSpecies {
                first: first.to_string(),
                second: name.clone(),
            });
        }
    }

    let sum: f64 = stream.composition.values().sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(ValidationError::InvalidComposition {
            sum,
            tolerance: SUM_TOLERANCE,
        });
    }

    Ok(())
}

fn validate_refrigerant(
    refrigerant: &RefrigerantDef,
    unit: TemperatureScale,
    table: &dyn PropertyTable,
) -> Result<(), ValidationError> {
    let t_r = check_temperature(
        "refrigerant.inlet_temperature",
        refrigerant.inlet_temperature,
        unit,
    )?;

    let record = match &refrigerant.species {
        Some(name) => table
            .lookup(name)
            .map_err(|_| ValidationError::UnknownSpecies { name: name.clone() })?,
        None => table
            .refrigerant()
            .map_err(|_| invalid("refrigerant.species", "<none>", "table has no refrigerant"))?,
    };

    if !record.is_refrigerant_capable() {
        return Err(invalid(
            "refrigerant.species",
            &record.name,
            "no latent heat data",
        ));
    }
    if t_r >= record.tc_r {
        return Err(invalid(
            "refrigerant.inlet_temperature",
            refrigerant.inlet_temperature,
            "at or above the refrigerant critical temperature",
        ));
    }

    Ok(())
}

fn validate_solver(solver: &SolverDef) -> Result<(), ValidationError> {
    if solver.max_iterations == 0 {
        return Err(invalid("solver.max_iterations", 0, "must be at least 1"));
    }
    if !(solver.step_tolerance.is_finite() && solver.step_tolerance > 0.0) {
        return Err(invalid(
            "solver.step_tolerance",
            solver.step_tolerance,
            "must be positive",
        ));
    }
    if !(solver.min_derivative.is_finite() && solver.min_derivative > 0.0) {
        return Err(invalid(
            "solver.min_derivative",
            solver.min_derivative,
            "must be positive",
        ));
    }
    Ok(())
}

/// Returns the absolute temperature in °R.
fn check_temperature(
    field: &str,
    value: f64,
    unit: TemperatureScale,
) -> Result<f64, ValidationError> {
    let t_r = to_rankine(unit.quantity(value));
    if !(t_r.is_finite() && t_r > 0.0) {
        return Err(invalid(
            field,
            format!("{value} {}", unit.symbol()),
            "must be above absolute zero",
        ));
    }
    Ok(t_r)
}
