//! Case file schema definitions.

use cb_core::units::TemperatureScale;
use cb_fluids::{NewtonSettings, RootStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One chiller case: the gas stream, an optional refrigerant loop and solver overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseDef {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scale for every temperature in the file.
    #[serde(default)]
    pub temperature_unit: TemperatureScale,
    pub stream: StreamDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refrigerant: Option<RefrigerantDef>,
    #[serde(default)]
    pub solver: SolverDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamDef {
    pub mass_flow_lb_per_hr: f64,
    pub inlet_temperature: f64,
    pub outlet_temperature: f64,
    pub pressure_psia: f64,
    /// Species name (or alias) to mole fraction.
    pub composition: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefrigerantDef {
    /// Defaults to the property table's designated refrigerant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    pub inlet_temperature: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverDef {
    pub root_strategy: RootStrategy,
    pub max_iterations: usize,
    pub step_tolerance: f64,
    pub min_derivative: f64,
    pub strict_convergence: bool,
}

impl Default for SolverDef {
    fn default() -> Self {
        let newton = NewtonSettings::default();
        Self {
            root_strategy: RootStrategy::default(),
            max_iterations: newton.max_iterations,
            step_tolerance: newton.step_tolerance,
            min_derivative: newton.min_derivative,
            strict_convergence: false,
        }
    }
}

impl CaseDef {
    /// Starter case written by `cb-cli init`: a lean pipeline gas chilled
    /// from 100 °F to -40 °F against propane.
    pub fn example() -> Self {
        let composition = [
            ("Methane", 0.85),
            ("Ethane", 0.07),
            ("n-Butane", 0.02),
            ("Nitrogen", 0.03),
            ("Carbon Dioxide", 0.03),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            version: crate::LATEST_VERSION,
            name: "Inlet gas chiller".to_string(),
            description: None,
            temperature_unit: TemperatureScale::Fahrenheit,
            stream: StreamDef {
                mass_flow_lb_per_hr: 10_000_000.0,
                inlet_temperature: 100.0,
                outlet_temperature: -40.0,
                pressure_psia: 800.0,
                composition,
            },
            refrigerant: Some(RefrigerantDef {
                species: None,
                inlet_temperature: -40.0,
            }),
            solver: SolverDef::default(),
        }
    }
}
