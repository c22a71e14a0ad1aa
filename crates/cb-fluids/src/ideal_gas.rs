//! Ideal-gas enthalpy models.

use crate::table::SpeciesRecord;
use cb_core::constants::IDEAL_ENTHALPY_REF_R;

/// Ideal-gas molar enthalpy of a pure species, relative to a model-defined zero.
///
/// Implementations must be deterministic; the mixture evaluator sums
/// `yᵢ·h_ig,i(T)` over the composition.
pub trait IdealEnthalpyModel: Send + Sync + std::fmt::Debug {
    /// Model name (for logging).
    fn name(&self) -> &str;

    /// Ideal-gas molar enthalpy [Btu/lbmol] at `t_r` [°R].
    fn molar_enthalpy(&self, record: &SpeciesRecord, t_r: f64) -> f64;
}

/// Constant-Cp model: `h = Cp·(T − T_ref)`.
///
/// The record's single Cp coefficient is integrated from `t_ref_r`, which
/// defaults to 0 °F (459.67 °R).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCpModel {
    pub t_ref_r: f64,
}

impl Default for LinearCpModel {
    fn default() -> Self {
        Self {
            t_ref_r: IDEAL_ENTHALPY_REF_R,
        }
    }
}

impl IdealEnthalpyModel for LinearCpModel {
    fn name(&self) -> &str {
        "linear-cp"
    }

    fn molar_enthalpy(&self, record: &SpeciesRecord, t_r: f64) -> f64 {
        record.cp_ideal * (t_r - self.t_ref_r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{PropertyTable, StandardTable};

    #[test]
    fn zero_at_reference_temperature() {
        let model = LinearCpModel::default();
        let methane = StandardTable::shared().lookup("Methane").unwrap();
        assert_eq!(model.molar_enthalpy(methane, 459.67), 0.0);
    }

    #[test]
    fn linear_in_temperature() {
        let model = LinearCpModel::default();
        let ethane = StandardTable::shared().lookup("Ethane").unwrap();
        let h = model.molar_enthalpy(ethane, 559.67);
        assert!((h - 12.64 * 100.0).abs() < 1e-9);
        let h_cold = model.molar_enthalpy(ethane, 419.67);
        assert!((h_cold + 12.64 * 40.0).abs() < 1e-9);
    }
}
