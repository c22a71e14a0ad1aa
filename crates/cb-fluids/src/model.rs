//! Mixture enthalpy model trait and the Peng-Robinson evaluator.

use crate::composition::Composition;
use crate::cubic::{RootSolution, SolverSettings};
use crate::error::{FluidError, FluidResult};
use crate::ideal_gas::{IdealEnthalpyModel, LinearCpModel};
use crate::phase::PhaseLabel;
use crate::table::{PropertyTable, SpeciesRecord, StandardTableRef};
use cb_core::constants::R_FIELD;
use cb_core::units::{Pressure, Temperature, to_psia, to_rankine};
use std::sync::Arc;
use tracing::debug;

/// Peng-Robinson Ωa.
pub const OMEGA_A: f64 = 0.45724;
/// Peng-Robinson Ωb.
pub const OMEGA_B: f64 = 0.07780;
/// κ(ω) = K0 + K1·ω − K2·ω²
pub const KAPPA: [f64; 3] = [0.37464, 1.54226, 0.26992];

// Rounded constants of the departure function: 2√2, 1+√2 and √2−1.
const TWO_SQRT2: f64 = 2.8284;
const ONE_PLUS_SQRT2: f64 = 2.414;
const SQRT2_MINUS_ONE: f64 = 0.414;

/// Result of a mixture enthalpy evaluation at (T, P).
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureState {
    /// Temperature [°R]
    pub t_r: f64,
    /// Pressure [psia]
    pub p_psia: f64,
    /// Total molar enthalpy [Btu/lbmol]
    pub h_total: f64,
    /// Ideal-gas contribution [Btu/lbmol]
    pub h_ideal: f64,
    /// Residual (departure) contribution [Btu/lbmol]
    pub h_residual: f64,
    /// Compressibility factor
    pub z: f64,
    /// Mixture molar mass [lb/lbmol]
    pub mixture_mw: f64,
    /// Dimensionless EoS parameter A
    pub a_dim: f64,
    /// Dimensionless EoS parameter B
    pub b_dim: f64,
    pub root: RootSolution,
}

impl MixtureState {
    /// Phase label from the compressibility heuristic.
    pub fn phase(&self) -> PhaseLabel {
        PhaseLabel::from_z(self.z)
    }
}

/// Trait for mixture enthalpy models.
///
/// Implementations must be thread-safe (Send + Sync) and free of hidden state:
/// identical inputs give identical outputs.
pub trait EnthalpyModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Property table the model resolves species against.
    fn table(&self) -> &dyn PropertyTable;

    /// Total molar enthalpy, Z and molar mass at `t_r` [°R] and `p_psia` [psia].
    ///
    /// Fails with [`FluidError::UnknownSpecies`] before any arithmetic if the
    /// composition names a species missing from the table.
    fn mixture_enthalpy(
        &self,
        t_r: f64,
        p_psia: f64,
        comp: &Composition,
    ) -> FluidResult<MixtureState>;

    /// Same as [`EnthalpyModel::mixture_enthalpy`] with uom quantities.
    fn mixture_enthalpy_at(
        &self,
        t: Temperature,
        p: Pressure,
        comp: &Composition,
    ) -> FluidResult<MixtureState> {
        self.mixture_enthalpy(to_rankine(t), to_psia(p), comp)
    }
}

/// Per-species Peng-Robinson parameters at a given temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PureParams {
    /// Covolume b [ft³/lbmol]
    pub b: f64,
    pub kappa: f64,
    pub alpha: f64,
    /// Attraction at the critical point [psia·ft⁶/lbmol²]
    pub ac: f64,
    /// Temperature-corrected attraction a = ac·α
    pub a: f64,
}

impl PureParams {
    pub fn of(record: &SpeciesRecord, t_r: f64) -> Self {
        let tc = record.tc_r;
        let pc = record.pc_psia;
        let omega = record.omega;

        let b = OMEGA_B * R_FIELD * tc / pc;
        let kappa = KAPPA[0] + KAPPA[1] * omega - KAPPA[2] * omega * omega;
        let tr = t_r / tc;
        let alpha = (1.0 + kappa * (1.0 - tr.sqrt())).powi(2);
        let ac = OMEGA_A * (R_FIELD * R_FIELD * tc * tc) / pc;
        Self {
            b,
            kappa,
            alpha,
            ac,
            a: ac * alpha,
        }
    }
}

/// Mixture parameters from the mixing rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixtureParams {
    pub mixture_mw: f64,
    pub h_ideal: f64,
    /// a_mix = (Σ yᵢ·√aᵢ)²
    pub a_mix: f64,
    /// b_mix = Σ yᵢ·bᵢ
    pub b_mix: f64,
    /// A = a_mix·P / (R·T)²
    pub a_dim: f64,
    /// B = b_mix·P / (R·T)
    pub b_dim: f64,
}

/// Simplified Peng-Robinson enthalpy departure [Btu/lbmol].
pub fn residual_enthalpy(t_r: f64, z: f64, a_mix: f64, b_mix: f64, b_dim: f64) -> f64 {
    R_FIELD * t_r * (z - 1.0)
        - (a_mix / (TWO_SQRT2 * b_mix))
            * ((z + ONE_PLUS_SQRT2 * b_dim) / (z - SQRT2_MINUS_ONE * b_dim)).ln()
}

/// Peng-Robinson mixture evaluator with geometric mixing (no binary interaction
/// parameters) and a pluggable ideal-gas enthalpy model.
#[derive(Debug, Clone)]
pub struct PengRobinson {
    table: Arc<dyn PropertyTable>,
    ideal: Arc<dyn IdealEnthalpyModel>,
    solver: SolverSettings,
}

impl PengRobinson {
    pub fn new(table: Arc<dyn PropertyTable>) -> Self {
        Self {
            table,
            ideal: Arc::new(LinearCpModel::default()),
            solver: SolverSettings::default(),
        }
    }

    /// Evaluator over the shared nine-species table with reference settings.
    pub fn standard() -> Self {
        Self::new(Arc::new(StandardTableRef))
    }

    pub fn with_ideal_model(mut self, ideal: Arc<dyn IdealEnthalpyModel>) -> Self {
        self.ideal = ideal;
        self
    }

    pub fn with_solver(mut self, solver: SolverSettings) -> Self {
        self.solver = solver;
        self
    }

    /// Resolve every species first so an unknown name aborts before any arithmetic.
    fn resolve<'a>(&'a self, comp: &Composition) -> FluidResult<Vec<(&'a SpeciesRecord, f64)>> {
        comp.iter()
            .map(|(name, y)| self.table.lookup(name).map(|rec| (rec, y)))
            .collect()
    }

    /// Apply the mixing rules at (T, P).
    pub fn mixing(&self, t_r: f64, p_psia: f64, comp: &Composition) -> FluidResult<MixtureParams> {
        let species = self.resolve(comp)?;
        if species.is_empty() {
            return Err(FluidError::InvalidArg {
                what: "empty composition".into(),
            });
        }

        let mut mixture_mw = 0.0;
        let mut h_ideal = 0.0;
        let mut b_mix = 0.0;
        let mut a_sqrt_sum = 0.0;
        for (rec, y) in species {
            mixture_mw += y * rec.molar_mass;
            h_ideal += y * self.ideal.molar_enthalpy(rec, t_r);

            let pure = PureParams::of(rec, t_r);
            b_mix += y * pure.b;
            a_sqrt_sum += y * pure.a.sqrt();
        }
        let a_mix = a_sqrt_sum * a_sqrt_sum;
        let rt = R_FIELD * t_r;

        Ok(MixtureParams {
            mixture_mw,
            h_ideal,
            a_mix,
            b_mix,
            a_dim: a_mix * p_psia / (rt * rt),
            b_dim: b_mix * p_psia / rt,
        })
    }
}

impl EnthalpyModel for PengRobinson {
    fn name(&self) -> &str {
        "peng-robinson"
    }

    fn table(&self) -> &dyn PropertyTable {
        self.table.as_ref()
    }

    fn mixture_enthalpy(
        &self,
        t_r: f64,
        p_psia: f64,
        comp: &Composition,
    ) -> FluidResult<MixtureState> {
        if !t_r.is_finite() || t_r <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        if !p_psia.is_finite() || p_psia <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }

        let params = self.mixing(t_r, p_psia, comp)?;
        let root = self.solver.solve(params.a_dim, params.b_dim)?;
        let h_residual = residual_enthalpy(t_r, root.z, params.a_mix, params.b_mix, params.b_dim);
        let h_total = params.h_ideal + h_residual;
        if !h_total.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "enthalpy evaluated to a non-finite value",
            });
        }

        debug!(
            model = self.name(),
            ideal = self.ideal.name(),
            t_r,
            p_psia,
            z = root.z,
            h_total,
            "mixture enthalpy"
        );

        Ok(MixtureState {
            t_r,
            p_psia,
            h_total,
            h_ideal: params.h_ideal,
            h_residual,
            z: root.z,
            mixture_mw: params.mixture_mw,
            a_dim: params.a_dim,
            b_dim: params.b_dim,
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CustomTable;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use cb_core::units::{fahrenheit, psia};

    fn methane() -> Composition {
        Composition::pure("Methane")
    }

    #[test]
    fn pure_params_for_methane() {
        let table = StandardTableRef;
        let rec = table.lookup("Methane").unwrap();
        let pure = PureParams::of(rec, 559.67);
        assert_relative_eq!(pure.b, 0.07780 * 10.73159 * 343.01 / 667.0, max_relative = 1e-14);
        assert_relative_eq!(
            pure.kappa,
            0.37464 + 1.54226 * 0.012 - 0.26992 * 0.012 * 0.012,
            max_relative = 1e-14
        );
        // above Tc alpha drops below one
        assert!(pure.alpha < 1.0);
        assert_relative_eq!(pure.a, pure.ac * pure.alpha, max_relative = 1e-14);
    }

    #[test]
    fn methane_at_800_psia_matches_reference() {
        let model = PengRobinson::standard();
        let state = model.mixture_enthalpy(559.67, 800.0, &methane()).unwrap();
        assert_relative_eq!(state.z, 0.906_596_444_4, max_relative = 1e-8);
        assert_relative_eq!(state.h_total, -747.308_062_22, max_relative = 1e-8);
        assert_eq!(state.mixture_mw, 16.04);
        assert_relative_eq!(state.a_dim, 0.163_524_328_03, max_relative = 1e-8);
        assert_relative_eq!(state.b_dim, 0.057_189_790_22, max_relative = 1e-8);
        assert_abs_diff_eq!(state.h_ideal + state.h_residual, state.h_total, epsilon = 1e-9);
        assert!(state.root.converged());
        assert_eq!(state.phase(), PhaseLabel::Gas);
    }

    #[test]
    fn quantity_adapter_matches_field_units() {
        let model = PengRobinson::standard();
        let field = model.mixture_enthalpy(559.67, 800.0, &methane()).unwrap();
        let si = model
            .mixture_enthalpy_at(fahrenheit(100.0), psia(800.0), &methane())
            .unwrap();
        assert_relative_eq!(field.h_total, si.h_total, max_relative = 1e-9);
        assert_relative_eq!(field.z, si.z, max_relative = 1e-9);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let model = PengRobinson::standard();
        let comp = Composition::new([("Methane", 0.9), ("Ethane", 0.06), ("Nitrogen", 0.04)])
            .unwrap();
        let first = model.mixture_enthalpy(500.0, 600.0, &comp).unwrap();
        let second = model.mixture_enthalpy(500.0, 600.0, &comp).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_species_aborts() {
        let model = PengRobinson::standard();
        let comp = Composition::unchecked([("Methane", 0.5), ("Helium", 0.5)]).unwrap();
        let err = model.mixture_enthalpy(500.0, 100.0, &comp).unwrap_err();
        assert_eq!(
            err,
            FluidError::UnknownSpecies {
                name: "Helium".into()
            }
        );
        assert!(model.mixing(500.0, 100.0, &comp).is_err());
    }

    #[test]
    fn rejects_non_physical_conditions() {
        let model = PengRobinson::standard();
        assert!(matches!(
            model.mixture_enthalpy(0.0, 100.0, &methane()),
            Err(FluidError::NonPhysical { .. })
        ));
        assert!(matches!(
            model.mixture_enthalpy(500.0, -1.0, &methane()),
            Err(FluidError::NonPhysical { .. })
        ));
    }

    #[test]
    fn mixing_rules_are_mole_weighted() {
        let model = PengRobinson::standard();
        let comp = Composition::new([("Methane", 0.5), ("Ethane", 0.5)]).unwrap();
        let mix = model.mixing(559.67, 100.0, &comp).unwrap();

        let table = StandardTableRef;
        let c1 = PureParams::of(table.lookup("Methane").unwrap(), 559.67);
        let c2 = PureParams::of(table.lookup("Ethane").unwrap(), 559.67);
        assert_relative_eq!(mix.mixture_mw, 0.5 * 16.04 + 0.5 * 30.07, max_relative = 1e-14);
        assert_relative_eq!(mix.b_mix, 0.5 * c1.b + 0.5 * c2.b, max_relative = 1e-14);
        let sqrt_sum = 0.5 * c1.a.sqrt() + 0.5 * c2.a.sqrt();
        assert_relative_eq!(mix.a_mix, sqrt_sum * sqrt_sum, max_relative = 1e-14);
        assert_relative_eq!(
            mix.h_ideal,
            0.5 * 8.35 * 100.0 + 0.5 * 12.64 * 100.0,
            max_relative = 1e-9
        );
    }

    #[derive(Debug)]
    struct NoIdealPart;

    impl IdealEnthalpyModel for NoIdealPart {
        fn name(&self) -> &str {
            "none"
        }

        fn molar_enthalpy(&self, _record: &SpeciesRecord, _t_r: f64) -> f64 {
            0.0
        }
    }

    #[test]
    fn ideal_model_is_pluggable() {
        let model = PengRobinson::standard().with_ideal_model(Arc::new(NoIdealPart));
        let state = model.mixture_enthalpy(559.67, 800.0, &methane()).unwrap();
        assert_eq!(state.h_ideal, 0.0);
        assert_eq!(state.h_total, state.h_residual);

        let reference = PengRobinson::standard()
            .mixture_enthalpy(559.67, 800.0, &methane())
            .unwrap();
        assert_eq!(state.z, reference.z);
    }

    #[test]
    fn synthetic_table_can_be_injected() {
        let table = CustomTable::new(vec![
            SpeciesRecord::new("Synthetic", 400.0, 600.0, 0.05, 20.0, 10.0).unwrap(),
        ])
        .unwrap();
        let model = PengRobinson::new(Arc::new(table));
        let state = model
            .mixture_enthalpy(500.0, 14.7, &Composition::pure("synthetic"))
            .unwrap();
        assert_eq!(state.mixture_mw, 20.0);
        // near-ideal at atmospheric pressure
        assert!((state.z - 1.0).abs() < 0.02);
        assert!(model.table().lookup("Methane").is_err());
    }

    #[test]
    fn closed_form_strategy_matches_newton_for_gas() {
        let newton = PengRobinson::standard();
        let closed = PengRobinson::standard().with_solver(SolverSettings {
            strategy: crate::cubic::RootStrategy::LargestRealRoot,
            ..SolverSettings::default()
        });
        let a = newton.mixture_enthalpy(559.67, 800.0, &methane()).unwrap();
        let b = closed.mixture_enthalpy(559.67, 800.0, &methane()).unwrap();
        assert_relative_eq!(a.z, b.z, max_relative = 1e-7);
        assert_relative_eq!(a.h_total, b.h_total, max_relative = 1e-6);
    }
}
