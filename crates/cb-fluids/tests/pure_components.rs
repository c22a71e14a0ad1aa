//! Pure-component compressibility checks at 100 °F and 50 psia.
//!
//! Expected values come from an independent evaluation of the same Peng-Robinson
//! parameters; the solver must land within 1e-4 and inside the 20-step budget.

use approx::assert_abs_diff_eq;
use cb_fluids::{
    Composition, CubicCoefficients, EnthalpyModel, NewtonExit, NewtonSettings, PengRobinson,
    Species, solve_newton,
};

const T_R: f64 = 559.67;
const P_PSIA: f64 = 50.0;

fn expected_z(species: Species) -> f64 {
    match species {
        Species::Methane => 0.993_396_28,
        Species::Ethane => 0.974_213_40,
        Species::Propane => 0.947_851_66,
        Species::NButane => 0.910_154_32,
        Species::IsoButane => 0.917_576_43,
        Species::NPentane => 0.856_994_77,
        Species::NHexane => 0.781_321_25,
        Species::CarbonDioxide => 0.983_312_56,
        Species::Nitrogen => 0.998_911_32,
    }
}

#[test]
fn every_species_converges_to_reference_z() {
    let model = PengRobinson::standard();
    for species in Species::ALL {
        let comp = Composition::pure_species(species);
        let state = model.mixture_enthalpy(T_R, P_PSIA, &comp).unwrap();

        assert_eq!(state.root.exit, NewtonExit::Converged, "{species}");
        assert!(state.root.iterations <= 20, "{species}");
        assert_abs_diff_eq!(state.z, expected_z(species), epsilon = 1e-4);

        let residual = CubicCoefficients::peng_robinson(state.a_dim, state.b_dim).value(state.z);
        assert_abs_diff_eq!(residual, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn heavier_species_deviate_more_from_ideal() {
    let model = PengRobinson::standard();
    let z = |s| {
        model
            .mixture_enthalpy(T_R, P_PSIA, &Composition::pure_species(s))
            .unwrap()
            .z
    };
    assert!(z(Species::Methane) > z(Species::Ethane));
    assert!(z(Species::Ethane) > z(Species::Propane));
    assert!(z(Species::NPentane) > z(Species::NHexane));
}

#[test]
fn explicit_parameters_match_evaluator() {
    // methane A and B at the same conditions
    let (a, b) = (0.010_220_270_5, 0.003_574_361_9);
    let sol = solve_newton(a, b, &NewtonSettings::default());
    assert!(sol.converged());
    assert_abs_diff_eq!(sol.z, expected_z(Species::Methane), epsilon = 1e-6);
}
