//! Plain-text rendering of results.

use cb_fluids::{MixtureState, PropertyTable, Species};
use cb_process::{HeatDutyResult, RefrigerantSizing};

pub fn print_species(table: &dyn PropertyTable) {
    let refrigerant = table.refrigerant().ok().map(|r| r.name.clone());
    println!(
        "{:<16} {:<5} {:>8} {:>9} {:>6} {:>7} {:>6}",
        "Species", "Key", "Tc [°R]", "Pc [psia]", "ω", "MW", "Cp"
    );
    for rec in table.records() {
        let tag = if Some(&rec.name) == refrigerant.as_ref() {
            "  (refrigerant)"
        } else {
            ""
        };
        let key = rec.name.parse::<Species>().map(|s| s.key()).unwrap_or("-");
        println!(
            "{:<16} {:<5} {:>8.2} {:>9.1} {:>6.3} {:>7.2} {:>6.2}{}",
            rec.name, key, rec.tc_r, rec.pc_psia, rec.omega, rec.molar_mass, rec.cp_ideal, tag
        );
    }
}

fn print_state(label: &str, state: &MixtureState) {
    println!(
        "  {label:<7} T = {:.2} °R  Z = {:.4}  H = {:.2} Btu/lbmol  phase {}",
        state.t_r,
        state.z,
        state.h_total,
        state.phase()
    );
    if !state.root.converged() {
        println!(
            "          warning: Z not converged after {} iterations",
            state.root.iterations
        );
    }
}

pub fn print_duty(result: &HeatDutyResult) {
    let direction = if result.is_cooling() {
        "cooling"
    } else {
        "heating"
    };
    println!(
        "Heat duty: {:.0} Btu/hr ({direction})",
        result.duty_btu_per_hr
    );
    println!(
        "  Molar flow: {:.2} lbmol/hr (MW {:.4})",
        result.molar_flow_lbmol_per_hr, result.inlet.mixture_mw
    );
    println!("  ΔH: {:.2} Btu/lbmol", result.delta_h_btu_per_lbmol);
    print_state("Inlet:", &result.inlet);
    print_state("Outlet:", &result.outlet);
}

pub fn print_refrigerant(sizing: &RefrigerantSizing) {
    let latent = &sizing.latent_heat;
    println!("Refrigerant: {}", sizing.refrigerant);
    println!(
        "  Latent heat: {:.2} Btu/lbmol ({:.2} Btu/lb) at Tr = {:.4}",
        latent.molar_btu_per_lbmol, latent.mass_btu_per_lb, latent.tr_in
    );
    println!("  Required flow: {:.2} lb/hr", sizing.mass_flow_lb_per_hr);
    println!("  Inlet phase:  {}", sizing.inlet_phase);
    println!("  Outlet phase: {}", sizing.outlet_phase);
}
