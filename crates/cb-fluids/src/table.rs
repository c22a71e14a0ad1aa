//! Component property table.
//!
//! Critical constants are in field units: Tc [°R], Pc [psia], molar mass
//! [lb/lbmol], ideal-gas Cp coefficient [Btu/(lbmol·°R)] and latent heat
//! [Btu/lbmol].

use crate::error::{FluidError, FluidResult};
use crate::species::Species;
use std::sync::OnceLock;

/// Reference point for the Watson latent-heat correlation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatentHeatRef {
    /// Heat of vaporization at `t_ref_r` [Btu/lbmol]
    pub hvap_btu_per_lbmol: f64,
    /// Temperature at which `hvap_btu_per_lbmol` applies [°R]
    pub t_ref_r: f64,
}

/// Immutable property record for one species.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesRecord {
    pub name: String,
    /// Critical temperature [°R]
    pub tc_r: f64,
    /// Critical pressure [psia]
    pub pc_psia: f64,
    /// Acentric factor
    pub omega: f64,
    /// Molar mass [lb/lbmol]
    pub molar_mass: f64,
    /// Constant ideal-gas heat capacity [Btu/(lbmol·°R)]
    pub cp_ideal: f64,
    /// Present only for species usable as refrigerant.
    pub latent: Option<LatentHeatRef>,
}

impl SpeciesRecord {
    /// Create a record, rejecting non-physical critical constants.
    pub fn new(
        name: impl Into<String>,
        tc_r: f64,
        pc_psia: f64,
        omega: f64,
        molar_mass: f64,
        cp_ideal: f64,
    ) -> FluidResult<Self> {
        if !(tc_r.is_finite() && tc_r > 0.0) {
            return Err(FluidError::NonPhysical {
                what: "critical temperature must be positive and finite",
            });
        }
        if !(pc_psia.is_finite() && pc_psia > 0.0) {
            return Err(FluidError::NonPhysical {
                what: "critical pressure must be positive and finite",
            });
        }
        if !(molar_mass.is_finite() && molar_mass > 0.0) {
            return Err(FluidError::NonPhysical {
                what: "molar mass must be positive and finite",
            });
        }
        if !omega.is_finite() || !cp_ideal.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "acentric factor and Cp must be finite",
            });
        }
        Ok(Self {
            name: name.into(),
            tc_r,
            pc_psia,
            omega,
            molar_mass,
            cp_ideal,
            latent: None,
        })
    }

    /// Attach a Watson reference point.
    pub fn with_latent_heat(mut self, hvap_btu_per_lbmol: f64, t_ref_r: f64) -> Self {
        self.latent = Some(LatentHeatRef {
            hvap_btu_per_lbmol,
            t_ref_r,
        });
        self
    }

    pub fn is_refrigerant_capable(&self) -> bool {
        self.latent.is_some()
    }
}

/// Read-only lookup of species properties.
///
/// Injected into the enthalpy evaluator so tests can substitute synthetic species.
pub trait PropertyTable: Send + Sync + std::fmt::Debug {
    /// Find a species by name or alias.
    fn lookup(&self, name: &str) -> FluidResult<&SpeciesRecord>;

    /// The designated refrigerant species.
    fn refrigerant(&self) -> FluidResult<&SpeciesRecord>;

    /// All records in table order.
    fn records(&self) -> &[SpeciesRecord];

    /// Records that may appear in a gas composition (refrigerant excluded).
    fn composition_species(&self) -> Vec<&SpeciesRecord> {
        let refrigerant = self.refrigerant().ok().map(|r| r.name.as_str());
        self.records()
            .iter()
            .filter(|r| Some(r.name.as_str()) != refrigerant)
            .collect()
    }
}

/// The fixed nine-species table with propane as refrigerant.
#[derive(Debug)]
pub struct StandardTable {
    records: Vec<SpeciesRecord>,
}

fn standard_record(species: Species) -> SpeciesRecord {
    // (Tc °R, Pc psia, ω, MW, Cp)
    let (tc, pc, omega, mw, cp) = match species {
        Species::Methane => (343.01, 667.0, 0.012, 16.04, 8.35),
        Species::Ethane => (549.58, 706.7, 0.100, 30.07, 12.64),
        Species::Propane => (665.70, 616.0, 0.152, 44.10, 17.56),
        Species::NButane => (765.22, 550.6, 0.200, 58.12, 23.51),
        Species::IsoButane => (734.06, 527.9, 0.181, 58.12, 23.25),
        Species::NPentane => (845.5, 488.8, 0.252, 72.15, 28.98),
        Species::NHexane => (913.7, 438.7, 0.301, 86.18, 34.62),
        Species::CarbonDioxide => (547.43, 1070.0, 0.224, 44.01, 8.85),
        Species::Nitrogen => (227.16, 492.4, 0.039, 28.01, 6.95),
    };
    let record = SpeciesRecord {
        name: species.display_name().to_string(),
        tc_r: tc,
        pc_psia: pc,
        omega,
        molar_mass: mw,
        cp_ideal: cp,
        latent: None,
    };
    match species {
        Species::Propane => record.with_latent_heat(15_060.0, 536.67),
        _ => record,
    }
}

impl StandardTable {
    pub const REFRIGERANT: Species = Species::Propane;

    fn build() -> Self {
        Self {
            records: Species::ALL.iter().map(|&s| standard_record(s)).collect(),
        }
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> &'static StandardTable {
        static TABLE: OnceLock<StandardTable> = OnceLock::new();
        TABLE.get_or_init(Self::build)
    }

    /// Record for a known species.
    pub fn record(&self, species: Species) -> &SpeciesRecord {
        // records are built from ALL, which lists variants in declaration order
        &self.records[species as usize]
    }
}

impl PropertyTable for StandardTable {
    fn lookup(&self, name: &str) -> FluidResult<&SpeciesRecord> {
        name.parse::<Species>()
            .map(|s| self.record(s))
            .map_err(|_| FluidError::UnknownSpecies {
                name: name.to_string(),
            })
    }

    fn refrigerant(&self) -> FluidResult<&SpeciesRecord> {
        Ok(self.record(Self::REFRIGERANT))
    }

    fn records(&self) -> &[SpeciesRecord] {
        &self.records
    }
}

/// Zero-sized handle forwarding to [`StandardTable::shared`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTableRef;

impl PropertyTable for StandardTableRef {
    fn lookup(&self, name: &str) -> FluidResult<&SpeciesRecord> {
        StandardTable::shared().lookup(name)
    }

    fn refrigerant(&self) -> FluidResult<&SpeciesRecord> {
        StandardTable::shared().refrigerant()
    }

    fn records(&self) -> &[SpeciesRecord] {
        StandardTable::shared().records()
    }
}

/// Table built from caller-supplied records, matched by case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct CustomTable {
    records: Vec<SpeciesRecord>,
    refrigerant: Option<usize>,
}

impl CustomTable {
    pub fn new(records: Vec<SpeciesRecord>) -> FluidResult<Self> {
        for (i, rec) in records.iter().enumerate() {
            if records[..i]
                .iter()
                .any(|r| r.name.eq_ignore_ascii_case(&rec.name))
            {
                return Err(FluidError::InvalidArg {
                    what: format!("duplicate species record: {}", rec.name),
                });
            }
        }
        Ok(Self {
            records,
            refrigerant: None,
        })
    }

    /// Designate the refrigerant; the record must carry latent-heat data.
    pub fn with_refrigerant(mut self, name: &str) -> FluidResult<Self> {
        let idx = self.position(name)?;
        if !self.records[idx].is_refrigerant_capable() {
            return Err(FluidError::InvalidArg {
                what: format!("{name} has no latent-heat reference"),
            });
        }
        self.refrigerant = Some(idx);
        Ok(self)
    }

    fn position(&self, name: &str) -> FluidResult<usize> {
        let wanted = name.trim();
        self.records
            .iter()
            .position(|r| r.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FluidError::UnknownSpecies {
                name: name.to_string(),
            })
    }
}

impl PropertyTable for CustomTable {
    fn lookup(&self, name: &str) -> FluidResult<&SpeciesRecord> {
        self.position(name).map(|i| &self.records[i])
    }

    fn refrigerant(&self) -> FluidResult<&SpeciesRecord> {
        self.refrigerant
            .map(|i| &self.records[i])
            .ok_or_else(|| FluidError::InvalidArg {
                what: "table has no designated refrigerant".into(),
            })
    }

    fn records(&self) -> &[SpeciesRecord] {
        &self.records
    }
}
