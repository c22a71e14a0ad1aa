//! Species modeled by the standard property table.

/// Natural-gas components plus the propane refrigerant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    /// Methane (CH₄)
    Methane,
    /// Ethane (C₂H₆)
    Ethane,
    /// Propane (C₃H₈), the refrigerant
    Propane,
    /// n-Butane
    NButane,
    /// Isobutane
    IsoButane,
    /// n-Pentane
    NPentane,
    /// n-Hexane
    NHexane,
    /// Carbon dioxide (CO₂)
    CarbonDioxide,
    /// Nitrogen (N₂)
    Nitrogen,
}

impl Species {
    pub const ALL: [Species; 9] = [
        Species::Methane,
        Species::Ethane,
        Species::Propane,
        Species::NButane,
        Species::IsoButane,
        Species::NPentane,
        Species::NHexane,
        Species::CarbonDioxide,
        Species::Nitrogen,
    ];

    /// Short formula-style key.
    pub fn key(&self) -> &'static str {
        match self {
            Species::Methane => "CH4",
            Species::Ethane => "C2H6",
            Species::Propane => "C3H8",
            Species::NButane => "nC4",
            Species::IsoButane => "iC4",
            Species::NPentane => "nC5",
            Species::NHexane => "nC6",
            Species::CarbonDioxide => "CO2",
            Species::Nitrogen => "N2",
        }
    }

    /// Canonical table name, used as the composition key.
    pub fn display_name(&self) -> &'static str {
        match self {
            Species::Methane => "Methane",
            Species::Ethane => "Ethane",
            Species::Propane => "Propane",
            Species::NButane => "n-Butane",
            Species::IsoButane => "iso-Butane",
            Species::NPentane => "n-Pentane",
            Species::NHexane => "n-Hexane",
            Species::CarbonDioxide => "Carbon Dioxide",
            Species::Nitrogen => "Nitrogen",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Species {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CH4" | "C1" | "METHANE" => Ok(Species::Methane),
            "C2H6" | "C2" | "ETHANE" => Ok(Species::Ethane),
            "C3H8" | "C3" | "PROPANE" => Ok(Species::Propane),
            "NC4" | "N-BUTANE" | "NBUTANE" | "BUTANE" => Ok(Species::NButane),
            "IC4" | "ISO-BUTANE" | "ISOBUTANE" | "I-BUTANE" => Ok(Species::IsoButane),
            "NC5" | "N-PENTANE" | "NPENTANE" | "PENTANE" => Ok(Species::NPentane),
            "NC6" | "N-HEXANE" | "NHEXANE" | "HEXANE" => Ok(Species::NHexane),
            "CO2" | "CARBON DIOXIDE" | "CARBONDIOXIDE" => Ok(Species::CarbonDioxide),
            "N2" | "NITROGEN" => Ok(Species::Nitrogen),
            _ => Err("unknown species"),
        }
    }
}
