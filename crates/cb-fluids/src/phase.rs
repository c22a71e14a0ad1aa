//! Phase-state labels reported alongside results.
//!
//! The engine does no flash calculation. Labels come from a compressibility
//! threshold (gas stream) or are fixed by assumption (refrigerant).

/// Compressibility above which a state is reported as gas.
pub const GAS_Z_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PhaseLabel {
    Gas,
    LiquidOrTwoPhase,
    SaturatedLiquid,
    SaturatedVapor,
}

impl PhaseLabel {
    /// Heuristic label for a gas-stream state.
    pub fn from_z(z: f64) -> Self {
        if z > GAS_Z_THRESHOLD {
            Self::Gas
        } else {
            Self::LiquidOrTwoPhase
        }
    }

    /// Vapor fraction implied by the label, if it implies one.
    pub fn vapor_fraction(self) -> Option<f64> {
        match self {
            Self::Gas | Self::SaturatedVapor => Some(1.0),
            Self::SaturatedLiquid => Some(0.0),
            Self::LiquidOrTwoPhase => None,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Gas => "Gas",
            Self::LiquidOrTwoPhase => "Liquid/Two-Phase",
            Self::SaturatedLiquid => "Saturated Liquid",
            Self::SaturatedVapor => "Saturated Vapor",
        }
    }
}

impl std::fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.vapor_fraction() {
            Some(vf) => write!(f, "{vf:.3} ({})", self.describe()),
            None => f.write_str(self.describe()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold() {
        assert_eq!(PhaseLabel::from_z(0.9), PhaseLabel::Gas);
        assert_eq!(PhaseLabel::from_z(0.011), PhaseLabel::Gas);
        assert_eq!(PhaseLabel::from_z(0.01), PhaseLabel::LiquidOrTwoPhase);
        assert_eq!(PhaseLabel::from_z(-0.2), PhaseLabel::LiquidOrTwoPhase);
    }

    #[test]
    fn display_strings() {
        assert_eq!(PhaseLabel::Gas.to_string(), "1.000 (Gas)");
        assert_eq!(PhaseLabel::LiquidOrTwoPhase.to_string(), "Liquid/Two-Phase");
        assert_eq!(
            PhaseLabel::SaturatedLiquid.to_string(),
            "0.000 (Saturated Liquid)"
        );
        assert_eq!(
            PhaseLabel::SaturatedVapor.to_string(),
            "1.000 (Saturated Vapor)"
        );
    }
}
