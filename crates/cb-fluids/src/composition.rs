//! Gas composition as named mole fractions.

use crate::error::{FluidError, FluidResult};
use crate::species::Species;

/// Allowed deviation of the mole-fraction sum from 1.0.
pub const SUM_TOLERANCE: f64 = 0.01;

/// Name used for duplicate detection: standard species collapse their aliases
/// ("CH4", "C1", "methane") onto one key, other names compare case-insensitively.
fn identity(name: &str) -> String {
    match name.parse::<Species>() {
        Ok(species) => species.display_name().to_ascii_lowercase(),
        Err(_) => name.trim().to_ascii_lowercase(),
    }
}

/// Mole fractions keyed by species name.
///
/// Fractions are taken as given (not normalized). A species absent from the
/// composition has zero fraction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Composition {
    items: Vec<(String, f64)>,
}

impl Composition {
    /// Create a pure-species composition.
    pub fn pure(name: impl Into<String>) -> Self {
        Self {
            items: vec![(name.into(), 1.0)],
        }
    }

    /// Pure composition of a standard species.
    pub fn pure_species(species: Species) -> Self {
        Self::pure(species.display_name())
    }

    /// Create a validated composition.
    ///
    /// Entries with fraction ≤ 0 are dropped. Rejects non-finite or out-of-range
    /// fractions, duplicate names, and a sum outside 1 ± [`SUM_TOLERANCE`].
    pub fn new<S: Into<String>>(fractions: impl IntoIterator<Item = (S, f64)>) -> FluidResult<Self> {
        let comp = Self::collect(fractions)?;
        comp.check_sum()?;
        Ok(comp)
    }

    /// Build without the sum check. Names are still de-duplicated and
    /// non-positive entries dropped.
    pub fn unchecked<S: Into<String>>(
        fractions: impl IntoIterator<Item = (S, f64)>,
    ) -> FluidResult<Self> {
        Self::collect(fractions)
    }

    fn collect<S: Into<String>>(fractions: impl IntoIterator<Item = (S, f64)>) -> FluidResult<Self> {
        let mut items: Vec<(String, f64)> = Vec::new();
        for (name, frac) in fractions {
            let name = name.into();
            if !frac.is_finite() {
                return Err(FluidError::NonPhysical {
                    what: "non-finite mole fraction",
                });
            }
            if frac > 1.0 {
                return Err(FluidError::InvalidArg {
                    what: format!("mole fraction of {name} exceeds 1 ({frac})"),
                });
            }
            if frac <= 0.0 {
                continue;
            }
            let key = identity(&name);
            if items.iter().any(|(n, _)| identity(n) == key) {
                return Err(FluidError::InvalidArg {
                    what: format!("duplicate species in composition: {name}"),
                });
            }
            items.push((name.trim().to_string(), frac));
        }

        if items.is_empty() {
            return Err(FluidError::InvalidArg {
                what: "empty composition".into(),
            });
        }
        Ok(Self { items })
    }

    /// Validate that fractions sum to 1 within [`SUM_TOLERANCE`].
    pub fn check_sum(&self) -> FluidResult<()> {
        let sum = self.total();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(FluidError::InvalidComposition {
                sum,
                tolerance: SUM_TOLERANCE,
            });
        }
        Ok(())
    }

    /// Mole fraction of a species name or alias (0.0 if not present).
    pub fn mole_fraction(&self, name: &str) -> f64 {
        let key = identity(name);
        self.items
            .iter()
            .find(|(n, _)| identity(n) == key)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }

    /// Sum of all mole fractions.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|(_, f)| f).sum()
    }

    /// Iterate over all species with non-zero mole fractions.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.items.iter().map(|(n, f)| (n.as_str(), *f))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the single species name when the composition is pure.
    pub fn is_pure(&self) -> Option<&str> {
        match self.items.as_slice() {
            [(name, frac)] if (frac - 1.0).abs() < 1e-10 => Some(name.as_str()),
            _ => None,
        }
    }
}
