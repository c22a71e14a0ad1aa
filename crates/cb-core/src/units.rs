// cb-core/src/units.rs

use uom::si::f64::{
    MassRate as UomMassRate, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};
use uom::si::{mass_rate::kilogram_per_second, pressure::pascal};

// Public canonical unit types (SI storage, f64)
pub type MassRate = UomMassRate;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

/// Pascals per psi.
pub const PA_PER_PSI: f64 = 6_894.757_293_168;

/// Pounds-mass per kilogram.
pub const LB_PER_KG: f64 = 2.204_622_621_848_776;

#[inline]
pub fn pa(v: f64) -> Pressure {
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn psia(v: f64) -> Pressure {
    pa(v * PA_PER_PSI)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn rankine(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_rankine;
    Temperature::new::<degree_rankine>(v)
}

#[inline]
pub fn fahrenheit(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn lb_per_hr(v: f64) -> MassRate {
    kgps(v / LB_PER_KG / 3600.0)
}

/// Absolute temperature in °R, the scale the property engine works in.
#[inline]
pub fn to_rankine(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_rankine;
    t.get::<degree_rankine>()
}

/// Absolute pressure in psia.
#[inline]
pub fn to_psia(p: Pressure) -> f64 {
    p.get::<pascal>() / PA_PER_PSI
}

#[inline]
pub fn to_lb_per_hr(m: MassRate) -> f64 {
    m.get::<kilogram_per_second>() * LB_PER_KG * 3600.0
}

/// Temperature scale accepted on input surfaces (case files, CLI flags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TemperatureScale {
    #[default]
    Fahrenheit,
    Rankine,
    Celsius,
    Kelvin,
}

impl TemperatureScale {
    pub fn quantity(self, v: f64) -> Temperature {
        match self {
            Self::Fahrenheit => fahrenheit(v),
            Self::Rankine => rankine(v),
            Self::Celsius => celsius(v),
            Self::Kelvin => k(v),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Fahrenheit => "°F",
            Self::Rankine => "°R",
            Self::Celsius => "°C",
            Self::Kelvin => "K",
        }
    }
}

impl std::str::FromStr for TemperatureScale {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "F" | "DEGF" | "FAHRENHEIT" => Ok(Self::Fahrenheit),
            "R" | "DEGR" | "RANKINE" => Ok(Self::Rankine),
            "C" | "DEGC" | "CELSIUS" => Ok(Self::Celsius),
            "K" | "KELVIN" => Ok(Self::Kelvin),
            _ => Err("unknown temperature scale"),
        }
    }
}
