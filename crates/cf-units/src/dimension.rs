//! Physical dimensions known to the unit table.

use std::fmt;
use std::str::FromStr;

use crate::UnitError;

/// Dimension of a quantity. Every dimension has exactly one base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    /// Length (base: m)
    Length,
    /// Area (base: m²)
    Area,
    /// Volume (base: m³)
    Volume,
    /// Mass (base: kg)
    Mass,
    /// Time (base: s)
    Time,
    /// Velocity (base: m/s)
    Velocity,
    /// Acceleration (base: m/s²)
    Acceleration,
    /// Force (base: N)
    Force,
    /// Energy (base: J)
    Energy,
    /// Pressure (base: Pa)
    Pressure,
    /// Absolute temperature (base: K)
    Temperature,
    /// Volumetric flow rate (base: m³/s)
    FlowRate,
    /// Specific heat capacity (base: J/(kg·K))
    SpecificHeat,
    /// Second moment of area (base: m⁴)
    SecondMomentOfArea,
    /// Mass density (base: kg/m³)
    Density,
    /// Dynamic viscosity (base: Pa·s)
    DynamicViscosity,
    /// Rate constant (base: 1/s)
    Rate,
    /// Pure number
    Dimensionless,
}

impl Dimension {
    pub const ALL: [Dimension; 18] = [
        Self::Length,
        Self::Area,
        Self::Volume,
        Self::Mass,
        Self::Time,
        Self::Velocity,
        Self::Acceleration,
        Self::Force,
        Self::Energy,
        Self::Pressure,
        Self::Temperature,
        Self::FlowRate,
        Self::SpecificHeat,
        Self::SecondMomentOfArea,
        Self::Density,
        Self::DynamicViscosity,
        Self::Rate,
        Self::Dimensionless,
    ];

    /// Kebab-case identifier, as accepted by `FromStr`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Area => "area",
            Self::Volume => "volume",
            Self::Mass => "mass",
            Self::Time => "time",
            Self::Velocity => "velocity",
            Self::Acceleration => "acceleration",
            Self::Force => "force",
            Self::Energy => "energy",
            Self::Pressure => "pressure",
            Self::Temperature => "temperature",
            Self::FlowRate => "flow-rate",
            Self::SpecificHeat => "specific-heat",
            Self::SecondMomentOfArea => "second-moment-of-area",
            Self::Density => "density",
            Self::DynamicViscosity => "dynamic-viscosity",
            Self::Rate => "rate",
            Self::Dimensionless => "dimensionless",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length => write!(f, "Length"),
            Self::Area => write!(f, "Area"),
            Self::Volume => write!(f, "Volume"),
            Self::Mass => write!(f, "Mass"),
            Self::Time => write!(f, "Time"),
            Self::Velocity => write!(f, "Velocity"),
            Self::Acceleration => write!(f, "Acceleration"),
            Self::Force => write!(f, "Force"),
            Self::Energy => write!(f, "Energy"),
            Self::Pressure => write!(f, "Pressure"),
            Self::Temperature => write!(f, "Temperature"),
            Self::FlowRate => write!(f, "Flow Rate"),
            Self::SpecificHeat => write!(f, "Specific Heat"),
            Self::SecondMomentOfArea => write!(f, "Second Moment of Area"),
            Self::Density => write!(f, "Density"),
            Self::DynamicViscosity => write!(f, "Dynamic Viscosity"),
            Self::Rate => write!(f, "Rate"),
            Self::Dimensionless => write!(f, "Dimensionless"),
        }
    }
}

impl FromStr for Dimension {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|d| d.key() == wanted)
            .ok_or_else(|| UnitError::UnknownDimension {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_str() {
        for dim in Dimension::ALL {
            assert_eq!(dim.key().parse::<Dimension>().unwrap(), dim);
        }
    }

    #[test]
    fn from_str_is_lenient_about_separators() {
        assert_eq!("Flow Rate".parse::<Dimension>().unwrap(), Dimension::FlowRate);
        assert_eq!(
            "specific_heat".parse::<Dimension>().unwrap(),
            Dimension::SpecificHeat
        );
    }

    #[test]
    fn unknown_dimension() {
        assert!(matches!(
            "luminosity".parse::<Dimension>(),
            Err(UnitError::UnknownDimension { .. })
        ));
    }
}
