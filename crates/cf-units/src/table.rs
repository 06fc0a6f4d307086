//! Static unit tables.
//!
//! Every unit converts to its dimension's base unit by `value * factor + offset`.
//! Only temperature scales carry an offset. Factors for units that uom knows are
//! read from uom; the rest are literal.

use std::sync::LazyLock;

use cf_core::units::{Accel, Area, Energy, Force, Length, Mass, Pressure, Time, Velocity, Volume};
use uom::si::{acceleration, area, energy, force, length, mass, pressure, time, velocity, volume};

use crate::{Dimension, UnitError, UnitResult};

/// One unit of one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDefinition {
    pub symbol: &'static str,
    pub name: &'static str,
    pub dimension: Dimension,
    pub factor: f64,
    pub offset: f64,
    /// Alternative spellings accepted by `lookup` (ASCII forms, long names).
    pub aliases: &'static [&'static str],
}

impl UnitDefinition {
    /// True for the dimension's designated base unit.
    pub fn is_base(&self) -> bool {
        base_unit(self.dimension).symbol == self.symbol
    }

    pub fn to_base(&self, value: f64) -> f64 {
        value * self.factor + self.offset
    }

    pub fn from_base(&self, value: f64) -> f64 {
        (value - self.offset) / self.factor
    }

    fn answers_to(&self, text: &str) -> bool {
        self.symbol == text || self.aliases.contains(&text)
    }
}

struct DimensionUnits {
    base: UnitDefinition,
    others: Vec<UnitDefinition>,
}

impl DimensionUnits {
    fn iter(&self) -> impl Iterator<Item = &UnitDefinition> {
        std::iter::once(&self.base).chain(self.others.iter())
    }
}

static TABLE: LazyLock<[DimensionUnits; 18]> = LazyLock::new(|| Dimension::ALL.map(units_of));

fn units(dimension: Dimension) -> &'static DimensionUnits {
    &TABLE[dimension as usize]
}

/// All units registered for a dimension, base unit first.
pub fn units_for(dimension: Dimension) -> impl Iterator<Item = &'static UnitDefinition> {
    units(dimension).iter()
}

pub fn base_unit(dimension: Dimension) -> &'static UnitDefinition {
    &units(dimension).base
}

/// Resolve a unit symbol (or alias) within one dimension.
pub fn lookup(dimension: Dimension, symbol: &str) -> UnitResult<&'static UnitDefinition> {
    let wanted = symbol.trim();
    units_for(dimension)
        .find(|u| u.answers_to(wanted))
        .ok_or_else(|| UnitError::UnknownUnit {
            unit: symbol.to_string(),
            dimension,
        })
}

pub fn to_base(value: f64, dimension: Dimension, unit: &str) -> UnitResult<f64> {
    Ok(lookup(dimension, unit)?.to_base(value))
}

pub fn from_base(value: f64, dimension: Dimension, unit: &str) -> UnitResult<f64> {
    Ok(lookup(dimension, unit)?.from_base(value))
}

/// Convert between two units of the same dimension via the base unit.
pub fn convert(value: f64, dimension: Dimension, from: &str, to: &str) -> UnitResult<f64> {
    let from = lookup(dimension, from)?;
    let to = lookup(dimension, to)?;
    Ok(to.from_base(from.to_base(value)))
}

fn base(
    dimension: Dimension,
    symbol: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
) -> UnitDefinition {
    linear(dimension, symbol, name, 1.0, aliases)
}

fn linear(
    dimension: Dimension,
    symbol: &'static str,
    name: &'static str,
    factor: f64,
    aliases: &'static [&'static str],
) -> UnitDefinition {
    UnitDefinition {
        symbol,
        name,
        dimension,
        factor,
        offset: 0.0,
        aliases,
    }
}

fn affine(
    dimension: Dimension,
    symbol: &'static str,
    name: &'static str,
    factor: f64,
    offset: f64,
    aliases: &'static [&'static str],
) -> UnitDefinition {
    UnitDefinition {
        symbol,
        name,
        dimension,
        factor,
        offset,
        aliases,
    }
}

fn units_of(dimension: Dimension) -> DimensionUnits {
    use Dimension as D;

    match dimension {
        D::Length => DimensionUnits {
            base: base(D::Length, "m", "Meters", &["meter", "meters"]),
            others: vec![
                linear(D::Length, "km", "Kilometers", Length::new::<length::kilometer>(1.0).value, &[]),
                linear(D::Length, "cm", "Centimeters", Length::new::<length::centimeter>(1.0).value, &[]),
                linear(D::Length, "mm", "Millimeters", Length::new::<length::millimeter>(1.0).value, &[]),
                linear(D::Length, "ft", "Feet", Length::new::<length::foot>(1.0).value, &["feet"]),
                linear(D::Length, "in", "Inches", Length::new::<length::inch>(1.0).value, &["inch"]),
                linear(D::Length, "yd", "Yards", Length::new::<length::yard>(1.0).value, &[]),
                linear(D::Length, "mi", "Miles", Length::new::<length::mile>(1.0).value, &["mile"]),
            ],
        },
        D::Area => DimensionUnits {
            base: base(D::Area, "m²", "Square meters", &["m2", "m^2"]),
            others: vec![
                linear(
                    D::Area,
                    "cm²",
                    "Square centimeters",
                    Area::new::<area::square_centimeter>(1.0).value,
                    &["cm2", "cm^2"],
                ),
                linear(
                    D::Area,
                    "mm²",
                    "Square millimeters",
                    Area::new::<area::square_millimeter>(1.0).value,
                    &["mm2", "mm^2"],
                ),
                linear(
                    D::Area,
                    "km²",
                    "Square kilometers",
                    Area::new::<area::square_kilometer>(1.0).value,
                    &["km2", "km^2"],
                ),
                linear(
                    D::Area,
                    "ft²",
                    "Square feet",
                    Area::new::<area::square_foot>(1.0).value,
                    &["ft2", "ft^2"],
                ),
                linear(
                    D::Area,
                    "in²",
                    "Square inches",
                    Area::new::<area::square_inch>(1.0).value,
                    &["in2", "in^2"],
                ),
            ],
        },
        D::Volume => DimensionUnits {
            base: base(D::Volume, "m³", "Cubic meters", &["m3", "m^3"]),
            others: vec![
                linear(D::Volume, "L", "Liters", Volume::new::<volume::liter>(1.0).value, &["l"]),
                linear(D::Volume, "mL", "Milliliters", Volume::new::<volume::milliliter>(1.0).value, &["ml"]),
                linear(
                    D::Volume,
                    "cm³",
                    "Cubic centimeters",
                    Volume::new::<volume::cubic_centimeter>(1.0).value,
                    &["cm3", "cc"],
                ),
                linear(D::Volume, "ft³", "Cubic feet", Volume::new::<volume::cubic_foot>(1.0).value, &["ft3"]),
                linear(D::Volume, "in³", "Cubic inches", Volume::new::<volume::cubic_inch>(1.0).value, &["in3"]),
                linear(D::Volume, "gal", "US gallons", Volume::new::<volume::gallon>(1.0).value, &[]),
            ],
        },
        D::Mass => DimensionUnits {
            base: base(D::Mass, "kg", "Kilograms", &[]),
            others: vec![
                linear(D::Mass, "g", "Grams", Mass::new::<mass::gram>(1.0).value, &[]),
                linear(D::Mass, "mg", "Milligrams", Mass::new::<mass::milligram>(1.0).value, &[]),
                linear(D::Mass, "lb", "Pounds", Mass::new::<mass::pound>(1.0).value, &["lbm"]),
                linear(D::Mass, "oz", "Ounces", Mass::new::<mass::ounce>(1.0).value, &[]),
                linear(D::Mass, "t", "Metric tons", 1000.0, &["tonne"]),
                linear(D::Mass, "ton", "US tons", 907.184_74, &["short ton"]),
            ],
        },
        D::Time => DimensionUnits {
            base: base(D::Time, "s", "Seconds", &["sec"]),
            others: vec![
                linear(D::Time, "ms", "Milliseconds", Time::new::<time::millisecond>(1.0).value, &[]),
                linear(D::Time, "min", "Minutes", Time::new::<time::minute>(1.0).value, &[]),
                linear(D::Time, "h", "Hours", Time::new::<time::hour>(1.0).value, &["hr"]),
                linear(D::Time, "day", "Days", Time::new::<time::day>(1.0).value, &["d", "days"]),
            ],
        },
        D::Velocity => DimensionUnits {
            base: base(D::Velocity, "m/s", "Meters per second", &[]),
            others: vec![
                linear(
                    D::Velocity,
                    "cm/s",
                    "Centimeters per second",
                    Velocity::new::<velocity::centimeter_per_second>(1.0).value,
                    &[],
                ),
                linear(
                    D::Velocity,
                    "mm/s",
                    "Millimeters per second",
                    Velocity::new::<velocity::millimeter_per_second>(1.0).value,
                    &[],
                ),
                linear(
                    D::Velocity,
                    "km/h",
                    "Kilometers per hour",
                    Velocity::new::<velocity::kilometer_per_hour>(1.0).value,
                    &["kph"],
                ),
                linear(
                    D::Velocity,
                    "ft/s",
                    "Feet per second",
                    Velocity::new::<velocity::foot_per_second>(1.0).value,
                    &["fps"],
                ),
                linear(
                    D::Velocity,
                    "in/s",
                    "Inches per second",
                    Velocity::new::<velocity::inch_per_second>(1.0).value,
                    &[],
                ),
                linear(
                    D::Velocity,
                    "mph",
                    "Miles per hour",
                    Velocity::new::<velocity::mile_per_hour>(1.0).value,
                    &[],
                ),
                linear(
                    D::Velocity,
                    "kn",
                    "Knots",
                    Velocity::new::<velocity::knot>(1.0).value,
                    &["knots", "kt"],
                ),
            ],
        },
        D::Acceleration => DimensionUnits {
            base: base(D::Acceleration, "m/s²", "Meters per second squared", &["m/s2", "m/s^2"]),
            others: vec![
                linear(
                    D::Acceleration,
                    "cm/s²",
                    "Centimeters per second squared",
                    Accel::new::<acceleration::centimeter_per_second_squared>(1.0).value,
                    &["cm/s2", "cm/s^2"],
                ),
                linear(
                    D::Acceleration,
                    "ft/s²",
                    "Feet per second squared",
                    Accel::new::<acceleration::foot_per_second_squared>(1.0).value,
                    &["ft/s2", "ft/s^2"],
                ),
            ],
        },
        D::Force => DimensionUnits {
            base: base(D::Force, "N", "Newtons", &[]),
            others: vec![
                linear(D::Force, "kN", "Kilonewtons", Force::new::<force::kilonewton>(1.0).value, &[]),
                linear(
                    D::Force,
                    "lbf",
                    "Pound-force",
                    Force::new::<force::pound_force>(1.0).value,
                    &[],
                ),
                linear(
                    D::Force,
                    "kgf",
                    "Kilogram-force",
                    Force::new::<force::kilogram_force>(1.0).value,
                    &[],
                ),
            ],
        },
        D::Energy => DimensionUnits {
            base: base(D::Energy, "J", "Joules", &[]),
            others: vec![
                linear(D::Energy, "kJ", "Kilojoules", Energy::new::<energy::kilojoule>(1.0).value, &[]),
                linear(D::Energy, "MJ", "Megajoules", Energy::new::<energy::megajoule>(1.0).value, &[]),
                linear(D::Energy, "cal", "Calories", 4.184, &[]),
                linear(D::Energy, "kcal", "Kilocalories", 4184.0, &["Cal"]),
                linear(D::Energy, "BTU", "British thermal units", 1055.06, &["Btu", "btu"]),
                linear(D::Energy, "Wh", "Watt-hours", Energy::new::<energy::watt_hour>(1.0).value, &[]),
                linear(
                    D::Energy,
                    "kWh",
                    "Kilowatt-hours",
                    Energy::new::<energy::kilowatt_hour>(1.0).value,
                    &[],
                ),
                linear(
                    D::Energy,
                    "eV",
                    "Electronvolts",
                    Energy::new::<energy::electronvolt>(1.0).value,
                    &[],
                ),
            ],
        },
        D::Pressure => DimensionUnits {
            base: base(D::Pressure, "Pa", "Pascals", &[]),
            others: vec![
                linear(
                    D::Pressure,
                    "kPa",
                    "Kilopascals",
                    Pressure::new::<pressure::kilopascal>(1.0).value,
                    &[],
                ),
                linear(
                    D::Pressure,
                    "MPa",
                    "Megapascals",
                    Pressure::new::<pressure::megapascal>(1.0).value,
                    &[],
                ),
                linear(D::Pressure, "bar", "Bar", Pressure::new::<pressure::bar>(1.0).value, &[]),
                linear(
                    D::Pressure,
                    "psi",
                    "Pounds per square inch",
                    Pressure::new::<pressure::psi>(1.0).value,
                    &[],
                ),
                linear(
                    D::Pressure,
                    "atm",
                    "Atmospheres",
                    Pressure::new::<pressure::atmosphere>(1.0).value,
                    &[],
                ),
            ],
        },
        D::Temperature => DimensionUnits {
            base: base(D::Temperature, "K", "Kelvin", &["kelvin"]),
            others: vec![
                affine(D::Temperature, "°C", "Celsius", 1.0, 273.15, &["C", "degC", "celsius"]),
                affine(
                    D::Temperature,
                    "°F",
                    "Fahrenheit",
                    5.0 / 9.0,
                    459.67 * 5.0 / 9.0,
                    &["F", "degF", "fahrenheit"],
                ),
                affine(D::Temperature, "°R", "Rankine", 5.0 / 9.0, 0.0, &["R", "degR", "rankine"]),
            ],
        },
        D::FlowRate => {
            let m3 = Volume::new::<volume::cubic_meter>(1.0).value;
            let litre = Volume::new::<volume::liter>(1.0).value;
            let gallon = Volume::new::<volume::gallon>(1.0).value;
            let cubic_foot = Volume::new::<volume::cubic_foot>(1.0).value;
            let minute = Time::new::<time::minute>(1.0).value;
            let hour = Time::new::<time::hour>(1.0).value;
            DimensionUnits {
                base: base(D::FlowRate, "m³/s", "Cubic meters per second", &["m3/s"]),
                others: vec![
                    linear(D::FlowRate, "m³/h", "Cubic meters per hour", m3 / hour, &["m3/h"]),
                    linear(D::FlowRate, "L/s", "Liters per second", litre, &["l/s"]),
                    linear(D::FlowRate, "L/min", "Liters per minute", litre / minute, &["l/min", "lpm"]),
                    linear(D::FlowRate, "L/h", "Liters per hour", litre / hour, &["l/h"]),
                    linear(
                        D::FlowRate,
                        "mL/s",
                        "Milliliters per second",
                        Volume::new::<volume::milliliter>(1.0).value,
                        &["ml/s"],
                    ),
                    linear(D::FlowRate, "gal/min", "US gallons per minute", gallon / minute, &["gpm"]),
                    linear(D::FlowRate, "gal/h", "US gallons per hour", gallon / hour, &["gph"]),
                    linear(D::FlowRate, "ft³/s", "Cubic feet per second", cubic_foot, &["ft3/s", "cfs"]),
                    linear(
                        D::FlowRate,
                        "ft³/min",
                        "Cubic feet per minute",
                        cubic_foot / minute,
                        &["ft3/min", "cfm"],
                    ),
                    linear(
                        D::FlowRate,
                        "in³/s",
                        "Cubic inches per second",
                        Volume::new::<volume::cubic_inch>(1.0).value,
                        &["in3/s"],
                    ),
                ],
            }
        }
        D::SpecificHeat => DimensionUnits {
            base: base(D::SpecificHeat, "J/(kg·K)", "Joules per kilogram kelvin", &["J/kgK", "J/(kg*K)"]),
            others: vec![
                linear(
                    D::SpecificHeat,
                    "kJ/(kg·K)",
                    "Kilojoules per kilogram kelvin",
                    1000.0,
                    &["kJ/kgK", "kJ/(kg*K)"],
                ),
                linear(
                    D::SpecificHeat,
                    "cal/(g·°C)",
                    "Calories per gram degree Celsius",
                    4184.0,
                    &["cal/gC", "cal/(g*C)"],
                ),
                linear(
                    D::SpecificHeat,
                    "kcal/(kg·°C)",
                    "Kilocalories per kilogram degree Celsius",
                    4184.0,
                    &["kcal/kgC", "kcal/(kg*C)"],
                ),
                linear(
                    D::SpecificHeat,
                    "BTU/(lb·°F)",
                    "BTU per pound degree Fahrenheit",
                    4186.8,
                    &["BTU/lbF", "BTU/(lb*F)"],
                ),
            ],
        },
        D::SecondMomentOfArea => {
            let cm = Length::new::<length::centimeter>(1.0).value;
            let mm = Length::new::<length::millimeter>(1.0).value;
            let inch = Length::new::<length::inch>(1.0).value;
            let foot = Length::new::<length::foot>(1.0).value;
            DimensionUnits {
                base: base(D::SecondMomentOfArea, "m⁴", "Meters to the fourth", &["m4", "m^4"]),
                others: vec![
                    linear(D::SecondMomentOfArea, "cm⁴", "Centimeters to the fourth", cm.powi(4), &["cm4", "cm^4"]),
                    linear(D::SecondMomentOfArea, "mm⁴", "Millimeters to the fourth", mm.powi(4), &["mm4", "mm^4"]),
                    linear(D::SecondMomentOfArea, "in⁴", "Inches to the fourth", inch.powi(4), &["in4", "in^4"]),
                    linear(D::SecondMomentOfArea, "ft⁴", "Feet to the fourth", foot.powi(4), &["ft4", "ft^4"]),
                ],
            }
        }
        D::Density => DimensionUnits {
            base: base(D::Density, "kg/m³", "Kilograms per cubic meter", &["kg/m3"]),
            others: vec![
                linear(D::Density, "g/cm³", "Grams per cubic centimeter", 1000.0, &["g/cm3", "g/cc"]),
                linear(D::Density, "g/L", "Grams per liter", 1.0, &["g/l"]),
                linear(
                    D::Density,
                    "lb/ft³",
                    "Pounds per cubic foot",
                    Mass::new::<mass::pound>(1.0).value / Volume::new::<volume::cubic_foot>(1.0).value,
                    &["lb/ft3"],
                ),
            ],
        },
        D::DynamicViscosity => DimensionUnits {
            base: base(D::DynamicViscosity, "Pa·s", "Pascal seconds", &["Pa*s", "Pas"]),
            others: vec![
                linear(D::DynamicViscosity, "mPa·s", "Millipascal seconds", 1e-3, &["mPa*s", "mPas"]),
                linear(D::DynamicViscosity, "cP", "Centipoise", 1e-3, &[]),
                linear(D::DynamicViscosity, "P", "Poise", 0.1, &[]),
            ],
        },
        D::Rate => DimensionUnits {
            base: base(D::Rate, "1/s", "Per second", &["s⁻¹", "/s"]),
            others: vec![
                linear(D::Rate, "1/min", "Per minute", 1.0 / Time::new::<time::minute>(1.0).value, &["min⁻¹", "/min"]),
                linear(D::Rate, "1/h", "Per hour", 1.0 / Time::new::<time::hour>(1.0).value, &["h⁻¹", "/h"]),
            ],
        },
        D::Dimensionless => DimensionUnits {
            base: base(D::Dimensionless, "", "Dimensionless", &["-", "1"]),
            others: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::{Tolerances, nearly_equal};

    fn close(a: f64, b: f64) -> bool {
        nearly_equal(a, b, Tolerances::default())
    }

    #[test]
    fn exactly_one_base_unit_per_dimension() {
        for dim in Dimension::ALL {
            let bases = units_for(dim).filter(|u| u.is_base()).count();
            assert_eq!(bases, 1, "{dim}");
            let base = base_unit(dim);
            assert_eq!((base.factor, base.offset), (1.0, 0.0), "{dim}");
            assert_eq!(base_unit(dim).dimension, dim);
        }
    }

    #[test]
    fn units_are_filed_under_their_own_dimension() {
        for dim in Dimension::ALL {
            for unit in units_for(dim) {
                assert_eq!(unit.dimension, dim, "{}", unit.symbol);
                assert!(unit.factor > 0.0, "{}", unit.symbol);
            }
        }
    }

    #[test]
    fn symbols_and_aliases_are_unique_within_dimension() {
        for dim in Dimension::ALL {
            let mut seen = std::collections::HashSet::new();
            for unit in units_for(dim) {
                assert!(seen.insert(unit.symbol), "{}", unit.symbol);
                for alias in unit.aliases {
                    assert!(seen.insert(alias), "{alias}");
                }
            }
        }
    }

    #[test]
    fn only_temperature_has_offsets() {
        for dim in Dimension::ALL {
            if dim == Dimension::Temperature {
                continue;
            }
            assert!(units_for(dim).all(|u| u.offset == 0.0), "{dim}");
        }
    }

    #[test]
    fn uom_factors_match_known_values() {
        assert!(close(lookup(Dimension::Length, "ft").unwrap().factor, 0.3048));
        assert!(close(lookup(Dimension::Length, "in").unwrap().factor, 0.0254));
        assert!(close(lookup(Dimension::Mass, "lb").unwrap().factor, 0.453_592_37));
        assert!(close(lookup(Dimension::Volume, "gal").unwrap().factor, 3.785_411_784e-3));
        assert!(close(lookup(Dimension::Force, "lbf").unwrap().factor, 4.448_221_615_260_5));
        assert!(close(lookup(Dimension::Force, "kgf").unwrap().factor, 9.806_65));
        assert!(close(lookup(Dimension::Pressure, "atm").unwrap().factor, 101_325.0));
        assert!(close(lookup(Dimension::Energy, "Wh").unwrap().factor, 3600.0));
        assert!(close(lookup(Dimension::Velocity, "km/h").unwrap().factor, 1.0 / 3.6));
        assert!((lookup(Dimension::Pressure, "psi").unwrap().factor - 6894.757).abs() < 1e-3);
    }

    #[test]
    fn second_moment_factors_are_fourth_powers() {
        assert!(close(lookup(Dimension::SecondMomentOfArea, "cm⁴").unwrap().factor, 1e-8));
        assert!(close(lookup(Dimension::SecondMomentOfArea, "mm⁴").unwrap().factor, 1e-12));
        assert!(close(
            lookup(Dimension::SecondMomentOfArea, "in⁴").unwrap().factor,
            4.162_314_256e-7
        ));
    }

    #[test]
    fn flow_rate_litres_per_second() {
        let q = from_base(0.0628, Dimension::FlowRate, "L/s").unwrap();
        assert!(close(q, 62.8));
        let gpm = to_base(1.0, Dimension::FlowRate, "gal/min").unwrap();
        assert!((gpm - 6.309_02e-5).abs() < 1e-9);
    }

    #[test]
    fn temperature_is_affine() {
        assert!(close(to_base(0.0, Dimension::Temperature, "°C").unwrap(), 273.15));
        assert!(close(to_base(32.0, Dimension::Temperature, "°F").unwrap(), 273.15));
        assert!(close(to_base(212.0, Dimension::Temperature, "F").unwrap(), 373.15));
        assert!(close(from_base(0.0, Dimension::Temperature, "°F").unwrap(), -459.67));
        assert!(close(
            convert(100.0, Dimension::Temperature, "degC", "°F").unwrap(),
            212.0
        ));
    }

    #[test]
    fn aliases_resolve_to_canonical_symbol() {
        assert_eq!(lookup(Dimension::Area, "m2").unwrap().symbol, "m²");
        assert_eq!(lookup(Dimension::Velocity, "knots").unwrap().symbol, "kn");
        assert_eq!(lookup(Dimension::Dimensionless, "").unwrap().symbol, "");
        assert_eq!(lookup(Dimension::Dimensionless, "-").unwrap().symbol, "");
    }

    #[test]
    fn unknown_unit_names_dimension() {
        let err = lookup(Dimension::Mass, "furlong").unwrap_err();
        assert_eq!(
            err,
            UnitError::UnknownUnit {
                unit: "furlong".to_string(),
                dimension: Dimension::Mass
            }
        );
        assert!(to_base(1.0, Dimension::Length, "kg").is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn round_trip_every_unit(x in -1.0e9f64..1.0e9) {
                for dim in Dimension::ALL {
                    for unit in units_for(dim) {
                        let back = unit.from_base(unit.to_base(x));
                        let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
                        prop_assert!(
                            nearly_equal(back, x, tol),
                            "{} {}: {} -> {}", dim, unit.symbol, x, back
                        );
                    }
                }
            }

            #[test]
            fn convert_matches_two_step(x in -1.0e6f64..1.0e6) {
                let direct = convert(x, Dimension::Length, "ft", "in").unwrap();
                prop_assert!(nearly_equal(direct, x * 12.0, Tolerances::default()));
            }
        }
    }
}
