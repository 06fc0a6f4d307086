//! Quantity definitions.

use std::fmt;

use cf_units::Dimension;
use serde::{Deserialize, Serialize};

/// Sign or range restriction a value must satisfy, checked in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Any,
    NonNegative,
    Positive,
    /// Absolute temperature, strictly above 0 K.
    AboveAbsoluteZero,
}

impl Constraint {
    pub fn admits(self, base: f64) -> bool {
        match self {
            Self::Any => base.is_finite(),
            Self::NonNegative => base >= 0.0,
            Self::Positive | Self::AboveAbsoluteZero => base > 0.0,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "a valid number"),
            Self::NonNegative => write!(f, "a valid non-negative number"),
            Self::Positive => write!(f, "a valid positive number"),
            Self::AboveAbsoluteZero => write!(f, "above absolute zero"),
        }
    }
}

/// Whether the solver may be asked for a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Solvable, and counted when checking which fields are filled.
    Variable,
    /// Optional setting with a default (fluid density, object height, ...).
    Parameter,
}

/// One named quantity of a formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityDef {
    /// ASCII identifier used by fields and templates.
    pub key: &'static str,
    /// Display symbol, e.g. `T₁`.
    pub symbol: &'static str,
    pub name: &'static str,
    pub dimension: Dimension,
    pub constraint: Constraint,
    pub default_unit: &'static str,
    /// Preset in `default_unit`, shown in a fresh form.
    pub default_value: Option<f64>,
    pub role: Role,
}

impl QuantityDef {
    pub const fn variable(
        key: &'static str,
        symbol: &'static str,
        name: &'static str,
        dimension: Dimension,
        default_unit: &'static str,
    ) -> Self {
        Self {
            key,
            symbol,
            name,
            dimension,
            constraint: Constraint::Any,
            default_unit,
            default_value: None,
            role: Role::Variable,
        }
    }

    pub const fn parameter(
        key: &'static str,
        symbol: &'static str,
        name: &'static str,
        dimension: Dimension,
        default_unit: &'static str,
    ) -> Self {
        Self {
            role: Role::Parameter,
            ..Self::variable(key, symbol, name, dimension, default_unit)
        }
    }

    pub const fn positive(self) -> Self {
        Self {
            constraint: Constraint::Positive,
            ..self
        }
    }

    pub const fn non_negative(self) -> Self {
        Self {
            constraint: Constraint::NonNegative,
            ..self
        }
    }

    pub const fn absolute_temperature(self) -> Self {
        Self {
            constraint: Constraint::AboveAbsoluteZero,
            ..self
        }
    }

    pub const fn with_default(self, value: f64) -> Self {
        Self {
            default_value: Some(value),
            ..self
        }
    }

    pub fn is_variable(&self) -> bool {
        self.role == Role::Variable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_admits() {
        assert!(Constraint::Any.admits(-3.0));
        assert!(!Constraint::Any.admits(f64::NAN));
        assert!(Constraint::NonNegative.admits(0.0));
        assert!(!Constraint::NonNegative.admits(-1e-9));
        assert!(!Constraint::Positive.admits(0.0));
        assert!(Constraint::AboveAbsoluteZero.admits(0.01));
        assert!(!Constraint::AboveAbsoluteZero.admits(0.0));
    }

    #[test]
    fn builders_compose() {
        let g = QuantityDef::variable("g", "g", "Gravity", Dimension::Acceleration, "m/s²")
            .positive()
            .with_default(9.806_65);
        assert_eq!(g.constraint, Constraint::Positive);
        assert_eq!(g.default_value, Some(9.806_65));
        assert!(g.is_variable());

        let rho = QuantityDef::parameter("rho", "ρ", "Density", Dimension::Density, "kg/m³");
        assert_eq!(rho.role, Role::Parameter);
        assert!(!rho.is_variable());
    }
}
