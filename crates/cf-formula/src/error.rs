use cf_core::CfError;
use cf_units::UnitError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quantity::Constraint;

pub type SolveResult<T> = Result<T, SolveError>;
pub type SpecResult<T> = Result<T, SpecError>;

/// Which of the three failure classes an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Wrong set of fields filled in.
    Completeness,
    /// A filled field is not a usable value.
    Validity,
    /// The inputs are valid but the math is undefined for them.
    Domain,
}

/// A formula definition that cannot be registered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    #[error("Formula '{formula}' declares no quantities")]
    Empty { formula: &'static str },

    #[error("Formula '{formula}' declares quantity '{key}' twice")]
    DuplicateQuantity {
        formula: &'static str,
        key: &'static str,
    },

    #[error("Formula '{formula}' references undeclared quantity '{key}'")]
    UnknownKey {
        formula: &'static str,
        key: &'static str,
    },

    #[error("Formula '{formula}': rearrangement for '{target}' depends on itself")]
    SelfDependent {
        formula: &'static str,
        target: &'static str,
    },

    #[error("Formula '{formula}': two rearrangements for '{target}' need the same inputs")]
    DuplicateRearrangement {
        formula: &'static str,
        target: &'static str,
    },

    #[error("Formula '{formula}': variable '{key}' has no rearrangement")]
    Unsolvable {
        formula: &'static str,
        key: &'static str,
    },

    #[error("Formula '{formula}': parameter '{key}' cannot be a target")]
    ParameterTarget {
        formula: &'static str,
        key: &'static str,
    },

    #[error("Formula '{formula}': default unit '{unit}' of '{key}' is not registered")]
    BadDefaultUnit {
        formula: &'static str,
        key: &'static str,
        unit: &'static str,
    },

    #[error("Formula '{formula}': default value {value} of '{key}' is not finite")]
    BadDefaultValue {
        formula: &'static str,
        key: &'static str,
        value: f64,
    },

    #[error("Formula id '{id}' registered twice")]
    DuplicateFormula { id: &'static str },
}

/// A calculation that could not be carried out.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Please enter {expected}")]
    Incomplete { expected: String },

    #[error("More than one quantity can be calculated ({}); select which one to solve for", .candidates.join(", "))]
    Ambiguous { candidates: Vec<&'static str> },

    #[error("{quantity} must be a valid number")]
    InvalidNumber { quantity: &'static str },

    #[error("{quantity}: {source}")]
    UnknownUnit {
        quantity: &'static str,
        source: UnitError,
    },

    #[error("Unknown quantity '{key}' for {formula}")]
    UnknownQuantity { formula: &'static str, key: String },

    #[error("{quantity} is an input setting and cannot be calculated")]
    NotSolvable { quantity: &'static str },

    #[error("{quantity} must be {constraint}")]
    ConstraintViolated {
        quantity: &'static str,
        constraint: Constraint,
    },

    #[error("Calculated {quantity} must be {constraint}; check the inputs")]
    ResultConstraint {
        quantity: &'static str,
        constraint: Constraint,
    },

    #[error("{0}")]
    Domain(#[from] CfError),

    #[error("Unknown formula '{id}'")]
    UnknownFormula { id: String },

    #[error("Unsupported bit width {bits}; use 4, 8, 16 or 32")]
    InvalidBitWidth { bits: u32 },

    #[error("Binary input must contain only 0 and 1")]
    InvalidBinary,

    #[error("{value} is outside the {bits}-bit range {min} to {max}")]
    OutOfRange {
        value: String,
        bits: u32,
        min: i64,
        max: i64,
    },

    #[error("Binary input has {len} digits but only {bits} bits are available")]
    TooManyBits { len: usize, bits: u32 },
}

impl SolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Incomplete { .. } | Self::Ambiguous { .. } => ErrorKind::Completeness,
            Self::InvalidNumber { .. }
            | Self::UnknownUnit { .. }
            | Self::UnknownQuantity { .. }
            | Self::NotSolvable { .. }
            | Self::ConstraintViolated { .. }
            | Self::UnknownFormula { .. }
            | Self::InvalidBitWidth { .. }
            | Self::InvalidBinary => ErrorKind::Validity,
            Self::ResultConstraint { .. }
            | Self::Domain(_)
            | Self::OutOfRange { .. }
            | Self::TooManyBits { .. } => ErrorKind::Domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_units::Dimension;

    #[test]
    fn messages_read_like_form_errors() {
        let err = SolveError::Incomplete {
            expected: "exactly 3 values (leave one empty to calculate it)".into(),
        };
        assert_eq!(
            err.to_string(),
            "Please enter exactly 3 values (leave one empty to calculate it)"
        );

        let err = SolveError::ConstraintViolated {
            quantity: "Mass",
            constraint: Constraint::Positive,
        };
        assert_eq!(err.to_string(), "Mass must be a valid positive number");

        let err = SolveError::Ambiguous {
            candidates: vec!["Flow rate", "Time"],
        };
        assert!(err.to_string().contains("Flow rate, Time"));
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            SolveError::Incomplete {
                expected: String::new()
            }
            .kind(),
            ErrorKind::Completeness
        );
        assert_eq!(SolveError::InvalidBinary.kind(), ErrorKind::Validity);
        assert_eq!(
            SolveError::UnknownUnit {
                quantity: "Mass",
                source: UnitError::UnknownUnit {
                    unit: "x".into(),
                    dimension: Dimension::Mass
                }
            }
            .kind(),
            ErrorKind::Validity
        );
        assert_eq!(
            SolveError::from(CfError::DivisionByZero { what: "velocity" }).kind(),
            ErrorKind::Domain
        );
        assert_eq!(
            SolveError::TooManyBits { len: 9, bits: 8 }.kind(),
            ErrorKind::Domain
        );
    }

    #[test]
    fn domain_error_keeps_guard_message() {
        let err = SolveError::from(CfError::DivisionByZero {
            what: "gravity × height",
        });
        assert_eq!(
            err.to_string(),
            "Division by zero: gravity × height must not be zero"
        );
    }
}
