use thiserror::Error;

use crate::Dimension;

pub type UnitResult<T> = Result<T, UnitError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Unknown unit '{unit}' for {dimension}")]
    UnknownUnit { unit: String, dimension: Dimension },

    #[error("'{text}' is not a valid number")]
    InvalidNumber { text: String },

    #[error("No value entered")]
    Empty,

    #[error("Unknown dimension '{name}'")]
    UnknownDimension { name: String },
}
