use thiserror::Error;

pub type CfResult<T> = Result<T, CfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Division by zero: {what} must not be zero")]
    DivisionByZero { what: &'static str },

    #[error("Logarithm undefined: {what} must be positive (got {value})")]
    LogDomain { what: &'static str, value: f64 },

    #[error("Square root undefined: {what} must not be negative (got {value})")]
    SqrtDomain { what: &'static str, value: f64 },

    #[error("Out of range: {what}")]
    OutOfRange { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
