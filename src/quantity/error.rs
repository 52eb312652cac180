//! Error types for quantity parsing and arithmetic.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("missing comma before bounds in '{0}'")]
    MissingComma(String),
    #[error("cannot parse a quantity with multiple commas: '{0}'")]
    MultipleCommas(String),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),
    #[error("malformed unit expression '{0}'")]
    MalformedUnit(String),
    #[error("malformed bounds '{0}', expected '[lower;upper]'")]
    MalformedBounds(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    #[error("unit mismatch: cannot combine '{left}' with '{right}'")]
    UnitMismatch { left: String, right: String },
    #[error("exponent {exponent} does not yield integral dimensions for unit '{unit}'")]
    FractionalDimension { unit: String, exponent: f64 },
}
