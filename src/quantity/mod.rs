//! Bounded-quantity arithmetic: physically dimensioned values that carry
//! lower/upper incertitude bounds through every operation.

pub mod bounded;
pub mod error;
pub mod parse;
pub mod units;
pub mod value;

pub use bounded::{BoundedQuantity, Operand};
pub use error::{ArithmeticError, ParseError};
pub use parse::parse_quantity;
pub use units::{BaseUnit, Unit};
pub use value::Quantity;
