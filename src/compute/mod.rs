//! Cost evaluation over a model graph.

pub mod engine;
pub mod error;

pub use engine::{compute_total_cost, resolve_attribute, Evaluator, TraceRow};
pub use error::EvalError;
