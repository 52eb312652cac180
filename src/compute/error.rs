use crate::model::{AttributeId, NodeId};
use crate::quantity::ArithmeticError;
use thiserror::Error;

/// Errors raised while evaluating a cost model.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    #[error("node {node} has no attribute `{attribute}`")]
    AttributeUnresolved {
        node: NodeId,
        attribute: AttributeId,
    },

    #[error("input edge on node {node} has no target wired")]
    MissingTarget { node: NodeId },
}
