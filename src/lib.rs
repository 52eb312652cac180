//! Construction cost estimation for archeological sites.
//!
//! A site is modelled as a tree of nodes: buildings with geometric
//! shapes, production activities with linear costs, and transport
//! activities. Input edges tie a node's required amount to a measurement
//! of its parent, so evaluating the root yields the total construction
//! cost as a bounded quantity carrying an uncertainty interval.

pub mod compute;
pub mod display;
pub mod geometry;
pub mod io;
pub mod model;
pub mod quantity;

pub use compute::{compute_total_cost, EvalError, Evaluator};
pub use geometry::Shape;
pub use io::{load_model, save_model, StoreError};
pub use model::{
    AttributeId, InputSlot, LinearInput, ModelGraph, Node, NodeId, NodeKind, TargetAmount,
};
pub use quantity::{parse_quantity, BoundedQuantity, Quantity, Unit};
