//! Cost model data structures: an arena of typed nodes wired by
//! child links and linear input edges.

pub mod graph;
pub mod types;

pub use graph::{ModelGraph, Node, NodeId};
pub use types::{AttributeId, InputSlot, LinearInput, NodeKind, TargetAmount};
