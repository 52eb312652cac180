//! Node payloads and input wiring of the cost model.

use std::fmt;

use crate::geometry::Shape;
use crate::model::NodeId;
use crate::quantity::BoundedQuantity;

/// Identifier of a measurable node attribute an input edge can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeId {
    Amount,
    TotalVolume,
    FillVolume,
    FinishVolume,
    TotalFinishArea,
    TopFinishArea,
    WallsFinishArea,
}

impl AttributeId {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeId::Amount => "amount",
            AttributeId::TotalVolume => "total_volume",
            AttributeId::FillVolume => "fill_volume",
            AttributeId::FinishVolume => "finish_volume",
            AttributeId::TotalFinishArea => "total_finish_area",
            AttributeId::TopFinishArea => "top_finish_area",
            AttributeId::WallsFinishArea => "walls_finish_area",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "amount" => Some(AttributeId::Amount),
            "total_volume" => Some(AttributeId::TotalVolume),
            "fill_volume" => Some(AttributeId::FillVolume),
            "finish_volume" => Some(AttributeId::FinishVolume),
            "total_finish_area" => Some(AttributeId::TotalFinishArea),
            "top_finish_area" => Some(AttributeId::TopFinishArea),
            "walls_finish_area" => Some(AttributeId::WallsFinishArea),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an input edge derives its driving amount from.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetAmount {
    /// A fixed quantity independent of the target node.
    Literal(BoundedQuantity),
    /// A measurement read off the target node at evaluation time.
    Attribute(AttributeId),
}

/// A linear dependency: the input node's amount is recomputed as
/// `target_amount * marginal_amount + fixed_amount` each evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInput {
    /// The node whose attribute drives the edge. Wired to the owning
    /// node when the model is assembled.
    pub target: Option<NodeId>,
    pub input: NodeId,
    pub target_amount: TargetAmount,
    pub marginal_amount: BoundedQuantity,
    pub fixed_amount: BoundedQuantity,
}

/// One entry of a node's input list.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSlot {
    /// A plain child whose amount is managed elsewhere.
    Child(NodeId),
    /// A linear edge that drives the input node's amount.
    Edge(LinearInput),
}

impl InputSlot {
    pub fn input_id(&self) -> NodeId {
        match self {
            InputSlot::Child(id) => *id,
            InputSlot::Edge(edge) => edge.input,
        }
    }
}

/// The closed set of node payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The whole site, a pure container.
    Site,
    /// A grouping of buildings, a pure container.
    SuperBuilding,
    /// A built structure with a shape and optional hollow substructures.
    Building {
        shape: Shape,
        substructures: Vec<Shape>,
    },
    /// Produces its amount at a linear cost.
    Production {
        marginal_cost: BoundedQuantity,
        fixed_cost: BoundedQuantity,
    },
    /// Moves its amount over a distance in round trips.
    Transport {
        amount_per_travel: BoundedQuantity,
        speed_loaded: BoundedQuantity,
        speed_empty: BoundedQuantity,
        distance: BoundedQuantity,
    },
}

impl NodeKind {
    /// Containers have no own cost and merely sum their inputs.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Site | NodeKind::SuperBuilding | NodeKind::Building { .. }
        )
    }
}
