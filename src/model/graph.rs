//! Arena storage for the cost model tree.

use crate::model::types::{InputSlot, NodeKind};
use crate::quantity::BoundedQuantity;

/// Index of a node in its [`ModelGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the model: common state plus its kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    /// Transient working amount, overwritten by edge evaluation.
    pub amount: BoundedQuantity,
    pub kind: NodeKind,
    pub inputs: Vec<InputSlot>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            amount: BoundedQuantity::zero(),
            kind,
            inputs: Vec::new(),
        }
    }

    pub fn with_amount(mut self, amount: BoundedQuantity) -> Self {
        self.amount = amount;
        self
    }
}

/// Flat arena of nodes addressed by [`NodeId`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelGraph {
    nodes: Vec<Node>,
}

impl ModelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Appends `input` to `parent`'s input list as a plain child.
    pub fn add_child(&mut self, parent: NodeId, input: NodeId) {
        self.node_mut(parent).inputs.push(InputSlot::Child(input));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_insertion_order() {
        let mut graph = ModelGraph::new();
        let a = graph.add_node(Node::new("site", NodeKind::Site));
        let b = graph.add_node(Node::new("annex", NodeKind::SuperBuilding));
        assert_eq!((a, b), (NodeId(0), NodeId(1)));
        assert_eq!(graph.node(b).name, "annex");
        assert_eq!(graph.ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn child_wiring() {
        let mut graph = ModelGraph::new();
        let site = graph.add_node(Node::new("site", NodeKind::Site));
        let annex = graph.add_node(Node::new("annex", NodeKind::SuperBuilding));
        graph.add_child(site, annex);
        assert_eq!(graph.node(site).inputs[0].input_id(), annex);
    }
}
