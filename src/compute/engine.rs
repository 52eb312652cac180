//! Depth-first cost evaluation.
//!
//! Evaluation walks the model from a root node. For every input edge the
//! driving amount is resolved on the target node, the input node's amount
//! is overwritten, and only then is the input's own cost read. Container
//! nodes contribute no cost of their own and sum their inputs.

use crate::compute::error::EvalError;
use crate::model::{
    AttributeId, InputSlot, ModelGraph, NodeId, NodeKind, TargetAmount,
};
use crate::quantity::{BaseUnit, BoundedQuantity, Unit};

/// One evaluated node, in depth-first order with parents first.
#[derive(Debug, Clone)]
pub struct TraceRow {
    pub node: NodeId,
    pub name: String,
    pub depth: usize,
    /// The node's amount after edge evaluation.
    pub amount: BoundedQuantity,
    /// Total cost of the node's subtree.
    pub cost: BoundedQuantity,
}

/// Walks a model and accumulates costs, keeping a row per visited node.
pub struct Evaluator<'a> {
    graph: &'a mut ModelGraph,
    trace: Vec<TraceRow>,
}

impl<'a> Evaluator<'a> {
    pub fn new(graph: &'a mut ModelGraph) -> Self {
        Self {
            graph,
            trace: Vec::new(),
        }
    }

    /// Evaluates the subtree under `root` and returns its total cost.
    pub fn run(&mut self, root: NodeId) -> Result<BoundedQuantity, EvalError> {
        self.trace.clear();
        self.total_cost(root, 0)
    }

    pub fn trace(&self) -> &[TraceRow] {
        &self.trace
    }

    pub fn into_trace(self) -> Vec<TraceRow> {
        self.trace
    }

    fn total_cost(&mut self, id: NodeId, depth: usize) -> Result<BoundedQuantity, EvalError> {
        // Placeholder row, filled in once the subtree is done.
        let row = self.trace.len();
        self.trace.push(TraceRow {
            node: id,
            name: self.graph.node(id).name.clone(),
            depth,
            amount: BoundedQuantity::zero(),
            cost: BoundedQuantity::zero(),
        });

        let mut cost = self.own_cost(id)?;
        // The slot list is cloned because input amounts are overwritten
        // while we iterate.
        let slots = self.graph.node(id).inputs.clone();
        for slot in slots {
            match slot {
                InputSlot::Child(child) => {
                    cost.add_assign(&self.total_cost(child, depth + 1)?)?;
                }
                InputSlot::Edge(edge) => {
                    let target = edge
                        .target
                        .ok_or(EvalError::MissingTarget { node: id })?;
                    let driving = match &edge.target_amount {
                        TargetAmount::Literal(amount) => amount.clone(),
                        TargetAmount::Attribute(attribute) => {
                            resolve_attribute(self.graph, target, *attribute)?
                        }
                    };
                    let mut amount = driving.mul(&edge.marginal_amount)?;
                    amount.add_assign(&edge.fixed_amount)?;
                    self.graph.node_mut(edge.input).amount = amount;
                    cost.add_assign(&self.total_cost(edge.input, depth + 1)?)?;
                }
            }
        }

        self.trace[row].amount = self.graph.node(id).amount.clone();
        self.trace[row].cost = cost.clone();
        Ok(cost)
    }

    /// Cost of the node itself, excluding its inputs.
    fn own_cost(&self, id: NodeId) -> Result<BoundedQuantity, EvalError> {
        let node = self.graph.node(id);
        match &node.kind {
            NodeKind::Site | NodeKind::SuperBuilding | NodeKind::Building { .. } => {
                Ok(BoundedQuantity::zero())
            }
            NodeKind::Production {
                marginal_cost,
                fixed_cost,
            } => {
                let mut cost = node.amount.mul(marginal_cost)?;
                cost.add_assign(fixed_cost)?;
                Ok(cost)
            }
            NodeKind::Transport {
                amount_per_travel,
                speed_loaded,
                speed_empty,
                distance,
            } => {
                let marginal = transport_marginal_cost(
                    node.amount.unit(),
                    amount_per_travel,
                    speed_loaded,
                    speed_empty,
                    distance,
                )?;
                Ok(node.amount.mul(&marginal)?)
            }
        }
    }
}

/// Work days spent moving one unit of the transported amount: the round
/// trip time over the distance divided by the load per travel.
fn transport_marginal_cost(
    amount_unit: &Unit,
    amount_per_travel: &BoundedQuantity,
    speed_loaded: &BoundedQuantity,
    speed_empty: &BoundedQuantity,
    distance: &BoundedQuantity,
) -> Result<BoundedQuantity, EvalError> {
    let mut round_trip = speed_empty.rdiv(1.0)?;
    round_trip.add_assign(&speed_loaded.rdiv(1.0)?)?;
    let mut marginal = distance.mul(&round_trip)?;
    marginal.div_assign(amount_per_travel)?;
    marginal.ito(&Unit::base(BaseUnit::WorkDay).per(amount_unit))?;
    Ok(marginal)
}

/// Reads a measurable attribute off a node. `amount` resolves only on
/// production and transport nodes, the geometric attributes only on
/// buildings. A building's fill volume excludes the total volumes of
/// its substructures.
pub fn resolve_attribute(
    graph: &ModelGraph,
    id: NodeId,
    attribute: AttributeId,
) -> Result<BoundedQuantity, EvalError> {
    let node = graph.node(id);
    if attribute == AttributeId::Amount {
        // Containers hold no working amount of their own, so an edge
        // driven by their amount is a wiring mistake, not a zero.
        return match node.kind {
            NodeKind::Production { .. } | NodeKind::Transport { .. } => {
                Ok(node.amount.clone())
            }
            _ => Err(EvalError::AttributeUnresolved {
                node: id,
                attribute,
            }),
        };
    }
    let NodeKind::Building {
        shape,
        substructures,
    } = &node.kind
    else {
        return Err(EvalError::AttributeUnresolved {
            node: id,
            attribute,
        });
    };
    let value = match attribute {
        AttributeId::Amount => unreachable!("handled above"),
        AttributeId::TotalVolume => shape.total_volume()?,
        AttributeId::FillVolume => {
            let mut fill = shape.fill_volume()?;
            for sub in substructures {
                fill.sub_assign(&sub.total_volume()?)?;
            }
            fill
        }
        AttributeId::FinishVolume => shape.finish_volume()?,
        AttributeId::TotalFinishArea => shape.total_finish_area()?,
        AttributeId::TopFinishArea => shape.top_finish_area()?,
        AttributeId::WallsFinishArea => shape.walls_finish_area()?,
    };
    Ok(value)
}

/// Evaluates the model once and returns the root's total cost.
pub fn compute_total_cost(
    graph: &mut ModelGraph,
    root: NodeId,
) -> Result<BoundedQuantity, EvalError> {
    Evaluator::new(graph).run(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use crate::model::{LinearInput, Node};
    use crate::quantity::Quantity;

    fn work_days(v: f64) -> BoundedQuantity {
        BoundedQuantity::new(Quantity::new(v, Unit::base(BaseUnit::WorkDay)))
    }

    fn meters(v: f64) -> BoundedQuantity {
        BoundedQuantity::new(Quantity::new(v, Unit::base(BaseUnit::Meter)))
    }

    fn scalar(v: f64) -> BoundedQuantity {
        BoundedQuantity::new(Quantity::dimensionless(v))
    }

    fn production(name: &str, marginal: BoundedQuantity) -> Node {
        Node::new(
            name,
            NodeKind::Production {
                marginal_cost: marginal,
                fixed_cost: BoundedQuantity::zero(),
            },
        )
    }

    #[test]
    fn chained_productions() {
        let mut graph = ModelGraph::new();
        let quarry = graph.add_node(
            production("quarry", work_days(2.0)).with_amount(scalar(11.0)),
        );
        let dressing = graph.add_node(production("dressing", work_days(1.5)));
        graph.node_mut(quarry).inputs.push(InputSlot::Edge(LinearInput {
            target: Some(quarry),
            input: dressing,
            target_amount: TargetAmount::Attribute(AttributeId::Amount),
            marginal_amount: scalar(2.0),
            fixed_amount: BoundedQuantity::zero(),
        }));

        let total = compute_total_cost(&mut graph, quarry).unwrap();
        assert_eq!(total.mean().magnitude, 55.0);
        assert_eq!(total.unit().to_string(), "work_day");
        // The edge overwrote the input's amount.
        assert_eq!(graph.node(dressing).amount.mean().magnitude, 22.0);
    }

    #[test]
    fn re_evaluation_overwrites_amounts() {
        let mut graph = ModelGraph::new();
        let quarry = graph.add_node(
            production("quarry", work_days(2.0)).with_amount(scalar(11.0)),
        );
        let dressing = graph.add_node(production("dressing", work_days(1.5)));
        graph.node_mut(quarry).inputs.push(InputSlot::Edge(LinearInput {
            target: Some(quarry),
            input: dressing,
            target_amount: TargetAmount::Attribute(AttributeId::Amount),
            marginal_amount: scalar(2.0),
            fixed_amount: BoundedQuantity::zero(),
        }));

        let first = compute_total_cost(&mut graph, quarry).unwrap();
        assert_eq!(first.mean().magnitude, 55.0);

        // A fresh run must reflect the latest target state, not the
        // amounts left behind by the previous evaluation.
        graph.node_mut(quarry).amount = scalar(4.0);
        let second = compute_total_cost(&mut graph, quarry).unwrap();
        assert_eq!(second.mean().magnitude, 20.0);
        assert_eq!(graph.node(dressing).amount.mean().magnitude, 8.0);
    }

    #[test]
    fn amount_edge_on_container_fails() {
        let mut graph = ModelGraph::new();
        let site = graph.add_node(Node::new("site", NodeKind::Site));
        let dressing = graph.add_node(production("dressing", work_days(1.5)));
        graph.node_mut(site).inputs.push(InputSlot::Edge(LinearInput {
            target: Some(site),
            input: dressing,
            target_amount: TargetAmount::Attribute(AttributeId::Amount),
            marginal_amount: scalar(1.0),
            fixed_amount: BoundedQuantity::zero(),
        }));

        let err = compute_total_cost(&mut graph, site).unwrap_err();
        assert!(matches!(
            err,
            EvalError::AttributeUnresolved {
                node,
                attribute: AttributeId::Amount,
            } if node == site
        ));
    }

    #[test]
    fn building_fill_volume_drives_production() {
        let mut graph = ModelGraph::new();
        let site = graph.add_node(Node::new("site", NodeKind::Site));
        let building = graph.add_node(Node::new(
            "platform",
            NodeKind::Building {
                shape: Shape::Cuboid {
                    finish_thickness: meters(0.0),
                    length: meters(2.0),
                    width: meters(3.0),
                    height: meters(5.0),
                },
                substructures: vec![Shape::Cuboid {
                    finish_thickness: meters(0.0),
                    length: meters(1.0),
                    width: meters(1.0),
                    height: meters(1.0),
                }],
            },
        ));
        let fill = graph.add_node(production(
            "rubble fill",
            work_days(2.0).div(&BoundedQuantity::new(Quantity::new(
                1.0,
                Unit::base(BaseUnit::Meter).pow_scaled(3.0).unwrap(),
            )))
            .unwrap(),
        ));
        graph.add_child(site, building);
        graph
            .node_mut(building)
            .inputs
            .push(InputSlot::Edge(LinearInput {
                target: Some(building),
                input: fill,
                target_amount: TargetAmount::Attribute(AttributeId::FillVolume),
                marginal_amount: scalar(1.0),
                fixed_amount: BoundedQuantity::zero(),
            }));

        let total = compute_total_cost(&mut graph, site).unwrap();
        // 30 m^3 minus the 1 m^3 substructure, at 2 work days each.
        assert_eq!(graph.node(fill).amount.mean().magnitude, 29.0);
        assert_eq!(total.mean().magnitude, 58.0);
        assert_eq!(total.unit().to_string(), "work_day");
    }

    #[test]
    fn transport_cost() {
        let kph = Unit::base(BaseUnit::Kilometer).per(&Unit::base(BaseUnit::Hour));
        let mut graph = ModelGraph::new();
        let hauling = graph.add_node(
            Node::new(
                "hauling",
                NodeKind::Transport {
                    amount_per_travel: scalar(2.0),
                    speed_loaded: BoundedQuantity::new(Quantity::new(4.0, kph.clone())),
                    speed_empty: BoundedQuantity::new(Quantity::new(4.0, kph)),
                    distance: BoundedQuantity::new(Quantity::new(
                        8.0,
                        Unit::base(BaseUnit::Kilometer),
                    )),
                },
            )
            .with_amount(scalar(10.0)),
        );

        let total = compute_total_cost(&mut graph, hauling).unwrap();
        // 4 h round trip per travel, 2 units per travel, 10 units.
        assert!((total.mean().magnitude - 2.5).abs() < 1e-12);
        assert_eq!(total.unit().to_string(), "work_day");
    }

    #[test]
    fn attribute_on_non_building_fails() {
        let mut graph = ModelGraph::new();
        let site = graph.add_node(Node::new("site", NodeKind::Site));
        let err = resolve_attribute(&graph, site, AttributeId::TotalVolume).unwrap_err();
        assert!(matches!(
            err,
            EvalError::AttributeUnresolved {
                attribute: AttributeId::TotalVolume,
                ..
            }
        ));
    }

    #[test]
    fn unwired_edge_fails() {
        let mut graph = ModelGraph::new();
        let quarry = graph.add_node(production("quarry", work_days(2.0)));
        let other = graph.add_node(production("other", work_days(1.0)));
        graph.node_mut(quarry).inputs.push(InputSlot::Edge(LinearInput {
            target: None,
            input: other,
            target_amount: TargetAmount::Attribute(AttributeId::Amount),
            marginal_amount: scalar(1.0),
            fixed_amount: BoundedQuantity::zero(),
        }));
        let err = compute_total_cost(&mut graph, quarry).unwrap_err();
        assert!(matches!(err, EvalError::MissingTarget { node } if node == quarry));
    }

    #[test]
    fn trace_is_depth_first() {
        let mut graph = ModelGraph::new();
        let site = graph.add_node(Node::new("site", NodeKind::Site));
        let annex = graph.add_node(Node::new("annex", NodeKind::SuperBuilding));
        let quarry = graph.add_node(
            production("quarry", work_days(1.0)).with_amount(scalar(3.0)),
        );
        graph.add_child(site, annex);
        graph.add_child(annex, quarry);

        let mut evaluator = Evaluator::new(&mut graph);
        let total = evaluator.run(site).unwrap();
        assert_eq!(total.mean().magnitude, 3.0);

        let names: Vec<_> = evaluator.trace().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["site", "annex", "quarry"]);
        let depths: Vec<_> = evaluator.trace().iter().map(|r| r.depth).collect();
        assert_eq!(depths, [0, 1, 2]);
        // Parent rows carry their subtree totals.
        assert_eq!(evaluator.trace()[0].cost.mean().magnitude, 3.0);
    }
}
