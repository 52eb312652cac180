//! Conversion between model graphs and document trees.
//!
//! Attributes equal to their defaults are omitted on save and restored on
//! load: `marginal_cost` 1, `fixed_cost` 0, `marginal_amount` 1,
//! `fixed_amount` 0, `target_amount` the target's amount, an empty name,
//! and a zero finish thickness. A node's working amount is transient and
//! never written.

use crate::geometry::Shape;
use crate::io::document::Element;
use crate::io::error::DecodeError;
use crate::io::tags::Tag;
use crate::model::{
    AttributeId, InputSlot, LinearInput, ModelGraph, Node, NodeId, NodeKind, TargetAmount,
};
use crate::quantity::{parse_quantity, BaseUnit, BoundedQuantity, Quantity, Unit};

fn zero_meters() -> BoundedQuantity {
    BoundedQuantity::new(Quantity::new(0.0, Unit::base(BaseUnit::Meter)))
}

pub fn encode_node(graph: &ModelGraph, id: NodeId) -> Element {
    let node = graph.node(id);
    let tag = match &node.kind {
        NodeKind::Site => Tag::Site,
        NodeKind::SuperBuilding => Tag::SuperBuilding,
        NodeKind::Building { .. } => Tag::Building,
        NodeKind::Production { .. } => Tag::ProductionActivity,
        NodeKind::Transport { .. } => Tag::TransportActivity,
    };
    let mut elem = Element::new(tag.as_str());
    if !node.name.is_empty() {
        elem.set("name", &node.name);
    }
    match &node.kind {
        NodeKind::Building {
            shape,
            substructures,
        } => {
            elem.shape = Some(Box::new(encode_shape(shape)));
            elem.substructures = substructures.iter().map(encode_shape).collect();
        }
        NodeKind::Production {
            marginal_cost,
            fixed_cost,
        } => {
            if *marginal_cost != BoundedQuantity::one() {
                elem.set("marginal_cost", marginal_cost);
            }
            if *fixed_cost != BoundedQuantity::zero() {
                elem.set("fixed_cost", fixed_cost);
            }
        }
        NodeKind::Transport {
            amount_per_travel,
            speed_loaded,
            speed_empty,
            distance,
        } => {
            elem.set("amount_per_travel", amount_per_travel);
            elem.set("speed_loaded", speed_loaded);
            elem.set("speed_empty", speed_empty);
            elem.set("distance", distance);
        }
        NodeKind::Site | NodeKind::SuperBuilding => {}
    }
    for slot in &node.inputs {
        elem.inputs.push(match slot {
            InputSlot::Child(child) => encode_node(graph, *child),
            InputSlot::Edge(edge) => encode_edge(graph, edge),
        });
    }
    elem
}

fn encode_edge(graph: &ModelGraph, edge: &LinearInput) -> Element {
    let mut elem = Element::new(Tag::LinearInput.as_str());
    match &edge.target_amount {
        TargetAmount::Attribute(AttributeId::Amount) => {}
        TargetAmount::Attribute(attribute) => elem.set("target_amount", attribute),
        TargetAmount::Literal(amount) => elem.set("target_amount", amount),
    }
    if edge.marginal_amount != BoundedQuantity::one() {
        elem.set("marginal_amount", &edge.marginal_amount);
    }
    if edge.fixed_amount != BoundedQuantity::zero() {
        elem.set("fixed_amount", &edge.fixed_amount);
    }
    elem.input = Some(Box::new(encode_node(graph, edge.input)));
    elem
}

pub fn encode_shape(shape: &Shape) -> Element {
    let tag = match shape {
        Shape::TruncatedPyramid { .. } => Tag::TruncatedPyramid,
        Shape::Cuboid { .. } => Tag::Cuboid,
        Shape::Prism { .. } => Tag::Prism,
        Shape::Stairs { .. } => Tag::Stairs,
        Shape::Cylinder { .. } => Tag::Cylinder,
        Shape::Superstructure { .. } => Tag::Superstructure,
    };
    let mut elem = Element::new(tag.as_str());
    if *shape.finish_thickness() != zero_meters() {
        elem.set("finish_thickness", shape.finish_thickness());
    }
    match shape {
        Shape::TruncatedPyramid {
            bottom_length,
            bottom_width,
            top_length,
            top_width,
            height,
            ..
        } => {
            elem.set("bottom_length", bottom_length);
            elem.set("bottom_width", bottom_width);
            elem.set("top_length", top_length);
            elem.set("top_width", top_width);
            elem.set("height", height);
        }
        Shape::Cuboid {
            length,
            width,
            height,
            ..
        } => {
            elem.set("length", length);
            elem.set("width", width);
            elem.set("height", height);
        }
        Shape::Prism {
            width,
            depth,
            height,
            ..
        } => {
            elem.set("width", width);
            elem.set("depth", depth);
            elem.set("height", height);
        }
        Shape::Stairs {
            bottom_length,
            bottom_width,
            top_length,
            top_width,
            height,
            depth,
            ..
        } => {
            elem.set("bottom_length", bottom_length);
            elem.set("bottom_width", bottom_width);
            elem.set("top_length", top_length);
            elem.set("top_width", top_width);
            elem.set("height", height);
            elem.set("depth", depth);
        }
        Shape::Cylinder {
            diameter, height, ..
        } => {
            elem.set("diameter", diameter);
            elem.set("height", height);
        }
        Shape::Superstructure {
            number_of_rooms,
            depth,
            width,
            walls_thickness,
            door_width,
            door_height,
            ceiling_height,
            outer_height,
            ..
        } => {
            elem.set("number_of_rooms", number_of_rooms);
            elem.set("depth", depth);
            elem.set("width", width);
            elem.set("walls_thickness", walls_thickness);
            elem.set("door_width", door_width);
            elem.set("door_height", door_height);
            elem.set("ceiling_height", ceiling_height);
            elem.set("outer_height", outer_height);
        }
    }
    elem
}

/// Decodes a node element and its whole subtree into `graph`, wiring
/// every input edge back to the node that owns it.
pub fn decode_node(elem: &Element, graph: &mut ModelGraph) -> Result<NodeId, DecodeError> {
    let tag = Tag::parse(&elem.tag).ok_or_else(|| DecodeError::UnknownTag(elem.tag.clone()))?;
    let kind = match tag {
        Tag::Site => NodeKind::Site,
        Tag::SuperBuilding => NodeKind::SuperBuilding,
        Tag::Building => {
            let shape_elem = elem.shape.as_deref().ok_or_else(|| DecodeError::MissingChild {
                tag: elem.tag.clone(),
                child: "shape",
            })?;
            let substructures = elem
                .substructures
                .iter()
                .map(decode_shape)
                .collect::<Result<_, _>>()?;
            NodeKind::Building {
                shape: decode_shape(shape_elem)?,
                substructures,
            }
        }
        Tag::ProductionActivity => NodeKind::Production {
            marginal_cost: quantity_or(elem, "marginal_cost", BoundedQuantity::one)?,
            fixed_cost: quantity_or(elem, "fixed_cost", BoundedQuantity::zero)?,
        },
        Tag::TransportActivity => NodeKind::Transport {
            amount_per_travel: required_quantity(elem, "amount_per_travel")?,
            speed_loaded: required_quantity(elem, "speed_loaded")?,
            speed_empty: required_quantity(elem, "speed_empty")?,
            distance: required_quantity(elem, "distance")?,
        },
        Tag::LinearInput => {
            return Err(DecodeError::UnexpectedTag {
                tag: elem.tag.clone(),
                expected: "node",
            })
        }
        _ => {
            return Err(DecodeError::UnexpectedTag {
                tag: elem.tag.clone(),
                expected: "node",
            })
        }
    };
    let name = elem.get("name").unwrap_or_default().to_string();
    let id = graph.add_node(Node::new(name, kind));

    for child in &elem.inputs {
        let slot = if child.tag == Tag::LinearInput.as_str() {
            InputSlot::Edge(decode_edge(child, graph, id)?)
        } else {
            InputSlot::Child(decode_node(child, graph)?)
        };
        graph.node_mut(id).inputs.push(slot);
    }
    Ok(id)
}

fn decode_edge(
    elem: &Element,
    graph: &mut ModelGraph,
    owner: NodeId,
) -> Result<LinearInput, DecodeError> {
    let input_elem = elem.input.as_deref().ok_or_else(|| DecodeError::MissingChild {
        tag: elem.tag.clone(),
        child: "input",
    })?;
    let input = decode_node(input_elem, graph)?;
    let target_amount = match elem.get("target_amount") {
        None => TargetAmount::Attribute(AttributeId::Amount),
        Some(text) => decode_target_amount(text)?,
    };
    Ok(LinearInput {
        target: Some(owner),
        input,
        target_amount,
        marginal_amount: quantity_or(elem, "marginal_amount", BoundedQuantity::one)?,
        fixed_amount: quantity_or(elem, "fixed_amount", BoundedQuantity::zero)?,
    })
}

fn decode_target_amount(text: &str) -> Result<TargetAmount, DecodeError> {
    if let Some(attribute) = AttributeId::parse(text) {
        return Ok(TargetAmount::Attribute(attribute));
    }
    parse_quantity(text)
        .map(TargetAmount::Literal)
        .map_err(|_| DecodeError::BadTargetAmount(text.to_string()))
}

pub fn decode_shape(elem: &Element) -> Result<Shape, DecodeError> {
    let tag = Tag::parse(&elem.tag).ok_or_else(|| DecodeError::UnknownTag(elem.tag.clone()))?;
    let finish_thickness = quantity_or(elem, "finish_thickness", zero_meters)?;
    let shape = match tag {
        Tag::TruncatedPyramid => Shape::TruncatedPyramid {
            finish_thickness,
            bottom_length: required_quantity(elem, "bottom_length")?,
            bottom_width: required_quantity(elem, "bottom_width")?,
            top_length: required_quantity(elem, "top_length")?,
            top_width: required_quantity(elem, "top_width")?,
            height: required_quantity(elem, "height")?,
        },
        Tag::Cuboid => Shape::Cuboid {
            finish_thickness,
            length: required_quantity(elem, "length")?,
            width: required_quantity(elem, "width")?,
            height: required_quantity(elem, "height")?,
        },
        Tag::Prism => Shape::Prism {
            finish_thickness,
            width: required_quantity(elem, "width")?,
            depth: required_quantity(elem, "depth")?,
            height: required_quantity(elem, "height")?,
        },
        Tag::Stairs => Shape::Stairs {
            finish_thickness,
            bottom_length: required_quantity(elem, "bottom_length")?,
            bottom_width: required_quantity(elem, "bottom_width")?,
            top_length: required_quantity(elem, "top_length")?,
            top_width: required_quantity(elem, "top_width")?,
            height: required_quantity(elem, "height")?,
            depth: required_quantity(elem, "depth")?,
        },
        Tag::Cylinder => Shape::Cylinder {
            finish_thickness,
            diameter: required_quantity(elem, "diameter")?,
            height: required_quantity(elem, "height")?,
        },
        Tag::Superstructure => Shape::Superstructure {
            finish_thickness,
            number_of_rooms: count_or(elem, "number_of_rooms", 2)?,
            depth: required_quantity(elem, "depth")?,
            width: required_quantity(elem, "width")?,
            walls_thickness: required_quantity(elem, "walls_thickness")?,
            door_width: required_quantity(elem, "door_width")?,
            door_height: required_quantity(elem, "door_height")?,
            ceiling_height: required_quantity(elem, "ceiling_height")?,
            outer_height: required_quantity(elem, "outer_height")?,
        },
        _ => {
            return Err(DecodeError::UnexpectedTag {
                tag: elem.tag.clone(),
                expected: "shape",
            })
        }
    };
    Ok(shape)
}

fn required_quantity(
    elem: &Element,
    attribute: &'static str,
) -> Result<BoundedQuantity, DecodeError> {
    let text = elem.get(attribute).ok_or_else(|| DecodeError::MissingAttribute {
        tag: elem.tag.clone(),
        attribute,
    })?;
    parse_quantity(text).map_err(|source| DecodeError::BadQuantity { attribute, source })
}

fn quantity_or(
    elem: &Element,
    attribute: &'static str,
    default: impl FnOnce() -> BoundedQuantity,
) -> Result<BoundedQuantity, DecodeError> {
    match elem.get(attribute) {
        None => Ok(default()),
        Some(text) => {
            parse_quantity(text).map_err(|source| DecodeError::BadQuantity { attribute, source })
        }
    }
}

fn count_or(elem: &Element, attribute: &'static str, default: u32) -> Result<u32, DecodeError> {
    match elem.get(attribute) {
        None => Ok(default),
        // A count of zero would leave the geometry without a single
        // room to measure, so it is rejected alongside garbage text.
        Some(text) => match text.parse() {
            Ok(0) | Err(_) => Err(DecodeError::BadCount {
                attribute,
                value: text.to_string(),
            }),
            Ok(count) => Ok(count),
        },
    }
}
