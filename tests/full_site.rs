//! End-to-end scenario: a site built in code, evaluated, saved to disk,
//! reloaded and saved again.

use archeocost::compute::compute_total_cost;
use archeocost::geometry::Shape;
use archeocost::io::{encode_node, load_model, save_model};
use archeocost::model::{
    AttributeId, InputSlot, LinearInput, ModelGraph, Node, NodeId, NodeKind, TargetAmount,
};
use archeocost::quantity::{parse_quantity, BoundedQuantity};

fn bq(text: &str) -> BoundedQuantity {
    parse_quantity(text).unwrap()
}

fn build_site(graph: &mut ModelGraph) -> NodeId {
    let site = graph.add_node(Node::new("A first archeological site", NodeKind::Site));

    let superstructure = graph.add_node(Node::new(
        "A superstructure",
        NodeKind::Building {
            shape: Shape::Superstructure {
                finish_thickness: bq("0.25 m"),
                number_of_rooms: 2,
                depth: bq("4 m"),
                width: bq("7 m"),
                walls_thickness: bq("0.6 m"),
                door_width: bq("0.8 m"),
                door_height: bq("1.5 m"),
                ceiling_height: bq("3 m"),
                outer_height: bq("4.5 m"),
            },
            substructures: Vec::new(),
        },
    ));
    graph.add_child(site, superstructure);

    let building = graph.add_node(Node::new(
        "A first building",
        NodeKind::Building {
            shape: Shape::TruncatedPyramid {
                finish_thickness: bq("0.5 m"),
                bottom_length: bq("30 m"),
                bottom_width: bq("20 m"),
                top_length: bq("10 m"),
                top_width: bq("5 m"),
                height: bq("10 m"),
            },
            substructures: vec![
                Shape::Cuboid {
                    finish_thickness: bq("0 m"),
                    length: bq("5 m"),
                    width: bq("5 m"),
                    height: bq("5 m"),
                },
                Shape::Prism {
                    finish_thickness: bq("0.5 m"),
                    width: bq("5 m"),
                    depth: bq("5 m"),
                    height: bq("5 m"),
                },
            ],
        },
    ));
    graph.add_child(site, building);

    // Packing the fill volume, fed by transported earth.
    let earth_packing = graph.add_node(Node::new(
        "Earth packing",
        NodeKind::Production {
            marginal_cost: bq("2000 work_day/kg"),
            fixed_cost: BoundedQuantity::zero(),
        },
    ));
    graph
        .node_mut(building)
        .inputs
        .push(InputSlot::Edge(LinearInput {
            target: Some(building),
            input: earth_packing,
            target_amount: TargetAmount::Attribute(AttributeId::FillVolume),
            marginal_amount: bq("1000 kg/m^3"),
            fixed_amount: BoundedQuantity::zero(),
        }));

    let earth_transporting = graph.add_node(Node::new(
        "Earth transporting",
        NodeKind::Transport {
            amount_per_travel: bq("50 kg"),
            speed_loaded: bq("2 kph"),
            speed_empty: bq("5 kph"),
            distance: bq("100 m"),
        },
    ));
    graph
        .node_mut(earth_packing)
        .inputs
        .push(InputSlot::Edge(LinearInput {
            target: Some(earth_packing),
            input: earth_transporting,
            target_amount: TargetAmount::Attribute(AttributeId::Amount),
            marginal_amount: BoundedQuantity::one(),
            fixed_amount: BoundedQuantity::zero(),
        }));

    let wall_building = graph.add_node(Node::new(
        "Wall building",
        NodeKind::Production {
            marginal_cost: bq("1000 work_day/kg"),
            fixed_cost: BoundedQuantity::zero(),
        },
    ));
    graph
        .node_mut(building)
        .inputs
        .push(InputSlot::Edge(LinearInput {
            target: Some(building),
            input: wall_building,
            target_amount: TargetAmount::Attribute(AttributeId::FinishVolume),
            marginal_amount: bq("2000 kg/m^3"),
            fixed_amount: BoundedQuantity::zero(),
        }));

    let plaster_laying = graph.add_node(Node::new(
        "Plaster laying",
        NodeKind::Production {
            marginal_cost: bq("0.1 work_day/l"),
            fixed_cost: BoundedQuantity::zero(),
        },
    ));
    graph
        .node_mut(building)
        .inputs
        .push(InputSlot::Edge(LinearInput {
            target: Some(building),
            input: plaster_laying,
            target_amount: TargetAmount::Attribute(AttributeId::TotalFinishArea),
            marginal_amount: bq("10 l/m^2"),
            fixed_amount: BoundedQuantity::zero(),
        }));

    let stairs = graph.add_node(Node::new(
        "Stairs",
        NodeKind::Building {
            shape: Shape::Stairs {
                finish_thickness: bq("0.5 m"),
                bottom_length: bq("3 m"),
                bottom_width: bq("3 m"),
                top_length: bq("2 m"),
                top_width: bq("0.5 m"),
                height: bq("9 m"),
                depth: bq("4 m"),
            },
            substructures: Vec::new(),
        },
    ));
    graph.add_child(site, stairs);

    site
}

#[test]
fn evaluates_to_work_days() {
    let mut graph = ModelGraph::new();
    let site = build_site(&mut graph);

    let total = compute_total_cost(&mut graph, site).unwrap();
    assert_eq!(total.unit().to_string(), "work_day");
    assert!(total.mean().magnitude > 0.0);
    let [lower, mean, upper] = total.magnitudes();
    assert!(lower <= mean && mean <= upper);

    // The transported amount equals the packed amount.
    let packing = NodeId(3);
    let transporting = NodeId(4);
    assert_eq!(graph.node(packing).name, "Earth packing");
    assert_eq!(
        graph.node(transporting).amount,
        graph.node(packing).amount
    );
}

#[test]
fn save_load_save_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let first_path = dir.path().join("site.json");
    let second_path = dir.path().join("site_reloaded.json");

    let mut graph = ModelGraph::new();
    let site = build_site(&mut graph);
    let total_before = compute_total_cost(&mut graph, site).unwrap();

    save_model(&first_path, &graph, site).unwrap();
    let (mut reloaded, root) = load_model(&first_path).unwrap();
    save_model(&second_path, &reloaded, root).unwrap();

    let first = std::fs::read_to_string(&first_path).unwrap();
    let second = std::fs::read_to_string(&second_path).unwrap();
    assert_eq!(first, second);

    // The reloaded model evaluates to the same cost.
    let total_after = compute_total_cost(&mut reloaded, root).unwrap();
    assert_eq!(total_before, total_after);

    // Transient amounts are not serialized.
    let doc = encode_node(&reloaded, root);
    assert!(!first.contains("\"amount\""));
    assert_eq!(doc, encode_node(&graph, site));
}
