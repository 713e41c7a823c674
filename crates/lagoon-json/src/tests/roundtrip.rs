use lagoon_model::{
    DataVariable, Diagram, FlowElement, FlowNode, FlowNodeKind, ProcessGraph, ProcessTemplate,
    SequenceFlow,
};
use serde_json::json;

use super::shape_record;
use crate::registry::StencilRegistry;
use crate::to_json::to_diagram;
use crate::to_model::to_model;

fn flow(id: &str, source: &str, target: &str) -> FlowElement {
    let mut f = SequenceFlow::new(id, "");
    f.source_ref = Some(source.to_string());
    f.target_ref = Some(target.to_string());
    FlowElement::Flow(f)
}

/// start -> approve -> done, with process metadata and two data variables.
fn sample() -> (ProcessGraph, Diagram) {
    let graph = ProcessGraph {
        id: "order_process".into(),
        name: "Order handling".into(),
        target_namespace: "http://lagoon.example/bpmn".into(),
        documentation: Some("Handles incoming orders.".into()),
        category: Some("sales".into()),
        subject: Some("${order.subject}".into()),
        default_form: Some("forms/order.form".into()),
        data_variables: vec![
            DataVariable {
                id: "amount".into(),
                data_type: "double".into(),
                biz_type: "money".into(),
                is_persistent: true,
                default_value: Some("0.0".into()),
            },
            DataVariable {
                id: "approved".into(),
                data_type: "boolean".into(),
                biz_type: "flag".into(),
                is_persistent: false,
                default_value: None,
            },
        ],
        lane_groups: Vec::new(),
        elements: vec![
            FlowElement::Node(FlowNode::new(FlowNodeKind::StartEvent, "start", "")),
            FlowElement::Node(FlowNode::new(FlowNodeKind::UserTask, "approve", "Approve order")),
            FlowElement::Node(FlowNode::new(FlowNodeKind::EndEvent, "done", "")),
            flow("flow1", "start", "approve"),
            flow("flow2", "approve", "done"),
        ],
    };

    let mut diagram = Diagram::single_plane();
    let plane = diagram.plane_mut().unwrap();
    plane.shapes.push(shape_record("start", 100.0, 100.0, 30.0, 30.0));
    plane.shapes.push(shape_record("approve", 200.0, 85.0, 100.0, 60.0));
    plane.shapes.push(shape_record("done", 400.0, 101.0, 28.0, 28.0));
    (graph, diagram)
}

#[test]
fn forward_emits_canvas_and_process_properties() {
    let (graph, diagram) = sample();
    let registry = StencilRegistry::default_stencils();
    let canvas = to_diagram(&graph, &diagram, &registry).unwrap();

    assert_eq!(canvas["resourceId"], json!("canvas"));
    assert_eq!(canvas["stencil"]["id"], json!("BPMNDiagram"));
    assert_eq!(
        canvas["stencilset"]["namespace"],
        json!("http://b3mn.org/stencilset/bpmn2.0#")
    );
    assert_eq!(canvas["bounds"]["lowerRight"]["x"], json!(1485.0));

    let props = &canvas["properties"];
    assert_eq!(props["overrideid"], json!("order_process"));
    assert_eq!(props["name"], json!("Order handling"));
    assert_eq!(props["process_category"], json!("sales"));
    assert_eq!(props["process_subject"], json!("${order.subject}"));
    assert_eq!(props["process_defaultform"], json!("forms/order.form"));
    assert_eq!(props["process_namespace"], json!("http://lagoon.example/bpmn"));
    assert_eq!(props["documentation"], json!("Handles incoming orders."));
    assert_eq!(props["process_datavariables"]["totalCount"], json!(2));
    assert_eq!(
        props["process_datavariables"]["items"][0]["variable_id"],
        json!("amount")
    );
    // Second variable has no default value: the key is absent, not null.
    assert!(
        props["process_datavariables"]["items"][1]
            .get("variable_defaultvalue")
            .is_none()
    );

    assert_eq!(canvas["childShapes"].as_array().unwrap().len(), 5);
}

#[test]
fn forward_omits_empty_id_and_empty_variable_list() {
    let (mut graph, diagram) = sample();
    graph.id = String::new();
    graph.data_variables.clear();
    let registry = StencilRegistry::default_stencils();
    let canvas = to_diagram(&graph, &diagram, &registry).unwrap();

    assert!(canvas["properties"].get("overrideid").is_none());
    assert!(canvas["properties"].get("process_datavariables").is_none());
}

#[test]
fn round_trip_preserves_topology_and_metadata() {
    let (graph, diagram) = sample();
    let registry = StencilRegistry::default_stencils();
    let canvas = to_diagram(&graph, &diagram, &registry).unwrap();
    let out = to_model(&canvas, ProcessTemplate::built_in(), &registry).unwrap();

    assert_eq!(out.graph.id, "order_process");
    assert_eq!(out.graph.name, "Order handling");
    assert_eq!(out.graph.category.as_deref(), Some("sales"));
    assert_eq!(out.graph.subject.as_deref(), Some("${order.subject}"));
    assert_eq!(out.graph.default_form.as_deref(), Some("forms/order.form"));
    assert_eq!(out.graph.target_namespace, "http://lagoon.example/bpmn");
    assert_eq!(out.graph.data_variables, graph.data_variables);

    let approve = out.graph.find_node("approve").unwrap();
    assert_eq!(approve.kind, FlowNodeKind::UserTask);
    assert_eq!(approve.name, "Approve order");
    assert_eq!(approve.incoming, vec!["flow1".to_string()]);
    assert_eq!(approve.outgoing, vec!["flow2".to_string()]);

    let flow1 = out
        .graph
        .elements
        .iter()
        .find_map(|e| e.as_flow().filter(|f| f.id == "flow1"))
        .unwrap();
    assert_eq!(flow1.source_ref.as_deref(), Some("start"));
    assert_eq!(flow1.target_ref.as_deref(), Some("approve"));

    // DI edges exist for both flows and their endpoints are clipped onto
    // the shape outlines: flow1 starts on the start-event circle.
    let plane = out.diagram.plane().unwrap();
    assert_eq!(plane.edges.len(), 2);
    let edge1 = plane.find_edge("flow1").unwrap();
    assert!(edge1.waypoints.len() >= 2);
    let center = (115.0, 115.0);
    let start = edge1.waypoints[0];
    let dist = ((start.x - center.0).powi(2) + (start.y - center.1).powi(2)).sqrt();
    assert!((dist - 15.0).abs() < 1e-6);
}

#[test]
fn forward_is_idempotent_across_a_round_trip() {
    let (graph, diagram) = sample();
    let registry = StencilRegistry::default_stencils();
    let first = to_diagram(&graph, &diagram, &registry).unwrap();
    let out = to_model(&first, ProcessTemplate::built_in(), &registry).unwrap();
    let second = to_diagram(&out.graph, &out.diagram, &registry).unwrap();
    assert_eq!(first, second);
}

#[test]
fn round_trip_keeps_boundary_attachment_and_conditions() {
    let mut task = FlowNode::new(FlowNodeKind::ServiceTask, "charge", "Charge card");
    task.boundary_refs.push("timeout".into());
    let mut boundary = FlowNode::new(FlowNodeKind::BoundaryEvent, "timeout", "");
    boundary.attached_to = Some("charge".into());
    let mut guarded = SequenceFlow::new("flow_ok", "ok");
    guarded.source_ref = Some("charge".into());
    guarded.target_ref = Some("done".into());
    guarded.condition = Some("${charge.ok}".into());

    let graph = ProcessGraph {
        id: "p".into(),
        elements: vec![
            FlowElement::Node(task),
            FlowElement::Node(boundary),
            FlowElement::Node(FlowNode::new(FlowNodeKind::EndEvent, "done", "")),
            FlowElement::Flow(guarded),
        ],
        ..ProcessGraph::default()
    };
    let mut diagram = Diagram::single_plane();
    let plane = diagram.plane_mut().unwrap();
    plane.shapes.push(shape_record("charge", 100.0, 100.0, 100.0, 80.0));
    plane.shapes.push(shape_record("timeout", 180.0, 170.0, 30.0, 30.0));
    plane.shapes.push(shape_record("done", 320.0, 125.0, 28.0, 28.0));

    let registry = StencilRegistry::default_stencils();
    let canvas = to_diagram(&graph, &diagram, &registry).unwrap();
    let out = to_model(&canvas, ProcessTemplate::built_in(), &registry).unwrap();

    let host = out.graph.find_node("charge").unwrap();
    assert_eq!(host.boundary_refs, vec!["timeout".to_string()]);
    assert_eq!(
        out.graph.find_node("timeout").unwrap().attached_to.as_deref(),
        Some("charge")
    );
    let flow = out
        .graph
        .elements
        .iter()
        .find_map(|e| e.as_flow().filter(|f| f.id == "flow_ok"))
        .unwrap();
    assert_eq!(flow.condition.as_deref(), Some("${charge.ok}"));
    assert_eq!(flow.name, "ok");
}
