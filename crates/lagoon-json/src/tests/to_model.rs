use lagoon_model::{FlowNodeKind, ProcessTemplate};
use serde_json::{Value, json};

use crate::error::Error;
use crate::registry::StencilRegistry;
use crate::to_model::to_model;

fn shape_json(resource_id: &str, stencil: &str, x: f64, y: f64, w: f64, h: f64) -> Value {
    json!({
        "resourceId": resource_id,
        "stencil": { "id": stencil },
        "bounds": {
            "upperLeft": { "x": x, "y": y },
            "lowerRight": { "x": x + w, "y": y + h },
        },
        "properties": {},
        "childShapes": [],
        "dockers": [],
        "outgoing": [],
    })
}

fn canvas(child_shapes: Vec<Value>) -> Value {
    json!({
        "resourceId": "canvas",
        "stencil": { "id": "BPMNDiagram" },
        "stencilset": {
            "namespace": "http://b3mn.org/stencilset/bpmn2.0#",
            "url": "../editor/stencilsets/bpmn2.0/bpmn2.0.json",
        },
        "bounds": {
            "upperLeft": { "x": 0.0, "y": 0.0 },
            "lowerRight": { "x": 1485.0, "y": 1050.0 },
        },
        "properties": { "overrideid": "p1" },
        "childShapes": child_shapes,
    })
}

#[test]
fn reads_process_metadata_from_canvas_properties() {
    let mut doc = canvas(vec![]);
    doc["properties"] = json!({
        "overrideid": "proc_42",
        "name": "Invoices",
        "process_namespace": "http://example/ns",
        "process_subject": "${subject}",
        "process_category": "finance",
        "process_defaultform": "forms/invoice.form",
        "documentation": "docs",
        "process_datavariables": {
            "totalCount": 1,
            "items": [{
                "variable_id": "total",
                "variable_datatype": "double",
                "variable_biztype": "money",
                // widgets serialize booleans as strings too
                "variable_ispersistent": "true",
                "variable_defaultvalue": "1.5",
            }],
        },
    });

    let registry = StencilRegistry::default_stencils();
    let out = to_model(&doc, ProcessTemplate::built_in(), &registry).unwrap();

    assert_eq!(out.graph.id, "proc_42");
    assert_eq!(out.graph.name, "Invoices");
    assert_eq!(out.graph.target_namespace, "http://example/ns");
    assert_eq!(out.graph.subject.as_deref(), Some("${subject}"));
    assert_eq!(out.graph.category.as_deref(), Some("finance"));
    assert_eq!(out.graph.default_form.as_deref(), Some("forms/invoice.form"));
    assert_eq!(out.graph.documentation.as_deref(), Some("docs"));
    assert_eq!(out.graph.data_variables.len(), 1);
    let var = &out.graph.data_variables[0];
    assert!(var.is_persistent);
    assert_eq!(var.default_value.as_deref(), Some("1.5"));
}

#[test]
fn edge_with_unknown_target_is_skipped_but_flow_survives() {
    let mut task = shape_json("t1", "UserTask", 0.0, 0.0, 100.0, 60.0);
    task["outgoing"] = json!([{ "resourceId": "f1" }]);
    let mut edge = shape_json("f1", "SequenceFlow", 0.0, 0.0, 0.0, 0.0);
    edge["target"] = json!({ "resourceId": "nonexistent" });
    edge["dockers"] = json!([
        { "x": 50.0, "y": 30.0 },
        { "x": 10.0, "y": 10.0 },
    ]);

    let registry = StencilRegistry::default_stencils();
    let out = to_model(&canvas(vec![task, edge]), ProcessTemplate::built_in(), &registry).unwrap();

    let flow = out
        .graph
        .elements
        .iter()
        .find_map(|e| e.as_flow().filter(|f| f.id == "f1"))
        .unwrap();
    assert_eq!(flow.source_ref.as_deref(), Some("t1"));
    assert_eq!(flow.target_ref, None);

    // The unresolved edge produces no DI edge.
    assert!(out.diagram.plane().unwrap().edges.is_empty());
}

#[test]
fn boundary_event_finds_host_three_containers_deep() {
    let mut task = shape_json("deep_task", "ServiceTask", 30.0, 30.0, 100.0, 60.0);
    task["properties"] = json!({ "name": "charge" });
    let mut sub3 = shape_json("sub3", "SubProcess", 20.0, 20.0, 200.0, 140.0);
    sub3["childShapes"] = json!([task]);
    let mut sub2 = shape_json("sub2", "SubProcess", 10.0, 10.0, 300.0, 200.0);
    sub2["childShapes"] = json!([sub3]);
    let mut sub1 = shape_json("sub1", "SubProcess", 100.0, 100.0, 400.0, 260.0);
    sub1["childShapes"] = json!([sub2]);

    let mut boundary = shape_json("alarm", "BoundaryEvent", 520.0, 340.0, 30.0, 30.0);
    boundary["properties"] = json!({ "attachedtoref": "deep_task" });

    let registry = StencilRegistry::default_stencils();
    let out = to_model(
        &canvas(vec![sub1, boundary]),
        ProcessTemplate::built_in(),
        &registry,
    )
    .unwrap();

    let host = out.graph.find_node("deep_task").unwrap();
    assert_eq!(host.boundary_refs, vec!["alarm".to_string()]);
    assert_eq!(
        out.graph.find_node("alarm").unwrap().attached_to.as_deref(),
        Some("deep_task")
    );

    // Nested shapes accumulated every ancestor offset.
    let plane = out.diagram.plane().unwrap();
    let record = plane.find_shape("deep_task").unwrap();
    assert_eq!((record.bounds.x, record.bounds.y), (160.0, 160.0));
}

#[test]
fn boundary_event_with_unknown_host_stays_detached() {
    let mut boundary = shape_json("alarm", "BoundaryEvent", 0.0, 0.0, 30.0, 30.0);
    boundary["properties"] = json!({ "attachedtoref": "ghost" });

    let registry = StencilRegistry::default_stencils();
    let out = to_model(&canvas(vec![boundary]), ProcessTemplate::built_in(), &registry).unwrap();

    let event = out.graph.find_node("alarm").unwrap();
    assert_eq!(event.kind, FlowNodeKind::BoundaryEvent);
    assert_eq!(event.attached_to.as_deref(), Some("ghost"));
    // No activity references it.
    assert!(
        out.graph
            .elements
            .iter()
            .filter_map(|e| e.as_node())
            .all(|n| n.boundary_refs.is_empty())
    );
}

#[test]
fn unsupported_stencils_are_ignored_but_still_indexed() {
    let pool = shape_json("pool1", "Pool", 0.0, 0.0, 600.0, 400.0);

    let registry = StencilRegistry::default_stencils();
    let out = to_model(&canvas(vec![pool]), ProcessTemplate::built_in(), &registry).unwrap();

    assert!(out.graph.elements.is_empty());
    // The DI record still exists; the persistence layer decides its fate.
    assert!(out.diagram.plane().unwrap().find_shape("pool1").is_some());
}

#[test]
fn subprocess_children_resolve_flows_in_their_own_scope() {
    let mut inner_start = shape_json("istart", "StartEvent", 10.0, 10.0, 30.0, 30.0);
    inner_start["outgoing"] = json!([{ "resourceId": "iflow" }]);
    let inner_end = shape_json("iend", "EndEvent", 200.0, 10.0, 28.0, 28.0);
    let mut inner_flow = shape_json("iflow", "SequenceFlow", 0.0, 0.0, 0.0, 0.0);
    inner_flow["target"] = json!({ "resourceId": "iend" });
    inner_flow["dockers"] = json!([
        { "x": 15.0, "y": 15.0 },
        { "x": 14.0, "y": 14.0 },
    ]);

    let mut sub = shape_json("sub", "SubProcess", 50.0, 50.0, 300.0, 120.0);
    sub["childShapes"] = json!([inner_start, inner_end, inner_flow]);

    let registry = StencilRegistry::default_stencils();
    let out = to_model(&canvas(vec![sub]), ProcessTemplate::built_in(), &registry).unwrap();

    let sub_node = out.graph.find_node("sub").unwrap();
    assert_eq!(sub_node.kind, FlowNodeKind::SubProcess);
    assert_eq!(sub_node.children.len(), 3);

    let flow = sub_node
        .children
        .iter()
        .find_map(|e| e.as_flow().filter(|f| f.id == "iflow"))
        .unwrap();
    assert_eq!(flow.source_ref.as_deref(), Some("istart"));
    assert_eq!(flow.target_ref.as_deref(), Some("iend"));

    // Incoming/outgoing wiring reaches into the container.
    assert_eq!(out.graph.find_node("istart").unwrap().outgoing, vec!["iflow".to_string()]);
    assert_eq!(out.graph.find_node("iend").unwrap().incoming, vec!["iflow".to_string()]);

    // The nested edge got geometry too: it starts on the inner start circle.
    let plane = out.diagram.plane().unwrap();
    let edge = plane.find_edge("iflow").unwrap();
    let center = (75.0, 75.0); // absolute inner-start center
    let dist = ((edge.waypoints[0].x - center.0).powi(2)
        + (edge.waypoints[0].y - center.1).powi(2))
    .sqrt();
    assert!((dist - 15.0).abs() < 1e-6);
}

#[test]
fn malformed_top_level_document_is_fatal() {
    let registry = StencilRegistry::default_stencils();
    let err = to_model(&json!([]), ProcessTemplate::built_in(), &registry).unwrap_err();
    assert!(matches!(err, Error::MalformedDiagram));

    let err = to_model(
        &json!({ "resourceId": "canvas" }),
        ProcessTemplate::built_in(),
        &registry,
    )
    .unwrap_err();
    assert!(matches!(err, Error::MalformedDiagram));
}

#[test]
fn template_without_plane_is_fatal() {
    let mut template = ProcessTemplate::built_in();
    template.diagram.planes.clear();
    let registry = StencilRegistry::default_stencils();
    let err = to_model(&canvas(vec![]), template, &registry).unwrap_err();
    assert!(matches!(err, Error::MissingPlane));
}
