//! Reverse conversion: editor JSON shape tree → process graph.
//!
//! Works in four passes to break the circular dependencies in the format:
//! edges reference shapes declared anywhere in the tree, and sequence-flow
//! endpoints can only resolve once every shape is indexed.
//!
//! 1. index all non-edge shapes (absolute bounds, outgoing-edge sources);
//! 2. index all edges with their (source, target) shape pair;
//! 3. build the graph: lanes thread into lane groups, everything else goes
//!    through the registry; flow endpoints resolve afterwards;
//! 4. postprocess: incoming/outgoing attachment, boundary-event hosts,
//!    DI shape resolution, and geometry-corrected DI edges.

use indexmap::IndexMap;
use lagoon_model::{
    Bounds, DataVariable, Diagram, DiagramEdge, DiagramPlane, DiagramShape, FlowElement,
    FlowNodeKind, Lane, LaneGroup, ProcessGraph, ProcessTemplate,
};
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::geometry::{self, Point, point};
use crate::registry::StencilRegistry;
use crate::shape;

/// Shared, read-only state for the per-shape `to_element` strategies.
pub struct ReverseCtx<'a> {
    pub registry: &'a StencilRegistry,
}

/// The populated graph plus its parallel diagram-interchange geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseOutput {
    pub graph: ProcessGraph,
    pub diagram: Diagram,
}

#[derive(Default)]
struct ShapeIndices<'a> {
    /// resourceId → shape node, for every non-edge shape.
    shapes: FxHashMap<&'a str, &'a Value>,
    /// edge resourceId → the shape whose `outgoing` list names it.
    sources: FxHashMap<&'a str, &'a Value>,
}

struct EdgeEntry<'a> {
    edge: &'a Value,
    source: Option<&'a Value>,
    target: Option<&'a Value>,
}

/// Converts an editor JSON document into a process graph, using `template`
/// as the pre-wired empty scaffold.
///
/// Unsupported stencils are ignored; per-element failures and unresolvable
/// references are logged and skipped. Only a malformed top-level document or
/// a template without a diagram plane is fatal.
pub fn to_model(
    model_node: &Value,
    template: ProcessTemplate,
    registry: &StencilRegistry,
) -> Result<ReverseOutput> {
    if !model_node.is_object()
        || model_node
            .get(EDITOR_CHILD_SHAPES)
            .and_then(Value::as_array)
            .is_none()
    {
        return Err(Error::MalformedDiagram);
    }

    let ProcessTemplate {
        mut graph,
        mut diagram,
    } = template;
    let plane = diagram.plane_mut().ok_or(Error::MissingPlane)?;

    // Pass 1: shape indexing.
    let mut indices = ShapeIndices::default();
    read_shape_di(model_node, point(0.0, 0.0), &mut indices, plane)?;

    // Pass 2: edge indexing.
    let mut edge_index: IndexMap<String, EdgeEntry<'_>> = IndexMap::new();
    filter_all_edges(model_node, &indices, &mut edge_index);

    // Pass 3: graph construction.
    read_process_properties(model_node, &mut graph);
    let ctx = ReverseCtx { registry };
    build_process_children(shape::child_shapes(model_node), &ctx, &mut graph);
    resolve_flow_endpoints(&mut graph.elements, &edge_index);

    // Pass 4: postprocessing.
    let mut flow_source_map: FxHashMap<String, Vec<String>> = FxHashMap::default();
    let mut flow_target_map: FxHashMap<String, Vec<String>> = FxHashMap::default();
    collect_sequence_flows(&graph.elements, &mut flow_source_map, &mut flow_target_map);
    attach_flow_refs(&mut graph.elements, &flow_source_map, &flow_target_map);
    attach_boundary_events(&mut graph);
    resolve_shape_elements(&graph, plane);
    read_edge_di(&edge_index, plane);

    Ok(ReverseOutput { graph, diagram })
}

/// Walks the tree depth-first, skipping edges, accumulating parent origins
/// so every recorded `DiagramShape` carries absolute bounds.
fn read_shape_di<'a>(
    node: &'a Value,
    parent: Point,
    indices: &mut ShapeIndices<'a>,
    plane: &mut DiagramPlane,
) -> Result<()> {
    for child in shape::child_shapes(node) {
        let Some(stencil) = shape::stencil_id(child) else {
            tracing::debug!("shape without stencil id, skipping");
            continue;
        };
        if stencil == STENCIL_SEQUENCE_FLOW {
            continue;
        }

        let relative = shape::bounds_of(child)?;
        let absolute = Bounds::new(
            relative.x + parent.x,
            relative.y + parent.y,
            relative.width,
            relative.height,
        );
        let element_id = shape::element_id(child).ok_or(Error::MissingField {
            field: EDITOR_SHAPE_ID,
            context: stencil.to_string(),
        })?;
        plane.shapes.push(DiagramShape {
            id: shape::format_shape_id(element_id),
            element_id: element_id.to_string(),
            bounds: absolute,
        });

        if let Some(resource_id) = shape::resource_id(child) {
            indices.shapes.insert(resource_id, child);
        }
        if let Some(outgoing) = child.get(EDITOR_OUTGOING).and_then(Value::as_array) {
            for entry in outgoing {
                if let Some(edge_resource) = entry.get(EDITOR_SHAPE_ID).and_then(Value::as_str) {
                    indices.sources.insert(edge_resource, child);
                }
            }
        }

        read_shape_di(child, point(absolute.x, absolute.y), indices, plane)?;
    }
    Ok(())
}

/// Records each edge's (source, target) shape pair; either side may be
/// missing, which marks the edge for a logged skip later.
fn filter_all_edges<'a>(
    node: &'a Value,
    indices: &ShapeIndices<'a>,
    edge_index: &mut IndexMap<String, EdgeEntry<'a>>,
) {
    for child in shape::child_shapes(node) {
        match shape::stencil_id(child) {
            Some(STENCIL_SUB_PROCESS | STENCIL_EVENT_SUB_PROCESS | STENCIL_LANE) => {
                filter_all_edges(child, indices, edge_index);
            }
            Some(STENCIL_SEQUENCE_FLOW) => {
                let Some(element_id) = shape::element_id(child) else {
                    tracing::debug!("edge without resource id, skipping");
                    continue;
                };
                let source = shape::resource_id(child)
                    .and_then(|rid| indices.sources.get(rid))
                    .copied();
                let target = child
                    .get(EDITOR_TARGET)
                    .and_then(|t| t.get(EDITOR_SHAPE_ID))
                    .and_then(Value::as_str)
                    .and_then(|tid| indices.shapes.get(tid))
                    .copied();
                edge_index.insert(
                    shape::format_edge_id(element_id),
                    EdgeEntry {
                        edge: child,
                        source,
                        target,
                    },
                );
            }
            _ => {}
        }
    }
}

fn read_process_properties(model_node: &Value, graph: &mut ProcessGraph) {
    let non_empty =
        |key: &str| shape::property_str(model_node, key).filter(|s| !s.is_empty());

    if let Some(id) = non_empty(PROPERTY_OVERRIDE_ID) {
        graph.id = id.to_string();
    }
    if let Some(name) = non_empty(PROPERTY_NAME) {
        graph.name = name.to_string();
    }
    graph.subject = non_empty(PROPERTY_PROCESS_SUBJECT).map(String::from);
    graph.category = non_empty(PROPERTY_PROCESS_CATEGORY).map(String::from);
    graph.default_form = non_empty(PROPERTY_PROCESS_DEFAULT_FORM).map(String::from);
    if let Some(namespace) = non_empty(PROPERTY_PROCESS_NAMESPACE) {
        graph.target_namespace = namespace.to_string();
    }
    graph.documentation = non_empty(PROPERTY_DOCUMENTATION).map(String::from);

    if let Some(items) = shape::property(model_node, PROPERTY_PROCESS_DATAVARIABLE)
        .and_then(|v| v.get(EDITOR_PROPERTIES_GENERAL_ITEMS))
        .and_then(Value::as_array)
    {
        for item in items {
            let text = |key: &str| {
                item.get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            graph.data_variables.push(DataVariable {
                id: text(PROPERTY_DATAVARIABLE_ID),
                data_type: text(PROPERTY_DATAVARIABLE_TYPE),
                biz_type: text(PROPERTY_DATAVARIABLE_BIZTYPE),
                is_persistent: bool_value(item.get(PROPERTY_DATAVARIABLE_IS_PERSISTENT)),
                default_value: item
                    .get(PROPERTY_DATAVARIABLE_DEFAULT_VALUE)
                    .and_then(Value::as_str)
                    .map(String::from),
            });
        }
    }
}

// The editor serializes booleans both as JSON booleans and as "true"/"false"
// strings depending on widget, so accept either.
fn bool_value(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

/// Process-level shape walk: lanes thread into the process lane groups,
/// everything else dispatches through the registry into `graph.elements`.
fn build_process_children(children: &[Value], ctx: &ReverseCtx<'_>, graph: &mut ProcessGraph) {
    for child in children {
        let Some(stencil) = shape::stencil_id(child) else {
            continue;
        };
        if stencil == STENCIL_LANE {
            let lane = build_lane(child, ctx, &mut graph.elements);
            if graph.lane_groups.is_empty() {
                graph.lane_groups.push(LaneGroup::default());
            }
            graph.lane_groups[0].lanes.push(lane);
            continue;
        }
        let Some((_, to_element)) = ctx.registry.lookup_stencil(stencil) else {
            continue;
        };
        match to_element(child, ctx) {
            Ok(element) => graph.elements.push(element),
            Err(err) => {
                tracing::error!(stencil, error = %err, "error converting shape");
            }
        }
    }
}

/// Builds one lane. Elements drawn inside a lane shape are owned by the
/// enclosing process and the lane only records their ids, so converted
/// children are appended to the caller's element list.
fn build_lane(value: &Value, ctx: &ReverseCtx<'_>, elements: &mut Vec<FlowElement>) -> Lane {
    let id = shape::element_id(value).unwrap_or_default();
    let name = shape::property_str(value, PROPERTY_NAME).unwrap_or_default();
    let mut lane = Lane::new(id, name);

    for child in shape::child_shapes(value) {
        let Some(stencil) = shape::stencil_id(child) else {
            continue;
        };
        if stencil == STENCIL_LANE {
            let nested = build_lane(child, ctx, elements);
            lane.child_lanes
                .get_or_insert_with(Default::default)
                .lanes
                .push(nested);
            continue;
        }
        let Some((_, to_element)) = ctx.registry.lookup_stencil(stencil) else {
            continue;
        };
        match to_element(child, ctx) {
            Ok(element) => {
                if let FlowElement::Node(node) = &element {
                    lane.flow_node_refs.push(node.id.clone());
                }
                elements.push(element);
            }
            Err(err) => {
                tracing::error!(stencil, error = %err, "error converting shape");
            }
        }
    }
    lane
}

/// Container-scope shape walk used by the subprocess strategy; lanes do not
/// occur below process level and fall through as unregistered stencils.
pub(crate) fn convert_child_elements(children: &[Value], ctx: &ReverseCtx<'_>) -> Vec<FlowElement> {
    let mut elements = Vec::new();
    for child in children {
        let Some(stencil) = shape::stencil_id(child) else {
            continue;
        };
        let Some((_, to_element)) = ctx.registry.lookup_stencil(stencil) else {
            continue;
        };
        match to_element(child, ctx) {
            Ok(element) => elements.push(element),
            Err(err) => {
                tracing::error!(stencil, error = %err, "error converting shape");
            }
        }
    }
    elements
}

/// Sets source/target on every sequence flow from the pass-2 pairs,
/// recursing into containers.
fn resolve_flow_endpoints(elements: &mut [FlowElement], edge_index: &IndexMap<String, EdgeEntry<'_>>) {
    for element in elements {
        match element {
            FlowElement::Flow(flow) => {
                if let Some(entry) = edge_index.get(&shape::format_edge_id(&flow.id)) {
                    flow.source_ref = entry
                        .source
                        .and_then(shape::element_id)
                        .map(String::from);
                    flow.target_ref = entry
                        .target
                        .and_then(shape::element_id)
                        .map(String::from);
                }
            }
            FlowElement::Node(node) => {
                resolve_flow_endpoints(&mut node.children, edge_index);
            }
        }
    }
}

fn collect_sequence_flows(
    elements: &[FlowElement],
    source_map: &mut FxHashMap<String, Vec<String>>,
    target_map: &mut FxHashMap<String, Vec<String>>,
) {
    for element in elements {
        match element {
            FlowElement::Flow(flow) => {
                if let Some(source) = &flow.source_ref {
                    source_map
                        .entry(source.clone())
                        .or_default()
                        .push(flow.id.clone());
                }
                if let Some(target) = &flow.target_ref {
                    target_map
                        .entry(target.clone())
                        .or_default()
                        .push(flow.id.clone());
                }
            }
            FlowElement::Node(node) => {
                collect_sequence_flows(&node.children, source_map, target_map);
            }
        }
    }
}

fn attach_flow_refs(
    elements: &mut [FlowElement],
    source_map: &FxHashMap<String, Vec<String>>,
    target_map: &FxHashMap<String, Vec<String>>,
) {
    for element in elements {
        if let FlowElement::Node(node) = element {
            if let Some(flows) = source_map.get(&node.id) {
                node.outgoing = flows.clone();
            }
            if let Some(flows) = target_map.get(&node.id) {
                node.incoming = flows.clone();
            }
            attach_flow_refs(&mut node.children, source_map, target_map);
        }
    }
}

/// Links each boundary event to its host activity, searching the whole
/// container tree. A missing or non-activity host leaves the event
/// detached with a warning; it never aborts the conversion.
fn attach_boundary_events(graph: &mut ProcessGraph) {
    let mut pairs: Vec<(String, String)> = Vec::new();
    collect_boundary_events(&graph.elements, &mut pairs);

    for (event_id, attached_id) in pairs {
        match graph.find_node_mut(&attached_id) {
            Some(host) if host.kind.is_activity() => {
                host.boundary_refs.push(event_id);
            }
            Some(_) => {
                tracing::warn!(
                    event = event_id,
                    host = attached_id,
                    "boundary event is attached to a non-activity"
                );
            }
            None => {
                tracing::warn!(event = event_id, "boundary event is not attached to any activity");
            }
        }
    }
}

fn collect_boundary_events(elements: &[FlowElement], pairs: &mut Vec<(String, String)>) {
    for element in elements {
        if let FlowElement::Node(node) = element {
            if node.kind == FlowNodeKind::BoundaryEvent {
                if let Some(attached) = &node.attached_to {
                    pairs.push((node.id.clone(), attached.clone()));
                }
            }
            collect_boundary_events(&node.children, pairs);
        }
    }
}

/// DI shapes whose element never materialized (unsupported stencils, skipped
/// elements) are kept but flagged; the persistence layer drops them.
fn resolve_shape_elements(graph: &ProcessGraph, plane: &DiagramPlane) {
    for record in &plane.shapes {
        if !graph.contains_element(&record.element_id) {
            tracing::debug!(shape = record.id, "diagram shape has no matching element");
        }
    }
}

/// Produces the final DI edges by routing each indexed edge's dockers
/// through the geometry engine.
fn read_edge_di(edge_index: &IndexMap<String, EdgeEntry<'_>>, plane: &mut DiagramPlane) {
    let mut edges: Vec<DiagramEdge> = Vec::new();
    for (edge_id, entry) in edge_index {
        let Some(source) = entry.source else {
            tracing::info!(edge = edge_id, "skipping edge: source ref is missing");
            continue;
        };
        let Some(target) = entry.target else {
            tracing::info!(edge = edge_id, "skipping edge: target ref is missing");
            continue;
        };
        let (Some(source_element), Some(target_element)) =
            (shape::element_id(source), shape::element_id(target))
        else {
            tracing::info!(edge = edge_id, "skipping edge: endpoint has no id");
            continue;
        };
        let (Some(source_bounds), Some(target_bounds)) = (
            plane.find_shape(source_element).map(|s| s.bounds),
            plane.find_shape(target_element).map(|s| s.bounds),
        ) else {
            tracing::info!(edge = edge_id, "skipping edge: endpoint has no recorded shape");
            continue;
        };

        let dockers = parse_dockers(entry.edge);
        if dockers.len() < 2 {
            tracing::info!(edge = edge_id, "skipping edge: fewer than two dockers");
            continue;
        }

        let waypoints = geometry::route_edge(
            &dockers,
            source_bounds,
            target_bounds,
            geometry::classify_stencil(shape::stencil_id(source).unwrap_or_default()),
            geometry::classify_stencil(shape::stencil_id(target).unwrap_or_default()),
        );

        edges.push(DiagramEdge {
            id: edge_id.clone(),
            element_id: shape::element_id_from_edge_id(edge_id).to_string(),
            source_element: source_element.to_string(),
            target_element: target_element.to_string(),
            waypoints,
        });
    }
    plane.edges = edges;
}

fn parse_dockers(edge: &Value) -> Vec<Point> {
    edge.get(EDITOR_DOCKERS)
        .and_then(Value::as_array)
        .map(|dockers| {
            dockers
                .iter()
                .filter_map(|d| {
                    let x = d.get(EDITOR_BOUNDS_X)?.as_f64()?;
                    let y = d.get(EDITOR_BOUNDS_Y)?.as_f64()?;
                    Some(point(x, y))
                })
                .collect()
        })
        .unwrap_or_default()
}
