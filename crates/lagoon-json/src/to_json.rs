//! Forward conversion: process graph → editor JSON shape tree.

use lagoon_model::{Bounds, Diagram, DiagramPlane, FlowElement, Lane, ProcessGraph};
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::{Map, Value, json};

use crate::constants::*;
use crate::error::{Error, Result};
use crate::geometry::{Point, point};
use crate::registry::{ElementKind, StencilRegistry};
use crate::shape;

/// Shared, read-only state for the per-element `to_shape` strategies.
pub struct ForwardCtx<'a> {
    pub registry: &'a StencilRegistry,
    pub plane: &'a DiagramPlane,
    outgoing: FxHashMap<String, Vec<String>>,
}

impl<'a> ForwardCtx<'a> {
    fn new(graph: &ProcessGraph, plane: &'a DiagramPlane, registry: &'a StencilRegistry) -> Self {
        let mut outgoing = FxHashMap::default();
        collect_outgoing(&graph.elements, &mut outgoing);
        Self {
            registry,
            plane,
            outgoing,
        }
    }

    /// Ids of the sequence flows leaving `node_id`, in document order.
    pub fn outgoing_flows(&self, node_id: &str) -> &[String] {
        self.outgoing.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn collect_outgoing(elements: &[FlowElement], map: &mut FxHashMap<String, Vec<String>>) {
    for element in elements {
        match element {
            FlowElement::Flow(flow) => {
                if let Some(source) = &flow.source_ref {
                    map.entry(source.clone()).or_default().push(flow.id.clone());
                }
            }
            FlowElement::Node(node) => collect_outgoing(&node.children, map),
        }
    }
}

/// Converts a process graph (plus its persisted diagram geometry) into the
/// editor's canvas JSON document.
///
/// Per-element conversion failures are logged and the element is skipped;
/// only a missing diagram plane aborts the conversion.
pub fn to_diagram(
    graph: &ProcessGraph,
    diagram: &Diagram,
    registry: &StencilRegistry,
) -> Result<Value> {
    let plane = diagram.plane().ok_or(Error::MissingPlane)?;
    let ctx = ForwardCtx::new(graph, plane, registry);

    let mut shapes: Vec<Value> = Vec::new();
    let mut used: FxHashSet<String> = FxHashSet::default();

    // Lanes first: one level of lane groups, nested lanes recursively.
    for lane in graph.lane_groups.iter().flat_map(|group| &group.lanes) {
        add_lane_shapes(lane, graph, &ctx, &mut shapes, point(0.0, 0.0), &mut used);
    }

    // Everything not indexed by a lane sits directly on the canvas.
    for element in &graph.elements {
        if used.contains(element.id()) {
            continue;
        }
        let Some((_, to_shape)) = registry.lookup_kind(ElementKind::of(element)) else {
            continue;
        };
        match to_shape(element, &ctx, point(0.0, 0.0)) {
            Ok(value) => shapes.push(value),
            Err(err) => {
                tracing::error!(element = element.id(), error = %err, "error converting element");
            }
        }
    }

    Ok(json!({
        EDITOR_BOUNDS: shape::bounds_json(Bounds::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT)),
        EDITOR_SHAPE_ID: CANVAS_RESOURCE_ID,
        EDITOR_STENCIL: { EDITOR_STENCIL_ID: STENCIL_DIAGRAM },
        "stencilset": {
            "namespace": STENCIL_SET_NAMESPACE,
            "url": STENCIL_SET_URL,
        },
        EDITOR_SHAPE_PROPERTIES: process_properties(graph),
        EDITOR_CHILD_SHAPES: shapes,
    }))
}

fn process_properties(graph: &ProcessGraph) -> Value {
    let mut props = Map::new();
    if !graph.id.is_empty() {
        props.insert(PROPERTY_OVERRIDE_ID.into(), json!(graph.id));
    }
    if !graph.name.is_empty() {
        props.insert(PROPERTY_NAME.into(), json!(graph.name));
    }
    if let Some(category) = &graph.category {
        props.insert(PROPERTY_PROCESS_CATEGORY.into(), json!(category));
    }
    if let Some(subject) = &graph.subject {
        props.insert(PROPERTY_PROCESS_SUBJECT.into(), json!(subject));
    }
    if let Some(form) = &graph.default_form {
        props.insert(PROPERTY_PROCESS_DEFAULT_FORM.into(), json!(form));
    }
    if !graph.data_variables.is_empty() {
        let items: Vec<Value> = graph
            .data_variables
            .iter()
            .map(|variable| {
                let mut item = Map::new();
                item.insert(PROPERTY_DATAVARIABLE_ID.into(), json!(variable.id));
                item.insert(PROPERTY_DATAVARIABLE_TYPE.into(), json!(variable.data_type));
                item.insert(PROPERTY_DATAVARIABLE_BIZTYPE.into(), json!(variable.biz_type));
                item.insert(
                    PROPERTY_DATAVARIABLE_IS_PERSISTENT.into(),
                    json!(variable.is_persistent),
                );
                if let Some(default) = &variable.default_value {
                    item.insert(PROPERTY_DATAVARIABLE_DEFAULT_VALUE.into(), json!(default));
                }
                Value::Object(item)
            })
            .collect();
        props.insert(
            PROPERTY_PROCESS_DATAVARIABLE.into(),
            json!({
                "totalCount": items.len(),
                EDITOR_PROPERTIES_GENERAL_ITEMS: items,
            }),
        );
    }
    props.insert(
        PROPERTY_PROCESS_NAMESPACE.into(),
        json!(graph.target_namespace),
    );
    if let Some(documentation) = &graph.documentation {
        if !documentation.is_empty() {
            props.insert(PROPERTY_DOCUMENTATION.into(), json!(documentation));
        }
    }
    Value::Object(props)
}

/// Emits one lane shape: fixed style properties, the flow nodes the lane
/// references (shifted by the lane's origin), then nested lanes.
fn add_lane_shapes(
    lane: &Lane,
    graph: &ProcessGraph,
    ctx: &ForwardCtx<'_>,
    shapes: &mut Vec<Value>,
    offset: Point,
    used: &mut FxHashSet<String>,
) {
    let Some(record) = ctx.plane.find_shape(&lane.id) else {
        tracing::error!(lane = lane.id, "lane has no persisted bounds, skipping");
        return;
    };
    let bounds = record.bounds;
    let relative = Bounds::new(
        bounds.x - offset.x,
        bounds.y - offset.y,
        bounds.width,
        bounds.height,
    );

    let mut lane_value = shape::create_child_shape(&lane.id, STENCIL_LANE, relative);
    {
        let props = lane_value[EDITOR_SHAPE_PROPERTIES]
            .as_object_mut()
            .expect("freshly built shape has a properties object");
        props.insert(PROPERTY_PARENT_POOL.into(), json!(""));
        props.insert(PROPERTY_PARENT_LANE.into(), json!(""));
        props.insert(PROPERTY_SHOW_CAPTION.into(), json!("true"));
        props.insert(PROPERTY_BG_COLOR.into(), json!(""));
        props.insert(PROPERTY_BORDER_COLOR.into(), json!(LANE_BORDER_COLOR));
        if !lane.name.is_empty() {
            props.insert(PROPERTY_NAME.into(), json!(lane.name));
        }
    }

    let lane_origin = point(bounds.x, bounds.y);
    let mut children: Vec<Value> = Vec::new();
    for ref_id in &lane.flow_node_refs {
        let Some(element) = graph.elements.iter().find(|e| e.id() == ref_id) else {
            tracing::debug!(lane = lane.id, node = ref_id, "lane references unknown node");
            continue;
        };
        let Some((_, to_shape)) = ctx.registry.lookup_kind(ElementKind::of(element)) else {
            continue;
        };
        match to_shape(element, ctx, lane_origin) {
            Ok(value) => {
                children.push(value);
                used.insert(ref_id.clone());
            }
            Err(err) => {
                tracing::error!(element = ref_id, error = %err, "error converting element");
            }
        }
    }

    if let Some(group) = lane.child_lanes.as_deref() {
        for child_lane in &group.lanes {
            add_lane_shapes(child_lane, graph, ctx, &mut children, lane_origin, used);
        }
    }

    lane_value[EDITOR_CHILD_SHAPES] = Value::Array(children);
    shapes.push(lane_value);
}
