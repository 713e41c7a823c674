//! Strategy pair for sequence flows.
//!
//! Forward conversion rebuilds the editor's docking list: the first docker
//! is the source shape's center (source-relative), the last the target
//! shape's center (target-relative), and any persisted interior waypoints
//! travel through as absolute points. The `target`/`outgoing` linkage is
//! what the reverse pass uses to resolve endpoints.

use lagoon_model::{Bounds, FlowElement, SequenceFlow};
use serde_json::{Value, json};

use crate::constants::*;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::shape;
use crate::to_json::ForwardCtx;
use crate::to_model::ReverseCtx;

pub fn to_shape(element: &FlowElement, ctx: &ForwardCtx, offset: Point) -> Result<Value> {
    let flow = element.as_flow().ok_or_else(|| Error::WrongElementType {
        id: element.id().to_string(),
        expected: "sequence flow",
    })?;
    let source_id = flow
        .source_ref
        .as_deref()
        .ok_or_else(|| Error::UnresolvedFlow(flow.id.clone()))?;
    let target_id = flow
        .target_ref
        .as_deref()
        .ok_or_else(|| Error::UnresolvedFlow(flow.id.clone()))?;
    let source = ctx
        .plane
        .find_shape(source_id)
        .ok_or_else(|| Error::MissingShape(source_id.to_string()))?
        .bounds;
    let target = ctx
        .plane
        .find_shape(target_id)
        .ok_or_else(|| Error::MissingShape(target_id.to_string()))?
        .bounds;

    // Interior waypoints (if this flow was routed before) stay absolute.
    let interior: Vec<Point> = ctx
        .plane
        .find_edge(&flow.id)
        .map(|edge| {
            edge.waypoints
                .iter()
                .skip(1)
                .take(edge.waypoints.len().saturating_sub(2))
                .copied()
                .collect()
        })
        .unwrap_or_default();

    let mut dockers = Vec::with_capacity(interior.len() + 2);
    dockers.push(json!({
        EDITOR_BOUNDS_X: source.width / 2.0,
        EDITOR_BOUNDS_Y: source.height / 2.0,
    }));
    for p in &interior {
        dockers.push(json!({ EDITOR_BOUNDS_X: p.x, EDITOR_BOUNDS_Y: p.y }));
    }
    dockers.push(json!({
        EDITOR_BOUNDS_X: target.width / 2.0,
        EDITOR_BOUNDS_Y: target.height / 2.0,
    }));

    let mut value = shape::create_child_shape(&flow.id, STENCIL_SEQUENCE_FLOW, edge_bounds(source, target, &interior, offset));
    value[EDITOR_DOCKERS] = Value::Array(dockers);
    value[EDITOR_TARGET] = json!({ EDITOR_SHAPE_ID: target_id });
    value[EDITOR_OUTGOING] = json!([{ EDITOR_SHAPE_ID: target_id }]);

    let props = value[EDITOR_SHAPE_PROPERTIES]
        .as_object_mut()
        .expect("freshly built shape has a properties object");
    props.insert(PROPERTY_OVERRIDE_ID.into(), json!(flow.id));
    if !flow.name.is_empty() {
        props.insert(PROPERTY_NAME.into(), json!(flow.name));
    }
    if let Some(condition) = &flow.condition {
        props.insert(PROPERTY_CONDITION.into(), json!(condition));
    }
    Ok(value)
}

/// Bounding box of the flow's path, shifted into the parent's space.
fn edge_bounds(source: Bounds, target: Bounds, interior: &[Point], offset: Point) -> Bounds {
    let mut points = vec![source.center(), target.center()];
    points.extend_from_slice(interior);
    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    Bounds::new(min_x - offset.x, min_y - offset.y, max_x - min_x, max_y - min_y)
}

pub fn to_element(value: &Value, _ctx: &ReverseCtx) -> Result<FlowElement> {
    let id = shape::element_id(value).ok_or_else(|| Error::MissingField {
        field: EDITOR_SHAPE_ID,
        context: STENCIL_SEQUENCE_FLOW.to_string(),
    })?;
    let name = shape::property_str(value, PROPERTY_NAME).unwrap_or_default();
    let mut flow = SequenceFlow::new(id, name);
    flow.condition = shape::property_str(value, PROPERTY_CONDITION)
        .filter(|s| !s.is_empty())
        .map(String::from);
    Ok(FlowElement::Flow(flow))
}
