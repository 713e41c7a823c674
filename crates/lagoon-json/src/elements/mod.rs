//! Per-type conversion strategies, dispatched through the stencil registry.
//!
//! `nodes` covers every plain flow node (events, tasks, gateways): their
//! strategies differ only in the stencil id the registry pairs them with.
//! Containers and sequence flows carry extra structure and get their own
//! modules.

pub mod containers;
pub mod flows;
pub mod nodes;

use lagoon_model::{Bounds, FlowElement, FlowNode, FlowNodeKind};
use serde_json::{Value, json};

use crate::constants::*;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::registry::ElementKind;
use crate::shape;
use crate::to_json::ForwardCtx;
use crate::to_model::ReverseCtx;

/// Emits the common shape node for a flow node: persisted bounds shifted
/// into the parent's coordinate space, identity properties, and the
/// outgoing-edge linkage derived from the sequence flows.
pub(crate) fn node_shape(node: &FlowNode, ctx: &ForwardCtx, offset: Point) -> Result<Value> {
    let (stencil, _) = ctx
        .registry
        .lookup_kind(ElementKind::Node(node.kind))
        .ok_or_else(|| Error::UnregisteredStencil(node.id.clone()))?;
    let bounds = ctx
        .plane
        .find_shape(&node.id)
        .ok_or_else(|| Error::MissingShape(node.id.clone()))?
        .bounds;
    let relative = Bounds::new(
        bounds.x - offset.x,
        bounds.y - offset.y,
        bounds.width,
        bounds.height,
    );

    let mut value = shape::create_child_shape(&node.id, stencil, relative);
    let outgoing: Vec<Value> = ctx
        .outgoing_flows(&node.id)
        .iter()
        .map(|flow_id| json!({ EDITOR_SHAPE_ID: flow_id }))
        .collect();
    value[EDITOR_OUTGOING] = Value::Array(outgoing);

    let props = value[EDITOR_SHAPE_PROPERTIES]
        .as_object_mut()
        .expect("freshly built shape has a properties object");
    props.insert(PROPERTY_OVERRIDE_ID.into(), json!(node.id));
    if !node.name.is_empty() {
        props.insert(PROPERTY_NAME.into(), json!(node.name));
    }
    if let Some(attached_to) = &node.attached_to {
        props.insert(PROPERTY_ATTACHED_TO_REF.into(), json!(attached_to));
    }
    Ok(value)
}

/// Rebuilds the common flow-node fields from a shape; edge linkage and
/// boundary attachment are completed by the reverse converter's
/// postprocessing pass.
pub(crate) fn node_from_shape(value: &Value, ctx: &ReverseCtx) -> Result<FlowNode> {
    let stencil = shape::stencil_id(value).ok_or_else(|| Error::MissingField {
        field: EDITOR_STENCIL,
        context: shape::resource_id(value).unwrap_or("?").to_string(),
    })?;
    let kind = match ctx.registry.lookup_stencil(stencil) {
        Some((ElementKind::Node(kind), _)) => kind,
        _ => return Err(Error::UnregisteredStencil(stencil.to_string())),
    };
    let id = shape::element_id(value).ok_or_else(|| Error::MissingField {
        field: EDITOR_SHAPE_ID,
        context: stencil.to_string(),
    })?;
    let name = shape::property_str(value, PROPERTY_NAME).unwrap_or_default();

    let mut node = FlowNode::new(kind, id, name);
    if kind == FlowNodeKind::BoundaryEvent {
        node.attached_to = shape::property_str(value, PROPERTY_ATTACHED_TO_REF)
            .filter(|s| !s.is_empty())
            .map(String::from);
    }
    Ok(node)
}

pub(crate) fn expect_node(element: &FlowElement) -> Result<&FlowNode> {
    element.as_node().ok_or_else(|| Error::WrongElementType {
        id: element.id().to_string(),
        expected: "flow node",
    })
}
