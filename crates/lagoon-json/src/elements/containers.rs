//! Strategy pair for subprocess containers.
//!
//! A container converts like a plain node and then recurses into its owned
//! children, shifting them into the container's coordinate space. Child
//! failures are logged and skipped; the container itself still converts.

use lagoon_model::FlowElement;
use serde_json::Value;

use crate::constants::EDITOR_CHILD_SHAPES;
use crate::error::Result;
use crate::geometry::{Point, point};
use crate::registry::ElementKind;
use crate::shape;
use crate::to_json::ForwardCtx;
use crate::to_model::{ReverseCtx, convert_child_elements};

pub fn to_shape(element: &FlowElement, ctx: &ForwardCtx, offset: Point) -> Result<Value> {
    let node = super::expect_node(element)?;
    let mut value = super::node_shape(node, ctx, offset)?;

    // Children are placed relative to the container's absolute origin.
    let origin = ctx
        .plane
        .find_shape(&node.id)
        .map(|s| point(s.bounds.x, s.bounds.y))
        .unwrap_or_default();

    let mut children = Vec::with_capacity(node.children.len());
    for child in &node.children {
        let Some((_, to_shape)) = ctx.registry.lookup_kind(ElementKind::of(child)) else {
            continue;
        };
        match to_shape(child, ctx, origin) {
            Ok(child_value) => children.push(child_value),
            Err(err) => {
                tracing::error!(element = child.id(), error = %err, "error converting element");
            }
        }
    }
    value[EDITOR_CHILD_SHAPES] = Value::Array(children);
    Ok(value)
}

pub fn to_element(value: &Value, ctx: &ReverseCtx) -> Result<FlowElement> {
    let mut node = super::node_from_shape(value, ctx)?;
    node.children = convert_child_elements(shape::child_shapes(value), ctx);
    Ok(FlowElement::Node(node))
}
