//! Strategy pair for plain flow nodes (events, tasks, gateways).

use lagoon_model::FlowElement;
use serde_json::Value;

use crate::error::Result;
use crate::geometry::Point;
use crate::to_json::ForwardCtx;
use crate::to_model::ReverseCtx;

pub fn to_shape(element: &FlowElement, ctx: &ForwardCtx, offset: Point) -> Result<Value> {
    let node = super::expect_node(element)?;
    super::node_shape(node, ctx, offset)
}

pub fn to_element(value: &Value, ctx: &ReverseCtx) -> Result<FlowElement> {
    Ok(FlowElement::Node(super::node_from_shape(value, ctx)?))
}
