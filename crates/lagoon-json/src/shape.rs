//! Accessors over editor JSON shape nodes and DI id formatting.
//!
//! Shape trees are plain `serde_json::Value` objects; these helpers keep the
//! field-name knowledge in one place. Bounds on the wire are parent-relative
//! `{upperLeft, lowerRight}` pairs; absolute bounds are reconstructed by the
//! reverse converter while walking the tree.

use lagoon_model::Bounds;
use serde_json::{Value, json};

use crate::constants::*;
use crate::error::{Error, Result};

pub fn stencil_id(shape: &Value) -> Option<&str> {
    shape.get(EDITOR_STENCIL)?.get(EDITOR_STENCIL_ID)?.as_str()
}

pub fn resource_id(shape: &Value) -> Option<&str> {
    shape.get(EDITOR_SHAPE_ID)?.as_str()
}

/// The model-side element id: the `overrideid` property when present and
/// non-empty, the `resourceId` otherwise.
pub fn element_id(shape: &Value) -> Option<&str> {
    match property_str(shape, PROPERTY_OVERRIDE_ID) {
        Some(id) if !id.is_empty() => Some(id),
        _ => resource_id(shape),
    }
}

pub fn property<'a>(shape: &'a Value, key: &str) -> Option<&'a Value> {
    shape.get(EDITOR_SHAPE_PROPERTIES)?.get(key)
}

pub fn property_str<'a>(shape: &'a Value, key: &str) -> Option<&'a str> {
    property(shape, key)?.as_str()
}

pub fn child_shapes(shape: &Value) -> &[Value] {
    shape
        .get(EDITOR_CHILD_SHAPES)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Parses a shape's own (parent-relative) bounds.
pub fn bounds_of(shape: &Value) -> Result<Bounds> {
    let context = || resource_id(shape).unwrap_or("?").to_string();
    let bounds = shape.get(EDITOR_BOUNDS).ok_or_else(|| Error::MissingField {
        field: EDITOR_BOUNDS,
        context: context(),
    })?;
    let corner = |key: &str| -> Result<(f64, f64)> {
        let node = bounds
            .get(key)
            .ok_or_else(|| Error::MalformedBounds(context()))?;
        let x = node.get(EDITOR_BOUNDS_X).and_then(Value::as_f64);
        let y = node.get(EDITOR_BOUNDS_Y).and_then(Value::as_f64);
        match (x, y) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(Error::MalformedBounds(context())),
        }
    };
    let (ulx, uly) = corner(EDITOR_BOUNDS_UPPER_LEFT)?;
    let (lrx, lry) = corner(EDITOR_BOUNDS_LOWER_RIGHT)?;
    Ok(Bounds::new(ulx, uly, lrx - ulx, lry - uly))
}

pub fn bounds_json(bounds: Bounds) -> Value {
    json!({
        EDITOR_BOUNDS_UPPER_LEFT: { EDITOR_BOUNDS_X: bounds.x, EDITOR_BOUNDS_Y: bounds.y },
        EDITOR_BOUNDS_LOWER_RIGHT: {
            EDITOR_BOUNDS_X: bounds.x + bounds.width,
            EDITOR_BOUNDS_Y: bounds.y + bounds.height,
        },
    })
}

/// Builds the skeleton of a child shape node; callers fill in `properties`
/// and, for edges, `dockers`/`target`.
pub fn create_child_shape(resource_id: &str, stencil: &str, bounds: Bounds) -> Value {
    json!({
        EDITOR_BOUNDS: bounds_json(bounds),
        EDITOR_SHAPE_ID: resource_id,
        EDITOR_STENCIL: { EDITOR_STENCIL_ID: stencil },
        EDITOR_SHAPE_PROPERTIES: {},
        EDITOR_CHILD_SHAPES: [],
        EDITOR_DOCKERS: [],
        EDITOR_OUTGOING: [],
    })
}

pub fn format_shape_id(element_id: &str) -> String {
    format!("{SHAPE_ID_PREFIX}{element_id}")
}

pub fn element_id_from_shape_id(shape_id: &str) -> &str {
    shape_id.strip_prefix(SHAPE_ID_PREFIX).unwrap_or(shape_id)
}

pub fn format_edge_id(element_id: &str) -> String {
    format!("{EDGE_ID_PREFIX}{element_id}")
}

pub fn element_id_from_edge_id(edge_id: &str) -> &str {
    edge_id.strip_prefix(EDGE_ID_PREFIX).unwrap_or(edge_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_id_prefers_non_empty_override() {
        let shape = json!({
            "resourceId": "sid-1",
            "properties": { "overrideid": "task_review" },
        });
        assert_eq!(element_id(&shape), Some("task_review"));

        let blank = json!({
            "resourceId": "sid-2",
            "properties": { "overrideid": "" },
        });
        assert_eq!(element_id(&blank), Some("sid-2"));
    }

    #[test]
    fn bounds_round_trip_through_corner_encoding() {
        let b = Bounds::new(30.0, 40.0, 100.0, 60.0);
        let shape = json!({ "resourceId": "s", "bounds": bounds_json(b) });
        assert_eq!(bounds_of(&shape).unwrap(), b);
    }

    #[test]
    fn id_prefixes_strip_back_to_element_ids() {
        assert_eq!(format_shape_id("task1"), "BPMNShape_task1");
        assert_eq!(element_id_from_shape_id("BPMNShape_task1"), "task1");
        assert_eq!(element_id_from_edge_id("BPMNEdge_flow1"), "flow1");
        assert_eq!(element_id_from_edge_id("flow1"), "flow1");
    }
}
