mod roundtrip;
mod to_model;

use lagoon_model::{Bounds, DiagramShape};

use crate::shape::format_shape_id;

pub(crate) fn shape_record(element_id: &str, x: f64, y: f64, width: f64, height: f64) -> DiagramShape {
    DiagramShape {
        id: format_shape_id(element_id),
        element_id: element_id.to_string(),
        bounds: Bounds::new(x, y, width, height),
    }
}
