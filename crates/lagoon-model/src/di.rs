//! Diagram-interchange records: the geometry side of a process model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiPoint {
    pub x: f64,
    pub y: f64,
}

impl DiPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Absolute bounds of a diagram shape in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn origin(&self) -> DiPoint {
        DiPoint::new(self.x, self.y)
    }

    pub fn center(&self) -> DiPoint {
        DiPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// One placed shape: `id` is the DI identifier (`BPMNShape_<element id>`),
/// `element_id` the flow element (or lane) it depicts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramShape {
    pub id: String,
    pub element_id: String,
    pub bounds: Bounds,
}

/// One routed edge with its intersection-corrected waypoints (>= 2 points).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramEdge {
    pub id: String,
    pub element_id: String,
    pub source_element: String,
    pub target_element: String,
    pub waypoints: Vec<DiPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramPlane {
    pub shapes: Vec<DiagramShape>,
    pub edges: Vec<DiagramEdge>,
}

impl DiagramPlane {
    pub fn find_shape(&self, element_id: &str) -> Option<&DiagramShape> {
        self.shapes.iter().find(|s| s.element_id == element_id)
    }

    pub fn find_edge(&self, element_id: &str) -> Option<&DiagramEdge> {
        self.edges.iter().find(|e| e.element_id == element_id)
    }
}

/// A diagram holds one plane per process; the editor format only ever
/// produces one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub planes: Vec<DiagramPlane>,
}

impl Diagram {
    pub fn single_plane() -> Self {
        Self {
            planes: vec![DiagramPlane::default()],
        }
    }

    pub fn plane(&self) -> Option<&DiagramPlane> {
        self.planes.first()
    }

    pub fn plane_mut(&mut self) -> Option<&mut DiagramPlane> {
        self.planes.first_mut()
    }
}
