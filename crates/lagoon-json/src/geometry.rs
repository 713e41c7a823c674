//! Edge-waypoint geometry.
//!
//! The editor hands over raw "docker" points for every edge: the first is an
//! offset relative to the source shape's anchor, the last an offset relative
//! to the target shape's top-left corner, and any interior points are
//! absolute. `route_edge` turns that list into final waypoints by clipping
//! the first and last travel segments against the outline of the connected
//! shapes (circle for events, rectangle for activities, diamond for
//! gateways). A missed intersection keeps the raw point instead of failing.

use lagoon_model::Bounds;

use crate::constants::*;

const EPS: f64 = 1e-9;

pub type Point = lagoon_model::DiPoint;

pub fn point(x: f64, y: f64) -> Point {
    Point { x, y }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Outline category of a shape, keyed by its stencil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Diamond,
    None,
}

pub fn classify_stencil(stencil: &str) -> ShapeKind {
    match stencil {
        STENCIL_EVENT_START | STENCIL_EVENT_END | STENCIL_EVENT_BOUNDARY | STENCIL_EVENT_CATCH
        | STENCIL_EVENT_THROW => ShapeKind::Circle,
        STENCIL_TASK_MANUAL | STENCIL_TASK_SCRIPT | STENCIL_TASK_SERVICE | STENCIL_TASK_USER
        | STENCIL_TASK_RECEIVE | STENCIL_TASK_BUSINESS_RULE | STENCIL_CALL_ACTIVITY
        | STENCIL_SUB_PROCESS | STENCIL_EVENT_SUB_PROCESS => ShapeKind::Rectangle,
        STENCIL_GATEWAY_EXCLUSIVE | STENCIL_GATEWAY_INCLUSIVE | STENCIL_GATEWAY_PARALLEL
        | STENCIL_GATEWAY_EVENT => ShapeKind::Diamond,
        _ => ShapeKind::None,
    }
}

/// Closed rectangle outline (5 points, first == last).
pub fn rectangle_outline(bounds: Bounds) -> [Point; 5] {
    let Bounds { x, y, width, height } = bounds;
    [
        point(x, y),
        point(x + width, y),
        point(x + width, y + height),
        point(x, y + height),
        point(x, y),
    ]
}

/// Diamond outline connecting the midpoints of the four rectangle edges.
pub fn diamond_outline(bounds: Bounds) -> [Point; 5] {
    let Bounds { x, y, width, height } = bounds;
    let mid_x = x + width / 2.0;
    let mid_y = y + height / 2.0;
    [
        point(x, mid_y),
        point(mid_x, y),
        point(x + width, mid_y),
        point(mid_x, y + height),
        point(x, mid_y),
    ]
}

/// First intersection of `segment` with the circle, walking forward from the
/// segment's start. The segment may start inside the circle (source end) or
/// end inside it (target end); in both cases the forward-most crossing with
/// the smallest non-negative parameter is the correct clip point.
pub fn line_circle_intersection(segment: Segment, center: Point, radius: f64) -> Option<Point> {
    let dx = segment.end.x - segment.start.x;
    let dy = segment.end.y - segment.start.y;
    let fx = segment.start.x - center.x;
    let fy = segment.start.y - center.y;

    let a = dx * dx + dy * dy;
    if a < EPS {
        return None;
    }
    let b = 2.0 * (fx * dx + fy * dy);
    let c = fx * fx + fy * fy - radius * radius;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);
    let t = [t1, t2].into_iter().find(|t| *t >= -EPS)?;
    Some(point(segment.start.x + t * dx, segment.start.y + t * dy))
}

/// First intersection of `segment` with a polyline outline, again by
/// smallest non-negative parameter along the segment.
pub fn segment_polyline_intersection(segment: Segment, outline: &[Point]) -> Option<Point> {
    let mut best: Option<(f64, Point)> = None;
    for pair in outline.windows(2) {
        if let Some((t, p)) = segment_segment_intersection(segment, Segment::new(pair[0], pair[1]))
        {
            if best.is_none_or(|(best_t, _)| t < best_t) {
                best = Some((t, p));
            }
        }
    }
    best.map(|(_, p)| p)
}

/// Intersection of two segments; returns the parameter along `a` and the
/// point. Parallel or out-of-range pairs yield `None`.
fn segment_segment_intersection(a: Segment, b: Segment) -> Option<(f64, Point)> {
    let r = point(a.end.x - a.start.x, a.end.y - a.start.y);
    let s = point(b.end.x - b.start.x, b.end.y - b.start.y);
    let denom = r.x * s.y - r.y * s.x;
    if denom.abs() < EPS {
        return None;
    }
    let qp = point(b.start.x - a.start.x, b.start.y - a.start.y);
    let t = (qp.x * s.y - qp.y * s.x) / denom;
    let u = (qp.x * r.y - qp.y * r.x) / denom;
    if !(-EPS..=1.0 + EPS).contains(&t) || !(-EPS..=1.0 + EPS).contains(&u) {
        return None;
    }
    Some((t, point(a.start.x + t * r.x, a.start.y + t * r.y)))
}

fn clip_against(kind: ShapeKind, segment: Segment, bounds: Bounds, docker: Point) -> Option<Point> {
    match kind {
        // Circle anchored at (origin + docker) with radius = docker.x; for
        // event shapes the docker sits at the center, so docker.x is the
        // horizontal half-extent.
        ShapeKind::Circle => {
            let center = point(bounds.x + docker.x, bounds.y + docker.y);
            line_circle_intersection(segment, center, docker.x)
        }
        ShapeKind::Rectangle => segment_polyline_intersection(segment, &rectangle_outline(bounds)),
        ShapeKind::Diamond => segment_polyline_intersection(segment, &diamond_outline(bounds)),
        ShapeKind::None => None,
    }
}

/// Derives the final waypoint list for one edge.
///
/// Needs at least two dockers; with fewer there is no usable travel segment
/// and the result is empty (callers skip such edges).
pub fn route_edge(
    dockers: &[Point],
    source_bounds: Bounds,
    target_bounds: Bounds,
    source_kind: ShapeKind,
    target_kind: ShapeKind,
) -> Vec<Point> {
    if dockers.len() < 2 {
        return Vec::new();
    }

    let first_docker = dockers[0];
    let last_docker = dockers[dockers.len() - 1];

    let start_raw = point(
        source_bounds.x + first_docker.x,
        source_bounds.y + first_docker.y,
    );
    let end_raw = point(
        target_bounds.x + last_docker.x,
        target_bounds.y + last_docker.y,
    );

    let first_segment = if dockers.len() > 2 {
        Segment::new(start_raw, dockers[1])
    } else {
        Segment::new(start_raw, end_raw)
    };

    let mut waypoints = Vec::with_capacity(dockers.len());
    waypoints
        .push(clip_against(source_kind, first_segment, source_bounds, first_docker).unwrap_or(start_raw));

    let last_segment = if dockers.len() > 2 {
        waypoints.extend_from_slice(&dockers[1..dockers.len() - 1]);
        Segment::new(dockers[dockers.len() - 2], end_raw)
    } else {
        first_segment
    };

    waypoints
        .push(clip_against(target_kind, last_segment, target_bounds, last_docker).unwrap_or(end_raw));

    waypoints
}
