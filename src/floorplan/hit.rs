//! Hit-testing against the polygon and the hotspot markers.
//!
//! All radii are strict: a point exactly on the threshold misses.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::floorplan::input::Mode;
use crate::geometry::{dist_to_segment, Point};
use crate::model::Hotspot;

pub const VERTEX_RADIUS: f64 = 15.0;
pub const EDGE_DISTANCE: f64 = 10.0;
/// Grab radius for dragging in Place mode.
pub const HOTSPOT_DRAG_RADIUS: f64 = 20.0;
/// Click radius on the read-only map; deliberately more forgiving than dragging.
pub const HOTSPOT_CLICK_RADIUS: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    /// Start vertex of the edge.
    pub index: usize,
    /// Nearest point on the edge.
    pub at: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Vertex(usize),
    Edge(EdgeHit),
    Hotspot(usize),
}

/// First vertex within [`VERTEX_RADIUS`] of `p`.
pub fn vertex_at(points: &[Point], p: Point) -> Option<usize> {
    points.iter().position(|v| v.distance(p) < VERTEX_RADIUS)
}

/// First edge, in point order, closer than [`EDGE_DISTANCE`] to `p`.
///
/// The closing edge (last → first) only exists once the polygon has three points.
pub fn edge_at(points: &[Point], p: Point) -> Option<EdgeHit> {
    let n = points.len();
    if n < 2 {
        return None;
    }
    (0..n).find_map(|i| {
        let next = (i + 1) % n;
        if next == 0 && n <= 2 {
            return None;
        }
        let proj = dist_to_segment(p, points[i], points[next]);
        (proj.dist < EDGE_DISTANCE).then_some(EdgeHit {
            index: i,
            at: proj.nearest,
        })
    })
}

/// First hotspot whose centre is within `radius` of `p`.
pub fn hotspot_at(hotspots: &[Hotspot], p: Point, radius: f64) -> Option<usize> {
    hotspots.iter().position(|h| h.position.distance(p) < radius)
}

/// What a press at `p` would act on in `mode`. Vertices win over edges.
pub fn hit_test(points: &[Point], hotspots: &[Hotspot], p: Point, mode: Mode) -> Option<Hit> {
    match mode {
        Mode::Draw => vertex_at(points, p)
            .map(Hit::Vertex)
            .or_else(|| edge_at(points, p).map(Hit::Edge)),
        Mode::Place => hotspot_at(hotspots, p, HOTSPOT_DRAG_RADIUS).map(Hit::Hotspot),
    }
}
