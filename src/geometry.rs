// geometry.rs — pure 2D / spherical helpers shared by the viewer and the floor plan

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

pub const MIN_FOV: f32 = 10.0;
pub const MAX_FOV: f32 = 130.0;
pub const MAX_LATITUDE: f32 = 85.0;

/// Canvas-space point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Nearest point on a segment and the distance to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    pub dist: f64,
    pub nearest: Point,
}

/// Project `p` onto the segment `a..b`, clamped to the segment's ends.
pub fn dist_to_segment(p: Point, a: Point, b: Point) -> SegmentProjection {
    let l2 = (a.x - b.x).powi(2) + (a.y - b.y).powi(2);
    if l2 == 0.0 {
        return SegmentProjection {
            dist: p.distance(a),
            nearest: a,
        };
    }
    let t = (((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / l2).clamp(0.0, 1.0);
    let nearest = Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
    SegmentProjection {
        dist: p.distance(nearest),
        nearest,
    }
}

/// Point on a sphere of `radius` for polar angle `phi` (from +Y) and azimuth `theta` (from +X toward +Z).
pub fn spherical_to_cartesian(radius: f32, phi: f32, theta: f32) -> Vec3 {
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

pub fn clamp_fov(fov: f32) -> f32 {
    fov.clamp(MIN_FOV, MAX_FOV)
}

pub fn clamp_latitude(lat: f32) -> f32 {
    lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
}

/// Twice the signed area; positive for counter-clockwise in a y-up frame.
fn signed_area2(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Ear-clipping triangulation of a simple polygon.
///
/// Returns index triples into `points`. Self-intersecting input degrades to a
/// fan over whatever is left once no ear can be found, so the fill is never
/// dropped entirely.
pub fn triangulate(points: &[Point]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    if signed_area2(points) < 0.0 {
        remaining.reverse();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    while remaining.len() > 3 {
        let m = remaining.len();
        let ear = (0..m).find(|&i| {
            let prev = points[remaining[(i + m - 1) % m]];
            let cur = points[remaining[i]];
            let next = points[remaining[(i + 1) % m]];
            if cross(prev, cur, next) <= 0.0 {
                return false;
            }
            remaining.iter().all(|&k| {
                let q = points[k];
                q == prev || q == cur || q == next || !in_triangle(q, prev, cur, next)
            })
        });

        match ear {
            Some(i) => {
                let prev = remaining[(i + m - 1) % m];
                let next = remaining[(i + 1) % m];
                triangles.push([prev as u32, remaining[i] as u32, next as u32]);
                remaining.remove(i);
            }
            None => break,
        }
    }

    // Whatever is left (a final triangle, or a degenerate remainder) is fanned.
    for i in 1..remaining.len().saturating_sub(1) {
        triangles.push([
            remaining[0] as u32,
            remaining[i] as u32,
            remaining[i + 1] as u32,
        ]);
    }
    triangles
}
