use super::*;
use glam::Vec3;

#[test]
fn vertex_grid_size() {
    let m = build_sphere(500.0, WIDTH_SEGMENTS, HEIGHT_SEGMENTS);
    assert_eq!(m.vertices.len(), 61 * 41);
    // Pole rows contribute one triangle per segment, the rest two.
    assert_eq!(m.indices.len(), WIDTH_SEGMENTS * (HEIGHT_SEGMENTS * 2 - 2) * 3);
}

#[test]
fn every_vertex_sits_on_the_radius() {
    let m = build_sphere(500.0, 16, 8);
    for v in &m.vertices {
        let len = Vec3::from(v.position).length();
        assert!((len - 500.0).abs() < 1e-2, "{len}");
    }
}

#[test]
fn triangles_face_the_centre() {
    let m = build_sphere(500.0, 24, 12);
    for tri in m.indices.chunks(3) {
        let a = Vec3::from(m.vertices[tri[0] as usize].position);
        let b = Vec3::from(m.vertices[tri[1] as usize].position);
        let c = Vec3::from(m.vertices[tri[2] as usize].position);
        let normal = (b - a).cross(c - a);
        assert!(normal.length() > 0.0, "degenerate triangle {tri:?}");
        let centroid = (a + b + c) / 3.0;
        assert!(normal.dot(centroid) < 0.0, "outward-facing triangle {tri:?}");
    }
}

#[test]
fn uv_covers_the_unit_square() {
    let m = build_sphere(1.0, 8, 4);
    assert_eq!(m.vertices.first().unwrap().uv, [0.0, 0.0]);
    assert_eq!(m.vertices.last().unwrap().uv, [1.0, 1.0]);
}
