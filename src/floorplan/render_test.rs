use super::*;
use crate::floorplan::input::{Button, Modifiers};
use crate::model::Hotspot;

fn origin() -> Pos2 {
    Pos2::new(10.0, 20.0)
}

fn canvas_with(points: Vec<Point>, read_only: bool) -> FloorPlanCanvas {
    let mut c = FloorPlanCanvas::new(read_only);
    c.sync(points, Vec::new(), Vec::new());
    c
}

fn square() -> Vec<Point> {
    vec![
        Point::new(50.0, 50.0),
        Point::new(350.0, 50.0),
        Point::new(350.0, 250.0),
        Point::new(50.0, 250.0),
    ]
}

fn circles(shapes: &[Shape]) -> Vec<&CircleShape> {
    shapes
        .iter()
        .filter_map(|s| match s {
            Shape::Circle(c) => Some(c),
            _ => None,
        })
        .collect()
}

fn paths(shapes: &[Shape]) -> Vec<&egui::epaint::PathShape> {
    shapes
        .iter()
        .filter_map(|s| match s {
            Shape::Path(p) => Some(p),
            _ => None,
        })
        .collect()
}

fn meshes(shapes: &[Shape]) -> usize {
    shapes.iter().filter(|s| matches!(s, Shape::Mesh(_))).count()
}

// =============================================================
// Grid
// =============================================================

#[test]
fn grid_covers_surface_every_25px() {
    let shapes = grid_shapes(origin());
    // 600/25 + 1 columns, 400/25 + 1 rows.
    assert_eq!(shapes.len(), 25 + 17);
    match &shapes[1] {
        Shape::LineSegment { points, .. } => {
            assert_eq!(points[0], Pos2::new(35.0, 20.0));
            assert_eq!(points[1], Pos2::new(35.0, 420.0));
        }
        other => panic!("expected a line segment, got {other:?}"),
    }
}

// =============================================================
// Polygon
// =============================================================

#[test]
fn empty_polygon_draws_nothing() {
    assert!(polygon_shapes(&canvas_with(Vec::new(), false), origin()).is_empty());
}

#[test]
fn single_point_draws_only_its_handle() {
    let shapes = polygon_shapes(&canvas_with(vec![Point::new(5.0, 5.0)], false), origin());
    assert_eq!(meshes(&shapes), 0);
    assert!(paths(&shapes).is_empty());
    assert_eq!(circles(&shapes).len(), 1);
}

#[test]
fn two_points_draw_an_open_outline() {
    let c = canvas_with(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)], false);
    let shapes = polygon_shapes(&c, origin());
    assert_eq!(meshes(&shapes), 0);
    let outlines = paths(&shapes);
    assert_eq!(outlines.len(), 1);
    assert!(!outlines[0].closed);
}

#[test]
fn closed_room_is_filled_and_outlined() {
    let shapes = polygon_shapes(&canvas_with(square(), false), origin());
    assert_eq!(meshes(&shapes), 1);
    let outlines = paths(&shapes);
    assert_eq!(outlines.len(), 1);
    assert!(outlines[0].closed);
    assert_eq!(outlines[0].stroke.width, OUTLINE_WIDTH);
    assert_eq!(outlines[0].points[0], Pos2::new(60.0, 70.0));

    match shapes.iter().find(|s| matches!(s, Shape::Mesh(_))) {
        Some(Shape::Mesh(mesh)) => assert_eq!(mesh.indices.len(), 2 * 3),
        _ => unreachable!(),
    }
}

#[test]
fn hovered_and_dragged_vertices_grow() {
    let mut c = canvas_with(square(), false);
    c.pointer_move(Point::new(350.0, 52.0), Modifiers::default());
    let radii: Vec<f32> = circles(&polygon_shapes(&c, origin())).iter().map(|s| s.radius).collect();
    assert_eq!(radii, vec![6.0, 9.0, 6.0, 6.0]);

    c.pointer_down(Point::new(50.0, 250.0), Button::Primary);
    let shapes = polygon_shapes(&c, origin());
    let handles = circles(&shapes);
    assert_eq!(handles[3].radius, VERTEX_RADIUS_EMPHASIZED);
    assert_eq!(handles[3].fill, VERTEX_DRAGGED);
}

#[test]
fn edge_marker_follows_hover() {
    let mut c = canvas_with(square(), false);
    c.pointer_move(Point::new(200.0, 56.0), Modifiers::default());
    let shapes = polygon_shapes(&c, origin());
    let marker = circles(&shapes)
        .into_iter()
        .find(|s| s.radius == EDGE_MARKER_RADIUS)
        .map(|s| s.center);
    assert_eq!(marker, Some(Pos2::new(210.0, 70.0)));
}

#[test]
fn read_only_hides_vertex_handles() {
    let shapes = polygon_shapes(&canvas_with(square(), true), origin());
    assert!(circles(&shapes).is_empty());
    assert_eq!(paths(&shapes).len(), 1);
}

// =============================================================
// Hotspots
// =============================================================

fn hotspot(id: &str, x: f64, y: f64) -> Hotspot {
    Hotspot {
        id: id.into(),
        photo_id: "P1".into(),
        position: Point::new(x, y),
        label: "Hall".into(),
    }
}

#[test]
fn pin_uses_accent_for_active_only() {
    let mut c = FloorPlanCanvas::new(false);
    c.sync(Vec::new(), vec![hotspot("a", 100.0, 100.0), hotspot("b", 300.0, 100.0)], Vec::new());
    c.set_active_hotspot(Some("b".into()));

    let shapes = hotspot_shapes(&c, origin());
    let bodies: Vec<&CircleShape> = circles(&shapes)
        .into_iter()
        .filter(|s| s.stroke.width == 3.0)
        .collect();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0].fill, PIN);
    assert_eq!(bodies[1].fill, PIN_ACTIVE);
    assert_eq!(bodies[1].center, Pos2::new(310.0, 120.0));
}

#[test]
fn hovered_pin_grows() {
    let mut c = FloorPlanCanvas::new(false);
    c.sync(Vec::new(), vec![hotspot("a", 100.0, 100.0)], Vec::new());
    c.set_mode(Mode::Place);
    c.pointer_move(Point::new(105.0, 100.0), Modifiers::default());

    let shapes = pin_shapes(Pos2::ZERO, false, true);
    assert_eq!(shapes.len(), 4);
    let shapes = hotspot_shapes(&c, origin());
    assert!(circles(&shapes).iter().any(|s| s.radius == PIN_RADIUS_EMPHASIZED));
}

#[test]
fn label_chip_sits_below_pin() {
    let chip = label_chip_rect(Pos2::new(100.0, 100.0), 40.0);
    assert_eq!(chip.center(), Pos2::new(100.0, 135.0));
    assert_eq!(chip.width(), 52.0);
}
