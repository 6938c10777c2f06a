//! Immediate-mode redraw of the floor plan into an egui painter.
//!
//! Everything except the label chips is built as plain [`Shape`]s so the
//! layout can be checked without a font atlas.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use egui::epaint::{CircleShape, Mesh};
use egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::floorplan::canvas::{FloorPlanCanvas, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::floorplan::input::{InteractionState, Mode};
use crate::geometry::{triangulate, Point};
use crate::model::Hotspot;

pub const GRID_SPACING: f32 = 25.0;

const GRID: Color32 = Color32::from_rgb(0xf1, 0xf5, 0xf9);
const OUTLINE: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
const VERTEX: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
const VERTEX_DRAGGED: Color32 = Color32::from_rgb(0x1d, 0x4e, 0xd8);
const PIN_ACTIVE: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
const PIN: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
const LABEL_TEXT: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);

fn fill() -> Color32 {
    Color32::from_rgba_unmultiplied(37, 99, 235, 20)
}

fn edge_marker() -> Color32 {
    Color32::from_rgba_unmultiplied(37, 99, 235, 128)
}

fn pin_shadow() -> Color32 {
    Color32::from_rgba_unmultiplied(0, 0, 0, 51)
}

fn label_background() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 242)
}

pub const OUTLINE_WIDTH: f32 = 4.0;
pub const VERTEX_RADIUS: f32 = 6.0;
pub const VERTEX_RADIUS_EMPHASIZED: f32 = 9.0;
pub const EDGE_MARKER_RADIUS: f32 = 5.0;
pub const PIN_RADIUS: f32 = 15.0;
pub const PIN_RADIUS_EMPHASIZED: f32 = 18.0;
/// Vertical offset from a pin's centre to its label chip's centre.
pub const LABEL_OFFSET: f32 = 35.0;
const LABEL_PADDING: f32 = 6.0;
const LABEL_HEIGHT: f32 = 20.0;
const LABEL_FONT_SIZE: f32 = 12.0;

fn to_screen(origin: Pos2, p: Point) -> Pos2 {
    origin + Vec2::new(p.x as f32, p.y as f32)
}

/// Grid lines every [`GRID_SPACING`] across the whole surface, borders included.
pub fn grid_shapes(origin: Pos2) -> Vec<Shape> {
    let (w, h) = (CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32);
    let stroke = Stroke::new(1.0, GRID);
    let columns = (w / GRID_SPACING) as usize;
    let rows = (h / GRID_SPACING) as usize;

    let vertical = (0..=columns).map(|i| {
        let x = i as f32 * GRID_SPACING;
        Shape::line_segment([origin + Vec2::new(x, 0.0), origin + Vec2::new(x, h)], stroke)
    });
    let horizontal = (0..=rows).map(|i| {
        let y = i as f32 * GRID_SPACING;
        Shape::line_segment([origin + Vec2::new(0.0, y), origin + Vec2::new(w, y)], stroke)
    });
    vertical.chain(horizontal).collect()
}

/// Room fill, outline, vertex handles and the edge-insertion marker.
pub fn polygon_shapes(canvas: &FloorPlanCanvas, origin: Pos2) -> Vec<Shape> {
    let points = canvas.points();
    let mut shapes = Vec::new();
    if points.is_empty() {
        return shapes;
    }
    let screen: Vec<Pos2> = points.iter().map(|p| to_screen(origin, *p)).collect();

    let triangles = triangulate(points);
    if !triangles.is_empty() {
        let mut mesh = Mesh::default();
        for pos in &screen {
            mesh.colored_vertex(*pos, fill());
        }
        for [a, b, c] in triangles {
            mesh.add_triangle(a, b, c);
        }
        shapes.push(Shape::mesh(mesh));
    }

    let outline = Stroke::new(OUTLINE_WIDTH, OUTLINE);
    match screen.len() {
        1 => {}
        2 => shapes.push(Shape::line(screen.clone(), outline)),
        _ => shapes.push(Shape::closed_line(screen.clone(), outline)),
    }

    if canvas.is_read_only() {
        return shapes;
    }

    let state = canvas.state();
    let emphasized = state.emphasized_vertex();
    let held = if state.is_dragging() {
        VERTEX_DRAGGED
    } else {
        OUTLINE
    };
    for (i, pos) in screen.iter().enumerate() {
        let (radius, color) = if emphasized == Some(i) {
            (VERTEX_RADIUS_EMPHASIZED, held)
        } else {
            (VERTEX_RADIUS, VERTEX)
        };
        shapes.push(Shape::Circle(CircleShape {
            center: *pos,
            radius,
            fill: color,
            stroke: Stroke::new(2.0, Color32::WHITE),
        }));
    }

    if let (Mode::Draw, InteractionState::HoveringEdge { at, .. }) = (canvas.mode(), state) {
        shapes.push(Shape::Circle(CircleShape {
            center: to_screen(origin, *at),
            radius: EDGE_MARKER_RADIUS,
            fill: edge_marker(),
            stroke: Stroke::new(1.5, Color32::WHITE),
        }));
    }

    shapes
}

/// Location-pin glyph for one hotspot: shadow, body, notch, dot.
pub fn pin_shapes(center: Pos2, active: bool, emphasized: bool) -> Vec<Shape> {
    let radius = if emphasized {
        PIN_RADIUS_EMPHASIZED
    } else {
        PIN_RADIUS
    };
    let body = if active { PIN_ACTIVE } else { PIN };

    vec![
        Shape::circle_filled(center + Vec2::new(0.0, 2.0), radius, pin_shadow()),
        Shape::Circle(CircleShape {
            center,
            radius,
            fill: body,
            stroke: Stroke::new(3.0, Color32::WHITE),
        }),
        Shape::rect_filled(
            Rect::from_min_size(center + Vec2::new(-5.0, -3.0), Vec2::new(10.0, 7.0)),
            1.0,
            Color32::WHITE,
        ),
        Shape::circle_filled(center, 2.0, body),
    ]
}

/// Pins for every hotspot, in collection order so later ones draw on top.
pub fn hotspot_shapes(canvas: &FloorPlanCanvas, origin: Pos2) -> Vec<Shape> {
    let active = canvas.active_hotspot_id();
    let emphasized = if canvas.is_read_only() {
        None
    } else {
        canvas.state().emphasized_hotspot()
    };
    canvas
        .hotspots()
        .iter()
        .flat_map(|h| {
            pin_shapes(
                to_screen(origin, h.position),
                active == Some(h.id.as_str()),
                emphasized == Some(h.id.as_str()),
            )
        })
        .collect()
}

/// Chip under a pin, wide enough for `text_width`.
pub fn label_chip_rect(pin_center: Pos2, text_width: f32) -> Rect {
    Rect::from_center_size(
        pin_center + Vec2::new(0.0, LABEL_OFFSET),
        Vec2::new(text_width + 2.0 * LABEL_PADDING, LABEL_HEIGHT),
    )
}

fn paint_label(painter: &Painter, origin: Pos2, hotspot: &Hotspot) {
    let galley = painter.layout_no_wrap(
        hotspot.label.clone(),
        FontId::proportional(LABEL_FONT_SIZE),
        LABEL_TEXT,
    );
    let chip = label_chip_rect(to_screen(origin, hotspot.position), galley.size().x);
    painter.rect_filled(chip, 4.0, label_background());
    let text_pos = chip.center() - galley.size() / 2.0;
    painter.galley(text_pos, galley);
}

/// Full redraw with the surface's top-left corner at `origin`.
pub fn paint(painter: &Painter, canvas: &FloorPlanCanvas, origin: Pos2) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32)),
        0.0,
        Color32::WHITE,
    );
    painter.extend(grid_shapes(origin));
    painter.extend(polygon_shapes(canvas, origin));
    painter.extend(hotspot_shapes(canvas, origin));
    for hotspot in canvas.hotspots() {
        paint_label(painter, origin, hotspot);
    }
}
