//! egui adapter: turns this frame's pointer input into canvas calls, then paints.

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;

use std::time::Instant;

use egui::{Pos2, Sense, Ui, Vec2};

use crate::floorplan::canvas::{CanvasEvent, FloorPlanCanvas, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::floorplan::input::{Button, InteractionState, Modifiers};
use crate::floorplan::render;
use crate::geometry::Point;

/// Surface position of a screen position, relative to the canvas' top-left corner.
pub fn to_canvas(origin: Pos2, pos: Pos2) -> Point {
    Point::new(f64::from(pos.x - origin.x), f64::from(pos.y - origin.y))
}

struct FrameInput {
    hover: Option<Pos2>,
    shift: bool,
    primary_pressed: bool,
    secondary_pressed: bool,
    released: bool,
}

/// Lay the canvas out in `ui`, feed it this frame's input and return what changed.
pub fn show(ui: &mut Ui, canvas: &mut FloorPlanCanvas) -> Vec<CanvasEvent> {
    let size = Vec2::new(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32);
    let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
    let rect = response.rect;
    let origin = rect.min;
    let mut events = Vec::new();

    if canvas.is_read_only() {
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.extend(canvas.click(to_canvas(origin, pos)));
            }
        }
    } else {
        let input = ui.input(|i| FrameInput {
            hover: i.pointer.hover_pos(),
            shift: i.modifiers.shift,
            primary_pressed: i.pointer.primary_pressed(),
            secondary_pressed: i.pointer.secondary_pressed(),
            released: i.pointer.any_released(),
        });
        let modifiers = Modifiers { shift: input.shift };
        let layer = ui.layer_id();
        let on_surface = |pos: &Pos2| {
            rect.contains(*pos) && ui.ctx().layer_id_at(*pos).map_or(true, |top| top == layer)
        };

        match input.hover.filter(on_surface) {
            Some(pos) => {
                let p = to_canvas(origin, pos);
                events.extend(canvas.pointer_move(p, modifiers));
                if input.primary_pressed {
                    events.extend(canvas.pointer_down(p, Button::Primary));
                }
                if input.secondary_pressed {
                    events.extend(canvas.pointer_down(p, Button::Secondary));
                }
            }
            // Leaving the surface, or passing under another layer, ends any drag.
            None if canvas.state() != &InteractionState::Idle => {
                events.extend(canvas.pointer_up());
            }
            None => {}
        }
        if input.released {
            events.extend(canvas.pointer_up());
        }
    }

    events.extend(canvas.poll_deferred(Instant::now()));
    if canvas.has_pending_selection() {
        ui.ctx().request_repaint();
    }

    render::paint(&painter, canvas, origin);
    events
}
