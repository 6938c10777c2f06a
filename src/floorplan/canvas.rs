//! The floor-plan editor core, free of any drawing surface.
//!
//! Handlers run to completion within one input event and return the
//! [`CanvasEvent`]s the owner must see. The canvas applies its own edits
//! locally as well, so consecutive events in one frame see each other's
//! results; [`FloorPlanCanvas::sync`] lets the owner overwrite that copy.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use std::time::{Duration, Instant};

use crate::error::CanvasError;
use crate::floorplan::hit::{self, Hit, HOTSPOT_CLICK_RADIUS, HOTSPOT_DRAG_RADIUS};
use crate::floorplan::input::{Button, InteractionState, Mode, Modifiers};
use crate::geometry::Point;
use crate::model::{Hotspot, HotspotId, Photo, PhotoId};

pub const CANVAS_WIDTH: f64 = 600.0;
pub const CANVAS_HEIGHT: f64 = 400.0;

/// Axis distance under which a dragged vertex snaps to another vertex.
pub const SNAP_DISTANCE: f64 = 15.0;

pub const DEFAULT_MARKER_POSITION: Point = Point::new(300.0, 200.0);
pub const DEFAULT_MARKER_LABEL: &str = "Unnamed Spot";

/// Lets the switch to Place mode settle before selection-dependent UI reacts.
pub const SELECTION_DELAY: Duration = Duration::from_millis(100);

/// Outbound notifications. Each carries a full replacement value.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    PointsChanged(Vec<Point>),
    HotspotsChanged(Vec<Hotspot>),
    HotspotSelected(Option<HotspotId>),
}

#[derive(Debug, Clone)]
struct PendingSelection {
    id: HotspotId,
    due: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct FloorPlanCanvas {
    points: Vec<Point>,
    hotspots: Vec<Hotspot>,
    photos: Vec<Photo>,
    mode: Mode,
    read_only: bool,
    active_hotspot: Option<HotspotId>,
    state: InteractionState,
    pending_selection: Option<PendingSelection>,
}

impl FloorPlanCanvas {
    #[must_use]
    pub fn new(read_only: bool) -> Self {
        Self {
            read_only,
            ..Self::default()
        }
    }

    // --- Inbound data ---

    /// Replace the canvas' view of the owner's data. Any in-progress gesture is dropped.
    pub fn sync(&mut self, points: Vec<Point>, hotspots: Vec<Hotspot>, photos: Vec<Photo>) {
        self.points = points;
        self.hotspots = hotspots;
        self.photos = photos;
        self.state = InteractionState::Idle;
    }

    pub fn set_active_hotspot(&mut self, id: Option<HotspotId>) {
        self.active_hotspot = id;
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        self.state = InteractionState::Idle;
    }

    /// Switch editing mode. Entering Draw clears the hotspot selection.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<CanvasEvent> {
        self.mode = mode;
        self.state = InteractionState::Idle;
        if mode == Mode::Draw {
            self.pending_selection = None;
            self.active_hotspot = None;
            return vec![CanvasEvent::HotspotSelected(None)];
        }
        Vec::new()
    }

    // --- Queries ---

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn active_hotspot(&self) -> Option<&Hotspot> {
        let id = self.active_hotspot.as_deref()?;
        self.hotspots.iter().find(|h| h.id == id)
    }

    pub fn active_hotspot_id(&self) -> Option<&str> {
        self.active_hotspot.as_deref()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    // --- Pointer protocol ---

    pub fn pointer_down(&mut self, p: Point, button: Button) -> Vec<CanvasEvent> {
        if self.read_only {
            return Vec::new();
        }
        match self.mode {
            Mode::Draw => self.draw_press(p, button),
            Mode::Place => self.place_press(p, button),
        }
    }

    fn draw_press(&mut self, p: Point, button: Button) -> Vec<CanvasEvent> {
        match (hit::hit_test(&self.points, &self.hotspots, p, Mode::Draw), button) {
            (Some(Hit::Vertex(i)), Button::Secondary) => {
                self.points.remove(i);
                self.state = InteractionState::Idle;
                vec![self.points_changed()]
            }
            (Some(Hit::Vertex(i)), Button::Primary) => {
                self.state = InteractionState::DraggingVertex(i);
                Vec::new()
            }
            (Some(Hit::Edge(edge)), Button::Primary) => {
                let index = edge.index + 1;
                self.points.insert(index, edge.at);
                self.state = InteractionState::DraggingVertex(index);
                vec![self.points_changed()]
            }
            (None, Button::Primary) => {
                self.points.push(p);
                vec![self.points_changed()]
            }
            _ => Vec::new(),
        }
    }

    fn place_press(&mut self, p: Point, button: Button) -> Vec<CanvasEvent> {
        let Some(Hit::Hotspot(i)) = hit::hit_test(&self.points, &self.hotspots, p, Mode::Place) else {
            return Vec::new();
        };
        match button {
            Button::Secondary => {
                let removed = self.hotspots.remove(i);
                self.state = InteractionState::Idle;
                self.removed_hotspot(&removed.id)
            }
            Button::Primary => {
                let id = self.hotspots[i].id.clone();
                self.state = InteractionState::DraggingHotspot(id.clone());
                self.active_hotspot = Some(id.clone());
                vec![CanvasEvent::HotspotSelected(Some(id))]
            }
        }
    }

    pub fn pointer_move(&mut self, p: Point, modifiers: Modifiers) -> Vec<CanvasEvent> {
        if self.read_only {
            return Vec::new();
        }
        match self.state.clone() {
            InteractionState::DraggingVertex(i) if i < self.points.len() => {
                let target = if modifiers.shift {
                    snap_vertex(&self.points, i, p)
                } else {
                    p
                };
                self.points[i] = target;
                vec![self.points_changed()]
            }
            InteractionState::DraggingHotspot(id) => {
                match self.hotspots.iter_mut().find(|h| h.id == id) {
                    Some(h) => h.position = p,
                    None => {
                        self.state = InteractionState::Idle;
                        return Vec::new();
                    }
                }
                vec![self.hotspots_changed()]
            }
            _ => {
                self.state = self.hover_state(p);
                Vec::new()
            }
        }
    }

    fn hover_state(&self, p: Point) -> InteractionState {
        match self.mode {
            Mode::Draw => {
                if let Some(i) = hit::vertex_at(&self.points, p) {
                    InteractionState::HoveringVertex(i)
                } else if let Some(edge) = hit::edge_at(&self.points, p) {
                    InteractionState::HoveringEdge {
                        index: edge.index,
                        at: edge.at,
                    }
                } else {
                    InteractionState::Idle
                }
            }
            Mode::Place => hit::hotspot_at(&self.hotspots, p, HOTSPOT_DRAG_RADIUS)
                .map_or(InteractionState::Idle, |i| {
                    InteractionState::HoveringHotspot(self.hotspots[i].id.clone())
                }),
        }
    }

    /// Ends any drag. Pointer-leave and lost capture route here too.
    pub fn pointer_up(&mut self) -> Vec<CanvasEvent> {
        self.state = InteractionState::Idle;
        Vec::new()
    }

    /// Read-only selection by click.
    pub fn click(&mut self, p: Point) -> Vec<CanvasEvent> {
        if !self.read_only {
            return Vec::new();
        }
        match hit::hotspot_at(&self.hotspots, p, HOTSPOT_CLICK_RADIUS) {
            Some(i) => {
                let id = self.hotspots[i].id.clone();
                self.active_hotspot = Some(id.clone());
                vec![CanvasEvent::HotspotSelected(Some(id))]
            }
            None => Vec::new(),
        }
    }

    // --- Marker actions ---

    /// Add a hotspot for the first photo, switch to Place, and select it after [`SELECTION_DELAY`].
    pub fn add_marker(&mut self, now: Instant) -> Result<Vec<CanvasEvent>, CanvasError> {
        let photo_id = self.photos.first().ok_or(CanvasError::NoPhotos)?.id.clone();
        let id = self.fresh_hotspot_id();

        self.mode = Mode::Place;
        self.state = InteractionState::Idle;
        self.hotspots.push(Hotspot {
            id: id.clone(),
            photo_id,
            position: DEFAULT_MARKER_POSITION,
            label: DEFAULT_MARKER_LABEL.to_string(),
        });
        log::debug!("marker {id} added");
        self.pending_selection = Some(PendingSelection {
            id,
            due: now + SELECTION_DELAY,
        });
        Ok(vec![self.hotspots_changed()])
    }

    /// Deliver a deferred selection once it is due.
    pub fn poll_deferred(&mut self, now: Instant) -> Vec<CanvasEvent> {
        match &self.pending_selection {
            Some(pending) if pending.due <= now => {
                let id = pending.id.clone();
                self.pending_selection = None;
                self.active_hotspot = Some(id.clone());
                vec![CanvasEvent::HotspotSelected(Some(id))]
            }
            _ => Vec::new(),
        }
    }

    pub fn has_pending_selection(&self) -> bool {
        self.pending_selection.is_some()
    }

    pub fn set_hotspot_label(&mut self, id: &str, label: String) -> Result<Vec<CanvasEvent>, CanvasError> {
        self.hotspot_mut(id)?.label = label;
        Ok(vec![self.hotspots_changed()])
    }

    pub fn set_hotspot_photo(&mut self, id: &str, photo_id: PhotoId) -> Result<Vec<CanvasEvent>, CanvasError> {
        self.hotspot_mut(id)?.photo_id = photo_id;
        Ok(vec![self.hotspots_changed()])
    }

    pub fn delete_hotspot(&mut self, id: &str) -> Result<Vec<CanvasEvent>, CanvasError> {
        let index = self
            .hotspots
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CanvasError::UnknownHotspot(id.to_string()))?;
        self.hotspots.remove(index);
        self.state = InteractionState::Idle;
        Ok(self.removed_hotspot(id))
    }

    /// Clear the plan: no points, no hotspots.
    pub fn reset(&mut self) -> Vec<CanvasEvent> {
        self.points.clear();
        self.hotspots.clear();
        self.state = InteractionState::Idle;
        self.pending_selection = None;
        self.active_hotspot = None;
        vec![
            self.points_changed(),
            self.hotspots_changed(),
            CanvasEvent::HotspotSelected(None),
        ]
    }

    // --- Helpers ---

    /// Drop every reference to a hotspot that is gone, including a selection still in flight.
    fn removed_hotspot(&mut self, id: &str) -> Vec<CanvasEvent> {
        if self.pending_selection.as_ref().is_some_and(|p| p.id == id) {
            self.pending_selection = None;
        }
        let mut events = vec![self.hotspots_changed()];
        if self.active_hotspot.as_deref() == Some(id) {
            self.active_hotspot = None;
            events.push(CanvasEvent::HotspotSelected(None));
        }
        events
    }

    fn hotspot_mut(&mut self, id: &str) -> Result<&mut Hotspot, CanvasError> {
        self.hotspots
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CanvasError::UnknownHotspot(id.to_string()))
    }

    fn fresh_hotspot_id(&self) -> HotspotId {
        loop {
            let id = generate_hotspot_id();
            if self.hotspots.iter().all(|h| h.id != id) {
                return id;
            }
        }
    }

    fn points_changed(&self) -> CanvasEvent {
        CanvasEvent::PointsChanged(self.points.clone())
    }

    fn hotspots_changed(&self) -> CanvasEvent {
        CanvasEvent::HotspotsChanged(self.hotspots.clone())
    }
}

/// `spot_` followed by nine lowercase hex digits.
pub fn generate_hotspot_id() -> HotspotId {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("spot_{}", &hex[..9])
}

/// Shift-drag target for vertex `index` at raw position `raw`.
///
/// Each axis snaps independently to any other vertex within [`SNAP_DISTANCE`].
/// With no candidate on either axis, movement locks to the dominant axis
/// relative to the previous vertex.
pub fn snap_vertex(points: &[Point], index: usize, raw: Point) -> Point {
    let mut snap_x = None;
    let mut snap_y = None;
    for (i, p) in points.iter().enumerate() {
        if i == index {
            continue;
        }
        if (raw.x - p.x).abs() < SNAP_DISTANCE {
            snap_x = Some(p.x);
        }
        if (raw.y - p.y).abs() < SNAP_DISTANCE {
            snap_y = Some(p.y);
        }
    }

    if snap_x.is_none() && snap_y.is_none() {
        let n = points.len();
        if n == 0 {
            return raw;
        }
        let prev = points[(index + n - 1) % n];
        return if (raw.x - prev.x).abs() > (raw.y - prev.y).abs() {
            Point::new(raw.x, prev.y)
        } else {
            Point::new(prev.x, raw.y)
        };
    }

    Point::new(snap_x.unwrap_or(raw.x), snap_y.unwrap_or(raw.y))
}
