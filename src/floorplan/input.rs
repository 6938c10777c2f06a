//! Input model: editing modes, buttons, modifiers, and the interaction state.
//!
//! `InteractionState` is the single source of truth for what the pointer is
//! doing between events. Exactly one variant is active; only the pointer
//! handlers in `canvas` move between them.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;
use crate::model::HotspotId;

/// Which collection the pointer edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Edit the room polygon.
    #[default]
    Draw,
    /// Move, select and delete hotspots.
    Place,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift enables vertex snapping.
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// What the pointer is currently over or holding.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    HoveringVertex(usize),
    /// Over edge `index → index+1`, `at` being the nearest point on it.
    HoveringEdge {
        index: usize,
        at: Point,
    },
    DraggingVertex(usize),
    DraggingHotspot(HotspotId),
    HoveringHotspot(HotspotId),
}

impl InteractionState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingVertex(_) | Self::DraggingHotspot(_))
    }

    /// Vertex that should render enlarged.
    pub fn emphasized_vertex(&self) -> Option<usize> {
        match self {
            Self::HoveringVertex(i) | Self::DraggingVertex(i) => Some(*i),
            _ => None,
        }
    }

    /// Hotspot that should render enlarged.
    pub fn emphasized_hotspot(&self) -> Option<&str> {
        match self {
            Self::HoveringHotspot(id) | Self::DraggingHotspot(id) => Some(id),
            _ => None,
        }
    }
}
