//! Floor-plan editor: a room polygon plus photo hotspots on a fixed 600×400 surface.
//!
//! The canvas never owns persisted state. Every mutation is reported as a
//! [`canvas::CanvasEvent`] carrying the full replacement collection, and the
//! owner decides whether to keep it.
//!
//! | Module | Role |
//! |--------|------|
//! | [`canvas`] | Pointer protocols, snapping, marker editing |
//! | [`input`] | Modes, buttons, modifiers, and the interaction state |
//! | [`hit`] | Vertex / edge / hotspot hit-testing |
//! | [`render`] | Immediate-mode redraw into an egui painter |
//! | [`widget`] | egui input adapter |

pub mod canvas;
pub mod hit;
pub mod input;
pub mod render;
pub mod widget;

pub use canvas::{CanvasEvent, FloorPlanCanvas};
pub use input::{Button, InteractionState, Mode, Modifiers};
