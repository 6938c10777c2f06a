// panorama.rs — orbit / zoom state and per-frame camera math for the 360 viewer

use crate::error::ViewerError;
use crate::geometry::{clamp_fov, clamp_latitude, spherical_to_cartesian};
use glam::Vec3;

#[cfg(test)]
#[path = "panorama_test.rs"]
mod panorama_test;

pub const SPHERE_RADIUS: f32 = 500.0;
pub const NEAR_PLANE: f32 = 1.0;
pub const FAR_PLANE: f32 = 1100.0;

/// Degrees of rotation per pixel of drag.
pub const DRAG_SPEED: f32 = 0.1;
/// Degrees of FOV per pixel of wheel delta.
pub const ZOOM_SPEED: f32 = 0.05;

pub const DEFAULT_FOV: f32 = 90.0;
pub const FOV_PRESETS: [f32; 3] = [60.0, 90.0, 120.0];

/// Where the camera looks, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitState {
    pub longitude: f32,
    pub latitude: f32,
}

impl OrbitState {
    /// Polar angle from +Y.
    pub fn phi(&self) -> f32 {
        (90.0 - self.latitude).to_radians()
    }

    pub fn theta(&self) -> f32 {
        self.longitude.to_radians()
    }

    pub fn target(&self) -> Vec3 {
        spherical_to_cartesian(SPHERE_RADIUS, self.phi(), self.theta())
    }
}

/// Pointer position and orbit captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub origin_x: f32,
    pub origin_y: f32,
    pub origin_orbit: OrbitState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    fov: f32,
    pub aspect: f32,
}

impl CameraState {
    pub fn new(fov: f32, aspect: f32) -> Self {
        Self {
            fov: clamp_fov(fov),
            aspect,
        }
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = clamp_fov(fov);
    }
}

/// Everything the backend needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub target: Vec3,
    pub fov: f32,
    pub aspect: f32,
}

/// Orbit controls: the grab-and-drag-the-world interaction plus zoom.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub orbit: OrbitState,
    pub camera: CameraState,
    drag: Option<DragState>,
    primary_touch: Option<u64>,
}

impl OrbitControls {
    pub fn new(fov: f32, aspect: f32) -> Self {
        Self {
            orbit: OrbitState::default(),
            camera: CameraState::new(fov, aspect),
            drag: None,
            primary_touch: None,
        }
    }

    pub fn is_interacting(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.is_interacting() {
            return;
        }
        self.drag = Some(DragState {
            origin_x: x,
            origin_y: y,
            origin_orbit: self.orbit,
        });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let Some(drag) = self.drag else {
            return;
        };
        self.orbit.longitude = (drag.origin_x - x) * DRAG_SPEED + drag.origin_orbit.longitude;
        self.orbit.latitude = (y - drag.origin_y) * DRAG_SPEED + drag.origin_orbit.latitude;
    }

    /// Also used when the pointer leaves the surface or capture is lost.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Touch contacts: the first finger down drives the orbit, the rest are ignored.
    pub fn touch_start(&mut self, id: u64, x: f32, y: f32) {
        if self.primary_touch.is_none() {
            self.primary_touch = Some(id);
            self.pointer_down(x, y);
        }
    }

    pub fn touch_move(&mut self, id: u64, x: f32, y: f32) {
        if self.primary_touch == Some(id) {
            self.pointer_move(x, y);
        }
    }

    pub fn touch_end(&mut self, id: u64) {
        if self.primary_touch == Some(id) {
            self.primary_touch = None;
            self.pointer_up();
        }
    }

    pub fn zoom(&mut self, delta_y: f32) {
        let fov = self.camera.fov() + delta_y * ZOOM_SPEED;
        self.camera.set_fov(fov);
    }

    /// Clamp latitude and compute the look-at target for this frame.
    pub fn frame(&mut self) -> CameraFrame {
        self.orbit.latitude = clamp_latitude(self.orbit.latitude);
        CameraFrame {
            target: self.orbit.target(),
            fov: self.camera.fov(),
            aspect: self.camera.aspect,
        }
    }
}

/// Handle to a running frame loop. Exactly one exists while the loop runs.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameHandle(u64);

/// Start/stop bookkeeping for the self-rescheduling render callback.
#[derive(Debug, Default)]
pub struct FrameLoop {
    active: Option<FrameHandle>,
    next_id: u64,
    frames: u64,
}

impl FrameLoop {
    pub fn start(&mut self) -> Result<(), ViewerError> {
        if self.active.is_some() {
            return Err(ViewerError::AlreadyRunning);
        }
        self.next_id += 1;
        self.active = Some(FrameHandle(self.next_id));
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), ViewerError> {
        self.active.take().map(|_| ()).ok_or(ViewerError::NotRunning)
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Count a frame; false once the loop has been cancelled.
    pub fn tick(&mut self) -> bool {
        if self.is_running() {
            self.frames += 1;
            true
        } else {
            false
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Correlates asynchronous texture loads with the request that issued them.
#[derive(Debug, Default)]
pub struct TextureRequests {
    latest: u64,
}

impl TextureRequests {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, token: u64) -> bool {
        token == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}
