// viewer.rs — panorama viewer lifecycle: initialize, per-frame update, texture swap, teardown

use crate::error::{ImageLoadError, ViewerError};
use crate::loader::{LoadOutcome, LoadRequest};
use crate::model::ImageRef;
use crate::panorama::{CameraFrame, FrameLoop, OrbitControls, TextureRequests};
use glam::Vec3;
use image::RgbaImage;

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

/// The GPU side of the viewer. Owns camera, sphere mesh, material and texture.
pub trait SceneBackend {
    fn resize(&mut self, width: u32, height: u32);
    fn set_projection(&mut self, fov_deg: f32, aspect: f32);
    /// Orient the camera at the origin toward `target`.
    fn look_at(&mut self, target: Vec3);
    /// Bind `image` as the sphere texture, make the material opaque and free the previous texture.
    fn install_texture(&mut self, image: RgbaImage);
    /// Free every GPU resource and detach from the surface.
    fn release(self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Running,
    TornDown,
}

/// What a completed image load meant for the display.
#[derive(Debug)]
pub enum ViewerNotice {
    ImageInstalled { reference: ImageRef },
    ImageLoadFailed { reference: ImageRef, error: ImageLoadError },
}

pub struct PanoramaViewer<B: SceneBackend> {
    backend: Option<B>,
    lifecycle: Lifecycle,
    controls: OrbitControls,
    frame_loop: FrameLoop,
    requests: TextureRequests,
    /// Decoded before the backend existed; installed on initialize.
    early_image: Option<(ImageRef, RgbaImage)>,
    displayed: Option<ImageRef>,
}

impl<B: SceneBackend> PanoramaViewer<B> {
    pub fn new(fov: f32) -> Self {
        Self {
            backend: None,
            lifecycle: Lifecycle::Uninitialized,
            controls: OrbitControls::new(fov, 1.0),
            frame_loop: FrameLoop::default(),
            requests: TextureRequests::default(),
            early_image: None,
            displayed: None,
        }
    }

    /// Attach the backend and start the frame loop.
    pub fn initialize(&mut self, mut backend: B, width: u32, height: u32) -> Result<(), ViewerError> {
        if self.lifecycle != Lifecycle::Uninitialized {
            return Err(ViewerError::AlreadyRunning);
        }
        self.frame_loop.start()?;

        if width > 0 && height > 0 {
            self.controls.camera.aspect = width as f32 / height as f32;
        }
        backend.set_projection(self.controls.camera.fov(), self.controls.camera.aspect);

        if let Some((reference, image)) = self.early_image.take() {
            backend.install_texture(image);
            self.displayed = Some(reference);
        }

        self.backend = Some(backend);
        self.lifecycle = Lifecycle::Running;
        log::info!("panorama viewer running at {width}x{height}");
        Ok(())
    }

    /// Cancel the frame loop and release every backend resource.
    pub fn teardown(&mut self) -> Result<(), ViewerError> {
        if self.lifecycle != Lifecycle::Running {
            return Err(ViewerError::NotRunning);
        }
        self.frame_loop.stop()?;
        if let Some(backend) = self.backend.take() {
            backend.release();
        }
        self.lifecycle = Lifecycle::TornDown;
        log::info!("panorama viewer torn down after {} frames", self.frame_loop.frames());
        Ok(())
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn fov(&self) -> f32 {
        self.controls.camera.fov()
    }

    pub fn displayed(&self) -> Option<&ImageRef> {
        self.displayed.as_ref()
    }

    /// Advance one frame. `None` once the loop is not running.
    pub fn frame(&mut self) -> Option<CameraFrame> {
        if !self.frame_loop.tick() {
            return None;
        }
        let frame = self.controls.frame();
        if let Some(backend) = self.backend.as_mut() {
            backend.look_at(frame.target);
        }
        Some(frame)
    }

    // --- Orbit / zoom ---

    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.controls.pointer_down(x, y);
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.controls.pointer_move(x, y);
    }

    pub fn on_pointer_up(&mut self) {
        self.controls.pointer_up();
    }

    pub fn on_touch_start(&mut self, id: u64, x: f32, y: f32) {
        self.controls.touch_start(id, x, y);
    }

    pub fn on_touch_move(&mut self, id: u64, x: f32, y: f32) {
        self.controls.touch_move(id, x, y);
    }

    pub fn on_touch_end(&mut self, id: u64) {
        self.controls.touch_end(id);
    }

    pub fn on_zoom(&mut self, delta_y: f32) {
        self.controls.zoom(delta_y);
        self.apply_projection();
    }

    /// Preset FOV from outside the zoom gesture.
    pub fn set_fov(&mut self, fov: f32) {
        self.controls.camera.set_fov(fov);
        self.apply_projection();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.controls.camera.aspect = width as f32 / height as f32;
        if let Some(backend) = self.backend.as_mut() {
            backend.resize(width, height);
        }
        self.apply_projection();
    }

    fn apply_projection(&mut self) {
        let (fov, aspect) = (self.controls.camera.fov(), self.controls.camera.aspect);
        if let Some(backend) = self.backend.as_mut() {
            backend.set_projection(fov, aspect);
        }
    }

    // --- Texture swap ---

    /// Begin swapping to `reference`. The returned request supersedes all earlier ones.
    pub fn set_image(&mut self, reference: ImageRef) -> LoadRequest {
        let token = self.requests.issue();
        log::debug!("texture request {token}: {reference}");
        LoadRequest { token, reference }
    }

    /// Apply a finished load unless a newer request has been issued since.
    pub fn complete_image(&mut self, outcome: LoadOutcome) -> Option<ViewerNotice> {
        let LoadOutcome {
            token,
            reference,
            result,
        } = outcome;

        if !self.requests.is_current(token) {
            log::debug!(
                "discarding stale texture {token} ({reference}); latest is {}",
                self.requests.latest()
            );
            return None;
        }

        match result {
            Ok(image) => {
                match (self.lifecycle, self.backend.as_mut()) {
                    (Lifecycle::Running, Some(backend)) => {
                        backend.install_texture(image);
                        self.displayed = Some(reference.clone());
                    }
                    (Lifecycle::Uninitialized, _) => {
                        self.early_image = Some((reference.clone(), image));
                    }
                    _ => {
                        log::debug!("viewer gone; dropping texture {reference}");
                        return None;
                    }
                }
                log::info!("panorama texture installed: {reference}");
                Some(ViewerNotice::ImageInstalled { reference })
            }
            Err(error) => {
                log::warn!("{error}");
                Some(ViewerNotice::ImageLoadFailed { reference, error })
            }
        }
    }
}
