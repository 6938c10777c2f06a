// main.rs — window, event loop, and the wiring between tour, floor plan and viewer

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // no console window in release builds

mod config;
mod error;
mod floorplan;
mod fonts;
mod geometry;
mod i18n;
mod loader;
mod mesh;
mod model;
mod panorama;
mod renderer;
mod store;
mod tour;
mod ui;
mod viewer;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use config::Config;
use error::StartupError;
use floorplan::FloorPlanCanvas;
use loader::ImageLoader;
use model::ImageRef;
use renderer::Renderer;
use store::ApartmentStore;
use tour::{Audience, TourController};
use ui::{StatusInfo, UiAction, UiState};
use viewer::{Lifecycle, PanoramaViewer, ViewerNotice};

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

/// One wheel "line" in pixels, matching what browsers report.
const PIXELS_PER_LINE: f32 = 100.0;

/// Window position in logical pixels, so orbit speed does not depend on display density.
fn logical_point(position: PhysicalPosition<f64>, scale_factor: f64) -> (f32, f32) {
    let logical = position.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    i18n::init(config.lang.clone());

    if let Err(err) = run(config) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), StartupError> {
    let event_loop = EventLoop::new();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(i18n::tr("app.title"))
            .with_inner_size(LogicalSize::new(1280, 800))
            .build(&event_loop)?,
    );

    let mut app = App::new(&config, window.clone());

    let renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let size = window.inner_size();
    app.viewer.initialize(renderer, size.width, size.height)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        app.drain_loads();

        match event {
            Event::WindowEvent { event, window_id } if window_id == app.window.id() => {
                // A release always ends the orbit drag, even over a panel.
                if let WindowEvent::MouseInput {
                    state: ElementState::Released,
                    button: MouseButton::Left,
                    ..
                } = event
                {
                    app.viewer.on_pointer_up();
                }

                // Let egui see the event first
                if let Some(renderer) = app.viewer.backend_mut() {
                    let response = renderer.egui_state.on_event(&renderer.egui_ctx, &event);
                    if response.consumed {
                        return;
                    }
                }

                if app.handle_window_event(event) {
                    app.shutdown();
                    *control_flow = ControlFlow::Exit;
                }
            }

            Event::RedrawRequested(window_id) if window_id == app.window.id() => {
                if app.redraw() {
                    app.shutdown();
                    *control_flow = ControlFlow::Exit;
                }
            }

            Event::MainEventsCleared => {
                if app.viewer.lifecycle() == Lifecycle::Running {
                    app.window.request_redraw();
                }
            }

            _ => {}
        }
    })
}

struct App {
    window: Arc<Window>,
    viewer: PanoramaViewer<Renderer>,
    loader: ImageLoader,
    store: ApartmentStore,
    tour: TourController,
    canvas: FloorPlanCanvas,
    ui_state: UiState,
    cursor: Option<PhysicalPosition<f64>>,
}

impl App {
    fn new(config: &Config, window: Arc<Window>) -> Self {
        let store = ApartmentStore::new(config.store.clone());
        let audience = if config.admin {
            Audience::Admin
        } else {
            Audience::Customer
        };
        let tour = TourController::new(store.load(), audience);

        let mut app = Self {
            window,
            viewer: PanoramaViewer::new(config.fov()),
            loader: ImageLoader::new(config.media_dir()),
            store,
            tour,
            canvas: FloorPlanCanvas::new(!config.admin),
            ui_state: UiState::new(config.lang.clone()),
            cursor: None,
        };

        let requested = config.apartment.as_deref().filter(|id| {
            let known = app.store.find(id).is_some();
            if !known {
                log::warn!("apartment {id} is not in {}; opening the first one", config.store.display());
            }
            known
        });
        let first = requested
            .map(str::to_string)
            .or_else(|| app.tour.apartments().first().map(|a| a.id.clone()));
        if let Some(id) = first {
            let image = app.tour.open_apartment(&id);
            app.sync_canvas();
            // Decoding starts before the render context exists.
            app.show(image);
        }
        app
    }

    // --- Viewer plumbing ---

    fn show(&mut self, image: Option<ImageRef>) {
        if let Some(reference) = image {
            self.ui_state.load_error = None;
            let request = self.viewer.set_image(reference);
            self.loader.request(request);
        }
    }

    fn drain_loads(&mut self) {
        while let Some(outcome) = self.loader.poll() {
            if let Some(ViewerNotice::ImageLoadFailed { reference, .. }) = self.viewer.complete_image(outcome) {
                self.ui_state.load_error = Some(i18n::tr_with(
                    "status.load_failed",
                    &[("reference", reference.to_string())],
                ));
            }
        }
    }

    fn shutdown(&mut self) {
        if self.viewer.lifecycle() == Lifecycle::Running {
            if let Err(err) = self.viewer.teardown() {
                log::warn!("{err}");
            }
        }
    }

    // --- Floor plan plumbing ---

    /// Push the active apartment into the canvas, dropping any gesture in progress.
    fn sync_canvas(&mut self) {
        match self.tour.apartment() {
            Some(apartment) => self.canvas.sync(
                apartment.floor_plan_points.clone(),
                apartment.hotspots.clone(),
                apartment.photos.clone(),
            ),
            None => self.canvas.sync(Vec::new(), Vec::new(), Vec::new()),
        }
        self.canvas
            .set_active_hotspot(self.tour.active_hotspot_id().map(str::to_string));
    }

    fn save(&self) {
        if let Err(err) = self.store.save(self.tour.apartments()) {
            log::error!("{err}");
        }
    }

    // --- Events ---

    /// Returns true when the application should exit.
    fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => return true,

            WindowEvent::Resized(size) => self.viewer.resize(size.width, size.height),
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                self.viewer.resize(new_inner_size.width, new_inner_size.height);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
                let (x, y) = logical_point(position, self.window.scale_factor());
                self.viewer.on_pointer_move(x, y);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.viewer.on_pointer_up();
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(pos) = self.cursor {
                    let (x, y) = logical_point(pos, self.window.scale_factor());
                    self.viewer.on_pointer_down(x, y);
                }
            }

            WindowEvent::Touch(Touch {
                phase, location, id, ..
            }) => {
                let (x, y) = logical_point(location, self.window.scale_factor());
                match phase {
                    TouchPhase::Started => self.viewer.on_touch_start(id, x, y),
                    TouchPhase::Moved => self.viewer.on_touch_move(id, x, y),
                    TouchPhase::Ended | TouchPhase::Cancelled => self.viewer.on_touch_end(id),
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Positive means scrolling toward the user, which zooms out.
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                self.viewer.on_zoom(delta_y);
            }

            WindowEvent::DroppedFile(path) if self.tour.is_admin() => self.add_panorama(path),

            _ => {}
        }
        false
    }

    fn add_panorama(&mut self, path: PathBuf) {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| i18n::tr("photo.untitled"));
        let image = self.tour.add_photo(ImageRef::new(path.display().to_string()), name);
        self.sync_canvas();
        self.show(image);
    }

    /// Draw one frame. Returns true when the application should exit.
    fn redraw(&mut self) -> bool {
        if self.viewer.frame().is_none() {
            return false;
        }

        let controls = self.viewer.controls();
        let status = StatusInfo {
            fov: self.viewer.fov(),
            longitude: controls.orbit.longitude,
            latitude: controls.orbit.latitude,
            loading: self.loader.is_loading(),
            showing: self.viewer.displayed().map(ToString::to_string),
        };

        let mut actions = Vec::new();
        let Some(renderer) = self.viewer.backend_mut() else {
            return false;
        };
        let tour = &self.tour;
        let canvas = &mut self.canvas;
        let ui_state = &mut self.ui_state;
        let result = renderer.render_with_ui(&self.window, |ctx| {
            actions = ui::draw_ui(ctx, tour, canvas, ui_state, status);
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                return true;
            }
            Err(e) => log::warn!("render error: {e:?}"),
        }

        let mut exit = false;
        for action in actions {
            exit |= self.apply(action);
        }

        if !self.canvas.state().is_dragging() && self.tour.take_dirty() {
            self.save();
        }
        exit
    }

    /// Returns true when the application should exit.
    fn apply(&mut self, action: UiAction) -> bool {
        match action {
            UiAction::Canvas(event) => {
                let image = self.tour.apply(&event);
                self.show(image);
            }
            UiAction::OpenApartment(id) => {
                let image = self.tour.open_apartment(&id);
                self.sync_canvas();
                self.show(image);
            }
            UiAction::SelectPhoto(id) => {
                let image = self.tour.select_photo(&id);
                self.canvas
                    .set_active_hotspot(self.tour.active_hotspot_id().map(str::to_string));
                self.show(image);
            }
            UiAction::AddPanorama(path) => self.add_panorama(path),
            UiAction::SetFov(fov) => self.viewer.set_fov(fov),
            UiAction::SetLighting(lighting) => {
                let image = self.tour.set_lighting(lighting);
                self.show(image);
            }
            UiAction::SetFurnishing(furnishing) => {
                let image = self.tour.set_furnishing(furnishing);
                self.show(image);
            }
            UiAction::SetAudience(audience) => {
                self.tour.set_audience(audience);
                self.canvas.set_read_only(audience == Audience::Customer);
            }
            UiAction::ChangeLanguage(lang) => {
                i18n::init(lang.clone());
                self.ui_state.lang = lang;
                self.window.set_title(&i18n::tr("app.title"));
            }
            UiAction::Save => self.save(),
            UiAction::Exit => return true,
        }
        false
    }
}
