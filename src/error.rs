// error.rs — error types for the viewer, loader, floor plan and store

use std::path::PathBuf;
use thiserror::Error;

/// Render-context failures. Fatal for the viewer instance that hit them.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("cannot create render surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter")]
    NoAdapter,
    #[error("cannot open graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported format")]
    NoSurfaceFormat,
    #[error("viewer is not running")]
    NotRunning,
    #[error("frame loop already started")]
    AlreadyRunning,
}

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("cannot open {reference}: {source}")]
    Open {
        reference: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {reference}: {source}")]
    Decode {
        reference: String,
        #[source]
        source: image::ImageError,
    },
    #[error("malformed data URL {reference}")]
    DataUrl { reference: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CanvasError {
    #[error("upload at least one 360 photo before adding a marker")]
    NoPhotos,
    #[error("no hotspot with id {0}")]
    UnknownHotspot(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed apartment data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that stops the application before its event loop starts.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Viewer(#[from] ViewerError),
}
