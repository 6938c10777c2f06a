// config.rs — command line and environment settings

use std::path::PathBuf;

use clap::Parser;

use crate::geometry::clamp_fov;
use crate::panorama::DEFAULT_FOV;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

#[derive(Parser, Debug, Clone)]
#[command(name = "tour_studio", about = "360° apartment tours with an editable floor plan")]
pub struct Config {
    /// UI language code, e.g. `en` or `zh-Hans`.
    #[arg(long, env = "TOUR_LANG", default_value = "en")]
    pub lang: String,

    /// JSON file holding the apartment records.
    #[arg(long, env = "TOUR_STORE", default_value = "apartments.json")]
    pub store: PathBuf,

    /// Initial vertical field of view in degrees.
    #[arg(long, default_value_t = DEFAULT_FOV)]
    fov: f32,

    /// Start with the editing tools instead of the customer view.
    #[arg(long)]
    pub admin: bool,

    /// Apartment to open at startup; defaults to the first one.
    #[arg(long)]
    pub apartment: Option<String>,
}

impl Config {
    /// Starting FOV, clamped to the viewer's range.
    pub fn fov(&self) -> f32 {
        clamp_fov(self.fov)
    }

    /// Directory relative image paths resolve against.
    pub fn media_dir(&self) -> PathBuf {
        self.store
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default()
    }
}
