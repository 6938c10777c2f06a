// model.rs — apartment records as handed to the tour and the floor plan

use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::geometry::Point;

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

pub type HotspotId = String;
pub type PhotoId = String;

/// Opaque image handle: a file path or a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_data_url() {
            // Inline payloads can be megabytes long.
            let head: String = self.0.chars().take(32).collect();
            write!(f, "{head}…")
        } else {
            f.write_str(&self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub id: HotspotId,
    pub photo_id: PhotoId,
    pub position: Point,
    pub label: String,
}

/// One 360° capture point. Only the day/furnished image is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    /// Day, furnished.
    pub url: ImageRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_url: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_url: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_night_url: Option<ImageRef>,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lighting {
    #[default]
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Furnishing {
    #[default]
    Furnished,
    Empty,
}

impl Photo {
    /// Pick the image variant to display, falling back toward the day/furnished shot.
    pub fn surface(&self, lighting: Lighting, furnishing: Furnishing) -> &ImageRef {
        let preferred = match (lighting, furnishing) {
            (Lighting::Day, Furnishing::Furnished) => None,
            (Lighting::Day, Furnishing::Empty) => self.empty_url.as_ref(),
            (Lighting::Night, Furnishing::Furnished) => self.night_url.as_ref(),
            (Lighting::Night, Furnishing::Empty) => {
                self.empty_night_url.as_ref().or(self.empty_url.as_ref())
            }
        };
        preferred.unwrap_or(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apartment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub rooms: u32,
    #[serde(default)]
    pub main_image: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub floor_plan_points: Vec<Point>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

impl Apartment {
    pub fn photo(&self, id: &str) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn hotspot(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    /// First hotspot pointing at `photo_id`.
    pub fn hotspot_for_photo(&self, photo_id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.photo_id == photo_id)
    }
}
