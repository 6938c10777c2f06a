// store.rs — JSON file persistence for apartment records

use crate::error::StoreError;
use crate::model::{Apartment, Point};
use std::path::PathBuf;

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

/// Apartment records kept in one JSON array on disk.
pub struct ApartmentStore {
    path: PathBuf,
}

impl ApartmentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All records, or the demo listing when nothing usable is on disk.
    pub fn load(&self) -> Vec<Apartment> {
        match self.try_load() {
            Ok(apartments) if !apartments.is_empty() => {
                log::info!("loaded {} apartments from {}", apartments.len(), self.path.display());
                apartments
            }
            Ok(_) => default_apartments(),
            Err(StoreError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::info!("{} not found; starting from demo data", self.path.display());
                default_apartments()
            }
            Err(e) => {
                log::warn!("{e}; starting from demo data");
                default_apartments()
            }
        }
    }

    pub fn try_load(&self) -> Result<Vec<Apartment>, StoreError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the stored set with `apartments`.
    pub fn save(&self, apartments: &[Apartment]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(apartments).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        // Write-then-rename so a crash never leaves a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::info!("saved {} apartments to {}", apartments.len(), self.path.display());
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<Apartment> {
        self.load().into_iter().find(|a| a.id == id)
    }
}

pub fn default_apartments() -> Vec<Apartment> {
    vec![Apartment {
        id: "1".into(),
        title: "Azure Skyline Penthouse".into(),
        price: "$1,250,000".into(),
        location: "Downtown Manhattan, NY".into(),
        description: "A stunning penthouse with floor-to-ceiling windows and panoramic city views."
            .into(),
        area: "240 sqm".into(),
        rooms: 4,
        main_image: String::new(),
        photos: Vec::new(),
        floor_plan_points: vec![
            Point::new(50.0, 50.0),
            Point::new(350.0, 50.0),
            Point::new(350.0, 250.0),
            Point::new(50.0, 250.0),
        ],
        hotspots: Vec::new(),
    }]
}
