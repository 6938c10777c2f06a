// tour.rs — mediates between the apartment records, the floor plan and the viewer

use crate::floorplan::CanvasEvent;
use crate::model::{Apartment, Furnishing, HotspotId, ImageRef, Lighting, Photo, PhotoId};

#[cfg(test)]
#[path = "tour_test.rs"]
mod tour_test;

/// Which side of the product is showing: editing tools or the read-only map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Admin,
    Customer,
}

/// Active apartment, photo and hotspot, plus the surface toggles.
///
/// Every selection method returns the image the viewer should switch to, or
/// `None` when what is on screen is still correct.
#[derive(Debug)]
pub struct TourController {
    apartments: Vec<Apartment>,
    active: Option<usize>,
    photo: Option<PhotoId>,
    hotspot: Option<HotspotId>,
    lighting: Lighting,
    furnishing: Furnishing,
    audience: Audience,
    shown: Option<ImageRef>,
    dirty: bool,
}

impl TourController {
    pub fn new(apartments: Vec<Apartment>, audience: Audience) -> Self {
        Self {
            apartments,
            active: None,
            photo: None,
            hotspot: None,
            lighting: Lighting::default(),
            furnishing: Furnishing::default(),
            audience,
            shown: None,
            dirty: false,
        }
    }

    pub fn apartments(&self) -> &[Apartment] {
        &self.apartments
    }

    pub fn apartment(&self) -> Option<&Apartment> {
        self.active.and_then(|i| self.apartments.get(i))
    }

    fn apartment_mut(&mut self) -> Option<&mut Apartment> {
        let i = self.active?;
        self.apartments.get_mut(i)
    }

    pub fn active_photo(&self) -> Option<&Photo> {
        let id = self.photo.as_deref()?;
        self.apartment()?.photo(id)
    }

    pub fn active_photo_id(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn active_hotspot_id(&self) -> Option<&str> {
        self.hotspot.as_deref()
    }

    pub fn lighting(&self) -> Lighting {
        self.lighting
    }

    pub fn furnishing(&self) -> Furnishing {
        self.furnishing
    }

    pub fn audience(&self) -> Audience {
        self.audience
    }

    pub fn set_audience(&mut self, audience: Audience) {
        self.audience = audience;
    }

    pub fn is_admin(&self) -> bool {
        self.audience == Audience::Admin
    }

    /// The surface of the active photo under the current toggles.
    pub fn current_image(&self) -> Option<ImageRef> {
        self.active_photo()
            .map(|p| p.surface(self.lighting, self.furnishing).clone())
    }

    fn refresh(&mut self) -> Option<ImageRef> {
        let next = self.current_image();
        if next == self.shown {
            return None;
        }
        self.shown = next.clone();
        next
    }

    /// Make `id` active with its first photo and that photo's first hotspot.
    pub fn open_apartment(&mut self, id: &str) -> Option<ImageRef> {
        let Some(index) = self.apartments.iter().position(|a| a.id == id) else {
            log::warn!("no apartment with id {id}");
            return None;
        };
        self.active = Some(index);
        self.photo = None;
        self.hotspot = None;

        let apartment = &self.apartments[index];
        log::info!("opened apartment {} ({})", apartment.id, apartment.title);
        if let Some(first) = apartment.photos.first().map(|p| p.id.clone()) {
            self.hotspot = apartment.hotspot_for_photo(&first).map(|h| h.id.clone());
            self.photo = Some(first);
        }
        self.refresh()
    }

    /// Show a photo directly; the first hotspot pointing at it becomes active.
    pub fn select_photo(&mut self, id: &str) -> Option<ImageRef> {
        let apartment = self.apartment()?;
        apartment.photo(id)?;
        let hotspot = apartment.hotspot_for_photo(id).map(|h| h.id.clone());
        self.hotspot = hotspot;
        self.photo = Some(id.to_string());
        self.refresh()
    }

    /// Follow a hotspot to its photo. A hotspot whose photo is gone selects nothing.
    pub fn select_hotspot(&mut self, id: Option<&str>) -> Option<ImageRef> {
        let Some(id) = id else {
            self.hotspot = None;
            return None;
        };
        let apartment = self.apartment()?;
        let photo_id = apartment.hotspot(id)?.photo_id.clone();
        if apartment.photo(&photo_id).is_none() {
            log::debug!("hotspot {id} points at missing photo {photo_id}");
            return None;
        }
        self.photo = Some(photo_id);
        self.hotspot = Some(id.to_string());
        self.refresh()
    }

    pub fn set_lighting(&mut self, lighting: Lighting) -> Option<ImageRef> {
        self.lighting = lighting;
        self.refresh()
    }

    pub fn set_furnishing(&mut self, furnishing: Furnishing) -> Option<ImageRef> {
        self.furnishing = furnishing;
        self.refresh()
    }

    /// Adopt a floor-plan change. Edits mark the records dirty; selections follow hotspots.
    pub fn apply(&mut self, event: &CanvasEvent) -> Option<ImageRef> {
        match event {
            CanvasEvent::PointsChanged(points) => {
                let apartment = self.apartment_mut()?;
                apartment.floor_plan_points = points.clone();
                self.dirty = true;
                None
            }
            CanvasEvent::HotspotsChanged(hotspots) => {
                let apartment = self.apartment_mut()?;
                apartment.hotspots = hotspots.clone();
                self.dirty = true;
                None
            }
            CanvasEvent::HotspotSelected(id) => self.select_hotspot(id.as_deref()),
        }
    }

    /// Attach a new panorama to the active apartment and show it.
    pub fn add_photo(&mut self, url: ImageRef, name: String) -> Option<ImageRef> {
        let id = format!("photo_{}", uuid::Uuid::new_v4().simple());
        let apartment = self.apartment_mut()?;
        apartment.photos.push(Photo {
            id: id.clone(),
            url,
            empty_url: None,
            night_url: None,
            empty_night_url: None,
            name,
            description: String::new(),
        });
        self.dirty = true;
        self.select_photo(&id)
    }

    /// True once after any edit since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
