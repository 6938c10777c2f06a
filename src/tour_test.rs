use super::*;
use crate::model::{Hotspot, Point};

fn photo(id: &str) -> Photo {
    Photo {
        id: id.into(),
        url: ImageRef::new(format!("{id}.jpg")),
        empty_url: Some(ImageRef::new(format!("{id}-empty.jpg"))),
        night_url: Some(ImageRef::new(format!("{id}-night.jpg"))),
        empty_night_url: None,
        name: id.into(),
        description: String::new(),
    }
}

fn hotspot(id: &str, photo_id: &str) -> Hotspot {
    Hotspot {
        id: id.into(),
        photo_id: photo_id.into(),
        position: Point::new(100.0, 100.0),
        label: id.into(),
    }
}

fn apartment() -> Apartment {
    Apartment {
        id: "A".into(),
        title: "Loft".into(),
        price: String::new(),
        location: String::new(),
        description: String::new(),
        area: String::new(),
        rooms: 2,
        main_image: String::new(),
        photos: vec![photo("P1"), photo("P2")],
        floor_plan_points: Vec::new(),
        hotspots: vec![
            hotspot("h1", "P1"),
            hotspot("h2", "P2"),
            hotspot("h3", "P2"),
            hotspot("ghost", "gone"),
        ],
    }
}

fn opened() -> TourController {
    let mut tour = TourController::new(vec![apartment()], Audience::Customer);
    tour.open_apartment("A");
    tour
}

fn img(s: &str) -> Option<ImageRef> {
    Some(ImageRef::new(s))
}

// =============================================================
// Opening and selection
// =============================================================

#[test]
fn opening_shows_first_photo_and_its_hotspot() {
    let mut tour = TourController::new(vec![apartment()], Audience::Customer);
    assert_eq!(tour.open_apartment("A"), img("P1.jpg"));
    assert_eq!(tour.active_photo_id(), Some("P1"));
    assert_eq!(tour.active_hotspot_id(), Some("h1"));
}

#[test]
fn opening_unknown_apartment_changes_nothing() {
    let mut tour = TourController::new(vec![apartment()], Audience::Customer);
    assert_eq!(tour.open_apartment("nope"), None);
    assert!(tour.apartment().is_none());
}

#[test]
fn hotspot_selection_swaps_photo() {
    let mut tour = opened();
    assert_eq!(tour.select_hotspot(Some("h3")), img("P2.jpg"));
    assert_eq!(tour.active_photo_id(), Some("P2"));
    assert_eq!(tour.active_hotspot_id(), Some("h3"));

    // Same photo, different hotspot: nothing new to load.
    assert_eq!(tour.select_hotspot(Some("h2")), None);
    assert_eq!(tour.active_hotspot_id(), Some("h2"));
}

#[test]
fn photo_selection_picks_first_related_hotspot() {
    let mut tour = opened();
    assert_eq!(tour.select_photo("P2"), img("P2.jpg"));
    assert_eq!(tour.active_hotspot_id(), Some("h2"));
    assert_eq!(tour.select_photo("missing"), None);
    assert_eq!(tour.active_photo_id(), Some("P2"));
}

#[test]
fn dangling_hotspot_selects_nothing() {
    let mut tour = opened();
    assert_eq!(tour.select_hotspot(Some("ghost")), None);
    assert_eq!(tour.active_photo_id(), Some("P1"));
    assert_eq!(tour.active_hotspot_id(), Some("h1"));
}

#[test]
fn clearing_selection_keeps_photo() {
    let mut tour = opened();
    assert_eq!(tour.select_hotspot(None), None);
    assert_eq!(tour.active_hotspot_id(), None);
    assert_eq!(tour.current_image(), img("P1.jpg"));
}

// =============================================================
// Surface toggles
// =============================================================

#[test]
fn toggles_pick_the_matching_surface() {
    let mut tour = opened();
    assert_eq!(tour.set_lighting(Lighting::Night), img("P1-night.jpg"));
    // Night + empty falls back to the day empty shot.
    assert_eq!(tour.set_furnishing(Furnishing::Empty), img("P1-empty.jpg"));
    assert_eq!(tour.set_lighting(Lighting::Day), None);
    assert_eq!(tour.set_furnishing(Furnishing::Furnished), img("P1.jpg"));
}

// =============================================================
// Canvas events
// =============================================================

#[test]
fn canvas_edits_update_the_record_and_mark_dirty() {
    let mut tour = opened();
    assert!(!tour.take_dirty());

    let points = vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
    assert_eq!(tour.apply(&CanvasEvent::PointsChanged(points.clone())), None);
    assert_eq!(tour.apartment().map(|a| a.floor_plan_points.clone()), Some(points));

    let spots = vec![hotspot("h9", "P2")];
    tour.apply(&CanvasEvent::HotspotsChanged(spots.clone()));
    assert_eq!(tour.apartment().map(|a| a.hotspots.clone()), Some(spots));

    assert!(tour.take_dirty());
    assert!(!tour.take_dirty());
}

#[test]
fn canvas_selection_follows_hotspot() {
    let mut tour = opened();
    assert_eq!(
        tour.apply(&CanvasEvent::HotspotSelected(Some("h2".into()))),
        img("P2.jpg")
    );
}

#[test]
fn edits_without_an_open_apartment_are_dropped() {
    let mut tour = TourController::new(vec![apartment()], Audience::Admin);
    tour.apply(&CanvasEvent::PointsChanged(vec![Point::new(1.0, 1.0)]));
    assert!(!tour.take_dirty());
    assert!(tour.apartments()[0].floor_plan_points.is_empty());
}

#[test]
fn added_photo_becomes_active() {
    let mut tour = opened();
    let shown = tour.add_photo(ImageRef::new("new.jpg"), "Balcony".into());
    assert_eq!(shown, img("new.jpg"));
    assert_eq!(tour.apartment().map(|a| a.photos.len()), Some(3));
    assert!(tour.active_photo_id().is_some_and(|id| id.starts_with("photo_")));
    assert_eq!(tour.active_hotspot_id(), None);
    assert!(tour.take_dirty());
}

#[test]
fn audience_switch() {
    let mut tour = opened();
    assert!(!tour.is_admin());
    tour.set_audience(Audience::Admin);
    assert!(tour.is_admin());
}
