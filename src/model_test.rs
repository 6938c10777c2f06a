use super::*;

fn photo() -> Photo {
    Photo {
        id: "P1".into(),
        url: ImageRef::new("day.jpg"),
        empty_url: None,
        night_url: None,
        empty_night_url: None,
        name: "Living room".into(),
        description: String::new(),
    }
}

#[test]
fn day_furnished_is_always_the_base_url() {
    let mut p = photo();
    p.empty_url = Some(ImageRef::new("empty.jpg"));
    assert_eq!(p.surface(Lighting::Day, Furnishing::Furnished).as_str(), "day.jpg");
}

#[test]
fn missing_variants_fall_back_to_day_furnished() {
    let p = photo();
    assert_eq!(p.surface(Lighting::Day, Furnishing::Empty).as_str(), "day.jpg");
    assert_eq!(p.surface(Lighting::Night, Furnishing::Furnished).as_str(), "day.jpg");
    assert_eq!(p.surface(Lighting::Night, Furnishing::Empty).as_str(), "day.jpg");
}

#[test]
fn night_empty_prefers_night_then_day_empty() {
    let mut p = photo();
    p.empty_url = Some(ImageRef::new("empty.jpg"));
    assert_eq!(p.surface(Lighting::Night, Furnishing::Empty).as_str(), "empty.jpg");

    p.empty_night_url = Some(ImageRef::new("empty-night.jpg"));
    assert_eq!(p.surface(Lighting::Night, Furnishing::Empty).as_str(), "empty-night.jpg");
}

#[test]
fn night_furnished_uses_night_url() {
    let mut p = photo();
    p.night_url = Some(ImageRef::new("night.jpg"));
    assert_eq!(p.surface(Lighting::Night, Furnishing::Furnished).as_str(), "night.jpg");
}

#[test]
fn hotspot_serializes_camel_case() {
    let h = Hotspot {
        id: "spot_1".into(),
        photo_id: "P1".into(),
        position: Point::new(300.0, 200.0),
        label: "Unnamed Spot".into(),
    };
    let json = serde_json::to_value(&h).unwrap();
    assert_eq!(json["photoId"], "P1");
    assert_eq!(json["position"]["x"], 300.0);
}

#[test]
fn apartment_tolerates_missing_collections() {
    let apt: Apartment = serde_json::from_str(r#"{ "id": "9", "title": "Loft" }"#).unwrap();
    assert!(apt.photos.is_empty());
    assert!(apt.floor_plan_points.is_empty());
    assert!(apt.hotspots.is_empty());
}

#[test]
fn data_url_display_is_truncated() {
    let r = ImageRef::new(format!("data:image/jpeg;base64,{}", "A".repeat(1000)));
    assert!(r.is_data_url());
    assert!(r.to_string().chars().count() <= 33);
}
