use super::*;

#[test]
fn defaults() {
    let config = Config::try_parse_from(["tour_studio"]).unwrap();
    assert_eq!(config.store, PathBuf::from("apartments.json"));
    assert_eq!(config.fov(), 90.0);
    assert!(!config.admin);
    assert!(config.apartment.is_none());
    assert_eq!(config.media_dir(), PathBuf::new());
}

#[test]
fn fov_is_clamped() {
    let config = Config::try_parse_from(["tour_studio", "--fov", "400"]).unwrap();
    assert_eq!(config.fov(), 130.0);
    let config = Config::try_parse_from(["tour_studio", "--fov", "1"]).unwrap();
    assert_eq!(config.fov(), 10.0);
}

#[test]
fn media_dir_follows_store() {
    let config =
        Config::try_parse_from(["tour_studio", "--store", "/srv/tours/db.json", "--admin"]).unwrap();
    assert_eq!(config.media_dir(), PathBuf::from("/srv/tours"));
    assert!(config.admin);
}
