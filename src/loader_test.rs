use super::*;
use base64::Engine as _;
use std::time::Duration;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageOutputFormat::Png).unwrap();
    out.into_inner()
}

fn wait(loader: &mut ImageLoader) -> LoadOutcome {
    let outcome = loader.rx.recv_timeout(Duration::from_secs(10)).unwrap();
    loader.in_flight -= 1;
    outcome
}

#[test]
fn decodes_relative_file_against_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("room.png"), png_bytes(8, 4)).unwrap();

    let img = decode(&ImageRef::new("room.png"), dir.path()).unwrap();
    assert_eq!(img.dimensions(), (8, 4));
    assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
}

#[test]
fn decodes_base64_data_url() {
    let encoded = base64::engine::general_purpose::STANDARD.encode(png_bytes(2, 1));
    let reference = ImageRef::new(format!("data:image/png;base64,{encoded}"));
    let img = decode(&reference, Path::new(".")).unwrap();
    assert_eq!(img.dimensions(), (2, 1));
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = decode(&ImageRef::new("gone.jpg"), dir.path()).unwrap_err();
    assert!(matches!(err, ImageLoadError::Open { .. }));
}

#[test]
fn garbage_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.jpg"), b"definitely not an image").unwrap();
    let err = decode(&ImageRef::new("bad.jpg"), dir.path()).unwrap_err();
    assert!(matches!(err, ImageLoadError::Decode { .. }));
}

#[test]
fn non_base64_data_url_is_rejected() {
    let err = decode(&ImageRef::new("data:image/png,rawbytes"), Path::new(".")).unwrap_err();
    assert!(matches!(err, ImageLoadError::DataUrl { .. }));
}

#[test]
fn outcomes_carry_their_request_token() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.png"), png_bytes(4, 2)).unwrap();
    let mut loader = ImageLoader::new(dir.path());

    loader.request(LoadRequest { token: 1, reference: ImageRef::new("a.png") });
    loader.request(LoadRequest { token: 2, reference: ImageRef::new("missing.png") });
    assert!(loader.is_loading());

    let mut outcomes = vec![wait(&mut loader), wait(&mut loader)];
    outcomes.sort_by_key(|o| o.token);
    assert!(outcomes[0].result.is_ok());
    assert!(outcomes[1].result.is_err());
    assert_eq!(outcomes[1].reference.as_str(), "missing.png");
    assert!(!loader.is_loading());
    assert!(loader.poll().is_none());
}
