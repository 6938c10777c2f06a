use super::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Resize(u32, u32),
    Projection(f32, f32),
    LookAt,
    Texture(u32),
    Release,
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Call>>>);

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    fn textures(&self) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Texture(w) => Some(w),
                _ => None,
            })
            .collect()
    }
}

impl SceneBackend for Recorder {
    fn resize(&mut self, width: u32, height: u32) {
        self.0.borrow_mut().push(Call::Resize(width, height));
    }
    fn set_projection(&mut self, fov_deg: f32, aspect: f32) {
        self.0.borrow_mut().push(Call::Projection(fov_deg, aspect));
    }
    fn look_at(&mut self, _target: Vec3) {
        self.0.borrow_mut().push(Call::LookAt);
    }
    fn install_texture(&mut self, image: RgbaImage) {
        // Image width doubles as an identity in these tests.
        self.0.borrow_mut().push(Call::Texture(image.width()));
    }
    fn release(self) {
        self.0.borrow_mut().push(Call::Release);
    }
}

fn running() -> (PanoramaViewer<Recorder>, Recorder) {
    let rec = Recorder::default();
    let mut v = PanoramaViewer::new(75.0);
    v.initialize(rec.clone(), 800, 400).unwrap();
    (v, rec)
}

fn ok(req: &LoadRequest, width: u32) -> LoadOutcome {
    LoadOutcome {
        token: req.token,
        reference: req.reference.clone(),
        result: Ok(RgbaImage::new(width, 1)),
    }
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn initialize_applies_projection_and_starts_frames() {
    let (mut v, rec) = running();
    assert_eq!(v.lifecycle(), Lifecycle::Running);
    assert_eq!(rec.calls(), vec![Call::Projection(75.0, 2.0)]);
    assert!(v.frame().is_some());
    assert_eq!(rec.calls().last(), Some(&Call::LookAt));
}

#[test]
fn initialize_twice_is_rejected() {
    let (mut v, _) = running();
    let err = v.initialize(Recorder::default(), 10, 10).unwrap_err();
    assert!(matches!(err, ViewerError::AlreadyRunning));
}

#[test]
fn no_frames_before_initialize() {
    let mut v: PanoramaViewer<Recorder> = PanoramaViewer::new(75.0);
    assert!(v.frame().is_none());
}

#[test]
fn teardown_releases_backend_and_stops_frames() {
    let (mut v, rec) = running();
    v.frame();
    v.teardown().unwrap();
    assert_eq!(v.lifecycle(), Lifecycle::TornDown);
    assert_eq!(rec.calls().last(), Some(&Call::Release));
    assert!(v.frame().is_none());
    assert!(v.backend_mut().is_none());
}

#[test]
fn teardown_requires_running() {
    let mut v: PanoramaViewer<Recorder> = PanoramaViewer::new(75.0);
    assert!(matches!(v.teardown(), Err(ViewerError::NotRunning)));

    let (mut v, rec) = running();
    v.teardown().unwrap();
    assert!(matches!(v.teardown(), Err(ViewerError::NotRunning)));
    let releases = rec.calls().iter().filter(|c| **c == Call::Release).count();
    assert_eq!(releases, 1);
}

// =============================================================
// Projection
// =============================================================

#[test]
fn zoom_updates_projection_immediately() {
    let (mut v, rec) = running();
    v.on_zoom(100.0);
    assert_eq!(rec.calls().last(), Some(&Call::Projection(80.0, 2.0)));
}

#[test]
fn set_fov_is_clamped_and_applied() {
    let (mut v, rec) = running();
    v.set_fov(500.0);
    assert_eq!(v.fov(), 130.0);
    assert_eq!(rec.calls().last(), Some(&Call::Projection(130.0, 2.0)));
}

#[test]
fn resize_updates_surface_and_aspect() {
    let (mut v, rec) = running();
    v.resize(1000, 500);
    let calls = rec.calls();
    assert!(calls.contains(&Call::Resize(1000, 500)));
    assert_eq!(calls.last(), Some(&Call::Projection(75.0, 2.0)));

    v.resize(0, 500);
    assert_eq!(rec.calls().len(), calls.len());
}

#[test]
fn resize_and_fov_do_not_disturb_a_drag() {
    let (mut v, _) = running();
    v.on_pointer_down(100.0, 100.0);
    v.on_pointer_move(80.0, 100.0);
    v.resize(640, 480);
    v.set_fov(60.0);
    v.on_pointer_move(60.0, 100.0);
    assert!((v.controls().orbit.longitude - 4.0).abs() < 1e-5);
}

// =============================================================
// Texture swap
// =============================================================

#[test]
fn successful_load_installs_texture() {
    let (mut v, rec) = running();
    let req = v.set_image(ImageRef::new("a.jpg"));
    let notice = v.complete_image(ok(&req, 1));
    assert!(matches!(notice, Some(ViewerNotice::ImageInstalled { .. })));
    assert_eq!(rec.textures(), vec![1]);
    assert_eq!(v.displayed().map(ImageRef::as_str), Some("a.jpg"));
}

#[test]
fn stale_completion_after_newer_resolved_is_discarded() {
    let (mut v, rec) = running();
    let old = v.set_image(ImageRef::new("old.jpg"));
    let new = v.set_image(ImageRef::new("new.jpg"));

    v.complete_image(ok(&new, 2));
    assert!(v.complete_image(ok(&old, 1)).is_none());

    assert_eq!(rec.textures(), vec![2]);
    assert_eq!(v.displayed().map(ImageRef::as_str), Some("new.jpg"));
}

#[test]
fn stale_completion_before_newer_resolves_is_discarded() {
    let (mut v, rec) = running();
    let old = v.set_image(ImageRef::new("old.jpg"));
    let new = v.set_image(ImageRef::new("new.jpg"));

    assert!(v.complete_image(ok(&old, 1)).is_none());
    assert!(rec.textures().is_empty());
    v.complete_image(ok(&new, 2));
    assert_eq!(rec.textures(), vec![2]);
}

#[test]
fn failed_load_keeps_previous_texture() {
    let (mut v, rec) = running();
    let first = v.set_image(ImageRef::new("a.jpg"));
    v.complete_image(ok(&first, 1));

    let broken = v.set_image(ImageRef::new("broken.jpg"));
    let notice = v.complete_image(LoadOutcome {
        token: broken.token,
        reference: broken.reference.clone(),
        result: Err(ImageLoadError::DataUrl {
            reference: "broken.jpg".into(),
        }),
    });

    match notice {
        Some(ViewerNotice::ImageLoadFailed { reference, .. }) => assert_eq!(reference.as_str(), "broken.jpg"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(rec.textures(), vec![1]);
    assert_eq!(v.displayed().map(ImageRef::as_str), Some("a.jpg"));
}

#[test]
fn image_decoded_before_initialize_is_installed_on_start() {
    let rec = Recorder::default();
    let mut v = PanoramaViewer::new(90.0);
    let req = v.set_image(ImageRef::new("early.jpg"));
    v.complete_image(ok(&req, 3));
    assert!(v.displayed().is_none());

    v.initialize(rec.clone(), 100, 100).unwrap();
    assert_eq!(rec.textures(), vec![3]);
    assert_eq!(v.displayed().map(ImageRef::as_str), Some("early.jpg"));
}

#[test]
fn completion_after_teardown_is_dropped() {
    let (mut v, rec) = running();
    let req = v.set_image(ImageRef::new("late.jpg"));
    v.teardown().unwrap();
    assert!(v.complete_image(ok(&req, 1)).is_none());
    assert!(rec.textures().is_empty());
}
