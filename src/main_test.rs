use super::*;

#[test]
fn logical_point_divides_by_scale_factor() {
    let (x, y) = logical_point(PhysicalPosition::new(300.0, 120.0), 2.0);
    assert_eq!((x, y), (150.0, 60.0));
}

#[test]
fn orbit_rate_matches_across_display_densities() {
    let drag = |scale: f64| {
        let mut viewer: PanoramaViewer<Renderer> = PanoramaViewer::new(90.0);
        let (x0, y0) = logical_point(PhysicalPosition::new(0.0, 0.0), scale);
        let (x1, y1) = logical_point(PhysicalPosition::new(200.0 * scale, 0.0), scale);
        viewer.on_pointer_down(x0, y0);
        viewer.on_pointer_move(x1, y1);
        viewer.controls().orbit.longitude
    };
    assert!((drag(1.0) - drag(2.0)).abs() < 1e-4);
    assert!((drag(2.0) + 20.0).abs() < 1e-4);
}
