use egui::{Pos2, Rect, Vec2, pos2, vec2};
use rasterro::geometry::{self, FitMode, GeometryState};

#[test]
fn scale_and_pointer_mapping_concrete_scenario() {
    // Surface 800x600 shown in a 400x300 box with aspect lock.
    let scale = geometry::compute_scale(vec2(800.0, 600.0), vec2(400.0, 300.0));
    assert_eq!(scale, 2.0);

    let logical = geometry::to_logical(pos2(50.0, 50.0), scale);
    assert_eq!(logical, pos2(100.0, 100.0));
}

#[test]
fn degenerate_display_size_falls_back_to_unit_scale() {
    assert_eq!(geometry::compute_scale(vec2(800.0, 600.0), Vec2::ZERO), 1.0);
}

#[test]
fn zero_height_container_is_width_bound() {
    assert_eq!(
        geometry::fit_mode(vec2(100.0, 0.0), 1.5),
        FitMode::WidthBound
    );
}

#[test]
fn fit_mode_follows_the_ratio_comparison() {
    // Wide container, tall content: height is the clamped dimension.
    assert_eq!(
        geometry::fit_mode(vec2(400.0, 100.0), 0.5),
        FitMode::HeightBound
    );
    // Narrow container, wide content: width is the clamped dimension.
    assert_eq!(
        geometry::fit_mode(vec2(100.0, 400.0), 2.0),
        FitMode::WidthBound
    );
}

#[test]
fn geometry_state_update_computes_display_and_scale() {
    let mut geom = GeometryState::default();

    // Fits at natural size: no fit mode, unit scale.
    let display = geom.update(vec2(100.0, 100.0), vec2(500.0, 500.0));
    assert_eq!(display, vec2(100.0, 100.0));
    assert_eq!(geom.scale, 1.0);
    assert!(geom.fit.is_none());

    // Too large: clamped with the aspect preserved, scale recomputed.
    let display = geom.update(vec2(800.0, 600.0), vec2(400.0, 300.0));
    assert_eq!(display, vec2(400.0, 300.0));
    assert_eq!(geom.scale, 2.0);
    assert!(geom.fit.is_some());
}

#[test]
fn fit_mode_only_changes_when_the_comparison_flips() {
    let mut geom = GeometryState::default();

    geom.update(vec2(800.0, 600.0), vec2(200.0, 300.0));
    assert_eq!(geom.fit, Some(FitMode::WidthBound));

    // Shrinking the container without flipping the ratio keeps the mode.
    geom.update(vec2(800.0, 600.0), vec2(100.0, 150.0));
    assert_eq!(geom.fit, Some(FitMode::WidthBound));

    // Flipping the ratio swaps it.
    geom.update(vec2(800.0, 600.0), vec2(600.0, 150.0));
    assert_eq!(geom.fit, Some(FitMode::HeightBound));
}

#[test]
fn to_logical_subtracts_the_display_origin() {
    let geom = GeometryState {
        scale: 2.0,
        origin: pos2(100.0, 50.0),
        fit: None,
    };
    assert_eq!(geom.to_logical(pos2(150.0, 100.0)), pos2(100.0, 100.0));
}

#[test]
fn clamp_rect_truncates_to_exact_bounds() {
    let oversized = Rect::from_min_max(pos2(-50.0, -50.0), pos2(10_000.0, 10_000.0));
    let clamped = geometry::clamp_rect(oversized, 800, 600);
    assert_eq!(clamped, Rect::from_min_max(Pos2::ZERO, pos2(800.0, 600.0)));
}

#[test]
fn drag_rect_normalizes_endpoint_order() {
    let rect = geometry::drag_rect(pos2(90.0, 10.0), pos2(10.0, 80.0));
    assert_eq!(rect, Rect::from_min_max(pos2(10.0, 10.0), pos2(90.0, 80.0)));
}

#[test]
fn round_rect_lands_on_pixel_boundaries() {
    let rect = Rect::from_min_max(pos2(9.6, 10.4), pos2(99.5, 50.2));
    let rounded = geometry::round_rect(rect);
    assert_eq!(
        rounded,
        Rect::from_min_max(pos2(10.0, 10.0), pos2(100.0, 50.0))
    );
}
