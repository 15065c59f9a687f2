use egui::{Color32, Rect, pos2};
use rasterro::surface::RasterSurface;

fn stroked_run(surface: &RasterSurface, y: u32) -> Vec<u32> {
    (0..surface.width())
        .filter(|&x| surface.pixel(x, y) != Some(Color32::WHITE))
        .collect()
}

#[test]
fn stroke_width_three_paints_three_pixel_bands() {
    let mut surface = RasterSurface::new(120, 60, Color32::WHITE);
    let rect = Rect::from_min_max(pos2(10.0, 10.0), pos2(100.0, 50.0));
    surface.stroke_rect(rect, Color32::BLACK, 3.0);

    // Middle row crosses only the left and right bands.
    let run = stroked_run(&surface, 30);
    assert_eq!(run, vec![9, 10, 11, 99, 100, 101]);
}

#[test]
fn stroke_width_one_paints_single_pixel_bands() {
    let mut surface = RasterSurface::new(120, 60, Color32::WHITE);
    let rect = Rect::from_min_max(pos2(10.0, 10.0), pos2(100.0, 50.0));
    surface.stroke_rect(rect, Color32::BLACK, 1.0);

    let run = stroked_run(&surface, 30);
    assert_eq!(run, vec![10, 100]);
}

#[test]
fn stroke_width_two_straddles_the_boundary() {
    let mut surface = RasterSurface::new(120, 60, Color32::WHITE);
    let rect = Rect::from_min_max(pos2(10.0, 10.0), pos2(100.0, 50.0));
    surface.stroke_rect(rect, Color32::BLACK, 2.0);

    let run = stroked_run(&surface, 30);
    assert_eq!(run, vec![9, 10, 99, 100]);
}
