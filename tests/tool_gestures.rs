use egui::{Color32, Key, Modifiers, Rect, pos2};
use rasterro::input::InputEvent;
use rasterro::style::ShapeStyle;
use rasterro::surface::RasterSurface;
use rasterro::tools::{CropTool, Tool, ToolKind, ToolOutcome};
use rasterro::Editor;

fn editor() -> Editor {
    Editor::new(800, 600, Color32::WHITE)
}

fn drag(editor: &mut Editor, from: (f32, f32), to: (f32, f32)) -> Option<ToolOutcome> {
    editor.handle_input(InputEvent::PointerDown {
        pos: pos2(from.0, from.1),
    });
    editor.handle_input(InputEvent::PointerMove {
        pos: pos2(to.0, to.1),
    });
    editor.handle_input(InputEvent::PointerUp {
        pos: pos2(to.0, to.1),
    })
}

#[test]
fn zero_displacement_drag_commits_nothing() {
    let mut editor = editor();
    editor.activate_tool(ToolKind::Line);
    let before = editor.surface().data().to_vec();

    let outcome = drag(&mut editor, (50.0, 50.0), (50.0, 50.0));

    assert_eq!(outcome, Some(ToolOutcome::Cancelled));
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.surface().data(), before.as_slice());
}

#[test]
fn rectangle_commit_undo_redo_scenario() {
    // Surface 800x600, rectangle from (10,10) to (100,50), 2px red stroke.
    let mut editor = editor();
    let mut style = ShapeStyle::default();
    style.stroke = Color32::RED;
    style.fill = Color32::TRANSPARENT;
    style.line_width = 2.0;
    editor.set_style(style);

    let blank = editor.surface().data().to_vec();
    editor.activate_tool(ToolKind::Rect);
    let outcome = drag(&mut editor, (10.0, 10.0), (100.0, 50.0));

    assert_eq!(outcome, Some(ToolOutcome::Committed));
    assert_eq!(editor.history().len(), 2); // initial clear + this edit
    let committed = editor.surface().data().to_vec();
    assert_ne!(committed, blank);

    assert!(editor.undo());
    assert_eq!(editor.surface().data(), blank.as_slice());

    assert!(editor.redo());
    assert_eq!(editor.surface().data(), committed.as_slice());
}

#[test]
fn line_commit_is_undoable() {
    let mut editor = editor();
    let blank = editor.surface().data().to_vec();
    editor.activate_tool(ToolKind::Line);

    let outcome = drag(&mut editor, (20.0, 20.0), (120.0, 90.0));
    assert_eq!(outcome, Some(ToolOutcome::Committed));
    assert_eq!(editor.history().len(), 2);
    assert_ne!(editor.surface().data(), blank.as_slice());

    assert!(editor.undo());
    assert_eq!(editor.surface().data(), blank.as_slice());
}

#[test]
fn dispatch_without_active_tool_is_a_no_op() {
    let mut editor = editor();
    let before = editor.surface().data().to_vec();

    let outcome = drag(&mut editor, (10.0, 10.0), (200.0, 200.0));

    assert_eq!(outcome, None);
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.surface().data(), before.as_slice());
}

#[test]
fn switching_tools_mid_drag_cancels_the_gesture() {
    let mut editor = editor();
    editor.activate_tool(ToolKind::Line);
    editor.handle_input(InputEvent::PointerDown {
        pos: pos2(10.0, 10.0),
    });
    editor.handle_input(InputEvent::PointerMove {
        pos: pos2(200.0, 200.0),
    });

    // Switching must force-cancel the in-progress draft.
    editor.activate_tool(ToolKind::Rect);
    let outcome = editor.handle_input(InputEvent::PointerUp {
        pos: pos2(200.0, 200.0),
    });

    assert_eq!(outcome, Some(ToolOutcome::Idle));
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn deactivate_is_idempotent() {
    let mut editor = editor();
    editor.activate_tool(ToolKind::Line);
    editor.close_tool();
    editor.close_tool();
    assert!(editor.session().active_kind().is_none());
}

#[test]
fn crop_region_is_clamped_to_surface_bounds() {
    let mut editor = editor();
    editor.activate_tool(ToolKind::Crop);

    drag(&mut editor, (-50.0, -50.0), (10_000.0, 10_000.0));

    let region = editor
        .session()
        .active()
        .and_then(|t| t.as_crop())
        .and_then(|c| c.region())
        .expect("crop drag should leave a region");
    assert_eq!(
        region,
        Rect::from_min_max(pos2(0.0, 0.0), pos2(800.0, 600.0))
    );
}

#[test]
fn zero_area_crop_drag_is_discarded() {
    let mut editor = editor();
    editor.activate_tool(ToolKind::Crop);

    let outcome = drag(&mut editor, (10.0, 10.0), (10.0, 10.0));

    assert_eq!(outcome, Some(ToolOutcome::Cancelled));
    let has_region = editor
        .session()
        .active()
        .and_then(|t| t.as_crop())
        .is_some_and(|c| c.has_region());
    assert!(!has_region);
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn crop_apply_shrinks_surface_and_restores_on_undo() {
    let mut editor = editor();
    editor.activate_tool(ToolKind::Crop);
    drag(&mut editor, (100.0, 100.0), (300.0, 200.0));

    assert!(editor.apply_crop());
    assert_eq!((editor.surface().width(), editor.surface().height()), (200, 100));
    assert_eq!(editor.history().len(), 2);

    assert!(editor.undo());
    assert_eq!((editor.surface().width(), editor.surface().height()), (800, 600));
}

#[test]
fn crop_handles_resize_the_region() {
    let surface = RasterSurface::new(800, 600, Color32::WHITE);
    let mut crop = CropTool::new();

    crop.on_pointer_down(pos2(100.0, 100.0), &surface);
    crop.on_pointer_move(pos2(300.0, 200.0), &surface);
    let mut scratch = RasterSurface::new(800, 600, Color32::WHITE);
    crop.on_pointer_up(pos2(300.0, 200.0), &mut scratch, &ShapeStyle::default());

    // Grab the bottom-right handle and pull it outward.
    crop.on_pointer_down(pos2(300.0, 200.0), &surface);
    crop.on_pointer_move(pos2(400.0, 250.0), &surface);
    crop.on_pointer_up(pos2(400.0, 250.0), &mut scratch, &ShapeStyle::default());

    assert_eq!(
        crop.region(),
        Some(Rect::from_min_max(pos2(100.0, 100.0), pos2(400.0, 250.0)))
    );
}

#[test]
fn crop_region_moves_inside_bounds() {
    let surface = RasterSurface::new(800, 600, Color32::WHITE);
    let mut scratch = RasterSurface::new(800, 600, Color32::WHITE);
    let mut crop = CropTool::new();

    crop.on_pointer_down(pos2(100.0, 100.0), &surface);
    crop.on_pointer_move(pos2(300.0, 200.0), &surface);
    crop.on_pointer_up(pos2(300.0, 200.0), &mut scratch, &ShapeStyle::default());

    // Grab the interior and drag far past the edge: the region stays inside.
    crop.on_pointer_down(pos2(200.0, 150.0), &surface);
    crop.on_pointer_move(pos2(10_000.0, 150.0), &surface);
    crop.on_pointer_up(pos2(10_000.0, 150.0), &mut scratch, &ShapeStyle::default());

    let region = crop.region().unwrap();
    assert_eq!(region.size(), egui::vec2(200.0, 100.0));
    assert_eq!(region.max.x, 800.0);
}

#[test]
fn aspect_locked_resize_keeps_the_ratio() {
    let surface = RasterSurface::new(800, 600, Color32::WHITE);
    let mut scratch = RasterSurface::new(800, 600, Color32::WHITE);
    let mut crop = CropTool::new();
    crop.set_aspect_lock(Some(2.0));

    crop.on_pointer_down(pos2(100.0, 100.0), &surface);
    crop.on_pointer_move(pos2(300.0, 200.0), &surface);
    crop.on_pointer_up(pos2(300.0, 200.0), &mut scratch, &ShapeStyle::default());

    crop.on_pointer_down(pos2(300.0, 200.0), &surface);
    crop.on_pointer_move(pos2(500.0, 400.0), &surface);

    let region = crop.region().unwrap();
    assert!((region.width() / region.height() - 2.0).abs() < 1e-3);
}

#[test]
fn aspect_locked_edge_resize_keeps_the_ratio() {
    let surface = RasterSurface::new(800, 600, Color32::WHITE);
    let mut scratch = RasterSurface::new(800, 600, Color32::WHITE);
    let mut crop = CropTool::new();
    crop.set_aspect_lock(Some(2.0));

    crop.on_pointer_down(pos2(100.0, 100.0), &surface);
    crop.on_pointer_move(pos2(300.0, 200.0), &surface);
    crop.on_pointer_up(pos2(300.0, 200.0), &mut scratch, &ShapeStyle::default());

    // Drag the bottom edge handle; the width must follow the lock.
    crop.on_pointer_down(pos2(200.0, 200.0), &surface);
    crop.on_pointer_move(pos2(200.0, 400.0), &surface);

    let region = crop.region().unwrap();
    assert_eq!(region, Rect::from_min_max(pos2(100.0, 100.0), pos2(700.0, 400.0)));
    assert!((region.width() / region.height() - 2.0).abs() < 1e-3);
}

#[test]
fn aspect_locked_resize_clamped_at_bounds_keeps_the_ratio() {
    let surface = RasterSurface::new(800, 600, Color32::WHITE);
    let mut scratch = RasterSurface::new(800, 600, Color32::WHITE);
    let mut crop = CropTool::new();
    crop.set_aspect_lock(Some(2.0));

    crop.on_pointer_down(pos2(100.0, 100.0), &surface);
    crop.on_pointer_move(pos2(300.0, 200.0), &surface);
    crop.on_pointer_up(pos2(300.0, 200.0), &mut scratch, &ShapeStyle::default());

    // Drag the bottom-right corner far outside the surface.
    crop.on_pointer_down(pos2(300.0, 200.0), &surface);
    crop.on_pointer_move(pos2(10_000.0, 10_000.0), &surface);

    let region = crop.region().unwrap();
    assert_eq!(region, Rect::from_min_max(pos2(100.0, 100.0), pos2(800.0, 450.0)));
    assert!((region.width() / region.height() - 2.0).abs() < 1e-3);
    assert!(region.max.x <= 800.0 && region.max.y <= 600.0);
}

#[test]
fn pipette_pick_feeds_the_stroke_color() {
    let mut editor = editor();
    let mut style = editor.style();
    style.stroke = Color32::RED;
    style.fill = Color32::BLUE;
    style.line_width = 2.0;
    editor.set_style(style);

    editor.activate_tool(ToolKind::Rect);
    drag(&mut editor, (100.0, 100.0), (200.0, 200.0));

    editor.activate_tool(ToolKind::Pipette);
    let outcome = editor.handle_input(InputEvent::PointerUp {
        pos: pos2(150.0, 150.0),
    });

    assert_eq!(outcome, Some(ToolOutcome::Picked(Color32::BLUE)));
    assert_eq!(editor.style().stroke, Color32::BLUE);
    // Picking never creates a history entry.
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn undo_redo_keyboard_shortcuts() {
    let mut editor = editor();
    let blank = editor.surface().data().to_vec();
    editor.activate_tool(ToolKind::Line);
    drag(&mut editor, (10.0, 10.0), (100.0, 100.0));
    let committed = editor.surface().data().to_vec();

    editor.handle_input(InputEvent::KeyDown {
        key: Key::Z,
        modifiers: Modifiers::COMMAND,
    });
    assert_eq!(editor.surface().data(), blank.as_slice());

    editor.handle_input(InputEvent::KeyDown {
        key: Key::Z,
        modifiers: Modifiers::COMMAND | Modifiers::SHIFT,
    });
    assert_eq!(editor.surface().data(), committed.as_slice());

    editor.handle_input(InputEvent::KeyDown {
        key: Key::Z,
        modifiers: Modifiers::COMMAND,
    });
    editor.handle_input(InputEvent::KeyDown {
        key: Key::Y,
        modifiers: Modifiers::COMMAND,
    });
    assert_eq!(editor.surface().data(), committed.as_slice());
}

#[test]
fn empty_pasted_image_leaves_state_unchanged() {
    let mut editor = editor();
    let empty = image::RgbaImage::new(0, 0);

    assert!(editor.paste_image(&empty).is_err());
    assert_eq!((editor.surface().width(), editor.surface().height()), (800, 600));
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn pasted_image_resizes_draws_and_captures_once() {
    let mut editor = editor();
    let img = image::RgbaImage::from_pixel(32, 16, image::Rgba([0, 255, 0, 255]));

    editor.paste_image(&img).unwrap();

    assert_eq!((editor.surface().width(), editor.surface().height()), (32, 16));
    assert_eq!(editor.surface().pixel(5, 5), Some(Color32::from_rgb(0, 255, 0)));
    assert_eq!(editor.history().len(), 2);

    assert!(editor.undo());
    assert_eq!((editor.surface().width(), editor.surface().height()), (800, 600));
}
