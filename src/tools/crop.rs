use egui::{CursorIcon, Pos2, Rect, Vec2, pos2};

use crate::geometry;
use crate::style::ShapeStyle;
use crate::surface::RasterSurface;
use crate::tools::{DraftShape, Tool, ToolOutcome};

/// Distance in logical pixels within which a pointer-down grabs a handle.
pub const HANDLE_GRAB_RADIUS: f32 = 8.0;

/// The eight resize handles of a crop region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl CropHandle {
    const ALL: [CropHandle; 8] = [
        CropHandle::TopLeft,
        CropHandle::Top,
        CropHandle::TopRight,
        CropHandle::Right,
        CropHandle::BottomRight,
        CropHandle::Bottom,
        CropHandle::BottomLeft,
        CropHandle::Left,
    ];

    fn position(self, rect: Rect) -> Pos2 {
        match self {
            CropHandle::TopLeft => rect.min,
            CropHandle::Top => pos2(rect.center().x, rect.min.y),
            CropHandle::TopRight => pos2(rect.max.x, rect.min.y),
            CropHandle::Right => pos2(rect.max.x, rect.center().y),
            CropHandle::BottomRight => rect.max,
            CropHandle::Bottom => pos2(rect.center().x, rect.max.y),
            CropHandle::BottomLeft => pos2(rect.min.x, rect.max.y),
            CropHandle::Left => pos2(rect.min.x, rect.center().y),
        }
    }

    /// The point that stays put while this handle is dragged. Edge handles
    /// pin the opposite edge; the unused axis passes through unchanged.
    fn opposite(self, rect: Rect) -> Pos2 {
        match self {
            CropHandle::TopLeft => rect.max,
            CropHandle::TopRight => pos2(rect.min.x, rect.max.y),
            CropHandle::BottomRight => rect.min,
            CropHandle::BottomLeft => pos2(rect.max.x, rect.min.y),
            CropHandle::Top => pos2(rect.min.x, rect.max.y),
            CropHandle::Bottom => rect.min,
            CropHandle::Left => pos2(rect.max.x, rect.min.y),
            CropHandle::Right => rect.min,
        }
    }
}

enum CropDrag {
    None,
    /// Dragging out a fresh region from the anchor.
    Creating { anchor: Pos2 },
    /// Translating the whole region; `grab` is the pointer offset from the
    /// region's min corner.
    Moving { grab: Vec2 },
    /// Dragging one handle.
    Resizing { handle: CropHandle },
}

/// Crop-region tool: drag to create a region, then move it or resize it by
/// its eight handles until the crop is applied.
///
/// The region is always clamped to the surface bounds and never smaller
/// than 1x1 logical pixel. With an aspect lock set, every handle resize
/// keeps the width/height ratio, including when the drag hits the surface
/// edge.
pub struct CropTool {
    region: Option<Rect>,
    drag: CropDrag,
    aspect_lock: Option<f32>,
}

impl CropTool {
    pub fn new() -> Self {
        Self {
            region: None,
            drag: CropDrag::None,
            aspect_lock: None,
        }
    }

    /// Current region in logical coordinates, if one has been dragged out.
    pub fn region(&self) -> Option<Rect> {
        self.region
    }

    pub fn has_region(&self) -> bool {
        self.region.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.drag, CropDrag::None)
    }

    /// Lock resizes to the given width/height ratio; None disables.
    pub fn set_aspect_lock(&mut self, ratio: Option<f32>) {
        self.aspect_lock = ratio.filter(|r| *r > 0.0);
    }

    /// Apply the crop: replace the surface with the region's pixels, rounded
    /// to pixel boundaries. Returns false (and leaves the surface alone) if
    /// there is no usable region.
    pub fn apply(&mut self, surface: &mut RasterSurface) -> bool {
        let Some(region) = self.region.take() else {
            return false;
        };
        let rect = geometry::round_rect(geometry::clamp_rect(
            region,
            surface.width(),
            surface.height(),
        ));
        if rect.width() < 1.0 || rect.height() < 1.0 {
            log::debug!("crop apply skipped: degenerate region {rect:?}");
            return false;
        }
        surface.crop(rect);
        true
    }

    fn hit_handle(&self, pos: Pos2) -> Option<CropHandle> {
        let rect = self.region?;
        CropHandle::ALL
            .into_iter()
            .find(|h| h.position(rect).distance(pos) <= HANDLE_GRAB_RADIUS)
    }

    /// Resize so the dragged handle follows `pos` while the opposite
    /// corner/edge stays pinned. With an aspect lock, the axis the handle
    /// does not drive is re-derived from the locked ratio.
    fn resize_to(&mut self, handle: CropHandle, pos: Pos2, surface: &RasterSurface) {
        let Some(rect) = self.region else { return };
        let pinned = handle.opposite(rect);
        let bounds = pos2(surface.width() as f32, surface.height() as f32);
        let pos = pos.clamp(Pos2::ZERO, bounds);

        let target = match handle {
            CropHandle::Top | CropHandle::Bottom => {
                let mut t = pos2(pinned.x + rect.width(), pos.y);
                if let Some(ratio) = self.aspect_lock {
                    t.x = pinned.x + (pos.y - pinned.y).abs() * ratio;
                }
                t
            }
            CropHandle::Left | CropHandle::Right => {
                let mut t = pos2(pos.x, pinned.y + rect.height());
                if let Some(ratio) = self.aspect_lock {
                    t.y = pinned.y + (pos.x - pinned.x).abs() / ratio;
                }
                t
            }
            _ => {
                let mut t = pos;
                if let Some(ratio) = self.aspect_lock {
                    // Width wins; height follows the locked ratio.
                    let dy = pos.y - pinned.y;
                    let h = (pos.x - pinned.x).abs() / ratio;
                    t.y = pinned.y + h * if dy < 0.0 { -1.0 } else { 1.0 };
                }
                t
            }
        };

        let candidate = match self.aspect_lock {
            Some(ratio) => fit_ratio_in_bounds(pinned, target, ratio, bounds),
            None => Rect::from_two_pos(pinned, target),
        };
        self.region = Some(self.constrain(candidate, surface));
    }

    /// Clamp to the surface and enforce the 1x1 minimum.
    fn constrain(&self, rect: Rect, surface: &RasterSurface) -> Rect {
        let w = surface.width();
        let h = surface.height();
        let mut rect = geometry::clamp_rect(rect, w, h);
        if rect.width() < 1.0 {
            if rect.max.x + 1.0 <= w as f32 {
                rect.max.x = rect.min.x + 1.0;
            } else {
                rect.min.x = rect.max.x - 1.0;
            }
        }
        if rect.height() < 1.0 {
            if rect.max.y + 1.0 <= h as f32 {
                rect.max.y = rect.min.y + 1.0;
            } else {
                rect.min.y = rect.max.y - 1.0;
            }
        }
        rect
    }

    /// Translate the region keeping it fully inside the surface.
    fn move_to(&mut self, pos: Pos2, grab: Vec2, surface: &RasterSurface) {
        let Some(rect) = self.region else { return };
        let size = rect.size();
        let max_min = pos2(
            (surface.width() as f32 - size.x).max(0.0),
            (surface.height() as f32 - size.y).max(0.0),
        );
        let min = (pos - grab).clamp(Pos2::ZERO, max_min);
        self.region = Some(Rect::from_min_size(min, size));
    }
}

/// Largest rect with the given width/height ratio that grows from `pinned`
/// toward `target` without leaving `[0, bounds]`.
fn fit_ratio_in_bounds(pinned: Pos2, target: Pos2, ratio: f32, bounds: Pos2) -> Rect {
    let sx = if target.x < pinned.x { -1.0 } else { 1.0 };
    let sy = if target.y < pinned.y { -1.0 } else { 1.0 };
    let avail_x = if sx < 0.0 { pinned.x } else { bounds.x - pinned.x };
    let avail_y = if sy < 0.0 { pinned.y } else { bounds.y - pinned.y };
    let mut w = (target.x - pinned.x).abs().min(avail_x);
    let mut h = w / ratio;
    if h > avail_y {
        h = avail_y;
        w = h * ratio;
    }
    Rect::from_two_pos(pinned, pos2(pinned.x + sx * w, pinned.y + sy * h))
}

impl Default for CropTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for CropTool {
    fn name(&self) -> &'static str {
        "crop"
    }

    fn cursor(&self) -> CursorIcon {
        CursorIcon::Crosshair
    }

    fn on_activate(&mut self, _surface: &RasterSurface) {
        self.drag = CropDrag::None;
    }

    fn on_close(&mut self) {
        // Hiding the crop rectangle is part of the close contract.
        self.drag = CropDrag::None;
        self.region = None;
    }

    fn cancel(&mut self) {
        if let CropDrag::Creating { .. } = self.drag {
            self.region = None;
        }
        self.drag = CropDrag::None;
    }

    fn on_pointer_down(&mut self, pos: Pos2, surface: &RasterSurface) {
        if let Some(handle) = self.hit_handle(pos) {
            self.drag = CropDrag::Resizing { handle };
            return;
        }
        if let Some(rect) = self.region {
            if rect.contains(pos) {
                self.drag = CropDrag::Moving {
                    grab: pos - rect.min,
                };
                return;
            }
        }
        let anchor = pos.clamp(Pos2::ZERO, pos2(surface.width() as f32, surface.height() as f32));
        self.drag = CropDrag::Creating { anchor };
        self.region = Some(Rect::from_min_size(anchor, Vec2::ZERO));
    }

    fn on_pointer_move(&mut self, pos: Pos2, surface: &RasterSurface) {
        match self.drag {
            CropDrag::None => {}
            CropDrag::Creating { anchor } => {
                let clamped = pos.clamp(
                    Pos2::ZERO,
                    pos2(surface.width() as f32, surface.height() as f32),
                );
                self.region = Some(geometry::drag_rect(anchor, clamped));
            }
            CropDrag::Moving { grab } => self.move_to(pos, grab, surface),
            CropDrag::Resizing { handle } => self.resize_to(handle, pos, surface),
        }
    }

    fn on_pointer_up(
        &mut self,
        _pos: Pos2,
        _surface: &mut RasterSurface,
        _style: &ShapeStyle,
    ) -> ToolOutcome {
        let was_creating = matches!(self.drag, CropDrag::Creating { .. });
        self.drag = CropDrag::None;
        if let Some(rect) = self.region {
            if was_creating && (rect.width() < 1.0 || rect.height() < 1.0) {
                log::debug!("zero-area crop region discarded");
                self.region = None;
                return ToolOutcome::Cancelled;
            }
        }
        // The raster commit happens on an explicit apply, not on pointer-up.
        ToolOutcome::Idle
    }

    fn draft(&self) -> Option<DraftShape> {
        self.region.map(|rect| DraftShape::CropFrame { rect })
    }
}
