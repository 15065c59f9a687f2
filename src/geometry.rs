use egui::{Pos2, Rect, Vec2, pos2};

/// Which on-screen dimension is clamped to the container when the surface
/// does not fit at its natural size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// The displayed width fills the container; height follows the aspect ratio.
    WidthBound,
    /// The displayed height fills the container; width follows the aspect ratio.
    HeightBound,
}

/// Mapping between device/display pixels and the surface's logical pixel grid.
///
/// Recomputed on every resize or content-size change; a stale scale factor
/// misplaces pointer coordinates, so the shell must call
/// [`GeometryState::update`] whenever either size changes.
#[derive(Debug, Clone, Copy)]
pub struct GeometryState {
    /// Logical pixels per display pixel (uniform on both axes).
    pub scale: f32,
    /// Top-left of the displayed surface, in device coordinates.
    pub origin: Pos2,
    /// Current fit mode, None while the surface fits at its natural size.
    pub fit: Option<FitMode>,
}

impl Default for GeometryState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            origin: Pos2::ZERO,
            fit: None,
        }
    }
}

impl GeometryState {
    /// Recompute the display size and scale for a surface of `surface_size`
    /// logical pixels shown inside `container` display pixels.
    ///
    /// Returns the on-screen size. The fit mode is re-evaluated on every
    /// call but only swapped when the width/height comparison flips, so a
    /// stream of resize events does not thrash the layout.
    pub fn update(&mut self, surface_size: Vec2, container: Vec2) -> Vec2 {
        let display = if surface_size.x > container.x || surface_size.y > container.y {
            let mode = fit_mode(container, content_ratio(surface_size));
            if self.fit != Some(mode) {
                log::debug!("fit mode changed to {mode:?}");
                self.fit = Some(mode);
            }
            match mode {
                FitMode::WidthBound => {
                    Vec2::new(container.x, container.x / content_ratio(surface_size))
                }
                FitMode::HeightBound => {
                    Vec2::new(container.y * content_ratio(surface_size), container.y)
                }
            }
        } else {
            self.fit = None;
            surface_size
        };
        self.scale = compute_scale(surface_size, display);
        display
    }

    /// Map a device-space point to the surface's logical pixel grid.
    pub fn to_logical(&self, device: Pos2) -> Pos2 {
        to_logical(device - self.origin.to_vec2(), self.scale)
    }
}

/// Scale factor between the surface's logical width and its displayed width.
///
/// Falls back to 1.0 for a degenerate display size rather than dividing by
/// zero.
pub fn compute_scale(surface_size: Vec2, display_size: Vec2) -> f32 {
    if display_size.x <= 0.0 {
        return 1.0;
    }
    surface_size.x / display_size.x
}

/// Map a display-space point to logical coordinates under a uniform scale.
pub fn to_logical(display: Pos2, scale: f32) -> Pos2 {
    pos2(display.x * scale, display.y * scale)
}

/// Decide which dimension is clamped to the container.
///
/// A container with zero height is treated as width-bound so the ratio
/// comparison never divides by zero.
pub fn fit_mode(container: Vec2, content_ratio: f32) -> FitMode {
    if container.y <= 0.0 {
        return FitMode::WidthBound;
    }
    if container.x / container.y < content_ratio {
        FitMode::WidthBound
    } else {
        FitMode::HeightBound
    }
}

fn content_ratio(size: Vec2) -> f32 {
    if size.y <= 0.0 { 1.0 } else { size.x / size.y }
}

/// Rectangle spanned by two drag endpoints, normalized so min <= max on
/// both axes.
pub fn drag_rect(a: Pos2, b: Pos2) -> Rect {
    Rect::from_two_pos(a, b)
}

/// Clamp a rectangle to the surface bounds, preserving as much of it as
/// fits. A rectangle entirely outside collapses onto the nearest edge.
pub fn clamp_rect(rect: Rect, width: u32, height: u32) -> Rect {
    let max = pos2(width as f32, height as f32);
    Rect::from_min_max(
        rect.min.clamp(Pos2::ZERO, max),
        rect.max.clamp(Pos2::ZERO, max),
    )
}

/// Round a rectangle outward onto integer pixel boundaries. Committing on
/// whole pixels avoids seams between the preview and the rasterized result.
pub fn round_rect(rect: Rect) -> Rect {
    Rect::from_min_max(
        pos2(rect.min.x.round(), rect.min.y.round()),
        pos2(rect.max.x.round(), rect.max.y.round()),
    )
}

/// Round a point to the nearest integer pixel boundary.
pub fn round_point(p: Pos2) -> Pos2 {
    pos2(p.x.round(), p.y.round())
}
