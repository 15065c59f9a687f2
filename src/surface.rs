use egui::{Color32, ColorImage, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};

use crate::geometry;

/// The editor's single mutable raster: a pixel buffer of fixed logical size,
/// independent of on-screen scale.
///
/// Committed tool operations mutate it in place. Resizing replaces the
/// buffer wholesale (content is redrawn by the caller, never resampled, so
/// undo restores stay bit-exact).
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl RasterSurface {
    /// Create a surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            pixels: RgbaImage::from_pixel(width, height, to_rgba(background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Logical size as a float vector, for geometry math.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Replace the buffer with a new one of the given size, filled with
    /// `background`. Existing content is discarded.
    pub fn resize(&mut self, width: u32, height: u32, background: Color32) {
        let width = width.max(1);
        let height = height.max(1);
        log::debug!("surface resize to {width}x{height}");
        self.pixels = RgbaImage::from_pixel(width, height, to_rgba(background));
    }

    /// Fill the whole surface with one color.
    pub fn clear(&mut self, background: Color32) {
        let px = to_rgba(background);
        for p in self.pixels.pixels_mut() {
            *p = px;
        }
    }

    /// Replace the buffer from a raw snapshot. The data length must match
    /// `width * height * 4`; mismatches are a caller bug and leave the
    /// surface unchanged.
    pub fn restore(&mut self, width: u32, height: u32, data: &[u8]) {
        match RgbaImage::from_raw(width, height, data.to_vec()) {
            Some(img) => self.pixels = img,
            None => log::error!("snapshot size mismatch: {width}x{height}, {} bytes", data.len()),
        }
    }

    /// Read one pixel, None outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x < self.width() && y < self.height() {
            let Rgba([r, g, b, a]) = *self.pixels.get_pixel(x, y);
            Some(Color32::from_rgba_unmultiplied(r, g, b, a))
        } else {
            None
        }
    }

    /// Export for display as an egui texture.
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }

    /// Fill a rectangle (already rounded to pixel boundaries) with `color`,
    /// source-over. Fully transparent fills are a no-op.
    pub fn fill_rect(&mut self, rect: Rect, color: Color32) {
        if color.a() == 0 {
            return;
        }
        let (x0, y0, x1, y1) = self.clip_span(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Stroke a rectangle outline with the stroke centered on the boundary,
    /// the way a 2-D canvas `strokeRect` behaves.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color32, width: f32) {
        if color.a() == 0 {
            return;
        }
        let half = width.max(1.0) / 2.0;
        let outer = geometry::round_rect(rect.expand(half));
        let inner = geometry::round_rect(rect.shrink(half));
        let (x0, y0, x1, y1) = self.clip_span(outer);
        for y in y0..y1 {
            for x in x0..x1 {
                let cx = x as f32 + 0.5;
                let cy = y as f32 + 0.5;
                // Inside the outer band but not in the interior hole.
                if !(inner.is_positive() && inner.contains(egui::pos2(cx, cy))) {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Draw a line segment of the given width with round caps.
    pub fn draw_line(&mut self, a: Pos2, b: Pos2, color: Color32, width: f32) {
        if color.a() == 0 {
            return;
        }
        let radius = width.max(1.0) / 2.0;
        let bbox = Rect::from_two_pos(a, b).expand(radius + 1.0);
        let (x0, y0, x1, y1) = self.clip_span(bbox);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = egui::pos2(x as f32 + 0.5, y as f32 + 0.5);
                if segment_distance(p, a, b) <= radius {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Composite a decoded image at (x, y), source-over. Pixels falling
    /// outside the surface are dropped.
    pub fn blit(&mut self, img: &RgbaImage, x: u32, y: u32) {
        for (sx, sy, px) in img.enumerate_pixels() {
            let dx = x.saturating_add(sx);
            let dy = y.saturating_add(sy);
            if dx < self.width() && dy < self.height() {
                let Rgba([r, g, b, a]) = *px;
                self.blend_pixel(dx, dy, Color32::from_rgba_unmultiplied(r, g, b, a));
            }
        }
    }

    /// Replace the surface with the given subregion. The rect must already
    /// be clamped to the surface and rounded to pixel boundaries; a
    /// degenerate region is ignored.
    pub fn crop(&mut self, rect: Rect) {
        let (x0, y0, x1, y1) = self.clip_span(rect);
        if x1 <= x0 || y1 <= y0 {
            log::warn!("ignoring degenerate crop region {rect:?}");
            return;
        }
        let (w, h) = (x1 - x0, y1 - y0);
        let mut cropped = RgbaImage::new(w, h);
        for y in 0..h {
            for x in 0..w {
                cropped.put_pixel(x, y, *self.pixels.get_pixel(x0 + x, y0 + y));
            }
        }
        log::debug!("cropped surface to {w}x{h} at ({x0},{y0})");
        self.pixels = cropped;
    }

    /// Clip a float rect to the surface, returning integer pixel spans
    /// `[x0, x1) x [y0, y1)`.
    fn clip_span(&self, rect: Rect) -> (u32, u32, u32, u32) {
        let x0 = rect.min.x.floor().max(0.0) as u32;
        let y0 = rect.min.y.floor().max(0.0) as u32;
        let x1 = (rect.max.x.ceil().max(0.0) as u32).min(self.width());
        let y1 = (rect.max.y.ceil().max(0.0) as u32).min(self.height());
        (x0.min(x1), y0.min(y1), x1, y1)
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: Color32) {
        let src = color.to_srgba_unmultiplied();
        let dst = self.pixels.get_pixel_mut(x, y);
        if src[3] == 0xff {
            *dst = Rgba(src);
            return;
        }
        let sa = src[3] as f32 / 255.0;
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            *dst = Rgba([0, 0, 0, 0]);
            return;
        }
        let mut out = [0u8; 4];
        for i in 0..3 {
            let sc = src[i] as f32;
            let dc = dst[i] as f32;
            out[i] = ((sc * sa + dc * da * (1.0 - sa)) / out_a).round() as u8;
        }
        out[3] = (out_a * 255.0).round() as u8;
        *dst = Rgba(out);
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}
