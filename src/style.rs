use egui::Color32;
use serde::{Deserialize, Serialize};

/// Style applied when a shape draft is committed to the surface.
///
/// The shell mutates its own copy through the toolbar controls and passes an
/// immutable value at commit time; tools never read style state of their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color for lines and rectangle outlines.
    pub stroke: Color32,
    /// Fill color for rectangles.
    pub fill: Color32,
    /// Stroke width in logical pixels.
    pub line_width: f32,
}

pub const MIN_LINE_WIDTH: f32 = 1.0;
pub const MAX_LINE_WIDTH: f32 = 50.0;

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke: Color32::from_rgb(0xee, 0x22, 0x22),
            fill: Color32::TRANSPARENT,
            line_width: 5.0,
        }
    }
}

impl ShapeStyle {
    /// Clamp the line width into the supported range.
    pub fn clamp_line_width(&mut self) {
        self.line_width = self.line_width.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH);
    }
}
