use egui::{CursorIcon, Pos2};

use crate::style::ShapeStyle;
use crate::surface::RasterSurface;
use crate::tools::{Tool, ToolOutcome};

/// Color-pick tool: reads the surface pixel under the pointer on release.
/// Never mutates the surface or the history.
pub struct PipetteTool {
    _private: (),
}

impl PipetteTool {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for PipetteTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for PipetteTool {
    fn name(&self) -> &'static str {
        "pipette"
    }

    fn cursor(&self) -> CursorIcon {
        CursorIcon::PointingHand
    }

    fn on_pointer_up(
        &mut self,
        pos: Pos2,
        surface: &mut RasterSurface,
        _style: &ShapeStyle,
    ) -> ToolOutcome {
        if pos.x < 0.0 || pos.y < 0.0 {
            return ToolOutcome::Idle;
        }
        match surface.pixel(pos.x as u32, pos.y as u32) {
            Some(color) => {
                log::debug!("picked color {color:?} at ({:.0},{:.0})", pos.x, pos.y);
                ToolOutcome::Picked(color)
            }
            None => ToolOutcome::Idle,
        }
    }
}
