use egui::Pos2;

use crate::geometry;
use crate::style::ShapeStyle;
use crate::surface::RasterSurface;
use crate::tools::{DraftShape, Tool, ToolOutcome};

/// Which primitive this tool instance draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Line,
    Rect,
}

/// Drag state: Idle until pointer-down, Dragging until pointer-up or
/// cancel.
enum DragState {
    Idle,
    Dragging { anchor: Pos2, current: Pos2 },
}

/// Drag-to-draw tool for line and rectangle primitives.
///
/// While dragging, the draft lives only in the preview; pointer-up rounds
/// the endpoints to pixel boundaries, rasterizes with the style supplied at
/// commit time, and reports `Committed`. A zero-area draft cancels instead,
/// so no-op edits never pollute the undo history.
pub struct PrimitiveTool {
    kind: PrimitiveKind,
    state: DragState,
}

impl PrimitiveTool {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            state: DragState::Idle,
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }
}

impl Tool for PrimitiveTool {
    fn name(&self) -> &'static str {
        match self.kind {
            PrimitiveKind::Line => "line",
            PrimitiveKind::Rect => "rect",
        }
    }

    fn on_activate(&mut self, _surface: &RasterSurface) {
        self.state = DragState::Idle;
    }

    fn on_close(&mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    fn on_pointer_down(&mut self, pos: Pos2, _surface: &RasterSurface) {
        self.state = DragState::Dragging {
            anchor: pos,
            current: pos,
        };
    }

    fn on_pointer_move(&mut self, pos: Pos2, _surface: &RasterSurface) {
        if let DragState::Dragging { current, .. } = &mut self.state {
            *current = pos;
        }
    }

    fn on_pointer_up(
        &mut self,
        pos: Pos2,
        surface: &mut RasterSurface,
        style: &ShapeStyle,
    ) -> ToolOutcome {
        let DragState::Dragging { anchor, .. } = self.state else {
            return ToolOutcome::Idle;
        };
        self.state = DragState::Idle;

        let a = geometry::round_point(anchor);
        let b = geometry::round_point(pos);
        match self.kind {
            PrimitiveKind::Line => {
                if a == b {
                    log::debug!("zero-length line cancelled");
                    return ToolOutcome::Cancelled;
                }
                surface.draw_line(a, b, style.stroke, style.line_width);
            }
            PrimitiveKind::Rect => {
                let rect = geometry::round_rect(geometry::drag_rect(a, b));
                if rect.width() < 1.0 || rect.height() < 1.0 {
                    log::debug!("zero-area rect cancelled");
                    return ToolOutcome::Cancelled;
                }
                surface.fill_rect(rect, style.fill);
                surface.stroke_rect(rect, style.stroke, style.line_width);
            }
        }
        ToolOutcome::Committed
    }

    fn draft(&self) -> Option<DraftShape> {
        let DragState::Dragging { anchor, current } = self.state else {
            return None;
        };
        Some(match self.kind {
            PrimitiveKind::Line => DraftShape::Line {
                a: anchor,
                b: current,
            },
            PrimitiveKind::Rect => DraftShape::Rect {
                rect: geometry::drag_rect(anchor, current),
            },
        })
    }
}
