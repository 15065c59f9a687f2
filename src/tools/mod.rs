use egui::{Color32, CursorIcon, Pos2, Rect};

use crate::style::ShapeStyle;
use crate::surface::RasterSurface;

mod crop;
mod pipette;
mod primitive;

pub use crop::{CropHandle, CropTool};
pub use pipette::PipetteTool;
pub use primitive::{PrimitiveKind, PrimitiveTool};

/// What a pointer-up produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolOutcome {
    /// Nothing to report (no gesture was in progress, or the gesture
    /// continues).
    Idle,
    /// The draft was rasterized onto the surface; the session must capture
    /// history exactly once.
    Committed,
    /// The gesture ended without a commit (zero-area draft); no history
    /// entry is made.
    Cancelled,
    /// The pipette read a color; the shell applies it to the current style.
    Picked(Color32),
}

/// Transient overlay the shell paints while a gesture is in progress.
/// Previews never touch the surface buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DraftShape {
    Line { a: Pos2, b: Pos2 },
    Rect { rect: Rect },
    CropFrame { rect: Rect },
}

/// Shared contract for all tools: activation/close lifecycle plus pointer
/// handlers in logical coordinates.
///
/// Default no-op handlers let a tool declare only the events it cares
/// about.
pub trait Tool {
    fn name(&self) -> &'static str;

    /// Cursor the shell shows while this tool is active.
    fn cursor(&self) -> CursorIcon {
        CursorIcon::Crosshair
    }

    /// Tool-specific setup when it becomes the active tool.
    fn on_activate(&mut self, _surface: &RasterSurface) {}

    /// Tool-specific cleanup when another tool takes over or the session is
    /// deactivated. Must leave no half-finished gesture behind.
    fn on_close(&mut self) {}

    /// Abort an in-progress gesture without committing.
    fn cancel(&mut self) {}

    fn on_pointer_down(&mut self, _pos: Pos2, _surface: &RasterSurface) {}

    fn on_pointer_move(&mut self, _pos: Pos2, _surface: &RasterSurface) {}

    /// Finish the gesture. Only `ToolOutcome::Committed` may mutate the
    /// surface.
    fn on_pointer_up(
        &mut self,
        _pos: Pos2,
        _surface: &mut RasterSurface,
        _style: &ShapeStyle,
    ) -> ToolOutcome {
        ToolOutcome::Idle
    }

    /// The live draft to paint as a preview overlay, if any.
    fn draft(&self) -> Option<DraftShape> {
        None
    }
}

/// Identifies a tool in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Crop,
    Line,
    Rect,
    Pipette,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Crop,
        ToolKind::Line,
        ToolKind::Rect,
        ToolKind::Pipette,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Crop => "Crop",
            ToolKind::Line => "Line",
            ToolKind::Rect => "Rect",
            ToolKind::Pipette => "Pipette",
        }
    }
}

/// Concrete tool storage, dispatched by match instead of `Box<dyn Tool>`.
pub enum ToolType {
    Crop(CropTool),
    Primitive(PrimitiveTool),
    Pipette(PipetteTool),
}

impl ToolType {
    /// Instantiate the tool for a toolbar entry.
    pub fn build(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Crop => ToolType::Crop(CropTool::new()),
            ToolKind::Line => ToolType::Primitive(PrimitiveTool::new(PrimitiveKind::Line)),
            ToolKind::Rect => ToolType::Primitive(PrimitiveTool::new(PrimitiveKind::Rect)),
            ToolKind::Pipette => ToolType::Pipette(PipetteTool::new()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolType::Crop(_) => ToolKind::Crop,
            ToolType::Primitive(t) => match t.kind() {
                PrimitiveKind::Line => ToolKind::Line,
                PrimitiveKind::Rect => ToolKind::Rect,
            },
            ToolType::Pipette(_) => ToolKind::Pipette,
        }
    }

    pub fn as_crop(&self) -> Option<&CropTool> {
        match self {
            ToolType::Crop(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_crop_mut(&mut self) -> Option<&mut CropTool> {
        match self {
            ToolType::Crop(t) => Some(t),
            _ => None,
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            ToolType::Crop(t) => t.name(),
            ToolType::Primitive(t) => t.name(),
            ToolType::Pipette(t) => t.name(),
        }
    }

    fn cursor(&self) -> CursorIcon {
        match self {
            ToolType::Crop(t) => t.cursor(),
            ToolType::Primitive(t) => t.cursor(),
            ToolType::Pipette(t) => t.cursor(),
        }
    }

    fn on_activate(&mut self, surface: &RasterSurface) {
        match self {
            ToolType::Crop(t) => t.on_activate(surface),
            ToolType::Primitive(t) => t.on_activate(surface),
            ToolType::Pipette(t) => t.on_activate(surface),
        }
    }

    fn on_close(&mut self) {
        match self {
            ToolType::Crop(t) => t.on_close(),
            ToolType::Primitive(t) => t.on_close(),
            ToolType::Pipette(t) => t.on_close(),
        }
    }

    fn cancel(&mut self) {
        match self {
            ToolType::Crop(t) => t.cancel(),
            ToolType::Primitive(t) => t.cancel(),
            ToolType::Pipette(t) => t.cancel(),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, surface: &RasterSurface) {
        match self {
            ToolType::Crop(t) => t.on_pointer_down(pos, surface),
            ToolType::Primitive(t) => t.on_pointer_down(pos, surface),
            ToolType::Pipette(t) => t.on_pointer_down(pos, surface),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, surface: &RasterSurface) {
        match self {
            ToolType::Crop(t) => t.on_pointer_move(pos, surface),
            ToolType::Primitive(t) => t.on_pointer_move(pos, surface),
            ToolType::Pipette(t) => t.on_pointer_move(pos, surface),
        }
    }

    fn on_pointer_up(
        &mut self,
        pos: Pos2,
        surface: &mut RasterSurface,
        style: &ShapeStyle,
    ) -> ToolOutcome {
        match self {
            ToolType::Crop(t) => t.on_pointer_up(pos, surface, style),
            ToolType::Primitive(t) => t.on_pointer_up(pos, surface, style),
            ToolType::Pipette(t) => t.on_pointer_up(pos, surface, style),
        }
    }

    fn draft(&self) -> Option<DraftShape> {
        match self {
            ToolType::Crop(t) => t.draft(),
            ToolType::Primitive(t) => t.draft(),
            ToolType::Pipette(t) => t.draft(),
        }
    }
}
