use egui::Pos2;

use crate::history::HistoryStack;
use crate::style::ShapeStyle;
use crate::surface::RasterSurface;
use crate::tools::{Tool, ToolKind, ToolOutcome, ToolType};

/// Phase of a pointer gesture, routed to the matching tool handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Owns the active tool: at most one at a time.
///
/// Activating a tool runs the previous tool's close contract first, and any
/// in-progress gesture is force-cancelled so a half-finished draft can never
/// leak across a tool switch.
pub struct ToolSession {
    active: Option<ToolType>,
}

impl ToolSession {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn active(&self) -> Option<&ToolType> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ToolType> {
        self.active.as_mut()
    }

    pub fn active_kind(&self) -> Option<ToolKind> {
        self.active.as_ref().map(|t| t.kind())
    }

    /// Make `kind` the active tool. A no-op if it already is; otherwise the
    /// previous tool is closed before the new tool's activate contract runs.
    pub fn activate(&mut self, kind: ToolKind, surface: &RasterSurface) {
        if self.active_kind() == Some(kind) {
            return;
        }
        self.deactivate();
        let mut tool = ToolType::build(kind);
        tool.on_activate(surface);
        log::info!("tool activated: {}", tool.name());
        self.active = Some(tool);
    }

    /// Toolbar behavior: clicking the active tool's button closes it.
    pub fn toggle(&mut self, kind: ToolKind, surface: &RasterSurface) {
        if self.active_kind() == Some(kind) {
            self.deactivate();
        } else {
            self.activate(kind, surface);
        }
    }

    /// Close the active tool, if any. Idempotent.
    pub fn deactivate(&mut self) {
        if let Some(mut tool) = self.active.take() {
            tool.cancel();
            tool.on_close();
            log::info!("tool closed: {}", tool.name());
        }
    }

    /// Route a pointer event (already in logical coordinates) to the active
    /// tool. A no-op returning `None` when no tool is active.
    ///
    /// A `Committed` outcome captures history here, exactly once, so tools
    /// themselves never touch the stack.
    pub fn dispatch(
        &mut self,
        phase: PointerPhase,
        pos: Pos2,
        surface: &mut RasterSurface,
        history: &mut HistoryStack,
        style: &ShapeStyle,
    ) -> Option<ToolOutcome> {
        let tool = self.active.as_mut()?;
        let outcome = match phase {
            PointerPhase::Down => {
                tool.on_pointer_down(pos, surface);
                ToolOutcome::Idle
            }
            PointerPhase::Move => {
                tool.on_pointer_move(pos, surface);
                ToolOutcome::Idle
            }
            PointerPhase::Up => tool.on_pointer_up(pos, surface, style),
        };
        if outcome == ToolOutcome::Committed {
            history.capture(surface);
        }
        Some(outcome)
    }

    /// Apply the crop region to the surface and capture history. Returns
    /// false (no capture) when the crop tool is not active or has no region.
    pub fn apply_crop(
        &mut self,
        surface: &mut RasterSurface,
        history: &mut HistoryStack,
    ) -> bool {
        let Some(crop) = self.active.as_mut().and_then(|t| t.as_crop_mut()) else {
            return false;
        };
        if crop.apply(surface) {
            history.capture(surface);
            true
        } else {
            false
        }
    }
}

impl Default for ToolSession {
    fn default() -> Self {
        Self::new()
    }
}
