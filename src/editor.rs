use egui::{Color32, Key, Modifiers, Pos2, Vec2};
use image::RgbaImage;

use crate::error::{EditorError, EditorResult};
use crate::geometry::GeometryState;
use crate::history::HistoryStack;
use crate::input::InputEvent;
use crate::session::{PointerPhase, ToolSession};
use crate::style::ShapeStyle;
use crate::surface::RasterSurface;
use crate::tools::{Tool, ToolKind, ToolOutcome};

/// The editor core: one raster surface, its history, the tool session, and
/// the display geometry, wired together behind a single facade.
///
/// All mutation happens synchronously inside event handling on one thread;
/// the shell feeds it [`InputEvent`]s and layout sizes and reads back the
/// surface for display.
pub struct Editor {
    surface: RasterSurface,
    history: HistoryStack,
    session: ToolSession,
    geometry: GeometryState,
    style: ShapeStyle,
    background: Color32,
}

impl Editor {
    /// Create an editor with a cleared surface and the initial snapshot
    /// already captured, so the first edit is undoable back to blank.
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        let surface = RasterSurface::new(width, height, background);
        let mut history = HistoryStack::new();
        history.capture(&surface);
        Self {
            surface,
            history,
            session: ToolSession::new(),
            geometry: GeometryState::default(),
            style: ShapeStyle::default(),
            background,
        }
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn session(&self) -> &ToolSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ToolSession {
        &mut self.session
    }

    pub fn geometry(&self) -> &GeometryState {
        &self.geometry
    }

    pub fn style(&self) -> ShapeStyle {
        self.style
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    pub fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
        self.style.clamp_line_width();
    }

    /// Recompute display geometry for this frame. Returns the on-screen
    /// size of the surface inside a container of the given size.
    pub fn layout(&mut self, container: Vec2) -> Vec2 {
        self.geometry.update(self.surface.size(), container)
    }

    /// Record where the displayed surface ended up in device coordinates,
    /// once the shell has placed it.
    pub fn set_display_origin(&mut self, origin: Pos2) {
        self.geometry.origin = origin;
    }

    /// Activate / toggle tools on the session.
    pub fn toggle_tool(&mut self, kind: ToolKind) {
        self.session.toggle(kind, &self.surface);
    }

    pub fn activate_tool(&mut self, kind: ToolKind) {
        self.session.activate(kind, &self.surface);
    }

    pub fn close_tool(&mut self) {
        self.session.deactivate();
    }

    /// Fill the surface with the background color and capture.
    pub fn clear(&mut self) {
        self.surface.clear(self.background);
        self.history.capture(&self.surface);
    }

    /// Replace the surface with a blank one of the new size and capture.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.cancel_gesture();
        self.surface.resize(width, height, self.background);
        self.history.capture(&self.surface);
    }

    /// Consume a decoded image: resize the surface to its natural size, draw
    /// it, and capture exactly once. On error nothing is touched.
    pub fn paste_image(&mut self, img: &RgbaImage) -> EditorResult<()> {
        if img.width() == 0 || img.height() == 0 {
            return Err(EditorError::EmptyImage {
                width: img.width(),
                height: img.height(),
            });
        }
        self.cancel_gesture();
        self.surface.resize(img.width(), img.height(), self.background);
        self.surface.blit(img, 0, 0);
        self.history.capture(&self.surface);
        log::info!("pasted image {}x{}", img.width(), img.height());
        Ok(())
    }

    /// Step history back. Any in-progress gesture is cancelled first so a
    /// later pointer-up cannot commit a draft anchored in a stale buffer.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        self.history.undo(&mut self.surface)
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        self.history.redo(&mut self.surface)
    }

    /// Apply the crop tool's region, capturing once on success.
    pub fn apply_crop(&mut self) -> bool {
        self.session.apply_crop(&mut self.surface, &mut self.history)
    }

    /// Feed one input event through the session. Pointer positions are
    /// mapped from device to logical coordinates here; keyboard events are
    /// resolved to undo/redo. Returns the tool outcome for pointer events.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<ToolOutcome> {
        match event {
            InputEvent::PointerDown { pos } => self.dispatch(PointerPhase::Down, pos),
            InputEvent::PointerMove { pos } => self.dispatch(PointerPhase::Move, pos),
            InputEvent::PointerUp { pos } => self.dispatch(PointerPhase::Up, pos),
            InputEvent::KeyDown { key, modifiers } => {
                self.handle_key(key, modifiers);
                None
            }
        }
    }

    /// Undo/redo shortcuts: modifier+Z, redo on modifier+Shift+Z or
    /// modifier+Y. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        if !modifiers.command {
            return false;
        }
        match key {
            Key::Z if modifiers.shift => self.redo(),
            Key::Z => self.undo(),
            Key::Y => self.redo(),
            _ => return false,
        };
        true
    }

    fn dispatch(&mut self, phase: PointerPhase, device_pos: Pos2) -> Option<ToolOutcome> {
        let logical = self.geometry.to_logical(device_pos);
        let outcome = self.session.dispatch(
            phase,
            logical,
            &mut self.surface,
            &mut self.history,
            &self.style,
        )?;
        if let ToolOutcome::Picked(color) = outcome {
            // The pipette feeds the picked color back into the stroke color.
            self.style.stroke = color;
        }
        Some(outcome)
    }

    fn cancel_gesture(&mut self) {
        if let Some(tool) = self.session.active_mut() {
            tool.cancel();
        }
    }
}
