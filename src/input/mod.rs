use egui::{Context, Key, Modifiers, Pos2, Rect};

/// Domain input events consumed by the tool session, decoupled from egui's
/// frame-based input state.
///
/// Pointer positions are in device (screen) coordinates; the editor maps
/// them onto the logical pixel grid before tools see them.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// Primary button pressed inside the canvas.
    PointerDown { pos: Pos2 },
    /// Pointer moved. Delivered regardless of the canvas rect so drags that
    /// leave the canvas keep tracking, as document-level listeners would.
    PointerMove { pos: Pos2 },
    /// Primary button released.
    PointerUp { pos: Pos2 },
    /// A key press with its modifier flags (undo/redo shortcuts).
    KeyDown { key: Key, modifiers: Modifiers },
}

/// Converts raw egui input into [`InputEvent`]s.
///
/// Down events are gated on the canvas rect; move/up events are not, so an
/// in-progress drag never loses its release.
pub struct InputHandler {
    canvas_rect: Rect,
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            canvas_rect: Rect::NOTHING,
            last_pointer_pos: None,
        }
    }

    /// Update the rect the displayed surface occupies this frame.
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Drain this frame's raw input into domain events, in order.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            for event in &input.events {
                match *event {
                    egui::Event::PointerButton {
                        pos,
                        button: egui::PointerButton::Primary,
                        pressed,
                        ..
                    } => {
                        if pressed {
                            if self.canvas_rect.contains(pos) {
                                events.push(InputEvent::PointerDown { pos });
                            }
                        } else {
                            events.push(InputEvent::PointerUp { pos });
                        }
                        self.last_pointer_pos = Some(pos);
                    }
                    egui::Event::PointerMoved(pos) => {
                        if Some(pos) != self.last_pointer_pos {
                            events.push(InputEvent::PointerMove { pos });
                            self.last_pointer_pos = Some(pos);
                        }
                    }
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => {
                        events.push(InputEvent::KeyDown { key, modifiers });
                    }
                    _ => {}
                }
            }
        });

        events
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
