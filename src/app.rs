use egui::{Color32, Pos2, Rect, Stroke, TextureHandle, TextureOptions, Vec2, pos2};

use crate::editor::Editor;
use crate::input::InputHandler;
use crate::loader::ImageLoader;
use crate::style::{MAX_LINE_WIDTH, MIN_LINE_WIDTH};
use crate::tools::{DraftShape, Tool, ToolKind};

const STYLE_STORAGE_KEY: &str = "rasterro_style";
const DEFAULT_SURFACE_SIZE: (u32, u32) = (800, 600);

/// The eframe shell around the editor core: toolbar, canvas panel, texture
/// upload, and input routing.
pub struct EditorApp {
    editor: Editor,
    loader: ImageLoader,
    input: InputHandler,
    texture: Option<TextureHandle>,
    /// (history len, cursor) of the last uploaded texture; a mismatch means
    /// the surface changed and the texture must be re-uploaded.
    uploaded_revision: Option<(usize, usize)>,
    aspect_lock: bool,
    last_error: Option<String>,
}

impl EditorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut editor = Editor::new(
            DEFAULT_SURFACE_SIZE.0,
            DEFAULT_SURFACE_SIZE.1,
            Color32::WHITE,
        );
        if let Some(storage) = cc.storage {
            if let Some(json) = storage.get_string(STYLE_STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(style) => editor.set_style(style),
                    Err(err) => log::warn!("ignoring saved style: {err}"),
                }
            }
        }
        Self {
            editor,
            loader: ImageLoader::new(),
            input: InputHandler::new(),
            texture: None,
            uploaded_revision: None,
            aspect_lock: false,
            last_error: None,
        }
    }

    fn surface_revision(&self) -> (usize, usize) {
        (self.editor.history().len(), self.editor.history().cursor())
    }

    /// Pick up finished decode tasks; each one is a single committed edit.
    fn poll_loader(&mut self) {
        for result in self.loader.poll() {
            match result.and_then(|img| self.editor.paste_image(&img)) {
                Ok(()) => self.last_error = None,
                Err(err) => {
                    log::error!("image paste failed: {err}");
                    self.last_error = Some(err.to_string());
                }
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for kind in ToolKind::ALL {
                let selected = self.editor.session().active_kind() == Some(kind);
                if ui.selectable_label(selected, kind.label()).clicked() {
                    self.editor.toggle_tool(kind);
                }
            }

            ui.separator();
            self.tool_controls(ui);

            ui.separator();
            if ui
                .add_enabled(self.editor.history().can_undo(), egui::Button::new("Undo"))
                .clicked()
            {
                self.editor.undo();
            }
            if ui
                .add_enabled(self.editor.history().can_redo(), egui::Button::new("Redo"))
                .clicked()
            {
                self.editor.redo();
            }
            if ui.button("Clear").clicked() {
                self.editor.clear();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let surface = self.editor.surface();
                ui.label(format!("{} x {}", surface.width(), surface.height()));
                if let Some(err) = &self.last_error {
                    if ui.small_button("x").clicked() {
                        self.last_error = None;
                    } else {
                        ui.colored_label(Color32::RED, err);
                    }
                }
            });
        });
    }

    /// Per-tool controls, mirroring what each tool exposes in its bar.
    fn tool_controls(&mut self, ui: &mut egui::Ui) {
        let Some(kind) = self.editor.session().active_kind() else {
            return;
        };
        let mut style = self.editor.style();
        match kind {
            ToolKind::Line => {
                ui.label("stroke");
                ui.color_edit_button_srgba(&mut style.stroke);
                ui.add(
                    egui::DragValue::new(&mut style.line_width)
                        .range(MIN_LINE_WIDTH..=MAX_LINE_WIDTH)
                        .suffix("px"),
                );
            }
            ToolKind::Rect => {
                ui.label("stroke");
                ui.color_edit_button_srgba(&mut style.stroke);
                ui.label("fill");
                ui.color_edit_button_srgba(&mut style.fill);
                ui.add(
                    egui::DragValue::new(&mut style.line_width)
                        .range(MIN_LINE_WIDTH..=MAX_LINE_WIDTH)
                        .suffix("px"),
                );
            }
            ToolKind::Crop => {
                let has_region = self
                    .editor
                    .session()
                    .active()
                    .and_then(|t| t.as_crop())
                    .is_some_and(|c| c.has_region());
                if ui
                    .add_enabled(has_region, egui::Button::new("Apply"))
                    .clicked()
                {
                    self.editor.apply_crop();
                    self.editor.close_tool();
                }
                if ui.button("Cancel").clicked() {
                    self.editor.close_tool();
                }
                if ui.checkbox(&mut self.aspect_lock, "lock aspect").changed() {
                    let ratio = self.aspect_lock.then(|| {
                        let s = self.editor.surface();
                        s.width() as f32 / s.height() as f32
                    });
                    if let Some(crop) = self
                        .editor
                        .session_mut()
                        .active_mut()
                        .and_then(|t| t.as_crop_mut())
                    {
                        crop.set_aspect_lock(ratio);
                    }
                }
            }
            ToolKind::Pipette => {
                ui.label("click the canvas to pick the stroke color");
                ui.color_edit_button_srgba(&mut style.stroke);
            }
        }
        self.editor.set_style(style);
    }

    fn canvas(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let panel_rect = ui.available_rect_before_wrap();
        let display = self.editor.layout(panel_rect.size());
        let canvas_rect = Rect::from_center_size(panel_rect.center(), display);
        self.editor.set_display_origin(canvas_rect.min);
        self.input.set_canvas_rect(canvas_rect);

        // Re-upload the surface texture only when the visible state moved.
        let revision = self.surface_revision();
        if self.uploaded_revision != Some(revision) || self.texture.is_none() {
            let img = self.editor.surface().to_color_image();
            match &mut self.texture {
                Some(tex) => tex.set(img, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("surface", img, TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = Some(revision);
        }

        let painter = ui.painter_at(panel_rect);
        if let Some(tex) = &self.texture {
            painter.image(
                tex.id(),
                canvas_rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        if let Some(tool) = self.editor.session().active() {
            if canvas_rect.contains(ctx.pointer_hover_pos().unwrap_or(Pos2::ZERO)) {
                ctx.output_mut(|o| o.cursor_icon = tool.cursor());
            }
            if let Some(draft) = tool.draft() {
                self.paint_draft(&painter, draft, canvas_rect.min);
            }
        }
    }

    /// Paint the in-progress draft on top of the texture. Logical
    /// coordinates scale back to display space here; the surface buffer is
    /// untouched.
    fn paint_draft(&self, painter: &egui::Painter, draft: DraftShape, origin: Pos2) {
        let scale = self.editor.geometry().scale;
        let inv = if scale > 0.0 { 1.0 / scale } else { 1.0 };
        let to_display = |p: Pos2| origin + (p.to_vec2() * inv);
        let style = self.editor.style();

        match draft {
            DraftShape::Line { a, b } => {
                painter.line_segment(
                    [to_display(a), to_display(b)],
                    Stroke::new(style.line_width * inv, style.stroke),
                );
            }
            DraftShape::Rect { rect } => {
                let rect = Rect::from_min_max(to_display(rect.min), to_display(rect.max));
                painter.rect_filled(rect, 0.0, style.fill);
                painter.rect_stroke(rect, 0.0, Stroke::new(style.line_width * inv, style.stroke));
            }
            DraftShape::CropFrame { rect } => {
                let rect = Rect::from_min_max(to_display(rect.min), to_display(rect.max));
                painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::BLACK));
                painter.rect_stroke(rect.expand(1.0), 0.0, Stroke::new(1.0, Color32::WHITE));
                for handle in crop_handle_points(rect) {
                    painter.rect_filled(
                        Rect::from_center_size(handle, Vec2::splat(6.0)),
                        0.0,
                        Color32::WHITE,
                    );
                    painter.rect_stroke(
                        Rect::from_center_size(handle, Vec2::splat(6.0)),
                        0.0,
                        Stroke::new(1.0, Color32::BLACK),
                    );
                }
            }
        }
    }
}

fn crop_handle_points(rect: Rect) -> [Pos2; 8] {
    let c = rect.center();
    [
        rect.min,
        pos2(c.x, rect.min.y),
        pos2(rect.max.x, rect.min.y),
        pos2(rect.max.x, c.y),
        rect.max,
        pos2(c.x, rect.max.y),
        pos2(rect.min.x, rect.max.y),
        pos2(rect.min.x, c.y),
    ]
}

impl eframe::App for EditorApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string(&self.editor.style()) {
            Ok(json) => storage.set_string(STYLE_STORAGE_KEY, json),
            Err(err) => log::warn!("failed to serialize style: {err}"),
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.loader.collect_dropped_files(ctx);
        self.poll_loader();
        if self.loader.is_busy() {
            // Keep polling until the decode lands.
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas(ui, ctx);
        });

        for event in self.input.process_input(ctx) {
            self.editor.handle_input(event);
        }
    }
}
