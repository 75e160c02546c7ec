use eframe::egui::{self, Color32, ColorImage, Sense, Slider, TextureHandle, TextureOptions};
use log::warn;

use crate::raster::parse_color;
use crate::surface::SurfaceController;
use crate::tools::{ToolKind, ToolState};

const STORAGE_KEY: &str = "doodle_tool_state";

/// Minimal host for a drawing surface: a tool strip and the canvas.
pub struct DoodleApp {
    tools: ToolState,
    surface: Option<SurfaceController>,
    texture: Option<TextureHandle>,
    /// Logical size and pixel ratio the surface was last sized for
    last_layout: Option<(egui::Vec2, f32)>,
    pointer_held: bool,
    dirty: bool,
}

impl DoodleApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let tools = cc
            .storage
            .and_then(|storage| eframe::get_value::<ToolState>(storage, STORAGE_KEY))
            .unwrap_or_default();

        Self {
            tools,
            surface: None,
            texture: None,
            last_layout: None,
            pointer_held: false,
            dirty: true,
        }
    }

    fn tools_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for tool in [ToolKind::Pen, ToolKind::Bucket] {
                if ui.selectable_label(self.tools.tool == tool, tool.name()).clicked() {
                    self.tools.tool = tool;
                }
            }

            ui.separator();

            let mut color = parse_color(&self.tools.color).unwrap_or(Color32::BLACK);
            ui.label("Color:");
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            {
                self.tools.color = color.to_hex();
            }

            ui.label("Size:");
            ui.add(Slider::new(&mut self.tools.size, 1.0..=50.0));

            ui.separator();

            let can_undo = self.surface.as_ref().is_some_and(|s| s.can_undo());
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                if let Some(surface) = &mut self.surface {
                    self.dirty |= surface.undo();
                }
            }
            if ui.button("Clear").clicked() {
                if let Some(surface) = &mut self.surface {
                    surface.clear();
                    self.dirty = true;
                }
            }
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        let (response, painter) = ui.allocate_painter(size, Sense::drag());
        let rect = response.rect;
        let ppp = ui.ctx().pixels_per_point();

        // (re)size the surface when the canvas area or display density changes
        let layout = (rect.size(), ppp);
        if self.last_layout != Some(layout) {
            match &mut self.surface {
                Some(surface) => surface.resize(rect.width(), rect.height(), ppp),
                None => match SurfaceController::with_defaults(rect.width(), rect.height(), ppp) {
                    Ok(surface) => self.surface = Some(surface),
                    Err(err) => warn!("Canvas not ready: {err}"),
                },
            }
            self.last_layout = Some(layout);
            self.dirty = true;
        }

        let Some(surface) = &mut self.surface else {
            return;
        };
        surface.set_tool_state(self.tools.clone());

        let down = response.is_pointer_button_down_on();
        let local = response.interact_pointer_pos().map(|p| (p - rect.min).to_pos2());
        match (self.pointer_held, down, local) {
            (false, true, Some(pos)) => {
                surface.pointer_down(pos);
                self.pointer_held = true;
                self.dirty = true;
            }
            (true, true, Some(pos)) => {
                surface.pointer_move(pos);
                self.dirty = true;
            }
            (true, false, _) => {
                surface.pointer_up();
                self.pointer_held = false;
            }
            _ => {}
        }

        if self.dirty || self.texture.is_none() {
            let image = surface.to_image();
            let color_image = ColorImage::from_rgba_unmultiplied(
                [image.width() as usize, image.height() as usize],
                image.as_raw(),
            );
            match &mut self.texture {
                Some(texture) => texture.set(color_image, TextureOptions::LINEAR),
                None => {
                    self.texture = Some(ui.ctx().load_texture(
                        "doodle_surface",
                        color_image,
                        TextureOptions::LINEAR,
                    ))
                }
            }
            self.dirty = false;
        }

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }
}

impl eframe::App for DoodleApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STORAGE_KEY, &self.tools);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("tools").show(ctx, |ui| self.tools_panel(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.canvas(ui));
    }
}
