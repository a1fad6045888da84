use crate::compositor::{self, CompositorError};
use crate::session::{Session, SessionPhase};
use crate::ui_theme::PastelTheme;
use eframe::egui;
use image::Rgba;

// Preview canvas bounds
const MAX_PREVIEW_WIDTH: u32 = 500;
const MAX_PREVIEW_HEIGHT: u32 = 500;

// Text watermark appearance
const WATERMARK_FONT_SIZE: f32 = 40.0;
const WATERMARK_TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

struct StatusLine {
    message: String,
    is_error: bool,
}

pub struct WatermarkApp {
    // Editing state
    session: Session,

    // UI state
    preview: Option<egui::TextureHandle>,
    preview_scale: f32,
    text_prompt: Option<String>,
    status: Option<StatusLine>,

    // UI Theme
    theme: PastelTheme,
}

impl WatermarkApp {
    pub fn new() -> Self {
        Self {
            session: Session::default(),
            preview: None,
            preview_scale: 1.0,
            text_prompt: None,
            status: None,
            theme: PastelTheme::default(),
        }
    }

    fn report_info(&mut self, message: String) {
        log::info!("{}", message);
        self.status = Some(StatusLine {
            message,
            is_error: false,
        });
    }

    fn report_error(&mut self, action: &str, err: &CompositorError) {
        log::error!("Failed to {}: {}", action, err);
        self.status = Some(StatusLine {
            message: format!("Failed to {}: {}", action, err),
            is_error: true,
        });
    }

    fn image_file_dialog(title: &str) -> rfd::FileDialog {
        rfd::FileDialog::new()
            .set_title(title)
            .add_filter("Image files", &["jpeg", "jpg", "png"])
            .add_filter("All files", &["*"])
    }

    fn import_image(&mut self, ctx: &egui::Context) {
        // A cancelled dialog is a no-op.
        let Some(path) = Self::image_file_dialog("Select an image (.jpeg, .jpg, .png)").pick_file()
        else {
            return;
        };

        match compositor::open_image(&path) {
            Ok((img, format)) => {
                log::info!(
                    "Imported {} ({:?}, {}x{})",
                    path.display(),
                    format,
                    img.width(),
                    img.height()
                );
                self.session.import(img, format);
                self.rebuild_preview(ctx);
                self.status = None;
            }
            Err(e) => self.report_error("import image", &e),
        }
    }

    fn add_logo(&mut self, ctx: &egui::Context) {
        let Some(path) = Self::image_file_dialog("Select a logo").pick_file() else {
            return;
        };

        let logo = match compositor::open_image(&path) {
            Ok((logo, _)) => logo,
            Err(e) => {
                self.report_error("load logo", &e);
                return;
            }
        };

        let result = self
            .session
            .apply_overlay(|img| Ok(compositor::apply_logo_overlay(img, &logo)));
        match result {
            Ok(true) => {
                self.rebuild_preview(ctx);
                self.report_info(format!(
                    "Added logo watermark from {}",
                    path.file_name().unwrap_or_default().to_string_lossy()
                ));
            }
            Ok(false) => {}
            Err(e) => self.report_error("add logo watermark", &e),
        }
    }

    fn confirm_text(&mut self, text: &str, ctx: &egui::Context) {
        // An empty prompt is treated like a cancel.
        if text.is_empty() {
            return;
        }

        let result = self.session.apply_overlay(|img| {
            compositor::apply_text_overlay(img, text, WATERMARK_FONT_SIZE, WATERMARK_TEXT_COLOR)
        });
        match result {
            Ok(true) => {
                self.rebuild_preview(ctx);
                self.report_info(format!("Added text watermark \"{}\"", text));
            }
            Ok(false) => {}
            Err(e) => self.report_error("add text watermark", &e),
        }
    }

    fn save_image(&mut self) {
        let dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                let err = CompositorError::from(e);
                self.report_error("save image", &err);
                return;
            }
        };

        match self.session.save_watermarked(&dir) {
            Ok(Some(path)) => self.report_info(format!("Saved {}", path.display())),
            Ok(None) => {
                log::debug!("Save requested with no overlay applied; nothing written");
            }
            Err(e) => self.report_error("save image", &e),
        }
    }

    fn rebuild_preview(&mut self, ctx: &egui::Context) {
        let Some(image) = self.session.image() else {
            self.preview = None;
            return;
        };

        let (scaled, scale) =
            compositor::resize_for_display(image, MAX_PREVIEW_WIDTH, MAX_PREVIEW_HEIGHT);
        let rgba = scaled.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let pixels = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());

        self.preview = Some(ctx.load_texture("image-preview", pixels, egui::TextureOptions::LINEAR));
        self.preview_scale = scale;
    }

    fn show_text_prompt(&mut self, ctx: &egui::Context) {
        let Some(draft) = self.text_prompt.as_mut() else {
            return;
        };

        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("Watermark Text")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Enter the text to add as watermark");
                let response = ui.text_edit_singleline(draft);
                response.request_focus();
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirmed = true;
                }

                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.button("Add").clicked() {
                        confirmed = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if confirmed {
            let text = self.text_prompt.take().unwrap_or_default();
            self.confirm_text(&text, ctx);
        } else if cancelled {
            self.text_prompt = None;
        }
    }

    fn show_actions(&mut self, ui: &mut egui::Ui) {
        match self.session.phase() {
            SessionPhase::NoImage => {
                ui.label(
                    egui::RichText::new("Import an image to get started")
                        .color(self.theme.text_secondary),
                );
            }
            SessionPhase::Loaded => {
                ui.horizontal(|ui| {
                    if ui.button("Add text").clicked() {
                        self.text_prompt = Some(String::new());
                    }
                    ui.add_space(self.theme.spacing_medium);
                    if ui.button("Add logo").clicked() {
                        let ctx = ui.ctx().clone();
                        self.add_logo(&ctx);
                    }
                });
            }
            SessionPhase::OverlayApplied => {
                if ui.button("Save image").clicked() {
                    self.save_image();
                }
            }
        }
    }
}

impl eframe::App for WatermarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.theme.apply_to_ctx(ctx);

        self.show_text_prompt(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(self.theme.spacing_large);
                ui.heading(
                    egui::RichText::new("Add custom watermarks to your images")
                        .color(self.theme.headline)
                        .strong(),
                );
                ui.add_space(self.theme.spacing_large);

                if ui.button("Import Image").clicked() {
                    let ctx = ui.ctx().clone();
                    self.import_image(&ctx);
                }
                ui.add_space(self.theme.spacing_large);

                if let Some(texture) = &self.preview {
                    ui.image((texture.id(), texture.size_vec2()));
                    ui.add_space(self.theme.spacing_medium);
                    ui.label(
                        egui::RichText::new(format!(
                            "Preview at {:.0}% of original size",
                            self.preview_scale * 100.0
                        ))
                        .small()
                        .color(self.theme.text_secondary),
                    );
                    ui.add_space(self.theme.spacing_large);
                }

                self.show_actions(ui);

                if let Some(status) = &self.status {
                    ui.add_space(self.theme.spacing_large);
                    ui.colored_label(
                        self.theme.status_color(status.is_error),
                        &status.message,
                    );
                }
            });
        });
    }
}
