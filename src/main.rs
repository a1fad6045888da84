mod app;
mod compositor;
mod session;
mod ui_theme;

use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([700.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Watermark Studio",
        options,
        Box::new(|_cc| Ok(Box::new(app::WatermarkApp::new()))),
    )
}
