mod dock;
mod error;
mod network;
mod storage;
mod tools;
mod types;
mod ui;
mod utils;

use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Nova Dock",
        options,
        Box::new(|cc| Ok(Box::new(ui::app::App::new(cc)))),
    )
}
