use std::path::Path;

use eframe::egui;
use gdp_atlas::app::GdpAtlasApp;

/// Directory probed at startup for the World Bank CSV pair.
const DEFAULT_DATA_DIR: &str = "data";

fn main() -> eframe::Result {
    env_logger::init();

    let mut app = GdpAtlasApp::default();
    let data_dir = Path::new(DEFAULT_DATA_DIR);
    if data_dir.is_dir() {
        app.state.load_data_dir(data_dir);
    } else {
        log::info!("No {DEFAULT_DATA_DIR}/ directory; waiting for File → Open");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GDP Atlas – World GDP per Capita",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
