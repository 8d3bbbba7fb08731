//! Starcodex - desktop viewer for the compiled reference wiki
//!
//! Loads `structure.js` from the site root and browses its documents.
//! An optional first argument is a route to open, e.g. `/классы/механик`.

mod app;
mod ui;

use app::StarcodexApp;
use eframe::egui;
use starcodex::core::logging;

fn main() -> eframe::Result<()> {
    logging::init();

    tracing::info!("Starting Starcodex...");

    let initial_route = std::env::args().nth(1);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Starcodex"),
        ..Default::default()
    };

    eframe::run_native(
        "Starcodex",
        native_options,
        Box::new(|cc| Ok(Box::new(StarcodexApp::new(cc, initial_route)))),
    )
}
