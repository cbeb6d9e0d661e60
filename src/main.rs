mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::LaunchDashApp;
use config::DashConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashConfig::from_env();
    log::debug!("startup configuration: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(&config)))),
    )
}
