// src/main.rs
use eframe::egui;
use anyhow::Result;

mod analysis;
mod app;
mod config;
mod error;
mod file;
mod state;
mod ui;

use app::SimApp;
use config::AppSettings;

fn main() -> Result<()> {
    env_logger::init();

    let settings = AppSettings::load_or_default();
    log::info!("Starting probsim (seed: {:?})", settings.seed);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 680.0])
            .with_title("Probability Simulator"),
        ..Default::default()
    };

    eframe::run_native(
        "probsim",
        options,
        Box::new(move |cc| Box::new(SimApp::new(cc, settings))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
