// main.rs - Conway's Game of Life desktop app

use anyhow::Context as _;
use eframe::egui;

mod app;
mod config;
mod scheduler;
mod ui;

use config::AppConfig;
use ui::LifeApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting conway");

    let config = AppConfig::load_or_default();
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let app = LifeApp::new(runtime, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("UI exited with error: {e}"))
}
