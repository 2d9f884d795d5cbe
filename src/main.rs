mod app;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::IrisApp;
use eframe::egui;
use iris_explorer::config::AppConfig;
use iris_explorer::data::loader;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::from_env().context("reading configuration")?;
    let dataset = match &config.data_path {
        Some(path) => loader::load_file(path)
            .with_context(|| format!("loading dataset from {}", path.display()))?,
        None => loader::load_bundled()?,
    };
    log::info!(
        "Loaded {} records ({:?} layout, {} histogram bins)",
        dataset.len(),
        config.variant,
        config.histogram_bins
    );

    let state = AppState::new(config, dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Iris Data Exploration",
        options,
        Box::new(move |_cc| Ok(Box::new(IrisApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}
