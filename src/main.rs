mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use app::PenguinDashApp;
use clap::Parser;
use eframe::egui;
use penguin_dash::data::load_file;
use penguin_dash::DashboardConfig;
use state::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive penguin measurements dashboard", long_about = None)]
struct Cli {
    /// Dataset to load (.csv, .json or .parquet); overrides the config file.
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let dataset = load_file(&config.data_path)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", config.data_path.display()))
        .with_context(|| format!("loading dataset {}", config.data_path.display()))?;

    let title = config.title.clone();
    let state = AppState::new(config, Arc::new(dataset));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(PenguinDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
