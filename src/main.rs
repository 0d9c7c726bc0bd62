mod app;
mod color;
mod config;
mod data;
mod error;
mod render;
mod state;
mod ui;

use anyhow::{Context, Result};

use config::ReportConfig;
use data::loader;
use state::ReportState;

fn main() -> Result<()> {
    env_logger::init();

    let config = ReportConfig::default();

    let dataset = loader::load_file(&config.input)?;
    log::info!(
        "Loaded {} records from {}",
        dataset.len(),
        config.input.display()
    );

    let state = ReportState::new(dataset, config.histogram_bins)?;
    render::render_to_file(&state, &config)
        .with_context(|| format!("saving {}", config.output.display()))?;
    println!("Visualization saved to {}", config.output.display());

    if config.show {
        // The figure is already on disk; a missing display is not fatal.
        if let Err(e) = app::run_viewer(state, &config) {
            log::warn!("Could not open viewer: {e}");
        }
    }

    Ok(())
}
