use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crawlview::app::App;
use crawlview::config::ViewConfig;
use crawlview::controller::Controller;
use crawlview::world::demo::DemoEngine;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("crawlview.json"));
    let config = ViewConfig::load(&path).with_context(|| format!("loading {}", path.display()))?;
    tracing::info!(assets = %config.assets_dir.display(), radius = config.view_radius, "starting");

    let controller = Controller::new(DemoEngine::new(), config);
    App::new(controller).run().context("running the view")?;
    Ok(())
}
