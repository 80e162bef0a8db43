//! Coin Dashboard terminal frontend.
//!
//! Card grid of the top coins with search, gainer/loser filter and sort,
//! a 24h chart per coin (modal or `/coin/{id}` page) and an archive upload
//! panel. Usage: `coin-dashboard [PATH]`, where PATH is `/` or `/coin/{id}`.

pub mod app;
pub mod config;
pub mod ui;

use std::fs::File;
use std::sync::Mutex;

use coin_dashboard_core::router::Route;
use coin_dashboard_core::CoinDashboard;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::app::App;

fn init_logging() -> Result<()> {
    let path = std::env::temp_dir().join("coin-dashboard.log");
    let file = File::create(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    tracing::info!(log = %path.display(), "logging initialised");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // A missing .env is fine; the variables may come from the shell.
    let _ = dotenvy::dotenv();
    init_logging()?;

    let dashboard = CoinDashboard::from_env()?;
    tracing::info!(?dashboard, "dashboard configured");

    let route = std::env::args()
        .nth(1)
        .map(|path| Route::parse(&path))
        .unwrap_or_default();

    let terminal = ratatui::init();
    let app = App::new(dashboard, route);
    let result = app.run(terminal);
    ratatui::restore();
    result
}
