use clap::Parser;
use std::process::ExitCode;

mod config;
mod decode;
mod error;
mod gpu;
mod logging;
mod state;
mod ui;

use config::{Cli, Config};
use decode::bulk::{self, LoadProgress};
use error::ViewerError;
use state::catalog::Catalog;
use state::chosen::ChosenDir;
use state::session::ViewerSession;

fn main() -> ExitCode {
    logging::init_tracing();
    let config = Config::from_cli(Cli::parse());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Scan, load everything, then hand the session to the window
fn run(config: &Config) -> Result<(), ViewerError> {
    let mut catalog = Catalog::scan(&config.root)?;
    let chosen = ChosenDir::open(catalog.root(), &config.output)?;
    tracing::info!(output = %chosen.path().display(), "📂 Accepted images will be linked here");
    catalog.recover(&chosen);

    // Load phase: nothing interactive starts until every decode has finished
    let progress = LoadProgress::default();
    let report = bulk::load_catalog(&mut catalog, &progress)?;
    if report.failed > 0 {
        tracing::warn!("⚠️  {} of {} images failed to load and will show blank", report.failed, report.total);
    }

    let session = ViewerSession::new(catalog, chosen);
    ui::viewer::run(session, config)
}
