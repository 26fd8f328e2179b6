//! contract-tui - A terminal UI for browsing analyzed contracts
//!
//! This is the main entry point for the contract-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::domain::{DatasetSource, DomainState};
use crate::model::sample_data::sample_contracts;
use crate::tui::Tui;
use anyhow::Result;
use clap::Parser;
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Duration;

/// Browse, filter and export analyzed contracts in the terminal
#[derive(Parser, Debug)]
#[command(name = "contract-tui", version, about, long_about = None)]
struct Cli {
    /// JSON file holding an array of contracts; built-in sample data when omitted
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Directory the contracts.csv export is written to
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Log file; defaults to ~/.contract-tui/contract-tui.log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_or_create_config();

    let log_path = cli
        .log_file
        .clone()
        .or_else(Config::default_log_path)
        .unwrap_or_else(|| PathBuf::from("contract-tui.log"));
    if let Err(e) = logging::init_tracing(&log_path) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let mut app = build_app(&cli, config);
    app.init()?;

    // Setup terminal
    Tui::install_panic_hook();
    let tick_rate = Duration::from_millis(app.config.tick_rate_ms.max(1));
    let mut tui = Tui::new()?.with_tick_rate(tick_rate);
    tui.enter()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!(error = %err, "exiting after error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    tracing::info!("exiting");
    Ok(())
}

/// Read the config file, writing the defaults on first run
///
/// An unreadable file is left alone and the defaults are used.
fn load_or_create_config() -> Config {
    if let Some(config) = Config::load() {
        return config;
    }
    let config = Config::default();
    if !Config::file_exists() {
        if let Err(e) = config.save() {
            eprintln!("Warning: could not write default config: {:#}", e);
        }
    }
    config
}

/// Load the dataset and build the app; a bad dataset falls back to sample data
fn build_app(cli: &Cli, config: Config) -> App {
    let export_dir = config.export_dir(cli.export_dir.as_ref());

    match services::load_dataset(cli.data.as_deref()) {
        Ok((contracts, source)) => {
            tracing::info!(source = %source.describe(), count = contracts.len(), "dataset ready");
            App::new(DomainState::new(contracts, source), config, export_dir)
        }
        Err(e) => {
            tracing::warn!(error = %e, "dataset failed to load, using sample data");
            let domain = DomainState::new(sample_contracts(), DatasetSource::Sample);
            let mut app = App::new(domain, config, export_dir);
            app.error = Some(format!("{:#}. Showing sample data.", e));
            app
        }
    }
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            let area = frame.area();
            if let Err(e) = app.draw(frame, area) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::parse_from([
            "contract-tui",
            "--data",
            "contracts.json",
            "--export-dir",
            "out",
        ]);
        assert_eq!(cli.data, Some(PathBuf::from("contracts.json")));
        assert_eq!(cli.export_dir, Some(PathBuf::from("out")));
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_bad_dataset_falls_back_to_sample() {
        let cli = Cli::parse_from(["contract-tui", "--data", "/nonexistent/contracts.json"]);
        let app = build_app(&cli, Config::default());
        assert_eq!(app.domain.source, DatasetSource::Sample);
        assert!(!app.domain.contracts.is_empty());
        assert!(app.error.is_some());
    }
}
