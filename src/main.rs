//! Komplete Kontrol MK2 configurator CLI
//!
//! Sends presets to the keyboard and keeps its displays in step with the
//! knobs and navigation buttons.

use anyhow::Result;
use clap::Parser;
use kontrol_driver::Settings;
use tracing::debug;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let settings_path = cli.settings.clone().unwrap_or_else(Settings::default_path);
    debug!("Loading settings from {:?}", settings_path);
    let settings = Settings::load(&settings_path)?;

    let printer_config =
        commands::create_printer_config(cli.monitor, cli.hex, cli.json, cli.filter.as_deref())?;

    match cli.command {
        Commands::List => commands::list::list(),
        Commands::Apply { preset, page } => commands::apply::apply(
            &settings.resolve_preset(&preset),
            page,
            &settings,
            printer_config,
        ),
        Commands::Run { preset, page } => commands::run::run(
            &settings.resolve_preset(&preset),
            page,
            &settings,
            cli.json,
            printer_config,
        ),
        Commands::Screen {
            image,
            screen,
            x,
            y,
        } => commands::screen::screen(&image, screen.into(), x, y, &settings, printer_config),
        Commands::Dump { preset, page } => {
            commands::dump::dump(&settings.resolve_preset(&preset), page)
        }
        Commands::Init {
            path,
            force,
            set_default_dir,
        } => commands::init::init(
            &path,
            force,
            &settings,
            set_default_dir.then_some(settings_path.as_path()),
        ),
        Commands::Raw { hex } => commands::raw::raw(&hex, printer_config),
    }
}
