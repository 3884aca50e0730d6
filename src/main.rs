mod app;
mod cli;
mod commands;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use themeportal::{logging, CatalogSource, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(catalog) = cli.catalog {
        config.catalog = catalog;
    }
    if let Some(theme) = cli.theme {
        config.default_theme = theme;
    }

    match cli.command {
        Some(Commands::Init { force }) => {
            logging::init_stderr(&config.logging)?;
            commands::run_init(force)
        }
        Some(Commands::List) => {
            logging::init_stderr(&config.logging)?;
            commands::run_list(&CatalogSource::parse(&config.catalog))
        }
        Some(Commands::Check) => {
            logging::init_stderr(&config.logging)?;
            commands::run_check(
                &CatalogSource::parse(&config.catalog),
                &config.default_theme,
            )
        }
        None => {
            logging::init_file(&config.logging)?;
            commands::run_tui(config)
        }
    }
}
