//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "themeportal")]
#[command(author, version, about = "Theme Portal - themed landing page for the terminal")]
pub struct Cli {
    /// Configuration file (default: .themeportal.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog path or URL, overrides the configuration
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Theme applied after loading, overrides the configuration
    #[arg(short, long, global = true)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration and a sample theme catalog
    Init {
        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
    /// List catalog themes in menu order
    List,
    /// Validate the catalog and report how each theme will render
    Check,
}
