//! Logging setup
//!
//! The terminal portal owns stdout, so it logs to a file. Other commands log
//! to stderr. `THEMEPORTAL_LOG` overrides the configured filter.

use crate::config::LoggingConfig;
use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "THEMEPORTAL_LOG";

/// Pick the filter directive: the environment wins over the config
pub fn build_filter(level: &str, env: Option<String>) -> Result<EnvFilter> {
    let directive = env
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| level.to_string());
    EnvFilter::try_new(&directive).with_context(|| format!("Invalid log filter: {directive}"))
}

/// Log to the configured file (append)
pub fn init_file(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level, std::env::var(LOG_ENV).ok())?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .with_context(|| format!("Failed to open log file: {}", config.file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new("%H:%M:%S%.3f".to_string()))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))?;

    info!(
        "=== Session started {} ===",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

/// Log to stderr
pub fn init_stderr(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level, std::env::var(LOG_ENV).ok())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))
}
