//! Init command implementation

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use themeportal::catalog::DEFAULT_CATALOG;
use themeportal::config::CONFIG_FILE_NAME;
use themeportal::Config;

/// Sample catalog with the six known themes
pub const SAMPLE_CATALOG: &str = include_str!("../../templates/themes.json");

/// Run the init command
pub fn run_init(force: bool) -> Result<()> {
    println!("🚀 Initializing themeportal...\n");

    // 1. Configuration
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    if !config_path.exists() || force {
        Config::generate_default(&config_path)?;
        println!("✅ Created configuration: {CONFIG_FILE_NAME}");
    } else {
        println!("📄 Configuration file already exists (use --force to overwrite)");
    }

    // 2. Sample catalog
    let catalog_path = PathBuf::from(DEFAULT_CATALOG);
    if !catalog_path.exists() || force {
        fs::write(&catalog_path, SAMPLE_CATALOG)
            .with_context(|| format!("Failed to write {}", catalog_path.display()))?;
        println!("✅ Created theme catalog: {DEFAULT_CATALOG}");
    } else {
        println!("📄 Theme catalog already exists (use --force to overwrite)");
    }

    println!("\n🎉 themeportal initialization complete!");
    println!("\nUsage:");
    println!("  1. Run 'themeportal' to open the portal");
    println!("  2. Press 1-6 or Esc to switch themes");
    println!("  3. Switch to hallwaysofpower (5) and press Space to hear its soundtrack");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use themeportal::ThemeCatalog;

    /// Run `f` with a fresh temporary directory as the working directory
    fn run_in_temp_dir<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original_dir = env::current_dir().unwrap();
        let temp_dir = tempfile::tempdir().unwrap();
        env::set_current_dir(&temp_dir).unwrap();

        let result = f();

        env::set_current_dir(&original_dir).unwrap();
        result
    }

    #[test]
    fn test_sample_catalog_has_known_themes() {
        let catalog = ThemeCatalog::from_json(SAMPLE_CATALOG).unwrap();
        for theme in themeportal::KnownTheme::all() {
            assert!(catalog.contains(theme.id()), "missing {theme}");
        }
        let immersive = catalog.get("hallwaysofpower").unwrap();
        assert!(immersive.soundtrack.is_some());
        assert_eq!(immersive.embeds.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    #[serial]
    fn test_init_creates_files() {
        run_in_temp_dir(|| {
            run_init(false).unwrap();

            let config = Config::load().unwrap();
            assert_eq!(config.default_theme, "dreamy");
            let written = fs::read_to_string(DEFAULT_CATALOG).unwrap();
            assert_eq!(written, SAMPLE_CATALOG);
        });
    }

    #[test]
    #[serial]
    fn test_init_keeps_existing_without_force() {
        run_in_temp_dir(|| {
            fs::write(DEFAULT_CATALOG, "{}").unwrap();

            run_init(false).unwrap();
            assert_eq!(fs::read_to_string(DEFAULT_CATALOG).unwrap(), "{}");

            run_init(true).unwrap();
            assert_eq!(fs::read_to_string(DEFAULT_CATALOG).unwrap(), SAMPLE_CATALOG);
        });
    }
}
