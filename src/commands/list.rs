//! List command implementation

use anyhow::{Context, Result};
use themeportal::catalog::{self, CatalogSource, UreqFetcher};
use themeportal::menu::menu_entries;
use themeportal::theme::KnownTheme;
use themeportal::ThemeCatalog;

/// Menu entries in menu order, then themes without a shortcut
pub fn list_lines(catalog: &ThemeCatalog) -> Vec<String> {
    let mut lines: Vec<String> = menu_entries(catalog)
        .into_iter()
        .map(|entry| entry.text)
        .collect();

    lines.extend(
        catalog
            .names()
            .filter(|name| KnownTheme::from_id(name).is_none())
            .map(|name| format!("- {name}")),
    );
    lines
}

/// Run the list command
pub fn run_list(source: &CatalogSource) -> Result<()> {
    let catalog = catalog::load(source, &UreqFetcher)
        .with_context(|| format!("Failed to load themes from {source}"))?;

    if catalog.is_empty() {
        println!("No themes in {source}");
        return Ok(());
    }

    for line in list_lines(&catalog) {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_lines_order() {
        let catalog = ThemeCatalog::from_json(
            r#"{"zen": {}, "forest": {}, "dreamy": {}, "aurora": {}}"#,
        )
        .unwrap();

        assert_eq!(
            list_lines(&catalog),
            vec!["1 ✨ dreamy", "6 🌲 forest", "- aurora", "- zen"]
        );
    }

    #[test]
    fn test_list_lines_empty() {
        assert!(list_lines(&ThemeCatalog::default()).is_empty());
    }
}
