//! Check command implementation
//!
//! Loads the catalog and reports how the portal will treat each theme.

use anyhow::{Context, Result};
use themeportal::catalog::{self, CatalogSource, UreqFetcher};
use themeportal::page::EmbedSlot;
use themeportal::player::track_title;
use themeportal::portal::is_playable_soundtrack;
use themeportal::theme::{glyph_for, parse_css_color, KnownTheme, PALETTE_VARS};
use themeportal::{ThemeCatalog, ThemeDefinition};

/// What happens to a theme's soundtrack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundtrackStatus {
    None,
    /// Loaded into the player with this title
    Playable(String),
    /// Social host: embed only
    SocialHost,
    /// Declared by a theme that is not immersive
    Ignored,
}

/// Report for one theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeReport {
    pub name: String,
    pub css_vars: usize,
    /// Palette variables whose values are not colours
    pub unparsable: Vec<String>,
    /// Embed label and target slot; empty unless immersive
    pub embeds: Vec<(String, EmbedSlot)>,
    /// Embeds listed by a theme that never shows them
    pub ignored_embeds: usize,
    pub soundtrack: SoundtrackStatus,
}

impl ThemeReport {
    pub fn new(name: &str, theme: &ThemeDefinition) -> Self {
        let immersive = KnownTheme::from_id(name).is_some_and(|t| t.is_immersive());

        let unparsable = theme
            .css_vars
            .iter()
            .filter(|(var, value)| {
                PALETTE_VARS.contains(&var.as_str()) && parse_css_color(value).is_none()
            })
            .map(|(var, _)| var.clone())
            .collect();

        let listed = theme.embeds.as_deref().unwrap_or_default();
        let (embeds, ignored_embeds) = if immersive {
            let routed = listed
                .iter()
                .map(|e| (e.label.clone(), EmbedSlot::route(&e.label)))
                .collect();
            (routed, 0)
        } else {
            (Vec::new(), listed.len())
        };

        let soundtrack = match theme.soundtrack.as_deref() {
            None => SoundtrackStatus::None,
            Some(_) if !immersive => SoundtrackStatus::Ignored,
            Some(url) if !is_playable_soundtrack(url) => SoundtrackStatus::SocialHost,
            Some(url) => SoundtrackStatus::Playable(
                track_title(url).unwrap_or_else(|| themeportal::page::TITLE_PLACEHOLDER.to_string()),
            ),
        };

        Self {
            name: name.to_string(),
            css_vars: theme.css_vars.len(),
            unparsable,
            embeds,
            ignored_embeds,
            soundtrack,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.unparsable.is_empty()
            || self.ignored_embeds > 0
            || self.soundtrack == SoundtrackStatus::Ignored
    }

    /// Human-readable lines
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} {} ({} css vars)",
            glyph_for(&self.name),
            self.name,
            self.css_vars
        )];

        for var in &self.unparsable {
            lines.push(format!("   ⚠️  {var}: not a colour, neutral palette used"));
        }
        for (label, slot) in &self.embeds {
            lines.push(format!("   embed '{label}' → {}", slot.title()));
        }
        if self.ignored_embeds > 0 {
            lines.push(format!(
                "   ⚠️  {} embeds ignored (theme is not immersive)",
                self.ignored_embeds
            ));
        }
        match &self.soundtrack {
            SoundtrackStatus::None => {}
            SoundtrackStatus::Playable(title) => lines.push(format!("   soundtrack: {title}")),
            SoundtrackStatus::SocialHost => {
                lines.push("   soundtrack: social host, not played natively".to_string())
            }
            SoundtrackStatus::Ignored => {
                lines.push("   ⚠️  soundtrack ignored (theme is not immersive)".to_string())
            }
        }
        lines
    }
}

/// Reports for every theme, in catalog key order
pub fn check_catalog(catalog: &ThemeCatalog) -> Vec<ThemeReport> {
    catalog
        .names()
        .filter_map(|name| catalog.get(name).map(|theme| ThemeReport::new(name, theme)))
        .collect()
}

/// Run the check command
pub fn run_check(source: &CatalogSource, default_theme: &str) -> Result<()> {
    let catalog = catalog::load(source, &UreqFetcher)
        .with_context(|| format!("Failed to load themes from {source}"))?;

    println!("Catalog: {source} ({} themes)\n", catalog.len());

    let reports = check_catalog(&catalog);
    for report in &reports {
        for line in report.lines() {
            println!("{line}");
        }
    }

    let warnings = reports.iter().filter(|r| r.has_warnings()).count();
    println!();
    if catalog.contains(default_theme) {
        println!("✅ Default theme '{default_theme}' present");
    } else {
        println!("⚠️  Default theme '{default_theme}' missing: nothing is applied on load");
    }
    let missing: Vec<&str> = KnownTheme::all()
        .iter()
        .map(|t| t.id())
        .filter(|id| !catalog.contains(id))
        .collect();
    if !missing.is_empty() {
        println!("ℹ  Known themes without an entry: {}", missing.join(", "));
    }
    println!("{warnings} themes with warnings");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(document: &str, name: &str) -> ThemeReport {
        let catalog = ThemeCatalog::from_json(document).unwrap();
        ThemeReport::new(name, catalog.get(name).unwrap())
    }

    #[test]
    fn test_immersive_report() {
        let r = report(
            r##"{"hallwaysofpower": {
                "--bg-color": "#101010",
                "--text-color": "parchment-ish",
                "--shadow": "0 0 4px black",
                "soundtrack": "tracks/Deep-Focus.mp3",
                "embeds": [
                    {"label": "YouTube", "code": "a"},
                    {"label": "SoundCloud", "code": "b"},
                    {"label": "Other", "code": "c"}
                ]
            }}"##,
            "hallwaysofpower",
        );

        assert_eq!(r.css_vars, 3);
        assert_eq!(r.unparsable, vec!["--text-color".to_string()]);
        assert_eq!(
            r.embeds.iter().map(|(_, s)| *s).collect::<Vec<_>>(),
            vec![EmbedSlot::Video, EmbedSlot::AudioSocial, EmbedSlot::General]
        );
        assert_eq!(r.soundtrack, SoundtrackStatus::Playable("Deep Focus".to_string()));
        assert!(r.has_warnings());
    }

    #[test]
    fn test_social_soundtrack() {
        let r = report(
            r#"{"hallwaysofpower": {"soundtrack": "https://soundcloud.com/a/b"}}"#,
            "hallwaysofpower",
        );
        assert_eq!(r.soundtrack, SoundtrackStatus::SocialHost);
        assert!(!r.has_warnings());
    }

    #[test]
    fn test_non_immersive_ignores_media() {
        let r = report(
            r#"{"forest": {
                "soundtrack": "tracks/forest.mp3",
                "embeds": [{"label": "YouTube", "code": "a"}]
            }}"#,
            "forest",
        );
        assert!(r.embeds.is_empty());
        assert_eq!(r.ignored_embeds, 1);
        assert_eq!(r.soundtrack, SoundtrackStatus::Ignored);
        assert!(r.has_warnings());
        assert!(r.lines().iter().any(|l| l.contains("embeds ignored")));
    }

    #[test]
    fn test_check_catalog_covers_every_theme() {
        let catalog =
            ThemeCatalog::from_json(r#"{"dreamy": {}, "custom": {"--bg-color": "red"}}"#).unwrap();
        let reports = check_catalog(&catalog);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].name, "custom");
        assert!(!reports[0].has_warnings());
        assert_eq!(reports[0].lines()[0], " custom (1 css vars)");
    }
}
