//! Theme catalog loading for themeportal
//!
//! The catalog is a JSON object keyed by theme name. Each theme carries
//! optional `backgroundImage`, `soundtrack` and `embeds` keys plus any number
//! of `--*` CSS custom properties. It is fetched from a local path or an
//! http(s) URL in a single attempt.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Default catalog location, relative to the working directory
pub const DEFAULT_CATALOG: &str = "themes.json";

/// Prefix shared by every CSS custom property key
pub const CSS_VAR_PREFIX: &str = "--";

// ==================== Data Model ====================

/// An embed listed by a theme: `label` routes it to a slot, `code` is raw markup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmbedSpec {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub code: String,
}

/// One theme of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeDefinition {
    /// CSS custom properties (`--name` → value), in key order
    pub css_vars: BTreeMap<String, String>,
    pub background_image: Option<String>,
    pub embeds: Option<Vec<EmbedSpec>>,
    pub soundtrack: Option<String>,
}

/// Wire shape of a theme before the `--*` keys are pulled out
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTheme {
    #[serde(default)]
    background_image: Option<String>,
    #[serde(default)]
    soundtrack: Option<String>,
    #[serde(default)]
    embeds: Option<Vec<EmbedSpec>>,
    #[serde(flatten)]
    rest: BTreeMap<String, serde_json::Value>,
}

impl RawTheme {
    fn into_definition(self, theme: &str) -> Result<ThemeDefinition, CatalogLoadError> {
        let mut css_vars = BTreeMap::new();
        for (key, value) in self.rest {
            if !key.starts_with(CSS_VAR_PREFIX) {
                continue;
            }
            match value {
                serde_json::Value::String(s) => {
                    css_vars.insert(key, s);
                }
                other => {
                    return Err(CatalogLoadError::Malformed(format!(
                        "theme '{theme}': value of {key} must be a string, got {other}"
                    )));
                }
            }
        }

        Ok(ThemeDefinition {
            css_vars,
            background_image: self.background_image,
            embeds: self.embeds,
            soundtrack: self.soundtrack,
        })
    }
}

/// All themes of one load, keyed by name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeCatalog {
    themes: BTreeMap<String, ThemeDefinition>,
}

impl ThemeCatalog {
    /// Parse a catalog document
    pub fn from_json(document: &str) -> Result<Self, CatalogLoadError> {
        let raw: BTreeMap<String, RawTheme> = serde_json::from_str(document)
            .map_err(|e| CatalogLoadError::Malformed(e.to_string()))?;

        let mut themes = BTreeMap::new();
        for (name, theme) in raw {
            let definition = theme.into_definition(&name)?;
            themes.insert(name, definition);
        }

        Ok(Self { themes })
    }

    pub fn get(&self, name: &str) -> Option<&ThemeDefinition> {
        self.themes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Theme names in key order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

// ==================== Errors ====================

/// Why a catalog could not be loaded
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The local file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request never produced a response
    #[error("failed to fetch {url}: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status
    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// The document is not a valid catalog
    #[error("malformed catalog: {0}")]
    Malformed(String),
}

// ==================== Source & Fetching ====================

/// Where the catalog lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// Interpret a config/CLI value: `http(s)://` is a URL, anything else a path
    pub fn parse(value: &str) -> Self {
        let lower = value.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Url(value.to_string())
        } else {
            CatalogSource::Path(PathBuf::from(value))
        }
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        CatalogSource::Path(PathBuf::from(DEFAULT_CATALOG))
    }
}

impl Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Path(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// HTTP response abstraction
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Trait for fetching remote catalogs (allows mocking)
#[cfg_attr(test, automock)]
pub trait Fetcher: Send + Sync {
    /// GET a URL; transport failures are errors, any status is a response
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Real fetcher using ureq
#[derive(Default)]
pub struct UreqFetcher;

impl Fetcher for UreqFetcher {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = match ureq::get(url).set("Cache-Control", "no-store").call() {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(e).context("HTTP GET failed"),
        };
        let status = response.status();
        let body = response
            .into_string()
            .context("Failed to read response body")?;
        Ok(HttpResponse { status, body })
    }
}

/// Load the catalog in a single attempt
pub fn load<F: Fetcher + ?Sized>(
    source: &CatalogSource,
    fetcher: &F,
) -> Result<ThemeCatalog, CatalogLoadError> {
    let document = match source {
        CatalogSource::Path(path) => {
            fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
                path: path.clone(),
                source,
            })?
        }
        CatalogSource::Url(url) => {
            let response = fetcher
                .get(url)
                .map_err(|e| CatalogLoadError::Transport {
                    url: url.clone(),
                    message: format!("{e:#}"),
                })?;
            if !(200..300).contains(&response.status) {
                return Err(CatalogLoadError::Status {
                    url: url.clone(),
                    status: response.status,
                });
            }
            response.body
        }
    };

    ThemeCatalog::from_json(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r##"{
        "dreamy": {
            "--bg-color": "#1b1030",
            "--text-color": "#f5e9ff",
            "backgroundImage": "img/dreamy.jpg"
        },
        "hallwaysofpower": {
            "--bg-color": "#101010",
            "soundtrack": "tracks/Deep-Focus.mp3",
            "embeds": [
                { "label": "YouTube walkthrough", "code": "<iframe src=\"https://youtube.com/embed/x\"></iframe>" },
                { "label": "notes" }
            ],
            "title": "ignored"
        }
    }"##;

    #[test]
    fn test_parse_catalog() {
        let catalog = ThemeCatalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);

        let dreamy = catalog.get("dreamy").unwrap();
        assert_eq!(dreamy.css_vars.len(), 2);
        assert_eq!(dreamy.css_vars["--bg-color"], "#1b1030");
        assert_eq!(dreamy.background_image.as_deref(), Some("img/dreamy.jpg"));
        assert!(dreamy.embeds.is_none());
        assert!(dreamy.soundtrack.is_none());

        let hall = catalog.get("hallwaysofpower").unwrap();
        assert_eq!(hall.css_vars.len(), 1);
        assert_eq!(hall.soundtrack.as_deref(), Some("tracks/Deep-Focus.mp3"));
        let embeds = hall.embeds.as_ref().unwrap();
        assert_eq!(embeds.len(), 2);
        assert_eq!(embeds[0].label, "YouTube walkthrough");
        assert_eq!(embeds[1].code, "");
    }

    #[test]
    fn test_parse_ignores_non_css_keys() {
        let catalog = ThemeCatalog::from_json(SAMPLE).unwrap();
        let hall = catalog.get("hallwaysofpower").unwrap();
        assert!(!hall.css_vars.contains_key("title"));
    }

    #[test]
    fn test_parse_rejects_non_string_css_value() {
        let err = ThemeCatalog::from_json(r#"{"misty": {"--gap": 4}}"#).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Malformed(_)));
        assert!(err.to_string().contains("--gap"));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(
            ThemeCatalog::from_json("[1, 2, 3]"),
            Err(CatalogLoadError::Malformed(_))
        ));
        assert!(matches!(
            ThemeCatalog::from_json("{ not json"),
            Err(CatalogLoadError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = ThemeCatalog::from_json("{}").unwrap();
        assert!(catalog.is_empty());
        assert!(!catalog.contains("dreamy"));
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(
            CatalogSource::parse("themes.json"),
            CatalogSource::Path(PathBuf::from("themes.json"))
        );
        assert_eq!(
            CatalogSource::parse("https://example.com/themes.json"),
            CatalogSource::Url("https://example.com/themes.json".to_string())
        );
        assert_eq!(
            CatalogSource::parse("HTTP://example.com/t.json"),
            CatalogSource::Url("HTTP://example.com/t.json".to_string())
        );
        assert_eq!(CatalogSource::default().to_string(), "themes.json");
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{SAMPLE}").unwrap();

        let source = CatalogSource::Path(temp_file.path().to_path_buf());
        let catalog = load(&source, &UreqFetcher).unwrap();
        assert!(catalog.contains("dreamy"));
        assert!(catalog.contains("hallwaysofpower"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = CatalogSource::Path(dir.path().join("missing.json"));
        let err = load(&source, &UreqFetcher).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io { .. }));
    }

    #[test]
    fn test_load_url_with_mock() {
        let mut mock = MockFetcher::new();
        mock.expect_get()
            .withf(|url: &str| url == "https://example.com/themes.json")
            .times(1)
            .returning(|_| {
                Ok(HttpResponse {
                    status: 200,
                    body: SAMPLE.to_string(),
                })
            });

        let source = CatalogSource::parse("https://example.com/themes.json");
        let catalog = load(&source, &mock).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_url_bad_status() {
        let mut mock = MockFetcher::new();
        mock.expect_get().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 404,
                body: "not found".to_string(),
            })
        });

        let source = CatalogSource::parse("http://localhost/themes.json");
        let err = load(&source, &mock).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Status { status: 404, .. }));
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn test_load_url_transport_error() {
        let mut mock = MockFetcher::new();
        mock.expect_get()
            .times(1)
            .returning(|_| Err(anyhow!("connection refused")));

        let source = CatalogSource::parse("http://localhost/themes.json");
        let err = load(&source, &mock).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Transport { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_load_url_malformed_body() {
        let mut mock = MockFetcher::new();
        mock.expect_get().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 200,
                body: "<html>".to_string(),
            })
        });

        let source = CatalogSource::parse("http://localhost/themes.json");
        assert!(matches!(
            load(&source, &mock),
            Err(CatalogLoadError::Malformed(_))
        ));
    }
}
