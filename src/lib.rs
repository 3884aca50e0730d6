//! themeportal - Theme Portal
//!
//! A themed landing page for the terminal: a JSON catalog of named themes,
//! one active at a time, with a theme menu, keyboard shortcuts, a toast on
//! every switch and a background audio player for the immersive theme.
//!
//! # Modules
//!
//! - [`catalog`] - Theme catalog model and loader (file or URL)
//! - [`portal`] - Controller owning all portal state; applies themes
//! - [`page`] - Host surface trait and its in-memory implementation
//! - [`menu`] - Theme menu builder and controller
//! - [`notify`] - Theme-change toast
//! - [`player`] - Background audio player controller
//! - [`audio`] - rodio-backed audio element
//! - [`keys`] - Global keyboard shortcuts
//! - [`theme`] - Known themes and the terminal palette
//! - [`dialog`] - Alert popup
//! - [`config`] - `.themeportal.toml` configuration
//! - [`logging`] - tracing subscriber setup

pub mod audio;
pub mod catalog;
pub mod config;
pub mod dialog;
pub mod keys;
pub mod logging;
pub mod menu;
pub mod notify;
pub mod page;
pub mod player;
pub mod portal;
pub mod theme;

// Re-export commonly used types
pub use audio::RodioAudio;
pub use catalog::{CatalogLoadError, CatalogSource, Fetcher, ThemeCatalog, ThemeDefinition, UreqFetcher};
pub use config::Config;
pub use dialog::{AlertDialog, DialogResult};
pub use keys::{dispatch, Shortcut};
pub use menu::ThemeMenu;
pub use page::{EmbedSlot, Page, UiPort};
pub use player::{AudioElement, AudioPlayer};
pub use portal::{Portal, ThemeState};
pub use theme::{KnownTheme, Palette};
