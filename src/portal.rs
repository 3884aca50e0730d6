//! Portal controller
//!
//! [`Portal`] owns every piece of portal state (catalog, host surface,
//! player, menu, toast, active theme) and exposes one handler per user or
//! host event. The theme applier lives here.
//!
//! # Example
//! ```ignore
//! let mut portal = Portal::new(Page::new(), RodioAudio::new(), 1.0);
//! portal.on_catalog_loaded(catalog::load(&source, &UreqFetcher), "dreamy", Instant::now());
//! portal.apply("forest", Instant::now());
//! ```

use crate::catalog::{CatalogLoadError, ThemeCatalog};
use crate::keys::Shortcut;
use crate::menu::ThemeMenu;
use crate::notify::Toast;
use crate::page::{EmbedSlot, UiPort};
use crate::player::{AudioElement, AudioPlayer};
use crate::theme::KnownTheme;
use std::time::Instant;
use tracing::{debug, error, info};

/// Soundtracks hosted here are only ever embedded, never played natively
pub const SOCIAL_AUDIO_HOST: &str = "soundcloud.com";

/// Volume change per step of the volume controls
pub const VOLUME_STEP: f32 = 0.1;

/// Whether a soundtrack URL may be loaded into the native player
pub fn is_playable_soundtrack(url: &str) -> bool {
    !url.contains(SOCIAL_AUDIO_HOST)
}

/// Theme applier state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeState {
    NoThemeActive,
    ThemeActive(String),
}

/// The portal: all state, single writer
pub struct Portal<P: UiPort, A: AudioElement> {
    catalog: Option<ThemeCatalog>,
    page: P,
    player: AudioPlayer<A>,
    menu: ThemeMenu,
    toast: Toast,
    active: Option<String>,
}

impl<P: UiPort, A: AudioElement> Portal<P, A> {
    pub fn new(mut page: P, audio: A, volume: f32) -> Self {
        let player = AudioPlayer::new(audio, volume);
        page.set_volume_display(player.volume());
        Self {
            catalog: None,
            page,
            player,
            menu: ThemeMenu::new(),
            toast: Toast::new(),
            active: None,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn player(&self) -> &AudioPlayer<A> {
        &self.player
    }

    pub fn menu(&self) -> &ThemeMenu {
        &self.menu
    }

    pub fn catalog(&self) -> Option<&ThemeCatalog> {
        self.catalog.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn active_theme(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn state(&self) -> ThemeState {
        match &self.active {
            Some(name) => ThemeState::ThemeActive(name.clone()),
            None => ThemeState::NoThemeActive,
        }
    }

    // ==================== Catalog ====================

    /// Handle the result of a catalog load
    ///
    /// Success replaces the catalog, rebuilds the menu and applies the active
    /// theme again (or `default_theme` when the active one is gone). Failure
    /// raises an alert and leaves the current state untouched.
    pub fn on_catalog_loaded(
        &mut self,
        result: Result<ThemeCatalog, CatalogLoadError>,
        default_theme: &str,
        now: Instant,
    ) {
        match result {
            Ok(catalog) => {
                info!("Loaded theme catalog with {} themes", catalog.len());
                self.menu.build(&mut self.page, &catalog);
                self.catalog = Some(catalog);

                let target = self
                    .active
                    .clone()
                    .filter(|name| self.catalog.as_ref().is_some_and(|c| c.contains(name)))
                    .unwrap_or_else(|| default_theme.to_string());
                self.apply(&target, now);
            }
            Err(e) => {
                error!("Failed to load themes: {e}");
                self.page.alert(&format!(
                    "Failed to load themes: {e}. Check the catalog path and JSON syntax."
                ));
            }
        }
    }

    // ==================== Theme Applier ====================

    /// Apply a theme by name; unknown names change nothing
    ///
    /// Returns whether the theme was applied.
    pub fn apply(&mut self, name: &str, now: Instant) -> bool {
        let Some(theme) = self.catalog.as_ref().and_then(|c| c.get(name)) else {
            debug!("apply ignored: unknown theme '{name}'");
            return false;
        };
        let known = KnownTheme::from_id(name);
        let immersive = known.is_some_and(|t| t.is_immersive());

        for (var, value) in &theme.css_vars {
            self.page.set_css_var(var, value);
        }

        self.page
            .set_heading_decoration(known.filter(|t| t.decorates_heading()));

        match &theme.background_image {
            Some(url) => self.page.set_background_image(url),
            None => self.page.clear_background_image(),
        }

        for slot in EmbedSlot::all() {
            self.page.clear_embed_slot(*slot);
        }
        self.page.set_embed_container_visible(false);

        if immersive {
            let mut routed = 0;
            for embed in theme.embeds.iter().flatten() {
                let slot = EmbedSlot::route(&embed.label);
                let append = slot == EmbedSlot::General;
                self.page.fill_embed_slot(slot, &embed.code, append);
                routed += 1;
            }
            if routed > 0 {
                self.page.set_embed_container_visible(true);
            }

            self.page.set_player_visible(true);
            match theme
                .soundtrack
                .as_deref()
                .filter(|url| is_playable_soundtrack(url))
            {
                Some(url) => self.player.load(&mut self.page, url),
                None => self.player.unload(&mut self.page),
            }
        } else {
            self.page.set_player_visible(false);
            self.player.halt(&mut self.page);
        }

        info!("Applied theme {name}");
        self.active = Some(name.to_string());
        self.toast.notify(&mut self.page, name, now);
        true
    }

    // ==================== Menu ====================

    pub fn toggle_menu(&mut self) {
        self.menu.toggle(&mut self.page);
    }

    pub fn show_menu(&mut self) {
        self.menu.show(&mut self.page);
    }

    pub fn hide_menu(&mut self) {
        self.menu.hide(&mut self.page);
    }

    /// The header's themes toggle
    pub fn press_themes_toggle(&mut self) {
        self.menu.toggle(&mut self.page);
    }

    pub fn menu_prev(&mut self) {
        self.menu.select_prev();
    }

    pub fn menu_next(&mut self) {
        self.menu.select_next();
    }

    /// Apply the highlighted entry and close the menu
    pub fn select_menu_entry(&mut self, now: Instant) {
        if let Some(theme) = self.menu.highlighted() {
            self.apply(theme.id(), now);
        }
        self.menu.hide(&mut self.page);
    }

    // ==================== Shortcuts ====================

    pub fn handle_shortcut(&mut self, shortcut: Shortcut, now: Instant) {
        match shortcut {
            Shortcut::ApplyTheme(theme) => {
                self.apply(theme.id(), now);
            }
            Shortcut::ToggleMenu => self.toggle_menu(),
        }
    }

    // ==================== Player ====================

    pub fn play_pause(&mut self) {
        self.player.play_pause(&mut self.page);
    }

    pub fn stop(&mut self) {
        self.player.stop(&mut self.page);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.player.set_volume(&mut self.page, volume);
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        let volume = self.player.volume() + delta;
        self.player.set_volume(&mut self.page, volume);
    }

    // ==================== Time ====================

    /// Advance time-driven state: toast fade and end-of-track
    pub fn tick(&mut self, now: Instant) {
        self.toast.tick(&mut self.page, now);
        self.player.poll(&mut self.page);
    }
}
