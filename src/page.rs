//! Host surface abstraction
//!
//! [`UiPort`] is everything the portal needs from its host: CSS variables,
//! heading decoration, background, embed slots, the player panel, the theme
//! menu, the toast and the alert. [`Page`] is the in-memory implementation;
//! the terminal host renders it every frame and tests inspect it directly.

use crate::theme::KnownTheme;
use std::collections::BTreeMap;

#[cfg(test)]
use mockall::automock;

/// Placeholder shown when there is no track title
pub const TITLE_PLACEHOLDER: &str = "—";

/// The three fixed embed containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbedSlot {
    Video,
    AudioSocial,
    General,
}

impl EmbedSlot {
    pub fn all() -> &'static [EmbedSlot] {
        &[EmbedSlot::Video, EmbedSlot::AudioSocial, EmbedSlot::General]
    }

    /// Route an embed by label (case-insensitive substring match)
    pub fn route(label: &str) -> EmbedSlot {
        let label = label.to_lowercase();
        if label.contains("youtube") {
            EmbedSlot::Video
        } else if label.contains("soundcloud") {
            EmbedSlot::AudioSocial
        } else {
            EmbedSlot::General
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EmbedSlot::Video => "Video",
            EmbedSlot::AudioSocial => "SoundCloud",
            EmbedSlot::General => "More",
        }
    }

    fn index(&self) -> usize {
        match self {
            EmbedSlot::Video => 0,
            EmbedSlot::AudioSocial => 1,
            EmbedSlot::General => 2,
        }
    }
}

/// Label of the play/pause control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayLabel {
    #[default]
    Play,
    Pause,
}

impl PlayLabel {
    pub fn text(&self) -> &'static str {
        match self {
            PlayLabel::Play => "Play",
            PlayLabel::Pause => "Pause",
        }
    }
}

/// Where keyboard focus sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Page,
    Menu,
}

/// Phase of the notification toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Fading,
}

/// One selectable entry of the theme menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub theme: KnownTheme,
    /// Display text, e.g. "1 ✨ dreamy"
    pub text: String,
}

/// Everything the portal writes to its host
#[cfg_attr(test, automock)]
pub trait UiPort {
    /// Set a CSS custom property on the root (idempotent overwrite)
    fn set_css_var(&mut self, name: &str, value: &str);

    /// Remove every decoration class from the heading, then add `decoration`'s
    fn set_heading_decoration(&mut self, decoration: Option<KnownTheme>);

    /// Set the page background image with cover/center sizing
    fn set_background_image(&mut self, url: &str);

    fn clear_background_image(&mut self);

    /// Empty a slot and hide it
    fn clear_embed_slot(&mut self, slot: EmbedSlot);

    /// Put markup into a slot (appending when `append`) and show it
    fn fill_embed_slot(&mut self, slot: EmbedSlot, code: &str, append: bool);

    fn set_embed_container_visible(&mut self, visible: bool);

    fn set_player_visible(&mut self, visible: bool);

    fn set_track_title(&mut self, title: &str);

    fn set_play_label(&mut self, label: PlayLabel);

    fn set_volume_display(&mut self, volume: f32);

    /// Replace the menu list
    fn render_menu(&mut self, entries: Vec<MenuEntry>);

    fn set_menu_visible(&mut self, visible: bool);

    fn set_focus(&mut self, focus: Focus);

    fn set_toggle_expanded(&mut self, expanded: bool);

    fn show_toast(&mut self, text: &str, phase: ToastPhase);

    /// Move a shown toast to another phase without changing its text
    fn set_toast_phase(&mut self, phase: ToastPhase);

    fn hide_toast(&mut self);

    /// Blocking, user-facing error message
    fn alert(&mut self, message: &str);
}

/// Content and visibility of one embed slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotState {
    pub content: String,
    pub visible: bool,
}

/// Background of the page body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Background {
    pub image: Option<String>,
    pub size: Option<&'static str>,
    pub position: Option<&'static str>,
}

/// Toast currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastState {
    pub text: String,
    pub phase: ToastPhase,
}

/// In-memory host surface
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub css_vars: BTreeMap<String, String>,
    pub heading_decoration: Option<KnownTheme>,
    pub background: Background,
    slots: [SlotState; 3],
    pub embed_container_visible: bool,
    pub player_visible: bool,
    pub track_title: String,
    pub play_label: PlayLabel,
    pub volume: f32,
    pub menu_entries: Vec<MenuEntry>,
    pub menu_visible: bool,
    pub focus: Focus,
    pub toggle_expanded: bool,
    pub toast: Option<ToastState>,
    /// Pending alert message, dismissed by the host
    pub alert: Option<String>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            css_vars: BTreeMap::new(),
            heading_decoration: None,
            background: Background::default(),
            slots: Default::default(),
            embed_container_visible: false,
            player_visible: false,
            track_title: TITLE_PLACEHOLDER.to_string(),
            play_label: PlayLabel::Play,
            volume: 1.0,
            menu_entries: Vec::new(),
            menu_visible: false,
            focus: Focus::Page,
            toggle_expanded: false,
            toast: None,
            alert: None,
        }
    }

    pub fn slot(&self, slot: EmbedSlot) -> &SlotState {
        &self.slots[slot.index()]
    }

    /// Heading class list: the fixed `portal` class plus any decoration
    pub fn heading_classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["portal"];
        if let Some(theme) = self.heading_decoration {
            classes.push(theme.id());
        }
        classes
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

impl UiPort for Page {
    fn set_css_var(&mut self, name: &str, value: &str) {
        self.css_vars.insert(name.to_string(), value.to_string());
    }

    fn set_heading_decoration(&mut self, decoration: Option<KnownTheme>) {
        self.heading_decoration = decoration.filter(|t| t.decorates_heading());
    }

    fn set_background_image(&mut self, url: &str) {
        self.background = Background {
            image: Some(url.to_string()),
            size: Some("cover"),
            position: Some("center"),
        };
    }

    fn clear_background_image(&mut self) {
        self.background.image = None;
    }

    fn clear_embed_slot(&mut self, slot: EmbedSlot) {
        self.slots[slot.index()] = SlotState::default();
    }

    fn fill_embed_slot(&mut self, slot: EmbedSlot, code: &str, append: bool) {
        let state = &mut self.slots[slot.index()];
        if append {
            state.content.push_str(code);
        } else {
            state.content = code.to_string();
        }
        state.visible = true;
    }

    fn set_embed_container_visible(&mut self, visible: bool) {
        self.embed_container_visible = visible;
    }

    fn set_player_visible(&mut self, visible: bool) {
        self.player_visible = visible;
    }

    fn set_track_title(&mut self, title: &str) {
        self.track_title = title.to_string();
    }

    fn set_play_label(&mut self, label: PlayLabel) {
        self.play_label = label;
    }

    fn set_volume_display(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn render_menu(&mut self, entries: Vec<MenuEntry>) {
        self.menu_entries = entries;
    }

    fn set_menu_visible(&mut self, visible: bool) {
        self.menu_visible = visible;
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    fn set_toggle_expanded(&mut self, expanded: bool) {
        self.toggle_expanded = expanded;
    }

    fn show_toast(&mut self, text: &str, phase: ToastPhase) {
        self.toast = Some(ToastState {
            text: text.to_string(),
            phase,
        });
    }

    fn set_toast_phase(&mut self, phase: ToastPhase) {
        if let Some(toast) = self.toast.as_mut() {
            toast.phase = phase;
        }
    }

    fn hide_toast(&mut self) {
        self.toast = None;
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_by_label() {
        assert_eq!(EmbedSlot::route("YouTube video"), EmbedSlot::Video);
        assert_eq!(EmbedSlot::route("my YOUTUBE clip"), EmbedSlot::Video);
        assert_eq!(EmbedSlot::route("SoundCloud set"), EmbedSlot::AudioSocial);
        assert_eq!(EmbedSlot::route("PDF"), EmbedSlot::General);
        assert_eq!(EmbedSlot::route(""), EmbedSlot::General);
    }

    #[test]
    fn test_route_prefers_video() {
        assert_eq!(
            EmbedSlot::route("youtube mirror of soundcloud"),
            EmbedSlot::Video
        );
    }

    #[test]
    fn test_page_defaults() {
        let page = Page::new();
        assert!(page.css_vars.is_empty());
        assert_eq!(page.heading_classes(), vec!["portal"]);
        assert_eq!(page.track_title, TITLE_PLACEHOLDER);
        assert_eq!(page.play_label, PlayLabel::Play);
        assert!(!page.menu_visible);
        assert_eq!(page.focus, Focus::Page);
        for slot in EmbedSlot::all() {
            assert_eq!(page.slot(*slot), &SlotState::default());
        }
    }

    #[test]
    fn test_fill_and_clear_slot() {
        let mut page = Page::new();
        page.fill_embed_slot(EmbedSlot::General, "<a>", false);
        page.fill_embed_slot(EmbedSlot::General, "<b>", true);
        assert_eq!(page.slot(EmbedSlot::General).content, "<a><b>");
        assert!(page.slot(EmbedSlot::General).visible);

        page.fill_embed_slot(EmbedSlot::General, "<c>", false);
        assert_eq!(page.slot(EmbedSlot::General).content, "<c>");

        page.clear_embed_slot(EmbedSlot::General);
        assert!(page.slot(EmbedSlot::General).content.is_empty());
        assert!(!page.slot(EmbedSlot::General).visible);
    }

    #[test]
    fn test_background_cover_center() {
        let mut page = Page::new();
        page.set_background_image("img/forest.jpg");
        assert_eq!(page.background.image.as_deref(), Some("img/forest.jpg"));
        assert_eq!(page.background.size, Some("cover"));
        assert_eq!(page.background.position, Some("center"));

        page.clear_background_image();
        assert!(page.background.image.is_none());
    }

    #[test]
    fn test_heading_ignores_undecorated_theme() {
        let mut page = Page::new();
        page.set_heading_decoration(Some(KnownTheme::Forest));
        assert_eq!(page.heading_classes(), vec!["portal", "forest"]);

        page.set_heading_decoration(Some(KnownTheme::Dreamy));
        assert_eq!(page.heading_classes(), vec!["portal"]);
    }

    #[test]
    fn test_alert_and_dismiss() {
        let mut page = Page::new();
        page.alert("boom");
        assert_eq!(page.alert.as_deref(), Some("boom"));
        page.dismiss_alert();
        assert!(page.alert.is_none());
    }
}
