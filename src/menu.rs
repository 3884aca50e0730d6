//! Theme menu
//!
//! Entries follow the fixed order of [`KnownTheme::all`], filtered to the
//! themes present in the catalog. Showing the menu moves focus into it;
//! hiding returns focus to the page. The themes toggle's expanded flag
//! always follows visibility.

use crate::catalog::ThemeCatalog;
use crate::page::{Focus, MenuEntry, UiPort};
use crate::theme::KnownTheme;

/// Caption rendered above the entries
pub const MENU_CAPTION: &str = "Select Theme";

/// Menu state: entries, visibility and the highlighted row
#[derive(Debug, Clone, Default)]
pub struct ThemeMenu {
    entries: Vec<MenuEntry>,
    visible: bool,
    selected: usize,
}

/// Build menu entries for a catalog
pub fn menu_entries(catalog: &ThemeCatalog) -> Vec<MenuEntry> {
    KnownTheme::all()
        .iter()
        .filter(|theme| catalog.contains(theme.id()))
        .map(|theme| MenuEntry {
            theme: *theme,
            text: format!("{} {} {}", theme.position(), theme.glyph(), theme.id()),
        })
        .collect()
}

impl ThemeMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entries from a freshly loaded catalog
    pub fn build<P: UiPort + ?Sized>(&mut self, port: &mut P, catalog: &ThemeCatalog) {
        self.entries = menu_entries(catalog);
        self.selected = 0;
        port.render_menu(self.entries.clone());
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn show<P: UiPort + ?Sized>(&mut self, port: &mut P) {
        self.visible = true;
        port.set_menu_visible(true);
        port.set_toggle_expanded(true);
        port.set_focus(Focus::Menu);
    }

    pub fn hide<P: UiPort + ?Sized>(&mut self, port: &mut P) {
        self.visible = false;
        port.set_menu_visible(false);
        port.set_toggle_expanded(false);
        port.set_focus(Focus::Page);
    }

    pub fn toggle<P: UiPort + ?Sized>(&mut self, port: &mut P) {
        if self.visible {
            self.hide(port);
        } else {
            self.show(port);
        }
    }

    /// Move the highlight up, wrapping around
    pub fn select_prev(&mut self) {
        let count = self.entries.len();
        if count == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            count - 1
        } else {
            self.selected - 1
        };
    }

    /// Move the highlight down, wrapping around
    pub fn select_next(&mut self) {
        let count = self.entries.len();
        if count == 0 {
            return;
        }
        self.selected = (self.selected + 1) % count;
    }

    /// Theme under the highlight
    pub fn highlighted(&self) -> Option<KnownTheme> {
        self.entries.get(self.selected).map(|e| e.theme)
    }
}
