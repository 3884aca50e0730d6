//! Input handling for TUI

use crate::app::App;
use crossterm::event::KeyCode;
use std::time::Instant;
use themeportal::portal::VOLUME_STEP;
use themeportal::{dispatch, AlertDialog, DialogResult};
use tracing::debug;

/// Handle one key press
///
/// Order: alert, global shortcuts, menu navigation, page controls.
pub fn handle_key(app: &mut App, code: KeyCode, now: Instant) {
    if app.portal.page().alert.is_some() {
        if AlertDialog::handle_key(code) == DialogResult::Dismiss {
            app.portal.page_mut().dismiss_alert();
        }
        return;
    }

    if let Some(shortcut) = dispatch(code) {
        app.portal.handle_shortcut(shortcut, now);
        if shortcut.consumes_key() {
            return;
        }
    }

    if app.portal.menu().is_visible() && handle_menu_key(app, code, now) {
        return;
    }

    handle_control_key(app, code);
}

/// Menu navigation, returns true if handled
fn handle_menu_key(app: &mut App, code: KeyCode, now: Instant) -> bool {
    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.portal.menu_prev();
            true
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.portal.menu_next();
            true
        }
        KeyCode::Enter => {
            app.portal.select_menu_entry(now);
            true
        }
        _ => false,
    }
}

/// Page controls: themes toggle, player, reload and quit
fn handle_control_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('t') => app.portal.press_themes_toggle(),
        KeyCode::Char(' ') | KeyCode::Char('p') => app.portal.play_pause(),
        KeyCode::Char('s') => app.portal.stop(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.portal.adjust_volume(VOLUME_STEP),
        KeyCode::Char('-') => app.portal.adjust_volume(-VOLUME_STEP),
        KeyCode::Char('r') => app.start_load(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => debug!("unbound key: {code:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use themeportal::page::{Focus, PlayLabel};
    use themeportal::{CatalogSource, Config, RodioAudio, ThemeCatalog};

    const CATALOG: &str = r#"{
        "dreamy": {}, "misty": {}, "cosmic": {},
        "redlightbulbawareness": {}, "forest": {},
        "hallwaysofpower": { "soundtrack": "tracks/Deep-Focus.mp3" }
    }"#;

    fn loaded_app() -> (App, Instant) {
        let now = Instant::now();
        let mut app = App::new(
            Config::default(),
            CatalogSource::default(),
            Box::new(RodioAudio::new()),
        );
        app.portal
            .on_catalog_loaded(ThemeCatalog::from_json(CATALOG), "dreamy", now);
        (app, now)
    }

    #[test]
    fn test_digit_applies_theme() {
        let (mut app, now) = loaded_app();
        handle_key(&mut app, KeyCode::Char('5'), now);
        assert_eq!(app.portal.active_theme(), Some("hallwaysofpower"));
        handle_key(&mut app, KeyCode::Char('6'), now);
        assert_eq!(app.portal.active_theme(), Some("forest"));
    }

    #[test]
    fn test_escape_toggles_menu() {
        let (mut app, now) = loaded_app();
        handle_key(&mut app, KeyCode::Esc, now);
        assert!(app.portal.menu().is_visible());
        assert_eq!(app.portal.page().focus, Focus::Menu);
        handle_key(&mut app, KeyCode::Esc, now);
        assert!(!app.portal.menu().is_visible());
        assert_eq!(app.portal.active_theme(), Some("dreamy"));
    }

    #[test]
    fn test_menu_navigation_and_select() {
        let (mut app, now) = loaded_app();
        handle_key(&mut app, KeyCode::Char('t'), now);
        assert!(app.portal.page().toggle_expanded);

        handle_key(&mut app, KeyCode::Down, now);
        handle_key(&mut app, KeyCode::Char('j'), now);
        handle_key(&mut app, KeyCode::Char('k'), now);
        handle_key(&mut app, KeyCode::Enter, now);

        assert_eq!(app.portal.active_theme(), Some("misty"));
        assert!(!app.portal.menu().is_visible());
    }

    #[test]
    fn test_digit_works_with_menu_open() {
        let (mut app, now) = loaded_app();
        handle_key(&mut app, KeyCode::Esc, now);
        handle_key(&mut app, KeyCode::Char('3'), now);
        assert_eq!(app.portal.active_theme(), Some("cosmic"));
        assert!(app.portal.menu().is_visible());
    }

    #[test]
    fn test_player_controls() {
        let (mut app, now) = loaded_app();
        handle_key(&mut app, KeyCode::Char('5'), now);

        handle_key(&mut app, KeyCode::Char(' '), now);
        assert_eq!(app.portal.page().play_label, PlayLabel::Pause);
        handle_key(&mut app, KeyCode::Char('s'), now);
        assert_eq!(app.portal.page().play_label, PlayLabel::Play);

        handle_key(&mut app, KeyCode::Char('-'), now);
        assert!((app.portal.page().volume - 0.9).abs() < 1e-6);
        handle_key(&mut app, KeyCode::Char('+'), now);
        assert!((app.portal.page().volume - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_alert_swallows_keys() {
        let (mut app, now) = loaded_app();
        app.portal.page_mut().alert = Some("Failed to load themes".to_string());

        handle_key(&mut app, KeyCode::Char('5'), now);
        handle_key(&mut app, KeyCode::Char('q'), now);
        assert_eq!(app.portal.active_theme(), Some("dreamy"));
        assert!(!app.should_quit);

        handle_key(&mut app, KeyCode::Enter, now);
        assert!(app.portal.page().alert.is_none());
    }

    #[test]
    fn test_quit() {
        let (mut app, now) = loaded_app();
        handle_key(&mut app, KeyCode::Char('q'), now);
        assert!(app.should_quit);
    }
}
