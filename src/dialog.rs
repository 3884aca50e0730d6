//! Alert dialog for themeportal
//!
//! Blocking message popup. While it is on screen it owns the keyboard:
//! Enter or Esc dismiss it, every other key is swallowed.

use crate::theme::Palette;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Result of a key press while the alert is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    /// Close the alert
    Dismiss,
    /// Keep the alert open and drop the key
    Swallow,
}

/// A modal alert popup
///
/// # Example
/// ```ignore
/// if let Some(message) = page.alert.as_deref() {
///     AlertDialog::new("Error", message).render(f, area, &palette);
/// }
/// ```
pub struct AlertDialog<'a> {
    title: &'a str,
    message: &'a str,
}

impl<'a> AlertDialog<'a> {
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self { title, message }
    }

    /// Handle key input
    pub fn handle_key(key: KeyCode) -> DialogResult {
        match key {
            KeyCode::Enter | KeyCode::Esc => DialogResult::Dismiss,
            _ => DialogResult::Swallow,
        }
    }

    /// Rows the wrapped message needs at `width` columns
    fn message_height(&self, width: u16) -> u16 {
        let width = usize::from(width.max(1));
        let rows: usize = self
            .message
            .lines()
            .map(|line| line.chars().count().div_ceil(width).max(1))
            .sum();
        u16::try_from(rows.max(1)).unwrap_or(u16::MAX)
    }

    /// Render as a centered popup over the given area
    pub fn render(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let dialog_width = 60.min(area.width.saturating_sub(4));
        let text_width = dialog_width.saturating_sub(4);
        let dialog_height = self.message_height(text_width).saturating_add(6);

        let dialog_area = centered_rect(dialog_width, dialog_height, area);

        f.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(palette.style_alert())
            .style(palette.style_panel());

        f.render_widget(block.clone(), dialog_area);

        let inner = block.inner(dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // Message
                Constraint::Length(1), // Spacing
                Constraint::Length(1), // Help text
            ])
            .split(inner);

        let message = Paragraph::new(self.message)
            .style(palette.style_text())
            .wrap(Wrap { trim: true });
        f.render_widget(message, chunks[0]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("[Enter]", palette.style_key()),
            Span::raw(" / "),
            Span::styled("[Esc]", palette.style_key()),
            Span::raw(" OK"),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(help, chunks[2]);
    }
}

/// Create a centered rectangle with given width and height
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
