//! TUI rendering functions

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};
use themeportal::dialog::centered_rect;
use themeportal::menu::MENU_CAPTION;
use themeportal::page::{EmbedSlot, Page, PlayLabel, ToastPhase};
use themeportal::theme::{glyph_for, parse_css_color};
use themeportal::{AlertDialog, Palette};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let page = app.portal.page();
    let palette = Palette::from_css_vars(&page.css_vars);

    f.render_widget(Block::default().style(palette.style_page()), f.area());

    let player_height = if page.player_visible { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Min(0),                // Page body
            Constraint::Length(player_height), // Player panel
            Constraint::Length(1),             // Footer
        ])
        .split(f.area());

    render_header(f, app, &palette, chunks[0]);
    render_body(f, page, &palette, chunks[1]);
    if page.player_visible {
        render_player(f, page, &palette, chunks[2]);
    }
    render_footer(f, &palette, chunks[3]);

    // Overlays
    if page.menu_visible {
        render_menu(f, app, &palette, f.area());
    }
    if page.toast.is_some() {
        render_toast(f, page, &palette, f.area());
    }
    if let Some(message) = page.alert.as_deref() {
        AlertDialog::new("Error", message).render(f, f.area(), &palette);
    }
}

/// Render header: heading, themes toggle and active theme
pub fn render_header(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let page = app.portal.page();
    let decorated = page.heading_decoration.is_some();

    let mut heading = vec![Span::styled(" Theme Portal", palette.style_heading(decorated))];
    if let Some(theme) = page.heading_decoration {
        heading.push(Span::raw(format!(" {}", theme.glyph())));
    }

    let arrow = if page.toggle_expanded { "▴" } else { "▾" };
    let active = match app.portal.active_theme() {
        Some(name) => format!("{} {name}", glyph_for(name)),
        None if app.is_loading() => "loading…".to_string(),
        None => "no theme".to_string(),
    };
    let right = Line::from(vec![
        Span::styled("[t]", palette.style_key()),
        Span::styled(format!(" Themes {arrow}  "), palette.style_text()),
        Span::styled(active, palette.style_text_muted()),
        Span::raw(" "),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.style_border())
        .style(palette.style_page());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right.width() as u16)])
        .split(inner);

    f.render_widget(Paragraph::new(Line::from(heading)), columns[0]);
    f.render_widget(Paragraph::new(right).alignment(Alignment::Right), columns[1]);
}

/// Render page body: background, CSS variables and embeds
pub fn render_body(f: &mut Frame, page: &Page, palette: &Palette, area: Rect) {
    let embed_height = if page.embed_container_visible { 8 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),            // Background
            Constraint::Min(0),               // CSS variables
            Constraint::Length(embed_height), // Embeds
        ])
        .split(area);

    let background = match &page.background.image {
        Some(image) => format!(
            "{image} ({}, {})",
            page.background.size.unwrap_or("auto"),
            page.background.position.unwrap_or("initial")
        ),
        None => "none".to_string(),
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Background: ", palette.style_text_muted()),
            Span::styled(background, palette.style_text()),
        ])),
        chunks[0],
    );

    render_css_vars(f, page, palette, chunks[1]);

    if page.embed_container_visible {
        render_embeds(f, page, palette, chunks[2]);
    }
}

fn render_css_vars(f: &mut Frame, page: &Page, palette: &Palette, area: Rect) {
    let rows: Vec<Row> = page
        .css_vars
        .iter()
        .map(|(name, value)| {
            let swatch = match parse_css_color(value) {
                Some(color) => Cell::from("██").style(Style::default().fg(color)),
                None => Cell::from("?").style(palette.style_text_muted()),
            };
            Row::new(vec![
                Cell::from(name.as_str()).style(palette.style_key()),
                Cell::from(value.as_str()).style(palette.style_text()),
                swatch,
            ])
        })
        .collect();

    let header = Row::new(vec!["Variable", "Value", ""])
        .style(palette.style_text_muted().add_modifier(Modifier::BOLD));

    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Min(10),
            Constraint::Length(3),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" CSS variables ")
            .borders(Borders::ALL)
            .border_style(palette.style_border_muted()),
    );

    f.render_widget(table, area);
}

fn render_embeds(f: &mut Frame, page: &Page, palette: &Palette, area: Rect) {
    let visible: Vec<EmbedSlot> = EmbedSlot::all()
        .iter()
        .copied()
        .filter(|slot| page.slot(*slot).visible)
        .collect();
    if visible.is_empty() {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, visible.len() as u32); visible.len()])
        .split(area);

    for (slot, column) in visible.iter().zip(columns.iter()) {
        let content = Paragraph::new(page.slot(*slot).content.as_str())
            .style(palette.style_panel())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(format!(" {} ", slot.title()))
                    .borders(Borders::ALL)
                    .border_style(palette.style_border()),
            );
        f.render_widget(content, *column);
    }
}

/// Render the background audio player
pub fn render_player(f: &mut Frame, page: &Page, palette: &Palette, area: Rect) {
    let block = Block::default()
        .title(" Now Playing ")
        .borders(Borders::ALL)
        .border_style(palette.style_border())
        .style(palette.style_panel());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title and play label
            Constraint::Length(1), // Volume
            Constraint::Length(1), // Keys
        ])
        .split(inner);

    let state = match page.play_label {
        PlayLabel::Play => "▶",
        PlayLabel::Pause => "⏸",
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {state} {} ", page.play_label.text()), palette.style_key()),
            Span::styled(page.track_title.as_str(), palette.style_text()),
        ])),
        rows[0],
    );

    let volume = page.volume.clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(palette.accent).bg(palette.panel))
        .ratio(f64::from(volume))
        .label(format!("Volume {}%", (volume * 100.0).round() as u32));
    f.render_widget(gauge, rows[1]);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Space", palette.style_key()),
            Span::styled(" play/pause  ", palette.style_text_muted()),
            Span::styled("s", palette.style_key()),
            Span::styled(" stop  ", palette.style_text_muted()),
            Span::styled("+/-", palette.style_key()),
            Span::styled(" volume", palette.style_text_muted()),
        ])),
        rows[2],
    );
}

/// Render footer with key bindings
pub fn render_footer(f: &mut Frame, palette: &Palette, area: Rect) {
    let keys = [
        ("1-6", "theme"),
        ("Esc", "menu"),
        ("t", "themes"),
        ("r", "reload"),
        ("q", "quit"),
    ];
    let mut spans = vec![Span::raw(" ")];
    for (key, desc) in keys {
        spans.push(Span::styled(key, palette.style_key()));
        spans.push(Span::styled(format!(" {desc}  "), palette.style_text_muted()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render theme menu popup
pub fn render_menu(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let page = app.portal.page();
    let selected = app.portal.menu().selected();

    let mut lines: Vec<Line> = page
        .menu_entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if i == selected {
                Line::from(Span::styled(format!(" > {} ", entry.text), palette.style_selected()))
            } else {
                Line::from(Span::styled(format!("   {} ", entry.text), palette.style_text()))
            }
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled("   No themes", palette.style_text_muted())));
    }

    let popup_height = lines.len() as u16 + 2;
    let popup_area = centered_rect(36, popup_height, area);

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(format!(" {MENU_CAPTION} "), palette.style_key()))
        .borders(Borders::ALL)
        .border_style(palette.style_border())
        .style(palette.style_panel());

    f.render_widget(Paragraph::new(lines).block(block), popup_area);
}

/// Render the theme-change toast at the bottom right
pub fn render_toast(f: &mut Frame, page: &Page, palette: &Palette, area: Rect) {
    let Some(toast) = page.toast.as_ref() else {
        return;
    };

    let style = match toast.phase {
        ToastPhase::Visible => palette.style_toast(),
        ToastPhase::Fading => palette.style_toast_fading(),
    };

    let line = Line::from(format!(" {} ", toast.text));
    let width = (line.width() as u16 + 2).min(area.width);
    let height = 3.min(area.height);
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    };

    f.render_widget(Clear, toast_area);
    f.render_widget(
        Paragraph::new(line).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style),
        ),
        toast_area,
    );
}
