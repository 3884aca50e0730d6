//! Theme identity and terminal palette for themeportal
//!
//! [`KnownTheme`] is the fixed set of six themes the menu and keyboard
//! shortcuts know about. [`Palette`] turns the CSS custom properties of the
//! active theme into ratatui colors for the terminal host.

use ratatui::style::{Color, Modifier, Style};
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

// ==================== KnownTheme Enum ====================

/// One of the six themes with a fixed menu slot and shortcut digit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KnownTheme {
    Dreamy,
    Misty,
    Cosmic,
    RedLightBulbAwareness,
    HallwaysOfPower,
    Forest,
}

impl KnownTheme {
    /// The theme applied after the catalog loads unless configured otherwise
    pub const DEFAULT: KnownTheme = KnownTheme::Dreamy;

    /// The only theme allowed to drive embeds and the background audio player
    pub const IMMERSIVE: KnownTheme = KnownTheme::HallwaysOfPower;

    /// Catalog key of the theme
    pub fn id(&self) -> &'static str {
        match self {
            KnownTheme::Dreamy => "dreamy",
            KnownTheme::Misty => "misty",
            KnownTheme::Cosmic => "cosmic",
            KnownTheme::RedLightBulbAwareness => "redlightbulbawareness",
            KnownTheme::HallwaysOfPower => "hallwaysofpower",
            KnownTheme::Forest => "forest",
        }
    }

    /// Glyph shown in the menu and in the notification toast
    pub fn glyph(&self) -> &'static str {
        match self {
            KnownTheme::Dreamy => "✨",
            KnownTheme::Misty => "🌫️",
            KnownTheme::Cosmic => "🌌",
            KnownTheme::RedLightBulbAwareness => "💡",
            KnownTheme::HallwaysOfPower => "🏛️",
            KnownTheme::Forest => "🌲",
        }
    }

    /// Whether the page heading carries this theme's decoration class
    pub fn decorates_heading(&self) -> bool {
        matches!(
            self,
            KnownTheme::RedLightBulbAwareness | KnownTheme::HallwaysOfPower | KnownTheme::Forest
        )
    }

    pub fn is_immersive(&self) -> bool {
        *self == Self::IMMERSIVE
    }

    /// 1-based position in menu order (also the shortcut digit)
    pub fn position(&self) -> usize {
        Self::all()
            .iter()
            .position(|t| t == self)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// All known themes in menu order
    pub fn all() -> &'static [KnownTheme] {
        &[
            KnownTheme::Dreamy,
            KnownTheme::Misty,
            KnownTheme::Cosmic,
            KnownTheme::RedLightBulbAwareness,
            KnownTheme::HallwaysOfPower,
            KnownTheme::Forest,
        ]
    }

    /// Theme bound to a shortcut digit ('1'..='6')
    pub fn from_digit(c: char) -> Option<KnownTheme> {
        let index = c.to_digit(10)? as usize;
        index.checked_sub(1).and_then(|i| Self::all().get(i)).copied()
    }

    /// Look up a theme by exact catalog key
    pub fn from_id(id: &str) -> Option<KnownTheme> {
        Self::all().iter().find(|t| t.id() == id).copied()
    }
}

impl Display for KnownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Glyph for any theme name; unknown names get an empty glyph
pub fn glyph_for(name: &str) -> &'static str {
    KnownTheme::from_id(name).map(|t| t.glyph()).unwrap_or("")
}

// ==================== CSS Colors ====================

/// Parse a CSS color value into a terminal color
///
/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)`
/// and the color names ratatui understands. Returns `None` for anything else
/// (gradients, `var(...)` references, lengths).
pub fn parse_css_color(value: &str) -> Option<Color> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = value.to_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = args
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        if parts.len() < 3 {
            return None;
        }
        let r = parts[0].parse::<u8>().ok()?;
        let g = parts[1].parse::<u8>().ok()?;
        let b = parts[2].parse::<u8>().ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    if lower.chars().all(|c| c.is_ascii_alphabetic()) {
        return Color::from_str(&lower).ok();
    }

    None
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|c| {
                let v = c.to_digit(16).unwrap_or(0) as u8;
                v * 17
            });
            Some(Color::Rgb(channels.next()?, channels.next()?, channels.next()?))
        }
        6 | 8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

// ==================== Palette ====================

/// CSS variables the terminal host reads its colors from
pub const PALETTE_VARS: &[&str] = &[
    "--bg-color",
    "--text-color",
    "--accent-color",
    "--panel-color",
    "--muted-color",
];

/// Terminal colors derived from the page's CSS variables
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub accent: Color,
    pub panel: Color,
    pub muted: Color,
}

impl Default for Palette {
    fn default() -> Self {
        NEUTRAL
    }
}

/// Palette used before any theme is applied
pub const NEUTRAL: Palette = Palette {
    background: Color::Rgb(18, 18, 24),
    text: Color::Rgb(220, 220, 228),
    accent: Color::Rgb(120, 170, 255),
    panel: Color::Rgb(32, 32, 44),
    muted: Color::Rgb(110, 110, 128),
};

impl Palette {
    /// Build a palette from CSS variables, falling back to the neutral
    /// palette for anything missing or unparsable
    pub fn from_css_vars(vars: &BTreeMap<String, String>) -> Self {
        let pick = |name: &str, fallback: Color| {
            vars.get(name)
                .and_then(|v| parse_css_color(v))
                .unwrap_or(fallback)
        };

        Self {
            background: pick("--bg-color", NEUTRAL.background),
            text: pick("--text-color", NEUTRAL.text),
            accent: pick("--accent-color", NEUTRAL.accent),
            panel: pick("--panel-color", NEUTRAL.panel),
            muted: pick("--muted-color", NEUTRAL.muted),
        }
    }

    // ==================== Style Methods ====================

    /// Style for the page body
    pub fn style_page(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Style for panels (player, embeds, menu)
    pub fn style_panel(&self) -> Style {
        Style::default().fg(self.text).bg(self.panel)
    }

    pub fn style_border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn style_border_muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for the page heading, bold when decorated
    pub fn style_heading(&self, decorated: bool) -> Style {
        let style = Style::default().fg(self.accent).add_modifier(Modifier::BOLD);
        if decorated {
            style.add_modifier(Modifier::UNDERLINED | Modifier::ITALIC)
        } else {
            style
        }
    }

    pub fn style_text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn style_text_muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for key bindings
    pub fn style_key(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for the highlighted menu entry
    pub fn style_selected(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the toast while fully visible
    pub fn style_toast(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.panel)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the toast while fading out
    pub fn style_toast_fading(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .bg(self.panel)
            .add_modifier(Modifier::DIM)
    }

    /// Style for the alert dialog
    pub fn style_alert(&self) -> Style {
        Style::default().fg(Color::Rgb(255, 90, 90)).bg(self.panel)
    }
}

// ==================== Tests ====================
