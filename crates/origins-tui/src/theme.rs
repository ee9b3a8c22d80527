//! Colour theme for the origins-search TUI.
//!
//! Themes are TOML files embedded in the binary via [`include_str!`] so the
//! application works without any files on disk. Resolve one with
//! [`Theme::by_name`] at startup and pass it through as a shared reference.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types — mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawResults {
    label: RawStyle,
    uri: RawStyle,
    selected: RawStyle,
    placeholder: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    normal: RawStyle,
    busy: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    results: RawResults,
    borders: RawBorders,
    status: RawStatus,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,

    /// Heading line of a result.
    pub result_label: Style,
    /// Caption line of a result.
    pub result_uri: Style,
    /// Background of the highlighted result.
    pub result_selected: Style,
    /// The "No results.." line.
    pub placeholder: Style,

    pub border_focused: Style,
    pub border_command_bar: Style,
    pub border_unfocused: Style,

    pub status_normal: Style,
    /// Shown while a request is in flight.
    pub status_busy: Style,
    pub status_error: Style,
}

impl Theme {
    /// The embedded default theme. Falls back to unstyled if the embedded
    /// TOML is ever malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str("default", DEFAULT_THEME_SRC).unwrap_or_else(|_| Self::plain())
    }

    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str("gruvbox", GRUVBOX_DARK_THEME_SRC).unwrap_or_else(|_| Self::plain())
    }

    /// Resolve a theme by name; unknown names get the default theme.
    pub fn by_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(Self::load_default)
    }

    /// Resolve a theme by name, or `None` if no embedded theme has it.
    pub fn lookup(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(name: &str, src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            name: name.to_string(),
            result_label: raw.results.label.into_style(),
            result_uri: raw.results.uri.into_style(),
            result_selected: raw.results.selected.into_style(),
            placeholder: raw.results.placeholder.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            status_normal: raw.status.normal.into_style(),
            status_busy: raw.status.busy.into_style(),
            status_error: raw.status.error.into_style(),
        })
    }

    fn plain() -> Self {
        Self {
            name: "plain".to_string(),
            result_label: Style::default().add_modifier(Modifier::BOLD),
            result_uri: Style::default().add_modifier(Modifier::DIM),
            result_selected: Style::default().add_modifier(Modifier::REVERSED),
            placeholder: Style::default().add_modifier(Modifier::ITALIC),
            border_focused: Style::default().add_modifier(Modifier::BOLD),
            border_command_bar: Style::default(),
            border_unfocused: Style::default(),
            status_normal: Style::default(),
            status_busy: Style::default(),
            status_error: Style::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(s.get(1..3)?, 16).ok()?;
            let g = u8::from_str_radix(s.get(3..5)?, 16).ok()?;
            let b = u8::from_str_radix(s.get(5..7)?, 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s.get("indexed:".len()..)?.parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
