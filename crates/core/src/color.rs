//! Color values and painting
//!
//! Theme colors are either one of the named basic terminal colors or a
//! `#rrggbb` hex triplet. Names resolve through an explicit lookup table
//! rather than by building method names from strings. Painting goes through
//! crossterm's SGR commands so 24-bit colors render directly, and follows
//! console's color detection (tty, `NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`).

use crate::errors::ValidationError;
use crossterm::style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("Hex color regex should be valid"));

/// Human-readable domain of basic color names, used in validation messages
pub const BASIC_COLOR_DOMAIN: &str = "one of black, red, green, yellow, blue, magenta, cyan, white, \
     blackBright, redBright, greenBright, yellowBright, blueBright, magentaBright, cyanBright, \
     whiteBright, gray, grey";

/// Human-readable domain of theme color values
pub const COLOR_DOMAIN: &str = "a basic color name or a #rrggbb hex triplet";

/// The standard terminal colors in normal and bright versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BlackBright,
    RedBright,
    GreenBright,
    YellowBright,
    BlueBright,
    MagentaBright,
    CyanBright,
    WhiteBright,
    Gray,
    Grey,
}

const BASIC_COLORS: [(&str, BasicColor); 18] = [
    ("black", BasicColor::Black),
    ("red", BasicColor::Red),
    ("green", BasicColor::Green),
    ("yellow", BasicColor::Yellow),
    ("blue", BasicColor::Blue),
    ("magenta", BasicColor::Magenta),
    ("cyan", BasicColor::Cyan),
    ("white", BasicColor::White),
    ("blackBright", BasicColor::BlackBright),
    ("redBright", BasicColor::RedBright),
    ("greenBright", BasicColor::GreenBright),
    ("yellowBright", BasicColor::YellowBright),
    ("blueBright", BasicColor::BlueBright),
    ("magentaBright", BasicColor::MagentaBright),
    ("cyanBright", BasicColor::CyanBright),
    ("whiteBright", BasicColor::WhiteBright),
    ("gray", BasicColor::Gray),
    ("grey", BasicColor::Grey),
];

impl BasicColor {
    /// Every accepted basic color
    pub fn all() -> impl Iterator<Item = BasicColor> {
        BASIC_COLORS.iter().map(|(_, color)| *color)
    }

    /// Theme name of the color (`"blueBright"`)
    pub fn as_str(&self) -> &'static str {
        BASIC_COLORS
            .iter()
            .find(|(_, color)| color == self)
            .map(|(name, _)| *name)
            .unwrap_or("white")
    }

    /// Look a color up by its theme name.
    pub fn from_name(name: &str) -> Option<Self> {
        BASIC_COLORS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, color)| *color)
    }

    /// Terminal color for this name (palette slots 0-15)
    pub fn terminal_color(&self) -> Color {
        match self {
            Self::Black => Color::Black,
            Self::Red => Color::DarkRed,
            Self::Green => Color::DarkGreen,
            Self::Yellow => Color::DarkYellow,
            Self::Blue => Color::DarkBlue,
            Self::Magenta => Color::DarkMagenta,
            Self::Cyan => Color::DarkCyan,
            Self::White => Color::Grey,
            Self::BlackBright | Self::Gray | Self::Grey => Color::DarkGrey,
            Self::RedBright => Color::Red,
            Self::GreenBright => Color::Green,
            Self::YellowBright => Color::Yellow,
            Self::BlueBright => Color::Blue,
            Self::MagentaBright => Color::Magenta,
            Self::CyanBright => Color::Cyan,
            Self::WhiteBright => Color::White,
        }
    }

    /// Dotted style spec understood by indicatif templates (`"blue.bright"`)
    pub fn dotted_style(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::BlackBright | Self::Gray | Self::Grey => "black.bright",
            Self::RedBright => "red.bright",
            Self::GreenBright => "green.bright",
            Self::YellowBright => "yellow.bright",
            Self::BlueBright => "blue.bright",
            Self::MagentaBright => "magenta.bright",
            Self::CyanBright => "cyan.bright",
            Self::WhiteBright => "white.bright",
        }
    }
}

impl fmt::Display for BasicColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BasicColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ValidationError::invalid("color", BASIC_COLOR_DOMAIN, s))
    }
}

impl Serialize for BasicColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A theme color: named basic color or a hex triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorValue {
    Basic(BasicColor),
    Hex { r: u8, g: u8, b: u8 },
}

impl ColorValue {
    /// Whether `value` is a syntactically valid `#rrggbb` triplet
    pub fn is_hex(value: &str) -> bool {
        HEX_COLOR.is_match(value)
    }

    /// Parse a theme color, reporting failures against `field`.
    pub fn parse(field: &str, value: &str) -> Result<Self, ValidationError> {
        if Self::is_hex(value) {
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&value[range], 16)
                    .map_err(|_| ValidationError::invalid(field, COLOR_DOMAIN, value))
            };
            return Ok(Self::Hex {
                r: channel(1..3)?,
                g: channel(3..5)?,
                b: channel(5..7)?,
            });
        }

        BasicColor::from_name(value)
            .map(Self::Basic)
            .ok_or_else(|| ValidationError::invalid(field, COLOR_DOMAIN, value))
    }

    pub fn terminal_color(&self) -> Color {
        match self {
            Self::Basic(basic) => basic.terminal_color(),
            Self::Hex { r, g, b } => Color::Rgb {
                r: *r,
                g: *g,
                b: *b,
            },
        }
    }
}

impl From<BasicColor> for ColorValue {
    fn from(color: BasicColor) -> Self {
        Self::Basic(color)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(basic) => write!(f, "{}", basic),
            Self::Hex { r, g, b } => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

impl FromStr for ColorValue {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("color", s)
    }
}

impl Serialize for ColorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Strategy used by boxes and lines to style rendered text.
pub trait Colorizer {
    fn colorize(&self, text: &str) -> String;
}

impl<F> Colorizer for F
where
    F: Fn(&str) -> String,
{
    fn colorize(&self, text: &str) -> String {
        self(text)
    }
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Colorizer for Plain {
    fn colorize(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Foreground and/or background paint.
///
/// Nested resets inside the painted text re-open this paint, so a line can
/// embed differently-colored fragments and keep its own colors afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paint {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl Paint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: impl Into<Color>) -> Self {
        self.foreground = Some(color.into());
        self
    }

    pub fn bg(mut self, color: impl Into<Color>) -> Self {
        self.background = Some(color.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.foreground.is_none() && self.background.is_none()
    }

    fn opening(&self) -> String {
        let mut open = String::new();
        if let Some(color) = self.foreground {
            open.push_str(&SetForegroundColor(color).to_string());
        }
        if let Some(color) = self.background {
            open.push_str(&SetBackgroundColor(color).to_string());
        }
        open
    }

    /// Paint `text` when stdout colors are enabled, else return it as-is.
    pub fn paint(&self, text: &str) -> String {
        if !console::colors_enabled() {
            return text.to_string();
        }
        self.render(text)
    }

    /// Paint `text` unconditionally.
    pub fn render(&self, text: &str) -> String {
        if self.is_empty() || text.is_empty() {
            return text.to_string();
        }

        let open = self.opening();
        let reset = ResetColor.to_string();
        let body = text.replace(&reset, &format!("{reset}{open}"));
        format!("{open}{body}{reset}")
    }
}

impl From<ColorValue> for Color {
    fn from(value: ColorValue) -> Self {
        value.terminal_color()
    }
}

impl From<BasicColor> for Color {
    fn from(value: BasicColor) -> Self {
        value.terminal_color()
    }
}

impl Colorizer for Paint {
    fn colorize(&self, text: &str) -> String {
        self.paint(text)
    }
}

/// Switch back to the terminal's default colors without a full reset.
///
/// Used for fragments that must stay uncolored inside a painted line; a
/// surrounding [`Paint`] only re-opens after full resets.
pub fn default_colors(text: &str) -> String {
    if !console::colors_enabled() {
        return text.to_string();
    }
    format!(
        "{}{}{}",
        SetForegroundColor(Color::Reset),
        SetBackgroundColor(Color::Reset),
        text
    )
}

/// Fixed palette for status messages and boxes
pub mod palette {
    use super::Paint;
    use crossterm::style::Color;

    pub fn confirmation_background() -> Paint {
        Paint::new().fg(Color::Grey).bg(Color::DarkGreen)
    }

    pub fn warning_background() -> Paint {
        Paint::new().fg(Color::Black).bg(Color::DarkYellow)
    }

    pub fn error_background() -> Paint {
        Paint::new().fg(Color::Grey).bg(Color::DarkRed)
    }
}
